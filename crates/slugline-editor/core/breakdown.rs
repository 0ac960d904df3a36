//! Finalized scene breakdown handed to downstream consumers
//!
//! Produced once a session is committed. Budgeting, shot planning and
//! scheduling read these records; nothing here can be mutated back into a
//! session.

use super::scene_list::SceneList;
use crate::formats::SourceFile;
use slugline_core::{IntExt, ParsedScene, TimeOfDay};

/// One committed scene
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakdownEntry {
    pub scene_number: u32,
    pub location: String,
    pub time_of_day: TimeOfDay,
    pub int_ext: IntExt,
    pub heading: String,
}

impl From<&ParsedScene> for BreakdownEntry {
    fn from(scene: &ParsedScene) -> Self {
        Self {
            scene_number: scene.scene_number,
            location: scene.location.clone(),
            time_of_day: scene.time_of_day,
            int_ext: scene.int_ext,
            heading: scene.heading.clone(),
        }
    }
}

/// Committed scene list with the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneBreakdown {
    pub source: SourceFile,
    pub entries: Vec<BreakdownEntry>,
}

impl SceneBreakdown {
    pub(crate) fn new(source: SourceFile, scenes: &SceneList) -> Self {
        Self {
            source,
            entries: scenes.iter().map(BreakdownEntry::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scene count per time of day, in [`TimeOfDay::ALL`] order, zeros
    /// included
    pub fn count_by_time_of_day(&self) -> Vec<(TimeOfDay, usize)> {
        TimeOfDay::ALL
            .into_iter()
            .map(|time| {
                let count = self.entries.iter().filter(|e| e.time_of_day == time).count();
                (time, count)
            })
            .collect()
    }

    /// Scene count per interior/exterior marker, in [`IntExt::ALL`] order
    pub fn count_by_int_ext(&self) -> Vec<(IntExt, usize)> {
        IntExt::ALL
            .into_iter()
            .map(|marker| {
                let count = self.entries.iter().filter(|e| e.int_ext == marker).count();
                (marker, count)
            })
            .collect()
    }

    /// Distinct locations in first-appearance order
    pub fn locations(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.location.as_str()) {
                seen.push(entry.location.as_str());
            }
        }
        seen
    }
}
