//! Shared scene list assembly for both grammars
//!
//! Numbers and ids are handed out here, in the order candidates are
//! offered, so both parsers produce `1..=N` with fresh ids.

use super::errors::{IssueCategory, ParseIssue};
use super::heading::recognize_heading;
use super::scene::{ParsedScene, SceneId};

#[derive(Debug, Default)]
pub(crate) struct SceneCollector {
    scenes: Vec<ParsedScene>,
    issues: Vec<ParseIssue>,
}

impl SceneCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run the recognizer on one candidate and keep it if it is a heading
    pub(crate) fn offer(&mut self, candidate: &str, line: usize) -> bool {
        let heading_text = candidate.trim();
        let Some(heading) = recognize_heading(heading_text) else {
            return false;
        };

        let number = u32::try_from(self.scenes.len() + 1).unwrap_or(u32::MAX);

        if heading.degraded {
            tracing::debug!(line, heading = heading_text, "degraded scene heading");
            self.issues.push(ParseIssue::warning(
                IssueCategory::Heading,
                format!("could not isolate a location in '{heading_text}'"),
                line,
            ));
        } else {
            tracing::trace!(line, number, location = %heading.location, "scene heading");
        }

        self.scenes.push(ParsedScene {
            id: SceneId::new(number),
            scene_number: number,
            heading: heading_text.to_string(),
            location: heading.location,
            time_of_day: heading.time_of_day,
            int_ext: heading.int_ext,
            source_line: line,
        });
        true
    }

    /// Record a soft issue found outside the recognizer
    pub(crate) fn note(&mut self, issue: ParseIssue) {
        self.issues.push(issue);
    }

    pub(crate) fn finish(self) -> (Vec<ParsedScene>, Vec<ParseIssue>) {
        (self.scenes, self.issues)
    }
}
