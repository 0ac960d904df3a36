//! Parsed scene records and their closed vocabularies
//!
//! A [`ParsedScene`] is one recognized scene heading. Its `scene_number` is
//! assigned by the parser and maintained by whoever owns the scene list;
//! nothing in this module renumbers.

use core::fmt;
use core::str::FromStr;

/// Opaque scene identifier, unique within one import
///
/// Ids are handed out in parse order and never reused, so an id stays valid
/// across edits and becomes dangling once its scene is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SceneId(u32);

impl SceneId {
    /// Wrap a raw identifier
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw identifier value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene-{}", self.0)
    }
}

/// Interior/exterior marker opening a scene heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntExt {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "INT"))]
    Int,
    #[cfg_attr(feature = "serde", serde(rename = "EXT"))]
    Ext,
    #[cfg_attr(feature = "serde", serde(rename = "INT/EXT"))]
    IntExt,
}

impl IntExt {
    /// All markers in display order
    pub const ALL: [Self; 3] = [Self::Int, Self::Ext, Self::IntExt];

    /// Normalize a heading token; `I/E` is an alias of `INT/EXT`
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("INT") {
            Some(Self::Int)
        } else if token.eq_ignore_ascii_case("EXT") {
            Some(Self::Ext)
        } else if token.eq_ignore_ascii_case("INT/EXT") || token.eq_ignore_ascii_case("I/E") {
            Some(Self::IntExt)
        } else {
            None
        }
    }

    /// Uppercase display form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Ext => "EXT",
            Self::IntExt => "INT/EXT",
        }
    }
}

impl fmt::Display for IntExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntExt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("unknown interior/exterior marker '{s}'"))
    }
}

/// Time of day closing a scene heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
    Morning,
    Evening,
    Dawn,
    Dusk,
}

impl TimeOfDay {
    /// All values in display order
    pub const ALL: [Self; 6] = [
        Self::Day,
        Self::Night,
        Self::Morning,
        Self::Evening,
        Self::Dawn,
        Self::Dusk,
    ];

    /// Case-insensitive match against the fixed vocabulary
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|value| value.as_str().eq_ignore_ascii_case(token))
    }

    /// Uppercase display form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Night => "NIGHT",
            Self::Morning => "MORNING",
            Self::Evening => "EVENING",
            Self::Dawn => "DAWN",
            Self::Dusk => "DUSK",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("unknown time of day '{s}'"))
    }
}

/// One recognized scene heading
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedScene {
    /// Identifier, stable across edits
    pub id: SceneId,

    /// 1-based position in the scene list
    pub scene_number: u32,

    /// Heading text as it appeared in the source
    pub heading: String,

    /// Location, or the whole heading when none could be isolated
    pub location: String,

    pub time_of_day: TimeOfDay,

    pub int_ext: IntExt,

    /// 1-based source line (Fountain) or heading paragraph ordinal (FDX)
    pub source_line: usize,
}

impl fmt::Display for ParsedScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {} - {}",
            self.scene_number, self.int_ext, self.location, self.time_of_day
        )
    }
}
