//! # Slugline Core
//!
//! Scene heading extraction for screenplay documents. Reads Final Draft XML
//! (FDX), Fountain markup and untagged plain text, and produces an ordered,
//! numbered list of scene headings with their interior/exterior marker,
//! location and time of day.
//!
//! ## Features
//!
//! - **One heading grammar**: FDX and Fountain share a single recognizer
//! - **Permissive fallback**: a line that opens with `INT`/`EXT` is never
//!   dropped, only degraded in structure
//! - **Structural errors kept apart**: malformed XML and "no headings" are
//!   distinct failures
//! - **Serde support**: parsed scenes round-trip through any serde format
//!
//! ## Quick Start
//!
//! ```rust
//! use slugline_core::{Screenplay, ScriptFormat, TimeOfDay};
//!
//! let text = "INT. WAREHOUSE - NIGHT\nShe enters.\nEXT. STREET - DAY\nHe runs.";
//! let screenplay = Screenplay::parse(ScriptFormat::Fountain, text)?;
//!
//! assert_eq!(screenplay.scenes().len(), 2);
//! assert_eq!(screenplay.scenes()[0].location, "WAREHOUSE");
//! assert_eq!(screenplay.scenes()[0].time_of_day, TimeOfDay::Night);
//! # Ok::<(), slugline_core::CoreError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod parser;
pub mod utils;

pub use parser::{
    IntExt, IssueCategory, IssueSeverity, ParseIssue, ParsedScene, SceneId, Screenplay,
    TimeOfDay,
};
pub use utils::CoreError;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Screenplay source formats, detected from the file name.
///
/// Plain text carries no markup of its own and is read with the Fountain
/// grammar, so only [`ScriptFormat::Fdx`] selects a different parser.
///
/// # Examples
///
/// ```rust
/// use slugline_core::ScriptFormat;
///
/// assert_eq!(ScriptFormat::from_file_name("pilot.fdx"), ScriptFormat::Fdx);
/// assert_eq!(ScriptFormat::from_file_name("pilot.FOUNTAIN"), ScriptFormat::Fountain);
/// assert_eq!(ScriptFormat::from_file_name("notes.txt"), ScriptFormat::PlainText);
/// assert_eq!(ScriptFormat::from_file_name("README"), ScriptFormat::PlainText);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptFormat {
    /// Final Draft XML
    Fdx,
    /// Fountain plain-text markup
    Fountain,
    /// Anything else, read as untagged Fountain
    #[default]
    PlainText,
}

impl ScriptFormat {
    /// Detect the format from a file name.
    ///
    /// Never fails: unknown or missing extensions fall back to
    /// [`ScriptFormat::PlainText`].
    pub fn from_file_name(name: &str) -> Self {
        name.rsplit_once('.')
            .map_or(Self::PlainText, |(_, extension)| {
                Self::from_extension(extension)
            })
    }

    /// Detect the format from a bare extension (without the dot)
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("fdx") {
            Self::Fdx
        } else if extension.eq_ignore_ascii_case("fountain") {
            Self::Fountain
        } else {
            Self::PlainText
        }
    }

    /// Human-readable label shown next to the file name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fdx => "FDX",
            Self::Fountain => "Fountain",
            Self::PlainText => "Plain Text",
        }
    }

    /// File extensions that select this format
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Fdx => &["fdx"],
            Self::Fountain => &["fountain"],
            Self::PlainText => &["txt"],
        }
    }

    /// Whether documents of this format are read line by line
    pub const fn uses_fountain_grammar(self) -> bool {
        matches!(self, Self::Fountain | Self::PlainText)
    }
}

impl core::fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = core::result::Result<T, CoreError>;
