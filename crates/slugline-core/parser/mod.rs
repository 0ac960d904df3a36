//! Screenplay scene heading parser
//!
//! Picks the grammar for a [`ScriptFormat`], runs it, and turns "no headings
//! at all" into an error. Both grammars share [`recognize_heading`].
//!
//! # Example
//!
//! ```rust
//! use slugline_core::{CoreError, Screenplay, ScriptFormat};
//!
//! let err = Screenplay::parse(ScriptFormat::Fountain, "FADE IN:\nJOHN walks.\n").unwrap_err();
//! assert!(matches!(err, CoreError::NoScenesFound { .. }));
//! ```

mod builder;
pub mod errors;
pub mod fdx;
pub mod fountain;
pub mod heading;
pub mod scene;

pub use errors::{IssueCategory, IssueSeverity, ParseIssue};
pub use fdx::parse_fdx;
pub use fountain::parse_fountain;
pub use heading::{is_scene_heading, recognize_heading, HeadingMatch};
pub use scene::{IntExt, ParsedScene, SceneId, TimeOfDay};

use crate::{CoreError, Result, ScriptFormat};

/// Scene headings parsed from one document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ScreenplayParts"))]
pub struct Screenplay {
    format: ScriptFormat,

    /// Never empty; numbered `1..=N` in document order
    scenes: Vec<ParsedScene>,

    /// Soft problems; none of them removed a recognized heading
    issues: Vec<ParseIssue>,
}

/// Unchecked wire form of [`Screenplay`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ScreenplayParts {
    format: ScriptFormat,
    scenes: Vec<ParsedScene>,
    #[serde(default)]
    issues: Vec<ParseIssue>,
}

#[cfg(feature = "serde")]
impl TryFrom<ScreenplayParts> for Screenplay {
    type Error = CoreError;

    /// Rejects an empty scene list and renumbers scenes in order
    fn try_from(parts: ScreenplayParts) -> Result<Self> {
        let ScreenplayParts {
            format,
            mut scenes,
            issues,
        } = parts;
        if scenes.is_empty() {
            return Err(CoreError::NoScenesFound { format });
        }
        for (scene, number) in scenes.iter_mut().zip(1u32..) {
            scene.scene_number = number;
        }
        Ok(Self {
            format,
            scenes,
            issues,
        })
    }
}

impl Screenplay {
    /// Parse decoded text with the grammar for `format`
    ///
    /// # Errors
    ///
    /// - [`CoreError::MalformedXml`] when an FDX document is not well-formed
    /// - [`CoreError::NoScenesFound`] when the document holds no scene
    ///   headings
    pub fn parse(format: ScriptFormat, text: &str) -> Result<Self> {
        let (scenes, issues) = match format {
            ScriptFormat::Fdx => match parse_fdx(text) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::warn!(%err, "FDX document rejected");
                    return Err(err);
                }
            },
            ScriptFormat::Fountain | ScriptFormat::PlainText => parse_fountain(text),
        };

        if scenes.is_empty() {
            tracing::warn!(format = %format, "no scene headings found");
            return Err(CoreError::NoScenesFound { format });
        }

        tracing::info!(
            format = %format,
            scenes = scenes.len(),
            issues = issues.len(),
            "parsed screenplay"
        );

        Ok(Self {
            format,
            scenes,
            issues,
        })
    }

    /// Parse text, detecting the grammar from a file name
    ///
    /// # Errors
    ///
    /// Same as [`Screenplay::parse`].
    pub fn parse_named(file_name: &str, text: &str) -> Result<Self> {
        Self::parse(ScriptFormat::from_file_name(file_name), text)
    }

    /// Format the document was parsed as
    pub const fn format(&self) -> ScriptFormat {
        self.format
    }

    /// Parsed scenes in document order
    pub fn scenes(&self) -> &[ParsedScene] {
        &self.scenes
    }

    /// Soft parse issues
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Take ownership of scenes and issues
    pub fn into_parts(self) -> (Vec<ParsedScene>, Vec<ParseIssue>) {
        (self.scenes, self.issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_reads_as_fountain() {
        let text = "INT. OFFICE - MORNING\nTyping.\n";
        let plain = Screenplay::parse(ScriptFormat::PlainText, text).unwrap();
        let fountain = Screenplay::parse(ScriptFormat::Fountain, text).unwrap();
        assert_eq!(plain.scenes(), fountain.scenes());
        assert_eq!(plain.format(), ScriptFormat::PlainText);
    }

    #[test]
    fn empty_documents_have_no_scenes() {
        for format in [ScriptFormat::Fountain, ScriptFormat::PlainText] {
            assert_eq!(
                Screenplay::parse(format, ""),
                Err(CoreError::NoScenesFound { format })
            );
        }
    }

    #[test]
    fn fdx_without_headings_is_no_scenes_not_malformed() {
        let err = Screenplay::parse(ScriptFormat::Fdx, "<FinalDraft><Content/></FinalDraft>")
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::NoScenesFound {
                format: ScriptFormat::Fdx
            }
        );
    }

    #[test]
    fn file_name_selects_grammar() {
        let xml = r#"<FinalDraft><Content><Paragraph Type="Scene Heading"><Text>INT. A - DAY</Text></Paragraph></Content></FinalDraft>"#;
        let screenplay = Screenplay::parse_named("a.fdx", xml).unwrap();
        assert_eq!(screenplay.format(), ScriptFormat::Fdx);
        assert_eq!(screenplay.scenes().len(), 1);

        // the same XML read as text has no heading lines
        assert!(Screenplay::parse_named("a.txt", xml).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_renumbers_and_rejects_empty() {
        let json = r#"{
            "format": "Fountain",
            "scenes": [
                {"id": 4, "scene_number": 9, "heading": "INT. A - DAY", "location": "A",
                 "time_of_day": "DAY", "int_ext": "INT", "source_line": 1},
                {"id": 5, "scene_number": 2, "heading": "EXT. B - NIGHT", "location": "B",
                 "time_of_day": "NIGHT", "int_ext": "EXT", "source_line": 3}
            ]
        }"#;
        let screenplay: Screenplay = serde_json::from_str(json).unwrap();
        let numbers: Vec<u32> = screenplay.scenes().iter().map(|s| s.scene_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(screenplay.issues().is_empty());

        let empty = r#"{"format": "Fdx", "scenes": [], "issues": []}"#;
        let err = serde_json::from_str::<Screenplay>(empty).unwrap_err();
        assert!(err.to_string().contains("No scene headings found in FDX document"));
    }
}
