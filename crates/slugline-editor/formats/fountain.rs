//! Fountain and plain-text importers
//!
//! Both read the same line grammar; they differ only in the extensions and
//! label they advertise.

use super::{FormatInfo, ScriptImporter};
use slugline_core::{Screenplay, ScriptFormat};

#[derive(Debug)]
pub struct FountainImporter {
    info: FormatInfo,
}

impl FountainImporter {
    /// Importer for `.fountain` files
    pub fn fountain() -> Self {
        Self {
            info: FormatInfo {
                format: ScriptFormat::Fountain,
                extensions: vec!["fountain".to_string()],
                mime_type: "text/x-fountain".to_string(),
                description: "Fountain screenplay markup".to_string(),
            },
        }
    }

    /// Importer for `.txt` and any unrecognized file, read as Fountain
    pub fn plain_text() -> Self {
        Self {
            info: FormatInfo {
                format: ScriptFormat::PlainText,
                extensions: vec!["txt".to_string()],
                mime_type: "text/plain".to_string(),
                description: "Plain text screenplay, read as untagged Fountain".to_string(),
            },
        }
    }
}

impl ScriptImporter for FountainImporter {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn import_text(&self, text: &str) -> slugline_core::Result<Screenplay> {
        Screenplay::parse(self.info.format, text)
    }
}
