//! Final Draft (FDX) importer

use super::{FormatInfo, ScriptImporter};
use slugline_core::{Screenplay, ScriptFormat};

/// FDX importer backed by the streaming XML grammar
#[derive(Debug)]
pub struct FdxImporter {
    info: FormatInfo,
}

impl FdxImporter {
    pub fn new() -> Self {
        Self {
            info: FormatInfo {
                format: ScriptFormat::Fdx,
                extensions: vec!["fdx".to_string()],
                mime_type: "application/xml".to_string(),
                description: "Final Draft XML screenplay".to_string(),
            },
        }
    }
}

impl Default for FdxImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptImporter for FdxImporter {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn import_text(&self, text: &str) -> slugline_core::Result<Screenplay> {
        Screenplay::parse(ScriptFormat::Fdx, text)
    }
}
