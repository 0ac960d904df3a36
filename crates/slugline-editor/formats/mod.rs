//! Screenplay import formats
//!
//! Each supported format is a [`ScriptImporter`] describing itself with a
//! [`FormatInfo`] (for file pickers) and turning decoded text into a
//! [`Screenplay`]. The [`ImporterRegistry`] maps a detected
//! [`ScriptFormat`] to the importer that handles it.

pub mod fdx;
pub mod fountain;
pub mod source;

pub use fdx::FdxImporter;
pub use fountain::FountainImporter;
pub use source::{read_source, read_source_from_reader, ImportConfig, LoadedSource, SourceFile};

#[cfg(feature = "async")]
pub use source::read_source_async;

use slugline_core::{Screenplay, ScriptFormat};
use std::fmt;

/// Metadata about an import format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format handled
    pub format: ScriptFormat,
    /// File extensions supported by this format
    pub extensions: Vec<String>,
    /// MIME type for this format
    pub mime_type: String,
    /// Brief description of the format
    pub description: String,
}

/// Trait for turning decoded screenplay text into scenes
pub trait ScriptImporter: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn format_info(&self) -> &FormatInfo;

    /// Check if this importer can handle the given file extension
    fn can_import(&self, extension: &str) -> bool {
        self.format_info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Parse decoded text
    ///
    /// # Errors
    ///
    /// Any [`CoreError`](slugline_core::CoreError) from the grammar:
    /// structural failure or no scenes found.
    fn import_text(&self, text: &str) -> slugline_core::Result<Screenplay>;
}

/// Registry for managing available importers
#[derive(Debug)]
pub struct ImporterRegistry {
    importers: Vec<Box<dyn ScriptImporter>>,
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ImporterRegistry {
    /// Registry with no importers
    pub fn empty() -> Self {
        Self {
            importers: Vec::new(),
        }
    }

    /// Registry with FDX, Fountain and plain-text importers
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(FdxImporter::new()));
        registry.register(Box::new(FountainImporter::fountain()));
        registry.register(Box::new(FountainImporter::plain_text()));
        registry
    }

    /// Register an importer; a later registration for the same format wins
    pub fn register(&mut self, importer: Box<dyn ScriptImporter>) {
        let format = importer.format_info().format;
        self.importers
            .retain(|existing| existing.format_info().format != format);
        self.importers.push(importer);
    }

    /// Importer for a detected format
    pub fn find_importer(&self, format: ScriptFormat) -> Option<&dyn ScriptImporter> {
        self.importers
            .iter()
            .find(|importer| importer.format_info().format == format)
            .map(|importer| importer.as_ref())
    }

    /// Importer for a file extension
    pub fn find_by_extension(&self, extension: &str) -> Option<&dyn ScriptImporter> {
        self.importers
            .iter()
            .find(|importer| importer.can_import(extension))
            .map(|importer| importer.as_ref())
    }

    /// All supported extensions, sorted, for a file picker filter
    pub fn supported_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .importers
            .iter()
            .flat_map(|importer| importer.format_info().extensions.iter().cloned())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }
}
