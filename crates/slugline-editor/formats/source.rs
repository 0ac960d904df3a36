//! Reading screenplay source files
//!
//! Reading bytes is the only step of an import that touches I/O. It is
//! available blocking, from any reader, or (with the `async` feature)
//! through tokio.

use crate::core::{EditorError, Result};
use slugline_core::ScriptFormat;
use std::io::Read;
use std::path::Path;

/// Metadata about the file being imported
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// File name as selected (no directory)
    pub name: String,
    pub size_bytes: u64,
    /// Format detected from the name
    pub format: ScriptFormat,
}

impl SourceFile {
    /// Describe a file, detecting its format from the name
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let format = ScriptFormat::from_file_name(&name);
        Self {
            name,
            size_bytes,
            format,
        }
    }

    /// Label shown next to the file name ("FDX", "Fountain", "Plain Text")
    pub const fn format_label(&self) -> &'static str {
        self.format.label()
    }
}

/// Configuration for source reading and decoding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImportConfig {
    /// Largest accepted source file
    pub max_source_bytes: u64,

    /// Reject invalid UTF-8 instead of replacing it
    pub strict_utf8: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: 10 * 1024 * 1024, // 10MB, screenplays are a few MB at most
            strict_utf8: false,
        }
    }
}

impl ImportConfig {
    /// Reject sources above [`ImportConfig::max_source_bytes`]
    pub(crate) fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_source_bytes {
            return Err(EditorError::FileTooLarge {
                size,
                limit: self.max_source_bytes,
            });
        }
        Ok(())
    }
}

/// Raw bytes of a source file with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub source: SourceFile,
    pub bytes: Vec<u8>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Read a source file from disk
///
/// # Errors
///
/// [`EditorError::FileTooLarge`] above the configured limit,
/// [`EditorError::IoError`] when the file cannot be read.
pub fn read_source(path: &Path, config: &ImportConfig) -> Result<LoadedSource> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| EditorError::io(format!("Failed to open {}: {e}", path.display())))?;
    config.check_size(metadata.len())?;

    let bytes = std::fs::read(path)
        .map_err(|e| EditorError::io(format!("Failed to read {}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read source file");
    loaded(file_name(path), bytes, config)
}

/// Read a source from any reader, e.g. a dropped file's stream
///
/// # Errors
///
/// [`EditorError::FileTooLarge`] above the configured limit,
/// [`EditorError::IoError`] when reading fails.
pub fn read_source_from_reader(
    name: &str,
    reader: &mut dyn Read,
    config: &ImportConfig,
) -> Result<LoadedSource> {
    let mut bytes = Vec::new();
    reader
        .take(config.max_source_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| EditorError::io(format!("Failed to read {name}: {e}")))?;

    loaded(name.to_string(), bytes, config)
}

/// Read a source file from disk without blocking the runtime
///
/// # Errors
///
/// Same as [`read_source`].
#[cfg(feature = "async")]
pub async fn read_source_async(path: &Path, config: &ImportConfig) -> Result<LoadedSource> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| EditorError::io(format!("Failed to open {}: {e}", path.display())))?;
    config.check_size(metadata.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| EditorError::io(format!("Failed to read {}: {e}", path.display())))?;

    loaded(file_name(path), bytes, config)
}

fn loaded(name: String, bytes: Vec<u8>, config: &ImportConfig) -> Result<LoadedSource> {
    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    config.check_size(size)?;
    Ok(LoadedSource {
        source: SourceFile::new(name, size),
        bytes,
    })
}
