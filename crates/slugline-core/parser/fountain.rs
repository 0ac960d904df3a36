//! Fountain and plain-text scene heading extraction
//!
//! Fountain marks scene headings only by their leading `INT`/`EXT` token,
//! so the document is read line by line and every other line is skipped
//! without trace.

use super::builder::SceneCollector;
use super::errors::ParseIssue;
use super::scene::ParsedScene;

/// Extract scene headings from Fountain or plain text, in line order
///
/// Returns the scenes (possibly empty) and any soft issues. An empty result
/// is not an error at this level; [`Screenplay::parse`](super::Screenplay::parse)
/// turns it into [`CoreError::NoScenesFound`](crate::CoreError::NoScenesFound).
pub fn parse_fountain(text: &str) -> (Vec<ParsedScene>, Vec<ParseIssue>) {
    let mut collector = SceneCollector::new();

    for (index, line) in text.split('\n').enumerate() {
        collector.offer(line, index + 1);
    }

    collector.finish()
}
