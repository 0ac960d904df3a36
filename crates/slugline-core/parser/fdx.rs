//! Final Draft (FDX) scene heading extraction
//!
//! FDX is XML in which every screenplay element is a `Paragraph` carrying a
//! `Type` attribute. Scene headings are the paragraphs typed
//! `Scene Heading`; their text may be split across several `Text` runs.
//!
//! ```xml
//! <FinalDraft DocumentType="Script" Version="5">
//!   <Content>
//!     <Paragraph Type="Scene Heading"><Text>INT. KITCHEN - NIGHT</Text></Paragraph>
//!     <Paragraph Type="Action"><Text>The kettle screams.</Text></Paragraph>
//!   </Content>
//! </FinalDraft>
//! ```
//!
//! The whole document is checked for well-formedness while streaming; any
//! failure discards what was collected so far.

use super::builder::SceneCollector;
use super::errors::{IssueCategory, ParseIssue};
use super::scene::ParsedScene;
use crate::{CoreError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const PARAGRAPH: &[u8] = b"Paragraph";
const TYPE_ATTRIBUTE: &[u8] = b"Type";
const SCENE_HEADING_TYPE: &str = "Scene Heading";

/// Heading paragraph currently being read
struct OpenHeading {
    depth: usize,
    text: String,
}

/// Extract scene headings from an FDX document, in document order
///
/// # Errors
///
/// Returns [`CoreError::MalformedXml`] when the document is not well-formed:
/// syntax errors, mismatched or unclosed elements, undefined entities, no
/// root element, more than one root, or text outside the root.
pub fn parse_fdx(text: &str) -> Result<(Vec<ParsedScene>, Vec<ParseIssue>)> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = true;

    let mut collector = SceneCollector::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut ordinal = 0usize;
    let mut open: Option<OpenHeading> = None;

    loop {
        let position = u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX);
        let event = reader
            .read_event()
            .map_err(|err| CoreError::malformed_xml(err, position))?;

        match event {
            Event::Start(element) => {
                enter_element(&mut depth, &mut seen_root, position)?;
                let heading = is_heading_paragraph(&element, position)?;
                if open.is_none() && heading {
                    open = Some(OpenHeading {
                        depth,
                        text: String::new(),
                    });
                }
            }
            Event::Empty(element) => {
                enter_element(&mut depth, &mut seen_root, position)?;
                depth -= 1;
                let heading = is_heading_paragraph(&element, position)?;
                if open.is_none() && heading {
                    ordinal += 1;
                    skip_paragraph(&mut collector, "", ordinal);
                }
            }
            Event::End(_) => {
                if open.as_ref().is_some_and(|heading| heading.depth == depth) {
                    if let Some(heading) = open.take() {
                        ordinal += 1;
                        if !collector.offer(&heading.text, ordinal) {
                            skip_paragraph(&mut collector, &heading.text, ordinal);
                        }
                    }
                }
                depth = depth.checked_sub(1).ok_or_else(|| {
                    CoreError::malformed_xml("closing tag without an open element", position)
                })?;
            }
            Event::Text(content) => {
                let content = content
                    .unescape()
                    .map_err(|err| CoreError::malformed_xml(err, position))?;
                if depth == 0 && !content.trim().is_empty() {
                    return Err(CoreError::malformed_xml(
                        "text outside the root element",
                        position,
                    ));
                }
                if let Some(heading) = open.as_mut() {
                    heading.text.push_str(&content);
                }
            }
            Event::CData(content) => {
                if depth == 0 {
                    return Err(CoreError::malformed_xml(
                        "CDATA outside the root element",
                        position,
                    ));
                }
                if let Some(heading) = open.as_mut() {
                    heading.text.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let position = u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX);
    if depth > 0 {
        return Err(CoreError::malformed_xml(
            format!("{depth} element(s) left unclosed"),
            position,
        ));
    }
    if !seen_root {
        return Err(CoreError::malformed_xml("document has no root element", position));
    }

    Ok(collector.finish())
}

/// Track nesting and reject a second root element
fn enter_element(depth: &mut usize, seen_root: &mut bool, position: u64) -> Result<()> {
    if *depth == 0 {
        if *seen_root {
            return Err(CoreError::malformed_xml(
                "more than one root element",
                position,
            ));
        }
        *seen_root = true;
    }
    *depth += 1;
    Ok(())
}

/// Check every attribute of an element and report whether it is a scene
/// heading paragraph
///
/// Unquoted values, duplicate names and bad entities are well-formedness
/// errors on any element, not only on paragraphs.
fn is_heading_paragraph(element: &BytesStart<'_>, position: u64) -> Result<bool> {
    let is_paragraph = element.name().as_ref() == PARAGRAPH;
    let mut heading = false;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| CoreError::malformed_xml(err, position))?;
        let value = attribute
            .unescape_value()
            .map_err(|err| CoreError::malformed_xml(err, position))?;
        if is_paragraph && attribute.key.as_ref() == TYPE_ATTRIBUTE {
            heading = value == SCENE_HEADING_TYPE;
        }
    }

    Ok(heading)
}

fn skip_paragraph(collector: &mut SceneCollector, text: &str, ordinal: usize) {
    let text = text.trim();
    tracing::debug!(ordinal, text, "scene heading paragraph without INT/EXT token");
    collector.note(ParseIssue::warning(
        IssueCategory::Structure,
        if text.is_empty() {
            "empty scene heading paragraph skipped".to_string()
        } else {
            format!("scene heading paragraph '{text}' has no INT/EXT token and was skipped")
        },
        ordinal,
    ));
}
