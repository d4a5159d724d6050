use crate::config::Settings;
use crate::editor::{Editor, Position};
use crate::{CommentsError, Result};

/// Metadata property that suppresses embedded-title rendering in the host.
pub const SUPPRESSION_KEY: &str = "cssclass";
pub const SUPPRESSION_VALUE: &str = "hide-embed-title";

/// Heading under which comment text lives inside an annotation file.
pub const COMMENTS_HEADING: &str = "# Comments";

const SUPPRESSION_LINE: &str = "cssclass: hide-embed-title\n";
const SUPPRESSION_BLOCK: &str = "---\ncssclass: hide-embed-title\n---\n";

/// Initial contents of a new annotation file: optional metadata block,
/// backlink to the host document, and the comments heading.
#[must_use]
pub fn comment_preamble(host_file_name: &str, settings: &Settings) -> String {
    let mut preamble = String::new();
    if settings.set_css_class {
        preamble.push_str(SUPPRESSION_BLOCK);
    }
    preamble.push_str("Original File: [[");
    preamble.push_str(host_file_name);
    preamble.push_str("]]\n");
    preamble.push_str(COMMENTS_HEADING);
    preamble.push('\n');
    preamble
}

/// Inline reference that embeds an annotation file into its host.
#[must_use]
pub fn embed_marker(comment_file_name: &str) -> String {
    format!("![[{comment_file_name}#Comments]]")
}

/// A pending insertion into the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEdit {
    pub at: Position,
    pub text: String,
}

/// Plan the edit that marks a host document with the suppression property.
///
/// Idempotent: an already-marked document plans no edit. A document whose
/// metadata block carries a different `cssclass` value is reported as a
/// conflict and left alone; overwriting user metadata is never safe.
pub fn plan_embed_suppression(host_content: &str) -> Result<Option<MetadataEdit>> {
    if host_content.contains(SUPPRESSION_LINE) {
        return Ok(None);
    }
    if host_content.starts_with("---") {
        if host_content.contains("\ncssclass: ") {
            return Err(CommentsError::ConflictingMetadata(SUPPRESSION_KEY.to_string()));
        }
        return Ok(Some(MetadataEdit {
            at: Position::new(1, 0),
            text: SUPPRESSION_LINE.to_string(),
        }));
    }
    Ok(Some(MetadataEdit {
        at: Position::new(0, 0),
        text: SUPPRESSION_BLOCK.to_string(),
    }))
}

/// Apply a planned suppression edit through the editor surface.
pub fn apply_embed_suppression(editor: &mut dyn Editor, edit: &MetadataEdit) {
    editor.replace_range(&edit.text, edit.at, None);
}
