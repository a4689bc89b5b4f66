//! Record → document conversion.
//!
//! [`to_document`] is a pure function: it reads the configured content
//! property, flattens its HTML to plain text, and projects the fixed metadata
//! set. It never fails; a missing or non-string content property produces an
//! empty body.

use html2text::render::TrivialDecorator;
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::models::{ContentRecord, Document, DocumentMetadata};

/// Line width handed to the HTML renderer. Large enough that it never wraps
/// real content.
const NO_WRAP_WIDTH: usize = 1 << 20;

pub fn to_document(record: &ContentRecord, config: &LoaderConfig) -> Document {
    let html = match record.get_str(config.content_property()) {
        Some(html) => html,
        None => {
            debug!(
                id = record.id(),
                property = config.content_property(),
                "content property missing or not a string; using empty body"
            );
            ""
        }
    };

    Document {
        page_content: html_to_text(html),
        metadata: DocumentMetadata {
            id: record.id().to_string(),
            path: record.path().to_string(),
            name: record.name().to_string(),
            node_type: record.node_type().to_string(),
            last_modified_by: record.last_modified_by().map(str::to_string),
            last_modified: record.last_modified().map(str::to_string),
            url: format!("{}{}", config.base_url(), record.path()),
            collection: config.collection().to_string(),
        },
    }
}

/// Convert HTML to plain text without wrapping.
///
/// Entities are decoded and tags dropped with no markdown-style decoration
/// or link footnotes. Whitespace inside a block collapses to single spaces
/// and block boundaries collapse to a single `\n`; newlines from the source
/// markup are not kept. Table borders are removed and cell separators become
/// spaces.
pub fn html_to_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let rendered = match html2text::config::with_decorator(TrivialDecorator::new())
        .string_from_read(html.as_bytes(), NO_WRAP_WIDTH)
    {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "failed to render HTML content");
            return String::new();
        }
    };

    rendered
        .lines()
        .filter(|line| !is_table_border(line))
        .map(|line| {
            line.split(is_box_drawing)
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Box-drawing block (U+2500..U+257F), used by the renderer for table borders.
fn is_box_drawing(c: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&c)
}

fn is_table_border(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| is_box_drawing(c) || c.is_whitespace())
}
