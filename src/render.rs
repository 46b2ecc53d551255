//! Reference rendering visitor: title and body lines indented by depth.

use std::io::Write;

use itertools::Itertools;
use tracing::instrument;

use crate::config::RenderSettings;
use crate::domain::{Outline, OutlineError, OutlineNode, OutlineResult};

/// Formats one visited node into `out`.
pub fn format_node(node: &OutlineNode, depth: usize, settings: &RenderSettings, out: &mut String) {
    let indent = " ".repeat(depth * settings.indent_width);

    out.push_str(&indent);
    out.push_str(node.title());
    if settings.show_tags && !node.tags().is_empty() {
        out.push_str(&format!(" :{}:", node.tags().iter().join(":")));
    }
    out.push('\n');

    if settings.show_body {
        out.push_str(&indent);
        out.push_str(node.body());
        out.push('\n');
    }
}

/// Writes the whole document to `writer` in document order.
#[instrument(level = "debug", skip(outline, writer))]
pub fn write_outline<W: Write>(outline: &Outline, mut writer: W, settings: &RenderSettings) -> OutlineResult<()> {
    let mut buf = String::new();
    for (_, node, depth) in outline.iter() {
        buf.clear();
        format_node(node, depth, settings, &mut buf);
        writer
            .write_all(buf.as_bytes())
            .map_err(|e| OutlineError::io("write outline", e))?;
    }
    writer.flush().map_err(|e| OutlineError::io("flush outline", e))
}

/// Renders the whole document into a string.
pub fn to_text(outline: &Outline, settings: &RenderSettings) -> String {
    let mut text = String::new();
    outline.walk(|_, node, depth| format_node(node, depth, settings, &mut text));
    text
}
