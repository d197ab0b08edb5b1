//! Rendering module for converting blocks and documents to output formats.

mod html;
mod json;
mod report;

pub use html::{escape_html, format_table, render_html, HtmlRenderer, DEFAULT_TITLE, STYLESHEET_URL};
pub use json::{blocks_to_json, to_json, JsonFormat};
pub use report::to_report;
