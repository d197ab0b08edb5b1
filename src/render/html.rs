//! HTML rendering for classified blocks.
//!
//! Output follows a fixed article template: the guide stylesheet, a header
//! carrying the title, and the blocks inside `<main>`.

use crate::classify::strip_list_marker;
use crate::model::{BlockContent, ContentBlock, TableGrid};

/// Stylesheet linked from every rendered page.
pub const STYLESHEET_URL: &str =
    "https://gtlcdn-eufeh8ffbvbvacgf.z03.azurefd.net/guide/stylesheets/dev/article.css";

/// Title used when the caller has none.
pub const DEFAULT_TITLE: &str = "Parsed Document";

const BLOCK_INDENT: &str = "            ";
const ROW_GROUP_INDENT: &str = "                ";
const ROW_INDENT: &str = "                    ";
const CELL_INDENT: &str = "                        ";

const FOOTER: &str = "\n        </main>\n    </div>\n</body>\n\n</html>";

/// Render blocks into the article template.
pub fn render_html(blocks: &[ContentBlock], title: &str) -> String {
    HtmlRenderer::new(title).render(blocks)
}

/// HTML renderer.
///
/// Consecutive list items are wrapped in a single `<ul>`; any other block
/// closes an open list.
pub struct HtmlRenderer {
    title: String,
    parts: Vec<String>,
    list_open: bool,
}

impl HtmlRenderer {
    /// Create a renderer for a document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parts: Vec::new(),
            list_open: false,
        }
    }

    /// Render the blocks; consumes the renderer.
    pub fn render(mut self, blocks: &[ContentBlock]) -> String {
        self.parts.push(header(&self.title));

        for block in blocks {
            self.render_block(block);
        }
        self.close_list();

        self.parts.push(FOOTER.to_string());
        self.parts.join("\n")
    }

    fn render_block(&mut self, block: &ContentBlock) {
        if block.is_list_item() {
            self.open_list();
            let item = strip_list_marker(block.text_content());
            self.parts
                .push(format!("{}<li>{}</li>", ROW_GROUP_INDENT, escape_html(item)));
            return;
        }

        self.close_list();
        match &block.content {
            BlockContent::Table(grid) => {
                if !grid.is_empty() {
                    self.parts.push(format_table(grid));
                }
            }
            BlockContent::Text(text) => {
                let tag = block.block_type.tag();
                self.parts.push(format!(
                    "{}<{}>{}</{}>",
                    BLOCK_INDENT,
                    tag,
                    escape_html(text),
                    tag
                ));
            }
        }
    }

    fn open_list(&mut self) {
        if !self.list_open {
            self.parts.push(format!("{}<ul>", BLOCK_INDENT));
            self.list_open = true;
        }
    }

    fn close_list(&mut self) {
        if self.list_open {
            self.parts.push(format!("{}</ul>", BLOCK_INDENT));
            self.list_open = false;
        }
    }
}

fn header(title: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n\
<html lang='en'>\n\
\n\
<head>\n    \
<meta charset='UTF-8'>\n    \
<meta name='viewport' content='width=device-width,initial-scale=1'>\n    \
<link rel='stylesheet' href='{}'>\n    \
<title>{}</title>\n\
</head>\n\
\n\
<body>\n    \
<div class='scope'>\n        \
<header>\n            \
<h1>{}</h1>\n        \
</header>\n        \
<main>",
        STYLESHEET_URL, title, title
    )
}

/// Render a cell grid as an HTML table, first row as header.
///
/// Empty cells are kept so body columns stay under their headers.
pub fn format_table(grid: &TableGrid) -> String {
    let mut html = String::new();
    let Some((head, body)) = grid.split_first() else {
        return html;
    };

    html.push_str(&format!("{}<table>\n", BLOCK_INDENT));
    html.push_str(&format!("{}<thead>\n", ROW_GROUP_INDENT));
    push_row(&mut html, head, "th");
    html.push_str(&format!("{}</thead>\n", ROW_GROUP_INDENT));

    if !body.is_empty() {
        html.push_str(&format!("{}<tbody>\n", ROW_GROUP_INDENT));
        for row in body {
            push_row(&mut html, row, "td");
        }
        html.push_str(&format!("{}</tbody>\n", ROW_GROUP_INDENT));
    }

    html.push_str(&format!("{}</table>\n", BLOCK_INDENT));
    html
}

fn push_row(html: &mut String, row: &[String], tag: &str) {
    html.push_str(&format!("{}<tr>\n", ROW_INDENT));
    for cell in row {
        html.push_str(&format!(
            "{}<{}>{}</{}>\n",
            CELL_INDENT,
            tag,
            escape_html(cell.trim()),
            tag
        ));
    }
    html.push_str(&format!("{}</tr>\n", ROW_INDENT));
}

/// Escape `&`, `<`, `>`, `"` and `'` for HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;

    fn block(block_type: BlockType, text: &str) -> ContentBlock {
        ContentBlock::text(1, block_type, text, text)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_template() {
        let html = render_html(&[], "VAT Guide");
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang='en'>\n\n<head>\n"));
        assert!(html.contains("    <meta charset='UTF-8'>\n"));
        assert!(html.contains(&format!("    <link rel='stylesheet' href='{}'>\n", STYLESHEET_URL)));
        assert!(html.contains("    <title>VAT Guide</title>\n</head>\n\n<body>\n"));
        assert!(html.contains("    <div class='scope'>\n        <header>\n            <h1>VAT Guide</h1>\n        </header>\n        <main>"));
        assert!(html.ends_with("        <main>\n\n        </main>\n    </div>\n</body>\n\n</html>"));
    }

    #[test]
    fn test_blocks_rendered_with_tags() {
        let html = render_html(
            &[
                block(BlockType::H2, "1. Scope"),
                block(BlockType::Paragraph, "Body text."),
                block(BlockType::Quote, "\"Quoted\""),
            ],
            "T",
        );
        assert!(html.contains("\n            <h2>1. Scope</h2>\n"));
        assert!(html.contains("\n            <p>Body text.</p>\n"));
        assert!(html.contains("\n            <blockquote>&quot;Quoted&quot;</blockquote>\n"));
    }

    #[test]
    fn test_list_items_grouped() {
        let html = render_html(
            &[
                block(BlockType::ListItem, "- first"),
                block(BlockType::ListItem, "2. second"),
                block(BlockType::Paragraph, "between"),
                block(BlockType::ListItem, "• third"),
            ],
            "T",
        );
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
        assert!(html.contains(
            "            <ul>\n                <li>first</li>\n                <li>second</li>\n            </ul>\n            <p>between</p>"
        ));
        assert!(html.contains("                <li>third</li>\n            </ul>\n\n        </main>"));
    }

    #[test]
    fn test_no_list_no_ul() {
        let html = render_html(&[block(BlockType::Paragraph, "text")], "T");
        assert!(!html.contains("<ul>"));
        assert!(!html.contains("</ul>"));
    }

    #[test]
    fn test_table_closes_list() {
        let grid = vec![vec!["A".to_string(), "B".to_string()]];
        let html = render_html(
            &[block(BlockType::ListItem, "- item"), ContentBlock::table(1, grid)],
            "T",
        );
        let ul_close = html.find("</ul>").unwrap();
        let table_open = html.find("<table>").unwrap();
        assert!(ul_close < table_open);
    }

    #[test]
    fn test_format_table() {
        let grid = vec![
            vec!["Supply".to_string(), "Rate".to_string()],
            vec!["Exports".to_string(), String::new()],
        ];
        let expected = "            <table>\n\
                \x20               <thead>\n\
                \x20                   <tr>\n\
                \x20                       <th>Supply</th>\n\
                \x20                       <th>Rate</th>\n\
                \x20                   </tr>\n\
                \x20               </thead>\n\
                \x20               <tbody>\n\
                \x20                   <tr>\n\
                \x20                       <td>Exports</td>\n\
                \x20                       <td></td>\n\
                \x20                   </tr>\n\
                \x20               </tbody>\n\
                \x20           </table>\n";
        assert_eq!(format_table(&grid), expected);
    }

    #[test]
    fn test_header_only_table_has_no_tbody() {
        let grid = vec![vec!["A".to_string()]];
        let html = format_table(&grid);
        assert!(html.contains("<thead>"));
        assert!(!html.contains("<tbody>"));
        assert_eq!(format_table(&Vec::new()), "");
    }

    #[test]
    fn test_escaped_exactly_once() {
        let html = render_html(&[block(BlockType::Paragraph, "<script>alert(1)</script>")], "a < b");
        assert!(html.contains("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"));
        assert!(!html.contains("&amp;lt;"));
        assert!(html.contains("<title>a &lt; b</title>"));
    }
}
