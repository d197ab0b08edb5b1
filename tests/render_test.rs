//! Integration tests for the HTML renderer.

use lawpdf::parser::text_blocks;
use lawpdf::render::{render_html, DEFAULT_TITLE, STYLESHEET_URL};
use lawpdf::{BlockType, ContentBlock};

fn blocks(page_text: &str) -> Vec<ContentBlock> {
    text_blocks(1, page_text)
}

fn list_pairs(html: &str) -> (usize, usize) {
    (html.matches("<ul>").count(), html.matches("</ul>").count())
}

#[test]
fn test_one_list_per_run() {
    let blocks = blocks(
        "REGISTRATION\n\n- taxable persons\n\n- voluntary registrants\n\nThe threshold applies.\n\n1. first step\n\n2. second step\n\n3. third step",
    );
    let types: Vec<_> = blocks.iter().map(|b| b.block_type).collect();
    assert_eq!(
        types,
        vec![
            BlockType::H2,
            BlockType::ListItem,
            BlockType::ListItem,
            BlockType::Paragraph,
            BlockType::ListItem,
            BlockType::ListItem,
            BlockType::ListItem,
        ]
    );

    let html = render_html(&blocks, "Guide");
    assert_eq!(list_pairs(&html), (2, 2));
    assert!(html.contains("<li>taxable persons</li>"));
    assert!(html.contains("<li>second step</li>"));
}

#[test]
fn test_no_list_items_no_list() {
    let html = render_html(&blocks("OVERVIEW\n\nPlain text only."), "Guide");
    assert_eq!(list_pairs(&html), (0, 0));
}

#[test]
fn test_list_at_end_is_closed() {
    let html = render_html(&blocks("- a\n\n- b"), "Guide");
    assert_eq!(list_pairs(&html), (1, 1));
    assert!(html.find("</ul>").unwrap() < html.find("</main>").unwrap());
}

#[test]
fn test_script_escaped_once() {
    let blocks = vec![ContentBlock::text(
        1,
        BlockType::Paragraph,
        "see <script>alert(1)</script>",
        "see <script>alert(1)</script>",
    )];
    let html = render_html(&blocks, "Guide");

    assert_eq!(html.matches("&lt;script&gt;").count(), 1);
    assert!(!html.contains("&amp;lt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_template() {
    let html = render_html(&[], DEFAULT_TITLE);
    assert!(html.starts_with("<!DOCTYPE html>\n<html lang='en'>"));
    assert!(html.contains(&format!("<link rel='stylesheet' href='{}'>", STYLESHEET_URL)));
    assert!(html.contains("<title>Parsed Document</title>"));
    assert!(html.contains("<h1>Parsed Document</h1>"));
    assert!(html.ends_with("</body>\n\n</html>"));
}

#[test]
fn test_table_block() {
    let grid = vec![
        vec!["Supply".to_string(), "Rate".to_string()],
        vec!["Exports".to_string(), "0%".to_string()],
    ];
    let html = render_html(&[ContentBlock::table(2, grid)], "Rates");
    assert!(html.contains("<th>Supply</th>"));
    assert!(html.contains("<td>0%</td>"));
    assert_eq!(html.matches("<table>").count(), 1);
}
