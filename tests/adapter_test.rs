use blockify::adapter::adapt;
use blockify::{process, Options};

fn run(html: &str) -> blockify::ProcessedContent {
    process(html, "https://example.com/page").unwrap_or_else(|e| panic!("process failed: {e}"))
}

#[test]
fn three_thousand_char_paragraph_becomes_two_paragraph_blocks() {
    let paragraph = "lorem ipsum dolor sit amet ".repeat(112); // ~3000 chars
    let html = format!(
        "<html><body><main><h1>Long</h1><p>{paragraph}</p></main></body></html>"
    );
    let result = run(&html);
    let options = Options::default();
    let adapted = adapt(&result.blocks, &options);

    let paragraphs: Vec<_> = adapted
        .blocks
        .iter()
        .filter(|b| b.type_name() == "paragraph")
        .collect();
    assert_eq!(paragraphs.len(), 2);
    assert!(paragraphs[0]
        .rich_text_content()
        .chars()
        .count()
        <= options.max_rich_text_chars);
    // Splitting at whitespace keeps every word intact.
    assert!(paragraphs[0].rich_text_content().ends_with(' '));
    assert!(!adapted.truncated);
}

#[test]
fn ordered_list_maps_to_numbered_items_in_order() {
    let result = run(
        "<html><body><main><h1>Steps</h1>\
         <p>Follow the steps in the exact order given below.</p>\
         <ol><li>A</li><li>B</li></ol></main></body></html>",
    );
    let adapted = adapt(&result.blocks, &Options::default());

    let items: Vec<String> = adapted
        .blocks
        .iter()
        .filter(|b| b.type_name() == "numbered_list_item")
        .map(|b| b.rich_text_content())
        .collect();
    assert_eq!(items, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn oversized_page_truncates_to_the_block_cap() {
    let mut body = String::from("<h1>Many Sections</h1>");
    for i in 0..150 {
        body.push_str(&format!("<h2>Section number {i}</h2><hr>"));
    }
    let html = format!("<html><body><main>{body}</main></body></html>");
    let result = run(&html);
    let options = Options::default();
    let adapted = adapt(&result.blocks, &options);

    assert_eq!(adapted.blocks.len(), options.max_blocks_per_request);
    assert!(adapted.truncated);
    assert!(adapted.warnings.iter().any(|w| w.contains("truncated")));
}

#[test]
fn small_page_is_never_flagged_truncated() {
    let result = run(
        "<html><body><main><h1>Tiny</h1>\
         <p>Just one ordinary paragraph of content here.</p></main></body></html>",
    );
    let adapted = adapt(&result.blocks, &Options::default());
    assert!(!adapted.truncated);
    assert!(adapted.blocks.len() >= 2);
}

#[test]
fn full_notion_shape_round_trips_through_json() {
    let result = run(
        "<html><body><main><h1>Doc</h1>\
         <p>Paragraph content that is long enough to survive.</p>\
         <pre><code class='language-rust'>fn main() {}</code></pre>\
         <h4>Deep Heading</h4>\
         </main></body></html>",
    );
    let adapted = adapt(&result.blocks, &Options::default());
    let json = serde_json::to_value(&adapted.blocks)
        .unwrap_or_else(|e| panic!("serialize failed: {e}"));
    let array = json.as_array().unwrap_or_else(|| panic!("array expected"));

    assert!(array.iter().all(|b| b["object"] == "block"));
    let code = array
        .iter()
        .find(|b| b["type"] == "code")
        .unwrap_or_else(|| panic!("no code block"));
    assert_eq!(code["code"]["language"], "rust");

    // h4 clamps to the schema's lowest heading tier.
    assert!(array.iter().any(|b| b["type"] == "heading_3"));
}
