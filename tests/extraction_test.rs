use blockify::{process, process_bytes, process_with_options, Block, BlockContent, Options};

fn run(html: &str) -> blockify::ProcessedContent {
    process(html, "https://example.com/article").unwrap_or_else(|e| panic!("process failed: {e}"))
}

#[test]
fn heading_survives_but_trivial_paragraph_is_dropped() {
    let result = run("<html><body><main><h1>Title</h1><p>Short.</p></main></body></html>");
    assert_eq!(result.blocks.len(), 1);
    assert_eq!(
        result.blocks[0].content,
        BlockContent::Heading {
            level: 1,
            text: "Title".to_string()
        }
    );
}

#[test]
fn ordered_list_keeps_order_and_flag() {
    let result = run(
        "<html><body><main><h1>List page</h1>\
         <p>An introduction paragraph with enough length to keep.</p>\
         <ol><li>A</li><li>B</li></ol></main></body></html>",
    );
    let list = result
        .blocks
        .iter()
        .find(|b| matches!(b.content, BlockContent::List { .. }))
        .unwrap_or_else(|| panic!("no list block"));
    assert_eq!(
        list.content,
        BlockContent::List {
            ordered: true,
            items: vec!["A".to_string(), "B".to_string()]
        }
    );
}

#[test]
fn boilerplate_never_reaches_the_blocks() {
    let result = run(
        r#"<html><body>
            <nav>Home / About / Contact</nav>
            <div class="cookie-banner">We use cookies to improve your experience.</div>
            <main>
                <h1>Real Article</h1>
                <p>This paragraph is the actual content of the page under test.</p>
            </main>
            <aside class="sidebar">Trending now: unrelated sidebar headlines.</aside>
            <footer>Copyright notice and footer links.</footer>
        </body></html>"#,
    );

    let all_text: String = result.blocks.iter().map(Block::text).collect();
    assert!(all_text.contains("actual content"));
    assert!(!all_text.contains("cookies"));
    assert!(!all_text.contains("Trending"));
    assert!(!all_text.contains("Copyright"));
}

#[test]
fn block_order_matches_document_order() {
    let result = run(
        "<html><body><article>\
         <h1>Title</h1>\
         <p>The opening paragraph sets up what follows next.</p>\
         <h2>Details</h2>\
         <ul><li>first</li><li>second</li></ul>\
         <blockquote>A quoted remark worth preserving here.</blockquote>\
         <hr>\
         </article></body></html>",
    );
    let kinds: Vec<&str> = result.blocks.iter().map(Block::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["heading", "text", "heading", "list", "quote", "divider"]
    );
}

#[test]
fn repeated_runs_serialize_identically() {
    let html = r#"<html lang="en"><head><title>Stable Page</title></head><body><main>
        <h1>Stable Page</h1>
        <p>Determinism means the same bytes out for the same bytes in.</p>
        <img src="/img/diagram.png" alt="Diagram">
    </main></body></html>"#;

    let a = run(html);
    let b = run(html);
    let json_a = serde_json::to_string(&a).unwrap_or_else(|e| panic!("serialize failed: {e}"));
    let json_b = serde_json::to_string(&b).unwrap_or_else(|e| panic!("serialize failed: {e}"));
    assert_eq!(json_a, json_b);
}

#[test]
fn consecutive_paragraphs_merge_into_one_text_block() {
    let html = "<html><body><main><h1>T</h1>\
         <p>First paragraph with plenty of words inside.</p>\
         <p>Second paragraph, also comfortably long enough.</p></main></body></html>";

    let merged = run(html);
    let text_blocks = merged
        .blocks
        .iter()
        .filter(|b| matches!(b.content, BlockContent::Text { .. }))
        .count();
    assert_eq!(text_blocks, 1);

    let options = Options {
        merge_consecutive_text: false,
        ..Options::default()
    };
    let unmerged = process_with_options(html, "https://example.com/article", &options)
        .unwrap_or_else(|e| panic!("process failed: {e}"));
    let text_blocks = unmerged
        .blocks
        .iter()
        .filter(|b| matches!(b.content, BlockContent::Text { .. }))
        .count();
    assert_eq!(text_blocks, 2);
}

#[test]
fn metadata_comes_from_head_and_url() {
    let result = run(
        r#"<html lang="en"><head>
            <title>Tab Title</title>
            <meta property="og:title" content="Shared Title">
            <meta name="description" content="A concise description of the page.">
            <meta name="author" content="Jamie Writer">
            <link rel="canonical" href="https://example.com/article">
        </head><body><main>
            <h1>Body Heading</h1>
            <p>Content paragraph that is long enough to keep around.</p>
        </main></body></html>"#,
    );

    assert_eq!(result.title, "Shared Title");
    assert_eq!(result.metadata.description, "A concise description of the page.");
    assert_eq!(result.metadata.author.as_deref(), Some("Jamie Writer"));
    assert_eq!(result.metadata.domain, "example.com");
    assert_eq!(result.metadata.language, "en");
    assert_eq!(
        result.metadata.canonical_url.as_deref(),
        Some("https://example.com/article")
    );
    assert_eq!(
        result.metadata.favicon_url.as_deref(),
        Some("https://example.com/favicon.ico")
    );
}

#[test]
fn summary_takes_leading_prose_not_headings() {
    let result = run(
        "<html><body><main><h1>Page Heading</h1>\
         <p>The summary should start with this sentence.</p></main></body></html>",
    );
    assert!(result.short_summary.starts_with("The summary should start"));
}

#[test]
fn relative_image_sources_become_absolute() {
    let result = run(
        "<html><body><article><h2>Pictures</h2>\
         <p>Some context text that is long enough to stay.</p>\
         <img src='/images/photo.jpg' alt='Photo'></article></body></html>",
    );
    let image = result
        .blocks
        .iter()
        .find(|b| matches!(b.content, BlockContent::Image { .. }))
        .unwrap_or_else(|| panic!("no image block"));
    assert_eq!(
        image.content,
        BlockContent::Image {
            alt: "Photo".to_string(),
            src: "https://example.com/images/photo.jpg".to_string()
        }
    );
}

#[test]
fn video_embed_survives_as_link() {
    let result = run(
        "<html><body><main><h1>Watch</h1>\
         <p>A paragraph introducing the embedded recording below.</p>\
         <iframe src='https://www.youtube.com/embed/xyz' title='Talk recording'></iframe>\
         </main></body></html>",
    );
    let link = result
        .blocks
        .iter()
        .find(|b| matches!(b.content, BlockContent::Link { .. }))
        .unwrap_or_else(|| panic!("no link block"));
    assert_eq!(
        link.content,
        BlockContent::Link {
            text: "Talk recording".to_string(),
            href: "https://www.youtube.com/embed/xyz".to_string()
        }
    );
}

#[test]
fn latin1_bytes_decode_before_parsing() {
    let html: Vec<u8> =
        b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9 Guide</title></head>\
          <body><main><h1>Caf\xE9 Guide</h1>\
          <p>Where to find the best caf\xE9 in town, according to locals.</p></main></body></html>"
            .to_vec();
    let result = process_bytes(&html, "https://example.com/cafe")
        .unwrap_or_else(|e| panic!("process failed: {e}"));
    assert_eq!(result.title, "Caf\u{e9} Guide");
}

#[test]
fn language_fallback_is_a_warning_not_an_error() {
    let result = run(
        "<html><body><main><h1>Plain</h1>\
         <p>Plain ascii content without any language declaration.</p></main></body></html>",
    );
    assert_eq!(result.metadata.language, "en");
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("language detection")));
}
