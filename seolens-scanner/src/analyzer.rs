// Structural SEO signal extraction from fetched HTML

use crate::result::{ImageAltIssue, PageSignals};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Elements whose text never renders on the page.
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static META_VIEWPORT: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="viewport"]"#));
static CANONICAL: LazyLock<Selector> = LazyLock::new(|| selector(r#"link[rel="canonical"]"#));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));

/// Parse `html` and pull out every signal the audit reports on.
///
/// The parser is error tolerant, so malformed markup yields whatever could be
/// recovered and absent elements fall back to empty defaults.
pub fn analyze_html(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    let signals = PageSignals {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        h1_tags: extract_h1_tags(&document),
        images_without_alt: find_images_without_alt(&document),
        has_viewport_meta: document.select(&META_VIEWPORT).next().is_some(),
        has_canonical: document.select(&CANONICAL).next().is_some(),
        body_text: visible_body_text(&document),
    };

    debug!(
        "Analyzed document: title={} chars, {} h1, {} images without alt",
        signals.title_length(),
        signals.h1_count(),
        signals.images_without_alt.len()
    );

    signals
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn extract_meta_description(document: &Html) -> String {
    document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

fn extract_h1_tags(document: &Html) -> Vec<String> {
    document.select(&H1).map(element_text).collect()
}

fn find_images_without_alt(document: &Html) -> Vec<ImageAltIssue> {
    document
        .select(&IMG)
        .enumerate()
        .filter(|(_, img)| {
            img.value()
                .attr("alt")
                .is_none_or(|alt| alt.trim().is_empty())
        })
        .map(|(index, img)| {
            let element = img.value();
            let src = [element.attr("src"), element.attr("data-src")]
                .into_iter()
                .flatten()
                .find(|value| !value.is_empty())
                .unwrap_or_default();
            ImageAltIssue {
                src: src.to_string(),
                index,
            }
        })
        .collect()
}

/// Text a reader would see in `<body>`: text nodes concatenated as-is, so
/// inline markup inside a word does not split it.
fn visible_body_text(document: &Html) -> String {
    let Some(body) = document.select(&BODY).next() else {
        return String::new();
    };

    let mut text = String::new();
    for node in body.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_TEXT_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let signals = analyze_html(
            "<html><head><title>T</title></head><body><h1>A</h1><h1>B</h1></body></html>",
        );

        assert_eq!(signals.title, "T");
        assert_eq!(signals.title_length(), 1);
        assert_eq!(signals.h1_count(), 2);
        assert_eq!(signals.h1_tags, vec!["A", "B"]);
        assert_eq!(signals.meta_description_length(), 0);
        assert!(!signals.has_viewport_meta);
        assert!(!signals.has_canonical);
    }

    #[test]
    fn test_title_is_trimmed_first_match() {
        let signals = analyze_html(
            "<html><head><title>\n  Home Page  \n</title><title>Second</title></head></html>",
        );
        assert_eq!(signals.title, "Home Page");
    }

    #[test]
    fn test_missing_elements_fall_back_to_defaults() {
        let signals = analyze_html("");
        assert_eq!(signals.title, "");
        assert_eq!(signals.meta_description, "");
        assert!(signals.h1_tags.is_empty());
        assert!(signals.images_without_alt.is_empty());
        assert_eq!(signals.body_text, "");
    }

    #[test]
    fn test_meta_viewport_and_canonical() {
        let signals = analyze_html(
            r#"<html><head>
                <meta name="description" content="A page about things">
                <meta name="viewport" content="width=device-width">
                <link rel="canonical" href="https://example.com/">
            </head><body></body></html>"#,
        );
        assert_eq!(signals.meta_description, "A page about things");
        assert_eq!(signals.meta_description_length(), 19);
        assert!(signals.has_viewport_meta);
        assert!(signals.has_canonical);
    }

    #[test]
    fn test_images_flagged_with_unfiltered_index() {
        let signals = analyze_html(
            r#"<body>
                <img src="/a.png">
                <img src="/b.png" alt="Logo">
                <img data-src="/c.png" alt="">
                <img src="/d.png" alt="   ">
                <img src="" data-src="/e.png">
                <img>
            </body>"#,
        );

        let flagged: Vec<(&str, usize)> = signals
            .images_without_alt
            .iter()
            .map(|issue| (issue.src.as_str(), issue.index))
            .collect();
        assert_eq!(
            flagged,
            vec![
                ("/a.png", 0),
                ("/c.png", 2),
                ("/d.png", 3),
                ("/e.png", 4),
                ("", 5)
            ]
        );
    }

    #[test]
    fn test_no_images() {
        let signals = analyze_html("<html><body><p>No pictures here</p></body></html>");
        assert!(signals.images_without_alt.is_empty());
    }

    #[test]
    fn test_h1_tags_may_be_empty_strings() {
        let signals = analyze_html("<body><h1>  </h1><h1><span>Nested</span> heading</h1></body>");
        assert_eq!(signals.h1_tags, vec!["", "Nested heading"]);
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let signals = analyze_html("<html><head><title>Broken<body><h1>Open <p>unclosed <img src=x.png");
        assert_eq!(signals.h1_count(), 0);
        assert!(signals.title.starts_with("Broken"));
    }

    #[test]
    fn test_body_text_skips_scripts_and_styles() {
        let signals = analyze_html(
            r#"<body><p>Rust crawler</p><script>var hidden = 1;</script><style>.x { color: red }</style> <div>guide<b>book</b></div></body>"#,
        );
        assert_eq!(signals.body_text, "Rust crawler guidebook");
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let signals =
            analyze_html("<body><p>Key<b>word</b> key<b>word</b> Rust<em>acean</em></p></body>");
        assert_eq!(signals.body_text, "Keyword keyword Rustacean");
    }
}
