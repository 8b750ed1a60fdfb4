use scraper::node::Node;
use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Link { text: String, url: String },
    Text(String),
}

/// Flatten a markup fragment into blocks, in document order.
///
/// Headings and anchors are emitted whole; text nested inside them is not repeated as
/// `Text`. Anchors without an `href` fall through as plain text.
pub fn tokenize(markup: &str) -> Vec<Block> {
    if markup.trim().is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(markup);
    let mut blocks = Vec::new();

    for node in fragment.root_element().descendants() {
        if node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| is_container(el.name()) || is_link(el.name(), el.attr("href")))
        }) {
            continue;
        }

        match node.value() {
            Node::Text(text) => {
                let text = collapse_whitespace(text);
                if !text.is_empty() {
                    blocks.push(Block::Text(text));
                }
            }
            Node::Element(el) => {
                let Some(element) = ElementRef::wrap(node) else {
                    continue;
                };
                if let Some(level) = heading_level(el.name()) {
                    blocks.push(Block::Heading {
                        level,
                        text: element_text(&element),
                    });
                } else if let Some(href) = el.attr("href").filter(|_| el.name() == "a") {
                    blocks.push(Block::Link {
                        text: element_text(&element),
                        url: href.trim().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Elements whose subtree is consumed by a single block (or dropped).
fn is_container(tag: &str) -> bool {
    heading_level(tag).is_some() || matches!(tag, "script" | "style" | "template" | "noscript")
}

fn is_link(tag: &str, href: Option<&str>) -> bool {
    tag == "a" && href.is_some()
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    collapse_whitespace(&raw)
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
