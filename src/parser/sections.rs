use super::blocks::{self, Block};

/// One heading and everything after it up to the next heading.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub heading: String,
    pub body: Vec<Block>,
}

impl RawSection {
    /// Body text in document order, one line per text run. Link captions are left out.
    pub fn text(&self) -> String {
        self.body
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every text run including link captions, in document order. Field matchers read
    /// this, so a token wrapped in an anchor is still found.
    pub fn match_text(&self) -> String {
        self.body
            .iter()
            .map(|b| match b {
                Block::Text(t) => t.as_str(),
                Block::Link { text, .. } => text.as_str(),
                Block::Heading { text, .. } => text.as_str(),
            })
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Anchor targets in document order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.body.iter().filter_map(|b| match b {
            Block::Link { url, .. } => Some(url.as_str()),
            _ => None,
        })
    }
}

/// Split a flat block list at every heading. Blocks before the first heading are dropped.
pub fn split_sections(blocks: &[Block]) -> Vec<RawSection> {
    let mut sections: Vec<RawSection> = Vec::new();

    for block in blocks {
        match block {
            Block::Heading { text, .. } => sections.push(RawSection {
                heading: text.clone(),
                body: Vec::new(),
            }),
            other => {
                if let Some(current) = sections.last_mut() {
                    current.body.push(other.clone());
                }
            }
        }
    }

    sections
}

/// Tokenize and split in one go.
pub fn segment(markup: &str) -> Vec<RawSection> {
    split_sections(&blocks::tokenize(markup))
}
