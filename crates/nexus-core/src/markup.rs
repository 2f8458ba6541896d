//! Assistant reply markup → display blocks.
//!
//! A single left-to-right pass over the lines of a reply. The only state
//! carried between lines is the currently open fenced code block, if any.
//! Rules per line, first match wins:
//! 1. a line starting with ```` ``` ```` opens or closes a fence
//! 2. inside a fence every line is kept verbatim
//! 3. `## ` header, `### ` subheader, emoji section titles, `- `/`* ` bullets,
//!    blank lines as spacers, anything else as a plain paragraph
//!
//! No inline markup is interpreted. Malformed input never errors; it simply
//! degrades to paragraphs and spacers.

use nexus_types::block::{DisplayBlock, DEFAULT_CODE_LANGUAGE};

pub const FENCE: &str = "```";

/// Section-title prefixes the backend uses in place of `## `
pub const EMOJI_HEADER_MARKERS: &[&str] = &["🔧 ", "🚀 ", "💡 "];

const BULLET_MARKERS: &[&str] = &["- ", "* "];

/// Parse a reply into blocks. Pure: same input, same output.
///
/// A fence still open at end of input is dropped along with its content.
pub fn parse(text: &str) -> Vec<DisplayBlock> {
    let mut scanner = Scanner::default();
    for line in text.split('\n') {
        scanner.feed(line);
    }
    scanner.blocks
}

/// Code payloads of every closed fence, in order
pub fn code_blocks(text: &str) -> Vec<String> {
    parse(text)
        .into_iter()
        .filter_map(|block| match block {
            DisplayBlock::CodeBlock { code, .. } => Some(code),
            _ => None,
        })
        .collect()
}

struct OpenFence {
    language: String,
    lines: Vec<String>,
}

#[derive(Default)]
struct Scanner {
    blocks: Vec<DisplayBlock>,
    fence: Option<OpenFence>,
}

impl Scanner {
    fn feed(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix(FENCE) {
            match self.fence.take() {
                Some(open) => self.blocks.push(DisplayBlock::CodeBlock {
                    language: open.language,
                    code: open.lines.join("\n"),
                }),
                None => {
                    let tag = rest.trim();
                    let language = if tag.is_empty() { DEFAULT_CODE_LANGUAGE } else { tag };
                    self.fence = Some(OpenFence {
                        language: language.to_string(),
                        lines: Vec::new(),
                    });
                }
            }
            return;
        }

        if let Some(open) = self.fence.as_mut() {
            open.lines.push(line.to_string());
            return;
        }

        if let Some(block) = classify(line) {
            self.blocks.push(block);
        }
    }
}

/// Block for a line outside any fence; `None` for an empty bullet.
fn classify(line: &str) -> Option<DisplayBlock> {
    if let Some(rest) = line.strip_prefix("## ") {
        return Some(DisplayBlock::header(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Some(DisplayBlock::subheader(rest.trim()));
    }
    if EMOJI_HEADER_MARKERS.iter().any(|m| line.starts_with(m)) {
        return Some(DisplayBlock::header(line.trim()));
    }

    let leading_trimmed = line.trim_start();
    if let Some(marker) = BULLET_MARKERS.iter().find(|m| leading_trimmed.starts_with(**m)) {
        let text = leading_trimmed[marker.len()..].trim();
        return if text.is_empty() {
            None
        } else {
            Some(DisplayBlock::bullet(text))
        };
    }

    let text = line.trim();
    if text.is_empty() {
        Some(DisplayBlock::Spacer)
    } else {
        Some(DisplayBlock::paragraph(text))
    }
}
