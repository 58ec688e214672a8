//! HTML sanitization
//!
//! Strips non-content markup and normalizes whitespace into plain text.
//! Total over arbitrary input: malformed or empty markup yields empty text,
//! never an error.

/// Tags whose entire subtree is dropped during sanitization
pub const DEFAULT_STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Tags that separate blocks of visible text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "ul", "ol", "table",
    "section", "article", "blockquote",
];

/// Normalized plain text derived from page markup
///
/// Lines are newline-separated, individually trimmed, and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    pub content: String,
    pub char_count: usize,
}

impl CleanedText {
    fn new(content: String) -> Self {
        let char_count = content.chars().count();
        Self {
            content,
            char_count,
        }
    }
}

/// Extract clean plain text from markup
///
/// Subtrees rooted at any tag in `strip_tags` are dropped entirely; visible
/// text keeps a line break at every block-level boundary. Each remaining
/// line is trimmed, inner whitespace runs collapse to a single space, and
/// empty lines are removed.
pub fn sanitize(html: &str, strip_tags: &[&str]) -> CleanedText {
    let text = extract_visible_text(html, strip_tags);

    let content = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    CleanedText::new(content)
}

/// Extract the text of the first `<title>` element, if any
pub fn page_title(html: &str) -> Option<String> {
    let mut chars = html.chars().peekable();
    let mut in_title = false;
    let mut text = String::new();

    while let Some(c) = chars.next() {
        if c == '<' {
            let tag = read_tag(&mut chars);
            let (name, is_closing) = tag_name(&tag);

            if name == "title" {
                if is_closing {
                    break;
                }
                in_title = true;
            }
        } else if in_title {
            text.push(decode_entity(c, &mut chars));
        }
    }

    let title = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Walk the markup character by character, skipping stripped subtrees
fn extract_visible_text(html: &str, strip_tags: &[&str]) -> String {
    let mut output = String::new();
    let mut skip_stack: Vec<String> = Vec::new();
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let tag = read_tag(&mut chars);
            let (name, is_closing) = tag_name(&tag);

            if strip_tags.contains(&name.as_str()) {
                if is_closing {
                    if let Some(pos) = skip_stack.iter().rposition(|t| *t == name) {
                        skip_stack.remove(pos);
                    }
                } else if !tag.ends_with('/') {
                    skip_stack.push(name);
                }
                continue;
            }

            if !skip_stack.is_empty() {
                continue;
            }

            if BLOCK_TAGS.contains(&name.as_str()) {
                output.push('\n');
            }
        } else if skip_stack.is_empty() {
            output.push(decode_entity(c, &mut chars));
        }
    }

    output
}

/// Consume a tag up to (and including) the closing `>`
fn read_tag(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut tag = String::new();
    for next in chars.by_ref() {
        if next == '>' {
            break;
        }
        tag.push(next);
    }
    tag
}

/// Lowercased tag name and whether the tag is a closing one
fn tag_name(tag: &str) -> (String, bool) {
    let is_closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    (name, is_closing)
}

/// Decode an HTML entity starting from an ampersand
fn decode_entity(c: char, chars: &mut std::iter::Peekable<std::str::Chars>) -> char {
    if c != '&' {
        return c;
    }

    let mut entity = String::new();
    while let Some(&next) = chars.peek() {
        if next == ';' {
            chars.next();
            break;
        }
        if next.is_whitespace() || entity.len() > 10 {
            // Not a valid entity
            return '&';
        }
        entity.push(chars.next().unwrap());
    }

    match entity.as_str() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "#39" => '\'',
        "nbsp" => ' ',
        _ => {
            if let Some(num) = entity.strip_prefix('#') {
                let code = if let Some(hex) = num.strip_prefix('x') {
                    u32::from_str_radix(hex, 16).ok()
                } else {
                    num.parse::<u32>().ok()
                };
                if let Some(ch) = code.and_then(char::from_u32) {
                    return ch;
                }
            }
            '&'
        }
    }
}
