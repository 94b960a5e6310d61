//! Shortcode tokenizer.
//!
//! Splits raw step content into [`Node`]s in a single left-to-right scan.
//! Line breaks inside a shortcode separate tokens like any other whitespace.
//! A `[` whose closing `]` is not found before another `[` or the end of the
//! content is ordinary text.

use crate::Attributes;
use crate::grammar::{
    AcceptanceTag, ChoiceKind, ChoiceTag, GroupBoundary, InputKind, InputTag, Node, QuizTag,
    SubmitTag, TagKind,
};

/// Result of recognizing the inside of one `[...]`.
enum ParsedTag {
    Node(Node),
    /// Acceptance takes its label from the text after the closing bracket.
    Acceptance(String),
}

/// Parse step content into a flat list of nodes.
///
/// Never fails: anything that is not a well-formed shortcode ends up in
/// [`Node::Literal`] or [`Node::Unrecognized`].
///
/// # Example
///
/// ```
/// use wpcf_shortcode::{Node, parse};
///
/// let nodes = parse("Name: [text* your-name]");
/// assert_eq!(nodes.len(), 2);
/// assert!(matches!(&nodes[0], Node::Literal(text) if text == "Name: "));
/// assert_eq!(nodes[1].field_name(), Some("your-name"));
/// ```
#[must_use]
pub fn parse(content: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while let Some(offset) = content[pos..].find('[') {
        let start = pos + offset;
        literal.push_str(&content[pos..start]);

        let rest = &content[start..];
        let Some(close) = find_closing(rest, true).or_else(|| find_closing(rest, false)) else {
            literal.push('[');
            pos = start + 1;
            continue;
        };

        let inner = &rest[1..close];
        let mut consumed = close + 1;

        let node = match parse_tag(inner) {
            Some(ParsedTag::Node(node)) => node,
            Some(ParsedTag::Acceptance(name)) => {
                let (label, label_len) = take_label(&rest[consumed..]);
                consumed += label_len;
                Node::Acceptance(AcceptanceTag { name, label })
            }
            None => Node::Unrecognized(rest[..consumed].to_owned()),
        };

        if !literal.is_empty() {
            nodes.push(Node::Literal(std::mem::take(&mut literal)));
        }
        nodes.push(node);
        pos = start + consumed;
    }

    literal.push_str(&content[pos..]);
    if !literal.is_empty() {
        nodes.push(Node::Literal(literal));
    }

    nodes
}

/// Collect posted field names in first-appearance order, without duplicates.
///
/// Group names are not fields and are skipped.
///
/// # Example
///
/// ```
/// use wpcf_shortcode::field_names;
///
/// let names = field_names(r#"[text* your-name] [email your-email] [text your-name]"#);
/// assert_eq!(names, vec!["your-name", "your-email"]);
/// ```
#[must_use]
pub fn field_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for node in parse(content) {
        if let Some(name) = node.field_name()
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_owned());
        }
    }
    names
}

/// Find the byte offset of the `]` closing the shortcode that starts `s`.
///
/// When `quote_aware` is set, brackets inside `"..."` are skipped.
fn find_closing(s: &str, quote_aware: bool) -> Option<usize> {
    let mut in_quote = false;

    for (i, c) in s.char_indices().skip(1) {
        match c {
            '"' if quote_aware => in_quote = !in_quote,
            _ if in_quote => {}
            '[' => return None,
            ']' => return Some(i),
            _ => {}
        }
    }

    None
}

/// Recognize the text between `[` and `]`.
fn parse_tag(inner: &str) -> Option<ParsedTag> {
    let keyword_end = inner
        .find(|c: char| c == '*' || c.is_whitespace())
        .unwrap_or(inner.len());
    let kind = TagKind::from_keyword(&inner[..keyword_end])?;

    let mut rest = &inner[keyword_end..];
    let required = match rest.strip_prefix('*') {
        Some(stripped) if kind.accepts_required_marker() => {
            rest = stripped;
            true
        }
        Some(_) => return None,
        None => false,
    };

    let node = match kind {
        TagKind::Text => input(InputKind::Text, required, rest)?,
        TagKind::Email => input(InputKind::Email, required, rest)?,
        TagKind::Url => input(InputKind::Url, required, rest)?,
        TagKind::Tel => input(InputKind::Tel, required, rest)?,
        TagKind::Date => input(InputKind::Date, required, rest)?,
        TagKind::Number => input(InputKind::Number, required, rest)?,
        TagKind::Textarea => input(InputKind::Textarea, required, rest)?,
        TagKind::File => input(InputKind::File, required, rest)?,
        TagKind::Select => choice(ChoiceKind::Select, required, rest)?,
        TagKind::Checkbox => choice(ChoiceKind::Checkbox, required, rest)?,
        TagKind::Radio => choice(ChoiceKind::Radio, required, rest)?,
        TagKind::Quiz => quiz(rest)?,
        TagKind::Submit => {
            let label = Body::split(rest).quoted.into_iter().next()?;
            Node::Submit(SubmitTag { label })
        }
        TagKind::Acceptance => {
            let (name, _) = split_name(rest)?;
            return Some(ParsedTag::Acceptance(name.to_owned()));
        }
        TagKind::Group => Node::GroupBoundary(GroupBoundary::Open {
            name: rest.split_whitespace().next().map(str::to_owned),
        }),
        TagKind::GroupEnd => Node::GroupBoundary(GroupBoundary::Close),
    };

    Some(ParsedTag::Node(node))
}

fn input(kind: InputKind, required: bool, rest: &str) -> Option<Node> {
    let (name, fragment) = split_name(rest)?;
    Some(Node::Input(InputTag {
        kind,
        required,
        name: name.to_owned(),
        attrs: Attributes::parse(fragment),
    }))
}

fn choice(kind: ChoiceKind, required: bool, rest: &str) -> Option<Node> {
    let (name, fragment) = split_name(rest)?;
    let body = Body::split(fragment);
    Some(Node::Choice(ChoiceTag {
        kind,
        required,
        name: name.to_owned(),
        attrs: Attributes::parse(&body.unquoted.join(" ")),
        options: body.quoted,
    }))
}

fn quiz(rest: &str) -> Option<Node> {
    let (name, fragment) = split_name(rest)?;
    let pair = Body::split(fragment).quoted.into_iter().next()?;
    let (question, answer) = match pair.split_once('|') {
        Some((question, answer)) => (question.to_owned(), Some(answer.to_owned())),
        None => (pair, None),
    };
    Some(Node::Quiz(QuizTag {
        name: name.to_owned(),
        question,
        answer,
    }))
}

/// Split `" your-name maxlength:10"` into the field name and what follows.
///
/// The name must be separated from the keyword by whitespace and consist of
/// ASCII letters, digits, `_` and `-`.
fn split_name(rest: &str) -> Option<(&str, &str)> {
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }

    let name_end = trimmed
        .find(|c: char| !is_name_char(c))
        .unwrap_or(trimmed.len());
    if name_end == 0 {
        return None;
    }

    Some((&trimmed[..name_end], &trimmed[name_end..]))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Label text for an acceptance tag: everything up to the next `<` or `[`.
///
/// Returns the trimmed label and the number of bytes consumed.
fn take_label(after: &str) -> (String, usize) {
    let trimmed = after.trim_start();
    let skipped = after.len() - trimmed.len();
    let end = trimmed.find(['<', '[']).unwrap_or(trimmed.len());
    (trimmed[..end].trim().to_owned(), skipped + end)
}

/// Tag body split into bare tokens and quoted strings.
#[derive(Debug, Default, PartialEq, Eq)]
struct Body<'a> {
    unquoted: Vec<&'a str>,
    /// Non-empty quoted strings without their quotes.
    quoted: Vec<String>,
}

impl<'a> Body<'a> {
    fn split(fragment: &'a str) -> Self {
        let mut body = Self::default();
        let mut remaining = fragment.trim_start();

        while !remaining.is_empty() {
            if let Some(after_quote) = remaining.strip_prefix('"') {
                let Some(end) = after_quote.find('"') else {
                    // Unbalanced quote: treat the tail as bare tokens
                    body.unquoted.extend(remaining.split_whitespace());
                    break;
                };
                if end > 0 {
                    body.quoted.push(after_quote[..end].to_owned());
                }
                remaining = &after_quote[end + 1..];
            } else {
                let end = remaining
                    .find(|c: char| c.is_whitespace() || c == '"')
                    .unwrap_or(remaining.len());
                body.unquoted.push(&remaining[..end]);
                remaining = &remaining[end..];
            }
            remaining = remaining.trim_start();
        }

        body
    }
}
