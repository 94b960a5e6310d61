//! Shortcode grammar: recognized tag kinds and parsed node types.
//!
//! The set of tag keywords is closed. Anything outside it becomes
//! [`Node::Unrecognized`] and is passed through as literal text.

use crate::Attributes;

/// Tag keyword recognized inside `[...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Text,
    Email,
    Url,
    Tel,
    Date,
    Number,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Acceptance,
    File,
    Quiz,
    Submit,
    /// Opening conditional group marker: `[group name]`.
    Group,
    /// Closing conditional group marker: `[/group]`.
    GroupEnd,
}

impl TagKind {
    /// All tag kinds, in the order front ends list them.
    pub const ALL: [Self; 16] = [
        Self::Text,
        Self::Email,
        Self::Url,
        Self::Tel,
        Self::Date,
        Self::Number,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Acceptance,
        Self::File,
        Self::Quiz,
        Self::Submit,
        Self::Group,
        Self::GroupEnd,
    ];

    /// Look up a tag kind by keyword (without the `*` marker).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Keyword as written in shortcode markup.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Acceptance => "acceptance",
            Self::File => "file",
            Self::Quiz => "quiz",
            Self::Submit => "submit",
            Self::Group => "group",
            Self::GroupEnd => "/group",
        }
    }

    /// Whether `keyword*` is valid for this kind.
    #[must_use]
    pub fn accepts_required_marker(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Email
                | Self::Url
                | Self::Tel
                | Self::Date
                | Self::Number
                | Self::Textarea
                | Self::Select
                | Self::Checkbox
                | Self::Radio
                | Self::File
        )
    }
}

/// Single-value input controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Url,
    Tel,
    Date,
    Number,
    Textarea,
    File,
}

impl InputKind {
    /// Value of the `type` attribute, or `None` for `<textarea>`.
    #[must_use]
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Email => Some("email"),
            Self::Url => Some("url"),
            Self::Tel => Some("tel"),
            Self::Date => Some("date"),
            Self::Number => Some("number"),
            Self::File => Some("file"),
            Self::Textarea => None,
        }
    }
}

/// Controls populated from a quoted option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    Select,
    Checkbox,
    Radio,
}

/// `[text* your-name maxlength:10]` and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTag {
    pub kind: InputKind,
    pub required: bool,
    pub name: String,
    pub attrs: Attributes,
}

/// `[select menu "A" "B"]`, `[checkbox ...]`, `[radio ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceTag {
    pub kind: ChoiceKind,
    pub required: bool,
    pub name: String,
    /// Unquoted `key:value` tokens; parsed but not emitted.
    pub attrs: Attributes,
    /// Quoted option texts in encounter order.
    pub options: Vec<String>,
}

/// `[acceptance name] label text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptanceTag {
    pub name: String,
    /// Literal text following the tag, trimmed.
    pub label: String,
}

/// `[quiz name "question|answer"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTag {
    pub name: String,
    pub question: String,
    /// Kept for completeness. Never rendered.
    pub answer: Option<String>,
}

/// `[submit "label"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTag {
    pub label: String,
}

/// Conditional group markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupBoundary {
    Open { name: Option<String> },
    Close,
}

/// One unit of parsed step content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Author text between shortcodes.
    Literal(String),
    Input(InputTag),
    Choice(ChoiceTag),
    Acceptance(AcceptanceTag),
    Quiz(QuizTag),
    Submit(SubmitTag),
    GroupBoundary(GroupBoundary),
    /// Bracketed text that is not a well-formed shortcode, kept verbatim.
    Unrecognized(String),
}

impl Node {
    /// Field name posted by this node, if it is a field.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Input(tag) => Some(&tag.name),
            Self::Choice(tag) => Some(&tag.name),
            Self::Acceptance(tag) => Some(&tag.name),
            Self::Quiz(tag) => Some(&tag.name),
            Self::Literal(_)
            | Self::Submit(_)
            | Self::GroupBoundary(_)
            | Self::Unrecognized(_) => None,
        }
    }
}
