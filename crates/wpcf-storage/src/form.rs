//! Form definition records.
//!
//! Field names follow the stored JSON documents (`multiStepSettings`,
//! `conditionalFieldsSettings`, `date`), so records written by other front
//! ends load unchanged. Their `date` may be a display string rather than a
//! timestamp; see [`FormDate`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content of the starter form offered to new users.
pub const STARTER_CONTENT: &str = r#"<label> <b>Your name</b> (required) </label>
    [text* your-name maxlength:10]

<label> <b>Gender</b> (required) </label>
[radio sex use_label_element "Male" "Female"]

<label> <b>Age</b> (required) </label>
    [number* age min:10 max:99]

<label> <b>Phone</b> (required) </label>
    [tel* tel]

[submit "Send"]"#;

/// A complete form as persisted by a [`FormStore`](crate::FormStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Opaque identifier.
    pub id: String,
    pub title: String,
    /// Ordered steps; order drives multi-step navigation.
    pub steps: Vec<Step>,
    #[serde(default)]
    pub mail: MailSettings,
    #[serde(default)]
    pub messages: MessageCatalog,
    #[serde(default)]
    pub multi_step_settings: MultiStepSettings,
    #[serde(default, rename = "conditionalFieldsSettings")]
    pub conditional_settings: ConditionalSettings,
    /// Last-modified stamp.
    #[serde(rename = "date")]
    pub modified: FormDate,
}

impl FormDefinition {
    /// Generate a fresh form identifier.
    #[must_use]
    pub fn new_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Create a form with one empty step and default settings.
    #[must_use]
    pub fn blank(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            steps: vec![Step::new(1, "")],
            mail: MailSettings::default(),
            messages: MessageCatalog::default(),
            multi_step_settings: MultiStepSettings::default(),
            conditional_settings: ConditionalSettings::default(),
            modified: now.into(),
        }
    }

    /// Create the ready-made contact form.
    #[must_use]
    pub fn starter(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut form = Self::blank(id, "Contact form 1", now);
        form.steps[0].content = STARTER_CONTENT.to_owned();
        form
    }

    /// Deep copy under a new id, with ` (copy)` appended to the title.
    #[must_use]
    pub fn duplicate(&self, new_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id.into(),
            title: format!("{} (copy)", self.title),
            modified: now.into(),
            ..self.clone()
        }
    }

    /// Update the last-modified timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified = now.into();
    }

    /// Find a step by id.
    #[must_use]
    pub fn step(&self, id: u32) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Check that no two steps share an id.
    #[must_use]
    pub fn has_unique_step_ids(&self) -> bool {
        self.steps
            .iter()
            .enumerate()
            .all(|(idx, step)| self.steps[..idx].iter().all(|prev| prev.id != step.id))
    }
}

/// Last-modified stamp of a stored form.
///
/// Forms saved here carry an RFC 3339 timestamp. Records from other front
/// ends may hold a locale display string (`2025/09/30 9:44 pm`), which is
/// kept verbatim and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormDate {
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl FormDate {
    /// The parsed timestamp, `None` for a display string.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(at) => Some(*at),
            Self::Text(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for FormDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Timestamp(at)
    }
}

impl fmt::Display for FormDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One page of a multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Unique within the form; not necessarily contiguous.
    pub id: u32,
    pub title: String,
    /// Raw shortcode markup, stored verbatim.
    pub content: String,
}

impl Step {
    /// Create a step titled `Step {id}`.
    #[must_use]
    pub fn new(id: u32, content: impl Into<String>) -> Self {
        Self {
            id,
            title: format!("Step {id}"),
            content: content.into(),
        }
    }
}

/// Mail template settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub headers: String,
    pub body: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            to: "[_site_admin_email]".to_owned(),
            from: "[_site_title] <wordpress@example.com>".to_owned(),
            subject: r#"[_site_title] "[your-subject]""#.to_owned(),
            headers: "Reply-To: [your-email]".to_owned(),
            body: "From: [your-name] <[your-email]>\n\
                   Subject: [your-subject]\n\n\
                   Message Body:\n[your-message]\n\n\
                   -- \n\
                   This is a notification that a contact form was submitted on your website ([_site_title] [_site_url])."
                .to_owned(),
        }
    }
}

/// Keys of [`MessageCatalog`], in display order.
pub const MESSAGE_KEYS: [&str; 20] = [
    "success",
    "error",
    "validation",
    "spam",
    "acceptance_missing",
    "invalid_required",
    "upload_failed_not_allowed",
    "upload_failed",
    "invalid_date",
    "date_too_early",
    "date_too_late",
    "invalid_number",
    "number_too_small",
    "number_too_large",
    "quiz_not_answered",
    "invalid_email",
    "invalid_url",
    "invalid_tel",
    "max_length",
    "min_length",
];

/// User-facing messages shown by the plugin after submission or validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub success: String,
    pub error: String,
    pub validation: String,
    pub spam: String,
    pub acceptance_missing: String,
    pub invalid_required: String,
    pub upload_failed_not_allowed: String,
    pub upload_failed: String,
    pub invalid_date: String,
    pub date_too_early: String,
    pub date_too_late: String,
    pub invalid_number: String,
    pub number_too_small: String,
    pub number_too_large: String,
    pub quiz_not_answered: String,
    pub invalid_email: String,
    pub invalid_url: String,
    pub invalid_tel: String,
    pub max_length: String,
    pub min_length: String,
}

impl MessageCatalog {
    /// Look up a message by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let catalog = self;
        let value = match key {
            "success" => &catalog.success,
            "error" => &catalog.error,
            "validation" => &catalog.validation,
            "spam" => &catalog.spam,
            "acceptance_missing" => &catalog.acceptance_missing,
            "invalid_required" => &catalog.invalid_required,
            "upload_failed_not_allowed" => &catalog.upload_failed_not_allowed,
            "upload_failed" => &catalog.upload_failed,
            "invalid_date" => &catalog.invalid_date,
            "date_too_early" => &catalog.date_too_early,
            "date_too_late" => &catalog.date_too_late,
            "invalid_number" => &catalog.invalid_number,
            "number_too_small" => &catalog.number_too_small,
            "number_too_large" => &catalog.number_too_large,
            "quiz_not_answered" => &catalog.quiz_not_answered,
            "invalid_email" => &catalog.invalid_email,
            "invalid_url" => &catalog.invalid_url,
            "invalid_tel" => &catalog.invalid_tel,
            "max_length" => &catalog.max_length,
            "min_length" => &catalog.min_length,
            _ => return None,
        };
        Some(value)
    }

    /// Replace a message by key. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "success" => &mut self.success,
            "error" => &mut self.error,
            "validation" => &mut self.validation,
            "spam" => &mut self.spam,
            "acceptance_missing" => &mut self.acceptance_missing,
            "invalid_required" => &mut self.invalid_required,
            "upload_failed_not_allowed" => &mut self.upload_failed_not_allowed,
            "upload_failed" => &mut self.upload_failed,
            "invalid_date" => &mut self.invalid_date,
            "date_too_early" => &mut self.date_too_early,
            "date_too_late" => &mut self.date_too_late,
            "invalid_number" => &mut self.invalid_number,
            "number_too_small" => &mut self.number_too_small,
            "number_too_large" => &mut self.number_too_large,
            "quiz_not_answered" => &mut self.quiz_not_answered,
            "invalid_email" => &mut self.invalid_email,
            "invalid_url" => &mut self.invalid_url,
            "invalid_tel" => &mut self.invalid_tel,
            "max_length" => &mut self.max_length,
            "min_length" => &mut self.min_length,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Iterate `(key, message)` pairs in [`MESSAGE_KEYS`] order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        MESSAGE_KEYS
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let text = str::to_owned;
        Self {
            success: text("Thank you for your message. It has been sent."),
            error: text("There was an error trying to send your message. Please try again later."),
            validation: text("One or more fields have an error. Please check and try again."),
            spam: text("There was an error trying to send your message. Please try again later."),
            acceptance_missing: text(
                "You must accept the terms and conditions before sending your message.",
            ),
            invalid_required: text("Please fill out this field."),
            upload_failed_not_allowed: text("There was an unknown error uploading the file."),
            upload_failed: text("There was an error uploading the file to the server."),
            invalid_date: text("Please enter a date in YYYY-MM-DD format."),
            date_too_early: text("This field has a too early date."),
            date_too_late: text("This field has a too late date."),
            invalid_number: text("Please enter a number."),
            number_too_small: text("This field has a too small number."),
            number_too_large: text("This field has a too large number."),
            quiz_not_answered: text("The answer to the quiz is incorrect."),
            invalid_email: text("Please enter an email address."),
            invalid_url: text("Please enter a URL."),
            invalid_tel: text("Please enter a telephone number."),
            max_length: text("This field has a too long input."),
            min_length: text("This field has a too short input."),
        }
    }
}

/// Label used when `nextButtonText` is empty.
pub const DEFAULT_NEXT_LABEL: &str = "Next";
/// Label used when `prevButtonText` is empty.
pub const DEFAULT_PREV_LABEL: &str = "Previous";

/// Multi-step navigation button labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiStepSettings {
    pub next_button_text: String,
    pub prev_button_text: String,
}

impl MultiStepSettings {
    /// Label for the advance button.
    #[must_use]
    pub fn next_label(&self) -> &str {
        non_empty_or(&self.next_button_text, DEFAULT_NEXT_LABEL)
    }

    /// Label for the retreat button.
    #[must_use]
    pub fn prev_label(&self) -> &str {
        non_empty_or(&self.prev_button_text, DEFAULT_PREV_LABEL)
    }
}

impl Default for MultiStepSettings {
    fn default() -> Self {
        Self {
            next_button_text: DEFAULT_NEXT_LABEL.to_owned(),
            prev_button_text: DEFAULT_PREV_LABEL.to_owned(),
        }
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Conditional-fields plugin settings (opaque to the builder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalSettings {
    pub logic: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 30, 21, 44, 0).unwrap()
    }

    #[test]
    fn test_blank_form() {
        let form = FormDefinition::blank("abc", "New form", now());
        assert_eq!(form.steps, vec![Step::new(1, "")]);
        assert_eq!(form.steps[0].title, "Step 1");
        assert_eq!(form.multi_step_settings.next_label(), "Next");
        assert!(form.has_unique_step_ids());
    }

    #[test]
    fn test_starter_form() {
        let form = FormDefinition::starter("abc", now());
        assert_eq!(form.steps.len(), 1);
        assert!(form.steps[0].content.contains("[text* your-name maxlength:10]"));
    }

    #[test]
    fn test_duplicate() {
        let form = FormDefinition::starter("abc", now());
        let later = Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap();
        let copy = form.duplicate("def", later);

        assert_eq!(copy.id, "def");
        assert_eq!(copy.title, "Contact form 1 (copy)");
        assert_eq!(copy.steps, form.steps);
        assert_eq!(copy.modified, FormDate::Timestamp(later));
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(FormDefinition::new_id(), FormDefinition::new_id());
    }

    #[test]
    fn test_duplicate_step_ids_detected() {
        let mut form = FormDefinition::blank("abc", "t", now());
        form.steps.push(Step::new(1, "again"));
        assert!(!form.has_unique_step_ids());
    }

    #[test]
    fn test_step_lookup() {
        let mut form = FormDefinition::blank("abc", "t", now());
        form.steps.push(Step::new(5, "five"));
        assert_eq!(form.step(5).map(|s| s.content.as_str()), Some("five"));
        assert!(form.step(2).is_none());
    }

    #[test]
    fn test_button_labels_fall_back() {
        let settings = MultiStepSettings {
            next_button_text: String::new(),
            prev_button_text: String::new(),
        };
        assert_eq!(settings.next_label(), "Next");
        assert_eq!(settings.prev_label(), "Previous");

        let settings = MultiStepSettings {
            next_button_text: " ".to_owned(),
            prev_button_text: "Previous".to_owned(),
        };
        assert_eq!(settings.next_label(), " ");

        let settings = MultiStepSettings {
            next_button_text: "Continue".to_owned(),
            prev_button_text: "Back".to_owned(),
        };
        assert_eq!(settings.next_label(), "Continue");
        assert_eq!(settings.prev_label(), "Back");
    }

    #[test]
    fn test_json_field_names() {
        let form = FormDefinition::blank("abc", "t", now());
        let value = serde_json::to_value(&form).unwrap();

        assert!(value.get("multiStepSettings").is_some());
        assert!(value.get("conditionalFieldsSettings").is_some());
        assert_eq!(value["multiStepSettings"]["nextButtonText"], "Next");
        assert_eq!(value["date"], "2025-09-30T21:44:00Z");
        assert!(value["messages"].get("acceptance_missing").is_some());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let json = r#"{
            "id": "15cbc5d",
            "title": "Legacy",
            "steps": [{"id": 1, "title": "Step 1", "content": "[text a]"}],
            "multiStepSettings": {"nextButtonText": ""},
            "date": "2025-09-30T21:44:00Z"
        }"#;
        let form: FormDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(form.mail, MailSettings::default());
        assert_eq!(form.multi_step_settings.next_label(), "Next");
        assert_eq!(form.multi_step_settings.prev_button_text, "Previous");
        assert_eq!(form.conditional_settings.logic, "");
    }

    #[test]
    fn test_display_string_date_loads() {
        let json = r#"{
            "id": "15cbc5d",
            "title": "Contact form 1",
            "steps": [{"id": 1, "title": "Step 1", "content": "[text* your-name maxlength:10]"}],
            "multiStepSettings": {"nextButtonText": "Next", "prevButtonText": "Previous"},
            "conditionalFieldsSettings": {"logic": ""},
            "date": "2025/09/30 9:44 pm"
        }"#;
        let form: FormDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(form.modified, FormDate::Text("2025/09/30 9:44 pm".to_owned()));
        assert_eq!(form.modified.timestamp(), None);
        assert_eq!(form.modified.to_string(), "2025/09/30 9:44 pm");

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["date"], "2025/09/30 9:44 pm");
    }

    #[test]
    fn test_timestamp_date_loads() {
        let json = r#"{"id": "a", "title": "t", "steps": [], "date": "2025-09-30T21:44:00Z"}"#;
        let form: FormDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(form.modified.timestamp(), Some(now()));
        assert_eq!(form.modified.to_string(), "2025-09-30 21:44");
    }

    #[test]
    fn test_message_catalog_entries() {
        let catalog = MessageCatalog::default();
        let keys: Vec<_> = catalog.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, MESSAGE_KEYS.to_vec());
    }

    #[test]
    fn test_message_catalog_set() {
        let mut catalog = MessageCatalog::default();
        assert!(catalog.set("spam", "Nope"));
        assert_eq!(catalog.get("spam"), Some("Nope"));
        assert!(!catalog.set("unknown", "x"));
        assert_eq!(catalog.get("unknown"), None);
    }
}
