//! Form editing sessions.
//!
//! An [`EditorSession`] holds a draft copy of one form. Nothing reaches the
//! store until [`EditorSession::save`] succeeds, and a failed save leaves the
//! draft as it was.

use std::ops::Range;

use chrono::{DateTime, Utc};
use tracing::info;
use wpcf_storage::{
    ConditionalSettings, FormDefinition, FormStore, MailSettings, MessageCatalog,
    MultiStepSettings, Step,
};

use crate::error::BuilderError;
use crate::identity::{Identity, require_editor};

/// Settings pages of the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorTab {
    #[default]
    Form,
    Mail,
    Messages,
    AdditionalSettings,
    MultiStepSettings,
    ConditionalFieldsSettings,
}

impl EditorTab {
    /// All tabs in display order.
    pub const ALL: [Self; 6] = [
        Self::Form,
        Self::Mail,
        Self::Messages,
        Self::AdditionalSettings,
        Self::MultiStepSettings,
        Self::ConditionalFieldsSettings,
    ];

    /// Stable key (`form`, `mail`, ...).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Mail => "mail",
            Self::Messages => "messages",
            Self::AdditionalSettings => "additional_settings",
            Self::MultiStepSettings => "multi_step_settings",
            Self::ConditionalFieldsSettings => "conditional_fields_settings",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.key() == key)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Form => "Form",
            Self::Mail => "Mail",
            Self::Messages => "Messages",
            Self::AdditionalSettings => "Additional Settings",
            Self::MultiStepSettings => "Multi-Step Settings",
            Self::ConditionalFieldsSettings => "Conditional Fields Settings",
        }
    }
}

/// One insertable tag template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub label: &'static str,
    pub snippet: &'static str,
}

const fn entry(label: &'static str, snippet: &'static str) -> PaletteEntry {
    PaletteEntry { label, snippet }
}

/// Default tag templates offered by the editor.
pub const TAG_PALETTE: [PaletteEntry; 15] = [
    entry("Text", "[text your-text]"),
    entry("Email", "[email* your-email]"),
    entry("URL", "[url your-url]"),
    entry("Telephone", "[tel your-tel]"),
    entry("Number", "[number your-number]"),
    entry("Date", "[date your-date]"),
    entry("Text area", "[textarea your-textarea]"),
    entry("Drop-down menu", r#"[select your-menu "Option 1" "Option 2"]"#),
    entry("Checkboxes", r#"[checkbox your-checkbox "Option 1"]"#),
    entry("Radio buttons", r#"[radio your-radio "Option 1"]"#),
    entry("Acceptance", "[acceptance your-acceptance] Check here to accept"),
    entry("Quiz", r#"[quiz your-quiz "1+1=?|2"]"#),
    entry("File", "[file your-file]"),
    entry("Submit", r#"[submit "Send"]"#),
    entry("Conditional fields group", "[group your-group-name]\n\n[/group]"),
];

/// Draft state of one form being edited.
#[derive(Debug, Clone)]
pub struct EditorSession {
    draft: FormDefinition,
    active_step: Option<u32>,
    next_step_id: u32,
    active_tab: EditorTab,
}

impl EditorSession {
    /// Start editing a copy of `form`.
    #[must_use]
    pub fn open(form: FormDefinition) -> Self {
        let next_step_id = form
            .steps
            .iter()
            .map(|step| step.id)
            .max()
            .map_or(2, |max| max.saturating_add(1));
        Self {
            active_step: form.steps.first().map(|step| step.id),
            next_step_id,
            active_tab: EditorTab::default(),
            draft: form,
        }
    }

    /// Draft as it currently stands.
    #[must_use]
    pub fn draft(&self) -> &FormDefinition {
        &self.draft
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.draft.steps
    }

    /// Id of the step receiving inserted tags.
    #[must_use]
    pub fn active_step(&self) -> Option<u32> {
        self.active_step
    }

    /// Id the next added step will get.
    #[must_use]
    pub fn next_step_id(&self) -> u32 {
        self.next_step_id
    }

    #[must_use]
    pub fn active_tab(&self) -> EditorTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: EditorTab) {
        self.active_tab = tab;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn mail_mut(&mut self) -> &mut MailSettings {
        &mut self.draft.mail
    }

    pub fn messages_mut(&mut self) -> &mut MessageCatalog {
        &mut self.draft.messages
    }

    pub fn multi_step_mut(&mut self) -> &mut MultiStepSettings {
        &mut self.draft.multi_step_settings
    }

    pub fn conditional_mut(&mut self) -> &mut ConditionalSettings {
        &mut self.draft.conditional_settings
    }

    /// Append an empty step titled `Step N` and make it active.
    pub fn add_step(&mut self) -> u32 {
        let id = self.free_step_id();
        self.draft.steps.push(Step::new(id, ""));
        self.active_step = Some(id);
        self.next_step_id = self.next_step_id.max(id.saturating_add(1));
        id
    }

    /// `next_step_id`, or the lowest unused id once ids reach `u32::MAX`.
    fn free_step_id(&self) -> u32 {
        if self.draft.step(self.next_step_id).is_none() {
            return self.next_step_id;
        }
        (1..=u32::MAX)
            .find(|&id| self.draft.step(id).is_none())
            .unwrap_or(self.next_step_id)
    }

    /// Remove step `id`. If it was active, its predecessor (or the new first
    /// step) becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::LastStep`] when only one step remains, or
    /// [`BuilderError::StepNotFound`].
    pub fn remove_step(&mut self, id: u32) -> Result<(), BuilderError> {
        if self.draft.steps.len() <= 1 {
            return Err(BuilderError::LastStep);
        }
        let index = self.step_index(id)?;
        self.draft.steps.remove(index);

        if self.active_step == Some(id) {
            self.active_step = self
                .draft
                .steps
                .get(index.saturating_sub(1))
                .map(|step| step.id);
        }
        Ok(())
    }

    /// Select the step receiving inserted tags.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::StepNotFound`].
    pub fn set_active_step(&mut self, id: u32) -> Result<(), BuilderError> {
        self.step_index(id)?;
        self.active_step = Some(id);
        Ok(())
    }

    /// Replace the content of step `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::StepNotFound`].
    pub fn set_content(&mut self, id: u32, content: impl Into<String>) -> Result<(), BuilderError> {
        let index = self.step_index(id)?;
        self.draft.steps[index].content = content.into();
        Ok(())
    }

    /// Replace the byte range `selection` of the active step with `tag` and
    /// return the cursor position just after it.
    ///
    /// The range is clamped to the content and widened outward to character
    /// boundaries, so an empty range at any offset is an insertion point.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NoActiveStep`] if no step is active.
    pub fn insert_tag(&mut self, tag: &str, selection: Range<usize>) -> Result<usize, BuilderError> {
        let id = self.active_step.ok_or(BuilderError::NoActiveStep)?;
        let index = self.step_index(id)?;
        let content = &mut self.draft.steps[index].content;

        let mut start = selection.start.min(content.len());
        while !content.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = if selection.end > selection.start {
            selection.end.min(content.len()).max(start)
        } else {
            start
        };
        while !content.is_char_boundary(end) {
            end += 1;
        }

        content.replace_range(start..end, tag);
        Ok(start + tag.len())
    }

    /// Snapshot the draft as a form record stamped with `now`.
    #[must_use]
    pub fn to_form(&self, now: DateTime<Utc>) -> FormDefinition {
        let mut form = self.draft.clone();
        form.touch(now);
        form
    }

    /// Persist the draft.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Unauthorized`] for non-editors and
    /// [`BuilderError::Storage`] if the store rejects the write. The draft is
    /// unchanged in both cases.
    pub fn save(
        &mut self,
        store: &dyn FormStore,
        identity: &dyn Identity,
        now: DateTime<Utc>,
    ) -> Result<FormDefinition, BuilderError> {
        require_editor(identity, "save forms")?;
        let form = self.to_form(now);
        store.update(&form)?;
        self.draft.touch(now);
        info!(id = %form.id, steps = form.steps.len(), "Saved draft");
        Ok(form)
    }

    fn step_index(&self, id: u32) -> Result<usize, BuilderError> {
        self.draft
            .steps
            .iter()
            .position(|step| step.id == id)
            .ok_or(BuilderError::StepNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use wpcf_shortcode::{Node, parse};
    use wpcf_storage::{MockFormStore, StorageErrorKind};

    use super::*;
    use crate::identity::StaticIdentity;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap()
    }

    fn session() -> EditorSession {
        EditorSession::open(FormDefinition::starter("abc", now()))
    }

    #[test]
    fn test_open_picks_first_step() {
        let editor = session();
        assert_eq!(editor.active_step(), Some(1));
        assert_eq!(editor.next_step_id(), 2);
        assert_eq!(editor.active_tab(), EditorTab::Form);
    }

    #[test]
    fn test_next_step_id_for_sparse_and_empty() {
        let mut form = FormDefinition::blank("abc", "t", now());
        form.steps = vec![Step::new(3, ""), Step::new(9, "")];
        assert_eq!(EditorSession::open(form.clone()).next_step_id(), 10);

        form.steps.clear();
        let editor = EditorSession::open(form);
        assert_eq!(editor.next_step_id(), 2);
        assert_eq!(editor.active_step(), None);
    }

    #[test]
    fn test_add_step() {
        let mut editor = session();
        let id = editor.add_step();

        assert_eq!(id, 2);
        assert_eq!(editor.active_step(), Some(2));
        assert_eq!(editor.steps()[1].title, "Step 2");
        assert_eq!(editor.next_step_id(), 3);
    }

    #[test]
    fn test_add_step_after_max_id() {
        let mut form = FormDefinition::blank("abc", "t", now());
        form.steps = vec![Step::new(1, ""), Step::new(u32::MAX, "")];
        let mut editor = EditorSession::open(form);
        assert_eq!(editor.next_step_id(), u32::MAX);

        assert_eq!(editor.add_step(), 2);
        assert_eq!(editor.add_step(), 3);
        assert_eq!(editor.next_step_id(), u32::MAX);
        assert!(editor.to_form(now()).has_unique_step_ids());
    }

    #[test]
    fn test_remove_last_remaining_step_refused() {
        let mut editor = session();
        assert!(matches!(editor.remove_step(1), Err(BuilderError::LastStep)));
        assert_eq!(editor.steps().len(), 1);
    }

    #[test]
    fn test_remove_active_step_selects_previous() {
        let mut editor = session();
        editor.add_step();
        editor.add_step();
        editor.set_active_step(3).unwrap();

        editor.remove_step(3).unwrap();
        assert_eq!(editor.active_step(), Some(2));

        editor.set_active_step(1).unwrap();
        editor.remove_step(1).unwrap();
        assert_eq!(editor.active_step(), Some(2));
    }

    #[test]
    fn test_remove_inactive_step_keeps_active() {
        let mut editor = session();
        editor.add_step();
        editor.remove_step(1).unwrap();
        assert_eq!(editor.active_step(), Some(2));
        assert!(matches!(
            editor.remove_step(7),
            Err(BuilderError::LastStep)
        ));
    }

    #[test]
    fn test_remove_unknown_step() {
        let mut editor = session();
        editor.add_step();
        assert!(matches!(
            editor.remove_step(7),
            Err(BuilderError::StepNotFound(7))
        ));
    }

    #[test]
    fn test_insert_tag_at_cursor() {
        let mut editor = session();
        editor.set_content(1, "ab").unwrap();

        let cursor = editor.insert_tag("[text x]", 1..1).unwrap();
        assert_eq!(editor.steps()[0].content, "a[text x]b");
        assert_eq!(cursor, 9);
    }

    #[test]
    fn test_insert_tag_replaces_selection() {
        let mut editor = session();
        editor.set_content(1, "hello world").unwrap();

        editor.insert_tag("[email e]", 6..11).unwrap();
        assert_eq!(editor.steps()[0].content, "hello [email e]");
    }

    #[test]
    fn test_insert_tag_clamps_cursor() {
        let mut editor = session();
        editor.set_content(1, "é").unwrap();

        editor.insert_tag("[x]", 1..1).unwrap();
        assert_eq!(editor.steps()[0].content, "[x]é");

        editor.insert_tag("!", 100..200).unwrap();
        assert_eq!(editor.steps()[0].content, "[x]é!");
    }

    #[test]
    fn test_palette_entries_parse() {
        for entry in TAG_PALETTE {
            let nodes = parse(entry.snippet);
            assert!(
                !nodes.iter().any(|n| matches!(n, Node::Unrecognized(_))),
                "{}",
                entry.snippet
            );
        }
    }

    #[test]
    fn test_tab_keys_round_trip() {
        for tab in EditorTab::ALL {
            assert_eq!(EditorTab::from_key(tab.key()), Some(tab));
        }
        assert_eq!(EditorTab::from_key("nope"), None);
    }

    #[test]
    fn test_save_updates_store() {
        let store = MockFormStore::new().with_form(FormDefinition::starter("abc", now()));
        let mut editor = EditorSession::open(store.get("abc").unwrap());
        editor.set_title("Renamed");
        editor.multi_step_mut().next_button_text = "Continue".to_owned();
        let later = Utc.with_ymd_and_hms(2025, 10, 2, 9, 0, 0).unwrap();

        let saved = editor
            .save(&store, &StaticIdentity::editor(), later)
            .unwrap();

        assert_eq!(saved.modified.timestamp(), Some(later));
        let stored = store.get("abc").unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.multi_step_settings.next_button_text, "Continue");
    }

    #[test]
    fn test_failed_save_keeps_draft() {
        let store = MockFormStore::new()
            .with_form(FormDefinition::starter("abc", now()))
            .failing_writes(StorageErrorKind::Unavailable);
        let mut editor = EditorSession::open(store.get("abc").unwrap());
        editor.set_content(1, "[text kept]").unwrap();
        let before = editor.draft().clone();

        let err = editor
            .save(&store, &StaticIdentity::editor(), now())
            .unwrap_err();

        assert!(matches!(err, BuilderError::Storage(_)));
        assert_eq!(editor.draft(), &before);
        assert_ne!(store.get("abc").unwrap().steps[0].content, "[text kept]");
    }

    #[test]
    fn test_save_requires_editor() {
        let store = MockFormStore::new().with_form(FormDefinition::starter("abc", now()));
        let mut editor = EditorSession::open(store.get("abc").unwrap());

        let err = editor
            .save(&store, &StaticIdentity::viewer(), now())
            .unwrap_err();
        assert!(matches!(err, BuilderError::Unauthorized(_)));
    }
}
