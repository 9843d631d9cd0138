//! KYC wizard progress and its local persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The KYC form is a four-step wizard. Every step transition saves
//! [`KycProgress`] under `kycFormProgress`; field edits inside the current
//! step autosave a draft under `kycFormState`. Both expire after
//! [`KYC_PROGRESS_TTL_MS`] so a stale half-finished form is not resurrected.
//! The selected category is also kept as a scratch value in
//! `kyc_category_id` for the document step.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures are logged and dropped: the wizard keeps working in
//! memory for the rest of the visit.

#[cfg(test)]
#[path = "kyc_test.rs"]
mod kyc_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{KYC_PROGRESS_TTL_MS, keys};
use crate::net::types::KycSubmission;
use crate::util::storage::{KeyValueStore, load_json, save_json};
use crate::util::validation::{FieldErrors, validate_phone, validate_required};

/// Bumped whenever the persisted layout changes; other versions load as absent.
pub const KYC_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KycStep {
    PersonalDetails,
    Category,
    Documents,
    Review,
}

impl KycStep {
    pub const ALL: [KycStep; 4] = [KycStep::PersonalDetails, KycStep::Category, KycStep::Documents, KycStep::Review];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::PersonalDetails => 0,
            Self::Category => 1,
            Self::Documents => 2,
            Self::Review => 3,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Key of this step's object inside `formData`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::PersonalDetails => "personal",
            Self::Category => "category",
            Self::Documents => "documents",
            Self::Review => "review",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::PersonalDetails => "Personal details",
            Self::Category => "Category",
            Self::Documents => "Documents",
            Self::Review => "Review",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Incomplete,
    Complete,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub status: StepStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycProgress {
    pub current_step: usize,
    pub step_status: BTreeMap<usize, StepState>,
    pub form_data: Value,
}

impl Default for KycProgress {
    fn default() -> Self {
        Self {
            current_step: 0,
            step_status: KycStep::ALL
                .iter()
                .map(|s| (s.index(), StepState::default()))
                .collect(),
            form_data: Value::Object(Map::new()),
        }
    }
}

impl KycProgress {
    #[must_use]
    pub fn step(&self) -> KycStep {
        KycStep::from_index(self.current_step).unwrap_or(KycStep::PersonalDetails)
    }

    #[must_use]
    pub fn status_of(&self, step: KycStep) -> StepStatus {
        self.step_status
            .get(&step.index())
            .map(|s| s.status)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        KycStep::ALL
            .iter()
            .all(|s| self.status_of(*s) == StepStatus::Complete)
    }

    /// Fields recorded for `step`.
    #[must_use]
    pub fn fields(&self, step: KycStep) -> Map<String, Value> {
        self.form_data
            .get(step.key())
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn field(&self, step: KycStep, name: &str) -> String {
        self.form_data
            .get(step.key())
            .and_then(|f| f.get(name))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    }

    pub fn set_field(&mut self, step: KycStep, name: &str, value: &str) {
        if !self.form_data.is_object() {
            self.form_data = Value::Object(Map::new());
        }
        if let Some(root) = self.form_data.as_object_mut() {
            let entry = root
                .entry(step.key())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(fields) = entry.as_object_mut() {
                fields.insert(name.to_owned(), Value::String(value.to_owned()));
            }
        }
    }

    /// Validate the current step and, if it passes, mark it complete and move
    /// to the next one. The last step stays current once complete.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors of the current step.
    pub fn advance(&mut self) -> Result<KycStep, FieldErrors> {
        let step = self.step();
        let errors = validate_step(step, &self.fields(step));
        if !errors.is_empty() {
            return Err(errors);
        }
        self.step_status
            .insert(step.index(), StepState { status: StepStatus::Complete });
        if let Some(next) = KycStep::from_index(step.index() + 1) {
            self.current_step = next.index();
        }
        Ok(self.step())
    }

    /// Go back one step, keeping statuses.
    pub fn back(&mut self) -> KycStep {
        self.current_step = self.current_step.saturating_sub(1);
        self.step()
    }

    /// Jump to an already completed step (or the first incomplete one).
    pub fn go_to(&mut self, step: KycStep) -> bool {
        let reachable = KycStep::ALL
            .iter()
            .take_while(|s| **s < step)
            .all(|s| self.status_of(*s) == StepStatus::Complete);
        if reachable {
            self.current_step = step.index();
        }
        reachable
    }

    #[must_use]
    pub fn submission(&self) -> KycSubmission {
        let category = self.field(KycStep::Category, "categoryId");
        KycSubmission {
            category_id: (!category.is_empty()).then_some(category),
            form_data: self.form_data.clone(),
        }
    }
}

fn text<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Per-field validation for one wizard step.
#[must_use]
pub fn validate_step(step: KycStep, fields: &Map<String, Value>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut check = |name: &'static str, error: Option<String>| {
        if let Some(e) = error {
            errors.insert(name, e);
        }
    };
    match step {
        KycStep::PersonalDetails => {
            check("fullName", validate_required("Full name", text(fields, "fullName")));
            check("dateOfBirth", validate_required("Date of birth", text(fields, "dateOfBirth")));
            check("phone", validate_phone(text(fields, "phone")));
            check("address", validate_required("Address", text(fields, "address")));
        }
        KycStep::Category => {
            check("categoryId", validate_required("Category", text(fields, "categoryId")));
        }
        KycStep::Documents => {
            check("idDocument", validate_required("Identity document", text(fields, "idDocument")));
            check("licenseNumber", validate_required("License number", text(fields, "licenseNumber")));
        }
        KycStep::Review => {
            if text(fields, "confirmed") != "true" {
                check("confirmed", Some("Please confirm the details are correct".to_owned()));
            }
        }
    }
    errors
}

// ---- persistence ----

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedProgress {
    current_step: usize,
    step_status: BTreeMap<usize, StepState>,
    form_data: Value,
    version: u32,
    timestamp: i64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedDraft {
    step: usize,
    fields: Map<String, Value>,
    version: u32,
    timestamp: i64,
}

fn is_fresh(version: u32, timestamp: i64, now_ms: i64) -> bool {
    version == KYC_SCHEMA_VERSION && now_ms.saturating_sub(timestamp) <= KYC_PROGRESS_TTL_MS
}

/// Overwrite the saved progress. Failures are logged, never returned.
pub fn save(store: &impl KeyValueStore, progress: &KycProgress, now_ms: i64) {
    let record = PersistedProgress {
        current_step: progress.current_step,
        step_status: progress.step_status.clone(),
        form_data: progress.form_data.clone(),
        version: KYC_SCHEMA_VERSION,
        timestamp: now_ms,
    };
    if let Err(e) = save_json(store, keys::KYC_FORM_PROGRESS, &record) {
        log::warn!("could not save KYC progress: {e}");
    }
}

/// Saved progress, unless absent, corrupt, from another schema version or
/// older than the TTL. Stale or unreadable records are cleared.
pub fn load(store: &impl KeyValueStore, now_ms: i64) -> Option<KycProgress> {
    if store.get(keys::KYC_FORM_PROGRESS).is_none() {
        return None;
    }
    match load_json::<PersistedProgress>(store, keys::KYC_FORM_PROGRESS) {
        Some(record) if is_fresh(record.version, record.timestamp, now_ms) => Some(KycProgress {
            current_step: record.current_step,
            step_status: record.step_status,
            form_data: record.form_data,
        }),
        _ => {
            log::info!("discarding stale KYC progress");
            clear(store);
            None
        }
    }
}

/// Forget all KYC wizard state.
pub fn clear(store: &impl KeyValueStore) {
    store.remove(keys::KYC_FORM_PROGRESS);
    store.remove(keys::KYC_FORM_STATE);
    store.remove(keys::KYC_CATEGORY_ID);
}

/// Autosave in-progress field edits for `step`.
pub fn save_draft(store: &impl KeyValueStore, step: KycStep, fields: &Map<String, Value>, now_ms: i64) {
    let draft = PersistedDraft {
        step: step.index(),
        fields: fields.clone(),
        version: KYC_SCHEMA_VERSION,
        timestamp: now_ms,
    };
    if let Err(e) = save_json(store, keys::KYC_FORM_STATE, &draft) {
        log::warn!("could not save KYC draft: {e}");
    }
}

/// Draft fields for `step`, if a fresh draft for that step exists.
pub fn load_draft(store: &impl KeyValueStore, step: KycStep, now_ms: i64) -> Option<Map<String, Value>> {
    let draft = load_json::<PersistedDraft>(store, keys::KYC_FORM_STATE)?;
    if !is_fresh(draft.version, draft.timestamp, now_ms) {
        store.remove(keys::KYC_FORM_STATE);
        return None;
    }
    (draft.step == step.index()).then_some(draft.fields)
}

/// Remember the category picked in the category step.
pub fn remember_category(store: &impl KeyValueStore, category_id: &str) {
    if let Err(e) = store.set(keys::KYC_CATEGORY_ID, category_id) {
        log::warn!("could not save KYC category: {e}");
    }
}

#[must_use]
pub fn remembered_category(store: &impl KeyValueStore) -> Option<String> {
    store
        .get(keys::KYC_CATEGORY_ID)
        .filter(|id| !id.trim().is_empty())
}

/// Progress to show when the wizard opens: saved progress with any draft for
/// its current step merged in, or a fresh start.
pub fn resume(store: &impl KeyValueStore, now_ms: i64) -> KycProgress {
    let mut progress = load(store, now_ms).unwrap_or_default();
    let step = progress.step();
    if let Some(draft) = load_draft(store, step, now_ms) {
        for (name, value) in draft {
            if let Some(text) = value.as_str() {
                progress.set_field(step, &name, text);
            }
        }
    }
    if progress.field(KycStep::Category, "categoryId").is_empty() {
        if let Some(id) = remembered_category(store) {
            progress.set_field(KycStep::Category, "categoryId", &id);
        }
    }
    progress
}
