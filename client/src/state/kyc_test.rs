use super::*;
use crate::util::storage::MemoryStore;

const T0: i64 = 1_700_000_000_000;

fn filled_personal() -> KycProgress {
    let mut progress = KycProgress::default();
    progress.set_field(KycStep::PersonalDetails, "fullName", "Ada Lovelace");
    progress.set_field(KycStep::PersonalDetails, "dateOfBirth", "1815-12-10");
    progress.set_field(KycStep::PersonalDetails, "phone", "+44 20 7946 0958");
    progress.set_field(KycStep::PersonalDetails, "address", "12 St James's Square");
    progress
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn load_after_save_returns_same_progress() {
    let store = MemoryStore::new();
    let mut progress = filled_personal();
    progress.advance().unwrap();

    save(&store, &progress, T0);

    assert_eq!(load(&store, T0 + 1_000), Some(progress));
}

#[test]
fn saved_record_carries_version_and_timestamp() {
    let store = MemoryStore::new();
    save(&store, &KycProgress::default(), T0);
    let raw: Value = serde_json::from_str(&store.get(keys::KYC_FORM_PROGRESS).unwrap()).unwrap();
    assert_eq!(raw["version"], KYC_SCHEMA_VERSION);
    assert_eq!(raw["timestamp"], T0);
    assert_eq!(raw["currentStep"], 0);
    assert!(raw["stepStatus"].is_object());
    assert!(raw["formData"].is_object());
}

#[test]
fn repeated_saves_differ_only_in_timestamp() {
    let store = MemoryStore::new();
    let progress = filled_personal();
    save(&store, &progress, T0);
    let mut first: Value = serde_json::from_str(&store.get(keys::KYC_FORM_PROGRESS).unwrap()).unwrap();
    save(&store, &progress, T0 + 5);
    let mut second: Value = serde_json::from_str(&store.get(keys::KYC_FORM_PROGRESS).unwrap()).unwrap();
    first["timestamp"] = Value::Null;
    second["timestamp"] = Value::Null;
    assert_eq!(first, second);
}

#[test]
fn expired_progress_loads_as_none_and_is_cleared() {
    let store = MemoryStore::new();
    save(&store, &filled_personal(), T0);
    remember_category(&store, "cat-1");

    let later = T0 + KYC_PROGRESS_TTL_MS + 1;
    assert_eq!(load(&store, later), None);
    assert!(!store.contains(keys::KYC_FORM_PROGRESS));
    assert!(!store.contains(keys::KYC_CATEGORY_ID));
    assert_eq!(load(&store, later), None);
}

#[test]
fn progress_exactly_at_ttl_is_still_valid() {
    let store = MemoryStore::new();
    save(&store, &filled_personal(), T0);
    assert!(load(&store, T0 + KYC_PROGRESS_TTL_MS).is_some());
}

#[test]
fn corrupt_or_foreign_version_progress_is_discarded() {
    let store = MemoryStore::new();
    store.set(keys::KYC_FORM_PROGRESS, "{not json").unwrap();
    assert_eq!(load(&store, T0), None);
    assert!(store.is_empty());

    store
        .set(
            keys::KYC_FORM_PROGRESS,
            r#"{"currentStep":1,"stepStatus":{},"formData":{},"version":99,"timestamp":1700000000000}"#,
        )
        .unwrap();
    assert_eq!(load(&store, T0), None);
}

#[test]
fn save_failure_is_swallowed() {
    let store = MemoryStore::rejecting_writes();
    save(&store, &filled_personal(), T0);
    assert_eq!(load(&store, T0), None);
}

#[test]
fn clear_removes_all_wizard_keys() {
    let store = MemoryStore::new();
    save(&store, &filled_personal(), T0);
    save_draft(&store, KycStep::PersonalDetails, &Map::new(), T0);
    remember_category(&store, "cat-1");
    clear(&store);
    assert!(store.is_empty());
}

// =============================================================
// Drafts & resume
// =============================================================

#[test]
fn draft_is_only_returned_for_its_step() {
    let store = MemoryStore::new();
    let mut fields = Map::new();
    fields.insert("fullName".to_owned(), Value::from("Ada"));
    save_draft(&store, KycStep::PersonalDetails, &fields, T0);

    assert_eq!(load_draft(&store, KycStep::PersonalDetails, T0), Some(fields));
    assert_eq!(load_draft(&store, KycStep::Documents, T0), None);
}

#[test]
fn resume_merges_draft_and_remembered_category() {
    let store = MemoryStore::new();
    let mut progress = filled_personal();
    progress.advance().unwrap();
    save(&store, &progress, T0);
    remember_category(&store, "cat-7");

    let resumed = resume(&store, T0 + 10);

    assert_eq!(resumed.step(), KycStep::Category);
    assert_eq!(resumed.field(KycStep::Category, "categoryId"), "cat-7");
    assert_eq!(resumed.field(KycStep::PersonalDetails, "fullName"), "Ada Lovelace");
}

#[test]
fn resume_with_nothing_saved_starts_fresh() {
    let store = MemoryStore::new();
    assert_eq!(resume(&store, T0), KycProgress::default());
}

// =============================================================
// Wizard
// =============================================================

#[test]
fn advance_rejects_incomplete_step() {
    let mut progress = KycProgress::default();
    let errors = progress.advance().unwrap_err();
    assert!(errors.contains_key("fullName"));
    assert!(errors.contains_key("phone"));
    assert_eq!(progress.step(), KycStep::PersonalDetails);
    assert_eq!(progress.status_of(KycStep::PersonalDetails), StepStatus::Incomplete);
}

#[test]
fn full_walkthrough_completes_and_builds_submission() {
    let mut progress = filled_personal();
    assert_eq!(progress.advance(), Ok(KycStep::Category));
    progress.set_field(KycStep::Category, "categoryId", "cat-3");
    assert_eq!(progress.advance(), Ok(KycStep::Documents));
    progress.set_field(KycStep::Documents, "idDocument", "https://files.example.com/id.png");
    progress.set_field(KycStep::Documents, "licenseNumber", "MD-4411");
    assert_eq!(progress.advance(), Ok(KycStep::Review));
    progress.set_field(KycStep::Review, "confirmed", "true");
    assert_eq!(progress.advance(), Ok(KycStep::Review));

    assert!(progress.is_complete());
    let submission = progress.submission();
    assert_eq!(submission.category_id.as_deref(), Some("cat-3"));
    assert_eq!(submission.form_data["documents"]["licenseNumber"], "MD-4411");
}

#[test]
fn back_and_go_to_respect_completion() {
    let mut progress = filled_personal();
    progress.advance().unwrap();
    assert!(!progress.go_to(KycStep::Review));
    assert_eq!(progress.back(), KycStep::PersonalDetails);
    assert_eq!(progress.back(), KycStep::PersonalDetails);
    assert!(progress.go_to(KycStep::Category));
    assert_eq!(progress.status_of(KycStep::PersonalDetails), StepStatus::Complete);
}
