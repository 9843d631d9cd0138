use super::*;

use serde_json::json;

// =============================================================
// ApiEnvelope
// =============================================================

#[test]
fn envelope_without_status_counts_as_success() {
    let env: ApiEnvelope<SignInData> =
        serde_json::from_value(json!({"data": {"token": "abc", "data": {"role": "business"}}})).unwrap();
    assert!(env.is_success());
    let data = env.into_data().unwrap();
    assert_eq!(data.token, "abc");
    assert_eq!(data.data.role(), Some(Role::Business));
}

#[test]
fn envelope_status_false_is_rejected_with_message() {
    let env: ApiEnvelope<SignInData> =
        serde_json::from_value(json!({"status": false, "message": "Invalid credentials"})).unwrap();
    assert_eq!(
        env.into_data(),
        Err(ApiError::Rejected { message: "Invalid credentials".to_owned() })
    );
}

#[test]
fn envelope_status_false_without_message_uses_generic() {
    let env: ApiEnvelope<serde_json::Value> = serde_json::from_value(json!({"status": false})).unwrap();
    assert_eq!(env.into_ack(), Err(ApiError::Rejected { message: GENERIC_FAILURE.to_owned() }));
}

#[test]
fn envelope_success_without_data_is_decode_error() {
    let env: ApiEnvelope<Vec<Category>> = serde_json::from_value(json!({"status": true})).unwrap();
    assert!(matches!(env.into_data(), Err(ApiError::Decode(_))));
}

#[test]
fn envelope_ack_returns_message() {
    let env: ApiEnvelope<serde_json::Value> =
        serde_json::from_value(json!({"status": true, "message": "OTP sent"})).unwrap();
    assert_eq!(env.into_ack(), Ok(Some("OTP sent".to_owned())));
}

// =============================================================
// UserDetails
// =============================================================

#[test]
fn user_details_keeps_unknown_fields() {
    let raw = json!({"name": "Ada", "role": "doctor", "_id": 42, "kycDone": false});
    let user: UserDetails = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(user.extra.get("_id"), Some(&json!(42)));
    assert_eq!(serde_json::to_value(&user).unwrap(), raw);
}

#[test]
fn signed_up_as_prefers_explicit_field() {
    let user: UserDetails =
        serde_json::from_value(json!({"role": "user", "signedUpAs": "Business"})).unwrap();
    assert_eq!(user.signed_up_as(), Some(Role::Business));
    assert_eq!(user.role(), Some(Role::User));
}

#[test]
fn signed_up_as_falls_back_to_role() {
    let user: UserDetails = serde_json::from_value(json!({"role": "Doctor"})).unwrap();
    assert_eq!(user.signed_up_as(), Some(Role::Doctor));
}

#[test]
fn display_name_falls_back_to_email_then_placeholder() {
    let mut user = UserDetails { email: Some("a@b.co".to_owned()), ..UserDetails::default() };
    assert_eq!(user.display_name(), "a@b.co");
    user.email = None;
    assert_eq!(user.display_name(), "Account");
}

// =============================================================
// Records
// =============================================================

#[test]
fn records_accept_underscore_id_alias() {
    let cat: Category = serde_json::from_value(json!({"_id": "c1", "name": "Cardiology"})).unwrap();
    assert_eq!(cat.id, "c1");
    assert!(cat.active);
}

#[test]
fn job_status_defaults_to_open() {
    let job: Job = serde_json::from_value(json!({"id": "j1", "title": "Night shift"})).unwrap();
    assert_eq!(job.status, JobStatus::Open);
    assert_eq!(job.accepted_by, None);
}

#[test]
fn sign_up_request_serializes_camel_case() {
    let req = SignUpRequest {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: "555".to_owned(),
        password: "secret123".to_owned(),
        signed_up_as: "doctor".to_owned(),
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["signedUpAs"], "doctor");
}

#[test]
fn user_id_reads_either_id_field() {
    let user: UserDetails = serde_json::from_value(json!({"_id": "u-9", "name": "Ada"})).unwrap();
    assert_eq!(user.id(), Some("u-9"));
    let user: UserDetails = serde_json::from_value(json!({"id": "u-1"})).unwrap();
    assert_eq!(user.id(), Some("u-1"));
    assert_eq!(UserDetails::default().id(), None);
}

#[test]
fn envelope_decodes_records_without_default() {
    let env: ApiEnvelope<Job> = serde_json::from_value(json!({
        "status": true,
        "data": {"_id": "j1", "title": "Night shift", "status": "accepted", "rate": 42.5}
    }))
    .unwrap();
    let job = env.into_data().unwrap();
    assert_eq!(job.id, "j1");
    assert_eq!(job.status, JobStatus::Accepted);
    assert_eq!(job.rate, Some(42.5));

    let empty: ApiEnvelope<Job> = serde_json::from_value(json!({"message": "nothing yet"})).unwrap();
    assert_eq!(empty.data, None);
    assert_eq!(empty.status, None);
}
