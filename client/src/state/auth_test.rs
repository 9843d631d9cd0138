use super::*;

use std::cell::Cell;

use futures::executor::block_on;
use serde_json::{Value, json};

use crate::config::{UNAUTHENTICATED_ENTRY_PATH, keys};
use crate::error::GENERIC_FAILURE;
use crate::state::role::Role;
use crate::state::session::persisted_signed_up_as;
use crate::util::storage::MemoryStore;

const NOW: i64 = 1_700_000_000_000;

/// Backend that answers every call with a canned body (or error).
struct StubBackend {
    reply: Result<Value, ApiError>,
    calls: Cell<usize>,
}

impl StubBackend {
    fn replying(body: Value) -> Self {
        Self { reply: Ok(body), calls: Cell::new(0) }
    }

    fn failing(err: ApiError) -> Self {
        Self { reply: Err(err), calls: Cell::new(0) }
    }

    fn envelope<T: serde::de::DeserializeOwned>(&self) -> Result<ApiEnvelope<T>, ApiError> {
        self.calls.set(self.calls.get() + 1);
        let body = self.reply.clone()?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl AuthBackend for StubBackend {
    async fn sign_in(&self, _req: &SignInRequest) -> Result<ApiEnvelope<SignInData>, ApiError> {
        self.envelope()
    }

    async fn sign_up(&self, _req: &SignUpRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        self.envelope()
    }

    async fn verify_otp(&self, _req: &VerifyOtpRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        self.envelope()
    }

    async fn forgot_password(&self, _req: &ForgotPasswordRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        self.envelope()
    }

    async fn reset_password(&self, _req: &ResetPasswordRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        self.envelope()
    }
}

fn credentials() -> SignInRequest {
    SignInRequest { email: "ops@example.com".to_owned(), password: "hunter22".to_owned() }
}

// =============================================================
// Sign-in
// =============================================================

#[test]
fn sign_in_persists_token_and_lands_on_role_path() {
    let backend = StubBackend::replying(json!({"data": {"token": "abc", "data": {"role": "business"}}}));
    let store = MemoryStore::new();

    let signed_in = block_on(sign_in(&backend, &store, &credentials(), NOW)).unwrap();

    assert_eq!(signed_in.landing, "/app/sales/dashboard");
    assert_eq!(signed_in.session.token, "abc");
    let stored: Value = serde_json::from_str(&store.get(keys::USER_DETAILS).unwrap()).unwrap();
    assert_eq!(stored["token"], "abc");
    assert_eq!(store.get(keys::LAST_ACTIVE).as_deref(), Some("1700000000000"));
    assert_eq!(persisted_signed_up_as(&store), Some(Role::Business));
}

#[test]
fn sign_in_with_unmapped_role_lands_on_entry_path() {
    let backend = StubBackend::replying(json!({"data": {"token": "abc", "data": {"role": "admin"}}}));
    let store = MemoryStore::new();
    let signed_in = block_on(sign_in(&backend, &store, &credentials(), NOW)).unwrap();
    assert_eq!(signed_in.landing, UNAUTHENTICATED_ENTRY_PATH);
}

#[test]
fn sign_in_rejection_carries_backend_message_and_persists_nothing() {
    let backend = StubBackend::replying(json!({"status": false, "message": "Invalid credentials"}));
    let store = MemoryStore::new();

    let failure = block_on(sign_in(&backend, &store, &credentials(), NOW)).unwrap_err();

    assert_eq!(failure.message, "Invalid credentials");
    assert!(store.is_empty());
    assert_eq!(backend.calls.get(), 1);
}

#[test]
fn sign_in_transport_failure_uses_generic_message() {
    let backend = StubBackend::failing(ApiError::Network("offline".to_owned()));
    let store = MemoryStore::new();
    let failure = block_on(sign_in(&backend, &store, &credentials(), NOW)).unwrap_err();
    assert_eq!(failure.message, GENERIC_FAILURE);
    assert!(store.is_empty());
}

#[test]
fn sign_in_http_error_surfaces_message() {
    let backend =
        StubBackend::failing(ApiError::Http { status: 401, message: Some("Account locked".to_owned()) });
    let store = MemoryStore::new();
    let failure = block_on(sign_in(&backend, &store, &credentials(), NOW)).unwrap_err();
    assert_eq!(failure.to_string(), "Account locked");
}

#[test]
fn sign_in_survives_storage_failure() {
    let backend = StubBackend::replying(json!({"data": {"token": "abc", "data": {"role": "doctor"}}}));
    let store = MemoryStore::rejecting_writes();
    let signed_in = block_on(sign_in(&backend, &store, &credentials(), NOW)).unwrap();
    assert_eq!(signed_in.landing, "/app/project/dashboard");
    assert!(store.is_empty());
}

// =============================================================
// Acknowledged flows
// =============================================================

#[test]
fn sign_up_returns_backend_message() {
    let backend = StubBackend::replying(json!({"status": true, "message": "OTP sent"}));
    let result = block_on(sign_up(&backend, &SignUpRequest::default()));
    assert_eq!(result, Ok(Some("OTP sent".to_owned())));
}

#[test]
fn verify_otp_rejection_is_failure() {
    let backend = StubBackend::replying(json!({"status": false, "message": "Code expired"}));
    let req = VerifyOtpRequest { email: "a@b.co".to_owned(), otp: "123456".to_owned() };
    let failure = block_on(verify_otp(&backend, &req)).unwrap_err();
    assert_eq!(failure.message, "Code expired");
}

#[test]
fn password_flows_accept_bare_success() {
    let backend = StubBackend::replying(json!({"status": true}));
    let forgot = ForgotPasswordRequest { email: "a@b.co".to_owned() };
    let reset = ResetPasswordRequest { token: "t".to_owned(), password: "longenough".to_owned() };
    assert_eq!(block_on(forgot_password(&backend, &forgot)), Ok(None));
    assert_eq!(block_on(reset_password(&backend, &reset)), Ok(None));
    assert_eq!(backend.calls.get(), 2);
}
