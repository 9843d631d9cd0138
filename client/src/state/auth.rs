//! Sign-in, sign-up and password flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call these with the live [`HttpApi`](crate::net::api::HttpApi);
//! tests call them with a stub [`AuthBackend`]. Every flow returns an
//! [`AuthFailure`] carrying a display message instead of an error chain, so
//! pages only have to show it.
//!
//! ERROR HANDLING
//! ==============
//! A sign-in that succeeds but cannot be persisted still succeeds; the
//! session simply will not survive a reload.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use crate::error::ApiError;
use crate::net::api::AuthBackend;
use crate::net::types::{
    ApiEnvelope, ForgotPasswordRequest, ResetPasswordRequest, SignInData, SignInRequest, SignUpRequest,
    VerifyOtpRequest,
};
use crate::state::session::{landing_path_for, persist_sign_in};
use crate::util::storage::KeyValueStore;

/// A failed auth call, reduced to what the user should read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFailure {
    pub message: String,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ApiError> for AuthFailure {
    fn from(err: ApiError) -> Self {
        log::warn!("auth request failed: {err}");
        Self { message: err.user_message() }
    }
}

/// Result of a successful sign-in.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedIn {
    pub session: SignInData,
    /// Route to navigate to once the settle delay has passed.
    pub landing: &'static str,
}

/// Authenticate, persist the session payload and pick the landing route.
///
/// # Errors
///
/// Returns the backend's message when it gave one, else a generic failure.
/// Nothing is persisted on failure.
pub async fn sign_in(
    backend: &impl AuthBackend,
    store: &impl KeyValueStore,
    credentials: &SignInRequest,
    now_ms: i64,
) -> Result<SignedIn, AuthFailure> {
    let session = backend.sign_in(credentials).await?.into_data()?;
    if let Err(e) = persist_sign_in(store, &session, now_ms) {
        log::warn!("signed in but could not persist session: {e}");
    }
    let landing = landing_path_for(session.data.role());
    log::info!("signed in; landing on {landing}");
    Ok(SignedIn { session, landing })
}

fn acknowledged(result: Result<ApiEnvelope<serde_json::Value>, ApiError>) -> Result<Option<String>, AuthFailure> {
    Ok(result?.into_ack()?)
}

/// Register a new account. On success the backend sends an OTP to the
/// supplied email.
///
/// # Errors
///
/// See [`AuthFailure`].
pub async fn sign_up(backend: &impl AuthBackend, form: &SignUpRequest) -> Result<Option<String>, AuthFailure> {
    acknowledged(backend.sign_up(form).await)
}

/// # Errors
///
/// See [`AuthFailure`].
pub async fn verify_otp(backend: &impl AuthBackend, req: &VerifyOtpRequest) -> Result<Option<String>, AuthFailure> {
    acknowledged(backend.verify_otp(req).await)
}

/// # Errors
///
/// See [`AuthFailure`].
pub async fn forgot_password(
    backend: &impl AuthBackend,
    req: &ForgotPasswordRequest,
) -> Result<Option<String>, AuthFailure> {
    acknowledged(backend.forgot_password(req).await)
}

/// # Errors
///
/// See [`AuthFailure`].
pub async fn reset_password(
    backend: &impl AuthBackend,
    req: &ResetPasswordRequest,
) -> Result<Option<String>, AuthFailure> {
    acknowledged(backend.reset_password(req).await)
}
