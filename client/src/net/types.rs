//! Wire DTOs for the backend REST API.
//!
//! DESIGN
//! ======
//! Every endpoint answers with the same `{status, data, message}` envelope.
//! Field names follow the backend's camelCase; unknown user fields are kept
//! in `extra` so the persisted sign-in payload stays lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, GENERIC_FAILURE};
use crate::state::role::Role;

/// Response envelope shared by all endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: Option<bool>,
    /// Missing `data` is `None`; no `T: Default` needed.
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// `status: false` is a failure; an absent status is not.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status != Some(false)
    }

    fn rejection(self) -> ApiError {
        ApiError::Rejected { message: self.message.unwrap_or_else(|| GENERIC_FAILURE.to_owned()) }
    }

    /// Unwrap the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// `Rejected` when the backend declared failure, `Decode` when a success
    /// carried no data.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.rejection());
        }
        self.data.ok_or_else(|| ApiError::Decode("response carried no data".to_owned()))
    }

    /// Accept a successful envelope, returning its message (if any).
    ///
    /// # Errors
    ///
    /// `Rejected` when the backend declared failure.
    pub fn into_ack(self) -> Result<Option<String>, ApiError> {
        if !self.is_success() {
            return Err(self.rejection());
        }
        Ok(self.message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub signed_up_as: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// The user object returned by sign-in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_up_as: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserDetails {
    /// Role reported by the backend at sign-in.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    /// Role the account signed up as, falling back to `role`.
    #[must_use]
    pub fn signed_up_as(&self) -> Option<Role> {
        self.signed_up_as
            .as_deref()
            .and_then(Role::parse)
            .or_else(|| self.role())
    }

    /// Backend id of the user (`id` or `_id`), kept in the untyped fields.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        ["id", "_id"]
            .iter()
            .find_map(|k| self.extra.get(*k).and_then(serde_json::Value::as_str))
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Account")
    }
}

/// `data` of a successful sign-in; persisted verbatim as `userdetails`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignInData {
    pub token: String,
    #[serde(default)]
    pub data: UserDetails,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
    Accepted,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub accepted_by: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub kyc_status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(alias = "_id")]
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Final KYC submission assembled from the wizard's steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmission {
    pub category_id: Option<String>,
    pub form_data: serde_json::Value,
}

fn default_true() -> bool {
    true
}
