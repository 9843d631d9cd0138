//! REST API helpers for the backend under `/api/v1`.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with [`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses and `status: false` envelopes all
//! come back as [`ApiError`]; nothing here panics. Responses are not
//! cancelled or sequenced, so a slow older response can land after a newer
//! one and win.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    ApiEnvelope, Category, Document, ForgotPasswordRequest, Job, KycSubmission, NewJob, Notification, Profile,
    ProfileUpdate, ResetPasswordRequest, Service, SignInData, SignInRequest, SignUpRequest, VerifyOtpRequest,
};
#[cfg(any(test, feature = "hydrate"))]
use crate::config::API_PREFIX;
use crate::error::ApiError;

/// Auth endpoints, split out so sign-in flows can run against a stub.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// # Errors
    ///
    /// Transport or HTTP failure.
    async fn sign_in(&self, req: &SignInRequest) -> Result<ApiEnvelope<SignInData>, ApiError>;

    /// # Errors
    ///
    /// Transport or HTTP failure.
    async fn sign_up(&self, req: &SignUpRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError>;

    /// # Errors
    ///
    /// Transport or HTTP failure.
    async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError>;

    /// # Errors
    ///
    /// Transport or HTTP failure.
    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError>;

    /// # Errors
    ///
    /// Transport or HTTP failure.
    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(path: &str) -> String {
    format!("{API_PREFIX}/{}", path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Turn a raw HTTP response into an envelope or a typed error.
#[cfg(any(test, feature = "hydrate"))]
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<ApiEnvelope<T>, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.message);
    Err(ApiError::Http { status, message })
}

/// HTTP client for the backend, optionally carrying a bearer token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpApi {
    token: Option<String>,
}

impl HttpApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiEnvelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = endpoint(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Delete => Request::delete(&url),
            };
            if let Some(token) = &self.token {
                builder = builder.header("Authorization", &bearer(token));
            }
            let request = match body {
                Some(body) => builder.json(body).map_err(|e| ApiError::Decode(e.to_string()))?,
                None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
            };
            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            decode_response(status, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, body, &self.token);
            Err(ApiError::Unavailable)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::Get, path, None).await?.into_data()
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request::<T, B>(method, path, Some(body)).await?.into_data()
    }

    async fn ack(&self, method: Method, path: &str) -> Result<Option<String>, ApiError> {
        self.request::<serde_json::Value, ()>(method, path, None)
            .await?
            .into_ack()
    }

    // ---- profile & documents ----

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.get("profile").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.send(Method::Put, "profile", update).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get("documents").await
    }

    /// Register an uploaded document (`kind` plus the storage URL).
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn add_document(&self, kind: &str, url: &str) -> Result<Document, ApiError> {
        self.send(Method::Post, "documents", &serde_json::json!({ "kind": kind, "url": url }))
            .await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn submit_kyc(&self, submission: &KycSubmission) -> Result<Option<String>, ApiError> {
        self.request::<serde_json::Value, KycSubmission>(Method::Post, "kyc", Some(submission))
            .await?
            .into_ack()
    }

    // ---- jobs ----

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get("jobs").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_job(&self, job: &NewJob) -> Result<Job, ApiError> {
        self.send(Method::Post, "jobs", job).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn accept_job(&self, job_id: &str) -> Result<Job, ApiError> {
        self.send(Method::Post, &format!("jobs/{job_id}/accept"), &serde_json::json!({}))
            .await
    }

    // ---- admin catalog ----

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("admin/categories").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn save_category(&self, category: &Category) -> Result<Category, ApiError> {
        if category.id.is_empty() {
            self.send(Method::Post, "admin/categories", category).await
        } else {
            self.send(Method::Put, &format!("admin/categories/{}", category.id), category)
                .await
        }
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete_category(&self, id: &str) -> Result<Option<String>, ApiError> {
        self.ack(Method::Delete, &format!("admin/categories/{id}")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.get("admin/services").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn save_service(&self, service: &Service) -> Result<Service, ApiError> {
        if service.id.is_empty() {
            self.send(Method::Post, "admin/services", service).await
        } else {
            self.send(Method::Put, &format!("admin/services/{}", service.id), service)
                .await
        }
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete_service(&self, id: &str) -> Result<Option<String>, ApiError> {
        self.ack(Method::Delete, &format!("admin/services/{id}")).await
    }

    // ---- notifications ----

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get("notifications").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn mark_notification_read(&self, id: &str) -> Result<Option<String>, ApiError> {
        self.ack(Method::Post, &format!("notifications/{id}/read")).await
    }
}

impl AuthBackend for HttpApi {
    async fn sign_in(&self, req: &SignInRequest) -> Result<ApiEnvelope<SignInData>, ApiError> {
        self.request(Method::Post, "auth/sign-in", Some(req)).await
    }

    async fn sign_up(&self, req: &SignUpRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError> {
        self.request(Method::Post, "auth/sign-up", Some(req)).await
    }

    async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError> {
        self.request(Method::Post, "auth/verify-otp", Some(req)).await
    }

    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError> {
        self.request(Method::Post, "auth/forgot-password", Some(req)).await
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<ApiEnvelope<serde_json::Value>, ApiError> {
        self.request(Method::Post, "auth/reset-password", Some(req)).await
    }
}
