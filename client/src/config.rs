//! Compile-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build has no environment to read, so timing windows, entry
//! routes and the API prefix are fixed here and shared by pages, state and
//! the REST layer.

/// Prefix for every backend REST endpoint. Requests are same-origin; the
/// host server forwards them to the external backend.
pub const API_PREFIX: &str = "/api/v1";

/// Inactivity window after which a signed-in session is ended.
pub const IDLE_TIMEOUT_SECS: u64 = 1800;

/// Delay between a successful sign-in and navigation to the landing route.
pub const SIGN_IN_SETTLE_MS: u64 = 500;

/// How long a notice banner stays visible before dismissing itself.
pub const NOTICE_DISMISS_MS: u64 = 3000;

/// Minimum spacing between `lastActive` writes while the user is active.
pub const ACTIVITY_PERSIST_INTERVAL_MS: i64 = 1000;

/// KYC wizard progress older than this is discarded on load.
pub const KYC_PROGRESS_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Route shown to signed-out users and used as the landing fallback.
pub const UNAUTHENTICATED_ENTRY_PATH: &str = "/sign-in";

/// Route for signed-in users whose role has no dedicated landing page.
pub const AUTHENTICATED_ENTRY_PATH: &str = "/app/account/settings";

/// Query parameter carrying the originally requested location on redirect.
pub const REDIRECT_URL_KEY: &str = "redirectUrl";

/// Persisted storage keys.
pub mod keys {
    pub const USER_DETAILS: &str = "userdetails";
    pub const LAST_ACTIVE: &str = "lastActive";
    pub const KYC_FORM_STATE: &str = "kycFormState";
    pub const KYC_FORM_PROGRESS: &str = "kycFormProgress";
    pub const KYC_CATEGORY_ID: &str = "kyc_category_id";
}

/// Idle window in milliseconds.
#[must_use]
pub fn idle_timeout_ms() -> i64 {
    i64::try_from(IDLE_TIMEOUT_SECS * 1000).unwrap_or(i64::MAX)
}
