//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `catalog`, `jobs`, etc.) so pages can
//! depend on small focused models. Each model is plain data; the app root
//! wraps them in `RwSignal`s and provides them as context.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod collection;
pub mod idle;
pub mod jobs;
pub mod kyc;
pub mod notice;
pub mod role;
pub mod session;
