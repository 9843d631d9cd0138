//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render application chrome and form controls while reading and
//! writing shared state from Leptos context providers.

pub mod app_shell;
pub mod field;
pub mod notice_banner;
pub mod side_nav;
