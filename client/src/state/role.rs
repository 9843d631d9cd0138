//! Account roles.
//!
//! DESIGN
//! ======
//! The backend reports roles as free-form strings (`"super admin"`,
//! `"Doctor"`, ...). They are parsed once into [`Role`] so navigation,
//! routing and landing decisions match exhaustively instead of comparing
//! strings.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    Admin,
    Doctor,
    Business,
    User,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::SuperAdmin, Role::Admin, Role::Doctor, Role::Business, Role::User];

    /// Canonical tag as the backend spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super admin",
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Business => "business",
            Self::User => "user",
        }
    }

    /// Parse a raw role string, case-insensitively. Unknown or blank strings
    /// yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    /// Landing route after sign-in, for roles that have one.
    #[must_use]
    pub fn landing_path(self) -> Option<&'static str> {
        match self {
            Self::Business => Some("/app/sales/dashboard"),
            Self::Doctor => Some("/app/project/dashboard"),
            Self::SuperAdmin | Self::Admin | Self::User => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "super admin" | "superadmin" | "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "business" => Ok(Self::Business),
            "user" => Ok(Self::User),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}
