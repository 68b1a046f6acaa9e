//! Dashboard view identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string names no view.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown view: {0}")]
pub struct ParseViewError(pub String);

/// The four mutually exclusive dashboard views.
///
/// Exactly one is active at any instant; a fresh dashboard starts on
/// [`View::Dashboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Users,
    Products,
    Recommendations,
}

impl View {
    /// All views in navigation order.
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::Users,
        Self::Products,
        Self::Recommendations,
    ];

    /// Identifier used in URLs and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Products => "products",
            Self::Recommendations => "recommendations",
        }
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Products => "Products",
            Self::Recommendations => "Recommendations",
        }
    }

    /// Path of the page that activates this view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Users => "/users",
            Self::Products => "/products",
            Self::Recommendations => "/recommendations",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| ParseViewError(s.to_owned()))
    }
}
