//! Account types known to the marketplace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of account a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Individual,
    Agent,
    Company,
    Admin,
}

impl UserType {
    /// Lowercase label used in requirement messages.
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Individual => "individual",
            UserType::Agent => "agent",
            UserType::Company => "company",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
