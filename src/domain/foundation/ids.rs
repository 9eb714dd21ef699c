//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a marketplace user.
///
/// The engine never looks users up; the id only travels with a snapshot so
/// that log events can be correlated with the account being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);
