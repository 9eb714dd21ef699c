//! Trust score calculation.
//!
//! The score is the sum of four independently capped buckets:
//!
//! | Bucket | Max | Rule |
//! |--------|-----|------|
//! | Verification | 40 | 10 per passed check (email, phone, identity document, address proof) |
//! | Rating | 30 | `(average / 5) * 30`, only when the user has reviews |
//! | Transactions | 20 | 2 per completed transaction |
//! | Tenure | 10 | 1 per 36.5 days since creation |
//!
//! The sum is clamped to `[0, 100]` and rounded to the nearest integer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::snapshot::MAX_RATING;
use super::UserSnapshot;
use crate::domain::foundation::Timestamp;

pub const VERIFICATION_POINTS_PER_CHECK: f64 = 10.0;
pub const VERIFICATION_BUCKET_MAX: f64 = 40.0;
pub const RATING_BUCKET_MAX: f64 = 30.0;
pub const TRANSACTION_POINTS_EACH: f64 = 2.0;
pub const TRANSACTION_BUCKET_MAX: f64 = 20.0;
pub const TENURE_DAYS_PER_POINT: f64 = 36.5;
pub const TENURE_BUCKET_MAX: f64 = 10.0;

/// Bounded 0-100 trust score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Creates a score, clamping to 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounds raw points to the nearest integer inside `[0, 100]`.
    pub fn from_points(points: f64) -> Self {
        if !points.is_finite() {
            return Self::MIN;
        }
        Self(points.clamp(0.0, 100.0).round() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Points still missing to reach `target` (0 when already there).
    pub fn points_short_of(&self, target: u8) -> u8 {
        target.saturating_sub(self.0)
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unrounded contribution of each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustScoreBreakdown {
    pub verification: f64,
    pub rating: f64,
    pub transactions: f64,
    pub tenure: f64,
}

impl TrustScoreBreakdown {
    /// Raw sum of all buckets.
    pub fn total(&self) -> f64 {
        self.verification + self.rating + self.transactions + self.tenure
    }

    /// Final clamped and rounded score.
    pub fn score(&self) -> TrustScore {
        TrustScore::from_points(self.total())
    }
}

/// Stateless trust score calculator.
pub struct TrustScoreCalculator;

impl TrustScoreCalculator {
    /// Computes each bucket for `user` as of `as_of`.
    pub fn breakdown(user: &UserSnapshot, as_of: &Timestamp) -> TrustScoreBreakdown {
        TrustScoreBreakdown {
            verification: Self::verification_points(user),
            rating: Self::rating_points(user),
            transactions: Self::transaction_points(user),
            tenure: Self::tenure_points(user, as_of),
        }
    }

    /// Computes the bounded trust score for `user` as of `as_of`.
    pub fn calculate(user: &UserSnapshot, as_of: &Timestamp) -> TrustScore {
        Self::breakdown(user, as_of).score()
    }

    fn verification_points(user: &UserSnapshot) -> f64 {
        (f64::from(user.verification.count()) * VERIFICATION_POINTS_PER_CHECK)
            .min(VERIFICATION_BUCKET_MAX)
    }

    // A stray average with no reviews behind it contributes nothing.
    fn rating_points(user: &UserSnapshot) -> f64 {
        if user.review_count == 0 {
            return 0.0;
        }
        (user.effective_rating() / MAX_RATING * RATING_BUCKET_MAX).min(RATING_BUCKET_MAX)
    }

    fn transaction_points(user: &UserSnapshot) -> f64 {
        (f64::from(user.completed_transactions) * TRANSACTION_POINTS_EACH)
            .min(TRANSACTION_BUCKET_MAX)
    }

    fn tenure_points(user: &UserSnapshot, as_of: &Timestamp) -> f64 {
        (f64::from(user.tenure_days(as_of)) / TENURE_DAYS_PER_POINT).min(TENURE_BUCKET_MAX)
    }
}
