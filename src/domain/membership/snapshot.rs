//! Input snapshot of the user attributes the engine classifies.
//!
//! A data-access layer assembles one `UserSnapshot` per evaluation from the
//! user record plus aggregated transaction and review counts. The engine
//! never mutates it.

use serde::{Deserialize, Serialize};

use super::UserType;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Highest average rating a review can produce.
pub const MAX_RATING: f64 = 5.0;

/// Individual verification checks a user may have passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationFlags {
    #[serde(rename = "emailVerified")]
    pub email: bool,
    #[serde(rename = "phoneVerified")]
    pub phone: bool,
    #[serde(rename = "identityDocumentVerified")]
    pub identity_document: bool,
    #[serde(rename = "addressProofVerified")]
    pub address_proof: bool,
}

impl VerificationFlags {
    /// All four checks passed.
    pub const ALL: Self = Self {
        email: true,
        phone: true,
        identity_document: true,
        address_proof: true,
    };

    /// Number of checks passed (0-4).
    pub fn count(&self) -> u32 {
        [self.email, self.phone, self.identity_document, self.address_proof]
            .iter()
            .filter(|passed| **passed)
            .count() as u32
    }
}

/// Flat, immutable view of one user at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    pub user_type: UserType,

    /// Overall identity-verification flag, gating the paid tiers.
    #[serde(default)]
    pub verified: bool,

    #[serde(flatten)]
    pub verification: VerificationFlags,

    #[serde(default)]
    pub completed_transactions: u32,

    #[serde(default)]
    pub average_rating: f64,

    #[serde(default)]
    pub review_count: u32,

    /// Score previously stored for the user. Recomputed by the engine and
    /// never used for classification.
    #[serde(default, rename = "trustScore")]
    pub seed_trust_score: f64,

    pub created_at: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_until: Option<Timestamp>,
}

impl UserSnapshot {
    /// Starts a snapshot for a fresh, unverified account.
    pub fn builder(user_type: UserType, created_at: Timestamp) -> UserSnapshotBuilder {
        UserSnapshotBuilder::new(user_type, created_at)
    }

    /// Average rating clamped to `[0, 5]`; non-finite values count as 0.
    pub fn effective_rating(&self) -> f64 {
        if self.average_rating.is_finite() {
            self.average_rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }

    /// Whole days since account creation, as of `as_of`.
    pub fn tenure_days(&self, as_of: &Timestamp) -> u32 {
        as_of.whole_days_since(&self.created_at)
    }

    /// True while a paid premium period is still running at `as_of`.
    pub fn premium_active(&self, as_of: &Timestamp) -> bool {
        self.premium_until
            .map(|until| until.is_after(as_of))
            .unwrap_or(false)
    }

    /// Strict check of the numeric fields.
    ///
    /// The calculators clamp out-of-range values on their own; this exists
    /// for callers that prefer to reject a malformed snapshot up front.
    pub fn validate(&self, as_of: &Timestamp) -> Result<(), ValidationError> {
        if !self.average_rating.is_finite()
            || !(0.0..=MAX_RATING).contains(&self.average_rating)
        {
            return Err(ValidationError::out_of_range(
                "averageRating",
                0.0,
                MAX_RATING,
                self.average_rating,
            ));
        }
        if !self.seed_trust_score.is_finite() || !(0.0..=100.0).contains(&self.seed_trust_score)
        {
            return Err(ValidationError::out_of_range(
                "trustScore",
                0.0,
                100.0,
                self.seed_trust_score,
            ));
        }
        if self.created_at.is_after(as_of) {
            return Err(ValidationError::invalid_format(
                "createdAt",
                format!("account created in the future ({})", self.created_at),
            ));
        }
        Ok(())
    }
}

/// Fluent construction of [`UserSnapshot`], mainly for tests and fixtures.
#[derive(Debug, Clone)]
pub struct UserSnapshotBuilder {
    snapshot: UserSnapshot,
}

impl UserSnapshotBuilder {
    fn new(user_type: UserType, created_at: Timestamp) -> Self {
        Self {
            snapshot: UserSnapshot {
                user_id: None,
                user_type,
                verified: false,
                verification: VerificationFlags::default(),
                completed_transactions: 0,
                average_rating: 0.0,
                review_count: 0,
                seed_trust_score: 0.0,
                created_at,
                premium_until: None,
            },
        }
    }

    pub fn user_id(mut self, id: UserId) -> Self {
        self.snapshot.user_id = Some(id);
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.snapshot.verified = verified;
        self
    }

    pub fn verification(mut self, flags: VerificationFlags) -> Self {
        self.snapshot.verification = flags;
        self
    }

    pub fn email_verified(mut self) -> Self {
        self.snapshot.verification.email = true;
        self
    }

    pub fn phone_verified(mut self) -> Self {
        self.snapshot.verification.phone = true;
        self
    }

    pub fn identity_document_verified(mut self) -> Self {
        self.snapshot.verification.identity_document = true;
        self
    }

    pub fn address_proof_verified(mut self) -> Self {
        self.snapshot.verification.address_proof = true;
        self
    }

    /// Overall flag plus all four individual checks.
    pub fn fully_verified(self) -> Self {
        self.verified(true).verification(VerificationFlags::ALL)
    }

    pub fn completed_transactions(mut self, count: u32) -> Self {
        self.snapshot.completed_transactions = count;
        self
    }

    pub fn rating(mut self, average: f64, reviews: u32) -> Self {
        self.snapshot.average_rating = average;
        self.snapshot.review_count = reviews;
        self
    }

    pub fn seed_trust_score(mut self, score: f64) -> Self {
        self.snapshot.seed_trust_score = score;
        self
    }

    pub fn premium_until(mut self, until: Timestamp) -> Self {
        self.snapshot.premium_until = Some(until);
        self
    }

    pub fn build(self) -> UserSnapshot {
        self.snapshot
    }
}
