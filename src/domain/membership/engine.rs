//! Membership engine facade.
//!
//! Composes the trust score calculator, both classifiers and the progress
//! calculator over one criteria catalog. Every call is a pure function of
//! `(UserSnapshot, as_of)`; the engine holds nothing but a shared reference
//! to its catalog and is safe to use from any number of threads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    CriteriaCatalog, ExperienceClassifier, ExperienceLevel, LevelProgress, MembershipClassifier,
    MembershipLevel, ProgressCalculator, TierDisplay, TierLimits, TrustScore,
    TrustScoreCalculator, UserSnapshot,
};
use crate::domain::foundation::Timestamp;

/// Combined classification result for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipInfo {
    pub membership_level: MembershipLevel,
    pub experience_level: ExperienceLevel,
    pub trust_score: TrustScore,
    pub progress: LevelProgress,
    pub membership_details: TierDisplay,
    pub experience_details: TierDisplay,
}

impl MembershipInfo {
    /// Feature limits unlocked by the computed membership tier.
    pub fn limits(&self) -> TierLimits {
        TierLimits::for_level(self.membership_level)
    }
}

/// Entry point bundling the calculators with a criteria catalog.
#[derive(Debug, Clone, Copy)]
pub struct MembershipEngine<'a> {
    catalog: &'a CriteriaCatalog,
}

impl MembershipEngine<'static> {
    /// Engine over the built-in criteria.
    pub fn standard() -> Self {
        Self::new(CriteriaCatalog::standard())
    }
}

impl Default for MembershipEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> MembershipEngine<'a> {
    pub fn new(catalog: &'a CriteriaCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a CriteriaCatalog {
        self.catalog
    }

    /// Bounded 0-100 trust score recomputed from the snapshot.
    pub fn calculate_trust_score(&self, user: &UserSnapshot, as_of: &Timestamp) -> TrustScore {
        TrustScoreCalculator::calculate(user, as_of)
    }

    /// Membership tier, using the recomputed trust score.
    pub fn calculate_membership_level(
        &self,
        user: &UserSnapshot,
        as_of: &Timestamp,
    ) -> MembershipLevel {
        let trust = self.calculate_trust_score(user, as_of);
        MembershipClassifier::classify(self.catalog, user, trust, as_of)
    }

    /// Experience tier, using the recomputed trust score.
    pub fn calculate_experience_level(
        &self,
        user: &UserSnapshot,
        as_of: &Timestamp,
    ) -> ExperienceLevel {
        let trust = self.calculate_trust_score(user, as_of);
        ExperienceClassifier::classify(self.catalog, user, trust, as_of)
    }

    /// Progress from `current` toward the tier above it.
    pub fn calculate_progress_to_next_level(
        &self,
        current: MembershipLevel,
        user: &UserSnapshot,
        as_of: &Timestamp,
    ) -> LevelProgress {
        let trust = self.calculate_trust_score(user, as_of);
        ProgressCalculator::to_next_level(self.catalog, current, user, trust)
    }

    /// Full classification for `user` as of `as_of`.
    pub fn membership_info(&self, user: &UserSnapshot, as_of: &Timestamp) -> MembershipInfo {
        let trust = self.calculate_trust_score(user, as_of);

        let seed = user.seed_trust_score;
        if (seed - f64::from(trust.value())).abs() >= 1.0 {
            debug!(
                user_id = ?user.user_id,
                seed,
                recomputed = trust.value(),
                "stored trust score differs from recomputed value"
            );
        }

        let membership_level = MembershipClassifier::classify(self.catalog, user, trust, as_of);
        let experience_level = ExperienceClassifier::classify(self.catalog, user, trust, as_of);
        let progress =
            ProgressCalculator::to_next_level(self.catalog, membership_level, user, trust);

        MembershipInfo {
            membership_level,
            experience_level,
            trust_score: trust,
            progress,
            membership_details: self.catalog.membership(membership_level).display.clone(),
            experience_details: self.catalog.experience(experience_level).display.clone(),
        }
    }
}

/// Trust score using the standard catalog's engine.
pub fn calculate_trust_score(user: &UserSnapshot, as_of: &Timestamp) -> TrustScore {
    MembershipEngine::standard().calculate_trust_score(user, as_of)
}

/// Membership tier under the standard criteria.
pub fn calculate_membership_level(user: &UserSnapshot, as_of: &Timestamp) -> MembershipLevel {
    MembershipEngine::standard().calculate_membership_level(user, as_of)
}

/// Experience tier under the standard criteria.
pub fn calculate_experience_level(user: &UserSnapshot, as_of: &Timestamp) -> ExperienceLevel {
    MembershipEngine::standard().calculate_experience_level(user, as_of)
}

/// Next-tier progress under the standard criteria.
pub fn calculate_progress_to_next_level(
    current: MembershipLevel,
    user: &UserSnapshot,
    as_of: &Timestamp,
) -> LevelProgress {
    MembershipEngine::standard().calculate_progress_to_next_level(current, user, as_of)
}

/// Full classification under the standard criteria.
pub fn get_membership_info(user: &UserSnapshot, as_of: &Timestamp) -> MembershipInfo {
    MembershipEngine::standard().membership_info(user, as_of)
}
