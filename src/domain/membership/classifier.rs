//! Tier classifiers.
//!
//! Both classifiers scan their ladder from the highest tier down and return
//! the first tier whose criteria are met, falling back to the lowest tier.

use tracing::debug;

use super::{CriteriaCatalog, ExperienceLevel, MembershipLevel, TrustScore, UserSnapshot};
use crate::domain::foundation::Timestamp;

/// Maps a user snapshot to a membership tier.
pub struct MembershipClassifier;

impl MembershipClassifier {
    /// Classifies `user`, honouring an active paid-premium period.
    ///
    /// Paid premium is a floor: the result is never below `Premium` while
    /// `premium_until` lies after `as_of`, and a user whose record earns a
    /// higher tier keeps it.
    pub fn classify(
        catalog: &CriteriaCatalog,
        user: &UserSnapshot,
        trust: TrustScore,
        as_of: &Timestamp,
    ) -> MembershipLevel {
        let earned = Self::earned_level(catalog, user, trust);

        if user.premium_active(as_of) && earned < MembershipLevel::Premium {
            debug!(
                user_id = ?user.user_id,
                earned = %earned,
                "paid premium raises membership to Premium"
            );
            return MembershipLevel::Premium;
        }

        earned
    }

    /// The tier earned from the user's record alone, ignoring paid premium.
    pub fn earned_level(
        catalog: &CriteriaCatalog,
        user: &UserSnapshot,
        trust: TrustScore,
    ) -> MembershipLevel {
        let level = catalog
            .membership_tiers()
            .iter()
            .rev()
            .filter(|criteria| criteria.level != MembershipLevel::Basic)
            .find(|criteria| criteria.is_satisfied_by(user, trust))
            .map(|criteria| criteria.level)
            .unwrap_or(MembershipLevel::Basic);

        debug!(
            user_id = ?user.user_id,
            user_type = %user.user_type,
            transactions = user.completed_transactions,
            trust = trust.value(),
            rating = user.average_rating,
            level = %level,
            "membership tier resolved"
        );

        level
    }
}

/// Maps a user snapshot to an experience tier.
pub struct ExperienceClassifier;

impl ExperienceClassifier {
    pub fn classify(
        catalog: &CriteriaCatalog,
        user: &UserSnapshot,
        trust: TrustScore,
        as_of: &Timestamp,
    ) -> ExperienceLevel {
        let days = user.tenure_days(as_of);
        let rating = user.effective_rating();

        catalog
            .experience_tiers()
            .iter()
            .rev()
            .filter(|criteria| criteria.level != ExperienceLevel::Beginner)
            .find(|criteria| criteria.is_met(user.completed_transactions, days, rating, trust))
            .map(|criteria| criteria.level)
            .unwrap_or(ExperienceLevel::Beginner)
    }
}
