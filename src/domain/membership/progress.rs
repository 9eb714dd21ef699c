//! Progress toward the next membership tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CriteriaCatalog, MembershipLevel, TierCriteria, TrustScore, UserSnapshot, UserType};
use crate::domain::foundation::Percentage;

/// How far a user is from the tier above their current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub next_level: Option<MembershipLevel>,
    pub progress: Percentage,
    /// Unmet requirements, in checklist order. Empty iff progress is 100%.
    pub requirements: Vec<String>,
}

impl LevelProgress {
    /// Progress reported at the top of the ladder.
    pub fn top_tier() -> Self {
        Self {
            next_level: None,
            progress: Percentage::HUNDRED,
            requirements: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }
}

/// A single unmet requirement with its exact gap.
#[derive(Debug, Clone, PartialEq)]
pub enum UnmetRequirement {
    Verification,
    Transactions(u32),
    TrustPoints(u8),
    Rating(f64),
    AccountType(Vec<UserType>),
}

impl fmt::Display for UnmetRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmetRequirement::Verification => write!(f, "identity verification"),
            UnmetRequirement::Transactions(1) => write!(f, "1 more transaction"),
            UnmetRequirement::Transactions(n) => write!(f, "{} more transactions", n),
            UnmetRequirement::TrustPoints(1) => write!(f, "1 more trust point"),
            UnmetRequirement::TrustPoints(n) => write!(f, "{} more trust points", n),
            UnmetRequirement::Rating(min) if has_one_decimal(*min) => {
                write!(f, "rating of {:.1} or higher", min)
            }
            UnmetRequirement::Rating(min) => write!(f, "rating of {} or higher", min),
            UnmetRequirement::AccountType(types) => {
                let labels: Vec<&str> = types.iter().map(UserType::label).collect();
                write!(f, "{} account", labels.join(" or "))
            }
        }
    }
}

fn has_one_decimal(value: f64) -> bool {
    ((value * 10.0).round() / 10.0 - value).abs() < 1e-9
}

/// Stateless next-tier progress calculator.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Reports progress from `current` toward the tier immediately above it.
    pub fn to_next_level(
        catalog: &CriteriaCatalog,
        current: MembershipLevel,
        user: &UserSnapshot,
        trust: TrustScore,
    ) -> LevelProgress {
        let Some(next) = current.next() else {
            return LevelProgress::top_tier();
        };

        let (total, unmet) = Self::checklist(catalog.membership(next), user, trust);
        let met = total - unmet.len() as u32;

        LevelProgress {
            next_level: Some(next),
            progress: Percentage::from_ratio(met, total),
            requirements: unmet.iter().map(ToString::to_string).collect(),
        }
    }

    /// Evaluates every requirement of `criteria`, returning the number of
    /// checks and the ones that failed.
    ///
    /// Order: verification (when required), transactions, trust score,
    /// rating, then account type (when restricted).
    pub fn checklist(
        criteria: &TierCriteria,
        user: &UserSnapshot,
        trust: TrustScore,
    ) -> (u32, Vec<UnmetRequirement>) {
        let mut total = 0;
        let mut unmet = Vec::new();

        if criteria.verification_required {
            total += 1;
            if !user.verified {
                unmet.push(UnmetRequirement::Verification);
            }
        }

        total += 1;
        if user.completed_transactions < criteria.min_transactions {
            unmet.push(UnmetRequirement::Transactions(
                criteria.min_transactions - user.completed_transactions,
            ));
        }

        total += 1;
        if trust.value() < criteria.min_trust_score {
            unmet.push(UnmetRequirement::TrustPoints(
                trust.points_short_of(criteria.min_trust_score),
            ));
        }

        total += 1;
        if user.effective_rating() < criteria.min_rating {
            unmet.push(UnmetRequirement::Rating(criteria.min_rating));
        }

        if let Some(types) = &criteria.user_types {
            total += 1;
            if !criteria.admits(user.user_type) {
                unmet.push(UnmetRequirement::AccountType(types.clone()));
            }
        }

        (total, unmet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn as_of() -> Timestamp {
        Timestamp::parse_rfc3339("2025-06-01T12:00:00Z").unwrap()
    }

    fn progress(current: MembershipLevel, user: &UserSnapshot, trust: u8) -> LevelProgress {
        ProgressCalculator::to_next_level(
            CriteriaCatalog::standard(),
            current,
            user,
            TrustScore::new(trust),
        )
    }

    #[test]
    fn top_tier_reports_complete() {
        let user = UserSnapshot::builder(UserType::Company, as_of()).build();
        let result = progress(MembershipLevel::Enterprise, &user, 0);
        assert_eq!(result, LevelProgress::top_tier());
        assert_eq!(result.next_level, None);
        assert_eq!(result.progress, Percentage::HUNDRED);
        assert!(result.requirements.is_empty());
    }

    #[test]
    fn brand_new_user_needs_everything_for_premium() {
        let user = UserSnapshot::builder(UserType::Individual, as_of())
            .email_verified()
            .build();
        let result = progress(MembershipLevel::Basic, &user, 10);

        assert_eq!(result.next_level, Some(MembershipLevel::Premium));
        assert_eq!(result.progress, Percentage::ZERO);
        assert_eq!(
            result.requirements,
            vec![
                "identity verification".to_string(),
                "3 more transactions".to_string(),
                "30 more trust points".to_string(),
                "rating of 3.5 or higher".to_string(),
            ]
        );
    }

    #[test]
    fn partial_progress_is_rounded_share_of_met_checks() {
        let user = UserSnapshot::builder(UserType::Individual, as_of())
            .verified(true)
            .completed_transactions(5)
            .rating(4.0, 4)
            .build();
        let result = progress(MembershipLevel::Basic, &user, 28);

        // 3 of 4 checks met.
        assert_eq!(result.progress.value(), 75);
        assert_eq!(result.requirements, vec!["12 more trust points".to_string()]);
    }

    #[test]
    fn singular_gaps_read_naturally() {
        let user = UserSnapshot::builder(UserType::Individual, as_of())
            .verified(true)
            .completed_transactions(14)
            .rating(4.5, 10)
            .build();
        let result = progress(MembershipLevel::Premium, &user, 69);

        assert_eq!(result.next_level, Some(MembershipLevel::Vip));
        assert_eq!(
            result.requirements,
            vec!["1 more transaction".to_string(), "1 more trust point".to_string()]
        );
        assert_eq!(result.progress.value(), 50);
    }

    #[test]
    fn enterprise_checklist_includes_account_type() {
        let user = UserSnapshot::builder(UserType::Individual, as_of())
            .verified(true)
            .completed_transactions(60)
            .rating(4.9, 40)
            .build();
        let result = progress(MembershipLevel::Vip, &user, 95);

        assert_eq!(result.next_level, Some(MembershipLevel::Enterprise));
        assert_eq!(result.requirements, vec!["agent or company account".to_string()]);
        // 4 of 5 checks met.
        assert_eq!(result.progress.value(), 80);
    }

    #[test]
    fn satisfied_next_tier_reports_full_progress() {
        let user = UserSnapshot::builder(UserType::Agent, as_of())
            .verified(true)
            .completed_transactions(60)
            .rating(4.9, 40)
            .build();
        let result = progress(MembershipLevel::Vip, &user, 95);
        assert!(result.is_complete());
        assert!(result.requirements.is_empty());
    }

    #[test]
    fn rating_requirement_shows_one_decimal() {
        assert_eq!(
            UnmetRequirement::Rating(4.3).to_string(),
            "rating of 4.3 or higher"
        );
        assert_eq!(UnmetRequirement::Rating(4.0).to_string(), "rating of 4.0 or higher");
    }

    #[test]
    fn finer_rating_threshold_is_not_rounded() {
        assert_eq!(
            UnmetRequirement::Rating(4.25).to_string(),
            "rating of 4.25 or higher"
        );
    }

    #[test]
    fn nan_rating_counts_as_unmet() {
        let user = UserSnapshot::builder(UserType::Individual, as_of().minus_days(400))
            .verified(true)
            .fully_verified()
            .completed_transactions(10)
            .rating(f64::NAN, 10)
            .build();
        let result = progress(MembershipLevel::Basic, &user, 70);

        assert_eq!(result.next_level, Some(MembershipLevel::Premium));
        assert_eq!(result.requirements, vec!["rating of 3.5 or higher".to_string()]);
        assert_eq!(result.progress.value(), 75);
    }

    #[test]
    fn progress_serializes_camel_case() {
        let json = serde_json::to_value(LevelProgress::top_tier()).unwrap();
        assert_eq!(json["nextLevel"], serde_json::Value::Null);
        assert_eq!(json["progress"], 100);
        assert_eq!(json["requirements"], serde_json::json!([]));
    }
}
