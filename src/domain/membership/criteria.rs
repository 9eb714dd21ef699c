//! Per-tier eligibility criteria and display metadata.
//!
//! Criteria live in data, not code: each ladder is an ordered list of rows,
//! lowest tier first. The standard catalog is built once and shared
//! immutably; alternative catalogs can be loaded from YAML and are validated
//! on deserialization.
//!
//! # Standard membership criteria
//!
//! | Tier | Transactions | Trust | Rating | Verified | Account types |
//! |------|--------------|-------|--------|----------|---------------|
//! | Basic | 0 | 0 | 0.0 | No | any |
//! | Premium | 3 | 40 | 3.5 | Yes | any |
//! | VIP | 15 | 70 | 4.3 | Yes | any |
//! | Enterprise | 50 | 85 | 4.7 | Yes | agent, company |
//!
//! # Standard experience criteria
//!
//! | Tier | Transactions | Days | Rating | Trust |
//! |------|--------------|------|--------|-------|
//! | Beginner | - | - | - | - |
//! | Intermediate | 3 | 30 | - | - |
//! | Advanced | 15 | 180 | 4.0 | - |
//! | Expert | 50 | 365 | 4.5 | 80 |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::snapshot::MAX_RATING;
use super::{ExperienceLevel, MembershipLevel, TrustScore, UserSnapshot, UserType};
use crate::domain::foundation::ValidationError;

/// Presentation metadata shown next to a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDisplay {
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Hex color, e.g. `#3b82f6`.
    pub color: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl TierDisplay {
    fn new(name: &str, description: &str, icon: &str, color: &str, benefits: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Eligibility thresholds for one membership tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCriteria {
    pub level: MembershipLevel,
    pub min_transactions: u32,
    pub min_trust_score: u8,
    pub min_rating: f64,
    #[serde(default)]
    pub verification_required: bool,
    /// Account types allowed into the tier. `None` admits everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_types: Option<Vec<UserType>>,
    pub display: TierDisplay,
}

impl TierCriteria {
    /// True if the tier's account-type restriction admits `user_type`.
    pub fn admits(&self, user_type: UserType) -> bool {
        self.user_types
            .as_ref()
            .map(|types| types.contains(&user_type))
            .unwrap_or(true)
    }

    /// Gatekeeping checks that disqualify a user outright.
    pub fn is_eligible(&self, user: &UserSnapshot) -> bool {
        self.admits(user.user_type) && (!self.verification_required || user.verified)
    }

    /// All three numeric thresholds, inclusive. The rating check uses the
    /// clamped rating.
    pub fn thresholds_met(&self, user: &UserSnapshot, trust: TrustScore) -> bool {
        user.completed_transactions >= self.min_transactions
            && trust.value() >= self.min_trust_score
            && user.effective_rating() >= self.min_rating
    }

    /// Eligible and every threshold met.
    pub fn is_satisfied_by(&self, user: &UserSnapshot, trust: TrustScore) -> bool {
        self.is_eligible(user) && self.thresholds_met(user, trust)
    }
}

/// Lower bounds for one experience tier. Undeclared bounds are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCriteria {
    pub level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_transactions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_trust_score: Option<u8>,
    pub display: TierDisplay,
}

impl ExperienceCriteria {
    /// True when every declared bound is met.
    pub fn is_met(&self, transactions: u32, days: u32, rating: f64, trust: TrustScore) -> bool {
        self.min_transactions.map_or(true, |min| transactions >= min)
            && self.min_days.map_or(true, |min| days >= min)
            && self.min_rating.map_or(true, |min| rating >= min)
            && self.min_trust_score.map_or(true, |min| trust.value() >= min)
    }
}

/// Serialized shape of a catalog, checked before it becomes a `CriteriaCatalog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    membership: Vec<TierCriteria>,
    experience: Vec<ExperienceCriteria>,
}

/// Validated criteria for both ladders.
///
/// Invariant: exactly one row per tier, in ascending tier order, so rows can
/// be indexed by rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument", into = "CatalogDocument")]
pub struct CriteriaCatalog {
    membership: Vec<TierCriteria>,
    experience: Vec<ExperienceCriteria>,
}

static STANDARD_CATALOG: Lazy<CriteriaCatalog> = Lazy::new(|| CriteriaCatalog {
    membership: standard_membership_criteria(),
    experience: standard_experience_criteria(),
});

impl CriteriaCatalog {
    /// Builds a catalog from explicit rows.
    pub fn new(
        membership: Vec<TierCriteria>,
        experience: Vec<ExperienceCriteria>,
    ) -> Result<Self, ValidationError> {
        let catalog = Self {
            membership,
            experience,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The marketplace's built-in criteria.
    pub fn standard() -> &'static CriteriaCatalog {
        &STANDARD_CATALOG
    }

    /// Membership rows, lowest tier first.
    pub fn membership_tiers(&self) -> &[TierCriteria] {
        &self.membership
    }

    /// Experience rows, lowest tier first.
    pub fn experience_tiers(&self) -> &[ExperienceCriteria] {
        &self.experience
    }

    pub fn membership(&self, level: MembershipLevel) -> &TierCriteria {
        &self.membership[usize::from(level.rank())]
    }

    pub fn experience(&self, level: ExperienceLevel) -> &ExperienceCriteria {
        &self.experience[usize::from(level.rank())]
    }

    /// Checks ladder shape and threshold sanity.
    ///
    /// Thresholds may not decrease from one tier to the next.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.membership.len() != MembershipLevel::ALL.len() {
            return Err(ValidationError::out_of_range(
                "membership",
                MembershipLevel::ALL.len() as u32,
                MembershipLevel::ALL.len() as u32,
                self.membership.len() as u32,
            ));
        }
        if self.experience.len() != ExperienceLevel::ALL.len() {
            return Err(ValidationError::out_of_range(
                "experience",
                ExperienceLevel::ALL.len() as u32,
                ExperienceLevel::ALL.len() as u32,
                self.experience.len() as u32,
            ));
        }

        for (row, expected) in self.membership.iter().zip(MembershipLevel::ALL) {
            if row.level != expected {
                return Err(ValidationError::invalid_format(
                    "membership",
                    format!("expected {} row, found {}", expected, row.level),
                ));
            }
            validate_rating(&format!("membership.{}.minRating", expected), row.min_rating)?;
            validate_trust(&format!("membership.{}.minTrustScore", expected), row.min_trust_score)?;
            if matches!(&row.user_types, Some(types) if types.is_empty()) {
                return Err(ValidationError::empty_field(format!(
                    "membership.{}.userTypes",
                    expected
                )));
            }
            validate_display(&format!("membership.{}", expected), &row.display)?;
        }

        for pair in self.membership.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.min_transactions < lower.min_transactions
                || upper.min_trust_score < lower.min_trust_score
                || upper.min_rating < lower.min_rating
            {
                return Err(ValidationError::invalid_format(
                    "membership",
                    format!("{} thresholds fall below {}", upper.level, lower.level),
                ));
            }
        }

        for (row, expected) in self.experience.iter().zip(ExperienceLevel::ALL) {
            if row.level != expected {
                return Err(ValidationError::invalid_format(
                    "experience",
                    format!("expected {} row, found {}", expected, row.level),
                ));
            }
            if let Some(rating) = row.min_rating {
                validate_rating(&format!("experience.{}.minRating", expected), rating)?;
            }
            if let Some(trust) = row.min_trust_score {
                validate_trust(&format!("experience.{}.minTrustScore", expected), trust)?;
            }
            validate_display(&format!("experience.{}", expected), &row.display)?;
        }

        for pair in self.experience.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            let decreases = declared_decrease(lower.min_transactions, upper.min_transactions)
                || declared_decrease(lower.min_days, upper.min_days)
                || declared_decrease(lower.min_trust_score, upper.min_trust_score)
                || matches!((lower.min_rating, upper.min_rating), (Some(l), Some(u)) if u < l);
            if decreases {
                return Err(ValidationError::invalid_format(
                    "experience",
                    format!("{} bounds fall below {}", upper.level, lower.level),
                ));
            }
        }

        Ok(())
    }
}

impl TryFrom<CatalogDocument> for CriteriaCatalog {
    type Error = ValidationError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        CriteriaCatalog::new(doc.membership, doc.experience)
    }
}

impl From<CriteriaCatalog> for CatalogDocument {
    fn from(catalog: CriteriaCatalog) -> Self {
        CatalogDocument {
            membership: catalog.membership,
            experience: catalog.experience,
        }
    }
}

impl Default for CriteriaCatalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn declared_decrease<T: PartialOrd + Copy>(lower: Option<T>, upper: Option<T>) -> bool {
    matches!((lower, upper), (Some(l), Some(u)) if u < l)
}

fn validate_rating(field: &str, rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::out_of_range(field, 0.0, MAX_RATING, rating));
    }
    Ok(())
}

fn validate_trust(field: &str, trust: u8) -> Result<(), ValidationError> {
    if trust > TrustScore::MAX.value() {
        return Err(ValidationError::out_of_range(field, 0, 100, trust));
    }
    Ok(())
}

fn validate_display(prefix: &str, display: &TierDisplay) -> Result<(), ValidationError> {
    if display.name.trim().is_empty() {
        return Err(ValidationError::empty_field(format!("{}.display.name", prefix)));
    }
    if !display.color.starts_with('#') {
        return Err(ValidationError::invalid_format(
            format!("{}.display.color", prefix),
            "expected a hex color such as #3b82f6",
        ));
    }
    Ok(())
}

fn standard_membership_criteria() -> Vec<TierCriteria> {
    vec![
        TierCriteria {
            level: MembershipLevel::Basic,
            min_transactions: 0,
            min_trust_score: 0,
            min_rating: 0.0,
            verification_required: false,
            user_types: None,
            display: TierDisplay::new(
                "Basic Member",
                "Standard access to browse and list properties",
                "user",
                "#6b7280",
                &[
                    "List up to 3 properties",
                    "Save favorite listings",
                    "Standard support",
                ],
            ),
        },
        TierCriteria {
            level: MembershipLevel::Premium,
            min_transactions: 3,
            min_trust_score: 40,
            min_rating: 3.5,
            verification_required: true,
            user_types: None,
            display: TierDisplay::new(
                "Premium Member",
                "Verified member with a proven transaction record",
                "star",
                "#3b82f6",
                &[
                    "List up to 15 properties",
                    "2 featured listings per month",
                    "Listing analytics",
                    "Premium badge on profile",
                ],
            ),
        },
        TierCriteria {
            level: MembershipLevel::Vip,
            min_transactions: 15,
            min_trust_score: 70,
            min_rating: 4.3,
            verification_required: true,
            user_types: None,
            display: TierDisplay::new(
                "VIP Member",
                "Top-rated member trusted by the community",
                "crown",
                "#8b5cf6",
                &[
                    "List up to 50 properties",
                    "10 featured listings per month",
                    "Advanced analytics",
                    "Priority support",
                    "VIP badge on profile",
                ],
            ),
        },
        TierCriteria {
            level: MembershipLevel::Enterprise,
            min_transactions: 50,
            min_trust_score: 85,
            min_rating: 4.7,
            verification_required: true,
            user_types: Some(vec![UserType::Agent, UserType::Company]),
            display: TierDisplay::new(
                "Enterprise Partner",
                "Agency or company operating at scale",
                "building",
                "#f59e0b",
                &[
                    "Unlimited listings",
                    "Unlimited featured listings",
                    "Advanced analytics",
                    "Dedicated account manager",
                    "Enterprise badge on profile",
                ],
            ),
        },
    ]
}

fn standard_experience_criteria() -> Vec<ExperienceCriteria> {
    vec![
        ExperienceCriteria {
            level: ExperienceLevel::Beginner,
            min_transactions: None,
            min_days: None,
            min_rating: None,
            min_trust_score: None,
            display: TierDisplay::new(
                "Beginner",
                "New to the marketplace",
                "seedling",
                "#9ca3af",
                &["Guided onboarding", "Listing tips"],
            ),
        },
        ExperienceCriteria {
            level: ExperienceLevel::Intermediate,
            min_transactions: Some(3),
            min_days: Some(30),
            min_rating: None,
            min_trust_score: None,
            display: TierDisplay::new(
                "Intermediate",
                "Active member with first completed deals",
                "trending-up",
                "#10b981",
                &["Intermediate badge", "Market insights digest"],
            ),
        },
        ExperienceCriteria {
            level: ExperienceLevel::Advanced,
            min_transactions: Some(15),
            min_days: Some(180),
            min_rating: Some(4.0),
            min_trust_score: None,
            display: TierDisplay::new(
                "Advanced",
                "Experienced member with consistent reviews",
                "award",
                "#6366f1",
                &["Advanced badge", "Early access to new features"],
            ),
        },
        ExperienceCriteria {
            level: ExperienceLevel::Expert,
            min_transactions: Some(50),
            min_days: Some(365),
            min_rating: Some(4.5),
            min_trust_score: Some(80),
            display: TierDisplay::new(
                "Expert",
                "Seasoned professional with a long track record",
                "trophy",
                "#f97316",
                &["Expert badge", "Featured in expert directory", "Mentor program"],
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn as_of() -> Timestamp {
        Timestamp::parse_rfc3339("2025-06-01T12:00:00Z").unwrap()
    }

    #[test]
    fn standard_catalog_is_valid() {
        assert!(CriteriaCatalog::standard().validate().is_ok());
    }

    #[test]
    fn standard_catalog_is_shared() {
        assert!(std::ptr::eq(
            CriteriaCatalog::standard(),
            CriteriaCatalog::standard()
        ));
    }

    #[test]
    fn rows_are_indexed_by_level() {
        let catalog = CriteriaCatalog::standard();
        for level in MembershipLevel::ALL {
            assert_eq!(catalog.membership(level).level, level);
        }
        for level in ExperienceLevel::ALL {
            assert_eq!(catalog.experience(level).level, level);
        }
    }

    #[test]
    fn premium_requires_verification_and_three_deals() {
        let premium = CriteriaCatalog::standard().membership(MembershipLevel::Premium);
        assert!(premium.verification_required);
        assert_eq!(premium.min_transactions, 3);
        assert_eq!(premium.min_trust_score, 40);
        assert_eq!(premium.min_rating, 3.5);
    }

    #[test]
    fn enterprise_admits_only_agents_and_companies() {
        let enterprise = CriteriaCatalog::standard().membership(MembershipLevel::Enterprise);
        assert!(enterprise.admits(UserType::Agent));
        assert!(enterprise.admits(UserType::Company));
        assert!(!enterprise.admits(UserType::Individual));
        assert!(!enterprise.admits(UserType::Admin));
    }

    #[test]
    fn unrestricted_tier_admits_everyone() {
        let vip = CriteriaCatalog::standard().membership(MembershipLevel::Vip);
        assert!(vip.admits(UserType::Individual));
        assert!(vip.admits(UserType::Admin));
    }

    #[test]
    fn unverified_user_is_not_eligible_for_premium() {
        let premium = CriteriaCatalog::standard().membership(MembershipLevel::Premium);
        let user = UserSnapshot::builder(UserType::Individual, as_of())
            .completed_transactions(10)
            .rating(5.0, 10)
            .build();
        assert!(!premium.is_eligible(&user));
        assert!(premium.thresholds_met(&user, TrustScore::new(90)));
        assert!(!premium.is_satisfied_by(&user, TrustScore::new(90)));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let premium = CriteriaCatalog::standard().membership(MembershipLevel::Premium);
        let user = UserSnapshot::builder(UserType::Individual, as_of())
            .verified(true)
            .completed_transactions(3)
            .rating(3.5, 2)
            .build();
        assert!(premium.is_satisfied_by(&user, TrustScore::new(40)));
        assert!(!premium.is_satisfied_by(&user, TrustScore::new(39)));
    }

    #[test]
    fn experience_checks_only_declared_bounds() {
        let intermediate = CriteriaCatalog::standard().experience(ExperienceLevel::Intermediate);
        assert!(intermediate.is_met(3, 30, 0.0, TrustScore::MIN));
        assert!(!intermediate.is_met(2, 400, 5.0, TrustScore::MAX));
        assert!(!intermediate.is_met(30, 29, 5.0, TrustScore::MAX));

        let beginner = CriteriaCatalog::standard().experience(ExperienceLevel::Beginner);
        assert!(beginner.is_met(0, 0, 0.0, TrustScore::MIN));
    }

    #[test]
    fn new_rejects_missing_tier() {
        let mut membership = standard_membership_criteria();
        membership.pop();
        let err = CriteriaCatalog::new(membership, standard_experience_criteria()).unwrap_err();
        assert_eq!(err.field(), "membership");
    }

    #[test]
    fn new_rejects_out_of_order_rows() {
        let mut membership = standard_membership_criteria();
        membership.swap(1, 2);
        let err = CriteriaCatalog::new(membership, standard_experience_criteria()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn new_rejects_decreasing_thresholds() {
        let mut membership = standard_membership_criteria();
        membership[2].min_transactions = 1;
        let err = CriteriaCatalog::new(membership, standard_experience_criteria()).unwrap_err();
        assert_eq!(err.field(), "membership");
    }

    #[test]
    fn new_rejects_rating_above_five() {
        let mut membership = standard_membership_criteria();
        membership[3].min_rating = 6.0;
        let err = CriteriaCatalog::new(membership, standard_experience_criteria()).unwrap_err();
        assert_eq!(err.field(), "membership.Enterprise.minRating");
    }

    #[test]
    fn new_rejects_empty_user_type_list() {
        let mut membership = standard_membership_criteria();
        membership[3].user_types = Some(vec![]);
        let err = CriteriaCatalog::new(membership, standard_experience_criteria()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn new_rejects_decreasing_experience_bounds() {
        let mut experience = standard_experience_criteria();
        experience[3].min_days = Some(90);
        let err = CriteriaCatalog::new(standard_membership_criteria(), experience).unwrap_err();
        assert_eq!(err.field(), "experience");
    }

    #[test]
    fn catalog_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(CriteriaCatalog::standard()).unwrap();
        assert!(yaml.contains("minTrustScore"));
        let parsed: CriteriaCatalog = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(&parsed, CriteriaCatalog::standard());
    }

    #[test]
    fn deserializing_invalid_catalog_fails() {
        let mut doc = serde_json::to_value(CriteriaCatalog::standard()).unwrap();
        doc["membership"][1]["level"] = serde_json::json!("VIP");
        let result: Result<CriteriaCatalog, _> = serde_json::from_value(doc);
        assert!(result.is_err());
    }
}
