//! Membership domain module.
//!
//! Classifies marketplace users into membership and experience tiers and
//! computes their trust score. Everything here is a pure computation over a
//! [`UserSnapshot`]; persistence, sessions and rendering belong to callers.
//!
//! # Module Structure
//!
//! - `tier` - MembershipLevel / ExperienceLevel ladders and TierChange
//! - `user_type` - Account types
//! - `snapshot` - UserSnapshot input record
//! - `trust_score` - TrustScore value object and calculator
//! - `criteria` - Per-tier criteria tables and display metadata
//! - `classifier` - Membership and experience classifiers
//! - `progress` - Next-tier progress calculator
//! - `tier_limits` - Feature limits per membership tier
//! - `engine` - MembershipEngine facade and MembershipInfo

mod classifier;
mod criteria;
mod engine;
mod progress;
mod snapshot;
mod tier;
mod tier_limits;
mod trust_score;
mod user_type;

pub use classifier::{ExperienceClassifier, MembershipClassifier};
pub use criteria::{CriteriaCatalog, ExperienceCriteria, TierCriteria, TierDisplay};
pub use engine::{
    calculate_experience_level, calculate_membership_level, calculate_progress_to_next_level,
    calculate_trust_score, get_membership_info, MembershipEngine, MembershipInfo,
};
pub use progress::{LevelProgress, ProgressCalculator, UnmetRequirement};
pub use snapshot::{UserSnapshot, UserSnapshotBuilder, VerificationFlags, MAX_RATING};
pub use tier::{ExperienceLevel, MembershipLevel, TierChange};
pub use tier_limits::TierLimits;
pub use trust_score::{TrustScore, TrustScoreBreakdown, TrustScoreCalculator};
pub use user_type::UserType;
