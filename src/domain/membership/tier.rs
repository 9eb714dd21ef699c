//! Membership and experience tier definitions.
//!
//! Both ladders are strictly ordered: the derived `Ord` follows declaration
//! order, so `Basic < Premium < Vip < Enterprise` and
//! `Beginner < Intermediate < Advanced < Expert`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership tier, gating access to marketplace features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipLevel {
    Basic,
    Premium,
    Vip,
    Enterprise,
}

impl MembershipLevel {
    /// Every tier, lowest first.
    pub const ALL: [MembershipLevel; 4] = [
        MembershipLevel::Basic,
        MembershipLevel::Premium,
        MembershipLevel::Vip,
        MembershipLevel::Enterprise,
    ];

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more features.
    pub fn rank(&self) -> u8 {
        match self {
            MembershipLevel::Basic => 0,
            MembershipLevel::Premium => 1,
            MembershipLevel::Vip => 2,
            MembershipLevel::Enterprise => 3,
        }
    }

    /// The tier immediately above this one, if any.
    pub fn next(&self) -> Option<MembershipLevel> {
        Self::ALL.get(usize::from(self.rank()) + 1).copied()
    }

    /// Returns true for the top of the ladder.
    pub fn is_top(&self) -> bool {
        self.next().is_none()
    }

    /// Returns true if this tier is `other` or above.
    pub fn is_at_least(&self, other: MembershipLevel) -> bool {
        *self >= other
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipLevel::Basic => "Basic",
            MembershipLevel::Premium => "Premium",
            MembershipLevel::Vip => "VIP",
            MembershipLevel::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for MembershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Experience tier, reflecting account maturity independently of membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    /// Every tier, lowest first.
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
        ExperienceLevel::Expert,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            ExperienceLevel::Beginner => 0,
            ExperienceLevel::Intermediate => 1,
            ExperienceLevel::Advanced => 2,
            ExperienceLevel::Expert => 3,
        }
    }

    pub fn next(&self) -> Option<ExperienceLevel> {
        Self::ALL.get(usize::from(self.rank()) + 1).copied()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
            ExperienceLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of recomputing a user's membership tier.
///
/// Callers that persist `MembershipInfo` compare the stored tier with the
/// fresh one to decide whether to notify the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierChange {
    Upgrade {
        from: MembershipLevel,
        to: MembershipLevel,
    },
    Downgrade {
        from: MembershipLevel,
        to: MembershipLevel,
    },
    Unchanged {
        level: MembershipLevel,
    },
}

impl TierChange {
    /// Classifies the move from `previous` to `current`.
    pub fn between(previous: MembershipLevel, current: MembershipLevel) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => TierChange::Upgrade {
                from: previous,
                to: current,
            },
            std::cmp::Ordering::Less => TierChange::Downgrade {
                from: previous,
                to: current,
            },
            std::cmp::Ordering::Equal => TierChange::Unchanged { level: current },
        }
    }

    pub fn is_upgrade(&self) -> bool {
        matches!(self, TierChange::Upgrade { .. })
    }

    pub fn is_downgrade(&self) -> bool {
        matches!(self, TierChange::Downgrade { .. })
    }
}
