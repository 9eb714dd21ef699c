//! Tier-based feature limits configuration.
//!
//! Defines what marketplace features each membership tier unlocks.

use super::MembershipLevel;
use serde::{Deserialize, Serialize};

/// Feature limits for a membership tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub level: MembershipLevel,
    /// Maximum simultaneously active listings. None = unlimited.
    pub max_active_listings: Option<u32>,
    /// Featured (promoted) listings per month. None = unlimited.
    pub featured_listings_per_month: Option<u32>,
    /// Whether listing analytics are available.
    pub analytics_access: bool,
    /// Whether support requests are prioritised.
    pub priority_support: bool,
}

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Active listings | Featured/month | Analytics | Priority support |
    /// |------|-----------------|----------------|-----------|------------------|
    /// | Basic | 3 | 0 | No | No |
    /// | Premium | 15 | 2 | Yes | No |
    /// | VIP | 50 | 10 | Yes | Yes |
    /// | Enterprise | Unlimited | Unlimited | Yes | Yes |
    pub fn for_level(level: MembershipLevel) -> Self {
        match level {
            MembershipLevel::Basic => Self {
                level,
                max_active_listings: Some(3),
                featured_listings_per_month: Some(0),
                analytics_access: false,
                priority_support: false,
            },
            MembershipLevel::Premium => Self {
                level,
                max_active_listings: Some(15),
                featured_listings_per_month: Some(2),
                analytics_access: true,
                priority_support: false,
            },
            MembershipLevel::Vip => Self {
                level,
                max_active_listings: Some(50),
                featured_listings_per_month: Some(10),
                analytics_access: true,
                priority_support: true,
            },
            MembershipLevel::Enterprise => Self {
                level,
                max_active_listings: None, // Unlimited
                featured_listings_per_month: None,
                analytics_access: true,
                priority_support: true,
            },
        }
    }

    /// Check if the active listing limit has been reached.
    ///
    /// Returns false if unlimited or under limit.
    pub fn listing_limit_reached(&self, active_listings: u32) -> bool {
        self.max_active_listings
            .map(|max| active_listings >= max)
            .unwrap_or(false)
    }

    /// Check if this month's featured listing allowance is used up.
    pub fn featured_limit_reached(&self, featured_this_month: u32) -> bool {
        self.featured_listings_per_month
            .map(|max| featured_this_month >= max)
            .unwrap_or(false)
    }
}
