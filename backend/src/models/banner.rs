use serde::{Deserialize, Serialize};

use super::time::{days_between, Timestamp};

/// Which kind of banner appearance a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerCategory {
    /// Rate-up ("featured") appearance on a headhunting banner.
    Featured,
    /// Appearance in the certificate shop attached to a banner.
    Shop,
}

impl BannerCategory {
    pub const ALL: [BannerCategory; 2] = [BannerCategory::Featured, BannerCategory::Shop];

    pub fn as_str(&self) -> &'static str {
        match self {
            BannerCategory::Featured => "featured",
            BannerCategory::Shop => "shop",
        }
    }
}

impl std::fmt::Display for BannerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One limited-time headhunting banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerInfo {
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub title: String,
    /// Operator ids on rate-up.
    #[serde(default)]
    pub featured: Vec<String>,
    /// Operator ids purchasable in the certificate shop.
    #[serde(default)]
    pub shop: Vec<String>,
    #[serde(rename = "isLimited", default)]
    pub is_limited: bool,
    /// 6-star operators making their shop debut on this banner.
    #[serde(rename = "shopDebut6Star", default)]
    pub shop_debut_6star: Vec<String>,
    /// 5-star operators making their shop debut on this banner.
    #[serde(rename = "shopDebut5Star", default)]
    pub shop_debut_5star: Vec<String>,
    #[serde(rename = "isEvent", default)]
    pub is_event: bool,
    #[serde(rename = "isRotating", default)]
    pub is_rotating: bool,
}

impl BannerInfo {
    /// Whole days the banner runs, floored.
    pub fn duration_days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// True when a 6-star operator debuts in the shop on this banner.
    pub fn is_shop_debut(&self) -> bool {
        !self.shop_debut_6star.is_empty()
    }

    /// Strictly between start and end.
    pub fn is_active_at(&self, at: Timestamp) -> bool {
        self.start < at && at < self.end
    }
}
