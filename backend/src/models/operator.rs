use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::banner::{BannerCategory, BannerInfo};
use super::time::Timestamp;

/// Server region. CN is the reference timeline every other region trails.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Region {
    #[default]
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "CN")]
    Cn,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::En, Region::Cn];

    pub fn code(&self) -> &'static str {
        match self {
            Region::En => "EN",
            Region::Cn => "CN",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" | "GLOBAL" => Ok(Region::En),
            "CN" => Ok(Region::Cn),
            other => Err(format!("Unknown region '{}'. Valid options: EN, CN", other)),
        }
    }
}

/// Release category used by the periodic release breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseCategory {
    Event,
    Limited,
    Standard,
}

impl ReleaseCategory {
    pub const ALL: [ReleaseCategory; 3] = [
        ReleaseCategory::Event,
        ReleaseCategory::Limited,
        ReleaseCategory::Standard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseCategory::Event => "event",
            ReleaseCategory::Limited => "limited",
            ReleaseCategory::Standard => "standard",
        }
    }
}

/// Birthday as `[month, day]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday(pub u32, pub u32);

impl Birthday {
    pub fn month(&self) -> u32 {
        self.0
    }

    pub fn day(&self) -> u32 {
        self.1
    }
}

/// Region-specific timeline of an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub released: Timestamp,
    /// Banners the operator was on rate-up, oldest first.
    #[serde(default)]
    pub featured: Vec<BannerInfo>,
    /// Banners the operator was in the certificate shop, oldest first.
    #[serde(default)]
    pub shop: Vec<BannerInfo>,
}

impl ReleaseInfo {
    pub fn new(released: Timestamp) -> Self {
        Self {
            released,
            featured: Vec::new(),
            shop: Vec::new(),
        }
    }

    pub fn appearances(&self, category: BannerCategory) -> &[BannerInfo] {
        match category {
            BannerCategory::Featured => &self.featured,
            BannerCategory::Shop => &self.shop,
        }
    }

    /// First certificate-shop banner, if the operator has debuted there.
    pub fn shop_debut(&self) -> Option<&BannerInfo> {
        self.shop.first()
    }
}

/// One in-game operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    /// Dataset key. Filled from the operator map key when absent.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub class: String,
    pub rarity: u8,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub faction: String,
    #[serde(default)]
    pub subfaction: String,
    #[serde(default)]
    pub birthday: Option<Birthday>,
    #[serde(default)]
    pub limited: bool,
    #[serde(default)]
    pub headhunting: bool,
    #[serde(default)]
    pub recruitment: bool,
    #[serde(default)]
    pub event: bool,
    #[serde(rename = "EN", default, skip_serializing_if = "Option::is_none")]
    pub en: Option<ReleaseInfo>,
    #[serde(rename = "CN", default, skip_serializing_if = "Option::is_none")]
    pub cn: Option<ReleaseInfo>,
}

impl Operator {
    /// Timeline for `region`, `None` when not released there.
    pub fn release_info(&self, region: Region) -> Option<&ReleaseInfo> {
        match region {
            Region::En => self.en.as_ref(),
            Region::Cn => self.cn.as_ref(),
        }
    }

    pub fn released(&self, region: Region) -> Option<Timestamp> {
        self.release_info(region).map(|info| info.released)
    }

    /// Appearances in `category` for `region`; empty when not released there.
    pub fn appearances(&self, region: Region, category: BannerCategory) -> &[BannerInfo] {
        self.release_info(region)
            .map(|info| info.appearances(category))
            .unwrap_or(&[])
    }

    /// Mutually exclusive release category: event first, then limited,
    /// then headhunting-eligible standard. `None` for everything else.
    pub fn release_category(&self) -> Option<ReleaseCategory> {
        if self.event {
            Some(ReleaseCategory::Event)
        } else if self.limited {
            Some(ReleaseCategory::Limited)
        } else if self.headhunting {
            Some(ReleaseCategory::Standard)
        } else {
            None
        }
    }

    /// True when released in at least one region.
    pub fn is_released_anywhere(&self) -> bool {
        self.en.is_some() || self.cn.is_some()
    }
}
