use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Legendary,
    Ornate,
    Famed,
    Superior,
    Common,
    Unknown,
}

impl Rarity {
    /// Detectable tiers, highest first. A higher tier wins when several
    /// keywords appear in the same screenshot.
    pub const PRIORITY: [Rarity; 5] = [
        Rarity::Legendary,
        Rarity::Ornate,
        Rarity::Famed,
        Rarity::Superior,
        Rarity::Common,
    ];

    /// Lowercase keyword that marks this tier in item text.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Rarity::Legendary => Some("legendary"),
            Rarity::Ornate => Some("ornate"),
            Rarity::Famed => Some("famed"),
            Rarity::Superior => Some("superior"),
            Rarity::Common => Some("common"),
            Rarity::Unknown => None,
        }
    }

    pub fn stars(self) -> usize {
        match self {
            Rarity::Legendary => 5,
            Rarity::Ornate => 4,
            Rarity::Famed => 3,
            Rarity::Superior => 2,
            Rarity::Common => 1,
            Rarity::Unknown => 0,
        }
    }

    pub fn recommendation(self) -> Recommendation {
        match self {
            Rarity::Legendary | Rarity::Ornate => Recommendation::Keep,
            Rarity::Famed => Recommendation::KeepIfGoodStats,
            Rarity::Superior | Rarity::Common | Rarity::Unknown => Recommendation::SellOrDismantle,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Legendary => write!(f, "Legendary"),
            Rarity::Ornate => write!(f, "Ornate"),
            Rarity::Famed => write!(f, "Famed"),
            Rarity::Superior => write!(f, "Superior"),
            Rarity::Common => write!(f, "Common"),
            Rarity::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    OffHand,
    ArmorOrAccessory,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Weapon => write!(f, "Weapon"),
            ItemType::OffHand => write!(f, "Off-hand"),
            ItemType::ArmorOrAccessory => write!(f, "Armor/Accessory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossScaling {
    Yes,
    No,
    #[default]
    Unset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Keep,
    KeepIfGoodStats,
    SellOrDismantle,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Keep => write!(f, "Keep, it's valuable."),
            Recommendation::KeepIfGoodStats => write!(f, "Keep if it has good stats."),
            Recommendation::SellOrDismantle => write!(f, "Sell or dismantle."),
        }
    }
}

/// Categorical judgments derived from an item's text and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub rarity: Rarity,
    pub item_type: ItemType,
    /// Always false unless `item_type` is `Weapon`.
    pub two_handed: bool,
    pub celestial: bool,
    pub upgradable: bool,
    pub boss_scaling: BossScaling,
}
