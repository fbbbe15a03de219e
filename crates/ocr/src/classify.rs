use orna_core::{
    BossScaling, Classification, FoldedText, ItemType, Rarity, RecognizedText, StatKey, StatMap,
};

const OFF_HAND_MARKERS: &[&str] = &["off-hand", "shield"];
const TWO_HANDED_MARKERS: &[&str] = &["two-handed", "2h"];

/// Derive rarity, type and flags for an item. Each field is an independent
/// predicate over the same case-folded text.
pub fn classify(text: &RecognizedText, stats: &StatMap) -> Classification {
    let folded = text.folded();
    let item_type = item_type(&folded, stats);
    let classification = Classification {
        rarity: rarity(&folded),
        item_type,
        two_handed: item_type == ItemType::Weapon && is_two_handed(&folded),
        celestial: is_celestial(&folded),
        upgradable: is_upgradable(&folded),
        boss_scaling: boss_scaling(&folded),
    };
    tracing::debug!(?classification, "classified item");
    classification
}

/// Highest tier whose keyword appears anywhere in the text.
pub fn rarity(text: &FoldedText) -> Rarity {
    Rarity::PRIORITY
        .into_iter()
        .find(|r| r.keyword().is_some_and(|k| text.contains(k)))
        .unwrap_or(Rarity::Unknown)
}

/// Weapons are recognised by their stats; item text alone is too noisy.
pub fn is_weapon(stats: &StatMap) -> bool {
    stats.contains(StatKey::Attack) || stats.contains(StatKey::Magic)
}

pub fn item_type(text: &FoldedText, stats: &StatMap) -> ItemType {
    if is_weapon(stats) {
        ItemType::Weapon
    } else if text.contains_any(OFF_HAND_MARKERS) {
        ItemType::OffHand
    } else {
        ItemType::ArmorOrAccessory
    }
}

pub fn is_two_handed(text: &FoldedText) -> bool {
    text.contains_any(TWO_HANDED_MARKERS)
}

pub fn is_celestial(text: &FoldedText) -> bool {
    text.contains("celestial")
}

/// Most equipment can be upgraded; only an explicit notice says otherwise.
pub fn is_upgradable(text: &FoldedText) -> bool {
    !text.contains("cannot be upgraded")
}

/// "no boss" outranks "boss" wherever either phrase appears.
pub fn boss_scaling(text: &FoldedText) -> BossScaling {
    if text.contains("no boss") {
        BossScaling::No
    } else if text.contains("boss") {
        BossScaling::Yes
    } else {
        BossScaling::Unset
    }
}
