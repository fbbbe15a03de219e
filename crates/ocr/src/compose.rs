use std::fmt::Write;

use orna_core::{Assessment, BossScaling, Classification, ItemType, StatMap};

const STAR: char = '⭐';

/// Render the report and bundle it with its inputs.
pub fn compose(stats: StatMap, classification: Classification) -> Assessment {
    let report = render_report(&stats, &classification);
    Assessment::new(classification, stats, report)
}

/// Report sections, always in this order: header, rarity, type, flags,
/// stats, recommendation. Lines for unset flags are omitted.
pub fn render_report(stats: &StatMap, c: &Classification) -> String {
    let mut out = String::from("Item Assessment:\n\n");

    let stars: String = std::iter::repeat(STAR).take(c.rarity.stars()).collect();
    if stars.is_empty() {
        line(&mut out, format_args!("Rarity: {}", c.rarity));
    } else {
        line(&mut out, format_args!("Rarity: {} {stars}", c.rarity));
    }

    line(&mut out, format_args!("Type: {}", c.item_type));
    if c.item_type == ItemType::Weapon && c.two_handed {
        line(&mut out, format_args!("Two-handed: Yes"));
    }
    if c.celestial {
        line(&mut out, format_args!("Celestial: Yes"));
    }
    match c.boss_scaling {
        BossScaling::Yes => line(&mut out, format_args!("Boss Scaling: Yes")),
        BossScaling::No => line(&mut out, format_args!("Boss Scaling: No")),
        BossScaling::Unset => {}
    }

    out.push_str("\nStats:\n");
    for (key, value) in stats.sorted_by_name() {
        line(&mut out, format_args!("{}: {value}", key.display_name()));
    }

    let _ = write!(out, "\nRecommendation: {}", c.rarity.recommendation());
    out
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "- {args}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use orna_core::{Rarity, StatKey};

    fn classification(rarity: Rarity, item_type: ItemType) -> Classification {
        Classification {
            rarity,
            item_type,
            two_handed: false,
            celestial: false,
            upgradable: true,
            boss_scaling: BossScaling::Unset,
        }
    }

    #[test]
    fn full_weapon_report() {
        let stats: StatMap = [(StatKey::Magic, 12), (StatKey::Attack, 85)].into_iter().collect();
        let c = Classification {
            two_handed: true,
            boss_scaling: BossScaling::No,
            ..classification(Rarity::Ornate, ItemType::Weapon)
        };
        let assessment = compose(stats, c);
        assert_eq!(
            assessment.report(),
            "Item Assessment:\n\n\
             - Rarity: Ornate ⭐⭐⭐⭐\n\
             - Type: Weapon\n\
             - Two-handed: Yes\n\
             - Boss Scaling: No\n\
             \nStats:\n\
             - Attack: 85\n\
             - Magic: 12\n\
             \nRecommendation: Keep, it's valuable."
        );
    }

    #[test]
    fn empty_stats_render_empty_section() {
        let report = render_report(&StatMap::new(), &classification(Rarity::Unknown, ItemType::ArmorOrAccessory));
        assert_eq!(
            report,
            "Item Assessment:\n\n\
             - Rarity: Unknown\n\
             - Type: Armor/Accessory\n\
             \nStats:\n\
             \nRecommendation: Sell or dismantle."
        );
    }

    #[test]
    fn stats_listed_in_key_name_order() {
        let stats: StatMap =
            [(StatKey::Ward, 1), (StatKey::Hp, 2), (StatKey::Defense, 3), (StatKey::Crit, 4)]
                .into_iter()
                .collect();
        let report = render_report(&stats, &classification(Rarity::Common, ItemType::ArmorOrAccessory));
        let crit = report.find("- Crit: 4").unwrap();
        let defense = report.find("- Defense: 3").unwrap();
        let hp = report.find("- Hp: 2").unwrap();
        let ward = report.find("- Ward: 1").unwrap();
        assert!(crit < defense && defense < hp && hp < ward);
    }

    #[test]
    fn optional_lines() {
        let c = Classification {
            celestial: true,
            upgradable: false,
            boss_scaling: BossScaling::Yes,
            two_handed: true,
            ..classification(Rarity::Famed, ItemType::OffHand)
        };
        let report = render_report(&StatMap::new(), &c);
        assert!(report.contains("- Celestial: Yes\n"));
        assert!(report.contains("- Boss Scaling: Yes\n"));
        assert!(!report.contains("Upgradable"));
        assert!(!report.contains("Two-handed"));
        assert!(report.ends_with("Recommendation: Keep if it has good stats."));
    }

    #[test]
    fn non_upgradable_item_renders_only_standard_sections() {
        let c = Classification {
            upgradable: false,
            ..classification(Rarity::Common, ItemType::ArmorOrAccessory)
        };
        let assessment = compose(StatMap::new(), c);
        assert!(!assessment.classification().upgradable);
        assert_eq!(
            assessment.report(),
            "Item Assessment:\n\n\
             - Rarity: Common ⭐\n\
             - Type: Armor/Accessory\n\
             \nStats:\n\
             \nRecommendation: Sell or dismantle."
        );
    }

    #[test]
    fn compose_is_deterministic() {
        let stats: StatMap = [(StatKey::Hp, 120), (StatKey::Mana, 30)].into_iter().collect();
        let c = classification(Rarity::Legendary, ItemType::ArmorOrAccessory);
        let a = compose(stats.clone(), c);
        let b = compose(stats, c);
        assert_eq!(a.report().as_bytes(), b.report().as_bytes());
        assert_eq!(a, b);
    }
}
