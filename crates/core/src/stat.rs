use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the numeric attributes an item card can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Hp,
    Mana,
    Attack,
    Magic,
    Defense,
    Resistance,
    Dexterity,
    Ward,
    Crit,
    Foresight,
}

impl StatKey {
    pub const ALL: [StatKey; 10] = [
        StatKey::Hp,
        StatKey::Mana,
        StatKey::Attack,
        StatKey::Magic,
        StatKey::Defense,
        StatKey::Resistance,
        StatKey::Dexterity,
        StatKey::Ward,
        StatKey::Crit,
        StatKey::Foresight,
    ];

    /// Lowercase key name, also the sort key for rendered stat lists.
    pub fn as_str(self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Mana => "mana",
            StatKey::Attack => "attack",
            StatKey::Magic => "magic",
            StatKey::Defense => "defense",
            StatKey::Resistance => "resistance",
            StatKey::Dexterity => "dexterity",
            StatKey::Ward => "ward",
            StatKey::Crit => "crit",
            StatKey::Foresight => "foresight",
        }
    }

    /// The label as printed on the in-game item card.
    pub fn label(self) -> &'static str {
        match self {
            StatKey::Hp => "HP",
            StatKey::Mana => "Mana",
            StatKey::Attack => "Attack",
            StatKey::Magic => "Magic",
            StatKey::Defense => "Defense",
            StatKey::Resistance => "Resistance",
            StatKey::Dexterity => "Dexterity",
            StatKey::Ward => "Ward",
            StatKey::Crit => "Crit",
            StatKey::Foresight => "Foresight",
        }
    }

    /// Key name with the first letter upper-cased ("hp" -> "Hp").
    pub fn display_name(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StatKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown stat key: '{s}'"))
    }
}

/// Stats detected on an item. A missing key means "not detected", not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap(BTreeMap<StatKey, u32>);

impl StatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: StatKey, value: u32) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: StatKey) -> Option<u32> {
        self.0.get(&key).copied()
    }

    pub fn contains(&self, key: StatKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present stats ordered by key name.
    pub fn sorted_by_name(&self) -> Vec<(StatKey, u32)> {
        let mut entries: Vec<(StatKey, u32)> = self.0.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(k, _)| k.as_str());
        entries
    }
}

impl FromIterator<(StatKey, u32)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (StatKey, u32)>>(iter: I) -> Self {
        StatMap(iter.into_iter().collect())
    }
}
