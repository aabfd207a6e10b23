use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Role class. Declaration order is the canonical tie-break order for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatorType {
    Vanguard,
    Guard,
    Defender,
    Sniper,
    Caster,
    Medic,
    Supporter,
    Specialist,
}

impl OperatorType {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Vanguard,
            Self::Guard,
            Self::Defender,
            Self::Sniper,
            Self::Caster,
            Self::Medic,
            Self::Supporter,
            Self::Specialist,
        ]
    }

    /// Position in the canonical ordering; distinct for every type.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vanguard => "vanguard",
            Self::Guard => "guard",
            Self::Defender => "defender",
            Self::Sniper => "sniper",
            Self::Caster => "caster",
            Self::Medic => "medic",
            Self::Supporter => "supporter",
            Self::Specialist => "specialist",
        }
    }

    pub const fn native_label(self) -> &'static str {
        match self {
            Self::Vanguard => "先鋒",
            Self::Guard => "前衛",
            Self::Defender => "重装",
            Self::Sniper => "狙撃",
            Self::Caster => "術師",
            Self::Medic => "医療",
            Self::Supporter => "補助",
            Self::Specialist => "特殊",
        }
    }
}

/// Qualitative combat-trait tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualification {
    Starter,
    Dps,
    Survival,
    Defense,
    Healing,
    Support,
    Aoe,
    Slow,
    CrowdControl,
    Debuff,
    DpRecovery,
    Shift,
    Burst,
    Summon,
    FastRedeploy,
    Elemental,
}

impl Qualification {
    pub const fn ordered() -> [Self; 16] {
        [
            Self::Starter,
            Self::Dps,
            Self::Survival,
            Self::Defense,
            Self::Healing,
            Self::Support,
            Self::Aoe,
            Self::Slow,
            Self::CrowdControl,
            Self::Debuff,
            Self::DpRecovery,
            Self::Shift,
            Self::Burst,
            Self::Summon,
            Self::FastRedeploy,
            Self::Elemental,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Dps => "dps",
            Self::Survival => "survival",
            Self::Defense => "defense",
            Self::Healing => "healing",
            Self::Support => "support",
            Self::Aoe => "aoe",
            Self::Slow => "slow",
            Self::CrowdControl => "crowd-control",
            Self::Debuff => "debuff",
            Self::DpRecovery => "dp-recovery",
            Self::Shift => "shift",
            Self::Burst => "burst",
            Self::Summon => "summon",
            Self::FastRedeploy => "fast-redeploy",
            Self::Elemental => "elemental",
        }
    }

    pub const fn native_label(self) -> &'static str {
        match self {
            Self::Starter => "初期",
            Self::Dps => "火力",
            Self::Survival => "生存",
            Self::Defense => "防御",
            Self::Healing => "治療",
            Self::Support => "支援",
            Self::Aoe => "範囲攻撃",
            Self::Slow => "減速",
            Self::CrowdControl => "牽制",
            Self::Debuff => "弱化",
            Self::DpRecovery => "COST回復",
            Self::Shift => "強制移動",
            Self::Burst => "爆発力",
            Self::Summon => "召喚",
            Self::FastRedeploy => "高速再配置",
            Self::Elemental => "元素",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Melee,
    Ranged,
}

impl Position {
    pub const fn ordered() -> [Self; 2] {
        [Self::Melee, Self::Ranged]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
        }
    }

    pub const fn native_label(self) -> &'static str {
        match self {
            Self::Melee => "近距離",
            Self::Ranged => "遠距離",
        }
    }
}

/// Query-time tokens that stand for a rarity constraint rather than a stored trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RarityAlias {
    Robot,
    Elite,
    SeniorElite,
}

impl RarityAlias {
    pub const fn ordered() -> [Self; 3] {
        [Self::Robot, Self::Elite, Self::SeniorElite]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Robot => "Robot",
            Self::Elite => "Elite",
            Self::SeniorElite => "SeniorElite",
        }
    }

    pub const fn native_label(self) -> &'static str {
        match self {
            Self::Robot => "ロボット",
            Self::Elite => "エリート",
            Self::SeniorElite => "上級エリート",
        }
    }

    /// The exact rarity this alias stands for.
    pub const fn rarity(self) -> Rarity {
        match self {
            Self::Robot => Rarity::ONE,
            Self::Elite => Rarity::FIVE,
            Self::SeniorElite => Rarity::SIX,
        }
    }
}

/// One entry of the legal query vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Item {
    Type(OperatorType),
    Position(Position),
    Tag(Qualification),
    Alias(RarityAlias),
}

impl Item {
    /// Every legal item, grouped by family in declaration order.
    pub fn vocabulary() -> Vec<Item> {
        OperatorType::ordered()
            .into_iter()
            .map(Item::Type)
            .chain(Position::ordered().into_iter().map(Item::Position))
            .chain(Qualification::ordered().into_iter().map(Item::Tag))
            .chain(RarityAlias::ordered().into_iter().map(Item::Alias))
            .collect()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Item::Type(value) => value.label(),
            Item::Position(value) => value.label(),
            Item::Tag(value) => value.label(),
            Item::Alias(value) => value.label(),
        }
    }

    pub const fn native_label(self) -> &'static str {
        match self {
            Item::Type(value) => value.native_label(),
            Item::Position(value) => value.native_label(),
            Item::Tag(value) => value.native_label(),
            Item::Alias(value) => value.native_label(),
        }
    }

    /// Resolves either an English label (case and separator insensitive) or a native label.
    pub fn parse(raw: &str) -> Option<Item> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let trimmed = trimmed.strip_suffix("タイプ").unwrap_or(trimmed);

        let vocabulary = Item::vocabulary();
        if let Some(item) = vocabulary
            .iter()
            .find(|item| item.native_label() == trimmed)
        {
            return Some(*item);
        }

        let folded = fold_label(trimmed);
        vocabulary
            .into_iter()
            .find(|item| fold_label(item.label()) == folded)
            .or_else(|| legacy_english_alias(&folded))
    }
}

fn fold_label(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn legacy_english_alias(folded: &str) -> Option<Item> {
    match folded {
        "nuker" => Some(Item::Tag(Qualification::Burst)),
        "topoperator" => Some(Item::Alias(RarityAlias::SeniorElite)),
        "senioroperator" => Some(Item::Alias(RarityAlias::Elite)),
        _ => None,
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a recruitment tag, type, position or rarity alias")]
pub struct VocabularyError(pub String);

impl FromStr for Item {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Item::parse(s).ok_or_else(|| VocabularyError(s.to_string()))
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Star rating, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    pub const ONE: Rarity = Rarity(1);
    pub const FOUR: Rarity = Rarity(4);
    pub const FIVE: Rarity = Rarity(5);
    pub const SIX: Rarity = Rarity(6);

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rarity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=6).contains(&value) {
            Ok(Rarity(value))
        } else {
            Err(format!("rarity {value} is outside 1..=6"))
        }
    }
}

impl From<Rarity> for u8 {
    fn from(value: Rarity) -> Self {
        value.0
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★", self.0)
    }
}

/// Stored traits of an operator: qualitative tags, positions and the robot marker.
pub type TraitSet = BTreeSet<Item>;

/// Immutable roster entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: u32,
    pub name: String,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub operator_type: Option<OperatorType>,
    pub tags: TraitSet,
    #[serde(rename = "addDay", skip_serializing_if = "Option::is_none")]
    pub added_on: Option<NaiveDate>,
    pub wiki: String,
    pub img_path: String,
}

impl Operator {
    /// Robot-class operators carry the literal marker or sit at rarity 1.
    pub fn is_robot(&self) -> bool {
        self.rarity == Rarity::ONE || self.tags.contains(&Item::Alias(RarityAlias::Robot))
    }

    pub fn has_trait(&self, item: Item) -> bool {
        self.tags.contains(&item)
    }

    /// Ascending rarity, then canonical type order; untyped operators sort last.
    pub fn display_order(&self) -> (Rarity, u8) {
        let type_rank = self
            .operator_type
            .map(OperatorType::rank)
            .unwrap_or(u8::MAX);
        (self.rarity, type_rank)
    }
}

impl Serialize for OperatorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
