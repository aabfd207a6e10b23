use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::combination::{detector_universe, singles_and_pairs, Combination};
use super::domain::{Operator, Rarity};
use super::predicate::satisfies_combination;

/// Minimum-rarity guarantee a combination provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Every possible result is 5★.
    Five,
    /// Every possible result is 4★ or better, and at least one is 4★.
    FourPlus,
}

impl Tier {
    pub const fn ordered() -> [Self; 2] {
        [Self::Five, Self::FourPlus]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Five => "tier-5",
            Self::FourPlus => "tier-4-plus",
        }
    }

    fn classify(operators: &[Operator]) -> Option<Self> {
        if operators.is_empty() || operators.iter().any(|op| op.rarity < Rarity::FOUR) {
            return None;
        }
        if operators.iter().all(|op| op.rarity == Rarity::FIVE) {
            Some(Self::Five)
        } else {
            Some(Self::FourPlus)
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier '{0}', expected '5' or '4-plus'")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5" | "five" | "tier-5" => Ok(Self::Five),
            "4-plus" | "4+" | "four-plus" | "tier-4-plus" => Ok(Self::FourPlus),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// A combination that guarantees its tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub combination: Combination,
    pub tier: Tier,
    pub operators: Vec<Operator>,
}

impl Recommendation {
    /// `"<tags> [tier-5]"` / `"<tags> [tier-4-plus]"`.
    pub fn key(&self) -> String {
        format!("{} [{}]", self.combination.key(), self.tier.label())
    }

    fn identity(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.operators.iter().map(|op| op.id).collect();
        ids.sort_unstable();
        ids
    }
}

/// Detector output: tier-5 entries, then tier-4-plus entries. Serializes as an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    entries: Vec<Recommendation>,
}

impl Recommendations {
    pub fn entries(&self) -> &[Recommendation] {
        &self.entries
    }

    pub fn tier(&self, tier: Tier) -> impl Iterator<Item = &Recommendation> {
        self.entries.iter().filter(move |entry| entry.tier == tier)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(Recommendation::key).collect()
    }

    pub fn get(&self, key: &str) -> Option<&[Operator]> {
        self.entries
            .iter()
            .find(|entry| entry.key() == key)
            .map(|entry| entry.operators.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy restricted to one tier.
    pub fn only(&self, tier: Tier) -> Self {
        Self {
            entries: self.tier(tier).cloned().collect(),
        }
    }
}

impl Serialize for Recommendations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key(), &entry.operators)?;
        }
        map.end()
    }
}

/// Searches every one- and two-item tag/type combination for a guaranteed 4★+ outcome.
///
/// Robot-class operators are removed from each match set before classification.
/// 6★ operators never match because `SeniorElite` is not part of the search universe.
pub fn detect_recommended_tags(roster: &[Operator]) -> Recommendations {
    if roster.is_empty() {
        return Recommendations::default();
    }

    let universe = detector_universe(roster);
    let combinations = singles_and_pairs(&universe);
    let searched = combinations.len();

    let mut candidates: Vec<Recommendation> = combinations
        .into_iter()
        .filter_map(|combination| {
            let mut operators: Vec<Operator> = roster
                .iter()
                .filter(|op| satisfies_combination(op, combination.items()))
                .filter(|op| !op.is_robot())
                .cloned()
                .collect();
            debug_assert!(operators.iter().all(|op| op.rarity != Rarity::SIX));

            let tier = Tier::classify(&operators)?;
            operators.sort_by_key(Operator::display_order);
            Some(Recommendation {
                combination,
                tier,
                operators,
            })
        })
        .collect();

    candidates.sort_by_key(|entry| (entry.tier, entry.combination.len(), entry.operators.len()));

    let mut seen: HashSet<(Tier, Vec<u32>)> = HashSet::new();
    let entries: Vec<Recommendation> = candidates
        .into_iter()
        .filter(|entry| seen.insert((entry.tier, entry.identity())))
        .collect();

    debug!(
        universe = universe.len(),
        searched,
        tier_5 = entries.iter().filter(|e| e.tier == Tier::Five).count(),
        tier_4_plus = entries.iter().filter(|e| e.tier == Tier::FourPlus).count(),
        "recommendation search finished"
    );

    Recommendations { entries }
}
