use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Reverse;

use super::combination::{power_set, Combination};
use super::domain::{Item, Operator, RarityAlias};
use super::predicate::satisfies_combination;
use super::selection::Selection;

/// Operators produced by one sub-combination of the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationGroup {
    pub combination: Combination,
    pub operators: Vec<Operator>,
}

impl CombinationGroup {
    pub fn key(&self) -> String {
        self.combination.key()
    }
}

/// Live filter output: non-empty groups in display order. Serializes as an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    groups: Vec<CombinationGroup>,
}

impl FilterResult {
    pub fn groups(&self) -> &[CombinationGroup] {
        &self.groups
    }

    pub fn keys(&self) -> Vec<String> {
        self.groups.iter().map(CombinationGroup::key).collect()
    }

    pub fn get(&self, key: &str) -> Option<&[Operator]> {
        self.groups
            .iter()
            .find(|group| group.key() == key)
            .map(|group| group.operators.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for FilterResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key(), &group.operators)?;
        }
        map.end()
    }
}

/// Classifies the roster against every non-empty subset of the selection.
///
/// Groups containing `SeniorElite` come first, then those containing `Elite`,
/// then larger combinations before smaller ones; remaining ties keep subset order.
pub fn filter_operators(roster: &[Operator], selection: &Selection) -> FilterResult {
    if roster.is_empty() || selection.is_empty() {
        return FilterResult::default();
    }

    let mut groups: Vec<CombinationGroup> = power_set(selection.items())
        .into_iter()
        .filter_map(|combination| {
            let mut operators: Vec<Operator> = roster
                .iter()
                .filter(|operator| satisfies_combination(operator, combination.items()))
                .cloned()
                .collect();
            if operators.is_empty() {
                return None;
            }
            operators.sort_by_key(Operator::display_order);
            Some(CombinationGroup {
                combination,
                operators,
            })
        })
        .collect();

    groups.sort_by_key(|group| {
        let combination = &group.combination;
        (
            !combination.contains(Item::Alias(RarityAlias::SeniorElite)),
            !combination.contains(Item::Alias(RarityAlias::Elite)),
            Reverse(combination.len()),
        )
    });

    FilterResult { groups }
}
