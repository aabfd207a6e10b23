use serde::Serialize;
use std::fmt;

use super::domain::{Item, Operator, OperatorType, Qualification};

pub const KEY_SEPARATOR: &str = " + ";

/// Items evaluated jointly. Item order only shapes the display key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Combination(Vec<Item>);

impl Combination {
    pub fn new(items: Vec<Item>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.0.contains(&item)
    }

    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|item| item.label())
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Every non-empty subset, items kept in selection order.
///
/// Subsets are emitted in bitmask order: `[a]`, `[b]`, `[a, b]`, `[c]`, ...
pub fn power_set(selection: &[Item]) -> Vec<Combination> {
    debug_assert!(selection.len() < usize::BITS as usize);
    let total = 1usize << selection.len();

    (1..total)
        .map(|mask| {
            let items = selection
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, item)| *item)
                .collect();
            Combination(items)
        })
        .collect()
}

/// All combinations of size one, followed by all unordered pairs.
pub fn singles_and_pairs(universe: &[Item]) -> Vec<Combination> {
    let mut combinations: Vec<Combination> = universe
        .iter()
        .map(|item| Combination(vec![*item]))
        .collect();

    for (index, first) in universe.iter().enumerate() {
        for second in &universe[index + 1..] {
            combinations.push(Combination(vec![*first, *second]));
        }
    }

    combinations
}

/// Qualitative tags then types that occur in the roster, in declaration order.
///
/// Positions and rarity aliases are never part of the recommendation search.
pub fn detector_universe(operators: &[Operator]) -> Vec<Item> {
    let tags = Qualification::ordered()
        .into_iter()
        .map(Item::Tag)
        .filter(|item| operators.iter().any(|operator| operator.has_trait(*item)));

    let types = OperatorType::ordered()
        .into_iter()
        .filter(|operator_type| {
            operators
                .iter()
                .any(|operator| operator.operator_type == Some(*operator_type))
        })
        .map(Item::Type);

    tags.chain(types).collect()
}
