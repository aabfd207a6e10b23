use serde::Serialize;

use super::domain::{Item, VocabularyError};
use crate::config::SELECTION_CEILING;

/// Validated user selection: legal, de-duplicated, bounded, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Selection(Vec<Item>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error(transparent)]
    UnknownItem(#[from] VocabularyError),
    #[error("'{0}' was selected more than once")]
    Duplicate(String),
    #[error("at most {max} items can be selected, got {actual}")]
    TooManyItems { max: usize, actual: usize },
}

impl Selection {
    /// Parses raw labels; `max_items` is clamped to the engine ceiling.
    pub fn parse<S: AsRef<str>>(raw: &[S], max_items: usize) -> Result<Self, SelectionError> {
        let max = max_items.min(SELECTION_CEILING);
        let mut items = Vec::with_capacity(raw.len());

        for entry in raw {
            let entry = entry.as_ref();
            if entry.trim().is_empty() {
                continue;
            }
            let item: Item = entry.parse()?;
            if items.contains(&item) {
                return Err(SelectionError::Duplicate(item.label().to_string()));
            }
            items.push(item);
        }

        if items.len() > max {
            return Err(SelectionError::TooManyItems {
                max,
                actual: items.len(),
            });
        }

        Ok(Self(items))
    }

    /// Builds a selection from items already known to be legal.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, SelectionError> {
        let mut selection = Vec::new();
        for item in items {
            if selection.contains(&item) {
                return Err(SelectionError::Duplicate(item.label().to_string()));
            }
            selection.push(item);
        }
        if selection.len() > SELECTION_CEILING {
            return Err(SelectionError::TooManyItems {
                max: SELECTION_CEILING,
                actual: selection.len(),
            });
        }
        Ok(Self(selection))
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recruit::domain::{OperatorType, Qualification, RarityAlias};

    #[test]
    fn parses_mixed_vocabulary_in_order() {
        let selection =
            Selection::parse(&["caster", "爆発力", "SeniorElite"], 6).expect("valid selection");
        assert_eq!(
            selection.items(),
            &[
                Item::Type(OperatorType::Caster),
                Item::Tag(Qualification::Burst),
                Item::Alias(RarityAlias::SeniorElite),
            ]
        );
    }

    #[test]
    fn blank_entries_are_ignored() {
        let selection = Selection::parse(&["", "  "], 6).expect("blank selection");
        assert!(selection.is_empty());
    }

    #[test]
    fn rejects_unknown_entries() {
        let err = Selection::parse(&["caster", "tank"], 6).expect_err("unknown entry");
        assert_eq!(
            err,
            SelectionError::UnknownItem(VocabularyError("tank".to_string()))
        );
    }

    #[test]
    fn rejects_duplicates_across_label_forms() {
        let err = Selection::parse(&["caster", "術師"], 6).expect_err("duplicate");
        assert_eq!(err, SelectionError::Duplicate("caster".to_string()));
    }

    #[test]
    fn enforces_the_configured_limit_and_ceiling() {
        let err = Selection::parse(&["caster", "burst", "Elite"], 2).expect_err("over limit");
        assert_eq!(err, SelectionError::TooManyItems { max: 2, actual: 3 });

        let seven = ["starter", "dps", "survival", "defense", "healing", "support", "aoe"];
        let err = Selection::parse(&seven, 10).expect_err("over ceiling");
        assert_eq!(err, SelectionError::TooManyItems { max: 6, actual: 7 });
    }
}
