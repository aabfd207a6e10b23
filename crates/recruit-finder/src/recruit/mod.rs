//! Tag combination resolution: roster loading, the shared match predicate,
//! the live filter over a user selection and the guaranteed-tier detector.

pub mod combination;
pub mod domain;
mod engine;
pub mod filter;
pub mod predicate;
pub mod recommend;
pub mod roster;
pub mod selection;

pub use domain::{Item, Operator, OperatorType, Position, Qualification, Rarity, RarityAlias};
pub use engine::RecruitEngine;
pub use filter::{filter_operators, CombinationGroup, FilterResult};
pub use recommend::{detect_recommended_tags, Recommendation, Recommendations, Tier};
pub use roster::{Roster, RosterError, RosterIssue};
pub use selection::{Selection, SelectionError};
