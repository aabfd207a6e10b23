use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info};

use super::filter::{filter_operators, FilterResult};
use super::recommend::{detect_recommended_tags, Recommendations};
use super::roster::Roster;
use super::selection::{Selection, SelectionError};
use crate::config::EngineConfig;

/// Shares one immutable roster between the live filter and the detector, memoizing both.
///
/// A new roster means a new engine; nothing here is invalidated in place.
pub struct RecruitEngine {
    roster: Arc<Roster>,
    max_selection: usize,
    filter_cache: Mutex<LruCache<Selection, Arc<FilterResult>>>,
    recommendations: OnceLock<(Arc<Recommendations>, DateTime<Utc>)>,
}

impl RecruitEngine {
    pub fn new(roster: Roster, config: &EngineConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.filter_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            roster: Arc::new(roster),
            max_selection: config.max_selection,
            filter_cache: Mutex::new(LruCache::new(capacity)),
            recommendations: OnceLock::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn max_selection(&self) -> usize {
        self.max_selection
    }

    /// Validates raw labels against the vocabulary and the configured selection limit.
    pub fn parse_selection<S: AsRef<str>>(&self, raw: &[S]) -> Result<Selection, SelectionError> {
        Selection::parse(raw, self.max_selection)
    }

    pub fn filter(&self, selection: &Selection) -> Arc<FilterResult> {
        if let Some(hit) = self
            .filter_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selection)
        {
            debug!(items = selection.len(), "live filter cache hit");
            return Arc::clone(hit);
        }

        let result = Arc::new(filter_operators(self.roster.operators(), selection));
        self.filter_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(selection.clone(), Arc::clone(&result));
        result
    }

    pub fn filter_labels<S: AsRef<str>>(
        &self,
        raw: &[S],
    ) -> Result<Arc<FilterResult>, SelectionError> {
        let selection = self.parse_selection(raw)?;
        Ok(self.filter(&selection))
    }

    pub fn recommendations(&self) -> Arc<Recommendations> {
        Arc::clone(&self.recommendation_snapshot().0)
    }

    /// When the cached detector output was computed; first call computes it.
    pub fn recommendations_generated_at(&self) -> DateTime<Utc> {
        self.recommendation_snapshot().1
    }

    fn recommendation_snapshot(&self) -> &(Arc<Recommendations>, DateTime<Utc>) {
        self.recommendations.get_or_init(|| {
            let result = detect_recommended_tags(self.roster.operators());
            info!(
                operators = self.roster.len(),
                combinations = result.len(),
                "recommended tag combinations computed"
            );
            (Arc::new(result), Utc::now())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(capacity: usize) -> RecruitEngine {
        let roster = Roster::from_json_str(
            r#"[
                {"id": 1, "name": "X", "rarity": 5, "type": "術師", "tags": ["爆発力"]},
                {"id": 2, "name": "Y", "rarity": 3, "type": "術師", "tags": []},
                {"id": 3, "name": "Z", "rarity": 5, "type": "医療", "tags": ["爆発力"]}
            ]"#,
        )
        .expect("roster parses");
        let config = EngineConfig {
            filter_cache_capacity: capacity,
            ..EngineConfig::default()
        };
        RecruitEngine::new(roster, &config)
    }

    #[test]
    fn repeated_filter_calls_share_the_cached_result() {
        let engine = engine(4);
        let first = engine.filter_labels(&["caster", "burst"]).expect("valid");
        let second = engine.filter_labels(&["術師", "爆発力"]).expect("valid");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.keys(), vec!["caster + burst", "caster", "burst"]);
    }

    #[test]
    fn selection_order_is_part_of_the_cache_key() {
        let engine = engine(4);
        let forward = engine.filter_labels(&["caster", "burst"]).expect("valid");
        let reverse = engine.filter_labels(&["burst", "caster"]).expect("valid");

        assert!(!Arc::ptr_eq(&forward, &reverse));
        assert_eq!(reverse.keys(), vec!["burst + caster", "burst", "caster"]);
    }

    #[test]
    fn evicted_results_are_recomputed_identically() {
        let engine = engine(1);
        let first = engine.filter_labels(&["caster"]).expect("valid");
        engine.filter_labels(&["burst"]).expect("valid");
        let again = engine.filter_labels(&["caster"]).expect("valid");

        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(*first, *again);
    }

    #[test]
    fn recommendations_are_computed_once() {
        let engine = engine(4);
        let first = engine.recommendations();
        let second = engine.recommendations();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            first.keys(),
            vec![
                "medic [tier-5]",
                "burst [tier-5]",
                "burst + caster [tier-5]"
            ]
        );
    }

    #[test]
    fn generation_time_is_fixed_once_computed() {
        let engine = engine(4);
        let before = Utc::now();
        let first = engine.recommendations_generated_at();
        engine.recommendations();
        let second = engine.recommendations_generated_at();

        assert!(first >= before);
        assert_eq!(first, second);
    }

    #[test]
    fn selection_limit_comes_from_config() {
        let roster = Roster::default();
        let config = EngineConfig {
            max_selection: 1,
            ..EngineConfig::default()
        };
        let engine = RecruitEngine::new(roster, &config);

        let err = engine
            .filter_labels(&["caster", "burst"])
            .expect_err("limit enforced");
        assert_eq!(err, SelectionError::TooManyItems { max: 1, actual: 2 });
    }
}
