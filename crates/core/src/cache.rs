//! In-memory cache for repeated text-date parsing.
//!
//! Web pages repeat the same date strings many times (archive sidebars,
//! comment timestamps, footer boilerplate), so the text parser memoizes its
//! results. The cache is a pure-function result store: entries are keyed by
//! the exact argument tuple and never invalidated, only evicted oldest-first
//! once the fixed capacity is reached. Disabling it changes performance,
//! never output.

use std::collections::{HashMap, VecDeque};
use std::sync::{LazyLock, RwLock};

use chrono::NaiveDate;

use crate::validate::DateBounds;

/// Fixed capacity of the text-parse cache.
const CACHE_CAPACITY: usize = 1024;

/// Exact argument tuple of a text-parse call.
///
/// The output format is applied after the cached value, so differing formats
/// cannot collide; differing bounds or search modes produce distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TextParseKey {
    pub fragment: String,
    pub extensive: bool,
    pub bounds: DateBounds,
}

struct CacheState {
    map: HashMap<TextParseKey, Option<NaiveDate>>,
    order: VecDeque<TextParseKey>,
}

/// Bounded cache for text-parse results.
pub(crate) struct TextParseCache {
    state: RwLock<CacheState>,
}

impl TextParseCache {
    fn new() -> Self {
        Self {
            state: RwLock::new(CacheState { map: HashMap::new(), order: VecDeque::new() }),
        }
    }

    /// Looks up a prior result. The outer `Option` distinguishes a cache
    /// miss from a cached "no date found".
    pub(crate) fn get(&self, key: &TextParseKey) -> Option<Option<NaiveDate>> {
        let state = self.state.read().ok()?;
        state.map.get(key).copied()
    }

    /// Stores a result, evicting the oldest entry at capacity.
    pub(crate) fn insert(&self, key: TextParseKey, value: Option<NaiveDate>) {
        let Ok(mut state) = self.state.write() else {
            return;
        };

        if state.map.contains_key(&key) {
            return;
        }

        if state.map.len() >= CACHE_CAPACITY {
            if let Some(oldest) = state.order.pop_front() {
                state.map.remove(&oldest);
            }
        }

        state.order.push_back(key.clone());
        state.map.insert(key, value);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.state.read().unwrap().map.len()
    }
}

static TEXT_PARSE_CACHE: LazyLock<TextParseCache> = LazyLock::new(TextParseCache::new);

/// The process-wide text-parse cache.
pub(crate) fn text_parse_cache() -> &'static TextParseCache {
    &TEXT_PARSE_CACHE
}
