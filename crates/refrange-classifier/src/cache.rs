//! Parsed-expression caching for classification.
//!
//! Band expressions come from a provider snapshot and repeat across every
//! measurement of the same metric. The cache memoizes the parse of each
//! distinct expression so that classification only evaluates.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use refrange::{PairedExpression, RangeExpression, RangeResult};

use crate::config::CacheConfig;
use crate::measurement::MeasuredValue;

/// How a band expression is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    /// Single-valued metric: gender branches and alternatives.
    Scalar,
    /// Two-part metric such as blood pressure.
    Paired,
}

/// A band expression parsed for one [`ExpressionKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBand {
    /// Parsed with [`refrange::parse`].
    Scalar(RangeExpression),
    /// Parsed with [`refrange::parse_paired`].
    Paired(PairedExpression),
}

impl ParsedBand {
    /// Parses an expression for the given kind.
    pub fn parse(kind: ExpressionKind, expression: &str) -> RangeResult<Self> {
        match kind {
            ExpressionKind::Scalar => refrange::parse(expression).map(ParsedBand::Scalar),
            ExpressionKind::Paired => refrange::parse_paired(expression).map(ParsedBand::Paired),
        }
    }

    /// Returns true if the band could judge a value of this shape.
    ///
    /// A paired band only judges pairs. A scalar band judges numbers through
    /// its numeric clauses and text through its qualitative ones.
    pub fn accepts(&self, value: &MeasuredValue) -> bool {
        match (self, value) {
            (ParsedBand::Scalar(expr), MeasuredValue::Scalar(_)) => {
                expr.clauses().iter().any(|clause| clause.is_numeric())
            }
            (ParsedBand::Scalar(expr), MeasuredValue::Text(_)) => {
                expr.clauses().iter().any(|clause| !clause.is_numeric())
            }
            (ParsedBand::Paired(_), MeasuredValue::Paired(..)) => true,
            _ => false,
        }
    }
}

type CacheKey = (ExpressionKind, String);

/// Thread-safe LRU cache of parsed band expressions.
///
/// Entries never go stale on their own: parsing is a pure function of the
/// expression text. Call [`clear`](Self::clear) when the provider snapshot is
/// replaced to release memory.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::{ExpressionCache, ExpressionKind};
///
/// let cache = ExpressionCache::with_capacity(128);
///
/// let first = cache.get_or_parse(ExpressionKind::Scalar, "18.5미만/25~29.9").unwrap();
/// let second = cache.get_or_parse(ExpressionKind::Scalar, "18.5미만/25~29.9").unwrap();
/// assert_eq!(first, second);
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct ExpressionCache {
    inner: Mutex<LruCache<CacheKey, Arc<ParsedBand>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExpressionCache {
    /// Creates a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_entries)
    }

    /// Creates a cache holding at most `max_entries` parsed expressions.
    pub fn with_capacity(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Gets a cached parse. On hit, the entry is promoted to most-recently-used.
    pub fn get(&self, kind: ExpressionKind, expression: &str) -> Option<Arc<ParsedBand>> {
        let key = (kind, normalize_cache_key(expression));
        let found = self.inner.lock().get(&key).cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Stores a parse. The least recently used entry is evicted when full.
    pub fn insert(&self, kind: ExpressionKind, expression: &str, parsed: Arc<ParsedBand>) {
        let key = (kind, normalize_cache_key(expression));
        self.inner.lock().put(key, parsed);
    }

    /// Returns the cached parse or parses and caches it.
    ///
    /// Parse errors are returned and not cached.
    pub fn get_or_parse(
        &self,
        kind: ExpressionKind,
        expression: &str,
    ) -> RangeResult<Arc<ParsedBand>> {
        if let Some(parsed) = self.get(kind, expression) {
            return Ok(parsed);
        }
        let parsed = Arc::new(ParsedBand::parse(kind, expression)?);
        self.insert(kind, expression, Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Returns the number of cached expressions.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries and resets hit counters.
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.len(),
            capacity: inner.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for ExpressionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("ExpressionCache")
            .field("entries", &stats.entries)
            .field("capacity", &stats.capacity)
            .finish()
    }
}

/// Statistics about the cache state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached expressions.
    pub entries: usize,
    /// Maximum number of cached expressions.
    pub capacity: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that required a parse.
    pub misses: u64,
}

impl CacheStats {
    /// Returns the hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Normalizes an expression string for consistent cache keys.
///
/// Runs of whitespace collapse to one space and the ends are trimmed, so
/// `"120미만  이며/80미만 "` and `"120미만 이며/80미만"` share an entry.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::normalize_cache_key;
///
/// assert_eq!(normalize_cache_key("  남 90미만   /  여 85미만 "), "남 90미만 / 여 85미만");
/// ```
pub fn normalize_cache_key(expression: &str) -> String {
    expression.split_whitespace().collect::<Vec<_>>().join(" ")
}
