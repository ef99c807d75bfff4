//! Content-addressed interning repositories.
//!
//! A [`Repository<T>`] deduplicates values by the source string that produced
//! them: asking twice for the same text yields the same shared handle. The
//! crate keeps one process-wide repository per interned type (code points,
//! characters, candidates) so that analyzing a candidate -- decomposing,
//! case-folding, classifying -- happens once per distinct string, no matter
//! how many queries run against it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;

/// Types that can be interned in a [`Repository`], constructed from the
/// source text that keys them.
///
/// Construction may fail (e.g. a [`CodePoint`](crate::unicode::CodePoint)
/// rejects text that is not a single Unicode scalar); the repository
/// propagates such failures without caching anything.
pub trait Interned: Sized + Send + Sync {
    /// Build a value from its source text.
    fn from_text(text: &str) -> Result<Self>;
}

/// A thread-safe, content-addressed interner.
///
/// Values are stored behind [`Arc`] so the handles returned by
/// [`get_or_create`](Repository::get_or_create) remain valid even if the
/// repository is [cleared](Repository::clear) afterwards: clearing drops the
/// repository's own references, not the values outstanding callers hold.
///
/// # Examples
///
/// ```
/// use fuzzident::{Candidate, Repository};
///
/// let repository = Repository::<Candidate>::new();
/// let handles = repository.get_or_create(["foo", "bar", "foo"]).unwrap();
/// assert_eq!(handles.len(), 3);
/// // Identical inputs intern to the same shared value.
/// assert!(std::sync::Arc::ptr_eq(&handles[0], &handles[2]));
/// ```
pub struct Repository<T> {
    elements: Mutex<HashMap<String, Arc<T>>>,
}

impl<T> Repository<T> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            elements: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct values currently interned.
    pub fn len(&self) -> usize {
        self.elements.lock().len()
    }

    /// Whether the repository holds no values.
    pub fn is_empty(&self) -> bool {
        self.elements.lock().is_empty()
    }

    /// Drop every interned value.
    ///
    /// Outstanding handles stay valid (they share ownership), but subsequent
    /// lookups will re-construct values from scratch. Intended for tests and
    /// benchmarks that need a cold cache.
    pub fn clear(&self) {
        self.elements.lock().clear();
    }

    /// Look up `text`, constructing the value with `make` on a miss.
    ///
    /// This is the infallible sibling of [`get_or_create`] used internally
    /// when the constructor cannot fail. Construction happens under the
    /// repository lock; it is cheap enough that avoiding the double lookup
    /// wins over releasing the lock around it.
    ///
    /// [`get_or_create`]: Repository::get_or_create
    pub fn get_or_insert_with(&self, text: &str, make: impl FnOnce() -> T) -> Arc<T> {
        let mut elements = self.elements.lock();
        if let Some(existing) = elements.get(text) {
            return Arc::clone(existing);
        }
        let created = Arc::new(make());
        elements.insert(text.to_owned(), Arc::clone(&created));
        created
    }
}

impl<T: Interned> Repository<T> {
    /// Intern one value.
    ///
    /// Returns the existing handle when `text` has been seen before;
    /// otherwise constructs, stores, and returns a new one.
    pub fn get(&self, text: &str) -> Result<Arc<T>> {
        let mut elements = self.elements.lock();
        if let Some(existing) = elements.get(text) {
            return Ok(Arc::clone(existing));
        }
        let created = Arc::new(T::from_text(text)?);
        elements.insert(text.to_owned(), Arc::clone(&created));
        Ok(created)
    }

    /// Intern a batch of values, returning one handle per input in order.
    ///
    /// Identical inputs yield identical (pointer-equal) handles. The batch is
    /// interned element by element, so concurrent callers interleave at
    /// element granularity rather than blocking for whole batches.
    pub fn get_or_create<I, S>(&self, texts: I) -> Result<Vec<Arc<T>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().map(|text| self.get(text.as_ref())).collect()
    }
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("len", &self.len())
            .finish()
    }
}
