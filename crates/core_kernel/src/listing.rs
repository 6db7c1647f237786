//! Lazy, restartable record sequences
//!
//! A `Listing` owns a snapshot of records taken when the listing was
//! requested, already in presentation order, and a predicate. The predicate
//! is evaluated while iterating, and every call to [`Listing::iter`] starts
//! over from the beginning.

use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

pub struct Listing<T> {
    items: Arc<[T]>,
    predicate: Predicate<T>,
}

impl<T> Listing<T> {
    /// A listing yielding every item
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
            predicate: Arc::new(|_| true),
        }
    }

    /// A listing yielding only items that satisfy `predicate`
    pub fn filtered<F>(items: Vec<T>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            items: items.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Iterates from the start of the sequence
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(move |item| (self.predicate)(*item))
    }

    /// Number of items the sequence yields
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<T: Clone> Listing<T> {
    /// Collects the yielded items
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for Listing<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Listing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
