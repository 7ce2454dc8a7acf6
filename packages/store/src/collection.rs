//! # Entity collections and the refresh flag
//!
//! A [`Collection`] is the client-side copy of one server collection (the
//! patient list, or the notes of one patient). It is either
//! [`Freshness::Fresh`] or [`Freshness::Stale`]:
//!
//! - a successful mutation calls [`Collection::mark_stale`];
//! - the owning controller then calls [`Collection::take_refresh`], which
//!   consumes the flag, and re-fetches the whole collection;
//! - [`Collection::replace`] swaps in the fetched items wholesale.
//!
//! Nothing here merges or diffs: a refresh discards the previous items.

/// Whether a re-fetch is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// One-shot "must re-fetch" signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshFlag {
    raised: bool,
}

impl RefreshFlag {
    pub fn raise(&mut self) {
        self.raised = true;
    }

    /// Consume the flag. Returns whether it was raised.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.raised)
    }

    pub fn is_raised(&self) -> bool {
        self.raised
    }
}

/// In-memory copy of a server collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
    loading: bool,
    refresh: RefreshFlag,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    /// An empty collection waiting for its first fetch.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            refresh: RefreshFlag::default(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn freshness(&self) -> Freshness {
        if self.refresh.is_raised() {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }

    /// Record a successful mutation against this collection.
    pub fn mark_stale(&mut self) {
        self.refresh.raise();
    }

    /// Consume the stale flag, entering a fetch cycle if it was set.
    pub fn take_refresh(&mut self) -> bool {
        let stale = self.refresh.take();
        if stale {
            self.loading = true;
        }
        stale
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the whole collection with freshly fetched items.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
    }

    /// End a fetch cycle without touching the items.
    pub fn finish_load(&mut self) {
        self.loading = false;
    }

    /// Drop every item matching `pred`. Returns how many were removed.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        before - self.items.len()
    }

    /// Apply `f` to every item matching `pred`.
    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, mut f: impl FnMut(&mut T)) {
        for item in self.items.iter_mut().filter(|item| pred(item)) {
            f(item);
        }
    }
}
