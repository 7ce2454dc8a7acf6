//! # Observable view state
//!
//! Controllers keep their state in an [`Observable`] and every transition goes
//! through [`Observable::update`], which notifies subscribers with the new
//! state once the borrow is released. The UI subscribes and copies each
//! snapshot into a reactive signal; tests simply read [`Observable::get`].
//!
//! A [`Scope`] ties state to the lifetime of a view. Once
//! [`Scope::close`] is called, updates are dropped, so a response that
//! arrives after the view is gone cannot mutate anything.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener<S> = Rc<dyn Fn(&S)>;

/// Handle returned by [`Observable::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Lifetime of a view. Cloning shares the same open/closed state.
#[derive(Clone, Debug)]
pub struct Scope {
    open: Rc<Cell<bool>>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            open: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn close(&self) {
        self.open.set(false);
    }
}

/// Shared, single-threaded state with change notification.
pub struct Observable<S> {
    state: Rc<RefCell<S>>,
    listeners: Rc<RefCell<Vec<(SubscriptionId, Listener<S>)>>>,
    next_id: Rc<Cell<u64>>,
    scope: Scope,
}

impl<S> Clone for Observable<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            listeners: self.listeners.clone(),
            next_id: self.next_id.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<S: Clone> Observable<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
            scope: Scope::new(),
        }
    }

    /// A copy of the current state.
    pub fn get(&self) -> S {
        self.state.borrow().clone()
    }

    /// Read the state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutate the state and notify subscribers.
    ///
    /// Returns `None` without touching the state when the scope is closed.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        if !self.scope.is_open() {
            tracing::debug!("view closed, dropping state update");
            return None;
        }
        let (result, snapshot) = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        let listeners: Vec<Listener<S>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
        Some(result)
    }

    pub fn subscribe(&self, listener: impl Fn(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sub, _)| *sub != id);
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Close the scope and drop every subscriber.
    pub fn close(&self) {
        self.scope.close();
        self.listeners.borrow_mut().clear();
    }
}
