//! Health pool with synchronous change / zero notifications.

use std::fmt;

/// State passed to subscribers after a modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChange {
    pub previous: i32,
    pub value: i32,
    pub max: i32,
}

/// What a call to [`HealthPool::modify`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthOutcome {
    Changed,
    /// This call was the first to bring the value to zero or below.
    /// The owner must be destroyed.
    ReachedZero,
}

type Subscriber = Box<dyn FnMut(&HealthChange) + Send + Sync>;

/// Integer health. `max` is fixed at creation from the initial value.
pub struct HealthPool {
    value: i32,
    max: i32,
    depleted: bool,
    on_changed: Vec<Subscriber>,
    on_zero: Vec<Subscriber>,
}

impl HealthPool {
    pub fn new(initial: i32) -> Self {
        Self {
            value: initial,
            max: initial,
            depleted: false,
            on_changed: Vec::new(),
            on_zero: Vec::new(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// The pool has reached zero at some point.
    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    /// Called after every modification.
    pub fn subscribe_changed(&mut self, callback: impl FnMut(&HealthChange) + Send + Sync + 'static) {
        self.on_changed.push(Box::new(callback));
    }

    /// Called once, when the value first reaches zero or below.
    pub fn subscribe_zero(&mut self, callback: impl FnMut(&HealthChange) + Send + Sync + 'static) {
        self.on_zero.push(Box::new(callback));
    }

    /// Add `amount` (negative for damage) and notify subscribers before returning.
    pub fn modify(&mut self, amount: i32) -> HealthOutcome {
        let change = HealthChange {
            previous: self.value,
            value: self.value.saturating_add(amount),
            max: self.max,
        };
        self.value = change.value;

        for callback in &mut self.on_changed {
            callback(&change);
        }

        if self.value <= 0 && !self.depleted {
            self.depleted = true;
            for callback in &mut self.on_zero {
                callback(&change);
            }
            return HealthOutcome::ReachedZero;
        }

        HealthOutcome::Changed
    }
}

impl fmt::Debug for HealthPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthPool")
            .field("value", &self.value)
            .field("max", &self.max)
            .field("depleted", &self.depleted)
            .field("on_changed", &self.on_changed.len())
            .field("on_zero", &self.on_zero.len())
            .finish()
    }
}
