//! Lifecycle-counting element fixtures.
//!
//! - [`Ledger`]: shared counters for creations, clones, and drops.
//! - [`Tracked`]: a `u32` payload that reports to its ledger, and panics on
//!   clone once the ledger's clone budget is spent.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
    clone_budget: Cell<Option<usize>>,
}

/// Shared lifecycle counters for [`Tracked`] values.
///
/// Cloning a ledger shares the counters.
#[derive(Clone, Default)]
pub struct Ledger {
    counts: Rc<Counts>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose values panic on the clone after `budget` successful clones.
    pub fn with_clone_budget(budget: usize) -> Self {
        let ledger = Self::new();
        ledger.counts.clone_budget.set(Some(budget));
        ledger
    }

    /// Create a tracked value.
    pub fn track(&self, value: u32) -> Tracked {
        bump(&self.counts.created);
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    /// Values created (directly or by cloning) and not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }

    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    pub fn cloned(&self) -> usize {
        self.counts.cloned.get()
    }

    pub fn dropped(&self) -> usize {
        self.counts.dropped.get()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("created", &self.created())
            .field("cloned", &self.cloned())
            .field("dropped", &self.dropped())
            .finish()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

/// A `u32` payload whose lifecycle is recorded in a [`Ledger`].
pub struct Tracked {
    value: u32,
    ledger: Ledger,
}

impl Tracked {
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Clone for Tracked {
    /// # Panics
    ///
    /// Panics once the ledger's clone budget is spent.
    fn clone(&self) -> Self {
        let counts = &self.ledger.counts;
        match counts.clone_budget.get() {
            Some(0) => panic!("clone budget exhausted"),
            Some(n) => counts.clone_budget.set(Some(n - 1)),
            None => {}
        }
        bump(&counts.cloned);
        self.ledger.track(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        bump(&self.ledger.counts.dropped);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<u32> for Tracked {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}
