//! Shared helpers for the integration tests: log setup and an element type that records
//! every clone and drop it goes through.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Routes `tracing` output to the test harness.  `RUST_LOG` overrides the default level.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

/// Counts every `Tracked` instance created and dropped within one test.
#[derive(Default)]
pub struct Ledger {
    created: Cell<usize>,
    dropped: Cell<usize>,
}

impl Ledger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Instances that exist right now.
    pub fn live(&self) -> usize {
        self.created.get() - self.dropped.get()
    }
}

/// Per-item statistics, shared by an item and all of its clones.
#[derive(Default)]
pub struct ItemStats {
    pub clones: Cell<usize>,
    pub drops: Cell<usize>,
    pub panic_on_clone: Cell<bool>,
    pub panic_on_drop: Cell<bool>,
}

/// Element type whose `Clone` and `Drop` can be told to panic.
pub struct Tracked {
    pub id: usize,
    stats: Rc<ItemStats>,
    ledger: Rc<Ledger>,
}

impl Tracked {
    pub fn new(id: usize, stats: Rc<ItemStats>, ledger: Rc<Ledger>) -> Self {
        ledger.created.set(ledger.created.get() + 1);
        Self { id, stats, ledger }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.stats.clones.set(self.stats.clones.get() + 1);
        if self.stats.panic_on_clone.get() {
            panic!("simulated clone failure for item {}", self.id);
        }
        Tracked::new(self.id, self.stats.clone(), self.ledger.clone())
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.stats.drops.set(self.stats.drops.get() + 1);
        self.ledger.dropped.set(self.ledger.dropped.get() + 1);
        if self.stats.panic_on_drop.get() && !std::thread::panicking() {
            panic!("simulated drop failure for item {}", self.id);
        }
    }
}

/// Creates `count` fresh stats records.
pub fn make_stats(count: usize) -> Vec<Rc<ItemStats>> {
    (0..count).map(|_| Rc::new(ItemStats::default())).collect()
}

/// Creates one item per stats record, numbered from 0.
pub fn make_items(stats: &[Rc<ItemStats>], ledger: &Rc<Ledger>) -> Vec<Tracked> {
    stats
        .iter()
        .enumerate()
        .map(|(id, s)| Tracked::new(id, s.clone(), ledger.clone()))
        .collect()
}

pub fn ids<'a>(items: impl IntoIterator<Item = &'a Tracked>) -> Vec<usize> {
    items.into_iter().map(|item| item.id).collect()
}
