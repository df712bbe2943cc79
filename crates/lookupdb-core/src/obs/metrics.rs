use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for lookup merges and index scans.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub indexes: BTreeMap<String, IndexCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // IndexLookup merges
    pub unions: u64,
    pub intersections: u64,
    pub disjuncts_in: u64,
    pub disjuncts_out: u64,

    // Scans
    pub ranges_opened: u64,
    pub reverse_ranges: u64,
    pub keys_emitted: u64,
    pub scan_failures: u64,
}

///
/// IndexCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IndexCounters {
    pub merges: u64,
    pub ranges_opened: u64,
    pub keys_emitted: u64,
    pub scan_failures: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral counters for the current thread.
    pub counters: Option<EventState>,
    /// Per-index counters and averages.
    pub index_counters: Vec<IndexSummary>,
}

///
/// IndexSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IndexSummary {
    pub index: String,
    pub merges: u64,
    pub ranges_opened: u64,
    pub keys_emitted: u64,
    pub scan_failures: u64,
    pub avg_keys_per_range: f64,
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let index_counters = snap
        .indexes
        .iter()
        .map(|(index, c)| {
            let avg_keys_per_range = if c.ranges_opened > 0 {
                c.keys_emitted as f64 / c.ranges_opened as f64
            } else {
                0.0
            };

            IndexSummary {
                index: index.clone(),
                merges: c.merges,
                ranges_opened: c.ranges_opened,
                keys_emitted: c.keys_emitted,
                scan_failures: c.scan_failures,
                avg_keys_per_range,
            }
        })
        .collect();

    EventReport {
        counters: Some(snap),
        index_counters,
    }
}
