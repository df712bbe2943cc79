//! Metrics sink boundary.
//!
//! Lookup and index logic MUST NOT touch `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
use crate::obs::metrics;
use std::{cell::RefCell, sync::Arc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Arc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MergeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeKind {
    Union,
    Intersection,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent<'a> {
    /// One `IndexLookup` merge, with the disjunct counts before and after
    /// reconciliation.
    Merge {
        kind: MergeKind,
        index: &'a str,
        disjuncts_in: u64,
        disjuncts_out: u64,
    },
    RangeOpened {
        index: &'a str,
        reverse: bool,
    },
    KeysEmitted {
        index: &'a str,
        keys: u64,
    },
    ScanFailed {
        index: &'a str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::Merge {
                kind,
                index,
                disjuncts_in,
                disjuncts_out,
            } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        MergeKind::Union => {
                            m.ops.unions = m.ops.unions.saturating_add(1);
                        }
                        MergeKind::Intersection => {
                            m.ops.intersections = m.ops.intersections.saturating_add(1);
                        }
                    }
                    m.ops.disjuncts_in = m.ops.disjuncts_in.saturating_add(disjuncts_in);
                    m.ops.disjuncts_out = m.ops.disjuncts_out.saturating_add(disjuncts_out);

                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.merges = entry.merges.saturating_add(1);
                });
            }

            MetricsEvent::RangeOpened { index, reverse } => {
                metrics::with_state_mut(|m| {
                    m.ops.ranges_opened = m.ops.ranges_opened.saturating_add(1);
                    if reverse {
                        m.ops.reverse_ranges = m.ops.reverse_ranges.saturating_add(1);
                    }

                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.ranges_opened = entry.ranges_opened.saturating_add(1);
                });
            }

            MetricsEvent::KeysEmitted { index, keys } => {
                metrics::with_state_mut(|m| {
                    m.ops.keys_emitted = m.ops.keys_emitted.saturating_add(keys);
                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.keys_emitted = entry.keys_emitted.saturating_add(keys);
                });
            }

            MetricsEvent::ScanFailed { index } => {
                metrics::with_state_mut(|m| {
                    m.ops.scan_failures = m.ops.scan_failures.saturating_add(1);
                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.scan_failures = entry.scan_failures.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
///
/// The previous sink is restored on every exit, including unwinding.
pub fn with_metrics_sink<T>(sink: Arc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Arc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
