//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Counters are per-thread. Structured `tracing` events are emitted at the
//! call sites themselves.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{EventOps, EventReport, EventState, IndexCounters, IndexSummary};
pub use sink::{
    MergeKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
