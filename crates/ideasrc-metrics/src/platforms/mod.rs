//! Per-platform field mapping into [`UniversalMetrics`](crate::UniversalMetrics).

mod articles;
mod forums;
mod podcasts;
mod shorts;
