//! Per-station Bluebikes traffic aggregation with a time-of-day filter,
//! square-root marker sizing, and a renderer-independent viewport.

pub mod app;
pub mod dataset;
pub mod scale;
pub mod traffic;
pub mod viewport;
