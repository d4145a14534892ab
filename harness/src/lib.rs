//! Waypoint Harness: reference worlds and auditable route reports.
//!
//! The harness runs a route request through `waypoint_search` and packages
//! the result as a canonical, content-hashed report
//! (`run_route` → `RouteReportV1` → `write_report_dir`).
//!
//! The harness does NOT implement search; it delegates to the session.
//! Worlds provide graph data only; the harness owns policy handling,
//! hashing, and persistence.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod config;
pub mod contract;
pub mod hash;
pub mod report_dir;
pub mod runner;
pub mod worlds;
