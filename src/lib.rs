//! sws - a small static file server with a pluggable request scheduler.
//!
//! Serves plain GET requests for files on disk through one of three
//! scheduling disciplines, chosen at startup: Shortest-Job-First, Round
//! Robin, or Multi-Level Queue with Feedback. A fixed pool of worker threads
//! pulls ready requests off a single mutex-guarded queue and serves them one
//! slice at a time, so long transfers under SJF don't stall the other two
//! policies' fairness guarantees and short transfers under RR/MLQF don't wait
//! behind a single huge one.
//!
//! # Example
//!
//! ```no_run
//! use sws::config::SchedulerConfig;
//! use sws::scheduler::Scheduler;
//! use std::sync::Arc;
//!
//! let scheduler = Arc::new(Scheduler::init("SJF", SchedulerConfig::default()).unwrap());
//! for _ in 0..4 {
//!     let scheduler = Arc::clone(&scheduler);
//!     std::thread::spawn(move || sws::worker::run(scheduler));
//! }
//! ```

pub mod config;
pub mod error;
pub mod policy;
pub mod rcb;
pub mod scheduler;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::{
    config::SchedulerConfig,
    error::{AdmitError, ServeError},
    policy::PolicyKind,
    rcb::{Rcb, Tier},
    scheduler::Scheduler,
};
