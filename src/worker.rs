//! The per-thread driver loop spawned by `main`.

use crate::scheduler::Scheduler;
use std::sync::Arc;

/// Pulls one ready request at a time and serves a step of it. Never holds
/// the scheduler's mutex across `serve_slice`, so other workers keep making
/// progress while this one does I/O.
///
/// Runs forever; workers have no exit path of their own and rely on the
/// whole process being terminated externally.
pub fn run(scheduler: Arc<Scheduler>) -> ! {
    loop {
        let rcb = scheduler.next();
        scheduler.serve_slice(rcb);
    }
}
