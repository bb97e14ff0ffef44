//! The pluggable scheduling policy interface.
//!
//! A tagged variant (`PolicyKind` selecting which `Queues` shape backs the
//! scheduler) stands in for the original scheduler's hand-rolled vtable
//! dispatch. `insert`/`pick_next` are only ever called with the scheduler's
//! mutex held; `serve_slice` (in `sjf`/`rr`/`mlqf`) is only ever called
//! without it.

pub mod mlqf;
pub mod rr;
pub mod sjf;

use crate::config::SchedulerConfig;
use crate::rcb::{Rcb, Tier};
use std::collections::VecDeque;
use std::io::{self, Read};

/// Selects which of the three scheduling disciplines a [`crate::scheduler::Scheduler`]
/// runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Shortest-Job-First: non-preemptive, ordered by total file size.
    Sjf,
    /// Round Robin: single FIFO, fixed 8192-byte quantum.
    Rr,
    /// Multi-Level Queue with Feedback: three tiers, escalating quanta.
    Mlqf,
}

impl PolicyKind {
    /// Parses one of the three recognized scheduler names.
    /// Returns `None` for anything else, which is a fatal configuration
    /// error at the call site.
    #[inline]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SJF" => Some(PolicyKind::Sjf),
            "RR" => Some(PolicyKind::Rr),
            "MLQF" => Some(PolicyKind::Mlqf),
            _ => None,
        }
    }
}

/// The queue storage backing whichever policy is active.
///
/// Always guarded by the scheduler's mutex; `serve_slice` never touches this
/// type directly, only via `Scheduler::reinsert`.
pub(crate) enum Queues {
    Sjf(Vec<Box<Rcb>>),
    Rr(VecDeque<Box<Rcb>>),
    Mlqf([VecDeque<Box<Rcb>>; 3]),
}

impl Queues {
    pub(crate) fn new(kind: PolicyKind, config: &SchedulerConfig) -> Self {
        match kind {
            PolicyKind::Sjf => Queues::Sjf(Vec::with_capacity(config.sjf_initial_capacity)),
            PolicyKind::Rr => Queues::Rr(VecDeque::new()),
            PolicyKind::Mlqf => {
                Queues::Mlqf([VecDeque::new(), VecDeque::new(), VecDeque::new()])
            }
        }
    }

    /// Combined queue count across all tiers — the predicate workers wait
    /// on in `Scheduler::next`.
    pub(crate) fn len(&self) -> usize {
        match self {
            Queues::Sjf(heap) => heap.len(),
            Queues::Rr(fifo) => fifo.len(),
            Queues::Mlqf(tiers) => tiers.iter().map(VecDeque::len).sum(),
        }
    }

    /// Places `rcb` according to the active policy's rules.
    ///
    /// Memory exhaustion while growing the backing storage is logged and
    /// the RCB is dropped without being queued, rather than treated as an
    /// unrecoverable abort.
    pub(crate) fn insert(&mut self, rcb: Box<Rcb>) {
        match self {
            Queues::Sjf(heap) => sjf::insert(heap, rcb),
            Queues::Rr(fifo) => {
                if fifo.try_reserve(1).is_err() {
                    log_queue_exhaustion(rcb.seq_num);
                    return;
                }
                fifo.push_back(rcb);
            }
            Queues::Mlqf(tiers) => {
                let queue = &mut tiers[tier_index(rcb.tier)];
                if queue.try_reserve(1).is_err() {
                    log_queue_exhaustion(rcb.seq_num);
                    return;
                }
                queue.push_back(rcb);
            }
        }
    }

    /// Removes and returns the highest-priority ready RCB, or `None` iff
    /// every queue is empty.
    pub(crate) fn pick_next(&mut self) -> Option<Box<Rcb>> {
        match self {
            Queues::Sjf(heap) => sjf::pick_next(heap),
            Queues::Rr(fifo) => fifo.pop_front(),
            Queues::Mlqf(tiers) => tiers.iter_mut().find_map(VecDeque::pop_front),
        }
    }
}

fn log_queue_exhaustion(seq_num: u64) {
    eprintln!("sws: cannot process request {seq_num}: out of memory");
}

const fn tier_index(tier: Tier) -> usize {
    match tier {
        Tier::T0 => 0,
        Tier::T1 => 1,
        Tier::T2 => 2,
    }
}

/// Reads up to one slice's worth of bytes from `rcb.source`, clamped to
/// however many bytes remain before `total`. Returns `Ok(0)` iff the
/// request is already complete — callers check `is_complete` first, so this
/// is a defensive floor rather than a normal code path.
///
/// `total` is captured once at admission and assumed immutable, but if the
/// underlying file is truncated out from under the server, `source` can hit
/// EOF while `sent < total`. That surfaces here as an `UnexpectedEof` error
/// rather than a silent `Ok(0)`, so callers end the request instead of
/// spinning (SJF) or re-enqueueing it forever (RR/MLQF).
pub(crate) fn read_chunk(rcb: &mut Rcb, buf: &mut [u8]) -> io::Result<usize> {
    let remaining = (rcb.total - rcb.sent) as usize;
    let want = remaining.min(buf.len());
    if want == 0 {
        return Ok(0);
    }
    match rcb.source.read(&mut buf[..want])? {
        0 => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "file source ended before total bytes were sent",
        )),
        n => Ok(n),
    }
}
