//! Request Control Block — the per-request state the scheduler moves between
//! queues and workers.

use std::fs::File;
use std::net::TcpStream;

/// Priority class of a request queued under [`crate::policy::Mlqf`].
///
/// Ignored by [`crate::policy::Sjf`] and [`crate::policy::Rr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// New or small request: one 8192-byte slice budget.
    T0,
    /// Promoted once: eight 8192-byte slices (~64 KiB) budget.
    T1,
    /// Promoted twice: terminal, round-robins with other `T2` requests.
    T2,
}

impl Tier {
    /// The tier a request is promoted to after exhausting its slice budget.
    ///
    /// `T2` promotes to itself — it is the terminal tier.
    #[inline]
    pub(crate) const fn promote(self) -> Self {
        match self {
            Tier::T0 => Tier::T1,
            Tier::T1 => Tier::T2,
            Tier::T2 => Tier::T2,
        }
    }
}

/// Per-request state: identity, open file handle, socket, byte progress,
/// queue-tier tag.
///
/// An RCB is resident in at most one policy queue at any time, and is
/// destroyed exactly once — on completion, on admission rejection after
/// construction, or on unrecoverable I/O error during a service slice.
/// `client_sink` and `source` are closed exactly once, when the RCB is
/// dropped.
pub struct Rcb {
    /// Monotonically increasing identifier assigned at admission, unique
    /// within the process lifetime, starting at 1.
    pub seq_num: u64,
    /// The client connection byte sink. Owned exclusively by the RCB from
    /// admission until destruction.
    pub client_sink: TcpStream,
    /// The requested file path, as seen after admission stripped the
    /// leading `/`.
    pub path: Vec<u8>,
    /// An open, readable byte source for `path`, positioned at the next
    /// byte to send.
    pub source: File,
    /// Count of bytes already written to `client_sink`. Monotonically
    /// non-decreasing; never exceeds `total`.
    pub sent: u64,
    /// File size in bytes captured at admission. Immutable for the RCB's
    /// lifetime.
    pub total: u64,
    /// Queue-tier tag, meaningful only under MLQF.
    pub tier: Tier,
}

impl Rcb {
    #[inline]
    pub(crate) fn new(
        seq_num: u64,
        client_sink: TcpStream,
        path: Vec<u8>,
        source: File,
        total: u64,
    ) -> Self {
        Rcb {
            seq_num,
            client_sink,
            path,
            source,
            sent: 0,
            total,
            tier: Tier::T0,
        }
    }

    /// An RCB is complete iff every byte of `total` has been sent.
    #[inline]
    pub(crate) const fn is_complete(&self) -> bool {
        self.sent == self.total
    }
}
