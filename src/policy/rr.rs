//! Round Robin: a single FIFO with a fixed 8192-byte quantum per slice.

use crate::error::ServeError;
use crate::rcb::Rcb;
use crate::scheduler::Scheduler;
use std::io::Write;

/// Serves one quantum: read up to one slice, write it out, and re-enqueue
/// at the tail if the request is still incomplete.
///
/// Preserves the source's short-write behavior on purpose:
/// `sent` advances by the number of bytes *read*, even if the subsequent
/// write was short. Fixing that would change observable behavior and is out
/// of scope.
pub(crate) fn serve_slice(scheduler: &Scheduler, mut rcb: Box<Rcb>) {
    if rcb.is_complete() {
        scheduler.finish_success(rcb.seq_num);
        return;
    }

    let mut buf = [0u8; crate::config::SLICE_BUF_CAP];
    let n = match super::read_chunk(&mut rcb, &mut buf) {
        Ok(n) => n,
        Err(e) => {
            scheduler.finish_error(rcb.seq_num, ServeError::Read(e));
            return;
        }
    };

    match rcb.client_sink.write(&buf[..n]) {
        Ok(_written) => rcb.sent += n as u64,
        Err(e) => {
            scheduler.finish_error(rcb.seq_num, ServeError::Write(e));
            return;
        }
    }

    if rcb.is_complete() {
        scheduler.finish_success(rcb.seq_num);
    } else {
        scheduler.reinsert(rcb);
    }
}
