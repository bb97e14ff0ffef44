//! Shortest-Job-First: a binary min-heap over `total`, non-preemptive
//! service.

use crate::error::ServeError;
use crate::rcb::Rcb;
use crate::scheduler::Scheduler;
use std::io::Write;

/// Inserts `rcb` into the heap, sifting up from the last position.
///
/// Matches the original scheduler's sift-up exactly: a parent strictly
/// smaller than the new value stops the climb; equal totals keep climbing.
/// This is a valid min-heap invariant (ties just end up nearer the root than
/// strictly necessary) and keeps the heap valid.
pub(crate) fn insert(heap: &mut Vec<Box<Rcb>>, rcb: Box<Rcb>) {
    if heap.try_reserve(1).is_err() {
        super::log_queue_exhaustion(rcb.seq_num);
        return;
    }

    heap.push(rcb);
    let mut index = heap.len() - 1;
    while index > 0 {
        let parent = (index - 1) / 2;
        if heap[parent].total < heap[index].total {
            break;
        }
        heap.swap(parent, index);
        index = parent;
    }
}

/// Pops the root (smallest `total`), moves the last element to the root,
/// and sifts it down. On a tie between children, the left child wins.
pub(crate) fn pick_next(heap: &mut Vec<Box<Rcb>>) -> Option<Box<Rcb>> {
    if heap.is_empty() {
        return None;
    }

    let result = heap.swap_remove(0);
    if !heap.is_empty() {
        sift_down(heap, 0);
    }
    Some(result)
}

fn sift_down(heap: &mut [Box<Rcb>], mut index: usize) {
    let len = heap.len();
    loop {
        let left = 2 * index + 1;
        let right = 2 * index + 2;
        let mut smallest = index;

        if left < len && heap[left].total < heap[smallest].total {
            smallest = left;
        }
        if right < len && heap[right].total < heap[smallest].total {
            smallest = right;
        }
        if smallest == index {
            break;
        }
        heap.swap(index, smallest);
        index = smallest;
    }
}

/// Drives a request to completion in a single, non-preemptive slice: read up
/// to the slice buffer size, write it out, repeat until `sent == total` or
/// an I/O error ends the request.
pub(crate) fn serve_slice(scheduler: &Scheduler, mut rcb: Box<Rcb>) {
    let mut buf = [0u8; crate::config::SLICE_BUF_CAP];
    loop {
        if rcb.is_complete() {
            scheduler.finish_success(rcb.seq_num);
            return;
        }

        match super::read_chunk(&mut rcb, &mut buf) {
            Ok(n) => {
                if let Err(e) = rcb.client_sink.write_all(&buf[..n]) {
                    scheduler.finish_error(rcb.seq_num, ServeError::Write(e));
                    return;
                }
                rcb.sent += n as u64;
            }
            Err(e) => {
                scheduler.finish_error(rcb.seq_num, ServeError::Read(e));
                return;
            }
        }
    }
}
