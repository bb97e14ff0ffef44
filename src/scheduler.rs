//! The process-wide front end: admission, the ready-queue mutex/condvar, and
//! dispatch into whichever policy is active.

use crate::config::SchedulerConfig;
use crate::error::AdmitError;
use crate::policy::{PolicyKind, Queues};
use crate::rcb::Rcb;

use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};

const REQUEST_LINE_CAP: usize = 8192;

/// Owns the ready queues, the mutex/condvar pair workers block on, and the
/// monotonically increasing request sequence counter.
///
/// `admit` runs on the accept thread and never holds `ready` across I/O;
/// `next` runs on worker threads and blocks on `not_empty` while every queue
/// is empty, re-checking its predicate on every wakeup to tolerate spurious
/// wakes.
pub struct Scheduler {
    kind: PolicyKind,
    config: SchedulerConfig,
    ready: Mutex<Queues>,
    not_empty: Condvar,
    seq: AtomicU64,
}

impl Scheduler {
    /// Builds a scheduler for the named policy. Returns `None` for an
    /// unrecognized policy name — the caller (`main`) treats that as a fatal
    /// configuration error and exits with the usage banner, matching
    /// `sws.c`'s behavior on an unrecognized `argv[2]`.
    pub fn init(policy_name: &str, config: SchedulerConfig) -> Option<Self> {
        let kind = PolicyKind::parse(policy_name)?;
        Some(Scheduler {
            kind,
            ready: Mutex::new(Queues::new(kind, &config)),
            not_empty: Condvar::new(),
            seq: AtomicU64::new(1),
            config,
        })
    }

    #[inline]
    pub(crate) fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Parses the request line off `client_sink`, resolves it to a file, and
    /// either queues an RCB or writes a terminal error reply.
    ///
    /// Runs on the accept thread, outside the scheduler's mutex. Only a
    /// single request per connection is served (the wire protocol has no
    /// keep-alive), so any I/O error here just drops the connection.
    pub fn admit(&self, mut client_sink: TcpStream) {
        match self.try_admit(&mut client_sink) {
            Ok(rcb) => {
                let mut guard = self.ready.lock().unwrap();
                guard.insert(rcb);
                drop(guard);
                self.not_empty.notify_one();
            }
            Err(AdmitError::BadRequest) => {
                let _ = client_sink.write_all(b"HTTP/1.1 400 Bad request\n\n");
            }
            Err(AdmitError::NotFound) => {
                let _ = client_sink.write_all(b"HTTP/1.1 404 File not found\n\n");
            }
            Err(AdmitError::Io(_)) => {}
        }
    }

    fn try_admit(&self, client_sink: &mut TcpStream) -> Result<Box<Rcb>, AdmitError> {
        let mut buf = [0u8; REQUEST_LINE_CAP];
        let n = client_sink.read(&mut buf)?;
        let line = &buf[..n];

        let space = memchr::memchr(b' ', line).ok_or(AdmitError::BadRequest)?;
        let method = &line[..space];
        if method != b"GET" {
            return Err(AdmitError::BadRequest);
        }

        let rest = &line[space + 1..];
        let end = memchr::memchr2(b' ', b'\n', rest).unwrap_or(rest.len());
        let token = &rest[..end];
        if token.is_empty() {
            return Err(AdmitError::BadRequest);
        }

        // Strip exactly one leading byte (the request-URI's leading '/')
        // before handing the rest to `open`, rooting it at the process's
        // working directory rather than the filesystem root. A second token
        // of exactly "/" strips to an empty path, which is a `stat` failure
        // (404), not a malformed request (400).
        let path = &token[1..];

        let path_str = std::str::from_utf8(path).map_err(|_| AdmitError::NotFound)?;
        let file = File::open(path_str).map_err(|_| AdmitError::NotFound)?;
        let total = file.metadata()?.len();

        client_sink.write_all(b"HTTP/1.1 200 OK\n\n")?;

        let seq_num = self.seq.fetch_add(1, Ordering::Relaxed);
        let client_sink = client_sink.try_clone()?;
        Ok(Box::new(Rcb::new(seq_num, client_sink, path.to_vec(), file, total)))
    }

    /// Blocks until a request is ready, then removes and returns it.
    /// Called only from worker threads; never returns `None`.
    pub fn next(&self) -> Box<Rcb> {
        let mut guard = self.ready.lock().unwrap();
        loop {
            if let Some(rcb) = guard.pick_next() {
                return rcb;
            }
            guard = self.not_empty.wait(guard).unwrap();
        }
    }

    /// Runs one service step for `rcb` under the active policy, dispatching
    /// to `sjf`/`rr`/`mlqf`. Never called with `ready` locked.
    pub fn serve_slice(&self, rcb: Box<Rcb>) {
        match self.kind {
            PolicyKind::Sjf => crate::policy::sjf::serve_slice(self, rcb),
            PolicyKind::Rr => crate::policy::rr::serve_slice(self, rcb),
            PolicyKind::Mlqf => crate::policy::mlqf::serve_slice(self, rcb),
        }
    }

    /// Re-enqueues an incomplete request (RR's tail, or MLQF's next tier)
    /// and wakes one waiting worker.
    pub(crate) fn reinsert(&self, rcb: Box<Rcb>) {
        let mut guard = self.ready.lock().unwrap();
        guard.insert(rcb);
        drop(guard);
        self.not_empty.notify_one();
    }

    /// Reports a request finished successfully.
    pub(crate) fn finish_success(&self, seq_num: u64) {
        println!("Request {seq_num} completed");
        let _ = std::io::stdout().flush();
    }

    /// Reports a request was destroyed by an I/O failure mid-service,
    /// logged rather than propagated.
    pub(crate) fn finish_error(&self, seq_num: u64, err: crate::error::ServeError) {
        eprintln!("sws: request {seq_num} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{connected_pair, temp_file_with};
    use std::io::Read as _;

    #[test]
    fn init_rejects_unknown_policy_names() {
        assert!(Scheduler::init("FCFS", SchedulerConfig::default()).is_none());
    }

    #[test]
    fn init_accepts_all_three_recognized_policies() {
        assert!(Scheduler::init("SJF", SchedulerConfig::default()).is_some());
        assert!(Scheduler::init("RR", SchedulerConfig::default()).is_some());
        assert!(Scheduler::init("MLQF", SchedulerConfig::default()).is_some());
    }

    #[test]
    fn admit_rejects_non_get_requests() {
        let scheduler = Scheduler::init("SJF", SchedulerConfig::default()).unwrap();
        let (server_side, mut client_side) = connected_pair();
        client_side.write_all(b"POST /whatever HTTP/1.1\n").unwrap();

        scheduler.admit(server_side);
        let mut reply = Vec::new();
        client_side.read_to_end(&mut reply).unwrap();
        assert!(reply.starts_with(b"HTTP/1.1 400"));
    }

    #[test]
    fn admit_reports_missing_files_as_404() {
        let scheduler = Scheduler::init("SJF", SchedulerConfig::default()).unwrap();
        let (server_side, mut client_side) = connected_pair();
        client_side
            .write_all(b"GET /no-such-file-ever-12345\n")
            .unwrap();

        scheduler.admit(server_side);
        let mut reply = Vec::new();
        client_side.read_to_end(&mut reply).unwrap();
        assert!(reply.starts_with(b"HTTP/1.1 404"));
    }

    #[test]
    fn admit_queues_a_valid_request_and_next_returns_it() {
        let scheduler = Scheduler::init("SJF", SchedulerConfig::default()).unwrap();
        let (path, _guard) = temp_file_with(b"hello");
        let (server_side, mut client_side) = connected_pair();
        let request = format!("GET /{}\n", path);
        client_side.write_all(request.as_bytes()).unwrap();

        scheduler.admit(server_side);
        let mut reply = [0u8; 64];
        let n = client_side.read(&mut reply).unwrap();
        assert!(reply[..n].starts_with(b"HTTP/1.1 200"));

        let rcb = scheduler.next();
        assert_eq!(rcb.total, 5);
    }
}
