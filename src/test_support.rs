//! Fixtures shared by `policy`/`scheduler` unit tests: a connected loopback
//! socket pair and self-cleaning temp files, in place of a `tempfile`
//! dependency the lighter-weight repos in this corpus do without.

use crate::rcb::Rcb;
use std::fs::{self, File};
use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Returns a connected `(server_side, client_side)` `TcpStream` pair over
/// loopback, for tests that exercise `Scheduler::admit` without a live
/// listener.
pub(crate) fn connected_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("local_addr");
    let client_side = TcpStream::connect(addr).expect("connect loopback");
    let (server_side, _) = listener.accept().expect("accept loopback");
    (server_side, client_side)
}

/// Deletes its temp file when dropped, so a panicking test doesn't leak
/// files into the OS temp directory.
pub(crate) struct TempFileGuard(PathBuf);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates a uniquely named temp file containing `contents` and returns its
/// path (relative to the current directory, suitable for `Scheduler::admit`'s
/// `GET /<path>` handling) plus a guard that removes it on drop.
pub(crate) fn temp_file_with(contents: &[u8]) -> (String, TempFileGuard) {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!("sws-test-{}-{}", std::process::id(), n));

    let mut file = File::create(&path).expect("create temp file");
    file.write_all(contents).expect("write temp file");
    drop(file);

    let path_str = path.to_str().expect("temp path is valid utf-8").to_string();
    (path_str, TempFileGuard(path))
}

/// Builds an [`Rcb`] backed by a real temp file and a connected loopback
/// socket, for policy unit tests that never touch `Scheduler::admit`.
///
/// Returns the RCB, the client-side socket (so a test can drain or inspect
/// what gets written), and the temp-file guard (kept alive for the test's
/// duration; dropping it early would delete the file while `rcb.source`
/// still holds it open, which is harmless on Unix but pointless).
pub(crate) fn fake_rcb(seq_num: u64, contents: &[u8]) -> (Box<Rcb>, TcpStream, TempFileGuard) {
    let (path, guard) = temp_file_with(contents);
    let file = File::open(&path).expect("reopen temp file");
    let total = file.metadata().expect("temp file metadata").len();
    let (server_side, client_side) = connected_pair();

    let rcb = Box::new(Rcb::new(seq_num, server_side, path.into_bytes(), file, total));
    (rcb, client_side, guard)
}
