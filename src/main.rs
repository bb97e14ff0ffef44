//! `sws <port> <scheduler> <thread_count>` — binds a listener, starts the
//! scheduler and its workers, and runs the accept loop.

use sws::config::SchedulerConfig;
use sws::scheduler::Scheduler;
use sws::worker;

use socket2::{Domain, Socket, Type};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

fn usage() -> ! {
    println!("usage: sws <port> <scheduler> <thread_count>");
    println!("   port: [SJF|RR|MLQF]");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("incorrect number of parameters");
        usage();
    }

    let port: u16 = match args[1].parse() {
        Ok(p) => p,
        Err(_) => {
            println!("port must be numerical");
            usage();
        }
    };
    let policy_name = &args[2];
    let thread_count: usize = match args[3].parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("thread_count must be a positive integer");
            usage();
        }
    };

    let listener = bind_listener(port).unwrap_or_else(|e| {
        eprintln!("sws: failed to bind port {port}: {e}");
        std::process::exit(1);
    });

    let scheduler = match Scheduler::init(policy_name, SchedulerConfig::default()) {
        Some(s) => Arc::new(s),
        None => usage(),
    };

    for _ in 0..thread_count {
        let scheduler = Arc::clone(&scheduler);
        thread::spawn(move || worker::run(scheduler));
    }

    for stream in listener.incoming() {
        let Ok(stream) = stream else { continue };
        scheduler.admit(stream);
    }
}

/// Binds a `TcpListener` with `SO_REUSEADDR` set, so a quick restart doesn't
/// fail with `EADDRINUSE` while the previous listener's sockets drain.
fn bind_listener(port: u16) -> std::io::Result<TcpListener> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let socket = Socket::new(Domain::IPV4, Type::STREAM, None)?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;
    Ok(socket.into())
}
