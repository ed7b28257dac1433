//! Forwarding a child's output while waiting for it to exit.
//!
//! One reader thread per pipe feeds a channel; the calling thread is the only
//! writer. It wakes on whichever comes first, new output or the poll interval
//! at which it checks for child exit. Once the child has exited, output still
//! in flight is drained until the pipes close or stay quiet for a grace period
//! (a grandchild can keep a pipe open indefinitely).

use std::io::{self, Read, Write};
use std::process::{Child, ExitStatus};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::filter::OutputFilter;

/// How often the child's exit status is polled while its pipes are quiet.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to keep draining output after the child has exited.
const DRAIN_GRACE: Duration = Duration::from_millis(200);

const READ_BUF_SIZE: usize = 8192;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

struct Chunk {
    stream: Stream,
    bytes: Vec<u8>,
}

/// Relays `child`'s piped stdout and stderr to `out` and `err` until it exits.
///
/// Pipes that were not captured are simply not relayed. Bytes are forwarded
/// in the order they arrive, after passing through `filter`.
pub fn relay_child(
    child: &mut Child,
    out: &mut dyn Write,
    err: &mut dyn Write,
    filter: OutputFilter,
) -> io::Result<ExitStatus> {
    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        spawn_reader(stdout, Stream::Stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_reader(stderr, Stream::Stderr, tx.clone());
    }
    drop(tx);

    let mut exited: Option<ExitStatus> = None;
    loop {
        let timeout = if exited.is_some() {
            DRAIN_GRACE
        } else {
            POLL_INTERVAL
        };
        match rx.recv_timeout(timeout) {
            Ok(chunk) => {
                let sink: &mut dyn Write = match chunk.stream {
                    Stream::Stdout => &mut *out,
                    Stream::Stderr => &mut *err,
                };
                sink.write_all(&filter.apply(&chunk.bytes))?;
                sink.flush()?;
            }
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                if exited.is_some() {
                    break;
                }
                exited = child.try_wait()?;
            }
        }
    }

    match exited {
        Some(status) => Ok(status),
        None => child.wait(),
    }
}

fn spawn_reader<R>(mut source: R, stream: Stream, tx: Sender<Chunk>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; READ_BUF_SIZE];
        loop {
            match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = Chunk {
                        stream,
                        bytes: buf[..n].to_vec(),
                    };
                    if tx.send(chunk).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};

    fn spawn_sh(script: &str) -> Child {
        Command::new("sh")
            .arg("-c")
            .arg(script)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
    }

    #[test]
    fn relays_both_streams_and_status() {
        let mut child = spawn_sh("printf 'compiling\\r\\n'; printf 'warning: x\\n' >&2; exit 3");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = relay_child(&mut child, &mut out, &mut err, OutputFilter::default()).unwrap();
        assert_eq!(status.code(), Some(3));
        assert_eq!(out, b"compiling\r\n");
        assert_eq!(err, b"warning: x\n");
    }

    #[test]
    fn strips_carriage_returns_when_asked() {
        let mut child = spawn_sh("printf 'a\\r\\nb\\r\\n'");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let filter = OutputFilter {
            strip_carriage_returns: true,
        };
        let status = relay_child(&mut child, &mut out, &mut err, filter).unwrap();
        assert!(status.success());
        assert_eq!(out, b"a\nb\n");
        assert!(err.is_empty());
    }

    #[test]
    fn large_output_is_lossless() {
        let mut child = spawn_sh("i=0; while [ $i -lt 2000 ]; do echo line$i; i=$((i+1)); done");
        let mut out = Vec::new();
        let mut err = Vec::new();
        relay_child(&mut child, &mut out, &mut err, OutputFilter::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2000);
        assert_eq!(lines[0], "line0");
        assert_eq!(lines[1999], "line1999");
    }

    #[test]
    fn uncaptured_child_is_just_waited() {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg("exit 0")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = relay_child(&mut child, &mut out, &mut err, OutputFilter::default()).unwrap();
        assert!(status.success());
        assert!(out.is_empty());
    }
}
