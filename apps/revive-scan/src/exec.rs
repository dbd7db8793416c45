//! External command execution.
//!
//! `CommandRunner` is the seam between the orchestrator and the operating
//! system. `ProcessRunner` spawns the real process: stdout goes straight to a
//! file, stderr is collected through a pipe, and the child is killed when it
//! outlives its timeout.

use crate::error::{Result, ScanError};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A fully-specified external command.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// File receiving the process's stdout (created or truncated)
    pub stdout_path: PathBuf,
    pub timeout: Duration,
}

/// What a finished command left behind besides its stdout file.
#[derive(Debug, Default, Clone)]
pub struct RunOutput {
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    pub stderr: Vec<u8>,
}

pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, inv: &Invocation) -> Result<RunOutput> {
        let stdout = File::create(&inv.stdout_path).map_err(|e| {
            ScanError::io(format!("failed to create {}", inv.stdout_path.display()), e)
        })?;
        debug!(
            "spawning {} {:?} in {}",
            inv.program.display(),
            inv.args,
            inv.cwd.display()
        );
        let mut child = Command::new(&inv.program)
            .args(&inv.args)
            .current_dir(&inv.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ScanError::io(format!("failed to start {}", inv.program.display()), e))?;

        // Drain stderr concurrently so the child never blocks on a full pipe
        let pipe = child.stderr.take();
        let reader = thread::spawn(move || match pipe {
            Some(p) => drain(p),
            None => Ok(Vec::new()),
        });

        // A timeout too large to represent means waiting without a deadline
        let Some(deadline) = Instant::now().checked_add(inv.timeout) else {
            debug!("timeout of {}s has no deadline; waiting", inv.timeout.as_secs());
            let status = child.wait().map_err(|e| {
                ScanError::io(format!("failed to wait for {}", inv.program.display()), e)
            })?;
            let stderr = join_stderr(reader, &inv.program)?;
            return Ok(RunOutput {
                status: status.code(),
                stderr,
            });
        };
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    let now = Instant::now();
                    if now >= deadline {
                        warn!(
                            "{} exceeded {}s; killing pid {}",
                            inv.program.display(),
                            inv.timeout.as_secs(),
                            child.id()
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        // Grandchildren may still hold the pipe; leave the reader detached
                        drop(reader);
                        return Err(ScanError::Timeout {
                            seconds: inv.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL.min(deadline - now));
                }
                Err(e) => {
                    let _ = child.kill();
                    return Err(ScanError::io(
                        format!("failed to wait for {}", inv.program.display()),
                        e,
                    ));
                }
            }
        };
        let stderr = join_stderr(reader, &inv.program)?;
        debug!("{} exited with {:?}", inv.program.display(), status.code());
        Ok(RunOutput {
            status: status.code(),
            stderr,
        })
    }
}

fn drain(mut pipe: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Collect the stderr reader's bytes, surfacing read failures as errors.
fn join_stderr(reader: JoinHandle<io::Result<Vec<u8>>>, program: &Path) -> Result<Vec<u8>> {
    let context = || format!("failed to read stderr of {}", program.display());
    match reader.join() {
        Ok(res) => res.map_err(|e| ScanError::io(context(), e)),
        Err(_) => Err(ScanError::io(
            context(),
            io::Error::other("stderr reader panicked"),
        )),
    }
}
