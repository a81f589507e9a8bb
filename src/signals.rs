//! The notification relay: keyboard and child-state signals.
//!
//! Instead of raw async signal handlers, the OS signal stream is consumed
//! through a `signal-hook` iterator on a dedicated thread. The thread runs
//! in an ordinary context, so it can take the job-table lock and format
//! output freely; delivery of the handled signals is serialized by the
//! iterator, which removes the re-entrancy concerns raw handlers have.

use std::process;
use std::thread;

use nix::sys::signal::{Signal, killpg};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use signal_hook::consts::signal::{SIGCHLD, SIGINT, SIGQUIT, SIGTSTP};
use signal_hook::iterator::Signals;

use crate::error::ShellError;
use crate::jobs::{JobState, SharedJobs};

/// Installs the relay thread. Must be called once, before the first child
/// is spawned; failure to install is fatal to the shell.
pub fn install(jobs: SharedJobs) -> Result<(), ShellError> {
    let mut signals =
        Signals::new([SIGCHLD, SIGINT, SIGTSTP, SIGQUIT]).map_err(ShellError::Signal)?;

    thread::Builder::new()
        .name("signal-relay".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                match signal {
                    SIGCHLD => reap_children(&jobs),
                    SIGINT => forward_to_foreground(&jobs, Signal::SIGINT),
                    SIGTSTP => forward_to_foreground(&jobs, Signal::SIGTSTP),
                    SIGQUIT => {
                        println!("Terminating after receipt of SIGQUIT signal");
                        process::exit(1);
                    }
                    _ => unreachable!(),
                }
            }
        })
        .map_err(ShellError::Signal)?;

    Ok(())
}

/// Drains every child with a pending status change, without ever blocking
/// on one that is still running.
///
/// Stopped children flip to [`JobState::Stopped`]; children killed by an
/// uncaught signal are reported and removed; normal exits are removed
/// silently. The relative order of simultaneously-reportable children is
/// whatever waitpid yields.
fn reap_children(jobs: &SharedJobs) {
    loop {
        let status = waitpid(
            Pid::from_raw(-1),
            Some(WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED),
        );
        match status {
            Ok(WaitStatus::Stopped(pid, signal)) => {
                let mut table = jobs.lock();
                if let Some(job) = table.find_by_pid_mut(pid) {
                    job.state = JobState::Stopped;
                    println!(
                        "Job [{}] ({}) stopped by signal {}",
                        job.jid, pid, signal as i32
                    );
                }
                drop(table);
                jobs.notify();
            }
            Ok(WaitStatus::Signaled(pid, signal, _)) => {
                let mut table = jobs.lock();
                if let Some(job) = table.find_by_pid(pid) {
                    println!(
                        "Job [{}] ({}) terminated by signal {}",
                        job.jid, pid, signal as i32
                    );
                }
                table.remove(pid);
                drop(table);
                jobs.notify();
            }
            Ok(WaitStatus::Exited(pid, _)) => {
                jobs.lock().remove(pid);
                jobs.notify();
            }
            // StillAlive: no child has a pending report. Err: no children
            // remain (ECHILD).
            Ok(WaitStatus::StillAlive) | Err(_) => break,
            Ok(_) => continue,
        }
    }
}

/// Forwards a keyboard-originated signal to the foreground job's entire
/// process group. With no foreground job this is a no-op; in particular it
/// must never target process group 0 (our own).
fn forward_to_foreground(jobs: &SharedJobs, signal: Signal) {
    if let Some(pid) = jobs.lock().foreground_pid() {
        let _ = killpg(pid, signal);
    }
}
