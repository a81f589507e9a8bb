//! The evaluator: one parsed command line in, one effect out.
//!
//! Builtins are dispatched in-process; anything else is forked, moved into
//! its own process group and exec'd. Registration happens while the job
//! table lock is held across the whole fork window, which is what keeps
//! the relay from reaping a fast-exiting child before its job exists.

use std::ffi::CString;
use std::process;

use anyhow::Result;
use nix::unistd::{ForkResult, Pid, execv, fork, setpgid};

use crate::builtins;
use crate::error::ShellError;
use crate::jobs::{JobState, SharedJobs};
use crate::parser::ParsedLine;

pub struct Evaluator {
    jobs: SharedJobs,
    verbose: bool,
}

impl Evaluator {
    pub fn new(jobs: SharedJobs, verbose: bool) -> Self {
        Self { jobs, verbose }
    }

    /// Evaluates one command line. `line` is the text as typed (kept for
    /// display); `parsed` is its argument vector plus background flag.
    ///
    /// Only environment-level failures (fork) surface as `Err`; user-level
    /// problems are printed and the shell carries on.
    pub fn eval(&self, line: &str, parsed: &ParsedLine) -> Result<()> {
        if parsed.is_empty() {
            return Ok(());
        }
        if builtins::dispatch(&parsed.argv, &self.jobs) {
            return Ok(());
        }
        self.spawn(line, parsed)
    }

    fn spawn(&self, line: &str, parsed: &ParsedLine) -> Result<()> {
        let state = if parsed.background {
            JobState::Background
        } else {
            JobState::Foreground
        };

        let mut table = self.jobs.lock();
        let child = match unsafe { fork() }.map_err(ShellError::Fork)? {
            ForkResult::Child => exec_child(&parsed.argv),
            ForkResult::Parent { child } => child,
        };

        match table.add(child, state, line) {
            Ok(jid) => {
                if self.verbose {
                    println!("Added job [{jid}] {child} {line}");
                }
                drop(table);
                if parsed.background {
                    println!("[{jid}] ({child}) {line}");
                } else {
                    self.jobs.wait_foreground(child);
                }
            }
            Err(err) => {
                // The fork has already happened; the child now runs
                // untracked until the relay reaps its exit.
                drop(table);
                println!("{err}");
            }
        }
        Ok(())
    }
}

/// Child-side continuation of fork. Joins a fresh process group equal to
/// its own pid, so keyboard signals aimed at the shell's group skip it,
/// then replaces the process image (environment inherited). On exec
/// failure the child reports and exits 0; it must never fall through to
/// shell logic.
fn exec_child(argv: &[String]) -> ! {
    let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));

    let path = CString::new(argv[0].as_str());
    let args: std::result::Result<Vec<CString>, _> =
        argv.iter().map(|arg| CString::new(arg.as_str())).collect();
    if let (Ok(path), Ok(args)) = (path, args) {
        let _ = execv(&path, &args);
    }

    println!("{}: Command not found.", argv[0]);
    process::exit(0);
}
