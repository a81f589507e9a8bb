//! Built-in commands: `quit`, `jobs`, `bg`, `fg`.
//!
//! Builtins run inside the shell process; no child is spawned. `bg` and
//! `fg` resolve their argument (a PID or a `%jobid`), send SIGCONT to the
//! job's process group and move the job between states.

use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;

use crate::jobs::{Job, JobState, JobTable, SharedJobs};

/// The four commands the shell executes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Quit,
    Jobs,
    Bg,
    Fg,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quit" => Some(Self::Quit),
            "jobs" => Some(Self::Jobs),
            "bg" => Some(Self::Bg),
            "fg" => Some(Self::Fg),
            _ => None,
        }
    }
}

/// Executes `argv` if its first token names a builtin. Returns false when
/// the command is external and must be spawned instead.
pub fn dispatch(argv: &[String], jobs: &SharedJobs) -> bool {
    let Some(builtin) = argv.first().and_then(|name| Builtin::from_name(name)) else {
        return false;
    };

    match builtin {
        // No cleanup of spawned jobs is attempted.
        Builtin::Quit => std::process::exit(0),
        Builtin::Jobs => {
            for job in jobs.lock().iter() {
                println!("{}", job.listing_line());
            }
        }
        Builtin::Bg => do_bgfg("bg", false, argv, jobs),
        Builtin::Fg => do_bgfg("fg", true, argv, jobs),
    }
    true
}

/// Identifier accepted by bg/fg: a bare PID or a `%`-prefixed job id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobRef {
    Pid(i32),
    Jid(u32),
}

fn parse_job_ref(arg: &str) -> Option<JobRef> {
    fn all_digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    if let Some(rest) = arg.strip_prefix('%') {
        if all_digits(rest) {
            return rest.parse().ok().map(JobRef::Jid);
        }
        None
    } else if all_digits(arg) {
        arg.parse().ok().map(JobRef::Pid)
    } else {
        None
    }
}

/// Resolves the bg/fg argument against the table. On failure returns the
/// exact diagnostic to print; the table is left untouched.
fn resolve<'a>(
    name: &str,
    args: &[String],
    table: &'a mut JobTable,
) -> Result<&'a mut Job, String> {
    let Some(arg) = args.first() else {
        return Err(format!("{name} command requires PID or %jobid argument"));
    };
    let Some(job_ref) = parse_job_ref(arg) else {
        return Err(format!("{name}: argument must be a PID or %jobid"));
    };
    match job_ref {
        JobRef::Pid(raw) => table
            .find_by_pid_mut(Pid::from_raw(raw))
            .ok_or_else(|| format!("({raw}): No such process")),
        JobRef::Jid(jid) => table
            .find_by_jid_mut(jid)
            .ok_or_else(|| format!("{arg}: No such job")),
    }
}

fn do_bgfg(name: &'static str, foreground: bool, argv: &[String], jobs: &SharedJobs) {
    let wait_for = {
        let mut table = jobs.lock();
        match resolve(name, &argv[1..], &mut table) {
            Ok(job) => {
                // Issued unconditionally: a no-op for a running job, and
                // exactly what a stopped one needs.
                let _ = killpg(job.pid, Signal::SIGCONT);
                if foreground {
                    job.state = JobState::Foreground;
                    Some(job.pid)
                } else {
                    job.state = JobState::Background;
                    println!("{}", job.launch_line());
                    None
                }
            }
            Err(message) => {
                println!("{message}");
                None
            }
        }
    };

    jobs.notify();
    if let Some(pid) = wait_for {
        jobs.wait_foreground(pid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_resolve() {
        assert_eq!(Builtin::from_name("quit"), Some(Builtin::Quit));
        assert_eq!(Builtin::from_name("jobs"), Some(Builtin::Jobs));
        assert_eq!(Builtin::from_name("bg"), Some(Builtin::Bg));
        assert_eq!(Builtin::from_name("fg"), Some(Builtin::Fg));
        assert_eq!(Builtin::from_name("/bin/echo"), None);
        assert_eq!(Builtin::from_name("QUIT"), None);
    }

    #[test]
    fn dispatch_passes_external_commands_through() {
        let jobs = SharedJobs::new();
        let argv = vec!["/bin/echo".to_string(), "hi".to_string()];
        assert!(!dispatch(&argv, &jobs));
    }

    #[test]
    fn dispatch_handles_jobs_listing() {
        let jobs = SharedJobs::new();
        assert!(dispatch(&["jobs".to_string()], &jobs));
    }

    #[test]
    fn job_refs_parse_pids_and_jids() {
        assert_eq!(parse_job_ref("123"), Some(JobRef::Pid(123)));
        assert_eq!(parse_job_ref("%7"), Some(JobRef::Jid(7)));
    }

    #[test]
    fn job_refs_reject_malformed_arguments() {
        assert_eq!(parse_job_ref("abc"), None);
        assert_eq!(parse_job_ref("12a"), None);
        assert_eq!(parse_job_ref("+5"), None);
        assert_eq!(parse_job_ref("-5"), None);
        assert_eq!(parse_job_ref("%"), None);
        assert_eq!(parse_job_ref("%x"), None);
        assert_eq!(parse_job_ref("%1a"), None);
        assert_eq!(parse_job_ref(""), None);
    }

    fn table_with_one_job() -> JobTable {
        let mut table = JobTable::new();
        table
            .add(Pid::from_raw(500), JobState::Stopped, "/bin/cat")
            .unwrap();
        table
    }

    #[test]
    fn resolve_requires_an_argument() {
        let mut table = table_with_one_job();
        let err = resolve("fg", &[], &mut table).unwrap_err();
        assert_eq!(err, "fg command requires PID or %jobid argument");
    }

    #[test]
    fn resolve_rejects_malformed_arguments() {
        let mut table = table_with_one_job();
        let err = resolve("bg", &["abc".to_string()], &mut table).unwrap_err();
        assert_eq!(err, "bg: argument must be a PID or %jobid");
    }

    #[test]
    fn resolve_reports_unknown_pid() {
        let mut table = table_with_one_job();
        let err = resolve("fg", &["42".to_string()], &mut table).unwrap_err();
        assert_eq!(err, "(42): No such process");
    }

    #[test]
    fn resolve_reports_unknown_jid() {
        let mut table = table_with_one_job();
        let err = resolve("fg", &["%9".to_string()], &mut table).unwrap_err();
        assert_eq!(err, "%9: No such job");
    }

    #[test]
    fn resolve_finds_jobs_by_either_identifier() {
        let mut table = table_with_one_job();
        assert_eq!(
            resolve("bg", &["500".to_string()], &mut table).unwrap().jid,
            1
        );
        assert_eq!(
            resolve("bg", &["%1".to_string()], &mut table)
                .unwrap()
                .pid
                .as_raw(),
            500
        );
    }

    #[test]
    fn failed_resolution_changes_no_state() {
        let mut table = table_with_one_job();
        let _ = resolve("fg", &["%9".to_string()], &mut table);
        let _ = resolve("fg", &["abc".to_string()], &mut table);
        let _ = resolve("fg", &[], &mut table);
        let job = table.find_by_jid_mut(1).unwrap();
        assert_eq!(job.state, JobState::Stopped);
        assert_eq!(table.iter().count(), 1);
    }
}
