use std::fmt;

use nix::unistd::Pid;

/// The run state of a tracked job.
///
/// State transitions and enabling actions:
///     Foreground -> Stopped    : ctrl-z
///     Stopped    -> Foreground : fg command
///     Stopped    -> Background : bg command
///     Background -> Foreground : fg command
///
/// At most one job is in the Foreground state at any instant. An empty
/// table slot is represented by `None`, not by a state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Foreground,
    Background,
    Stopped,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Foreground => write!(f, "Foreground"),
            JobState::Background => write!(f, "Running"),
            JobState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// One tracked unit of spawned work: the leader process of a process group
/// plus the shell's bookkeeping for it.
#[derive(Debug, Clone)]
pub struct Job {
    /// Process id of the job's group leader; unique among active jobs.
    pub pid: Pid,
    /// Shell-assigned job id, unique among active jobs.
    pub jid: u32,
    pub state: JobState,
    /// The command line as the user typed it, kept for display.
    pub cmdline: String,
}

impl Job {
    /// `[jid] (pid) cmdline`, printed on background launch and by `bg`.
    pub fn launch_line(&self) -> String {
        format!("[{}] ({}) {}", self.jid, self.pid, self.cmdline)
    }

    /// `[jid] (pid) <State> cmdline`, one line of the `jobs` listing.
    pub fn listing_line(&self) -> String {
        format!(
            "[{}] ({}) {} {}",
            self.jid, self.pid, self.state, self.cmdline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(state: JobState) -> Job {
        Job {
            pid: Pid::from_raw(1234),
            jid: 2,
            state,
            cmdline: "/bin/sleep 5 &".to_string(),
        }
    }

    #[test]
    fn state_labels() {
        assert_eq!(JobState::Foreground.to_string(), "Foreground");
        assert_eq!(JobState::Background.to_string(), "Running");
        assert_eq!(JobState::Stopped.to_string(), "Stopped");
    }

    #[test]
    fn launch_line_format() {
        assert_eq!(
            job(JobState::Background).launch_line(),
            "[2] (1234) /bin/sleep 5 &"
        );
    }

    #[test]
    fn listing_line_format() {
        assert_eq!(
            job(JobState::Stopped).listing_line(),
            "[2] (1234) Stopped /bin/sleep 5 &"
        );
    }
}
