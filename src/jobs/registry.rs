use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use nix::unistd::Pid;

use super::job::{Job, JobState};
use crate::error::RegistryError;

/// Maximum number of jobs tracked at any point in time.
pub const MAX_JOBS: usize = 16;

/// Fixed-capacity table of job slots.
///
/// Slots are addressed by position; listings walk them in slot order, not
/// insertion order. Pure data; all printing is done by the callers.
#[derive(Debug)]
pub struct JobTable {
    slots: [Option<Job>; MAX_JOBS],
    next_jid: u32,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self {
            slots: [const { None }; MAX_JOBS],
            next_jid: 1,
        }
    }

    /// Registers a job in the first empty slot and allocates the next jid.
    pub fn add(
        &mut self,
        pid: Pid,
        state: JobState,
        cmdline: &str,
    ) -> Result<u32, RegistryError> {
        if pid.as_raw() < 1 {
            return Err(RegistryError::InvalidPid);
        }
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(RegistryError::CapacityExhausted)?;

        let jid = self.next_jid;
        self.next_jid += 1;
        *slot = Some(Job {
            pid,
            jid,
            state,
            cmdline: cmdline.to_string(),
        });
        Ok(jid)
    }

    /// Clears the slot holding `pid`; returns false if no active slot
    /// matches. The next jid to allocate drops back to one past the largest
    /// id still active, so ids freed by finished jobs are reused.
    pub fn remove(&mut self, pid: Pid) -> bool {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|job| job.pid == pid))
        else {
            return false;
        };
        *slot = None;
        self.next_jid = self.max_jid() + 1;
        true
    }

    fn max_jid(&self) -> u32 {
        self.iter().map(|job| job.jid).max().unwrap_or(0)
    }

    pub fn find_by_pid(&self, pid: Pid) -> Option<&Job> {
        if pid.as_raw() < 1 {
            return None;
        }
        self.iter().find(|job| job.pid == pid)
    }

    pub fn find_by_pid_mut(&mut self, pid: Pid) -> Option<&mut Job> {
        if pid.as_raw() < 1 {
            return None;
        }
        self.slots.iter_mut().flatten().find(|job| job.pid == pid)
    }

    pub fn find_by_jid_mut(&mut self, jid: u32) -> Option<&mut Job> {
        if jid == 0 {
            return None;
        }
        self.slots.iter_mut().flatten().find(|job| job.jid == jid)
    }

    /// Pid of the unique foreground job, if any.
    pub fn foreground_pid(&self) -> Option<Pid> {
        self.iter()
            .find(|job| job.state == JobState::Foreground)
            .map(|job| job.pid)
    }

    /// Active jobs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.slots.iter().flatten()
    }
}

/// Shared handle to the job table.
///
/// The table is mutated from two contexts: the read-eval loop (spawn
/// registration, bg/fg transitions) and the signal relay thread (stop
/// transitions, removals). The mutex is the atomicity discipline between
/// them (the evaluator holds it across its whole fork-then-register
/// window) and the condvar wakes the foreground waiter whenever the table
/// changes.
#[derive(Clone)]
pub struct SharedJobs {
    inner: Arc<Shared>,
}

struct Shared {
    table: Mutex<JobTable>,
    changed: Condvar,
}

impl Default for SharedJobs {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedJobs {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Shared {
                table: Mutex::new(JobTable::new()),
                changed: Condvar::new(),
            }),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, JobTable> {
        self.inner.table.lock().expect("job table mutex poisoned")
    }

    /// Wakes every thread blocked in [`SharedJobs::wait_foreground`].
    pub fn notify(&self) {
        self.inner.changed.notify_all();
    }

    /// Blocks until `pid` is no longer the foreground job: either its slot
    /// was cleared or its state moved off Foreground. No polling; the
    /// relay and the dispatcher notify the condvar after every mutation.
    pub fn wait_foreground(&self, pid: Pid) {
        let mut table = self.lock();
        while table
            .find_by_pid(pid)
            .is_some_and(|job| job.state == JobState::Foreground)
        {
            table = self
                .inner
                .changed
                .wait(table)
                .expect("job table mutex poisoned");
        }
    }
}
