use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Fork error: {0}")]
    Fork(#[source] nix::Error),

    #[error("Signal error: {0}")]
    Signal(#[source] std::io::Error),

    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
}

/// Failures of the job table itself, as opposed to the OS-level failures
/// in [`ShellError`]. `CapacityExhausted` renders as the exact diagnostic
/// the shell prints when the table is full.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("job pid must be positive")]
    InvalidPid,

    #[error("Tried to create too many jobs")]
    CapacityExhausted,
}
