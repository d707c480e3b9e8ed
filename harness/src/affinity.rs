//! CPU affinity for the measuring thread.
//!
//! Pinning narrows scheduling noise but is not required for a valid result,
//! so callers log a failure and keep going unpinned.
//!
//! Platform support:
//!
//! - **Linux**: `sched_setaffinity` on the calling thread
//! - **Other**: not supported; every request returns [`AffinityError::Unsupported`]

use thiserror::Error;

/// Error from a pinning request.
#[derive(Debug, Error)]
pub enum AffinityError {
    /// Core id outside what the affinity mask can express.
    #[error("core {core} is out of range (max {max})")]
    InvalidCore { core: usize, max: usize },

    /// The kernel rejected the request.
    #[error("sched_setaffinity failed: {0}")]
    Os(#[source] std::io::Error),

    /// Reading the current mask failed.
    #[error("sched_getaffinity failed: {0}")]
    Query(#[source] std::io::Error),

    /// Affinity is not available on this platform.
    #[error("CPU affinity not supported on this platform")]
    Unsupported,
}

/// Restricts the calling thread to `core`.
pub fn pin_to_core(core: usize) -> Result<(), AffinityError> {
    set_cpu_affinity(&[core])
}

/// Returns the number of logical cores available to this process.
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(target_os = "linux")]
const MAX_CPUS: usize = libc::CPU_SETSIZE as usize;

/// Restricts the calling thread to `cpus`.
#[cfg(target_os = "linux")]
pub fn set_cpu_affinity(cpus: &[usize]) -> Result<(), AffinityError> {
    use std::mem;

    if let Some(&core) = cpus.iter().find(|&&c| c >= MAX_CPUS) {
        return Err(AffinityError::InvalidCore {
            core,
            max: MAX_CPUS - 1,
        });
    }

    unsafe {
        let mut set: libc::cpu_set_t = mem::zeroed();
        libc::CPU_ZERO(&mut set);
        for &cpu in cpus {
            libc::CPU_SET(cpu, &mut set);
        }

        // pid 0 addresses the calling thread.
        let result = libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), &set);
        if result != 0 {
            return Err(AffinityError::Os(std::io::Error::last_os_error()));
        }
    }

    Ok(())
}

/// Returns the cores the calling thread may run on.
#[cfg(target_os = "linux")]
pub fn current_affinity() -> Result<Vec<usize>, AffinityError> {
    use std::mem;

    unsafe {
        let mut set: libc::cpu_set_t = mem::zeroed();
        let result = libc::sched_getaffinity(0, mem::size_of::<libc::cpu_set_t>(), &mut set);
        if result != 0 {
            return Err(AffinityError::Query(std::io::Error::last_os_error()));
        }
        Ok((0..MAX_CPUS).filter(|&c| libc::CPU_ISSET(c, &set)).collect())
    }
}

#[cfg(not(target_os = "linux"))]
pub fn set_cpu_affinity(_cpus: &[usize]) -> Result<(), AffinityError> {
    tracing::debug!("CPU affinity not supported on this platform");
    Err(AffinityError::Unsupported)
}

#[cfg(not(target_os = "linux"))]
pub fn current_affinity() -> Result<Vec<usize>, AffinityError> {
    Err(AffinityError::Unsupported)
}
