//! Process CPU time.

/// User plus system CPU seconds consumed by this process so far.
#[cfg(unix)]
pub fn cpu_time() -> Option<f64> {
    use libc::{RUSAGE_SELF, getrusage, rusage};
    // SAFETY: rusage is plain old data; all-zero is a valid value.
    let mut usage: rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { getrusage(RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let user = usage.ru_utime.tv_sec as f64 + (usage.ru_utime.tv_usec as f64 / 1_000_000.0);
    let sys = usage.ru_stime.tv_sec as f64 + (usage.ru_stime.tv_usec as f64 / 1_000_000.0);
    Some(user + sys)
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
pub fn cpu_time() -> Option<f64> {
    None
}
