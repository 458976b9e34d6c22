//! Kills processes by the environment they were started with.
//!
//! Processes spawned for a build inherit the build's environment overrides,
//! so a process tree belonging to one view is every process whose
//! environment carries all of them. The calling process and its ancestors
//! are never signalled, even when they carry the same variables.
use adeview_model::Env;
#[cfg(target_os = "linux")]
use tracing::{debug, trace};

use crate::ExecError;

/// Sends `SIGKILL` to every process whose environment contains all of
/// `overrides` and returns how many were signalled.
///
/// An empty `overrides` selects nothing. Processes that vanish or whose
/// environment cannot be read are skipped, as is a pid whose start time
/// changed between reading its environment and signalling it.
#[cfg(target_os = "linux")]
pub fn kill_matching(overrides: &Env) -> Result<usize, ExecError> {
    if overrides.is_empty() {
        debug!("no environment overrides; nothing to kill");
        return Ok(0);
    }

    let protected = linux::self_and_ancestors();
    let mut killed = 0;
    let mut first_error = None;

    for pid in linux::pids()? {
        if protected.contains(&pid) {
            continue;
        }
        let Some(started) = linux::start_time(pid) else {
            continue;
        };
        let Some(env) = linux::environ(pid) else {
            continue;
        };
        if !env.contains_all(overrides) {
            continue;
        }
        if linux::start_time(pid) != Some(started) {
            debug!(pid, "pid was reused during the scan; skipping");
            continue;
        }

        trace!(pid, "killing process carrying build overrides");
        // SAFETY: plain syscall on a pid read from /proc; no memory is shared.
        if unsafe { libc::kill(pid, libc::SIGKILL) } == 0 {
            killed += 1;
            continue;
        }
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ESRCH) {
            continue;
        }
        debug!(pid, error = %err, "kill failed");
        first_error.get_or_insert(ExecError::Kill { pid, source: err });
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            debug!(killed, "process tree kill complete");
            Ok(killed)
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub fn kill_matching(overrides: &Env) -> Result<usize, ExecError> {
    if overrides.is_empty() {
        return Ok(0);
    }
    Err(ExecError::Unsupported)
}

#[cfg(target_os = "linux")]
mod linux {
    use std::{collections::HashSet, fs, str::SplitWhitespace};

    use adeview_model::{Env, KeyValue};

    use crate::ExecError;

    pub(super) fn pids() -> Result<Vec<i32>, ExecError> {
        let mut out = Vec::new();
        for entry in fs::read_dir("/proc")? {
            let entry = entry?;
            if let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                out.push(pid);
            }
        }
        Ok(out)
    }

    pub(super) fn environ(pid: i32) -> Option<Env> {
        let raw = fs::read(format!("/proc/{pid}/environ")).ok()?;
        Some(parse_environ(&raw))
    }

    /// `/proc/<pid>/environ` is a NUL-separated list of `KEY=VALUE`.
    pub(super) fn parse_environ(raw: &[u8]) -> Env {
        raw.split(|b| *b == 0)
            .filter_map(|entry| {
                let entry = String::from_utf8_lossy(entry);
                let (key, value) = entry.split_once('=')?;
                (!key.is_empty()).then(|| KeyValue::new(key, value))
            })
            .collect()
    }

    fn stat(pid: i32) -> Option<String> {
        fs::read_to_string(format!("/proc/{pid}/stat")).ok()
    }

    /// Fields of a `stat` line after the command name, starting at `state`.
    /// The command name may contain spaces and parentheses, so fields are
    /// counted after the last `)`.
    fn stat_fields(stat: &str) -> Option<SplitWhitespace<'_>> {
        Some(stat.rsplit_once(')')?.1.split_whitespace())
    }

    pub(super) fn parent_of(pid: i32) -> Option<i32> {
        parse_ppid(&stat(pid)?)
    }

    pub(super) fn parse_ppid(stat: &str) -> Option<i32> {
        stat_fields(stat)?.nth(1)?.parse().ok()
    }

    /// Start time in clock ticks since boot. With the pid it names one
    /// process even after the pid is recycled.
    pub(super) fn start_time(pid: i32) -> Option<u64> {
        parse_start_time(&stat(pid)?)
    }

    pub(super) fn parse_start_time(stat: &str) -> Option<u64> {
        stat_fields(stat)?.nth(19)?.parse().ok()
    }

    pub(super) fn self_and_ancestors() -> HashSet<i32> {
        let mut out = HashSet::new();
        let mut pid = std::process::id() as i32;
        while pid > 0 && out.insert(pid) {
            match parent_of(pid) {
                Some(parent) => pid = parent,
                None => break,
            }
        }
        out
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::linux::*;
    use super::*;

    #[test]
    fn parses_environ_block() {
        let env = parse_environ(b"PATH=/bin\0ADE_VIEW_NAME=v_1\0BROKEN\0OPTS=a=b\0");
        assert_eq!(env.len(), 3);
        assert_eq!(env.get("ADE_VIEW_NAME"), Some("v_1"));
        assert_eq!(env.get("OPTS"), Some("a=b"));
    }

    #[test]
    fn parses_ppid_with_odd_command_names() {
        assert_eq!(parse_ppid("123 (ade) S 45 123 123 0"), Some(45));
        assert_eq!(parse_ppid("123 (my (odd) cmd) R 7 1 1"), Some(7));
        assert_eq!(parse_ppid("garbage"), None);
    }

    #[test]
    fn parses_start_time_after_command_name() {
        let stat = "4242 (sleep) S 4200 4242 4200 34816 4242 4194304 100 0 0 0 0 0 0 0 20 0 1 0 987654 8192000 200";
        assert_eq!(parse_start_time(stat), Some(987654));

        let odd = "4242 (a) b (c) S 4200 4242 4200 0 -1 0 0 0 0 0 3 1 0 0 20 0 1 0 55 0 0";
        assert_eq!(parse_start_time(odd), Some(55));

        assert_eq!(parse_start_time("4242 (sleep) S 4200 4242"), None);
    }

    #[test]
    fn own_start_time_is_stable() {
        let pid = std::process::id() as i32;
        let first = start_time(pid);
        assert!(first.is_some());
        assert_eq!(start_time(pid), first);
    }

    #[test]
    fn own_process_is_protected() {
        let protected = self_and_ancestors();
        assert!(protected.contains(&(std::process::id() as i32)));
    }

    #[test]
    fn empty_overrides_kill_nothing() {
        assert_eq!(kill_matching(&Env::new()).unwrap(), 0);
    }

    #[test]
    fn unmatched_overrides_kill_nothing() {
        let overrides = Env::single("ADEVIEW_TEST_MARKER", "no-process-has-this-value");
        assert_eq!(kill_matching(&overrides).unwrap(), 0);
    }

    #[test]
    fn kills_child_carrying_overrides() {
        let marker = format!("kill-test-{}", std::process::id());
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .env("ADEVIEW_TEST_MARKER", &marker)
            .spawn()
            .unwrap();

        let overrides = Env::single("ADEVIEW_TEST_MARKER", marker);
        // environ may be empty for a moment right after fork.
        let mut killed = 0;
        for _ in 0..50 {
            killed = kill_matching(&overrides).unwrap();
            if killed > 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }

        assert_eq!(killed, 1);
        let status = child.wait().unwrap();
        assert!(!status.success());
    }
}
