//! Whole-tree termination of a supervised process

use std::process::Command;

use crate::error::GoliveResult;

/// Put the child in a fresh process group so the whole tree can be killed
#[cfg(unix)]
pub(crate) fn isolate(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
pub(crate) fn isolate(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

/// Kill everything in the process group led by `pid`.
///
/// `isolate` makes the child its own group leader, so the group id is the
/// child's pid and stays valid after the leader itself has exited. A group
/// that no longer exists is not an error.
#[cfg(unix)]
pub(crate) fn terminate_tree(pid: u32) -> GoliveResult<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return Ok(());
    };

    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(std::io::Error::from(errno).into()),
    }
}

#[cfg(windows)]
pub(crate) fn terminate_tree(pid: u32) -> GoliveResult<()> {
    use std::process::Stdio;

    // taskkill exits with 128 when the process is already gone
    const NOT_FOUND: i32 = 128;

    let status = Command::new("taskkill")
        .args(["/pid", &pid.to_string(), "/T", "/F"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    match status.code() {
        Some(0) | Some(NOT_FOUND) => Ok(()),
        code => Err(std::io::Error::other(format!(
            "taskkill /pid {pid} exited with {code:?}"
        ))
        .into()),
    }
}
