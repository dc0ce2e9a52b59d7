// localci/src/core/process.rs

//! The process boundary: how steps hand a command to the operating system.
//!
//! Steps never spawn processes themselves. They describe a [`CommandSpec`] and
//! ask a [`Launcher`] to run it, which keeps the steps testable with scripted
//! launchers and leaves a single place where children are spawned and killed.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::error::{CiError, CiResult};

/// A command to run: `program args...` inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub dir: PathBuf,
  /// Collect standard output into [`ProcessOutput::stdout`] instead of discarding it.
  pub capture_stdout: bool,
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
  /// Exit code, `None` if the process was killed by a signal.
  pub code: Option<i32>,
  /// Empty unless the command asked for `capture_stdout`.
  pub stdout: String,
  pub stderr: String,
}

impl ProcessOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Runs commands to completion.
///
/// Implementations must stop the child process (and anything it started) when
/// the returned future is dropped before it resolves: that is how deadlines and
/// interrupts terminate an in-flight command.
#[async_trait]
pub trait Launcher: Send + Sync {
  /// `Err` means the process could not be started or waited on.
  async fn launch(&self, command: &CommandSpec) -> std::io::Result<ProcessOutput>;
}

/// Spawns real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
  async fn launch(&self, command: &CommandSpec) -> std::io::Result<ProcessOutput> {
    debug!(
      program = %command.program,
      args = ?command.args,
      dir = %command.dir.display(),
      "spawning command"
    );

    let mut std_cmd = std::process::Command::new(&command.program);
    std_cmd
      .args(&command.args)
      .current_dir(&command.dir)
      .stdin(Stdio::null())
      .stderr(Stdio::piped());
    if command.capture_stdout {
      std_cmd.stdout(Stdio::piped());
    } else {
      std_cmd.stdout(Stdio::null());
    }
    // Own process group, so grandchildren (`sh -c`, git's ssh) can be killed with it.
    #[cfg(unix)]
    std::os::unix::process::CommandExt::process_group(&mut std_cmd, 0);

    let mut cmd = Command::from(std_cmd);
    cmd.kill_on_drop(true);

    // `output()` would re-pipe stdout; spawn + wait keeps the Stdio set above.
    let child = cmd.spawn()?;
    let group = GroupKillGuard { pgid: child.id() };
    let output = child.wait_with_output().await?;
    group.disarm();
    trace!(status = %output.status, "command exited");

    Ok(ProcessOutput {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
  }
}

/// Kills the child's whole process group if the launch future is dropped
/// (deadline or interrupt) before the child was waited on.
struct GroupKillGuard {
  pgid: Option<u32>,
}

impl GroupKillGuard {
  fn disarm(mut self) {
    self.pgid = None;
  }
}

impl Drop for GroupKillGuard {
  fn drop(&mut self) {
    if let Some(pgid) = self.pgid.take() {
      kill_process_group(pgid);
    }
  }
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
  use nix::sys::signal::{killpg, Signal};
  use nix::unistd::Pid;

  match killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
    Ok(()) => debug!(pgid, "killed process group"),
    Err(nix::errno::Errno::ESRCH) => {}
    Err(e) => warn!(pgid, error = %e, "SIGKILL to process group failed"),
  }
}

// kill_on_drop covers the direct child; there are no process groups to signal.
#[cfg(not(unix))]
fn kill_process_group(_pgid: u32) {}

/// Rejects hosts the pipeline cannot run on.
pub fn ensure_supported_os() -> CiResult<()> {
  if cfg!(windows) {
    return Err(CiError::UnsupportedOs(std::env::consts::OS.to_string()));
  }
  Ok(())
}
