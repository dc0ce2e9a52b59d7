// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use localci::{CommandSpec, Launcher, ProcessOutput};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tracing::Level;

pub const GO_PIPELINE_OUTPUT: &str = "Go Build: SUCCESS\nGo Test: SUCCESS\nGofmt: SUCCESS\nGit Push: SUCCESS\n";

// --- Scripted process behaviour ---
#[derive(Clone, Debug)]
pub enum Script {
  /// Exit 0 with nothing on stdout.
  Succeed,
  /// Exit 0 and print `stdout`.
  Report(&'static str),
  /// Exit with `code`, writing `stderr`.
  Fail { code: i32, stderr: &'static str },
  /// Run for `Duration`, then exit 0.
  Hang(Duration),
  /// The executable does not exist.
  NotFound,
}

/// A launcher that never spawns anything. Behaviour is chosen by program name
/// (or `"program arg0"` for finer control) and every call is recorded.
pub struct ScriptedLauncher {
  scripts: HashMap<String, Script>,
  calls: Mutex<Vec<CommandSpec>>,
  finished: AtomicUsize,
  abandoned: Arc<AtomicUsize>,
}

impl ScriptedLauncher {
  pub fn new() -> Self {
    Self {
      scripts: HashMap::new(),
      calls: Mutex::new(Vec::new()),
      finished: AtomicUsize::new(0),
      abandoned: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn script(mut self, key: &str, script: Script) -> Self {
    self.scripts.insert(key.to_string(), script);
    self
  }

  pub fn calls(&self) -> Vec<CommandSpec> {
    self.calls.lock().clone()
  }

  pub fn programs(&self) -> Vec<String> {
    self.calls.lock().iter().map(|c| c.program.clone()).collect()
  }

  /// Launches that ran to completion.
  pub fn finished(&self) -> usize {
    self.finished.load(Ordering::SeqCst)
  }

  /// Launches whose future was dropped before completing (i.e. the child was killed).
  pub fn abandoned(&self) -> usize {
    self.abandoned.load(Ordering::SeqCst)
  }

  fn lookup(&self, command: &CommandSpec) -> Script {
    let detailed = command
      .args
      .first()
      .map(|arg| format!("{} {}", command.program, arg))
      .and_then(|key| self.scripts.get(&key).cloned());
    detailed
      .or_else(|| self.scripts.get(&command.program).cloned())
      .unwrap_or(Script::Succeed)
  }
}

struct AbandonGuard {
  counter: Arc<AtomicUsize>,
  armed: bool,
}

impl Drop for AbandonGuard {
  fn drop(&mut self) {
    if self.armed {
      self.counter.fetch_add(1, Ordering::SeqCst);
    }
  }
}

#[async_trait]
impl Launcher for ScriptedLauncher {
  async fn launch(&self, command: &CommandSpec) -> std::io::Result<ProcessOutput> {
    self.calls.lock().push(command.clone());
    let mut guard = AbandonGuard {
      counter: self.abandoned.clone(),
      armed: true,
    };

    let output = match self.lookup(command) {
      Script::Succeed => Ok(ProcessOutput {
        code: Some(0),
        ..Default::default()
      }),
      Script::Report(stdout) => Ok(ProcessOutput {
        code: Some(0),
        stdout: if command.capture_stdout { stdout.to_string() } else { String::new() },
        ..Default::default()
      }),
      Script::Fail { code, stderr } => Ok(ProcessOutput {
        code: Some(code),
        stderr: stderr.to_string(),
        ..Default::default()
      }),
      Script::Hang(duration) => {
        tokio::time::sleep(duration).await;
        Ok(ProcessOutput {
          code: Some(0),
          ..Default::default()
        })
      }
      Script::NotFound => Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("executable file not found: {}", command.program),
      )),
    };

    guard.armed = false;
    self.finished.fetch_add(1, Ordering::SeqCst);
    output
  }
}

// --- A sink that refuses writes ---
pub struct BrokenSink;

impl std::io::Write for BrokenSink {
  fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
    Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

pub fn as_text(out: &[u8]) -> String {
  String::from_utf8_lossy(out).into_owned()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
