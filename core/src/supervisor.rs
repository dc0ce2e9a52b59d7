// localci/src/supervisor.rs

//! Runs a pipeline while watching for termination signals.
//!
//! The pipeline and the interrupt source are raced in a single `select!`. The
//! first to resolve decides the result:
//!
//! - the pipeline finishes: `Ok(())` ([`RunOutcome::Completed`]),
//! - the pipeline fails: its error, unchanged ([`RunOutcome::StepFailed`]),
//! - a signal arrives: [`CiError::Signal`] ([`RunOutcome::Interrupted`]).
//!
//! When the signal wins, the pipeline future is dropped before `run` returns.
//! Launchers kill their child on drop, so the in-flight command is terminated
//! and no later step can start or write to the sink.
//!
//! [`RunOutcome::Completed`]: crate::core::RunOutcome::Completed
//! [`RunOutcome::StepFailed`]: crate::core::RunOutcome::StepFailed
//! [`RunOutcome::Interrupted`]: crate::core::RunOutcome::Interrupted

use std::future::Future;
use std::io::Write;

use tracing::{event, instrument, Level};

use crate::core::Signal;
use crate::error::{CiError, CiResult};
use crate::pipeline::Pipeline;

pub struct Supervisor {
  pipeline: Pipeline,
}

impl Supervisor {
  pub fn new(pipeline: Pipeline) -> Self {
    Self { pipeline }
  }

  pub fn pipeline(&self) -> &Pipeline {
    &self.pipeline
  }

  /// Runs the pipeline, aborting on SIGINT or SIGTERM.
  ///
  /// Signal interest is registered before the first step starts and released
  /// on every return path.
  #[instrument(name = "Supervisor::run", skip_all, fields(num_steps = self.pipeline.len()))]
  pub async fn run<W: Write + ?Sized>(&self, out: &mut W) -> CiResult<()> {
    let mut listener = SignalListener::register().map_err(CiError::SignalSetup)?;
    self.run_until(out, listener.recv()).await
    // listener dropped here: no more signal delivery to this run.
  }

  /// Runs the pipeline, aborting when `interrupt` resolves first.
  pub async fn run_until<W, F>(&self, out: &mut W, interrupt: F) -> CiResult<()>
  where
    W: Write + ?Sized,
    F: Future<Output = Signal>,
  {
    tokio::select! {
      result = self.pipeline.run(out) => {
        match &result {
          Ok(()) => event!(Level::INFO, "Pipeline completed."),
          Err(e) => event!(Level::WARN, error = %e, "Pipeline failed."),
        }
        result
      }
      signal = interrupt => {
        event!(Level::WARN, %signal, "Received signal, aborting pipeline.");
        Err(CiError::Signal { signal })
      }
    }
  }
}

impl std::fmt::Debug for Supervisor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Supervisor").field("pipeline", &self.pipeline).finish()
  }
}

/// Scoped interest in SIGINT and SIGTERM. Dropping it stops delivery.
#[cfg(unix)]
pub struct SignalListener {
  interrupt: tokio::signal::unix::Signal,
  terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalListener {
  pub fn register() -> std::io::Result<Self> {
    use tokio::signal::unix::{signal, SignalKind};

    Ok(Self {
      interrupt: signal(SignalKind::interrupt())?,
      terminate: signal(SignalKind::terminate())?,
    })
  }

  /// Waits for the next signal.
  pub async fn recv(&mut self) -> Signal {
    tokio::select! {
      Some(()) = self.interrupt.recv() => Signal::Interrupt,
      Some(()) = self.terminate.recv() => Signal::Terminate,
      // Both streams closed: the runtime is shutting down, never resolve.
      else => std::future::pending().await,
    }
  }
}

#[cfg(not(unix))]
pub struct SignalListener;

#[cfg(not(unix))]
impl SignalListener {
  pub fn register() -> std::io::Result<Self> {
    Ok(Self)
  }

  pub async fn recv(&mut self) -> Signal {
    match tokio::signal::ctrl_c().await {
      Ok(()) => Signal::Interrupt,
      Err(err) => {
        event!(Level::ERROR, error = %err, "Failed to listen for Ctrl+C.");
        std::future::pending().await
      }
    }
  }
}
