//! Error taxonomy and the observability hook.
//!
//! The engine is a library, not a process: it has no logging configuration
//! of its own. [`Observability`] is the one seam a host application can hook
//! into to route internal faults into its own `log`/`tracing` setup; the
//! default implementation just prints to stderr.

use std::fmt;

/// Errors the engine can raise. Most of these represent a programmer error
/// in how the engine's contracts were used (duplicate ids, double release,
/// an unsatisfiable layout constraint) rather than a recoverable runtime
/// condition, so call sites that can't plausibly continue (e.g. `each`'s
/// reconciliation loop) panic with the `Display` message rather than
/// threading a `Result` through every primitive.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The reactive graph detected a dependency cycle while validating or
    /// recomputing a derivation.
    #[error("reactive cycle detected: {0}")]
    ReactiveCycle(String),

    /// Two live nodes were assigned the same explicit id, or `each()` saw
    /// the same key twice in one pass.
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(String),

    /// `release_index` was called twice for the same index without an
    /// intervening allocation.
    #[error("index released twice: {0}")]
    DoubleRelease(usize),

    /// A terminal I/O operation (write, raw-mode toggle, size query) failed.
    #[error("terminal I/O error: {0}")]
    TerminalIo(String),

    /// Input bytes could not be decoded into a key or mouse event.
    #[error("could not decode input: {0}")]
    DecodeInvalid(String),

    /// The layout engine was given constraints it cannot satisfy (e.g. a
    /// fixed size smaller than the sum of border + padding insets).
    #[error("layout constraint unsatisfiable: {0}")]
    ConstraintUnsatisfiable(String),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::TerminalIo(e.to_string())
    }
}

/// A single reportable engine event, passed to [`Observability::report`].
#[derive(Debug, Clone)]
pub enum ObservabilityEvent {
    /// A non-fatal condition worth surfacing (e.g. a scroll chain that
    /// bottomed out, a focus-trap push with no focusable descendants).
    Warning(String),
    /// An [`EngineError`] that was handled (recovered from) rather than
    /// propagated or panicked on.
    Recovered(EngineError),
}

impl fmt::Display for ObservabilityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservabilityEvent::Warning(msg) => write!(f, "warning: {msg}"),
            ObservabilityEvent::Recovered(e) => write!(f, "recovered: {e}"),
        }
    }
}

/// Sink for engine-internal events. Swap in an implementation that forwards
/// to `log`/`tracing` if the host application wants these integrated with
/// its own logging; the default just writes to stderr, matching the
/// engine's own precedent of `eprintln!`-ing non-fatal conditions directly.
pub trait Observability {
    fn report(&self, event: ObservabilityEvent);
}

/// Default sink: prints to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrObservability;

impl Observability for StderrObservability {
    fn report(&self, event: ObservabilityEvent) {
        eprintln!("[ratui-engine] {event}");
    }
}
