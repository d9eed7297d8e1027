//! Typed renderer failures.
//!
//! Every renderer reports failure through [`RenderError`], tagged with a
//! [`RenderErrorKind`]. The invoker decides what lands in the envelope from the
//! tag alone; it never inspects the message.

use std::any::Any;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt::Write as _;

use thiserror::Error;

/// Recognized engine rejection vs. anything unanticipated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorKind {
    /// The engine rejected the template: bad syntax, strict undefined, unknown filter.
    Syntax,
    /// Any other failure raised while rendering.
    Internal,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct RenderError {
    kind: RenderErrorKind,
    message: String,
    trace: Option<String>,
}

impl RenderError {
    /// A recognized render error carrying the engine's own concise message.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self { kind: RenderErrorKind::Syntax, message: message.into(), trace: None }
    }

    /// An unanticipated failure; captures the cause chain and a stack backtrace.
    pub fn internal(err: &(dyn StdError + 'static)) -> Self {
        let message = err.to_string();
        let trace = format_trace(&message, err.source());
        Self { kind: RenderErrorKind::Internal, message, trace: Some(trace) }
    }

    /// An unanticipated failure described only by a message.
    pub fn internal_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let trace = format_trace(&message, None);
        Self { kind: RenderErrorKind::Internal, message, trace: Some(trace) }
    }

    /// An internal failure whose diagnostic text was produced elsewhere (a child process).
    pub fn internal_with_trace(message: impl Into<String>, trace: impl Into<String>) -> Self {
        Self { kind: RenderErrorKind::Internal, message: message.into(), trace: Some(trace.into()) }
    }

    /// Convert a caught panic payload into an internal failure.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::internal_message(format!("renderer panicked: {detail}"))
    }

    pub fn kind(&self) -> RenderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full diagnostic text, captured at construction or built on demand.
    pub fn full_trace(&self) -> String {
        self.trace.clone().unwrap_or_else(|| format_trace(&self.message, None))
    }

    /// Text reported as envelope `data`: the concise message for syntax errors,
    /// the full trace otherwise.
    pub fn envelope_data(&self) -> String {
        match self.kind {
            RenderErrorKind::Syntax => self.message.clone(),
            RenderErrorKind::Internal => self.full_trace(),
        }
    }
}

fn format_trace(message: &str, mut source: Option<&(dyn StdError + 'static)>) -> String {
    let mut out = String::from(message);

    if source.is_some() {
        out.push_str("\n\nCaused by:");
        let mut depth = 0;
        while let Some(cause) = source {
            let _ = write!(out, "\n    {depth}: {cause}");
            depth += 1;
            source = cause.source();
        }
    }

    let _ = write!(out, "\n\nStack backtrace:\n{}", Backtrace::force_capture());
    out
}
