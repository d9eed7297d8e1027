pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod render_error;
pub mod source;

pub use config::{GateConfig, OutputConfig, ScriptConfig};
pub use context::{REQUIRED_KEYS, RenderContext};
pub use envelope::Envelope;
pub use error::{AppError, ContractViolation, UnknownEngine};
pub use render_error::{RenderError, RenderErrorKind};
pub use source::TemplateSource;
