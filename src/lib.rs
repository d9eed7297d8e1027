//! tmplgate: one calling convention over interchangeable template engines.
//!
//! Every render returns an [`Envelope`]: `{result: true, data: <text or file path>}`
//! on success, `{result: false, data: <error>}` on failure. Engines are looked
//! up by name in a fixed registry.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{
    Engine, EngineRegistry, RenderInvoker, RenderOptions, RenderRequest, SCRIPT_ENGINE,
    ScriptRenderer, engine_names, lookup, render,
};
pub use domain::{
    AppError, ContractViolation, Envelope, GateConfig, RenderContext, RenderError,
    RenderErrorKind, TemplateSource, UnknownEngine,
};
pub use ports::{OutputMaterializer, Renderer, ScriptRunner};
