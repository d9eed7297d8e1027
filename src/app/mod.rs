pub mod api;
pub mod cli;
pub mod config;
pub mod invoker;
mod panic_guard;
pub mod registry;
pub mod request;
pub mod script;

pub use api::{RenderOptions, render};
pub use config::{load_config, load_context, resolve_config};
pub use invoker::RenderInvoker;
pub use registry::{Engine, EngineRegistry, SCRIPT_ENGINE, engine_names, lookup};
pub use request::RenderRequest;
pub use script::ScriptRenderer;
