mod output;
mod renderer;
mod script_runner;

pub use output::OutputMaterializer;
pub use renderer::Renderer;
pub use script_runner::ScriptRunner;
