pub mod file_roots;
pub mod jinja;
pub mod mako;
pub mod process_script;
pub mod temp_output;
pub mod wempy;

pub use jinja::JinjaRenderer;
pub use mako::MakoRenderer;
pub use process_script::ProcessScriptRunner;
pub use temp_output::TempFileMaterializer;
pub use wempy::WempyRenderer;
