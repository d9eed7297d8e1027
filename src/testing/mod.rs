mod fake_renderer;
mod fake_script_runner;
mod memory_materializer;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::domain::RenderContext;

pub use fake_renderer::{CountingRenderer, FailingRenderer, PanickingRenderer};
pub use fake_script_runner::FakeScriptRunner;
pub use memory_materializer::{FailingMaterializer, MemoryMaterializer};

/// Context carrying the two required keys and nothing else.
pub fn base_context() -> RenderContext {
    RenderContext::new().with_var("opts", json!({})).with_var("env", "base")
}

/// Write an executable script into `dir`.
#[allow(dead_code)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// Whether a `python3` interpreter can be launched on this machine.
#[allow(dead_code)]
pub fn python3_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}
