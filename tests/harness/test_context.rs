//! Shared testing harness for `tmplgate` integration tests.

use assert_cmd::Command;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tmplgate::RenderContext;

/// Isolated scratch directory with helpers for templates, scripts and the CLI.
pub(crate) struct TestContext {
    root: TempDir,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("out")).expect("Failed to create output directory");
        Self { root }
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    /// Directory the CLI is pointed at for materialized output.
    pub(crate) fn out_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    /// Write a file relative to the scratch root and return its path.
    pub(crate) fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write an executable script relative to the scratch root.
    pub(crate) fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.write(name, body);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to mark script executable");
        }
        path
    }

    /// Config file sending materialized output into `out_dir`.
    pub(crate) fn write_config(&self) -> PathBuf {
        let out = self.out_dir();
        self.write(
            "tmplgate.toml",
            &format!("[output]\ntemp_dir = {:?}\nprefix = \"cli-\"\n", out.to_str().unwrap()),
        )
    }

    /// Build a command for invoking the compiled `tmplgate` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("tmplgate").expect("Failed to locate tmplgate binary");
        cmd.current_dir(self.root.path()).env_remove("TMPLGATE_CONFIG").env_remove("TMPLGATE_LOG");
        cmd
    }

    /// Files currently in the output directory.
    pub(crate) fn outputs(&self) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = fs::read_dir(self.out_dir())
            .expect("Failed to list output directory")
            .map(|entry| entry.expect("Failed to read entry").path())
            .collect();
        entries.sort();
        entries
    }
}

/// Context carrying only `opts` and `env`.
pub(crate) fn base_context() -> RenderContext {
    RenderContext::new().with_var("opts", json!({})).with_var("env", "base")
}

/// Whether a `python3` interpreter can be launched on this machine.
pub(crate) fn python3_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}
