//! Script templates executed as child processes.
//!
//! Python scripts (`.py`) are loaded by a bootstrap that binds each option
//! as a module attribute, calls `run()` with no arguments and writes the
//! returned string to stdout. Any other mapped or directly executable script
//! is invoked with `run` as its only argument and the options as one JSON
//! object on stdin; whatever it writes to stdout is the output.
//!
//! Options always travel as JSON on stdin. A non-zero exit is a failure whose
//! trace carries the child's stderr (a Python traceback for `.py`).

use std::io::{self, Write};
use std::path::{self, Path};
use std::process::{Command, ExitStatus, Stdio};
use std::string::FromUtf8Error;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{RenderError, ScriptConfig};
use crate::ports::ScriptRunner;

/// Argument naming the entry point a non-Python script template must implement.
pub const ENTRY_POINT: &str = "run";

/// Extension whose scripts are loaded through the Python bootstrap when an
/// interpreter is mapped for it.
const PYTHON_EXTENSION: &str = "py";

const PY_BOOTSTRAP: &str = include_str!("py_bootstrap.py");

#[derive(Debug, Error)]
enum ScriptError {
    #[error("failed to launch '{command}': {source}")]
    Launch { command: String, source: io::Error },

    #[error("failed to collect output of '{command}': {source}")]
    Collect { command: String, source: io::Error },

    #[error("'{command}' exited with {status}")]
    Exit { command: String, status: ExitStatus },

    #[error("'{command}' produced output that is not valid UTF-8")]
    NonUtf8Output { command: String, source: FromUtf8Error },
}

#[derive(Debug, Clone, Default)]
pub struct ProcessScriptRunner {
    config: ScriptConfig,
}

/// A command ready to spawn, with a printable form for diagnostics.
struct Launch {
    command: Command,
    described: String,
}

impl ProcessScriptRunner {
    pub fn new(config: &ScriptConfig) -> Self {
        Self { config: config.clone() }
    }

    fn launch_for(&self, script: &Path) -> Launch {
        let extension = script.extension().and_then(|ext| ext.to_str());
        let interpreter = extension
            .and_then(|ext| self.config.interpreter_for(ext))
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty());
        let mapped = interpreter.is_some();

        let (mut command, mut described) = match interpreter {
            Some(parts) => {
                let mut command = Command::new(parts[0]);
                command.args(&parts[1..]);
                (command, parts.join(" "))
            }
            None => (Command::new(script), String::new()),
        };

        if mapped && extension == Some(PYTHON_EXTENSION) {
            command.arg("-c").arg(PY_BOOTSTRAP).arg(script);
            described = format!("{described} <bootstrap> {}", script.display());
        } else {
            if mapped {
                command.arg(script);
                described.push(' ');
            }
            command.arg(ENTRY_POINT);
            described = format!("{described}{} {ENTRY_POINT}", script.display());
        }

        if let Some(dir) = script.parent() {
            command.current_dir(dir);
        }
        Launch { command, described }
    }
}

impl ScriptRunner for ProcessScriptRunner {
    fn run(&self, script: &Path, options: &Map<String, Value>) -> Result<String, RenderError> {
        let script = path::absolute(script).map_err(|err| RenderError::internal(&err))?;
        let Launch { mut command, described } = self.launch_for(&script);
        let payload = serde_json::to_vec(options).map_err(|err| RenderError::internal(&err))?;

        tracing::debug!(command = %described, "running script template");
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                RenderError::internal(&ScriptError::Launch { command: described.clone(), source })
            })?;

        // Fed from a separate thread so a chatty script cannot deadlock on full pipes.
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || match stdin.write_all(&payload) {
                Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err),
                _ => Ok(()),
            })
        });

        let output = child.wait_with_output().map_err(|source| {
            RenderError::internal(&ScriptError::Collect { command: described.clone(), source })
        })?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(source)) => {
                    return Err(RenderError::internal(&ScriptError::Collect {
                        command: described,
                        source,
                    }));
                }
                Err(payload) => return Err(RenderError::from_panic(payload.as_ref())),
            }
        }

        if !output.status.success() {
            let err = ScriptError::Exit { command: described, status: output.status };
            let stderr = String::from_utf8_lossy(&output.stderr);
            let trace = format!("{err}\n--- stderr ---\n{}", stderr.trim_end());
            return Err(RenderError::internal_with_trace(err.to_string(), trace));
        }

        String::from_utf8(output.stdout).map_err(|source| {
            RenderError::internal(&ScriptError::NonUtf8Output { command: described, source })
        })
    }
}
