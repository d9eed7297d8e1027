//! Engine name → invoker table.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use super::invoker::RenderInvoker;
use super::request::RenderRequest;
use super::script::ScriptRenderer;
use crate::adapters::{
    JinjaRenderer, MakoRenderer, ProcessScriptRunner, TempFileMaterializer, WempyRenderer,
};
use crate::domain::{ContractViolation, Envelope, GateConfig, UnknownEngine};
use crate::ports::{OutputMaterializer, Renderer};

/// Name of the script engine.
pub const SCRIPT_ENGINE: &str = "py";

/// A registered engine, already wrapped behind the uniform calling convention.
#[derive(Debug, Clone)]
pub enum Engine {
    Template(RenderInvoker),
    Script(ScriptRenderer),
}

impl Engine {
    /// Dispatch a request.
    ///
    /// Script engines take the source as a path; literal text and streams are
    /// rejected with a failure envelope. The merged context is handed to the
    /// script as its options.
    pub fn invoke(&self, request: RenderRequest) -> Result<Envelope, ContractViolation> {
        match self {
            Engine::Template(invoker) => invoker.invoke(
                request.source,
                request.from_str,
                request.to_str,
                request.context,
                request.extra,
            ),
            Engine::Script(script) => {
                let Some(path) = request.source.as_path(request.from_str) else {
                    return Ok(Envelope::failure(
                        "script engine requires a script path, not literal text or a stream",
                    ));
                };
                let mut options = request.context.into_map();
                options.extend(request.extra);
                Ok(script.invoke(&path, request.to_str, options))
            }
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, Engine::Script(_))
    }
}

/// Fixed mapping from engine name to engine.
#[derive(Debug, Clone)]
pub struct EngineRegistry {
    engines: BTreeMap<&'static str, Engine>,
}

impl EngineRegistry {
    /// Build the standard engine set (`jinja`, `mako`, `py`, `wempy`).
    pub fn new(config: &GateConfig) -> Self {
        let output: Arc<dyn OutputMaterializer> =
            Arc::new(TempFileMaterializer::new(&config.output));
        let renderers: [Arc<dyn Renderer>; 3] =
            [Arc::new(JinjaRenderer), Arc::new(MakoRenderer), Arc::new(WempyRenderer)];

        let mut engines: BTreeMap<&'static str, Engine> = renderers
            .into_iter()
            .map(|renderer| {
                let name = renderer.name();
                (name, Engine::Template(RenderInvoker::from_parts(renderer, output.clone())))
            })
            .collect();
        engines.insert(
            SCRIPT_ENGINE,
            Engine::Script(ScriptRenderer::from_parts(
                Arc::new(ProcessScriptRunner::new(&config.script)),
                output,
            )),
        );

        Self { engines }
    }

    pub fn lookup(&self, name: &str) -> Result<&Engine, UnknownEngine> {
        self.engines.get(name).ok_or_else(|| UnknownEngine {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.engines.keys().copied().collect()
    }
}

static REGISTRY: LazyLock<EngineRegistry> =
    LazyLock::new(|| EngineRegistry::new(&GateConfig::default()));

/// Look up an engine in the process-wide registry.
pub fn lookup(name: &str) -> Result<&'static Engine, UnknownEngine> {
    REGISTRY.lookup(name)
}

/// Names registered in the process-wide registry.
pub fn engine_names() -> Vec<&'static str> {
    REGISTRY.names()
}
