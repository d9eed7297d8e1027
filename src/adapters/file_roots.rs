//! Include/import resolution for the minijinja-backed engines.
//!
//! Template names resolve against `opts.file_roots[env]`, a list of
//! directories searched in order. Names must stay inside their root.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use minijinja::{Environment, Error, ErrorKind};
use serde_json::Value;

use crate::domain::RenderContext;

/// Search roots configured for the context's environment.
pub fn search_roots(context: &RenderContext) -> Vec<PathBuf> {
    let Some(env) = context.env() else {
        return Vec::new();
    };
    match context.opt("file_roots").and_then(|roots| roots.get(env)) {
        Some(Value::String(dir)) => vec![PathBuf::from(dir)],
        Some(Value::Array(dirs)) => {
            dirs.iter().filter_map(Value::as_str).map(PathBuf::from).collect()
        }
        _ => Vec::new(),
    }
}

/// Install a loader on `env` that reads named templates from `roots`.
pub fn install_loader(env: &mut Environment<'static>, roots: Vec<PathBuf>) {
    if roots.is_empty() {
        return;
    }
    env.set_loader(move |name: &str| load_from_roots(&roots, name));
}

fn load_from_roots(roots: &[PathBuf], name: &str) -> Result<Option<String>, Error> {
    validate_safe_path(name)?;

    for root in roots {
        let candidate = root.join(name);
        match fs::read_to_string(&candidate) {
            Ok(body) => {
                tracing::debug!(template = name, path = %candidate.display(), "loaded include");
                return Ok(Some(body));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {}", candidate.display()),
                )
                .with_source(err));
            }
        }
    }
    Ok(None)
}

/// Reject absolute names and any component that could leave the root.
fn validate_safe_path(name: &str) -> Result<(), Error> {
    let path = Path::new(name);
    let traversal = || {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("path traversal detected in template name: {name}"),
        )
    };

    if path.is_absolute() {
        return Err(traversal());
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(traversal()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn context_with_roots(roots: Value) -> RenderContext {
        RenderContext::new()
            .with_var("opts", json!({ "file_roots": roots }))
            .with_var("env", "base")
    }

    #[test]
    fn roots_follow_environment() {
        let ctx = context_with_roots(json!({ "base": ["/srv/a", "/srv/b"], "prod": ["/srv/p"] }));
        assert_eq!(search_roots(&ctx), vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]);
    }

    #[test]
    fn single_string_root_is_accepted() {
        let ctx = context_with_roots(json!({ "base": "/srv/a" }));
        assert_eq!(search_roots(&ctx), vec![PathBuf::from("/srv/a")]);
    }

    #[test]
    fn no_roots_without_opts() {
        let ctx = RenderContext::new().with_var("opts", json!({})).with_var("env", "base");
        assert!(search_roots(&ctx).is_empty());
    }

    #[test]
    fn first_root_containing_the_name_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(second.path().join("macros.j2"), "second").unwrap();

        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(load_from_roots(&roots, "macros.j2").unwrap().as_deref(), Some("second"));
        assert_eq!(load_from_roots(&roots, "absent.j2").unwrap(), None);
    }

    #[test]
    fn traversal_is_rejected() {
        let root = tempdir().unwrap();
        let roots = vec![root.path().to_path_buf()];

        assert!(load_from_roots(&roots, "../secret").is_err());
        assert!(load_from_roots(&roots, "/etc/passwd").is_err());
        assert!(load_from_roots(&roots, "./ok.j2").unwrap().is_none());
    }
}
