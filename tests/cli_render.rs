mod harness;

use harness::{TestContext, python3_available};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn envelope_of(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout must be a JSON envelope")
}

#[test]
fn engines_are_listed() {
    let ctx = TestContext::new();
    ctx.cli().arg("engines").assert().success().stdout(predicate::eq("jinja\nmako\npy\nwempy\n"));
}

#[test]
fn renders_inline_template_to_string() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "-e", "jinja", "--from-str", "--to-str", "Hello {{ name }}"])
        .args(["--set", "name=World"])
        .assert()
        .success()
        .stdout(predicate::eq("{\"result\":true,\"data\":\"Hello World\"}\n"));
}

#[test]
fn renders_file_template_to_temp_file() {
    let ctx = TestContext::new();
    let config = ctx.write_config();
    let template = ctx.write("motd.mako", "host=${host}\n");
    let context = ctx.write("ctx.yml", "opts: {}\nenv: base\nhost: web01\n");

    let output = ctx
        .cli()
        .args(["render", "--engine", "mako"])
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let envelope = envelope_of(&output.stdout);
    assert_eq!(envelope["result"], true);

    let outputs = ctx.outputs();
    assert_eq!(outputs.len(), 1);
    assert_eq!(envelope["data"], outputs[0].to_str().unwrap());
    assert_eq!(fs::read_to_string(&outputs[0]).unwrap(), "host=web01\n");
}

#[test]
fn stdin_is_read_as_a_stream() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "-e", "wempy", "--to-str", "--env", "prod", "-"])
        .write_stdin("env={{=env}}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\":\"env=prod\""));
}

#[test]
fn render_failure_exits_with_one() {
    let ctx = TestContext::new();
    let output = ctx
        .cli()
        .args(["render", "-e", "jinja", "--from-str", "--to-str", "{{ undefined_var }}"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let envelope = envelope_of(&output.stdout);
    assert_eq!(envelope["result"], false);
    assert!(envelope["data"].as_str().unwrap().contains("undefined"));
}

#[test]
fn unknown_engine_exits_with_two() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "-e", "genshi", "--from-str", "x"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown template engine 'genshi'"));
}

#[test]
fn missing_script_prints_empty_envelope() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "-e", "py", "--to-str", "missing.py"])
        .assert()
        .code(1)
        .stdout(predicate::eq("{}\n"));
}

#[test]
fn python_script_renders_with_overrides() {
    if !python3_available() {
        return;
    }
    let ctx = TestContext::new();
    ctx.write("motd.py", "def run():\n    return 'hello ' + host\n");

    ctx.cli()
        .args(["render", "-e", "py", "--to-str", "motd.py", "--set", "host=web01"])
        .assert()
        .success()
        .stdout(predicate::eq("{\"result\":true,\"data\":\"hello web01\"}\n"));
}

#[test]
fn malformed_override_exits_with_two() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "-e", "jinja", "--from-str", "x", "--set", "oops"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid override 'oops'"));
}

#[test]
fn invalid_config_exits_with_two() {
    let ctx = TestContext::new();
    let config = ctx.write("bad.toml", "[output]\nunknown = 1\n");

    ctx.cli()
        .args(["render", "-e", "jinja", "--from-str", "--to-str", "x", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("TOML parse error"));
}
