// CLI integration tests for the uidocs binary: registry commands and a
// scripted MCP stdio session.
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_uidocs");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

#[test]
fn list_json_reports_registered_components() {
    let output = cmd().args(["list", "--json"]).output().expect("list");
    assert!(output.status.success());
    let value = parse_json(std::str::from_utf8(&output.stdout).expect("utf8"));

    assert_eq!(value["library"], "@deay/ui");
    let components = value["components"].as_array().expect("components array");
    assert_eq!(components.len(), 2);
    assert_eq!(components[0]["name"], "button");
    assert_eq!(components[0]["selector"], "dai-button");
    assert_eq!(components[1]["name"], "input");
    assert_eq!(components[1]["selector"], "dai-input");
}

#[test]
fn list_table_includes_selectors() {
    let output = cmd().arg("list").output().expect("list");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("NAME"));
    assert!(text.contains("dai-button"));
    assert!(text.contains("dai-input"));
}

#[test]
fn show_prints_markdown_case_insensitively() {
    let output = cmd().args(["show", "BUTTON"]).output().expect("show");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("# Button Component"));
    assert!(text.contains("## Props"));
    assert!(text.contains("## Best Practices"));
}

#[test]
fn show_json_emits_the_raw_record() {
    let output = cmd().args(["show", "input", "--json"]).output().expect("show");
    assert!(output.status.success());
    let value = parse_json(std::str::from_utf8(&output.stdout).expect("utf8"));
    assert_eq!(value["name"], "Input");
    assert_eq!(value["props"].as_array().expect("props").len(), 7);
}

#[test]
fn show_unknown_component_exits_not_found_with_json_error() {
    let output = cmd().args(["show", "tooltip"]).output().expect("show");
    assert_eq!(output.status.code().unwrap(), 3);
    let value = parse_json(std::str::from_utf8(&output.stderr).expect("utf8"));
    assert_eq!(value["error"]["kind"], "NotFound");
    assert_eq!(value["error"]["component"], "tooltip");
    assert!(
        value["error"]["hint"]
            .as_str()
            .expect("hint")
            .contains("button, input")
    );
}

#[test]
fn missing_argument_exits_usage() {
    let output = cmd().arg("show").output().expect("show");
    assert_eq!(output.status.code().unwrap(), 2);
}

fn jsonrpc_lines(requests: &[Value]) -> String {
    let mut script = String::new();
    for request in requests {
        script.push_str(&serde_json::to_string(request).expect("encode request"));
        script.push('\n');
    }
    script
}

#[test]
fn mcp_stdio_session_round_trips() {
    let mut child = cmd()
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn serve");

    let script = jsonrpc_lines(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized", "params": {}}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "get_component_info", "arguments": {"component": "Button"}}}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
               "params": {"name": "get_component_info", "arguments": {"component": "nonexistent"}}}),
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
               "params": {"name": "list_components", "arguments": {}}}),
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
               "params": {"name": "bogus_tool", "arguments": {}}}),
    ]);
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write requests");

    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success(), "serve should exit cleanly on EOF");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let responses: Vec<Value> = stdout.lines().map(parse_json).collect();
    // One reply per request with an id; the notification is silent.
    assert_eq!(responses.len(), 6);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "uidocs");

    assert_eq!(responses[1]["id"], 2);
    let tools = responses[1]["result"]["tools"].as_array().expect("tools");
    assert_eq!(tools.len(), 2);

    let button_doc = responses[2]["result"]["content"][0]["text"]
        .as_str()
        .expect("button doc");
    assert!(button_doc.contains("# Button Component"));

    let not_found = responses[3]["result"]["content"][0]["text"]
        .as_str()
        .expect("not found text");
    assert_eq!(
        not_found,
        "Component \"nonexistent\" not found. Available components: button, input"
    );

    let catalog = responses[4]["result"]["content"][0]["text"]
        .as_str()
        .expect("catalog");
    assert!(catalog.contains("dai-button"));
    assert!(catalog.contains("dai-input"));

    assert!(responses[5].get("result").is_none());
    assert_eq!(responses[5]["error"]["code"], -32602);
    assert!(
        responses[5]["error"]["message"]
            .as_str()
            .expect("message")
            .contains("bogus_tool")
    );
}

#[test]
fn mcp_stdio_reports_parse_errors_and_keeps_serving() {
    let mut child = cmd()
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn serve");

    let mut script = String::from("{not json\n");
    script.push_str(&jsonrpc_lines(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}),
    ]));
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write requests");

    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let responses: Vec<Value> = stdout.lines().map(parse_json).collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[1]["result"], json!({}));
}
