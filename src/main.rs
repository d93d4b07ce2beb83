//! Purpose: `uidocs` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits output on stdout.
//! Invariants: Commands emit stable stdout formats (human or JSON by flag).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `error::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};

mod mcp_stdio;

use uidocs::docs::component_markdown;
use uidocs::error::{Error, ErrorKind, to_exit_code};
use uidocs::registry::Registry;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let exit_code = match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
                _ => to_exit_code(ErrorKind::Usage),
            };
            err.print().map_err(|io_err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to write usage output")
                    .with_source(io_err)
            })?;
            return Ok(RunOutcome::with_code(exit_code));
        }
    };
    dispatch_command(cli.command)
}

#[derive(Parser)]
#[command(
    name = "uidocs",
    version,
    about = "Component documentation server for @deay/ui",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Documentation for @deay/ui widgets, served to AI assistants over the
Model Context Protocol (stdio) and to humans over this CLI.

Mental model:
  - `serve` speaks MCP on stdin/stdout (one JSON-RPC message per line)
  - `list` and `show` print the same registry data directly
"#,
    after_help = r#"EXAMPLES
  $ uidocs list
  $ uidocs show button
  $ uidocs show input --json
  $ uidocs serve            # wire this into your assistant's MCP config

LEARN MORE
  $ uidocs <command> --help"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Serve component documentation over MCP on stdio",
        long_about = r#"Run the MCP server on stdin/stdout.

stdout carries only JSON-RPC messages, one per line; logs go to stderr
(filter with RUST_LOG, default level info). EOF on stdin exits cleanly."#,
        after_help = r#"EXAMPLES
  $ uidocs serve
  $ RUST_LOG=debug uidocs serve"#
    )]
    Serve,
    #[command(
        about = "List documented components",
        after_help = r#"EXAMPLES
  $ uidocs list
  $ uidocs list --json"#
    )]
    List {
        #[arg(long, help = "Emit a JSON summary instead of a table")]
        json: bool,
    },
    #[command(
        arg_required_else_help = true,
        about = "Show one component's documentation",
        after_help = r#"EXAMPLES
  $ uidocs show button
  $ uidocs show Input          # lookup ignores case
  $ uidocs show input --json   # raw registry record"#
    )]
    Show {
        #[arg(help = "Component name, e.g. button or input")]
        component: String,
        #[arg(long, help = "Emit the raw registry record as JSON instead of markdown")]
        json: bool,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "uidocs", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Serve => {
            mcp_stdio::serve()?;
            Ok(RunOutcome::ok())
        }
        Command::List { json } => {
            let registry = Registry::builtin();
            if json {
                let components = registry
                    .components()
                    .iter()
                    .map(|info| {
                        json!({
                            "name": info.key(),
                            "selector": info.selector,
                            "description": info.description,
                        })
                    })
                    .collect::<Vec<_>>();
                emit_json(json!({
                    "library": registry.library(),
                    "components": components,
                }));
            } else {
                let rows = registry
                    .components()
                    .iter()
                    .map(|info| vec![info.key(), info.selector.clone(), info.description.clone()])
                    .collect::<Vec<_>>();
                emit_table(&["NAME", "SELECTOR", "DESCRIPTION"], &rows);
            }
            Ok(RunOutcome::ok())
        }
        Command::Show { component, json } => {
            let registry = Registry::builtin();
            let info = registry.get(&component).ok_or_else(|| {
                Error::new(ErrorKind::NotFound)
                    .with_message("component not found")
                    .with_component(component.as_str())
                    .with_hint(format!(
                        "Known components: {}",
                        registry.component_names().join(", ")
                    ))
            })?;
            if json {
                let value = serde_json::to_value(info).map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to encode component record")
                        .with_source(err)
                })?;
                emit_json(value);
            } else {
                print!("{}", component_markdown(info));
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

fn emit_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell.len());
        }
    }
    // The last column is free-running; no padding needed.
    let print_row = |cells: &[String]| {
        let mut line = String::new();
        for (index, cell) in cells.iter().enumerate() {
            if index + 1 == cells.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{cell:<width$}  ", width = widths[index]));
            }
        }
        println!("{}", line.trim_end());
    };
    print_row(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    for row in rows {
        print_row(row);
    }
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {}", error_message(err));
        if let Some(component) = err.component() {
            eprintln!("component: {component}");
        }
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(component) = err.component() {
        inner.insert("component".to_string(), json!(component));
    }
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

#[cfg(test)]
mod tests {
    use super::{error_json, error_message};
    use uidocs::error::{Error, ErrorKind};

    #[test]
    fn error_json_envelope_has_kind_message_and_hint() {
        let err = Error::new(ErrorKind::NotFound)
            .with_message("component not found")
            .with_component("tooltip")
            .with_hint("Known components: button, input");
        let value = error_json(&err);
        let inner = value.get("error").and_then(|v| v.as_object()).expect("error object");
        assert_eq!(inner.get("kind").and_then(|v| v.as_str()), Some("NotFound"));
        assert_eq!(
            inner.get("message").and_then(|v| v.as_str()),
            Some("component not found")
        );
        assert_eq!(inner.get("component").and_then(|v| v.as_str()), Some("tooltip"));
        assert!(
            inner
                .get("hint")
                .and_then(|v| v.as_str())
                .is_some_and(|hint| hint.contains("button, input"))
        );
    }

    #[test]
    fn error_message_falls_back_to_kind_text() {
        assert_eq!(error_message(&Error::new(ErrorKind::Usage)), "usage error");
    }
}
