//! Purpose: Run the MCP documentation server over stdio transport.
//! Exports: `serve`.
//! Role: Bridge newline-delimited JSON-RPC lines to the shared MCP dispatcher.
//! Invariants: stdout only emits JSON-RPC messages (one JSON value per line).
//! Invariants: stdin EOF exits cleanly without side effects.
//! Invariants: Parse/protocol errors are surfaced as JSON-RPC error responses.

use std::io::{self, BufRead, BufReader, BufWriter, Write};

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use uidocs::error::{Error, ErrorKind};
use uidocs::mcp::{DispatchOutcome, Dispatcher, DocsHandler, RpcError, parse_jsonrpc_line};
use uidocs::registry::Registry;

pub(super) fn serve() -> Result<(), Error> {
    init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = BufWriter::new(stdout.lock());
    let dispatcher = Dispatcher::new(DocsHandler::new(Registry::builtin()));
    let mut line = String::new();

    tracing::info!(
        name = %dispatcher.metadata().name,
        version = %dispatcher.metadata().version,
        "MCP server listening on stdio"
    );

    loop {
        line.clear();
        let read = reader.read_line(&mut line).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read MCP request")
                .with_source(err)
        })?;
        if read == 0 {
            tracing::info!("stdin closed, shutting down");
            writer.flush().map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to flush MCP output")
                    .with_source(err)
            })?;
            return Ok(());
        }

        let message = line.trim_end_matches(['\n', '\r']);
        if message.is_empty() {
            continue;
        }

        let request = match parse_jsonrpc_line(message) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(code = error.code, "request line failed to parse");
                write_parse_error(&mut writer, error)?;
                continue;
            }
        };

        match dispatcher.dispatch_value(request) {
            DispatchOutcome::Silent => {}
            DispatchOutcome::Reply(response) => {
                let payload = serde_json::to_value(response).map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to encode MCP response")
                        .with_source(err)
                })?;
                write_json_line(&mut writer, &payload)?;
            }
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn write_json_line(
    writer: &mut BufWriter<io::StdoutLock<'_>>,
    payload: &Value,
) -> Result<(), Error> {
    serde_json::to_writer(&mut *writer, payload).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode MCP message")
            .with_source(err)
    })?;
    writer.write_all(b"\n").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write MCP message")
            .with_source(err)
    })?;
    writer.flush().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to flush MCP message")
            .with_source(err)
    })
}

fn write_parse_error(
    writer: &mut BufWriter<io::StdoutLock<'_>>,
    error: RpcError,
) -> Result<(), Error> {
    let payload = json!({
        "jsonrpc": "2.0",
        "id": Value::Null,
        "error": error,
    });
    write_json_line(writer, &payload)
}
