//! Purpose: Shared library crate behind the `uidocs` CLI and tests.
//! Exports: `registry` (component records), `docs` (markdown rendering),
//! `mcp` (protocol adapter + handler), `error` (structured errors).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: All exported state is immutable after construction.
pub mod docs;
pub mod error;
pub mod mcp;
pub mod registry;

pub use error::{Error, ErrorKind, to_exit_code};
