#![forbid(unsafe_code)]
//! maixbind: pybind11 binding generator for the MaixPy C/C++ API
//!
//! Annotated C/C++ headers are parsed (by the SDK's parser tool) into an API tree of modules, classes, functions,
//! variables and enums. This crate orders and collects those headers, then walks the tree and emits the pybind11
//! registration code that exposes it to Python as one generated source file.
//!
//! ```text
//! headers → sort_headers → collect_api (parser + conflict check) → BindingEmitter → render_source → .cpp
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend::emit`
//!   modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod version;

pub use backend::{BindingCodegen, BindingEmitter, EmitError, Statement};
pub use config::BindingConfig;
pub use frontend::{ApiNode, ApiTree, CollectedApi, HeaderParser, collect_api, sort_headers};
