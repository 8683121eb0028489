//! maixbind backend
//!
//! Turns the collected API tree into pybind11 binding source.
//!
//! ## Module Organization
//!
//! - `emit/` - Tree walker producing binding statement records
//!   - `mod.rs` - `BindingEmitter` and the traversal context
//!   - `statements.rs` - Statement records and their rendering
//!   - `handles.rs` - Handle variable naming
//!   - `errors.rs` - Emission errors
//! - `cpp_emitter.rs` - Low-level C++ code string builder
//! - `source.rs` - Generated file template
//! - `codegen.rs` - `BindingCodegen` facade

pub mod codegen;
pub mod cpp_emitter;
pub mod emit;
pub mod source;

pub use codegen::BindingCodegen;
pub use emit::{BindingEmitter, EmitError, Statement};
pub use source::render_source;
