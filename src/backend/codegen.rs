//! Binding code generation facade
//!
//! This module provides `BindingCodegen`, the single entry point from an API tree to generated source:
//!
//! ```text
//! ApiTree → BindingEmitter → [Statement] → render_source → C++ source
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use maixbind::backend::BindingCodegen;
//! use maixbind::config::BindingConfig;
//! use maixbind::frontend::{ApiTree, Module};
//! use std::path::PathBuf;
//!
//! let tree = ApiTree::new().with_member("maix", Module::new("maix").with_doc("MaixPy"));
//! let config = BindingConfig::default();
//! let source = BindingCodegen::new(&config).generate::<PathBuf>(&tree, &[])?;
//! # Ok::<(), maixbind::backend::EmitError>(())
//! ```

use std::path::Path;

use super::emit::{BindingEmitter, EmitError, Statement};
use super::source::render_source;
use crate::config::BindingConfig;
use crate::frontend::tree::ApiTree;

/// Generate binding source for an API tree.
#[derive(Debug, Clone, Copy)]
pub struct BindingCodegen<'a> {
    config: &'a BindingConfig,
}

impl<'a> BindingCodegen<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self { config }
    }

    /// Emit the statement list only.
    pub fn statements(&self, tree: &ApiTree) -> Result<Vec<Statement>, EmitError> {
        BindingEmitter::new(self.config).emit(tree)
    }

    /// Emit and render the complete source file. `headers` are the headers that contributed API, in include order.
    #[tracing::instrument(skip_all, fields(header_count = headers.len()))]
    pub fn generate<P: AsRef<Path>>(&self, tree: &ApiTree, headers: &[P]) -> Result<String, EmitError> {
        let statements = self.statements(tree)?;
        Ok(render_source(self.config, headers, &statements))
    }
}
