//! Define error types for API tree → binding emission.
//!
//! Every emission error is fatal: there is no partial output.

use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::tree::NodeKind;

/// Error during binding emission.
#[derive(Debug, Error, Diagnostic)]
pub enum EmitError {
    #[error("API tree has no `{root}` entry")]
    #[diagnostic(
        code(maixbind::emit::missing_root),
        help("no header declared the root module; check the parser output or pass --root")
    )]
    MissingRoot { root: String },

    #[error("API root `{root}` is a {kind}, expected a module")]
    #[diagnostic(code(maixbind::emit::root_kind))]
    RootNotModule { root: String, kind: NodeKind },

    #[error("unsupported: `{name}` in `{container}`")]
    #[diagnostic(
        code(maixbind::emit::unsupported),
        help("destructor bindings are not supported; remove the Python binding annotation from the destructor")
    )]
    Unsupported { name: String, container: String },
}
