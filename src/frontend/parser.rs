//! Header parser seam
//!
//! Turning annotated headers into an API tree is the job of the SDK's parsing tool. The generator only relies on the
//! [`HeaderParser`] contract: given a header and the tree accumulated so far, return the updated tree, whether the
//! header contributed anything, and the set of API keys it declared.
//!
//! [`ProcessParser`] adapts an external parser program to that contract.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use super::tree::ApiTree;

/// Result of parsing one header.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// The accumulated tree including this header's declarations.
    pub tree: ApiTree,
    /// Whether this header declared anything bound to Python.
    pub contributed: bool,
    /// Fully qualified API keys declared by this header.
    pub keys: BTreeSet<String>,
}

/// Errors raised by a header parser.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("failed to run header parser `{}`: {source}", program.display())]
    #[diagnostic(
        code(maixbind::parser::spawn),
        help("pass --parser or check that --sdk_path points at the SDK root")
    )]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("header parser failed on {} ({status}): {stderr}", header.display())]
    #[diagnostic(code(maixbind::parser::failed))]
    Failed {
        header: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("header parser produced invalid output for {}: {source}", header.display())]
    #[diagnostic(code(maixbind::parser::output))]
    InvalidOutput {
        header: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse one header into the accumulating API tree.
pub trait HeaderParser {
    fn parse(&mut self, header: &Path, tree: ApiTree) -> Result<ParseOutcome, ParseError>;
}

/// What the external parser prints on stdout.
#[derive(Debug, Default, Deserialize)]
struct ParserReply {
    #[serde(default)]
    tree: ApiTree,
    #[serde(default)]
    updated: bool,
    #[serde(default)]
    keys: BTreeSet<String>,
}

/// Runs an external parser program once per header.
///
/// The program is invoked as `<program> [args...] <header> --sdk <sdk>` and must print a JSON object
/// `{"tree": {"members": ...}, "updated": bool, "keys": [...]}` describing only that header's declarations.
/// The fragment is merged into the accumulated tree here.
#[derive(Debug, Clone)]
pub struct ProcessParser {
    program: PathBuf,
    args: Vec<String>,
    sdk: String,
}

impl ProcessParser {
    pub fn new(program: impl Into<PathBuf>, sdk: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            sdk: sdk.into(),
        }
    }

    /// Arguments passed before the header path (e.g. the script for an interpreter).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl HeaderParser for ProcessParser {
    #[tracing::instrument(skip_all, fields(header = %header.display()))]
    fn parse(&mut self, header: &Path, mut tree: ApiTree) -> Result<ParseOutcome, ParseError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(header)
            .arg("--sdk")
            .arg(&self.sdk)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ParseError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ParseError::Failed {
                header: header.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let reply: ParserReply = serde_json::from_slice(&output.stdout).map_err(|source| ParseError::InvalidOutput {
            header: header.to_path_buf(),
            source,
        })?;
        tracing::trace!(updated = reply.updated, key_count = reply.keys.len(), "parsed header");

        tree.merge(reply.tree);
        Ok(ParseOutcome {
            tree,
            contributed: reply.updated,
            keys: reply.keys,
        })
    }
}
