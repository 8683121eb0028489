//! Fold every header into one API tree
//!
//! Headers are parsed in priority order. Each API key may be declared by exactly one header; a second declaration is a
//! configuration error and stops the run before anything is generated. Headers that declared nothing bound are
//! dropped so the generated source never includes them.

use std::collections::HashMap;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::parser::{HeaderParser, ParseError};
use super::tree::ApiTree;

/// The API tree plus the headers that contributed to it, in parse order.
#[derive(Debug, Clone, Default)]
pub struct CollectedApi {
    pub tree: ApiTree,
    pub headers: Vec<PathBuf>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum CollectError {
    #[error("API {key} multiple defined in {} and {}", first.display(), second.display())]
    #[diagnostic(
        code(maixbind::collect::conflict),
        help("each API key must be declared by exactly one header; remove or rename one of the declarations")
    )]
    Conflict {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Parse `headers` in order, checking for keys declared twice.
#[tracing::instrument(skip_all, fields(header_count = headers.len()))]
pub fn collect_api<P>(headers: &[PathBuf], parser: &mut P) -> Result<CollectedApi, CollectError>
where
    P: HeaderParser + ?Sized,
{
    let mut tree = ApiTree::new();
    let mut owners: HashMap<String, PathBuf> = HashMap::new();
    let mut contributing = Vec::new();

    for header in headers {
        let outcome = parser.parse(header, tree)?;
        tree = outcome.tree;

        for key in &outcome.keys {
            if let Some(first) = owners.get(key).filter(|first| *first != header) {
                return Err(CollectError::Conflict {
                    key: key.clone(),
                    first: first.clone(),
                    second: header.clone(),
                });
            }
        }
        for key in outcome.keys {
            owners.insert(key, header.clone());
        }

        if outcome.contributed {
            contributing.push(header.clone());
        } else {
            tracing::debug!(header = %header.display(), "header declares no API, dropping include");
        }
    }

    tracing::info!(
        contributing = contributing.len(),
        keys = owners.len(),
        "collected API from headers"
    );
    Ok(CollectedApi {
        tree,
        headers: contributing,
    })
}
