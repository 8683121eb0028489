//! Header discovery and ordering
//!
//! Collects candidate header files and puts them into a deterministic order before parsing.
//!
//! ## Notes
//!
//! - Registration order matters to pybind11 (a base type must be registered before anything that refers to it), so
//!   build authors can pin headers to the front with a priority list of basenames.
//! - Headers not named in the priority list keep their discovery order and come last.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;
use walkdir::WalkDir;

/// File extensions treated as headers.
pub const HEADER_EXTENSIONS: [&str; 2] = ["h", "hpp"];

/// Errors raised while discovering or ordering headers.
#[derive(Debug, Error, Diagnostic)]
pub enum HeaderError {
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(maixbind::headers::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vars file {}: {source}", path.display())]
    #[diagnostic(
        code(maixbind::headers::vars),
        help("the vars file must be a JSON object with an `includes` array of directories")
    )]
    Vars {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk {}: {source}", path.display())]
    #[diagnostic(code(maixbind::headers::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Build variables exported by CMake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildVars {
    /// Include directories to scan for headers.
    #[serde(default)]
    pub includes: Vec<PathBuf>,
}

impl BuildVars {
    pub fn load(path: &Path) -> Result<Self, HeaderError> {
        let text = fs::read_to_string(path).map_err(|source| HeaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| HeaderError::Vars {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Check whether a path looks like a C/C++ header.
pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext))
}

/// Recursively collect headers under each directory.
///
/// Anything below `<dir>/<excluded>` is skipped for every `excluded` name. Directories are walked in file name order;
/// missing directories are skipped with a warning. A header reachable from two roots is reported once.
#[tracing::instrument(skip_all, fields(dir_count = dirs.len()))]
pub fn discover_headers(dirs: &[PathBuf], excluded: &[String]) -> Result<Vec<PathBuf>, HeaderError> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for dir in dirs {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "header directory does not exist, skipping");
            continue;
        }
        let skipped: Vec<PathBuf> = excluded.iter().map(|name| dir.join(name)).collect();

        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !skipped.iter().any(|skip| entry.path().starts_with(skip)));

        for entry in walker {
            let entry = entry.map_err(|source| HeaderError::Walk {
                path: dir.clone(),
                source,
            })?;
            if !entry.file_type().is_file() || !is_header(entry.path()) {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                headers.push(path);
            }
        }
    }

    tracing::debug!(header_count = headers.len(), "discovered headers");
    Ok(headers)
}

/// Collect headers from the include directories listed in a vars file.
pub fn headers_from_vars(path: &Path) -> Result<Vec<PathBuf>, HeaderError> {
    let vars = BuildVars::load(path)?;
    discover_headers(&vars.includes, &[])
}

/// Header basenames in registration priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityList {
    names: Vec<String>,
}

impl PriorityList {
    /// Parse a priority file: one basename per line, `#` starts a comment line.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    pub fn load(path: &Path) -> Result<Self, HeaderError> {
        let text = fs::read_to_string(path).map_err(|source| HeaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Sort rank of a header: its basename's position in the list, or the list length when unlisted.
    pub fn rank(&self, header: &Path) -> usize {
        let basename = header.file_name().and_then(|name| name.to_str());
        basename
            .and_then(|base| self.names.iter().position(|name| name == base))
            .unwrap_or(self.names.len())
    }
}

impl<S: Into<String>> FromIterator<S> for PriorityList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order headers by priority. The sort is stable, so unlisted headers keep their relative order.
pub fn sort_headers(mut headers: Vec<PathBuf>, priority: &PriorityList) -> Vec<PathBuf> {
    headers.sort_by_key(|header| priority.rank(header));
    headers
}
