//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::backend::BindingCodegen;
use crate::config::BindingConfig;
use crate::frontend::{
    HeaderParser, PriorityList, ProcessParser, collect_api, discover_headers, headers_from_vars, sort_headers,
};

use super::{CliError, CliResult, ExitCode};

/// Everything one generator run needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Vars file listing include directories; replaces `header_dirs` when set
    pub vars: Option<PathBuf>,
    /// Generated source path
    pub output: PathBuf,
    /// Directories scanned for headers when no vars file is given
    pub header_dirs: Vec<PathBuf>,
    /// Header priority file
    pub priority: Option<PathBuf>,
    /// Header parser program
    pub parser: PathBuf,
    /// Arguments passed to the parser before the header path
    pub parser_args: Vec<String>,
    pub config: BindingConfig,
}

/// Run the whole pipeline with the external parser program.
pub fn generate(request: &GenerateRequest) -> CliResult<ExitCode> {
    let mut parser =
        ProcessParser::new(&request.parser, request.config.sdk.as_str()).with_args(request.parser_args.iter().cloned());
    generate_with(request, &mut parser)
}

/// Run the whole pipeline: discover → sort → parse and check → emit → write.
///
/// Nothing is written unless every stage succeeds.
pub fn generate_with<P>(request: &GenerateRequest, parser: &mut P) -> CliResult<ExitCode>
where
    P: HeaderParser + ?Sized,
{
    println!("-- Generate MaixPy C/C++ API");
    let started = Instant::now();

    let headers = match &request.vars {
        Some(vars) => headers_from_vars(vars),
        None => discover_headers(&request.header_dirs, &request.config.excluded_dirs),
    }
    .map_err(CliError::diagnostic)?;

    let priority = match &request.priority {
        Some(path) => PriorityList::load(path).map_err(CliError::diagnostic)?,
        None => PriorityList::default(),
    };
    let headers = sort_headers(headers, &priority);
    tracing::debug!(header_count = headers.len(), priority_count = priority.names().len(), "sorted headers");

    let collected = collect_api(&headers, parser).map_err(CliError::diagnostic)?;

    let source = BindingCodegen::new(&request.config)
        .generate(&collected.tree, &collected.headers)
        .map_err(CliError::diagnostic)?;

    write_output(&request.output, &source)?;

    tracing::info!(
        output = %request.output.display(),
        headers = collected.headers.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated bindings"
    );
    println!("-- Generate MaixPy C/C++ API done");
    Ok(ExitCode::SUCCESS)
}

/// Write the generated source, creating parent directories as needed.
fn write_output(output: &Path, source: &str) -> CliResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::failure(format!("Error creating directory {}: {}", parent.display(), e)))?;
    }
    fs::write(output, source).map_err(|e| CliError::failure(format!("Error writing {}: {}", output.display(), e)))
}
