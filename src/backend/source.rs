//! Render the generated binding source
//!
//! Wraps emitted statements in the fixed translation-unit template: banner, pybind11 includes, the headers that
//! contributed API (basenames only), the umbrella header, namespace directives, and the `PYBIND11_MODULE` body.

use std::path::Path;

use super::cpp_emitter::CppEmitter;
use super::emit::{ROOT_HANDLE, Statement};
use crate::config::BindingConfig;

/// Render the complete source file.
pub fn render_source<P: AsRef<Path>>(config: &BindingConfig, headers: &[P], statements: &[Statement]) -> String {
    let mut out = CppEmitter::new();

    out.comment("This file is generated by maixbind,");
    out.comment("!! DO NOT edit this file manually");
    out.blank_line();

    for include in &config.system_includes {
        out.include_system(include);
    }
    out.blank_line();

    if !headers.is_empty() {
        for header in headers {
            let header = header.as_ref();
            let basename = header.file_name().unwrap_or(header.as_os_str()).to_string_lossy();
            out.include_local(&basename);
        }
        out.blank_line();
    }

    out.include_local(&config.umbrella_header);
    out.blank_line();

    if !config.namespaces.is_empty() {
        for namespace in &config.namespaces {
            out.using_namespace(namespace);
        }
        out.blank_line();
    }

    out.line("namespace py = pybind11;");
    out.blank_line();

    out.block(&format!("PYBIND11_MODULE({}, {})", config.extension_name, ROOT_HANDLE), |body| {
        for statement in statements {
            for line in statement.lines() {
                body.line(&line);
            }
        }
    });

    out.finish()
}
