//! Binding generation configuration
//!
//! Defaults reproduce the MaixPy layout: the `maix` root module compiled into the `_maix` extension.

/// Configuration for binding generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    /// Top-level tree key holding the root module
    pub root_module: String,
    /// Name of the compiled Python extension module
    pub extension_name: String,
    /// Umbrella header included after the per-component headers
    pub umbrella_header: String,
    /// Namespaces opened with `using namespace` in the generated source
    pub namespaces: Vec<String>,
    /// pybind11 headers included at the top of the generated source
    pub system_includes: Vec<String>,
    /// Directory names skipped during header discovery
    pub excluded_dirs: Vec<String>,
    /// SDK tag passed to the header parser
    pub sdk: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            root_module: "maix".to_string(),
            extension_name: "_maix".to_string(),
            umbrella_header: "maixpy.hpp".to_string(),
            namespaces: vec!["maix".to_string(), "maix::peripheral".to_string()],
            system_includes: [
                "pybind11/pybind11.h",
                "pybind11/stl.h",
                "pybind11/complex.h",
                "pybind11/functional.h",
                "pybind11/chrono.h",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            excluded_dirs: vec!["3rd_party".to_string()],
            sdk: "maixpy".to_string(),
        }
    }
}

impl BindingConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root module key
    pub fn with_root_module(mut self, root: impl Into<String>) -> Self {
        self.root_module = root.into();
        self
    }

    /// Set the extension module name
    pub fn with_extension_name(mut self, name: impl Into<String>) -> Self {
        self.extension_name = name.into();
        self
    }

    /// Set the umbrella header
    pub fn with_umbrella_header(mut self, header: impl Into<String>) -> Self {
        self.umbrella_header = header.into();
        self
    }

    /// Set the namespaces opened in the generated source
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Set the SDK tag passed to the parser
    pub fn with_sdk(mut self, sdk: impl Into<String>) -> Self {
        self.sdk = sdk.into();
        self
    }
}
