//! Handle variable allocation
//!
//! Every submodule and class binding is stored in a local variable of the generated `PYBIND11_MODULE` body. Names are
//! derived from the node's qualified path (`m_image`, `class_image_Image`) so the output stays readable, and each name
//! is checked against every name handed out before. Paths that flatten to the same name (`a_b` + `c` vs `a` +
//! `b_c`) get a numeric suffix, in traversal order.

use std::collections::HashSet;

/// Handle of the extension module itself.
pub const ROOT_HANDLE: &str = "m";

#[derive(Debug, Clone)]
pub struct HandleAllocator {
    taken: HashSet<String>,
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self {
            taken: HashSet::from([ROOT_HANDLE.to_string()]),
        }
    }

    /// Handle for a submodule at `path`.
    pub fn module(&mut self, path: &[String]) -> String {
        self.claim(format!("m_{}", path.join("_")))
    }

    /// Handle for a class at `path`.
    pub fn class(&mut self, path: &[String]) -> String {
        self.claim(format!("class_{}", path.join("_")))
    }

    fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if self.taken.insert(candidate.clone()) {
                tracing::debug!(base = %base, handle = %candidate, "handle name collision, using suffix");
                return candidate;
            }
            n += 1;
        }
    }
}
