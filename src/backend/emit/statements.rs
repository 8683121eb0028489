//! Binding statement records
//!
//! Each variant is one pybind11 registration. Records stay structured until [`Statement::lines`] renders them, so
//! emission rules can be checked field by field instead of by matching generated text.

use std::fmt;

/// Return value policy for a bound function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnPolicy {
    /// Python only observes a value owned elsewhere.
    Reference,
    /// Python takes ownership of the returned value.
    TakeOwnership,
}

impl ReturnPolicy {
    /// A return type ending in `&` returns by reference; anything else hands ownership to Python.
    pub fn for_return_type(ret_type: &str) -> Self {
        if ret_type.trim_end().ends_with('&') {
            ReturnPolicy::Reference
        } else {
            ReturnPolicy::TakeOwnership
        }
    }
}

impl fmt::Display for ReturnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnPolicy::Reference => write!(f, "py::return_value_policy::reference"),
            ReturnPolicy::TakeOwnership => write!(f, "py::return_value_policy::take_ownership"),
        }
    }
}

/// Member accessor flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// One `py::arg(...)` spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub default: Option<String>,
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "py::arg(\"{}\") = {}", self.name, default),
            None => write!(f, "py::arg(\"{}\")", self.name),
        }
    }
}

/// Function pointer type used to pick one overload: `ret (Class::*)(args...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub ret_type: String,
    /// Class of the implicit receiver for instance methods.
    pub receiver: Option<String>,
    pub arg_types: Vec<String>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = match &self.receiver {
            Some(class) => format!("{class}::*"),
            None => "*".to_string(),
        };
        write!(f, "{} ({})({})", self.ret_type, pointer, self.arg_types.join(", "))
    }
}

/// One registration inside an enum group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueSpec {
    pub name: String,
    pub target: String,
}

/// A single binding statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `m.doc() = "..."`
    ModuleDoc { handle: String, doc: String },
    /// `auto m_x = m.def_submodule("x", "...")`
    Submodule {
        handle: String,
        parent: String,
        name: String,
        doc: String,
    },
    /// `auto class_x_C = py::class_<x::C>(m_x, "C")`
    Class {
        handle: String,
        parent: String,
        cpp_type: String,
        name: String,
    },
    /// `.def(py::init<...>(), py::arg(...))`
    Constructor {
        parent: String,
        arg_types: Vec<String>,
        args: Vec<ArgSpec>,
    },
    /// `__iter__` over `begin()`/`end()`, keeping the container alive while the iterator lives.
    Iterator { parent: String, cpp_type: String },
    /// `.def(...)` / `.def_static(...)` for a named function.
    Function {
        parent: String,
        is_static: bool,
        name: String,
        signature: Signature,
        target: String,
        policy: ReturnPolicy,
        doc: String,
        args: Vec<ArgSpec>,
    },
    /// `.def_readonly(...)` / `.def_readwrite(...)` and their static forms.
    Member {
        parent: String,
        name: String,
        access: Access,
        is_static: bool,
        target: String,
    },
    /// `m.attr("x") = ...` for namespace-level variables.
    Attribute {
        parent: String,
        name: String,
        target: String,
    },
    /// `py::enum_<...>(...)` followed by one `.value(...)` per value and a closing `;`.
    Enum {
        parent: String,
        cpp_type: String,
        name: String,
        values: Vec<EnumValueSpec>,
    },
}

impl Statement {
    /// Handle this statement registers into.
    pub fn parent(&self) -> &str {
        match self {
            Statement::ModuleDoc { handle, .. } => handle,
            Statement::Submodule { parent, .. }
            | Statement::Class { parent, .. }
            | Statement::Constructor { parent, .. }
            | Statement::Iterator { parent, .. }
            | Statement::Function { parent, .. }
            | Statement::Member { parent, .. }
            | Statement::Attribute { parent, .. }
            | Statement::Enum { parent, .. } => parent,
        }
    }

    /// Handle this statement declares, if any.
    pub fn declared_handle(&self) -> Option<&str> {
        match self {
            Statement::Submodule { handle, .. } | Statement::Class { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// Render as source lines, without the surrounding indentation.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Statement::ModuleDoc { handle, doc } => vec![format!("{handle}.doc() = \"{doc}\";")],
            Statement::Submodule {
                handle,
                parent,
                name,
                doc,
            } => vec![format!("auto {handle} = {parent}.def_submodule(\"{name}\", \"{doc}\");")],
            Statement::Class {
                handle,
                parent,
                cpp_type,
                name,
            } => vec![format!("auto {handle} = py::class_<{cpp_type}>({parent}, \"{name}\");")],
            Statement::Constructor {
                parent,
                arg_types,
                args,
            } => vec![format!(
                "{parent}.def(py::init<{}>(){});",
                arg_types.join(", "),
                arg_clause(args)
            )],
            Statement::Iterator { parent, cpp_type } => vec![format!(
                "{parent}.def(\"__iter__\", []({cpp_type} &c){{return py::make_iterator(c.begin(), c.end());}}, py::keep_alive<0, 1>());"
            )],
            Statement::Function {
                parent,
                is_static,
                name,
                signature,
                target,
                policy,
                doc,
                args,
            } => vec![format!(
                "{parent}.def{}(\"{name}\", static_cast<{signature}>({target}), {policy}, \"{doc}\"{});",
                if *is_static { "_static" } else { "" },
                arg_clause(args)
            )],
            Statement::Member {
                parent,
                name,
                access,
                is_static,
                target,
            } => {
                let method = match access {
                    Access::ReadOnly => "def_readonly",
                    Access::ReadWrite => "def_readwrite",
                };
                let suffix = if *is_static { "_static" } else { "" };
                vec![format!("{parent}.{method}{suffix}(\"{name}\", {target});")]
            }
            Statement::Attribute { parent, name, target } => vec![format!("{parent}.attr(\"{name}\") = {target};")],
            Statement::Enum {
                parent,
                cpp_type,
                name,
                values,
            } => {
                let mut lines = Vec::with_capacity(values.len() + 2);
                lines.push(format!("py::enum_<{cpp_type}>({parent}, \"{name}\")"));
                for value in values {
                    lines.push(format!("    .value(\"{}\", {})", value.name, value.target));
                }
                lines.push(";".to_string());
                lines
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// `, py::arg("a"), py::arg("b") = 1`, or nothing when there are no parameters.
fn arg_clause(args: &[ArgSpec]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let specs: Vec<String> = args.iter().map(ToString::to_string).collect();
    format!(", {}", specs.join(", "))
}

/// Escape text for a C++ string literal.
pub fn escape_doc(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    for c in doc.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
