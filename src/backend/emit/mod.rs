//! Emit pybind11 binding statements from an API tree.
//!
//! This module defines [`BindingEmitter`], a depth-first walk over the tree that produces one [`Statement`] per node.
//!
//! ## Notes
//! - Statement order is traversal order. Later statements use handles declared by earlier ones, so the walk must never
//!   be reordered.
//! - The walk threads an immutable [`EmitContext`] down the tree; sibling subtrees never see each other's context.
//! - Qualified C++ paths start below the root module (`image::Image`, not `maix::image::Image`); the generated source
//!   opens the root namespace with `using namespace`.
//!
//! ## See also
//! - [`statements`]: statement records and rendering
//! - [`handles`]: handle variable naming

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod errors;
mod handles;
mod statements;


pub use errors::EmitError;
pub use handles::{HandleAllocator, ROOT_HANDLE};
pub use statements::{Access, ArgSpec, EnumValueSpec, ReturnPolicy, Signature, Statement, escape_doc};

use crate::config::BindingConfig;
use crate::frontend::tree::{ApiNode, ApiTree, Arg, Class, Enum, Func, Members, Module, Var};

/// Kind of the container currently being emitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Module,
    Class,
}

/// Where the walker currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EmitContext {
    /// Handle variable of the enclosing binding
    handle: String,
    /// Display name of the enclosing container
    name: String,
    kind: ContainerKind,
    /// Identifiers from below the root down to the enclosing container
    path: Vec<String>,
}

impl EmitContext {
    fn root(handle: &str, name: &str) -> Self {
        Self {
            handle: handle.to_string(),
            name: name.to_string(),
            kind: ContainerKind::Module,
            path: Vec::new(),
        }
    }

    /// Context for the children of `key`.
    fn enter(&self, handle: String, key: &str, kind: ContainerKind) -> Self {
        Self {
            handle,
            name: key.to_string(),
            kind,
            path: self.child_path(key),
        }
    }

    fn child_path(&self, key: &str) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(key.to_string());
        path
    }

    /// `a::b::key`
    fn qualify(&self, key: &str) -> String {
        self.child_path(key).join("::")
    }

    /// `a::b`, the enclosing container's own C++ path.
    fn container_path(&self) -> String {
        self.path.join("::")
    }
}

/// Emit binding statements from an API tree.
///
/// Single use: [`BindingEmitter::emit`] consumes the emitter so handle names never leak between runs.
#[derive(Debug)]
pub struct BindingEmitter<'a> {
    config: &'a BindingConfig,
    handles: HandleAllocator,
    statements: Vec<Statement>,
}

impl<'a> BindingEmitter<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self {
            config,
            handles: HandleAllocator::new(),
            statements: Vec::new(),
        }
    }

    /// Emit the statements for the whole tree, starting at the configured root module.
    #[tracing::instrument(skip_all, fields(root = %self.config.root_module))]
    pub fn emit(mut self, tree: &ApiTree) -> Result<Vec<Statement>, EmitError> {
        let root_key = self.config.root_module.as_str();
        let root = match tree.get(root_key) {
            Some(ApiNode::Module(module)) => module,
            Some(other) => {
                return Err(EmitError::RootNotModule {
                    root: root_key.to_string(),
                    kind: other.kind(),
                });
            }
            None => {
                return Err(EmitError::MissingRoot {
                    root: root_key.to_string(),
                });
            }
        };

        self.statements.push(Statement::ModuleDoc {
            handle: ROOT_HANDLE.to_string(),
            doc: escape_doc(root.doc.resolve()),
        });
        let ctx = EmitContext::root(ROOT_HANDLE, root_key);
        self.gen_members(&root.members, &ctx)?;

        tracing::debug!(statement_count = self.statements.len(), "emitted bindings");
        Ok(self.statements)
    }

    fn gen_members(&mut self, members: &Members, ctx: &EmitContext) -> Result<(), EmitError> {
        for (key, node) in members.iter() {
            tracing::trace!(key, kind = %node.kind(), container = %ctx.name, "emit");
            match node {
                ApiNode::Module(module) => self.emit_module(key, module, ctx)?,
                ApiNode::Class(class) => self.emit_class(key, class, ctx)?,
                ApiNode::Func(func) => self.emit_func(key, func, ctx)?,
                ApiNode::Var(var) => self.emit_var(key, var, ctx),
                ApiNode::Enum(e) => self.emit_enum(key, e, ctx),
            }
        }
        Ok(())
    }

    fn emit_module(&mut self, key: &str, module: &Module, ctx: &EmitContext) -> Result<(), EmitError> {
        let handle = self.handles.module(&ctx.child_path(key));
        self.statements.push(Statement::Submodule {
            handle: handle.clone(),
            parent: ctx.handle.clone(),
            name: key.to_string(),
            doc: escape_doc(module.doc.resolve()),
        });
        self.gen_members(&module.members, &ctx.enter(handle, key, ContainerKind::Module))
    }

    fn emit_class(&mut self, key: &str, class: &Class, ctx: &EmitContext) -> Result<(), EmitError> {
        let handle = self.handles.class(&ctx.child_path(key));
        self.statements.push(Statement::Class {
            handle: handle.clone(),
            parent: ctx.handle.clone(),
            cpp_type: ctx.qualify(key),
            name: key.to_string(),
        });
        self.gen_members(&class.members, &ctx.enter(handle, key, ContainerKind::Class))
    }

    fn emit_func(&mut self, key: &str, func: &Func, ctx: &EmitContext) -> Result<(), EmitError> {
        if key == "__del__" || func.name == "__del__" {
            return Err(EmitError::Unsupported {
                name: key.to_string(),
                container: ctx.name.clone(),
            });
        }

        let arg_types: Vec<String> = func.args.iter().map(|arg| arg.ty.clone()).collect();
        let args: Vec<ArgSpec> = func.args.iter().map(arg_spec).collect();

        let statement = match key {
            "__init__" => {
                tracing::trace!(class = %ctx.name, "constructor");
                Statement::Constructor {
                    parent: ctx.handle.clone(),
                    arg_types,
                    args,
                }
            }
            "__iter__" => Statement::Iterator {
                parent: ctx.handle.clone(),
                cpp_type: ctx.container_path(),
            },
            _ => {
                let symbol = if func.name.is_empty() { key } else { func.name.as_str() };
                let receiver = (ctx.kind == ContainerKind::Class && !func.is_static).then(|| ctx.container_path());
                let target = if ctx.path.is_empty() {
                    symbol.to_string()
                } else {
                    format!("&{}::{}", ctx.container_path(), symbol)
                };
                Statement::Function {
                    parent: ctx.handle.clone(),
                    is_static: func.is_static,
                    name: key.to_string(),
                    signature: Signature {
                        ret_type: func.ret_type.clone(),
                        receiver,
                        arg_types,
                    },
                    target,
                    policy: ReturnPolicy::for_return_type(&func.ret_type),
                    doc: escape_doc(func.doc.resolve()),
                    args,
                }
            }
        };
        self.statements.push(statement);
        Ok(())
    }

    fn emit_var(&mut self, key: &str, var: &Var, ctx: &EmitContext) {
        let statement = match ctx.kind {
            ContainerKind::Class => Statement::Member {
                parent: ctx.handle.clone(),
                name: key.to_string(),
                access: if var.readonly { Access::ReadOnly } else { Access::ReadWrite },
                is_static: var.is_static,
                target: format!("&{}", ctx.qualify(key)),
            },
            ContainerKind::Module => Statement::Attribute {
                parent: ctx.handle.clone(),
                name: key.to_string(),
                target: ctx.qualify(key),
            },
        };
        self.statements.push(statement);
    }

    fn emit_enum(&mut self, key: &str, e: &Enum, ctx: &EmitContext) {
        let cpp_type = ctx.qualify(key);
        let values = e
            .values
            .iter()
            .map(|value| EnumValueSpec {
                name: value.name.clone(),
                target: format!("{}::{}", cpp_type, value.name),
            })
            .collect();
        self.statements.push(Statement::Enum {
            parent: ctx.handle.clone(),
            cpp_type,
            name: key.to_string(),
            values,
        });
    }
}

fn arg_spec(arg: &Arg) -> ArgSpec {
    ArgSpec {
        name: arg.name.clone(),
        default: arg.default.clone(),
    }
}
