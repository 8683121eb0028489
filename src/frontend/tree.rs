//! API tree model
//!
//! The header parser describes the exposed C/C++ API as a nested tree of modules, classes, functions, variables and
//! enums. This module gives that tree a typed shape: one variant per node kind, each carrying only its own fields.
//!
//! ## Notes
//!
//! - The JSON shape is the one the upstream parser tool emits: every node is an object with a `"type"` tag.
//! - Member order is preserved exactly as it appears in the input. Emission order (and therefore the validity of the
//!   generated source) depends on it.
//! - `args` and enum `values` are positional arrays (`[type, name, default]`, `[name, value, comment]`).

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// The accumulated API tree: the top-level members declared across all headers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiTree {
    #[serde(default)]
    pub members: Members,
}

impl ApiTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a top-level entry by key.
    pub fn get(&self, key: &str) -> Option<&ApiNode> {
        self.members.get(key)
    }

    /// Add a top-level entry, builder style.
    pub fn with_member(mut self, key: impl Into<String>, node: impl Into<ApiNode>) -> Self {
        self.members.insert(key, node.into());
        self
    }

    /// Fold another tree into this one.
    ///
    /// Modules present in both trees are merged member by member; any other entry is replaced in place.
    pub fn merge(&mut self, other: ApiTree) {
        self.members.merge(other.members);
    }
}

/// Ordered mapping from identifier to child node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Members(Vec<(String, ApiNode)>);

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, replacing an existing one with the same key without changing its position.
    pub fn insert(&mut self, key: impl Into<String>, node: ApiNode) -> Option<ApiNode> {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, node));
        }
        self.0.push((key, node));
        None
    }

    pub fn get(&self, key: &str) -> Option<&ApiNode> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ApiNode> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    /// Iterate members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ApiNode)> {
        self.0.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `other` into `self`; see [`ApiTree::merge`].
    pub fn merge(&mut self, other: Members) {
        for (key, incoming) in other.0 {
            match (self.get_mut(&key), incoming) {
                (Some(ApiNode::Module(existing)), ApiNode::Module(incoming)) => {
                    if existing.doc.resolve().is_empty() {
                        existing.doc = incoming.doc;
                    }
                    existing.members.merge(incoming.members);
                }
                (_, incoming) => {
                    self.insert(key, incoming);
                }
            }
        }
    }
}

impl FromIterator<(String, ApiNode)> for Members {
    fn from_iter<I: IntoIterator<Item = (String, ApiNode)>>(iter: I) -> Self {
        let mut members = Members::new();
        for (key, node) in iter {
            members.insert(key, node);
        }
        members
    }
}

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of API members")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Members, A::Error> {
                let mut members = Members::new();
                while let Some((key, node)) = map.next_entry::<String, ApiNode>()? {
                    members.insert(key, node);
                }
                Ok(members)
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// Node kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    Class,
    Func,
    Var,
    Enum,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Module => write!(f, "module"),
            NodeKind::Class => write!(f, "class"),
            NodeKind::Func => write!(f, "func"),
            NodeKind::Var => write!(f, "var"),
            NodeKind::Enum => write!(f, "enum"),
        }
    }
}

/// One node of the API tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiNode {
    Module(Module),
    Class(Class),
    Func(Func),
    Var(Var),
    Enum(Enum),
}

impl ApiNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            ApiNode::Module(_) => NodeKind::Module,
            ApiNode::Class(_) => NodeKind::Class,
            ApiNode::Func(_) => NodeKind::Func,
            ApiNode::Var(_) => NodeKind::Var,
            ApiNode::Enum(_) => NodeKind::Enum,
        }
    }

    /// Declared identifier (may differ from the key the node is stored under).
    pub fn name(&self) -> &str {
        match self {
            ApiNode::Module(m) => &m.name,
            ApiNode::Class(c) => &c.name,
            ApiNode::Func(f) => &f.name,
            ApiNode::Var(v) => &v.name,
            ApiNode::Enum(e) => &e.name,
        }
    }

    pub fn doc(&self) -> &Doc {
        match self {
            ApiNode::Module(m) => &m.doc,
            ApiNode::Class(c) => &c.doc,
            ApiNode::Func(f) => &f.doc,
            ApiNode::Var(v) => &v.doc,
            ApiNode::Enum(e) => &e.doc,
        }
    }

    /// Children of a container node (modules and classes).
    pub fn members(&self) -> Option<&Members> {
        match self {
            ApiNode::Module(m) => Some(&m.members),
            ApiNode::Class(c) => Some(&c.members),
            _ => None,
        }
    }
}

/// Documentation attached to a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Doc {
    Text(String),
    Rich {
        #[serde(default)]
        brief: String,
        #[serde(default)]
        py_doc: Option<String>,
    },
}

impl Default for Doc {
    fn default() -> Self {
        Doc::Text(String::new())
    }
}

impl Doc {
    /// The documentation string to expose: `py_doc` when present and non-empty, then `brief`.
    pub fn resolve(&self) -> &str {
        match self {
            Doc::Text(text) => text,
            Doc::Rich { brief, py_doc } => match py_doc.as_deref() {
                Some(doc) if !doc.is_empty() => doc,
                _ => brief,
            },
        }
    }
}

impl From<&str> for Doc {
    fn from(text: &str) -> Self {
        Doc::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: Doc,
    #[serde(default)]
    pub members: Members,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<Doc>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_member(mut self, key: impl Into<String>, node: impl Into<ApiNode>) -> Self {
        self.members.insert(key, node.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Class {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: Doc,
    #[serde(default)]
    pub members: Members,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<Doc>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_member(mut self, key: impl Into<String>, node: impl Into<ApiNode>) -> Self {
        self.members.insert(key, node.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Func {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: Doc,
    /// Parameters in declaration order.
    #[serde(default)]
    pub args: Vec<Arg>,
    /// Return type as written in the header; a trailing `&` means return by reference.
    #[serde(default)]
    pub ret_type: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl Func {
    pub fn new(name: impl Into<String>, ret_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ret_type: ret_type.into(),
            ..Self::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<Doc>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// A function parameter: `[type, name, default]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String, Option<LiteralText>)")]
pub struct Arg {
    pub ty: String,
    pub name: String,
    /// Literal text of the default value, if any.
    pub default: Option<String>,
}

impl Arg {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl From<(String, String, Option<LiteralText>)> for Arg {
    fn from((ty, name, default): (String, String, Option<LiteralText>)) -> Self {
        Self {
            ty,
            name,
            default: default.map(LiteralText::into_text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Var {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: Doc,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Enum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: Doc,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value: value.into(),
            comment: String::new(),
        });
        self
    }
}

/// An enum value: `[name, value, comment]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Option<LiteralText>, Option<String>)")]
pub struct EnumValue {
    pub name: String,
    pub value: String,
    pub comment: String,
}

impl From<(String, Option<LiteralText>, Option<String>)> for EnumValue {
    fn from((name, value, comment): (String, Option<LiteralText>, Option<String>)) -> Self {
        Self {
            name,
            value: value.map(LiteralText::into_text).unwrap_or_default(),
            comment: comment.unwrap_or_default(),
        }
    }
}

/// A literal as the parser reports it; numbers and booleans are kept as source text.
///
/// Numbers stay a [`serde_json::Number`] so the full `u64` range survives and floats keep their fraction (`1.0`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralText {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl LiteralText {
    fn into_text(self) -> String {
        match self {
            LiteralText::Bool(b) => b.to_string(),
            LiteralText::Number(n) => n.to_string(),
            LiteralText::Text(s) => s,
        }
    }
}

impl From<Module> for ApiNode {
    fn from(node: Module) -> Self {
        ApiNode::Module(node)
    }
}

impl From<Class> for ApiNode {
    fn from(node: Class) -> Self {
        ApiNode::Class(node)
    }
}

impl From<Func> for ApiNode {
    fn from(node: Func) -> Self {
        ApiNode::Func(node)
    }
}

impl From<Var> for ApiNode {
    fn from(node: Var) -> Self {
        ApiNode::Var(node)
    }
}

impl From<Enum> for ApiNode {
    fn from(node: Enum) -> Self {
        ApiNode::Enum(node)
    }
}
