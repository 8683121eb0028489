//! Frontend: from header files to an API tree
//!
//! - `tree`: typed API tree model
//! - `headers`: header discovery and priority ordering
//! - `parser`: the header parser seam and the external-process adapter
//! - `collect`: folds parsed headers into one tree, rejecting keys declared twice

pub mod collect;
pub mod headers;
pub mod parser;
pub mod tree;

pub use collect::{CollectError, CollectedApi, collect_api};
pub use headers::{HeaderError, PriorityList, discover_headers, headers_from_vars, sort_headers};
pub use parser::{HeaderParser, ParseError, ParseOutcome, ProcessParser};
pub use tree::{ApiNode, ApiTree, Arg, Class, Doc, Enum, EnumValue, Func, Members, Module, NodeKind, Var};
