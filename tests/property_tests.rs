//! Property-based tests for maixbind
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::collections::HashSet;
use std::path::PathBuf;

use maixbind::backend::{BindingEmitter, EmitError, Statement};
use maixbind::config::BindingConfig;
use maixbind::frontend::{
    ApiNode, ApiTree, Arg, Class, Enum, Func, Members, Module, PriorityList, Var, sort_headers,
};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

fn leaf() -> impl Strategy<Value = ApiNode> {
    prop_oneof![
        (any::<bool>(), any::<bool>())
            .prop_map(|(readonly, is_static)| Var::new("v").with_readonly(readonly).with_static(is_static).into()),
        (
            "(int|void|std::string)( &)?",
            any::<bool>(),
            vec(("int|float|const char \\*", "[a-z]{1,5}", proptest::option::of("[0-9]{1,3}")), 0..3),
        )
            .prop_map(|(ret_type, is_static, args)| {
                let mut func = Func::new("f", ret_type).with_static(is_static);
                for (ty, name, default) in args {
                    let arg = Arg::new(ty, name);
                    func = func.with_arg(match default {
                        Some(default) => arg.with_default(default),
                        None => arg,
                    });
                }
                func.into()
            }),
        vec("[A-Z]{1,4}", 0..4).prop_map(|names| {
            names
                .into_iter()
                .fold(Enum::new("E"), |e, name| e.with_value(name, "0"))
                .into()
        }),
    ]
}

fn members_of(entries: Vec<(String, ApiNode)>) -> Members {
    entries.into_iter().collect()
}

fn node() -> impl Strategy<Value = ApiNode> {
    leaf().prop_recursive(3, 48, 4, |inner| {
        prop_oneof![
            vec((key(), inner.clone()), 0..4).prop_map(|entries| {
                let mut module = Module::new("mod");
                module.members = members_of(entries);
                module.into()
            }),
            vec((key(), inner), 0..4).prop_map(|entries| {
                let mut class = Class::new("Cls");
                class.members = members_of(entries);
                class.into()
            }),
        ]
    })
}

fn root() -> impl Strategy<Value = Module> {
    vec((key(), node()), 0..5).prop_map(|entries| {
        let mut module = Module::new("maix");
        module.members = members_of(entries);
        module
    })
}

fn count_nodes(members: &Members) -> usize {
    members
        .iter()
        .map(|(_, node)| 1 + node.members().map_or(0, count_nodes))
        .sum()
}

fn emit(root: Module) -> Result<Vec<Statement>, EmitError> {
    let tree = ApiTree::new().with_member("maix", root);
    BindingEmitter::new(&BindingConfig::default()).emit(&tree)
}

// =============================================================================
// Emission Properties
// =============================================================================

proptest! {
    /// Property: one statement per node, plus the module doc statement
    #[test]
    fn one_statement_per_node(root in root()) {
        let expected = 1 + count_nodes(&root.members);
        let statements = emit(root).expect("emission should succeed");
        prop_assert_eq!(statements.len(), expected);
    }

    /// Property: handles are unique and declared before they are used
    #[test]
    fn handles_unique_and_declared_before_use(root in root()) {
        let statements = emit(root).expect("emission should succeed");
        let mut declared: HashSet<String> = HashSet::from(["m".to_string()]);
        for statement in &statements {
            prop_assert!(declared.contains(statement.parent()), "{} used before declaration", statement.parent());
            if let Some(handle) = statement.declared_handle() {
                prop_assert!(declared.insert(handle.to_string()), "handle {} declared twice", handle);
            }
        }
    }

    /// Property: emission is deterministic
    #[test]
    fn emission_is_deterministic(root in root()) {
        let first = emit(root.clone()).expect("emission should succeed");
        let second = emit(root).expect("emission should succeed");
        prop_assert_eq!(first, second);
    }

    /// Property: a destructor anywhere aborts emission
    #[test]
    fn destructor_always_rejected(mut root in root(), depth in 0usize..4, in_class in any::<bool>()) {
        let destructor = Func::new("__del__", "void");
        let mut container: ApiNode = if in_class {
            Class::new("Holder").with_member("__del__", destructor).into()
        } else {
            Module::new("holder").with_member("__del__", destructor).into()
        };
        for level in 0..depth {
            container = Module::new(format!("level{level}")).with_member("inner", container).into();
        }
        root.members.insert("zz_holder", container);

        let result = emit(root);
        let is_unsupported = matches!(result, Err(EmitError::Unsupported { ref name, .. }) if name == "__del__");
        prop_assert!(is_unsupported);
    }
}

// =============================================================================
// Header Ordering Properties
// =============================================================================

proptest! {
    /// Property: sorting is a permutation with listed headers first, in list order
    #[test]
    fn sort_headers_respects_priority(
        names in vec("[a-f]\\.h", 0..10),
        listed in vec("[a-f]\\.h", 0..4),
    ) {
        let headers: Vec<PathBuf> = names.iter().enumerate().map(|(i, n)| PathBuf::from(format!("dir{i}/{n}"))).collect();
        let priority: PriorityList = listed.iter().cloned().collect();
        let sorted = sort_headers(headers.clone(), &priority);

        let mut a = headers.clone();
        let mut b = sorted.clone();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);

        let ranks: Vec<usize> = sorted.iter().map(|h| priority.rank(h)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));

        // Equal ranks keep their original relative order
        for pair in sorted.windows(2) {
            if priority.rank(&pair[0]) == priority.rank(&pair[1]) {
                let i = headers.iter().position(|h| h == &pair[0]).unwrap();
                let j = headers.iter().position(|h| h == &pair[1]).unwrap();
                prop_assert!(i < j);
            }
        }
    }
}

#[test]
fn sort_headers_example() {
    let priority: PriorityList = ["b.h", "a.h"].into_iter().collect();
    let sorted = sort_headers(vec!["a.h".into(), "c.h".into(), "b.h".into()], &priority);
    assert_eq!(sorted, vec![PathBuf::from("b.h"), PathBuf::from("a.h"), PathBuf::from("c.h")]);
}
