//! Golden snapshot tests for codegen
//!
//! These tests generate binding source from `.json` API trees and compare
//! the output against stored snapshots. This ensures codegen changes are
//! reviewed and intentional.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use maixbind::backend::BindingCodegen;
use maixbind::config::BindingConfig;
use maixbind::frontend::ApiTree;
use std::fs;

/// Load an API tree from the codegen_snapshots directory
fn load_tree(name: &str) -> ApiTree {
    let path = format!("tests/codegen_snapshots/{}.json", name);
    let text = fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {}", path));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid API tree {}: {}", path, e))
}

/// Generate binding source with the default configuration
fn generate(name: &str, headers: &[&str]) -> String {
    let tree = load_tree(name);
    BindingCodegen::new(&BindingConfig::default())
        .generate(&tree, headers)
        .expect("codegen failed")
}

#[test]
fn test_image_module_codegen() {
    let source = generate(
        "image_module",
        &["components/basic/include/maix_err.hpp", "components/vision/include/maix_image.hpp"],
    );
    insta::assert_snapshot!("image_module", source);
}

#[test]
fn test_nested_peripherals_codegen() {
    let source = generate("nested_peripherals", &["maix_uart.hpp", "maix_app.hpp"]);
    insta::assert_snapshot!("nested_peripherals", source);
}
