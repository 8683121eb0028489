//! Integration tests for the maixbind generate pipeline

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use maixbind::cli::ExitCode;
use maixbind::cli::commands::{GenerateRequest, generate_with};
use maixbind::config::BindingConfig;
use maixbind::frontend::{
    ApiNode, ApiTree, Class, Func, HeaderParser, Module, ParseError, ParseOutcome, Var,
};
use tempfile::TempDir;

/// Parser stub answering from a table keyed by header file name
#[derive(Default)]
struct FragmentParser {
    fragments: HashMap<String, (ApiTree, Vec<String>)>,
    seen: Vec<PathBuf>,
}

impl FragmentParser {
    fn with(mut self, header: &str, module: Module, keys: &[&str]) -> Self {
        let fragment = ApiTree::new().with_member("maix", module);
        self.fragments
            .insert(header.to_string(), (fragment, keys.iter().map(|k| k.to_string()).collect()));
        self
    }

    fn seen_names(&self) -> Vec<String> {
        self.seen
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }
}

impl HeaderParser for FragmentParser {
    fn parse(&mut self, header: &Path, mut tree: ApiTree) -> Result<ParseOutcome, ParseError> {
        self.seen.push(header.to_path_buf());
        let name = header.file_name().unwrap().to_string_lossy().into_owned();
        match self.fragments.get(&name) {
            Some((fragment, keys)) => {
                tree.merge(fragment.clone());
                Ok(ParseOutcome {
                    tree,
                    contributed: true,
                    keys: keys.iter().cloned().collect::<BTreeSet<_>>(),
                })
            }
            None => Ok(ParseOutcome {
                tree,
                ..ParseOutcome::default()
            }),
        }
    }
}

/// SDK-like layout with a few headers, one of them under an excluded directory
fn sdk_layout() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for header in [
        "components/basic/include/maix_err.hpp",
        "components/vision/include/maix_image.hpp",
        "components/vision/include/maix_helpers.h",
        "components/3rd_party/json/json.hpp",
        "components/maix/headers_priority.txt",
    ] {
        let path = dir.path().join(header);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
    fs::write(dir.path().join("components/maix/headers_priority.txt"), "# first\nmaix_image.hpp\n").unwrap();
    dir
}

fn request(dir: &TempDir) -> GenerateRequest {
    GenerateRequest {
        vars: None,
        output: dir.path().join("build/maixpy_wrapper.cpp"),
        header_dirs: vec![dir.path().join("components")],
        priority: Some(dir.path().join("components/maix/headers_priority.txt")),
        parser: PathBuf::from("unused"),
        parser_args: Vec::new(),
        config: BindingConfig::default(),
    }
}

fn image_module() -> Module {
    Module::new("maix").with_member(
        "image",
        Module::new("image").with_doc("maix.image module").with_member(
            "Image",
            Class::new("Image")
                .with_member("__init__", Func::new("__init__", "void"))
                .with_member("width", Func::new("width", "int")),
        ),
    )
}

fn err_module() -> Module {
    Module::new("maix").with_member(
        "err",
        Module::new("err").with_member("check_raise", Func::new("check_raise", "void").with_static(true)),
    )
}

#[test]
fn test_generate_writes_bindings() {
    let dir = sdk_layout();
    let request = request(&dir);
    let mut parser = FragmentParser::default()
        .with("maix_image.hpp", image_module(), &["maix.image", "maix.image.Image"])
        .with("maix_err.hpp", err_module(), &["maix.err", "maix.err.check_raise"]);

    let code = generate_with(&request, &mut parser).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    // Priority header first, then discovery order; excluded directory never parsed
    assert_eq!(parser.seen_names(), vec!["maix_image.hpp", "maix_err.hpp", "maix_helpers.h"]);

    let source = fs::read_to_string(&request.output).unwrap();
    assert!(source.contains("#include \"maix_image.hpp\"\n#include \"maix_err.hpp\"\n"));
    assert!(!source.contains("maix_helpers.h"), "non-contributing header included");
    assert!(!source.contains("json.hpp"));
    assert!(source.contains("PYBIND11_MODULE(_maix, m) {"));
    assert!(source.contains("auto class_image_Image = py::class_<image::Image>(m_image, \"Image\");"));
    assert!(source.contains("class_image_Image.def(py::init<>());"));
}

#[test]
fn test_generate_from_vars_file() {
    let dir = sdk_layout();
    let vars = dir.path().join("vars.json");
    let include_dir = dir.path().join("components/basic/include");
    fs::write(&vars, serde_json::json!({ "includes": [include_dir] }).to_string()).unwrap();

    let mut request = request(&dir);
    request.vars = Some(vars);
    let mut parser = FragmentParser::default().with("maix_err.hpp", err_module(), &["maix.err"]);

    generate_with(&request, &mut parser).unwrap();
    assert_eq!(parser.seen_names(), vec!["maix_err.hpp"]);
    assert!(request.output.exists());
}

#[test]
fn test_conflict_writes_nothing() {
    let dir = sdk_layout();
    let request = request(&dir);
    let mut parser = FragmentParser::default()
        .with("maix_image.hpp", image_module(), &["maix.image"])
        .with("maix_err.hpp", err_module(), &["maix.image"]);

    let err = generate_with(&request, &mut parser).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(err.message.contains("multiple"), "{}", err.message);
    assert!(!request.output.exists());
}

#[test]
fn test_destructor_writes_nothing() {
    let dir = sdk_layout();
    let request = request(&dir);
    let module = Module::new("maix").with_member(
        "image",
        Module::new("image").with_member(
            "Image",
            Class::new("Image").with_member("__del__", Func::new("__del__", "void")),
        ),
    );
    let mut parser = FragmentParser::default().with("maix_image.hpp", module, &["maix.image"]);

    let err = generate_with(&request, &mut parser).unwrap_err();
    assert!(err.message.contains("__del__"), "{}", err.message);
    assert!(!request.output.exists());
}

#[test]
fn test_missing_root_writes_nothing() {
    let dir = sdk_layout();
    let mut request = request(&dir);
    request.config = BindingConfig::default().with_root_module("demo");
    let mut parser = FragmentParser::default().with("maix_err.hpp", err_module(), &["maix.err"]);

    let err = generate_with(&request, &mut parser).unwrap_err();
    assert!(err.message.contains("demo"), "{}", err.message);
    assert!(!request.output.exists());
}

#[test]
fn test_module_attribute_reaches_output() {
    let dir = sdk_layout();
    let request = request(&dir);
    let module = Module::new("maix").with_member(
        "app",
        Module::new("app").with_member("version", ApiNode::from(Var::new("version").with_readonly(true))),
    );
    let mut parser = FragmentParser::default().with("maix_err.hpp", module, &["maix.app.version"]);

    generate_with(&request, &mut parser).unwrap();
    let source = fs::read_to_string(&request.output).unwrap();
    assert!(source.contains("m_app.attr(\"version\") = app::version;"), "{}", source);
}

/// External parser program driven through `sh`
#[cfg(unix)]
mod process_parser {
    use super::*;
    use maixbind::frontend::ProcessParser;

    #[test]
    fn test_generate_with_process_parser() {
        let dir = sdk_layout();
        let script = dir.path().join("parser.sh");
        fs::write(
            &script,
            r#"case "$1" in
  *maix_err.hpp)
    echo '{"tree": {"members": {"maix": {"type": "module", "name": "maix", "members": {"err": {"type": "module", "name": "err", "doc": "maix.err module"}}}}}, "updated": true, "keys": ["maix.err"]}'
    ;;
  *)
    echo '{"tree": {}, "updated": false, "keys": []}'
    ;;
esac
"#,
        )
        .unwrap();

        let request = request(&dir);
        let mut parser = ProcessParser::new("sh", "maixpy").with_args([script.to_string_lossy().into_owned()]);

        generate_with(&request, &mut parser).unwrap();
        let source = fs::read_to_string(&request.output).unwrap();
        assert!(source.contains("#include \"maix_err.hpp\"\n\n#include \"maixpy.hpp\""), "{}", source);
        assert!(source.contains("auto m_err = m.def_submodule(\"err\", \"maix.err module\");"));
    }
}
