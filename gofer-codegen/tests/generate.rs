//! End-to-end tests for generating Go files through a plugin.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use gofer_codegen::{
    Config, Error, ExternalFormatter, FsWriter, GoIdent, OutputWriter, Package, Plugin,
    StandardLibrary, fragments,
};
use tempfile::TempDir;

fn plugin() -> Plugin {
    Plugin::with_stdlib(
        Config::default(),
        StandardLibrary::from_roots(["fmt", "net", "strings"]),
    )
}

fn no_header() -> Config {
    Config {
        header: None,
        ..Config::default()
    }
}

/// Keeps written files in memory.
#[derive(Default)]
struct MemoryWriter {
    files: Vec<(PathBuf, Vec<u8>)>,
}

impl OutputWriter for MemoryWriter {
    fn write(
        &mut self,
        directory: &Path,
        filename: &str,
        bytes: &[u8],
    ) -> gofer_codegen::Result<PathBuf> {
        let path = directory.join(filename);
        self.files.push((path.clone(), bytes.to_vec()));
        Ok(path)
    }
}

impl MemoryWriter {
    fn text(&self, path: &str) -> String {
        let (_, bytes) = self
            .files
            .iter()
            .find(|(p, _)| p == Path::new(path))
            .expect("file not written");
        String::from_utf8(bytes.clone()).unwrap()
    }
}

/// A formatter that is never installed.
struct MissingFormatter;

impl ExternalFormatter for MissingFormatter {
    fn name(&self) -> &str {
        "goimports"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn format(&self, _paths: &[PathBuf]) -> gofer_codegen::Result<()> {
        Err(Error::formatter_unavailable("goimports", self.remediation()))
    }

    fn remediation(&self) -> String {
        "install it with `go install golang.org/x/tools/cmd/goimports@latest`".to_string()
    }
}

/// A formatter that records what it was asked to format.
#[derive(Default)]
struct RecordingFormatter {
    paths: RefCell<Vec<PathBuf>>,
    missing: bool,
}

impl ExternalFormatter for RecordingFormatter {
    fn name(&self) -> &str {
        "recorder"
    }

    fn is_available(&self) -> bool {
        !self.missing
    }

    fn format(&self, paths: &[PathBuf]) -> gofer_codegen::Result<()> {
        self.paths.borrow_mut().extend_from_slice(paths);
        Ok(())
    }

    fn remediation(&self) -> String {
        String::new()
    }
}

#[test]
fn test_generated_file_with_colliding_packages() {
    let mut plugin = plugin();
    let file = plugin.new_file("main.go", "cmd/app", &[Package::new("fmt")]);

    let println = GoIdent::new("fmt", "Println");
    let a = GoIdent::new("example.com/a/x", "A");
    let b = GoIdent::new("example.com/b/x", "B");
    let c = GoIdent::new("example.com/c/x", "C");

    file.write(["package main"]);
    file.write(["func main() {"]);
    file.write(fragments!["\t", &println, "(", &a, ", ", &b, ", ", &c, ")"]);
    file.write(["}"]);

    let mut writer = MemoryWriter::default();
    plugin.output(&mut writer, None).unwrap();

    insta::assert_snapshot!(writer.text("cmd/app/main.go"), @r#"
// Code generated by gofer. DO NOT EDIT.

package main

import (
	"fmt"
	"example.com/a/x"
	x1 "example.com/b/x"
	x2 "example.com/c/x"
)

func main() {
	fmt.Println(x.A, x1.B, x2.C)
}
"#);
}

#[test]
fn test_standard_packages_sorted_first() {
    let mut plugin = Plugin::with_stdlib(no_header(), StandardLibrary::from_roots(["fmt"]));
    let file = plugin.new_file(
        "lib.go",
        "",
        &[
            Package::new("fmt"),
            Package::new("example.com/z"),
            Package::new("example.com/a"),
        ],
    );
    file.write(["package lib"]);

    let bytes = file.content().unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "package lib\n\nimport (\n\t\"fmt\"\n\t\"example.com/a\"\n\t\"example.com/z\"\n)\n"
    );
}

#[test]
fn test_imports_follow_package_line_comment() {
    let mut plugin = Plugin::with_stdlib(no_header(), StandardLibrary::empty());
    let file = plugin.new_file("doc.go", "", &[]);
    let ident = GoIdent::new("example.com/proto", "Version");
    file.write(["package api // import \"example.com/api\""]);
    file.write(["// Version is the protocol version."]);
    file.write(fragments!["const Version = ", &ident]);

    insta::assert_snapshot!(String::from_utf8(file.content().unwrap()).unwrap(), @r#"
package api // import "example.com/api"

import (
	"example.com/proto"
)

// Version is the protocol version.
const Version = proto.Version
"#);
}

#[test]
fn test_header_only_on_go_files() {
    let mut plugin = plugin();
    plugin.new_file("main.go", "", &[]).write(["package main"]);
    plugin.new_file("go.mod", "", &[]).write(["module example.com/app"]);

    let mut writer = MemoryWriter::default();
    plugin.output(&mut writer, None).unwrap();

    assert!(writer.text("main.go").starts_with("// Code generated by gofer. DO NOT EDIT.\n\npackage main"));
    assert_eq!(writer.text("go.mod"), "module example.com/app\n");
}

#[test]
fn test_new_file_returns_existing_file() {
    let mut plugin = plugin();
    plugin.new_file("main.go", "pkg", &[]).write(["package main"]);
    plugin
        .new_file("main.go", "pkg", &[Package::new("strings")])
        .write(["var _ = strings.ToUpper"]);

    assert_eq!(plugin.files().count(), 1);
    let file = plugin.files().next().unwrap();
    assert!(file.registry().get("strings").is_some());
    assert!(file.buffer().ends_with("package main\nvar _ = strings.ToUpper\n"));
}

#[test]
fn test_registries_are_per_file() {
    let mut plugin = plugin();
    let a = GoIdent::new("example.com/a/x", "A");
    let b = GoIdent::new("example.com/b/x", "B");

    assert_eq!(plugin.new_file("a.go", "", &[]).qualify(&a), "x.A");
    assert_eq!(plugin.new_file("b.go", "", &[]).qualify(&b), "x.B");
}

#[test]
fn test_passthrough_keeps_malformed_content() {
    let mut plugin = plugin();
    let file = plugin.new_file("template.go.tmpl", "", &[Package::new("fmt")]);
    file.write(["package {{ .Name }"]);
    assert_eq!(file.content().unwrap(), b"package {{ .Name }\n");
}

#[test]
fn test_syntax_error_fails_whole_batch() {
    let mut plugin = plugin();
    plugin.new_file("good.go", "", &[]).write(["package good"]);
    plugin
        .new_file("bad.go", "", &[])
        .write(["package bad\n\nfunc broken( {\n}"]);
    plugin.new_file("later.go", "", &[]).write(["package later"]);

    let mut writer = MemoryWriter::default();
    let err = plugin.output(&mut writer, None).unwrap_err();

    assert!(writer.files.is_empty());
    let Error::Syntax {
        filename, listing, ..
    } = *err
    else {
        panic!("expected a syntax error");
    };
    assert_eq!(filename, "bad.go");
    assert_eq!(
        listing,
        "    1\t// Code generated by gofer. DO NOT EDIT.\n    2\t\n    3\tpackage bad\n    4\t\n    5\tfunc broken( {\n    6\t}\n"
    );
}

#[test]
fn test_missing_formatter_is_a_warning() {
    let mut plugin = plugin();
    plugin.new_file("main.go", "", &[]).write(["package main"]);

    let mut writer = MemoryWriter::default();
    let summary = plugin
        .output(&mut writer, Some(&MissingFormatter))
        .unwrap();

    assert_eq!(summary.written, vec![PathBuf::from("main.go")]);
    assert!(!summary.formatted);
    assert!(summary.has_warnings());
    let warning = summary
        .diagnostics
        .iter()
        .find(|diagnostic| diagnostic.severity.is_warning())
        .unwrap();
    assert_eq!(warning.stage, "format");
    assert_eq!(warning.message, "goimports is not available");
    assert_eq!(
        warning.help.as_deref(),
        Some("install it with `go install golang.org/x/tools/cmd/goimports@latest`")
    );
}

#[test]
fn test_formatter_receives_only_go_files() {
    let mut plugin = plugin();
    plugin.new_file("main.go", "cmd", &[]).write(["package main"]);
    plugin.new_file("README.md", "", &[]).write(["# demo"]);

    let formatter = RecordingFormatter::default();
    let mut writer = MemoryWriter::default();
    let summary = plugin.output(&mut writer, Some(&formatter)).unwrap();

    assert!(summary.formatted);
    assert_eq!(summary.written.len(), 2);
    assert_eq!(*formatter.paths.borrow(), vec![PathBuf::from("cmd/main.go")]);
    let messages: Vec<_> = summary
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.to_string())
        .collect();
    assert_eq!(
        messages,
        vec!["info: wrote 2 files", "info: formatted 1 files with recorder"]
    );
}

#[test]
fn test_unavailable_formatter_is_not_run() {
    let mut plugin = plugin();
    plugin.new_file("main.go", "", &[]).write(["package main"]);

    let formatter = RecordingFormatter {
        missing: true,
        ..RecordingFormatter::default()
    };
    let mut writer = MemoryWriter::default();
    let summary = plugin.output(&mut writer, Some(&formatter)).unwrap();

    assert!(formatter.paths.borrow().is_empty());
    assert!(!summary.formatted);
    assert!(summary.has_warnings());
    assert_eq!(writer.files.len(), 1);
}

#[test]
fn test_writes_to_disk() {
    let temp = TempDir::new().unwrap();
    let mut plugin = plugin();
    let file = plugin.new_file("server.go", "internal/server", &[]);
    let listen = GoIdent::new("net/http", "ListenAndServe");
    file.write(["package server"]);
    file.write(fragments!["var listen = ", &listen]);

    let mut writer = FsWriter::new(temp.path());
    let summary = plugin.output(&mut writer, None).unwrap();

    let path = temp.path().join("internal/server/server.go");
    assert_eq!(summary.written, vec![path.clone()]);
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("import (\n\t\"net/http\"\n)\n"));
    assert!(written.ends_with("var listen = http.ListenAndServe\n"));
}

#[test]
fn test_authoritative_policy_from_config() {
    let config = Config::from_toml("alias-policy = \"authoritative\"\nheader = \"\"\n", "gofer.toml").unwrap();
    let mut plugin = Plugin::with_stdlib(config, StandardLibrary::empty());
    let file = plugin.new_file("a.go", "", &[Package::new("example.com/pb")]);
    let message = GoIdent::new(Package::new("example.com/proto").alias("pb"), "Message");
    assert_eq!(file.qualify(&message), "pb.Message");
}
