use clap::Parser;
use pathdedup::cli::Cli;
use pathdedup::document::Workspace;
use pathdedup::error::ExitCode;
use pathdedup::run_app;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TWO_SQUARES: &str = r#"{
  "documents": [{
    "name": "squares",
    "layers": [{
      "type": "layer",
      "children": [
        { "type": "path", "name": "first", "closed": true, "points": [
          { "anchor": {"x": 0, "y": 0}, "in_handle": {"x": 0, "y": 0}, "out_handle": {"x": 0, "y": 0} },
          { "anchor": {"x": 1, "y": 1}, "in_handle": {"x": 1, "y": 1}, "out_handle": {"x": 1, "y": 1} }
        ]},
        { "type": "path", "name": "second", "closed": true, "points": [
          { "anchor": {"x": 0, "y": 0}, "in_handle": {"x": 0, "y": 0}, "out_handle": {"x": 0, "y": 0} },
          { "anchor": {"x": 1, "y": 1}, "in_handle": {"x": 1, "y": 1}, "out_handle": {"x": 1, "y": 1} }
        ]}
      ]
    }]
  }]
}"#;

struct Fixture {
    dir: TempDir,
    workspace: PathBuf,
    config: PathBuf,
}

impl Fixture {
    fn new(workspace_json: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join("workspace.json");
        let config = dir.path().join("config.toml");
        fs::write(&workspace, workspace_json).unwrap();
        fs::write(&config, "precision = 1\n").unwrap();
        Self {
            dir,
            workspace,
            config,
        }
    }

    fn run(&self, extra: &[&str]) -> anyhow::Result<ExitCode> {
        let mut args: Vec<String> = vec![
            "pathdedup".into(),
            "-q".into(),
            "--no-progress".into(),
            self.workspace.display().to_string(),
            "--config".into(),
            self.config.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        run_app(Cli::try_parse_from(args).unwrap())
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out.json")
    }
}

fn load(path: &Path) -> Workspace {
    Workspace::load(path).unwrap()
}

#[test]
fn test_run_without_write_leaves_file_alone() {
    let fixture = Fixture::new(TWO_SQUARES);
    let code = fixture.run(&[]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(fs::read_to_string(&fixture.workspace).unwrap(), TWO_SQUARES);
}

#[test]
fn test_run_writes_cleaned_workspace() {
    let fixture = Fixture::new(TWO_SQUARES);
    let out = fixture.out();
    let code = fixture
        .run(&["--write", out.to_str().unwrap(), "--output", "json"])
        .unwrap();

    assert_eq!(code, ExitCode::Success);
    let cleaned = load(&out);
    let doc = cleaned.active_document().unwrap();
    assert!(doc.contains_name("first"));
    assert!(!doc.contains_name("second"));
}

#[test]
fn test_run_in_place() {
    let fixture = Fixture::new(TWO_SQUARES);
    fixture.run(&["--in-place"]).unwrap();

    let doc = load(&fixture.workspace);
    assert!(!doc.active_document().unwrap().contains_name("second"));
}

#[test]
fn test_run_no_documents() {
    let fixture = Fixture::new(r#"{ "documents": [] }"#);
    let out = fixture.out();
    let code = fixture.run(&["--write", out.to_str().unwrap()]).unwrap();

    assert_eq!(code, ExitCode::NoDocument);
    assert!(!out.exists());
}

#[test]
fn test_run_nothing_eligible() {
    let fixture = Fixture::new(
        r#"{ "documents": [ { "name": "blank", "layers": [ { "type": "layer" } ] } ] }"#,
    );
    assert_eq!(fixture.run(&[]).unwrap(), ExitCode::NothingEligible);
}

#[test]
fn test_run_missing_workspace_is_an_error() {
    let fixture = Fixture::new(TWO_SQUARES);
    fs::remove_file(&fixture.workspace).unwrap();
    let err = fixture.run(&[]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load workspace"));
}

#[test]
fn test_run_bad_config_is_an_error() {
    let fixture = Fixture::new(TWO_SQUARES);
    fs::write(&fixture.config, "precision = 99\n").unwrap();
    let err = fixture.run(&[]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load configuration"));
}
