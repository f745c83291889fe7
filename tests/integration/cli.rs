use alertgraph::test_utils::DefinitionsFixture;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_resolve_prints_ordered_keys() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();

    project
        .command()
        .arg("resolve")
        .arg(&path)
        .arg("os.cpu")
        .assert()
        .success()
        .stdout("alert:ping.host\nalert:scollector.down\nmacro:host_based\nalert:os.cpu\n");
}

#[test]
fn test_resolve_json_output() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();

    let output = project
        .command()
        .args(["resolve", "--format", "json"])
        .arg(&path)
        .arg("host_based")
        .args(["--kind", "macro"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["root"]["kind"], "macro");
    assert_eq!(json["root"]["name"], "host_based");
    let names: Vec<_> = json["order"].as_array().unwrap().iter().map(|k| k["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ping.host", "scollector.down", "host_based"]);
}

#[test]
fn test_resolve_cycle_fails_with_path() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::mutual_cycle()).unwrap();

    project
        .command()
        .arg("resolve")
        .arg(&path)
        .arg("a")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Circular reference detected: alert:a → alert:b → alert:a"));
}

#[test]
fn test_resolve_unknown_root_suggests_names() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();

    project
        .command()
        .arg("resolve")
        .arg(&path)
        .arg("os.cpux")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alert:os.cpux is not defined"))
        .stderr(predicate::str::contains("Did you mean 'os.cpu'?"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();

    project
        .command()
        .arg("resolve")
        .arg(&path)
        .arg("os.cpu")
        .args(["--kind", "channel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity kind"));
}

#[test]
fn test_assemble_prints_bodies() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();

    project
        .command()
        .arg("assemble")
        .arg(&path)
        .arg("scollector.down")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("alert ping.host {\n"))
        .stdout(predicate::str::contains("}\nalert scollector.down {\n\tdepends = alert(\"ping.host\", \"warn\")"));
}

#[test]
fn test_assemble_honors_config_separator() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();
    let config = project.write_file("assembly.toml", "separator = \"\\n# ---\\n\"\n").unwrap();

    project
        .command()
        .arg("--config")
        .arg(&config)
        .arg("assemble")
        .arg(&path)
        .arg("scollector.down")
        .assert()
        .success()
        .stdout(predicate::str::contains("}\n# ---\nalert scollector.down {"));
}

#[test]
fn test_assemble_rejects_malformed_config() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();
    let config = project.write_file("assembly.toml", "parallel = \"sometimes\"\n").unwrap();

    project
        .command()
        .arg("--config")
        .arg(&config)
        .arg("assemble")
        .arg(&path)
        .arg("os.cpu")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_assemble_all_succeeds_for_valid_document() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::shared_notification()).unwrap();

    project
        .command()
        .arg("assemble-all")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("==> alert:always.good"))
        .stdout(predicate::str::contains("==> alert:os.mem"));
}

#[test]
fn test_assemble_all_reports_failures_and_exits_nonzero() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::mutual_cycle()).unwrap();

    project
        .command()
        .arg("assemble-all")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("==> alert:healthy"))
        .stderr(predicate::str::contains("alert:a: Circular reference detected"))
        .stderr(predicate::str::contains("2 of 3 alert entities could not be assembled"));
}

#[test]
fn test_assemble_all_json() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::undefined_reference()).unwrap();

    let output = project.command().args(["assemble-all", "-f", "json"]).arg(&path).output().unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["assembled"]["os.cpu"], "alert os.cpu {\n\twarn = 1\n}");
    assert_eq!(json["errors"]["c"], "alert:c references undefined alert:x");
}

#[test]
fn test_tree_output() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::dependency_chain()).unwrap();

    project
        .command()
        .arg("tree")
        .arg(&path)
        .arg("os.cpu")
        .assert()
        .success()
        .stdout(
            "alert:os.cpu\n\
             └── macro:host_based\n    \
             └── alert:scollector.down\n        \
             └── alert:ping.host\n",
        );
}

#[test]
fn test_validate_clean_document() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::shared_notification()).unwrap();

    project
        .command()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no problems found"));
}

#[test]
fn test_validate_reports_problems() {
    let project = TestProject::new().unwrap();
    let path = project.write_fixture(&DefinitionsFixture::mutual_cycle()).unwrap();

    project
        .command()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Circular reference: alert:a → alert:b → alert:a"))
        .stderr(predicate::str::contains("1 problem(s) found"));
}

#[test]
fn test_validate_rejects_unknown_table() {
    let project = TestProject::new().unwrap();
    let path = project.write_file("bad.toml", "[channel.x]\nemail = \"a\"\n").unwrap();

    project
        .command()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid definitions file syntax"));
}

#[test]
fn test_missing_definitions_file() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["validate", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File system error during read definitions: absent.toml"))
        .stderr(predicate::str::contains("Check that the file exists"));
}
