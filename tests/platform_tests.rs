//! Target platform command tests: materialize, install, clean and index

mod common;

use common::{PLUGINS, TestProject};
use predicates::prelude::*;

// ============================================================================
// materialize
// ============================================================================

#[test]
fn test_materialize_extracts_archive() {
    let project = TestProject::new();
    common::write_zip(
        &project.path.join("eclipse-platform.zip"),
        &[
            ("eclipse/plugins/org.eclipse.osgi_3.4.0.jar", "osgi"),
            ("eclipse/eclipse.ini", "-vmargs"),
        ],
    );

    project
        .cmd()
        .args(["materialize", "eclipse-platform.zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 2 files"));

    assert!(project.file_exists("target-platform/eclipse/plugins/org.eclipse.osgi_3.4.0.jar"));
    assert!(project.file_exists("target-platform/eclipse/eclipse.ini"));
}

#[test]
fn test_materialize_first_archive_wins() {
    let project = TestProject::new();
    common::write_zip(
        &project.path.join("sdk.zip"),
        &[("eclipse/readme.txt", "from sdk")],
    );
    common::write_zip(
        &project.path.join("delta.zip"),
        &[
            ("eclipse/readme.txt", "from delta"),
            ("eclipse/plugins/org.swt.gtk_3.4.0.jar", "gtk"),
        ],
    );

    project
        .cmd()
        .args(["materialize", "sdk.zip", "delta.zip"])
        .assert()
        .success();

    assert_eq!(
        project.read_file("target-platform/eclipse/readme.txt"),
        "from sdk"
    );
    assert!(project.file_exists("target-platform/eclipse/plugins/org.swt.gtk_3.4.0.jar"));
}

#[test]
fn test_materialize_into_custom_location() {
    let project = TestProject::new();
    common::write_zip(&project.path.join("p.zip"), &[("eclipse/a.txt", "a")]);

    project
        .cmd()
        .args(["materialize", "p.zip", "--target-platform", "tp"])
        .assert()
        .success();

    assert!(project.file_exists("tp/eclipse/a.txt"));
}

#[test]
fn test_materialize_location_is_a_file() {
    let project = TestProject::new();
    project.write_file("target-platform", "not a directory");
    common::write_zip(&project.path.join("p.zip"), &[("eclipse/a.txt", "a")]);

    project
        .cmd()
        .args(["materialize", "p.zip"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is a file, not a directory"));
}

#[test]
fn test_materialize_missing_archive() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["materialize", "absent.zip"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

// ============================================================================
// install
// ============================================================================

#[test]
fn test_install_copies_jar_into_plugins() {
    let project = TestProject::new();
    common::write_jar(
        &project.path.join("target/org.a_1.0.0.jar"),
        &common::manifest(&[("Bundle-SymbolicName", "org.a")]),
    );

    project
        .cmd()
        .args(["install", "target/org.a_1.0.0.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed"));

    assert!(project.file_exists(&format!("{PLUGINS}/org.a_1.0.0.jar")));
}

#[test]
fn test_install_missing_jar() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["install", "target/absent.jar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_install_uses_configured_location() {
    let project = TestProject::new();
    project.write_file("osgi-target.yaml", "target_platform: build/tp\n");
    project.write_file("org.a_1.0.0.jar", "jar");

    project
        .cmd()
        .args(["install", "org.a_1.0.0.jar"])
        .assert()
        .success();

    assert!(project.file_exists("build/tp/eclipse/plugins/org.a_1.0.0.jar"));
}

// ============================================================================
// clean
// ============================================================================

#[test]
fn test_clean_deletes_target_platform() {
    let project = TestProject::new();
    project.add_bundle("org.b_1.0.0.jar", &[("Bundle-SymbolicName", "org.b")]);

    project
        .cmd()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    assert!(!project.file_exists("target-platform"));
}

#[test]
fn test_clean_without_target_platform() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean"));
}

// ============================================================================
// index
// ============================================================================

#[test]
fn test_index_lists_bundles_and_fragments() {
    let project = TestProject::new();
    project.add_bundle(
        "org.swt_3.4.0.jar",
        &[
            ("Bundle-SymbolicName", "org.swt"),
            ("Bundle-Version", "3.4.0"),
            ("Export-Package", "org.swt,org.swt.widgets"),
        ],
    );
    project.add_bundle(
        "org.swt.win32_3.4.0.jar",
        &[
            ("Bundle-SymbolicName", "org.swt.win32"),
            ("Fragment-Host", "org.swt"),
            ("Eclipse-PlatformFilter", "(osgi.os=win32)"),
        ],
    );

    project
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed bundles (2)"))
        .stdout(predicate::str::contains("Exports: 2"))
        .stdout(predicate::str::contains("Fragment of: org.swt"))
        .stdout(predicate::str::contains("Fragment: org.swt.win32"));
}

#[test]
fn test_index_json_omits_foreign_fragments() {
    let project = TestProject::new();
    project.add_bundle("org.swt_3.4.0.jar", &[("Bundle-SymbolicName", "org.swt")]);
    project.add_bundle(
        "org.swt.win32_3.4.0.jar",
        &[
            ("Bundle-SymbolicName", "org.swt.win32"),
            ("Fragment-Host", "org.swt"),
            ("Eclipse-PlatformFilter", "(osgi.os=win32)"),
        ],
    );

    let output = project
        .cmd()
        .args(["index", "--json", "--os", "linux"])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let entries = json.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["symbolic_name"], "org.swt");
    assert!(entries[0].get("fragment").is_none());
}

#[test]
fn test_index_empty_plugin_folder() {
    let project = TestProject::new();
    std::fs::create_dir_all(project.plugins_dir()).expect("create plugin folder");

    project
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("No bundles found"));
}

#[test]
fn test_index_skips_plain_jars() {
    let project = TestProject::new();
    project.add_bundle("org.b_1.0.0.jar", &[("Bundle-SymbolicName", "org.b")]);
    common::write_jar(
        &project.plugins_dir().join("commons-io.jar"),
        "Manifest-Version: 1.0\r\nCreated-By: javac\r\n\r\n",
    );

    project
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed bundles (1)"));
}
