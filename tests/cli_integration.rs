//! End-to-end tests for the `xcodeproj` binary.
//!
//! Each test creates a fresh project in a temporary directory and drives
//! the binary the way a user would. Configuration lookup is pointed at the
//! temporary directory so a developer's own config never leaks in.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A temporary directory holding `Demo.xcodeproj`.
struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create `Demo.xcodeproj` with the binary itself.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let project = Self { dir };
        project
            .bare()
            .args(["create", "Demo", "--path"])
            .arg(project.dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Successfully created Xcode project 'Demo'",
            ));
        project
    }

    fn bundle(&self) -> std::path::PathBuf {
        self.dir.path().join("Demo.xcodeproj")
    }

    /// The binary with an isolated config environment.
    fn bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("xcodeproj").expect("binary not built");
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("XCODEPROJ_CONFIG")
            .env_remove("XCODEPROJ_LOG");
        cmd
    }

    /// The binary running `subcommand` against `Demo.xcodeproj`.
    fn cmd(&self, subcommand: &str) -> Command {
        let mut cmd = self.bare();
        cmd.arg(subcommand).arg(self.bundle());
        cmd
    }

    fn pbxproj(&self) -> String {
        std::fs::read_to_string(self.bundle().join("project.pbxproj"))
            .expect("failed to read project.pbxproj")
    }
}

// =============================================================================
// Create
// =============================================================================

mod create {
    use super::*;

    #[test]
    fn writes_bundle_and_workspace() {
        let project = TestProject::new();
        project
            .dir
            .child("Demo.xcodeproj/project.pbxproj")
            .assert(predicate::path::exists());
        project
            .dir
            .child("Demo.xcodeproj/project.xcworkspace/contents.xcworkspacedata")
            .assert(predicate::str::contains("self:"));
        assert!(project.pbxproj().starts_with("// !$*UTF8*$!"));
    }

    #[test]
    fn refuses_existing_bundle() {
        let project = TestProject::new();
        project
            .bare()
            .args(["create", "Demo", "--path"])
            .arg(project.dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

// =============================================================================
// Mutations
// =============================================================================

mod mutations {
    use super::*;

    #[test]
    fn add_file_then_list_files() {
        let project = TestProject::new();
        project
            .cmd("add-file")
            .args(["Sources/App.swift", "--target", "Demo"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Successfully added file 'App.swift' to target 'Demo'",
            ));

        project
            .cmd("list-files")
            .arg("Demo")
            .assert()
            .success()
            .stdout(predicate::str::contains("Sources/App.swift"));
    }

    #[test]
    fn reported_outcome_exits_zero_and_leaves_file_alone() {
        let project = TestProject::new();
        let before = project.pbxproj();

        project
            .cmd("remove-file")
            .arg("Missing.swift")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "File not found in project: Missing.swift",
            ));

        assert_eq!(project.pbxproj(), before);
    }

    #[test]
    fn quiet_suppresses_status_line() {
        let project = TestProject::new();
        project
            .cmd("create-group")
            .args(["Features", "-q"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
        assert!(project.pbxproj().contains("Features"));
    }

    #[test]
    fn remove_file_from_disk() {
        let project = TestProject::new();
        let source = project.dir.child("Sources/Gone.swift");
        source.write_str("struct Gone {}\n").unwrap();

        project
            .cmd("add-file")
            .arg("Sources/Gone.swift")
            .assert()
            .success();
        project
            .cmd("remove-file")
            .args(["Sources/Gone.swift", "--remove-from-disk"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted"));

        source.assert(predicate::path::missing());
    }

    #[test]
    fn move_file_on_disk() {
        let project = TestProject::new();
        project
            .dir
            .child("Old.swift")
            .write_str("struct Old {}\n")
            .unwrap();

        project.cmd("add-file").arg("Old.swift").assert().success();
        project
            .cmd("move-file")
            .args(["Old.swift", "Moved/New.swift", "--move-on-disk"])
            .assert()
            .success();

        project
            .dir
            .child("Moved/New.swift")
            .assert(predicate::path::exists());
        assert!(project.pbxproj().contains("Moved/New.swift"));
    }

    #[test]
    fn add_target_and_dependency() {
        let project = TestProject::new();
        project
            .cmd("add-target")
            .args(["DemoTests", "--product-type", "unitTestBundle"])
            .assert()
            .success();
        project
            .cmd("add-dependency")
            .args(["DemoTests", "Demo"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Successfully added dependency 'Demo' to target 'DemoTests'",
            ));
        project
            .cmd("add-dependency")
            .args(["DemoTests", "Demo"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already depends on"));
    }

    #[test]
    fn invalid_product_type_fails() {
        let project = TestProject::new();
        project
            .cmd("add-target")
            .args(["Widget", "--product-type", "toaster"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid product type 'toaster'"));
    }

    #[test]
    fn set_and_get_build_setting() {
        let project = TestProject::new();
        project
            .cmd("set-build-setting")
            .args(["Demo", "All", "SWIFT_VERSION", "6.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Debug, Release"));
        project
            .cmd("get-build-settings")
            .args(["Demo", "--configuration", "Release"])
            .assert()
            .success()
            .stdout(predicate::str::contains("SWIFT_VERSION = 6.0"));
    }

    #[test]
    fn run_script_requires_script() {
        let project = TestProject::new();
        project
            .cmd("add-build-phase")
            .args(["Demo", "run-script", "Lint"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--script"));
    }

    #[test]
    fn swift_package_lifecycle() {
        let project = TestProject::new();
        let url = "https://github.com/apple/swift-argument-parser";
        project
            .cmd("add-swift-package")
            .args([url, "from: 1.2.0", "--target", "Demo"])
            .assert()
            .success();
        project
            .cmd("list-swift-packages")
            .assert()
            .success()
            .stdout(predicate::str::contains(url));
        project
            .cmd("remove-swift-package")
            .arg(url)
            .assert()
            .success();
        assert!(!project.pbxproj().contains("swift-argument-parser"));
    }
}

// =============================================================================
// Queries
// =============================================================================

mod queries {
    use super::*;

    #[test]
    fn list_targets_json() {
        let project = TestProject::new();
        let output = project
            .cmd("list-targets")
            .arg("--json")
            .output()
            .expect("failed to run list-targets");
        assert!(output.status.success());

        let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(rows[0]["name"], "Demo");
        assert_eq!(
            rows[0]["product_type"],
            "com.apple.product-type.application"
        );
    }

    #[test]
    fn list_build_configurations_plain() {
        let project = TestProject::new();
        project
            .cmd("list-build-configurations")
            .assert()
            .success()
            .stdout(predicate::str::contains("Debug (project)"))
            .stdout(predicate::str::contains("Release (target 'Demo')"));
    }

    #[test]
    fn unknown_target_is_an_error() {
        let project = TestProject::new();
        project
            .cmd("list-files")
            .arg("Nope")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Nope"));
    }

    #[test]
    fn missing_project_is_an_error() {
        let project = TestProject::new();
        project
            .bare()
            .arg("list-targets")
            .arg(project.dir.path().join("Other.xcodeproj"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read project"));
    }
}

// =============================================================================
// Config
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn project_config_feeds_new_targets() {
        let project = TestProject::new();
        project
            .bare()
            .args(["config", "set", "bundle_identifier_prefix", "com.acme", "--project"])
            .arg(project.bundle())
            .assert()
            .success()
            .stdout(predicate::str::contains("Set bundle_identifier_prefix = com.acme"));

        project.cmd("add-target").arg("Widget").assert().success();
        assert!(project.pbxproj().contains("com.acme.Widget"));
    }

    #[test]
    fn unknown_key_fails() {
        let project = TestProject::new();
        project
            .bare()
            .args(["config", "get", "trunk"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown configuration key"));
    }
}
