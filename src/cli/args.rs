//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--no-verify`: Skip invariant verification around the mutation
//!
//! # Project Argument
//!
//! Every command except `create`, `config` and `completion` takes the
//! project as its first positional argument: the `.xcodeproj` bundle or
//! the `project.pbxproj` file inside it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use clap_complete::Shell;

/// xcodeproj - edit Xcode project files from the command line
#[derive(Parser, Debug)]
#[command(name = "xcodeproj")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Do not verify project invariants before saving
    #[arg(long, global = true)]
    pub no_verify: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Project ==========
    /// Create a new Xcode project (.xcodeproj)
    #[command(
        name = "create",
        long_about = "Create a new Xcode project.\n\n\
            Writes <path>/<name>.xcodeproj with project-level Debug and Release \
            configurations and one application target named after the project. \
            Defaults for the organization, bundle identifier prefix, platform and \
            Swift version come from the configuration files.",
        after_help = "\
EXAMPLES:
    # Create Demo.xcodeproj in the current directory
    xcodeproj create Demo

    # Create a macOS app project elsewhere
    xcodeproj create Demo --path ~/src --platform macOS --organization-name Acme"
    )]
    Create {
        /// Name of the project to create
        name: String,

        /// Directory to create the project in
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Organization name for the project
        #[arg(long)]
        organization_name: Option<String>,

        /// Bundle identifier prefix (e.g. com.company)
        #[arg(long)]
        bundle_identifier: Option<String>,

        /// Platform of the default target (iOS, macOS, tvOS, watchOS)
        #[arg(long)]
        platform: Option<String>,

        /// Deployment target of the default target
        #[arg(long)]
        deployment_target: Option<String>,

        /// SWIFT_VERSION of the default target
        #[arg(long)]
        swift_version: Option<String>,
    },

    // ========== Files and groups ==========
    /// Add a file to an Xcode project
    #[command(
        name = "add-file",
        after_help = "\
EXAMPLES:
    # Add a source file and compile it in the Demo target
    xcodeproj add-file Demo.xcodeproj Sources/Foo.swift --target Demo

    # Add a resource to a group without a target
    xcodeproj add-file Demo.xcodeproj Resources/config.json --group Resources"
    )]
    AddFile {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Path of the file to add, relative to the project directory
        file: String,

        /// Group to add the file to (defaults to the main group)
        #[arg(long)]
        group: Option<String>,

        /// Target whose build phases should include the file
        #[arg(long)]
        target: Option<String>,
    },

    /// Remove a file from the Xcode project
    #[command(name = "remove-file")]
    RemoveFile {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Path (or file name) of the file to remove
        file: String,

        /// Also delete the file from disk
        #[arg(long)]
        remove_from_disk: bool,
    },

    /// Move or rename a file within the project
    #[command(
        name = "move-file",
        long_about = "Move or rename a file within the project.\n\n\
            Rewrites the path of every matching file reference in place; the file \
            stays in its navigator group. With --move-on-disk the file is moved \
            after the project is saved, creating missing directories."
    )]
    MoveFile {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Current path (or file name) of the file
        old_path: String,

        /// New path of the file
        new_path: String,

        /// Also move the file on disk
        #[arg(long)]
        move_on_disk: bool,
    },

    /// Create a new group in the project navigator
    #[command(name = "create-group")]
    CreateGroup {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Name of the group
        name: String,

        /// Parent group (defaults to the main group)
        #[arg(long)]
        parent: Option<String>,

        /// Directory the group maps to
        #[arg(long)]
        path: Option<String>,
    },

    // ========== Targets ==========
    /// Create a new target
    #[command(
        name = "add-target",
        after_help = "\
PRODUCT TYPES:
    application, framework, staticFramework, staticLibrary, dynamicLibrary,
    unitTestBundle, uiTestBundle, appExtension, bundle, commandLineTool, watchApp

EXAMPLES:
    xcodeproj add-target Demo.xcodeproj DemoTests --product-type unitTestBundle
    xcodeproj add-target Demo.xcodeproj Core --product-type framework --platform macOS"
    )]
    AddTarget {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Name of the new target
        name: String,

        /// Product type of the target
        #[arg(long, default_value = "application")]
        product_type: String,

        /// Bundle identifier (defaults to <prefix>.<name>)
        #[arg(long)]
        bundle_identifier: Option<String>,

        /// Platform (iOS, macOS, tvOS, watchOS)
        #[arg(long)]
        platform: Option<String>,

        /// Deployment target version
        #[arg(long)]
        deployment_target: Option<String>,
    },

    /// Remove an existing target
    #[command(
        name = "remove-target",
        long_about = "Remove a target and everything it owns.\n\n\
            Deletes the target's build phases, configurations and product, strips \
            dependencies on it from other targets, and deletes any navigator group \
            named after it."
    )]
    RemoveTarget {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Name of the target to remove
        name: String,
    },

    /// Duplicate an existing target
    #[command(name = "duplicate-target")]
    DuplicateTarget {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target to copy
        source: String,

        /// Name of the copy
        new_name: String,

        /// Bundle identifier of the copy
        #[arg(long)]
        bundle_identifier: Option<String>,
    },

    /// Add dependency between targets
    #[command(name = "add-dependency")]
    AddDependency {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target that will depend on another target
        target: String,

        /// Target to depend on
        dependency: String,
    },

    /// Add framework dependencies
    #[command(
        name = "add-framework",
        after_help = "\
EXAMPLES:
    # Link a system framework
    xcodeproj add-framework Demo.xcodeproj Demo UIKit

    # Link and embed a vendored framework
    xcodeproj add-framework Demo.xcodeproj Demo Vendor/Lib.framework --embed"
    )]
    AddFramework {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target to link into
        target: String,

        /// System framework name (UIKit) or path to a .framework
        framework: String,

        /// Embed the framework (custom frameworks only)
        #[arg(long)]
        embed: bool,
    },

    // ========== Packages ==========
    /// Add a Swift Package dependency to an Xcode project
    #[command(
        name = "add-swift-package",
        after_help = "\
REQUIREMENTS:
    1.2.3 | exact: 1.2.3     exact version
    from: 1.2.3              up to next major
    upToNextMinor: 1.2.3     up to next minor
    range: 1.0.0 - 2.0.0     version range
    branch: main             branch
    revision: <sha>          commit

EXAMPLES:
    xcodeproj add-swift-package Demo.xcodeproj https://github.com/apple/swift-log.git \
\"from: 1.5.0\" --target Demo --product Logging"
    )]
    AddSwiftPackage {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Repository URL of the package
        url: String,

        /// Version requirement
        requirement: String,

        /// Target to link a product into
        #[arg(long)]
        target: Option<String>,

        /// Product to link (defaults to the package name)
        #[arg(long)]
        product: Option<String>,
    },

    /// Add a local Swift Package to an Xcode project
    #[command(name = "add-local-package")]
    AddLocalPackage {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Package directory, relative to the project directory
        path: String,

        /// Target to link a product into
        #[arg(long)]
        target: Option<String>,

        /// Product to link (defaults to the directory name)
        #[arg(long)]
        product: Option<String>,
    },

    /// Remove a Swift Package dependency from an Xcode project
    #[command(name = "remove-swift-package")]
    RemoveSwiftPackage {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Repository URL (or local path) of the package
        url: String,
    },

    // ========== Build phases and settings ==========
    /// Add custom build phases
    #[command(
        name = "add-build-phase",
        after_help = "\
EXAMPLES:
    xcodeproj add-build-phase Demo.xcodeproj Demo run-script Lint --script swiftlint
    xcodeproj add-build-phase Demo.xcodeproj Demo copy-files \"Copy Config\" \\
        --destination resources --file config.json"
    )]
    AddBuildPhase {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target to add the phase to
        target: String,

        /// Phase type: run-script or copy-files
        phase_type: String,

        /// Name of the phase
        name: String,

        /// Script of a run-script phase
        #[arg(long)]
        script: Option<String>,

        /// Shell of a run-script phase
        #[arg(long)]
        shell_path: Option<String>,

        /// Destination of a copy-files phase
        /// (resources, frameworks, executables, plugins, shared_support)
        #[arg(long)]
        destination: Option<String>,

        /// File to copy (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<String>,
    },

    /// Modify build settings for a target
    #[command(name = "set-build-setting")]
    SetBuildSetting {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target to modify
        target: String,

        /// Configuration name (Debug, Release, or All)
        configuration: String,

        /// Build setting name
        key: String,

        /// New value
        value: String,

        /// Store the value as a list, split on whitespace
        #[arg(long)]
        list: bool,
    },

    /// Get build settings for a target
    #[command(name = "get-build-settings")]
    GetBuildSettings {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target to read
        target: String,

        /// Configuration name
        #[arg(long, default_value = "Debug")]
        configuration: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    // ========== Listing ==========
    /// List all targets
    #[command(name = "list-targets")]
    ListTargets {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all build configurations
    #[command(name = "list-build-configurations")]
    ListBuildConfigurations {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the files of a target
    #[command(name = "list-files")]
    ListFiles {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Target to list
        target: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all Swift Package dependencies
    #[command(name = "list-swift-packages")]
    ListSwiftPackages {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the navigator group tree
    #[command(name = "list-groups")]
    ListGroups {
        /// Path to the .xcodeproj
        project: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    // ========== Setup ==========
    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "View or modify xcodeproj configuration.\n\n\
            Global configuration lives in ~/.xcodeproj/config.toml. With --project, \
            values are read from and written to the .xcodeproj.toml next to that \
            project, which overrides the global file.",
        after_help = "\
EXAMPLES:
    # List the effective configuration
    xcodeproj config list

    # Set the default bundle identifier prefix
    xcodeproj config set bundle_identifier_prefix com.acme

    # Override the Swift version for one project
    xcodeproj config set swift_version 6.0 --project Demo.xcodeproj"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    xcodeproj completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    xcodeproj completion zsh >> ~/.zshrc

    # Fish
    xcodeproj completion fish > ~/.config/fish/completions/xcodeproj.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,

        /// Read the project configuration next to this project
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,

        /// Write the project configuration next to this project
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// List all configuration values
    List {
        /// Include the project configuration next to this project
        #[arg(long)]
        project: Option<PathBuf>,
    },
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "xcodeproj",
            "list-targets",
            "Demo.xcodeproj",
            "--quiet",
            "--no-verify",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert!(cli.no_verify);
        assert!(matches!(cli.command, Command::ListTargets { json: false, .. }));
    }

    #[test]
    fn repeatable_copy_files() {
        let cli = Cli::try_parse_from([
            "xcodeproj",
            "add-build-phase",
            "Demo.xcodeproj",
            "Demo",
            "copy-files",
            "Copy",
            "--destination",
            "resources",
            "--file",
            "a.json",
            "--file",
            "b.json",
        ])
        .unwrap();
        match cli.command {
            Command::AddBuildPhase { files, .. } => assert_eq!(files, ["a.json", "b.json"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn get_build_settings_defaults_to_debug() {
        let cli =
            Cli::try_parse_from(["xcodeproj", "get-build-settings", "Demo.xcodeproj", "Demo"])
                .unwrap();
        match cli.command {
            Command::GetBuildSettings { configuration, .. } => {
                assert_eq!(configuration, "Debug")
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn completion_accepts_every_shell() {
        for (arg, shell) in [
            ("bash", Shell::Bash),
            ("zsh", Shell::Zsh),
            ("fish", Shell::Fish),
            ("powershell", Shell::PowerShell),
            ("elvish", Shell::Elvish),
        ] {
            let cli = Cli::try_parse_from(["xcodeproj", "completion", arg]).unwrap();
            match cli.command {
                Command::Completion { shell: parsed } => assert_eq!(parsed, shell),
                other => panic!("unexpected command {:?}", other),
            }
        }
    }
}
