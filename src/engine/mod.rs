//! engine
//!
//! Orchestrates the command lifecycle: Load -> Verify -> Mutate -> Verify -> Save.
//!
//! # Architecture
//!
//! The engine is the central coordinator for all xcodeproj commands. Every
//! command goes through [`runner`], which:
//!
//! 1. **Load**: Read the whole graph through the codec
//! 2. **Verify**: Record the invariant violations already present
//! 3. **Mutate**: Run exactly one operation against the graph
//! 4. **Verify**: Fail if the operation introduced a new violation
//! 5. **Save**: Write the whole graph back atomically
//!
//! # Outcomes
//!
//! An operation either applies a change ([`Outcome::Applied`]) or reports
//! a condition that makes it a no-op ([`Outcome::Reported`]): the target
//! already exists, the file is not in the project, and so on. Reported
//! outcomes print a message and exit successfully; only applied outcomes
//! are saved. Genuine failures are errors.
//!
//! # Invariants
//!
//! - Operations never touch the filesystem; the runner owns load and save
//! - A reported outcome never writes the project
//! - Verification failure after an operation indicates a bug

pub mod runner;

pub use runner::{run_create, run_mutation, run_query, RunError};

use std::fmt;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags and configuration.
#[derive(Debug, Clone)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Verify invariants around each mutation.
    pub verify: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            verify: true,
        }
    }
}

/// Result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The graph changed; carries the success line.
    Applied(String),
    /// Nothing changed; carries the reason.
    Reported(Notice),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied(message) => f.write_str(message),
            Outcome::Reported(notice) => notice.fmt(f),
        }
    }
}

/// A non-fatal condition that turned an operation into a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FileNotFound(String),
    FileAlreadyInTarget { file: String, target: String },
    FileAlreadyInGroup { file: String, group: String },
    TargetNotFound(String),
    DependencyTargetNotFound(String),
    TargetExists(String),
    GroupExists(String),
    ParentGroupNotFound(String),
    ConfigurationNotFound { target: String, configuration: String },
    AlreadyDependsOn { target: String, dependency: String },
    FrameworkAlreadyLinked { framework: String, target: String },
    PackageExists(String),
    PackageNotFound(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FileNotFound(path) => write!(f, "File not found in project: {}", path),
            Notice::FileAlreadyInTarget { file, target } => {
                write!(f, "File '{}' is already in target '{}'", file, target)
            }
            Notice::FileAlreadyInGroup { file, group } => {
                write!(f, "File '{}' is already in {}", file, group)
            }
            Notice::TargetNotFound(name) => write!(f, "Target '{}' not found in project", name),
            Notice::DependencyTargetNotFound(name) => {
                write!(f, "Dependency target '{}' not found in project", name)
            }
            Notice::TargetExists(name) => write!(f, "Target '{}' already exists", name),
            Notice::GroupExists(name) => write!(f, "Group '{}' already exists", name),
            Notice::ParentGroupNotFound(name) => write!(f, "Parent group '{}' not found", name),
            Notice::ConfigurationNotFound {
                target,
                configuration,
            } => write!(
                f,
                "Configuration '{}' not found for target '{}'",
                configuration, target
            ),
            Notice::AlreadyDependsOn { target, dependency } => {
                write!(f, "Target '{}' already depends on '{}'", target, dependency)
            }
            Notice::FrameworkAlreadyLinked { framework, target } => write!(
                f,
                "Framework '{}' is already linked to target '{}'",
                framework, target
            ),
            Notice::PackageExists(url) => write!(f, "Package '{}' already exists in project", url),
            Notice::PackageNotFound(url) => write!(f, "Package '{}' not found in project", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod context {
        use super::*;

        #[test]
        fn default_values() {
            let ctx = Context::default();
            assert!(!ctx.debug);
            assert!(!ctx.quiet);
            assert!(ctx.verify);
        }
    }

    mod outcome {
        use super::*;

        #[test]
        fn display_uses_message_or_notice() {
            assert_eq!(Outcome::Applied("done".into()).to_string(), "done");
            let reported = Outcome::Reported(Notice::AlreadyDependsOn {
                target: "App".into(),
                dependency: "Core".into(),
            });
            assert_eq!(reported.to_string(), "Target 'App' already depends on 'Core'");
            assert!(!reported.is_applied());
        }

        #[test]
        fn file_not_found_wording() {
            assert_eq!(
                Notice::FileNotFound("Foo.swift".into()).to_string(),
                "File not found in project: Foo.swift"
            );
        }
    }
}
