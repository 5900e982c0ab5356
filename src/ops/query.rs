//! ops::query
//!
//! Read-only views of a project graph.
//!
//! Every query returns plain serializable rows. The CLI prints them one per
//! line through their `Display` impl, or as a JSON document with `--json`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::graph::ProjectGraph;
use crate::core::model::{Object, PhaseTag};
use crate::core::types::BuildSettingValue;

use super::{require_target, OpError};

/// Configuration read when none is named.
pub const DEFAULT_CONFIGURATION: &str = "Debug";

/// One native target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRow {
    pub name: String,
    pub product_type: Option<String>,
}

impl fmt::Display for TargetRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.product_type {
            Some(product_type) => write!(f, "{} ({})", self.name, product_type),
            None => f.write_str(&self.name),
        }
    }
}

/// One build configuration and the list that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationRow {
    pub name: String,
    /// Target name, or `None` for the project-level list.
    pub target: Option<String>,
}

impl fmt::Display for ConfigurationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} (target '{}')", self.name, target),
            None => write!(f, "{} (project)", self.name),
        }
    }
}

/// One package reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PackageRow {
    Remote {
        url: String,
        requirement: Option<String>,
    },
    Local {
        path: String,
    },
}

impl fmt::Display for PackageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageRow::Remote {
                url,
                requirement: Some(requirement),
            } => write!(f, "{} ({})", url, requirement),
            PackageRow::Remote {
                url,
                requirement: None,
            } => f.write_str(url),
            PackageRow::Local { path } => write!(f, "{} (local)", path),
        }
    }
}

/// One group of the navigator tree below the main group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    pub name: String,
    pub path: Option<String>,
    /// 0 for children of the main group.
    pub depth: usize,
}

impl fmt::Display for GroupRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "  ".repeat(self.depth), self.name)
    }
}

/// Build settings of one configuration, sorted by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingsView(pub BTreeMap<String, BuildSettingValue>);

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{} = {}", key, value)?;
        }
        Ok(())
    }
}

pub fn list_targets(graph: &ProjectGraph) -> Vec<TargetRow> {
    graph
        .targets()
        .into_iter()
        .map(|(_, target)| TargetRow {
            name: target.name.clone(),
            product_type: target
                .product_type
                .as_ref()
                .map(|ty| ty.identifier().to_string()),
        })
        .collect()
}

/// Project-level configurations first, then each target's.
pub fn list_build_configurations(graph: &ProjectGraph) -> Result<Vec<ConfigurationRow>, OpError> {
    let project = graph.project()?;
    let mut rows: Vec<ConfigurationRow> = graph
        .configurations_of(&project.build_configuration_list)
        .into_iter()
        .map(|(_, config)| ConfigurationRow {
            name: config.name.clone(),
            target: None,
        })
        .collect();
    for (_, target) in graph.targets() {
        rows.extend(
            graph
                .configurations_of(&target.build_configuration_list)
                .into_iter()
                .map(|(_, config)| ConfigurationRow {
                    name: config.name.clone(),
                    target: Some(target.name.clone()),
                }),
        );
    }
    Ok(rows)
}

/// Files compiled, copied or linked by a target, in phase order.
pub fn list_files(graph: &ProjectGraph, target: &str) -> Result<Vec<String>, OpError> {
    let id = require_target(graph, target)?;
    let target = graph.objects.target(&id)?;
    let files = target
        .build_phases
        .iter()
        .filter_map(|id| graph.objects.phase(id).ok())
        .filter(|phase| {
            matches!(
                phase.tag(),
                PhaseTag::Sources | PhaseTag::Resources | PhaseTag::Frameworks
            )
        })
        .flat_map(|phase| phase.files.iter())
        .filter_map(|id| graph.objects.build_file(id).ok())
        .filter_map(|bf| bf.file_ref.as_ref())
        .filter_map(|id| graph.objects.file_reference(id).ok())
        .filter_map(|file| file.path.clone().or_else(|| file.name.clone()))
        .collect();
    Ok(files)
}

/// Build settings of one configuration of a target.
pub fn get_build_settings(
    graph: &ProjectGraph,
    target: &str,
    configuration: Option<&str>,
) -> Result<SettingsView, OpError> {
    let configuration = configuration.unwrap_or(DEFAULT_CONFIGURATION);
    let id = require_target(graph, target)?;
    let list = &graph.objects.target(&id)?.build_configuration_list;
    graph
        .configurations_of(list)
        .into_iter()
        .find(|(_, config)| config.name == configuration)
        .map(|(_, config)| SettingsView(config.build_settings.clone()))
        .ok_or_else(|| OpError::ConfigurationNotFound {
            target: target.to_string(),
            configuration: configuration.to_string(),
        })
}

/// Package references in project order.
pub fn list_swift_packages(graph: &ProjectGraph) -> Result<Vec<PackageRow>, OpError> {
    let project = graph.project()?;
    let rows = project
        .package_references
        .iter()
        .flatten()
        .filter_map(|id| match graph.objects.get(id) {
            Some(Object::RemotePackage(pkg)) => Some(PackageRow::Remote {
                url: pkg.repository_url.clone(),
                requirement: pkg.requirement.as_ref().map(ToString::to_string),
            }),
            Some(Object::LocalPackage(pkg)) => Some(PackageRow::Local {
                path: pkg.relative_path.clone(),
            }),
            _ => None,
        })
        .collect();
    Ok(rows)
}

/// The navigator tree below the main group, pre-order.
pub fn list_groups(graph: &ProjectGraph) -> Vec<GroupRow> {
    graph
        .group_tree()
        .into_iter()
        .filter(|(_, depth)| *depth > 0)
        .filter_map(|(id, depth)| {
            let group = graph.objects.group(&id).ok()?;
            Some(GroupRow {
                name: group.display_name().unwrap_or("(unnamed)").to_string(),
                path: group.path.clone(),
                depth: depth - 1,
            })
        })
        .collect()
}
