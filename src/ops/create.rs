//! ops::create
//!
//! Building a new project from scratch.
//!
//! The new project has one application target named after the project,
//! project-level Debug and Release configurations, and a main group whose
//! last child is the Products group.

use crate::core::graph::ProjectGraph;
use crate::core::model::{
    Attributes, BuildConfiguration, BuildSettings, ConfigurationList, Group, Object, PlistValue,
    Project,
};
use crate::core::store::ObjectStore;
use crate::core::types::{Platform, ProductType};
use crate::engine::Outcome;

use super::targets::{self, AddTarget, DEFAULT_CONFIGURATIONS};
use super::OpError;

/// Compatibility string written into new projects.
pub const COMPATIBILITY_VERSION: &str = "Xcode 14.0";

/// Contents of `project.xcworkspace/contents.xcworkspacedata`.
pub const WORKSPACE_DATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Workspace
   version = "1.0">
   <FileRef
      location = "self:">
   </FileRef>
</Workspace>
"#;

/// Request for [`create_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProject {
    pub name: String,
    pub organization_name: String,
    pub bundle_identifier_prefix: String,
    pub swift_version: String,
    pub platform: Platform,
    pub deployment_target: Option<String>,
}

impl CreateProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            organization_name: String::new(),
            bundle_identifier_prefix: "com.example".to_string(),
            swift_version: "5.0".to_string(),
            platform: Platform::default(),
            deployment_target: None,
        }
    }

    /// Bundle identifier of the default target.
    pub fn bundle_identifier(&self) -> String {
        format!("{}.{}", self.bundle_identifier_prefix, self.name)
    }
}

/// Build a new project graph.
///
/// # Errors
///
/// `InvalidArgument` if the name is empty or contains a path separator.
pub fn create_project(req: &CreateProject) -> Result<(ProjectGraph, Outcome), OpError> {
    let name = req.name.trim();
    if name.is_empty() || name.contains(|c| c == '/' || c == '\\') {
        return Err(OpError::InvalidArgument(format!(
            "invalid project name '{}'",
            req.name
        )));
    }

    let mut objects = ObjectStore::new(name);
    let main = objects.insert(Object::Group(Group::default()));
    let products = objects.insert(Object::Group(Group::named("Products")));

    let mut settings = BuildSettings::new();
    settings.insert(
        "ORGANIZATION_NAME".into(),
        req.organization_name.as_str().into(),
    );
    let configurations = DEFAULT_CONFIGURATIONS
        .iter()
        .map(|config| {
            objects.insert(Object::BuildConfiguration(BuildConfiguration::new(
                *config,
                settings.clone(),
            )))
        })
        .collect();
    let list = objects.insert(Object::ConfigurationList(ConfigurationList::new(
        configurations,
        "Release",
    )));

    let root = objects.insert(Object::Project(Project {
        build_configuration_list: list,
        compatibility_version: Some(COMPATIBILITY_VERSION.to_string()),
        development_region: Some("en".to_string()),
        known_regions: Some(vec!["en".to_string(), "Base".to_string()]),
        main_group: main.clone(),
        products_group: Some(products.clone()),
        project_dir_path: String::new(),
        project_root: String::new(),
        targets: Vec::new(),
        package_references: None,
        extra: project_attributes(req),
    }));
    let mut graph = ProjectGraph::new(name, root, objects);

    let target = AddTarget {
        platform: req.platform,
        deployment_target: req.deployment_target.clone(),
        swift_version: req.swift_version.clone(),
        ..AddTarget::new(name, ProductType::Application, req.bundle_identifier())
    };
    targets::insert_target(&mut graph, &target)?;
    targets::navigator_group(&mut graph, name)?;
    graph.objects.group_mut(&main)?.children.push(products);

    tracing::debug!(name, objects = graph.objects.len(), "created project");
    let outcome = Outcome::Applied(format!("Successfully created Xcode project '{}'", name));
    Ok((graph, outcome))
}

fn project_attributes(req: &CreateProject) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("BuildIndependentTargetsInParallel".into(), "1".into());
    if !req.organization_name.is_empty() {
        attributes.insert(
            "ORGANIZATIONNAME".into(),
            req.organization_name.as_str().into(),
        );
    }

    let mut extra = Attributes::new();
    extra.insert("attributes".into(), PlistValue::Dict(attributes));
    extra.insert("hasScannedForEncodings".into(), "0".into());
    extra.insert("minimizedProjectReferenceProxies".into(), "0".into());
    extra.insert("preferredProjectObjectVersion".into(), "56".into());
    extra
}
