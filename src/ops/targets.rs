//! ops::targets
//!
//! Adding, removing and duplicating native targets.
//!
//! # Invariants
//!
//! - Every target owns its configuration list; lists are never shared
//! - A new target always gets Sources, Frameworks and Resources phases, a
//!   product reference in the Products group and a navigator group
//! - Removal leaves no dependency, proxy, build file or configuration
//!   that pointed at the removed target
//! - Removal never deletes a file another target still builds; such files
//!   move from the removed target's navigator group to the main group

use std::collections::HashSet;

use crate::core::graph::ProjectGraph;
use crate::core::model::{
    Attributes, BuildConfiguration, BuildPhase, BuildSettings, ConfigurationList, FileReference,
    Group, NativeTarget, Object, PhaseKind, PlistValue,
};
use crate::core::types::{BuildSettingValue, ObjectId, Platform, ProductType, SourceTree};
use crate::engine::{Notice, Outcome};

use super::cascade::Cascade;
use super::{dependencies, require_target, OpError};

/// Configurations every new target gets.
pub const DEFAULT_CONFIGURATIONS: [&str; 2] = ["Debug", "Release"];

/// Request for [`add_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTarget {
    pub name: String,
    pub product_type: ProductType,
    pub bundle_identifier: String,
    pub platform: Platform,
    pub deployment_target: Option<String>,
    pub swift_version: String,
}

impl AddTarget {
    pub fn new(
        name: impl Into<String>,
        product_type: ProductType,
        bundle_identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            product_type,
            bundle_identifier: bundle_identifier.into(),
            platform: Platform::default(),
            deployment_target: None,
            swift_version: "5.0".to_string(),
        }
    }

    fn settings(&self) -> BuildSettings {
        let mut settings = BuildSettings::new();
        settings.insert("PRODUCT_NAME".into(), "$(TARGET_NAME)".into());
        settings.insert(
            "PRODUCT_BUNDLE_IDENTIFIER".into(),
            self.bundle_identifier.as_str().into(),
        );
        settings.insert("SWIFT_VERSION".into(), self.swift_version.as_str().into());
        settings.insert("SDKROOT".into(), self.platform.sdk_root().into());
        settings.insert(
            "TARGETED_DEVICE_FAMILY".into(),
            self.platform.device_family().into(),
        );
        if let Some(version) = &self.deployment_target {
            settings.insert(
                self.platform.deployment_target_key().into(),
                version.as_str().into(),
            );
        }
        settings
    }
}

/// Add a native target.
pub fn add_target(graph: &mut ProjectGraph, req: &AddTarget) -> Result<Outcome, OpError> {
    if req.name.trim().is_empty() {
        return Err(OpError::InvalidArgument("target name cannot be empty".into()));
    }
    if graph.target_named(&req.name).is_some() {
        return Ok(Outcome::Reported(Notice::TargetExists(req.name.clone())));
    }

    let target = insert_target(graph, req)?;
    navigator_group(graph, &req.name)?;
    tracing::debug!(%target, name = %req.name, "added target");

    Ok(Outcome::Applied(format!(
        "Successfully added target '{}' of type {} for {}",
        req.name, req.product_type, req.platform
    )))
}

/// Build a target with its configurations, phases and product, and append
/// it to the project. Does not create the navigator group.
pub(crate) fn insert_target(
    graph: &mut ProjectGraph,
    req: &AddTarget,
) -> Result<ObjectId, OpError> {
    let settings = req.settings();
    let configurations = DEFAULT_CONFIGURATIONS
        .iter()
        .map(|name| {
            graph.objects.insert(Object::BuildConfiguration(BuildConfiguration::new(
                *name,
                settings.clone(),
            )))
        })
        .collect();
    let list = graph
        .objects
        .insert(Object::ConfigurationList(ConfigurationList::new(
            configurations,
            "Release",
        )));

    let phases = [PhaseKind::Sources, PhaseKind::Frameworks, PhaseKind::Resources]
        .into_iter()
        .map(|kind| graph.objects.insert(Object::BuildPhase(BuildPhase::new(kind))))
        .collect();

    let product = insert_product(graph, &req.name, &req.product_type)?;

    let mut extra = Attributes::new();
    extra.insert("buildRules".into(), PlistValue::Array(Vec::new()));
    let target = graph.objects.insert(Object::NativeTarget(NativeTarget {
        name: req.name.clone(),
        product_name: Some(req.name.clone()),
        product_type: Some(req.product_type.clone()),
        build_configuration_list: list,
        build_phases: phases,
        dependencies: Vec::new(),
        package_product_dependencies: None,
        product: Some(product),
        extra,
    }));
    graph.project_mut()?.targets.push(target.clone());
    Ok(target)
}

/// Create the product reference of a target inside the Products group.
fn insert_product(
    graph: &mut ProjectGraph,
    name: &str,
    product_type: &ProductType,
) -> Result<ObjectId, OpError> {
    let (file_name, file_type) = product_type.product_file(name);
    let product = graph.objects.insert(Object::FileReference(FileReference {
        path: Some(file_name),
        source_tree: SourceTree::BuildProductsDir,
        explicit_file_type: file_type.map(str::to_string),
        include_in_index: Some("0".to_string()),
        ..FileReference::default()
    }));
    let products = products_group(graph)?;
    graph.objects.group_mut(&products)?.children.push(product.clone());
    Ok(product)
}

/// The Products group, created under the main group if the project has none.
fn products_group(graph: &mut ProjectGraph) -> Result<ObjectId, OpError> {
    if let Some(existing) = graph.project()?.products_group.clone() {
        if graph.objects.group(&existing).is_ok() {
            return Ok(existing);
        }
    }
    let main = graph.main_group()?;
    let group = graph.objects.insert(Object::Group(Group::named("Products")));
    graph.objects.group_mut(&main)?.children.push(group.clone());
    graph.project_mut()?.products_group = Some(group.clone());
    Ok(group)
}

/// Find or create the group named `name` directly under the main group.
///
/// New groups are placed before the Products group when it is a child of
/// the main group, the way Xcode lays out a project.
pub(crate) fn navigator_group(
    graph: &mut ProjectGraph,
    name: &str,
) -> Result<ObjectId, OpError> {
    let main = graph.main_group()?;
    let children = graph.objects.group(&main)?.children.clone();
    if let Some(existing) = children.iter().find(|child| {
        graph
            .objects
            .group(child)
            .map(|g| g.display_name() == Some(name))
            .unwrap_or(false)
    }) {
        return Ok(existing.clone());
    }

    let products = graph.project()?.products_group.clone();
    let group = graph.objects.insert(Object::Group(Group::named(name)));
    let main_group = graph.objects.group_mut(&main)?;
    match products.and_then(|p| main_group.children.iter().position(|c| *c == p)) {
        Some(index) => main_group.children.insert(index, group.clone()),
        None => main_group.children.push(group.clone()),
    }
    Ok(group)
}

/// Remove a target and everything it exclusively owns.
pub fn remove_target(graph: &mut ProjectGraph, name: &str) -> Result<Outcome, OpError> {
    let Some(target) = graph.target_named(name) else {
        return Ok(Outcome::Reported(Notice::TargetNotFound(name.to_string())));
    };

    let mut cascade = Cascade::new();
    cascade.remove(target.clone());
    if let Some(product) = graph.objects.target(&target)?.product.clone() {
        cascade.remove(product);
    }
    let main = graph.main_group()?;
    let navigator: Vec<ObjectId> = graph
        .group_tree()
        .into_iter()
        .map(|(group, _)| group)
        .filter(|group| {
            *group != main
                && graph
                    .objects
                    .group(group)
                    .map(|g| g.name.as_deref() == Some(name))
                    .unwrap_or(false)
        })
        .collect();
    let rescued = rescue_shared_files(graph, &target, &navigator)?;
    for group in navigator {
        cascade.remove(group);
    }

    let removed = cascade.run(graph);
    tracing::debug!(%target, removed = removed.len(), rescued, "removed target");
    Ok(Outcome::Applied(format!(
        "Successfully removed target '{}' from project",
        name
    )))
}

/// Move files under `groups` that another target still builds into the
/// main group. Returns how many moved.
fn rescue_shared_files(
    graph: &mut ProjectGraph,
    removed: &ObjectId,
    groups: &[ObjectId],
) -> Result<usize, OpError> {
    let mut in_use = HashSet::new();
    for (id, target) in graph.targets() {
        if id == *removed {
            continue;
        }
        for phase in target.build_phases.iter() {
            let Ok(phase) = graph.objects.phase(phase) else {
                continue;
            };
            in_use.extend(
                phase
                    .files
                    .iter()
                    .filter_map(|bf| graph.objects.build_file(bf).ok())
                    .filter_map(|bf| bf.file_ref.clone()),
            );
        }
    }

    let mut stranded = Vec::new();
    let mut stack = groups.to_vec();
    while let Some(group) = stack.pop() {
        let Ok(group) = graph.objects.group(&group) else {
            continue;
        };
        for child in &group.children {
            if graph.objects.group(child).is_ok() {
                stack.push(child.clone());
            } else if in_use.contains(child) && !stranded.contains(child) {
                stranded.push(child.clone());
            }
        }
    }

    let main = graph.main_group()?;
    for file in &stranded {
        graph.detach_from_groups(file);
        graph.objects.group_mut(&main)?.children.push(file.clone());
        tracing::debug!(%file, "kept file still built by another target");
    }
    Ok(stranded.len())
}

/// Request for [`duplicate_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTarget {
    pub source: String,
    pub new_name: String,
    pub bundle_identifier: Option<String>,
}

/// Copy a target under a new name.
///
/// Build phases get new identities but keep sharing the source's build
/// files. Configurations are deep copies. Dependencies are re-created
/// with their own proxies.
pub fn duplicate_target(
    graph: &mut ProjectGraph,
    req: &DuplicateTarget,
) -> Result<Outcome, OpError> {
    if req.new_name.trim().is_empty() {
        return Err(OpError::InvalidArgument("target name cannot be empty".into()));
    }
    let source = require_target(graph, &req.source)?;
    if graph.target_named(&req.new_name).is_some() {
        return Ok(Outcome::Reported(Notice::TargetExists(req.new_name.clone())));
    }

    let original = graph.objects.target(&source)?.clone();
    let old_list = graph
        .objects
        .configuration_list(&original.build_configuration_list)?
        .clone();
    let configurations: Vec<BuildConfiguration> = graph
        .configurations_of(&original.build_configuration_list)
        .into_iter()
        .map(|(_, config)| rename_configuration(config, &original.name, req))
        .collect();
    let phases: Vec<BuildPhase> = original
        .build_phases
        .iter()
        .map(|id| graph.objects.phase(id).map(copy_phase))
        .collect::<Result<_, _>>()?;
    let dependency_targets: Vec<ObjectId> = original
        .dependencies
        .iter()
        .filter_map(|id| graph.objects.dependency(id).ok())
        .filter_map(|dep| dep.target.clone())
        .collect();

    let configuration_ids: Vec<ObjectId> = configurations
        .into_iter()
        .map(|config| graph.objects.insert(Object::BuildConfiguration(config)))
        .collect();
    let list = graph
        .objects
        .insert(Object::ConfigurationList(ConfigurationList {
            build_configurations: configuration_ids,
            ..old_list
        }));
    let phase_ids: Vec<ObjectId> = phases
        .into_iter()
        .map(|phase| graph.objects.insert(Object::BuildPhase(phase)))
        .collect();
    let dependency_ids: Vec<ObjectId> = dependency_targets
        .iter()
        .map(|dep| dependencies::insert_dependency(graph, dep))
        .collect::<Result<_, _>>()?;
    let product = match (&original.product, &original.product_type) {
        (Some(_), Some(product_type)) => Some(insert_product(graph, &req.new_name, product_type)?),
        _ => None,
    };

    let copy = graph.objects.insert(Object::NativeTarget(NativeTarget {
        name: req.new_name.clone(),
        product_name: Some(req.new_name.clone()),
        product_type: original.product_type.clone(),
        build_configuration_list: list,
        build_phases: phase_ids,
        dependencies: dependency_ids,
        package_product_dependencies: original.package_product_dependencies.clone(),
        product,
        extra: original.extra.clone(),
    }));
    graph.project_mut()?.targets.push(copy.clone());
    copy_target_attributes(graph, &source, &copy)?;
    navigator_group(graph, &req.new_name)?;

    tracing::debug!(%source, %copy, "duplicated target");
    Ok(Outcome::Applied(format!(
        "Successfully duplicated target '{}' as '{}'",
        req.source, req.new_name
    )))
}

fn rename_configuration(
    config: &BuildConfiguration,
    old_name: &str,
    req: &DuplicateTarget,
) -> BuildConfiguration {
    let mut copy = config.clone();
    let settings = &mut copy.build_settings;
    settings.insert("PRODUCT_NAME".into(), req.new_name.as_str().into());
    if let Some(bundle) = &req.bundle_identifier {
        settings.insert("PRODUCT_BUNDLE_IDENTIFIER".into(), bundle.as_str().into());
    }
    if let Some(BuildSettingValue::String(plist)) = settings.get_mut("INFOPLIST_FILE") {
        *plist = plist.replace(old_name, &req.new_name);
    }
    copy
}

fn copy_phase(phase: &BuildPhase) -> BuildPhase {
    match &phase.kind {
        // File lists stay shared with the source target.
        PhaseKind::Sources | PhaseKind::Resources | PhaseKind::Frameworks | PhaseKind::Headers => {
            BuildPhase {
                files: phase.files.clone(),
                build_action_mask: phase.build_action_mask.clone(),
                run_only_for_deployment_postprocessing: phase
                    .run_only_for_deployment_postprocessing
                    .clone(),
                ..BuildPhase::new(phase.kind.clone())
            }
        }
        PhaseKind::ShellScript(_) | PhaseKind::CopyFiles(_) => phase.clone(),
    }
}

/// Copy the `TargetAttributes` entry of `from` to `to`, if there is one.
fn copy_target_attributes(
    graph: &mut ProjectGraph,
    from: &ObjectId,
    to: &ObjectId,
) -> Result<(), OpError> {
    let project = graph.project_mut()?;
    let Some(attributes) = project
        .extra
        .get_mut("attributes")
        .and_then(PlistValue::as_dict_mut)
        .and_then(|a| a.get_mut("TargetAttributes"))
        .and_then(PlistValue::as_dict_mut)
    else {
        return Ok(());
    };
    if let Some(entry) = attributes.get(from.as_str()).cloned() {
        attributes.insert(to.as_str().to_string(), entry);
    }
    Ok(())
}
