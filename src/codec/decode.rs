//! codec::decode
//!
//! Property-list document to [`ProjectGraph`].
//!
//! Known `isa` values become typed entities; every attribute the entity
//! does not model is kept in its `extra` map. An object whose `isa` is
//! unknown, or whose attributes do not have the shape the model expects,
//! is kept verbatim as a raw object. Only a document without an object
//! table or a usable root project is rejected.

use std::collections::BTreeMap;

use super::CodecError;
use crate::core::graph::ProjectGraph;
use crate::core::model::{
    Attributes, BuildConfiguration, BuildFile, BuildPhase, BuildSettings, ConfigurationList,
    ContainerItemProxy, CopyFiles, FileReference, Group, LocalPackageReference, NativeTarget,
    Object, ObjectKind, PhaseKind, PlistValue, Project, RawObject, RemotePackageReference,
    ShellScript, SwiftPackageProductDependency, TargetDependency,
};
use crate::core::store::ObjectStore;
use crate::core::types::{
    BuildSettingValue, ObjectId, ProductType, ProxyType, SourceTree, VersionRequirement,
};

/// Why a typed decode fell back to a raw object.
type Shape<T> = Result<T, String>;

/// Decode a parsed document.
///
/// `name` is the bundle name the graph is loaded from.
pub fn decode(document: PlistValue, name: &str) -> Result<ProjectGraph, CodecError> {
    let PlistValue::Dict(mut top) = document else {
        return Err(malformed("top level is not a dictionary"));
    };

    let archive_version = take_string(&mut top, "archiveVersion")
        .map_err(malformed)?
        .unwrap_or_else(|| ProjectGraph::ARCHIVE_VERSION.to_string());
    let object_version = take_string(&mut top, "objectVersion")
        .map_err(malformed)?
        .ok_or_else(|| malformed("missing objectVersion"))?;
    let classes = match top.remove("classes") {
        Some(PlistValue::Dict(map)) => map,
        None => Attributes::new(),
        Some(_) => return Err(malformed("classes is not a dictionary")),
    };
    let root = take_id(&mut top, "rootObject")
        .map_err(malformed)?
        .ok_or_else(|| malformed("missing rootObject"))?;
    let objects = match top.remove("objects") {
        Some(PlistValue::Dict(map)) => map,
        _ => return Err(malformed("missing objects table")),
    };

    let mut store = ObjectStore::new(root.as_str());
    for (key, value) in objects {
        let id = ObjectId::new(key.as_str())
            .map_err(|e| malformed(format!("object key '{}': {}", key, e)))?;
        let PlistValue::Dict(attrs) = value else {
            return Err(malformed(format!("object {} is not a dictionary", id)));
        };
        let object = decode_object(&id, attrs)?;
        store
            .add(id, object)
            .map_err(|e| malformed(e.to_string()))?;
    }

    if store.project(&root).is_err() {
        return Err(malformed(format!(
            "root object {} is missing or not a PBXProject",
            root
        )));
    }

    let mut graph = ProjectGraph::new(name, root, store);
    graph.archive_version = archive_version;
    graph.object_version = object_version;
    graph.classes = classes;
    tracing::debug!(objects = graph.objects.len(), "project decoded");
    Ok(graph)
}

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::MalformedProject(message.into())
}

fn decode_object(id: &ObjectId, attrs: Attributes) -> Result<Object, CodecError> {
    let isa = attrs
        .get("isa")
        .and_then(PlistValue::as_str)
        .ok_or_else(|| malformed(format!("object {} has no isa", id)))?
        .to_string();
    let kind = ObjectKind::from_isa(&isa);

    let mut fields = attrs.clone();
    fields.remove("isa");
    match decode_typed(kind, &mut fields) {
        Ok(Some(object)) => Ok(object),
        Ok(None) => Ok(raw(isa, attrs)),
        Err(reason) => {
            if kind == ObjectKind::Project {
                return Err(malformed(format!("project object {}: {}", id, reason)));
            }
            tracing::warn!(%id, %isa, %reason, "keeping object unmodeled");
            Ok(raw(isa, attrs))
        }
    }
}

fn raw(isa: String, mut attributes: Attributes) -> Object {
    attributes.remove("isa");
    Object::Raw(RawObject { isa, attributes })
}

fn decode_typed(kind: ObjectKind, f: &mut Attributes) -> Shape<Option<Object>> {
    let object = match kind {
        ObjectKind::Project => Object::Project(Project {
            build_configuration_list: required_id(f, "buildConfigurationList")?,
            compatibility_version: take_string(f, "compatibilityVersion")?,
            development_region: take_string(f, "developmentRegion")?,
            known_regions: take_strings(f, "knownRegions")?,
            main_group: required_id(f, "mainGroup")?,
            products_group: take_id(f, "productRefGroup")?,
            project_dir_path: take_string(f, "projectDirPath")?.unwrap_or_default(),
            project_root: take_string(f, "projectRoot")?.unwrap_or_default(),
            targets: take_ids(f, "targets")?.unwrap_or_default(),
            package_references: take_ids(f, "packageReferences")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::Group => Object::Group(Group {
            children: take_ids(f, "children")?.unwrap_or_default(),
            name: take_string(f, "name")?,
            path: take_string(f, "path")?,
            source_tree: source_tree(f)?,
            extra: std::mem::take(f),
        }),
        ObjectKind::FileReference => Object::FileReference(FileReference {
            name: take_string(f, "name")?,
            path: take_string(f, "path")?,
            source_tree: source_tree(f)?,
            explicit_file_type: take_string(f, "explicitFileType")?,
            last_known_file_type: take_string(f, "lastKnownFileType")?,
            include_in_index: take_string(f, "includeInIndex")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::NativeTarget => Object::NativeTarget(NativeTarget {
            name: required_string(f, "name")?,
            product_name: take_string(f, "productName")?,
            product_type: take_string(f, "productType")?
                .map(|t| ProductType::from_identifier(&t)),
            build_configuration_list: required_id(f, "buildConfigurationList")?,
            build_phases: take_ids(f, "buildPhases")?.unwrap_or_default(),
            dependencies: take_ids(f, "dependencies")?.unwrap_or_default(),
            package_product_dependencies: take_ids(f, "packageProductDependencies")?,
            product: take_id(f, "productReference")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::SourcesBuildPhase
        | ObjectKind::ResourcesBuildPhase
        | ObjectKind::FrameworksBuildPhase
        | ObjectKind::HeadersBuildPhase
        | ObjectKind::ShellScriptBuildPhase
        | ObjectKind::CopyFilesBuildPhase => Object::BuildPhase(build_phase(kind, f)?),
        ObjectKind::BuildFile => Object::BuildFile(BuildFile {
            file_ref: take_id(f, "fileRef")?,
            product_ref: take_id(f, "productRef")?,
            settings: match f.remove("settings") {
                Some(PlistValue::Dict(map)) => Some(map),
                Some(_) => return Err("settings is not a dictionary".into()),
                None => None,
            },
            extra: std::mem::take(f),
        }),
        ObjectKind::BuildConfiguration => Object::BuildConfiguration(BuildConfiguration {
            name: required_string(f, "name")?,
            build_settings: build_settings(f)?,
            base_configuration_reference: take_id(f, "baseConfigurationReference")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::ConfigurationList => Object::ConfigurationList(ConfigurationList {
            build_configurations: take_ids(f, "buildConfigurations")?.unwrap_or_default(),
            default_configuration_is_visible: take_string(f, "defaultConfigurationIsVisible")?,
            default_configuration_name: take_string(f, "defaultConfigurationName")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::TargetDependency => Object::TargetDependency(TargetDependency {
            name: take_string(f, "name")?,
            target: take_id(f, "target")?,
            target_proxy: take_id(f, "targetProxy")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::ContainerItemProxy => Object::ContainerItemProxy(ContainerItemProxy {
            container_portal: required_id(f, "containerPortal")?,
            proxy_type: ProxyType::parse(&required_string(f, "proxyType")?),
            remote_global_id: required_id(f, "remoteGlobalIDString")?,
            remote_info: take_string(f, "remoteInfo")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::RemotePackageReference => Object::RemotePackage(RemotePackageReference {
            repository_url: required_string(f, "repositoryURL")?,
            requirement: requirement(f),
            extra: std::mem::take(f),
        }),
        ObjectKind::LocalPackageReference => Object::LocalPackage(LocalPackageReference {
            relative_path: required_string(f, "relativePath")?,
            extra: std::mem::take(f),
        }),
        ObjectKind::SwiftPackageProductDependency => {
            Object::PackageProduct(SwiftPackageProductDependency {
                package: take_id(f, "package")?,
                product_name: required_string(f, "productName")?,
                extra: std::mem::take(f),
            })
        }
        ObjectKind::Other => return Ok(None),
    };
    Ok(Some(object))
}

fn build_phase(kind: ObjectKind, f: &mut Attributes) -> Shape<BuildPhase> {
    let phase_kind = match kind {
        ObjectKind::SourcesBuildPhase => PhaseKind::Sources,
        ObjectKind::ResourcesBuildPhase => PhaseKind::Resources,
        ObjectKind::FrameworksBuildPhase => PhaseKind::Frameworks,
        ObjectKind::HeadersBuildPhase => PhaseKind::Headers,
        ObjectKind::ShellScriptBuildPhase => PhaseKind::ShellScript(ShellScript {
            shell_path: take_string(f, "shellPath")?.unwrap_or_default(),
            shell_script: take_string(f, "shellScript")?.unwrap_or_default(),
            input_paths: take_strings(f, "inputPaths")?.unwrap_or_default(),
            output_paths: take_strings(f, "outputPaths")?.unwrap_or_default(),
        }),
        ObjectKind::CopyFilesBuildPhase => {
            let spec = required_string(f, "dstSubfolderSpec")?;
            PhaseKind::CopyFiles(CopyFiles {
                dst_path: take_string(f, "dstPath")?.unwrap_or_default(),
                dst_subfolder_spec: spec
                    .parse()
                    .map_err(|_| format!("dstSubfolderSpec '{}' is not a number", spec))?,
            })
        }
        other => return Err(format!("{:?} is not a build phase", other)),
    };
    Ok(BuildPhase {
        kind: phase_kind,
        name: take_string(f, "name")?,
        files: take_ids(f, "files")?.unwrap_or_default(),
        build_action_mask: take_string(f, "buildActionMask")?
            .unwrap_or_else(|| BuildPhase::DEFAULT_ACTION_MASK.to_string()),
        run_only_for_deployment_postprocessing: take_string(
            f,
            "runOnlyForDeploymentPostprocessing",
        )?
        .unwrap_or_else(|| "0".to_string()),
        extra: std::mem::take(f),
    })
}

fn build_settings(f: &mut Attributes) -> Shape<BuildSettings> {
    let Some(value) = f.remove("buildSettings") else {
        return Ok(BTreeMap::new());
    };
    let PlistValue::Dict(map) = value else {
        return Err("buildSettings is not a dictionary".into());
    };
    map.into_iter()
        .map(|(key, value)| {
            let setting = match value {
                PlistValue::String(s) => BuildSettingValue::String(s),
                PlistValue::Array(items) => BuildSettingValue::List(
                    items
                        .into_iter()
                        .map(|item| match item {
                            PlistValue::String(s) => Ok(s),
                            _ => Err(format!("build setting {} holds a nested value", key)),
                        })
                        .collect::<Result<_, _>>()?,
                ),
                PlistValue::Dict(_) => {
                    return Err(format!("build setting {} is a dictionary", key));
                }
            };
            Ok((key, setting))
        })
        .collect()
}

/// Decode `requirement`; an unknown shape stays in `extra`.
fn requirement(f: &mut Attributes) -> Option<VersionRequirement> {
    let map = f.get("requirement")?.as_dict()?;
    let get = |key: &str| map.get(key).and_then(PlistValue::as_str).map(str::to_string);
    let parsed = match map.get("kind").and_then(PlistValue::as_str)? {
        "exactVersion" => VersionRequirement::Exact(get("version")?),
        "upToNextMajorVersion" => VersionRequirement::UpToNextMajor(get("minimumVersion")?),
        "upToNextMinorVersion" => VersionRequirement::UpToNextMinor(get("minimumVersion")?),
        "versionRange" => VersionRequirement::Range {
            minimum: get("minimumVersion")?,
            maximum: get("maximumVersion")?,
        },
        "branch" => VersionRequirement::Branch(get("branch")?),
        "revision" => VersionRequirement::Revision(get("revision")?),
        _ => return None,
    };
    if map.len() != parsed_key_count(&parsed) {
        return None;
    }
    f.remove("requirement");
    Some(parsed)
}

fn parsed_key_count(requirement: &VersionRequirement) -> usize {
    match requirement {
        VersionRequirement::Range { .. } => 3,
        _ => 2,
    }
}

fn source_tree(f: &mut Attributes) -> Shape<SourceTree> {
    Ok(take_string(f, "sourceTree")?
        .map(|raw| SourceTree::parse(&raw))
        .unwrap_or_default())
}

fn take_string(f: &mut Attributes, key: &str) -> Shape<Option<String>> {
    match f.remove(key) {
        Some(PlistValue::String(s)) => Ok(Some(s)),
        Some(_) => Err(format!("{} is not a string", key)),
        None => Ok(None),
    }
}

fn required_string(f: &mut Attributes, key: &str) -> Shape<String> {
    take_string(f, key)?.ok_or_else(|| format!("missing {}", key))
}

fn take_strings(f: &mut Attributes, key: &str) -> Shape<Option<Vec<String>>> {
    match f.remove(key) {
        Some(PlistValue::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                PlistValue::String(s) => Ok(s),
                _ => Err(format!("{} holds a non-string", key)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(format!("{} is not an array", key)),
        None => Ok(None),
    }
}

fn take_id(f: &mut Attributes, key: &str) -> Shape<Option<ObjectId>> {
    take_string(f, key)?
        .map(|s| ObjectId::new(s).map_err(|e| format!("{}: {}", key, e)))
        .transpose()
}

fn required_id(f: &mut Attributes, key: &str) -> Shape<ObjectId> {
    take_id(f, key)?.ok_or_else(|| format!("missing {}", key))
}

fn take_ids(f: &mut Attributes, key: &str) -> Shape<Option<Vec<ObjectId>>> {
    take_strings(f, key)?
        .map(|items| {
            items
                .into_iter()
                .map(|s| ObjectId::new(s).map_err(|e| format!("{}: {}", key, e)))
                .collect()
        })
        .transpose()
}
