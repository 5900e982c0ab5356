//! codec::encode
//!
//! [`ProjectGraph`] to a writable [`Document`].
//!
//! Each typed entity is flattened back into its plist attributes, merged
//! with the unmodeled `extra` attributes it was loaded with. Annotation
//! text (`/* Foo.swift in Sources */`) is derived here because it needs
//! graph context: a build file is named after its file and its phase, a
//! configuration list after its owner.

use std::collections::HashMap;

use super::writer::{Document, EncodedObject};
use crate::core::graph::ProjectGraph;
use crate::core::model::{Attributes, Object, PhaseKind, PlistValue};
use crate::core::types::{BuildSettingValue, ObjectId, VersionRequirement};

/// Flatten a graph for writing.
pub fn encode(graph: &ProjectGraph) -> Document {
    let objects = graph
        .objects
        .iter()
        .map(|(id, object)| EncodedObject {
            id: id.to_string(),
            isa: object.isa().to_string(),
            attributes: attributes(object),
        })
        .collect();

    Document {
        archive_version: graph.archive_version.clone(),
        classes: graph.classes.clone(),
        object_version: graph.object_version.clone(),
        objects,
        root: graph.root.to_string(),
        annotations: annotations(graph),
    }
}

fn string(value: impl Into<String>) -> PlistValue {
    PlistValue::String(value.into())
}

fn ids(list: &[ObjectId]) -> PlistValue {
    PlistValue::Array(list.iter().map(|id| string(id.as_str())).collect())
}

fn strings(list: &[String]) -> PlistValue {
    PlistValue::Array(list.iter().map(|s| string(s.as_str())).collect())
}

struct Fields(Attributes);

impl Fields {
    fn set(&mut self, key: &str, value: PlistValue) {
        self.0.insert(key.to_string(), value);
    }

    fn opt(&mut self, key: &str, value: &Option<String>) {
        if let Some(v) = value {
            self.set(key, string(v.as_str()));
        }
    }

    fn opt_id(&mut self, key: &str, value: &Option<ObjectId>) {
        if let Some(v) = value {
            self.set(key, string(v.as_str()));
        }
    }

    fn finish(mut self, extra: &Attributes) -> Attributes {
        for (key, value) in extra {
            self.0.entry(key.clone()).or_insert_with(|| value.clone());
        }
        self.0
    }
}

/// Plist attributes of one object, without `isa`.
pub fn attributes(object: &Object) -> Attributes {
    let mut f = Fields(Attributes::new());
    match object {
        Object::Project(p) => {
            f.set("buildConfigurationList", string(p.build_configuration_list.as_str()));
            f.opt("compatibilityVersion", &p.compatibility_version);
            f.opt("developmentRegion", &p.development_region);
            if let Some(regions) = &p.known_regions {
                f.set("knownRegions", strings(regions));
            }
            f.set("mainGroup", string(p.main_group.as_str()));
            f.opt_id("productRefGroup", &p.products_group);
            f.set("projectDirPath", string(p.project_dir_path.as_str()));
            f.set("projectRoot", string(p.project_root.as_str()));
            f.set("targets", ids(&p.targets));
            if let Some(packages) = &p.package_references {
                f.set("packageReferences", ids(packages));
            }
            f.finish(&p.extra)
        }
        Object::Group(g) => {
            f.set("children", ids(&g.children));
            f.opt("name", &g.name);
            f.opt("path", &g.path);
            f.set("sourceTree", string(g.source_tree.as_str()));
            f.finish(&g.extra)
        }
        Object::FileReference(r) => {
            f.opt("name", &r.name);
            f.opt("path", &r.path);
            f.set("sourceTree", string(r.source_tree.as_str()));
            f.opt("explicitFileType", &r.explicit_file_type);
            f.opt("lastKnownFileType", &r.last_known_file_type);
            f.opt("includeInIndex", &r.include_in_index);
            f.finish(&r.extra)
        }
        Object::NativeTarget(t) => {
            f.set("name", string(t.name.as_str()));
            f.opt("productName", &t.product_name);
            if let Some(product_type) = &t.product_type {
                f.set("productType", string(product_type.identifier()));
            }
            f.set("buildConfigurationList", string(t.build_configuration_list.as_str()));
            f.set("buildPhases", ids(&t.build_phases));
            f.set("dependencies", ids(&t.dependencies));
            if let Some(products) = &t.package_product_dependencies {
                f.set("packageProductDependencies", ids(products));
            }
            f.opt_id("productReference", &t.product);
            f.finish(&t.extra)
        }
        Object::BuildPhase(p) => {
            f.set("buildActionMask", string(p.build_action_mask.as_str()));
            f.set("files", ids(&p.files));
            f.opt("name", &p.name);
            f.set(
                "runOnlyForDeploymentPostprocessing",
                string(p.run_only_for_deployment_postprocessing.as_str()),
            );
            match &p.kind {
                PhaseKind::Sources
                | PhaseKind::Resources
                | PhaseKind::Frameworks
                | PhaseKind::Headers => {}
                PhaseKind::ShellScript(script) => {
                    f.set("inputPaths", strings(&script.input_paths));
                    f.set("outputPaths", strings(&script.output_paths));
                    f.set("shellPath", string(script.shell_path.as_str()));
                    f.set("shellScript", string(script.shell_script.as_str()));
                }
                PhaseKind::CopyFiles(copy) => {
                    f.set("dstPath", string(copy.dst_path.as_str()));
                    f.set("dstSubfolderSpec", string(copy.dst_subfolder_spec.to_string()));
                }
            }
            f.finish(&p.extra)
        }
        Object::BuildFile(b) => {
            f.opt_id("fileRef", &b.file_ref);
            f.opt_id("productRef", &b.product_ref);
            if let Some(settings) = &b.settings {
                f.set("settings", PlistValue::Dict(settings.clone()));
            }
            f.finish(&b.extra)
        }
        Object::BuildConfiguration(c) => {
            f.opt_id("baseConfigurationReference", &c.base_configuration_reference);
            let settings = c
                .build_settings
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        BuildSettingValue::String(s) => string(s.as_str()),
                        BuildSettingValue::List(items) => strings(items),
                    };
                    (key.clone(), value)
                })
                .collect();
            f.set("buildSettings", PlistValue::Dict(settings));
            f.set("name", string(c.name.as_str()));
            f.finish(&c.extra)
        }
        Object::ConfigurationList(l) => {
            f.set("buildConfigurations", ids(&l.build_configurations));
            f.opt("defaultConfigurationIsVisible", &l.default_configuration_is_visible);
            f.opt("defaultConfigurationName", &l.default_configuration_name);
            f.finish(&l.extra)
        }
        Object::TargetDependency(d) => {
            f.opt("name", &d.name);
            f.opt_id("target", &d.target);
            f.opt_id("targetProxy", &d.target_proxy);
            f.finish(&d.extra)
        }
        Object::ContainerItemProxy(p) => {
            f.set("containerPortal", string(p.container_portal.as_str()));
            f.set("proxyType", string(p.proxy_type.as_str()));
            f.set("remoteGlobalIDString", string(p.remote_global_id.as_str()));
            f.opt("remoteInfo", &p.remote_info);
            f.finish(&p.extra)
        }
        Object::RemotePackage(p) => {
            f.set("repositoryURL", string(p.repository_url.as_str()));
            if let Some(requirement) = &p.requirement {
                f.set("requirement", encode_requirement(requirement));
            }
            f.finish(&p.extra)
        }
        Object::LocalPackage(p) => {
            f.set("relativePath", string(p.relative_path.as_str()));
            f.finish(&p.extra)
        }
        Object::PackageProduct(p) => {
            f.opt_id("package", &p.package);
            f.set("productName", string(p.product_name.as_str()));
            f.finish(&p.extra)
        }
        Object::Raw(raw) => raw.attributes.clone(),
    }
}

fn encode_requirement(requirement: &VersionRequirement) -> PlistValue {
    let mut map = Attributes::new();
    let mut put = |key: &str, value: &str| {
        map.insert(key.to_string(), string(value));
    };
    match requirement {
        VersionRequirement::Exact(v) => {
            put("kind", "exactVersion");
            put("version", v);
        }
        VersionRequirement::UpToNextMajor(v) => {
            put("kind", "upToNextMajorVersion");
            put("minimumVersion", v);
        }
        VersionRequirement::UpToNextMinor(v) => {
            put("kind", "upToNextMinorVersion");
            put("minimumVersion", v);
        }
        VersionRequirement::Range { minimum, maximum } => {
            put("kind", "versionRange");
            put("minimumVersion", minimum);
            put("maximumVersion", maximum);
        }
        VersionRequirement::Branch(b) => {
            put("kind", "branch");
            put("branch", b);
        }
        VersionRequirement::Revision(r) => {
            put("kind", "revision");
            put("revision", r);
        }
    }
    PlistValue::Dict(map)
}

/// Annotation text for every object that has one.
pub fn annotations(graph: &ProjectGraph) -> HashMap<String, String> {
    let store = &graph.objects;

    let mut phase_of_file: HashMap<&ObjectId, &str> = HashMap::new();
    for (_, phase) in store.build_phases() {
        for file in &phase.files {
            phase_of_file.entry(file).or_insert_with(|| phase.display_name());
        }
    }

    let mut owner_of_list: HashMap<&ObjectId, String> = HashMap::new();
    for (_, object) in store.iter() {
        match object {
            Object::Project(p) => {
                owner_of_list.insert(
                    &p.build_configuration_list,
                    format!("PBXProject \"{}\"", graph.name),
                );
            }
            Object::NativeTarget(t) => {
                owner_of_list.insert(
                    &t.build_configuration_list,
                    format!("PBXNativeTarget \"{}\"", t.name),
                );
            }
            _ => {}
        }
    }

    let name_of = |id: &ObjectId| -> Option<String> {
        match store.get(id)? {
            Object::FileReference(f) => f.display_name().map(str::to_string),
            Object::PackageProduct(p) => Some(p.product_name.clone()),
            Object::Raw(raw) => raw_name(&raw.attributes),
            Object::Group(g) => g.display_name().map(str::to_string),
            _ => None,
        }
    };

    let mut out = HashMap::new();
    for (id, object) in store.iter() {
        let comment = match object {
            Object::Project(_) => Some("Project object".to_string()),
            Object::Group(g) => g.display_name().map(str::to_string),
            Object::FileReference(f) => f.display_name().map(str::to_string),
            Object::NativeTarget(t) => Some(t.name.clone()),
            Object::BuildPhase(p) => Some(p.display_name().to_string()),
            Object::BuildFile(b) => {
                let file = b
                    .file_ref
                    .as_ref()
                    .or(b.product_ref.as_ref())
                    .and_then(|file| name_of(file));
                match (file, phase_of_file.get(id)) {
                    (Some(file), Some(phase)) => Some(format!("{} in {}", file, phase)),
                    (Some(file), None) => Some(file),
                    (None, Some(phase)) => Some(format!("(null) in {}", phase)),
                    (None, None) => None,
                }
            }
            Object::BuildConfiguration(c) => Some(c.name.clone()),
            Object::ConfigurationList(_) => owner_of_list
                .get(id)
                .map(|owner| format!("Build configuration list for {}", owner)),
            Object::TargetDependency(_) => Some("PBXTargetDependency".to_string()),
            Object::ContainerItemProxy(_) => Some("PBXContainerItemProxy".to_string()),
            Object::RemotePackage(p) => Some(format!(
                "XCRemoteSwiftPackageReference \"{}\"",
                p.package_name()
            )),
            Object::LocalPackage(p) => Some(format!(
                "XCLocalSwiftPackageReference \"{}\"",
                p.relative_path
            )),
            Object::PackageProduct(p) => Some(p.product_name.clone()),
            Object::Raw(raw) => raw_name(&raw.attributes),
        };
        if let Some(comment) = comment {
            out.insert(id.to_string(), comment.replace("*/", "*\\/"));
        }
    }
    out
}

fn raw_name(attrs: &Attributes) -> Option<String> {
    attrs
        .get("name")
        .or_else(|| attrs.get("path"))
        .and_then(PlistValue::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{BuildFile, BuildPhase, FileReference, RemotePackageReference};
    use crate::core::store::ObjectStore;

    fn graph_with(objects: Vec<Object>) -> (ProjectGraph, Vec<ObjectId>) {
        let mut store = ObjectStore::new("encode");
        let ids = objects.into_iter().map(|o| store.insert(o)).collect();
        let root = ObjectId::new("ROOT").unwrap();
        (ProjectGraph::new("Demo", root, store), ids)
    }

    #[test]
    fn build_file_comment_names_file_and_phase() {
        let mut store = ObjectStore::new("encode");
        let file = store.insert(Object::FileReference(FileReference {
            path: Some("Sources/Foo.swift".into()),
            ..FileReference::default()
        }));
        let build = store.insert(Object::BuildFile(BuildFile::for_file(file.clone())));
        store.insert(Object::BuildPhase(BuildPhase {
            files: vec![build.clone()],
            ..BuildPhase::new(PhaseKind::Sources)
        }));
        let graph = ProjectGraph::new("Demo", ObjectId::new("ROOT").unwrap(), store);

        let notes = annotations(&graph);
        assert_eq!(notes[build.as_str()], "Foo.swift in Sources");
        assert_eq!(notes[file.as_str()], "Foo.swift");
    }

    #[test]
    fn remote_package_attributes() {
        let (graph, ids) = graph_with(vec![Object::RemotePackage(RemotePackageReference {
            repository_url: "https://github.com/apple/swift-log.git".into(),
            requirement: Some(VersionRequirement::UpToNextMajor("1.5.0".into())),
            extra: Attributes::new(),
        })]);
        let object = graph.objects.get(&ids[0]).unwrap();
        let attrs = attributes(object);
        let req = attrs["requirement"].as_dict().unwrap();
        assert_eq!(req["kind"], string("upToNextMajorVersion"));
        assert_eq!(req["minimumVersion"], string("1.5.0"));
        assert_eq!(
            annotations(&graph)[ids[0].as_str()],
            "XCRemoteSwiftPackageReference \"swift-log\""
        );
    }

    #[test]
    fn extra_attributes_are_merged() {
        let mut extra = Attributes::new();
        extra.insert("fileEncoding".into(), string("4"));
        let (graph, ids) = graph_with(vec![Object::FileReference(FileReference {
            path: Some("a.swift".into()),
            extra,
            ..FileReference::default()
        })]);
        let attrs = attributes(graph.objects.get(&ids[0]).unwrap());
        assert_eq!(attrs["fileEncoding"], string("4"));
        assert_eq!(attrs["sourceTree"], string("<group>"));
        assert!(!attrs.contains_key("isa"));
    }
}
