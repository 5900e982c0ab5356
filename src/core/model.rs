//! core::model
//!
//! Typed entities of the project object graph.
//!
//! # Architecture
//!
//! Every node in the graph is an [`Object`], a closed enum with one variant
//! per entity family. Build phases, version requirements and product types
//! are closed variant types too, so every operation matches them
//! exhaustively.
//!
//! Attributes the model does not know about are carried in an `extra`
//! map on each entity, and objects whose `isa` is unknown are kept as
//! [`RawObject`]. Nothing read from an Xcode-authored file is dropped.
//!
//! # Edges
//!
//! [`Object::edges`] lists every identifier an object points at, tagged with
//! the kind of relationship:
//! - [`Edge::Owns`] - the object is responsible for the target's lifetime
//! - [`Edge::Refers`] - a weak reference that must not dangle
//! - [`Edge::Opaque`] - a token inside unmodeled data that happens to look
//!   like an identifier

use std::collections::BTreeMap;

use super::types::{
    BuildSettingValue, CopyFilesDestination, ObjectId, ProductType, ProxyType, SourceTree,
    VersionRequirement,
};

/// Unmodeled attributes, keyed by plist key.
pub type Attributes = BTreeMap<String, PlistValue>;

/// Build settings of a configuration.
pub type BuildSettings = BTreeMap<String, BuildSettingValue>;

/// A value in the project file's property-list dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    String(String),
    Array(Vec<PlistValue>),
    Dict(Attributes),
}

impl PlistValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Attributes> {
        match self {
            PlistValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            PlistValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Collect every string in the value, dictionary keys included.
    pub fn collect_strings<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            PlistValue::String(s) => out.push(s),
            PlistValue::Array(items) => items.iter().for_each(|v| v.collect_strings(out)),
            PlistValue::Dict(map) => {
                for (key, value) in map {
                    out.push(key);
                    value.collect_strings(out);
                }
            }
        }
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

/// Kind discriminator of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Project,
    Group,
    FileReference,
    NativeTarget,
    SourcesBuildPhase,
    ResourcesBuildPhase,
    FrameworksBuildPhase,
    HeadersBuildPhase,
    ShellScriptBuildPhase,
    CopyFilesBuildPhase,
    BuildFile,
    BuildConfiguration,
    ConfigurationList,
    TargetDependency,
    ContainerItemProxy,
    RemotePackageReference,
    LocalPackageReference,
    SwiftPackageProductDependency,
    Other,
}

impl ObjectKind {
    /// The `isa` written to disk. `Other` has no fixed name.
    pub fn isa(&self) -> &'static str {
        match self {
            ObjectKind::Project => "PBXProject",
            ObjectKind::Group => "PBXGroup",
            ObjectKind::FileReference => "PBXFileReference",
            ObjectKind::NativeTarget => "PBXNativeTarget",
            ObjectKind::SourcesBuildPhase => "PBXSourcesBuildPhase",
            ObjectKind::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            ObjectKind::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            ObjectKind::HeadersBuildPhase => "PBXHeadersBuildPhase",
            ObjectKind::ShellScriptBuildPhase => "PBXShellScriptBuildPhase",
            ObjectKind::CopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            ObjectKind::BuildFile => "PBXBuildFile",
            ObjectKind::BuildConfiguration => "XCBuildConfiguration",
            ObjectKind::ConfigurationList => "XCConfigurationList",
            ObjectKind::TargetDependency => "PBXTargetDependency",
            ObjectKind::ContainerItemProxy => "PBXContainerItemProxy",
            ObjectKind::RemotePackageReference => "XCRemoteSwiftPackageReference",
            ObjectKind::LocalPackageReference => "XCLocalSwiftPackageReference",
            ObjectKind::SwiftPackageProductDependency => "XCSwiftPackageProductDependency",
            ObjectKind::Other => "",
        }
    }

    pub fn from_isa(isa: &str) -> Self {
        match isa {
            "PBXProject" => ObjectKind::Project,
            "PBXGroup" => ObjectKind::Group,
            "PBXFileReference" => ObjectKind::FileReference,
            "PBXNativeTarget" => ObjectKind::NativeTarget,
            "PBXSourcesBuildPhase" => ObjectKind::SourcesBuildPhase,
            "PBXResourcesBuildPhase" => ObjectKind::ResourcesBuildPhase,
            "PBXFrameworksBuildPhase" => ObjectKind::FrameworksBuildPhase,
            "PBXHeadersBuildPhase" => ObjectKind::HeadersBuildPhase,
            "PBXShellScriptBuildPhase" => ObjectKind::ShellScriptBuildPhase,
            "PBXCopyFilesBuildPhase" => ObjectKind::CopyFilesBuildPhase,
            "PBXBuildFile" => ObjectKind::BuildFile,
            "XCBuildConfiguration" => ObjectKind::BuildConfiguration,
            "XCConfigurationList" => ObjectKind::ConfigurationList,
            "PBXTargetDependency" => ObjectKind::TargetDependency,
            "PBXContainerItemProxy" => ObjectKind::ContainerItemProxy,
            "XCRemoteSwiftPackageReference" => ObjectKind::RemotePackageReference,
            "XCLocalSwiftPackageReference" => ObjectKind::LocalPackageReference,
            "XCSwiftPackageProductDependency" => ObjectKind::SwiftPackageProductDependency,
            _ => ObjectKind::Other,
        }
    }
}

/// Relationship kind of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Owns,
    Refers,
    Opaque,
}

/// The project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub build_configuration_list: ObjectId,
    pub compatibility_version: Option<String>,
    pub development_region: Option<String>,
    pub known_regions: Option<Vec<String>>,
    pub main_group: ObjectId,
    pub products_group: Option<ObjectId>,
    pub project_dir_path: String,
    pub project_root: String,
    pub targets: Vec<ObjectId>,
    /// Remote and local package references, in file order.
    pub package_references: Option<Vec<ObjectId>>,
    pub extra: Attributes,
}

/// A navigator group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub children: Vec<ObjectId>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: SourceTree,
    pub extra: Attributes,
}

impl Group {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Name shown in the navigator: the name, else the path.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.path.as_deref())
    }
}

/// A reference to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileReference {
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: SourceTree,
    pub explicit_file_type: Option<String>,
    pub last_known_file_type: Option<String>,
    pub include_in_index: Option<String>,
    pub extra: Attributes,
}

impl FileReference {
    /// Name shown in the navigator: the name, else the last path component.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| self.path.as_deref().map(basename))
    }

    /// Loose match used by the file commands: the full path, the name, or
    /// the basename of `path` equal to the stored path.
    pub fn matches_path(&self, path: &str) -> bool {
        let base = basename(path);
        self.path.as_deref() == Some(path)
            || self.name.as_deref() == Some(base)
            || self.path.as_deref() == Some(base)
    }
}

/// A buildable target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTarget {
    pub name: String,
    pub product_name: Option<String>,
    pub product_type: Option<ProductType>,
    pub build_configuration_list: ObjectId,
    pub build_phases: Vec<ObjectId>,
    pub dependencies: Vec<ObjectId>,
    pub package_product_dependencies: Option<Vec<ObjectId>>,
    pub product: Option<ObjectId>,
    pub extra: Attributes,
}

impl NativeTarget {
    pub fn package_products(&self) -> &[ObjectId] {
        self.package_product_dependencies.as_deref().unwrap_or(&[])
    }

    pub fn package_products_mut(&mut self) -> &mut Vec<ObjectId> {
        self.package_product_dependencies.get_or_insert_with(Vec::new)
    }
}

/// Phase kind without its payload, for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseTag {
    Sources,
    Resources,
    Frameworks,
    Headers,
    ShellScript,
    CopyFiles,
}

impl PhaseTag {
    /// Name Xcode shows for a phase that has no explicit name.
    pub fn default_name(&self) -> &'static str {
        match self {
            PhaseTag::Sources => "Sources",
            PhaseTag::Resources => "Resources",
            PhaseTag::Frameworks => "Frameworks",
            PhaseTag::Headers => "Headers",
            PhaseTag::ShellScript => "ShellScript",
            PhaseTag::CopyFiles => "CopyFiles",
        }
    }
}

/// Payload of a run-script phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellScript {
    pub shell_path: String,
    pub shell_script: String,
    pub input_paths: Vec<String>,
    pub output_paths: Vec<String>,
}

/// Payload of a copy-files phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFiles {
    pub dst_path: String,
    pub dst_subfolder_spec: u32,
}

impl CopyFiles {
    pub fn destination(&self) -> Option<CopyFilesDestination> {
        CopyFilesDestination::from_subfolder_spec(self.dst_subfolder_spec)
    }
}

/// Build phase variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseKind {
    Sources,
    Resources,
    Frameworks,
    Headers,
    ShellScript(ShellScript),
    CopyFiles(CopyFiles),
}

impl PhaseKind {
    pub fn tag(&self) -> PhaseTag {
        match self {
            PhaseKind::Sources => PhaseTag::Sources,
            PhaseKind::Resources => PhaseTag::Resources,
            PhaseKind::Frameworks => PhaseTag::Frameworks,
            PhaseKind::Headers => PhaseTag::Headers,
            PhaseKind::ShellScript(_) => PhaseTag::ShellScript,
            PhaseKind::CopyFiles(_) => PhaseTag::CopyFiles,
        }
    }
}

/// A build phase of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPhase {
    pub kind: PhaseKind,
    pub name: Option<String>,
    pub files: Vec<ObjectId>,
    pub build_action_mask: String,
    pub run_only_for_deployment_postprocessing: String,
    pub extra: Attributes,
}

impl BuildPhase {
    /// Default `buildActionMask` Xcode writes.
    pub const DEFAULT_ACTION_MASK: &'static str = "2147483647";

    pub fn new(kind: PhaseKind) -> Self {
        Self {
            kind,
            name: None,
            files: Vec::new(),
            build_action_mask: Self::DEFAULT_ACTION_MASK.to_string(),
            run_only_for_deployment_postprocessing: "0".to_string(),
            extra: Attributes::new(),
        }
    }

    pub fn tag(&self) -> PhaseTag {
        self.kind.tag()
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.kind.tag().default_name())
    }
}

/// Wrapper placing a file (or package product) into a build phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildFile {
    pub file_ref: Option<ObjectId>,
    pub product_ref: Option<ObjectId>,
    pub settings: Option<Attributes>,
    pub extra: Attributes,
}

impl BuildFile {
    pub fn for_file(file: ObjectId) -> Self {
        Self {
            file_ref: Some(file),
            ..Self::default()
        }
    }
}

/// A named set of build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub name: String,
    pub build_settings: BuildSettings,
    pub base_configuration_reference: Option<ObjectId>,
    pub extra: Attributes,
}

impl BuildConfiguration {
    pub fn new(name: impl Into<String>, build_settings: BuildSettings) -> Self {
        Self {
            name: name.into(),
            build_settings,
            base_configuration_reference: None,
            extra: Attributes::new(),
        }
    }
}

/// The configurations owned by one project or target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationList {
    pub build_configurations: Vec<ObjectId>,
    pub default_configuration_is_visible: Option<String>,
    pub default_configuration_name: Option<String>,
    pub extra: Attributes,
}

impl ConfigurationList {
    pub fn new(build_configurations: Vec<ObjectId>, default_name: &str) -> Self {
        Self {
            build_configurations,
            default_configuration_is_visible: Some("0".to_string()),
            default_configuration_name: Some(default_name.to_string()),
            extra: Attributes::new(),
        }
    }
}

/// A target-to-target dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDependency {
    pub name: Option<String>,
    pub target: Option<ObjectId>,
    pub target_proxy: Option<ObjectId>,
    pub extra: Attributes,
}

/// Indirection Xcode requires between a dependency and its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerItemProxy {
    pub container_portal: ObjectId,
    pub proxy_type: ProxyType,
    pub remote_global_id: ObjectId,
    pub remote_info: Option<String>,
    pub extra: Attributes,
}

/// A Swift package fetched from a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePackageReference {
    pub repository_url: String,
    pub requirement: Option<VersionRequirement>,
    pub extra: Attributes,
}

impl RemotePackageReference {
    /// Last path component of the URL without `.git`.
    ///
    /// # Example
    ///
    /// ```
    /// use xcodeproj::core::model::RemotePackageReference;
    ///
    /// let pkg = RemotePackageReference {
    ///     repository_url: "https://github.com/apple/swift-log.git".into(),
    ///     requirement: None,
    ///     extra: Default::default(),
    /// };
    /// assert_eq!(pkg.package_name(), "swift-log");
    /// ```
    pub fn package_name(&self) -> &str {
        let trimmed = self.repository_url.trim_end_matches('/');
        let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
        last.strip_suffix(".git").unwrap_or(last)
    }
}

/// A Swift package on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPackageReference {
    pub relative_path: String,
    pub extra: Attributes,
}

/// A product of a Swift package linked into a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftPackageProductDependency {
    pub package: Option<ObjectId>,
    pub product_name: String,
    pub extra: Attributes,
}

/// An object whose `isa` the model does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    pub isa: String,
    pub attributes: Attributes,
}

/// A node of the project graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Project(Project),
    Group(Group),
    FileReference(FileReference),
    NativeTarget(NativeTarget),
    BuildPhase(BuildPhase),
    BuildFile(BuildFile),
    BuildConfiguration(BuildConfiguration),
    ConfigurationList(ConfigurationList),
    TargetDependency(TargetDependency),
    ContainerItemProxy(ContainerItemProxy),
    RemotePackage(RemotePackageReference),
    LocalPackage(LocalPackageReference),
    PackageProduct(SwiftPackageProductDependency),
    Raw(RawObject),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Project(_) => ObjectKind::Project,
            Object::Group(_) => ObjectKind::Group,
            Object::FileReference(_) => ObjectKind::FileReference,
            Object::NativeTarget(_) => ObjectKind::NativeTarget,
            Object::BuildPhase(phase) => match phase.kind {
                PhaseKind::Sources => ObjectKind::SourcesBuildPhase,
                PhaseKind::Resources => ObjectKind::ResourcesBuildPhase,
                PhaseKind::Frameworks => ObjectKind::FrameworksBuildPhase,
                PhaseKind::Headers => ObjectKind::HeadersBuildPhase,
                PhaseKind::ShellScript(_) => ObjectKind::ShellScriptBuildPhase,
                PhaseKind::CopyFiles(_) => ObjectKind::CopyFilesBuildPhase,
            },
            Object::BuildFile(_) => ObjectKind::BuildFile,
            Object::BuildConfiguration(_) => ObjectKind::BuildConfiguration,
            Object::ConfigurationList(_) => ObjectKind::ConfigurationList,
            Object::TargetDependency(_) => ObjectKind::TargetDependency,
            Object::ContainerItemProxy(_) => ObjectKind::ContainerItemProxy,
            Object::RemotePackage(_) => ObjectKind::RemotePackageReference,
            Object::LocalPackage(_) => ObjectKind::LocalPackageReference,
            Object::PackageProduct(_) => ObjectKind::SwiftPackageProductDependency,
            Object::Raw(_) => ObjectKind::Other,
        }
    }

    pub fn isa(&self) -> &str {
        match self {
            Object::Raw(raw) => &raw.isa,
            other => other.kind().isa(),
        }
    }

    /// Short human label, used to seed identifiers.
    pub fn label(&self) -> &str {
        match self {
            Object::Group(g) => g.display_name().unwrap_or_default(),
            Object::FileReference(f) => f.path.as_deref().or(f.name.as_deref()).unwrap_or_default(),
            Object::NativeTarget(t) => &t.name,
            Object::BuildPhase(p) => p.display_name(),
            Object::BuildConfiguration(c) => &c.name,
            Object::TargetDependency(d) => d.name.as_deref().unwrap_or_default(),
            Object::ContainerItemProxy(p) => p.remote_info.as_deref().unwrap_or_default(),
            Object::RemotePackage(p) => &p.repository_url,
            Object::LocalPackage(p) => &p.relative_path,
            Object::PackageProduct(p) => &p.product_name,
            Object::Project(_)
            | Object::BuildFile(_)
            | Object::ConfigurationList(_)
            | Object::Raw(_) => "",
        }
    }

    /// Unmodeled attributes of the object.
    pub fn extra(&self) -> &Attributes {
        match self {
            Object::Project(o) => &o.extra,
            Object::Group(o) => &o.extra,
            Object::FileReference(o) => &o.extra,
            Object::NativeTarget(o) => &o.extra,
            Object::BuildPhase(o) => &o.extra,
            Object::BuildFile(o) => &o.extra,
            Object::BuildConfiguration(o) => &o.extra,
            Object::ConfigurationList(o) => &o.extra,
            Object::TargetDependency(o) => &o.extra,
            Object::ContainerItemProxy(o) => &o.extra,
            Object::RemotePackage(o) => &o.extra,
            Object::LocalPackage(o) => &o.extra,
            Object::PackageProduct(o) => &o.extra,
            Object::Raw(o) => &o.attributes,
        }
    }

    pub fn extra_mut(&mut self) -> &mut Attributes {
        match self {
            Object::Project(o) => &mut o.extra,
            Object::Group(o) => &mut o.extra,
            Object::FileReference(o) => &mut o.extra,
            Object::NativeTarget(o) => &mut o.extra,
            Object::BuildPhase(o) => &mut o.extra,
            Object::BuildFile(o) => &mut o.extra,
            Object::BuildConfiguration(o) => &mut o.extra,
            Object::ConfigurationList(o) => &mut o.extra,
            Object::TargetDependency(o) => &mut o.extra,
            Object::ContainerItemProxy(o) => &mut o.extra,
            Object::RemotePackage(o) => &mut o.extra,
            Object::LocalPackage(o) => &mut o.extra,
            Object::PackageProduct(o) => &mut o.extra,
            Object::Raw(o) => &mut o.attributes,
        }
    }

    /// Every identifier this object points at.
    ///
    /// A proxy's `remoteGlobalIDString` is left out: it may name an object
    /// in another project file, so only the verifier, which knows the
    /// container, can judge it.
    pub fn edges(&self) -> Vec<(ObjectId, Edge)> {
        let mut edges = Vec::new();
        let mut own = |id: &ObjectId| edges.push((id.clone(), Edge::Owns));
        match self {
            Object::Project(p) => {
                own(&p.build_configuration_list);
                own(&p.main_group);
                p.products_group.iter().for_each(&mut own);
                p.targets.iter().for_each(&mut own);
                p.package_references.iter().flatten().for_each(&mut own);
            }
            Object::Group(g) => g.children.iter().for_each(&mut own),
            Object::NativeTarget(t) => {
                own(&t.build_configuration_list);
                t.build_phases.iter().for_each(&mut own);
                t.dependencies.iter().for_each(&mut own);
                t.package_products().iter().for_each(&mut own);
            }
            Object::BuildPhase(p) => p.files.iter().for_each(&mut own),
            Object::ConfigurationList(l) => l.build_configurations.iter().for_each(&mut own),
            Object::TargetDependency(d) => d.target_proxy.iter().for_each(&mut own),
            _ => {}
        }

        let mut refer = |id: &Option<ObjectId>| {
            if let Some(id) = id {
                edges.push((id.clone(), Edge::Refers));
            }
        };
        match self {
            Object::NativeTarget(t) => refer(&t.product),
            Object::BuildFile(f) => {
                refer(&f.file_ref);
                refer(&f.product_ref);
            }
            Object::BuildConfiguration(c) => refer(&c.base_configuration_reference),
            Object::TargetDependency(d) => refer(&d.target),
            Object::ContainerItemProxy(p) => refer(&Some(p.container_portal.clone())),
            Object::PackageProduct(p) => refer(&p.package),
            _ => {}
        }

        let mut tokens = Vec::new();
        for (key, value) in self.extra() {
            tokens.push(key.as_str());
            value.collect_strings(&mut tokens);
        }
        if let Object::BuildFile(BuildFile {
            settings: Some(settings),
            ..
        }) = self
        {
            for value in settings.values() {
                value.collect_strings(&mut tokens);
            }
        }
        edges.extend(
            tokens
                .into_iter()
                .filter_map(|t| ObjectId::new(t).ok())
                .map(|id| (id, Edge::Opaque)),
        );
        edges
    }
}

/// Last component of a `/`-separated path.
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ObjectId {
        ObjectId::new(s).unwrap()
    }

    #[test]
    fn isa_round_trip() {
        let kinds = [
            ObjectKind::Project,
            ObjectKind::Group,
            ObjectKind::FileReference,
            ObjectKind::NativeTarget,
            ObjectKind::SourcesBuildPhase,
            ObjectKind::ResourcesBuildPhase,
            ObjectKind::FrameworksBuildPhase,
            ObjectKind::HeadersBuildPhase,
            ObjectKind::ShellScriptBuildPhase,
            ObjectKind::CopyFilesBuildPhase,
            ObjectKind::BuildFile,
            ObjectKind::BuildConfiguration,
            ObjectKind::ConfigurationList,
            ObjectKind::TargetDependency,
            ObjectKind::ContainerItemProxy,
            ObjectKind::RemotePackageReference,
            ObjectKind::LocalPackageReference,
            ObjectKind::SwiftPackageProductDependency,
        ];
        for kind in kinds {
            assert_eq!(ObjectKind::from_isa(kind.isa()), kind);
        }
        assert_eq!(ObjectKind::from_isa("PBXVariantGroup"), ObjectKind::Other);
    }

    #[test]
    fn file_reference_matching() {
        let file = FileReference {
            name: Some("Foo.swift".into()),
            path: Some("Sources/Foo.swift".into()),
            ..FileReference::default()
        };
        assert!(file.matches_path("Sources/Foo.swift"));
        assert!(file.matches_path("Other/Foo.swift"));
        assert!(!file.matches_path("Bar.swift"));

        let bare = FileReference {
            path: Some("Bar.swift".into()),
            ..FileReference::default()
        };
        assert!(bare.matches_path("some/dir/Bar.swift"));
        assert_eq!(bare.display_name(), Some("Bar.swift"));
    }

    #[test]
    fn edges_classify_ownership_and_references() {
        let file = Object::BuildFile(BuildFile {
            file_ref: Some(id("FILE")),
            ..BuildFile::default()
        });
        assert_eq!(file.edges(), vec![(id("FILE"), Edge::Refers)]);

        let phase = Object::BuildPhase(BuildPhase {
            files: vec![id("BF1"), id("BF2")],
            ..BuildPhase::new(PhaseKind::Sources)
        });
        let edges = phase.edges();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|(_, e)| *e == Edge::Owns));
    }

    #[test]
    fn raw_objects_expose_opaque_tokens() {
        let mut attrs = Attributes::new();
        attrs.insert(
            "children".into(),
            PlistValue::Array(vec!["CHILD1".into(), "has space".into()]),
        );
        let raw = Object::Raw(RawObject {
            isa: "PBXVariantGroup".into(),
            attributes: attrs,
        });
        let edges = raw.edges();
        assert!(edges.contains(&(id("CHILD1"), Edge::Opaque)));
        assert!(edges.contains(&(id("children"), Edge::Opaque)));
        assert!(!edges.iter().any(|(i, _)| i.as_str() == "has space"));
        assert_eq!(raw.isa(), "PBXVariantGroup");
    }

    #[test]
    fn phase_kind_tags_and_names() {
        let phase = BuildPhase::new(PhaseKind::CopyFiles(CopyFiles {
            dst_path: String::new(),
            dst_subfolder_spec: 10,
        }));
        assert_eq!(phase.tag(), PhaseTag::CopyFiles);
        assert_eq!(phase.display_name(), "CopyFiles");
        assert_eq!(
            Object::BuildPhase(phase).kind(),
            ObjectKind::CopyFilesBuildPhase
        );
    }

    #[test]
    fn basename_of_paths() {
        assert_eq!(basename("a/b/c.swift"), "c.swift");
        assert_eq!(basename("c.swift"), "c.swift");
        assert_eq!(basename("Dir/Sub.framework/"), "Sub.framework");
    }
}
