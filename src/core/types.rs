//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ObjectId`] - Identifier of a node in the project object graph
//! - [`ProductType`] - What a native target builds
//! - [`Platform`] - Target platform (drives SDK and deployment keys)
//! - [`SourceTree`] - Anchor a file reference's path is relative to
//! - [`CopyFilesDestination`] - Destination of a copy-files build phase
//! - [`VersionRequirement`] - Swift package version constraint
//! - [`BuildSettingValue`] - A single build setting value
//!
//! # Validation
//!
//! Values that arrive from the command line are parsed into these types
//! up front. Parsing failures are argument errors and abort the command
//! before the project is touched.
//!
//! # Examples
//!
//! ```
//! use xcodeproj::core::types::{ObjectId, ProductType, VersionRequirement};
//!
//! let id = ObjectId::new("8F1A2B3C4D5E6F7081920A1B").unwrap();
//! assert_eq!(id.as_str(), "8F1A2B3C4D5E6F7081920A1B");
//!
//! let product: ProductType = "unitTestBundle".parse().unwrap();
//! assert_eq!(product.identifier(), "com.apple.product-type.bundle.unit-test");
//!
//! let req = VersionRequirement::parse("from: 2.0.0").unwrap();
//! assert_eq!(req, VersionRequirement::UpToNextMajor("2.0.0".into()));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object identifier: {0}")]
    InvalidObjectId(String),

    #[error("invalid product type: {0}")]
    InvalidProductType(String),

    #[error("invalid copy-files destination '{0}', must be one of: resources, frameworks, executables, plugins, shared_support")]
    InvalidDestination(String),

    #[error("invalid version requirement: {0}")]
    InvalidRequirement(String),

    #[error("invalid build phase type '{0}', must be one of: run-script, copy-files")]
    InvalidBuildPhaseType(String),
}

/// Identifier of an object in the project graph.
///
/// Identifiers generated by this crate are 24 uppercase hex characters
/// (96 bits), the same shape Xcode uses. Identifiers read from disk are
/// accepted as long as they are a single plist token, because other
/// generators (SwiftPM, CocoaPods) use different shapes.
///
/// # Example
///
/// ```
/// use xcodeproj::core::types::ObjectId;
///
/// assert!(ObjectId::new("OBJ_12").is_ok());
/// assert!(ObjectId::new("").is_err());
/// assert!(ObjectId::new("has space").is_err());
///
/// let generated = ObjectId::from_bytes([0xAB; 12]);
/// assert_eq!(generated.as_str().len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Width in bytes of a generated identifier.
    pub const BYTES: usize = 12;

    /// Create a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidObjectId` for empty strings or strings that
    /// would not survive as a bare plist token.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidObjectId("identifier cannot be empty".into()));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(TypeError::InvalidObjectId(id));
        }
        Ok(Self(id))
    }

    /// Build an identifier from raw bytes (uppercase hex).
    pub fn from_bytes(bytes: [u8; Self::BYTES]) -> Self {
        Self(hex::encode_upper(bytes))
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What a native target produces.
///
/// The set mirrors the product types Xcode writes. Anything else read
/// from disk is kept verbatim in [`ProductType::Other`] so it round-trips,
/// but it cannot be requested from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductType {
    Application,
    Framework,
    StaticFramework,
    StaticLibrary,
    DynamicLibrary,
    Bundle,
    UnitTestBundle,
    UiTestBundle,
    AppExtension,
    CommandLineTool,
    WatchApp,
    Watch2App,
    Watch2AppContainer,
    WatchExtension,
    Watch2Extension,
    TvExtension,
    MessagesApplication,
    MessagesExtension,
    StickerPack,
    XpcService,
    AppClip,
    ExtensionKitExtension,
    SystemExtension,
    Other(String),
}

const PRODUCT_TYPES: &[(ProductType, &str, &str)] = &[
    (ProductType::Application, "application", "com.apple.product-type.application"),
    (ProductType::Framework, "framework", "com.apple.product-type.framework"),
    (ProductType::StaticFramework, "staticFramework", "com.apple.product-type.framework.static"),
    (ProductType::StaticLibrary, "staticLibrary", "com.apple.product-type.library.static"),
    (ProductType::DynamicLibrary, "dynamicLibrary", "com.apple.product-type.library.dynamic"),
    (ProductType::Bundle, "bundle", "com.apple.product-type.bundle"),
    (ProductType::UnitTestBundle, "unitTestBundle", "com.apple.product-type.bundle.unit-test"),
    (ProductType::UiTestBundle, "uiTestBundle", "com.apple.product-type.bundle.ui-testing"),
    (ProductType::AppExtension, "appExtension", "com.apple.product-type.app-extension"),
    (ProductType::CommandLineTool, "commandLineTool", "com.apple.product-type.tool"),
    (ProductType::WatchApp, "watchApp", "com.apple.product-type.application.watchapp"),
    (ProductType::Watch2App, "watch2App", "com.apple.product-type.application.watchapp2"),
    (
        ProductType::Watch2AppContainer,
        "watch2AppContainer",
        "com.apple.product-type.application.watchapp2-container",
    ),
    (ProductType::WatchExtension, "watchExtension", "com.apple.product-type.watchkit-extension"),
    (ProductType::Watch2Extension, "watch2Extension", "com.apple.product-type.watchkit2-extension"),
    (ProductType::TvExtension, "tvExtension", "com.apple.product-type.tv-app-extension"),
    (
        ProductType::MessagesApplication,
        "messagesApplication",
        "com.apple.product-type.application.messages",
    ),
    (
        ProductType::MessagesExtension,
        "messagesExtension",
        "com.apple.product-type.app-extension.messages",
    ),
    (
        ProductType::StickerPack,
        "stickerPack",
        "com.apple.product-type.app-extension.messages-sticker-pack",
    ),
    (ProductType::XpcService, "xpcService", "com.apple.product-type.xpc-service"),
    (
        ProductType::AppClip,
        "onDemandInstallCapableApplication",
        "com.apple.product-type.application.on-demand-install-capable",
    ),
    (
        ProductType::ExtensionKitExtension,
        "extensionKitExtension",
        "com.apple.product-type.extensionkit-extension",
    ),
    (ProductType::SystemExtension, "systemExtension", "com.apple.product-type.system-extension"),
];

impl ProductType {
    /// The `com.apple.product-type.*` identifier written to disk.
    pub fn identifier(&self) -> &str {
        if let ProductType::Other(raw) = self {
            return raw;
        }
        PRODUCT_TYPES
            .iter()
            .find(|(ty, _, _)| ty == self)
            .map(|(_, _, id)| *id)
            .unwrap_or_default()
    }

    /// Decode an on-disk identifier. Unknown identifiers are preserved.
    pub fn from_identifier(identifier: &str) -> Self {
        PRODUCT_TYPES
            .iter()
            .find(|(_, _, id)| *id == identifier)
            .map(|(ty, _, _)| ty.clone())
            .unwrap_or_else(|| ProductType::Other(identifier.to_string()))
    }

    /// File name and explicit file type of the product this target builds.
    ///
    /// # Example
    ///
    /// ```
    /// use xcodeproj::core::types::ProductType;
    ///
    /// let (file, ty) = ProductType::StaticLibrary.product_file("Core");
    /// assert_eq!(file, "libCore.a");
    /// assert_eq!(ty, Some("archive.ar"));
    /// ```
    pub fn product_file(&self, name: &str) -> (String, Option<&'static str>) {
        match self {
            ProductType::Application
            | ProductType::WatchApp
            | ProductType::Watch2App
            | ProductType::Watch2AppContainer
            | ProductType::MessagesApplication
            | ProductType::AppClip => (format!("{name}.app"), Some("wrapper.application")),
            ProductType::Framework | ProductType::StaticFramework => {
                (format!("{name}.framework"), Some("wrapper.framework"))
            }
            ProductType::StaticLibrary => (format!("lib{name}.a"), Some("archive.ar")),
            ProductType::DynamicLibrary => {
                (format!("lib{name}.dylib"), Some("compiled.mach-o.dylib"))
            }
            ProductType::UnitTestBundle | ProductType::UiTestBundle => {
                (format!("{name}.xctest"), Some("wrapper.cfbundle"))
            }
            ProductType::AppExtension
            | ProductType::WatchExtension
            | ProductType::Watch2Extension
            | ProductType::TvExtension
            | ProductType::MessagesExtension
            | ProductType::StickerPack
            | ProductType::ExtensionKitExtension => {
                (format!("{name}.appex"), Some("wrapper.app-extension"))
            }
            ProductType::CommandLineTool => {
                (name.to_string(), Some("compiled.mach-o.executable"))
            }
            ProductType::Bundle => (format!("{name}.bundle"), Some("wrapper.cfbundle")),
            ProductType::XpcService => (format!("{name}.xpc"), Some("wrapper.xpc-service")),
            ProductType::SystemExtension => (
                format!("{name}.systemextension"),
                Some("wrapper.system-extension"),
            ),
            ProductType::Other(_) => (name.to_string(), None),
        }
    }
}

impl FromStr for ProductType {
    type Err = TypeError;

    /// Parse a product type from the command line.
    ///
    /// Accepts the camelCase names (`unitTestBundle`), a few short aliases
    /// (`app`, `static-library`, `tool`) and full identifiers, all
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "app" => Some(ProductType::Application),
            "static-library" | "static_library" | "lib" => Some(ProductType::StaticLibrary),
            "dynamic-library" | "dynamic_library" | "dylib" => Some(ProductType::DynamicLibrary),
            "unit-test" | "unit-tests" | "tests" => Some(ProductType::UnitTestBundle),
            "ui-test" | "ui-tests" => Some(ProductType::UiTestBundle),
            "extension" | "app-extension" => Some(ProductType::AppExtension),
            "tool" | "command-line-tool" => Some(ProductType::CommandLineTool),
            _ => None,
        };
        if let Some(ty) = alias {
            return Ok(ty);
        }
        PRODUCT_TYPES
            .iter()
            .find(|(_, name, id)| name.to_ascii_lowercase() == wanted || *id == wanted)
            .map(|(ty, _, _)| ty.clone())
            .ok_or_else(|| TypeError::InvalidProductType(s.to_string()))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "macOS")]
    Macos,
    #[serde(rename = "tvOS")]
    Tvos,
    #[serde(rename = "watchOS")]
    Watchos,
}

impl Platform {
    /// Match a platform name case-insensitively. Unrecognized names are `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ios" | "iphoneos" => Some(Platform::Ios),
            "macos" | "macosx" | "osx" => Some(Platform::Macos),
            "tvos" | "appletvos" => Some(Platform::Tvos),
            "watchos" => Some(Platform::Watchos),
            _ => None,
        }
    }

    /// Match a platform name, falling back to iOS.
    ///
    /// # Example
    ///
    /// ```
    /// use xcodeproj::core::types::Platform;
    ///
    /// assert_eq!(Platform::from_name_or_default("MACOS"), Platform::Macos);
    /// assert_eq!(Platform::from_name_or_default("amiga"), Platform::Ios);
    /// ```
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    /// Build setting key holding the deployment target.
    pub fn deployment_target_key(&self) -> &'static str {
        match self {
            Platform::Ios => "IPHONEOS_DEPLOYMENT_TARGET",
            Platform::Macos => "MACOSX_DEPLOYMENT_TARGET",
            Platform::Tvos => "TVOS_DEPLOYMENT_TARGET",
            Platform::Watchos => "WATCHOS_DEPLOYMENT_TARGET",
        }
    }

    /// Value of `SDKROOT`.
    pub fn sdk_root(&self) -> &'static str {
        match self {
            Platform::Ios => "iphoneos",
            Platform::Macos => "macosx",
            Platform::Tvos => "appletvos",
            Platform::Watchos => "watchos",
        }
    }

    /// Value of `TARGETED_DEVICE_FAMILY` seeded into new targets.
    pub fn device_family(&self) -> &'static str {
        match self {
            // ignored by the macOS SDK
            Platform::Ios | Platform::Macos => "1,2",
            Platform::Tvos => "3",
            Platform::Watchos => "4",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Ios => "iOS",
            Platform::Macos => "macOS",
            Platform::Tvos => "tvOS",
            Platform::Watchos => "watchOS",
        };
        f.write_str(name)
    }
}

/// Anchor a file reference's path is relative to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SourceTree {
    #[default]
    Group,
    Absolute,
    SourceRoot,
    BuildProductsDir,
    SdkRoot,
    DeveloperDir,
    Other(String),
}

impl SourceTree {
    pub fn as_str(&self) -> &str {
        match self {
            SourceTree::Group => "<group>",
            SourceTree::Absolute => "<absolute>",
            SourceTree::SourceRoot => "SOURCE_ROOT",
            SourceTree::BuildProductsDir => "BUILT_PRODUCTS_DIR",
            SourceTree::SdkRoot => "SDKROOT",
            SourceTree::DeveloperDir => "DEVELOPER_DIR",
            SourceTree::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "<group>" => SourceTree::Group,
            "<absolute>" => SourceTree::Absolute,
            "SOURCE_ROOT" => SourceTree::SourceRoot,
            "BUILT_PRODUCTS_DIR" => SourceTree::BuildProductsDir,
            "SDKROOT" => SourceTree::SdkRoot,
            "DEVELOPER_DIR" => SourceTree::DeveloperDir,
            other => SourceTree::Other(other.to_string()),
        }
    }
}

/// Destination of a copy-files build phase (`dstSubfolderSpec`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyFilesDestination {
    AbsolutePath,
    Wrapper,
    Executables,
    Resources,
    Frameworks,
    SharedFrameworks,
    SharedSupport,
    Plugins,
    JavaResources,
    ProductsDirectory,
}

impl CopyFilesDestination {
    /// Numeric `dstSubfolderSpec` value.
    pub fn subfolder_spec(&self) -> u32 {
        match self {
            CopyFilesDestination::AbsolutePath => 0,
            CopyFilesDestination::Wrapper => 1,
            CopyFilesDestination::Executables => 6,
            CopyFilesDestination::Resources => 7,
            CopyFilesDestination::Frameworks => 10,
            CopyFilesDestination::SharedFrameworks => 11,
            CopyFilesDestination::SharedSupport => 12,
            CopyFilesDestination::Plugins => 13,
            CopyFilesDestination::JavaResources => 15,
            CopyFilesDestination::ProductsDirectory => 16,
        }
    }

    pub fn from_subfolder_spec(spec: u32) -> Option<Self> {
        let dest = match spec {
            0 => CopyFilesDestination::AbsolutePath,
            1 => CopyFilesDestination::Wrapper,
            6 => CopyFilesDestination::Executables,
            7 => CopyFilesDestination::Resources,
            10 => CopyFilesDestination::Frameworks,
            11 => CopyFilesDestination::SharedFrameworks,
            12 => CopyFilesDestination::SharedSupport,
            13 => CopyFilesDestination::Plugins,
            15 => CopyFilesDestination::JavaResources,
            16 => CopyFilesDestination::ProductsDirectory,
            _ => return None,
        };
        Some(dest)
    }
}

impl FromStr for CopyFilesDestination {
    type Err = TypeError;

    /// Parse a destination named on the command line (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resources" => Ok(CopyFilesDestination::Resources),
            "frameworks" => Ok(CopyFilesDestination::Frameworks),
            "executables" => Ok(CopyFilesDestination::Executables),
            "plugins" => Ok(CopyFilesDestination::Plugins),
            "shared_support" => Ok(CopyFilesDestination::SharedSupport),
            _ => Err(TypeError::InvalidDestination(s.to_string())),
        }
    }
}

/// Build phase kinds that can be added from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhaseType {
    RunScript,
    CopyFiles,
}

impl FromStr for BuildPhaseType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "run-script" | "script" | "shell-script" => Ok(BuildPhaseType::RunScript),
            "copy-files" | "copy" => Ok(BuildPhaseType::CopyFiles),
            _ => Err(TypeError::InvalidBuildPhaseType(s.to_string())),
        }
    }
}

/// Version constraint of a remote Swift package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum VersionRequirement {
    Exact(String),
    UpToNextMajor(String),
    UpToNextMinor(String),
    Range { minimum: String, maximum: String },
    Branch(String),
    Revision(String),
}

impl VersionRequirement {
    /// Parse a free-form requirement.
    ///
    /// Recognized prefixes: `from:`, `upToNextMajor:`, `upToNextMinor:`,
    /// `branch:`, `revision:`, `exact:` and `range: A - B`. Anything without a
    /// prefix is an exact version.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRequirement` if the version part is empty
    /// or a range is not written as `A - B`.
    ///
    /// # Example
    ///
    /// ```
    /// use xcodeproj::core::types::VersionRequirement;
    ///
    /// assert_eq!(
    ///     VersionRequirement::parse("1.2.3").unwrap(),
    ///     VersionRequirement::Exact("1.2.3".into())
    /// );
    /// assert_eq!(
    ///     VersionRequirement::parse("branch: main").unwrap(),
    ///     VersionRequirement::Branch("main".into())
    /// );
    /// assert!(VersionRequirement::parse("from:").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let input = input.trim();
        let prefixed = |prefix: &str| input.strip_prefix(prefix).map(str::trim);

        let (version, ctor): (&str, fn(String) -> VersionRequirement) =
            if let Some(v) = prefixed("from:") {
                (v, VersionRequirement::UpToNextMajor)
            } else if let Some(v) = prefixed("upToNextMajor:") {
                (v, VersionRequirement::UpToNextMajor)
            } else if let Some(v) = prefixed("upToNextMinor:") {
                (v, VersionRequirement::UpToNextMinor)
            } else if let Some(v) = prefixed("branch:") {
                (v, VersionRequirement::Branch)
            } else if let Some(v) = prefixed("revision:") {
                (v, VersionRequirement::Revision)
            } else if let Some(v) = prefixed("exact:") {
                (v, VersionRequirement::Exact)
            } else if let Some(v) = prefixed("range:") {
                return Self::parse_range(v);
            } else {
                (input, VersionRequirement::Exact)
            };

        if version.is_empty() {
            return Err(TypeError::InvalidRequirement(format!(
                "missing version in '{input}'"
            )));
        }
        Ok(ctor(version.to_string()))
    }

    fn parse_range(spec: &str) -> Result<Self, TypeError> {
        let (min, max) = spec
            .split_once(" - ")
            .map(|(a, b)| (a.trim(), b.trim()))
            .filter(|(a, b)| !a.is_empty() && !b.is_empty())
            .ok_or_else(|| {
                TypeError::InvalidRequirement(format!("range must be written 'A - B', got '{spec}'"))
            })?;
        Ok(VersionRequirement::Range {
            minimum: min.to_string(),
            maximum: max.to_string(),
        })
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequirement::Exact(v) => write!(f, "exact: {v}"),
            VersionRequirement::UpToNextMajor(v) => write!(f, "from: {v}"),
            VersionRequirement::UpToNextMinor(v) => write!(f, "upToNextMinor: {v}"),
            VersionRequirement::Range { minimum, maximum } => {
                write!(f, "range: {minimum} - {maximum}")
            }
            VersionRequirement::Branch(b) => write!(f, "branch: {b}"),
            VersionRequirement::Revision(r) => write!(f, "revision: {r}"),
        }
    }
}

/// A build setting value: a single string or a list of strings.
///
/// Setting a key always replaces the previous value wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildSettingValue {
    String(String),
    List(Vec<String>),
}

impl BuildSettingValue {
    /// The value as a single string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BuildSettingValue::String(s) => Some(s),
            BuildSettingValue::List(_) => None,
        }
    }
}

impl From<&str> for BuildSettingValue {
    fn from(value: &str) -> Self {
        BuildSettingValue::String(value.to_string())
    }
}

impl From<String> for BuildSettingValue {
    fn from(value: String) -> Self {
        BuildSettingValue::String(value)
    }
}

impl From<Vec<String>> for BuildSettingValue {
    fn from(values: Vec<String>) -> Self {
        BuildSettingValue::List(values)
    }
}

impl fmt::Display for BuildSettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSettingValue::String(s) => f.write_str(s),
            BuildSettingValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

/// `proxyType` of a container item proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProxyType {
    NativeTarget,
    Reference,
    Other(String),
}

impl ProxyType {
    pub fn as_str(&self) -> &str {
        match self {
            ProxyType::NativeTarget => "1",
            ProxyType::Reference => "2",
            ProxyType::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "1" => ProxyType::NativeTarget,
            "2" => ProxyType::Reference,
            other => ProxyType::Other(other.to_string()),
        }
    }
}
