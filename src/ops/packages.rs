//! ops::packages
//!
//! Swift package references and the products targets link from them.
//!
//! # Architecture
//!
//! A package is one `XCRemoteSwiftPackageReference` (or
//! `XCLocalSwiftPackageReference`) listed on the project. Linking a product
//! into a target adds two objects: an `XCSwiftPackageProductDependency`
//! on the target, and a build file in the target's Frameworks phase whose
//! `productRef` points at it.
//!
//! Removing a package removes every product dependency and build file that
//! refers to it, through the regular removal cascade.

use crate::core::graph::ProjectGraph;
use crate::core::model::{
    basename, Attributes, BuildFile, LocalPackageReference, Object, PhaseKind,
    RemotePackageReference, SwiftPackageProductDependency,
};
use crate::core::types::{ObjectId, VersionRequirement};
use crate::engine::{Notice, Outcome};

use super::cascade::Cascade;
use super::OpError;

/// Product name used when none is given and none can be derived.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// Request for [`add_swift_package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSwiftPackage {
    pub url: String,
    /// Free-form requirement, e.g. `from: 2.0.0` or `branch: main`.
    pub requirement: String,
    pub target: Option<String>,
    pub product: Option<String>,
}

/// Request for [`add_local_package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLocalPackage {
    pub path: String,
    pub target: Option<String>,
    pub product: Option<String>,
}

/// Add a remote package, optionally linking one of its products.
pub fn add_swift_package(
    graph: &mut ProjectGraph,
    req: &AddSwiftPackage,
) -> Result<Outcome, OpError> {
    let url = req.url.trim();
    if url.is_empty() {
        return Err(OpError::InvalidArgument("package URL cannot be empty".into()));
    }
    let requirement = VersionRequirement::parse(&req.requirement)?;

    if find_remote(graph, url).is_some() {
        return Ok(Outcome::Reported(Notice::PackageExists(url.to_string())));
    }
    let target = match resolve_target(graph, req.target.as_deref()) {
        Ok(target) => target,
        Err(notice) => return Ok(Outcome::Reported(notice)),
    };

    let reference = RemotePackageReference {
        repository_url: url.to_string(),
        requirement: Some(requirement.clone()),
        extra: Attributes::new(),
    };
    let product = product_name(req.product.as_deref(), reference.package_name());
    let package = graph.objects.insert(Object::RemotePackage(reference));
    graph
        .project_mut()?
        .package_references
        .get_or_insert_with(Vec::new)
        .push(package.clone());

    let mut message = format!(
        "Successfully added package '{}' with requirement '{}'",
        url, requirement
    );
    if let Some((id, name)) = target {
        link_product(graph, &id, &package, &product)?;
        message.push_str(&format!(" and linked '{}' to target '{}'", product, name));
    }
    Ok(Outcome::Applied(message))
}

/// Add a package from a directory relative to the project.
pub fn add_local_package(
    graph: &mut ProjectGraph,
    req: &AddLocalPackage,
) -> Result<Outcome, OpError> {
    let path = req.path.trim().trim_end_matches('/');
    if path.is_empty() {
        return Err(OpError::InvalidArgument("package path cannot be empty".into()));
    }
    if find_local(graph, path).is_some() {
        return Ok(Outcome::Reported(Notice::PackageExists(path.to_string())));
    }
    let target = match resolve_target(graph, req.target.as_deref()) {
        Ok(target) => target,
        Err(notice) => return Ok(Outcome::Reported(notice)),
    };

    let product = product_name(req.product.as_deref(), basename(path));
    let package = graph
        .objects
        .insert(Object::LocalPackage(LocalPackageReference {
            relative_path: path.to_string(),
            extra: Attributes::new(),
        }));
    graph
        .project_mut()?
        .package_references
        .get_or_insert_with(Vec::new)
        .push(package.clone());

    let mut message = format!("Successfully added local package '{}'", path);
    if let Some((id, name)) = target {
        link_product(graph, &id, &package, &product)?;
        message.push_str(&format!(" and linked '{}' to target '{}'", product, name));
    }
    Ok(Outcome::Applied(message))
}

/// Remove a package by URL (or local path) and every product linked from it.
pub fn remove_swift_package(graph: &mut ProjectGraph, url: &str) -> Result<Outcome, OpError> {
    let url = url.trim();
    let Some(package) = find_remote(graph, url).or_else(|| find_local(graph, url)) else {
        return Ok(Outcome::Reported(Notice::PackageNotFound(url.to_string())));
    };

    let mut cascade = Cascade::new();
    cascade.remove(package);
    let doomed = cascade.plan(graph);
    let products = doomed
        .iter()
        .filter(|id| matches!(graph.objects.get(id), Some(Object::PackageProduct(_))))
        .count();
    Cascade::apply(graph, &doomed);

    tracing::debug!(url, products, removed = doomed.len(), "removed package");
    Ok(Outcome::Applied(format!(
        "Successfully removed package '{}' from project",
        url
    )))
}

fn find_remote(graph: &ProjectGraph, url: &str) -> Option<ObjectId> {
    graph
        .objects
        .remote_packages()
        .find(|(_, pkg)| pkg.repository_url == url)
        .map(|(id, _)| id.clone())
}

fn find_local(graph: &ProjectGraph, path: &str) -> Option<ObjectId> {
    graph
        .objects
        .local_packages()
        .find(|(_, pkg)| pkg.relative_path == path)
        .map(|(id, _)| id.clone())
}

fn resolve_target(
    graph: &ProjectGraph,
    name: Option<&str>,
) -> Result<Option<(ObjectId, String)>, Notice> {
    match name {
        None => Ok(None),
        Some(name) => graph
            .target_named(name)
            .map(|id| Some((id, name.to_string())))
            .ok_or_else(|| Notice::TargetNotFound(name.to_string())),
    }
}

/// The requested product, else the package name, else [`UNKNOWN_PRODUCT`].
fn product_name(requested: Option<&str>, package: &str) -> String {
    let name = requested.map(str::trim).unwrap_or(package);
    if name.is_empty() {
        tracing::warn!("no product name given or derivable, using '{}'", UNKNOWN_PRODUCT);
        UNKNOWN_PRODUCT.to_string()
    } else {
        name.to_string()
    }
}

/// Attach a product of `package` to `target` and link it.
fn link_product(
    graph: &mut ProjectGraph,
    target: &ObjectId,
    package: &ObjectId,
    product: &str,
) -> Result<(), OpError> {
    let dependency = graph
        .objects
        .insert(Object::PackageProduct(SwiftPackageProductDependency {
            package: Some(package.clone()),
            product_name: product.to_string(),
            extra: Attributes::new(),
        }));
    graph
        .objects
        .target_mut(target)?
        .package_products_mut()
        .push(dependency.clone());

    let phase = graph.ensure_phase(target, PhaseKind::Frameworks)?;
    let build_file = graph.objects.insert(Object::BuildFile(BuildFile {
        product_ref: Some(dependency),
        ..BuildFile::default()
    }));
    graph.objects.phase_mut(&phase)?.files.push(build_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PhaseTag;
    use crate::core::verify::verify;
    use crate::ops::create::{create_project, CreateProject};

    const URL: &str = "https://github.com/apple/swift-log.git";

    fn project() -> ProjectGraph {
        create_project(&CreateProject::new("Demo")).unwrap().0
    }

    fn remote(target: Option<&str>, product: Option<&str>) -> AddSwiftPackage {
        AddSwiftPackage {
            url: URL.into(),
            requirement: "from: 2.0.0".into(),
            target: target.map(Into::into),
            product: product.map(Into::into),
        }
    }

    fn package_references(graph: &ProjectGraph) -> Vec<ObjectId> {
        graph
            .project()
            .unwrap()
            .package_references
            .clone()
            .unwrap_or_default()
    }

    mod add {
        use super::*;

        #[test]
        fn records_parsed_requirement() {
            let mut graph = project();
            add_swift_package(&mut graph, &remote(None, None)).unwrap();

            let refs = package_references(&graph);
            assert_eq!(refs.len(), 1);
            let pkg = graph.objects.remote_package(&refs[0]).unwrap();
            assert_eq!(
                pkg.requirement,
                Some(VersionRequirement::UpToNextMajor("2.0.0".into()))
            );
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn links_product_into_target() {
            let mut graph = project();
            add_swift_package(&mut graph, &remote(Some("Demo"), Some("Logging"))).unwrap();

            let target_id = graph.target_named("Demo").unwrap();
            let target = graph.objects.target(&target_id).unwrap();
            assert_eq!(target.package_products().len(), 1);
            let product = graph
                .objects
                .package_product(&target.package_products()[0])
                .unwrap();
            assert_eq!(product.product_name, "Logging");

            let phase = graph.phase_of(&target_id, PhaseTag::Frameworks).unwrap();
            let files = &graph.objects.phase(&phase).unwrap().files;
            let bf = graph.objects.build_file(&files[0]).unwrap();
            assert_eq!(bf.product_ref.as_ref(), Some(&target.package_products()[0]));
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn product_defaults_to_package_name() {
            assert_eq!(product_name(None, "swift-log"), "swift-log");
            assert_eq!(product_name(None, ""), UNKNOWN_PRODUCT);
            assert_eq!(product_name(Some("Logging"), "swift-log"), "Logging");
        }

        #[test]
        fn second_add_is_reported() {
            let mut graph = project();
            add_swift_package(&mut graph, &remote(None, None)).unwrap();
            let before = graph.objects.len();
            let outcome = add_swift_package(&mut graph, &remote(Some("Demo"), None)).unwrap();
            assert_eq!(outcome, Outcome::Reported(Notice::PackageExists(URL.into())));
            assert_eq!(graph.objects.len(), before);
        }

        #[test]
        fn bad_requirement_is_fatal() {
            let mut graph = project();
            let req = AddSwiftPackage {
                requirement: "from:".into(),
                ..remote(None, None)
            };
            assert!(matches!(
                add_swift_package(&mut graph, &req),
                Err(OpError::Type(_))
            ));
        }

        #[test]
        fn missing_target_changes_nothing() {
            let mut graph = project();
            let before = graph.objects.len();
            let outcome = add_swift_package(&mut graph, &remote(Some("Nope"), None)).unwrap();
            assert_eq!(outcome, Outcome::Reported(Notice::TargetNotFound("Nope".into())));
            assert_eq!(graph.objects.len(), before);
        }

        #[test]
        fn local_package_is_unique_by_path() {
            let mut graph = project();
            let req = AddLocalPackage {
                path: "Packages/Core".into(),
                target: Some("Demo".into()),
                product: None,
            };
            let outcome = add_local_package(&mut graph, &req).unwrap();
            assert!(outcome.to_string().contains("linked 'Core'"));
            assert!(verify(&graph).is_ok());

            assert_eq!(
                add_local_package(&mut graph, &req).unwrap(),
                Outcome::Reported(Notice::PackageExists("Packages/Core".into()))
            );
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn cascades_products_and_build_files() {
            let mut graph = project();
            add_swift_package(&mut graph, &remote(Some("Demo"), Some("Logging"))).unwrap();
            let outcome = remove_swift_package(&mut graph, URL).unwrap();
            assert!(outcome.is_applied());

            assert!(package_references(&graph).is_empty());
            let target_id = graph.target_named("Demo").unwrap();
            let target = graph.objects.target(&target_id).unwrap();
            assert!(target.package_products().is_empty());
            assert_eq!(graph.objects.package_products().count(), 0);
            let phase = graph.phase_of(&target_id, PhaseTag::Frameworks).unwrap();
            assert!(graph.objects.phase(&phase).unwrap().files.is_empty());
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn other_packages_survive() {
            let mut graph = project();
            add_swift_package(&mut graph, &remote(Some("Demo"), None)).unwrap();
            let other = AddSwiftPackage {
                url: "https://github.com/apple/swift-nio.git".into(),
                ..remote(Some("Demo"), None)
            };
            add_swift_package(&mut graph, &other).unwrap();

            remove_swift_package(&mut graph, URL).unwrap();
            assert_eq!(package_references(&graph).len(), 1);
            assert_eq!(graph.objects.package_products().count(), 1);
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn unknown_url_is_reported() {
            let mut graph = project();
            assert_eq!(
                remove_swift_package(&mut graph, URL).unwrap(),
                Outcome::Reported(Notice::PackageNotFound(URL.into()))
            );
        }
    }
}
