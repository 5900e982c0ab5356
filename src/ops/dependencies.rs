//! ops::dependencies
//!
//! Target-to-target dependencies.
//!
//! A dependency is two objects: a `PBXContainerItemProxy` naming the
//! target inside this project, and a `PBXTargetDependency` wrapping the
//! proxy that is listed on the depending target.

use crate::core::graph::ProjectGraph;
use crate::core::model::{Attributes, ContainerItemProxy, Object, TargetDependency};
use crate::core::types::{ObjectId, ProxyType};
use crate::engine::{Notice, Outcome};

use super::OpError;

/// Make `target` depend on `dependency`.
pub fn add_dependency(
    graph: &mut ProjectGraph,
    target: &str,
    dependency: &str,
) -> Result<Outcome, OpError> {
    let Some(target_id) = graph.target_named(target) else {
        return Ok(Outcome::Reported(Notice::TargetNotFound(target.to_string())));
    };
    let Some(dependency_id) = graph.target_named(dependency) else {
        return Ok(Outcome::Reported(Notice::DependencyTargetNotFound(
            dependency.to_string(),
        )));
    };
    if target_id == dependency_id {
        return Err(OpError::InvalidArgument(format!(
            "target '{}' cannot depend on itself",
            target
        )));
    }

    if depends_on(graph, &target_id, &dependency_id)? {
        return Ok(Outcome::Reported(Notice::AlreadyDependsOn {
            target: target.to_string(),
            dependency: dependency.to_string(),
        }));
    }

    let edge = insert_dependency(graph, &dependency_id)?;
    graph.objects.target_mut(&target_id)?.dependencies.push(edge);
    Ok(Outcome::Applied(format!(
        "Successfully added dependency '{}' to target '{}'",
        dependency, target
    )))
}

fn depends_on(
    graph: &ProjectGraph,
    target: &ObjectId,
    dependency: &ObjectId,
) -> Result<bool, OpError> {
    Ok(graph
        .objects
        .target(target)?
        .dependencies
        .iter()
        .filter_map(|id| graph.objects.dependency(id).ok())
        .any(|dep| dep.target.as_ref() == Some(dependency)))
}

/// Create a proxy and dependency pointing at `dependency`.
///
/// The returned `PBXTargetDependency` is not attached to any target yet.
pub(crate) fn insert_dependency(
    graph: &mut ProjectGraph,
    dependency: &ObjectId,
) -> Result<ObjectId, OpError> {
    let name = graph.objects.target(dependency)?.name.clone();
    let proxy = graph
        .objects
        .insert(Object::ContainerItemProxy(ContainerItemProxy {
            container_portal: graph.root.clone(),
            proxy_type: ProxyType::NativeTarget,
            remote_global_id: dependency.clone(),
            remote_info: Some(name.clone()),
            extra: Attributes::new(),
        }));
    Ok(graph
        .objects
        .insert(Object::TargetDependency(TargetDependency {
            name: None,
            target: Some(dependency.clone()),
            target_proxy: Some(proxy),
            extra: Attributes::new(),
        })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProductType;
    use crate::core::verify::verify;
    use crate::ops::create::{create_project, CreateProject};
    use crate::ops::targets::{add_target, AddTarget};

    fn project_with_core() -> ProjectGraph {
        let (mut graph, _) = create_project(&CreateProject::new("App")).unwrap();
        add_target(
            &mut graph,
            &AddTarget::new("Core", ProductType::Framework, "com.example.Core"),
        )
        .unwrap();
        graph
    }

    #[test]
    fn creates_proxy_and_dependency() {
        let mut graph = project_with_core();
        let outcome = add_dependency(&mut graph, "App", "Core").unwrap();
        assert!(outcome.is_applied());

        let app = graph.target_named("App").unwrap();
        let core = graph.target_named("Core").unwrap();
        let deps = &graph.objects.target(&app).unwrap().dependencies;
        assert_eq!(deps.len(), 1);

        let dep = graph.objects.dependency(&deps[0]).unwrap();
        assert_eq!(dep.target.as_ref(), Some(&core));
        let (_, proxy) = graph.objects.container_proxies().next().unwrap();
        assert_eq!(proxy.container_portal, graph.root);
        assert_eq!(proxy.remote_global_id, core);
        assert_eq!(proxy.proxy_type, ProxyType::NativeTarget);
        assert_eq!(proxy.remote_info.as_deref(), Some("Core"));
        assert!(verify(&graph).is_ok());
    }

    #[test]
    fn second_add_is_reported() {
        let mut graph = project_with_core();
        add_dependency(&mut graph, "App", "Core").unwrap();
        let before = graph.objects.len();

        let outcome = add_dependency(&mut graph, "App", "Core").unwrap();
        assert_eq!(
            outcome.to_string(),
            "Target 'App' already depends on 'Core'"
        );
        assert_eq!(graph.objects.len(), before);
        let app = graph.target_named("App").unwrap();
        assert_eq!(graph.objects.target(&app).unwrap().dependencies.len(), 1);
    }

    #[test]
    fn unknown_names_are_reported() {
        let mut graph = project_with_core();
        assert_eq!(
            add_dependency(&mut graph, "Nope", "Core").unwrap(),
            Outcome::Reported(Notice::TargetNotFound("Nope".into()))
        );
        assert_eq!(
            add_dependency(&mut graph, "App", "Nope").unwrap(),
            Outcome::Reported(Notice::DependencyTargetNotFound("Nope".into()))
        );
    }

    #[test]
    fn self_dependency_is_rejected() {
        let mut graph = project_with_core();
        assert!(matches!(
            add_dependency(&mut graph, "App", "App"),
            Err(OpError::InvalidArgument(_))
        ));
    }
}
