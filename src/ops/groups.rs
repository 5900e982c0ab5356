//! ops::groups
//!
//! Navigator groups.

use crate::core::graph::ProjectGraph;
use crate::core::model::{Group, Object};
use crate::engine::{Notice, Outcome};

use super::OpError;

/// Request for [`create_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroup {
    pub name: String,
    pub parent: Option<String>,
    pub path: Option<String>,
}

impl CreateGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            path: None,
        }
    }
}

/// Create a group as the last child of `parent` (default: the main group).
///
/// Group names are unique across the whole tree; asking for an existing
/// name is reported and changes nothing.
pub fn create_group(graph: &mut ProjectGraph, req: &CreateGroup) -> Result<Outcome, OpError> {
    if req.name.trim().is_empty() {
        return Err(OpError::InvalidArgument("group name cannot be empty".into()));
    }
    if graph.group_named(&req.name).is_some() {
        return Ok(Outcome::Reported(Notice::GroupExists(req.name.clone())));
    }
    let parent = match &req.parent {
        Some(name) => match graph.group_named(name) {
            Some(id) => id,
            None => return Ok(Outcome::Reported(Notice::ParentGroupNotFound(name.clone()))),
        },
        None => graph.main_group()?,
    };

    let group = graph.objects.insert(Object::Group(Group {
        path: req.path.clone(),
        ..Group::named(req.name.clone())
    }));
    graph.objects.group_mut(&parent)?.children.push(group);

    let mut message = format!("Successfully created group '{}'", req.name);
    if let Some(parent) = &req.parent {
        message.push_str(&format!(" in '{}'", parent));
    }
    Ok(Outcome::Applied(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verify::verify;
    use crate::ops::create::{create_project, CreateProject};

    fn project() -> ProjectGraph {
        create_project(&CreateProject::new("Demo")).unwrap().0
    }

    #[test]
    fn appends_to_main_group() {
        let mut graph = project();
        create_group(&mut graph, &CreateGroup::new("Models")).unwrap();
        let main = graph.main_group().unwrap();
        let last = graph.objects.group(&main).unwrap().children.last().cloned();
        assert_eq!(last, graph.group_named("Models"));
        assert!(verify(&graph).is_ok());
    }

    #[test]
    fn nests_under_named_parent_with_path() {
        let mut graph = project();
        create_group(&mut graph, &CreateGroup::new("Models")).unwrap();
        let req = CreateGroup {
            parent: Some("Models".into()),
            path: Some("Sources/Models/Core".into()),
            ..CreateGroup::new("Core")
        };
        create_group(&mut graph, &req).unwrap();

        let models = graph.group_named("Models").unwrap();
        let core = graph.group_named("Core").unwrap();
        assert_eq!(graph.objects.group(&models).unwrap().children, vec![core.clone()]);
        assert_eq!(
            graph.objects.group(&core).unwrap().path.as_deref(),
            Some("Sources/Models/Core")
        );
    }

    #[test]
    fn second_create_is_reported() {
        let mut graph = project();
        create_group(&mut graph, &CreateGroup::new("Models")).unwrap();
        let before = graph.objects.len();
        let outcome = create_group(&mut graph, &CreateGroup::new("Models")).unwrap();
        assert_eq!(outcome, Outcome::Reported(Notice::GroupExists("Models".into())));
        assert_eq!(graph.objects.len(), before);
    }

    #[test]
    fn missing_parent_is_reported() {
        let mut graph = project();
        let req = CreateGroup {
            parent: Some("Nope".into()),
            ..CreateGroup::new("Core")
        };
        assert_eq!(
            create_group(&mut graph, &req).unwrap(),
            Outcome::Reported(Notice::ParentGroupNotFound("Nope".into()))
        );
    }
}
