//! ops::build_settings
//!
//! Writing build settings on a target's configurations.

use crate::core::graph::ProjectGraph;
use crate::core::types::{BuildSettingValue, ObjectId};
use crate::engine::{Notice, Outcome};

use super::OpError;

/// Configuration name that selects every configuration of the target.
pub const ALL_CONFIGURATIONS: &str = "All";

/// Request for [`set_build_setting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBuildSetting {
    pub target: String,
    /// A configuration name, or `All` (any case).
    pub configuration: String,
    pub key: String,
    pub value: BuildSettingValue,
}

/// Set `key` to `value`, replacing whatever was there.
pub fn set_build_setting(
    graph: &mut ProjectGraph,
    req: &SetBuildSetting,
) -> Result<Outcome, OpError> {
    if req.key.trim().is_empty() {
        return Err(OpError::InvalidArgument("setting key cannot be empty".into()));
    }
    let Some(target) = graph.target_named(&req.target) else {
        return Ok(Outcome::Reported(Notice::TargetNotFound(req.target.clone())));
    };
    let list = graph.objects.target(&target)?.build_configuration_list.clone();

    let all = req.configuration.eq_ignore_ascii_case(ALL_CONFIGURATIONS);
    let selected: Vec<(ObjectId, String)> = graph
        .configurations_of(&list)
        .into_iter()
        .filter(|(_, config)| all || config.name == req.configuration)
        .map(|(id, config)| (id, config.name.clone()))
        .collect();
    if selected.is_empty() {
        return Ok(Outcome::Reported(Notice::ConfigurationNotFound {
            target: req.target.clone(),
            configuration: req.configuration.clone(),
        }));
    }

    for (id, _) in &selected {
        graph
            .objects
            .configuration_mut(id)?
            .build_settings
            .insert(req.key.clone(), req.value.clone());
    }

    let names: Vec<&str> = selected.iter().map(|(_, name)| name.as_str()).collect();
    Ok(Outcome::Applied(format!(
        "Successfully set '{}' to '{}' for target '{}' in configuration(s): {}",
        req.key,
        req.value,
        req.target,
        names.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::create::{create_project, CreateProject};

    fn project() -> ProjectGraph {
        create_project(&CreateProject::new("Demo")).unwrap().0
    }

    fn request(configuration: &str, value: BuildSettingValue) -> SetBuildSetting {
        SetBuildSetting {
            target: "Demo".into(),
            configuration: configuration.into(),
            key: "SWIFT_VERSION".into(),
            value,
        }
    }

    fn values(graph: &ProjectGraph) -> Vec<(String, Option<BuildSettingValue>)> {
        let target = graph.target_named("Demo").unwrap();
        let list = &graph.objects.target(&target).unwrap().build_configuration_list;
        graph
            .configurations_of(list)
            .into_iter()
            .map(|(_, c)| (c.name.clone(), c.build_settings.get("SWIFT_VERSION").cloned()))
            .collect()
    }

    #[test]
    fn all_touches_every_configuration() {
        let mut graph = project();
        let outcome = set_build_setting(&mut graph, &request("all", "6.0".into())).unwrap();
        assert_eq!(
            outcome.to_string(),
            "Successfully set 'SWIFT_VERSION' to '6.0' for target 'Demo' in configuration(s): Debug, Release"
        );
        for (_, value) in values(&graph) {
            assert_eq!(value, Some("6.0".into()));
        }
    }

    #[test]
    fn single_configuration_only() {
        let mut graph = project();
        set_build_setting(&mut graph, &request("Debug", "6.0".into())).unwrap();
        let values = values(&graph);
        assert_eq!(values[0], ("Debug".into(), Some("6.0".into())));
        assert_eq!(values[1], ("Release".into(), Some("5.0".into())));
    }

    #[test]
    fn list_replaces_string() {
        let mut graph = project();
        let list = BuildSettingValue::from(vec!["5.9".to_string(), "6.0".to_string()]);
        set_build_setting(&mut graph, &request("Release", list.clone())).unwrap();
        assert_eq!(values(&graph)[1].1, Some(list));
    }

    #[test]
    fn unknown_configuration_is_reported() {
        let mut graph = project();
        let outcome = set_build_setting(&mut graph, &request("Beta", "6.0".into())).unwrap();
        assert_eq!(
            outcome,
            Outcome::Reported(Notice::ConfigurationNotFound {
                target: "Demo".into(),
                configuration: "Beta".into()
            })
        );
    }
}
