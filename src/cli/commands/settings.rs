//! set-build-setting command

use std::path::Path;

use anyhow::Result;

use super::{apply, load_config};
use crate::core::types::BuildSettingValue;
use crate::engine::Context;
use crate::ops::build_settings::{self, SetBuildSetting};

/// Set one build setting on one configuration, or on all with `All`.
///
/// With `list`, the value is split on whitespace and stored as a list.
pub fn set_build_setting(
    ctx: &Context,
    project: &Path,
    target: &str,
    configuration: &str,
    key: &str,
    value: &str,
    list: bool,
) -> Result<()> {
    let value = if list {
        BuildSettingValue::List(value.split_whitespace().map(str::to_string).collect())
    } else {
        BuildSettingValue::from(value)
    };
    let config = load_config(Some(project))?;
    let request = SetBuildSetting {
        target: target.to_string(),
        configuration: configuration.to_string(),
        key: key.to_string(),
        value,
    };
    apply(ctx, &config, project, |graph| {
        build_settings::set_build_setting(graph, &request)
    })?;
    Ok(())
}
