//! Plugin parameter loader.
//!
//! The host stores plugin settings in `js/plugins.js` as a JavaScript
//! assignment wrapping a JSON array:
//!
//! ```text
//! var $plugins =
//! [
//! {"name":"YED_SkillShop","status":true,"description":"","parameters":{"Default Price":"100"}}
//! ];
//! ```
//!
//! All parameter values are strings, exactly as typed in the host editor.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use shop_core::ShopConfig;

use crate::loaders::{LoadResult, read_file};

/// One entry of the host's plugin list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// Loader for `js/plugins.js`.
pub struct ParameterLoader;

impl ParameterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<PluginEntry>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse plugin list {}: {}", path.display(), e))
    }

    /// Extracts the JSON array from the script and deserializes it.
    pub fn parse(content: &str) -> LoadResult<Vec<PluginEntry>> {
        let start = content
            .find('[')
            .ok_or_else(|| anyhow::anyhow!("plugin list has no opening '['"))?;
        let end = content
            .rfind(']')
            .filter(|&end| end > start)
            .ok_or_else(|| anyhow::anyhow!("plugin list has no closing ']'"))?;
        Ok(serde_json::from_str(&content[start..=end])?)
    }

    /// Shop configuration from the enabled `YED_SkillShop` entry, if any.
    pub fn shop_config(plugins: &[PluginEntry]) -> Option<ShopConfig> {
        plugins
            .iter()
            .find(|plugin| plugin.name == ShopConfig::PLUGIN_NAME && plugin.status)
            .map(|plugin| config_from_parameters(&plugin.parameters))
    }
}

/// Builds a [`ShopConfig`] from raw parameter strings.
///
/// Empty or missing values take the defaults; text values are kept as written.
/// Values that do not parse are logged and also take the defaults;
/// configuration never fails to load.
pub fn config_from_parameters(parameters: &HashMap<String, String>) -> ShopConfig {
    let mut config = ShopConfig::default();

    if let Some(raw) = non_empty(parameters, ShopConfig::DEFAULT_PRICE_KEY) {
        match raw.trim().parse::<u32>() {
            Ok(price) => config.default_price = price,
            Err(e) => tracing::warn!(
                "Invalid '{}' parameter {:?} ({}), using {}",
                ShopConfig::DEFAULT_PRICE_KEY,
                raw,
                e,
                ShopConfig::DEFAULT_PRICE
            ),
        }
    }

    if let Some(text) = non_empty(parameters, ShopConfig::REQUIREMENTS_TEXT_KEY) {
        config.requirements_text = text.to_string();
    }

    config
}

/// The raw value, unless it is missing or only whitespace.
fn non_empty<'a>(parameters: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    parameters
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUGINS_JS: &str = r#"// Generated by the host editor.
// Do not edit this file directly.
var $plugins =
[
{"name":"Community_Basic","status":true,"description":"Basic plugin","parameters":{"cacheLimit":"10"}},
{"name":"YED_SkillShop","status":true,"description":"Skill shop","parameters":{"[Basic Setting]":"","Default Price":"250","[Visual Setting]":"","Requirements Text":"Costs"}}
];
"#;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn extracts_shop_parameters_from_plugin_list() {
        let plugins = ParameterLoader::parse(PLUGINS_JS).unwrap();
        assert_eq!(plugins.len(), 2);

        let config = ParameterLoader::shop_config(&plugins).unwrap();
        assert_eq!(config.default_price, 250);
        assert_eq!(config.requirements_text, "Costs");
    }

    #[test]
    fn disabled_plugin_is_ignored() {
        let disabled = PLUGINS_JS.replace(
            r#""name":"YED_SkillShop","status":true"#,
            r#""name":"YED_SkillShop","status":false"#,
        );
        let plugins = ParameterLoader::parse(&disabled).unwrap();
        assert_eq!(ParameterLoader::shop_config(&plugins), None);
    }

    #[test]
    fn missing_and_invalid_values_use_defaults() {
        assert_eq!(config_from_parameters(&params(&[])), ShopConfig::default());

        let config = config_from_parameters(&params(&[
            ("Default Price", "lots"),
            ("Requirements Text", "  "),
        ]));
        assert_eq!(config, ShopConfig::default());

        let config = config_from_parameters(&params(&[("Default Price", " 0 ")]));
        assert_eq!(config.default_price, 0);
    }

    #[test]
    fn requirements_text_is_kept_verbatim() {
        let config = config_from_parameters(&params(&[("Requirements Text", "  Costs: ")]));
        assert_eq!(config.requirements_text, "  Costs: ");
    }

    #[test]
    fn rejects_script_without_array() {
        assert!(ParameterLoader::parse("var $plugins = null;").is_err());
    }
}
