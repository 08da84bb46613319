// Configuration type definitions

use serde::Deserialize;

/// Backend connection section
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub javascript_key: Option<String>,
    #[serde(default = "default_list_class")]
    pub list_class: String,
}

fn default_list_class() -> String {
    "ShoppingList".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            server_url: None,
            app_id: None,
            javascript_key: None,
            list_class: default_list_class(),
        }
    }
}

impl BackendConfig {
    /// Server URL and application id are both required to talk to the backend.
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.server_url) && present(&self.app_id)
    }
}

/// Item-name autocomplete section
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_field")]
    pub field: String,
}

fn default_enabled() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_results() -> usize {
    5
}

fn default_class_name() -> String {
    "Ingredient".to_string()
}

fn default_field() -> String {
    "name".to_string()
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            enabled: default_enabled(),
            debounce_ms: default_debounce_ms(),
            max_results: default_max_results(),
            class_name: default_class_name(),
            field: default_field(),
        }
    }
}

/// Display section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_backend_not_configured_by_default() {
        assert!(!BackendConfig::default().is_configured());
    }

    #[test]
    fn test_backend_requires_url_and_app_id() {
        let mut backend = BackendConfig {
            server_url: Some("https://parse.example.com/parse".to_string()),
            ..BackendConfig::default()
        };
        assert!(!backend.is_configured());

        backend.app_id = Some("   ".to_string());
        assert!(!backend.is_configured());

        backend.app_id = Some("app".to_string());
        assert!(backend.is_configured());
    }

    // Any debounce/max_results pair round-trips through TOML untouched.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_suggestion_numbers_parse(debounce_ms in 0u64..10_000, max_results in 0usize..50) {
            let toml_content = format!(r#"
[suggestions]
debounce_ms = {}
max_results = {}
"#, debounce_ms, max_results);

            let config: Config = toml::from_str(&toml_content).unwrap();
            prop_assert_eq!(config.suggestions.debounce_ms, debounce_ms);
            prop_assert_eq!(config.suggestions.max_results, max_results);
            prop_assert!(config.suggestions.enabled);
            prop_assert_eq!(config.suggestions.class_name.as_str(), "Ingredient");
        }
    }

    // Missing sections never fail parsing and always fall back to defaults.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_sections_use_defaults(
            include_backend in prop::bool::ANY,
            include_ui in prop::bool::ANY
        ) {
            let mut toml_content = String::new();
            if include_backend {
                toml_content.push_str("[backend]\napp_id = \"app\"\n");
            }
            if include_ui {
                toml_content.push_str("[ui]\ndark_mode = true\n");
            }

            let config: Config = toml::from_str(&toml_content).unwrap();
            prop_assert_eq!(config.backend.list_class.as_str(), "ShoppingList");
            prop_assert_eq!(config.suggestions.debounce_ms, 300);
            prop_assert_eq!(config.suggestions.max_results, 5);
            prop_assert_eq!(config.ui.dark_mode, include_ui);
        }
    }
}
