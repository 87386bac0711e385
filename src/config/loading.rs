// configuration loading and validation

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use thiserror::Error;
use tracing::{debug, info};

use super::types::PolicyConfig;
use crate::policy::origin::check_origin;

/// bootstrap-time configuration failures
///
/// request-time origin filtering is silent, but a configured origin that
/// can never survive validation is a deployment mistake and should abort
/// startup instead of quietly weakening nothing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("failed to parse configuration")]
    Parse(#[from] figment::Error),

    #[error("origin {origin:?} in {section} would be dropped at render time: {reason}")]
    DeadOrigin {
        section: String,
        origin: String,
        reason: &'static str,
    },
}

/// load and merge policy configuration
/// precedence: defaults < config file < CSPWALL_* environment variables
pub fn load_policy_config(config_file: Option<&Path>) -> Result<PolicyConfig, ConfigError> {
    let mut figment = Figment::new().merge(Serialized::defaults(PolicyConfig::default()));

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        info!("loading policy config file: {}", path.display());
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("CSPWALL_").split("__"));

    let config: PolicyConfig = figment.extract()?;
    validate_config(&config)?;

    debug!("final policy configuration: {:?}", config);
    Ok(config)
}

/// reject origins that the render-time validator would silently drop
fn validate_config(config: &PolicyConfig) -> Result<(), ConfigError> {
    for (section, origin) in config.configured_origins() {
        if let Err(rejection) = check_origin(origin) {
            return Err(ConfigError::DeadOrigin {
                section: section.to_string(),
                origin: origin.to_string(),
                reason: rejection.reason(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Environment;
    use crate::policy::Directive;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_configuration() {
        let config = load_policy_config(None).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_config_file_loading() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cspwall.toml");

        fs::write(
            &config_path,
            r#"
environment = "local"
admin_path_prefix = "/admin"
allowed_origins = ["https://static.example.org"]
unsafe_inline = ["script-src", "style-src"]
data_uris = ["font-src", "img-src"]

[directives]
script_src = ["https://cdn.example.com"]
"#,
        )
        .unwrap();

        let config = load_policy_config(Some(&config_path)).unwrap();

        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.admin_path_prefix.as_deref(), Some("/admin"));
        assert_eq!(config.allowed_origins, vec!["https://static.example.org"]);
        assert_eq!(
            config.unsafe_inline,
            vec![Directive::ScriptSrc, Directive::StyleSrc]
        );
        assert_eq!(config.data_uris, vec![Directive::FontSrc, Directive::ImgSrc]);
        assert_eq!(
            config.directives.script_src,
            vec!["https://cdn.example.com"]
        );
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = load_policy_config(Some(Path::new("/nonexistent/cspwall.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_unknown_directive_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cspwall.toml");
        fs::write(&config_path, "unsafe_inline = [\"object-src\"]\n").unwrap();

        let err = load_policy_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_dead_origin_is_rejected_loudly() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cspwall.toml");
        fs::write(
            &config_path,
            "allowed_origins = [\"ftp://files.example.org\"]\n",
        )
        .unwrap();

        let err = load_policy_config(Some(&config_path)).unwrap_err();
        match err {
            ConfigError::DeadOrigin {
                section,
                origin,
                reason,
            } => {
                assert_eq!(section, "allowed_origins");
                assert_eq!(origin, "ftp://files.example.org");
                assert_eq!(reason, "scheme is not http, https or wss");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_keyword_origins_survive_validation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cspwall.toml");
        fs::write(
            &config_path,
            "[directives]\nimg_src = [\"data:\", \"https://images.example.org\"]\n",
        )
        .unwrap();

        let config = load_policy_config(Some(&config_path)).unwrap();
        assert_eq!(
            config.directives.img_src,
            vec!["data:", "https://images.example.org"]
        );
    }
}
