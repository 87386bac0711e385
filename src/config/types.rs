// configuration type definitions

use serde::{Deserialize, Serialize};

use crate::policy::Directive;

/// complete policy configuration
///
/// everything here is consumed once during bootstrap to build the frozen
/// rule registry; nothing is consulted per request.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// deployment environment; `local` enables the localhost origins
    pub environment: Environment,

    /// request-path prefix that marks a request as administrative
    pub admin_path_prefix: Option<String>,

    /// origins allowed in every filterable directive
    pub allowed_origins: Vec<String>,

    /// origins allowed in every filterable directive, but only for
    /// administrative-context requests
    pub admin_origins: Vec<String>,

    /// extra origins per directive
    pub directives: DirectiveOverrides,

    /// directives granted the `'unsafe-inline'` keyword
    pub unsafe_inline: Vec<Directive>,

    /// directives granted the `data:` keyword
    pub data_uris: Vec<Directive>,
}

/// deployment environment, after the common four-tier split
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Development,
    Staging,
    #[default]
    Production,
}

impl Environment {
    pub fn is_local(self) -> bool {
        self == Environment::Local
    }
}

/// per-directive origin lists
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DirectiveOverrides {
    pub default_src: Vec<String>,
    pub connect_src: Vec<String>,
    pub font_src: Vec<String>,
    pub frame_src: Vec<String>,
    pub img_src: Vec<String>,
    pub script_src: Vec<String>,
    pub style_src: Vec<String>,
}

impl DirectiveOverrides {
    /// the configured origin list for one directive
    pub fn for_directive(&self, directive: Directive) -> &[String] {
        match directive {
            Directive::DefaultSrc => &self.default_src,
            Directive::ConnectSrc => &self.connect_src,
            Directive::FontSrc => &self.font_src,
            Directive::FrameSrc => &self.frame_src,
            Directive::ImgSrc => &self.img_src,
            Directive::ScriptSrc => &self.script_src,
            Directive::StyleSrc => &self.style_src,
        }
    }
}

impl PolicyConfig {
    /// iterate every configured origin together with where it came from,
    /// for bootstrap-time validation
    pub(crate) fn configured_origins(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        let global = self
            .allowed_origins
            .iter()
            .map(|o| ("allowed_origins", o.as_str()));
        let admin = self
            .admin_origins
            .iter()
            .map(|o| ("admin_origins", o.as_str()));
        let per_directive = Directive::ALL.into_iter().flat_map(move |directive| {
            self.directives
                .for_directive(directive)
                .iter()
                .map(move |o| (directive.name(), o.as_str()))
        });
        global.chain(admin).chain(per_directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty_and_production() {
        let config = PolicyConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.environment.is_local());
        assert!(config.allowed_origins.is_empty());
        assert!(config.unsafe_inline.is_empty());
        assert!(config.admin_path_prefix.is_none());
    }

    #[test]
    fn test_configured_origins_covers_all_sections() {
        let config = PolicyConfig {
            allowed_origins: vec!["https://static.example.org".to_string()],
            admin_origins: vec!["https://updates.example.org".to_string()],
            directives: DirectiveOverrides {
                script_src: vec!["https://cdn.example.com".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        let origins: Vec<(&str, &str)> = config.configured_origins().collect();
        assert_eq!(
            origins,
            vec![
                ("allowed_origins", "https://static.example.org"),
                ("admin_origins", "https://updates.example.org"),
                ("script-src", "https://cdn.example.com"),
            ]
        );
    }
}
