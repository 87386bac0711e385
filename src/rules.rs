// built-in rules and registry bootstrap

use tracing::{info, warn};

use crate::config::PolicyConfig;
use crate::policy::{Directive, DirectiveScope, Registry, RegistryBuilder};

/// origins contributed to every directive when running locally
pub const LOCAL_DEV_ORIGINS: [&str; 6] = [
    "http://localhost",
    "https://localhost",
    "http://localhost:8080",
    "https://localhost:8080",
    "http://localhost:9090",
    "https://localhost:9090",
];

/// build the frozen rule registry from configuration
pub fn bootstrap(config: &PolicyConfig) -> Registry {
    builder_from_config(config).build()
}

/// wire the configured rules into a builder, leaving it open so hosts can
/// register additional rules before freezing
pub fn builder_from_config(config: &PolicyConfig) -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();

    if !config.allowed_origins.is_empty() {
        let global = config.allowed_origins.clone();
        builder = builder.origin_rule(
            "config.allowed_origins",
            DirectiveScope::All,
            move |mut origins, _directive, _ctx| {
                origins.extend(global.iter().cloned());
                origins
            },
        );
    }

    for directive in Directive::ALL {
        let extra = config.directives.for_directive(directive).to_vec();
        if extra.is_empty() {
            continue;
        }
        builder = builder.origin_rule(
            format!("config.directives.{directive}"),
            DirectiveScope::only([directive]),
            move |mut origins, _directive, _ctx| {
                origins.extend(extra.iter().cloned());
                origins
            },
        );
    }

    if !config.admin_origins.is_empty() {
        let admin = config.admin_origins.clone();
        builder = builder.origin_rule(
            "config.admin_origins",
            DirectiveScope::All,
            move |mut origins, _directive, ctx| {
                if ctx.admin {
                    origins.extend(admin.iter().cloned());
                }
                origins
            },
        );
    }

    // registered only for local deployments, and double-checked against the
    // per-request context so a stale registry cannot leak localhost origins
    if config.environment.is_local() {
        builder = builder.origin_rule(
            "local_dev_origins",
            DirectiveScope::All,
            |mut origins, _directive, ctx| {
                if ctx.local_env {
                    origins.extend(LOCAL_DEV_ORIGINS.iter().map(|o| o.to_string()));
                }
                origins
            },
        );
    }

    if !config.unsafe_inline.is_empty() {
        warn!(
            directives = ?config.unsafe_inline,
            "'unsafe-inline' granted - inline script/style injection is not mitigated there"
        );
        builder = builder.unsafe_inline_rule(
            "config.unsafe_inline",
            DirectiveScope::Only(config.unsafe_inline.clone()),
            |_current, _directive, _ctx| true,
        );
    }

    if !config.data_uris.is_empty() {
        builder = builder.data_uri_rule(
            "config.data_uris",
            DirectiveScope::Only(config.data_uris.clone()),
            |_current, _directive, _ctx| true,
        );
    }

    info!(environment = ?config.environment, "csp rule registry bootstrapped");
    builder
}
