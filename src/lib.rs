// cspwall: content-security-policy header composition for axum services
//
// a host builds a `PolicyConfig` (toml/env via figment), bootstraps a frozen
// rule `Registry` from it, and layers `apply_security_headers` onto its
// router; every response then carries a composed csp header plus the fixed
// anti-xss/clickjacking headers. rules are typed callbacks scoped to
// directives and evaluated in registration order - contributions are
// append-only and boolean grants are or-folded, so later rules can widen a
// policy but never narrow it.

pub mod config;
pub mod headers;
pub mod middleware;
pub mod policy;
pub mod rules;

pub use config::{load_policy_config, ConfigError, Environment, PolicyConfig};
pub use headers::assemble_headers;
pub use middleware::{apply_security_headers, CspState};
pub use policy::{
    compose_policy, render_directive, validate_origin, Directive, DirectiveScope, Registry,
    RegistryBuilder, RequestContext,
};
pub use rules::{bootstrap, builder_from_config};
