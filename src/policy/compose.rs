// full policy composition

use super::directive::Directive;
use super::registry::{Registry, RequestContext};
use super::render::render_directive;

/// directives with fixed values, appended verbatim after the filterable set
///
/// no rule may contribute to these; they are constant for every render.
pub const INVARIANT_DIRECTIVES: [&str; 4] = [
    "base-uri 'self'",
    "form-action 'self'",
    "frame-ancestors 'none'",
    "block-all-mixed-content",
];

/// compose the complete content-security-policy header value
///
/// renders the seven filterable directives in fixed order, appends the
/// invariant directives and joins everything with `"; "`. pure in registry
/// and context; composing twice yields identical bytes.
pub fn compose_policy(registry: &Registry, ctx: &RequestContext) -> String {
    let mut parts: Vec<String> = Directive::ALL
        .iter()
        .map(|directive| render_directive(registry, *directive, ctx))
        .collect();
    parts.extend(INVARIANT_DIRECTIVES.iter().map(|s| s.to_string()));
    parts.join("; ")
}
