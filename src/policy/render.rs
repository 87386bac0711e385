// per-directive rendering: contributions, validation, precedence

use tracing::{debug, trace};

use super::directive::Directive;
use super::origin::check_origin;
use super::registry::{FlagRule, Registry, RequestContext};

/// render a single filterable directive to its header fragment
///
/// origin-contributor rules run in registration order and may only append.
/// candidates that fail validation are dropped without disturbing the order
/// of the survivors, and duplicates are kept as contributed; first-seen
/// order is part of the observable output.
///
/// precedence for the leading tokens is fixed: `'self'` always comes first,
/// then `data:` if granted, then `'unsafe-inline'` if granted, then the
/// contributed origins. the degenerate case renders as `"{name} 'self'"`.
pub fn render_directive(registry: &Registry, directive: Directive, ctx: &RequestContext) -> String {
    let mut candidates = Vec::new();
    for rule in registry.origin_rules() {
        if !rule.applies_to(directive) {
            continue;
        }
        let before = candidates.len();
        candidates = rule.contribute(candidates, directive, ctx);
        trace!(
            rule = rule.name(),
            %directive,
            contributed = candidates.len().saturating_sub(before),
            "origin rule evaluated"
        );
    }

    // stable filter: validation drops candidates but never reorders
    let mut origins = Vec::with_capacity(candidates.len() + 3);
    for candidate in candidates {
        match check_origin(&candidate) {
            Ok(origin) => origins.push(origin),
            Err(rejection) => debug!(
                candidate = %candidate,
                %directive,
                reason = rejection.reason(),
                "dropped invalid origin candidate"
            ),
        }
    }

    if evaluate_flags(registry.unsafe_inline_rules(), directive, ctx) {
        origins.insert(0, "'unsafe-inline'".to_string());
    }
    if evaluate_flags(registry.data_uri_rules(), directive, ctx) {
        origins.insert(0, "data:".to_string());
    }
    origins.insert(0, "'self'".to_string());

    format!("{} {}", directive, origins.join(" "))
}

/// or-fold a decider chain; a grant is monotonic and survives any later
/// rule returning false
fn evaluate_flags(rules: &[FlagRule], directive: Directive, ctx: &RequestContext) -> bool {
    let mut flag = false;
    for rule in rules {
        if !rule.applies_to(directive) {
            continue;
        }
        flag |= rule.decide(flag, directive, ctx);
    }
    flag
}
