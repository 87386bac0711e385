// rule registry: typed contribution callbacks keyed by capability

use std::fmt;

use super::directive::Directive;

/// per-request inputs the rules may consult
///
/// built once per request by the host and passed through the whole
/// pipeline, so composition stays a pure function of registry + context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// the deployment environment is "local" (developer machine)
    pub local_env: bool,
    /// the request targets an administrative surface
    pub admin: bool,
}

/// which directives a rule applies to
#[derive(Debug, Clone)]
pub enum DirectiveScope {
    All,
    Only(Vec<Directive>),
}

impl DirectiveScope {
    /// scope a rule to a fixed list of directives
    pub fn only(directives: impl Into<Vec<Directive>>) -> Self {
        DirectiveScope::Only(directives.into())
    }

    pub fn applies_to(&self, directive: Directive) -> bool {
        match self {
            DirectiveScope::All => true,
            DirectiveScope::Only(list) => list.contains(&directive),
        }
    }
}

type OriginFn = dyn Fn(Vec<String>, Directive, &RequestContext) -> Vec<String> + Send + Sync;
type FlagFn = dyn Fn(bool, Directive, &RequestContext) -> bool + Send + Sync;

/// an origin-contributor rule: folds over the candidate list, appending
/// zero or more origin expressions
pub struct OriginRule {
    name: String,
    scope: DirectiveScope,
    run: Box<OriginFn>,
}

impl OriginRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn applies_to(&self, directive: Directive) -> bool {
        self.scope.applies_to(directive)
    }

    pub fn contribute(
        &self,
        origins: Vec<String>,
        directive: Directive,
        ctx: &RequestContext,
    ) -> Vec<String> {
        (self.run)(origins, directive, ctx)
    }
}

/// a boolean decider rule, used for the unsafe-inline and data-uri
/// capabilities; decisions are or-folded so a grant can never be revoked
/// by a later rule
pub struct FlagRule {
    name: String,
    scope: DirectiveScope,
    run: Box<FlagFn>,
}

impl FlagRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn applies_to(&self, directive: Directive) -> bool {
        self.scope.applies_to(directive)
    }

    pub fn decide(&self, current: bool, directive: Directive, ctx: &RequestContext) -> bool {
        (self.run)(current, directive, ctx)
    }
}

/// collects rules during bootstrap, in registration order
///
/// `build` consumes the builder, so late registration is unrepresentable:
/// once a `Registry` exists there is no handle left to mutate it with.
#[derive(Default)]
pub struct RegistryBuilder {
    origin_rules: Vec<OriginRule>,
    unsafe_inline_rules: Vec<FlagRule>,
    data_uri_rules: Vec<FlagRule>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// register an origin-contributor rule
    pub fn origin_rule<F>(mut self, name: impl Into<String>, scope: DirectiveScope, rule: F) -> Self
    where
        F: Fn(Vec<String>, Directive, &RequestContext) -> Vec<String> + Send + Sync + 'static,
    {
        self.origin_rules.push(OriginRule {
            name: name.into(),
            scope,
            run: Box::new(rule),
        });
        self
    }

    /// register an unsafe-inline decider rule
    pub fn unsafe_inline_rule<F>(
        mut self,
        name: impl Into<String>,
        scope: DirectiveScope,
        rule: F,
    ) -> Self
    where
        F: Fn(bool, Directive, &RequestContext) -> bool + Send + Sync + 'static,
    {
        self.unsafe_inline_rules.push(FlagRule {
            name: name.into(),
            scope,
            run: Box::new(rule),
        });
        self
    }

    /// register a data-uri decider rule
    pub fn data_uri_rule<F>(
        mut self,
        name: impl Into<String>,
        scope: DirectiveScope,
        rule: F,
    ) -> Self
    where
        F: Fn(bool, Directive, &RequestContext) -> bool + Send + Sync + 'static,
    {
        self.data_uri_rules.push(FlagRule {
            name: name.into(),
            scope,
            run: Box::new(rule),
        });
        self
    }

    /// freeze the rule set
    pub fn build(self) -> Registry {
        Registry {
            origin_rules: self.origin_rules,
            unsafe_inline_rules: self.unsafe_inline_rules,
            data_uri_rules: self.data_uri_rules,
        }
    }
}

/// the frozen rule set, shared read-only across concurrent requests
pub struct Registry {
    origin_rules: Vec<OriginRule>,
    unsafe_inline_rules: Vec<FlagRule>,
    data_uri_rules: Vec<FlagRule>,
}

impl Registry {
    /// origin-contributor rules, in registration order
    pub fn origin_rules(&self) -> &[OriginRule] {
        &self.origin_rules
    }

    /// unsafe-inline decider rules, in registration order
    pub fn unsafe_inline_rules(&self) -> &[FlagRule] {
        &self.unsafe_inline_rules
    }

    /// data-uri decider rules, in registration order
    pub fn data_uri_rules(&self) -> &[FlagRule] {
        &self.data_uri_rules
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field(
                "origin_rules",
                &self
                    .origin_rules
                    .iter()
                    .map(OriginRule::name)
                    .collect::<Vec<_>>(),
            )
            .field(
                "unsafe_inline_rules",
                &self
                    .unsafe_inline_rules
                    .iter()
                    .map(FlagRule::name)
                    .collect::<Vec<_>>(),
            )
            .field(
                "data_uri_rules",
                &self
                    .data_uri_rules
                    .iter()
                    .map(FlagRule::name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_is_preserved() {
        let registry = RegistryBuilder::new()
            .origin_rule("first", DirectiveScope::All, |o, _, _| o)
            .origin_rule("second", DirectiveScope::All, |o, _, _| o)
            .origin_rule("third", DirectiveScope::All, |o, _, _| o)
            .build();

        let names: Vec<&str> = registry.origin_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_scope_filtering() {
        let scope = DirectiveScope::only([Directive::ScriptSrc, Directive::StyleSrc]);
        assert!(scope.applies_to(Directive::ScriptSrc));
        assert!(scope.applies_to(Directive::StyleSrc));
        assert!(!scope.applies_to(Directive::ImgSrc));
        assert!(DirectiveScope::All.applies_to(Directive::ImgSrc));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }

    #[test]
    fn test_debug_lists_rule_names() {
        let registry = RegistryBuilder::new()
            .origin_rule("cdn", DirectiveScope::All, |o, _, _| o)
            .unsafe_inline_rule("legacy", DirectiveScope::All, |c, _, _| c)
            .build();

        let rendered = format!("{registry:?}");
        assert!(rendered.contains("cdn"));
        assert!(rendered.contains("legacy"));
    }
}
