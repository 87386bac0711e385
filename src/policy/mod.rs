// policy engine public api

pub mod compose;
pub mod directive;
pub mod origin;
pub mod registry;
pub mod render;

pub use compose::{compose_policy, INVARIANT_DIRECTIVES};
pub use directive::Directive;
pub use origin::validate_origin;
pub use registry::{DirectiveScope, FlagRule, OriginRule, Registry, RegistryBuilder, RequestContext};
pub use render::render_directive;
