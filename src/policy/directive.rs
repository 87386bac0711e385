// csp directive names

use serde::{Deserialize, Serialize};
use std::fmt;

/// the filterable csp directives
///
/// this is a closed set: rules may contribute origins to these directives,
/// but the set itself is fixed at compile time. the invariant directives
/// (base-uri, form-action, frame-ancestors, block-all-mixed-content) are
/// not represented here because no rule may touch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Directive {
    DefaultSrc,
    ConnectSrc,
    FontSrc,
    FrameSrc,
    ImgSrc,
    ScriptSrc,
    StyleSrc,
}

impl Directive {
    /// all filterable directives, in composition order
    pub const ALL: [Directive; 7] = [
        Directive::DefaultSrc,
        Directive::ConnectSrc,
        Directive::FontSrc,
        Directive::FrameSrc,
        Directive::ImgSrc,
        Directive::ScriptSrc,
        Directive::StyleSrc,
    ];

    /// the directive name as it appears in the header value
    pub fn name(&self) -> &'static str {
        match self {
            Directive::DefaultSrc => "default-src",
            Directive::ConnectSrc => "connect-src",
            Directive::FontSrc => "font-src",
            Directive::FrameSrc => "frame-src",
            Directive::ImgSrc => "img-src",
            Directive::ScriptSrc => "script-src",
            Directive::StyleSrc => "style-src",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
