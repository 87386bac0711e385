// security header assembly

use http::{header, HeaderMap, HeaderValue};

use crate::policy::{compose_policy, Registry, RequestContext};

/// merge the composed csp value and the fixed security headers into an
/// existing header map
///
/// the six security headers are last-writer-wins over anything already
/// present under the same names; every other header passes through
/// untouched. infallible: the composed value is always valid ascii.
pub fn assemble_headers(registry: &Registry, ctx: &RequestContext, headers: &mut HeaderMap) {
    let policy = compose_policy(registry, ctx);
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        // composed from validated origins and fixed tokens, always parses
        HeaderValue::from_str(&policy).unwrap(),
    );

    // prevent framing to avoid clickjacking
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("deny"));

    // enable the legacy xss auditor where still present
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );

    // prevent mime type sniffing
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    // disable dns prefetching of off-site links
    headers.insert(
        header::X_DNS_PREFETCH_CONTROL,
        HeaderValue::from_static("off"),
    );

    // referrer policy
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
}
