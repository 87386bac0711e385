// origin sanitization and validation

use url::Url;

/// csp keyword tokens that bypass url validation entirely
const KEYWORDS: [&str; 6] = [
    "'self'",
    "'unsafe-inline'",
    "'unsafe-eval'",
    "'none'",
    "data:",
    "blob:",
];

/// url schemes permitted in origin expressions
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "wss"];

/// why a candidate origin was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Unparseable,
    MissingHost,
    HostTooShort,
    DisallowedScheme,
}

impl Rejection {
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Rejection::Unparseable => "not a parseable url",
            Rejection::MissingHost => "no host component",
            Rejection::HostTooShort => "host is 3 characters or fewer",
            Rejection::DisallowedScheme => "scheme is not http, https or wss",
        }
    }
}

/// validate a single candidate origin expression
///
/// keyword tokens pass through verbatim. url origins must carry an
/// http/https/wss scheme and a host longer than 3 characters, and are
/// re-serialized to `scheme://host[:port]` with path, query and fragment
/// stripped. anything else is dropped silently; directive rendering must
/// never fail because a rule contributed garbage.
pub fn validate_origin(candidate: &str) -> Option<String> {
    check_origin(candidate).ok()
}

/// validation with the rejection reason, for bootstrap-time config checks
/// and render-time logging
pub(crate) fn check_origin(candidate: &str) -> Result<String, Rejection> {
    if KEYWORDS.contains(&candidate) {
        return Ok(candidate.to_string());
    }

    let url = Url::parse(candidate).map_err(|_| Rejection::Unparseable)?;

    let host = url.host_str().ok_or(Rejection::MissingHost)?;
    // heuristic filter against junk contributions, not a hostname grammar
    if host.len() <= 3 {
        return Err(Rejection::HostTooShort);
    }

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(Rejection::DisallowedScheme);
    }

    // canonical origin form: scheme://host[:port], default ports already
    // normalized away by the url parser
    let mut origin = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{port}"));
    }
    Ok(origin)
}
