//! URL Parts - host and path splitting
//!
//! Pure string operations, no network access and no DNS.
//!
//! Host splitting follows the ICANN section of the public-suffix list:
//! `a.b.example.co.uk` → subdomain `a.b`, domain `example`, suffix `co.uk`.
//! Private-section entries (e.g. `github.io`) are not treated as suffixes.
//!
//! Path splitting follows generic URL-parse rules: the scheme is only
//! recognized as `letter (letter|digit|+|-|.)* ':'`, the netloc only after
//! `//`, and `example.com/login` therefore has the path `example.com/login`.

use once_cell::sync::Lazy;
use regex::Regex;

/// `scheme://` or bare `//` prefix
static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(?:[a-z0-9+.\-]+:)?//").expect("valid scheme regex"));

static IPV4_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(?:\.[0-9]{1,3}){3}$").expect("valid ipv4 regex"));

/// Schemes whose last path segment may carry `;params`
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

// ============================================================================
// HOST PARTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl HostParts {
    /// Split a raw URL into subdomain / registrable label / public suffix
    pub fn from_url(url: &str) -> Self {
        let host = extract_host(url);
        if host.is_empty() {
            return Self::default();
        }

        if is_ipv4_literal(host) {
            return Self {
                domain: host.to_string(),
                ..Default::default()
            };
        }

        let labels: Vec<&str> = host.split('.').collect();
        let suffix_start = icann_suffix_start(&labels);

        match suffix_start {
            // The whole host is a public suffix: nothing registrable
            Some(0) => Self {
                suffix: host.to_string(),
                ..Default::default()
            },
            Some(start) => Self {
                subdomain: labels[..start - 1].join("."),
                domain: labels[start - 1].to_string(),
                suffix: labels[start..].join("."),
            },
            None => {
                let last = labels.len() - 1;
                Self {
                    subdomain: labels[..last].join("."),
                    domain: labels[last].to_string(),
                    suffix: String::new(),
                }
            }
        }
    }
}

/// Host portion of a URL: scheme, path, query, fragment, userinfo and port
/// removed, trailing dot stripped
pub fn extract_host(url: &str) -> &str {
    let rest = SCHEME_PREFIX
        .find(url)
        .map(|m| &url[m.end()..])
        .unwrap_or(url);

    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let netloc = &rest[..end];

    let host = netloc.rsplit_once('@').map(|(_, h)| h).unwrap_or(netloc);
    let host = strip_port(host);
    host.strip_suffix('.').unwrap_or(host)
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal keeps its colons
    if host.starts_with('[') {
        return match host.find(']') {
            Some(i) => &host[..=i],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((h, port)) if port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    }
}

pub fn is_ipv4_literal(s: &str) -> bool {
    IPV4_LITERAL.is_match(s)
}

/// Index of the first label of the longest ICANN public suffix, if any
fn icann_suffix_start(labels: &[&str]) -> Option<usize> {
    for start in 0..labels.len() {
        let candidate = labels[start..].join(".").to_lowercase();
        if candidate.is_empty() {
            continue;
        }
        let matched = psl::suffix(candidate.as_bytes()).is_some_and(|s| {
            s.as_bytes() == candidate.as_bytes() && s.typ() == Some(psl::Type::Icann)
        });
        if matched {
            return Some(start);
        }
    }
    None
}

// ============================================================================
// PATH
// ============================================================================

/// Path component of a URL (query, fragment and trailing `;params` removed)
pub fn extract_path(url: &str) -> &str {
    let (scheme, mut rest) = split_scheme(url);

    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        rest = &after[end..];
    }

    if let Some(i) = rest.find('#') {
        rest = &rest[..i];
    }
    if let Some(i) = rest.find('?') {
        rest = &rest[..i];
    }

    let scheme = scheme.to_ascii_lowercase();
    if PARAM_SCHEMES.contains(&scheme.as_str()) {
        rest = strip_params(rest);
    }
    rest
}

fn split_scheme(url: &str) -> (&str, &str) {
    if let Some(i) = url.find(':') {
        let candidate = &url[..i];
        let valid = candidate.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            return (candidate, &url[i + 1..]);
        }
    }
    ("", url)
}

fn strip_params(path: &str) -> &str {
    let from = path.rfind('/').unwrap_or(0);
    match path[from..].find(';') {
        Some(i) => &path[..from + i],
        None => path,
    }
}
