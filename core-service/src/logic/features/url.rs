//! URL Feature Extractor
//!
//! Raw URL string → 23 named features in `URL_FEATURE_LAYOUT` order.
//! Total and deterministic: every string (including "") produces a vector,
//! no network or DNS access happens.
//!
//! Lengths count Unicode scalar values, not bytes. Digits are ASCII `0-9`
//! only; letters are alphabetic scalars that are not also numeric, so
//! fractions like `½` and letter-numbers like `Ⅻ` count as neither.

use super::host::{extract_path, is_ipv4_literal, HostParts};
use super::layout::{url_feature_names, url_layout_hash, URL_FEATURE_COUNT, URL_FEATURE_VERSION};
use super::vector::{FeatureExtractor, FeatureVector};

/// Keywords counted once each when present anywhere in the lowercased URL
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "verify", "update", "secure", "bank", "account", "pay", "password",
];

/// Characters counted by `NumSpecialChars`
const SPECIAL_CHARS: &[char] = &['?', '=', '&', '@', '-', '_', '%'];

/// Characters counted by `ObfuscationCount`
const OBFUSCATION_CHARS: &[char] = &['@', '-', '_'];

/// Domains longer than this set `LongDomain`
const LONG_DOMAIN_THRESHOLD: usize = 15;

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFeatureExtractor;

impl UrlFeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, url: &str) -> FeatureVector {
        FeatureVector::dense(
            URL_FEATURE_VERSION,
            url_layout_hash(),
            url_feature_names(),
            compute_values(url).to_vec(),
        )
    }
}

impl FeatureExtractor for UrlFeatureExtractor {
    fn extract(&self, input: &str) -> FeatureVector {
        UrlFeatureExtractor::extract(self, input)
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { count as f64 / total as f64 }
}

fn is_digit(c: char) -> bool {
    c.to_digit(10).is_some()
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

fn count_chars(s: &str, set: &[char]) -> usize {
    s.chars().filter(|c| set.contains(c)).count()
}

/// Feature values in layout order
fn compute_values(url: &str) -> [f64; URL_FEATURE_COUNT] {
    let url_len = url.chars().count();

    let host = HostParts::from_url(url);
    let path = extract_path(url);

    let domain_len = host.domain.chars().count();
    let num_subdomains = if host.subdomain.is_empty() {
        0
    } else {
        host.subdomain.split('.').count()
    };
    let dots = if host.domain.is_empty() {
        0
    } else {
        host.domain.matches('.').count() + host.subdomain.matches('.').count()
    };
    let hyphens = host.domain.matches('-').count() + host.subdomain.matches('-').count();
    let digit_in_domain = host
        .domain
        .chars()
        .chain(host.subdomain.chars())
        .any(is_digit);

    let letters = url.chars().filter(|c| is_letter(*c)).count();
    let digits = url.chars().filter(|c| is_digit(*c)).count();
    let specials = count_chars(url, SPECIAL_CHARS);

    let lowered = url.to_lowercase();
    let keywords = SUSPICIOUS_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .count();

    let obfuscated = count_chars(url, OBFUSCATION_CHARS);

    [
        url_len as f64,
        flag(url.starts_with("https")),
        domain_len as f64,
        host.subdomain.chars().count() as f64,
        host.suffix.chars().count() as f64,
        num_subdomains as f64,
        dots as f64,
        hyphens as f64,
        flag(digit_in_domain),
        flag(domain_len > LONG_DOMAIN_THRESHOLD),
        flag(is_ipv4_literal(&host.domain)),
        path.matches('/').count() as f64,
        path.chars().count() as f64,
        letters as f64,
        ratio(letters, url_len),
        digits as f64,
        ratio(digits, url_len),
        specials as f64,
        ratio(specials, url_len),
        keywords as f64,
        obfuscated as f64,
        flag(obfuscated > 0),
        ratio(obfuscated, url_len),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(url: &str, name: &str) -> f64 {
        UrlFeatureExtractor::new()
            .extract(url)
            .get_by_name(name)
            .unwrap_or_else(|| panic!("missing feature {name}"))
    }

    #[test]
    fn test_letters_and_digits_exclude_numeric_symbols() {
        let url = "http://a.com/½Ⅻ7";
        assert_eq!(feature(url, "NumDigits"), 1.0);
        assert_eq!(feature(url, "NumLetters"), 8.0);
        assert_eq!(feature("http://ⅻ.example.com", "DigitInDomain"), 0.0);
        assert_eq!(feature("http://x9.example.com", "DigitInDomain"), 1.0);
    }

    #[test]
    fn test_layout_metadata() {
        let v = UrlFeatureExtractor::new().extract("http://a.com");
        assert_eq!(v.version, URL_FEATURE_VERSION);
        assert_eq!(v.layout_hash, url_layout_hash());
        assert_eq!(v.len(), URL_FEATURE_COUNT);
    }

    #[test]
    fn test_empty_url() {
        let v = UrlFeatureExtractor::new().extract("");
        for name in [
            "URLLength",
            "LetterRatio",
            "DigitRatio",
            "SpecialCharRatio",
            "ObfuscationRatio",
            "IsHTTPS",
        ] {
            assert_eq!(v.get_by_name(name), Some(0.0), "{name}");
        }
    }

    #[test]
    fn test_is_https() {
        assert_eq!(feature("https://a.com", "IsHTTPS"), 1.0);
        assert_eq!(feature("http://a.com", "IsHTTPS"), 0.0);
    }

    #[test]
    fn test_ip_literal() {
        assert_eq!(feature("http://192.168.0.1/path", "IsDomainIP"), 1.0);
        assert_eq!(feature("http://example.com/path", "IsDomainIP"), 0.0);
    }

    #[test]
    fn test_keyword_count_case_insensitive() {
        assert_eq!(feature("LoginSecureBank", "SuspiciousKeywordCount"), 3.0);
        // Each keyword counts once, however often it appears
        assert_eq!(feature("login-login-login", "SuspiciousKeywordCount"), 1.0);
    }

    #[test]
    fn test_host_features() {
        let v = UrlFeatureExtractor::new()
            .extract("https://secure-login-bank-verify.example.com/account");
        assert_eq!(v.get_by_name("URLLength"), Some(52.0));
        assert_eq!(v.get_by_name("DomainLength"), Some(7.0));
        assert_eq!(v.get_by_name("SubdomainLength"), Some(24.0));
        assert_eq!(v.get_by_name("TLDLength"), Some(3.0));
        assert_eq!(v.get_by_name("NumSubdomains"), Some(1.0));
        assert_eq!(v.get_by_name("NumDotsInDomain"), Some(0.0));
        assert_eq!(v.get_by_name("HyphenCount"), Some(3.0));
        assert_eq!(v.get_by_name("LongDomain"), Some(0.0));
        assert_eq!(v.get_by_name("NumPathSegments"), Some(1.0));
        assert_eq!(v.get_by_name("PathLength"), Some(8.0));
        assert_eq!(v.get_by_name("SuspiciousKeywordCount"), Some(5.0));
        assert_eq!(v.get_by_name("ObfuscationCount"), Some(3.0));
        assert_eq!(v.get_by_name("HasObfuscation"), Some(1.0));
    }

    #[test]
    fn test_subdomain_dots_and_digits() {
        let v = UrlFeatureExtractor::new().extract("http://a1.b.c.verylongdomainname1.co.uk/x/y");
        assert_eq!(v.get_by_name("NumSubdomains"), Some(3.0));
        assert_eq!(v.get_by_name("NumDotsInDomain"), Some(2.0));
        assert_eq!(v.get_by_name("DigitInDomain"), Some(1.0));
        assert_eq!(v.get_by_name("LongDomain"), Some(1.0));
        assert_eq!(v.get_by_name("TLDLength"), Some(5.0));
        assert_eq!(v.get_by_name("NumPathSegments"), Some(2.0));
    }

    #[test]
    fn test_ratios_in_unit_interval() {
        for url in [
            "",
            "@@@",
            "http://192.168.0.1/?a=1&b=2%20",
            "https://пример.рф/путь",
            "ftp://user@host-name_x.example.org:21/file",
        ] {
            let v = UrlFeatureExtractor::new().extract(url);
            for name in ["LetterRatio", "DigitRatio", "SpecialCharRatio", "ObfuscationRatio"] {
                let r = v.get_by_name(name).unwrap_or(-1.0);
                assert!((0.0..=1.0).contains(&r), "{name}={r} for {url:?}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let extractor = UrlFeatureExtractor::new();
        let url = "http://paypal-account-update.example-login.com/verify?id=123";
        assert_eq!(extractor.extract(url), extractor.extract(url));
    }
}
