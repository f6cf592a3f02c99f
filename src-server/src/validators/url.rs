// FICHIER : src-server/src/validators/url.rs

use super::{FieldValidator, FieldValue, ValidationError};
use url::{Host, Url};

pub const INVALID_URL: &str = "Enter a valid URL.";

const SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Syntaxe d'URL absolue : schéma réseau, hôte obligatoire, pas d'espaces.
#[derive(Debug, Clone, Default)]
pub struct UrlValidator;

impl UrlValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, raw: &str) -> Result<(), ValidationError> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(ValidationError::new(INVALID_URL));
        }

        let parsed = Url::parse(raw).map_err(|_| ValidationError::new(INVALID_URL))?;
        if !SCHEMES.contains(&parsed.scheme()) {
            return Err(ValidationError::new(INVALID_URL));
        }

        match parsed.host() {
            Some(Host::Domain(domain)) if is_valid_domain(domain) => Ok(()),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
            _ => Err(ValidationError::new(INVALID_URL)),
        }
    }
}

// `url` normalise déjà le domaine (minuscules, punycode).
fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain == "localhost" {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|l| {
        !l.is_empty()
            && l.len() <= 63
            && !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    let tld_ok = tld.starts_with("xn--")
        || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

impl FieldValidator for UrlValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(raw) => self.check(raw),
            None => Err(ValidationError::new(INVALID_URL)),
        }
    }
}
