use std::sync::LazyLock;

use regex::Regex;

use crate::html::decode_entities;

pub const MIN_BRAND_LEN: usize = 2;
pub const MAX_BRAND_LEN: usize = 100;

/// Values that appear in brand slots but never name a brand.
const GENERIC_DENYLIST: &[&str] = &[
    "home",
    "homepage",
    "home page",
    "welcome",
    "index",
    "untitled",
    "default",
    "about",
    "about us",
    "contact",
    "contact us",
    "menu",
    "login",
    "log in",
    "sign in",
    "shop",
    "blog",
    "news",
    "services",
    "products",
    "search",
    "page not found",
    "not found",
    "404",
    "loading",
    "logo",
    "site",
    "website",
    "my site",
    "my blog",
    "wordpress",
    "just another wordpress site",
    "skip to content",
    "cart",
    "privacy policy",
    "cookie policy",
    "terms and conditions",
    "admin",
    "all rights reserved",
];

/// Words that describe a business rather than name it.
pub const BUSINESS_DESCRIPTORS: &[&str] = &[
    "accountants",
    "agency",
    "agents",
    "architects",
    "associates",
    "bakery",
    "builders",
    "cafe",
    "clinic",
    "co",
    "company",
    "consultancy",
    "consulting",
    "dental",
    "design",
    "digital",
    "electrical",
    "estate",
    "financial",
    "group",
    "health",
    "holdings",
    "international",
    "law",
    "legal",
    "limited",
    "ltd",
    "marketing",
    "media",
    "partners",
    "plumbing",
    "properties",
    "property",
    "restaurant",
    "services",
    "solicitors",
    "solutions",
    "studio",
    "systems",
    "technologies",
    "uk",
];

static LEGAL_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[,\s]+(?:ltd|limited|llp|llc|inc|plc|gmbh|pty)\.?$").expect("valid legal suffix regex")
});
static TRAILING_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d{4}$").expect("valid trailing year regex"));
static LOGO_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+logo$").expect("valid logo suffix regex"));
static ACRONYM_COMPOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,6})\s+(.+)$").expect("valid acronym regex"));
static PERSON_COMPOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+\s+[A-Z][a-z]+)\s+(.+)$").expect("valid person name regex")
});

/// Normalize a raw brand value, or reject it.
///
/// Rejects values outside the length bounds, generic denylisted words,
/// URLs and e-mail addresses.
#[must_use]
pub fn clean_brand(raw: &str) -> Option<String> {
    let decoded = decode_entities(raw);
    let mut value = decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '&' && c != ')' && c != '!')
        .to_string();

    for re in [&*LOGO_SUFFIX_RE, &*TRAILING_YEAR_RE, &*LEGAL_SUFFIX_RE] {
        let stripped = re.replace(&value, "").trim().to_string();
        value = stripped;
    }

    let lower = value.to_lowercase();
    let len = value.chars().count();
    if !(MIN_BRAND_LEN..=MAX_BRAND_LEN).contains(&len)
        || GENERIC_DENYLIST.contains(&lower.as_str())
        || lower.contains("http")
        || lower.starts_with("www.")
        || lower.contains('/')
        || lower.contains('@')
    {
        return None;
    }
    Some(value)
}

fn all_descriptors(rest: &str) -> bool {
    let words: Vec<String> = rest
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty() && w != "&" && w != "and")
        .collect();
    !words.is_empty() && words.iter().all(|w| BUSINESS_DESCRIPTORS.contains(&w.as_str()))
}

#[must_use]
pub fn is_descriptor(word: &str) -> bool {
    BUSINESS_DESCRIPTORS.contains(&word.to_lowercase().as_str())
}

/// `XYZ Marketing Agency` → `XYZ`.
#[must_use]
pub fn acronym_compound(value: &str) -> Option<String> {
    let cap = ACRONYM_COMPOUND_RE.captures(value)?;
    let acronym = cap.get(1)?.as_str();
    let rest = cap.get(2)?.as_str();
    (all_descriptors(rest) && !is_descriptor(acronym)).then(|| acronym.to_string())
}

/// `Henry Adams Estate Agents` → `Henry Adams`.
#[must_use]
pub fn person_compound(value: &str) -> Option<String> {
    let cap = PERSON_COMPOUND_RE.captures(value)?;
    let name = cap.get(1)?.as_str();
    let rest = cap.get(2)?.as_str();
    let name_is_descriptor = name.split_whitespace().any(is_descriptor);
    (all_descriptors(rest) && !name_is_descriptor).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_long_and_generic_values() {
        assert_eq!(clean_brand("A"), None);
        assert_eq!(clean_brand(&"x".repeat(101)), None);
        assert_eq!(clean_brand("Home"), None);
        assert_eq!(clean_brand("  Contact Us "), None);
        assert_eq!(clean_brand("https://acme.com"), None);
    }

    #[test]
    fn strips_suffixes_and_punctuation() {
        assert_eq!(clean_brand("Harbour Dental Ltd").as_deref(), Some("Harbour Dental"));
        assert_eq!(clean_brand("Acme Co logo").as_deref(), Some("Acme Co"));
        assert_eq!(clean_brand("Acme 2024").as_deref(), Some("Acme"));
        assert_eq!(clean_brand(" - Smith &amp; Co | ").as_deref(), Some("Smith & Co"));
    }

    #[test]
    fn acronym_compound_extracts_acronym() {
        assert_eq!(acronym_compound("XYZ Marketing Agency").as_deref(), Some("XYZ"));
        assert_eq!(acronym_compound("XYZ Widgets"), None);
        assert_eq!(acronym_compound("UK Law Group"), None);
    }

    #[test]
    fn person_compound_extracts_name() {
        assert_eq!(
            person_compound("Henry Adams Estate Agents").as_deref(),
            Some("Henry Adams")
        );
        assert_eq!(person_compound("Digital Media Group"), None);
        assert_eq!(person_compound("Henry Adams"), None);
    }
}
