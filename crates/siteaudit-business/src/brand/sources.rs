//! Raw brand-name evidence, one function per page surface.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::BusinessCategory;
use crate::html::{
    clean_text, domain_label, extract_attr, extract_h1, extract_hrefs, extract_title,
    find_meta_content, img_tags, json_ld_nodes, json_ld_types, visible_text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandSource {
    JsonLdName,
    JsonLdBrand,
    JsonLdLegalName,
    OgSiteName,
    ApplicationName,
    Copyright,
    Microdata,
    TitleDomainMatch,
    TwitterSite,
    LogoAlt,
    SocialProfile,
    OgTitle,
    TitleSegment,
    MetaAuthor,
    MetaPublisher,
    Heading,
    Domain,
    /// "ACRONYM + descriptor" reduced to the acronym.
    AcronymCompound,
    /// "First Last + descriptor" reduced to the person name.
    PersonCompound,
}

impl BrandSource {
    /// Fixed confidence of a direct source. Derived sources return `None`;
    /// their confidence comes from the candidate they were derived from.
    #[must_use]
    pub fn weight(self) -> Option<f64> {
        let weight = match self {
            BrandSource::JsonLdName => 0.98,
            BrandSource::JsonLdBrand | BrandSource::JsonLdLegalName => 0.97,
            BrandSource::OgSiteName => 0.96,
            BrandSource::ApplicationName => 0.90,
            BrandSource::Copyright | BrandSource::Microdata => 0.85,
            BrandSource::TitleDomainMatch => 0.80,
            BrandSource::TwitterSite | BrandSource::LogoAlt => 0.75,
            BrandSource::SocialProfile | BrandSource::OgTitle => 0.70,
            BrandSource::TitleSegment => 0.65,
            BrandSource::MetaAuthor | BrandSource::MetaPublisher => 0.60,
            BrandSource::Heading => 0.55,
            BrandSource::Domain => 0.40,
            BrandSource::AcronymCompound | BrandSource::PersonCompound => return None,
        };
        Some(weight)
    }
}

const ORGANIZATION_TYPES: &[&str] = &[
    "Organization",
    "Corporation",
    "LocalBusiness",
    "OnlineBusiness",
    "ProfessionalService",
    "NGO",
];

const SOCIAL_HOSTS: &[&str] = &[
    "facebook.com/",
    "instagram.com/",
    "linkedin.com/company/",
    "twitter.com/",
    "x.com/",
    "youtube.com/@",
    "tiktok.com/@",
];

/// Path segments on social hosts that are never a profile handle.
const SOCIAL_NON_HANDLES: &[&str] = &[
    "share", "sharer", "sharer.php", "intent", "home", "login", "pages", "watch", "hashtag", "p",
];

static COPYRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:©|\(c\)|copyright)\s*(?:©\s*)?(?:\d{4}\s*(?:[-–]\s*\d{4}\s*)?)?([^|.©]{2,80}?)\s*(?:[.|]|all rights reserved|$)",
    )
    .expect("valid copyright regex")
});
static MICRODATA_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(<[a-z0-9]+\b[^>]*\bitemprop\s*=\s*["'](?:name|legalName|brand)["'][^>]*>)([^<]*)"#)
        .expect("valid microdata name regex")
});
static TITLE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[|\-–—:·•»]\s+|\s*\|\s*").expect("valid separator regex"));

/// Split a page title on the usual separators.
#[must_use]
pub fn title_segments(title: &str) -> Vec<String> {
    TITLE_SEPARATOR_RE
        .split(title)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_organization_node(node: &Value) -> bool {
    json_ld_types(node).iter().any(|t| {
        ORGANIZATION_TYPES.contains(&t.as_str()) || BusinessCategory::from_schema_type(t).is_some()
    })
}

fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => value.get("name").and_then(Value::as_str).map(str::to_string),
        Value::Array(items) => items.iter().find_map(name_of),
        _ => None,
    }
}

/// `name`, `brand` and `legalName` of organization-like JSON-LD nodes.
#[must_use]
pub fn json_ld(html: &str) -> Vec<(BrandSource, String)> {
    let mut out = Vec::new();
    for node in json_ld_nodes(html).iter().filter(|n| is_organization_node(n)) {
        if let Some(name) = node.get("name").and_then(name_of) {
            out.push((BrandSource::JsonLdName, name));
        }
        if let Some(brand) = node.get("brand").and_then(name_of) {
            out.push((BrandSource::JsonLdBrand, brand));
        }
        if let Some(legal) = node.get("legalName").and_then(name_of) {
            out.push((BrandSource::JsonLdLegalName, legal));
        }
    }
    out
}

#[must_use]
pub fn meta_tags(html: &str) -> Vec<(BrandSource, String)> {
    [
        (BrandSource::OgSiteName, "property", "og:site_name"),
        (BrandSource::ApplicationName, "name", "application-name"),
        (BrandSource::ApplicationName, "name", "apple-mobile-web-app-title"),
        (BrandSource::MetaAuthor, "name", "author"),
        (BrandSource::MetaPublisher, "name", "publisher"),
    ]
    .into_iter()
    .filter_map(|(source, attr, key)| find_meta_content(html, attr, key).map(|v| (source, v)))
    .collect()
}

#[must_use]
pub fn copyright(html: &str) -> Option<(BrandSource, String)> {
    let text = visible_text(html);
    COPYRIGHT_RE
        .captures_iter(&text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .find(|v| v.chars().any(char::is_alphabetic))
        .map(|v| (BrandSource::Copyright, v))
}

#[must_use]
pub fn microdata(html: &str) -> Option<(BrandSource, String)> {
    MICRODATA_NAME_RE.captures_iter(html).find_map(|cap| {
        let tag = cap.get(1).map_or("", |m| m.as_str());
        let value = extract_attr(tag, "content")
            .or_else(|| cap.get(2).map(|m| clean_text(m.as_str())))
            .filter(|v| !v.is_empty())?;
        Some((BrandSource::Microdata, value))
    })
}

fn compact(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Title-derived evidence: the segment matching the domain label, the
/// trailing segment, and the `og:title` lead segment.
#[must_use]
pub fn title(html: &str, domain: &str) -> Vec<(BrandSource, String)> {
    let mut out = Vec::new();
    let segments = title_segments(&extract_title(html));
    let label = compact(&domain_label(domain));

    if !label.is_empty() {
        if let Some(seg) = segments.iter().find(|s| {
            let c = compact(s);
            c.len() >= 3 && (c == label || label.contains(&c) || c.contains(&label))
        }) {
            out.push((BrandSource::TitleDomainMatch, seg.clone()));
        }
    }
    if let Some(last) = segments.last() {
        out.push((BrandSource::TitleSegment, last.clone()));
    }
    if let Some(og) = find_meta_content(html, "property", "og:title") {
        if let Some(first) = title_segments(&og).into_iter().next() {
            out.push((BrandSource::OgTitle, first));
        }
    }
    out
}

#[must_use]
pub fn twitter_site(html: &str) -> Option<(BrandSource, String)> {
    find_meta_content(html, "name", "twitter:site")
        .map(|v| v.trim_start_matches('@').to_string())
        .filter(|v| !v.is_empty())
        .map(|v| (BrandSource::TwitterSite, v))
}

/// `alt` text of images that look like a logo.
#[must_use]
pub fn logo_alt(html: &str) -> Option<(BrandSource, String)> {
    img_tags(html).find_map(|tag| {
        let lower = tag.to_lowercase();
        if !lower.contains("logo") {
            return None;
        }
        let alt = extract_attr(tag, "alt").filter(|a| !a.is_empty())?;
        Some((BrandSource::LogoAlt, alt))
    })
}

/// Profile handles from links to the major social networks.
#[must_use]
pub fn social_profiles(html: &str) -> Vec<(BrandSource, String)> {
    let mut out = Vec::new();
    for href in extract_hrefs(html) {
        let lower = href.to_lowercase();
        let Some(rest) = SOCIAL_HOSTS
            .iter()
            .find_map(|host| lower.split_once(host).map(|(_, rest)| rest.to_string()))
        else {
            continue;
        };
        let raw = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches('@');
        if raw.is_empty() || SOCIAL_NON_HANDLES.contains(&raw) {
            continue;
        }
        let handle = raw.replace(['-', '_', '.'], " ");
        if !out.iter().any(|(_, v): &(BrandSource, String)| *v == handle) {
            out.push((BrandSource::SocialProfile, handle));
        }
    }
    out
}

/// The first `<h1>`, when it is short enough to be a name.
#[must_use]
pub fn heading(html: &str) -> Option<(BrandSource, String)> {
    let h1 = extract_h1(html);
    let words = h1.split_whitespace().count();
    (1..=5)
        .contains(&words)
        .then_some((BrandSource::Heading, h1))
}

/// Domain label with hyphens as spaces; always present for a non-empty domain.
#[must_use]
pub fn domain(domain: &str) -> Option<(BrandSource, String)> {
    let label = domain_label(domain).replace('-', " ");
    (!label.is_empty()).then_some((BrandSource::Domain, label))
}
