//! Path fragments of same-domain links.

use ::url::Url;

use crate::category::BusinessCategory;
use crate::html::{extract_hrefs, normalize_domain};
use crate::scoring::{url_confidence, URL_FRAGMENT_WEIGHT};
use crate::types::{DetectionMethod, EvidenceCandidate};

use super::{rank_scores, Page};

/// Lowercase paths of every link that resolves to the page's own domain.
#[must_use]
pub fn same_domain_paths(html: &str, domain: &str) -> Vec<String> {
    let Ok(base) = Url::parse(&format!("https://{domain}/")) else {
        return Vec::new();
    };

    extract_hrefs(html)
        .into_iter()
        .filter_map(|href| base.join(&href).ok())
        .filter(|link| {
            link.host_str()
                .is_some_and(|host| normalize_domain(host) == domain)
        })
        .map(|link| link.path().to_lowercase())
        .collect()
}

#[must_use]
pub fn extract(page: &Page<'_>) -> Option<EvidenceCandidate> {
    if page.domain.is_empty() {
        return None;
    }
    let paths = same_domain_paths(page.html, &page.domain);
    if paths.is_empty() {
        return None;
    }

    let scores = BusinessCategory::ALL
        .into_iter()
        .map(|category| {
            let matches = category
                .profile()
                .url_fragments
                .iter()
                .map(|fragment| paths.iter().filter(|p| p.contains(fragment)).count())
                .sum::<usize>();
            let matches = u32::try_from(matches).unwrap_or(u32::MAX);
            (category, matches.saturating_mul(URL_FRAGMENT_WEIGHT))
        })
        .collect();

    let (category, score) = *rank_scores(scores).first()?;
    Some(EvidenceCandidate {
        category,
        confidence: url_confidence(score),
        method: DetectionMethod::Url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_same_domain_links_count() {
        let html = r#"
            <a href="/conveyancing">Conveyancing</a>
            <a href="https://www.smithlaw.co.uk/probate/">Probate</a>
            <a href="https://other.example/family-law">Elsewhere</a>
        "#;
        let paths = same_domain_paths(html, "smithlaw.co.uk");
        assert_eq!(paths, vec!["/conveyancing".to_string(), "/probate/".to_string()]);
    }

    #[test]
    fn url_score_is_five_per_match() {
        let html = r#"<a href="/conveyancing">a</a><a href="/probate">b</a>"#;
        let page = Page::new(html, "smithlaw.co.uk");
        let candidate = extract(&page).unwrap();
        assert_eq!(candidate.category, BusinessCategory::LegalServices);
        assert!((candidate.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn single_link_gives_half_confidence() {
        let html = r#"<a href="/menu">Menu</a>"#;
        let page = Page::new(html, "bistro.example");
        let candidate = extract(&page).unwrap();
        assert_eq!(candidate.category, BusinessCategory::FoodHospitality);
        assert!((candidate.confidence - 0.5).abs() < 1e-9);
    }
}
