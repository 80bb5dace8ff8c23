//! Regex-based HTML helpers shared by the extractors.
//!
//! Pages arrive as raw, possibly malformed HTML, so nothing here builds a DOM.
//! Every helper is total: unmatched input yields an empty result.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));
static NON_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript|template|svg)\b[^>]*>.*?</(script|style|noscript|template|svg)\s*>")
        .expect("valid non-content regex")
});
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta regex"));
static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img regex"));
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*href\s*=\s*["']([^"']+)["']"#).expect("valid href regex")
});
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid h1 regex"));
static JSON_LD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid json-ld script regex")
});
static NAV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<nav\b[^>]*>(.*?)</nav>").expect("valid nav regex"));
static MENU_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<ul\b[^>]*(?:class|id)\s*=\s*["'][^"']*(?:menu|nav)[^"']*["'][^>]*>(.*?)</ul>"#)
        .expect("valid menu list regex")
});

/// Strip tags, decode common entities, and collapse whitespace.
#[must_use]
pub fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, " ");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-visible page text: scripts, styles and comments removed.
#[must_use]
pub fn visible_text(html: &str) -> String {
    let no_comments = COMMENT_RE.replace_all(html, " ");
    let no_scripts = NON_CONTENT_RE.replace_all(&no_comments, " ");
    clean_text(&no_scripts)
}

#[must_use]
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    input
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&copy;", "©")
        .replace("&#169;", "©")
        .replace("&ndash;", "–")
        .replace("&#8211;", "–")
        .replace("&mdash;", "—")
        .replace("&#8212;", "—")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&rsquo;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[must_use]
pub fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .unwrap_or_default()
}

#[must_use]
pub fn extract_h1(html: &str) -> String {
    H1_RE
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .unwrap_or_default()
}

/// Find the `content` of the first `<meta>` whose `key_attr` equals `key_value`.
#[must_use]
pub fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
                .map(|v| clean_text(&v))
                .filter(|v| !v.is_empty())
        } else {
            None
        }
    })
}

#[must_use]
pub fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)(?:^|[\s<])\b{}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(attr)
    );
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag).and_then(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// All `<img>` tags in document order.
pub fn img_tags(html: &str) -> impl Iterator<Item = &str> {
    IMG_TAG_RE.find_iter(html).map(|m| m.as_str())
}

/// All anchor `href` values, skipping fragments and non-navigational schemes.
#[must_use]
pub fn extract_hrefs(html: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| decode_entities(m.as_str().trim())))
        .filter(|href| {
            !href.is_empty()
                && !href.starts_with('#')
                && !href.starts_with("mailto:")
                && !href.starts_with("tel:")
                && !href.starts_with("javascript:")
        })
        .collect()
}

/// Text inside `<nav>` blocks and menu-like `<ul>` lists.
#[must_use]
pub fn navigation_text(html: &str) -> String {
    let mut parts: Vec<String> = NAV_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .collect();
    parts.extend(
        MENU_LIST_RE
            .captures_iter(html)
            .filter_map(|cap| cap.get(1).map(|m| clean_text(m.as_str()))),
    );
    parts.join(" ")
}

/// Parse every JSON-LD script block into its top-level nodes.
///
/// Arrays are flattened and `@graph` containers expanded. Blocks that fail to
/// parse are skipped.
#[must_use]
pub fn json_ld_nodes(html: &str) -> Vec<Value> {
    let mut nodes = Vec::new();

    for cap in JSON_LD_RE.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        if raw.is_empty() {
            continue;
        }
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        let top_level = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        for item in top_level {
            if let Some(graph) = item.get("@graph").and_then(Value::as_array) {
                nodes.extend(graph.iter().cloned());
            }
            nodes.push(item);
        }
    }

    nodes
}

/// The `@type` of a JSON-LD node as a list, whether it was a string or an array.
#[must_use]
pub fn json_ld_types(node: &Value) -> Vec<String> {
    match node.get("@type") {
        Some(Value::String(s)) => vec![strip_schema_prefix(s).to_string()],
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(|s| strip_schema_prefix(s).to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// `https://schema.org/Restaurant` → `Restaurant`.
#[must_use]
pub fn strip_schema_prefix(value: &str) -> &str {
    value
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(value)
}

/// Lowercase host with scheme, path, port and a leading `www.` removed.
#[must_use]
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Second-level compound suffixes where the registrable label sits one level deeper.
const COMPOUND_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ltd.uk", "plc.uk", "me.uk", "net.uk", "ac.uk", "gov.uk", "com.au",
    "net.au", "org.au", "co.nz", "co.za", "com.br", "co.in", "co.jp",
];

/// The bare brand label of a domain: `www.smith-solicitors.co.uk` → `smith-solicitors`.
#[must_use]
pub fn domain_label(domain: &str) -> String {
    let host = normalize_domain(domain);
    let parts: Vec<&str> = host.split('.').filter(|p| !p.is_empty()).collect();
    match parts.len() {
        0 => String::new(),
        1 => parts[0].to_string(),
        n => {
            let last_two = format!("{}.{}", parts[n - 2], parts[n - 1]);
            if n >= 3 && COMPOUND_SUFFIXES.contains(&last_two.as_str()) {
                parts[n - 3].to_string()
            } else {
                parts[n - 2].to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_tags_and_normalizes_space() {
        assert_eq!(clean_text("<b>Hello</b>\n\nworld"), "Hello world");
    }

    #[test]
    fn visible_text_drops_scripts_and_styles() {
        let html = "<style>.a{}</style><p>Visible</p><script>var x = 'hidden';</script>";
        assert_eq!(visible_text(html), "Visible");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(clean_text("Fish &amp; Chips &copy; 2024"), "Fish & Chips © 2024");
    }

    #[test]
    fn meta_content_matches_either_attribute_order() {
        let html = r#"<meta content="Acme Co" property="og:site_name"><meta name="author" content='Jane'>"#;
        assert_eq!(
            find_meta_content(html, "property", "og:site_name").as_deref(),
            Some("Acme Co")
        );
        assert_eq!(find_meta_content(html, "name", "author").as_deref(), Some("Jane"));
        assert!(find_meta_content(html, "name", "publisher").is_none());
    }

    #[test]
    fn extract_attr_does_not_match_attribute_suffixes() {
        let tag = r#"<meta data-name="wrong" name="right">"#;
        assert_eq!(extract_attr(tag, "name").as_deref(), Some("right"));
    }

    #[test]
    fn hrefs_skip_fragments_and_mail_links() {
        let html = r##"<a href="/about">a</a><a href="#top">b</a><a href="mailto:x@y.z">c</a>"##;
        assert_eq!(extract_hrefs(html), vec!["/about".to_string()]);
    }

    #[test]
    fn json_ld_nodes_expand_graph_and_skip_malformed_blocks() {
        let html = r#"
            <script type="application/ld+json">{ not json }</script>
            <script type="application/ld+json">
              {"@context":"https://schema.org","@graph":[{"@type":"Organization","name":"Acme"}]}
            </script>
        "#;
        let nodes = json_ld_nodes(html);
        assert!(nodes
            .iter()
            .any(|n| json_ld_types(n) == vec!["Organization".to_string()]));
    }

    #[test]
    fn schema_prefix_is_stripped() {
        assert_eq!(strip_schema_prefix("https://schema.org/Restaurant"), "Restaurant");
        assert_eq!(strip_schema_prefix("Restaurant"), "Restaurant");
    }

    #[test]
    fn normalize_domain_handles_urls() {
        assert_eq!(normalize_domain("https://www.Example.com/path?q=1"), "example.com");
        assert_eq!(normalize_domain("example.com:8080"), "example.com");
    }

    #[test]
    fn domain_label_handles_compound_suffixes() {
        assert_eq!(domain_label("www.smith-solicitors.co.uk"), "smith-solicitors");
        assert_eq!(domain_label("acme.com"), "acme");
        assert_eq!(domain_label("shop.acme.com"), "acme");
        assert_eq!(domain_label("localhost"), "localhost");
    }

    #[test]
    fn navigation_text_reads_nav_and_menu_lists() {
        let html = r#"<nav><a>Probate</a></nav><ul class="main-menu"><li>Conveyancing</li></ul>"#;
        let text = navigation_text(html);
        assert!(text.contains("Probate"));
        assert!(text.contains("Conveyancing"));
    }
}
