//! Locality and service-area context for a site.
//!
//! Page evidence is preferred; a company-registry record only fills in what
//! the page does not say.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::html::{json_ld_nodes, visible_text};

pub const MAX_TARGET_CITIES: usize = 5;

const CITIES: &[&str] = &[
    "London",
    "Birmingham",
    "Manchester",
    "Leeds",
    "Liverpool",
    "Sheffield",
    "Bristol",
    "Newcastle",
    "Nottingham",
    "Leicester",
    "Coventry",
    "Bradford",
    "Southampton",
    "Portsmouth",
    "Brighton",
    "Plymouth",
    "Derby",
    "Stoke-on-Trent",
    "Wolverhampton",
    "Norwich",
    "Exeter",
    "York",
    "Oxford",
    "Cambridge",
    "Bath",
    "Milton Keynes",
    "Northampton",
    "Luton",
    "Swindon",
    "Ipswich",
    "Chester",
    "Canterbury",
    "Edinburgh",
    "Glasgow",
    "Aberdeen",
    "Dundee",
    "Inverness",
    "Cardiff",
    "Swansea",
    "Newport",
    "Belfast",
    "Derry",
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Francisco",
    "Seattle",
    "Boston",
    "Miami",
    "Denver",
    "Austin",
    "Atlanta",
    "Dublin",
    "Sydney",
    "Melbourne",
    "Toronto",
];

const REGIONS: &[&str] = &[
    "England",
    "Scotland",
    "Wales",
    "Northern Ireland",
    "Greater London",
    "Greater Manchester",
    "Yorkshire",
    "West Yorkshire",
    "South Yorkshire",
    "Lancashire",
    "Merseyside",
    "Cheshire",
    "Cumbria",
    "Northumberland",
    "Durham",
    "West Midlands",
    "East Midlands",
    "Midlands",
    "Kent",
    "Surrey",
    "Sussex",
    "Essex",
    "Hampshire",
    "Berkshire",
    "Hertfordshire",
    "Oxfordshire",
    "Buckinghamshire",
    "Norfolk",
    "Suffolk",
    "Devon",
    "Cornwall",
    "Somerset",
    "Dorset",
    "Wiltshire",
    "Gloucestershire",
    "Cotswolds",
    "California",
    "Texas",
    "Florida",
];

static PLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = CITIES
        .iter()
        .chain(REGIONS.iter())
        .map(|n| regex::escape(n))
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", names.join("|"))).expect("valid place regex")
});
static BASED_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[Bb]ased in|[Ll]ocated in|[Hh]eadquartered in)\s+([A-Z][a-zA-Z]+(?:[ -][A-Z][a-zA-Z]+){0,2})")
        .expect("valid based-in regex")
});
static SERVING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[Ss]erving|[Cc]overing)\s+((?:[A-Z][a-zA-Z]+(?:[ -][A-Z][a-zA-Z]+)*)(?:(?:,\s*|\s+and\s+)[A-Z][a-zA-Z]+(?:[ -][A-Z][a-zA-Z]+)*)*)")
        .expect("valid serving regex")
});
static AREA_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*|\s+and\s+").expect("valid area split regex"));

/// Company-registry data used to enrich the location context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRecord {
    pub company_name: String,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub detected_location: Option<String>,
    pub primary_location: Option<String>,
    pub is_local_business: bool,
    pub service_area: Option<Vec<String>>,
    /// At most [`MAX_TARGET_CITIES`], primary location first.
    pub target_cities: Vec<String>,
}

/// Whether `text` names a known city or region (case-insensitive, whole words).
#[must_use]
pub fn mentions_region(text: &str) -> bool {
    PLACE_RE.is_match(text)
}

#[must_use]
pub fn is_known_city(name: &str) -> bool {
    CITIES.iter().any(|c| c.eq_ignore_ascii_case(name))
}

fn is_known_place(name: &str) -> bool {
    is_known_city(name) || REGIONS.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Canonical spelling of a known place.
fn canonical(name: &str) -> String {
    CITIES
        .iter()
        .chain(REGIONS.iter())
        .find(|p| p.eq_ignore_ascii_case(name))
        .map_or_else(|| name.to_string(), |p| (*p).to_string())
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !list.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        list.push(value.to_string());
    }
}

fn place_names(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => push_unique(out, s),
        Value::Object(_) => {
            if let Some(name) = value.get("name").and_then(Value::as_str) {
                push_unique(out, name);
            }
        }
        Value::Array(items) => items.iter().for_each(|v| place_names(v, out)),
        _ => {}
    }
}

#[derive(Debug, Default)]
struct MarkupLocation {
    localities: Vec<String>,
    regions: Vec<String>,
    area_served: Vec<String>,
}

fn markup_location(html: &str) -> MarkupLocation {
    let mut found = MarkupLocation::default();
    for node in json_ld_nodes(html) {
        let addresses = match node.get("address") {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
            None => Vec::new(),
        };
        for address in &addresses {
            if let Some(locality) = address.get("addressLocality").and_then(Value::as_str) {
                push_unique(&mut found.localities, locality);
            }
            if let Some(region) = address.get("addressRegion").and_then(Value::as_str) {
                push_unique(&mut found.regions, region);
            }
        }
        if let Some(area) = node.get("areaServed") {
            place_names(area, &mut found.area_served);
        }
    }
    found
}

/// Known places in `text`, most mentioned first; ties keep gazetteer order.
fn ranked_mentions(text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for m in PLACE_RE.find_iter(text) {
        let name = canonical(m.as_str());
        match counts.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }
    let order = |name: &str| {
        CITIES
            .iter()
            .chain(REGIONS.iter())
            .position(|p| *p == name)
            .unwrap_or(usize::MAX)
    };
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(order(&a.0).cmp(&order(&b.0))));
    counts.into_iter().map(|(name, _)| name).collect()
}

fn serving_areas(text: &str) -> Vec<String> {
    let mut areas = Vec::new();
    for cap in SERVING_RE.captures_iter(text) {
        if let Some(list) = cap.get(1) {
            for part in AREA_SPLIT_RE.split(list.as_str()) {
                if is_known_place(part.trim()) {
                    push_unique(&mut areas, &canonical(part.trim()));
                }
            }
        }
    }
    areas
}

/// Build the location context for a page.
#[must_use]
pub fn build_location_context(
    html: &str,
    local_business: bool,
    registry: Option<&RegistryRecord>,
) -> LocationContext {
    let text = visible_text(html);
    let markup = markup_location(html);
    let based_in = BASED_IN_RE
        .captures(&text)
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()));
    let mentions = ranked_mentions(&text);
    let cities_mentioned: Vec<&String> = mentions.iter().filter(|m| is_known_city(m)).collect();

    let detected_location = markup
        .localities
        .first()
        .cloned()
        .or(based_in)
        .or_else(|| cities_mentioned.first().map(|c| (*c).clone()));

    let registry_location = registry.and_then(|r| r.locality.clone().or_else(|| r.region.clone()));
    let primary_location = detected_location
        .clone()
        .or_else(|| markup.regions.first().cloned())
        .or(registry_location);

    let mut service_area = markup.area_served.clone();
    for area in serving_areas(&text) {
        push_unique(&mut service_area, &area);
    }

    let mut target_cities = Vec::new();
    if let Some(primary) = &primary_location {
        push_unique(&mut target_cities, primary);
    }
    for city in cities_mentioned {
        push_unique(&mut target_cities, city);
    }
    for area in service_area.iter().filter(|a| is_known_city(a)) {
        push_unique(&mut target_cities, area);
    }
    target_cities.truncate(MAX_TARGET_CITIES);

    let context = LocationContext {
        is_local_business: local_business || !markup.localities.is_empty(),
        detected_location,
        primary_location,
        service_area: (!service_area.is_empty()).then_some(service_area),
        target_cities,
    };

    tracing::debug!(
        primary = context.primary_location.as_deref().unwrap_or("none"),
        targets = context.target_cities.len(),
        "location context built"
    );
    context
}
