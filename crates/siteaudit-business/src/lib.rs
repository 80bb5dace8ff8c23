//! Business classification, brand identification and location context from
//! raw HTML.
//!
//! Everything in this crate is synchronous and total: malformed or empty
//! input degrades to low-confidence defaults instead of erroring.

pub mod brand;
pub mod category;
pub mod classifier;
pub mod html;
pub mod location;
pub mod scoring;
pub mod signals;
pub mod types;

pub use brand::{extract_brand, identify_brand, resolve_brand, BrandCandidate, BrandIdentification, BrandSource};
pub use category::{BusinessCategory, CategoryProfile, Subcategory};
pub use classifier::{combine, detect_business};
pub use location::{build_location_context, mentions_region, LocationContext, RegistryRecord};
pub use types::{
    BusinessDetectionResult, BusinessType, ConfidenceLevel, DetectionMethod, EvidenceCandidate,
};
