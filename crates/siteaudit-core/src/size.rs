use serde::{Deserialize, Serialize};

/// Company-size tier inferred from page content.
///
/// Ordered from smallest to largest so tiers compare naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanySize::Micro => write!(f, "micro"),
            CompanySize::Small => write!(f, "small"),
            CompanySize::Medium => write!(f, "medium"),
            CompanySize::Large => write!(f, "large"),
            CompanySize::Enterprise => write!(f, "enterprise"),
        }
    }
}
