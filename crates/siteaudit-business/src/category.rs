//! Closed set of business categories and their reference tables.
//!
//! Each category carries every table the extractors and the keyword generator
//! need, so adding a category is a compile-checked change in one place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    LegalServices,
    FoodHospitality,
    Healthcare,
    RealEstate,
    HomeServices,
    Automotive,
    Retail,
    Technology,
    Marketing,
    Finance,
    Education,
    BeautyWellness,
    Construction,
    BusinessServices,
}

/// A refinement of a category, selected by a keyword match over page content.
#[derive(Debug)]
pub struct Subcategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

#[derive(Debug)]
pub struct CategoryProfile {
    pub name: &'static str,
    /// Generic industry keywords (weight 2 in content scoring).
    pub keywords: &'static [&'static str],
    /// Region-specific (UK) industry terms (weight 3 in content scoring).
    pub region_terms: &'static [&'static str],
    /// Path fragments of same-domain links that indicate the category.
    pub url_fragments: &'static [&'static str],
    /// schema.org `@type` values that identify the category outright.
    pub schema_types: &'static [&'static str],
    /// First entry is the default when no refinement keyword matches.
    pub subcategories: &'static [Subcategory],
    /// Core service phrases used by keyword pattern expansion.
    pub service_phrases: &'static [&'static str],
    /// Modifier words crossed with `service_phrases`.
    pub modifiers: &'static [&'static str],
    /// Whether searchers commonly need this category urgently.
    pub urgent_demand: bool,
}

impl BusinessCategory {
    pub const ALL: [BusinessCategory; 14] = [
        BusinessCategory::LegalServices,
        BusinessCategory::FoodHospitality,
        BusinessCategory::Healthcare,
        BusinessCategory::RealEstate,
        BusinessCategory::HomeServices,
        BusinessCategory::Automotive,
        BusinessCategory::Retail,
        BusinessCategory::Technology,
        BusinessCategory::Marketing,
        BusinessCategory::Finance,
        BusinessCategory::Education,
        BusinessCategory::BeautyWellness,
        BusinessCategory::Construction,
        BusinessCategory::BusinessServices,
    ];

    /// Category used when no extractor produces evidence.
    pub const FALLBACK: BusinessCategory = BusinessCategory::BusinessServices;

    #[must_use]
    pub fn name(self) -> &'static str {
        self.profile().name
    }

    /// All matchable keywords: generic first, then region-specific.
    pub fn all_keywords(self) -> impl Iterator<Item = &'static str> {
        let profile = self.profile();
        profile
            .keywords
            .iter()
            .chain(profile.region_terms.iter())
            .copied()
    }

    /// Look up the category whose schema table lists `schema_type` exactly.
    #[must_use]
    pub fn from_schema_type(schema_type: &str) -> Option<BusinessCategory> {
        Self::ALL
            .into_iter()
            .find(|category| category.profile().schema_types.contains(&schema_type))
    }

    #[must_use]
    #[allow(clippy::too_many_lines)] // reference data table
    pub fn profile(self) -> &'static CategoryProfile {
        match self {
            BusinessCategory::LegalServices => &LEGAL,
            BusinessCategory::FoodHospitality => &FOOD,
            BusinessCategory::Healthcare => &HEALTHCARE,
            BusinessCategory::RealEstate => &REAL_ESTATE,
            BusinessCategory::HomeServices => &HOME_SERVICES,
            BusinessCategory::Automotive => &AUTOMOTIVE,
            BusinessCategory::Retail => &RETAIL,
            BusinessCategory::Technology => &TECHNOLOGY,
            BusinessCategory::Marketing => &MARKETING,
            BusinessCategory::Finance => &FINANCE,
            BusinessCategory::Education => &EDUCATION,
            BusinessCategory::BeautyWellness => &BEAUTY,
            BusinessCategory::Construction => &CONSTRUCTION,
            BusinessCategory::BusinessServices => &BUSINESS_SERVICES,
        }
    }
}

impl std::fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static LEGAL: CategoryProfile = CategoryProfile {
    name: "Legal Services",
    keywords: &[
        "lawyer",
        "lawyers",
        "attorney",
        "law firm",
        "legal advice",
        "legal services",
        "litigation",
        "family law",
        "personal injury",
        "employment law",
        "will writing",
        "divorce",
    ],
    region_terms: &[
        "solicitor",
        "solicitors",
        "conveyancing",
        "probate",
        "barrister",
        "barristers",
        "legal aid",
        "lasting power of attorney",
    ],
    url_fragments: &[
        "/conveyancing",
        "/probate",
        "/family-law",
        "/solicitors",
        "/legal-services",
        "/personal-injury",
        "/wills",
        "/employment-law",
    ],
    schema_types: &["LegalService", "Attorney", "Notary"],
    subcategories: &[
        Subcategory { name: "General Practice", keywords: &[] },
        Subcategory { name: "Conveyancing", keywords: &["conveyancing", "property law", "remortgage"] },
        Subcategory { name: "Family Law", keywords: &["family law", "divorce", "child custody"] },
        Subcategory { name: "Wills & Probate", keywords: &["probate", "will writing", "estate administration"] },
        Subcategory { name: "Personal Injury", keywords: &["personal injury", "accident claim", "compensation claim"] },
        Subcategory { name: "Employment Law", keywords: &["employment law", "unfair dismissal", "employment tribunal"] },
    ],
    service_phrases: &["solicitors", "conveyancing solicitor", "family law solicitor", "probate solicitor", "legal advice"],
    modifiers: &["best", "local", "affordable", "experienced", "specialist"],
    urgent_demand: false,
};

static FOOD: CategoryProfile = CategoryProfile {
    name: "Food & Hospitality",
    keywords: &[
        "restaurant",
        "menu",
        "dining",
        "cuisine",
        "chef",
        "bistro",
        "cafe",
        "catering",
        "bar",
        "brunch",
        "book a table",
        "food delivery",
    ],
    region_terms: &["takeaway", "fish and chips", "carvery", "gastropub", "sunday roast", "afternoon tea"],
    url_fragments: &["/menu", "/reservations", "/book-a-table", "/order-online", "/catering", "/takeaway"],
    schema_types: &[
        "Restaurant",
        "FoodEstablishment",
        "CafeOrCoffeeShop",
        "BarOrPub",
        "Bakery",
        "FastFoodRestaurant",
        "Brewery",
        "Winery",
    ],
    subcategories: &[
        Subcategory { name: "Restaurant", keywords: &[] },
        Subcategory { name: "Cafe", keywords: &["cafe", "coffee", "afternoon tea"] },
        Subcategory { name: "Pub & Bar", keywords: &["pub", "gastropub", "cocktail", "real ale"] },
        Subcategory { name: "Takeaway", keywords: &["takeaway", "delivery", "fish and chips"] },
        Subcategory { name: "Catering", keywords: &["catering", "event catering", "wedding catering"] },
    ],
    service_phrases: &["restaurant", "restaurants", "takeaway", "catering service", "places to eat"],
    modifiers: &["best", "local", "family friendly", "cheap", "top rated"],
    urgent_demand: false,
};

static HEALTHCARE: CategoryProfile = CategoryProfile {
    name: "Healthcare",
    keywords: &[
        "clinic",
        "doctor",
        "patients",
        "treatment",
        "dentist",
        "dental",
        "physiotherapy",
        "medical",
        "healthcare",
        "therapy",
        "appointment",
        "optician",
    ],
    region_terms: &["nhs", "gp surgery", "private gp", "chemist", "care quality commission"],
    url_fragments: &["/treatments", "/appointments", "/our-doctors", "/dental", "/physiotherapy", "/patients"],
    schema_types: &["MedicalClinic", "Dentist", "Physician", "Hospital", "MedicalBusiness", "Optician", "Pharmacy"],
    subcategories: &[
        Subcategory { name: "General Practice", keywords: &[] },
        Subcategory { name: "Dental", keywords: &["dentist", "dental", "orthodontic", "teeth whitening"] },
        Subcategory { name: "Physiotherapy", keywords: &["physiotherapy", "physio", "sports injury"] },
        Subcategory { name: "Optometry", keywords: &["optician", "eye test", "glasses"] },
        Subcategory { name: "Mental Health", keywords: &["counselling", "therapist", "mental health"] },
    ],
    service_phrases: &["private clinic", "dentist", "physiotherapy clinic", "private gp", "medical clinic"],
    modifiers: &["best", "local", "private", "affordable", "nhs"],
    urgent_demand: true,
};

static REAL_ESTATE: CategoryProfile = CategoryProfile {
    name: "Real Estate",
    keywords: &[
        "property",
        "properties",
        "real estate",
        "homes for sale",
        "for sale",
        "to let",
        "rent",
        "valuation",
        "mortgage",
        "landlord",
        "tenants",
    ],
    region_terms: &[
        "estate agent",
        "estate agents",
        "letting agent",
        "letting agents",
        "lettings",
        "freehold",
        "leasehold",
        "stamp duty",
    ],
    url_fragments: &["/properties", "/property-for-sale", "/lettings", "/to-let", "/valuation", "/landlords", "/sales"],
    schema_types: &["RealEstateAgent"],
    subcategories: &[
        Subcategory { name: "Residential Sales", keywords: &[] },
        Subcategory { name: "Lettings", keywords: &["lettings", "letting agent", "to let", "landlord"] },
        Subcategory { name: "Commercial Property", keywords: &["commercial property", "office space", "retail units"] },
        Subcategory { name: "Property Management", keywords: &["property management", "block management"] },
    ],
    service_phrases: &["estate agents", "letting agents", "property valuation", "houses for sale"],
    modifiers: &["best", "local", "independent", "online", "award winning"],
    urgent_demand: false,
};

static HOME_SERVICES: CategoryProfile = CategoryProfile {
    name: "Home Services",
    keywords: &[
        "plumber",
        "plumbing",
        "electrician",
        "electrical",
        "heating",
        "cleaning",
        "locksmith",
        "pest control",
        "handyman",
        "gardening",
        "installation",
        "repairs",
    ],
    region_terms: &["boiler", "combi boiler", "gas safe", "niceic", "central heating", "drainage"],
    url_fragments: &["/plumbing", "/heating", "/boiler", "/electrical", "/cleaning", "/emergency", "/repairs"],
    schema_types: &["Plumber", "Electrician", "HVACBusiness", "Locksmith", "HousePainter", "HomeAndConstructionBusiness"],
    subcategories: &[
        Subcategory { name: "General Maintenance", keywords: &[] },
        Subcategory { name: "Plumbing & Heating", keywords: &["plumber", "plumbing", "boiler", "heating"] },
        Subcategory { name: "Electrical", keywords: &["electrician", "electrical", "rewiring"] },
        Subcategory { name: "Cleaning", keywords: &["cleaning", "cleaner", "carpet cleaning"] },
        Subcategory { name: "Locksmith", keywords: &["locksmith", "lock change"] },
    ],
    service_phrases: &["plumber", "boiler repair", "electrician", "cleaning service", "locksmith"],
    modifiers: &["local", "emergency", "cheap", "reliable", "24 hour"],
    urgent_demand: true,
};

static AUTOMOTIVE: CategoryProfile = CategoryProfile {
    name: "Automotive",
    keywords: &[
        "car",
        "cars",
        "vehicle",
        "vehicles",
        "servicing",
        "dealership",
        "used cars",
        "car repair",
        "bodywork",
        "brakes",
        "test drive",
    ],
    region_terms: &["mot", "mot test", "tyres", "valeting", "car garage", "motorbikes"],
    url_fragments: &["/used-cars", "/servicing", "/mot", "/tyres", "/vehicles", "/car-repair"],
    schema_types: &["AutoDealer", "AutoRepair", "AutomotiveBusiness", "AutoBodyShop", "AutoPartsStore"],
    subcategories: &[
        Subcategory { name: "Garage & Repairs", keywords: &[] },
        Subcategory { name: "Car Dealership", keywords: &["dealership", "used cars", "new cars", "finance offers"] },
        Subcategory { name: "Tyres", keywords: &["tyres", "tyre fitting", "wheel alignment"] },
        Subcategory { name: "Valeting", keywords: &["valeting", "car wash", "detailing"] },
    ],
    service_phrases: &["car garage", "mot test", "car servicing", "used cars", "car repair"],
    modifiers: &["local", "cheap", "same day", "trusted", "best"],
    urgent_demand: true,
};

static RETAIL: CategoryProfile = CategoryProfile {
    name: "Retail & E-commerce",
    keywords: &[
        "shop",
        "store",
        "buy online",
        "add to cart",
        "basket",
        "checkout",
        "free delivery",
        "free shipping",
        "products",
        "sale",
        "collection",
        "new arrivals",
    ],
    region_terms: &["click and collect", "high street", "free uk delivery", "royal mail"],
    url_fragments: &["/shop", "/products", "/collections", "/cart", "/basket", "/checkout", "/store"],
    schema_types: &["Store", "OnlineStore", "ClothingStore", "ShoeStore", "JewelryStore", "ElectronicsStore", "Product"],
    subcategories: &[
        Subcategory { name: "General Retail", keywords: &[] },
        Subcategory { name: "Fashion", keywords: &["clothing", "fashion", "dresses", "menswear", "womenswear"] },
        Subcategory { name: "Home & Garden", keywords: &["furniture", "homeware", "garden"] },
        Subcategory { name: "Electronics", keywords: &["electronics", "laptops", "phones", "gadgets"] },
        Subcategory { name: "Health & Beauty Products", keywords: &["skincare", "cosmetics", "supplements"] },
    ],
    service_phrases: &["online shop", "buy online", "gift shop", "online store"],
    modifiers: &["best", "cheap", "discount", "independent", "online"],
    urgent_demand: false,
};

static TECHNOLOGY: CategoryProfile = CategoryProfile {
    name: "Technology",
    keywords: &[
        "software",
        "saas",
        "platform",
        "cloud",
        "app",
        "api",
        "it support",
        "cyber security",
        "development",
        "integration",
        "automation",
        "data",
    ],
    region_terms: &["managed it services", "g-cloud", "cyber essentials"],
    url_fragments: &["/pricing", "/features", "/integrations", "/docs", "/api", "/it-support", "/solutions"],
    schema_types: &["SoftwareApplication", "WebApplication", "MobileApplication", "ComputerStore"],
    subcategories: &[
        Subcategory { name: "Software", keywords: &[] },
        Subcategory { name: "IT Support", keywords: &["it support", "managed it", "helpdesk"] },
        Subcategory { name: "Cyber Security", keywords: &["cyber security", "penetration testing", "cyber essentials"] },
        Subcategory { name: "Web Development", keywords: &["web development", "app development", "bespoke software"] },
    ],
    service_phrases: &["it support", "software development", "cloud services", "cyber security services"],
    modifiers: &["best", "affordable", "managed", "enterprise", "small business"],
    urgent_demand: false,
};

static MARKETING: CategoryProfile = CategoryProfile {
    name: "Marketing & Advertising",
    keywords: &[
        "marketing",
        "digital marketing",
        "seo",
        "ppc",
        "social media",
        "branding",
        "advertising",
        "web design",
        "content marketing",
        "campaigns",
        "agency",
    ],
    region_terms: &["marketing agency uk", "chartered institute of marketing"],
    url_fragments: &["/seo", "/ppc", "/social-media", "/web-design", "/branding", "/case-studies", "/digital-marketing"],
    schema_types: &["AdvertisingAgency", "MarketingAgency"],
    subcategories: &[
        Subcategory { name: "Digital Marketing", keywords: &[] },
        Subcategory { name: "SEO", keywords: &["seo", "search engine optimisation", "search engine optimization"] },
        Subcategory { name: "Web Design", keywords: &["web design", "website design", "web development"] },
        Subcategory { name: "Social Media", keywords: &["social media", "instagram marketing", "influencer"] },
        Subcategory { name: "Branding", keywords: &["branding", "brand identity", "logo design"] },
    ],
    service_phrases: &["marketing agency", "seo agency", "web design agency", "ppc management"],
    modifiers: &["best", "local", "affordable", "b2b", "award winning"],
    urgent_demand: false,
};

static FINANCE: CategoryProfile = CategoryProfile {
    name: "Financial Services",
    keywords: &[
        "accountant",
        "accountants",
        "accounting",
        "bookkeeping",
        "tax",
        "payroll",
        "financial advice",
        "financial adviser",
        "insurance",
        "investment",
        "pensions",
        "loans",
    ],
    region_terms: &["hmrc", "self assessment", "chartered accountants", "fca regulated", "isa", "vat returns"],
    url_fragments: &["/accounting", "/tax", "/bookkeeping", "/payroll", "/financial-planning", "/insurance"],
    schema_types: &["AccountingService", "FinancialService", "InsuranceAgency", "BankOrCreditUnion"],
    subcategories: &[
        Subcategory { name: "Accounting", keywords: &[] },
        Subcategory { name: "Tax Advice", keywords: &["tax return", "self assessment", "tax advice"] },
        Subcategory { name: "Financial Planning", keywords: &["financial adviser", "pensions", "investment"] },
        Subcategory { name: "Insurance", keywords: &["insurance", "cover", "policy"] },
    ],
    service_phrases: &["accountants", "bookkeeping services", "tax advisor", "financial adviser"],
    modifiers: &["best", "local", "small business", "chartered", "online"],
    urgent_demand: false,
};

static EDUCATION: CategoryProfile = CategoryProfile {
    name: "Education & Training",
    keywords: &[
        "school",
        "courses",
        "training",
        "tuition",
        "tutor",
        "tutoring",
        "students",
        "learning",
        "lessons",
        "academy",
        "qualification",
    ],
    region_terms: &["gcse", "a-level", "ofsted", "sixth form", "11 plus", "key stage"],
    url_fragments: &["/courses", "/admissions", "/tuition", "/training", "/lessons", "/enrol"],
    schema_types: &["EducationalOrganization", "School", "CollegeOrUniversity", "Preschool", "Course"],
    subcategories: &[
        Subcategory { name: "Training Provider", keywords: &[] },
        Subcategory { name: "Tutoring", keywords: &["tutor", "tutoring", "tuition"] },
        Subcategory { name: "School", keywords: &["school", "pupils", "ofsted"] },
        Subcategory { name: "Driving School", keywords: &["driving lessons", "driving instructor"] },
    ],
    service_phrases: &["tutoring", "training courses", "private tutor", "online courses"],
    modifiers: &["best", "local", "online", "accredited", "affordable"],
    urgent_demand: false,
};

static BEAUTY: CategoryProfile = CategoryProfile {
    name: "Beauty & Wellness",
    keywords: &[
        "beauty",
        "salon",
        "spa",
        "massage",
        "facial",
        "nails",
        "hair",
        "haircut",
        "skincare",
        "wellness",
        "treatments",
        "yoga",
    ],
    region_terms: &["hairdresser", "hairdressers", "barbers", "nail bar", "beauty salon"],
    url_fragments: &["/treatments", "/book-now", "/price-list", "/hair", "/beauty", "/spa"],
    schema_types: &["BeautySalon", "HairSalon", "DaySpa", "NailSalon", "HealthClub", "HealthAndBeautyBusiness"],
    subcategories: &[
        Subcategory { name: "Beauty Salon", keywords: &[] },
        Subcategory { name: "Hair Salon", keywords: &["hair", "hairdresser", "barbers", "haircut"] },
        Subcategory { name: "Spa", keywords: &["spa", "massage", "wellness"] },
        Subcategory { name: "Nail Salon", keywords: &["nails", "nail bar", "manicure"] },
    ],
    service_phrases: &["beauty salon", "hair salon", "massage", "nail salon"],
    modifiers: &["best", "local", "luxury", "cheap", "top rated"],
    urgent_demand: false,
};

static CONSTRUCTION: CategoryProfile = CategoryProfile {
    name: "Construction & Trades",
    keywords: &[
        "construction",
        "builders",
        "building",
        "renovation",
        "roofing",
        "roofer",
        "kitchen fitting",
        "bathroom fitting",
        "contractor",
        "carpentry",
        "joinery",
    ],
    region_terms: &["builder", "loft conversion", "house extensions", "groundworks", "scaffolding", "planning permission"],
    url_fragments: &["/extensions", "/loft-conversions", "/roofing", "/renovations", "/projects", "/building-services"],
    schema_types: &["GeneralContractor", "RoofingContractor", "HomeAndConstructionBusiness"],
    subcategories: &[
        Subcategory { name: "General Building", keywords: &[] },
        Subcategory { name: "Roofing", keywords: &["roofing", "roofer", "flat roof"] },
        Subcategory { name: "Extensions & Conversions", keywords: &["loft conversion", "house extensions", "extension"] },
        Subcategory { name: "Kitchens & Bathrooms", keywords: &["kitchen fitting", "bathroom fitting", "kitchens"] },
    ],
    service_phrases: &["builders", "loft conversion", "house extension", "roofer"],
    modifiers: &["local", "reliable", "trusted", "affordable", "best"],
    urgent_demand: true,
};

static BUSINESS_SERVICES: CategoryProfile = CategoryProfile {
    name: "Business Services",
    keywords: &[
        "consultancy",
        "consulting",
        "outsourcing",
        "b2b",
        "recruitment",
        "business solutions",
        "professional services",
        "training",
        "office",
    ],
    region_terms: &["limited company", "companies house"],
    url_fragments: &["/services", "/consultancy", "/recruitment", "/clients"],
    schema_types: &["ProfessionalService", "EmploymentAgency"],
    subcategories: &[
        Subcategory { name: "General", keywords: &[] },
        Subcategory { name: "Consulting", keywords: &["consultancy", "consulting", "advisory"] },
        Subcategory { name: "Recruitment", keywords: &["recruitment", "staffing", "vacancies"] },
    ],
    service_phrases: &["business consultancy", "business services", "recruitment agency"],
    modifiers: &["best", "local", "professional", "small business", "trusted"],
    urgent_demand: false,
};
