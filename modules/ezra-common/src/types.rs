use serde::{Deserialize, Serialize};

// --- Geo Types ---

/// A latitude/longitude pair. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers. Anything else cannot be plotted.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// GeoJSON coordinate order.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for Position {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.lat, p.lng]
    }
}

// --- Enums ---

/// Research topic tag. Unknown tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Psychology,
    HealthSafety,
    Sustainability,
    Immersive,
    CampusLife,
    FineArts,
    Other(String),
}

const DEFAULT_IMAGE_ID: &str = "1497366216548-37526070297c";

impl Category {
    pub const KNOWN: [Category; 6] = [
        Category::Psychology,
        Category::HealthSafety,
        Category::Sustainability,
        Category::Immersive,
        Category::CampusLife,
        Category::FineArts,
    ];

    /// Exact slug match. No trimming or case folding.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "psychology" => Category::Psychology,
            "health-safety" => Category::HealthSafety,
            "sustainability" => Category::Sustainability,
            "immersive" => Category::Immersive,
            "campus-life" => Category::CampusLife,
            "fine-arts" => Category::FineArts,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Category::Psychology => "psychology",
            Category::HealthSafety => "health-safety",
            Category::Sustainability => "sustainability",
            Category::Immersive => "immersive",
            Category::CampusLife => "campus-life",
            Category::FineArts => "fine-arts",
            Category::Other(raw) => raw,
        }
    }

    /// Human label used by the pitch wizard's category picker.
    pub fn label(&self) -> &str {
        match self {
            Category::Psychology => "Psychology",
            Category::HealthSafety => "Health & Safety",
            Category::Sustainability => "Sustainability",
            Category::Immersive => "Immersive Learning",
            Category::CampusLife => "Campus Life",
            Category::FineArts => "Fine Arts",
            Category::Other(raw) => raw,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|c| c.label() == label)
    }

    /// Title-cased slug, e.g. `campus-life` → `Campus Life`.
    pub fn display_name(&self) -> String {
        self.slug()
            .replace('-', " ")
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn image_id(&self) -> &'static str {
        match self {
            Category::Psychology => "1497366216548-37526070297c",
            Category::HealthSafety => "1519389950473-47ba0277781c",
            Category::Sustainability => "1497366811353-6870744d04b2",
            Category::Immersive => "1522202176988-66273c2fd55f",
            Category::CampusLife => "1523050854058-8df90110c9f1",
            Category::FineArts => "1513694203232-719a280e022f",
            Category::Other(_) => DEFAULT_IMAGE_ID,
        }
    }

    pub fn image_url(&self) -> String {
        format!("https://images.unsplash.com/photo-{}?w=800", self.image_id())
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.slug().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Lifecycle stage label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    PreResearch,
    LiteratureReview,
    Developmental,
    FinalResearch,
    Publication,
    Completed,
    Other(String),
}

impl Phase {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Pre-Research" => Phase::PreResearch,
            "Literature Review" => Phase::LiteratureReview,
            "Developmental" => Phase::Developmental,
            "Final Research" => Phase::FinalResearch,
            "Publication" => Phase::Publication,
            "Completed" => Phase::Completed,
            other => Phase::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Phase::PreResearch => "Pre-Research",
            Phase::LiteratureReview => "Literature Review",
            Phase::Developmental => "Developmental",
            Phase::FinalResearch => "Final Research",
            Phase::Publication => "Publication",
            Phase::Completed => "Completed",
            Phase::Other(raw) => raw,
        }
    }
}

impl From<String> for Phase {
    fn from(raw: String) -> Self {
        Phase::parse(&raw)
    }
}

impl From<Phase> for String {
    fn from(p: Phase) -> Self {
        p.label().to_string()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidentiality {
    #[default]
    Public,
    Confidential,
}

// --- Research Projects ---

/// One row of the project CSV after normalization. Immutable once built;
/// a refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchProject {
    pub id: String,
    pub title: String,
    pub researcher: String,
    pub category: Category,
    pub phase: Phase,
    pub description: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    pub image: String,
    #[serde(default)]
    pub confidentiality: Confidentiality,
}

pub const REDACTED_TITLE: &str = "CONFIDENTIAL";

impl ResearchProject {
    pub fn is_confidential(&self) -> bool {
        self.confidentiality == Confidentiality::Confidential
    }

    /// Title safe to show in places that redact confidential work (marker tooltips).
    pub fn public_title(&self) -> &str {
        if self.is_confidential() {
            REDACTED_TITLE
        } else {
            &self.title
        }
    }
}

// --- Districts ---

/// GeoJSON-style geometry: a type tag plus an arbitrarily nested coordinate tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub geoid: String,
    pub name: String,
    pub district: String,
    pub office: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_rank: Option<String>,
    pub geometry: DistrictGeometry,
}
