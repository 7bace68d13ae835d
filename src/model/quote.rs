use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status every freshly stored quote starts with.
pub const STATUS_PENDING: &str = "pending";

/// A code that is not part of a known enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} code: '{code}'")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Townhouse,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Townhouse,
        PropertyType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Commercial => "commercial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Commercial => "Commercial Property",
        }
    }
}

impl FromStr for PropertyType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownCode { kind: "property type", code: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    Tile,
    Metal,
    Flat,
    Slate,
    Other,
}

impl RoofType {
    pub const ALL: [RoofType; 5] = [
        RoofType::Tile,
        RoofType::Metal,
        RoofType::Flat,
        RoofType::Slate,
        RoofType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoofType::Tile => "tile",
            RoofType::Metal => "metal",
            RoofType::Flat => "flat",
            RoofType::Slate => "slate",
            RoofType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoofType::Tile => "Tile Roof",
            RoofType::Metal => "Metal Roof",
            RoofType::Flat => "Flat Roof",
            RoofType::Slate => "Slate Roof",
            RoofType::Other => "Other",
        }
    }
}

impl FromStr for RoofType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoofType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownCode { kind: "roof type", code: s.to_string() })
    }
}

/// When the customer wants the installation done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "12_months")]
    TwelveMonths,
}

impl Timeline {
    pub const ALL: [Timeline; 4] = [
        Timeline::Immediate,
        Timeline::ThreeMonths,
        Timeline::SixMonths,
        Timeline::TwelveMonths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Immediate => "immediate",
            Timeline::ThreeMonths => "3_months",
            Timeline::SixMonths => "6_months",
            Timeline::TwelveMonths => "12_months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Immediate => "As soon as possible",
            Timeline::ThreeMonths => "Within 3 months",
            Timeline::SixMonths => "Within 6 months",
            Timeline::TwelveMonths => "Within 12 months",
        }
    }
}

impl FromStr for Timeline {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeline::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownCode { kind: "timeline", code: s.to_string() })
    }
}

macro_rules! display_as_code {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_code!(PropertyType, RoofType, Timeline);

/// Partially filled quote, built up one wizard step at a time.
///
/// Enum fields hold the raw codes as entered; they are only parsed once
/// the owning step has been validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub property_type: Option<String>,
    pub roof_type: Option<String>,
    pub energy_bill: Option<f64>,
    pub timeline: Option<String>,
    pub additional_info: Option<String>,
}

/// A quote whose every required field passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuote {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub property_type: PropertyType,
    pub roof_type: RoofType,
    pub energy_bill: f64,
    pub timeline: Timeline,
    pub additional_info: Option<String>,
}

/// A quote as persisted by the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuote {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub quote: CompleteQuote,
    pub created_at: String,
    pub status: String,
}

impl StoredQuote {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }
}
