//! Data model for the monitoring core.

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use uuid::Uuid;

/// Role of an account: administrator, field health worker, community
/// representative, or a self-registered villager ("people" account).
///
/// The role decides which credential registry a login attempt is checked
/// against, and which views the route guard lets the session open.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Role {
    #[display("Administrator")]
    Admin,
    #[display("Health Worker")]
    HealthWorker,
    #[display("Community")]
    Community,
    #[display("People")]
    People,
}

/// A unique account identifier.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// A unique patient case identifier.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct CaseId(Uuid);

impl CaseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

/// A unique alert subscription identifier.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The public fields of an account. The credential is kept apart, inside
/// the access control store, and is never exposed through this type.
#[derive(Debug, Serialize, Deserialize, Clone, Display)]
#[display("{name} <{email}>")]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub village: Option<String>,
}

/// Water-borne disease categories tracked by the program. Anything outside
/// the usual five is carried through as free text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Disease {
    Cholera,
    Typhoid,
    Dysentery,
    #[display("Hepatitis A")]
    HepatitisA,
    Diarrhea,
    #[display("{_0}")]
    Other(String),
}

impl Disease {
    /// Maps a free-form label onto a known category where possible.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "cholera" => Disease::Cholera,
            "typhoid" => Disease::Typhoid,
            "dysentery" => Disease::Dysentery,
            "hepatitis a" | "hepatitis-a" | "hepatitis" => Disease::HepatitisA,
            "diarrhea" | "diarrhoea" => Disease::Diarrhea,
            _ => Disease::Other(label.trim().to_string()),
        }
    }
}

/// Whether a reported case is still active. New cases always start active;
/// nothing in this core transitions them to recovered.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum CaseStatus {
    Active,
    Recovered,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

/// Risk classification of a village, derived from its case count.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RiskLevel {
    #[display("low")]
    Low,
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

/// Case-count thresholds for the medium and high risk bands.
pub const MEDIUM_RISK_CASES: usize = 10;
pub const HIGH_RISK_CASES: usize = 30;

impl RiskLevel {
    /// Boundary-inclusive: exactly 10 cases is medium, exactly 30 is high.
    pub fn from_case_count(count: usize) -> Self {
        if count >= HIGH_RISK_CASES {
            RiskLevel::High
        } else if count >= MEDIUM_RISK_CASES {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// A geographic point, decimal degrees.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A reported illness instance. Append-only: once recorded, a case is never
/// mutated or deleted by this core.
#[derive(Debug, Serialize, Deserialize, Clone, Display)]
#[display("{name} ({village}, {disease})")]
pub struct PatientCase {
    pub id: CaseId,
    pub name: String,
    pub age: i32,
    pub village: String,
    pub disease: Disease,
    pub status: CaseStatus,
    pub severity: Severity,
    pub date: NaiveDate,
    pub location: Option<GeoPoint>,
}

/// Caller-supplied fields of a case. Id, report date and status are stamped
/// by the store at insertion time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewCase {
    pub name: String,
    pub age: i32,
    pub village: String,
    pub disease: Disease,
    pub severity: Severity,
    pub location: Option<GeoPoint>,
}

/// A community member's request to be notified about a village. No delivery
/// mechanism exists; the ledger is the whole feature.
#[derive(Debug, Serialize, Deserialize, Clone, Display)]
#[display("{name} - {village}")]
pub struct AlertSubscription {
    pub id: SubscriptionId,
    pub name: String,
    pub phone: String,
    pub village: String,
    pub subscribed_at: DateTime<Utc>,
}

/// Caller-supplied fields of a subscription.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub phone: String,
    pub village: String,
}

/// Per-village aggregate, derived fresh from the case ledger on every read.
#[derive(Debug, Serialize, Deserialize, Clone, Display)]
#[display("{name}: {cases} cases ({risk})")]
pub struct VillageSummary {
    pub name: String,
    pub risk: RiskLevel,
    pub cases: usize,
    pub location: GeoPoint,
}
