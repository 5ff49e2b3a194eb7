//! Seed data: the known village list and a handful of demo case records.

use chrono::NaiveDate;

use crate::models::{CaseId, CaseStatus, Disease, GeoPoint, NewCase, PatientCase, Severity};

/// A village known to the program before any case is reported for it.
#[derive(Debug, Clone, Copy)]
pub struct SeedVillage {
    pub name: &'static str,
    pub location: GeoPoint,
}

/// Villages monitored by the regional program, with representative
/// coordinates. A village absent from this list still shows up in the
/// aggregates once a case names it.
pub const VILLAGES: &[SeedVillage] = &[
    SeedVillage { name: "Mawsynram", location: GeoPoint { lat: 25.2972, lng: 91.5822 } },
    SeedVillage { name: "Cherrapunji", location: GeoPoint { lat: 25.2700, lng: 91.7319 } },
    SeedVillage { name: "Tura", location: GeoPoint { lat: 25.5147, lng: 90.2102 } },
    SeedVillage { name: "Shillong", location: GeoPoint { lat: 25.5788, lng: 91.8933 } },
    SeedVillage { name: "Dimapur", location: GeoPoint { lat: 25.9042, lng: 93.7270 } },
    SeedVillage { name: "Jorhat", location: GeoPoint { lat: 26.7509, lng: 94.2037 } },
    SeedVillage { name: "Tezpur", location: GeoPoint { lat: 26.6338, lng: 92.7930 } },
    SeedVillage { name: "Silchar", location: GeoPoint { lat: 24.8333, lng: 92.7789 } },
];

/// Coordinates used for a village that appears only in case data.
pub const FALLBACK_LOCATION: GeoPoint = GeoPoint { lat: 25.5, lng: 92.0 };

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn seed_case(
    new: NewCase,
    status: CaseStatus,
    date: NaiveDate,
) -> PatientCase {
    PatientCase {
        id: CaseId::new(),
        name: new.name,
        age: new.age,
        village: new.village,
        disease: new.disease,
        status,
        severity: new.severity,
        date,
        location: new.location,
    }
}

/// Demo patient records, newest first. Two of the five are recovered.
pub fn demo_cases() -> Vec<PatientCase> {
    vec![
        seed_case(
            NewCase {
                name: "Kamal Singh".into(),
                age: 56,
                village: "Mawsynram".into(),
                disease: Disease::HepatitisA,
                severity: Severity::Moderate,
                location: Some(GeoPoint { lat: 25.2972, lng: 91.5822 }),
            },
            CaseStatus::Active,
            seed_date(2026, 2, 12),
        ),
        seed_case(
            NewCase {
                name: "Bimal Nath".into(),
                age: 45,
                village: "Dimapur".into(),
                disease: Disease::Typhoid,
                severity: Severity::Severe,
                location: Some(GeoPoint { lat: 25.9042, lng: 93.7270 }),
            },
            CaseStatus::Active,
            seed_date(2026, 2, 11),
        ),
        seed_case(
            NewCase {
                name: "Ranjit Das".into(),
                age: 34,
                village: "Mawsynram".into(),
                disease: Disease::Cholera,
                severity: Severity::Severe,
                location: Some(GeoPoint { lat: 25.2972, lng: 91.5822 }),
            },
            CaseStatus::Active,
            seed_date(2026, 2, 10),
        ),
        seed_case(
            NewCase {
                name: "Meena Devi".into(),
                age: 28,
                village: "Silchar".into(),
                disease: Disease::Dysentery,
                severity: Severity::Moderate,
                location: Some(GeoPoint { lat: 24.8333, lng: 92.7789 }),
            },
            CaseStatus::Recovered,
            seed_date(2026, 2, 8),
        ),
        seed_case(
            NewCase {
                name: "Priya Sharma".into(),
                age: 22,
                village: "Shillong".into(),
                disease: Disease::Diarrhea,
                severity: Severity::Mild,
                location: Some(GeoPoint { lat: 25.5788, lng: 91.8933 }),
            },
            CaseStatus::Recovered,
            seed_date(2026, 2, 7),
        ),
    ]
}
