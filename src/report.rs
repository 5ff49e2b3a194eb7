//! Flat-text import and export: bulk case upload parsing, CSV dumps of the
//! ledgers, and the self-checkup remedy report. Everything here is a pure
//! transform over the stores' read values.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{AlertSubscription, Disease, NewCase, PatientCase, Severity, VillageSummary};

pub const CASE_CSV_HEADER: &str = "name,age,village,disease,severity";

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: expected 5 fields (name,age,village,disease,severity), found {found}")]
    WrongFieldCount { line: usize, found: usize },
    #[error("line {line}: invalid age: {value}")]
    InvalidAge { line: usize, value: String },
    #[error("line {line}: unknown severity: {value}")]
    UnknownSeverity { line: usize, value: String },
}

fn parse_severity(value: &str) -> Option<Severity> {
    match value.trim().to_lowercase().as_str() {
        "mild" => Some(Severity::Mild),
        "moderate" => Some(Severity::Moderate),
        "severe" => Some(Severity::Severe),
        _ => None,
    }
}

/// Parses a bulk case upload. One case per line, comma separated:
/// `name,age,village,disease,severity`. Blank lines and a leading header
/// row are skipped; coordinates are not part of the upload format.
pub fn parse_cases(input: &str) -> Result<Vec<NewCase>, CsvError> {
    let mut out = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if idx == 0 && trimmed.to_lowercase().starts_with("name,") {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(CsvError::WrongFieldCount {
                line,
                found: fields.len(),
            });
        }

        let age: i32 = fields[1].parse().map_err(|_| CsvError::InvalidAge {
            line,
            value: fields[1].to_string(),
        })?;
        let severity = parse_severity(fields[4]).ok_or_else(|| CsvError::UnknownSeverity {
            line,
            value: fields[4].to_string(),
        })?;

        out.push(NewCase {
            name: fields[0].to_string(),
            age,
            village: fields[2].to_string(),
            disease: Disease::parse(fields[3]),
            severity,
            location: None,
        });
    }
    Ok(out)
}

/// CSV dump of the case ledger, header row first, ledger order preserved.
pub fn cases_csv(cases: &[PatientCase]) -> String {
    let mut out = String::from("id,name,age,village,disease,status,severity,date\n");
    for case in cases {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            case.id,
            case.name,
            case.age,
            case.village,
            case.disease,
            case.status,
            case.severity,
            case.date
        ));
    }
    out
}

/// CSV dump of the derived village summaries.
pub fn villages_csv(villages: &[VillageSummary]) -> String {
    let mut out = String::from("name,cases,risk,lat,lng\n");
    for v in villages {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            v.name, v.cases, v.risk, v.location.lat, v.location.lng
        ));
    }
    out
}

/// JSON dump of the case ledger, ledger order preserved.
pub fn cases_json(cases: &[PatientCase]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(cases)
}

/// JSON dump of the subscription ledger.
pub fn subscriptions_json(subscriptions: &[AlertSubscription]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(subscriptions)
}

/// Inputs to the plain-text remedy report handed back after a self-checkup.
pub struct CheckupReport<'a> {
    pub patient: &'a str,
    pub village: &'a str,
    pub date: NaiveDate,
    pub disease: &'a Disease,
    pub severity: Severity,
    pub symptoms: &'a str,
}

struct Guidance {
    remedy: &'static str,
    precautions: &'static [&'static str],
    diet: &'static [&'static str],
    when_to_seek: &'static str,
}

fn guidance(disease: &Disease) -> Guidance {
    match disease {
        Disease::Cholera => Guidance {
            remedy: "Oral Rehydration Solution (ORS) is the primary treatment. Dissolve ORS \
                     packets in clean, boiled water and drink small sips frequently.",
            precautions: &[
                "Drink only boiled or treated water",
                "Wash hands with soap frequently",
                "Avoid raw or undercooked food",
            ],
            diet: &[
                "ORS solution every 30 minutes",
                "Rice water / kanji",
                "Bananas for potassium",
                "Avoid dairy and spicy foods",
            ],
            when_to_seek: "If diarrhea persists more than 2 days or signs of severe dehydration \
                           appear.",
        },
        Disease::Typhoid => Guidance {
            remedy: "Antibiotics prescribed by a doctor are essential. Rest and stay hydrated \
                     with clean water and electrolyte solutions.",
            precautions: &[
                "Complete the full course of antibiotics",
                "Rest and avoid physical exertion",
                "Maintain hygiene to prevent spread",
            ],
            diet: &[
                "Soft, easily digestible foods",
                "Boiled rice and dal",
                "Fresh fruit juices",
                "Avoid fried and spicy foods",
            ],
            when_to_seek: "If fever persists beyond 3 days or abdominal pain worsens.",
        },
        Disease::Dysentery => Guidance {
            remedy: "Maintain hydration with ORS. Antibiotics may be needed for bacterial \
                     dysentery; avoid anti-diarrheal medication unless prescribed.",
            precautions: &[
                "Strict hand hygiene",
                "Avoid sharing food and water",
                "Wash all fruits and vegetables thoroughly",
            ],
            diet: &[
                "BRAT diet (bananas, rice, applesauce, toast)",
                "Clear fluids and ORS",
                "Yogurt or curd for probiotics",
                "Avoid raw foods and milk",
            ],
            when_to_seek: "If blood in stool increases, cramps become severe, or fever is high.",
        },
        Disease::HepatitisA => Guidance {
            remedy: "No specific antiviral treatment. Focus on rest, hydration and nutrition, \
                     and avoid alcohol completely while the liver heals.",
            precautions: &[
                "Avoid alcohol for at least 6 months",
                "Practice strict hygiene",
                "Do not prepare food for others while infectious",
            ],
            diet: &[
                "Small, frequent meals",
                "High-calorie, easily digestible foods",
                "Fresh fruits and vegetables",
                "Avoid fatty and fried foods",
            ],
            when_to_seek: "If jaundice worsens, fatigue is severe, or vomiting persists.",
        },
        Disease::Diarrhea => Guidance {
            remedy: "Oral rehydration therapy is the cornerstone of treatment. Replace lost \
                     fluids and electrolytes; zinc supplements can reduce duration.",
            precautions: &[
                "Drink only safe, clean water",
                "Wash hands before eating and after using the toilet",
                "Avoid street food temporarily",
            ],
            diet: &[
                "ORS after every loose stool",
                "Plain rice with salt",
                "Boiled potatoes",
                "Avoid caffeine, dairy, and sugary drinks",
            ],
            when_to_seek: "If diarrhea lasts more than 3 days or fluids cannot be kept down.",
        },
        Disease::Other(_) => Guidance {
            remedy: "Please consult a healthcare professional for proper diagnosis and \
                     treatment.",
            precautions: &[
                "Maintain good hygiene",
                "Drink clean, boiled water",
                "Rest adequately and monitor symptoms",
            ],
            diet: &[
                "Light, easily digestible foods",
                "Stay hydrated",
                "Avoid processed foods",
            ],
            when_to_seek: "If symptoms persist or worsen, seek medical attention immediately.",
        },
    }
}

/// Renders the plain-text health report a people user downloads after a
/// self-checkup submission.
pub fn checkup_report(input: &CheckupReport<'_>) -> String {
    let g = guidance(input.disease);
    let mut lines = vec![
        "=======================================".to_string(),
        "   HEALTHGUARD - HEALTH REPORT".to_string(),
        "=======================================".to_string(),
        String::new(),
        format!("Patient: {}", input.patient),
        format!("Village: {}", input.village),
        format!("Date: {}", input.date),
        format!("Disease: {}", input.disease),
        format!("Severity: {}", input.severity),
        String::new(),
        "-- Symptoms Reported --".to_string(),
        input.symptoms.to_string(),
        String::new(),
        "-- Recommended Remedy --".to_string(),
        g.remedy.to_string(),
        String::new(),
        "-- Precautions --".to_string(),
    ];
    for (i, p) in g.precautions.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, p));
    }
    lines.push(String::new());
    lines.push("-- Recommended Diet --".to_string());
    for (i, d) in g.diet.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, d));
    }
    lines.push(String::new());
    lines.push("-- When to Seek Medical Attention --".to_string());
    lines.push(g.when_to_seek.to_string());
    lines.push(String::new());
    lines.push("This report is for informational purposes only.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_data::HealthDataStore;
    use crate::models::CaseStatus;

    #[test]
    fn parses_a_well_formed_upload_with_header() {
        let input = "name,age,village,disease,severity\n\
                     Ranjit Das,34,Mawsynram,Cholera,severe\n\
                     \n\
                     Meena Devi,28,Silchar,Dysentery,moderate\n";
        let cases = parse_cases(input).expect("upload parses");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "Ranjit Das");
        assert_eq!(cases[0].age, 34);
        assert_eq!(cases[0].disease, Disease::Cholera);
        assert_eq!(cases[1].severity, Severity::Moderate);
    }

    #[test]
    fn freeform_disease_labels_are_kept() {
        let cases = parse_cases("Asha,25,Tura,Skin Rash,mild").expect("parses");
        assert_eq!(cases[0].disease, Disease::Other("Skin Rash".into()));
    }

    #[test]
    fn short_rows_and_bad_fields_are_rejected() {
        assert!(matches!(
            parse_cases("Asha,25,Tura,Cholera"),
            Err(CsvError::WrongFieldCount { line: 1, found: 4 })
        ));
        assert!(matches!(
            parse_cases("Asha,old,Tura,Cholera,mild"),
            Err(CsvError::InvalidAge { line: 1, .. })
        ));
        assert!(matches!(
            parse_cases("Asha,25,Tura,Cholera,critical"),
            Err(CsvError::UnknownSeverity { line: 1, .. })
        ));
    }

    #[test]
    fn case_export_has_one_row_per_case() {
        let store = HealthDataStore::seeded();
        let csv = cases_csv(store.cases());
        assert_eq!(csv.lines().count(), 1 + store.total_cases());
        assert!(csv.starts_with("id,name,age,village,disease,status,severity,date"));
        assert!(csv.contains("Mawsynram"));
    }

    #[test]
    fn village_export_includes_seed_villages() {
        let store = HealthDataStore::new();
        let csv = villages_csv(&store.villages());
        assert!(csv.contains("Tura,0,low,"));
    }

    #[test]
    fn checkup_report_carries_patient_and_guidance() {
        let store = HealthDataStore::seeded();
        let case = &store.cases()[0];
        assert_eq!(case.status, CaseStatus::Active);

        let text = checkup_report(&CheckupReport {
            patient: "Asha",
            village: "Tura",
            date: case.date,
            disease: &Disease::Cholera,
            severity: Severity::Mild,
            symptoms: "Watery stools since yesterday",
        });
        assert!(text.contains("Patient: Asha"));
        assert!(text.contains("Oral Rehydration Solution"));
        assert!(text.contains("Watery stools since yesterday"));
    }

    #[test]
    fn checkup_report_includes_a_diet_section() {
        let text = checkup_report(&CheckupReport {
            patient: "Asha",
            village: "Tura",
            date: chrono::NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
            disease: &Disease::Dysentery,
            severity: Severity::Moderate,
            symptoms: "Cramps",
        });
        assert!(text.contains("-- Recommended Diet --"));
        assert!(text.contains("BRAT diet"));
    }

    #[test]
    fn json_dumps_round_the_ledgers_through_serde() {
        let mut store = HealthDataStore::seeded();
        store.add_subscription(crate::models::NewSubscription {
            name: "Asha".into(),
            phone: "9000000000".into(),
            village: "Tura".into(),
        });

        let cases = cases_json(store.cases()).expect("cases serialize");
        let parsed: serde_json::Value = serde_json::from_str(&cases).expect("valid JSON");
        assert_eq!(parsed.as_array().map(Vec::len), Some(store.total_cases()));
        assert!(cases.contains("Mawsynram"));

        let subs = subscriptions_json(store.subscriptions()).expect("subscriptions serialize");
        assert!(subs.contains("Tura"));
    }
}
