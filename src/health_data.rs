//! Case and subscription ledgers, with aggregate statistics derived fresh
//! on every read. The ledgers are append-only and the data volumes are
//! small, so nothing is cached and nothing needs invalidating.

use chrono::{NaiveDate, Utc};
use log::info;

use crate::models::{
    AlertSubscription, CaseId, CaseStatus, NewCase, NewSubscription, PatientCase, RiskLevel,
    SubscriptionId, VillageSummary,
};
use crate::seed::{self, SeedVillage, FALLBACK_LOCATION};

/// Owns the patient case and alert subscription ledgers.
pub struct HealthDataStore {
    /// Newest first.
    cases: Vec<PatientCase>,
    subscriptions: Vec<AlertSubscription>,
    seed_villages: &'static [SeedVillage],
}

fn stamp(new: NewCase, date: NaiveDate) -> PatientCase {
    PatientCase {
        id: CaseId::new(),
        name: new.name,
        age: new.age,
        village: new.village,
        disease: new.disease,
        status: CaseStatus::Active,
        severity: new.severity,
        date,
        location: new.location,
    }
}

impl HealthDataStore {
    /// A store with the seed village list and no cases. Tests and fresh
    /// deployments start here.
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            subscriptions: Vec::new(),
            seed_villages: seed::VILLAGES,
        }
    }

    /// A store preloaded with the demo patient records.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.cases = seed::demo_cases();
        store
    }

    /// Records a case: generated id, today's date, active status, placed
    /// in front of everything already in the ledger.
    pub fn add_case(&mut self, new: NewCase) -> CaseId {
        let case = stamp(new, Utc::now().date_naive());
        let id = case.id;
        info!("case {id} recorded in {}", case.village);
        self.cases.insert(0, case);
        id
    }

    /// Bulk variant of [`add_case`](Self::add_case): every entry gets its
    /// own id and the same report date, and the batch lands in front of
    /// the existing ledger with its input order preserved.
    pub fn add_cases_from_csv(&mut self, batch: Vec<NewCase>) -> Vec<CaseId> {
        let date = Utc::now().date_naive();
        let stamped: Vec<PatientCase> = batch.into_iter().map(|new| stamp(new, date)).collect();
        let ids: Vec<CaseId> = stamped.iter().map(|case| case.id).collect();
        info!("{} cases imported in bulk", ids.len());
        self.cases.splice(0..0, stamped);
        ids
    }

    /// Appends a subscription with a generated id and the current time.
    /// No dedup by phone or village.
    pub fn add_subscription(&mut self, new: NewSubscription) -> SubscriptionId {
        let sub = AlertSubscription {
            id: SubscriptionId::new(),
            name: new.name,
            phone: new.phone,
            village: new.village,
            subscribed_at: Utc::now(),
        };
        let id = sub.id;
        info!("subscription {id} added for {}", sub.village);
        self.subscriptions.push(sub);
        id
    }

    /// The full case ledger, newest first.
    pub fn cases(&self) -> &[PatientCase] {
        &self.cases
    }

    pub fn subscriptions(&self) -> &[AlertSubscription] {
        &self.subscriptions
    }

    pub fn total_cases(&self) -> usize {
        self.cases.len()
    }

    pub fn active_cases(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| c.status == CaseStatus::Active)
            .count()
    }

    pub fn recovered(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| c.status == CaseStatus::Recovered)
            .count()
    }

    /// Seed villages merged with per-village counts from the current
    /// ledger, each classified by the fixed risk thresholds. A village
    /// only present in case data gets a synthesized entry carrying the
    /// first reporting case's coordinates, or the fallback point.
    pub fn villages(&self) -> Vec<VillageSummary> {
        let mut out: Vec<VillageSummary> = self
            .seed_villages
            .iter()
            .map(|v| VillageSummary {
                name: v.name.to_string(),
                risk: RiskLevel::Low,
                cases: 0,
                location: v.location,
            })
            .collect();

        for case in &self.cases {
            match out.iter_mut().find(|v| v.name == case.village) {
                Some(village) => village.cases += 1,
                None => out.push(VillageSummary {
                    name: case.village.clone(),
                    risk: RiskLevel::Low,
                    cases: 1,
                    location: case.location.unwrap_or(FALLBACK_LOCATION),
                }),
            }
        }

        for village in &mut out {
            village.risk = RiskLevel::from_case_count(village.cases);
        }
        out
    }

    /// Proxy contamination index: the active share of all cases as a
    /// percentage, rounded, clamped to 0..=100. Zero when the ledger is
    /// empty.
    pub fn contamination(&self) -> u32 {
        let total = self.total_cases().max(1);
        let pct = (self.active_cases() as f64 / total as f64 * 100.0).round() as u32;
        pct.min(100)
    }
}

impl Default for HealthDataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Disease, GeoPoint, Severity};

    fn case_in(village: &str) -> NewCase {
        NewCase {
            name: "Test Patient".into(),
            age: 30,
            village: village.into(),
            disease: Disease::Cholera,
            severity: Severity::Moderate,
            location: None,
        }
    }

    #[test]
    fn add_case_prepends_and_counts() {
        let mut store = HealthDataStore::new();
        assert_eq!(store.total_cases(), 0);

        let first = store.add_case(case_in("Tura"));
        let second = store.add_case(case_in("Shillong"));

        assert_eq!(store.total_cases(), 2);
        assert_eq!(store.active_cases(), 2);
        assert_eq!(store.recovered(), 0);
        // Newest first.
        assert_eq!(store.cases()[0].id, second);
        assert_eq!(store.cases()[1].id, first);
        assert_eq!(store.cases()[0].status, CaseStatus::Active);
    }

    #[test]
    fn bulk_import_keeps_input_order_ahead_of_existing_cases() {
        let mut store = HealthDataStore::new();
        let old = store.add_case(case_in("Jorhat"));

        let ids = store.add_cases_from_csv(vec![case_in("Tura"), case_in("Tezpur")]);
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        // c1 before c2, both before the pre-existing case.
        assert_eq!(store.cases()[0].id, ids[0]);
        assert_eq!(store.cases()[1].id, ids[1]);
        assert_eq!(store.cases()[2].id, old);
        assert_eq!(store.cases()[0].date, store.cases()[1].date);
    }

    #[test]
    fn village_risk_thresholds_are_boundary_inclusive() {
        let mut store = HealthDataStore::new();
        let tura = |s: &HealthDataStore| {
            s.villages()
                .into_iter()
                .find(|v| v.name == "Tura")
                .expect("Tura is a seed village")
        };

        assert_eq!(tura(&store).cases, 0);
        assert_eq!(tura(&store).risk, RiskLevel::Low);

        for _ in 0..9 {
            store.add_case(case_in("Tura"));
        }
        assert_eq!(tura(&store).risk, RiskLevel::Low);

        store.add_case(case_in("Tura"));
        let v = tura(&store);
        assert_eq!(v.cases, 10);
        assert_eq!(v.risk, RiskLevel::Medium);

        for _ in 0..19 {
            store.add_case(case_in("Tura"));
        }
        assert_eq!(tura(&store).risk, RiskLevel::Medium);

        store.add_case(case_in("Tura"));
        let v = tura(&store);
        assert_eq!(v.cases, 30);
        assert_eq!(v.risk, RiskLevel::High);
    }

    #[test]
    fn unknown_village_is_synthesized_with_case_coordinates() {
        let mut store = HealthDataStore::new();
        let mut case = case_in("Umling");
        case.location = Some(GeoPoint { lat: 25.9, lng: 91.9 });
        store.add_case(case);
        store.add_case(case_in("Nongpoh"));

        let villages = store.villages();
        let umling = villages.iter().find(|v| v.name == "Umling").unwrap();
        assert_eq!(umling.cases, 1);
        assert_eq!(umling.location, GeoPoint { lat: 25.9, lng: 91.9 });

        let nongpoh = villages.iter().find(|v| v.name == "Nongpoh").unwrap();
        assert_eq!(nongpoh.location, FALLBACK_LOCATION);

        // Seed villages keep their coordinates and zero count.
        let jorhat = villages.iter().find(|v| v.name == "Jorhat").unwrap();
        assert_eq!(jorhat.cases, 0);
    }

    #[test]
    fn contamination_is_zero_on_empty_ledger_and_hundred_when_all_active() {
        let mut store = HealthDataStore::new();
        assert_eq!(store.contamination(), 0);

        store.add_case(case_in("Tura"));
        store.add_case(case_in("Tura"));
        assert_eq!(store.contamination(), 100);
    }

    #[test]
    fn contamination_on_seeded_store_reflects_active_share() {
        let store = HealthDataStore::seeded();
        assert_eq!(store.total_cases(), 5);
        assert_eq!(store.active_cases(), 3);
        assert_eq!(store.recovered(), 2);
        // round(100 * 3 / 5)
        assert_eq!(store.contamination(), 60);
    }

    #[test]
    fn subscriptions_append_without_dedup() {
        let mut store = HealthDataStore::new();
        let sub = NewSubscription {
            name: "Asha".into(),
            phone: "9000000000".into(),
            village: "Tura".into(),
        };
        let first = store.add_subscription(sub.clone());
        let second = store.add_subscription(sub);

        assert_ne!(first, second);
        assert_eq!(store.subscriptions().len(), 2);
        assert_eq!(store.subscriptions()[0].id, first);
        assert_eq!(store.subscriptions()[1].village, "Tura");
    }
}
