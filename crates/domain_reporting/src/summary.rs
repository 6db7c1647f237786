//! Monthly summary computation

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError, YearMonth};
use domain_claims::{Claim, ClaimStatus};
use domain_encounter::Encounter;
use domain_patient::Patient;

use crate::error::ReportingError;

/// Claims in one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTotal {
    pub status: ClaimStatus,
    pub count: usize,
    pub amount: Money,
}

/// How much of one medication was dispensed for a diagnosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationUsage {
    pub name: String,
    pub quantity: u64,
    pub cost: Money,
}

/// Encounters and medication cost for one diagnosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisBreakdown {
    /// Diagnosis, lowercased; spellings differing only in case are grouped
    pub diagnosis: String,
    pub encounters: usize,
    pub medication_cost: Money,
    /// Ordered by medication name
    pub medications: Vec<MedicationUsage>,
}

/// Activity for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub period: YearMonth,
    pub patients_registered: usize,
    /// Distinct patients with an encounter in the period
    pub patients_seen: usize,
    pub encounters: usize,
    pub claims: usize,
    /// One entry per status, in lifecycle order, including empty ones
    pub claims_by_status: Vec<StatusTotal>,
    pub total_encounter_cost: Money,
    /// Ordered by diagnosis
    pub diagnoses: Vec<DiagnosisBreakdown>,
}

impl MonthlySummary {
    /// A summary with every count and amount at zero
    pub fn empty(period: YearMonth, currency: Currency) -> Self {
        Self {
            period,
            patients_registered: 0,
            patients_seen: 0,
            encounters: 0,
            claims: 0,
            claims_by_status: ClaimStatus::ALL
                .into_iter()
                .map(|status| StatusTotal {
                    status,
                    count: 0,
                    amount: Money::zero(currency),
                })
                .collect(),
            total_encounter_cost: Money::zero(currency),
            diagnoses: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patients_registered == 0 && self.encounters == 0 && self.claims == 0
    }

    /// Totals for one status
    pub fn status(&self, status: ClaimStatus) -> Option<&StatusTotal> {
        self.claims_by_status.iter().find(|t| t.status == status)
    }
}

/// Rolls up the records created within `period`
///
/// Records outside the period are ignored, so callers may pass whole
/// collections.
pub fn summarize(
    period: YearMonth,
    currency: Currency,
    patients: &[Patient],
    encounters: &[Encounter],
    claims: &[Claim],
) -> Result<MonthlySummary, ReportingError> {
    let mut summary = MonthlySummary::empty(period, currency);

    summary.patients_registered = patients
        .iter()
        .filter(|p| period.contains(p.created_at))
        .count();

    let encounters: Vec<&Encounter> = encounters
        .iter()
        .filter(|e| period.contains(e.created_at))
        .collect();
    summary.encounters = encounters.len();
    summary.patients_seen = encounters
        .iter()
        .map(|e| e.patient_id)
        .collect::<HashSet<_>>()
        .len();
    summary.total_encounter_cost = checked(Money::checked_sum(
        encounters.iter().map(|e| e.total()).collect::<Vec<_>>().iter(),
        currency,
    ))?;
    summary.diagnoses = diagnosis_breakdown(&encounters, currency)?;

    for claim in claims.iter().filter(|c| period.contains(c.created_at)) {
        summary.claims += 1;
        if let Some(total) = summary
            .claims_by_status
            .iter_mut()
            .find(|t| t.status == claim.status)
        {
            total.count += 1;
            total.amount = checked(total.amount.checked_add(&claim.amount))?;
        }
    }

    Ok(summary)
}

fn diagnosis_breakdown(
    encounters: &[&Encounter],
    currency: Currency,
) -> Result<Vec<DiagnosisBreakdown>, ReportingError> {
    let mut groups: BTreeMap<String, DiagnosisBreakdown> = BTreeMap::new();
    let mut usage: BTreeMap<(String, String), MedicationUsage> = BTreeMap::new();

    for encounter in encounters {
        let key = encounter.diagnosis.trim().to_lowercase();
        let group = groups.entry(key.clone()).or_insert_with(|| DiagnosisBreakdown {
            diagnosis: key.clone(),
            encounters: 0,
            medication_cost: Money::zero(currency),
            medications: Vec::new(),
        });
        group.encounters += 1;
        group.medication_cost = checked(group.medication_cost.checked_add(&encounter.total()))?;

        for line in encounter.lines() {
            let entry = usage
                .entry((key.clone(), line.medication().to_string()))
                .or_insert_with(|| MedicationUsage {
                    name: line.medication().to_string(),
                    quantity: 0,
                    cost: Money::zero(currency),
                });
            entry.quantity += u64::from(line.quantity());
            entry.cost = checked(entry.cost.checked_add(&line.line_total()))?;
        }
    }

    for ((diagnosis, _), medication) in usage {
        if let Some(group) = groups.get_mut(&diagnosis) {
            group.medications.push(medication);
        }
    }

    Ok(groups.into_values().collect())
}

fn checked(result: Result<Money, MoneyError>) -> Result<Money, ReportingError> {
    result.map_err(|_| ReportingError::CostOverflow)
}
