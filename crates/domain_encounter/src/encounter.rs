//! Encounter aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, EncounterId, Money, PatientId, Record};

use crate::error::EncounterError;
use crate::pricing::{money_error, total_cost};

/// A requested medication, before pricing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationOrder {
    /// Medication name as written by the clinician
    pub name: String,
    /// Units to dispense; must be a positive integer
    pub quantity: i64,
}

impl MedicationOrder {
    pub fn new(name: &str, quantity: i64) -> Self {
        Self {
            name: name.to_string(),
            quantity,
        }
    }
}

/// A priced medication line, owned by exactly one encounter
///
/// The unit price is frozen when the line is created; later catalog
/// changes do not re-price it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationLine {
    pub(crate) code: String,
    pub(crate) medication: String,
    pub(crate) quantity: u32,
    pub(crate) unit_price: Money,
    pub(crate) line_total: Money,
}

impl MedicationLine {
    /// Creates a line; the line total is computed here and nowhere else
    pub fn new(code: &str, medication: &str, quantity: u32, unit_price: Money) -> Result<Self, EncounterError> {
        if quantity == 0 {
            return Err(EncounterError::InvalidQuantity {
                medication: medication.to_string(),
                quantity: 0,
            });
        }
        let line_total = unit_price.checked_mul(quantity).map_err(money_error)?;
        Ok(Self {
            code: code.to_string(),
            medication: medication.to_string(),
            quantity,
            unit_price,
            line_total,
        })
    }

    /// Catalog code of the medication
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Canonical medication name
    pub fn medication(&self) -> &str {
        &self.medication
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

/// Details for recording a visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEncounter {
    pub patient_id: PatientId,
    pub diagnosis: String,
    #[serde(default)]
    pub medications: Vec<MedicationOrder>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to the day the encounter is recorded
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub attending_clinician: Option<String>,
}

impl NewEncounter {
    pub fn new(patient_id: PatientId, diagnosis: &str, medications: Vec<MedicationOrder>) -> Self {
        Self {
            patient_id,
            diagnosis: diagnosis.to_string(),
            medications,
            notes: None,
            visit_date: None,
            attending_clinician: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_visit_date(mut self, date: NaiveDate) -> Self {
        self.visit_date = Some(date);
        self
    }

    pub fn with_clinician(mut self, clinician: &str) -> Self {
        self.attending_clinician = Some(clinician.to_string());
        self
    }
}

/// A recorded clinical visit
///
/// `lines` and `total` are private: the total can only change by adding
/// lines, and adding lines always recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: EncounterId,
    pub patient_id: PatientId,
    pub diagnosis: String,
    lines: Vec<MedicationLine>,
    pub notes: Option<String>,
    pub visit_date: NaiveDate,
    pub attending_clinician: Option<String>,
    total: Money,
    /// Set once a claim is derived; the encounter is immutable from then on
    claim_id: Option<ClaimId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Encounter {
    /// Opens an encounter from already-priced lines
    pub fn open(
        details: NewEncounter,
        lines: Vec<MedicationLine>,
        currency: Currency,
    ) -> Result<Self, EncounterError> {
        let diagnosis = details.diagnosis.trim().to_string();
        if diagnosis.is_empty() {
            return Err(EncounterError::InvalidData("diagnosis is required".to_string()));
        }

        let total = total_cost(&lines, currency)?;
        let now = Utc::now();

        Ok(Self {
            id: EncounterId::new(),
            patient_id: details.patient_id,
            diagnosis,
            lines,
            notes: non_blank(details.notes),
            visit_date: details.visit_date.unwrap_or_else(|| now.date_naive()),
            attending_clinician: non_blank(details.attending_clinician),
            total,
            claim_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Medication lines in the order they were added
    pub fn lines(&self) -> &[MedicationLine] {
        &self.lines
    }

    /// Total cost of all lines
    pub fn total(&self) -> Money {
        self.total
    }

    /// The claim derived from this encounter, if any
    pub fn claim_id(&self) -> Option<ClaimId> {
        self.claim_id
    }

    pub fn is_locked(&self) -> bool {
        self.claim_id.is_some()
    }

    /// Recomputes the total from the lines
    pub fn recomputed_total(&self) -> Result<Money, EncounterError> {
        total_cost(&self.lines, self.total.currency())
    }

    /// Appends priced lines and recomputes the total
    ///
    /// Nothing is changed if the encounter is locked or the new total
    /// cannot be represented.
    pub fn add_lines(&mut self, lines: Vec<MedicationLine>) -> Result<(), EncounterError> {
        self.ensure_unlocked()?;

        let mut combined = self.lines.clone();
        combined.extend(lines);
        let total = total_cost(&combined, self.total.currency())?;

        self.lines = combined;
        self.total = total;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the encounter as claimed by `claim_id`
    pub fn lock_for(&mut self, claim_id: ClaimId) -> Result<(), EncounterError> {
        if let Some(existing) = self.claim_id {
            return Err(EncounterError::AlreadyClaimed {
                encounter_id: self.id,
                claim_id: existing,
            });
        }
        self.claim_id = Some(claim_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Undoes `lock_for` when the claim could not be stored
    pub fn release(&mut self, claim_id: ClaimId) -> bool {
        if self.claim_id == Some(claim_id) {
            self.claim_id = None;
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    fn ensure_unlocked(&self) -> Result<(), EncounterError> {
        match self.claim_id {
            Some(claim_id) => Err(EncounterError::EncounterLocked {
                encounter_id: self.id,
                claim_id,
            }),
            None => Ok(()),
        }
    }
}

impl Record for Encounter {
    type Id = EncounterId;
    const ENTITY: &'static str = "Encounter";

    fn record_id(&self) -> EncounterId {
        self.id
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
