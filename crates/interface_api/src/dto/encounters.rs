//! Encounter DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, EncounterId, PatientId};
use domain_encounter::{Encounter, MedicationLine, MedicationOrder, NewEncounter};

/// Medication requested for a visit
#[derive(Debug, Clone, Deserialize)]
pub struct MedicationOrderRequest {
    pub name: String,
    /// Signed so that zero and negative quantities reach domain validation
    pub quantity: i64,
}

impl From<MedicationOrderRequest> for MedicationOrder {
    fn from(order: MedicationOrderRequest) -> Self {
        MedicationOrder::new(&order.name, order.quantity)
    }
}

/// Encounter creation request
#[derive(Debug, Deserialize)]
pub struct CreateEncounterRequest {
    pub patient_id: PatientId,
    pub diagnosis: String,
    #[serde(default)]
    pub medications: Vec<MedicationOrderRequest>,
    pub notes: Option<String>,
    pub visit_date: Option<NaiveDate>,
    pub attending_clinician: Option<String>,
}

impl From<CreateEncounterRequest> for NewEncounter {
    fn from(req: CreateEncounterRequest) -> Self {
        let orders = req.medications.into_iter().map(Into::into).collect();
        NewEncounter {
            notes: req.notes,
            visit_date: req.visit_date,
            attending_clinician: req.attending_clinician,
            ..NewEncounter::new(req.patient_id, &req.diagnosis, orders)
        }
    }
}

/// Additional medication lines for an open encounter
#[derive(Debug, Deserialize)]
pub struct AddMedicationsRequest {
    pub medications: Vec<MedicationOrderRequest>,
}

impl AddMedicationsRequest {
    pub fn into_orders(self) -> Vec<MedicationOrder> {
        self.medications.into_iter().map(Into::into).collect()
    }
}

/// Encounter list query
#[derive(Debug, Default, Deserialize)]
pub struct EncounterQuery {
    pub patient_id: Option<String>,
    pub diagnosis: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct MedicationLineResponse {
    pub code: String,
    pub medication: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub line_total: i64,
}

impl From<&MedicationLine> for MedicationLineResponse {
    fn from(line: &MedicationLine) -> Self {
        Self {
            code: line.code().to_string(),
            medication: line.medication().to_string(),
            quantity: line.quantity(),
            unit_price: line.unit_price().minor_units(),
            line_total: line.line_total().minor_units(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EncounterResponse {
    pub id: EncounterId,
    pub patient_id: PatientId,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub visit_date: NaiveDate,
    pub attending_clinician: Option<String>,
    pub medications: Vec<MedicationLineResponse>,
    pub total: i64,
    pub currency: Currency,
    pub claim_id: Option<ClaimId>,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Encounter> for EncounterResponse {
    fn from(encounter: Encounter) -> Self {
        Self {
            medications: encounter.lines().iter().map(Into::into).collect(),
            total: encounter.total().minor_units(),
            currency: encounter.total().currency(),
            claim_id: encounter.claim_id(),
            locked: encounter.is_locked(),
            id: encounter.id,
            patient_id: encounter.patient_id,
            diagnosis: encounter.diagnosis,
            notes: encounter.notes,
            visit_date: encounter.visit_date,
            attending_clinician: encounter.attending_clinician,
            created_at: encounter.created_at,
            updated_at: encounter.updated_at,
        }
    }
}
