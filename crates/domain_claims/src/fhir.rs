//! FHIR-shaped claim payload
//!
//! Only the parts of the FHIR `Claim` resource needed for submission and
//! approval are modeled. Money values are whole numbers in the smallest
//! currency unit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Money};
use domain_encounter::{Encounter, MedicationLine};

const CLAIM_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/claim-type";
const PRIORITY_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/processpriority";
const MEDICATION_SYSTEM: &str = "urn:clinic:medication-code";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    fn coded(system: &str, code: &str, display: Option<&str>) -> Self {
        Self {
            coding: vec![Coding {
                system: Some(system.to_string()),
                code: code.to_string(),
                display: display.map(str::to_string),
            }],
            text: None,
        }
    }

    fn text(text: &str) -> Self {
        Self {
            coding: Vec::new(),
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// Money on the wire: integer minor units plus currency code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FhirMoney {
    pub value: i64,
    pub currency: String,
}

impl From<Money> for FhirMoney {
    fn from(money: Money) -> Self {
        Self {
            value: money.minor_units(),
            currency: money.currency().code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDiagnosis {
    pub sequence: u32,
    pub diagnosis_codeable_concept: CodeableConcept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItem {
    pub sequence: u32,
    pub product_or_service: CodeableConcept,
    pub serviced_date: NaiveDate,
    pub quantity: Quantity,
    pub unit_price: FhirMoney,
    pub net: FhirMoney,
}

impl ClaimItem {
    fn from_line(sequence: u32, line: &MedicationLine, serviced_date: NaiveDate) -> Self {
        Self {
            sequence,
            product_or_service: CodeableConcept::coded(
                MEDICATION_SYSTEM,
                line.code(),
                Some(line.medication()),
            ),
            serviced_date,
            quantity: Quantity {
                value: line.quantity(),
            },
            unit_price: line.unit_price().into(),
            net: line.line_total().into(),
        }
    }
}

/// A FHIR `Claim` resource built from one encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FhirClaim {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub claim_type: CodeableConcept,
    #[serde(rename = "use")]
    pub claim_use: String,
    pub patient: Reference,
    pub encounter: Reference,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Reference>,
    pub priority: CodeableConcept,
    pub diagnosis: Vec<ClaimDiagnosis>,
    pub item: Vec<ClaimItem>,
    pub total: FhirMoney,
}

impl FhirClaim {
    /// Maps an encounter to a claim document
    ///
    /// Everything except `id` and `created` is a function of the encounter
    /// alone, so the same encounter always yields the same items and total.
    pub fn from_encounter(encounter: &Encounter, id: Option<ClaimId>, created: DateTime<Utc>) -> Self {
        let item = encounter
            .lines()
            .iter()
            .zip(1u32..)
            .map(|(line, sequence)| ClaimItem::from_line(sequence, line, encounter.visit_date))
            .collect();

        Self {
            resource_type: "Claim".to_string(),
            id: id.map(|id| id.to_string()),
            status: "active".to_string(),
            claim_type: CodeableConcept::coded(CLAIM_TYPE_SYSTEM, "institutional", None),
            claim_use: "claim".to_string(),
            patient: Reference {
                reference: format!("Patient/{}", encounter.patient_id),
                display: None,
            },
            encounter: Reference {
                reference: format!("Encounter/{}", encounter.id),
                display: None,
            },
            created,
            provider: encounter
                .attending_clinician
                .as_deref()
                .map(practitioner_reference),
            priority: CodeableConcept::coded(PRIORITY_SYSTEM, "normal", None),
            diagnosis: vec![ClaimDiagnosis {
                sequence: 1,
                diagnosis_codeable_concept: CodeableConcept::text(&encounter.diagnosis),
            }],
            item,
            total: encounter.total().into(),
        }
    }

    /// Grand total in minor units
    pub fn total_value(&self) -> i64 {
        self.total.value
    }
}

fn practitioner_reference(name: &str) -> Reference {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    Reference {
        reference: format!("Practitioner/{}", slug),
        display: Some(name.trim().to_string()),
    }
}
