//! Catalog lookups

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Currency, Money};

use crate::error::CatalogError;
use crate::medication::{normalize_name, Medication, MedicationSpec};

static STANDARD: Lazy<Catalog> = Lazy::new(|| Catalog::assemble(standard_spec()));

/// A catalog document, as loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSpec {
    #[serde(default)]
    pub currency: Currency,
    pub complaints: Vec<String>,
    pub medications: Vec<MedicationSpec>,
}

/// Complaint options and medication prices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    currency: Currency,
    complaints: Vec<String>,
    medications: BTreeMap<String, Medication>,
}

impl Catalog {
    /// The built-in clinic catalog, priced in rupiah
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Builds a catalog from a document, rejecting inconsistent price lists
    pub fn from_spec(spec: CatalogSpec) -> Result<Self, CatalogError> {
        validate_spec(&spec)?;
        let catalog = Self::assemble(spec);
        debug!(
            medications = catalog.medications.len(),
            complaints = catalog.complaints.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses and validates a JSON catalog document
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_json::from_str(document)?;
        Self::from_spec(spec)
    }

    fn assemble(spec: CatalogSpec) -> Self {
        let currency = spec.currency;
        let medications = spec
            .medications
            .into_iter()
            .map(|m| m.into_medication(currency))
            .map(|m| (m.name.clone(), m))
            .collect();

        Self {
            currency,
            complaints: spec.complaints,
            medications,
        }
    }

    /// Currency every price is expressed in
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Complaint options in presentation order
    pub fn list_complaints(&self) -> &[String] {
        &self.complaints
    }

    /// All priced medications, ordered by name
    pub fn list_medications(&self) -> impl Iterator<Item = &Medication> + '_ {
        self.medications.values()
    }

    /// Looks up a medication by name, ignoring case and surrounding whitespace
    pub fn medication(&self, name: &str) -> Result<&Medication, CatalogError> {
        self.medications
            .get(&normalize_name(name))
            .ok_or_else(|| CatalogError::UnknownMedication(name.trim().to_string()))
    }

    /// Unit price of a medication
    pub fn unit_price(&self, name: &str) -> Result<Money, CatalogError> {
        self.medication(name).map(|m| m.unit_price)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_spec(spec: &CatalogSpec) -> Result<(), CatalogError> {
    let mut names = HashSet::new();
    let mut codes = HashSet::new();

    if spec.complaints.iter().any(|c| c.trim().is_empty()) {
        return Err(CatalogError::InvalidCatalog(
            "complaint options must not be blank".to_string(),
        ));
    }

    for medication in &spec.medications {
        let name = normalize_name(&medication.name);
        let code = medication.code.trim();

        if name.is_empty() || code.is_empty() {
            return Err(CatalogError::InvalidCatalog(
                "medication name and code are required".to_string(),
            ));
        }
        if medication.unit_price < 0 {
            return Err(CatalogError::InvalidCatalog(format!(
                "negative unit price for {}",
                name
            )));
        }
        if !names.insert(name.clone()) {
            return Err(CatalogError::InvalidCatalog(format!(
                "duplicate medication name: {}",
                name
            )));
        }
        if !codes.insert(code.to_string()) {
            return Err(CatalogError::InvalidCatalog(format!(
                "duplicate medication code: {}",
                code
            )));
        }
    }

    Ok(())
}

/// The price list and complaint options shipped with the clinic
pub fn standard_spec() -> CatalogSpec {
    let complaints = [
        "Demam",
        "Batuk",
        "Pilek",
        "Sakit kepala",
        "Nyeri dada",
        "Sesak napas",
        "Nyeri perut",
        "Diare",
        "Mual dan muntah",
        "Tekanan darah tinggi",
        "Gatal-gatal",
        "Nyeri sendi",
        "Luka",
        "Lainnya",
    ];

    let medications = vec![
        MedicationSpec::new("AMLO5", "amlodipine", 500),
        MedicationSpec::new("AMOX500", "amoxicillin", 1_500),
        MedicationSpec::new("ANTA", "antasida", 500),
        MedicationSpec::new("CAPT25", "captopril", 400),
        MedicationSpec::new("CTM4", "chlorpheniramine", 200),
        MedicationSpec::new("DEXA05", "dexamethasone", 350),
        MedicationSpec::new("GG100", "guaifenesin", 250),
        MedicationSpec::new("IBU400", "ibuprofen", 700),
        MedicationSpec::new("MTF500", "metformin", 600),
        MedicationSpec::new("OMZ20", "omeprazole", 1_200),
        MedicationSpec::new("ORS", "oralit", 1_000),
        MedicationSpec::new("PCT500", "paracetamol", 300),
        MedicationSpec::new("SIMV10", "simvastatin", 800),
        MedicationSpec::new("ZNC20", "zinc", 450),
    ];

    CatalogSpec {
        currency: Currency::IDR,
        complaints: complaints.iter().map(|c| c.to_string()).collect(),
        medications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_spec_is_valid() {
        assert!(Catalog::from_spec(standard_spec()).is_ok());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::standard();
        let medication = catalog.medication("  AmLoDiPiNe ").unwrap();
        assert_eq!(medication.name, "amlodipine");
        assert_eq!(medication.code, "AMLO5");
    }

    #[test]
    fn test_unknown_medication() {
        let catalog = Catalog::standard();
        let err = catalog.unit_price("unobtainium").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownMedication(ref n) if n == "unobtainium"));
    }

    #[test]
    fn test_medications_are_ordered_by_name() {
        let catalog = Catalog::standard();
        let names: Vec<_> = catalog.list_medications().map(|m| m.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let spec = CatalogSpec {
            currency: Currency::IDR,
            complaints: vec![],
            medications: vec![
                MedicationSpec::new("A", "Paracetamol", 300),
                MedicationSpec::new("B", "paracetamol", 350),
            ],
        };
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let spec = CatalogSpec {
            currency: Currency::IDR,
            complaints: vec![],
            medications: vec![
                MedicationSpec::new("A", "paracetamol", 300),
                MedicationSpec::new("A", "ibuprofen", 700),
            ],
        };
        assert!(Catalog::from_spec(spec).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let spec = CatalogSpec {
            currency: Currency::IDR,
            complaints: vec![],
            medications: vec![MedicationSpec::new("A", "paracetamol", -1)],
        };
        assert!(Catalog::from_spec(spec).is_err());
    }
}
