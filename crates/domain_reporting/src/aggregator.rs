//! Reporting aggregator service

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::YearMonth;
use domain_claims::ClaimsEngine;
use domain_encounter::{EncounterFilter, EncounterLedger};
use domain_patient::PatientRegistry;

use crate::error::ReportingError;
use crate::summary::{summarize, MonthlySummary};

/// Read-only consumer of the other components
pub struct ReportingAggregator {
    patients: Arc<PatientRegistry>,
    encounters: Arc<EncounterLedger>,
    claims: Arc<ClaimsEngine>,
}

impl ReportingAggregator {
    pub fn new(
        patients: Arc<PatientRegistry>,
        encounters: Arc<EncounterLedger>,
        claims: Arc<ClaimsEngine>,
    ) -> Self {
        Self {
            patients,
            encounters,
            claims,
        }
    }

    /// Summarises the records created during `period`
    ///
    /// A period without activity yields a zeroed summary rather than an
    /// error.
    pub async fn monthly_summary(&self, period: YearMonth) -> Result<MonthlySummary, ReportingError> {
        debug!(%period, "Computing monthly summary");

        let patients = self.patients.list().await?.to_vec();
        let encounters = self
            .encounters
            .list(EncounterFilter::new().between(Some(period.start()), Some(period.end())))
            .await?
            .to_vec();
        let claims = self.claims.list_claims(None).await?.to_vec();

        let summary = summarize(
            period,
            self.encounters.catalog().currency(),
            &patients,
            &encounters,
            &claims,
        )?;

        info!(
            %period,
            patients = summary.patients_registered,
            encounters = summary.encounters,
            claims = summary.claims,
            "Monthly summary computed"
        );
        Ok(summary)
    }

    /// Parses `YYYY-MM` and summarises that month
    pub async fn monthly_summary_for(&self, period: &str) -> Result<MonthlySummary, ReportingError> {
        let period: YearMonth = period.parse()?;
        self.monthly_summary(period).await
    }
}
