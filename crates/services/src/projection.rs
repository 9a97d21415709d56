use serde::Serialize;
use tracing::debug;

use academy_core::calculator::{
    ContributionTiming, GrowthInputs, ScenarioSeries, SeriesPoint, compare, projection,
};
use academy_core::settings::AcademySettings;

use crate::error::ProjectionError;

/// Calculator form values. `annual_rate` falls back to the configured default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRequest {
    pub starting_amount: f64,
    pub monthly_contribution: f64,
    pub years: u32,
    pub annual_rate: Option<f64>,
    pub timing: ContributionTiming,
}

impl Default for ProjectionRequest {
    fn default() -> Self {
        Self {
            starting_amount: 0.0,
            monthly_contribution: 2_000.0,
            years: 20,
            annual_rate: None,
            timing: ContributionTiming::StartOfMonth,
        }
    }
}

/// One series point labelled with its calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRow {
    pub calendar_year: i32,
    pub point: SeriesPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionReport {
    pub annual_rate: f64,
    pub timing: ContributionTiming,
    pub rows: Vec<YearRow>,
    pub total_if_invested: f64,
    pub total_if_not_invested: f64,
}

impl ProjectionReport {
    /// Growth earned over the whole horizon.
    #[must_use]
    pub fn total_returns(&self) -> f64 {
        self.total_if_invested - self.total_if_not_invested
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub calendar_years: Vec<i32>,
    pub series: Vec<ScenarioSeries>,
    pub total_if_not_invested: f64,
}

/// Runs growth projections against the configured rates and calendar.
#[derive(Debug, Clone)]
pub struct ProjectionService {
    settings: AcademySettings,
}

impl ProjectionService {
    #[must_use]
    pub fn new(settings: AcademySettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &AcademySettings {
        &self.settings
    }

    fn inputs(&self, request: &ProjectionRequest) -> Result<GrowthInputs, ProjectionError> {
        let rate = request
            .annual_rate
            .unwrap_or(self.settings.default_annual_rate());
        let inputs = GrowthInputs::new(
            request.starting_amount,
            request.monthly_contribution,
            request.years,
            rate,
        )?
        .with_timing(request.timing);
        Ok(inputs)
    }

    /// Year-by-year growth at a single rate.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::Calculator` if the request is out of range.
    pub fn project(&self, request: &ProjectionRequest) -> Result<ProjectionReport, ProjectionError> {
        let inputs = self.inputs(request)?;
        let result = projection(&inputs);
        debug!(
            years = inputs.years(),
            rate = inputs.annual_rate(),
            timing = ?inputs.timing(),
            total = result.total_if_invested,
            "projection computed"
        );

        let rows = result
            .points
            .into_iter()
            .map(|point| YearRow {
                calendar_year: self.settings.calendar_year(point.year),
                point,
            })
            .collect();

        Ok(ProjectionReport {
            annual_rate: inputs.annual_rate(),
            timing: inputs.timing(),
            rows,
            total_if_invested: result.total_if_invested,
            total_if_not_invested: result.total_if_not_invested,
        })
    }

    /// Runs the request once per configured scenario on a shared year axis.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::Calculator` if the request is out of range.
    pub fn compare(&self, request: &ProjectionRequest) -> Result<ComparisonReport, ProjectionError> {
        let inputs = self.inputs(request)?;
        let series = compare(&inputs, self.settings.scenarios())?;
        debug!(
            years = inputs.years(),
            scenarios = series.len(),
            "scenario comparison computed"
        );

        Ok(ComparisonReport {
            calendar_years: (1..=inputs.years())
                .map(|year| self.settings.calendar_year(year))
                .collect(),
            series,
            total_if_not_invested: projection(&inputs).total_if_not_invested,
        })
    }
}
