use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest horizon the calculator accepts.
pub const MAX_YEARS: u32 = 100;

const MONTHS_PER_YEAR: u32 = 12;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalculatorError {
    #[error("{field} must be a finite, non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("annual rate must be finite and non-negative, got {0}")]
    InvalidRate(f64),

    #[error("horizon must be between 1 and 100 years, got {0}")]
    InvalidYears(u32),

    #[error("fractional horizon must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    #[error("compounding periods per year must be > 0")]
    InvalidPeriods,

    #[error("scenario name cannot be empty")]
    EmptyScenarioName,
}

//
// ─── INPUTS ────────────────────────────────────────────────────────────────────
//

/// When in each month the contribution lands relative to compounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ContributionTiming {
    /// Contribute, then compound the month (contribution earns that month's growth).
    #[default]
    StartOfMonth,
    /// Compound, then contribute.
    EndOfMonth,
}

/// Validated calculator request. Rates are decimals (`0.08` for 8%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthInputs {
    starting_amount: f64,
    monthly_contribution: f64,
    years: u32,
    annual_rate: f64,
    timing: ContributionTiming,
}

impl GrowthInputs {
    /// # Errors
    ///
    /// Returns `CalculatorError` if an amount or the rate is negative or not finite,
    /// or if `years` is outside `1..=MAX_YEARS`.
    pub fn new(
        starting_amount: f64,
        monthly_contribution: f64,
        years: u32,
        annual_rate: f64,
    ) -> Result<Self, CalculatorError> {
        check_amount("starting amount", starting_amount)?;
        check_amount("monthly contribution", monthly_contribution)?;
        check_rate(annual_rate)?;
        if !(1..=MAX_YEARS).contains(&years) {
            return Err(CalculatorError::InvalidYears(years));
        }

        Ok(Self {
            starting_amount,
            monthly_contribution,
            years,
            annual_rate,
            timing: ContributionTiming::default(),
        })
    }

    #[must_use]
    pub fn with_timing(mut self, timing: ContributionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Same request at a different annual rate.
    ///
    /// # Errors
    ///
    /// Returns `CalculatorError::InvalidRate` if `annual_rate` is negative or not finite.
    pub fn with_rate(mut self, annual_rate: f64) -> Result<Self, CalculatorError> {
        check_rate(annual_rate)?;
        self.annual_rate = annual_rate;
        Ok(self)
    }

    #[must_use]
    pub fn starting_amount(&self) -> f64 {
        self.starting_amount
    }

    #[must_use]
    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_contribution
    }

    #[must_use]
    pub fn years(&self) -> u32 {
        self.years
    }

    #[must_use]
    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    #[must_use]
    pub fn timing(&self) -> ContributionTiming {
        self.timing
    }

    fn months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), CalculatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalculatorError::InvalidAmount { field, value })
    }
}

fn check_rate(rate: f64) -> Result<(), CalculatorError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(CalculatorError::InvalidRate(rate))
    }
}

//
// ─── SERIES ────────────────────────────────────────────────────────────────────
//

/// Position of the investment at the end of year `year` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: u32,
    pub contributions: f64,
    pub total_value: f64,
    pub returns: f64,
}

/// Year-by-year series plus the two headline totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthProjection {
    pub points: Vec<SeriesPoint>,
    pub total_if_invested: f64,
    pub total_if_not_invested: f64,
}

/// Simulates monthly compounding and samples the running total once per year.
#[must_use]
pub fn project(inputs: &GrowthInputs) -> Vec<SeriesPoint> {
    let growth = 1.0 + inputs.annual_rate / f64::from(MONTHS_PER_YEAR);
    let monthly = inputs.monthly_contribution;
    let mut total = inputs.starting_amount;
    let mut points = Vec::with_capacity(inputs.years as usize);

    for year in 1..=inputs.years {
        for _ in 0..MONTHS_PER_YEAR {
            match inputs.timing {
                ContributionTiming::StartOfMonth => {
                    total += monthly;
                    total *= growth;
                }
                ContributionTiming::EndOfMonth => {
                    total *= growth;
                    total += monthly;
                }
            }
        }

        let contributions =
            inputs.starting_amount + monthly * f64::from(year * MONTHS_PER_YEAR);
        points.push(SeriesPoint {
            year,
            contributions,
            total_value: total,
            returns: total - contributions,
        });
    }

    points
}

/// What the same contributions add up to kept as cash.
#[must_use]
pub fn not_invested_total(inputs: &GrowthInputs) -> f64 {
    inputs.starting_amount + inputs.monthly_contribution * f64::from(inputs.months())
}

#[must_use]
pub fn projection(inputs: &GrowthInputs) -> GrowthProjection {
    let points = project(inputs);
    let total_if_invested = points
        .last()
        .map_or(inputs.starting_amount, |p| p.total_value);

    GrowthProjection {
        points,
        total_if_invested,
        total_if_not_invested: not_invested_total(inputs),
    }
}

//
// ─── SCENARIOS ─────────────────────────────────────────────────────────────────
//

/// A named annual rate, e.g. "Safe" at 7%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub annual_rate: f64,
}

impl Scenario {
    /// # Errors
    ///
    /// Returns `CalculatorError::EmptyScenarioName` for a blank name and
    /// `CalculatorError::InvalidRate` for a negative or non-finite rate.
    pub fn new(name: impl Into<String>, annual_rate: f64) -> Result<Self, CalculatorError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CalculatorError::EmptyScenarioName);
        }
        check_rate(annual_rate)?;
        Ok(Self { name, annual_rate })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSeries {
    pub name: String,
    pub annual_rate: f64,
    pub points: Vec<SeriesPoint>,
}

/// Runs `base` once per scenario, swapping in each scenario's rate.
///
/// All series share the year axis `1..=base.years()`.
///
/// # Errors
///
/// Returns `CalculatorError::InvalidRate` if a scenario carries an invalid rate.
pub fn compare(
    base: &GrowthInputs,
    scenarios: &[Scenario],
) -> Result<Vec<ScenarioSeries>, CalculatorError> {
    scenarios
        .iter()
        .map(|scenario| {
            let inputs = base.with_rate(scenario.annual_rate)?;
            Ok(ScenarioSeries {
                name: scenario.name.clone(),
                annual_rate: scenario.annual_rate,
                points: project(&inputs),
            })
        })
        .collect()
}

/// Closed-form compound interest: `A = P(1 + r/n)^(nt)`.
///
/// # Errors
///
/// Returns `CalculatorError` for a negative principal, rate or duration, or zero periods.
pub fn compound_amount(
    principal: f64,
    annual_rate: f64,
    periods_per_year: u32,
    years: f64,
) -> Result<f64, CalculatorError> {
    check_amount("principal", principal)?;
    check_rate(annual_rate)?;
    if periods_per_year == 0 {
        return Err(CalculatorError::InvalidPeriods);
    }
    if !years.is_finite() || years < 0.0 {
        return Err(CalculatorError::InvalidDuration(years));
    }

    let n = f64::from(periods_per_year);
    Ok(principal * (1.0 + annual_rate / n).powf(n * years))
}
