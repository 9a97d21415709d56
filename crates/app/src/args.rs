use std::fmt;
use std::str::FromStr;

use academy_core::calculator::ContributionTiming;
use academy_core::settings::AcademySettingsDraft;
use services::ProjectionRequest;

pub const ENV_ANNUAL_RATE: &str = "ACADEMY_ANNUAL_RATE";
pub const ENV_TOTAL_MODULES: &str = "ACADEMY_TOTAL_MODULES";
pub const ENV_START_YEAR: &str = "ACADEMY_START_YEAR";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidEnv { var: &'static str, raw: String },
    MissingQuery,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidEnv { var, raw } => write!(f, "invalid {var} value: {raw}"),
            ArgsError::MissingQuery => write!(f, "search requires a query"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Project(ProjectionRequest),
    Compare(ProjectionRequest),
    Search(String),
    Path,
    Help,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  academy project [--start <amount>] [--monthly <amount>] [--years <n>] [--rate <r>] [--end-of-month]"
    );
    eprintln!("  academy compare [--start <amount>] [--monthly <amount>] [--years <n>]");
    eprintln!("  academy search <query...>");
    eprintln!("  academy path");
    eprintln!("  academy help");
    eprintln!();
    eprintln!("Defaults for project/compare:");
    eprintln!("  --start 0 --monthly 2000 --years 20, rate from settings (0.08)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_ANNUAL_RATE}, {ENV_TOTAL_MODULES}, {ENV_START_YEAR}, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

impl Command {
    /// Parses everything after the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return Ok(Self::Help);
        };

        match first.as_str() {
            "project" => parse_request(&mut args, true).map(Self::Project),
            "compare" => parse_request(&mut args, false).map(Self::Compare),
            "search" => {
                let query = args.collect::<Vec<_>>().join(" ");
                if query.trim().is_empty() {
                    return Err(ArgsError::MissingQuery);
                }
                Ok(Self::Search(query))
            }
            "path" => match args.next() {
                None => Ok(Self::Path),
                Some(extra) => Err(ArgsError::UnknownArg(extra)),
            },
            "help" | "--help" | "-h" => Ok(Self::Help),
            other => Err(ArgsError::UnknownCommand(other.to_string())),
        }
    }
}

/// `--rate` and `--end-of-month` only apply to a single projection.
fn parse_request(
    args: &mut impl Iterator<Item = String>,
    single_rate: bool,
) -> Result<ProjectionRequest, ArgsError> {
    let mut request = ProjectionRequest::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--start" => request.starting_amount = parse_number(args, "--start")?,
            "--monthly" => request.monthly_contribution = parse_number(args, "--monthly")?,
            "--years" => request.years = parse_number(args, "--years")?,
            "--rate" if single_rate => request.annual_rate = Some(parse_number(args, "--rate")?),
            "--end-of-month" if single_rate => request.timing = ContributionTiming::EndOfMonth,
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(request)
}

/// Builds a settings draft from `ACADEMY_*` variables looked up through `lookup`.
pub fn settings_draft(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AcademySettingsDraft, ArgsError> {
    fn read<T: FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        var: &'static str,
    ) -> Result<Option<T>, ArgsError> {
        lookup(var)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ArgsError::InvalidEnv { var, raw })
            })
            .transpose()
    }

    Ok(AcademySettingsDraft {
        default_annual_rate: read(&lookup, ENV_ANNUAL_RATE)?,
        total_modules: read(&lookup, ENV_TOTAL_MODULES)?,
        projection_start_year: read(&lookup, ENV_START_YEAR)?,
        ..AcademySettingsDraft::default()
    })
}
