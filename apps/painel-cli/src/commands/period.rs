//! `period` subcommand: shows the date range a period selector resolves to.

use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command};
use painel_core::period::{resolve, CustomBounds, DateRange, PeriodSelector};
use serde::Serialize;
use serde_json::Value;

use super::{date_arg, to_output};
use crate::error::CliResult;

pub fn command() -> Command {
    Command::new("period")
        .about("Show the date range a period resolves to")
        .arg(
            Arg::new("selector")
                .required(true)
                .value_name("PERIOD")
                .help("today, week, month or custom"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("DATE")
                .help("First day of a custom period"),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_name("DATE")
                .help("Last day of a custom period"),
        )
        .arg(
            Arg::new("reference")
                .long("reference")
                .short('r')
                .value_name("DATE")
                .help("Resolve as if today were this date"),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodView {
    pub period: PeriodSelector,
    pub reference: NaiveDate,
    pub range: DateRange,
    pub days: i64,
}

pub fn view(m: &ArgMatches, today: NaiveDate) -> CliResult<PeriodView> {
    // Unknown selectors surface as the core's ValidationError, not a usage error.
    let period: PeriodSelector = m
        .get_one::<String>("selector")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;

    let bounds = CustomBounds {
        start: m.get_one::<String>("start").cloned(),
        end: m.get_one::<String>("end").cloned(),
    };
    let reference = date_arg(m, "reference")?.unwrap_or(today);

    let range = resolve(period, Some(&bounds), reference)?;
    Ok(PeriodView {
        period,
        reference,
        range,
        days: range.num_days(),
    })
}

pub fn run(m: &ArgMatches, today: NaiveDate) -> CliResult<Value> {
    to_output(&view(m, today)?)
}

#[cfg(test)]
mod tests {
    use super::super::build_cli;
    use super::super::test_support::sub_matches;
    use super::*;
    use crate::error::CliError;
    use clap::error::ErrorKind;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_month_with_reference() {
        let m = sub_matches(&["painel", "period", "month", "--reference", "2023-02-10"]);
        let out = run(&m, today()).unwrap();
        assert_eq!(
            out,
            json!({
                "period": "month",
                "reference": "2023-02-10",
                "range": { "start": "2023-02-01", "end": "2023-02-28" },
                "days": 28
            })
        );
    }

    #[test]
    fn test_today_defaults_to_clock_date() {
        let view = view(&sub_matches(&["painel", "period", "today"]), today()).unwrap();
        assert_eq!(view.range.start(), today());
        assert_eq!(view.days, 1);
    }

    #[test]
    fn test_custom_requires_both_bounds() {
        let m = sub_matches(&["painel", "period", "custom", "--start", "2024-01-01"]);
        let err = view(&m, today()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: end is required");

        let m = sub_matches(&[
            "painel", "period", "custom", "--start", "2024-01-01", "--end", "2024-01-31",
        ]);
        assert_eq!(view(&m, today()).unwrap().days, 31);
    }

    #[test]
    fn test_rejects_unknown_period() {
        let m = sub_matches(&["painel", "period", "year"]);
        assert!(matches!(view(&m, today()), Err(CliError::Validation(_))));

        let err = build_cli()
            .try_get_matches_from(["painel", "period"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_bad_reference_date() {
        let m = sub_matches(&["painel", "period", "today", "-r", "15/03/2024"]);
        assert!(matches!(view(&m, today()), Err(CliError::Validation(_))));
    }
}
