//! `sales` subcommand: the filtered, sorted, paginated sales list.

use std::str::FromStr;

use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgMatches, Command};
use painel_core::filter::{filter, sort_records, FilterCriteria, FilterSchema, SortSpec};
use painel_core::pagination::{paginate, Page, PageRequest};
use painel_core::period::{resolve, CustomBounds, DateRange, PeriodSelector};
use painel_core::{Sale, SalesSummary};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::{to_output, DataDir};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

pub fn command() -> Command {
    Command::new("sales")
        .about("List sales filtered by period, status and search text")
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .value_name("TEXT")
                .allow_hyphen_values(true)
                .help("Case-insensitive match on client id or operator"),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .value_name("STATUS")
                .help("Sale status, or the configured 'all' sentinel"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("DATE")
                .help("First day to include"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("DATE")
                .help("Last day to include"),
        )
        .arg(
            Arg::new("period")
                .long("period")
                .short('p')
                .value_name("PERIOD")
                .value_parser(PeriodSelector::from_str)
                .help("today, week, month or custom (custom reads --from/--to)"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .value_name("N")
                .default_value("1")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("1-based page number, clamped to the available pages"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Items per page [default: PAINEL_PAGE_SIZE]"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_name("FIELD[:asc|desc]")
                .value_parser(SortSpec::from_str)
                .help("Sort by a record field"),
        )
}

/// Parsed `sales` arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesArgs {
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub period: Option<PeriodSelector>,
    pub page: i64,
    pub page_size: Option<usize>,
    pub sort: Option<SortSpec>,
}

impl SalesArgs {
    pub fn from_matches(m: &ArgMatches) -> Self {
        SalesArgs {
            search: m.get_one::<String>("search").cloned(),
            status: m.get_one::<String>("status").cloned(),
            from: m.get_one::<String>("from").cloned(),
            to: m.get_one::<String>("to").cloned(),
            period: m.get_one::<PeriodSelector>("period").copied(),
            page: m.get_one::<i64>("page").copied().unwrap_or(1),
            page_size: m.get_one::<usize>("page-size").copied(),
            sort: m.get_one::<SortSpec>("sort").cloned(),
        }
    }

    /// Resolves the date bounds: a period wins over raw `--from`/`--to`,
    /// except `custom`, which takes its bounds from them.
    fn date_bounds(&self, today: NaiveDate) -> CliResult<(Option<DateRange>, Option<String>, Option<String>)> {
        match self.period {
            None => Ok((None, self.from.clone(), self.to.clone())),
            Some(PeriodSelector::Custom) => {
                let bounds = CustomBounds {
                    start: self.from.clone(),
                    end: self.to.clone(),
                };
                let range = resolve(PeriodSelector::Custom, Some(&bounds), today)?;
                Ok(bounds_of(range))
            }
            Some(period) => {
                if self.from.is_some() || self.to.is_some() {
                    return Err(CliError::usage(
                        "--from/--to only combine with --period custom",
                    ));
                }
                Ok(bounds_of(resolve(period, None, today)?))
            }
        }
    }

    fn request(&self, config: &CliConfig, today: NaiveDate) -> CliResult<(PageRequest, Option<DateRange>)> {
        let (range, from, to) = self.date_bounds(today)?;

        let mut criteria = FilterCriteria::new();
        let pairs = [
            ("search", self.search.clone()),
            ("status", self.status.clone()),
            ("dateFrom", from),
            ("dateTo", to),
        ];
        for (name, value) in pairs {
            if let Some(value) = value {
                criteria.set(name, value);
            }
        }

        let mut request = PageRequest::new(self.page_size.unwrap_or(config.page_size));
        request.set_criteria(criteria);
        request.go_to_page(self.page);
        Ok((request, range))
    }
}

fn bounds_of(range: DateRange) -> (Option<DateRange>, Option<String>, Option<String>) {
    (
        Some(range),
        Some(range.start().to_string()),
        Some(range.end().to_string()),
    )
}

/// What `sales` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<DateRange>,
    pub page: Page<Sale>,
    /// Totals over every matching sale, not just this page.
    pub summary: SalesSummary,
}

/// Builds the view from already-loaded sales.
pub fn view(sales: &[Sale], args: &SalesArgs, config: &CliConfig, today: NaiveDate) -> CliResult<SalesView> {
    let (request, period) = args.request(config, today)?;
    let schema = FilterSchema::sales_with_sentinel(&config.status_all);

    let mut visible = filter(sales, request.criteria(), &schema)?;
    if let Some(spec) = &args.sort {
        visible = sort_records(&visible, spec);
    }

    let summary = SalesSummary::from_sales(&visible);
    let page = paginate(&visible, request.page_number(), request.page_size())?;

    info!(
        matched = page.total_items,
        page = page.page_number,
        pages = page.total_pages,
        "Sales listed"
    );
    Ok(SalesView {
        period,
        page,
        summary,
    })
}

pub fn run(m: &ArgMatches, config: &CliConfig, data: &DataDir, today: NaiveDate) -> CliResult<Value> {
    let args = SalesArgs::from_matches(m);
    let sales: Vec<Sale> = data.load("sales")?;
    to_output(&view(&sales, &args, config, today)?)
}
