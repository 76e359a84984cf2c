//! Expense report text layout
//!
//! Turns expenses plus a [`ReportQuery`] into the ordered lines of the
//! report: a header block, the totals, then either one line per expense or
//! one line per week/month bucket.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use expensebook_utils::format_amount;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::models::Expense;
use crate::query::ReportQuery;
use crate::time::{month_start, parse_iso_date, week_start, ISO_DATE_FORMAT};
use crate::types::GroupBy;

pub const REPORT_TITLE: &str = "Expense report";
pub const UNKNOWN_MERCHANT: &str = "Unknown";
const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Aggregated expenses for one week or month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// Monday of the week or first day of the month
    pub start: NaiveDate,
    pub label: String,
    pub total: f64,
    pub count: usize,
}

impl Bucket {
    fn new(start: NaiveDate, group_by: GroupBy) -> Option<Self> {
        let label = match group_by {
            GroupBy::Week => format!("Week of {}", start.format(ISO_DATE_FORMAT)),
            GroupBy::Month => format!("{}-{:02}", start.year(), start.month()),
            GroupBy::None => return None,
        };
        Some(Self {
            start,
            label,
            total: 0.0,
            count: 0,
        })
    }

    fn render(&self, currency: &str) -> String {
        format!(
            "{}: {} {} ({} entries)",
            self.label,
            currency,
            format_amount(self.total),
            self.count
        )
    }
}

/// Currency printed on every amount: the first expense's, or empty.
///
/// Mixed-currency ranges are labelled with this single code.
pub fn report_currency(expenses: &[Expense]) -> &str {
    expenses.first().map(|e| e.currency.as_str()).unwrap_or("")
}

/// Sum of all amounts in input order
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Group expenses into buckets sorted by start date.
///
/// Expenses whose date does not parse are left out. Returns no buckets for
/// [`GroupBy::None`].
pub fn summarize_buckets(expenses: &[Expense], group_by: GroupBy) -> Vec<Bucket> {
    let bucket_start: fn(NaiveDate) -> Option<NaiveDate> = match group_by {
        GroupBy::None => return Vec::new(),
        GroupBy::Week => week_start,
        GroupBy::Month => month_start,
    };

    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
    for expense in expenses {
        let date = match parse_iso_date(&expense.date) {
            Ok(date) => date,
            Err(_) => {
                log::debug!(
                    "Skipping expense {} with unparseable date {:?}",
                    expense.id,
                    expense.date
                );
                continue;
            }
        };
        let start = match bucket_start(date) {
            Some(start) => start,
            None => {
                log::debug!(
                    "Skipping expense {} whose {} starts before the earliest date",
                    expense.id,
                    group_by
                );
                continue;
            }
        };
        let bucket = match buckets.entry(start) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match Bucket::new(start, group_by) {
                Some(bucket) => entry.insert(bucket),
                None => continue,
            },
        };
        bucket.total += expense.amount;
        bucket.count += 1;
    }

    buckets.into_values().collect()
}

/// Build the report lines, stamped with the current UTC time
pub fn build_report_lines(expenses: &[Expense], query: &ReportQuery) -> Vec<String> {
    build_report_lines_at(expenses, query, Utc::now())
}

/// Build the report lines with an explicit generation time
pub fn build_report_lines_at(
    expenses: &[Expense],
    query: &ReportQuery,
    generated_at: DateTime<Utc>,
) -> Vec<String> {
    let currency = report_currency(expenses);

    let mut lines = vec![
        REPORT_TITLE.to_string(),
        format!("Range: {} to {}", query.from(), query.to()),
        format!("Grouping: {}", query.group_by()),
        format!("Generated: {}", generated_at.format(GENERATED_FORMAT)),
        String::new(),
        format!("Total: {} {}", currency, format_amount(total_amount(expenses))),
        format!("Entries: {}", expenses.len()),
        String::new(),
    ];

    if query.group_by().is_grouped() {
        lines.extend(
            summarize_buckets(expenses, query.group_by())
                .iter()
                .map(|bucket| bucket.render(currency)),
        );
    } else {
        lines.extend(expenses.iter().map(|expense| {
            format!(
                "{} - {} {} {}",
                expense.date,
                expense.merchant_or(UNKNOWN_MERCHANT),
                currency,
                format_amount(expense.amount)
            )
        }));
    }

    lines
}
