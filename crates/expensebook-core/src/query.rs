//! Report request parameters

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::time::{parse_iso_date, ISO_DATE_FORMAT};
use crate::types::GroupBy;

/// A validated report request
///
/// Fields are private so a `ReportQuery` always holds parseable, ordered
/// bounds. The raw strings are kept because the report prints them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportQuery {
    from: String,
    to: String,
    group_by: GroupBy,
}

impl ReportQuery {
    /// Validate raw query parameters.
    ///
    /// Checks run in order: both bounds present, both parse, bounds
    /// ordered, grouping known.
    pub fn parse(from: Option<&str>, to: Option<&str>, group_by: Option<&str>) -> CoreResult<Self> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => (from, to),
            _ => return Err(CoreError::MissingRange),
        };

        let from_date = parse_iso_date(from)?;
        let to_date = parse_iso_date(to)?;
        if from_date > to_date {
            return Err(CoreError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let group_by = match group_by {
            None => GroupBy::None,
            Some(value) => value.parse().map_err(|_| CoreError::InvalidGrouping {
                value: value.to_string(),
            })?,
        };

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            group_by,
        })
    }

    /// Build a query from typed dates
    pub fn new(from: NaiveDate, to: NaiveDate, group_by: GroupBy) -> CoreResult<Self> {
        if from > to {
            return Err(CoreError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self {
            from: from.format(ISO_DATE_FORMAT).to_string(),
            to: to.format(ISO_DATE_FORMAT).to_string(),
            group_by,
        })
    }

    /// Range start exactly as the caller wrote it
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Range end exactly as the caller wrote it
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }
}
