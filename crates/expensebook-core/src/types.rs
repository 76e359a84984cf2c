//! Basic types for the core module

use serde::{Deserialize, Serialize};

/// How report entries are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One line per expense
    None,
    /// Buckets starting on Monday of the ISO week
    Week,
    /// Buckets starting on the first day of the month
    Month,
}

impl Default for GroupBy {
    fn default() -> Self {
        GroupBy::None
    }
}

impl GroupBy {
    /// Whether expenses are aggregated into buckets
    pub fn is_grouped(&self) -> bool {
        !matches!(self, GroupBy::None)
    }
}

/// Parses the `groupBy` query value. The empty string means no grouping;
/// `"none"` itself is not an accepted spelling.
impl std::str::FromStr for GroupBy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(GroupBy::None),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            _ => Err(format!("Invalid groupBy value: {}", s)),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::None => write!(f, "none"),
            GroupBy::Week => write!(f, "week"),
            GroupBy::Month => write!(f, "month"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_from_str() {
        assert_eq!("".parse::<GroupBy>(), Ok(GroupBy::None));
        assert_eq!("week".parse::<GroupBy>(), Ok(GroupBy::Week));
        assert_eq!("month".parse::<GroupBy>(), Ok(GroupBy::Month));
        assert!("none".parse::<GroupBy>().is_err());
        assert!("Month".parse::<GroupBy>().is_err());
        assert!("year".parse::<GroupBy>().is_err());
    }

    #[test]
    fn test_group_by_display() {
        assert_eq!(GroupBy::None.to_string(), "none");
        assert_eq!(GroupBy::Week.to_string(), "week");
        assert_eq!(GroupBy::Month.to_string(), "month");
        assert!(!GroupBy::default().is_grouped());
    }
}
