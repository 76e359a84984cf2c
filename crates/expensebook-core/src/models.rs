//! Core data models for expenses and categories

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};

/// Field names a new expense must carry, in the order they are reported
pub const REQUIRED_EXPENSE_FIELDS: [&str; 4] = ["amount", "currency", "categoryId", "date"];

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque unique identifier
    pub id: String,
    /// Amount spent
    pub amount: f64,
    /// Currency code (e.g. "USD")
    pub currency: String,
    /// Category reference; existence is not checked
    pub category_id: String,
    /// Where the money was spent
    pub merchant: Option<String>,
    /// Free-form note
    pub note: Option<String>,
    /// Expense date, expected as YYYY-MM-DD but stored verbatim
    pub date: String,
}

impl Expense {
    /// Merchant name for display; blank merchants count as unknown
    pub fn merchant_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.merchant
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    }
}

/// An expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Payload for creating an expense
///
/// Every field is optional at the deserialization layer so a request with
/// missing fields can be answered with one message listing the requirements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category_id: Option<String>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
}

impl NewExpense {
    /// Names of required fields that are absent
    pub fn missing_fields(&self) -> Vec<String> {
        let present = [
            self.amount.is_some(),
            self.currency.is_some(),
            self.category_id.is_some(),
            self.date.is_some(),
        ];
        REQUIRED_EXPENSE_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Turn the payload into a record with the given id
    pub fn into_expense(self, id: String) -> CoreResult<Expense> {
        let missing = self.missing_fields();
        match self {
            NewExpense {
                amount: Some(amount),
                currency: Some(currency),
                category_id: Some(category_id),
                merchant,
                note,
                date: Some(date),
            } => Ok(Expense {
                id,
                amount,
                currency,
                category_id,
                merchant,
                note,
                date,
            }),
            _ => Err(CoreError::MissingFields { fields: missing }),
        }
    }
}

/// Partial update for an existing expense
///
/// Absent fields keep their current value. For `merchant` and `note` an
/// explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub merchant: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub note: Option<Option<String>>,
    pub date: Option<String>,
}

impl ExpenseUpdate {
    /// Merge this update into `expense`
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(currency) = self.currency {
            expense.currency = currency;
        }
        if let Some(category_id) = self.category_id {
            expense.category_id = category_id;
        }
        if let Some(merchant) = self.merchant {
            expense.merchant = merchant;
        }
        if let Some(note) = self.note {
            expense.note = note;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}

// A present key (even `null`) becomes `Some(..)`; `#[serde(default)]` covers absence.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
