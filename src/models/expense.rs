use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed set of expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Groceries,
    Rent,
    Utilities,
    Entertainment,
    Subscriptions,
    Healthcare,
    Office,
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Groceries => "Groceries",
            Self::Rent => "Rent",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Subscriptions => "Subscriptions",
            Self::Healthcare => "Healthcare",
            Self::Office => "Office",
            Self::Other => "Other",
        }
    }

    /// Parse a category name, case-insensitively. Unknown names are `None`
    /// so callers can decide between rejecting and defaulting.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "groceries" => Some(Self::Groceries),
            "rent" => Some(Self::Rent),
            "utilities" => Some(Self::Utilities),
            "entertainment" => Some(Self::Entertainment),
            "subscriptions" => Some(Self::Subscriptions),
            "healthcare" => Some(Self::Healthcare),
            "office" => Some(Self::Office),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Groceries,
            Self::Rent,
            Self::Utilities,
            Self::Entertainment,
            Self::Subscriptions,
            Self::Healthcare,
            Self::Office,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded expense. Created only by the add operation; never mutated
/// in place afterwards.
///
/// Field renames match the persisted wire format (`desc`, `created`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "desc")]
    pub description: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub category: Category,
    pub currency: String,
    /// RFC 3339 insertion timestamp. Audit/export only, never an
    /// aggregation key.
    #[serde(rename = "created")]
    pub created_at: String,
}

impl Expense {
    pub fn new(
        amount: Decimal,
        description: String,
        date: String,
        category: Category,
        currency: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            description,
            date,
            category,
            currency,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
