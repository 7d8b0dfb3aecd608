//! Expense categories
//!
//! Categories come from a closed table of integer ids shared with the mobile
//! app. Ids outside the table are tolerated and displayed as "Unknown".

use std::fmt;

/// Label used for any category id outside the table
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// An expense category from the fixed table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Hospital,
    Investment,
    Rent,
    Bill,
    Education,
    Transport,
    Entertainment,
    Utilities,
    Grocery,
    Travel,
    Insurance,
    Shopping,
    Loan,
    Miscellaneous,
    CreditCardBill,
}

/// Ordered by id, starting at 1
const CATEGORY_TABLE: [Category; 16] = [
    Category::Food,
    Category::Hospital,
    Category::Investment,
    Category::Rent,
    Category::Bill,
    Category::Education,
    Category::Transport,
    Category::Entertainment,
    Category::Utilities,
    Category::Grocery,
    Category::Travel,
    Category::Insurance,
    Category::Shopping,
    Category::Loan,
    Category::Miscellaneous,
    Category::CreditCardBill,
];

impl Category {
    /// Get all categories in id order
    pub fn all() -> &'static [Self] {
        &CATEGORY_TABLE
    }

    /// Look up a category by its id
    pub fn from_id(id: i64) -> Option<Self> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        CATEGORY_TABLE.get(index).copied()
    }

    /// The numeric id stored on expense records
    pub fn id(&self) -> i64 {
        CATEGORY_TABLE
            .iter()
            .position(|c| c == self)
            .map(|i| i as i64 + 1)
            .unwrap_or_default()
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Hospital => "Hospital",
            Self::Investment => "Investment",
            Self::Rent => "Rent",
            Self::Bill => "Bill",
            Self::Education => "Education",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Grocery => "Grocery",
            Self::Travel => "Travel",
            Self::Insurance => "Insurance",
            Self::Shopping => "Shopping",
            Self::Loan => "Loan",
            Self::Miscellaneous => "Miscellaneous",
            Self::CreditCardBill => "Credit Card Bill",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label for a raw category id, falling back to [`UNKNOWN_CATEGORY`]
pub fn category_label(id: i64) -> &'static str {
    Category::from_id(id)
        .map(|c| c.label())
        .unwrap_or(UNKNOWN_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "Food")]
    #[case(2, "Hospital")]
    #[case(3, "Investment")]
    #[case(9, "Utilities")]
    #[case(15, "Miscellaneous")]
    #[case(16, "Credit Card Bill")]
    fn test_known_labels(#[case] id: i64, #[case] label: &str) {
        assert_eq!(category_label(id), label);
    }

    #[rstest]
    #[case(0)]
    #[case(17)]
    #[case(-1)]
    #[case(999)]
    #[case(i64::MIN)]
    #[case(i64::MAX)]
    fn test_unknown_ids(#[case] id: i64) {
        assert_eq!(category_label(id), UNKNOWN_CATEGORY);
        assert!(Category::from_id(id).is_none());
    }

    #[test]
    fn test_ids_round_trip_through_table() {
        assert_eq!(Category::all().len(), 16);
        for category in Category::all() {
            assert_eq!(Category::from_id(category.id()), Some(*category));
        }
    }
}
