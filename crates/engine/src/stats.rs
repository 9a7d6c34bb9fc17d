//! Pure aggregation over in-memory transaction lists.
//!
//! Everything here is deterministic, does no I/O and never mutates its
//! input; the server's `/stats` endpoint and client-side charts both feed
//! from these functions.

use serde::Serialize;

/// Anything with a grouping label and an amount.
///
/// Expenses group by `category`, incomes by `source`.
pub trait Categorized {
    fn label(&self) -> &str;
    fn amount(&self) -> f64;
}

/// Summed amount for one label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Group items by label, summing amounts.
///
/// Labels keep the insertion order of their first occurrence so chart
/// rendering stays stable across refreshes. Labels absent from the input do
/// not appear in the output.
pub fn group_by_category<T: Categorized>(items: &[T]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|t| t.category == item.label()) {
            Some(entry) => entry.total += item.amount(),
            None => totals.push(CategoryTotal {
                category: item.label().to_string(),
                total: item.amount(),
            }),
        }
    }
    totals
}

/// Sum of all amounts; 0 for an empty list.
pub fn total_amount<T: Categorized>(items: &[T]) -> f64 {
    items.iter().map(Categorized::amount).sum()
}

/// `part / total * 100`, defined as 0 when `total` is 0.
pub fn percentage_of_total(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    part / total * 100.0
}

/// A category total together with its share of the overall total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    pub percentage: f64,
}

/// Derived figures for one owner's transaction stream.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_expenses: f64,
    pub total_income: f64,
    pub net: f64,
    pub categories: Vec<CategoryShare>,
}

/// Fold expense and income lists into the figures charts and reports need.
pub fn summary(expenses: &[crate::Expense], incomes: &[crate::Income]) -> Summary {
    let total_expenses = total_amount(expenses);
    let total_income = total_amount(incomes);

    let categories = group_by_category(expenses)
        .into_iter()
        .map(|entry| CategoryShare {
            percentage: percentage_of_total(entry.total, total_expenses),
            category: entry.category,
            total: entry.total,
        })
        .collect();

    Summary {
        total_expenses,
        total_income,
        net: total_income - total_expenses,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, f64);

    impl Categorized for Item {
        fn label(&self) -> &str {
            self.0
        }

        fn amount(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn groups_by_first_occurrence_order() {
        let items = [Item("Food", 10.0), Item("Food", 5.0), Item("Transport", 3.0)];
        let grouped = group_by_category(&items);
        assert_eq!(
            grouped,
            vec![
                CategoryTotal {
                    category: "Food".to_string(),
                    total: 15.0
                },
                CategoryTotal {
                    category: "Transport".to_string(),
                    total: 3.0
                },
            ]
        );
    }

    #[test]
    fn no_zero_filling_for_absent_categories() {
        let grouped = group_by_category(&[Item("Rent", 700.0)]);
        assert_eq!(grouped.len(), 1);
    }

    #[test]
    fn empty_list_totals_zero() {
        let items: [Item; 0] = [];
        assert_eq!(total_amount(&items), 0.0);
        assert!(group_by_category(&items).is_empty());
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage_of_total(15.0, 0.0), 0.0);
    }

    #[test]
    fn percentage_is_share_of_total() {
        assert_eq!(percentage_of_total(15.0, 60.0), 25.0);
    }
}
