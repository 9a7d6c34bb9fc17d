//! Derived analytics over one owner's transaction stream.

use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};
use serde::Serialize;

use crate::{Expense, Income, ResultEngine, expenses, incomes, stats};

use super::{DateRange, Engine, require_owner};

/// Recent-activity digest handed to the challenge-suggestion assistant.
///
/// Capped so the prompt stays bounded no matter how much history a user has.
#[derive(Clone, Debug, Serialize)]
pub struct FinancialSummary {
    pub total_expenses: f64,
    pub total_income: f64,
    pub expense_categories: Vec<String>,
    pub frequent_expenses: Vec<Expense>,
    pub recent_incomes: Vec<Income>,
}

impl FinancialSummary {
    pub fn is_empty(&self) -> bool {
        self.frequent_expenses.is_empty() && self.recent_incomes.is_empty()
    }
}

const SUMMARY_EXPENSES: u64 = 100;
const SUMMARY_INCOMES: u64 = 50;
const FREQUENT_EXPENSES: usize = 5;
const RECENT_INCOMES: usize = 3;

impl Engine {
    /// Category totals, percentages and net balance for one owner, computed
    /// by the pure aggregation functions in [`crate::stats`].
    pub async fn stats(&self, user_id: Option<&str>, range: &DateRange) -> ResultEngine<stats::Summary> {
        let expenses = self.list_expenses(user_id, range).await?;
        let incomes = self.list_incomes(user_id, range).await?;
        Ok(stats::summary(&expenses, &incomes))
    }

    /// Digest of the owner's recent activity for challenge generation.
    pub async fn financial_summary(&self, user_id: &str) -> ResultEngine<FinancialSummary> {
        let owner = require_owner(Some(user_id))?;

        let expense_models = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(owner.as_str()))
            .order_by_desc(expenses::Column::Date)
            .limit(SUMMARY_EXPENSES)
            .all(&self.database)
            .await?;
        let income_models = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(owner.as_str()))
            .order_by_desc(incomes::Column::Date)
            .limit(SUMMARY_INCOMES)
            .all(&self.database)
            .await?;

        let recent_expenses: Vec<Expense> =
            expense_models.into_iter().map(Expense::from).collect();
        let recent_incomes: Vec<Income> = income_models.into_iter().map(Income::from).collect();

        let mut expense_categories: Vec<String> = Vec::new();
        for expense in &recent_expenses {
            if !expense_categories.contains(&expense.category) {
                expense_categories.push(expense.category.clone());
            }
        }

        Ok(FinancialSummary {
            total_expenses: stats::total_amount(&recent_expenses),
            total_income: stats::total_amount(&recent_incomes),
            expense_categories,
            frequent_expenses: recent_expenses
                .into_iter()
                .take(FREQUENT_EXPENSES)
                .collect(),
            recent_incomes: recent_incomes.into_iter().take(RECENT_INCOMES).collect(),
        })
    }
}
