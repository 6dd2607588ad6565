//! Input checks applied before a record is allowed into the ledger.

use gastos_domain::{Budget, Expense};

use crate::CoreError;

/// Rejects expenses with a negative or non-finite amount or an empty description.
pub fn validate_expense(expense: &Expense) -> Result<(), CoreError> {
    if !expense.amount.is_finite() || expense.amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "expense amount must be a non-negative number, got {}",
            expense.amount
        )));
    }
    if expense.description.trim().is_empty() {
        return Err(CoreError::Validation(
            "expense description must not be empty".into(),
        ));
    }
    Ok(())
}

/// Rejects budgets whose limit is not a positive finite number.
pub fn validate_budget(budget: &Budget) -> Result<(), CoreError> {
    if !budget.limit.is_finite() || budget.limit <= 0.0 {
        return Err(CoreError::Validation(format!(
            "budget limit must be greater than zero, got {}",
            budget.limit
        )));
    }
    Ok(())
}

/// Parses user-entered amount text such as `"12.50"` or `"12,50"`.
///
/// A comma is only read as the decimal separator when it is followed by one
/// or two digits and there is no dot. `"1,000"` is rejected.
pub fn parse_amount(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("amount is required".into()));
    }
    let invalid = || CoreError::Validation(format!("`{trimmed}` is not a valid amount"));
    let normalized = match trimmed.split_once(',') {
        None => trimmed.to_string(),
        Some((whole, cents)) => {
            let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
            if whole.is_empty()
                || !is_digits(whole)
                || !(1..=2).contains(&cents.len())
                || !is_digits(cents)
            {
                return Err(invalid());
            }
            format!("{whole}.{cents}")
        }
    };
    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
