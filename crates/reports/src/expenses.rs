use std::collections::BTreeMap;

use serde::Serialize;

use larder_core::{DomainError, DomainResult};

/// One line of an expense report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseLine {
    pub category: String,
    pub paid_by: String,
    pub amount: f64,
}

impl ExpenseLine {
    /// Categories are normalised (trimmed, lower-cased) so that "Gas " and "gas" group together.
    pub fn from_cells(category: &str, paid_by: &str, amount: &str) -> DomainResult<Self> {
        let amount = amount.trim().replace(',', "").parse::<f64>().map_err(|_| {
            DomainError::validation(format!("expense amount '{}' is not a number", amount.trim()))
        })?;
        Ok(Self {
            category: category.trim().to_lowercase(),
            paid_by: paid_by.trim().to_string(),
            amount,
        })
    }
}

/// Expense totals by category and by payer.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExpenseSummary {
    pub by_category: BTreeMap<String, f64>,
    pub by_payer: BTreeMap<String, f64>,
}

impl ExpenseSummary {
    pub fn summarize(lines: &[ExpenseLine]) -> Self {
        let mut summary = Self::default();
        for line in lines {
            *summary.by_category.entry(line.category.clone()).or_insert(0.0) += line.amount;
            *summary.by_payer.entry(line.paid_by.clone()).or_insert(0.0) += line.amount;
        }
        summary
    }
}

impl core::fmt::Display for ExpenseSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Category Wise Expenses")?;
        for (category, total) in &self.by_category {
            writeln!(f, "{category:<24} {total:>12.2}")?;
        }
        writeln!(f, "Paid By Expenses")?;
        for (payer, total) in &self.by_payer {
            writeln!(f, "{payer:<24} {total:>12.2}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_normalised_before_grouping() {
        let lines = vec![
            ExpenseLine::from_cells("Gas ", "Asha", "500").unwrap(),
            ExpenseLine::from_cells("gas", "Ravi", "250.5").unwrap(),
            ExpenseLine::from_cells("Vegetables", "Asha", "1,000").unwrap(),
        ];
        let summary = ExpenseSummary::summarize(&lines);

        assert_eq!(summary.by_category["gas"], 750.5);
        assert_eq!(summary.by_category["vegetables"], 1000.0);
        assert_eq!(summary.by_payer["Asha"], 1500.0);
        assert_eq!(summary.by_payer["Ravi"], 250.5);
    }

    #[test]
    fn bad_amount_is_a_validation_error() {
        let err = ExpenseLine::from_cells("gas", "Asha", "five hundred").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn display_prints_both_tables() {
        let summary = ExpenseSummary::summarize(&[ExpenseLine::from_cells("gas", "Asha", "10").unwrap()]);
        let text = summary.to_string();
        assert!(text.starts_with("Category Wise Expenses\n"));
        assert!(text.contains("Paid By Expenses\n"));
        assert!(text.contains("Asha"));
    }
}
