use std::path::Path;

use larder_reports::{ExpenseLine, SalesLine};

use crate::tabular::{TabularError, read_table};

const CATEGORY: &str = "Category";
const ITEM_NAME: &str = "Item Name";
const QUANTITY: &str = "Qty.";
const TOTAL_AMOUNT: &str = "Total Amount";
const EXPENSE: &str = "Expense";
const PAID_BY: &str = "Paid By";

/// Load an item-wise sales export. Rows without a category are dropped.
pub fn load_sales_lines(path: &Path, skip_rows: usize) -> Result<Vec<SalesLine>, TabularError> {
    let table = read_table(path, skip_rows)?;
    let category = table.column(CATEGORY)?;
    let item = table.column(ITEM_NAME)?;
    let qty = table.column(QUANTITY)?;
    let amount = table.column(TOTAL_AMOUNT)?;

    let mut lines = Vec::new();
    for row in &table.rows {
        let line = SalesLine::from_cells(&row[category], &row[item], &row[qty], &row[amount])
            .map_err(|e| TabularError::invalid(path, e))?;
        lines.extend(line);
    }
    Ok(lines)
}

/// Load an expense report (`Category`, `Expense`, `Paid By`).
pub fn load_expenses(path: &Path) -> Result<Vec<ExpenseLine>, TabularError> {
    let table = read_table(path, 0)?;
    let category = table.column(CATEGORY)?;
    let expense = table.column(EXPENSE)?;
    let paid_by = table.column(PAID_BY)?;

    table
        .rows
        .iter()
        .map(|row| {
            ExpenseLine::from_cells(&row[category], &row[paid_by], &row[expense])
                .map_err(|e| TabularError::invalid(path, e))
        })
        .collect()
}
