use serde::Serialize;

use larder_core::{DomainError, DomainResult};

/// One line of an item-wise sales export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesLine {
    pub category: String,
    pub item_name: String,
    pub quantity: String,
    pub total_amount: f64,
}

/// A labelled value, one wedge of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Sales of one category, ready to be charted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub slices: Vec<PieSlice>,
}

impl CategoryBreakdown {
    pub fn title(&self) -> String {
        format!("{} SALES", self.category.to_uppercase())
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

impl SalesLine {
    /// Build a line from raw cells. Returns `Ok(None)` for rows without a category
    /// (sub-total and banner rows in the export).
    pub fn from_cells(category: &str, item_name: &str, quantity: &str, total_amount: &str) -> DomainResult<Option<Self>> {
        let category = category.trim();
        if category.is_empty() {
            return Ok(None);
        }
        let total_amount = total_amount.trim().replace(',', "").parse::<f64>().map_err(|_| {
            DomainError::validation(format!(
                "item '{}' has a non-numeric total amount '{}'",
                item_name.trim(),
                total_amount.trim()
            ))
        })?;
        Ok(Some(Self {
            category: category.to_string(),
            item_name: item_name.trim().to_string(),
            quantity: quantity.trim().to_string(),
            total_amount,
        }))
    }

    /// Chart label: `"<item> - (<qty>)"`.
    pub fn label(&self) -> String {
        format!("{} - ({})", self.item_name, self.quantity)
    }
}

/// Group sales lines per category, keeping categories in first-seen order.
pub fn sales_by_category(lines: &[SalesLine]) -> Vec<CategoryBreakdown> {
    let mut breakdowns: Vec<CategoryBreakdown> = Vec::new();
    for line in lines {
        let slice = PieSlice {
            label: line.label(),
            value: line.total_amount,
        };
        match breakdowns.iter_mut().find(|b| b.category == line.category) {
            Some(existing) => existing.slices.push(slice),
            None => breakdowns.push(CategoryBreakdown {
                category: line.category.clone(),
                slices: vec![slice],
            }),
        }
    }
    breakdowns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(category: &str, item: &str, qty: &str, amount: &str) -> SalesLine {
        SalesLine::from_cells(category, item, qty, amount).unwrap().unwrap()
    }

    #[test]
    fn rows_without_category_are_skipped() {
        assert_eq!(SalesLine::from_cells("  ", "Total", "", "999").unwrap(), None);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        assert!(SalesLine::from_cells("Food", "Burger", "1", "abc").is_err());
    }

    #[test]
    fn amounts_with_thousands_separators_parse() {
        assert_eq!(line("Food", "Thali", "10", "1,250.50").total_amount, 1250.5);
    }

    #[test]
    fn groups_by_category_in_first_seen_order() {
        let lines = vec![
            line("Burgers", "Veg Burger", "3", "300"),
            line("Drinks", "Coke", "5", "200"),
            line("Burgers", "Chicken Burger", "1", "150"),
        ];
        let groups = sales_by_category(&lines);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Burgers");
        assert_eq!(groups[0].title(), "BURGERS SALES");
        assert_eq!(groups[0].slices[0].label, "Veg Burger - (3)");
        assert_eq!(groups[0].total(), 450.0);
        assert_eq!(groups[1].slices.len(), 1);
    }
}
