use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult, MaterialCode};

/// Order type as labelled in the point-of-sale export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    Delivery,
    TakeAway,
    DineIn,
    /// Any label the export uses that we do not know; treated like dine-in.
    Other(String),
}

impl OrderType {
    pub const DELIVERY_LABEL: &'static str = "Delivery";
    pub const TAKE_AWAY_LABEL: &'static str = "Take Away";
    pub const DINE_IN_LABEL: &'static str = "Dine In";

    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case(Self::DELIVERY_LABEL) {
            OrderType::Delivery
        } else if trimmed.eq_ignore_ascii_case(Self::TAKE_AWAY_LABEL) {
            OrderType::TakeAway
        } else if trimmed.eq_ignore_ascii_case(Self::DINE_IN_LABEL) {
            OrderType::DineIn
        } else {
            OrderType::Other(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderType::Delivery => Self::DELIVERY_LABEL,
            OrderType::TakeAway => Self::TAKE_AWAY_LABEL,
            OrderType::DineIn => Self::DINE_IN_LABEL,
            OrderType::Other(label) => label,
        }
    }

    /// Takeout orders (delivery and take away) are the only ones that consume packaging.
    pub fn is_takeout(&self) -> bool {
        matches!(self, OrderType::Delivery | OrderType::TakeAway)
    }
}

impl From<String> for OrderType {
    fn from(value: String) -> Self {
        OrderType::parse(&value)
    }
}

impl From<OrderType> for String {
    fn from(value: OrderType) -> Self {
        value.label().to_string()
    }
}

/// One order from the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    /// 1-based position of the row among the data rows of the export.
    pub line: usize,
    pub order_type: OrderType,
    /// Item names, trimmed, blanks removed, original casing kept.
    pub items: Vec<String>,
    pub created_at: NaiveDateTime,
    /// Every cell of the original row, aligned with [`OrderListing::headers`].
    pub fields: Vec<String>,
}

impl OrderRow {
    pub fn new(
        line: usize,
        order_type: OrderType,
        items_cell: &str,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            line,
            order_type,
            items: Self::split_items(items_cell),
            created_at,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Split the comma-separated `Items` cell.
    pub fn split_items(cell: &str) -> Vec<String> {
        cell.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// An order together with the materials it consumed.
///
/// Built by the resolver; rows are never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOrder {
    pub order: OrderRow,
    pub packaging_used: Vec<MaterialCode>,
    pub stock_used: Vec<MaterialCode>,
}

impl ProcessedOrder {
    /// An order that consumed nothing (e.g. dine-in for packaging accounting).
    pub fn untouched(order: OrderRow) -> Self {
        Self {
            order,
            packaging_used: Vec::new(),
            stock_used: Vec::new(),
        }
    }

    pub fn with_packaging(self, packaging_used: Vec<MaterialCode>) -> Self {
        Self {
            packaging_used,
            ..self
        }
    }

    pub fn with_stock(self, stock_used: Vec<MaterialCode>) -> Self {
        Self { stock_used, ..self }
    }
}

/// A full order export: header row plus parsed order rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderListing {
    pub headers: Vec<String>,
    pub rows: Vec<OrderRow>,
}

impl OrderListing {
    pub fn new(headers: Vec<String>, rows: Vec<OrderRow>) -> Self {
        Self { headers, rows }
    }

    pub fn latest_created_at(&self) -> Option<NaiveDateTime> {
        self.rows.iter().map(|row| row.created_at).max()
    }

    /// Date of the most recent order as `DD_MM_YYYY`, used to key history snapshots
    /// and report file names.
    pub fn latest_date_label(&self) -> DomainResult<String> {
        self.latest_created_at()
            .map(|ts| ts.format("%d_%m_%Y").to_string())
            .ok_or(DomainError::EmptyListing)
    }

    /// Split into `(dine_in, takeout)`, keeping relative order within each side.
    pub fn partition_takeout(self) -> (Vec<OrderRow>, Vec<OrderRow>) {
        let (takeout, dine_in): (Vec<_>, Vec<_>) = self
            .rows
            .into_iter()
            .partition(|row| row.order_type.is_takeout());
        (dine_in, takeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn order_type_labels_round_trip() {
        assert_eq!(OrderType::parse("take away"), OrderType::TakeAway);
        assert_eq!(OrderType::parse(" Delivery "), OrderType::Delivery);
        assert_eq!(OrderType::parse("Dine In"), OrderType::DineIn);
        assert_eq!(OrderType::parse("Pick Up"), OrderType::Other("Pick Up".into()));
        assert_eq!(OrderType::TakeAway.label(), "Take Away");
    }

    #[test]
    fn only_delivery_and_take_away_are_takeout() {
        assert!(OrderType::Delivery.is_takeout());
        assert!(OrderType::TakeAway.is_takeout());
        assert!(!OrderType::DineIn.is_takeout());
        assert!(!OrderType::Other("Pick Up".into()).is_takeout());
    }

    #[test]
    fn items_are_trimmed_and_blanks_dropped() {
        let items = OrderRow::split_items(" Veg Burger ,, Fries,  ");
        assert_eq!(items, vec!["Veg Burger".to_string(), "Fries".to_string()]);
    }

    #[test]
    fn latest_date_is_the_maximum_created_at() {
        let listing = OrderListing::new(
            vec![],
            vec![
                OrderRow::new(1, OrderType::DineIn, "Tea", at(5, 10)),
                OrderRow::new(2, OrderType::Delivery, "Tea", at(7, 9)),
                OrderRow::new(3, OrderType::DineIn, "Tea", at(6, 23)),
            ],
        );
        assert_eq!(listing.latest_date_label().unwrap(), "07_03_2024");
    }

    #[test]
    fn empty_listing_has_no_latest_date() {
        let listing = OrderListing::default();
        assert_eq!(listing.latest_date_label(), Err(DomainError::EmptyListing));
    }

    #[test]
    fn partition_keeps_relative_order() {
        let listing = OrderListing::new(
            vec![],
            vec![
                OrderRow::new(1, OrderType::Delivery, "A", at(1, 1)),
                OrderRow::new(2, OrderType::DineIn, "B", at(1, 2)),
                OrderRow::new(3, OrderType::TakeAway, "C", at(1, 3)),
                OrderRow::new(4, OrderType::Other("Pick Up".into()), "D", at(1, 4)),
            ],
        );
        let (dine_in, takeout) = listing.partition_takeout();
        let lines = |rows: &[OrderRow]| rows.iter().map(|r| r.line).collect::<Vec<_>>();
        assert_eq!(lines(&dine_in), vec![2, 4]);
        assert_eq!(lines(&takeout), vec![1, 3]);
    }
}
