use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use larder_orders::{OrderListing, OrderRow, OrderType};

use crate::tabular::{Table, TabularError, read_table};

/// Columns of the point-of-sale order listing (input and processed report).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderColumn {
    Items,
    OrderType,
    Created,
    PackagingUsed,
    StockUsed,
}

impl OrderColumn {
    pub fn header(&self) -> &'static str {
        match self {
            OrderColumn::Items => "Items",
            OrderColumn::OrderType => "Order Type",
            OrderColumn::Created => "Created",
            OrderColumn::PackagingUsed => "Packaging_Used",
            OrderColumn::StockUsed => "Stock_Used",
        }
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parse a `Created` cell. Plain dates are taken at midnight.
pub fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Load an order export, skipping `skip_rows` banner rows.
pub fn load_order_listing(path: &Path, skip_rows: usize) -> Result<OrderListing, TabularError> {
    let table = read_table(path, skip_rows)?;
    let listing = listing_from_table(table)?;
    tracing::info!(path = %path.display(), orders = listing.rows.len(), "loaded order listing");
    Ok(listing)
}

pub fn listing_from_table(table: Table) -> Result<OrderListing, TabularError> {
    let items = table.column(OrderColumn::Items.header())?;
    let order_type = table.column(OrderColumn::OrderType.header())?;
    let created = table.column(OrderColumn::Created.header())?;

    let mut rows = Vec::with_capacity(table.rows.len());
    for (idx, fields) in table.rows.into_iter().enumerate() {
        let line = idx + 1;
        let created_at = parse_created_at(&fields[created]).ok_or_else(|| TabularError::InvalidCell {
            path: table.path.clone(),
            line,
            column: OrderColumn::Created.header().to_string(),
            value: fields[created].clone(),
        })?;
        let row = OrderRow::new(line, OrderType::parse(&fields[order_type]), &fields[items], created_at)
            .with_fields(fields);
        rows.push(row);
    }

    Ok(OrderListing::new(table.headers, rows))
}
