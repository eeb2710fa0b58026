//! Processed-order report: the original export plus the materials each order used.

use std::path::{Path, PathBuf};

use larder_core::{MaterialCode, MaterialKind};
use larder_orders::ProcessedOrder;

use crate::reconcile::ReconciliationReport;
use crate::sources::OrderColumn;
use crate::tabular::{TabularError, write_table};

fn join_codes(codes: &[MaterialCode]) -> String {
    codes.iter().map(MaterialCode::as_str).collect::<Vec<_>>().join(",")
}

/// `{dir}/{kind}/PP_Order_list_{DD_MM_YYYY}.csv`
pub fn report_path(dir: &Path, kind: MaterialKind, orders_latest_date: &str) -> PathBuf {
    dir.join(kind.as_str())
        .join(format!("PP_Order_list_{orders_latest_date}.csv"))
}

fn report_row(order: &ProcessedOrder, width: usize, kind: MaterialKind) -> Vec<String> {
    let mut row = order.order.fields.clone();
    row.resize(width, String::new());
    row.push(match kind {
        MaterialKind::Packaging => join_codes(&order.packaging_used),
        MaterialKind::Stock => join_codes(&order.stock_used),
    });
    row
}

/// Write the report for a completed run and return its path.
pub fn write_processed_orders(report: &ReconciliationReport, dir: &Path) -> Result<PathBuf, TabularError> {
    let path = report_path(dir, report.kind, &report.orders_latest_date);

    let mut headers = report.headers.clone();
    headers.push(
        match report.kind {
            MaterialKind::Packaging => OrderColumn::PackagingUsed,
            MaterialKind::Stock => OrderColumn::StockUsed,
        }
        .header()
        .to_string(),
    );

    let width = report.headers.len();
    let rows: Vec<Vec<String>> = report
        .orders
        .iter()
        .map(|order| report_row(order, width, report.kind))
        .collect();

    write_table(&path, &headers, &rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote processed order report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use larder_orders::{OrderRow, OrderType};

    #[test]
    fn report_path_is_keyed_by_kind_and_date() {
        assert_eq!(
            report_path(Path::new("data/processedOrders"), MaterialKind::Stock, "09_03_2024"),
            PathBuf::from("data/processedOrders/stock/PP_Order_list_09_03_2024.csv")
        );
    }

    #[test]
    fn row_appends_joined_codes_after_original_cells() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let order = ProcessedOrder::untouched(
            OrderRow::new(1, OrderType::Delivery, "Thali", created)
                .with_fields(vec!["Thali".into(), "Delivery".into(), "2024-03-09".into()]),
        )
        .with_packaging(MaterialCode::parse_list("TRAY,BAG"));

        assert_eq!(
            report_row(&order, 3, MaterialKind::Packaging),
            vec!["Thali", "Delivery", "2024-03-09", "TRAY,BAG"]
        );
        assert_eq!(report_row(&order, 3, MaterialKind::Stock)[3], "");
    }
}
