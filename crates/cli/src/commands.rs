//! Command handlers. Each one loads its inputs, runs the domain step, and writes outputs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;

use larder_core::MaterialKind;
use larder_infra::chart::{PieChartRenderer, SvgPieChart};
use larder_infra::config::AppConfig;
use larder_infra::ledger_store::FileLedgerStore;
use larder_infra::reconcile::{Reconciler, ReconciliationReport};
use larder_infra::report::write_processed_orders;
use larder_infra::sources::{load_catalog, load_expenses, load_order_listing, load_sales_lines};
use larder_reports::{ExpenseSummary, sales_by_category as breakdown};

fn reconciler(config: &AppConfig, kind: MaterialKind) -> anyhow::Result<Reconciler<FileLedgerStore>> {
    let path = config.catalog_path(kind);
    let catalog = load_catalog(path, kind).with_context(|| format!("loading {kind} catalog"))?;
    let store = FileLedgerStore::new(config.ledger_store_config());
    Ok(Reconciler::new(catalog, store).with_untracked_policy(config.policy.untracked))
}

fn finish(config: &AppConfig, report: ReconciliationReport) -> anyhow::Result<ReconciliationReport> {
    write_processed_orders(&report, &config.reports.dir).context("writing processed order report")?;
    Ok(report)
}

pub fn track_packaging(config: &AppConfig, orders: &Path, today: NaiveDate) -> anyhow::Result<ReconciliationReport> {
    let listing = load_order_listing(orders, config.orders.skip_rows)
        .with_context(|| format!("reading orders from {}", orders.display()))?;
    let report = reconciler(config, MaterialKind::Packaging)?
        .run_packaging(listing, today)
        .context("packaging reconciliation failed")?;
    finish(config, report)
}

pub fn track_stock(config: &AppConfig, orders: &Path, today: NaiveDate) -> anyhow::Result<ReconciliationReport> {
    let listing = load_order_listing(orders, config.orders.skip_rows)
        .with_context(|| format!("reading orders from {}", orders.display()))?;
    let report = reconciler(config, MaterialKind::Stock)?
        .run_stock(listing, today)
        .context("stock reconciliation failed")?;
    finish(config, report)
}

/// Returns the chart files written, one per category.
pub fn sales_by_category(sales: &Path, output: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let lines = load_sales_lines(sales, 0).with_context(|| format!("reading sales from {}", sales.display()))?;
    let categories = breakdown(&lines);
    tracing::info!(categories = categories.len(), "grouped sales by category");

    let renderer = SvgPieChart::default();
    let mut written = Vec::with_capacity(categories.len());
    for category in &categories {
        let path = output.join(format!("Sales_By_Category_{}.svg", category.category));
        renderer
            .render(&category.title(), &category.slices, &path)
            .with_context(|| format!("drawing chart for '{}'", category.category))?;
        written.push(path);
    }
    Ok(written)
}

pub fn summarize_expenses(expenses: &Path) -> anyhow::Result<ExpenseSummary> {
    let lines = load_expenses(expenses).with_context(|| format!("reading expenses from {}", expenses.display()))?;
    Ok(ExpenseSummary::summarize(&lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(root: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.catalog.stock_path = root.join("stock_master.csv");
        config.ledger.root = root.join("stock");
        config.reports.dir = root.join("processed");
        config.orders.skip_rows = 0;
        config
    }

    #[test]
    fn track_stock_updates_ledger_and_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("stock_master.csv"),
            "Name,Online_Name,Stock,Category\nPaneer Roll,,\"PANEER,ROTI\",Rolls\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("stock")).unwrap();
        fs::write(
            root.join("stock/stock.json"),
            r#"[{"product_code":"PANEER","stock":10,"as_on":"01-03-2024"},{"product_code":"ROTI","stock":5,"as_on":"01-03-2024"}]"#,
        )
        .unwrap();
        fs::write(
            root.join("orders.csv"),
            "Items,Order Type,Created\n\"Paneer Roll, Paneer Roll\",Dine In,2024-03-09 12:00:00\n",
        )
        .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let report = track_stock(&config(root), &root.join("orders.csv"), today).unwrap();

        assert_eq!(report.to_string(), "Stock Used -\nPANEER : 2\nROTI : 2\n\nRemaining Stock.\nPANEER : 8\nROTI : 3\n");
        assert!(root.join("processed/stock/PP_Order_list_09_03_2024.csv").exists());
    }

    #[test]
    fn missing_catalog_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("orders.csv"), "Items,Order Type,Created\nTea,Dine In,2024-03-09\n").unwrap();

        let err = track_stock(&config(root), &root.join("orders.csv"), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
            .unwrap_err();
        assert!(format!("{err:#}").contains("loading stock catalog"));
    }

    #[test]
    fn sales_by_category_writes_one_chart_per_category() {
        let dir = tempfile::tempdir().unwrap();
        let sales = dir.path().join("sales.csv");
        fs::write(
            &sales,
            "Category,Item Name,Qty.,Total Amount\nBurgers,Veg Burger,3,300\nDrinks,Cola,2,\"1,20\"\n,Discount,1,-10\nBurgers,Paneer Burger,1,150\n",
        )
        .unwrap();

        let written = sales_by_category(&sales, &dir.path().join("charts")).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("charts/Sales_By_Category_Burgers.svg"),
                dir.path().join("charts/Sales_By_Category_Drinks.svg"),
            ]
        );
        let svg = fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("BURGERS SALES"));
        assert!(svg.contains("Veg Burger - (3)"));
    }

    #[test]
    fn summarize_expenses_groups_by_category_and_payer() {
        let dir = tempfile::tempdir().unwrap();
        let expenses = dir.path().join("expenses.csv");
        fs::write(
            &expenses,
            "Category,Expense,Paid By\nVegetables ,100,Asha\nvegetables,50,Ravi\nGas,200,Asha\n",
        )
        .unwrap();

        let summary = summarize_expenses(&expenses).unwrap();
        assert_eq!(summary.by_category["vegetables"], 150.0);
        assert_eq!(summary.by_payer["Asha"], 300.0);
    }
}
