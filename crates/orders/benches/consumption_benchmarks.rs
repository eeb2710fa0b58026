use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use larder_catalog::{Catalog, CatalogEntry, Category};
use larder_core::{MaterialCode, MaterialKind};
use larder_orders::{resolve, ConsumptionCounts, OrderRow, OrderType, ProcessedOrder};

fn catalog(size: usize) -> Catalog {
    let entries = (0..size)
        .map(|i| {
            let category = if i % 5 == 0 {
                Category::Drinks
            } else {
                Category::Other("Food".to_string())
            };
            CatalogEntry::new(format!("Item {i}"), category)
                .with_alias(format!("Item {i} [Online]"))
                .with_packaging(MaterialCode::parse_list(&format!("BOX_{},BAG", i % 7)))
                .with_stock(MaterialCode::parse_list(&format!("STOCK_{}", i % 3)))
        })
        .collect();
    Catalog::new(entries).expect("benchmark catalog is unique")
}

fn orders(count: usize, catalog_size: usize) -> Vec<OrderRow> {
    let created = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date");
    (0..count)
        .map(|i| {
            let items = format!(
                "Item {}, item {} [online], ITEM {}",
                i % catalog_size,
                (i * 3) % catalog_size,
                (i * 7) % catalog_size
            );
            OrderRow::new(i + 1, OrderType::Delivery, &items, created)
        })
        .collect()
}

fn bench_resolve_and_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_and_aggregate");
    let catalog = catalog(200);

    for count in [100usize, 1_000, 10_000] {
        let rows = orders(count, 200);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &rows, |b, rows| {
            b.iter(|| {
                let processed: Vec<ProcessedOrder> = rows
                    .iter()
                    .map(|row| {
                        let used = resolve(row, &catalog, MaterialKind::Packaging)
                            .expect("all benchmark items resolve");
                        ProcessedOrder::untouched(row.clone()).with_packaging(used)
                    })
                    .collect();
                black_box(ConsumptionCounts::from_orders(&processed, MaterialKind::Packaging))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_and_aggregate);
criterion_main!(benches);
