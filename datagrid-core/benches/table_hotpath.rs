use criterion::{criterion_group, criterion_main, Criterion};
use datagrid_core::{
    ColumnDescriptor, ConditionFilter, DataTable, FilterConfig, FilterValue, OptionItem, Record,
    TableOptions,
};
use std::hint::black_box;

const REGIONS: [&str; 4] = ["us-west-1", "us-east-2", "eu-west-1", "eu-central-1"];

fn descriptors() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::text("owner", "Owner")
            .sortable(true)
            .filters(FilterConfig::text()),
        ColumnDescriptor::text("region", "Region")
            .options(REGIONS.iter().map(|r| OptionItem::new(*r, *r)))
            .filters(FilterConfig::checkbox()),
        ColumnDescriptor::number("costs", "Costs")
            .sortable(true)
            .filters(FilterConfig::number()),
    ]
}

fn rows(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            Record::new()
                .with("owner", format!("owner-{:05}", (i * 7919) % n))
                .with("region", REGIONS[i % REGIONS.len()])
                .with("costs", ((i * 31) % 5_000) as f64 + 0.25)
        })
        .collect()
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let mut table =
        DataTable::new(&descriptors(), rows(10_000), TableOptions::default()).expect("build table");

    c.bench_function("table/number_filter_10k", |b| {
        b.iter(|| {
            table
                .set_filter(
                    "costs",
                    FilterValue::Condition(ConditionFilter::between(1_000.0, 2_500.0)),
                )
                .expect("set filter");
            black_box(table.filtered_len());
            table.reset_filters();
        });
    });

    c.bench_function("table/sort_cycle_10k", |b| {
        b.iter(|| {
            for _ in 0..3 {
                table.toggle_sort("owner").expect("toggle sort");
            }
            black_box(table.page_rows().len());
        });
    });
}

fn bench_csv_export(c: &mut Criterion) {
    let table =
        DataTable::new(&descriptors(), rows(2_000), TableOptions::default()).expect("build table");

    c.bench_function("csv/export_2k", |b| {
        b.iter(|| black_box(datagrid_core::to_csv(&table).len()));
    });
}

criterion_group!(benches, bench_filter_and_sort, bench_csv_export);
criterion_main!(benches);
