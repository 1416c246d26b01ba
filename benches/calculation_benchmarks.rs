//! Performance benchmarks for the contractor billing engine.
//!
//! Covers the per-record calculation path, the working-hours calendar count
//! and report aggregation over growing record sets.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::str::FromStr;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use contractor_billing::calculation::{
    DEFAULT_WORKDAY_HOURS, build_monthly_report, calculate_billing_amounts,
    calculate_remuneration, count_working_hours,
};
use contractor_billing::config::{EngineConfig, RoundingConfig};
use contractor_billing::models::{BillingDraft, BillingRecord, ContractTerms, ContractType, Period};

fn create_terms(contract_type: ContractType) -> ContractTerms {
    ContractTerms::new(
        contract_type,
        Decimal::from_str("59.53").unwrap(),
        168,
        Decimal::from_str("1.5").unwrap(),
        true,
        Decimal::from_str("85.00").unwrap(),
    ).unwrap()
}

/// Builds `count` records for March 2023, cycling through the contract types.
fn create_records(count: usize) -> Vec<BillingRecord> {
    let config = EngineConfig::default();
    let period = Period::new(2023, 3).unwrap();
    let types = [ContractType::Employment, ContractType::Mandate, ContractType::B2b];

    (0..count)
        .map(|i| {
            let id = i as u32 + 1;
            let hours = Decimal::from(150 + (i % 40) as i64);
            BillingDraft::compute(id, period, hours, create_terms(types[i % 3]), &config)
                .unwrap()
                .into_record(id)
        })
        .collect()
}

fn bench_remuneration(c: &mut Criterion) {
    let rounding = RoundingConfig::default();
    let hours = Decimal::from(176);
    let mut group = c.benchmark_group("remuneration");

    for contract_type in [ContractType::Employment, ContractType::Mandate, ContractType::B2b] {
        let terms = create_terms(contract_type);
        group.bench_with_input(
            BenchmarkId::from_parameter(contract_type),
            &terms,
            |b, terms| b.iter(|| calculate_remuneration(black_box(hours), black_box(terms), &rounding, 1)),
        );
    }
    group.finish();
}

fn bench_billing_amounts(c: &mut Criterion) {
    let config = EngineConfig::default();
    let terms = create_terms(ContractType::Employment);

    c.bench_function("billing_amounts_employment_overtime", |b| {
        b.iter(|| calculate_billing_amounts(black_box(Decimal::from(176)), black_box(&terms), &config))
    });
}

fn bench_working_hours(c: &mut Criterion) {
    let period = Period::new(2023, 3).unwrap();

    c.bench_function("count_working_hours_month", |b| {
        b.iter(|| count_working_hours(black_box(period), DEFAULT_WORKDAY_HOURS))
    });
}

fn bench_monthly_report(c: &mut Criterion) {
    let period = Period::new(2023, 3).unwrap();
    let mut group = c.benchmark_group("monthly_report");

    for count in [10usize, 100, 1000] {
        let records = create_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| build_monthly_report(black_box(period), black_box(records), DEFAULT_WORKDAY_HOURS))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_remuneration,
    bench_billing_amounts,
    bench_working_hours,
    bench_monthly_report
);
criterion_main!(benches);
