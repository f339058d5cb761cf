//! Performance benchmarks for the payroll engine.
//!
//! Covers the bare pipeline, batches of mixed inputs, scaling with the
//! number of brackets an income reaches, and a full HTTP round trip.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::calculate_net_pay;
use payroll_engine::config::{ConfigLoader, RateTable};
use payroll_engine::models::{FilingStatus, PayFrequency, PayInput, PayType};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_rate_table() -> RateTable {
    ConfigLoader::load("./config/us_2024")
        .expect("Failed to load config")
        .into_rate_table()
}

fn salary_input(annual_salary: i64, pay_frequency: PayFrequency) -> PayInput {
    PayInput {
        pay_type: PayType::Salary {
            annual_salary: Decimal::from(annual_salary),
        },
        pay_frequency,
        filing_status: FilingStatus::Single,
        pre_tax_deductions: Decimal::ZERO,
        post_tax_deductions: Decimal::ZERO,
        local_tax_rate: Decimal::ZERO,
    }
}

/// Creates a mix of hourly and salaried inputs across every frequency.
fn create_batch(size: usize) -> Vec<PayInput> {
    (0..size)
        .map(|i| {
            let pay_frequency = PayFrequency::ALL[i % PayFrequency::ALL.len()];
            let pay_type = if i % 2 == 0 {
                PayType::Hourly {
                    hourly_rate: Decimal::new(2000 + (i as i64 % 50) * 100, 2),
                    regular_hours: Decimal::from(40),
                    overtime_hours: Decimal::from(i as i64 % 6),
                }
            } else {
                PayType::Salary {
                    annual_salary: Decimal::from(40_000 + (i as i64 % 40) * 5_000),
                }
            };
            PayInput {
                pay_type,
                pay_frequency,
                filing_status: FilingStatus::ALL[i % 2],
                pre_tax_deductions: Decimal::new((i as i64 % 10) * 2500, 2),
                post_tax_deductions: Decimal::new((i as i64 % 5) * 1000, 2),
                local_tax_rate: Decimal::new(i as i64 % 3, 2),
            }
        })
        .collect()
}

/// Benchmark: one pipeline run.
fn bench_single_calculation(c: &mut Criterion) {
    let table = load_rate_table();
    let input = salary_input(78_000, PayFrequency::Weekly);

    c.bench_function("single_calculation", |b| {
        b.iter(|| black_box(calculate_net_pay(black_box(&input), &table)))
    });
}

/// Benchmark: batches of mixed inputs against one shared table.
fn bench_batches(c: &mut Criterion) {
    let table = load_rate_table();
    let mut group = c.benchmark_group("batch_processing");

    for size in [100usize, 1000] {
        let inputs = create_batch(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("inputs", size), &inputs, |b, inputs| {
            b.iter(|| {
                let results: Vec<_> = inputs
                    .iter()
                    .map(|input| calculate_net_pay(input, &table))
                    .collect();
                black_box(results)
            })
        });
    }

    group.finish();
}

/// Benchmark: salaries that reach progressively more brackets.
fn bench_bracket_scaling(c: &mut Criterion) {
    let table = load_rate_table();
    let mut group = c.benchmark_group("bracket_scaling");

    for salary in [20_000i64, 60_000, 120_000, 250_000, 800_000] {
        let input = salary_input(salary, PayFrequency::Annually);
        group.bench_with_input(BenchmarkId::new("salary", salary), &input, |b, input| {
            b.iter(|| black_box(calculate_net_pay(input, &table)))
        });
    }

    group.finish();
}

/// Benchmark: a JSON request through the router.
fn bench_http_round_trip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_rate_table()));
    let body = serde_json::json!({
        "pay_type": { "type": "hourly", "hourly_rate": "20", "regular_hours": "40", "overtime_hours": "5" },
        "pay_frequency": "weekly",
        "filing_status": "single",
        "local_tax_percent": "1"
    })
    .to_string();

    c.bench_function("http_round_trip", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_batches,
    bench_bracket_scaling,
    bench_http_round_trip,
);
criterion_main!(benches);
