//! Benchmark suite for the report pipeline
//!
//! Measures a full run (decode, finalise, aggregate, render) over
//! generated inputs of increasing size using the divan benchmarking
//! framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use settlement_reports::Pipeline;

const CURRENCIES: [&str; 5] = ["USD", "AED", "SAR", "GBP", "SGP"];
const DATES: [&str; 7] = [
    "01 Jan 2016",
    "02 Jan 2016",
    "03 Jan 2016",
    "04 Jan 2016",
    "05 Jan 2016",
    "06 Jan 2016",
    "07 Jan 2016",
];

fn main() {
    divan::main();
}

/// Tab-separated input with `rows` instructions spread over 50 entities
fn generate_input(rows: usize) -> String {
    let mut input = String::from(
        "Entity\tBuy/Sell\tAgreedFx\tCurrency\tInstructionDate\tSettlementDate\tUnits\tPrice per unit\n",
    );
    for i in 0..rows {
        input.push_str(&format!(
            "entity{}\t{}\t0.{:02}\t{}\t01 Jan 2016\t{}\t{}\t{}.{:02}\n",
            i % 50,
            if i % 2 == 0 { "B" } else { "S" },
            i % 99 + 1,
            CURRENCIES[i % CURRENCIES.len()],
            DATES[i % DATES.len()],
            i % 1000 + 1,
            i % 500,
            i % 100,
        ));
    }
    input
}

#[divan::bench(args = [100, 1_000, 100_000])]
fn pipeline(bencher: divan::Bencher, rows: usize) {
    let input = generate_input(rows);
    let pipeline = Pipeline::default();

    bencher.bench_local(|| {
        let mut output = Vec::new();
        pipeline
            .process(input.as_bytes(), &mut output)
            .expect("Processing failed");
        output
    });
}
