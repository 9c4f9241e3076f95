use datastruct::{
    array::StructArray,
    field::{float32, float64, uint16, uint32, uint64},
    record,
    schema::StructSchema,
    value::Record,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_schema() -> StructSchema {
    StructSchema::from_fields([
        ("age", uint16()),
        ("msAlive", uint32()),
        ("balance", float32()),
        ("moneySpentInEntireLife", float64()),
        ("timestamp", uint64()),
    ])
    .unwrap()
}

fn gen_records(count: usize) -> Vec<Record> {
    // Deterministic but non-trivial pattern
    (0..count)
        .map(|i| {
            record! {
                "age" => (i % 100) as u16,
                "msAlive" => (i * 31) as u32,
                "balance" => i as f32 * 0.5,
                "moneySpentInEntireLife" => i as f64 * 1.25,
                "timestamp" => 1_325_704_080_000u64 + i as u64,
            }
        })
        .collect()
}

fn bench_append(c: &mut Criterion) {
    for &count in &[100usize, 1_000, 10_000] {
        let records = gen_records(count);

        c.bench_function(&format!("append_{}_records", count), |b| {
            b.iter(|| {
                let mut list = StructArray::with_capacity(gen_schema(), 16).unwrap();
                for record in &records {
                    list.append(record).unwrap();
                }
                list
            })
        });
    }
}

fn bench_for_each(c: &mut Criterion) {
    for &count in &[100usize, 1_000, 10_000] {
        let mut list = StructArray::with_capacity(gen_schema(), count).unwrap();
        for record in gen_records(count) {
            list.append(&record).unwrap();
        }

        c.bench_function(&format!("for_each_{}_records", count), |b| {
            b.iter(|| {
                let mut sum = 0u64;
                list.for_each(|_, record| {
                    sum += record["msAlive"].as_u64().unwrap_or_default();
                })
                .unwrap();
                sum
            })
        });
    }
}

criterion_group!(benches, bench_append, bench_for_each);
criterion_main!(benches);
