//! Benchmarks for rotor machine operations.
//!
//! Measures machine assembly, single-keystroke throughput, and message
//! throughput across message lengths and wheel counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rotorcrypt::{Enigma, MachineConfig};

/// M3 daily key used across the benchmarks.
fn bench_config() -> MachineConfig {
    MachineConfig::new(["UKW_B", "I", "IV", "III"])
        .cables("AD CN ET FL GI JV KZ PU QY WX")
        .rotor_positions("*QWE")
        .ring_settings(vec![1, 16, 26, 8])
}

/// Benchmarks `Enigma::assemble()`, including registry lookups and
/// plugboard validation.
fn bench_assemble(c: &mut Criterion) {
    let config = bench_config();
    c.bench_function("assemble", |b| {
        b.iter(|| Enigma::assemble(black_box(&config)).unwrap());
    });
}

/// Benchmarks a single `press_key()`.
///
/// The machine is assembled once and keeps stepping between iterations,
/// so the double step and slow-rotor turnovers are hit naturally.
fn bench_press_key(c: &mut Criterion) {
    let mut enigma = Enigma::assemble(&bench_config()).unwrap();

    let mut group = c.benchmark_group("press_key");
    group.throughput(Throughput::Elements(1));
    group.bench_function("m3", |b| {
        b.iter(|| enigma.press_key(black_box('E')).unwrap());
    });
    group.finish();
}

/// Benchmarks `write()` across message lengths.
fn bench_write_lengths(c: &mut Criterion) {
    let lengths: &[usize] = &[16, 256, 4096];

    let mut group = c.benchmark_group("write_length");
    for &len in lengths {
        let text: String = "DASOBERKOMMANDODERWEHRMAQT"
            .chars()
            .cycle()
            .take(len)
            .collect();
        let mut enigma = Enigma::assemble(&bench_config()).unwrap();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| enigma.write(black_box(text)).unwrap());
        });
    }
    group.finish();
}

/// Compares three-rotor M3 against four-wheel M4 per keystroke.
fn bench_wheel_count(c: &mut Criterion) {
    let machines: &[(&str, &[&str])] = &[
        ("m3", &["UKW_B", "I", "II", "III"]),
        ("m4", &["UKW_B_THIN", "BETA", "I", "II", "III"]),
    ];

    let mut group = c.benchmark_group("wheel_count");
    group.throughput(Throughput::Elements(1));
    for &(label, names) in machines {
        let mut enigma = Enigma::from_names(names).unwrap();
        group.bench_function(label, |b| {
            b.iter(|| enigma.press_key(black_box('X')).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_assemble,
    bench_press_key,
    bench_write_lengths,
    bench_wheel_count,
);
criterion_main!(benches);
