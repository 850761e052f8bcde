//! Decode throughput benchmark.
//!
//! Measures how fast captured pulse trains are validated and decoded, for
//! regression testing during development. Rejected captures are timed too,
//! since most traffic on a shared 433 MHz receiver is not Acu-Rite.
//!
//! Usage:
//!   cargo run --release --bin bench          # Run with default 10000 iterations
//!   cargo run --release --bin bench -- 1000  # Run with custom iteration count

#![allow(clippy::cast_precision_loss)]

use std::env;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use acurite::{parse_pulse_list, AcuriteDecoder, CalibrationStore, ChecksumMode, DecoderConfig};

const DEFAULT_ITERATIONS: usize = 10_000;

struct BenchConfig {
    name: &'static str,
    path: &'static str,
    checksum: ChecksumMode,
}

const BENCHMARKS: &[BenchConfig] = &[
    BenchConfig {
        name: "fridge",
        path: "test-vectors/captures/fridge-38f.txt",
        checksum: ChecksumMode::Ignore,
    },
    BenchConfig {
        name: "fridge+crc",
        path: "test-vectors/captures/fridge-38f.txt",
        checksum: ChecksumMode::Enforce,
    },
    BenchConfig {
        name: "short-frame",
        path: "test-vectors/captures/short-frame-20f.txt",
        checksum: ChecksumMode::Ignore,
    },
];

fn bench_decode(config: &BenchConfig, iterations: usize) {
    let Ok(text) = fs::read_to_string(Path::new(config.path)) else {
        println!("{:<20} SKIP (file not found)", config.name);
        return;
    };
    let Ok(raw) = parse_pulse_list(&text) else {
        println!("{:<20} SKIP (unreadable capture)", config.name);
        return;
    };

    let calibration = CalibrationStore::new();
    calibration.register(22352.0, -0.5);
    let decoder_config = DecoderConfig {
        checksum: config.checksum,
        ..DecoderConfig::default()
    };
    let Ok(decoder) = AcuriteDecoder::new(decoder_config, calibration) else {
        println!("{:<20} SKIP (invalid configuration)", config.name);
        return;
    };

    // Warmup run
    let outcome = decoder.decode(&raw);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(decoder.decode(black_box(&raw)));
    }

    let elapsed = start.elapsed();
    let total_ns = elapsed.as_secs_f64() * 1_000_000_000.0;
    let per_frame_ns = total_ns / iterations as f64;
    let frames_per_sec = 1_000_000_000.0 / per_frame_ns;

    println!(
        "{:<20} {:>10.1} ns/frame  {:>12.0} frames/s  ({} samples, {})",
        config.name,
        per_frame_ns,
        frames_per_sec,
        raw.len(),
        if outcome.is_ok() { "decoded" } else { "rejected" }
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let iterations = if args.len() >= 2 {
        args[1].parse().unwrap_or(DEFAULT_ITERATIONS)
    } else {
        DEFAULT_ITERATIONS
    };

    println!("Acu-Rite Decode Benchmarks");
    println!("==========================");
    println!("Iterations: {iterations}\n");

    println!(
        "{:<20} {:>18}  {:>18}  Capture",
        "Test", "Time", "Throughput"
    );
    println!(
        "{:<20} {:>18}  {:>18}  -------",
        "----", "----", "----------"
    );

    for config in BENCHMARKS {
        bench_decode(config, iterations);
    }

    println!("\nNote: Desktop performance differs from receiver hardware.");
    println!("Use these results for relative comparisons only.");
}
