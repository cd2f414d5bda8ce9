//! Timing for the in-memory stages and for resampling.
//!
//! Run with `cargo bench --bench pipeline_benchmark`.

use ndarray::Array1;
use sample_tools::operations::{CompressionPreset, MonoChannel};
use sample_tools::pipeline::{Pipeline, PipelineConfig};
use sample_tools::resampling::resample;
use sample_tools::AudioBuffer;
use std::time::{Duration, Instant};

/// Generate a stereo sine test signal
fn generate_test_audio(duration_seconds: f64, sample_rate: f64) -> AudioBuffer {
    let frames = (duration_seconds * sample_rate) as usize;
    let tone = |freq: f64| {
        Array1::from_iter((0..frames).map(|i| {
            let t = i as f64 / sample_rate;
            ((2.0 * std::f64::consts::PI * freq * t).sin() * 0.5) as f32
        }))
    };
    AudioBuffer::new_stereo(tone(440.0), tone(660.0), sample_rate)
        .expect("valid benchmark signal")
}

fn time_runs<F: FnMut()>(runs: usize, mut f: F) -> (Duration, Duration) {
    // Warm up
    for _ in 0..3 {
        f();
    }
    let mut times = Vec::with_capacity(runs);
    for _ in 0..runs {
        let start = Instant::now();
        f();
        times.push(start.elapsed());
    }
    let avg = times.iter().sum::<Duration>() / runs as u32;
    let min = times.iter().min().copied().unwrap_or_default();
    (avg, min)
}

fn benchmark_stages(duration: f64, label: &str) {
    let audio = generate_test_audio(duration, 44100.0);
    let pipeline = Pipeline::new(PipelineConfig {
        mono: Some(MonoChannel::Left),
        concatenate: true,
        compress: Some(CompressionPreset::Hard),
        normalize: true,
        reverse: true,
        ..PipelineConfig::default()
    })
    .expect("valid config");

    let (avg, min) = time_runs(10, || {
        let out = pipeline
            .process_buffers(vec![audio.clone(), audio.clone()])
            .expect("pipeline run");
        std::hint::black_box(out);
    });
    println!(
        "  stages   {label:>6} ({:.1}s x2): avg {avg:>10.2?}  min {min:>10.2?}",
        duration
    );
}

fn benchmark_resample(duration: f64, label: &str) {
    let audio = generate_test_audio(duration, 44100.0);
    let (avg, min) = time_runs(5, || {
        let out = resample(&audio, 48000.0).expect("resample");
        std::hint::black_box(out);
    });
    println!(
        "  resample {label:>6} ({:.1}s, 44.1k->48k): avg {avg:>10.2?}  min {min:>10.2?}",
        duration
    );
}

fn main() {
    println!("Pipeline benchmark");
    for (duration, label) in [(0.5, "short"), (5.0, "medium"), (30.0, "long")] {
        benchmark_stages(duration, label);
        benchmark_resample(duration, label);
    }
}
