//! Benchmark for beatmap parsing and saber map conversion.

use criterion::Criterion;
use osu2saber::osu::{OsuOutput, parse_osu};
use osu2saber::saber::StageLevel;
use osu2saber::sequencer::{SaberSequencer, Sequencer};
use std::sync::LazyLock;

const NOCTURNE_4K: &str = include_str!("../tests/nocturne_4k.osu");

static PARSED: LazyLock<OsuOutput> =
    LazyLock::new(|| parse_osu(NOCTURNE_4K).expect("Failed to parse beatmap"));

fn bench_parse_osu(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_osu");

    group.bench_function("nocturne_4k", |b| {
        b.iter(|| parse_osu(std::hint::black_box(NOCTURNE_4K)));
    });

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let sequencer = SaberSequencer::default();

    group.bench_function("nocturne_4k", |b| {
        b.iter(|| {
            sequencer.transform(
                std::hint::black_box(&PARSED.beatset),
                StageLevel::ExpertPlus,
            )
        });
    });

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let sequencer = SaberSequencer::default();
    let map = sequencer
        .transform(&PARSED.beatset, StageLevel::ExpertPlus)
        .expect("Failed to transform beatmap");

    group.bench_function("nocturne_4k", |b| {
        b.iter(|| sequencer.serialize(std::hint::black_box(&map)));
    });

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default();
    bench_parse_osu(&mut criterion);
    bench_transform(&mut criterion);
    bench_serialize(&mut criterion);
}
