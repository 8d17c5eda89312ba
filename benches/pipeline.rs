//! Benchmarks for the mortimer pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mortimer::{convert, PixelFormat, Slab, TileExtractor, TileRegistry, TileSize};

/// A 1024x512 RGBA slab built from 64 distinct 16x16 tile patterns.
fn level_slab() -> Slab {
    let (w, h) = (1024u32, 512u32);
    let mut pixels = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let pattern = ((x / 16) * 7 + (y / 16) * 3) % 64;
            let shade = (pattern * 4) as u8;
            pixels.extend_from_slice(&[shade, (x % 16) as u8, (y % 16) as u8, 255]);
        }
    }
    Slab::new(pixels, w, h, PixelFormat::Rgba8).unwrap()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let slab = level_slab();

    group.bench_function("extract_16x16", |b| {
        b.iter(|| {
            TileExtractor::new(black_box(&slab), TileSize::DEFAULT)
                .unwrap()
                .extract()
                .unwrap()
        })
    });

    group.bench_function("extract_8x8", |b| {
        b.iter(|| {
            TileExtractor::new(black_box(&slab), TileSize { w: 8, h: 8 })
                .unwrap()
                .extract()
                .unwrap()
        })
    });

    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");
    let slab = level_slab();
    let extractor = TileExtractor::new(&slab, TileSize::DEFAULT).unwrap();

    group.bench_function("registry_from_extractor", |b| {
        b.iter(|| TileRegistry::from_extractor(black_box(&extractor)).unwrap())
    });

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let slab = level_slab();

    c.bench_function("convert_full", |b| {
        b.iter(|| convert(black_box(&slab), TileSize::DEFAULT).unwrap())
    });
}

criterion_group!(benches, bench_extraction, bench_dedup, bench_convert);
criterion_main!(benches);
