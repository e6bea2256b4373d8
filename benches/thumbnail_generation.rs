// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use gen_thumb::domain::media::MediaKind;
use gen_thumb::infrastructure::{FfmpegFrameExtractor, ImageRsDecoder};
use gen_thumb::media::{self, ThumbnailGenerator};
use image_rs::{Rgb, RgbImage};
use std::hint::black_box;
use std::num::NonZeroU32;

fn thumbnail_generation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("thumbnail_generation");

    let dir = tempfile::tempdir().expect("tempdir");
    let png = dir.path().join("bench.png");
    let jpg = dir.path().join("bench.jpg");
    let source = RgbImage::from_fn(2000, 1500, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    source.save(&png).expect("save png");
    source.save(&jpg).expect("save jpg");

    let generator = ThumbnailGenerator::new(
        Box::new(ImageRsDecoder::new()),
        Box::new(FfmpegFrameExtractor::new()),
    );
    let size = NonZeroU32::new(200).expect("non-zero");

    group.bench_function("png_2000x1500_to_200", |b| {
        b.iter(|| black_box(generator.generate(&png, MediaKind::Image, size).expect("thumbnail")));
    });

    group.bench_function("jpeg_2000x1500_to_200", |b| {
        b.iter(|| black_box(generator.generate(&jpg, MediaKind::Image, size).expect("thumbnail")));
    });

    group.bench_function("image_metadata", |b| {
        b.iter(|| black_box(media::read_metadata(&jpg, MediaKind::Image)));
    });

    group.finish();
}

criterion_group!(benches, thumbnail_generation_benchmark);
criterion_main!(benches);
