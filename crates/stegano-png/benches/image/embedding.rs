use criterion::{criterion_group, criterion_main, Criterion};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use stegano_png::{embed_text, CodecOptions, NoProgress};

fn carrier(width: u32, height: u32) -> Vec<u8> {
    let pixels: Vec<u8> = (0..width as usize * height as usize * 4)
        .map(|i| (i * 7919 / 13) as u8)
        .collect();
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Default, FilterType::Adaptive)
        .write_image(&pixels, width, height, ColorType::Rgba8)
        .expect("Cannot encode carrier image");
    buf
}

pub fn image_embedding(c: &mut Criterion) {
    c.bench_function("Image Embedding", |b| {
        let carrier = carrier(512, 512);
        let opts = CodecOptions::default();

        b.iter(|| {
            embed_text(&carrier, "Hello World!", &opts, &mut NoProgress)
                .expect("Cannot hide secret message");
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
