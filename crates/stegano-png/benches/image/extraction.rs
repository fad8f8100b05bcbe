use criterion::{criterion_group, criterion_main, Criterion};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use stegano_png::{embed_text, extract_text, CodecOptions, NoProgress};

pub fn image_extraction(c: &mut Criterion) {
    c.bench_function("Image Extraction", |b| {
        let (width, height) = (512u32, 512u32);
        let pixels: Vec<u8> = (0..width as usize * height as usize * 3)
            .map(|i| (i * 7919 / 13) as u8)
            .collect();
        let mut carrier = Vec::new();
        PngEncoder::new_with_quality(&mut carrier, CompressionType::Fast, FilterType::Adaptive)
            .write_image(&pixels, width, height, ColorType::Rgb8)
            .expect("Cannot encode carrier image");
        let opts = CodecOptions::default();
        let secret = embed_text(&carrier, "Hello World!", &opts, &mut NoProgress)
            .expect("Cannot hide secret message");

        b.iter(|| {
            extract_text(&secret, &opts, &mut NoProgress).expect("Cannot unveil secret message");
        })
    });
}

criterion_group!(benches, image_extraction);
criterion_main!(benches);
