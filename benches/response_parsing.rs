// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use gif_gallery::media::decode_rendition;
use gif_gallery::source::parse_trending;
use image_rs::codecs::gif::GifEncoder;
use image_rs::{Delay, Frame, Rgba, RgbaImage};
use std::hint::black_box;

fn trending_body(count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id":"gif{i}","title":"GIF {i}","images":{{
                    "downsized_still":{{"url":"https://media.example/{i}/still.gif"}},
                    "fixed_height":{{"url":"https://media.example/{i}/200.gif"}}}}}}"#
            )
        })
        .collect();
    format!(r#"{{"data":[{}],"meta":{{"status":200}}}}"#, entries.join(","))
}

fn animated_gif(frames: u8, side: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        for i in 0..frames {
            let shade = i.wrapping_mul(16);
            let image = RgbaImage::from_pixel(side, side, Rgba([shade, 64, 128, 255]));
            let frame = Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(40, 1));
            encoder.encode_frame(frame).expect("encode frame");
        }
    }
    bytes
}

fn parsing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_parsing");

    let body = trending_body(50);
    group.bench_function("parse_trending_50", |b| {
        b.iter(|| black_box(parse_trending(black_box(&body)).expect("valid body")));
    });

    let gif = animated_gif(24, 200);
    group.bench_function("decode_gif_24_frames", |b| {
        b.iter(|| black_box(decode_rendition(black_box(&gif)).expect("valid gif")));
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);
