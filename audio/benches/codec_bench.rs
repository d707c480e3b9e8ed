use criterion::{black_box, criterion_group, criterion_main, Criterion};
use codecbench_audio::codec::{lc3, opus, Packet};
use codecbench_audio::pcm::{SignalSource, SineSource};

fn sine_frame() -> Vec<i16> {
    let mut source = SineSource::new(48000, 480).unwrap();
    source.next_frame().unwrap().unwrap().into_samples()
}

fn bench_opus(c: &mut Criterion) {
    let pcm = sine_frame();
    let mut encoder = opus::Encoder::new(48000, 1, opus::Application::Audio).unwrap();
    encoder.set_bitrate(32000).unwrap();
    let mut decoder = opus::Decoder::new(48000, 1).unwrap();
    let mut packet = Packet::with_capacity(opus::MAX_PACKET_SIZE);
    let mut out = vec![0i16; 480];

    c.bench_function("opus_encode_10ms", |b| {
        b.iter(|| encoder.encode_into(black_box(&pcm), &mut packet).unwrap());
    });

    encoder.encode_into(&pcm, &mut packet).unwrap();
    c.bench_function("opus_decode_10ms", |b| {
        b.iter(|| decoder.decode_into(black_box(&packet), &mut out).unwrap());
    });
}

fn bench_lc3(c: &mut Criterion) {
    let pcm = sine_frame();
    let mut encoder = lc3::Encoder::new(10_000, 48000, 32000).unwrap();
    let mut decoder = lc3::Decoder::new(10_000, 48000).unwrap();
    let mut packet = Packet::with_capacity(encoder.frame_bytes());
    let mut out = vec![0i16; 480];

    c.bench_function("lc3_encode_10ms", |b| {
        b.iter(|| encoder.encode_into(black_box(&pcm), &mut packet).unwrap());
    });

    encoder.encode_into(&pcm, &mut packet).unwrap();
    c.bench_function("lc3_decode_10ms", |b| {
        b.iter(|| decoder.decode_into(black_box(&packet), &mut out).unwrap());
    });
}

criterion_group!(benches, bench_opus, bench_lc3);
criterion_main!(benches);
