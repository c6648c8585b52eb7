use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ut61e_rs::util::hex::decode_hex;
use ut61e_rs::{decode, RawFrame};

const VOLTAGE_DC_HEX: &str = "343232B538B03B31B0B038B00D8A";
const CAPACITANCE_HEX: &str = "B0B0B0B332B0B6B0B0B032B00D8A";

fn benchmark_decode(c: &mut Criterion) {
    let voltage = decode_hex(VOLTAGE_DC_HEX).unwrap();
    let capacitance = decode_hex(CAPACITANCE_HEX).unwrap();

    c.bench_function("decode_voltage_dc", |b| {
        b.iter(|| {
            let _ = black_box(decode(black_box(&voltage)));
        })
    });

    c.bench_function("decode_capacitance", |b| {
        b.iter(|| {
            let _ = black_box(decode(black_box(&capacitance)));
        })
    });

    c.bench_function("inspect_frame", |b| {
        b.iter(|| {
            let _ = black_box(RawFrame::inspect(black_box(&voltage)));
        })
    });
}

fn benchmark_render(c: &mut Criterion) {
    let measurement = decode(&decode_hex(VOLTAGE_DC_HEX).unwrap()).unwrap();

    c.bench_function("to_csv_line", |b| {
        b.iter(|| black_box(black_box(&measurement).to_csv_line()))
    });
}

criterion_group!(benches, benchmark_decode, benchmark_render);
criterion_main!(benches);
