use criterion::{black_box, criterion_group, criterion_main, Criterion};
use region_launcher::args::{
    ArgumentEncoder, ArgumentReader, DataType, Scalar, ScalarArg, ShapeArg,
};
use region_launcher::requirements::Requirements;

fn encoder() -> ArgumentEncoder {
    let mut encoder = ArgumentEncoder::new();
    for index in 0..256i64 {
        encoder.push_scalar(ScalarArg::Value(Scalar::Int64(index)));
        encoder.push_scalar(ScalarArg::Value(Scalar::Float32(index as f32)));
        encoder.push_shape(&ShapeArg::new(vec![index, 2 * index, 3]));
    }
    encoder
}

fn bench_ser(c: &mut Criterion) {
    let mut group = c.benchmark_group("arguments");
    let encoder = encoder();
    let requirements = Requirements::default();
    group.bench_function("pack_scalars_and_shapes", |b| {
        b.iter(|| black_box(encoder.pack(black_box(&requirements)).expect("pack")));
    });

    let buffer = encoder.pack(&requirements).expect("pack");
    group.bench_function("read_scalars_and_shapes", |b| {
        b.iter(|| {
            let mut reader = ArgumentReader::new(black_box(buffer.as_slice()));
            for _ in 0..256 {
                black_box(reader.read_i64().expect("int64"));
                black_box(reader.read_scalar(DataType::Float32).expect("float32"));
                black_box(reader.read_shape().expect("shape"));
            }
            reader.finish().expect("consumed");
        });
    });
    group.finish();
}

criterion_group!(benches, bench_ser);
criterion_main!(benches);
