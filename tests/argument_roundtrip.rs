
use _fixtures::{broadcast, f64_store, hex, launcher, region};
use insta::assert_snapshot;
use region_launcher::access::{AccessRecorder, Permission, Projection};
use region_launcher::args::{
    AffineTransform, Argument, ArgumentEncoder, ArgumentReader, ChunkShape, DataType,
    RegionFieldArg, RegionFieldRef, Scalar, ScalarArg, ShapeArg,
};
use region_launcher::error::{LaunchError, UsageError};
use region_launcher::launcher::Store;
use region_launcher::requirements::{RegionRequirement, Requirements};
use region_launcher::runtime::recording::RecordingRuntime;
use region_launcher::ser::{SerError, SerKind};
use region_launcher::types::{Domain, DomainPoint, FutureHandle};

fn region_field_arg(transform: Option<AffineTransform>) -> (Requirements, ArgumentEncoder) {
    let target = region(1, 2);
    let mut recorder = AccessRecorder::new();
    recorder
        .declare(target, 5, Permission::Read, broadcast())
        .unwrap();
    let requirements = Requirements::coalesce(&recorder).unwrap();

    let mut encoder = ArgumentEncoder::new();
    encoder.push_scalar(ScalarArg::Value(Scalar::Bool(true)));
    encoder.push_scalar(ScalarArg::Value(Scalar::Int32(-7)));
    encoder.push_shape(&ShapeArg::new(vec![4, 5]));
    encoder.push(Argument::RegionField(RegionFieldArg {
        dim: target.dim(),
        redop: None,
        key: RegionRequirement::new(target, Permission::Read, broadcast()),
        field_id: 5,
        transform,
    }));
    (requirements, encoder)
}

#[test]
fn scalars_shape_and_region_field_roundtrip() {
    let (requirements, encoder) = region_field_arg(None);
    let buffer = encoder.pack(&requirements).unwrap();
    assert_eq!(buffer.len(), 49);
    assert_snapshot!(
        hex(buffer.as_slice()),
        @"01 f9 ff ff ff 02 00 00 00 04 00 00 00 00 00 00 00 05 00 00 00 00 00 00 00 ff ff ff ff 02 00 00 00 ff ff ff ff 00 00 00 00 05 00 00 00 ff ff ff ff"
    );

    let mut reader = ArgumentReader::new(buffer.as_slice());
    assert!(reader.read_bool().unwrap());
    assert_eq!(reader.read_i32().unwrap(), -7);
    assert_eq!(reader.read_shape().unwrap(), ShapeArg::new(vec![4, 5]));
    assert_eq!(
        reader.read_region_field().unwrap(),
        RegionFieldRef {
            dim: 2,
            redop: None,
            requirement_index: 0,
            field_id: 5,
            transform: None,
        }
    );
    reader.finish().unwrap();
}

#[test]
fn transform_matrix_and_offsets_roundtrip() {
    let transform = AffineTransform::new(2, 2, vec![1, -2, 3, i64::MAX], vec![10, -20]).unwrap();
    let (requirements, encoder) = region_field_arg(Some(transform.clone()));
    let buffer = encoder.pack(&requirements).unwrap();
    // i32 m, i32 n, four matrix entries and two offsets replace the i32 sentinel
    assert_eq!(buffer.len(), 49 - 4 + 8 + 6 * 8);

    let mut reader = ArgumentReader::new(buffer.as_slice());
    reader.read_bool().unwrap();
    reader.read_i32().unwrap();
    reader.read_shape().unwrap();
    let field = reader.read_region_field().unwrap();
    assert_eq!(field.dim, 2);
    let decoded = field.transform.expect("transform present");
    assert_eq!(decoded, transform);
    assert_eq!(decoded.matrix(), &[1, -2, 3, i64::MAX]);
    assert_eq!(decoded.offset(), &[10, -20]);
    reader.finish().unwrap();
}

#[test]
fn transform_input_rank_is_packed_as_dim() {
    let promote = AffineTransform::new(2, 1, vec![1, 0], vec![0, 3]).unwrap();
    let (requirements, encoder) = region_field_arg(Some(promote));
    let buffer = encoder.pack(&requirements).unwrap();
    let mut reader = ArgumentReader::new(buffer.as_slice());
    reader.read_bool().unwrap();
    reader.read_i32().unwrap();
    reader.read_shape().unwrap();
    assert_eq!(reader.read_region_field().unwrap().dim, 1);
}

#[test]
fn launcher_arguments_decode_in_declaration_order() {
    let runtime = RecordingRuntime::new();
    let mut launcher = launcher(3);
    launcher.add_scalar_arg(2.5f32).unwrap();
    launcher.add_dtype_arg(DataType::Complex64).unwrap();
    launcher
        .add_scalar_array(
            DataType::UInt16,
            vec![Scalar::UInt16(1), Scalar::UInt16(65535)],
        )
        .unwrap();
    launcher.add_shape(vec![8, 6], Some((vec![4, 3], 2))).unwrap();
    launcher.add_point([1, -1, 2], true).unwrap();
    launcher.add_point([7, 7], false).unwrap();
    let input = Store::future(DataType::Int64, vec![1], FutureHandle(11));
    launcher.add_input(&input, broadcast()).unwrap();
    let output = f64_store(region(2, 2), 4, &[8, 6]);
    launcher
        .add_reduction(&output, Projection::broadcast_reduction(9).into())
        .unwrap();

    let task = launcher
        .build_task(&runtime, Domain::from_extents(&[2, 2]))
        .unwrap();
    let mut reader = ArgumentReader::new(task.launch.args.as_slice());
    assert_eq!(
        reader.read_scalar(DataType::Float32).unwrap(),
        Scalar::Float32(2.5)
    );
    assert_eq!(reader.read_dtype().unwrap(), DataType::Complex64);
    assert_eq!(
        reader.read_array(DataType::UInt16).unwrap(),
        vec![Scalar::UInt16(1), Scalar::UInt16(65535)]
    );
    assert_eq!(
        reader.read_shape().unwrap(),
        ShapeArg::chunked(vec![8, 6], ChunkShape::new(2, vec![4, 3]).unwrap()).unwrap()
    );
    assert_eq!(
        reader.read_untyped_point().unwrap(),
        DomainPoint::from([1, -1, 2])
    );
    assert_eq!(reader.read_point(2).unwrap(), DomainPoint::from([7, 7]));

    let future = reader.read_store().unwrap();
    assert!(future.header.is_future);
    assert_eq!(future.header.ndim, 1);
    assert_eq!(future.header.dtype, DataType::Int64);
    assert_eq!(future.region_field, None);

    let reduced = reader.read_store().unwrap();
    assert!(!reduced.header.is_future);
    assert_eq!(reduced.header.shape, ShapeArg::new(vec![8, 6]));
    let field = reduced.region_field.unwrap();
    assert_eq!(field.redop, Some(9));
    assert_eq!(field.requirement_index, 0);
    assert_eq!(field.field_id, 4);
    reader.finish().unwrap();

    assert_eq!(task.calls.futures, vec![FutureHandle(11)]);
}

#[test]
fn scalars_without_an_encoder_are_rejected() {
    let mut launcher = launcher(0);
    assert_eq!(
        launcher.add_typed_scalar(Scalar::Float32(1.0), DataType::Float16),
        Err(LaunchError::UnsupportedType(DataType::Float16))
    );
    assert_eq!(
        launcher.add_scalar_array(DataType::Complex128, vec![]),
        Err(LaunchError::UnsupportedType(DataType::Complex128))
    );
    assert_eq!(
        launcher.add_typed_scalar(Scalar::Int32(1), DataType::Int64),
        Err(LaunchError::ScalarTypeMismatch {
            expected: DataType::Int64,
            found: DataType::Int32,
        })
    );
    assert_eq!(launcher.num_args(), 0);
}

#[test]
fn truncated_buffers_name_the_failing_entry() {
    let (requirements, encoder) = region_field_arg(None);
    let buffer = encoder.pack(&requirements).unwrap();
    let truncated = &buffer.as_slice()[..buffer.len() - 2];
    let mut reader = ArgumentReader::new(truncated);
    reader.read_bool().unwrap();
    reader.read_i32().unwrap();
    reader.read_shape().unwrap();
    assert_eq!(
        reader.read_region_field(),
        Err(SerError::unexpected_end(SerKind::Transform, "m"))
    );
}

#[test]
fn chunk_projection_ids_must_fit_the_packed_int32() {
    for functor in [u32::MAX, i32::MAX as u32 + 1] {
        let mut launcher = launcher(0);
        assert_eq!(
            launcher.add_shape(vec![8], Some((vec![4], functor))),
            Err(LaunchError::InvalidUsage(UsageError::ProjectionIdOutOfRange(functor)))
        );
        assert_eq!(launcher.num_args(), 0);
    }

    let runtime = RecordingRuntime::new();
    let mut launcher = launcher(0);
    launcher
        .add_shape(vec![8], Some((vec![4], i32::MAX as u32)))
        .unwrap();
    launcher.add_scalar_arg(7i32).unwrap();
    let task = launcher.build_single_task(&runtime).unwrap();
    let mut reader = ArgumentReader::new(task.launch.args.as_slice());
    assert_eq!(
        reader.read_shape().unwrap().chunk,
        Some(ChunkShape::new(i32::MAX as u32, vec![4]).unwrap())
    );
    assert_eq!(reader.read_i32().unwrap(), 7);
    reader.finish().unwrap();
}
