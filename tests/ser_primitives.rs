use insta::assert_snapshot;
use region_launcher::ser::{
    ensure_consumed, ensure_i32, ensure_u32, read_bool, read_f64, read_i64_vec, read_i8,
    read_u16, read_u32, write_bool, write_f64, write_i64_vec, write_i8, write_u16, write_u32,
    ByteReader, SerError, SerKind,
};

#[test]
fn roundtrip_unsigned_integers() {
    let mut buffer = Vec::new();
    write_u16(&mut buffer, 0x1234);
    write_u32(&mut buffer, 0xdead_beef);
    let mut cursor = ByteReader::new(&buffer);
    assert_eq!(
        read_u16(&mut cursor, SerKind::Scalar, "u16").unwrap(),
        0x1234
    );
    assert_eq!(
        read_u32(&mut cursor, SerKind::Scalar, "u32").unwrap(),
        0xdead_beef
    );
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn signed_and_float_values_keep_their_bits() {
    let mut buffer = Vec::new();
    write_i8(&mut buffer, -2);
    write_f64(&mut buffer, -0.5);
    assert_eq!(buffer.len(), 9);
    let mut cursor = ByteReader::new(&buffer);
    assert_eq!(read_i8(&mut cursor, SerKind::Scalar, "i8").unwrap(), -2);
    assert_eq!(
        read_f64(&mut cursor, SerKind::Scalar, "f64").unwrap().to_bits(),
        (-0.5f64).to_bits()
    );
}

#[test]
fn bool_roundtrip_and_invalid() {
    let mut buffer = Vec::new();
    write_bool(&mut buffer, true);
    write_bool(&mut buffer, false);
    assert_eq!(buffer, [1, 0]);
    let mut cursor = ByteReader::new(&buffer);
    assert!(read_bool(&mut cursor, SerKind::Scalar, "flag").unwrap());
    assert!(!read_bool(&mut cursor, SerKind::Scalar, "flag").unwrap());

    let invalid = [2u8];
    let mut cursor = ByteReader::new(&invalid);
    let err = read_bool(&mut cursor, SerKind::Scalar, "flag").expect_err("invalid flag");
    assert!(matches!(err, SerError::InvalidValue { .. }));
}

#[test]
fn snapshot_shape_extents() {
    let mut buffer = Vec::new();
    write_i64_vec(&mut buffer, &[3, -1], SerKind::Shape, "extents").unwrap();
    assert_snapshot!(
        hex(&buffer),
        @"02 00 00 00 03 00 00 00 00 00 00 00 ff ff ff ff ff ff ff ff"
    );
    let mut cursor = ByteReader::new(&buffer);
    assert_eq!(
        read_i64_vec(&mut cursor, SerKind::Shape, "extents").unwrap(),
        vec![3, -1]
    );
    ensure_consumed(&cursor, SerKind::Shape).unwrap();
}

#[test]
fn short_array_reports_unexpected_end() {
    let data = [0x02, 0x00, 0x00, 0x00, 1, 0, 0, 0, 0, 0, 0, 0, 7];
    let mut cursor = ByteReader::new(&data);
    let err = read_i64_vec(&mut cursor, SerKind::Array, "values").expect_err("short buffer");
    assert_eq!(err, SerError::unexpected_end(SerKind::Array, "values"));
    assert_eq!(err.kind(), SerKind::Array);
}

#[test]
fn trailing_bytes_are_reported() {
    let data = [0u8; 3];
    let mut cursor = ByteReader::new(&data);
    read_bool(&mut cursor, SerKind::Buffer, "flag").unwrap();
    assert_eq!(
        ensure_consumed(&cursor, SerKind::Buffer),
        Err(SerError::trailing_bytes(SerKind::Buffer, 1, 2))
    );
}

#[test]
fn length_guards() {
    assert_eq!(ensure_u32(7, SerKind::Array, "count").unwrap(), 7);
    assert_eq!(ensure_i32(7, SerKind::Store, "ndim").unwrap(), 7);
    assert!(matches!(
        ensure_i32(usize::MAX, SerKind::Store, "ndim"),
        Err(SerError::InvalidLength { .. })
    ));
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}
