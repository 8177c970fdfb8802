use super::cursor::ByteReader;
use super::error::{SerKind, SerResult};
use super::ints;

/// Writes a slice using a `u32` item count prefix.
pub fn write_vec<T, F>(
    out: &mut Vec<u8>,
    items: &[T],
    kind: SerKind,
    field: &'static str,
    mut write_item: F,
) -> SerResult<()>
where
    F: FnMut(&mut Vec<u8>, &T) -> SerResult<()>,
{
    let count = ints::ensure_u32(items.len(), kind, field)?;
    ints::write_u32(out, count);
    for item in items {
        write_item(out, item)?;
    }
    Ok(())
}

/// Reads a `Vec<T>` encoded with a `u32` length prefix.
///
/// The preallocation is capped by the remaining input so a corrupt prefix cannot
/// request an arbitrarily large buffer.
pub fn read_vec<T, F>(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
    mut read_item: F,
) -> SerResult<Vec<T>>
where
    F: FnMut(&mut ByteReader<'_>, usize) -> SerResult<T>,
{
    let count = ints::read_u32(cursor, kind, field)? as usize;
    let mut out = Vec::with_capacity(count.min(cursor.remaining()));
    for index in 0..count {
        out.push(read_item(cursor, index)?);
    }
    Ok(out)
}

/// Writes an `i64` run (shape extents, chunk extents) with a `u32` count prefix.
pub fn write_i64_vec(
    out: &mut Vec<u8>,
    values: &[i64],
    kind: SerKind,
    field: &'static str,
) -> SerResult<()> {
    write_vec(out, values, kind, field, |out, value| {
        ints::write_i64(out, *value);
        Ok(())
    })
}

/// Reads an `i64` run encoded with a `u32` count prefix.
pub fn read_i64_vec(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<Vec<i64>> {
    read_vec(cursor, kind, field, |cursor, _| {
        ints::read_i64(cursor, kind, field)
    })
}
