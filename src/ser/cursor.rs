use super::error::{SerError, SerKind, SerResult};

/// Forward-only view of a packed argument buffer.
///
/// Every read names the entry and field it belongs to, so a short buffer is
/// reported against the argument that ran out of bytes.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    rest: &'a [u8],
    consumed: usize,
}

impl<'a> ByteReader<'a> {
    /// Starts reading at the first byte of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            rest: bytes,
            consumed: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Takes the next `len` bytes.
    pub fn take(&mut self, len: usize, kind: SerKind, field: &'static str) -> SerResult<&'a [u8]> {
        if len > self.rest.len() {
            return Err(SerError::unexpected_end(kind, field));
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        self.consumed += len;
        Ok(head)
    }

    /// Takes the next `N` bytes as a fixed-width scalar image.
    pub fn take_array<const N: usize>(
        &mut self,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<[u8; N]> {
        let bytes = self.take(N, kind, field)?;
        bytes
            .try_into()
            .map_err(|_| SerError::invalid_length(kind, field))
    }
}

/// Fails with a trailing-bytes error unless `cursor` reached the end of its buffer.
pub fn ensure_consumed(cursor: &ByteReader<'_>, kind: SerKind) -> SerResult<()> {
    match cursor.remaining() {
        0 => Ok(()),
        remaining => Err(SerError::trailing_bytes(
            kind,
            cursor.position(),
            remaining,
        )),
    }
}
