//! Flat native-endian vector buffers.
//!
//! A vector on the wire is a headerless run of `f32` or `f64` values in host
//! byte order. Decoding borrows when the buffer happens to be aligned for the
//! element type and copies otherwise.

use std::borrow::Cow;

use crate::element::Element;
use crate::error::{Error, Result};

/// Interprets `bytes` as a vector of `T`.
///
/// Fails with [`Error::PartialElement`] if the length is not a whole number
/// of elements.
pub fn vector_from_bytes<T: Element>(bytes: &[u8]) -> Result<Cow<'_, [T]>> {
    let size = T::WIDTH.size_bytes();
    if bytes.len() % size != 0 {
        return Err(Error::PartialElement {
            bytes: bytes.len(),
            width: T::WIDTH,
        });
    }

    match bytemuck::try_cast_slice::<u8, T>(bytes) {
        Ok(values) => Ok(Cow::Borrowed(values)),
        // Only misalignment can fail here; the length was checked above.
        Err(_) => Ok(Cow::Owned(
            bytes
                .chunks_exact(size)
                .map(bytemuck::pod_read_unaligned::<T>)
                .collect(),
        )),
    }
}

/// Native-endian bytes of `values`.
#[must_use]
pub fn vector_to_bytes<T: Element>(values: &[T]) -> Vec<u8> {
    bytemuck::cast_slice::<T, u8>(values).to_vec()
}
