use newt_common::Cursor;

/// Trait for parsing a data structure out of a sequence of bytes
pub trait TryFromBytes<A: AsRef<[u8]>>: Sized {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert some sequence of bytes into `Self`
  ///
  /// The whole buffer must be consumed; trailing garbage is an error.
  fn try_from_bytes(bytes: A) -> Result<Self, Self::Error>;
}

/// Trait adding the ability for a _piece_ of a data structure to parse
/// itself off the front of a cursor over a byte buffer.
pub(crate) trait TryConsumeBytes<A: AsRef<[u8]>>: Sized {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to parse `Self` out of `bytes`, advancing the cursor past
  /// the bytes used
  fn try_consume_bytes(bytes: &mut Cursor<A>) -> Result<Self, Self::Error>;
}
