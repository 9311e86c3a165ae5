/// Errors encounterable while parsing an option from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum OptParseError {
  /// Reached end of stream before parsing was finished
  UnexpectedEndOfStream,

  /// Option delta was set to 15, a reserved value.
  DeltaReservedValue(u8),

  /// Value length was set to 15, a reserved value.
  ValueLengthReservedValue(u8),

  /// Summing option deltas overflowed the option number.
  NumberOverflow,
}

impl OptParseError {
  /// Shorthand for [`OptParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}
