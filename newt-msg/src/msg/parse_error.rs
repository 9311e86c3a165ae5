use super::check::MessageCheckError;
use super::opt::OptParseError;

/// Errors encounterable while parsing a message from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum MessageParseError {
  /// Reached end of stream before parsing was finished
  UnexpectedEndOfStream,

  /// Version field was something other than 1
  InvalidVersion(u8),

  /// The message type is invalid (see [`Type`](crate::Type) for valid values)
  InvalidType(u8),

  /// Token length was > 8
  InvalidTokenLength(u8),

  /// Code class was not 0 (request), 2 (success), 4 (client error)
  /// or 5 (server error)
  InvalidCodeClass(u8),

  /// Bytes followed the options without a `0xFF` payload marker between
  ExpectedPayloadMarker(u8),

  /// A `0xFF` payload marker with nothing after it
  PayloadMarkerWithoutPayload,

  /// Error parsing an option
  OptParseError(OptParseError),

  /// Every field parsed cleanly but the combination is not a valid
  /// message (see [`MessageCheckError`])
  Check(MessageCheckError),
}

impl MessageParseError {
  /// Shorthand for [`MessageParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}

impl From<OptParseError> for MessageParseError {
  fn from(e: OptParseError) -> Self {
    Self::OptParseError(e)
  }
}

impl From<MessageCheckError> for MessageParseError {
  fn from(e: MessageCheckError) -> Self {
    Self::Check(e)
  }
}
