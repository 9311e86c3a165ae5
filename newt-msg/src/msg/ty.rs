use super::MessageParseError;

/// Indicates if this message is of
/// type Confirmable (0), Non-confirmable (1), Acknowledgement (2), or Reset (3).
///
/// See [RFC7252 - Message Details](https://datatracker.ietf.org/doc/html/rfc7252#section-3) for context
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum Type {
  /// A Confirmable message requires an acknowledgement. When no packets
  /// are lost it elicits exactly one return message of type
  /// Acknowledgement or Reset.
  Con,
  /// A Non-confirmable message is fire-and-forget, used e.g. for
  /// repeated sensor readings. It always carries a request or response
  /// and is never Empty.
  Non,
  /// An Acknowledgement reports that a specific Confirmable message
  /// arrived; it may additionally carry a piggybacked response.
  Ack,
  /// A Reset reports that a message was received but context to process
  /// it is missing, e.g. after the receiving node rebooted. Provoking a
  /// Reset with an Empty Confirmable message doubles as a liveness check
  /// ("CoAP ping").
  Reset,
}

impl TryFrom<u8> for Type {
  type Error = MessageParseError;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    match b {
      | 0 => Ok(Type::Con),
      | 1 => Ok(Type::Non),
      | 2 => Ok(Type::Ack),
      | 3 => Ok(Type::Reset),
      | _ => Err(MessageParseError::InvalidType(b)),
    }
  }
}

impl From<Type> for u8 {
  fn from(t: Type) -> u8 {
    match t {
      | Type::Con => 0,
      | Type::Non => 1,
      | Type::Ack => 2,
      | Type::Reset => 3,
    }
  }
}
