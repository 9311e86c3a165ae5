use newt_common::Cursor;
use std_alloc::vec::Vec;

/// Message check
pub mod check;

/// Message Code
pub mod code;

/// Message ID
pub mod id;

/// Message Options
pub mod opt;

/// Message parsing errors
pub mod parse_error;

/// Message Token
pub mod token;

/// Message Type
pub mod ty;

/// Message Version
pub mod ver;

pub use check::*;
pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

use crate::from_bytes::{TryConsumeBytes, TryFromBytes};

/// Message payload (in http terms: the request/response body).
///
/// Owned bytes, possibly empty. On the wire a non-empty payload is
/// preceded by the single marker byte `0xFF`; an empty payload is
/// absent entirely, marker included.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Payload(pub Vec<u8>);

/// Struct representing the first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (confirmable, ack, ...)
/// |  |
/// |  |  Length of token, in bytes (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl TryFrom<u8> for Byte1 {
  type Error = MessageParseError;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    let ver = b >> 6; // bits 7 & 6
    let ty = b >> 4 & 0b11; // bits 5 & 4
    let tkl = b & 0b1111; // last 4 bits

    if ver != 1 {
      return Err(MessageParseError::InvalidVersion(ver));
    }

    Ok(Byte1 { ver: Version(ver),
               ty: Type::try_from(ty)?,
               tkl })
  }
}

/// # `Message` struct
/// Low-level owned representation of a CoAP message, one field per wire
/// field.
///
/// A `Message` exclusively owns its option records and its payload;
/// copying one (via [`Clone`]) yields a fully independent value, and
/// every setter copies the bytes it is given.
///
/// Messages parse from bytes via [`TryFromBytes`] and serialize via
/// [`TryIntoBytes`](crate::TryIntoBytes) or
/// [`Message::write_to`](crate::Message::write_to).
///
/// ```
/// use newt_msg::{Message, OptNumber, TryFromBytes};
///
/// // ACK carrying a 2.05 response with payload "hi"
/// let msg = Message::try_from_bytes([0x60, 0x45, 0xBE, 0xEF, 0xFF, b'h', b'i']).unwrap();
///
/// assert_eq!(msg.id.0, 0xBEEF);
/// assert_eq!(msg.code.to_human(), ['2', '.', '0', '5']);
/// assert_eq!(msg.payload.0, b"hi");
/// ```
#[derive(Clone, PartialEq, PartialOrd, Debug)]
pub struct Message {
  /// see [`Id`] for details
  pub id: Id,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Token`] for details
  pub token: Token,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`opt::Opts`] for details
  pub opts: Opts,
  /// see [`Payload`]
  pub payload: Payload,
}

impl Default for Message {
  fn default() -> Self {
    Message::new()
  }
}

impl Message {
  /// Create a cleared message: version 1, type CON, code `0.00`, id 0,
  /// no token, no options, no payload
  pub fn new() -> Self {
    Message { id: Id(0),
              ty: Type::Con,
              ver: Version::default(),
              token: Token::default(),
              code: Code::new(0, 0),
              opts: Opts::new(),
              payload: Payload(Vec::new()) }
  }

  /// Return the message to the cleared state, releasing its options
  /// and payload
  pub fn reset(&mut self) {
    *self = Message::new();
  }

  /// Set the code from a raw class/detail pair; see [`Code::try_new`]
  /// for the accepted domains
  pub fn set_code(&mut self, class: u8, detail: u8) -> Result<(), InvalidCode> {
    self.code = Code::try_new(class, detail)?;
    Ok(())
  }

  /// Set the token, copying from `token`; more than 8 bytes is refused
  pub fn set_token(&mut self, token: &[u8]) -> Result<(), TokenTooLong> {
    self.token = Token::try_from(token)?;
    Ok(())
  }

  /// Add an option, copying `value`. The record is placed by number;
  /// see [`Opts::insert`].
  pub fn add_opt(&mut self, num: OptNumber, value: &[u8]) {
    self.opts.insert(Opt::new(num, value));
  }

  /// Set the payload, copying from `payload`. An empty slice drops any
  /// payload the message held.
  pub fn set_payload(&mut self, payload: &[u8]) {
    self.payload = Payload(payload.to_vec());
  }

  /// Create the Empty message that ACKs this one.
  ///
  /// This needs an [`Id`] to assign to the newly created message. The
  /// ACK carries no token or code; a piggybacked response would carry
  /// both, and is built by hand instead.
  pub fn ack(&self, id: Id) -> Self {
    Message { id,
              ty: Type::Ack,
              ..Message::new() }
  }
}

impl<Bytes: AsRef<[u8]>> TryFromBytes<Bytes> for Message {
  type Error = MessageParseError;

  fn try_from_bytes(bytes: Bytes) -> Result<Self, Self::Error> {
    let mut bytes = Cursor::new(bytes);

    let Byte1 { tkl, ty, ver } = bytes.next()
                                      .ok_or_else(MessageParseError::eof)?
                                      .try_into()?;

    if tkl > 8 {
      return Err(MessageParseError::InvalidTokenLength(tkl));
    }

    let code = Code::from(bytes.next().ok_or_else(MessageParseError::eof)?);
    if !matches!(code.class, 0 | 2 | 4 | 5) {
      return Err(MessageParseError::InvalidCodeClass(code.class));
    }

    let id = Id::try_consume_bytes(&mut bytes)?;

    let token = bytes.take_exact(tkl as usize)
                     .ok_or_else(MessageParseError::eof)?;
    let token =
      Token::try_from(token).map_err(|_| MessageParseError::InvalidTokenLength(tkl))?;

    let opts = Opts::try_consume_bytes(&mut bytes)?;

    let payload = match bytes.next() {
      | None => Payload(Vec::new()),
      | Some(0xFF) => match bytes.take_until_end() {
        | [] => return Err(MessageParseError::PayloadMarkerWithoutPayload),
        | rest => Payload(rest.to_vec()),
      },
      | Some(other) => return Err(MessageParseError::ExpectedPayloadMarker(other)),
    };

    let msg = Message { id,
                        ty,
                        ver,
                        code,
                        token,
                        opts,
                        payload };
    msg.check()?;
    Ok(msg)
  }
}

/// Peel just the message type and id out of the 4-byte header.
///
/// Transports dispatch acknowledgements and resets on these two fields
/// before committing to a full parse. Nothing else is validated, not
/// even the version bits.
pub fn parse_type_and_msg_id(bytes: &[u8]) -> Result<(Type, Id), MessageParseError> {
  match bytes {
    | &[b0, _, b2, b3, ..] => Ok((Type::try_from(b0 >> 4 & 0b11)?,
                                  Id::from_be_bytes([b2, b3]))),
    | _ => Err(MessageParseError::eof()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_msg() {
    let (expect, bytes) = crate::test_msg();
    assert_eq!(Message::try_from_bytes(&bytes).unwrap(), expect);
  }

  #[test]
  fn parse_byte1() {
    let byte = Byte1::try_from(0b0110_0011u8).unwrap();
    assert_eq!(byte,
               Byte1 { ver: Version(1),
                       ty: Type::Ack,
                       tkl: 3 });
  }

  #[test]
  fn parse_byte1_rejects_version() {
    assert_eq!(Byte1::try_from(0b1000_0000u8),
               Err(MessageParseError::InvalidVersion(2)));
  }

  #[test]
  fn parse_rejects_short_buffers() {
    assert_eq!(Message::try_from_bytes([]),
               Err(MessageParseError::eof()));
    assert_eq!(Message::try_from_bytes([0x40, 0x00, 0x12]),
               Err(MessageParseError::eof()));
  }

  #[test]
  fn parse_rejects_token_length_over_8() {
    assert_eq!(Message::try_from_bytes([0x49, 0x00, 0x12, 0x34]),
               Err(MessageParseError::InvalidTokenLength(9)));
  }

  #[test]
  fn parse_rejects_truncated_token() {
    assert_eq!(Message::try_from_bytes([0x42, 0x01, 0x12, 0x34, 0xAA]),
               Err(MessageParseError::eof()));
  }

  #[test]
  fn parse_rejects_reserved_code_class() {
    // class 1
    assert_eq!(Message::try_from_bytes([0x40, 0x21, 0x12, 0x34]),
               Err(MessageParseError::InvalidCodeClass(1)));
    // class 7
    assert_eq!(Message::try_from_bytes([0x40, 0xE1, 0x12, 0x34]),
               Err(MessageParseError::InvalidCodeClass(7)));
  }

  #[test]
  fn parse_rejects_bare_payload_marker() {
    assert_eq!(Message::try_from_bytes([0x40, 0x01, 0x12, 0x34, 0xFF]),
               Err(MessageParseError::PayloadMarkerWithoutPayload));
  }

  #[test]
  fn reset_and_reuse() {
    let (_, bytes) = crate::test_msg();
    let mut msg = Message::try_from_bytes(&bytes).unwrap();

    msg.reset();
    assert_eq!(msg, Message::new());

    msg.id = Id(7);
    assert_eq!(msg.check(), Ok(()));
  }

  #[test]
  fn ack_is_empty_and_echoes_nothing_but_id() {
    let (msg, _) = crate::test_msg();
    let ack = msg.ack(Id(99));

    assert_eq!(ack.id, Id(99));
    assert_eq!(ack.ty, Type::Ack);
    assert!(ack.code.is_empty());
    assert_eq!(ack.check(), Ok(()));
  }

  #[test]
  fn type_and_msg_id_peek() {
    assert_eq!(parse_type_and_msg_id(&[0x70, 0x00, 0xAB, 0xCD]),
               Ok((Type::Reset, Id(0xABCD))));
    assert_eq!(parse_type_and_msg_id(&[0x70, 0x00, 0xAB]),
               Err(MessageParseError::eof()));
  }
}
