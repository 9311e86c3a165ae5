use std_alloc::vec::Vec;
use tinyvec::ArrayVec;

use crate::*;

/// The largest value the 13/14 extension forms can carry:
/// `269 + u16::MAX`. Deltas and value lengths above this do not fit the
/// wire format at all.
pub(crate) const MAX_OPT_EXT: u32 = 269 + u16::MAX as u32;

/// Trait allowing fallible conversion into bytes
pub trait TryIntoBytes {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert into an owned byte buffer, sized exactly
  ///
  /// ```
  /// use newt_msg::{Id, Message, TryIntoBytes, Type};
  ///
  /// let mut msg = Message::new();
  /// msg.ty = Type::Con;
  /// msg.id = Id(0x1234);
  ///
  /// assert_eq!(msg.try_into_bytes().unwrap(), vec![0x40, 0x00, 0x12, 0x34]);
  /// ```
  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error>;
}

/// Errors encounterable serializing a message to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageToBytesError {
  /// The output buffer was too small for the encoded message
  TooLong {
    /// Bytes the buffer could hold
    capacity: usize,
    /// Bytes the message needs
    size: usize,
  },

  /// Consecutive option numbers were further apart than the delta
  /// encoding can express (`269 + u16::MAX`)
  OptDeltaTooLarge(u32),

  /// An option value was longer than the length encoding can express
  /// (`269 + u16::MAX` bytes)
  OptValueTooLong(usize),

  /// The fields contradict each other (see [`MessageCheckError`])
  Check(MessageCheckError),
}

impl From<MessageCheckError> for MessageToBytesError {
  fn from(e: MessageCheckError) -> Self {
    Self::Check(e)
  }
}

/// Split a delta or length value into its 4-bit wire nibble and
/// extension bytes: the value itself below 13, `13` plus one byte up to
/// 268, `14` plus a big-endian u16 past that.
///
/// The caller has already established `val <= MAX_OPT_EXT`.
pub(crate) fn opt_len_or_delta(val: u32) -> (u8, Option<ArrayVec<[u8; 2]>>) {
  match val {
    | n if n >= 269 => {
      let mut bytes = ArrayVec::new();
      bytes.extend_from_slice(&((n - 269) as u16).to_be_bytes());
      (14, Some(bytes))
    },
    | n if n >= 13 => {
      let mut bytes = ArrayVec::new();
      bytes.push((n - 13) as u8);
      (13, Some(bytes))
    },
    | n => (n as u8, None),
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = b.ver.0 << 6;
    let ty = u8::from(b.ty) << 4;

    ver | ty | b.tkl
  }
}

impl Message {
  /// Exact number of bytes [`Message::write_to`] will produce for this
  /// message
  pub fn encoded_size(&self) -> usize {
    let mut prev = OptNumber(0);
    let opts_size: usize = self.opts
                               .iter()
                               .map(|opt| {
                                 let size = opt.encoded_size(prev);
                                 prev = opt.num;
                                 size
                               })
                               .sum();

    let payload_size = match self.payload.0.len() {
      | 0 => 0,
      | n => 1 + n,
    };

    4 + self.token.0.len() + opts_size + payload_size
  }

  /// Format the message into the front of `buf`, returning the number
  /// of bytes written.
  ///
  /// [`Message::check`] runs first and its rejection is returned as-is;
  /// a message that fails any pre-flight check leaves `buf` untouched.
  pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, MessageToBytesError> {
    self.check()?;

    let mut prev = OptNumber(0);
    for opt in &self.opts {
      // records are in non-decreasing number order (Opts maintains this)
      let delta = opt.num.0 - prev.0;
      if delta > MAX_OPT_EXT {
        return Err(MessageToBytesError::OptDeltaTooLarge(delta));
      }

      if opt.value.0.len() > MAX_OPT_EXT as usize {
        return Err(MessageToBytesError::OptValueTooLong(opt.value.0.len()));
      }

      prev = opt.num;
    }

    let size = self.encoded_size();
    if size > buf.len() {
      return Err(MessageToBytesError::TooLong { capacity: buf.len(),
                                                size });
    }

    buf[0] = Byte1 { ver: self.ver,
                     ty: self.ty,
                     tkl: self.token.0.len() as u8 }.into();
    buf[1] = self.code.into();
    buf[2..4].copy_from_slice(&self.id.0.to_be_bytes());

    let mut at = 4;
    buf[at..at + self.token.0.len()].copy_from_slice(&self.token.0);
    at += self.token.0.len();

    let mut prev = OptNumber(0);
    for opt in self.opts.iter() {
      at += opt.write_to(&mut buf[at..], prev);
      prev = opt.num;
    }

    if !self.payload.0.is_empty() {
      buf[at] = 0xFF;
      buf[at + 1..at + 1 + self.payload.0.len()].copy_from_slice(&self.payload.0);
      at += 1 + self.payload.0.len();
    }

    Ok(at)
  }
}

impl TryIntoBytes for Message {
  type Error = MessageToBytesError;

  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error> {
    let mut buf = Vec::new();
    buf.resize(self.encoded_size(), 0);

    let n = self.write_to(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn msg() {
    let (msg, expected) = crate::test_msg();
    assert_eq!(msg.try_into_bytes().unwrap(), expected);
  }

  #[test]
  fn byte_1() {
    let byte: u8 = Byte1 { ver: Version(1),
                           ty: Type::Ack,
                           tkl: 3 }.into();
    assert_eq!(byte, 0b0110_0011u8);
  }

  #[test]
  fn opt_nibble_boundaries() {
    let cases: [(u32, u8, Option<&[u8]>); 7] = [(0, 0, None),
                                                (12, 12, None),
                                                (13, 13, Some(&[0])),
                                                (268, 13, Some(&[255])),
                                                (269, 14, Some(&[0, 0])),
                                                (270, 14, Some(&[0, 1])),
                                                (280, 14, Some(&[0, 11]))];

    for (val, nibble, ext) in cases {
      let (actual_nibble, actual_ext) = opt_len_or_delta(val);
      assert_eq!(actual_nibble, nibble, "value {}", val);
      assert_eq!(actual_ext.as_ref().map(|bytes| bytes.as_ref()),
                 ext,
                 "value {}",
                 val);
    }
  }

  #[test]
  fn opt_emission() {
    let cases: [(u32, usize, Vec<u8>); 3] =
      [(1, 1, vec![0b0001_0001, 1]),
       (24, 1, vec![0b1101_0001, 24 - 13, 1]),
       (24, 300, [vec![0b1101_1110u8, 24 - 13],
                  (300u16 - 269).to_be_bytes().to_vec(),
                  vec![1; 300]].concat())];

    for (num, value_len, expected) in cases {
      let opt = Opt::new(OptNumber(num), &vec![1; value_len]);
      let mut buf = vec![0; expected.len()];
      let written = opt.write_to(&mut buf, OptNumber(0));
      assert_eq!(written, expected.len());
      assert_eq!(buf, expected);
    }
  }

  #[test]
  fn no_payload_marker_when_payload_empty() {
    let mut msg = Message::new();
    msg.set_code(2, 5).unwrap();

    let bytes = msg.try_into_bytes().unwrap();
    assert_eq!(bytes.len(), 4);
    assert_ne!(bytes.last(), Some(&0xFF));
  }

  #[test]
  fn write_to_reports_exact_size_needed() {
    let (msg, expected) = crate::test_msg();

    let mut small = [0u8; 4];
    assert_eq!(msg.write_to(&mut small),
               Err(MessageToBytesError::TooLong { capacity: 4,
                                                  size: expected.len() }));

    let mut exact = vec![0; expected.len()];
    assert_eq!(msg.write_to(&mut exact), Ok(expected.len()));
    assert_eq!(exact, expected);
  }

  #[test]
  fn write_to_refuses_unencodable_options() {
    let mut msg = Message::new();
    msg.set_code(0, 1).unwrap();
    msg.add_opt(OptNumber(MAX_OPT_EXT + 1), b"");

    let mut buf = [0u8; 32];
    assert_eq!(msg.write_to(&mut buf),
               Err(MessageToBytesError::OptDeltaTooLarge(MAX_OPT_EXT + 1)));
  }

  #[test]
  fn write_to_runs_the_check_first() {
    let mut msg = Message::new();
    msg.ty = Type::Non;

    let mut buf = [0u8; 16];
    assert_eq!(msg.write_to(&mut buf),
               Err(MessageToBytesError::Check(MessageCheckError::EmptyNonConfirmable)));
  }

  #[test]
  fn encoded_size_matches_emission() {
    let (msg, bytes) = crate::test_msg();
    assert_eq!(msg.encoded_size(), bytes.len());
  }
}
