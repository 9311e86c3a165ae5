//! Low-level representation of CoAP messages (RFC 7252).
//!
//! The most notable item in `newt_msg` is [`Message`]: an owned CoAP
//! message very close to the actual byte layout. Parsing and serializing
//! are both strict about the base message format:
//!
//! - a buffer only parses if **all** of it is a conforming message
//!   (version 1, token of at most 8 bytes, known code class, well-formed
//!   delta-encoded options, a `0xFF` marker in front of any payload), and
//! - a message only serializes if it satisfies the RFC 7252 cross-field
//!   rules (an Empty message carries nothing after the message id, a
//!   Reset is always Empty, a Non-confirmable message is never Empty).
//!
//! The same [`Message::check`] runs at the end of every parse and the
//! start of every serialize, so any `Message` observed outside this crate
//! satisfies those rules.
//!
//! ## Allocation
//! A `Message` exclusively owns its option records and payload buffer;
//! every constructor and setter copies the bytes it is given, and the
//! caller's buffer is never retained. The crate is `no_std`-compatible
//! (`alloc` is required, `std` is a default feature).
//!
//! ```
//! use newt_msg::{Id, Message, OptNumber, TryFromBytes, TryIntoBytes, Type};
//!
//! let mut msg = Message::new();
//! msg.ty = Type::Con;
//! msg.id = Id(0x0001);
//! msg.set_code(0, 1).unwrap(); // GET
//! msg.set_token(&[0x54]).unwrap();
//! msg.add_opt(OptNumber(11), b"a"); // Uri-Path
//!
//! let bytes = msg.clone().try_into_bytes().unwrap();
//! assert_eq!(bytes, vec![0x41, 0x01, 0x00, 0x01, 0x54, 0xB1, 0x61]);
//! assert_eq!(Message::try_from_bytes(&bytes).unwrap(), msg);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![deny(missing_docs)]

extern crate alloc as std_alloc;

#[doc(hidden)]
pub mod from_bytes;

/// Message structs
pub mod msg;

#[doc(hidden)]
pub mod to_bytes;

#[doc(inline)]
pub use from_bytes::TryFromBytes;
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use to_bytes::{MessageToBytesError, TryIntoBytes};

#[cfg(test)]
pub(crate) fn test_msg() -> (Message, Vec<u8>) {
  let header: [u8; 4] = 0b0100_0001_0100_0101_0000_0000_0000_0001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  let content_format: &[u8] = b"application/json";
  let options: [&[u8]; 2] = [&[0b1100_1101u8, 0b0000_0011u8], content_format];
  let payload: [&[u8]; 2] = [&[0xFFu8], b"hello, world!"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let mut msg = Message::new();
  msg.id = Id(1);
  msg.ty = Type::Con;
  msg.set_code(2, 5).unwrap();
  msg.set_token(&[254]).unwrap();
  msg.add_opt(OptNumber(12), content_format);
  msg.set_payload(b"hello, world!");
  (msg, bytes)
}
