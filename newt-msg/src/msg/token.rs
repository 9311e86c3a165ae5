use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tinyvec::ArrayVec;

/// # Message Token
///
/// 0-8 opaque bytes that correlate a response with the request that
/// caused it, independently of the message [`Id`](crate::Id): the id
/// pairs an acknowledgement with a single transmission, the token pairs
/// a response with a request across retransmissions and across
/// non-confirmable exchanges.
///
/// The 8-byte bound is structural; a `Token` holding more cannot be
/// constructed.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Token(pub ArrayVec<[u8; 8]>);

/// Error: a token was given more than 8 bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenTooLong(pub usize);

impl<'a> TryFrom<&'a [u8]> for Token {
  type Error = TokenTooLong;

  fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
    if bytes.len() > 8 {
      return Err(TokenTooLong(bytes.len()));
    }

    let mut buf = ArrayVec::new();
    buf.extend_from_slice(bytes);
    Ok(Token(buf))
  }
}

impl Token {
  /// Take an arbitrary-length sequence of bytes and turn it into an
  /// opaque 8-byte message token, deterministically.
  ///
  /// Currently uses the BLAKE2 hashing algorithm, but this may change
  /// in the future.
  ///
  /// ```
  /// use newt_msg::Token;
  ///
  /// let my_token = Token::opaque(&[0, 1, 2]);
  /// assert_eq!(my_token, Token::opaque(&[0, 1, 2]));
  /// ```
  pub fn opaque(data: &[u8]) -> Token {
    use blake2::digest::consts::U8;
    use blake2::{Blake2b, Digest};

    let mut digest = Blake2b::<U8>::new();
    digest.update(data);
    Token(Into::<[u8; 8]>::into(digest.finalize()).into())
  }
}

/// Source of pseudo-random token bytes.
///
/// The generator owns its RNG state outright; there is no process-wide
/// seed flag and therefore no first-use race. Seed one and thread it
/// through whatever layer mints tokens.
///
/// ChaCha8 is not a cryptographic guarantee here: the output is only as
/// unpredictable as the seed. Deployments that need unguessable tokens
/// should seed from an entropy source rather than the clock.
#[derive(Clone, Debug)]
pub struct TokenGenerator {
  rand: ChaCha8Rng,
}

impl TokenGenerator {
  /// Create a generator from a 64-bit seed
  pub fn new(seed: u64) -> Self {
    Self { rand: ChaCha8Rng::seed_from_u64(seed) }
  }

  /// Create a generator seeded from the system clock, in milliseconds
  /// since the unix epoch
  #[cfg(feature = "std")]
  pub fn from_system_time() -> Self {
    let ms = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)
                                         .map(|d| d.as_millis() as u64)
                                         .unwrap_or(0);
    Self::new(ms)
  }

  /// Fill `buf` with pseudo-random bytes
  pub fn fill(&mut self, buf: &mut [u8]) {
    self.rand.fill(buf)
  }

  /// Mint a fresh token of `len` random bytes
  pub fn token(&mut self, len: usize) -> Result<Token, TokenTooLong> {
    if len > 8 {
      return Err(TokenTooLong(len));
    }

    let mut buf = [0u8; 8];
    self.fill(&mut buf[..len]);
    Token::try_from(&buf[..len])
  }
}
