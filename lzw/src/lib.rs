//! LZW encoder and decoder.
//!
//! This crate compresses bytes into a stream of fixed width 16 bit codewords, and back.
//! The encoder keeps its dictionary in a prefix trie, the decoder rebuilds the same dictionary
//! as a table of strings while it reads the codewords.
//!
//! Single bytes are always known: byte `b` is codeword `b + 1`, so codewords `1..=256` are the
//! seed alphabet and the first learned string is codeword 257. Codeword 0 is never assigned.
//!
//! A compressed stream starts with a header holding the length of the original data, followed
//! by the codewords. See [stream::CodeStream] for the byte layout.
//!
//! # Examples
//!
//! ```
//! use wordlzw::{
//!     decoder::{Decoder, DecodingError},
//!     encoder::Encoder,
//!     Config,
//! };
//!
//! fn main() -> Result<(), DecodingError> {
//!     let data = b"ABABABA";
//!
//!     let compressed = Encoder::new(Config::default()).encode(data).unwrap();
//!     assert_eq!(compressed.original_len(), 7);
//!     assert_eq!(compressed.codes(), [66, 67, 257, 259]);
//!
//!     let decompressed = Decoder::new(Config::default()).decode(&compressed)?;
//!     assert_eq!(decompressed, data);
//!     Ok(())
//! }
//! ```

pub mod decoder;
pub mod encoder;
pub mod stream;
pub mod trie;

pub use stream::CodeStream;

/// A reference to one dictionary entry.
pub type Codeword = u16;

/// Number of single byte entries every dictionary starts with.
pub const SEED_COUNT: u32 = 256;

/// First codeword handed out to a learned string.
pub const FIRST_LEARNED_CODE: u32 = SEED_COUNT + 1;

/// The smallest accepted dictionary ceiling: the seed alphabet has to fit.
pub const MIN_MAX_CODE: Codeword = SEED_COUNT as Codeword;

/// Codeword of a single byte.
#[inline(always)]
pub const fn seed_code(byte: u8) -> Codeword {
    byte as Codeword + 1
}

/// What to do when the dictionary reaches [Config::max_code].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenFull {
    /// Stop learning new strings, keep compressing with the known ones.
    Freeze,
    /// Abort the call with [encoder::EncodingError::DictionaryFull].
    Fail,
}

/// Dictionary settings.
///
/// A decoder needs a `max_code` at least as high as the encoder had, otherwise it rejects the
/// codes it can't learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_code: Codeword,
    when_full: WhenFull,
}

impl Config {
    /// Set the highest codeword the dictionary may assign. Must be at least 256.
    pub const fn max_code(mut self, max_code: Codeword) -> Self {
        self.max_code = max_code;
        self
    }

    /// Set the overflow policy.
    pub const fn when_full(mut self, when_full: WhenFull) -> Self {
        self.when_full = when_full;
        self
    }

    /// The highest codeword the dictionary may assign.
    pub const fn max_code_limit(&self) -> Codeword {
        self.max_code
    }

    /// What happens once every codeword up to [Config::max_code_limit] is taken.
    pub const fn policy(&self) -> WhenFull {
        self.when_full
    }

    pub(crate) const fn is_valid(&self) -> bool {
        self.max_code >= MIN_MAX_CODE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_code: Codeword::MAX,
            when_full: WhenFull::Freeze,
        }
    }
}

/// Compress `data` with the default [Config].
pub fn compress(data: &[u8]) -> Result<CodeStream, encoder::EncodingError> {
    encoder::Encoder::new(Config::default()).encode(data)
}

/// Decompress a stream produced with the default [Config].
pub fn decompress(stream: &CodeStream) -> Result<Vec<u8>, decoder::DecodingError> {
    decoder::Decoder::new(Config::default()).decode(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.max_code_limit(), Codeword::MAX);
        assert_eq!(config.policy(), WhenFull::Freeze);
        assert!(config.is_valid());
    }

    #[test]
    fn config_builder() {
        let config = Config::default().max_code(4095).when_full(WhenFull::Fail);

        assert_eq!(config.max_code_limit(), 4095);
        assert_eq!(config.policy(), WhenFull::Fail);
        assert!(!Config::default().max_code(MIN_MAX_CODE - 1).is_valid());
        assert!(Config::default().max_code(MIN_MAX_CODE).is_valid());
    }
}
