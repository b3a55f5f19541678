//! Contains the LZW encoder.

use std::{collections::TryReserveError, fmt::Display, io::Write};

use crate::{
    stream::CodeStream,
    trie::{Put, Trie},
    Codeword, Config, WhenFull, MIN_MAX_CODE,
};

/// The error type for encoding operations.
#[derive(Debug)]
pub enum EncodingError {
    /// An I/O error happened when writing the compressed stream.
    Io(std::io::Error),
    /// The dictionary ceiling is too low to hold the 256 single bytes.
    MaxCode(Codeword),
    /// Every codeword up to `max_code` is taken, and the config asked to fail in that case.
    DictionaryFull { max_code: Codeword },
    /// The dictionary or the output couldn't grow.
    Allocation(TryReserveError),
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingError::Io(error) => std::fmt::Display::fmt(&error, f),
            EncodingError::MaxCode(max_code) => f.write_fmt(format_args!(
                "Max code must be at least {MIN_MAX_CODE}, was {max_code}."
            )),
            EncodingError::DictionaryFull { max_code } => f.write_fmt(format_args!(
                "Dictionary full, no codeword left after {max_code}."
            )),
            EncodingError::Allocation(error) => std::fmt::Display::fmt(&error, f),
        }
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodingError::Io(error) => Some(error),
            EncodingError::Allocation(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EncodingError {
    fn from(error: std::io::Error) -> Self {
        EncodingError::Io(error)
    }
}

impl From<TryReserveError> for EncodingError {
    fn from(error: TryReserveError) -> Self {
        EncodingError::Allocation(error)
    }
}

/// What happened to the dictionary during one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Entries in the dictionary at the end, the 256 single bytes included.
    pub entries: u32,
    /// Whether the dictionary hit its ceiling and stopped growing.
    pub frozen: bool,
}

/// LZW encoder writing fixed 16 bit codewords.
///
/// Each call builds its own dictionary and drops it before returning, so one encoder can be
/// used any number of times, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: Config,
}

impl Encoder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compress `data` into a [CodeStream].
    ///
    /// # Errors
    ///
    /// Fails on an invalid [Config], when allocation fails, or when the dictionary is full
    /// and the config says [WhenFull::Fail].
    ///
    /// # Examples
    /// ```
    /// use wordlzw::{encoder::{EncodingError, Encoder}, Config};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let stream = Encoder::new(Config::default()).encode(&[0, 0, 1, 3])?;
    ///
    ///     assert_eq!(stream.original_len(), 4);
    ///     assert_eq!(stream.codes(), [1, 1, 2, 4]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode(&self, data: &[u8]) -> Result<CodeStream, EncodingError> {
        self.encode_with_summary(data).map(|(stream, _)| stream)
    }

    /// Same as [Encoder::encode], also telling how the dictionary grew.
    pub fn encode_with_summary(
        &self,
        data: &[u8],
    ) -> Result<(CodeStream, Summary), EncodingError> {
        let max_code = self.config.max_code_limit();
        if !self.config.is_valid() {
            return Err(EncodingError::MaxCode(max_code));
        }

        // Without compression, that's one code per byte.
        let mut codes: Vec<Codeword> = Vec::new();
        codes.try_reserve(data.len())?;

        let mut trie = Trie::seeded(max_code)?;
        let mut frozen = false;

        let mut bytes = data.iter().copied();
        if let Some(first) = bytes.next() {
            let (mut node, mut code) = trie.single(first);

            for k in bytes {
                if let Some((next_node, next_code)) = trie.lookup(node, k) {
                    node = next_node;
                    code = next_code;
                } else {
                    log::trace!("Emit {code}");
                    codes.push(code);

                    if !frozen && trie.extend(node, k)? == Put::Full {
                        match self.config.policy() {
                            WhenFull::Fail => return Err(EncodingError::DictionaryFull { max_code }),
                            WhenFull::Freeze => {
                                log::warn!(
                                    "Dictionary full at codeword {max_code}, it won't grow anymore"
                                );
                                frozen = true;
                            }
                        }
                    }

                    (node, code) = trie.single(k);
                }
            }

            log::trace!("Emit {code}");
            codes.push(code);
        }

        let summary = Summary {
            entries: trie.len(),
            frozen,
        };
        log::debug!(
            "Encoded {} bytes into {} codewords, {} dictionary entries",
            data.len(),
            codes.len(),
            summary.entries
        );

        Ok((CodeStream::new(data.len() as u64, codes), summary))
    }

    /// Compress `data` and write the serialized stream into `into`.
    pub fn encode_to<W: Write>(&self, data: &[u8], into: W) -> Result<(), EncodingError> {
        let stream = self.encode(data)?;
        stream.write_to(into)?;
        Ok(())
    }

    /// Compress `data` into a serialized stream.
    /// Convenient wrapper that creates a [Vec<u8>] under the hood.
    ///
    /// # Examples
    /// ```
    /// use wordlzw::{encoder::{EncodingError, Encoder}, Config};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let output = Encoder::new(Config::default()).encode_to_vec(&[0, 0, 1, 3])?;
    ///
    ///     assert_eq!(output, [4, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 2, 0, 4, 0]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>, EncodingError> {
        Ok(self.encode(data)?.to_bytes()?)
    }
}
