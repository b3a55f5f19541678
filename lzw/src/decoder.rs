//! Contains the LZW decoder.

use std::{
    collections::TryReserveError,
    fmt::Display,
    io::{Read, Write},
};

use crate::{stream::CodeStream, Codeword, Config, FIRST_LEARNED_CODE, MIN_MAX_CODE};

/// The error type for decoding operations.
#[derive(Debug)]
pub enum DecodingError {
    /// An I/O error happened when reading or writing data.
    Io(std::io::Error),
    /// The dictionary ceiling is too low to hold the 256 single bytes.
    MaxCode(Codeword),
    /// The serialized stream is shorter than a header, or ends in the middle of a codeword.
    Truncated { len: usize },
    /// A codeword that isn't in the dictionary, and isn't the one about to be added either.
    ///
    /// `position` counts stream elements, the header being element 0.
    InvalidCode {
        code: Codeword,
        position: usize,
        next_code: u32,
    },
    /// The decoded data doesn't have the length announced by the header.
    LengthMismatch { expected: u64, actual: u64 },
    /// The header announces more data than this platform can hold in memory.
    OutputTooLarge(u64),
    /// The dictionary or the output couldn't grow.
    Allocation(TryReserveError),
}

impl Display for DecodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodingError::Io(error) => error.fmt(f),
            DecodingError::MaxCode(max_code) => f.write_fmt(format_args!(
                "Max code must be at least {MIN_MAX_CODE}, was {max_code}."
            )),
            DecodingError::Truncated { len } => {
                f.write_fmt(format_args!("Truncated stream of {len} bytes."))
            }
            DecodingError::InvalidCode {
                code,
                position,
                next_code,
            } => f.write_fmt(format_args!(
                "Invalid code {code} at position {position}, the next code would be {next_code}."
            )),
            DecodingError::LengthMismatch { expected, actual } => f.write_fmt(format_args!(
                "Header announced {expected} bytes, but the codes decode to {actual}."
            )),
            DecodingError::OutputTooLarge(len) => {
                f.write_fmt(format_args!("Can't decode {len} bytes on this platform."))
            }
            DecodingError::Allocation(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for DecodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodingError::Io(error) => Some(error),
            DecodingError::Allocation(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DecodingError {
    fn from(error: std::io::Error) -> Self {
        DecodingError::Io(error)
    }
}

impl From<TryReserveError> for DecodingError {
    fn from(error: TryReserveError) -> Self {
        DecodingError::Allocation(error)
    }
}

/// The decoder dictionary: the string of every codeword, indexed by codeword.
///
/// Slot 0 stays empty, as no codeword 0 exists.
struct StringTable {
    entries: Vec<Vec<u8>>,
    max_code: Codeword,
}

impl StringTable {
    fn seeded(max_code: Codeword) -> Result<Self, TryReserveError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(FIRST_LEARNED_CODE as usize)?;
        entries.push(vec![]);
        entries.extend((0..=u8::MAX).map(|k| vec![k]));
        log::debug!("Seeded string table with {} entries", entries.len() - 1);

        Ok(Self { entries, max_code })
    }

    /// The codeword the next entry will get.
    #[inline(always)]
    fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    fn is_full(&self) -> bool {
        self.next_code() > self.max_code as u32
    }

    #[inline(always)]
    fn get(&self, code: Codeword) -> Option<&[u8]> {
        match code {
            0 => None,
            code => self.entries.get(code as usize).map(Vec::as_slice),
        }
    }

    /// Add `entry` under [StringTable::next_code], unless the table is full.
    fn push(&mut self, entry: Vec<u8>) -> Result<(), TryReserveError> {
        if self.is_full() {
            return Ok(());
        }
        if self.entries.len() == self.entries.capacity() {
            // Double the capacity.
            self.entries.try_reserve_exact(self.entries.capacity())?;
        }
        log::trace!("New entry {}", self.next_code());
        self.entries.push(entry);
        Ok(())
    }
}

/// LZW decoder reading fixed 16 bit codewords.
///
/// The `max_code` of the [Config] can't be lower than the one the data was encoded with.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: Config,
}

impl Decoder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Decompress a [CodeStream].
    ///
    /// # Errors
    ///
    /// Fails on an invalid [Config], when allocation fails, when the stream holds codes that
    /// can't be decoded, or when the output length differs from the header.
    ///
    /// # Examples
    /// ```
    /// use wordlzw::{decoder::{Decoder, DecodingError}, CodeStream, Config};
    ///
    /// fn main() -> Result<(), DecodingError> {
    ///     let stream = CodeStream::new(4, vec![1, 1, 2, 4]);
    ///     let data = Decoder::new(Config::default()).decode(&stream)?;
    ///
    ///     assert_eq!(data, [0, 0, 1, 3]);
    ///     Ok(())
    /// }
    /// ```
    pub fn decode(&self, stream: &CodeStream) -> Result<Vec<u8>, DecodingError> {
        let max_code = self.config.max_code_limit();
        if !self.config.is_valid() {
            return Err(DecodingError::MaxCode(max_code));
        }

        // The header isn't trusted beyond what the codes can decode to.
        let expected = stream.original_len();
        let reserved = expected.min(max_decoded_len(stream.codes().len()));
        let reserved =
            usize::try_from(reserved).map_err(|_| DecodingError::OutputTooLarge(expected))?;

        let mut table = StringTable::seeded(max_code)?;
        let mut output = Vec::new();
        output.try_reserve_exact(reserved)?;

        let mut codes = stream.codes().iter().copied().enumerate();
        let Some((_, first)) = codes.next() else {
            return check_length(output, expected);
        };
        let Some(entry) = table.get(first) else {
            return Err(DecodingError::InvalidCode {
                code: first,
                position: 1,
                next_code: table.next_code(),
            });
        };
        output.extend_from_slice(entry);

        // The last code read, and the last code whose string went to the output. A code not yet
        // in the table is resolved with the latter.
        let mut previous = first;
        let mut last_emitted = first;

        for (index, code) in codes {
            let next_code = table.next_code();

            let new_entry = if let Some(entry) = table.get(code) {
                output.extend_from_slice(entry);
                last_emitted = code;

                let prefix = &table.entries[previous as usize];
                let mut new_entry = Vec::new();
                new_entry.try_reserve_exact(prefix.len() + 1)?;
                new_entry.extend_from_slice(prefix);
                new_entry.push(entry[0]);
                new_entry
            } else if code as u32 == next_code && !table.is_full() {
                // The encoder used the entry it had just created: it's the last string, followed
                // by its own first byte.
                let last = &table.entries[last_emitted as usize];
                let mut new_entry = Vec::new();
                new_entry.try_reserve_exact(last.len() + 1)?;
                new_entry.extend_from_slice(last);
                new_entry.push(last[0]);

                output.extend_from_slice(&new_entry);
                last_emitted = code;
                new_entry
            } else {
                return Err(DecodingError::InvalidCode {
                    code,
                    position: index + 1,
                    next_code,
                });
            };

            if output.len() as u64 > expected {
                return Err(DecodingError::LengthMismatch {
                    expected,
                    actual: output.len() as u64,
                });
            }

            table.push(new_entry)?;
            previous = code;
        }

        log::debug!(
            "Decoded {} codewords into {} bytes, {} dictionary entries",
            stream.codes().len(),
            output.len(),
            table.next_code() - 1
        );

        check_length(output, expected)
    }

    /// Decompress a serialized stream.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodingError> {
        let stream = CodeStream::from_bytes(bytes)?;
        self.decode(&stream)
    }

    /// Decompress the serialized stream read from `data`, writing the result into `into`.
    pub fn decode_from<R: Read, W: Write>(&self, data: R, into: W) -> Result<(), DecodingError> {
        let stream = CodeStream::read_from(data)?;
        let decoded = self.decode(&stream)?;

        let mut into = into;
        into.write_all(&decoded)?;
        into.flush()?;
        Ok(())
    }
}

/// The longest output `code_count` codewords can decode to.
///
/// The first codeword is a single byte, and each one after it is at most one byte longer than
/// the previous one.
fn max_decoded_len(code_count: usize) -> u64 {
    let n = code_count as u64;
    n.saturating_mul(n.saturating_add(1)) / 2
}

fn check_length(output: Vec<u8>, expected: u64) -> Result<Vec<u8>, DecodingError> {
    let actual = output.len() as u64;
    if actual == expected {
        Ok(output)
    } else {
        Err(DecodingError::LengthMismatch { expected, actual })
    }
}
