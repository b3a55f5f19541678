//! The compressed stream and its byte layout.
//!
//! ```text
//! +----------------------+-----------+-----------+-----+
//! | original length: u64 | code: u16 | code: u16 | ... |
//! +----------------------+-----------+-----------+-----+
//! ```
//!
//! Every number is little endian. The header is as wide as it needs to be for real inputs,
//! independently of the codeword width.

use std::io::{Read, Write};

use bitstream_io::{ByteRead, ByteReader, ByteWrite, ByteWriter, LittleEndian};

use crate::{decoder::DecodingError, Codeword};

/// Size of the length header, in bytes.
pub const HEADER_SIZE: usize = std::mem::size_of::<u64>();

/// Size of one codeword, in bytes.
pub const CODEWORD_SIZE: usize = std::mem::size_of::<Codeword>();

/// A header, followed by codewords in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeStream {
    original_len: u64,
    codes: Vec<Codeword>,
}

impl CodeStream {
    pub fn new(original_len: u64, codes: Vec<Codeword>) -> Self {
        Self {
            original_len,
            codes,
        }
    }

    /// Length of the uncompressed data, as stated by the header.
    pub fn original_len(&self) -> u64 {
        self.original_len
    }

    pub fn codes(&self) -> &[Codeword] {
        &self.codes
    }

    pub fn into_codes(self) -> Vec<Codeword> {
        self.codes
    }

    /// Number of stream elements, the header included.
    pub fn word_count(&self) -> usize {
        self.codes.len() + 1
    }

    /// Size of the serialized stream, in bytes.
    pub fn byte_len(&self) -> usize {
        HEADER_SIZE + self.codes.len() * CODEWORD_SIZE
    }

    pub fn write_to<W: Write>(&self, into: W) -> Result<(), std::io::Error> {
        let mut writer = ByteWriter::endian(into, LittleEndian);
        writer.write(self.original_len)?;
        for &code in &self.codes {
            writer.write(code)?;
        }
        Ok(())
    }

    /// Serialize into a new [Vec<u8>], see [CodeStream::write_to].
    pub fn to_bytes(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Read a whole serialized stream, until the end of `data`.
    pub fn read_from<R: Read>(data: R) -> Result<Self, DecodingError> {
        let mut data = data;
        let mut bytes = vec![];
        data.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodingError> {
        if bytes.len() < HEADER_SIZE || (bytes.len() - HEADER_SIZE) % CODEWORD_SIZE != 0 {
            return Err(DecodingError::Truncated { len: bytes.len() });
        }
        let count = (bytes.len() - HEADER_SIZE) / CODEWORD_SIZE;

        let mut reader = ByteReader::endian(bytes, LittleEndian);
        let original_len: u64 = reader.read()?;
        let mut codes = Vec::new();
        codes.try_reserve_exact(count)?;
        for _ in 0..count {
            codes.push(reader.read::<Codeword>()?);
        }

        Ok(Self {
            original_len,
            codes,
        })
    }
}
