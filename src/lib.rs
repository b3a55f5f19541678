//! Adapters around `wordlzw` for callers holding text, files or opaque byte blobs.
//!
//! The blob is the serialized stream of `wordlzw`: the length header, then the 16 bit
//! codewords, all little endian. Hosts can store and move it around without looking inside.

pub mod file;
pub mod map;

use anyhow::{Context, Result};
use wordlzw::{decoder::Decoder, encoder::Encoder, Config};

/// Compress `text` into a blob.
pub fn compress_string(text: &str) -> Result<Vec<u8>> {
    Encoder::new(Config::default())
        .encode_to_vec(text.as_bytes())
        .context("Couldn't compress string")
}

/// Decompress a blob made by [compress_string] back into text.
pub fn decompress_string(blob: &[u8]) -> Result<String> {
    let bytes = Decoder::new(Config::default())
        .decode_bytes(blob)
        .context("Couldn't decompress string")?;
    String::from_utf8(bytes).context("Decompressed data isn't valid UTF-8")
}
