//! Reading whole files as compression input.

use std::{fs::File, io::Read, path::Path};

use anyhow::{bail, Context, Result};
use wordlzw::{encoder::Encoder, Config};

/// Read the whole file at `path`, refusing files over `max_len` bytes.
pub fn read_source<P: AsRef<Path>>(path: P, max_len: Option<u64>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Couldn't open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("Couldn't read the size of {}", path.display()))?
        .len();

    if let Some(max_len) = max_len {
        if len > max_len {
            bail!(
                "{} is {len} bytes long, the limit is {max_len} bytes",
                path.display()
            );
        }
    }

    let mut data = Vec::new();
    data.try_reserve_exact(len as usize)
        .with_context(|| format!("Not enough memory to read {}", path.display()))?;
    file.read_to_end(&mut data)
        .with_context(|| format!("Couldn't read {}", path.display()))?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());

    Ok(data)
}

/// Compress the file at `path` into a serialized stream.
pub fn compress_file<P: AsRef<Path>>(
    path: P,
    max_len: Option<u64>,
    config: Config,
) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = read_source(path, max_len)?;
    Encoder::new(config)
        .encode_to_vec(&data)
        .with_context(|| format!("Couldn't compress {}", path.display()))
}
