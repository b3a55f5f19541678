use anyhow::Result;
use wordlzw::{decoder::Decoder, encoder::Encoder, Config, WhenFull};

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua.";

fn main() -> Result<()> {
    let config = Config::default().max_code(4095).when_full(WhenFull::Freeze);

    let compressed = Encoder::new(config).encode_to_vec(LOREM_IPSUM.as_bytes())?;
    println!(
        "Original size: {}, compressed size: {}",
        LOREM_IPSUM.len(),
        compressed.len()
    );

    let decompressed = Decoder::new(config).decode_bytes(&compressed)?;

    assert_eq!(decompressed, LOREM_IPSUM.as_bytes());

    Ok(())
}
