use std::io::Write;

use lzw_host::{compress_string, decompress_string, file, map::MapCodec};
use rand::{prelude::StdRng, RngCore, SeedableRng};
use wordlzw::{
    compress, decompress, decoder::Decoder, encoder::Encoder, CodeStream, Codeword, Config,
};

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
    nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn samples() -> Vec<Vec<u8>> {
    vec![
        vec![],
        b"A".to_vec(),
        b"ABABABA".to_vec(),
        b"TOBEORNOTTOBEORTOBEORNOT".to_vec(),
        vec![0x41; 256],
        (0..=255).collect(),
        (0..20_000u32).map(|i| (i * i % 7) as u8).collect(),
        LOREM_IPSUM.repeat(20).into_bytes(),
    ]
}

#[test]
fn trie_encoder_matches_reference() {
    for data in samples() {
        let stream = compress(&data).unwrap();

        assert_eq!(stream.codes(), MapCodec::compress(&data));
    }
}

#[test]
fn string_table_decoder_matches_reference() {
    for data in samples() {
        let codes = MapCodec::compress(&data);
        let stream = CodeStream::new(data.len() as u64, codes.clone());

        assert_eq!(decompress(&stream).unwrap(), data);
        assert_eq!(MapCodec::decompress(&codes).unwrap(), data);
    }
}

#[test]
fn reference_matches_once_the_dictionary_is_full() {
    // Random bytes learn close to one entry per byte, more than 65535 of them.
    let mut data = vec![0; 150_000];
    StdRng::seed_from_u64(5).fill_bytes(&mut data);

    let codes = MapCodec::compress(&data);
    let (stream, summary) = Encoder::new(Config::default())
        .encode_with_summary(&data)
        .unwrap();

    assert!(summary.frozen);
    assert!(codes.iter().all(|&code| code != 0));
    assert!(codes.iter().any(|&code| code > Codeword::MAX - 1000));
    assert_eq!(codes, stream.codes());
    assert_eq!(MapCodec::decompress(&codes).unwrap(), data);
}

#[test]
fn compress_a_file() {
    let mut source = tempfile::NamedTempFile::new().unwrap();
    source.write_all(LOREM_IPSUM.as_bytes()).unwrap();
    source.flush().unwrap();

    let blob = file::compress_file(source.path(), None, Config::default()).unwrap();
    let decoded = Decoder::new(Config::default()).decode_bytes(&blob).unwrap();

    assert_eq!(decoded, LOREM_IPSUM.as_bytes());
}

#[test]
fn read_an_empty_file() {
    let source = tempfile::NamedTempFile::new().unwrap();

    let data = file::read_source(source.path(), Some(0)).unwrap();

    assert!(data.is_empty());
}

#[test]
fn refuse_a_file_over_the_limit() {
    let mut source = tempfile::NamedTempFile::new().unwrap();
    source.write_all(&[0; 100]).unwrap();
    source.flush().unwrap();

    assert!(file::read_source(source.path(), Some(100)).is_ok());

    let error = file::read_source(source.path(), Some(99)).err().unwrap();
    assert!(error.to_string().ends_with("is 100 bytes long, the limit is 99 bytes"));
}

#[test]
fn missing_file() {
    let directory = tempfile::tempdir().unwrap();

    let error = file::read_source(directory.path().join("nothing.txt"), None)
        .err()
        .unwrap();

    assert!(error.to_string().starts_with("Couldn't open"));
}

#[test]
fn blob_from_string_is_a_stream() {
    let blob = compress_string(LOREM_IPSUM).unwrap();

    let stream = CodeStream::from_bytes(&blob).unwrap();
    assert_eq!(stream.original_len(), LOREM_IPSUM.len() as u64);
    assert_eq!(stream.codes(), MapCodec::compress(LOREM_IPSUM.as_bytes()));

    assert_eq!(decompress_string(&blob).unwrap(), LOREM_IPSUM);
}
