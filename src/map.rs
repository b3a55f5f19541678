//! A straightforward LZW keeping whole strings in an insertion ordered set.
//!
//! Same seeding and numbering as `wordlzw`, and the same behavior as its default config once
//! every codeword is taken: the dictionary stops growing at [Codeword::MAX]. Slow, but easy to
//! trust: it is used to check the trie encoder and the string table decoder, code for code.

use indexmap::IndexSet;
use wordlzw::Codeword;

/// Codewords start at 1, so the set holds at most this many strings.
const MAX_ENTRIES: usize = Codeword::MAX as usize;

/// Codeword `code` is the string at index `code - 1`.
struct CompressionTable {
    entries: IndexSet<Vec<u8>>,
}

impl CompressionTable {
    fn new() -> Self {
        let entries: IndexSet<_> = (0..=u8::MAX).map(|k| vec![k]).collect();

        Self { entries }
    }

    fn code_for(&self, string: &[u8]) -> Option<Codeword> {
        self.entries
            .get_index_of(string)
            .map(|index| (index + 1) as Codeword)
    }

    fn contains(&self, string: &[u8]) -> bool {
        self.entries.contains(string)
    }

    fn add(&mut self, entry: Vec<u8>) {
        if self.entries.len() < MAX_ENTRIES {
            self.entries.insert(entry);
        }
    }
}

struct DecompressionTable {
    entries: IndexSet<Vec<u8>>,
}

impl DecompressionTable {
    fn new() -> Self {
        let entries: IndexSet<_> = (0..=u8::MAX).map(|k| vec![k]).collect();

        Self { entries }
    }

    fn string_for(&self, code: Codeword) -> Option<&Vec<u8>> {
        (code as usize)
            .checked_sub(1)
            .and_then(|index| self.entries.get_index(index))
    }

    fn add(&mut self, entry: Vec<u8>) {
        if self.entries.len() < MAX_ENTRIES {
            self.entries.insert(entry);
        }
    }
}

pub struct MapCodec;

impl MapCodec {
    /// The codewords for `bytes`, without the length header.
    pub fn compress(bytes: &[u8]) -> Vec<Codeword> {
        let mut code_stream = vec![];

        let mut string_table = CompressionTable::new();
        let mut current_prefix: Vec<u8> = vec![];

        for &k in bytes {
            let mut current_string = current_prefix.clone();
            current_string.push(k);

            if string_table.contains(&current_string) {
                current_prefix = current_string;
            } else {
                string_table.add(current_string);
                code_stream.extend(string_table.code_for(&current_prefix));
                current_prefix.clear();
                current_prefix.push(k);
            }
        }

        if !current_prefix.is_empty() {
            code_stream.extend(string_table.code_for(&current_prefix));
        }

        code_stream
    }

    /// The bytes for `data`, or `None` if a code can't be decoded.
    pub fn decompress(data: &[Codeword]) -> Option<Vec<u8>> {
        let mut char_stream: Vec<u8> = vec![];
        let mut string_table = DecompressionTable::new();

        let Some((&first, rest)) = data.split_first() else {
            return Some(char_stream);
        };
        let mut previous_entry = string_table.string_for(first)?.clone();
        char_stream.extend_from_slice(&previous_entry);

        for &current_code in rest {
            let entry = if let Some(string) = string_table.string_for(current_code) {
                string.clone()
            } else if current_code as usize == string_table.entries.len() + 1 {
                let mut entry = previous_entry.clone();
                entry.push(previous_entry[0]);
                entry
            } else {
                return None;
            };

            char_stream.extend_from_slice(&entry);

            previous_entry.push(entry[0]);
            string_table.add(previous_entry);
            previous_entry = entry;
        }

        Some(char_stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_tobeornot() {
        let codes = MapCodec::compress(b"TOBEORNOTTOBEORTOBEORNOT");

        assert_eq!(
            codes,
            [85, 80, 67, 70, 80, 83, 79, 80, 85, 257, 259, 261, 266, 260, 262, 264]
        );
    }

    #[test]
    fn compress_decompress() {
        let original = "Just a simple ASCII string, without issues";

        let compressed = MapCodec::compress(original.as_bytes());
        let decoded = MapCodec::decompress(&compressed).unwrap();

        assert_eq!(original.as_bytes(), decoded);
    }

    #[test]
    fn decompress_code_used_right_after_creation() {
        assert_eq!(MapCodec::decompress(&[66, 67, 257, 259]).unwrap(), b"ABABABA");
    }

    #[test]
    fn decompress_unknown_code() {
        assert_eq!(MapCodec::decompress(&[66, 300]), None);
        assert_eq!(MapCodec::decompress(&[0]), None);
    }

    #[test]
    fn full_tables_stop_growing() {
        let mut compression = CompressionTable::new();
        let mut decompression = DecompressionTable::new();
        for i in 0..MAX_ENTRIES as u32 {
            compression.add(i.to_le_bytes().to_vec());
            decompression.add(i.to_le_bytes().to_vec());
        }

        assert_eq!(compression.entries.len(), MAX_ENTRIES);
        assert_eq!(decompression.entries.len(), MAX_ENTRIES);
        assert_eq!(
            compression.code_for(&(MAX_ENTRIES as u32 - 257).to_le_bytes()),
            Some(Codeword::MAX)
        );
        assert!(!compression.contains(&(MAX_ENTRIES as u32).to_le_bytes()));
        assert!(decompression.string_for(Codeword::MAX).is_some());
    }

    #[test]
    fn empty() {
        assert!(MapCodec::compress(b"").is_empty());
        assert_eq!(MapCodec::decompress(&[]).unwrap(), b"");
    }
}
