//! The encoder dictionary: a prefix trie mapping byte strings to codewords.
//!
//! Nodes live in a single arena and refer to each other by index, inspired by
//! https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6
//! Dropping the [Trie] releases every node at once.

use std::collections::TryReserveError;

use crate::{seed_code, Codeword, FIRST_LEARNED_CODE};

/// Index of a node in the trie arena.
pub type NodeId = u32;

const ROOT: NodeId = 0;

/// Most nodes end up with zero or one child, and it gets rarer the more children there are.
/// A full table of 256 children is only allocated once a node gets a second child.
#[derive(Debug, Clone)]
enum Children {
    None,
    One(u8, NodeId),
    // The root can't be anyone's child, so 0 marks an empty slot.
    Many(Vec<NodeId>),
}

#[derive(Debug, Clone)]
struct Node {
    code: Option<Codeword>,
    children: Children,
}

impl Node {
    const fn empty() -> Self {
        Self {
            code: None,
            children: Children::None,
        }
    }
}

/// Outcome of [Trie::put] and [Trie::extend].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Put {
    /// The string is a new entry, with this codeword.
    Inserted(Codeword),
    /// The string was already an entry.
    Present(Codeword),
    /// Every codeword up to the ceiling is taken, nothing was inserted.
    Full,
}

/// Prefix trie with monotonically assigned codewords.
///
/// A node without a codeword is a prefix of longer entries but not an entry itself.
pub struct Trie {
    nodes: Vec<Node>,
    next_code: u32,
    max_code: Codeword,
}

impl Trie {
    /// An empty trie: only the root, standing for the empty string, without a codeword.
    ///
    /// Codewords are handed out from 1 up to `max_code` included.
    pub fn new(max_code: Codeword) -> Self {
        Self {
            nodes: vec![Node::empty()],
            next_code: 1,
            max_code,
        }
    }

    /// A trie holding the 256 single byte strings, as codewords 1 to 256.
    ///
    /// `max_code` must be at least 256.
    pub fn seeded(max_code: Codeword) -> Result<Self, TryReserveError> {
        let mut trie = Self::new(max_code);
        trie.nodes.try_reserve(FIRST_LEARNED_CODE as usize)?;
        for k in 0..=u8::MAX {
            trie.put(&[k])?;
        }
        log::debug!("Seeded trie with {} entries", trie.len());
        Ok(trie)
    }

    /// Codeword of the exact string `word`. Prefixes of entries don't match.
    pub fn get(&self, word: &[u8]) -> Option<Codeword> {
        let mut node = ROOT;
        for &k in word {
            node = self.child(node, k)?;
        }
        self.nodes[node as usize].code
    }

    /// Insert `word` as an entry, with the next free codeword.
    ///
    /// Nothing happens if `word` is already an entry. The empty string is never an entry and
    /// reports [Put::Full] like any other string that can't be given a codeword.
    pub fn put(&mut self, word: &[u8]) -> Result<Put, TryReserveError> {
        if let Some(code) = self.get(word) {
            return Ok(Put::Present(code));
        }
        let Some((&last, prefix)) = word.split_last() else {
            return Ok(Put::Full);
        };
        if self.is_full() {
            return Ok(Put::Full);
        }

        let mut node = ROOT;
        for &k in prefix {
            node = match self.child(node, k) {
                Some(child) => child,
                None => self.add_child(node, k)?,
            };
        }
        self.extend(node, last)
    }

    /// Insert the string of `node` followed by `k`, the single step the encoder needs.
    pub fn extend(&mut self, node: NodeId, k: u8) -> Result<Put, TryReserveError> {
        let child = match self.child(node, k) {
            Some(child) => match self.nodes[child as usize].code {
                Some(code) => return Ok(Put::Present(code)),
                None => child,
            },
            None => {
                if self.is_full() {
                    return Ok(Put::Full);
                }
                self.add_child(node, k)?
            }
        };
        if self.is_full() {
            return Ok(Put::Full);
        }

        let code = self.next_code as Codeword;
        self.nodes[child as usize].code = Some(code);
        self.next_code += 1;
        log::trace!("New entry {code} under node {node}");
        Ok(Put::Inserted(code))
    }

    /// The entry for `node` followed by `k`, if it is one.
    #[inline(always)]
    pub fn lookup(&self, node: NodeId, k: u8) -> Option<(NodeId, Codeword)> {
        let child = self.child(node, k)?;
        self.nodes[child as usize].code.map(|code| (child, code))
    }

    /// The entry for the single byte `k` of a seeded trie.
    #[inline(always)]
    pub fn single(&self, k: u8) -> (NodeId, Codeword) {
        // Seeding creates the nodes 1 to 256 in byte order.
        (k as NodeId + 1, seed_code(k))
    }

    /// Number of entries, which is also the last codeword handed out.
    pub fn len(&self) -> u32 {
        self.next_code - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every codeword up to the ceiling has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_code > self.max_code as u32
    }

    #[inline(always)]
    fn child(&self, node: NodeId, k: u8) -> Option<NodeId> {
        match &self.nodes[node as usize].children {
            Children::None => None,
            &Children::One(child_k, child) => (child_k == k).then_some(child),
            Children::Many(children) => {
                let child = children[k as usize];
                (child != ROOT).then_some(child)
            }
        }
    }

    fn add_child(&mut self, node: NodeId, k: u8) -> Result<NodeId, TryReserveError> {
        self.nodes.try_reserve(1)?;
        let new_index = self.nodes.len() as NodeId;

        let parent = &mut self.nodes[node as usize];
        match &mut parent.children {
            Children::None => {
                parent.children = Children::One(k, new_index);
            }
            Children::One(other_k, other_index) => {
                let mut children = Vec::new();
                children.try_reserve_exact(1 << u8::BITS)?;
                children.resize(1 << u8::BITS, ROOT);
                children[*other_k as usize] = *other_index;
                children[k as usize] = new_index;
                parent.children = Children::Many(children);
            }
            Children::Many(children) => {
                children[k as usize] = new_index;
            }
        }
        self.nodes.push(Node::empty());
        Ok(new_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trie_knows_nothing() {
        let trie = Trie::new(Codeword::MAX);

        assert!(trie.is_empty());
        assert_eq!(trie.get(b""), None);
        assert_eq!(trie.get(b"A"), None);
    }

    #[test]
    fn seeded_trie_knows_every_byte() {
        let trie = Trie::seeded(Codeword::MAX).unwrap();

        assert_eq!(trie.len(), 256);
        for k in 0..=u8::MAX {
            assert_eq!(trie.get(&[k]), Some(k as Codeword + 1));
            assert_eq!(trie.single(k), (k as NodeId + 1, k as Codeword + 1));
            assert_eq!(trie.lookup(ROOT, k), Some(trie.single(k)));
        }
        assert_eq!(trie.get(b""), None);
    }

    #[test]
    fn put_assigns_increasing_codes() {
        let mut trie = Trie::seeded(Codeword::MAX).unwrap();

        assert_eq!(trie.put(b"AB").unwrap(), Put::Inserted(257));
        assert_eq!(trie.put(b"BA").unwrap(), Put::Inserted(258));
        assert_eq!(trie.put(b"ABA").unwrap(), Put::Inserted(259));
        assert_eq!(trie.put(b"AB").unwrap(), Put::Present(257));

        assert_eq!(trie.get(b"AB"), Some(257));
        assert_eq!(trie.get(b"BA"), Some(258));
        assert_eq!(trie.get(b"ABA"), Some(259));
        assert_eq!(trie.len(), 259);
    }

    #[test]
    fn prefixes_are_not_entries() {
        let mut trie = Trie::seeded(Codeword::MAX).unwrap();

        assert_eq!(trie.put(b"XYZ").unwrap(), Put::Inserted(257));

        assert_eq!(trie.get(b"XY"), None);
        assert_eq!(trie.get(b"XYZ"), Some(257));
        assert_eq!(trie.get(b"XYZZ"), None);

        // Completing the prefix later gives it the next code.
        assert_eq!(trie.put(b"XY").unwrap(), Put::Inserted(258));
        assert_eq!(trie.get(b"XY"), Some(258));
    }

    #[test]
    fn strings_with_any_byte() {
        let mut trie = Trie::seeded(Codeword::MAX).unwrap();

        assert_eq!(trie.put(&[0, 0]).unwrap(), Put::Inserted(257));
        assert_eq!(trie.put(&[0, 255, 0]).unwrap(), Put::Inserted(258));

        assert_eq!(trie.get(&[0, 0]), Some(257));
        assert_eq!(trie.get(&[0, 255, 0]), Some(258));
        assert_eq!(trie.get(&[0, 255]), None);
    }

    #[test]
    fn node_going_from_one_to_many_children() {
        let mut trie = Trie::seeded(Codeword::MAX).unwrap();
        let (a, _) = trie.single(b'A');

        for (i, k) in (b'a'..=b'z').enumerate() {
            assert_eq!(trie.extend(a, k).unwrap(), Put::Inserted(257 + i as Codeword));
        }
        for (i, k) in (b'a'..=b'z').enumerate() {
            let (_, code) = trie.lookup(a, k).unwrap();
            assert_eq!(code, 257 + i as Codeword);
        }
        assert_eq!(trie.lookup(a, b'A'), None);
    }

    #[test]
    fn full_trie_stops_growing() {
        let mut trie = Trie::seeded(258).unwrap();

        assert_eq!(trie.put(b"AB").unwrap(), Put::Inserted(257));
        assert_eq!(trie.put(b"BA").unwrap(), Put::Inserted(258));
        assert!(trie.is_full());

        assert_eq!(trie.put(b"CD").unwrap(), Put::Full);
        assert_eq!(trie.put(b"AB").unwrap(), Put::Present(257));
        assert_eq!(trie.get(b"CD"), None);
        assert_eq!(trie.len(), 258);
    }

    #[test]
    fn empty_string_is_never_an_entry() {
        let mut trie = Trie::seeded(Codeword::MAX).unwrap();

        assert_eq!(trie.put(b"").unwrap(), Put::Full);
        assert_eq!(trie.get(b""), None);
    }
}
