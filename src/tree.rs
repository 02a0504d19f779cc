//! Huffman tree construction and code assignment
//!
//! The encode side builds an owned binary tree bottom-up by repeatedly
//! merging the two lowest-weight nodes, then assigns prefix-free codes by
//! depth-first traversal. The decode side rebuilds an equivalent tree
//! top-down in an index arena, one root-to-leaf path per symbol record.

use crate::error::{HftfError, Result};
use crate::heap::MinHeap;

/// Count occurrences of each byte value
pub fn frequency_table(data: &[u8]) -> [u64; 256] {
    let mut frequencies = [0u64; 256];
    for &byte in data {
        frequencies[byte as usize] += 1;
    }
    frequencies
}

/// A symbol's assigned bit-code: the value accumulated along the
/// root-to-leaf path, MSB-aligned in the low `len` bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Code value
    pub bits: u64,
    /// Number of significant bits (1..=64)
    pub len: u8,
}

impl Code {
    /// Check whether `self` is a bit-prefix of `other`. A zero-length code
    /// is a prefix of every code.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Huffman prefix-code tree built from symbol frequencies
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Option<HuffmanNode>,
}

impl HuffmanTree {
    /// Build a tree from a 256-slot frequency table. Only entries with
    /// frequency > 0 participate; leaves are queued in ascending byte order
    /// and equal weights merge in insertion order, so the resulting code
    /// assignment is deterministic.
    pub fn from_frequencies(frequencies: &[u64; 256]) -> Self {
        let mut heap = MinHeap::with_capacity(256);
        for (symbol, &freq) in frequencies.iter().enumerate() {
            if freq > 0 {
                let leaf = HuffmanNode::Leaf {
                    symbol: symbol as u8,
                    weight: freq,
                };
                heap.insert(leaf, freq);
            }
        }

        loop {
            let (first, first_weight) = match heap.extract_min() {
                Some(entry) => entry,
                None => return Self { root: None },
            };
            let (second, second_weight) = match heap.extract_min() {
                Some(entry) => entry,
                None => return Self { root: Some(first) },
            };

            let weight = first_weight + second_weight;
            let merged = HuffmanNode::Internal {
                weight,
                left: Box::new(first),
                right: Box::new(second),
            };
            heap.insert(merged, weight);
        }
    }

    /// Build a tree from raw data
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_frequencies(&frequency_table(data))
    }

    /// Total weight of the tree (sum of all leaf frequencies)
    pub fn total_weight(&self) -> u64 {
        self.root.as_ref().map_or(0, HuffmanNode::weight)
    }

    /// Assign a code to every leaf by depth-first traversal: descend left
    /// appending bit 0, right appending bit 1. A tree whose root is itself a
    /// leaf gets the degenerate one-bit zero code so the packed stream still
    /// advances one bit per input byte.
    pub fn assign_codes(&self) -> Result<CodeTable> {
        let mut table = CodeTable::new();
        match &self.root {
            None => {}
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                table.set(*symbol, Code { bits: 0, len: 1 });
            }
            Some(root) => Self::walk(root, 0, 0, &mut table)?,
        }
        Ok(table)
    }

    fn walk(node: &HuffmanNode, bits: u64, len: u8, table: &mut CodeTable) -> Result<()> {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                table.set(*symbol, Code { bits, len });
                Ok(())
            }
            HuffmanNode::Internal { left, right, .. } => {
                if len == 64 {
                    return Err(HftfError::invalid_data("code length exceeds 64 bits"));
                }
                Self::walk(left, bits << 1, len + 1, table)?;
                Self::walk(right, (bits << 1) | 1, len + 1, table)
            }
        }
    }
}

/// Per-symbol code assignments produced by tree traversal
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    len: usize,
}

impl CodeTable {
    fn new() -> Self {
        Self {
            codes: [None; 256],
            len: 0,
        }
    }

    fn set(&mut self, symbol: u8, code: Code) {
        if self.codes[symbol as usize].is_none() {
            self.len += 1;
        }
        self.codes[symbol as usize] = Some(code);
    }

    /// Get the code assigned to a symbol
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols holding a code
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether no symbol holds a code
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over (symbol, code) pairs in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }
}

#[derive(Debug, Clone, Copy)]
enum DecodeNode {
    Internal {
        left: Option<u32>,
        right: Option<u32>,
    },
    Leaf {
        symbol: u8,
    },
}

/// Decode-side tree rebuilt from serialized (value, length, code) records.
/// Nodes live in a flat arena and reference children by index; paths are
/// inserted lazily, so the arena grows by at most `code.len` nodes per
/// symbol.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    /// Create a tree holding only an empty internal root
    pub fn new() -> Self {
        Self {
            nodes: vec![DecodeNode::Internal {
                left: None,
                right: None,
            }],
        }
    }

    /// Index of the root node
    pub fn root(&self) -> usize {
        0
    }

    /// Number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert the root-to-leaf path for `symbol` keyed by its code: bit `i`
    /// of the code (most significant of `len` first) descends left on 0 and
    /// right on 1, allocating internal nodes along the way; the terminal
    /// node becomes the symbol's leaf. A path that runs through or lands on
    /// an occupied node means the symbol table is not prefix-free.
    pub fn insert_code(&mut self, symbol: u8, code: Code) -> Result<()> {
        if code.len == 0 {
            return Err(HftfError::invalid_format(format!(
                "symbol {} carries a zero-length code",
                symbol
            )));
        }

        let mut node = 0usize;
        for i in (0..code.len).rev() {
            let bit = (code.bits >> i) & 1 == 1;
            let is_last = i == 0;

            let child = match self.nodes[node] {
                DecodeNode::Leaf { .. } => {
                    return Err(HftfError::invalid_format(format!(
                        "code for symbol {} descends through an existing leaf",
                        symbol
                    )));
                }
                DecodeNode::Internal { left, right } => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
            };

            node = match child {
                Some(idx) => {
                    if is_last {
                        return Err(HftfError::invalid_format(format!(
                            "code for symbol {} collides with an existing entry",
                            symbol
                        )));
                    }
                    idx as usize
                }
                None => {
                    let idx = self.nodes.len();
                    if is_last {
                        self.nodes.push(DecodeNode::Leaf { symbol });
                    } else {
                        self.nodes.push(DecodeNode::Internal {
                            left: None,
                            right: None,
                        });
                    }
                    if let DecodeNode::Internal { left, right } = &mut self.nodes[node] {
                        if bit {
                            *right = Some(idx as u32);
                        } else {
                            *left = Some(idx as u32);
                        }
                    }
                    idx
                }
            };
        }
        Ok(())
    }

    /// Follow one bit from `node`; `None` if the direction is vacant or the
    /// node is a leaf
    pub fn child(&self, node: usize, bit: bool) -> Option<usize> {
        match self.nodes[node] {
            DecodeNode::Leaf { .. } => None,
            DecodeNode::Internal { left, right } => {
                let next = if bit { right } else { left };
                next.map(|idx| idx as usize)
            }
        }
    }

    /// The symbol at `node`, if it is a leaf
    pub fn leaf_symbol(&self, node: usize) -> Option<u8> {
        match self.nodes[node] {
            DecodeNode::Leaf { symbol } => Some(symbol),
            DecodeNode::Internal { .. } => None,
        }
    }
}

impl Default for DecodeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_for(data: &[u8]) -> CodeTable {
        HuffmanTree::from_data(data).assign_codes().unwrap()
    }

    #[test]
    fn test_frequency_table() {
        let freqs = frequency_table(b"aaaabbbcc");
        assert_eq!(freqs[b'a' as usize], 4);
        assert_eq!(freqs[b'b' as usize], 3);
        assert_eq!(freqs[b'c' as usize], 2);
        assert_eq!(freqs[b'd' as usize], 0);
        assert_eq!(freqs.iter().sum::<u64>(), 9);
    }

    #[test]
    fn test_known_distribution_codes() {
        // a=4, b=3, c=2: c and b merge first (weight 5), then a joins the
        // root, so a sits at depth 1 and b/c at depth 2.
        let table = codes_for(b"aaaabbbcc");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a'), Some(Code { bits: 0b0, len: 1 }));
        assert_eq!(table.get(b'c'), Some(Code { bits: 0b10, len: 2 }));
        assert_eq!(table.get(b'b'), Some(Code { bits: 0b11, len: 2 }));
        assert_eq!(table.get(b'd'), None);
    }

    #[test]
    fn test_equal_frequencies_are_deterministic() {
        // Four equally likely symbols: leaves pair off in byte order.
        let table = codes_for(b"abcd");
        assert_eq!(table.get(b'a'), Some(Code { bits: 0b00, len: 2 }));
        assert_eq!(table.get(b'b'), Some(Code { bits: 0b01, len: 2 }));
        assert_eq!(table.get(b'c'), Some(Code { bits: 0b10, len: 2 }));
        assert_eq!(table.get(b'd'), Some(Code { bits: 0b11, len: 2 }));
    }

    #[test]
    fn test_single_symbol_degenerate_code() {
        let table = codes_for(b"zzzzzz");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'z'), Some(Code { bits: 0, len: 1 }));
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let tree = HuffmanTree::from_frequencies(&[0u64; 256]);
        assert_eq!(tree.total_weight(), 0);
        let table = tree.assign_codes().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let data = b"this is a test of the emergency broadcast system";
        let table = codes_for(data);
        let codes: Vec<(u8, Code)> = table.iter().collect();
        assert!(codes.len() > 2);

        for (i, &(_, a)) in codes.iter().enumerate() {
            for &(_, b) in codes.iter().skip(i + 1) {
                assert!(!a.is_prefix_of(&b), "{:?} is a prefix of {:?}", a, b);
                assert!(!b.is_prefix_of(&a), "{:?} is a prefix of {:?}", b, a);
            }
        }
    }

    #[test]
    fn test_code_length_monotone_in_frequency() {
        let mut frequencies = [0u64; 256];
        frequencies[0] = 100;
        frequencies[1] = 40;
        frequencies[2] = 12;
        frequencies[3] = 12;
        frequencies[4] = 3;
        frequencies[5] = 1;

        let tree = HuffmanTree::from_frequencies(&frequencies);
        assert_eq!(tree.total_weight(), 168);
        let table = tree.assign_codes().unwrap();

        for (x, code_x) in table.iter() {
            for (y, code_y) in table.iter() {
                if frequencies[x as usize] > frequencies[y as usize] {
                    assert!(
                        code_x.len <= code_y.len,
                        "freq({})={} > freq({})={} but len {} > {}",
                        x,
                        frequencies[x as usize],
                        y,
                        frequencies[y as usize],
                        code_x.len,
                        code_y.len
                    );
                }
            }
        }
    }

    #[test]
    fn test_iter_ascending_symbol_order() {
        let table = codes_for(b"the quick brown fox");
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        let mut sorted = symbols.clone();
        sorted.sort_unstable();
        assert_eq!(symbols, sorted);
        assert_eq!(symbols.len(), table.len());
    }

    #[test]
    fn test_is_prefix_of() {
        let short = Code { bits: 0b10, len: 2 };
        let long = Code { bits: 0b1011, len: 4 };
        let other = Code { bits: 0b1111, len: 4 };

        assert!(short.is_prefix_of(&long));
        assert!(!short.is_prefix_of(&other));
        assert!(!long.is_prefix_of(&short));
        assert!(short.is_prefix_of(&short));
    }

    #[test]
    fn test_empty_code_is_prefix_of_everything() {
        let empty = Code { bits: 0, len: 0 };
        let full = Code {
            bits: u64::MAX,
            len: 64,
        };

        assert!(empty.is_prefix_of(&empty));
        assert!(empty.is_prefix_of(&Code { bits: 0b10, len: 2 }));
        assert!(empty.is_prefix_of(&full));
        assert!(!full.is_prefix_of(&empty));
    }

    #[test]
    fn test_decode_tree_recovers_symbols() {
        let table = codes_for(b"aaaabbbcc");
        let mut tree = DecodeTree::new();
        for (symbol, code) in table.iter() {
            tree.insert_code(symbol, code).unwrap();
        }

        // Walk each code's bits manually and land on its leaf.
        for (symbol, code) in table.iter() {
            let mut node = tree.root();
            for i in (0..code.len).rev() {
                let bit = (code.bits >> i) & 1 == 1;
                node = tree.child(node, bit).unwrap();
            }
            assert_eq!(tree.leaf_symbol(node), Some(symbol));
        }
    }

    #[test]
    fn test_decode_tree_single_symbol() {
        let mut tree = DecodeTree::new();
        tree.insert_code(b'z', Code { bits: 0, len: 1 }).unwrap();

        let leaf = tree.child(tree.root(), false).unwrap();
        assert_eq!(tree.leaf_symbol(leaf), Some(b'z'));
        // The right branch was never populated.
        assert_eq!(tree.child(tree.root(), true), None);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_decode_tree_rejects_duplicate_code() {
        let mut tree = DecodeTree::new();
        tree.insert_code(b'a', Code { bits: 0b10, len: 2 }).unwrap();
        let err = tree
            .insert_code(b'b', Code { bits: 0b10, len: 2 })
            .unwrap_err();
        assert!(matches!(err, HftfError::InvalidFormat { .. }));
    }

    #[test]
    fn test_decode_tree_rejects_prefix_collisions() {
        let mut tree = DecodeTree::new();
        tree.insert_code(b'a', Code { bits: 0b0, len: 1 }).unwrap();
        // Longer code running through the existing leaf.
        let err = tree
            .insert_code(b'b', Code { bits: 0b00, len: 2 })
            .unwrap_err();
        assert!(matches!(err, HftfError::InvalidFormat { .. }));

        let mut tree = DecodeTree::new();
        tree.insert_code(b'a', Code { bits: 0b00, len: 2 }).unwrap();
        // Shorter code landing on an internal node.
        let err = tree.insert_code(b'b', Code { bits: 0b0, len: 1 }).unwrap_err();
        assert!(matches!(err, HftfError::InvalidFormat { .. }));
    }

    #[test]
    fn test_decode_tree_rejects_zero_length_code() {
        let mut tree = DecodeTree::new();
        let err = tree.insert_code(b'a', Code { bits: 0, len: 0 }).unwrap_err();
        assert!(matches!(err, HftfError::InvalidFormat { .. }));
    }

    #[test]
    fn test_child_on_leaf_is_none() {
        let mut tree = DecodeTree::new();
        tree.insert_code(b'a', Code { bits: 0b0, len: 1 }).unwrap();
        let leaf = tree.child(tree.root(), false).unwrap();
        assert_eq!(tree.child(leaf, false), None);
        assert_eq!(tree.child(leaf, true), None);
    }
}
