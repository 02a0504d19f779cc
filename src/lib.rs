//! # hftf: Canonical Huffman Compression
//!
//! This crate provides a lossless byte-stream compressor/decompressor built
//! on canonical Huffman coding, persisting its output in a self-describing
//! container format that carries everything needed to reconstruct the code
//! tree and recover the original bytes exactly.
//!
//! ## Key Features
//!
//! - **Canonical Huffman coding**: prefix-free codes built by merging the
//!   two lowest-weight nodes, with deterministic tie-breaking
//! - **Self-describing containers**: a fixed header, symbol table, and
//!   MSB-first packed bitstream; no out-of-band state needed to decode
//! - **Strict validation**: corrupt or truncated containers are rejected
//!   with typed errors instead of producing short or garbled output
//! - **File-level helpers**: whole-file compress/decompress with the
//!   `.hftf` suffix convention and per-operation statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use hftf::{compress, decompress};
//!
//! let original = b"the quick brown fox jumps over the lazy dog";
//! let container = compress(original).unwrap();
//! let recovered = decompress(&container).unwrap();
//! assert_eq!(recovered, original);
//! ```
//!
//! ## Container Layout
//!
//! All integers are little-endian. A 16-byte header (magic `"hftf"`,
//! reserved, compression level, payload offset, symbol-table offset) is
//! followed by a 16-byte metadata block (unencoded byte count, unique-symbol
//! count, total encoded bit count), one 10-byte record per symbol, and the
//! packed bitstream rounded up to whole bytes.

#![warn(missing_docs)]

pub mod bitstream;
pub mod codec;
pub mod container;
pub mod error;
pub mod heap;
pub mod io;
pub mod tree;

pub use bitstream::{BitReader, BitWriter};
pub use codec::{compress, compress_file, decompress, decompress_file, CompressionStats};
pub use container::{Container, Header, Metadata, SymbolRecord};
pub use error::{HftfError, Result};
pub use heap::MinHeap;
pub use io::{DataInput, DataOutput};
pub use tree::{frequency_table, Code, CodeTable, DecodeTree, HuffmanTree};
