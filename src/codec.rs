//! Compression and decompression pipelines
//!
//! The byte-level entry points compose the tree, code-table, bitstream, and
//! container layers into full encode/decode runs. The file-level entry
//! points wrap them with whole-file I/O, the `.hftf` suffix convention, and
//! an operation summary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bitstream::{BitReader, BitWriter};
use crate::container::{self, Container, Metadata, SUFFIX};
use crate::error::{HftfError, Result};
use crate::tree::{frequency_table, HuffmanTree};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of a completed compress or decompress operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompressionStats {
    /// Bytes read from the source
    pub input_len: u64,
    /// Bytes written to the destination
    pub output_len: u64,
    /// Unique symbols in the code table
    pub unique_symbols: u32,
    /// Valid bits in the packed stream
    pub total_bits: u64,
}

impl CompressionStats {
    /// Output size relative to input size; below 1.0 means the output is
    /// smaller. Infinite for empty input.
    pub fn ratio(&self) -> f64 {
        self.output_len as f64 / self.input_len as f64
    }

    /// Percentage of the input size saved by the operation; negative when
    /// the output grew
    pub fn space_saving(&self) -> f64 {
        100.0 * (1.0 - self.ratio())
    }
}

fn compress_impl(input: &[u8]) -> Result<(Vec<u8>, Metadata)> {
    if input.len() > u32::MAX as usize {
        return Err(HftfError::invalid_data(format!(
            "input of {} bytes exceeds the 4-byte length field",
            input.len()
        )));
    }

    let frequencies = frequency_table(input);
    let tree = HuffmanTree::from_frequencies(&frequencies);
    let table = tree.assign_codes()?;

    let mut writer = BitWriter::with_capacity(input.len());
    for &byte in input {
        let code = table
            .get(byte)
            .ok_or_else(|| HftfError::invalid_data(format!("no code for symbol {}", byte)))?;
        writer.push_code(code.bits, code.len);
    }
    let (payload, total_bits) = writer.finish();

    let metadata = Metadata {
        unencoded_len: input.len() as u32,
        unique_symbols: table.len() as u32,
        total_bits,
    };
    let bytes = container::write_container(&metadata, &table, &payload)?;
    Ok((bytes, metadata))
}

/// Compress a byte sequence into a self-describing container.
///
/// Empty input produces the 32-byte no-op container. Inputs longer than
/// `u32::MAX` bytes are rejected.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    compress_impl(input).map(|(bytes, _)| bytes)
}

fn decode_payload(container: &Container<'_>) -> Result<Vec<u8>> {
    let expected = container.metadata.unencoded_len as usize;
    if expected == 0 {
        return Ok(Vec::new());
    }

    let tree = container.build_decode_tree()?;
    let mut reader = BitReader::new(container.payload, container.metadata.total_bits)?;
    let mut output = Vec::with_capacity(expected);

    while output.len() < expected {
        let mut node = tree.root();
        loop {
            let bit = reader.next_bit().ok_or_else(|| {
                HftfError::truncated(format!(
                    "bitstream exhausted after {} of {} bytes",
                    output.len(),
                    expected
                ))
            })?;
            node = tree.child(node, bit).ok_or_else(|| {
                HftfError::invalid_format("encoded stream follows an undefined code path")
            })?;
            if let Some(symbol) = tree.leaf_symbol(node) {
                output.push(symbol);
                break;
            }
        }
    }
    Ok(output)
}

/// Decompress a container back into the original byte sequence.
///
/// Fails with `InvalidFormat` on structural corruption and with
/// `TruncatedStream` if the bitstream ends before the declared byte count
/// is recovered.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let container = container::read_container(data)?;
    decode_payload(&container)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(HftfError::file_not_found(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn append_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(SUFFIX);
    PathBuf::from(name)
}

/// Compress the file at `input` and write the container to
/// `<output>.hftf`.
pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CompressionStats> {
    let input = input.as_ref();
    let data = read_file(input)?;
    let (bytes, metadata) = compress_impl(&data)?;

    let destination = append_suffix(output.as_ref());
    fs::write(&destination, &bytes)?;

    Ok(CompressionStats {
        input_len: data.len() as u64,
        output_len: bytes.len() as u64,
        unique_symbols: metadata.unique_symbols,
        total_bits: metadata.total_bits,
    })
}

/// Decompress the container at `input` (which must carry the `.hftf`
/// suffix) and write the recovered bytes to `output`.
pub fn decompress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CompressionStats> {
    let input = input.as_ref();
    if input.extension().and_then(|ext| ext.to_str()) != Some(SUFFIX) {
        return Err(HftfError::invalid_format(format!(
            "{} does not carry the .{} suffix",
            input.display(),
            SUFFIX
        )));
    }

    let data = read_file(input)?;
    let container = container::read_container(&data)?;
    let recovered = decode_payload(&container)?;
    fs::write(output.as_ref(), &recovered)?;

    Ok(CompressionStats {
        input_len: data.len() as u64,
        output_len: recovered.len() as u64,
        unique_symbols: container.metadata.unique_symbols,
        total_bits: container.metadata.total_bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_basic() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let compressed = compress(input).unwrap();
        let recovered = decompress(&compressed).unwrap();
        assert_eq!(recovered, input);
    }

    #[test]
    fn test_known_stream_bytes() {
        let compressed = compress(b"aaaabbbcc").unwrap();
        let container = container::read_container(&compressed).unwrap();

        assert_eq!(container.metadata.unencoded_len, 9);
        assert_eq!(container.metadata.unique_symbols, 3);
        // 4 bytes at 1 bit + 5 bytes at 2 bits.
        assert_eq!(container.metadata.total_bits, 14);
        assert_eq!(container.payload, &[0x0F, 0xE8]);

        assert_eq!(decompress(&compressed).unwrap(), b"aaaabbbcc");
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"").unwrap();
        assert_eq!(compressed.len(), 32);
        let recovered = decompress(&compressed).unwrap();
        assert!(recovered.is_empty());
    }

    #[test]
    fn test_single_symbol_input() {
        let input = vec![b'x'; 1000];
        let compressed = compress(&input).unwrap();

        let container = container::read_container(&compressed).unwrap();
        assert_eq!(container.metadata.unique_symbols, 1);
        assert_eq!(container.metadata.total_bits, 1000);

        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_all_byte_values() {
        let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let compressed = compress(&input).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_truncated_bitstream_is_an_error() {
        let mut compressed = compress(b"aaaabbbcc").unwrap();
        // Claim more output than the 14 packed bits can produce.
        compressed[16..20].copy_from_slice(&20u32.to_le_bytes());

        let err = decompress(&compressed).unwrap_err();
        assert!(matches!(err, HftfError::TruncatedStream { .. }));
    }

    #[test]
    fn test_stats_ratio() {
        let stats = CompressionStats {
            input_len: 1000,
            output_len: 400,
            unique_symbols: 16,
            total_bits: 2944,
        };
        assert!((stats.ratio() - 0.4).abs() < 1e-9);
        assert!((stats.space_saving() - 60.0).abs() < 1e-9);

        let grown = CompressionStats {
            input_len: 10,
            output_len: 45,
            unique_symbols: 8,
            total_bits: 30,
        };
        assert!(grown.ratio() > 1.0);
        assert!(grown.space_saving() < 0.0);
    }

    #[test]
    fn test_append_suffix() {
        assert_eq!(append_suffix(Path::new("out")), PathBuf::from("out.hftf"));
        assert_eq!(
            append_suffix(Path::new("archive.tar")),
            PathBuf::from("archive.tar.hftf")
        );
    }
}
