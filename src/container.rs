//! The hftf container format
//!
//! Layout, all integers little-endian: a 16-byte header (magic, reserved,
//! compression level, payload offset, symbol-table offset), a 16-byte
//! metadata block (unencoded byte count, unique-symbol count, total encoded
//! bit count), `uniqueSymbols` 10-byte symbol records, then the packed
//! bitstream rounded up to whole bytes. Parsing validates every structural
//! invariant before any payload is touched.

use crate::error::{HftfError, Result};
use crate::io::{DataInput, DataOutput, SliceDataInput, VecDataOutput};
use crate::tree::{Code, CodeTable, DecodeTree};

/// Magic marker opening every container
pub const MAGIC: [u8; 4] = *b"hftf";

/// File extension carried by compressed containers
pub const SUFFIX: &str = "hftf";

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 16;

/// Size of the metadata block in bytes
pub const METADATA_LEN: usize = 16;

/// Byte offset where the symbol table starts
pub const SYMBOL_TABLE_OFFSET: usize = HEADER_LEN + METADATA_LEN;

/// Size of one symbol-table record in bytes
pub const SYMBOL_RECORD_LEN: usize = 10;

/// Compression-level counter recorded by this encoder
pub const COMPRESSION_LEVEL: u16 = 1;

/// Fixed-size container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Compression-level counter
    pub level: u16,
    /// Byte offset of the packed bitstream
    pub offset_data: u32,
    /// Byte offset of the symbol table
    pub offset_symbols: u32,
}

/// Encoded payload metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Count of original (unencoded) bytes
    pub unencoded_len: u32,
    /// Count of unique symbols (0-256)
    pub unique_symbols: u32,
    /// Count of valid bits in the packed bitstream
    pub total_bits: u64,
}

/// One symbol-table record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRecord {
    /// Byte value
    pub value: u8,
    /// Code bit-length (1-64)
    pub code_len: u8,
    /// Code value zero-extended to 64 bits
    pub code: u64,
}

/// Parsed view of a container, payload borrowed from the source buffer
#[derive(Debug)]
pub struct Container<'a> {
    /// The validated header
    pub header: Header,
    /// The metadata block
    pub metadata: Metadata,
    /// Symbol-table records in file order
    pub records: Vec<SymbolRecord>,
    /// The packed bitstream, exactly `ceil(total_bits / 8)` bytes
    pub payload: &'a [u8],
}

impl<'a> Container<'a> {
    /// Rebuild the decode tree from the symbol table. Fails with
    /// `InvalidFormat` if the records do not form a prefix-free code set.
    pub fn build_decode_tree(&self) -> Result<DecodeTree> {
        let mut tree = DecodeTree::new();
        for record in &self.records {
            let code = Code {
                bits: record.code,
                len: record.code_len,
            };
            tree.insert_code(record.value, code)?;
        }
        Ok(tree)
    }
}

/// Serialize a complete container from its parts. The symbol table is
/// emitted in ascending byte order, matching `CodeTable::iter`.
pub fn write_container(metadata: &Metadata, table: &CodeTable, payload: &[u8]) -> Result<Vec<u8>> {
    debug_assert_eq!(table.len(), metadata.unique_symbols as usize);
    debug_assert_eq!(payload.len() as u64, metadata.total_bits.div_ceil(8));

    let table_len = table.len() * SYMBOL_RECORD_LEN;
    let offset_symbols = SYMBOL_TABLE_OFFSET as u32;
    let offset_data = (SYMBOL_TABLE_OFFSET + table_len) as u32;

    let mut out =
        VecDataOutput::with_capacity(SYMBOL_TABLE_OFFSET + table_len + payload.len());
    out.write_bytes(&MAGIC)?;
    out.write_u16(0)?;
    out.write_u16(COMPRESSION_LEVEL)?;
    out.write_u32(offset_data)?;
    out.write_u32(offset_symbols)?;

    out.write_u32(metadata.unencoded_len)?;
    out.write_u32(metadata.unique_symbols)?;
    out.write_u64(metadata.total_bits)?;

    for (symbol, code) in table.iter() {
        out.write_u8(symbol)?;
        out.write_u8(code.len)?;
        out.write_u64(code.bits)?;
    }

    out.write_bytes(payload)?;
    Ok(out.into_vec())
}

/// Parse and validate a container. The payload slice borrows from `data`.
pub fn read_container(data: &[u8]) -> Result<Container<'_>> {
    let mut input = SliceDataInput::new(data);

    let mut magic = [0u8; 4];
    input.read_bytes(&mut magic)?;
    if magic != MAGIC {
        return Err(HftfError::invalid_format("magic marker mismatch"));
    }

    let reserved = input.read_u16()?;
    if reserved != 0 {
        return Err(HftfError::invalid_format(format!(
            "reserved field must be 0, found {}",
            reserved
        )));
    }

    let level = input.read_u16()?;
    let offset_data = input.read_u32()?;
    let offset_symbols = input.read_u32()?;

    let unencoded_len = input.read_u32()?;
    let unique_symbols = input.read_u32()?;
    let total_bits = input.read_u64()?;

    if unique_symbols > 256 {
        return Err(HftfError::invalid_format(format!(
            "unique-symbol count {} exceeds 256",
            unique_symbols
        )));
    }
    if unencoded_len > 0 && unique_symbols == 0 {
        return Err(HftfError::invalid_format(
            "no symbols declared for a nonempty output",
        ));
    }

    let expected_data =
        (SYMBOL_TABLE_OFFSET + unique_symbols as usize * SYMBOL_RECORD_LEN) as u32;
    if offset_symbols != SYMBOL_TABLE_OFFSET as u32 {
        return Err(HftfError::invalid_format(format!(
            "symbol-table offset {} does not match the fixed layout ({})",
            offset_symbols, SYMBOL_TABLE_OFFSET
        )));
    }
    if offset_data != expected_data {
        return Err(HftfError::invalid_format(format!(
            "payload offset {} does not match the symbol count (expected {})",
            offset_data, expected_data
        )));
    }

    let mut records = Vec::with_capacity(unique_symbols as usize);
    for _ in 0..unique_symbols {
        let value = input.read_u8()?;
        let code_len = input.read_u8()?;
        let code = input.read_u64()?;

        if code_len == 0 || code_len > 64 {
            return Err(HftfError::invalid_format(format!(
                "symbol {} declares code length {}, valid range is 1-64",
                value, code_len
            )));
        }
        if code_len < 64 && (code >> code_len) != 0 {
            return Err(HftfError::invalid_format(format!(
                "code value for symbol {} is wider than its declared {} bits",
                value, code_len
            )));
        }

        records.push(SymbolRecord {
            value,
            code_len,
            code,
        });
    }

    let payload_len = total_bits.div_ceil(8);
    if (input.remaining() as u64) < payload_len {
        return Err(HftfError::truncated(format!(
            "payload holds {} of {} declared bytes",
            input.remaining(),
            payload_len
        )));
    }
    let payload = input.read_slice(payload_len as usize)?;
    if input.remaining() != 0 {
        return Err(HftfError::invalid_format(format!(
            "{} trailing bytes after the payload",
            input.remaining()
        )));
    }

    Ok(Container {
        header: Header {
            level,
            offset_data,
            offset_symbols,
        },
        metadata: Metadata {
            unencoded_len,
            unique_symbols,
            total_bits,
        },
        records,
        payload,
    })
}
