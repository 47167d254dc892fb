//! Symbol dictionary segment header parsing (7.4.2.1).
//!
//! Only the fixed header prefix of the segment data is decoded here. The
//! entropy-coded symbol bitmaps that follow it are out of scope and stay
//! part of the opaque payload.

use crate::error::{Error, Result};
use crate::reader::Reader;

/// Raw adaptive template offsets carried in the header (7.4.2.1.2).
///
/// Which shape is present depends on the dictionary flags: none when the
/// dictionary is Huffman-coded, eight bytes for generic template 0, two
/// bytes for templates 1 through 3. Keeping the three shapes distinct means
/// callers can never mistake padding for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptiveTemplate {
    /// No adaptive template offsets (Huffman-coded dictionary).
    None,
    /// One offset pair, for generic templates 1 through 3.
    Short([u8; 2]),
    /// Four offset pairs, for generic template 0.
    Full([u8; 8]),
}

impl AdaptiveTemplate {
    /// The raw offset bytes actually present in the stream.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::None => &[],
            Self::Short(bytes) => bytes,
            Self::Full(bytes) => bytes,
        }
    }
}

/// Parsed symbol dictionary segment header (7.4.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolDictionaryHeader {
    /// The raw 16-bit symbol dictionary flags (7.4.2.1.1).
    pub flags: u16,
    /// Adaptive template offsets (7.4.2.1.2).
    pub adaptive_template: AdaptiveTemplate,
    /// Refinement adaptive template offsets (7.4.2.1.3). Present only when
    /// refinement/aggregate coding uses refinement template 0.
    pub refinement_template_offsets: Option<[u8; 4]>,
    /// SDNUMEXSYMS, the number of exported symbols (7.4.2.1.4).
    pub exported_symbols: u32,
    /// SDNUMNEWSYMS, the number of new symbols (7.4.2.1.5).
    pub new_symbols: u32,
}

impl SymbolDictionaryHeader {
    /// SDHUFF: whether the dictionary is Huffman-coded (bit 0).
    pub fn uses_huffman(&self) -> bool {
        self.flags & 0x0001 != 0
    }

    /// SDREFAGG: whether refinement/aggregate coding is used (bit 1).
    pub fn uses_refinement_aggregation(&self) -> bool {
        self.flags & 0x0002 != 0
    }

    /// SDTEMPLATE: the generic template selection (bits 10-11).
    pub fn template_id(&self) -> u8 {
        ((self.flags >> 10) & 0x03) as u8
    }

    /// SDRTEMPLATE: the refinement template selection (bit 12).
    pub fn refinement_template(&self) -> u8 {
        ((self.flags >> 12) & 0x01) as u8
    }
}

/// Parse a symbol dictionary header at `offset`, returning the header and
/// the number of bytes it occupies.
pub(crate) fn decode_symbol_dictionary_header(
    reader: &Reader<'_>,
    offset: usize,
) -> Result<(SymbolDictionaryHeader, usize)> {
    // 7.4.2.1.1: Symbol dictionary flags
    let flags = reader.read_u16(offset).ok_or(Error::Truncated)?;
    let mut cur = offset + 2;

    let huffman = flags & 0x0001 != 0;
    let refinement_aggregation = flags & 0x0002 != 0;
    let template_id = (flags >> 10) & 0x03;
    let refinement_template = (flags >> 12) & 0x01;

    // 7.4.2.1.2: Symbol dictionary AT flags
    // "This field is only present if SDHUFF is 0." Template 0 carries four
    // offset pairs, templates 1-3 a single pair.
    let adaptive_template = if huffman {
        AdaptiveTemplate::None
    } else if template_id == 0 {
        let bytes = reader.array(cur).ok_or(Error::Truncated)?;
        cur += 8;
        AdaptiveTemplate::Full(bytes)
    } else {
        let bytes = reader.array(cur).ok_or(Error::Truncated)?;
        cur += 2;
        AdaptiveTemplate::Short(bytes)
    };

    // 7.4.2.1.3: Symbol dictionary refinement AT flags
    // "This field is only present if SDREFAGG is 1 and SDRTEMPLATE is 0."
    let refinement_template_offsets = if refinement_aggregation && refinement_template == 0 {
        let bytes = reader.array(cur).ok_or(Error::Truncated)?;
        cur += 4;
        Some(bytes)
    } else {
        None
    };

    // 7.4.2.1.4: Number of exported symbols
    let exported_symbols = reader.read_u32(cur).ok_or(Error::Truncated)?;

    // 7.4.2.1.5: Number of new symbols
    let new_symbols = reader.read_u32(cur + 4).ok_or(Error::Truncated)?;
    cur += 8;

    let header = SymbolDictionaryHeader {
        flags,
        adaptive_template,
        refinement_template_offsets,
        exported_symbols,
        new_symbols,
    };

    Ok((header, cur - offset))
}
