//! Segment header parsing for JBIG2 streams (Section 7.2).

use crate::error::{Error, Result, Unsupported, bail};
use crate::reader::Reader;

/// Segment types, dispatched on the low six bits of the header flags (7.3).
///
/// Only symbol dictionary and end of file segments are interpreted by the
/// scanner; all others are carried through so callers can label segments,
/// but their payloads stay opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Symbol dictionary (type 0, 7.4.2).
    SymbolDictionary,
    /// Intermediate text region (type 4, 7.4.3).
    IntermediateTextRegion,
    /// Immediate text region (type 6, 7.4.3).
    ImmediateTextRegion,
    /// Immediate lossless text region (type 7, 7.4.3).
    ImmediateLosslessTextRegion,
    /// Pattern dictionary (type 16, 7.4.4).
    PatternDictionary,
    /// Intermediate halftone region (type 20, 7.4.5).
    IntermediateHalftoneRegion,
    /// Immediate halftone region (type 22, 7.4.5).
    ImmediateHalftoneRegion,
    /// Immediate lossless halftone region (type 23, 7.4.5).
    ImmediateLosslessHalftoneRegion,
    /// Intermediate generic region (type 36, 7.4.6).
    IntermediateGenericRegion,
    /// Immediate generic region (type 38, 7.4.6).
    ImmediateGenericRegion,
    /// Immediate lossless generic region (type 39, 7.4.6).
    ImmediateLosslessGenericRegion,
    /// Intermediate generic refinement region (type 40, 7.4.7).
    IntermediateGenericRefinementRegion,
    /// Immediate generic refinement region (type 42, 7.4.7).
    ImmediateGenericRefinementRegion,
    /// Immediate lossless generic refinement region (type 43, 7.4.7).
    ImmediateLosslessGenericRefinementRegion,
    /// Page information (type 48, 7.4.8).
    PageInformation,
    /// End of page (type 49, 7.4.9).
    EndOfPage,
    /// End of stripe (type 50, 7.4.10).
    EndOfStripe,
    /// End of file (type 51, 7.4.11).
    EndOfFile,
    /// Profiles (type 52, 7.4.12).
    Profiles,
    /// Tables (type 53, 7.4.13).
    Tables,
    /// Colour palette (type 54, 7.4.16).
    ColourPalette,
    /// Extension (type 62, 7.4.14).
    Extension,
    /// Any other value, including reserved types. Skipped opaquely.
    Other(u8),
}

impl SegmentKind {
    fn from_type_value(value: u8) -> Self {
        match value {
            0 => Self::SymbolDictionary,
            4 => Self::IntermediateTextRegion,
            6 => Self::ImmediateTextRegion,
            7 => Self::ImmediateLosslessTextRegion,
            16 => Self::PatternDictionary,
            20 => Self::IntermediateHalftoneRegion,
            22 => Self::ImmediateHalftoneRegion,
            23 => Self::ImmediateLosslessHalftoneRegion,
            36 => Self::IntermediateGenericRegion,
            38 => Self::ImmediateGenericRegion,
            39 => Self::ImmediateLosslessGenericRegion,
            40 => Self::IntermediateGenericRefinementRegion,
            42 => Self::ImmediateGenericRefinementRegion,
            43 => Self::ImmediateLosslessGenericRefinementRegion,
            48 => Self::PageInformation,
            49 => Self::EndOfPage,
            50 => Self::EndOfStripe,
            51 => Self::EndOfFile,
            52 => Self::Profiles,
            53 => Self::Tables,
            54 => Self::ColourPalette,
            62 => Self::Extension,
            other => Self::Other(other),
        }
    }
}

/// A parsed segment header (7.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    /// "This four-byte field contains the segment's segment number." (7.2.2)
    ///
    /// Declared monotonically increasing by the format, but not validated
    /// here.
    pub number: u32,
    /// The raw segment header flags byte (7.2.3). Bits 0-5 are the segment
    /// type, bit 6 the page association field size, bit 7 deferred
    /// non-retain.
    pub flags: u8,
    /// Count of referred-to segments, short form only (7.2.4).
    pub referred_to_count: u8,
    /// The page this segment belongs to; zero means the segment is not
    /// associated with any page (7.2.6).
    pub page_association: u8,
    /// "This 4-byte field contains the length of the segment's segment data
    /// part, in bytes." (7.2.7)
    pub data_length: u32,
}

impl SegmentHeader {
    /// The segment type encoded in the low six bits of the flags (7.3).
    pub fn kind(&self) -> SegmentKind {
        SegmentKind::from_type_value(self.flags & 0x3F)
    }

    /// "Bit 7: Deferred non-retain." (7.2.3) Carried through uninterpreted.
    pub fn retain_flag(&self) -> bool {
        self.flags & 0x80 != 0
    }
}

/// Parse a segment header at `offset`, returning the header and the number
/// of bytes it occupies.
pub(crate) fn decode_segment_header(
    reader: &Reader<'_>,
    offset: usize,
) -> Result<(SegmentHeader, usize)> {
    // 7.2.2: Segment number
    let number = reader.read_u32(offset).ok_or(Error::Truncated)?;

    // 7.2.3: Segment header flags
    let flags = reader.byte(offset + 4).ok_or(Error::Truncated)?;

    // 7.2.4: Referred-to segment count and retention flags
    // "The three most significant bits of the first byte in this field
    // determine the length of the field." All three set means the long
    // (at least five byte) form, which is not handled.
    let rtscarf = reader.byte(offset + 5).ok_or(Error::Truncated)?;
    if rtscarf & 0xE0 == 0xE0 {
        bail!(Unsupported::LongReferredToCount);
    }
    let referred_to_count = rtscarf >> 5;

    // 7.2.5: Referred-to segment numbers are skipped, assuming one byte
    // each. The format widens them to two or four bytes once segment
    // numbers exceed 256, which this scanner does not handle; such streams
    // would miscompute every following offset.
    let after_referred = offset + 6 + referred_to_count as usize;

    // 7.2.6: Segment page association
    // "This field is one byte long if this segment's page association field
    // size flag bit is 0, and is four bytes long if this segment's page
    // association field size flag bit is 1."
    if flags & 0x40 != 0 {
        bail!(Unsupported::LongPageAssociation);
    }
    let page_association = reader.byte(after_referred).ok_or(Error::Truncated)?;

    // 7.2.7: Segment data length
    let data_length = reader.read_u32(after_referred + 1).ok_or(Error::Truncated)?;

    let header = SegmentHeader {
        number,
        flags,
        referred_to_count,
        page_association,
        data_length,
    };

    Ok((header, after_referred + 5 - offset))
}
