//! File header parsing for JBIG2 streams (Annex D of ITU-T T.88).

use crate::error::{Error, FormatError, Result, bail};
use crate::reader::Reader;

/// "This is an 8-byte sequence containing 0x97 0x4A 0x42 0x32 0x0D 0x0A 0x1A 0x0A."
/// (D.4.1)
const FILE_HEADER_ID: [u8; 8] = [0x97, 0x4A, 0x42, 0x32, 0x0D, 0x0A, 0x1A, 0x0A];

/// How the file declares its page count, selected by bit 1 of the file
/// header flags (D.4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Organization {
    /// The number of pages is declared up front, right after the flags byte.
    Sequential,
    /// The number of pages was not known when the file header was written.
    /// Typical for streams embedded in another container.
    Embedded,
}

/// Parsed file header (D.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// The raw file header flags byte (D.4.2).
    pub flags: u8,
    /// The organization derived from the flags.
    pub organization: Organization,
    /// The number of pages in the file, if declared (D.4.3).
    pub number_of_pages: Option<u32>,
}

/// Parse the file header at offset 0.
///
/// Returns the header together with the offset of the first segment header:
/// 9 when no page count is declared, 13 otherwise.
pub(crate) fn decode_file_header(reader: &Reader<'_>) -> Result<(FileHeader, usize)> {
    // D.4.1: ID string
    let id = reader.bytes(0, 8).ok_or(Error::Truncated)?;
    if id != FILE_HEADER_ID {
        bail!(FormatError::BadSignature);
    }

    // D.4.2: File header flags
    let flags = reader.byte(8).ok_or(Error::Truncated)?;

    // "Bit 1: Unknown number of pages. If this bit is 1, then the number of
    // pages contained in the file was not known at the time that the file
    // header was coded." (D.4.2)
    //
    // D.4.3: "This is a 4-byte field, and is not present if the 'unknown
    // number of pages' bit was 1."
    let (header, first_segment) = if flags & 0x02 != 0 {
        let header = FileHeader {
            flags,
            organization: Organization::Embedded,
            number_of_pages: None,
        };
        (header, 9)
    } else {
        let number_of_pages = reader.read_u32(9).ok_or(Error::Truncated)?;
        let header = FileHeader {
            flags,
            organization: Organization::Sequential,
            number_of_pages: Some(number_of_pages),
        };
        (header, 13)
    };

    Ok((header, first_segment))
}
