/*!
A structural scanner for JBIG2 segment streams.

`jbig2-scan` walks the framing of a JBIG2 stream as specified in ITU-T T.88
(also known as ISO/IEC 14492): the file header, every segment header, and
the header prefix of symbol dictionary segments. Segment payloads are never
decoded; they are exposed as raw byte slices, so a whole stream can be
walked without reconstructing a single bitmap.

The walk is resumable: [`Scanner::next_segment`] decodes exactly one
segment per call, so a caller can stop between segments at any time. The
[`scan`] function runs the walk to completion.

# Example
```rust,no_run
let data = std::fs::read("image.jb2").unwrap();

let mut scanner = jbig2_scan::Scanner::new(&data).unwrap();
while let Some(record) = scanner.next_segment().unwrap() {
    println!(
        "segment {}: {:?}, {} payload bytes",
        record.header.number,
        record.header.kind(),
        record.header.data_length,
    );
}
```

# Limitations
The long forms of the referred-to segment count and page association
fields are rejected with [`Error::Unsupported`] rather than decoded.
Referred-to segment numbers are skipped assuming one byte each; streams
whose segment numbers exceed 256 widen those fields and are not handled.

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![forbid(unsafe_code)]

mod error;
mod file;
mod reader;
mod segment;
mod symbol_dictionary;

pub use error::{Error, FormatError, Result, Unsupported};
pub use file::{FileHeader, Organization};
pub use segment::{SegmentHeader, SegmentKind};
pub use symbol_dictionary::{AdaptiveTemplate, SymbolDictionaryHeader};

use log::warn;
use reader::Reader;

/// What the scanner understood about one segment beyond its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentDetail {
    /// The decoded header prefix of a symbol dictionary segment.
    SymbolDictionary(SymbolDictionaryHeader),
    /// An end of file segment; the walk stops after this record.
    EndOfFile,
    /// A segment whose payload was not interpreted.
    Opaque,
}

/// One decoded segment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRecord<'a> {
    /// The segment header.
    pub header: SegmentHeader,
    /// The segment's raw data part, `header.data_length` bytes long.
    pub payload: &'a [u8],
    /// Type-specific detail, where the scanner provides any.
    pub detail: SegmentDetail,
}

/// A resumable walker over the segments of a JBIG2 stream.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    reader: Reader<'a>,
    file_header: FileHeader,
    /// Offset of the next segment header. Advanced past each segment's
    /// payload, so it only ever moves forward.
    cursor: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Open a stream, validating the file header.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let reader = Reader::new(data);
        let (file_header, cursor) = file::decode_file_header(&reader)?;

        Ok(Self {
            reader,
            file_header,
            cursor,
            done: false,
        })
    }

    /// The file header decoded when the scanner was created.
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    /// Decode the segment at the current position and advance past its
    /// payload.
    ///
    /// Returns `Ok(None)` once an end of file segment has been decoded or
    /// the input is exhausted. Errors are fatal to the walk: segment
    /// boundaries are computed cumulatively, so a single bad header
    /// invalidates every following offset.
    pub fn next_segment(&mut self) -> Result<Option<SegmentRecord<'a>>> {
        if self.done {
            return Ok(None);
        }

        if self.cursor >= self.reader.len() {
            // Streams are allowed to stop short when embedded in another
            // container, but a standalone file should end with an end of
            // file segment.
            warn!("stream ended without an end of file segment");
            self.done = true;
            return Ok(None);
        }

        let (header, header_len) = segment::decode_segment_header(&self.reader, self.cursor)?;
        let payload_start = self.cursor + header_len;

        let payload = self
            .reader
            .bytes(payload_start, header.data_length as usize)
            .ok_or(Error::Format(FormatError::PayloadPastEnd))?;

        let detail = match header.kind() {
            SegmentKind::SymbolDictionary => {
                // The dictionary header is a prefix of the payload, so it
                // is decoded against the payload slice; a header running
                // past the declared data length is truncated, not read
                // from the next segment.
                let payload_reader = Reader::new(payload);
                let (dictionary, _) =
                    symbol_dictionary::decode_symbol_dictionary_header(&payload_reader, 0)?;
                SegmentDetail::SymbolDictionary(dictionary)
            }
            SegmentKind::EndOfFile => {
                self.done = true;
                SegmentDetail::EndOfFile
            }
            _ => SegmentDetail::Opaque,
        };

        // The cursor always advances by the declared data length, even for
        // interpreted segments: the symbol dictionary header above is only
        // a prefix of its payload.
        self.cursor = payload_start + header.data_length as usize;

        Ok(Some(SegmentRecord {
            header,
            payload,
            detail,
        }))
    }
}

/// Scan an entire stream, collecting one record per segment.
pub fn scan(data: &[u8]) -> Result<Vec<SegmentRecord<'_>>> {
    let mut scanner = Scanner::new(data)?;
    let mut records = Vec::new();

    while let Some(record) = scanner.next_segment()? {
        records.push(record);
    }

    Ok(records)
}
