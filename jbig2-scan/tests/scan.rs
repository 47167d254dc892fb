//! End-to-end walks over synthetic JBIG2 streams.

use jbig2_scan::{
    AdaptiveTemplate, Error, FormatError, Organization, Scanner, SegmentDetail, SegmentKind, scan,
};

const MAGIC: [u8; 8] = [0x97, 0x4A, 0x42, 0x32, 0x0D, 0x0A, 0x1A, 0x0A];

/// A sequential file header declaring one page.
fn file_header() -> Vec<u8> {
    let mut data = MAGIC.to_vec();
    data.push(0x00); // Flags: page count declared.
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
    data
}

/// A segment header in the short form, with no referred-to segments.
fn segment_header(number: u32, type_value: u8, data_length: u32) -> Vec<u8> {
    let mut data = number.to_be_bytes().to_vec();
    data.push(type_value); // Flags: just the type, short page association.
    data.push(0x00); // No referred-to segments.
    data.push(0x01); // Page association = 1.
    data.extend_from_slice(&data_length.to_be_bytes());
    data
}

/// A symbol dictionary payload: the fixed header prefix (template 0, so
/// eight AT bytes) followed by opaque entropy-coded filler.
fn symbol_dictionary_payload(exported: u32, new: u32, filler: usize) -> Vec<u8> {
    let mut data = vec![0x00, 0x00]; // Flags: arithmetic coding, template 0.
    data.extend_from_slice(&[0x03, 0xFD, 0xF3, 0xFD, 0x02, 0xFE, 0xFE, 0xFE]);
    data.extend_from_slice(&exported.to_be_bytes());
    data.extend_from_slice(&new.to_be_bytes());
    data.extend(std::iter::repeat_n(0xAB_u8, filler));
    data
}

/// A stream with one symbol dictionary segment and an end of file segment.
fn two_segment_stream() -> Vec<u8> {
    let payload = symbol_dictionary_payload(4, 7, 12);

    let mut data = file_header();
    data.extend(segment_header(0, 0, payload.len() as u32));
    data.extend(&payload);
    data.extend(segment_header(1, 51, 0));
    data
}

#[test]
fn test_two_segment_stream() {
    let data = two_segment_stream();

    let mut scanner = Scanner::new(&data).unwrap();
    assert_eq!(scanner.file_header().organization, Organization::Sequential);
    assert_eq!(scanner.file_header().number_of_pages, Some(1));

    let first = scanner.next_segment().unwrap().unwrap();
    assert_eq!(first.header.number, 0);
    assert_eq!(first.header.kind(), SegmentKind::SymbolDictionary);
    assert_eq!(first.header.page_association, 1);
    assert_eq!(first.payload.len(), 30);
    match first.detail {
        SegmentDetail::SymbolDictionary(dictionary) => {
            assert_eq!(dictionary.exported_symbols, 4);
            assert_eq!(dictionary.new_symbols, 7);
            assert!(matches!(
                dictionary.adaptive_template,
                AdaptiveTemplate::Full(_)
            ));
        }
        other => panic!("expected a symbol dictionary, got {other:?}"),
    }

    let second = scanner.next_segment().unwrap().unwrap();
    assert_eq!(second.header.number, 1);
    assert_eq!(second.header.kind(), SegmentKind::EndOfFile);
    assert_eq!(second.detail, SegmentDetail::EndOfFile);
    assert!(second.payload.is_empty());

    // The walk is done; further steps keep reporting completion.
    assert_eq!(scanner.next_segment().unwrap(), None);
    assert_eq!(scanner.next_segment().unwrap(), None);
}

#[test]
fn test_scan_is_idempotent() {
    let data = two_segment_stream();

    let first = scan(&data).unwrap();
    let second = scan(&data).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_bytes_after_end_of_file_are_ignored() {
    let mut data = two_segment_stream();
    data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    let records = scan(&data).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].detail, SegmentDetail::EndOfFile);
}

#[test]
fn test_stream_without_end_of_file_terminates() {
    // An opaque segment and nothing after it: the walk must stop rather
    // than spin waiting for an end of file segment.
    let mut data = file_header();
    data.extend(segment_header(0, 48, 4)); // Page information, skipped.
    data.extend_from_slice(&[0x11, 0x22, 0x33, 0x44]);

    let records = scan(&data).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].header.kind(), SegmentKind::PageInformation);
    assert_eq!(records[0].detail, SegmentDetail::Opaque);
    assert_eq!(records[0].payload, &[0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn test_payload_past_end_is_a_format_error() {
    let mut data = file_header();
    data.extend(segment_header(0, 48, 100)); // Declares 100 bytes...
    data.extend_from_slice(&[0x11, 0x22]); // ...but only 2 are present.

    assert_eq!(
        scan(&data),
        Err(Error::Format(FormatError::PayloadPastEnd))
    );
}

#[test]
fn test_bad_magic_is_fatal() {
    let mut data = two_segment_stream();
    data[3] = 0x00;

    assert_eq!(
        Scanner::new(&data).err(),
        Some(Error::Format(FormatError::BadSignature))
    );
}

#[test]
fn test_symbol_dictionary_header_confined_to_payload() {
    // A symbol dictionary whose declared data length cuts off its own
    // header prefix. The bytes of the following segment must not be
    // consumed in its place.
    let payload = symbol_dictionary_payload(4, 7, 0);
    let truncated = &payload[..payload.len() - 4];

    let mut data = file_header();
    data.extend(segment_header(0, 0, truncated.len() as u32));
    data.extend(truncated);
    data.extend(segment_header(1, 51, 0));

    assert_eq!(scan(&data), Err(Error::Truncated));
}
