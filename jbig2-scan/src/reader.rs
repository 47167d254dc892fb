/// A random-access reader over an in-memory JBIG2 stream.
///
/// Every read is addressed by an absolute byte offset; the reader itself
/// carries no cursor. Reads that would run past the end of the data return
/// `None`, which callers turn into [`Error::Truncated`](crate::Error).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reader<'a> {
    /// The underlying data.
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    #[inline(always)]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Read exactly `len` bytes starting at `offset`.
    #[inline(always)]
    pub(crate) fn bytes(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    /// Read the byte at `offset`.
    #[inline(always)]
    pub(crate) fn byte(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Read exactly `N` bytes starting at `offset` as an array.
    #[inline(always)]
    pub(crate) fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.bytes(offset, N)?.try_into().ok()
    }

    /// Read a big-endian u16 at `offset`.
    #[inline(always)]
    pub(crate) fn read_u16(&self, offset: usize) -> Option<u16> {
        Some(u16::from_be_bytes(self.array(offset)?))
    }

    /// Read a big-endian u32 at `offset`.
    #[inline(always)]
    pub(crate) fn read_u32(&self, offset: usize) -> Option<u32> {
        Some(u32::from_be_bytes(self.array(offset)?))
    }

    /// The total length of the underlying data.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let reader = Reader::new(&data);

        assert_eq!(reader.byte(0), Some(0x01));
        assert_eq!(reader.byte(5), Some(0x06));
        assert_eq!(reader.bytes(1, 3), Some(&[0x02, 0x03, 0x04][..]));
        assert_eq!(reader.read_u16(0), Some(0x0102));
        assert_eq!(reader.read_u32(1), Some(0x0203_0405));
    }

    #[test]
    fn test_reads_past_end_fail() {
        let data = [0xAA, 0xBB];
        let reader = Reader::new(&data);

        assert_eq!(reader.byte(2), None);
        assert_eq!(reader.bytes(1, 2), None);
        assert_eq!(reader.read_u16(1), None);
        assert_eq!(reader.read_u32(0), None);
        // Offsets near usize::MAX must not wrap around.
        assert_eq!(reader.bytes(usize::MAX, 2), None);
    }
}
