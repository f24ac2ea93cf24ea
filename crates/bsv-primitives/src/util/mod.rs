//! Utility types for binary serialization.
//!
//! Provides VarInt (compact size) encoding/decoding, the `BsvReader` and
//! `BsvWriter` cursors for reading/writing Bitcoin protocol binary data,
//! length-prefixed binary fields (VarBin), and byte-order helpers used in
//! transaction serialization.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// Byte order
// ---------------------------------------------------------------------------

/// Reverse the bytes of a fixed-size buffer.
///
/// Converts between wire (little-endian) order and the conventional
/// big-endian display order used for transaction IDs and block hashes.
///
/// # Arguments
/// * `bytes` - The buffer to reverse.
///
/// # Returns
/// A new array holding the bytes in reverse order.
pub fn reverse_bytes<const N: usize>(bytes: &[u8; N]) -> [u8; N] {
    let mut out = *bytes;
    out.reverse();
    out
}

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A Bitcoin protocol variable-length integer ("compact size").
///
/// VarInt is used in transaction data to indicate the number of upcoming fields
/// or the length of an upcoming field. The encoding uses 1, 3, 5, or 9 bytes
/// depending on the magnitude of the value:
///
/// | first byte | meaning                                  |
/// |------------|------------------------------------------|
/// | `< 0xfd`   | the value itself                         |
/// | `0xfd`     | followed by a 2-byte little-endian value |
/// | `0xfe`     | followed by a 4-byte little-endian value |
/// | `0xff`     | followed by an 8-byte little-endian value|
///
/// Encoding always picks the smallest form. Decoding rejects any value that
/// was not written in its smallest form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the start of a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, `BufferUnderflow` if the
    /// prefix is truncated, or `NonCanonicalVarInt` for a non-minimal form.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = BsvReader::new(data);
        let vi = reader.read_varint()?;
        Ok((vi, data.len() - reader.remaining()))
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length()];
        self.put_bytes(&mut buf);
        buf
    }

    /// Write the VarInt into a destination buffer.
    ///
    /// The buffer must be at least `self.length()` bytes long.
    ///
    /// # Arguments
    /// * `dst` - Destination buffer to write into.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn put_bytes(&self, dst: &mut [u8]) -> usize {
        let v = self.0;
        match self.length() {
            1 => {
                dst[0] = v as u8;
                1
            }
            3 => {
                dst[0] = 0xfd;
                dst[1..3].copy_from_slice(&(v as u16).to_le_bytes());
                3
            }
            5 => {
                dst[0] = 0xfe;
                dst[1..5].copy_from_slice(&(v as u32).to_le_bytes());
                5
            }
            _ => {
                dst[0] = 0xff;
                dst[1..9].copy_from_slice(&v.to_le_bytes());
                9
            }
        }
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// VarBin
// ---------------------------------------------------------------------------

/// Parse a compact-size length-prefixed binary field.
///
/// # Arguments
/// * `data` - Buffer starting with the length prefix.
///
/// # Returns
/// The extracted blob and the unconsumed remainder of `data`. Fails with
/// `BufferUnderflow` when the prefix is cut short or declares more bytes
/// than remain.
pub fn parse_var_bin(data: &[u8]) -> Result<(Vec<u8>, &[u8]), PrimitivesError> {
    let mut reader = BsvReader::new(data);
    let value = reader.read_var_bytes()?.to_vec();
    Ok((value, reader.rest()))
}

/// Prefix a binary blob with the minimal compact-size encoding of its length.
///
/// # Arguments
/// * `data` - The blob to wrap.
///
/// # Returns
/// `varint(len) || data`.
pub fn serialize_var_bin(data: &[u8]) -> Vec<u8> {
    let mut writer = BsvWriter::with_capacity(data.len() + 9);
    writer.write_var_bytes(data);
    writer.into_bytes()
}

// ---------------------------------------------------------------------------
// BsvReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for Bitcoin protocol binary data.
///
/// Wraps a byte slice and maintains a read position. Every read is bounds
/// checked and returns an error instead of panicking on short input.
#[derive(Debug, Clone)]
pub struct BsvReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BsvReader<'a> {
    /// Create a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        BsvReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `UnexpectedEof` if insufficient data
    /// remains. The position is left untouched on failure.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// # Returns
    /// The decoded `VarInt`. A truncated prefix fails with
    /// `BufferUnderflow`; a value not written in its minimal form fails with
    /// `NonCanonicalVarInt`. The position is left untouched on failure.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let start = self.pos;
        let result = self.read_varint_inner();
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn read_varint_inner(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8().map_err(|_| PrimitivesError::BufferUnderflow {
            declared: 1,
            remaining: 0,
        })?;
        let (width, value) = match first {
            0xff => (8, self.read_u64_le()),
            0xfe => (4, self.read_u32_le().map(u64::from)),
            0xfd => (2, self.read_u16_le().map(u64::from)),
            b => return Ok(VarInt(b as u64)),
        };
        let remaining = self.remaining();
        let value = value.map_err(|_| PrimitivesError::BufferUnderflow {
            declared: width,
            remaining,
        })?;

        let vi = VarInt(value);
        if vi.length() != 1 + width as usize {
            return Err(PrimitivesError::NonCanonicalVarInt(value));
        }
        Ok(vi)
    }

    /// Read a VarInt length prefix followed by that many bytes.
    ///
    /// # Returns
    /// The blob, or `BufferUnderflow` if the declared length exceeds the
    /// remaining data. The position is left untouched on failure.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let start = self.pos;
        let len = self.read_varint()?.value();
        let remaining = self.remaining();
        if len > remaining as u64 {
            self.pos = start;
            return Err(PrimitivesError::BufferUnderflow {
                declared: len,
                remaining,
            });
        }
        self.read_bytes(len as usize)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Return the unread tail of the underlying slice.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

// ---------------------------------------------------------------------------
// BsvWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for Bitcoin protocol binary data.
///
/// Wraps a `Vec<u8>` and provides methods to append fixed-size integers
/// and VarInt values in little-endian order.
#[derive(Debug, Clone, Default)]
pub struct BsvWriter {
    buf: Vec<u8>,
}

impl BsvWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        BsvWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        BsvWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer.
    pub fn write_varint(&mut self, varint: VarInt) {
        let mut tmp = [0u8; 9];
        let n = varint.put_bytes(&mut tmp);
        self.buf.extend_from_slice(&tmp[..n]);
    }

    /// Append a VarInt length prefix followed by the bytes themselves.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bytes() {
        assert_eq!(reverse_bytes(&[1u8, 2, 3, 4]), [4, 3, 2, 1]);
        assert_eq!(reverse_bytes(&[0u8; 0]), [0u8; 0]);
    }

    // -- VarInt encoding --

    #[test]
    fn test_varint_put_bytes() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (0xfc, vec![0xfc]),
            (0xfd, vec![0xfd, 0xfd, 0x00]),
            (0xffff, vec![0xfd, 0xff, 0xff]),
            (0x10000, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0xffff_ffff, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (0x1_0000_0000, vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
            (u64::MAX, vec![0xff; 9]),
        ];

        for (value, expected) in cases {
            let vi = VarInt(value);
            assert_eq!(vi.length(), expected.len(), "length mismatch for {}", value);
            assert_eq!(vi.to_bytes(), expected, "encoding mismatch for {}", value);

            let (decoded, consumed) = VarInt::from_bytes(&expected).unwrap();
            assert_eq!(decoded, vi, "decode mismatch for {}", value);
            assert_eq!(consumed, expected.len());
        }
    }

    #[test]
    fn test_varint_size_boundaries() {
        assert_eq!(VarInt(0xfc).to_bytes().len(), 1);
        assert_eq!(VarInt(0xfd).to_bytes().len(), 3);
        assert_eq!(VarInt(0x10000).to_bytes().len(), 5);
        assert_eq!(VarInt(0x1_0000_0000).to_bytes().len(), 9);
    }

    #[test]
    fn test_varint_rejects_non_canonical() {
        // 5 encoded with the 3-byte form.
        assert_eq!(
            VarInt::from_bytes(&[0xfd, 0x05, 0x00]),
            Err(PrimitivesError::NonCanonicalVarInt(5))
        );
        // 0xffff encoded with the 5-byte form.
        assert_eq!(
            VarInt::from_bytes(&[0xfe, 0xff, 0xff, 0x00, 0x00]),
            Err(PrimitivesError::NonCanonicalVarInt(0xffff))
        );
        // 0xffffffff encoded with the 9-byte form.
        assert_eq!(
            VarInt::from_bytes(&[0xff, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]),
            Err(PrimitivesError::NonCanonicalVarInt(0xffff_ffff))
        );
    }

    #[test]
    fn test_varint_truncated_prefix() {
        assert!(matches!(
            VarInt::from_bytes(&[]),
            Err(PrimitivesError::BufferUnderflow { .. })
        ));
        assert_eq!(
            VarInt::from_bytes(&[0xfe, 0x01, 0x02]),
            Err(PrimitivesError::BufferUnderflow { declared: 4, remaining: 2 })
        );
    }

    // -- VarBin --

    #[test]
    fn test_var_bin_roundtrip_with_rest() {
        let mut data = serialize_var_bin(b"hello");
        assert_eq!(data, vec![0x05, b'h', b'e', b'l', b'l', b'o']);
        data.extend_from_slice(&[0xaa, 0xbb]);

        let (value, rest) = parse_var_bin(&data).unwrap();
        assert_eq!(value, b"hello");
        assert_eq!(rest, &[0xaa, 0xbb]);
    }

    #[test]
    fn test_var_bin_long_prefix() {
        let blob = vec![0x42u8; 0xfd];
        let data = serialize_var_bin(&blob);
        assert_eq!(&data[..3], &[0xfd, 0xfd, 0x00]);
        assert_eq!(data.len(), 3 + 0xfd);

        let (value, rest) = parse_var_bin(&data).unwrap();
        assert_eq!(value, blob);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_var_bin_underflow() {
        assert_eq!(
            parse_var_bin(&[0x05, 0x01, 0x02]),
            Err(PrimitivesError::BufferUnderflow { declared: 5, remaining: 2 })
        );
        assert!(matches!(
            parse_var_bin(&[0xfd, 0x01]),
            Err(PrimitivesError::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_var_bin_empty_blob() {
        assert_eq!(serialize_var_bin(&[]), vec![0x00]);
        let (value, rest) = parse_var_bin(&[0x00, 0x01]).unwrap();
        assert!(value.is_empty());
        assert_eq!(rest, &[0x01]);
    }

    // -- BsvReader / BsvWriter --

    #[test]
    fn test_bsv_reader_writer_roundtrip() {
        let mut writer = BsvWriter::new();
        writer.write_u32_le(0xDEADBEEF);
        writer.write_u64_le(0x0102030405060708);
        writer.write_varint(VarInt(300));
        writer.write_var_bytes(b"hello");
        assert_eq!(writer.len(), 4 + 8 + 3 + 6);

        let data = writer.into_bytes();
        let mut reader = BsvReader::new(&data);

        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_varint().unwrap(), VarInt(300));
        assert_eq!(reader.read_var_bytes().unwrap(), b"hello");
        assert_eq!(reader.remaining(), 0);
        assert!(reader.rest().is_empty());
    }

    #[test]
    fn test_bsv_reader_eof_keeps_position() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = BsvReader::new(&data);
        assert_eq!(reader.read_u32_le(), Err(PrimitivesError::UnexpectedEof));
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn test_bsv_reader_var_bytes_underflow_keeps_position() {
        let data = [0x03, 0xaa];
        let mut reader = BsvReader::new(&data);
        assert!(reader.read_var_bytes().is_err());
        assert_eq!(reader.remaining(), 2);
    }
}
