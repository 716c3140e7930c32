// Path: crates/types/src/codec.rs

//! Defines the fixed-layout binary codec shared by every account record and
//! program instruction.
//!
//! The wire format is the one the deployed program reads and writes:
//!
//! * integers are little-endian,
//! * public keys are 32 raw bytes,
//! * strings are a `u32` little-endian byte length followed by raw UTF-8,
//! * account records start with a one-byte [`AccountType`] discriminant and are
//!   zero-padded to their maximum size.
//!
//! Each record type declares its field order once, as a constant [`Layout`].
//! Decoding reads a prefix of the buffer; any trailing bytes (over-allocated
//! account storage) are ignored.

use crate::app::{AccountType, MAX_NAME_LEN, PUBKEY_LEN};
use crate::error::CodecError;
use bytes::{Buf, BufMut, BytesMut};

/// The wire type of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// One byte.
    U8,
    /// Four bytes, little-endian.
    U32,
    /// Eight bytes, little-endian.
    U64,
    /// Thirty-two raw bytes.
    PublicKey,
    /// A `u32` length prefix and up to [`MAX_NAME_LEN`] UTF-8 bytes.
    Name,
}

impl FieldKind {
    /// The smallest encoding of this field.
    pub const fn min_size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U32 => 4,
            Self::U64 => 8,
            Self::PublicKey => PUBKEY_LEN,
            Self::Name => 4,
        }
    }

    /// The largest encoding of this field.
    pub const fn max_size(self) -> usize {
        match self {
            Self::Name => 4 + MAX_NAME_LEN,
            other => other.min_size(),
        }
    }
}

/// A named field in a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// The field name, used in decode errors.
    pub name: &'static str,
    /// The wire type.
    pub kind: FieldKind,
}

impl Field {
    /// Declares a field.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// The ordered field list of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout(pub &'static [Field]);

impl Layout {
    /// The smallest valid encoding: every name empty.
    pub const fn min_size(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.0.len() {
            total += self.0[i].kind.min_size();
            i += 1;
        }
        total
    }

    /// The largest valid encoding: every name at its maximum length.
    /// Account records are always padded to this size.
    pub const fn max_size(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.0.len() {
            total += self.0[i].kind.max_size();
            i += 1;
        }
        total
    }

    /// The fields in wire order.
    pub fn fields(&self) -> &'static [Field] {
        self.0
    }
}

/// A bounds-checked cursor over an encoded buffer.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Starts reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<(), CodecError> {
        if self.buf.remaining() < needed {
            return Err(CodecError::TruncatedBuffer {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.ensure(8)?;
        Ok(self.buf.get_u64_le())
    }

    /// Reads 32 raw bytes.
    pub fn read_key(&mut self) -> Result<[u8; PUBKEY_LEN], CodecError> {
        self.ensure(PUBKEY_LEN)?;
        let mut out = [0u8; PUBKEY_LEN];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Reads a length-prefixed UTF-8 string of at most [`MAX_NAME_LEN`] bytes.
    pub fn read_name(&mut self, field: &'static str) -> Result<String, CodecError> {
        let len = self.read_u32()? as usize;
        if len > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong {
                field,
                len,
                max: MAX_NAME_LEN,
            });
        }
        self.ensure(len)?;
        let (head, tail) = self.buf.split_at(len);
        let s = std::str::from_utf8(head)
            .map_err(|source| CodecError::InvalidUtf8 { field, source })?
            .to_owned();
        self.buf = tail;
        Ok(s)
    }
}

/// An append-only encoder for records and instruction payloads.
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    /// Creates a writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends one byte.
    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    /// Appends a little-endian `u32`.
    pub fn put_u32(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    /// Appends a little-endian `u64`.
    pub fn put_u64(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    /// Appends 32 raw bytes.
    pub fn put_key(&mut self, key: &[u8; PUBKEY_LEN]) {
        self.buf.put_slice(key);
    }

    /// Appends a length-prefixed string. Callers validate the length first.
    pub fn put_name(&mut self, name: &str) {
        self.buf.put_u32_le(name.len() as u32);
        self.buf.put_slice(name.as_bytes());
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    /// Returns the written bytes, zero-padded up to `size`.
    pub fn into_padded(mut self, size: usize) -> Vec<u8> {
        if self.buf.len() < size {
            self.buf.resize(size, 0);
        }
        self.buf.to_vec()
    }
}

/// A record in its wire form: primitive fields in on-chain order.
pub trait RawRecord: Sized {
    /// The field order, leading discriminant included.
    const LAYOUT: Layout;

    /// Writes every field, discriminant included.
    fn write(&self, w: &mut Writer);

    /// Reads every field, discriminant included, without interpreting it.
    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError>;
}

/// A domain-level account record with a fixed on-chain layout.
pub trait Account: Sized {
    /// The discriminant every encoded record of this type starts with.
    const ACCOUNT_TYPE: AccountType;

    /// The wire form.
    type Raw: RawRecord;

    /// Lowers the record into its wire form.
    fn to_raw(&self) -> Self::Raw;

    /// Lifts a wire record into its domain form, validating every field.
    fn from_raw(raw: Self::Raw) -> Result<Self, CodecError>;

    /// The padded on-chain size of the record.
    fn size() -> usize {
        Self::Raw::LAYOUT.max_size()
    }

    /// Encodes the record, zero-padded to [`Account::size`].
    fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(Self::size());
        self.to_raw().write(&mut w);
        w.into_padded(Self::size())
    }

    /// Decodes a record from the start of `data`. Trailing bytes are ignored.
    ///
    /// The discriminant is checked before anything else, so a record of another
    /// kind fails with [`CodecError::UnexpectedAccountType`].
    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let found = account_type_of(data)?;
        if found != Self::ACCOUNT_TYPE {
            return Err(CodecError::UnexpectedAccountType {
                expected: Self::ACCOUNT_TYPE,
                found,
            });
        }
        let min = Self::Raw::LAYOUT.min_size();
        if data.len() < min {
            return Err(CodecError::TruncatedBuffer {
                needed: min,
                remaining: data.len(),
            });
        }
        let raw = Self::Raw::read(&mut Reader::new(data))?;
        Self::from_raw(raw)
    }
}

/// Checks a raw discriminant against the expected account type.
pub fn expect_account_type(raw: u8, expected: AccountType) -> Result<(), CodecError> {
    let found = AccountType::try_from(raw).map_err(|value| CodecError::InvalidDiscriminant {
        field: "account_type",
        value,
    })?;
    if found != expected {
        return Err(CodecError::UnexpectedAccountType { expected, found });
    }
    Ok(())
}

/// Peeks at the discriminant of an encoded record.
pub fn account_type_of(data: &[u8]) -> Result<AccountType, CodecError> {
    let raw = Reader::new(data).read_u8()?;
    AccountType::try_from(raw).map_err(|value| CodecError::InvalidDiscriminant {
        field: "account_type",
        value,
    })
}
