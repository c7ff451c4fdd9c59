//! Inbound app message dictionary.
//!
//! Layout:
//! ```text
//! Byte 0: Tuple count
//! Per tuple:
//!   Bytes 0-3: Key (u32, little-endian)
//!   Byte 4:    Value kind (0 = bytes, 1 = cstring, 2 = uint, 3 = int)
//!   Bytes 5-6: Value length (u16, little-endian)
//!   Bytes 7..: Value
//! ```
//! Integers are little-endian and 1, 2 or 4 bytes wide.

use crate::config::INBOX_SIZE;
use crate::error::MessageError;

/// Size of a tuple header in bytes.
const TUPLE_HEADER_SIZE: usize = 7;

/// Value kind tag of a tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleKind {
    ByteArray,
    CString,
    Uint,
    Int,
}

impl TryFrom<u8> for TupleKind {
    type Error = MessageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TupleKind::ByteArray),
            1 => Ok(TupleKind::CString),
            2 => Ok(TupleKind::Uint),
            3 => Ok(TupleKind::Int),
            other => Err(MessageError::UnknownKind(other)),
        }
    }
}

/// One key/value entry borrowed from a message buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuple<'a> {
    pub key: u32,
    pub kind: TupleKind,
    pub value: &'a [u8],
}

impl Tuple<'_> {
    /// Read the value as an integer.
    ///
    /// Returns `None` for non-integer kinds and unsupported widths.
    pub fn as_int(&self) -> Option<i32> {
        let v = self.value;
        match (self.kind, v.len()) {
            (TupleKind::Uint, 1) => Some(v[0] as i32),
            (TupleKind::Uint, 2) => Some(u16::from_le_bytes([v[0], v[1]]) as i32),
            (TupleKind::Uint, 4) => {
                i32::try_from(u32::from_le_bytes([v[0], v[1], v[2], v[3]])).ok()
            }
            (TupleKind::Int, 1) => Some(v[0] as i8 as i32),
            (TupleKind::Int, 2) => Some(i16::from_le_bytes([v[0], v[1]]) as i32),
            (TupleKind::Int, 4) => Some(i32::from_le_bytes([v[0], v[1], v[2], v[3]])),
            _ => None,
        }
    }
}

/// A validated message envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dictionary<'a> {
    count: u8,
    body: &'a [u8],
}

impl<'a> Dictionary<'a> {
    /// Validate `data` and wrap it. Every tuple must fit inside the buffer.
    pub fn parse(data: &'a [u8]) -> Result<Self, MessageError> {
        if data.len() > INBOX_SIZE {
            return Err(MessageError::TooLarge);
        }
        let (&count, body) = data.split_first().ok_or(MessageError::Truncated)?;

        let mut offset = 0;
        for _ in 0..count {
            let (_, len) = read_tuple(&body[offset..])?;
            offset += len;
        }

        Ok(Self {
            count,
            body: &body[..offset],
        })
    }

    /// Number of tuples in the message.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> Tuples<'a> {
        Tuples {
            remaining: self.count,
            rest: self.body,
        }
    }

    /// First tuple with `key`.
    pub fn find(&self, key: u32) -> Option<Tuple<'a>> {
        self.iter().find(|t| t.key == key)
    }
}

/// Iterator over the tuples of a [`Dictionary`].
pub struct Tuples<'a> {
    remaining: u8,
    rest: &'a [u8],
}

impl<'a> Iterator for Tuples<'a> {
    type Item = Tuple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // Already validated by `Dictionary::parse`.
        let (tuple, len) = read_tuple(self.rest).ok()?;
        self.rest = &self.rest[len..];
        self.remaining -= 1;
        Some(tuple)
    }
}

/// Decode one tuple from the front of `data`, returning it and its encoded size.
fn read_tuple(data: &[u8]) -> Result<(Tuple<'_>, usize), MessageError> {
    if data.len() < TUPLE_HEADER_SIZE {
        return Err(MessageError::Truncated);
    }
    let key = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let kind = TupleKind::try_from(data[4])?;
    let len = u16::from_le_bytes([data[5], data[6]]) as usize;

    let end = TUPLE_HEADER_SIZE + len;
    if data.len() < end {
        return Err(MessageError::Truncated);
    }

    Ok((
        Tuple {
            key,
            kind,
            value: &data[TUPLE_HEADER_SIZE..end],
        },
        end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_tuple(key: u32, kind: u8, value: &[u8], out: &mut heapless::Vec<u8, 64>) {
        out.extend_from_slice(&key.to_le_bytes()).unwrap();
        out.push(kind).unwrap();
        out.extend_from_slice(&(value.len() as u16).to_le_bytes()).unwrap();
        out.extend_from_slice(value).unwrap();
    }

    #[test]
    fn parse_single_uint_tuple() {
        let mut buf = heapless::Vec::<u8, 64>::new();
        buf.push(1).unwrap();
        int_tuple(1, 2, &[1], &mut buf);

        let dict = Dictionary::parse(&buf).unwrap();
        assert_eq!(dict.len(), 1);
        let tuple = dict.find(1).unwrap();
        assert_eq!(tuple.kind, TupleKind::Uint);
        assert_eq!(tuple.as_int(), Some(1));
    }

    #[test]
    fn parse_multiple_tuples_and_find_by_key() {
        let mut buf = heapless::Vec::<u8, 64>::new();
        buf.push(3).unwrap();
        int_tuple(7, 0, b"abc", &mut buf);
        int_tuple(1, 3, &(-2i16).to_le_bytes(), &mut buf);
        int_tuple(9, 2, &70000u32.to_le_bytes(), &mut buf);

        let dict = Dictionary::parse(&buf).unwrap();
        assert_eq!(dict.iter().count(), 3);
        assert_eq!(dict.find(1).unwrap().as_int(), Some(-2));
        assert_eq!(dict.find(9).unwrap().as_int(), Some(70000));
        assert_eq!(dict.find(7).unwrap().value, b"abc");
        assert_eq!(dict.find(7).unwrap().as_int(), None);
        assert!(dict.find(42).is_none());
    }

    #[test]
    fn signed_byte_is_sign_extended() {
        let tuple = Tuple {
            key: 0,
            kind: TupleKind::Int,
            value: &[0xFF],
        };
        assert_eq!(tuple.as_int(), Some(-1));
    }

    #[test]
    fn uint_out_of_i32_range_is_rejected() {
        let tuple = Tuple {
            key: 0,
            kind: TupleKind::Uint,
            value: &[0xFF, 0xFF, 0xFF, 0xFF],
        };
        assert_eq!(tuple.as_int(), None);
    }

    #[test]
    fn odd_integer_width_is_rejected() {
        let tuple = Tuple {
            key: 0,
            kind: TupleKind::Int,
            value: &[1, 0, 0],
        };
        assert_eq!(tuple.as_int(), None);
    }

    #[test]
    fn empty_buffer_is_truncated() {
        assert_eq!(Dictionary::parse(&[]), Err(MessageError::Truncated));
    }

    #[test]
    fn zero_tuples_is_valid() {
        let dict = Dictionary::parse(&[0]).unwrap();
        assert!(dict.is_empty());
        assert!(dict.find(1).is_none());
    }

    #[test]
    fn short_header_is_truncated() {
        assert_eq!(
            Dictionary::parse(&[1, 1, 0, 0, 0, 2]),
            Err(MessageError::Truncated)
        );
    }

    #[test]
    fn value_past_end_is_truncated() {
        // Declares 4 value bytes, carries 1.
        assert_eq!(
            Dictionary::parse(&[1, 1, 0, 0, 0, 2, 4, 0, 1]),
            Err(MessageError::Truncated)
        );
    }

    #[test]
    fn missing_second_tuple_is_truncated() {
        assert_eq!(
            Dictionary::parse(&[2, 1, 0, 0, 0, 2, 1, 0, 1]),
            Err(MessageError::Truncated)
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            Dictionary::parse(&[1, 1, 0, 0, 0, 9, 1, 0, 1]),
            Err(MessageError::UnknownKind(9))
        );
    }

    #[test]
    fn oversized_envelope_is_rejected() {
        let buf = [0u8; INBOX_SIZE + 1];
        assert_eq!(Dictionary::parse(&buf), Err(MessageError::TooLarge));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let dict = Dictionary::parse(&[1, 1, 0, 0, 0, 2, 1, 0, 1, 0xAA, 0xBB]).unwrap();
        assert_eq!(dict.find(1).unwrap().as_int(), Some(1));
    }
}
