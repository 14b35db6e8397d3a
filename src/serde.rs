#![cfg(feature = "serde")]
//! `serde` support for [`ShiftBuffer`].
//!
//! - **Serialize**: the live elements as a sequence, oldest first.
//! - **Deserialize**: from any sequence, appended in order.

use core::fmt;
use core::marker::PhantomData;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

use crate::shift_buffer::ShiftBuffer;

/// Upper bound on the capacity pre-allocated from an untrusted length hint.
const MAX_PREALLOCATED: usize = 4096;

impl<T: Serialize> Serialize for ShiftBuffer<T> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use ser::SerializeSeq;
        let mut seq = s.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct BufferVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> de::Visitor<'de> for BufferVisitor<T> {
    type Value = ShiftBuffer<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let capacity = seq
            .size_hint()
            .unwrap_or(ShiftBuffer::<T>::DEFAULT_CAPACITY)
            .min(MAX_PREALLOCATED);
        let mut out = ShiftBuffer::try_with_capacity(capacity).map_err(A::Error::custom)?;
        while let Some(elem) = seq.next_element::<T>()? {
            out.shove(core::iter::once(elem)).map_err(A::Error::custom)?;
        }
        Ok(out)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ShiftBuffer<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_seq(BufferVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::ShiftBuffer;

    #[test]
    fn test_serde_roundtrip_json() {
        let mut b: ShiftBuffer<i32> = ShiftBuffer::new();
        b.write(&[0, 1, 2, 3]).unwrap();
        b.skip(1).unwrap();

        let s = serde_json::to_string(&b).unwrap();
        assert_eq!(s, "[1,2,3]");
        let back: ShiftBuffer<i32> = serde_json::from_str(&s).unwrap();
        assert_eq!(back.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_serde_empty_json() {
        let back: ShiftBuffer<String> = serde_json::from_str("[]").unwrap();
        assert!(back.is_empty());
        assert!(back.capacity() > 0);
    }

    #[test]
    fn test_serde_rejects_non_sequence() {
        let err = serde_json::from_str::<ShiftBuffer<u8>>("{\"a\":1}").unwrap_err();
        assert!(err.to_string().contains("sequence"), "msg: {err}");
    }
}
