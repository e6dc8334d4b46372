//! `serde` support: a deque serializes as a sequence, front to back.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::SegDeque;

/// Upper bound on the capacity trusted from a sequence size hint.
const MAX_PREALLOCATE: usize = 4096;

impl<T: Serialize> Serialize for SegDeque<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for segment in self.segments() {
            for element in segment {
                seq.serialize_element(element)?;
            }
        }
        seq.end()
    }
}

struct SegDequeVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for SegDequeVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = SegDeque<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut deque =
            SegDeque::try_with_capacity(capacity).map_err(<A::Error as serde::de::Error>::custom)?;
        while let Some(element) = seq.next_element()? {
            deque.push_back(element);
        }
        Ok(deque)
    }
}

impl<'de, T> Deserialize<'de> for SegDeque<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SegDequeVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_front_to_back() {
        let mut d: SegDeque<i32> = SegDeque::new();
        d.push_back(2);
        d.push_front(1);
        d.push_back(3);
        assert_eq!(serde_json::to_string(&d).unwrap(), "[1,2,3]");
    }

    #[test]
    fn empty_round_trip() {
        let d: SegDeque<String> = serde_json::from_str("[]").unwrap();
        assert!(d.is_empty());
        assert_eq!(serde_json::to_string(&d).unwrap(), "[]");
    }

    #[test]
    fn rejects_non_sequences() {
        let result: Result<SegDeque<u8>, _> = serde_json::from_str("{\"a\":1}");
        assert!(result.is_err());
    }
}
