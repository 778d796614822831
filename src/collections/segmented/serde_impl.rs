//! `serde` support: a deque serializes as a sequence, front to back.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, Error, SeqAccess};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::SegDeque;

/// Upper bound on what a deserializer's length hint may pre-allocate.
const MAX_PREALLOC: usize = 4096;

impl<T: Serialize, const BLOCK: usize> Serialize for SegDeque<T, BLOCK> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T, const BLOCK: usize> Deserialize<'de> for SegDeque<T, BLOCK>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor<'de, T, const BLOCK: usize>(PhantomData<(&'de (), T)>);

        impl<'de, T, const BLOCK: usize> de::Visitor<'de> for ValueVisitor<'de, T, BLOCK>
        where
            T: Deserialize<'de>,
        {
            type Value = SegDeque<T, BLOCK>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let hint = seq.size_hint().unwrap_or(0).min(MAX_PREALLOC);
                let mut values = SegDeque::try_new().map_err(A::Error::custom)?;
                values.try_reserve_back(hint).map_err(A::Error::custom)?;

                while let Some(value) = seq.next_element()? {
                    values.push_back(value);
                }

                Ok(values)
            }
        }
        deserializer.deserialize_seq(ValueVisitor(PhantomData))
    }
}
