use super::Blooms;
use crate::encoder::Encoder;
use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Serialized as the base64 text form. The encoder is not part of the serialized state.
impl<E> Serialize for Blooms<E>
where
    E: Encoder,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_base64())
    }
}

/// Deserialized from the base64 text form, using the default encoder of `E`.
impl<'de, E> Deserialize<'de> for Blooms<E>
where
    E: Encoder + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BloomsVisitor<E> {
            _e: PhantomData<E>,
        }

        impl<E> Visitor<'_> for BloomsVisitor<E>
        where
            E: Encoder + Default,
        {
            type Value = Blooms<E>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a base64 encoded Bloom filter")
            }

            fn visit_str<Err>(self, v: &str) -> Result<Self::Value, Err>
            where
                Err: de::Error,
            {
                Blooms::from_base64_with_encoder(v, E::default()).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(BloomsVisitor { _e: PhantomData })
    }
}

#[cfg(test)]
mod tests {
    use super::Blooms;
    use crate::specialize;

    specialize! {
        FirstTwo(item: &[u8]) {
            item.iter().copied().take(2).collect::<Vec<u8>>()
        }
    }

    #[test]
    fn serialize() {
        let mut bf = Blooms::new(4).unwrap();
        bf.insert(&[0x00, 0x00]).insert(&[0xff, 0xff]);
        assert_eq!(serde_json::to_string(&bf).unwrap(), "\"gAAAAQ==\"");
    }

    #[test]
    fn deserialize() {
        let bf: Blooms = serde_json::from_str("\"gAAAAQ==\"").unwrap();
        assert_eq!(bf.as_bytes(), &[0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn deserialize_invalid() {
        let err = serde_json::from_str::<Blooms>("\"gAAAAQ\"").unwrap_err();
        assert!(err.to_string().contains("base64"), "{err}");

        let err = serde_json::from_str::<Blooms>("\"\"").unwrap_err();
        assert!(err.to_string().contains("positive"), "{err}");

        assert!(serde_json::from_str::<Blooms>("42").is_err());
    }

    #[test]
    fn roundtrip_specialized() {
        let mut bf = FirstTwo::filter(16).unwrap();
        bf.insert(&[0x12, 0x34, 0x56]);

        let json = serde_json::to_string(&bf).unwrap();
        let bf2: Blooms<FirstTwo> = serde_json::from_str(&json).unwrap();
        assert_eq!(bf, bf2);
        assert!(bf2.contains(&[0x12, 0x34, 0x99]));
    }
}
