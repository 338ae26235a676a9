//! Serde helpers for Discord snowflake IDs.
//!
//! IDs are written as strings. Reading accepts either a string or a number so that
//! hand-written settings payloads still parse.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSnowflake {
    Str(String),
    Num(u64),
}

impl RawSnowflake {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            RawSnowflake::Num(value) => Ok(value),
            RawSnowflake::Str(value) => value.trim().parse::<u64>().map_err(E::custom),
        }
    }
}

pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    RawSnowflake::deserialize(deserializer)?.into_u64()
}

pub mod option {
    use super::RawSnowflake;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawSnowflake>::deserialize(deserializer)?
            .map(RawSnowflake::into_u64)
            .transpose()
    }
}

pub mod vec {
    use super::RawSnowflake;
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for id in value {
            seq.serialize_element(&id.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<RawSnowflake>::deserialize(deserializer)?
            .into_iter()
            .map(RawSnowflake::into_u64)
            .collect()
    }
}
