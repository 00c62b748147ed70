//! Integers that travel as JSON strings.
//!
//! The native completion API encodes 64-bit counters and limits as strings
//! (`"maxTokens": "2000"`), but some gateways return plain numbers. Use with
//! `#[serde(with = "common::quoted")]` or `common::quoted::option`.

use serde::{Deserialize, Deserializer, Serializer, de};
use std::{fmt::Display, str::FromStr};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

impl StringOrNumber {
    fn parse<T, E>(self) -> Result<T, E>
    where
        T: FromStr + TryFrom<u64>,
        <T as FromStr>::Err: Display,
        E: de::Error,
    {
        match self {
            StringOrNumber::String(s) => s.trim().parse().map_err(E::custom),
            StringOrNumber::Number(n) => {
                T::try_from(n).map_err(|_| E::custom(format!("{n} is out of range")))
            }
        }
    }
}

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr + TryFrom<u64>,
    <T as FromStr>::Err: Display,
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer)?.parse()
}

pub mod option {
    use super::StringOrNumber;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::{fmt::Display, str::FromStr};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr + TryFrom<u64>,
        <T as FromStr>::Err: Display,
        D: Deserializer<'de>,
    {
        Option::<StringOrNumber>::deserialize(deserializer)?
            .map(StringOrNumber::parse)
            .transpose()
    }
}
