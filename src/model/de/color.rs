//! Deserializer for the Color type.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::de::{self, Deserialize, Visitor};

use crate::model::types::Color;


const EXPECTING_MSG: &str = "CSS color string or RGB triple";


impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;
impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Color::from_str(v).map_err(|e| {
            warn!("Failed to parse color `{}`: {}", v, e);
            E::custom(e)
        })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = seq.next_element::<u8>()?
                .ok_or_else(|| de::Error::invalid_length(i, &"3"))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(4, &"3"));
        }
        let [r, g, b] = channels;
        Ok(Color(r, g, b))
    }
}
