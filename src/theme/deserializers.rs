use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serializer,
    de::{Error, MapAccess, Visitor},
    ser::SerializeMap,
};
use smallvec::SmallVec;

use super::{ColorScale, ColorToken, KeyframeStep};

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[String; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(String),
        Many(SmallVec<[String; 2]>),
    }

    let value = StringOrVec::deserialize(deserializer)?;

    match value {
        StringOrVec::One(string) => Ok(smallvec::smallvec![string]),
        StringOrVec::Many(vec) => {
            if vec.is_empty() {
                return Err(D::Error::custom("list can't be empty."));
            }

            Ok(vec)
        }
    }
}

impl<'de> Deserialize<'de> for ColorToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ColorTokenVisitor)
    }
}

struct ColorTokenVisitor;

impl<'de> Visitor<'de> for ColorTokenVisitor {
    type Value = ColorToken;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a color string or a map of shades to color strings")
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ColorToken::Value(value.to_string()))
    }

    fn visit_string<E: Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ColorToken::Value(value))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut scale = ColorScale::with_capacity(map.size_hint().unwrap_or(0));

        while let Some((shade, color)) = map.next_entry::<String, String>()? {
            if scale.contains_key(&shade) {
                return Err(A::Error::custom(format!("duplicate shade `{shade}`")));
            }
            scale.insert(shade, color);
        }

        Ok(ColorToken::Scale(scale))
    }
}

/// Reads a `{ "<selector>": { "<property>": "<value>" } }` map into steps,
/// in document order.
pub fn de_keyframe_steps<'de, D>(deserializer: D) -> Result<Vec<KeyframeStep>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StepsVisitor;

    impl<'de> Visitor<'de> for StepsVisitor {
        type Value = Vec<KeyframeStep>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of keyframe selectors to property maps")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut steps = Vec::with_capacity(map.size_hint().unwrap_or(0));

            while let Some((selector, properties)) =
                map.next_entry::<String, IndexMap<String, String>>()?
            {
                steps.push(KeyframeStep {
                    selector,
                    properties,
                });
            }

            Ok(steps)
        }
    }

    deserializer.deserialize_map(StepsVisitor)
}

#[allow(clippy::ptr_arg)] // Signature is fixed by `serialize_with`.
pub fn ser_keyframe_steps<S>(steps: &Vec<KeyframeStep>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(steps.len()))?;
    for step in steps {
        map.serialize_entry(&step.selector, &step.properties)?;
    }
    map.end()
}
