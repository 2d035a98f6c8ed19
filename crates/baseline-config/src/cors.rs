use std::time::Duration;

use serde::Deserialize;

/// CORS configuration for browser clients served from another origin
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (`"*"` or explicit list)
    #[serde(default)]
    pub origins: AnyOrList,
    /// Allowed HTTP methods (`"*"` or explicit list)
    #[serde(default)]
    pub methods: AnyOrList,
    /// Allowed request headers (`"*"` or explicit list)
    #[serde(default)]
    pub headers: AnyOrList,
    /// Allow credentials (cookies, authorization headers)
    #[serde(default)]
    pub credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

/// Either the wildcard `"*"` or an explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnyOrList {
    #[default]
    Any,
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for AnyOrList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct AnyOrListVisitor;

        impl<'de> de::Visitor<'de> for AnyOrListVisitor {
            type Value = AnyOrList;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("\"*\", a single value, or an array of strings")
            }

            fn visit_str<E>(self, v: &str) -> Result<AnyOrList, E>
            where
                E: de::Error,
            {
                Ok(if v == "*" {
                    AnyOrList::Any
                } else {
                    AnyOrList::List(vec![v.to_owned()])
                })
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<AnyOrList, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<String>()? {
                    // A wildcard anywhere in the list widens it to everything
                    if value == "*" {
                        return Ok(AnyOrList::Any);
                    }
                    values.push(value);
                }
                Ok(AnyOrList::List(values))
            }
        }

        deserializer.deserialize_any(AnyOrListVisitor)
    }
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}
