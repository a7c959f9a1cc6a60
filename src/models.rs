use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Local, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::constants::DEFAULT_KEYWORD;

/// A registered lottery participant (a mesh node)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// String-keyed map that keeps the key order of the JSON object it was
/// decoded from. Duplicate keys keep their first position, last value wins.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Prize name -> number of winner slots, in display order
pub type PrizeLevels = OrderedMap<u32>;

/// Prize name -> drawn winners, in display order
pub type Winners = OrderedMap<Vec<Participant>>;

/// Change-detection marker reported by the backend as `lastUpdate`.
///
/// Only ever compared for equality. The lottery backend sends epoch
/// seconds as a float.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Watermark(pub f64);

impl Watermark {
    /// Values below this are treated as plain counters, not timestamps
    const MIN_EPOCH_SECS: f64 = 1_000_000_000.0;

    pub fn as_datetime(&self) -> Option<DateTime<Local>> {
        if !self.0.is_finite() || self.0 < Self::MIN_EPOCH_SECS {
            return None;
        }
        let secs = self.0.trunc() as i64;
        let nanos = (self.0.fract() * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos).map(|dt| dt.with_timezone(&Local))
    }

    /// Short human label for the status line
    pub fn label(&self) -> String {
        match self.as_datetime() {
            Some(dt) => dt.format("%H:%M:%S").to_string(),
            None => format!("#{}", self.0),
        }
    }
}

/// Full server-reported lottery state, as returned by `GET /status`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<Participant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participant_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prizes: PrizeLevels,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_progress: bool,
    #[serde(default)]
    pub results: Option<Winners>,
    #[serde(default)]
    pub last_update: Watermark,
}

impl StatusSnapshot {
    /// Decode a `/status` body. Missing or null fields fall back to their
    /// empty values and an empty keyword becomes the default keyword.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let mut snapshot: StatusSnapshot = serde_json::from_str(body)?;
        if snapshot.keyword.is_empty() {
            snapshot.keyword = DEFAULT_KEYWORD.to_string();
        }
        Ok(snapshot)
    }

    /// True when this snapshot carries the outcome of a finished draw
    pub fn has_completed_draw(&self) -> bool {
        self.results.is_some() && !self.in_progress
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Visual tier of a prize, derived from its name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrizeTier {
    First,
    Second,
    Third,
    Other,
}

impl PrizeTier {
    pub fn classify(prize_name: &str) -> PrizeTier {
        if prize_name.contains("First Prize") || prize_name.contains("一等奖") {
            PrizeTier::First
        } else if prize_name.contains("Second Prize") || prize_name.contains("二等奖") {
            PrizeTier::Second
        } else if prize_name.contains("Third Prize") || prize_name.contains("三等奖") {
            PrizeTier::Third
        } else {
            PrizeTier::Other
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            PrizeTier::First => "👑",
            PrizeTier::Second => "🥈",
            PrizeTier::Third => "🥉",
            PrizeTier::Other => "🏆",
        }
    }
}
