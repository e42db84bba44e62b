use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::resolve::{as_number, resolve};

/// One completed assessment session as delivered by the data store.
///
/// The payload is an arbitrary nested JSON object. The engine only reads it;
/// typed accessors below cover the handful of top-level keys every record
/// carries, everything else is reached through [`resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AssessmentRecord {
    data: Map<String, Value>,
}

impl AssessmentRecord {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn as_value(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Resolve a dotted path against this record.
    pub fn get(&self, path: &str) -> Option<&Value> {
        resolve(&self.data, path)
    }

    /// The first of `paths` that resolves.
    pub fn get_first<'a, I>(&self, paths: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths.into_iter().find_map(|p| self.get(p))
    }

    /// Like [`get_first`](Self::get_first) but only accepts values that
    /// coerce to a finite number.
    pub fn number_at<'a, I>(&self, paths: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths.into_iter().find_map(|p| self.get(p).and_then(as_number))
    }

    pub fn session_id(&self) -> Option<&str> {
        self.str_field("session_id")
    }

    pub fn assessment_id(&self) -> Option<&str> {
        self.str_field("assessment_id")
    }

    pub fn gender(&self) -> Option<&str> {
        self.str_field("gender")
    }

    /// The session timestamp.
    ///
    /// Accepts an RFC 3339 string, an offset-less ISO date-time (read as
    /// UTC), or a number of Unix milliseconds.
    pub fn timestamp(&self) -> Result<Option<jiff::Timestamp>, CoreError> {
        let Some(value) = self.data.get("timestamp") else {
            return Ok(None);
        };
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => {
                let ms = n.as_i64().ok_or_else(|| CoreError::InvalidTimestamp {
                    value: n.to_string(),
                    reason: "not an integer millisecond count".to_string(),
                })?;
                jiff::Timestamp::from_millisecond(ms)
                    .map(Some)
                    .map_err(|e| CoreError::InvalidTimestamp {
                        value: n.to_string(),
                        reason: e.to_string(),
                    })
            }
            Value::String(s) => parse_timestamp(s).map(Some),
            other => Err(CoreError::InvalidTimestamp {
                value: other.to_string(),
                reason: "unsupported type".to_string(),
            }),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

fn parse_timestamp(s: &str) -> Result<jiff::Timestamp, CoreError> {
    if let Ok(ts) = s.parse::<jiff::Timestamp>() {
        return Ok(ts);
    }
    s.parse::<jiff::civil::DateTime>()
        .and_then(|dt| dt.to_zoned(jiff::tz::TimeZone::UTC))
        .map(|zdt| zdt.timestamp())
        .map_err(|e| CoreError::InvalidTimestamp {
            value: s.to_string(),
            reason: e.to_string(),
        })
}

impl TryFrom<Value> for AssessmentRecord {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => Err(CoreError::NotAnObject),
        }
    }
}

impl From<AssessmentRecord> for Value {
    fn from(record: AssessmentRecord) -> Self {
        Value::Object(record.data)
    }
}
