//! stats.nba.com `js/data` documents. The root holds a single key named after the
//! stat group, e.g. `{"NBA_Player_Movement": {"rows": [...]}}`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::DecodeError;

/// One loosely typed table row, keyed by column name.
pub type StatsRow = Map<String, Value>;

/// A stat group whose name is only known once the document is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTln {
    pub stat_group_name: String,
    pub stat_group: Vec<StatsRow>,
}

/// Shape used when the document already names its group explicitly.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct NamedStatsTln {
    stat_group_name: String,
    #[serde(default)]
    stat_group: Vec<StatsRow>,
}

impl StatsTln {
    /// Decode from already-parsed JSON.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        if let Ok(named) = NamedStatsTln::deserialize(&value) {
            return Ok(StatsTln {
                stat_group_name: named.stat_group_name,
                stat_group: named.stat_group,
            });
        }

        let Value::Object(root) = value else {
            return Err(DecodeError::MalformedStatGroup {
                group: String::new(),
            });
        };
        if root.len() > 1 {
            let keys: Vec<&String> = root.keys().collect();
            warn!(?keys, "stat document has several top-level keys; using the first");
        }
        let Some((group, body)) = root.into_iter().next() else {
            return Ok(StatsTln::default());
        };

        let rows = match body {
            Value::Object(mut fields) => match fields.remove("rows") {
                Some(Value::Array(rows)) => rows,
                _ => return Err(DecodeError::MalformedStatGroup { group }),
            },
            _ => return Err(DecodeError::MalformedStatGroup { group }),
        };

        let mut stat_group = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Value::Object(row) => stat_group.push(row),
                _ => return Err(DecodeError::MalformedStatRow { group, index }),
            }
        }
        Ok(StatsTln {
            stat_group_name: group,
            stat_group,
        })
    }

    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        Self::from_value(serde_json::from_str(body)?)
    }
}

impl<'de> Deserialize<'de> for StatsTln {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        StatsTln::from_value(value).map_err(de::Error::custom)
    }
}
