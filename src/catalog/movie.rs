use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single catalog entry.
///
/// The three fields the view works with are typed. The record itself is kept
/// exactly as it was read, with its own key names and key order, and that is
/// what gets written back on export.
#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    record: Map<String, Value>,
}

/// Typed view over a source record. Unknown keys are ignored here and stay
/// in the record.
#[derive(Deserialize)]
struct MovieFields {
    #[serde(rename = "titulo", alias = "title")]
    title: String,

    #[serde(rename = "genero", alias = "genre")]
    genre: String,

    #[serde(rename = "lanzamiento", alias = "releaseYear")]
    release_year: i32,
}

impl Movie {
    pub fn new<T: Into<String>, G: Into<String>>(title: T, genre: G, release_year: i32) -> Self {
        let title = title.into();
        let genre = genre.into();
        let mut record = Map::new();
        record.insert("titulo".to_string(), Value::from(title.clone()));
        record.insert("genero".to_string(), Value::from(genre.clone()));
        record.insert("lanzamiento".to_string(), Value::from(release_year));
        Movie {
            title,
            genre,
            release_year,
            record,
        }
    }

    pub fn with_extra<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.record.insert(key.into(), value);
        self
    }

    /// The record as read from the source, in source key order.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }
}

impl<'de> Deserialize<'de> for Movie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let fields = MovieFields::deserialize(&value).map_err(de::Error::custom)?;
        match value {
            Value::Object(record) => Ok(Movie {
                title: fields.title,
                genre: fields.genre,
                release_year: fields.release_year,
                record,
            }),
            _ => Err(de::Error::custom("a movie must be a JSON object")),
        }
    }
}

impl Serialize for Movie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}
