use std::collections::HashMap;

/// Keys tried, in order, when resolving the database location.
const PATH_KEYS: [&str; 3] = ["database", "data source", "host"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectionStringError {
    #[error("connection string segment {0:?} is not a key=value pair")]
    MalformedSegment(String),

    #[error("connection string has an empty key in segment {0:?}")]
    EmptyKey(String),

    #[error("connection string has none of the keys {0:?}")]
    MissingKey(Vec<String>),
}

/// Parse a `key=value;key=value` connection string.
///
/// Keys are lowercased so lookups are case-insensitive, values are trimmed,
/// and empty segments (e.g. from a trailing `;`) are skipped. Only the first
/// `=` in a segment separates key from value.
pub fn parse_connection_string(s: &str) -> Result<HashMap<String, String>, ConnectionStringError> {
    let mut params = HashMap::new();
    for segment in s.split(';') {
        if segment.trim().is_empty() {
            continue;
        }
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_string()))?;
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(ConnectionStringError::EmptyKey(segment.to_string()));
        }
        params.insert(key, value.trim().to_string());
    }
    Ok(params)
}

/// Pick the database location out of parsed connection parameters.
pub fn database_path(params: &HashMap<String, String>) -> Result<String, ConnectionStringError> {
    PATH_KEYS
        .iter()
        .find_map(|k| params.get(*k).filter(|v| !v.is_empty()))
        .cloned()
        .ok_or_else(|| {
            ConnectionStringError::MissingKey(PATH_KEYS.iter().map(|k| k.to_string()).collect())
        })
}
