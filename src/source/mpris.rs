//! MPRIS players on the session bus.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{Map, Number, Value as Json};
use tracing::debug;
use zbus::zvariant::{OwnedValue, Value};
use zbus::{Connection, Proxy};

use super::block_on_bounded;
use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::metadata::{PlaybackStatus, TrackMetadata};

pub const BUS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2.";
pub const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";
const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

#[derive(Debug, Clone)]
pub struct MprisSource {
    service: String,
    cache: Cache,
    timeout: Duration,
}

impl MprisSource {
    pub fn new(player: &str, cache: Cache, timeout: Duration) -> Self {
        Self {
            service: format!("{BUS_NAME_PREFIX}{player}"),
            cache,
            timeout,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One `GetAll` on the player interface.
    async fn query(&self) -> Result<HashMap<String, OwnedValue>> {
        let conn = Connection::session().await?;
        let proxy = Proxy::new(
            &conn,
            self.service.as_str(),
            OBJECT_PATH,
            PROPERTIES_INTERFACE,
        )
        .await?;
        debug!(service = %self.service, "querying player properties");
        let reply = proxy.call_method("GetAll", &(PLAYER_INTERFACE,)).await?;
        Ok(reply.body().deserialize()?)
    }

    pub fn fetch(&self) -> Result<TrackMetadata> {
        let properties = block_on_bounded(&self.service, self.timeout, self.query())?;
        let (fresh, status) = read_properties(&self.service, &properties)?;
        let payload = self.cache.resolve(fresh)?;
        Ok(TrackMetadata::from_payload(&payload, status))
    }
}

/// Split a `GetAll` reply into the Metadata payload and the playback status.
/// A reply without Metadata means the player does not implement the interface.
pub fn read_properties(
    service: &str,
    properties: &HashMap<String, OwnedValue>,
) -> Result<(Map<String, Json>, PlaybackStatus)> {
    let metadata = properties.get("Metadata").ok_or_else(|| {
        Error::SourceUnavailable(format!("{service} does not expose Metadata"))
    })?;
    let payload = metadata_to_json(metadata)?;
    let status = properties
        .get("PlaybackStatus")
        .and_then(|value| as_str(value));
    Ok((payload, PlaybackStatus::from_bus(status)))
}

fn as_str<'a>(value: &'a Value<'_>) -> Option<&'a str> {
    match value {
        Value::Str(s) => Some(s.as_str()),
        Value::Value(inner) => as_str(inner),
        _ => None,
    }
}

/// Convert the `a{sv}` Metadata property into a JSON object, the form it is
/// cached in.
pub fn metadata_to_json(metadata: &OwnedValue) -> Result<Map<String, Json>> {
    let entries: HashMap<String, OwnedValue> = metadata
        .try_clone()
        .and_then(HashMap::try_from)
        .map_err(|e| Error::SourceUnavailable(format!("malformed Metadata property: {e}")))?;
    Ok(entries
        .iter()
        .map(|(key, value)| (key.clone(), value_to_json(value)))
        .collect())
}

pub fn value_to_json(value: &Value<'_>) -> Json {
    match value {
        Value::Bool(b) => Json::Bool(*b),
        Value::U8(n) => Json::from(*n),
        Value::I16(n) => Json::from(*n),
        Value::U16(n) => Json::from(*n),
        Value::I32(n) => Json::from(*n),
        Value::U32(n) => Json::from(*n),
        Value::I64(n) => Json::from(*n),
        Value::U64(n) => Json::from(*n),
        Value::F64(n) => Number::from_f64(*n).map(Json::Number).unwrap_or(Json::Null),
        Value::Str(s) => Json::String(s.as_str().to_string()),
        Value::ObjectPath(path) => Json::String(path.as_str().to_string()),
        Value::Signature(sig) => Json::String(sig.as_str().to_string()),
        Value::Value(inner) => value_to_json(inner),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        other => Json::String(format!("{other:?}")),
    }
}
