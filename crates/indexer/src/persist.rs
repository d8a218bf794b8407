use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::SystemTime;

/// Outcome of reading a JSON record that may be absent or damaged.
#[derive(Debug)]
pub enum JsonRead<T> {
    Missing,
    Corrupt(String),
    Found(T),
}

impl<T> JsonRead<T> {
    pub fn found(self) -> Option<T> {
        match self {
            JsonRead::Found(value) => Some(value),
            JsonRead::Missing | JsonRead::Corrupt(_) => None,
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> JsonRead<T> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return JsonRead::Missing,
        Err(e) => return JsonRead::Corrupt(e.to_string()),
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => JsonRead::Found(value),
        Err(e) => JsonRead::Corrupt(e.to_string()),
    }
}

/// Write via a sibling temp file and rename so readers never see a torn record.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn unix_now_ms() -> u64 {
    crate::scanner::system_time_ms(SystemTime::now())
}
