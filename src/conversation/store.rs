//! Save and load a conversation as a pretty-printed JSON array of messages.

use std::fs;
use std::path::Path;

use crate::chat::Message;

use super::error::PersistenceError;

pub fn save(path: &Path, messages: &[Message]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_vec_pretty(messages)?;
    fs::write(path, payload)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<Message>, PersistenceError> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}
