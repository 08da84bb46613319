use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "shoplist";
const SESSION_FILE: &str = "session.toml";

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
struct SessionFile {
    session_token: String,
}

/// `~/.config/shoplist/session.toml`, next to the config file.
pub fn session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(SESSION_FILE))
}

/// Stored session token, if any. A missing or unreadable file means
/// "not signed in".
pub fn load_token_from_path(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let file: SessionFile = toml::from_str(&contents).ok()?;
    let token = file.session_token.trim().to_string();
    (!token.is_empty()).then_some(token)
}

pub fn save_token_to_path(path: &Path, token: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string(&SessionFile {
        session_token: token.to_string(),
    })
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, contents)
}

pub fn clear_token_at_path(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
