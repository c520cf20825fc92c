use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JsonError({0:#?})")]
    Json(#[from] serde_json::Error),
    #[error("IoError({0:#?})")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn read_json<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T> {
    let file_content = fs::read(path)?;
    let res = serde_json::from_slice(file_content.as_slice())?;
    Ok(res)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent_folder) = path.parent() {
        fs::create_dir_all(parent_folder)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_env<T: FromStr>(env_var: &str, default: T) -> T {
    if let Ok(str) = std::env::var(env_var) {
        if let Ok(value) = T::from_str(&str) {
            value
        } else {
            default
        }
    } else {
        default
    }
}
