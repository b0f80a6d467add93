use tokio::{fs::File, io::AsyncReadExt};
use std::collections::HashMap;

const NEW_LINE_CHAR : char = '\n';
const EQUALS_CHAR : char = '=';
const COMMENT_CHAR : char = '#';

/// Parses `key = value` lines. Blank lines and lines starting with `#` are skipped; values may contain `=`.
pub fn parse_properties(raw: &str) -> HashMap<String, String> {
    raw.split(NEW_LINE_CHAR)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_CHAR))
        .filter_map(|line| line.split_once(EQUALS_CHAR))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

pub async fn deserialize_properties_file(file_path: &str) -> Result<HashMap<String, String>, std::io::Error> {
    let raw = read_file(file_path).await?;
    Ok(parse_properties(&raw))
}

pub async fn read_file(file_path: &str) -> Result<String, std::io::Error> {
    let mut file = File::open(file_path).await?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).await?;
    Ok(contents)
}
