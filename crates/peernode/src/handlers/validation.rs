//! Handler path validation for peernode.

use anyhow::Result;

/// Longest accepted handler path
pub const MAX_PATH_LEN: usize = 256;

/// Validate a handler path: `/`-prefixed, printable ASCII, no whitespace
pub fn validate_path(path: &str,) -> Result<(),> {
    if !path.starts_with('/',) {
        return Err(anyhow::anyhow!("Handler path must start with '/': {}", path),);
    }

    if path.len() > MAX_PATH_LEN {
        return Err(anyhow::anyhow!(
            "Handler path too long: {} bytes (max: {} bytes)",
            path.len(),
            MAX_PATH_LEN
        ),);
    }

    if path.chars().any(|c| !c.is_ascii_graphic(),) {
        return Err(anyhow::anyhow!("Handler path contains invalid characters: {:?}", path),);
    }

    Ok((),)
}
