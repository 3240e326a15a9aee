//! Input helpers shared by commands.

use std::io::{self, Read};

/// Reads a file, or stdin when no path is given.
pub fn read_bytes(path: Option<&str>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            std::fs::read(path).map_err(|e| format!("Failed to read file {}: {}", path, e).into())
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Reads envelope bytes, decoding hex text when `hex` is set.
pub fn read_envelope(
    path: Option<&str>,
    hex: bool,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let bytes = read_bytes(path)?;
    if !hex {
        return Ok(bytes);
    }
    let text = String::from_utf8(bytes).map_err(|_| "Hex input is not UTF-8")?;
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).map_err(|e| format!("Invalid hex input: {}", e).into())
}
