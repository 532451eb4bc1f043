//! Line-oriented output for JSON responses.
//!
//! Writers are generic over [`Write`] so callers pick the sink (the demos
//! lock stdout). One JSON document per line:
//! - **stdout**: responses only
//! - **stderr**: logs (never parsed by the peer)
//! - lines end with an explicit `\n`, never `println!` (`\r\n` on Windows)
//!
//! # Example
//!
//! ```
//! use verbview::stdio::write_json_line;
//! use serde_json::json;
//!
//! let mut out = Vec::new();
//! write_json_line(&mut out, &json!({"status": 200})).unwrap();
//! assert_eq!(out, b"{\"status\":200}\n");
//! ```

use std::io::Write;

use crate::error::Result;

/// Write a line followed by a single `\n` and flush.
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Serialize a value to JSON and write it as one line.
pub fn write_json_line<W: Write, T: serde::Serialize>(writer: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    write_line(writer, &json)?;
    Ok(())
}
