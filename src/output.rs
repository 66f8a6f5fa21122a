//! Rendering of API results as indented JSON.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::error::{CliError, CliResult};

/// Serializes `value` with tab indentation and a trailing newline.
pub fn render<T: Serialize + ?Sized>(value: &T) -> CliResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Turns an API call outcome into the bytes destined for stdout.
pub fn emit<T: Serialize>(result: anyhow::Result<T>) -> CliResult<Vec<u8>> {
    let value = result.map_err(CliError::Http)?;
    render(&value)
}

/// Writes a rendered result in one go.
pub fn write_rendered(out: &mut impl Write, rendered: &[u8]) -> CliResult<()> {
    out.write_all(rendered)?;
    out.flush()?;
    Ok(())
}
