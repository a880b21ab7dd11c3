use crate::error::ExportError;
use std::io::Write;

/// Export any serializable report as pretty-printed JSON
pub fn write_report<T, W>(report: &T, mut writer: W) -> Result<(), ExportError>
where
    T: serde::Serialize,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
