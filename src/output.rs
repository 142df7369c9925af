use crate::config::{OUTPUT_HEADER, Record};
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};

/// The output name is the literal `normalized-` prefix on the input argument,
/// not a path-safe join; the file lands relative to the working directory.
pub fn output_filename(input: &str) -> String {
    format!("normalized-{input}")
}

/// Write the header and one comma-joined line per record, in input order.
/// Returns the name of the file written.
pub fn write_normalized(input: &str, records: &[Record]) -> Result<String> {
    let path = output_filename(input);
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{OUTPUT_HEADER}")?;
    for record in records {
        writeln!(writer, "{}", record.to_csv_line())?;
    }
    writer.flush()?;
    Ok(path)
}
