use crate::CardTable;

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
}

/// Render the table as CSV: header record first, then one record per row.
///
/// Quoting is minimal and rows may differ in length from the header.
pub fn to_csv_bytes(table: &CardTable) -> Result<Vec<u8>, SerializeError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|err| SerializeError::Buffer(err.error().to_string()))
}
