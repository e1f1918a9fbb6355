use std::io::{Read, Write};

use csv::{Reader, Result, Writer};
use serde::Serialize;

use crate::domain::line_item::RawLineItem;

/// Parse [`RawLineItem`]s from a reader.
///
/// This function assumes the content is a valid CSV with the export's header
/// row, otherwise it will throw an error. Rows keep their file order; empty
/// description or customer fields are read as missing.
pub fn read(reader: impl Read) -> Result<Vec<RawLineItem>> {
    Reader::from_reader(reader).into_deserialize().collect()
}

pub fn write<T: Serialize>(rows: impl IntoIterator<Item = T>, writer: impl Write) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
