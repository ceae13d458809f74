//! Renders converted tables back to their source formats.
//!
//! The mirror of ingestion: a table goes out as delimited text or as a
//! single-sheet workbook, with columns in final schema order (including any
//! derived columns the converter appended). This is a direct structural
//! mapping; the source file's styling is not reproduced.

use crate::libs::table::{CellValue, Table};
use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook};

/// Renders a table as comma-delimited text.
///
/// The schema becomes the header record; missing and empty cells render as
/// empty fields.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buffer);

        wtr.write_record(&table.schema)?;
        for row in &table.rows {
            let record: Vec<String> = table
                .schema
                .iter()
                .map(|column| row.get(column).map(CellValue::render).unwrap_or_default())
                .collect();
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
    }

    Ok(String::from_utf8(buffer)?)
}

/// Renders a table as a single-sheet workbook, returned as xlsx bytes.
///
/// Headers are written bold on row 0; numeric cells keep their numeric type
/// so untouched columns stay calculable in a spreadsheet application.
pub fn to_workbook_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (column, name) in table.schema.iter().enumerate() {
        worksheet.write_string_with_format(0, column as u16, name, &header_format)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let output_row = index as u32 + 1;
        for (column, name) in table.schema.iter().enumerate() {
            match row.get(name) {
                Some(CellValue::Number(n)) => {
                    worksheet.write_number(output_row, column as u16, *n)?;
                }
                Some(CellValue::Text(s)) => {
                    worksheet.write_string(output_row, column as u16, s)?;
                }
                Some(CellValue::Empty) | None => {}
            }
        }
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}
