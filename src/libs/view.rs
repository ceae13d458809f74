use crate::libs::pipeline::{ConvertedFile, IngestedFile};
use crate::libs::table::CellValue;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints the schema of an ingested file with detector suggestions and
    /// a sample value per column.
    pub fn schema(file: &IngestedFile) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["COLUMN", "KIND", "SUGGESTED", "SAMPLE"]);
        for column in &file.table.schema {
            let sample = file.table.column_values(column).next();
            let kind = match sample {
                Some(CellValue::Number(_)) => "number",
                Some(CellValue::Text(_)) => "text",
                _ => "empty",
            };
            let suggested = if file.suggested.contains(column) { "✔" } else { "" };
            table.add_row(row![
                column,
                kind,
                suggested,
                sample.map(CellValue::render).unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Prints the batch summary after conversion.
    pub fn summary(files: &[ConvertedFile]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["OUTPUT", "CONVERTED CELLS"]);
        for file in files {
            table.add_row(row![file.file_name, file.converted_cells]);
        }
        table.printstd();

        Ok(())
    }
}
