#[cfg(test)]
mod tests {
    use declock::libs::error::IngestError;
    use declock::libs::ingest::ingest_csv;
    use declock::libs::table::CellValue;

    #[test]
    fn test_basic_csv_with_type_coercion() {
        let bytes = b"Employee,Hours,Note\nAlice,7.5,on site\nBob,8,\n";
        let table = ingest_csv(bytes, "report.csv").unwrap();

        assert_eq!(table.schema, vec!["Employee", "Hours", "Note"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Hours"), Some(&CellValue::Number(7.5)));
        assert_eq!(table.rows[1].get("Hours"), Some(&CellValue::Number(8.0)));
        assert_eq!(table.rows[0].get("Note"), Some(&CellValue::Text("on site".to_string())));
        assert_eq!(table.rows[1].get("Note"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_duplicate_headers_are_normalized() {
        let bytes = b"Hours,Hours,Name\n1,2,x\n";
        let table = ingest_csv(bytes, "dup.csv").unwrap();

        assert_eq!(table.schema, vec!["Hours", "Hours (2)", "Name"]);
        assert_eq!(table.rows[0].get("Hours (2)"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_quoted_fields_and_embedded_commas() {
        let bytes = b"Name,Hours\n\"Doe, Jane\",7.5\n";
        let table = ingest_csv(bytes, "quoted.csv").unwrap();

        assert_eq!(table.rows[0].get("Name"), Some(&CellValue::Text("Doe, Jane".to_string())));
    }

    #[test]
    fn test_blank_and_all_empty_lines_are_dropped() {
        let bytes = b"Name,Hours\nAlice,7.5\n\n,\nBob,8\n";
        let table = ingest_csv(bytes, "sparse.csv").unwrap();

        // The fully blank line is skipped by the reader; the `,` line has
        // only empty cells and is dropped afterwards.
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_short_rows_leave_trailing_cells_empty() {
        let bytes = b"Name,Hours,Note\nAlice\n";
        let table = ingest_csv(bytes, "ragged.csv").unwrap();

        assert_eq!(table.rows[0].get("Hours"), Some(&CellValue::Empty));
        assert_eq!(table.rows[0].get("Note"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_identifier_like_strings_stay_textual() {
        let bytes = b"Code,Hours\n1e5,7.5\n";
        let table = ingest_csv(bytes, "codes.csv").unwrap();

        assert_eq!(table.rows[0].get("Code"), Some(&CellValue::Text("1e5".to_string())));
    }

    #[test]
    fn test_unreadable_bytes_surface_as_parse_error() {
        let bytes = b"Name,Hours\n\xff\xfe,7.5\n";
        let error = ingest_csv(bytes, "broken.csv").unwrap_err();

        match error {
            IngestError::Parse { ref file, .. } => assert_eq!(file, "broken.csv"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
