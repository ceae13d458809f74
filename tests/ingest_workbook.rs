#[cfg(test)]
mod tests {
    use declock::libs::error::IngestError;
    use declock::libs::ingest::{ingest_grid, ingest_workbook, HeaderStrategy, MergeSpan, WorkbookOptions};
    use declock::libs::table::CellValue;
    use rust_xlsxwriter::{Format, Workbook};

    fn t(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn n(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    fn e() -> CellValue {
        CellValue::Empty
    }

    fn report_aware() -> WorkbookOptions {
        WorkbookOptions {
            strategy: HeaderStrategy::ReportAware,
        }
    }

    /// A workbook in the shape reporting tools export: metadata rows above
    /// the actual table, header on row 6.
    fn preamble_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        sheet.write_string(0, 0, "Time Period: 2025-01-01 - 2025-01-31").unwrap();
        sheet.write_string(1, 0, "Executed on 2025-02-01 08:00").unwrap();

        let headers = ["Employee", "Project", "Hours", "Overtime", "Notes"];
        for (col, name) in headers.iter().enumerate() {
            sheet.write_string(6, col as u16, *name).unwrap();
        }

        sheet.write_string(7, 0, "Alice").unwrap();
        sheet.write_string(7, 1, "Apollo").unwrap();
        sheet.write_number(7, 2, 7.5).unwrap();
        sheet.write_number(7, 3, 1.25).unwrap();
        sheet.write_string(7, 4, "on site").unwrap();

        sheet.write_string(8, 0, "Bob").unwrap();
        sheet.write_string(8, 1, "Hermes").unwrap();
        sheet.write_number(8, 2, 8.0).unwrap();
        sheet.write_number(8, 3, 0.0).unwrap();
        sheet.write_string(8, 4, "remote").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_preamble_workbook_header_is_discovered_below_the_metadata() {
        let table = ingest_workbook(preamble_workbook(), "report.xlsx", &report_aware()).unwrap();

        assert_eq!(table.schema, vec!["Employee", "Project", "Hours", "Overtime", "Notes"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Hours"), Some(&CellValue::Number(7.5)));
        assert_eq!(table.rows[1].get("Employee"), Some(&CellValue::Text("Bob".to_string())));
    }

    #[test]
    fn test_workbook_without_preamble_uses_row_zero() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Employee").unwrap();
        sheet.write_string(0, 1, "Hours").unwrap();
        sheet.write_string(1, 0, "Alice").unwrap();
        sheet.write_number(1, 1, 7.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = ingest_workbook(bytes, "plain.xlsx", &report_aware()).unwrap();

        assert_eq!(table.schema, vec!["Employee", "Hours"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_merged_header_cells_keep_only_the_leftmost_column() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Employee").unwrap();
        sheet.write_string(0, 1, "Project").unwrap();
        sheet.merge_range(0, 2, 0, 4, "Hours Breakdown", &Format::new()).unwrap();

        sheet.write_string(1, 0, "Alice").unwrap();
        sheet.write_string(1, 1, "Apollo").unwrap();
        sheet.write_number(1, 2, 7.5).unwrap();
        sheet.write_number(1, 3, 1.0).unwrap();
        sheet.write_number(1, 4, 0.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = ingest_workbook(bytes, "merged.xlsx", &report_aware()).unwrap();

        assert_eq!(table.schema, vec!["Employee", "Project", "Hours Breakdown"]);
        assert_eq!(table.rows[0].get("Hours Breakdown"), Some(&CellValue::Number(7.5)));
        // Columns 3 and 4 were suppressed by the merge span.
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn test_header_only_column_fails_with_missing_data_error() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Employee").unwrap();
        sheet.write_string(0, 1, "Hours").unwrap();
        sheet.write_string(0, 2, "Computed").unwrap();
        for row in 1..=3u32 {
            sheet.write_string(row, 0, "Alice").unwrap();
            sheet.write_number(row, 1, 7.5).unwrap();
        }
        let bytes = workbook.save_to_buffer().unwrap();

        let error = ingest_workbook(bytes, "formulas.xlsx", &report_aware()).unwrap_err();
        match error {
            IngestError::MissingData { ref file, ref columns } => {
                assert_eq!(file, "formulas.xlsx");
                assert_eq!(columns, &vec!["Computed".to_string()]);
            }
            other => panic!("expected missing-data error, got {:?}", other),
        }
        assert!(error.to_string().contains("Computed"));
    }

    #[test]
    fn test_unreadable_bytes_surface_as_parse_error() {
        let error = ingest_workbook(b"not a workbook".to_vec(), "bad.xlsx", &report_aware()).unwrap_err();
        match error {
            IngestError::Parse { ref file, .. } => assert_eq!(file, "bad.xlsx"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_fallback_header_row_when_no_candidate_qualifies() {
        // Two markers announce a preamble, but no row in the search window
        // has enough populated cells, so the header defaults to row 6.
        let grid = vec![
            vec![t("Time Period: January")],
            vec![t("Executed on 2025-02-01")],
            vec![e()],
            vec![e()],
            vec![e()],
            vec![e()],
            vec![t("Employee"), t("Hours")],
            vec![t("Alice"), n(7.5)],
        ];

        let table = ingest_grid(grid, &[], "fallback.xlsx", &report_aware()).unwrap();
        assert_eq!(table.schema, vec!["Employee", "Hours"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_grid_single_marker_is_not_a_preamble() {
        let grid = vec![
            vec![t("Query: all employees"), e()],
            vec![t("Alice"), n(7.5)],
        ];

        // Only one marker hit, so row 0 is taken as the header even though
        // it looks metadata-ish.
        let table = ingest_grid(grid, &[], "single.xlsx", &report_aware()).unwrap();
        assert_eq!(table.schema, vec!["Query: all employees"]);
    }

    #[test]
    fn test_grid_report_aware_skips_blank_header_columns() {
        let grid = vec![
            vec![t("Employee"), e(), t("Hours")],
            vec![t("Alice"), t("spacer"), n(7.5)],
        ];

        let table = ingest_grid(grid, &[], "blanks.xlsx", &report_aware()).unwrap();
        assert_eq!(table.schema, vec!["Employee", "Hours"]);
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_grid_positional_strategy_synthesizes_placeholders() {
        let grid = vec![
            vec![t("Employee"), e(), t("Hours")],
            vec![t("Alice"), t("x"), n(7.5)],
        ];
        let options = WorkbookOptions {
            strategy: HeaderStrategy::Positional,
        };

        let table = ingest_grid(grid, &[], "positional.xlsx", &options).unwrap();
        assert_eq!(table.schema, vec!["Employee", "Column2", "Hours"]);
        assert_eq!(table.rows[0].get("Column2"), Some(&CellValue::Text("x".to_string())));
    }

    #[test]
    fn test_grid_merge_spans_are_ignored_by_positional_strategy() {
        let grid = vec![
            vec![t("A"), t("B"), t("C")],
            vec![n(1.0), n(2.0), n(3.0)],
        ];
        let merge = MergeSpan {
            first_row: 0,
            last_row: 0,
            first_col: 0,
            last_col: 2,
        };
        let options = WorkbookOptions {
            strategy: HeaderStrategy::Positional,
        };

        let table = ingest_grid(grid, &[merge], "merge.xlsx", &options).unwrap();
        assert_eq!(table.schema, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_grid_merge_span_suppresses_duplicate_header_labels() {
        // The merge span covers columns 1..=3 of the header row; only its
        // leftmost column keeps a label even though the source repeated the
        // text into every cell.
        let grid = vec![
            vec![t("Employee"), t("Hours"), t("Hours"), t("Hours")],
            vec![t("Alice"), n(7.5), n(1.0), n(0.5)],
        ];
        let merge = MergeSpan {
            first_row: 0,
            last_row: 0,
            first_col: 1,
            last_col: 3,
        };

        let table = ingest_grid(grid, &[merge], "span.xlsx", &report_aware()).unwrap();
        assert_eq!(table.schema, vec!["Employee", "Hours"]);
        assert_eq!(table.rows[0].get("Hours"), Some(&CellValue::Number(7.5)));
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_grid_numeric_strings_in_cells_are_coerced() {
        let grid = vec![
            vec![t("Employee"), t("Hours")],
            vec![t("Alice"), t("7.5")],
        ];

        let table = ingest_grid(grid, &[], "strings.xlsx", &report_aware()).unwrap();
        assert_eq!(table.rows[0].get("Hours"), Some(&CellValue::Number(7.5)));
    }

    #[test]
    fn test_grid_fully_empty_rows_are_dropped() {
        let grid = vec![
            vec![t("Employee"), t("Hours")],
            vec![t("Alice"), n(7.5)],
            vec![e(), e()],
            vec![t("Bob"), n(8.0)],
        ];

        let table = ingest_grid(grid, &[], "gaps.xlsx", &report_aware()).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_empty_grid_yields_empty_table() {
        let table = ingest_grid(Vec::new(), &[], "empty.xlsx", &report_aware()).unwrap();
        assert!(table.schema.is_empty());
        assert!(table.rows.is_empty());
    }
}
