#[cfg(test)]
mod tests {
    use declock::libs::schema::normalize_headers;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicates_get_numbered_suffixes() {
        let input = names(&["Hours", "Hours", "Name"]);
        assert_eq!(normalize_headers(&input), vec!["Hours", "Hours (2)", "Name"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize_headers(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_counter_keeps_incrementing() {
        let input = names(&["Hours", "Hours", "Hours", "Hours"]);
        assert_eq!(normalize_headers(&input), vec!["Hours", "Hours (2)", "Hours (3)", "Hours (4)"]);
    }

    #[test]
    fn test_unique_names_pass_through() {
        let input = names(&["Employee", "Project", "Hours"]);
        assert_eq!(normalize_headers(&input), input);
    }

    #[test]
    fn test_blank_names_get_positional_placeholders() {
        let input = names(&["", "Hours", "  "]);
        assert_eq!(normalize_headers(&input), vec!["Column1", "Hours", "Column3"]);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let input = names(&["  Hours ", "Hours"]);
        assert_eq!(normalize_headers(&input), vec!["Hours", "Hours (2)"]);
    }

    #[test]
    fn test_output_length_and_non_empty_invariants() {
        let input = names(&["A", "", "A", "B", "A", "", "B"]);
        let output = normalize_headers(&input);

        assert_eq!(output.len(), input.len());
        assert!(output.iter().all(|name| !name.is_empty()));

        // No two entries compare equal after normalization.
        let mut sorted = output.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), output.len());
    }
}
