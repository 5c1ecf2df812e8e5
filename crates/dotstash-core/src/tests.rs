use super::*;

#[test]
fn parse_rows_and_ignore_extra_columns() {
    let rows = vec![
        "dotnet-ef                 9.0.0        dotnet-ef",
        "dotnetsay                 2.1.7        dotnetsay",
    ];

    let records = parse_tool_lines(&rows).expect("rows should parse");

    assert_eq!(
        records,
        vec![
            ToolRecord::new("dotnet-ef", "9.0.0"),
            ToolRecord::new("dotnetsay", "2.1.7"),
        ]
    );
}

#[test]
fn parse_keeps_duplicate_package_ids_and_order() {
    let rows = vec!["dotnet-ef 9.0.0", "dotnet-ef 8.0.11"];

    let records = parse_tool_lines(&rows).expect("rows should parse");

    assert_eq!(
        records,
        vec![
            ToolRecord::new("dotnet-ef", "9.0.0"),
            ToolRecord::new("dotnet-ef", "8.0.11"),
        ]
    );
}

#[test]
fn parse_rejects_single_token_row() {
    let rows = vec!["dotnet-ef 9.0.0", "dangling"];

    let err = parse_tool_lines(&rows).expect_err("one-token row must fail");
    let message = err.to_string();

    assert!(message.contains("line 2"), "unexpected message: {message}");
    assert!(message.contains("dangling"), "unexpected message: {message}");
}

#[test]
fn parse_fails_atomically_on_a_bad_middle_row() {
    let rows = vec!["a 1.0.0", "broken", "b 2.0.0"];

    parse_tool_lines(&rows).expect_err("bad middle row must fail the whole parse");
}

#[test]
fn render_pads_ids_to_longest_plus_constant() {
    let records = vec![
        ToolRecord::new("dotnet-ef", "9.0.0"),
        ToolRecord::new("say", "2.1.7"),
    ];

    let rendered = render_manifest(&records);
    let mut rows = rendered.lines();

    assert_eq!(rows.next(), Some("dotnet-ef     \t9.0.0"));
    assert_eq!(rows.next(), Some("say           \t2.1.7"));
    assert_eq!(rows.next(), None);
}

#[test]
fn render_empty_records_is_empty_payload() {
    assert_eq!(render_manifest(&[]), "");
}

#[test]
fn manifest_round_trip_preserves_pairs_and_order() {
    let records = vec![
        ToolRecord::new("dotnet-ef", "9.0.0"),
        ToolRecord::new("dotnet-outdated-tool", "4.6.4"),
        ToolRecord::new("dotnetsay", "2.1.7"),
    ];

    let reparsed =
        parse_manifest_text(&render_manifest(&records)).expect("rendered manifest should parse");

    assert_eq!(reparsed, records);
}

#[test]
fn manifest_text_tolerates_blank_rows_and_crlf() {
    let raw = "dotnet-ef     \t9.0.0\r\n\r\ndotnetsay\t2.1.7\r\n";

    let records = parse_manifest_text(raw).expect("manifest text should parse");

    assert_eq!(
        records,
        vec![
            ToolRecord::new("dotnet-ef", "9.0.0"),
            ToolRecord::new("dotnetsay", "2.1.7"),
        ]
    );
}

#[test]
fn manifest_text_reports_the_offending_row() {
    let raw = "dotnet-ef\t9.0.0\nbroken-row\n";

    let err = parse_manifest_text(raw).expect_err("truncated row must fail");

    assert!(err.to_string().contains("broken-row"));
}
