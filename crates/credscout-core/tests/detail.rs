use credscout_core::detail::program_at;
use credscout_core::filters::ProgramFilter;
use credscout_parser::parse_catalog;

const RAW: &str = "\
Seneca Polytechnic,Excel Fundamentals,Short Course,online,1 week,\"Excel, Spreadsheets\",$450,Spreadsheet basics.,https://example.edu/excel,2025-08-01
McGill University,Business Communication,Professional Development Statement,online,Unknown,\"Writing, Presentation\",Unknown,Workplace communication.,https://example.edu/bizcomm,2025-08-15
";

#[test]
fn detail_extracts_typed_fields_with_display_fallbacks() {
    let catalog = parse_catalog(RAW).unwrap();

    let first = program_at(&catalog.df, 0).unwrap().expect("row 0 exists");
    assert_eq!(first.title, "Excel Fundamentals");
    assert_eq!(first.institution, "Seneca Polytechnic");
    assert_eq!(first.province, "Unknown");
    assert_eq!(first.skills, vec!["Excel", "Spreadsheets"]);
    assert_eq!(first.price_cad, Some(450.0));
    assert_eq!(first.price_label().as_deref(), Some("$450"));
    assert!(first.date_added.is_some());

    // the unparseable price falls back to the retained source text
    let second = program_at(&catalog.df, 1).unwrap().expect("row 1 exists");
    assert_eq!(second.price_cad, None);
    assert_eq!(second.price_label().as_deref(), Some("Unknown"));
    assert_eq!(second.duration_label().as_deref(), Some("Unknown"));
    assert_eq!(
        second.offering_level.as_deref(),
        Some("professional_development")
    );
}

#[test]
fn detail_of_empty_view_selects_nothing() {
    let catalog = parse_catalog(RAW).unwrap();
    let empty = ProgramFilter {
        search: Some("matches nothing".to_string()),
        ..Default::default()
    }
    .apply(&catalog.df)
    .unwrap();

    assert!(program_at(&empty, 0).unwrap().is_none());
    assert!(program_at(&catalog.df, 99).unwrap().is_none());
}
