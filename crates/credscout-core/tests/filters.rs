use credscout_core::filters::{facet_values, NumericRange, ProgramFilter};
use credscout_parser::{parse_catalog, OfferingLevel, ProgramCatalog};

const SAMPLE: &str = "\
program_id,title,institution,credential_type,province,delivery_mode,duration_weeks,price_cad,skills,description,program_url,date_added,offering_level,data_quality
1,Data Analytics Certificate,University of Toronto,certificate,ON,online,12,2500,\"Python, SQL\",Analytics training.,https://example.edu/a,2025-08-10,certificate_advanced,good
2,Intro to Python,Seneca Polytechnic,course,ON,online,4,1000,Python,First programming course.,https://example.edu/b,2025-05-01,course,good
3,Advanced SQL,Seneca Polytechnic,course,ON,hybrid,6,,\"SQL, Excel\",Deep dive into query tuning.,https://example.edu/c,2025-08-15,course,moderate
4,Cloud Diploma,BCIT,diploma,BC,in-person,32,8200,\"AWS, Networking\",Cloud infrastructure at scale.,https://example.edu/d,2024-01-01,diploma,good
5,Leadership Essentials,McGill University,professional development,QC,online,8,5000,Leadership,Leading hybrid teams.,https://example.edu/e,2025-08-18,professional_development,good
";

fn sample_catalog() -> ProgramCatalog {
    parse_catalog(SAMPLE).expect("sample catalog parse failed")
}

fn program_ids(df: &polars::prelude::DataFrame) -> Vec<i64> {
    df.column("program_id")
        .unwrap()
        .i64()
        .unwrap()
        .iter()
        .flatten()
        .collect()
}

#[test]
fn empty_filter_matches_everything() {
    let catalog = sample_catalog();
    let filter = ProgramFilter::default();
    let view = filter.apply(&catalog.df).unwrap();
    assert_eq!(view.height(), catalog.height());
}

#[test]
fn search_matches_any_text_field_case_insensitively() {
    let catalog = sample_catalog();

    let by_skill = ProgramFilter {
        search: Some("PYTHON".to_string()),
        ..Default::default()
    };
    assert_eq!(program_ids(&by_skill.apply(&catalog.df).unwrap()), vec![1, 2]);

    let by_institution = ProgramFilter {
        search: Some("seneca".to_string()),
        ..Default::default()
    };
    assert_eq!(
        program_ids(&by_institution.apply(&catalog.df).unwrap()),
        vec![2, 3]
    );

    let by_description = ProgramFilter {
        search: Some("query tuning".to_string()),
        ..Default::default()
    };
    assert_eq!(
        program_ids(&by_description.apply(&catalog.df).unwrap()),
        vec![3]
    );
}

#[test]
fn categorical_filters_match_exactly() {
    let catalog = sample_catalog();

    let ontario = ProgramFilter {
        province: Some("ON".to_string()),
        ..Default::default()
    };
    assert_eq!(program_ids(&ontario.apply(&catalog.df).unwrap()), vec![1, 2, 3]);

    let courses = ProgramFilter {
        offering_level: Some(OfferingLevel::Course),
        ..Default::default()
    };
    assert_eq!(program_ids(&courses.apply(&catalog.df).unwrap()), vec![2, 3]);
}

#[test]
fn price_range_excludes_out_of_bounds_but_passes_nulls() {
    let catalog = sample_catalog();
    let filter = ProgramFilter {
        price_cad: Some(NumericRange::new(0.0, 4999.0)),
        ..Default::default()
    };
    let view = filter.apply(&catalog.df).unwrap();

    // 8200 and 5000 fall outside the inclusive bound; the null-priced row
    // stays visible
    assert_eq!(program_ids(&view), vec![1, 2, 3]);
}

#[test]
fn clauses_conjoin() {
    let catalog = sample_catalog();
    let filter = ProgramFilter {
        search: Some("sql".to_string()),
        province: Some("ON".to_string()),
        duration_weeks: Some(NumericRange::new(0.0, 10.0)),
        ..Default::default()
    };
    assert_eq!(program_ids(&filter.apply(&catalog.df).unwrap()), vec![3]);
}

#[test]
fn filtering_is_idempotent() {
    let catalog = sample_catalog();
    let filter = ProgramFilter {
        search: Some("sql".to_string()),
        price_cad: Some(NumericRange::new(0.0, 4999.0)),
        ..Default::default()
    };

    let once = filter.apply(&catalog.df).unwrap();
    let twice = filter.apply(&once).unwrap();
    assert!(once.equals_missing(&twice));
}

#[test]
fn empty_result_is_not_an_error() {
    let catalog = sample_catalog();
    let filter = ProgramFilter {
        search: Some("no such program anywhere".to_string()),
        ..Default::default()
    };
    let view = filter.apply(&catalog.df).unwrap();
    assert_eq!(view.height(), 0);
}

#[test]
fn facet_values_are_sorted_and_distinct() {
    let catalog = sample_catalog();
    let provinces = facet_values(&catalog.df, "province").unwrap();
    assert_eq!(provinces, vec!["BC", "ON", "QC"]);
}
