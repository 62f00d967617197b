use std::fmt::Write;

use chrono::{TimeZone, Utc};
use polars::prelude::DataFrame;

use credscout_core::filters::ProgramFilter;
use credscout_core::metrics::{
    estimated_unique_programs, institution_rollup, skill_frequencies, summarize, top_skills,
    COURSES_PER_CERTIFICATE,
};
use credscout_parser::parse_catalog;

const SAMPLE: &str = "\
program_id,title,institution,credential_type,province,delivery_mode,duration_weeks,price_cad,skills,description,program_url,date_added,offering_level,data_quality
1,Data Analytics Certificate,University of Toronto,certificate,ON,online,12,2500,\"Python, SQL\",Analytics training.,https://example.edu/a,2025-08-10,certificate_advanced,good
2,Intro to Python,Seneca Polytechnic,course,ON,online,4,1000,Python,First programming course.,https://example.edu/b,2025-05-01,course,good
3,Advanced SQL,Seneca Polytechnic,course,ON,hybrid,6,,\"SQL, Excel\",Deep dive into query tuning.,https://example.edu/c,2025-08-15,course,moderate
4,Cloud Diploma,BCIT,diploma,BC,in-person,32,8200,\"AWS, Networking\",Cloud infrastructure at scale.,https://example.edu/d,2024-01-01,diploma,good
5,Leadership Essentials,McGill University,professional development,QC,online,8,5000,Leadership,Leading hybrid teams.,https://example.edu/e,2025-08-18,professional_development,good
";

fn sample_frame() -> DataFrame {
    parse_catalog(SAMPLE).expect("sample catalog parse failed").df
}

#[test]
fn summary_counts_and_price_statistics() {
    let df = sample_frame();
    let now = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();

    let summary = summarize(&df, 8, now, COURSES_PER_CERTIFICATE).unwrap();

    assert_eq!(summary.total_programs, 5);
    assert_eq!(summary.unfiltered_programs, 8);
    assert_eq!(summary.delta_vs_unfiltered, -3);
    assert_eq!(summary.distinct_institutions, 4);
    // nulls are ignored: mean and median over {2500, 1000, 8200, 5000}
    assert_eq!(summary.mean_price_cad, Some(4175.0));
    assert_eq!(summary.median_price_cad, Some(3750.0));
    // 2025-08-10, 2025-08-15, 2025-08-18 fall in the trailing 30 days
    assert_eq!(summary.added_last_30_days, 3);
    // 3 non-course rows + 2 course rows / 4, rounded
    assert_eq!(summary.estimated_unique_programs, 4);
}

#[test]
fn summary_degrades_gracefully_on_empty_view() {
    let df = sample_frame();
    let empty = ProgramFilter {
        search: Some("nothing matches this".to_string()),
        ..Default::default()
    }
    .apply(&df)
    .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
    let summary = summarize(&empty, df.height(), now, COURSES_PER_CERTIFICATE).unwrap();

    assert_eq!(summary.total_programs, 0);
    assert_eq!(summary.distinct_institutions, 0);
    assert_eq!(summary.mean_price_cad, None);
    assert_eq!(summary.median_price_cad, None);
    assert_eq!(summary.added_last_30_days, 0);
    assert_eq!(summary.estimated_unique_programs, 0);

    assert!(skill_frequencies(&empty).unwrap().is_empty());
    assert!(institution_rollup(&empty, 10).unwrap().is_empty());
}

#[test]
fn skill_frequencies_count_trimmed_tokens_stably() {
    let df = sample_frame();
    let frequencies = skill_frequencies(&df).unwrap();

    let python = frequencies.iter().find(|f| f.skill == "Python").unwrap();
    let sql = frequencies.iter().find(|f| f.skill == "SQL").unwrap();
    let excel = frequencies.iter().find(|f| f.skill == "Excel").unwrap();
    assert_eq!(python.count, 2);
    assert_eq!(sql.count, 2);
    assert_eq!(excel.count, 1);

    // ties keep first-encountered order: Python appears before SQL
    let top = top_skills(&df, 2).unwrap();
    assert_eq!(top[0].skill, "Python");
    assert_eq!(top[1].skill, "SQL");
}

#[test]
fn institution_rollup_sorts_by_count_and_caps() {
    let df = sample_frame();
    let rollup = institution_rollup(&df, 3).unwrap();

    assert_eq!(rollup.len(), 3);
    assert_eq!(rollup[0].institution, "Seneca Polytechnic");
    assert_eq!(rollup[0].programs, 2);
    // the null-priced row is excluded from the mean
    assert_eq!(rollup[0].mean_price_cad, Some(1000.0));
    assert_eq!(rollup[0].mean_duration_weeks, Some(5.0));
}

#[test]
fn estimated_unique_discounts_course_rows() {
    // 12 non-course rows and 8 course rows: 12 + 8/4 = 14
    let mut csv = String::from(
        "program_id,title,institution,credential_type,province,delivery_mode,duration_weeks,price_cad,skills,description,program_url,date_added,offering_level,data_quality\n",
    );
    for idx in 0..20 {
        let level = if idx < 8 { "course" } else { "certificate" };
        writeln!(
            csv,
            "{idx},Program {idx},Some College,{level},ON,online,6,1200,Skill,Desc,https://example.edu/{idx},2025-08-01,{level},good"
        )
        .unwrap();
    }

    let df = parse_catalog(&csv).unwrap().df;
    assert_eq!(estimated_unique_programs(&df, 4.0).unwrap(), 14);
}

#[test]
fn estimated_unique_rejects_non_positive_ratio() {
    let df = sample_frame();
    assert!(estimated_unique_programs(&df, 0.0).is_err());
    assert!(estimated_unique_programs(&df, -2.0).is_err());
}
