use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use credscout_core::detail::ProgramDetail;
use credscout_core::metrics::{CatalogSummary, InstitutionStats, SkillCount};

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("${v:.0}"))
}

fn weeks(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

pub fn summary_table(summary: &CatalogSummary) -> Table {
    let mut table = base_table(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Total programs".to_string(),
        summary.total_programs.to_string(),
    ]);
    table.add_row(vec![
        "Delta vs unfiltered".to_string(),
        summary.delta_vs_unfiltered.to_string(),
    ]);
    table.add_row(vec![
        "Institutions".to_string(),
        summary.distinct_institutions.to_string(),
    ]);
    table.add_row(vec![
        "Average price".to_string(),
        money(summary.mean_price_cad),
    ]);
    table.add_row(vec![
        "Median price".to_string(),
        money(summary.median_price_cad),
    ]);
    table.add_row(vec![
        "New in last 30 days".to_string(),
        summary.added_last_30_days.to_string(),
    ]);
    table.add_row(vec![
        "Estimated unique programs".to_string(),
        summary.estimated_unique_programs.to_string(),
    ]);
    table
}

pub fn skills_table(skills: &[SkillCount]) -> Table {
    let mut table = base_table(vec!["Skill", "Count"]);
    for entry in skills {
        table.add_row(vec![entry.skill.clone(), entry.count.to_string()]);
    }
    table
}

pub fn institutions_table(rollup: &[InstitutionStats]) -> Table {
    let mut table = base_table(vec![
        "Institution",
        "Programs",
        "Mean price (CAD)",
        "Mean duration (weeks)",
    ]);
    for stats in rollup {
        table.add_row(vec![
            stats.institution.clone(),
            stats.programs.to_string(),
            money(stats.mean_price_cad),
            weeks(stats.mean_duration_weeks),
        ]);
    }
    table
}

pub fn print_detail(detail: &ProgramDetail) {
    println!("{} (#{})", detail.title, detail.program_id);
    println!("  Institution: {}", detail.institution);
    println!("  Type:        {}", detail.credential_type);
    println!("  Province:    {}", detail.province);
    println!("  Delivery:    {}", detail.delivery_mode);
    println!(
        "  Duration:    {}",
        detail.duration_label().unwrap_or_else(|| "n/a".to_string())
    );
    println!(
        "  Price:       {}",
        detail.price_label().unwrap_or_else(|| "n/a".to_string())
    );
    if let Some(level) = detail.offering_level.as_deref() {
        println!("  Level:       {level}");
    }
    if let Some(quality) = detail.data_quality.as_deref() {
        println!("  Quality:     {quality}");
    }
    if let Some(added) = detail.date_added {
        println!("  Added:       {}", added.format("%Y-%m-%d"));
    }
    println!("  URL:         {}", detail.program_url);
    if !detail.skills.is_empty() {
        println!("  Skills:      {}", detail.skills.join(", "));
    }
    if !detail.description.is_empty() {
        println!("\n{}", detail.description);
    }
}
