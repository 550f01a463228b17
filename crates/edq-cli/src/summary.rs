use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use edq_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("{}", stage_table(result));
    for line in summary_lines(result) {
        println!("{line}");
    }
    if !result.audit.is_clean() {
        eprintln!("Output invariant violations:");
        for (label, count) in result.audit.counts() {
            eprintln!("- {label}: {count}");
        }
    }
}

/// Headline counts, one per line.
fn summary_lines(result: &RunResult) -> Vec<String> {
    let pipeline = &result.pipeline;
    let mut lines = vec![
        format!("Duplicates removed: {}", pipeline.duplicates_removed()),
        format!("Rows dropped for gender: {}", pipeline.gender_rejected()),
        format!("LWBS patients: {}", pipeline.lwbs_count()),
        format!("Final rows: {}", pipeline.final_rows),
    ];
    match &result.output {
        Some(path) => lines.push(format!("Output: {}", path.display())),
        None => lines.push("Output: not written (dry run)".to_string()),
    }
    if let Some(path) = &result.report {
        lines.push(format!("Run report: {}", path.display()));
    }
    lines
}

fn stage_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Description"),
        header_cell("Rows in"),
        header_cell("Dropped"),
        header_cell("Rewritten"),
        header_cell("Rows out"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stage in &result.pipeline.stages {
        table.add_row(vec![
            Cell::new(stage.stage.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.stage.description()),
            Cell::new(stage.rows_in),
            count_cell(stage.rows_dropped, Color::Red),
            count_cell(stage.cells_rewritten, Color::Yellow),
            Cell::new(stage.rows_out()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All stages")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.pipeline.initial_rows).add_attribute(Attribute::Bold),
        count_cell(result.pipeline.total_dropped(), Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.pipeline.final_rows).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use edq_model::{PipelineReport, StageKind, StageReport};
    use edq_transform::AuditReport;

    use super::*;

    fn result() -> RunResult {
        let mut pipeline = PipelineReport::new(10);
        let mut dedupe = StageReport::new(StageKind::Deduplicate, 10);
        dedupe.rows_dropped = 2;
        pipeline.push(dedupe);
        let mut gender = StageReport::new(StageKind::Gender, 8);
        gender.rows_dropped = 1;
        pipeline.push(gender.with_detail("rejected", 1));
        pipeline.push(StageReport::new(StageKind::LwbsFlag, 7).with_detail("lwbs", 3));
        RunResult {
            input: PathBuf::from("CN_RAW_DATA.csv"),
            output: Some(PathBuf::from("CN_CLEAN_DATA.csv")),
            report: None,
            pipeline,
            audit: AuditReport::default(),
        }
    }

    #[test]
    fn summary_lines_report_headline_counts() {
        let lines = summary_lines(&result()).join("\n");
        insta::assert_snapshot!(lines, @r"
        Duplicates removed: 2
        Rows dropped for gender: 1
        LWBS patients: 3
        Final rows: 7
        Output: CN_CLEAN_DATA.csv
        ");
    }

    #[test]
    fn dry_run_reports_no_output() {
        let mut result = result();
        result.output = None;
        let lines = summary_lines(&result);
        assert!(lines.contains(&"Output: not written (dry run)".to_string()));
    }

    #[test]
    fn stage_table_has_row_per_stage_plus_total() {
        let table = stage_table(&result());
        assert_eq!(table.row_iter().count(), 4);
    }
}
