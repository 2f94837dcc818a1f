use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::catalog::{Branch, College, HistoricalCutoffRecord};
use crate::prediction::{Chance, PredictionResult};
use crate::ranking::RankedRecommendation;

pub fn chance_color(chance: Chance) -> Color {
    match chance {
        Chance::High => Color::Green,
        Chance::Medium => Color::Yellow,
        Chance::Low => Color::Red,
    }
}

fn chance_cell(prediction: &PredictionResult) -> Cell {
    Cell::new(format!(
        "{} ({}%)",
        prediction.chance.label(),
        prediction.percentage
    ))
    .fg(chance_color(prediction.chance))
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_recommendations_table(items: &[RankedRecommendation]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "College",
        "City",
        "Type",
        "Branch",
        "Annual Fee",
        "Placement %",
        "Chance",
    ]);
    for (idx, item) in items.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(&item.college.name),
            Cell::new(&item.college.city),
            Cell::new(item.college.college_type.to_string()),
            Cell::new(&item.branch.name),
            Cell::new(item.college.annual_fee.to_string()),
            Cell::new(optional(item.college.placement_rate, 0)),
            chance_cell(&item.chance),
        ]));
    }
    table.to_string()
}

pub fn render_prediction_table(
    college: &College,
    branch: &Branch,
    prediction: &PredictionResult,
) -> String {
    let mut table = new_table();
    table.set_header(vec!["College", "Branch", "Course", "Cutoff Rank", "Chance"]);
    table.add_row(Row::from(vec![
        Cell::new(&college.name),
        Cell::new(&branch.name),
        Cell::new(branch.course.to_string()),
        Cell::new(
            branch
                .cutoff_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        chance_cell(prediction),
    ]));
    table.to_string()
}

pub fn render_colleges_table(colleges: &[&College]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "ID",
        "Code",
        "College",
        "City",
        "Type",
        "Annual Fee",
        "Placement %",
        "Avg Package",
    ]);
    for college in colleges {
        table.add_row(vec![
            college.id.to_string(),
            college.institute_code.clone().unwrap_or_default(),
            college.name.clone(),
            college.city.clone(),
            college.college_type.to_string(),
            college.annual_fee.to_string(),
            optional(college.placement_rate, 0),
            optional(college.average_package, 0),
        ]);
    }
    table.to_string()
}

pub fn render_cutoffs_table(records: &[HistoricalCutoffRecord]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "College",
        "Branch",
        "Year",
        "Round",
        "Category",
        "Opening",
        "Closing",
    ]);
    for rec in records {
        table.add_row(vec![
            rec.college_id.to_string(),
            rec.branch_id.to_string(),
            rec.year.to_string(),
            rec.round.to_string(),
            rec.category.to_string(),
            rec.opening_rank.to_string(),
            rec.closing_rank.to_string(),
        ]);
    }
    table.to_string()
}
