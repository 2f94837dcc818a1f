use anyhow::Result;

use crate::catalog::{College, HistoricalCutoffRecord};
use crate::ranking::RankedRecommendation;

pub fn recommendations_to_csv(items: &[RankedRecommendation]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "college_id",
        "college",
        "type",
        "branch_id",
        "branch",
        "annual_fee",
        "chance",
        "percentage",
    ])?;
    for (idx, item) in items.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            item.college.id.to_string(),
            item.college.name.clone(),
            item.college.college_type.to_string(),
            item.branch.id.to_string(),
            item.branch.name.clone(),
            item.college.annual_fee.to_string(),
            item.chance.chance.to_string(),
            item.chance.percentage.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn colleges_to_csv(colleges: &[&College]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "institute_code",
        "name",
        "city",
        "type",
        "annual_fee",
        "placement_rate",
        "average_package",
    ])?;
    for college in colleges {
        writer.write_record([
            college.id.to_string(),
            college.institute_code.clone().unwrap_or_default(),
            college.name.clone(),
            college.city.clone(),
            college.college_type.to_string(),
            college.annual_fee.to_string(),
            college
                .placement_rate
                .map(|v| v.to_string())
                .unwrap_or_default(),
            college
                .average_package
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn cutoffs_to_csv(records: &[HistoricalCutoffRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "college_id",
        "branch_id",
        "year",
        "round",
        "category",
        "opening_rank",
        "closing_rank",
    ])?;
    for rec in records {
        writer.write_record([
            rec.college_id.to_string(),
            rec.branch_id.to_string(),
            rec.year.to_string(),
            rec.round.to_string(),
            rec.category.to_string(),
            rec.opening_rank.to_string(),
            rec.closing_rank.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
