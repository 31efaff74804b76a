use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Print up to `max_rows` rows as a markdown table, noting how many were
/// held back. An empty slice is a valid outcome, not an error.
pub fn preview_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let shown: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    let shown_count = shown.len();
    println!("{}", Table::new(shown).with(Style::markdown()).to_string());
    if rows.len() > shown_count {
        println!("({} of {} rows shown)", shown_count, rows.len());
    }
    println!();
}
