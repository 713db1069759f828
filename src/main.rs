//! Business Operations Data Loader
//!
//! Loads task, sales, and SOP resources from a base directory and prints a
//! summary suitable for a manual smoke check.

mod clock;
mod data;
mod logging;

use clock::{Clock, SystemClock};
use data::DataLoader;
use env_logger::Env;
use polars::prelude::DataFrame;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let loader = DataLoader::new(data_dir);

    let (tasks, sales, sop) = loader.load_all();

    println!("Data summary for {}", loader.get_data_dir().display());
    println!("  report date: {}", SystemClock.today());
    println!(
        "  tasks: {} rows, columns: {:?}",
        tasks.height(),
        column_names(&tasks)
    );
    println!(
        "  sales: {} rows, columns: {:?}",
        sales.height(),
        column_names(&sales)
    );
    println!("  sop document: {} chars", sop.chars().count());
}

/// Column names of a frame, for the printed summary.
fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}
