//! The `certquiz results` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use certquiz_archive::{ResultArchive, TestResult};

use crate::config::load_config_from;

/// How many recent results the detailed review covers.
const DETAILED_LIMIT: usize = 5;

pub fn execute(
    results_dir: Option<PathBuf>,
    detailed: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let archive = ResultArchive::new(results_dir.unwrap_or(config.results_dir));

    let results = archive.list_all()?;
    if results.is_empty() {
        println!("No previous test results found.");
        return Ok(());
    }

    print_summary(&results);

    if detailed {
        let mut out = std::io::stdout().lock();
        for result in results.iter().take(DETAILED_LIMIT) {
            writeln!(
                out,
                "\n{} — {} ({}%)",
                result.name, result.date, result.percentage
            )?;
            if result.wrong_questions.is_empty() {
                writeln!(out, "No incorrect answers.")?;
            } else {
                super::render_review(&mut out, &result.wrong_questions)?;
            }
        }
    }

    Ok(())
}

fn print_summary(results: &[TestResult]) {
    let mut table = Table::new();
    table.set_header(vec!["Name", "Date", "Score", "Percentage", "Status"]);

    for result in results {
        let status = if result.passed() { "PASS" } else { "FAIL" };
        table.add_row(vec![
            Cell::new(&result.name),
            Cell::new(&result.date),
            Cell::new(format!("{}/{}", result.score, result.total)),
            Cell::new(format!("{}%", result.percentage)),
            Cell::new(status),
        ]);
    }

    println!("{table}");
}
