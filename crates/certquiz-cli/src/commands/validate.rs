//! The `certquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::load_config_from;

pub fn execute(bank: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank.unwrap_or(config.question_bank);

    let Some(questions) = certquiz_store::load_questions(&bank_path)? else {
        anyhow::bail!("no question bank found at {}", bank_path.display());
    };

    println!(
        "Question bank: {} ({} questions)",
        bank_path.display(),
        questions.len()
    );

    let warnings = certquiz_store::validate_question_bank(&questions);
    for w in &warnings {
        let prefix = w
            .question_index
            .map(|i| format!("  [question {}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
