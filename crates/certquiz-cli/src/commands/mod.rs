//! Subcommand implementations.

use std::io::Write;

use anyhow::Result;

use certquiz_core::scoring::WrongQuestion;

pub mod init;
pub mod results;
pub mod take;
pub mod validate;

/// Render the wrong-question review shared by `take` and `results --detailed`.
pub(crate) fn render_review<W: Write>(out: &mut W, wrong: &[WrongQuestion]) -> Result<()> {
    for (i, w) in wrong.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {}", i + 1, w.question)?;
        let correct = w.correct_answer.letters();
        let picked = w.user_answer.as_ref().map(|a| a.letters()).unwrap_or_default();
        for opt in &w.options {
            let marker = if correct.contains(&opt.letter) {
                "[correct]"
            } else if picked.contains(&opt.letter) {
                "[your pick]"
            } else {
                ""
            };
            writeln!(out, "   {}. {} {}", opt.letter, opt.text, marker)?;
        }
        match &w.user_answer {
            Some(answer) => writeln!(out, "   Your answer: {answer}")?,
            None => writeln!(out, "   Your answer: (none)")?,
        }
        writeln!(out, "   Correct answer: {}", w.correct_answer)?;
    }
    Ok(())
}
