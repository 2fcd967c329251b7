//! The `certquiz take` command — the interactive test loop.
//!
//! The loop owns one [`Session`] and turns each line of user input into an
//! explicit state machine call. It is generic over `BufRead`/`Write` so the
//! whole flow can be exercised with in-memory buffers.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use certquiz_archive::{current_timestamp, ResultArchive, TestResult};
use certquiz_core::model::{Answer, Question};
use certquiz_core::scoring::{score, PASS_THRESHOLD_PCT};
use certquiz_core::session::Session;

use crate::config::load_config_from;

pub fn execute(
    name: Option<String>,
    bank: Option<PathBuf>,
    results: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank.unwrap_or(config.question_bank);
    let results_dir = results.unwrap_or(config.results_dir);

    let Some(questions) = certquiz_store::load_questions(&bank_path)? else {
        anyhow::bail!(
            "no question bank found at {}. Run `certquiz init` to scaffold one, \
             then fill it with questions.",
            bank_path.display()
        );
    };
    tracing::debug!(
        bank = %bank_path.display(),
        questions = questions.len(),
        "question bank loaded"
    );

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();

    let name = match name {
        Some(n) => n,
        None => prompt_name(&mut input, &mut out)?,
    };

    let archive = ResultArchive::new(results_dir);
    run_test(
        &mut input,
        &mut out,
        &questions,
        &name,
        config.questions_per_test,
        &archive,
    )
}

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Answer(Answer),
    Next,
    Prev,
    Submit,
    Quit,
}

/// Parse a line of input into a command.
///
/// Keywords take priority; anything else is read as option letters. On a
/// multi-select question letters may be separated by commas or spaces and
/// always build a set; on a single-select question exactly one letter is
/// accepted.
fn parse_input(line: &str, multi: bool) -> Result<Command, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "n" | "next" => return Ok(Command::Next),
        "p" | "prev" | "previous" => return Ok(Command::Prev),
        "s" | "submit" => return Ok(Command::Submit),
        "q" | "quit" => return Ok(Command::Quit),
        "" => return Err("enter an option letter, or n/p/s/q".into()),
        _ => {}
    }

    let mut letters = BTreeSet::new();
    for token in trimmed.split([',', ' ', ';']).filter(|t| !t.is_empty()) {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                letters.insert(c.to_ascii_uppercase());
            }
            _ => return Err(format!("'{token}' is not an option letter")),
        }
    }

    // A separator-only line ("," or "; ") parses zero tokens; an empty
    // selection is "no answer yet", never an empty set.
    if letters.is_empty() {
        return Err("enter at least one option letter".into());
    }

    if multi {
        Ok(Command::Answer(Answer::Multiple(letters)))
    } else if letters.len() == 1 {
        Ok(Command::Answer(Answer::Single(
            letters.into_iter().next().unwrap(),
        )))
    } else {
        Err("this question takes exactly one answer letter".into())
    }
}

fn prompt_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    loop {
        write!(out, "Enter your name: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("no name provided");
        }
        let name = line.trim();
        if !name.is_empty() {
            return Ok(name.to_string());
        }
        writeln!(out, "Name must not be empty.")?;
    }
}

fn render_question<W: Write>(
    out: &mut W,
    question: &Question,
    index: usize,
    total: usize,
    current: Option<&Answer>,
) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Question {}/{} ({}% through)",
        index + 1,
        total,
        (index + 1) * 100 / total
    )?;
    writeln!(out, "{}", question.text)?;
    if question.is_multiple() {
        writeln!(out, "(select all that apply, e.g. \"A,C\")")?;
    }
    for opt in &question.options {
        writeln!(out, "  {}. {}", opt.letter, opt.text)?;
    }
    if let Some(answer) = current {
        writeln!(out, "Current answer: {answer}")?;
    }
    writeln!(out, "[letter(s) to answer, n=next, p=prev, s=submit, q=quit]")?;
    Ok(())
}

/// Drive one full test from start to submit/quit over arbitrary I/O.
pub(crate) fn run_test<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    bank: &[Question],
    name: &str,
    per_test: usize,
    archive: &ResultArchive,
) -> Result<()> {
    let mut session = Session::new();
    session.start_new_test_with(bank, name, per_test)?;

    writeln!(
        out,
        "Starting test for {}: {} questions, pass mark {PASS_THRESHOLD_PCT}%.",
        session.user_name(),
        session.questions().len()
    )?;

    loop {
        let i = session.current_index();
        let total = session.questions().len();
        let (is_multi, option_letters) = {
            let question = &session.questions()[i];
            render_question(out, question, i, total, session.answer_for(i))?;
            (question.is_multiple(), question.option_letters())
        };

        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            session.quit()?;
            writeln!(out, "\nTest abandoned; nothing was saved.")?;
            return Ok(());
        }

        match parse_input(&line, is_multi) {
            Err(msg) => writeln!(out, "{msg}")?,
            Ok(Command::Answer(answer)) => {
                let unknown: Vec<char> = answer
                    .letters()
                    .into_iter()
                    .filter(|l| !option_letters.contains(l))
                    .collect();
                if !unknown.is_empty() {
                    writeln!(
                        out,
                        "no such option: {}",
                        unknown.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
                    )?;
                    continue;
                }
                session.record_answer(i, answer)?;
                if i + 1 < total {
                    session.advance(1)?;
                } else {
                    writeln!(out, "Answer recorded. Type 's' to submit or 'p' to review.")?;
                }
            }
            Ok(Command::Next) => {
                if i + 1 >= total {
                    writeln!(out, "Already at the last question. Type 's' to submit.")?;
                } else {
                    session.advance(1)?;
                }
            }
            Ok(Command::Prev) => {
                session.advance(-1)?;
            }
            Ok(Command::Quit) => {
                session.quit()?;
                writeln!(out, "Test abandoned; nothing was saved.")?;
                return Ok(());
            }
            Ok(Command::Submit) => {
                let unanswered = total - session.answered_count();
                if unanswered > 0 {
                    writeln!(
                        out,
                        "Submitting with {unanswered} unanswered question(s); they count as wrong."
                    )?;
                }
                session.submit()?;
                finish_test(out, &mut session, archive)?;
                return Ok(());
            }
        }
    }
}

fn finish_test<W: Write>(out: &mut W, session: &mut Session, archive: &ResultArchive) -> Result<()> {
    let total = session.questions().len();
    let outcome = score(session.questions(), session.answers());
    let result = TestResult::from_outcome(session.user_name(), outcome, total, current_timestamp());

    writeln!(out)?;
    writeln!(
        out,
        "Test complete: {}/{} correct ({}%)",
        result.score, result.total, result.percentage
    )?;
    if result.passed() {
        writeln!(out, "PASS — congratulations, {}!", session.user_name())?;
    } else {
        writeln!(
            out,
            "FAIL — below the {PASS_THRESHOLD_PCT}% pass mark. Keep studying, {}!",
            session.user_name()
        )?;
    }

    // Save exactly once; a failed save leaves the flag unset so the session
    // stays retryable.
    if !session.result_saved() {
        let path = archive.save(&result)?;
        session.mark_result_saved()?;
        writeln!(out, "Result saved to {}", path.display())?;
    }

    if !result.wrong_questions.is_empty() {
        writeln!(out)?;
        writeln!(out, "Review of incorrect answers:")?;
        super::render_review(out, &result.wrong_questions)?;
    }

    session.reset()?;
    Ok(())
}
