//! The `quizline play` command.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quizline_core::model::CategoryId;
use quizline_core::report::QuizReport;
use quizline_core::{Phase, QuizController};
use quizline_providers::config::load_config_from;
use quizline_providers::create_source;

pub async fn execute(
    category: Option<CategoryId>,
    save: bool,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let category = super::resolve_category(category, &config)?;
    let source = create_source(&config)?;
    tracing::info!(%category, amount = config.amount, "starting quiz");

    let mut controller = QuizController::with_request(source, config.request_for(category));
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let results_dir = save.then_some(config.results_dir.as_path());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(
        &mut controller,
        &mut rng,
        stdin.lock(),
        stdout.lock(),
        results_dir,
    )
    .await?;

    Ok(())
}

/// Drive a quiz from line-based input until the user quits or input ends.
/// Returns a report for every quiz completed along the way.
pub(crate) async fn run<R, W, G>(
    controller: &mut QuizController,
    rng: &mut G,
    input: R,
    mut out: W,
    results_dir: Option<&Path>,
) -> Result<Vec<QuizReport>>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut lines = input.lines();
    // Shuffled once per question so options keep their numbers while navigating.
    let mut options: HashMap<usize, Vec<String>> = HashMap::new();
    let mut reports = Vec::new();
    let mut recorded = false;

    writeln!(out, "Loading questions... Please wait")?;
    let category = controller.request().category;
    controller.load_questions(category).await;

    loop {
        match controller.phase() {
            Phase::Idle | Phase::Loading => {
                writeln!(out, "Loading questions... Please wait")?;
                controller.retry().await;
            }
            Phase::Failed => {
                let error = controller
                    .session()
                    .error()
                    .cloned()
                    .context("failed session has no error")?;
                writeln!(out, "{}", error.user_message())?;
                writeln!(out, "[r] Retry  [q] Quit")?;

                match read_command(&mut lines, &mut out)?.as_deref() {
                    None | Some("q") => break,
                    Some("r") => {
                        if let Some(wait) = error.retry_after() {
                            writeln!(out, "Rate limited, waiting {}s...", wait.as_secs())?;
                            tokio::time::sleep(wait).await;
                        }
                        writeln!(out, "Loading questions... Please wait")?;
                        options.clear();
                        controller.retry().await;
                    }
                    Some(other) => writeln!(out, "Unknown command: {other}")?,
                }
            }
            Phase::Ready => {
                let session = controller.session();
                let index = session.current_index();
                let total = session.questions().len();
                let is_last = session.is_last();
                let question = session
                    .current_question()
                    .cloned()
                    .context("ready session has no current question")?;
                let selected = session.selected(index).map(str::to_string);
                let choices = options
                    .entry(index)
                    .or_insert_with(|| question.options(rng))
                    .clone();

                writeln!(out)?;
                writeln!(
                    out,
                    "Question {}/{} [{} | {}]",
                    index + 1,
                    total,
                    question.category,
                    question.difficulty
                )?;
                writeln!(out, "{}", question.prompt)?;
                for (i, choice) in choices.iter().enumerate() {
                    let marker = if selected.as_deref() == Some(choice.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(out, " {marker} {}) {choice}", i + 1)?;
                }
                let next_label = if is_last { "Finish Quiz" } else { "Next" };
                if index == 0 {
                    writeln!(out, "[1-{}] Answer  [n] {next_label}  [q] Quit", choices.len())?;
                } else {
                    writeln!(
                        out,
                        "[1-{}] Answer  [p] Previous  [n] {next_label}  [q] Quit",
                        choices.len()
                    )?;
                }

                match read_command(&mut lines, &mut out)?.as_deref() {
                    None | Some("q") => break,
                    Some("n") => controller.advance(),
                    Some("") => {}
                    Some("p") => controller.retreat(),
                    Some(other) => match parse_choice(other, choices.len()) {
                        Some(i) => controller.select_current(choices[i].clone()),
                        None => writeln!(out, "Unknown command: {other}")?,
                    },
                }
            }
            Phase::Completed => {
                if !recorded {
                    let report = QuizReport::from_session(controller.session())
                        .context("completed session has no score")?;
                    print_summary(&report, &mut out)?;
                    if let Some(dir) = results_dir {
                        let path = report_path(dir, &report);
                        report.save_json(&path)?;
                        writeln!(out, "Results saved to: {}", path.display())?;
                    }
                    reports.push(report);
                    recorded = true;
                }
                writeln!(out, "[r] Restart Quiz  [q] Quit")?;

                match read_command(&mut lines, &mut out)?.as_deref() {
                    None | Some("q") => break,
                    Some("r") => {
                        writeln!(out, "Loading questions... Please wait")?;
                        options.clear();
                        recorded = false;
                        controller.restart().await;
                    }
                    Some(other) => writeln!(out, "Unknown command: {other}")?,
                }
            }
        }
    }

    out.flush()?;
    Ok(reports)
}

/// Prompt and read one trimmed, lowercased command. `None` at end of input.
fn read_command<I, W>(lines: &mut I, out: &mut W) -> Result<Option<String>>
where
    I: Iterator<Item = std::io::Result<String>>,
    W: Write,
{
    write!(out, "> ")?;
    out.flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_lowercase())),
        None => Ok(None),
    }
}

/// 1-based option number to 0-based index.
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1)
}

fn report_path(dir: &Path, report: &QuizReport) -> PathBuf {
    let timestamp = report.completed_at.format("%Y-%m-%dT%H%M%S");
    let short_id: String = report.id.to_string().chars().take(8).collect();
    dir.join(format!("quiz-{timestamp}-{short_id}.json"))
}

fn print_summary<W: Write>(report: &QuizReport, out: &mut W) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", ""]);

    for answer in &report.answers {
        table.add_row(vec![
            Cell::new(answer.index + 1),
            Cell::new(&answer.prompt),
            Cell::new(answer.selected.as_deref().unwrap_or("-")),
            Cell::new(&answer.correct_answer),
            Cell::new(if answer.correct { "OK" } else { "WRONG" }),
        ]);
    }

    writeln!(out)?;
    writeln!(out, "You have completed the Quiz")?;
    writeln!(
        out,
        "Your Score: {} / {} ({:.0}%)",
        report.score,
        report.total,
        report.ratio() * 100.0
    )?;
    writeln!(out, "\n{table}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use quizline_core::error::FetchError;
    use quizline_core::model::{Difficulty, Question, QuestionKind};
    use quizline_providers::mock::{sample_questions, MockSource};

    fn one_option_questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                prompt: format!("Question {i}"),
                correct_answer: format!("answer-{i}"),
                distractors: vec![],
                category: "General Knowledge".into(),
                difficulty: Difficulty::Easy,
                kind: QuestionKind::Multiple,
            })
            .collect()
    }

    async fn play(source: MockSource, script: &str) -> (Vec<QuizReport>, String, Arc<MockSource>) {
        let source = Arc::new(source);
        let mut controller = QuizController::new(source.clone(), CategoryId(9));
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();
        let reports = run(
            &mut controller,
            &mut rng,
            Cursor::new(script.to_string()),
            &mut out,
            None,
        )
        .await
        .unwrap();
        (reports, String::from_utf8(out).unwrap(), source)
    }

    #[tokio::test]
    async fn answering_every_question_correctly() {
        // With a single option per question, "1" is always the correct answer.
        let script = "1\nn\n".repeat(3) + "q\n";
        let (reports, out, _) =
            play(MockSource::with_questions(one_option_questions(3)), &script).await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].score, 3);
        assert!(out.contains("Loading questions... Please wait"));
        assert!(out.contains("Finish Quiz"));
        assert!(out.contains("You have completed the Quiz"));
        assert!(out.contains("Your Score: 3 / 3 (100%)"));
    }

    #[tokio::test]
    async fn skipping_everything_scores_zero() {
        let (reports, out, _) =
            play(MockSource::with_questions(sample_questions(2)), "n\nn\nq\n").await;
        assert_eq!(reports[0].score, 0);
        assert!(out.contains("Your Score: 0 / 2 (0%)"));
    }

    #[tokio::test]
    async fn empty_line_does_not_advance() {
        let (reports, out, _) =
            play(MockSource::with_questions(sample_questions(2)), "\n\n\nq\n").await;
        assert!(reports.is_empty());
        assert!(!out.contains("Question 2/2"));
        assert!(!out.contains("Unknown command"));
        assert_eq!(out.matches("Question 1/2").count(), 4);
    }

    #[tokio::test]
    async fn previous_returns_to_earlier_question() {
        let (reports, out, _) = play(
            MockSource::with_questions(one_option_questions(2)),
            "n\np\n1\nn\nn\nq\n",
        )
        .await;
        assert_eq!(out.matches("Question 1/2").count(), 3);
        assert!(out.contains("[p] Previous"));
        assert_eq!(reports[0].score, 1);
    }

    #[tokio::test]
    async fn no_results_offers_retry() {
        let source = MockSource::scripted(vec![
            Err(FetchError::NoResultsForCategory(CategoryId(9))),
            Ok(one_option_questions(1)),
        ]);
        let (reports, out, source) = play(source, "r\n1\nn\nq\n").await;

        assert!(out.contains("No questions found for this category"));
        assert!(out.contains("[r] Retry"));
        assert_eq!(source.call_count(), 2);
        assert_eq!(reports[0].score, 1);
    }

    #[tokio::test]
    async fn restart_plays_again() {
        let (reports, _, source) = play(
            MockSource::with_questions(one_option_questions(1)),
            "1\nn\nr\nn\nq\n",
        )
        .await;
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].score, 1);
        assert_eq!(reports[1].score, 0);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn end_of_input_quits() {
        let (reports, out, _) = play(MockSource::with_questions(sample_questions(3)), "").await;
        assert!(reports.is_empty());
        assert!(out.contains("Question 1/3"));
    }

    #[tokio::test]
    async fn unknown_commands_are_reported() {
        let (_, out, _) =
            play(MockSource::with_questions(sample_questions(1)), "7\nxyz\nq\n").await;
        assert!(out.contains("Unknown command: 7"));
        assert!(out.contains("Unknown command: xyz"));
    }

    #[tokio::test]
    async fn saves_report_when_results_dir_given() {
        let dir = tempfile::tempdir().unwrap();
        let source: Arc<MockSource> = Arc::new(MockSource::with_questions(one_option_questions(1)));
        let mut controller = QuizController::new(source, CategoryId(9));
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();

        let reports = run(
            &mut controller,
            &mut rng,
            Cursor::new("1\nn\nq\n"),
            &mut out,
            Some(dir.path()),
        )
        .await
        .unwrap();

        let saved: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(saved.len(), 1);
        let path = saved[0].as_ref().unwrap().path();
        let loaded = QuizReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, reports[0].id);
    }

    #[test]
    fn parse_choice_bounds() {
        assert_eq!(parse_choice("1", 4), Some(0));
        assert_eq!(parse_choice("4", 4), Some(3));
        assert_eq!(parse_choice("0", 4), None);
        assert_eq!(parse_choice("5", 4), None);
        assert_eq!(parse_choice("a", 4), None);
    }
}
