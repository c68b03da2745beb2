//! Full demo of every built-in generator and variant.
//!
//! Run with: `cargo run --example demo`
//! (`RUST_LOG=algo_drill_gen=debug` shows the engine's tracing output.)
//!
//! 1. **Language comparison**: the same CRT system is generated in English
//!    and German (same seed = same congruences).
//!
//! 2. **All generators**: one question per generator and variant with fixed
//!    seeds. For each question the demo checks the evaluator's reference
//!    answer, a wrong answer, and regenerates the question from its path.

use algo_drill_gen::{
    question_to_json, EngineConfig, Evaluator, FreeTextAnswer, Generated, Language,
    MultipleChoiceAnswer, Parameters, Question, Registry,
};
use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

fn print_question(generated: &Generated) {
    let question = &generated.question;
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{}]  {}", question.name(), question.path());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", question.text().unwrap_or_default());
    match question {
        Question::MultipleChoiceQuestion(q) => {
            for (i, answer) in q.answers.iter().enumerate() {
                println!("  ({}) {answer}", i + 1);
            }
        }
        Question::FreeTextQuestion(q) => {
            if let Some(prompt) = &q.prompt {
                println!("  prompt: {prompt}");
            }
            if let Some(bottom) = &q.bottom_text {
                println!("  {bottom}");
            }
        }
    }
}

/// Answer with the reference solution, then with something else.
fn check_feedback(generated: &Generated) -> anyhow::Result<()> {
    match generated.feedback.as_ref().context("question has no evaluator")? {
        Evaluator::FreeText(key) => {
            let reference = key.reference_answer();
            let feedback = key.evaluate(&FreeTextAnswer::new(reference.as_str()));
            println!("  answer {reference:?} → {}", feedback.feedback_text.unwrap_or_default());
            if feedback.correct != Some(true) {
                bail!("reference answer rejected for {}", generated.question.path());
            }
            let feedback = key.evaluate(&FreeTextAnswer::new("???"));
            println!("  answer \"???\" → {}", feedback.feedback_text.unwrap_or_default());
        }
        Evaluator::MultipleChoice(key) => {
            let choice = key.correct_choice().to_vec();
            let feedback = key.evaluate(&MultipleChoiceAnswer { choice: choice.clone() });
            println!("  choose {choice:?} → {}", feedback.feedback_text.unwrap_or_default());
            if feedback.correct != Some(true) {
                bail!("reference choice rejected for {}", generated.question.path());
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = Registry::standard(&EngineConfig::default());

    // ── Part 1: language comparison ──────────────────────────────────────────
    println!("\n╔══════════════════════════════════════════════════════════╗");
    println!("║  LANGUAGE COMPARISON: same seed, en vs de                ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    let crt = Parameters::new().with("variant", "crt");
    for lang in Language::ALL {
        let generated = registry.generate("modtricks", lang, &crt, "demo")?;
        print_question(&generated);
        check_feedback(&generated)?;
    }

    // ── Part 2: every generator and variant ──────────────────────────────────
    println!("\n╔══════════════════════════════════════════════════════════╗");
    println!("║  ALL GENERATORS                                          ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    let calls: Vec<(&str, Parameters)> = vec![
        ("bst", Parameters::new().with("variant", "insert")),
        ("bst", Parameters::new().with("variant", "delete")),
        ("bst", Parameters::new().with("variant", "neighbor")),
        ("avl", Parameters::new().with("variant", "insert").with("balance", "rotate")),
        ("avl", Parameters::new().with("variant", "combine").with("balance", "none")),
        ("modtricks", Parameters::new().with("variant", "simple")),
        ("modtricks", Parameters::new().with("variant", "reduction")),
        ("modtricks", Parameters::new().with("variant", "inverse")),
        ("modtricks", Parameters::new().with("variant", "exponentiation")),
        ("modtricks", Parameters::new().with("variant", "crt")),
        ("stack", Parameters::new().with("variant", "start")),
        ("stack", Parameters::new().with("variant", "sequence1")),
    ];

    for (seed, (id, params)) in calls.iter().enumerate() {
        let generated = registry.generate(id, Language::En, params, &seed.to_string())?;
        print_question(&generated);
        check_feedback(&generated)?;

        let again = registry.regenerate(generated.question.path())?;
        if again != generated {
            bail!("{} did not regenerate identically", generated.question.path());
        }
        println!("  regenerated from permalink ✓\n");
    }

    // ── Part 3: JSON ─────────────────────────────────────────────────────────
    let generated = registry.generate("bst", Language::De, &Parameters::new().with("variant", "neighbor"), "json")?;
    println!("{}", question_to_json(&generated.question)?);

    Ok(())
}
