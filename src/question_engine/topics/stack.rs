use std::str::FromStr;

use crate::question_engine::{
    config::EngineConfig,
    error::GenerationError,
    evaluator::{AnswerCheck, Evaluator, FreeTextKey},
    generator::{prepare, variant_param, Generated, QuestionGenerator},
    helpers::{free_text, level_order_table, localized, pick},
    models::{Language, Question},
    oracles::stack::{self, StackOp},
    params::{ExpectedParameter, Parameters},
    random::Random,
};

const VALUE_MIN: i64 = 1;
const VALUE_MAX: i64 = 20;
const START_SIZE_MAX: i64 = 4;
const START_OPS: (i64, i64) = (4, 7);
const SEQUENCE_OPS: (i64, i64) = (5, 9);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    /// Given a filled stack, report every return value.
    Start,
    /// From an empty stack, report the final state.
    Sequence1,
}

impl FromStr for Variant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start"     => Ok(Variant::Start),
            "sequence1" => Ok(Variant::Sequence1),
            _           => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Push,
    Pop,
    Top,
    IsEmpty,
}

/// Random operation sequence that never pops or peeks an empty stack.
/// `queries` enables `top` and `isEmpty`.
fn draw_ops(random: &mut Random, mut len: usize, count: usize, queries: bool) -> Vec<StackOp> {
    let mut ops = Vec::with_capacity(count);
    for _ in 0..count {
        let kinds: &[Kind] = match (len, queries) {
            (0, false) => &[Kind::Push],
            (0, true)  => &[Kind::Push, Kind::IsEmpty],
            (_, false) => &[Kind::Push, Kind::Pop],
            (_, true)  => &[Kind::Push, Kind::Pop, Kind::Top, Kind::IsEmpty],
        };
        let op = match *random.choice(kinds) {
            Kind::Push => {
                len += 1;
                StackOp::Push(random.int(VALUE_MIN, VALUE_MAX))
            }
            Kind::Pop => {
                len -= 1;
                StackOp::Pop
            }
            Kind::Top     => StackOp::Top,
            Kind::IsEmpty => StackOp::IsEmpty,
        };
        ops.push(op);
    }
    ops
}

/// Stack operation drills: return values of `push`/`pop`/`top`/`isEmpty`
/// sequences, or the final state after a run of pushes and pops.
pub struct StackGenerator {
    max_redraws: usize,
}

impl StackGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        StackGenerator { max_redraws: config.max_redraws }
    }
}

impl QuestionGenerator for StackGenerator {
    fn id(&self) -> &'static str {
        "stack"
    }

    fn name(&self, _lang: Language) -> String {
        "Stacks".to_string()
    }

    fn description(&self, lang: Language) -> String {
        pick(lang, "Perform stack operations", "Stack-Operationen ausführen").to_string()
    }

    fn tags(&self) -> &'static [&'static str] {
        &["stack"]
    }

    fn expected_parameters(&self) -> Vec<ExpectedParameter> {
        vec![ExpectedParameter::choice("variant", &["start", "sequence1"])]
    }

    fn generate(&self, lang: Language, parameters: &Parameters, seed: &str) -> Result<Generated, GenerationError> {
        let path = prepare(self, lang, parameters, seed)?;
        let variant: Variant = variant_param(self, parameters, "variant")?;
        let mut random = Random::new(seed);

        let (text, placeholder, check) = match variant {
            Variant::Start     => self.start(lang, &mut random)?,
            Variant::Sequence1 => self.sequence(lang, &mut random)?,
        };

        let mut question = free_text(path, self.name(lang), text);
        question.placeholder = Some(placeholder.to_string());
        Ok(Generated {
            question: Question::FreeTextQuestion(question),
            feedback: Some(Evaluator::FreeText(FreeTextKey::new(lang, check))),
        })
    }
}

impl StackGenerator {
    fn start(&self, lang: Language, random: &mut Random) -> Result<(String, &'static str, AnswerCheck), GenerationError> {
        let size = random.int(0, START_SIZE_MAX) as usize;
        let initial: Vec<i64> = (0..size).map(|_| random.int(VALUE_MIN, VALUE_MAX)).collect();
        let ops = random.redraw(
            "operations with a return value",
            self.max_redraws,
            |r| {
                let count = r.int(START_OPS.0, START_OPS.1) as usize;
                draw_ops(r, initial.len(), count, true)
            },
            |ops| ops.iter().any(|op| !matches!(op, StackOp::Push(_))),
        )?;
        let run = stack::run(&initial, &ops)?;

        let state = if initial.is_empty() {
            pick(lang, "Currently the stack is empty.", "Der Stack ist aktuell leer.").to_string()
        } else {
            let cells: Vec<Option<i64>> = initial.iter().copied().map(Some).collect();
            let table = level_order_table(lang, &cells);
            localized(
                lang,
                format!("The stack contains the following elements (*with the top at the highest index*): {table}"),
                format!("Der Stack enthält folgende Elemente (*mit dem Top-Element am höchsten Index*): {table}"),
            )
        };
        let listing: String = ops
            .iter()
            .enumerate()
            .map(|(i, op)| format!("\n{}. `{op}`", i + 1))
            .collect();
        let text = localized(
            lang,
            format!(
                "Consider a **Stack \"S\"**. {state} **We perform the following operations:** {listing}\n\n\
                 Enter the return values of all `pop`, `top` and `isEmpty` calls in order, separated by commas."
            ),
            format!(
                "Betrachte einen **Stack \"S\"**. {state} **Wir führen nun folgende Operationen aus:** {listing}\n\n\
                 Gib die Rückgabewerte aller `pop`-, `top`- und `isEmpty`-Aufrufe in Reihenfolge an, durch Kommas getrennt."
            ),
        );
        Ok((text, "3, true, 5", AnswerCheck::ReturnValues(run.returns)))
    }

    fn sequence(&self, lang: Language, random: &mut Random) -> Result<(String, &'static str, AnswerCheck), GenerationError> {
        let ops = random.redraw(
            "sequence leaving the stack non-empty",
            self.max_redraws,
            |r| {
                let count = r.int(SEQUENCE_OPS.0, SEQUENCE_OPS.1) as usize;
                draw_ops(r, 0, count, false)
            },
            |ops| {
                let pushes = ops.iter().filter(|op| matches!(op, StackOp::Push(_))).count();
                pushes * 2 > ops.len()
            },
        )?;
        let run = stack::run(&[], &ops)?;

        let calls = ops.iter().map(|op| format!("`{op}`")).collect::<Vec<_>>().join(", ");
        let text = localized(
            lang,
            format!(
                "Consider an initially empty stack on which the operations {calls} are executed. \
                 Enter the final state of the stack, separated by commas. *(The top element is at the highest index.)*"
            ),
            format!(
                "Betrachte einen anfangs leeren Stapel, auf dem die Operationen {calls} ausgeführt werden. \
                 Gib den finalen Zustand des Stapels an, durch Kommas getrennt. *(Das Top Element ist am höchsten Index.)*"
            ),
        );
        Ok((text, "1, 2, 3", AnswerCheck::Values(run.final_state)))
    }
}
