//! Modular arithmetic drills.
//!
//! | Variant          | Draw                                              | Check       |
//! |------------------|---------------------------------------------------|-------------|
//! | `simple`         | `a ∈ [0,19]`, `b ∈ [2,20]`                        | `x ≡ a (b)` |
//! | `reduction`      | `x ∈ [100,999]`, `n ∈ [2,20]`                     | `x mod n`   |
//! | `inverse`        | `a ∈ [2,15]`, `n ∈ [2,20]`, coprime               | `a⁻¹ mod n` |
//! | `exponentiation` | `a, b ∈ [2,10]`, `n ∈ [2,20]`                     | `aᵇ mod n`  |
//! | `crt`            | 2-4 congruences, pairwise coprime moduli `[2,20]` | `y (mod z)` |

use std::str::FromStr;

use crate::question_engine::{
    config::EngineConfig,
    error::GenerationError,
    evaluator::{AnswerCheck, Evaluator, FreeTextKey},
    generator::{prepare, variant_param, Generated, QuestionGenerator},
    helpers::{free_text, localized, pick},
    models::{FreeTextQuestion, Language, Question},
    oracles::modular::{
        are_coprime, modular_exponentiation, modular_inverse, normalize, solve_crt, Congruence,
    },
    params::{ExpectedParameter, Parameters},
    random::Random,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Simple,
    Reduction,
    Inverse,
    Exponentiation,
    Crt,
}

impl FromStr for Variant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple"         => Ok(Variant::Simple),
            "reduction"      => Ok(Variant::Reduction),
            "inverse"        => Ok(Variant::Inverse),
            "exponentiation" => Ok(Variant::Exponentiation),
            "crt"            => Ok(Variant::Crt),
            _                => Err(()),
        }
    }
}

pub struct ModTricksGenerator {
    max_redraws: usize,
}

impl ModTricksGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        ModTricksGenerator { max_redraws: config.max_redraws }
    }
}

impl QuestionGenerator for ModTricksGenerator {
    fn id(&self) -> &'static str {
        "modtricks"
    }

    fn name(&self, lang: Language) -> String {
        pick(lang, "Modular Arithmetic Tricks", "Modulare Arithmetik Tricks").to_string()
    }

    fn description(&self, lang: Language) -> String {
        pick(
            lang,
            "Answer questions involving modular arithmetic.",
            "Beantworten Sie Fragen zur modularen Arithmetik.",
        )
        .to_string()
    }

    fn tags(&self) -> &'static [&'static str] {
        &["basic math", "modular arithmetic", "modulus", "mod", "arithmetic"]
    }

    fn author(&self) -> Option<&'static str> {
        Some("Janette Welker")
    }

    fn license(&self) -> Option<&'static str> {
        Some("MIT")
    }

    fn expected_parameters(&self) -> Vec<ExpectedParameter> {
        vec![ExpectedParameter::choice(
            "variant",
            &["simple", "reduction", "inverse", "exponentiation", "crt"],
        )]
    }

    fn generate(&self, lang: Language, parameters: &Parameters, seed: &str) -> Result<Generated, GenerationError> {
        let path = prepare(self, lang, parameters, seed)?;
        let variant: Variant = variant_param(self, parameters, "variant")?;
        let mut random = Random::new(seed);

        let (text, check) = match variant {
            Variant::Simple         => simple(lang, &mut random),
            Variant::Reduction      => reduction(lang, &mut random)?,
            Variant::Inverse        => self.inverse(lang, &mut random)?,
            Variant::Exponentiation => exponentiation(lang, &mut random)?,
            Variant::Crt            => return self.crt(lang, path, &mut random),
        };

        Ok(Generated {
            question: Question::FreeTextQuestion(free_text(path, self.name(lang), text)),
            feedback: Some(Evaluator::FreeText(FreeTextKey::new(lang, check))),
        })
    }
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

fn simple(lang: Language, random: &mut Random) -> (String, AnswerCheck) {
    let a = random.int(0, 19);
    let b = random.int(2, 20);
    let text = localized(
        lang,
        format!("Find an integer $x$ such that $x ≡ {a} \\pmod{{ {b} }}$."),
        format!("Finden Sie eine ganze Zahl $x$, so dass $x ≡ {a} \\pmod{{ {b} }}$."),
    );
    (text, AnswerCheck::Congruent { remainder: a, modulus: b })
}

fn reduction(lang: Language, random: &mut Random) -> Result<(String, AnswerCheck), GenerationError> {
    let x = random.int(100, 999);
    let n = random.int(2, 20);
    let text = localized(
        lang,
        format!("Reduce ${x}$ modulo ${n}$."),
        format!("Reduzieren Sie ${x}$ modulo ${n}$."),
    );
    Ok((text, AnswerCheck::Integer(normalize(x, n)?)))
}

fn exponentiation(lang: Language, random: &mut Random) -> Result<(String, AnswerCheck), GenerationError> {
    let a = random.int(2, 10);
    let b = random.int(2, 10);
    let n = random.int(2, 20);
    let text = localized(
        lang,
        format!("Calculate ${a}^{{{b}}} \\pmod{{ {n} }}$."),
        format!("Berechnen Sie ${a}^{{{b}}} \\pmod{{ {n} }}$."),
    );
    Ok((text, AnswerCheck::Integer(modular_exponentiation(a, b, n)?)))
}

impl ModTricksGenerator {
    fn inverse(&self, lang: Language, random: &mut Random) -> Result<(String, AnswerCheck), GenerationError> {
        let (a, n) = random.redraw(
            "coprime base and modulus",
            self.max_redraws,
            |r| (r.int(2, 15), r.int(2, 20)),
            |&(a, n)| are_coprime(a, n),
        )?;
        let text = localized(
            lang,
            format!("Find the modular inverse of ${a}$ modulo ${n}$."),
            format!("Finden Sie das Inverse von ${a}$ modulo ${n}$."),
        );
        Ok((text, AnswerCheck::Integer(modular_inverse(a, n)?)))
    }

    fn crt(&self, lang: Language, path: String, random: &mut Random) -> Result<Generated, GenerationError> {
        let count = random.int(2, 4) as usize;
        let mut congruences: Vec<Congruence> = Vec::with_capacity(count);
        for _ in 0..count {
            let remainder = random.int(1, 20);
            let modulus = random.redraw(
                "modulus coprime to the previous moduli",
                self.max_redraws,
                |r| r.int(2, 20),
                |&n| congruences.iter().all(|c| are_coprime(n, c.modulus)),
            )?;
            congruences.push(Congruence { remainder, modulus });
        }
        let solution = solve_crt(&congruences)?;

        let system = congruences
            .iter()
            .map(|c| format!("x ≡ {} \\pmod{{ {} }}", c.remainder, c.modulus))
            .collect::<Vec<_>>()
            .join(", \\\\");
        let text = localized(
            lang,
            format!("Solve the system of congruences: \\[ {system} \\text{{.}}\\]"),
            format!("Lösen Sie das System von Kongruenzen: \\[ {system} \\text{{.}}\\]"),
        );

        let question = FreeTextQuestion {
            prompt: Some("$x ≡ $".to_string()),
            bottom_text: Some(
                pick(
                    lang,
                    "Provide your answer in the form: $y\\pmod{z}$.",
                    "Geben Sie Ihre Antwort in der Form $y\\pmod{z}$ an.",
                )
                .to_string(),
            ),
            ..free_text(path, self.name(lang), text)
        };
        Ok(Generated {
            question: Question::FreeTextQuestion(question),
            feedback: Some(Evaluator::FreeText(FreeTextKey::new(
                lang,
                AnswerCheck::Residue { value: solution.value, modulus: solution.modulus },
            ))),
        })
    }
}
