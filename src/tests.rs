//! Unit tests for the `algo_drill_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same call → identical question and evaluator; different seeds → varied output |
//! | Pinned questions | Fixed permalinks per generator keep their text and reference answer |
//! | Permalinks | Path is stable, decodes to the original call, regenerates the same question |
//! | Feedback | Reference answer is correct; a different answer is incorrect; garbage is invalid |
//! | Validation | Unknown generator, missing/unknown/disallowed parameters, seeds with `/` |
//! | Languages | `en` and `de` differ in wording only |
//! | JSON | Questions survive a JSON round trip with the `type` tag |

use crate::question_engine::{
    evaluator::{AnswerCheck, Evaluator},
    models::{question_from_json, question_to_json, FreeTextAnswer, Language, MultipleChoiceAnswer, Question},
    EngineConfig, GenerationError, Generated, ParameterError, Parameters, PermalinkError, Registry,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn registry() -> Registry {
    Registry::standard(&EngineConfig::default())
}

/// Every generator with every valid parameter combination.
fn all_calls() -> Vec<(&'static str, Parameters)> {
    let mut calls = Vec::new();
    for variant in ["insert", "delete", "neighbor"] {
        calls.push(("bst", Parameters::new().with("variant", variant)));
    }
    for variant in ["insert", "combine"] {
        for balance in ["none", "rotate"] {
            calls.push(("avl", Parameters::new().with("variant", variant).with("balance", balance)));
        }
    }
    for variant in ["simple", "reduction", "inverse", "exponentiation", "crt"] {
        calls.push(("modtricks", Parameters::new().with("variant", variant)));
    }
    for variant in ["start", "sequence1"] {
        calls.push(("stack", Parameters::new().with("variant", variant)));
    }
    calls
}

/// Seeds that span different RNG states, including the empty seed.
const SEEDS: [&str; 6] = ["", "1", "42", "seed-with-dashes", "Ünïcödé seed", "0xDEADBEEF"];

fn generate(id: &str, params: &Parameters, lang: Language, seed: &str) -> Generated {
    registry()
        .generate(id, lang, params, seed)
        .unwrap_or_else(|err| panic!("{id} {params:?} {lang} {seed:?}: {err}"))
}

/// An answer guaranteed to differ from the evaluator's reference answer.
fn wrong_answer(check: &AnswerCheck) -> String {
    match check {
        AnswerCheck::Congruent { remainder, modulus } => (remainder + 1).rem_euclid(*modulus).to_string(),
        AnswerCheck::Integer(n)                       => (n + 1).to_string(),
        AnswerCheck::Residue { value, modulus }       => format!("{} (mod {modulus})", (value + 1) % modulus),
        AnswerCheck::LevelOrder(levels)               => {
            let mut keys: Vec<String> = levels.iter().flatten().map(|k| k.to_string()).collect();
            keys.push("1000".into());
            keys.join(", ")
        }
        AnswerCheck::ReturnValues(values) => {
            let mut tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            tokens.push("1000".into());
            tokens.join(", ")
        }
        AnswerCheck::Values(values) => {
            let mut tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            tokens.push("1000".into());
            tokens.join(", ")
        }
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_call_produces_identical_question() {
    for (id, params) in all_calls() {
        for lang in Language::ALL {
            for seed in SEEDS {
                let a = generate(id, &params, lang, seed);
                let b = generate(id, &params, lang, seed);
                assert_eq!(a, b, "non-deterministic output for {id} {params:?} {lang} {seed:?}");
            }
        }
    }
}

#[test]
fn separate_registries_agree() {
    let a = Registry::standard(&EngineConfig::default());
    let b = Registry::standard(&EngineConfig::default());
    for (id, params) in all_calls() {
        assert_eq!(
            a.generate(id, Language::De, &params, "shared").unwrap(),
            b.generate(id, Language::De, &params, "shared").unwrap(),
        );
    }
}

#[test]
fn different_seeds_vary_the_output() {
    for (id, params) in all_calls() {
        let texts: std::collections::BTreeSet<String> = (0..20)
            .map(|i| {
                let generated = generate(id, &params, Language::En, &format!("vary-{i}"));
                generated.question.text().unwrap_or_default().to_string()
            })
            .collect();
        assert!(texts.len() > 1, "{id} {params:?} ignores the seed");
    }
}

// ── pinned questions ─────────────────────────────────────────────────────────

/// Regenerate `path` and return the evaluator's reference answer.
fn pinned(path: &str) -> (Generated, String) {
    let generated = registry()
        .regenerate(path)
        .unwrap_or_else(|err| panic!("{path}: {err}"));
    let key = generated.feedback.as_ref().and_then(Evaluator::as_free_text).unwrap();
    let reference = key.reference_answer();
    (generated, reference)
}

#[test]
fn published_permalinks_keep_their_answers() {
    let cases = [
        ("/en/modtricks/crt/42", "111 (mod 204)", "x ≡ 3 \\pmod{ 12 }, \\\\x ≡ 9 \\pmod{ 17 }"),
        (
            "/en/bst/insert/golden",
            "59, 19, 70, -, 25, -, 78, -, 43, -, 85, -, 53",
            "**Insert(53)**",
        ),
        (
            "/en/avl/insert/rotate/golden",
            "37, 30, 69, 12, 33, 56, 99, 8, 23, -, 35, 53, 62",
            "**Insert(35)**",
        ),
        (
            "/en/avl/combine/none/golden",
            "37, 33, 69, 8, 35, 62, 99, -, 12, -, -, 53, -, -, -, 10, 23, -, 56, -, -, -, 30",
            "**Insert(35)** and **Insert(10)**",
        ),
        ("/en/stack/start/5", "13, 5, 5, true", "4. `S.isEmpty()`"),
        ("/en/stack/sequence1/4", "2, 13, 2, 3", "`S.push(2)`, `S.push(15)`, `S.pop()`"),
    ];
    for (path, answer, excerpt) in cases {
        let (generated, reference) = pinned(path);
        assert_eq!(reference, answer, "{path}");
        let text = generated.question.text().unwrap_or_default();
        assert!(text.contains(excerpt), "{path}: {text}");
    }
}

// ── permalinks ───────────────────────────────────────────────────────────────

#[test]
fn path_encodes_the_call() {
    let generated = generate("avl", &Parameters::new().with("balance", "rotate").with("variant", "combine"), Language::De, "abc");
    assert_eq!(generated.question.path(), "/de/avl/combine/rotate/abc");

    let generated = generate("modtricks", &Parameters::new().with("variant", "crt"), Language::En, "");
    assert_eq!(generated.question.path(), "/en/modtricks/crt/");
}

#[test]
fn regenerating_from_path_yields_the_same_question() {
    let registry = registry();
    for (id, params) in all_calls() {
        for lang in Language::ALL {
            for seed in SEEDS {
                let generated = registry.generate(id, lang, &params, seed).unwrap();
                let call = registry.decode(generated.question.path()).unwrap();
                assert_eq!(call.generator, id);
                assert_eq!(call.lang, lang);
                assert_eq!(call.parameters, params);
                assert_eq!(call.seed, seed);
                assert_eq!(registry.regenerate(generated.question.path()).unwrap(), generated);
            }
        }
    }
}

#[test]
fn malformed_permalinks_are_rejected() {
    let registry = registry();
    for path in [
        "",
        "en/bst/insert/1",
        "/en/bst/1",
        "/en/bst/insert/extra/1",
        "/en/bst/rotate/1",
        "/en/modtricks",
    ] {
        assert!(registry.decode(path).is_err(), "{path:?} should be rejected");
        assert!(registry.regenerate(path).is_err(), "{path:?} should not regenerate");
    }
    assert_eq!(
        registry.decode("/fr/bst/insert/1").unwrap_err(),
        PermalinkError::UnknownLanguage("fr".into())
    );
    assert_eq!(
        registry.decode("/en/heap/insert/1").unwrap_err(),
        PermalinkError::UnknownGenerator("heap".into())
    );
}

// ── feedback ─────────────────────────────────────────────────────────────────

#[test]
fn reference_answer_is_correct_and_other_answers_are_not() {
    for (id, params) in all_calls() {
        for lang in Language::ALL {
            for seed in SEEDS {
                let generated = generate(id, &params, lang, seed);
                match generated.feedback.as_ref() {
                    Some(Evaluator::FreeText(key)) => {
                        let right = key.evaluate(&FreeTextAnswer::new(key.reference_answer()));
                        assert_eq!(right.correct, Some(true), "{}", generated.question.path());
                        assert!(key.check_format(&FreeTextAnswer::new(key.reference_answer())).valid);

                        let wrong = key.evaluate(&FreeTextAnswer::new(wrong_answer(key.check())));
                        assert_eq!(wrong.correct, Some(false), "{}", generated.question.path());

                        let garbage = key.evaluate(&FreeTextAnswer::new("not an answer"));
                        assert_eq!(garbage.correct, Some(false));
                        assert!(!key.check_format(&FreeTextAnswer::new("not an answer")).valid);
                    }
                    Some(Evaluator::MultipleChoice(key)) => {
                        let Question::MultipleChoiceQuestion(q) = &generated.question else {
                            panic!("choice key on a free-text question");
                        };
                        let correct: Vec<usize> = (0..q.answers.len())
                            .filter(|&i| key.evaluate(&MultipleChoiceAnswer { choice: vec![i] }).correct == Some(true))
                            .collect();
                        assert_eq!(correct, key.correct_choice(), "exactly one option is correct");
                    }
                    None => panic!("{} has no evaluator", generated.question.path()),
                }
            }
        }
    }
}

#[test]
fn feedback_uses_the_question_language() {
    let params = Parameters::new().with("variant", "simple");
    let de = generate("modtricks", &params, Language::De, "7");
    let key = de.feedback.as_ref().and_then(Evaluator::as_free_text).unwrap();
    let feedback = key.evaluate(&FreeTextAnswer::new(key.reference_answer()));
    assert_eq!(feedback.feedback_text.as_deref(), Some("Richtig!"));
}

// ── validation ───────────────────────────────────────────────────────────────

#[test]
fn invalid_parameters_are_rejected() {
    let registry = registry();
    let cases = [
        ("bst", Parameters::new()),
        ("bst", Parameters::new().with("variant", "rotate")),
        ("bst", Parameters::new().with("variant", 3i64)),
        ("bst", Parameters::new().with("variant", "insert").with("size", 9i64)),
        ("avl", Parameters::new().with("variant", "insert").with("balance", "sometimes")),
        ("modtricks", Parameters::new().with("variant", "Simple")),
    ];
    for (id, params) in cases {
        let err = registry.generate(id, Language::En, &params, "seed").unwrap_err();
        assert!(
            matches!(err, GenerationError::InvalidParameters(_)),
            "{id} {params:?} gave {err:?}"
        );
    }
    assert_eq!(
        registry
            .generate("bst", Language::En, &Parameters::new().with("variant", "insert").with("size", 9i64), "s")
            .unwrap_err(),
        GenerationError::InvalidParameters(ParameterError::Unknown("size".into()))
    );
}

#[test]
fn seed_with_slash_is_rejected() {
    let err = registry()
        .generate("modtricks", Language::En, &Parameters::new().with("variant", "simple"), "a/b")
        .unwrap_err();
    assert_eq!(err, GenerationError::Permalink(PermalinkError::InvalidSeed("a/b".into())));
}

#[test]
fn tiny_redraw_cap_surfaces_exhaustion() {
    let registry = Registry::standard(&EngineConfig { max_redraws: 0 });
    let err = registry
        .generate("avl", Language::En, &Parameters::new().with("variant", "insert").with("balance", "none"), "1")
        .unwrap_err();
    assert!(matches!(err, GenerationError::RedrawsExhausted { .. }), "{err:?}");
}

// ── languages ────────────────────────────────────────────────────────────────

#[test]
fn languages_change_wording_not_the_exercise() {
    for (id, params) in all_calls() {
        let en = generate(id, &params, Language::En, "lang");
        let de = generate(id, &params, Language::De, "lang");
        assert_ne!(en.question.text(), de.question.text(), "{id} {params:?}");
        assert_ne!(en.question.path(), de.question.path());

        let check = |g: &Generated| match g.feedback.as_ref() {
            Some(Evaluator::FreeText(key))      => format!("{:?}", key.check()),
            Some(Evaluator::MultipleChoice(key)) => format!("{:?}", key.correct_choice()),
            None                                  => String::new(),
        };
        assert_eq!(check(&en), check(&de), "{id} {params:?}: ground truth depends on language");
    }
}

#[test]
fn generator_metadata_is_localized() {
    let registry = registry();
    for id in registry.ids() {
        let generator = registry.get(id).unwrap();
        assert_eq!(generator.id(), id);
        assert!(!generator.tags().is_empty());
        assert_ne!(generator.name(Language::En), "");
        assert_ne!(generator.description(Language::De), "");
        assert_eq!(generator.languages(), &Language::ALL);
    }
}

// ── JSON ─────────────────────────────────────────────────────────────────────

#[test]
fn questions_survive_json_round_trip() {
    for (id, params) in all_calls() {
        let generated = generate(id, &params, Language::En, "json");
        let json = question_to_json(&generated.question).unwrap();
        let expected_tag = match generated.question {
            Question::MultipleChoiceQuestion(_) => "\"type\": \"MultipleChoiceQuestion\"",
            Question::FreeTextQuestion(_)       => "\"type\": \"FreeTextQuestion\"",
        };
        assert!(json.contains(expected_tag), "{json}");
        assert!(json.contains("\"path\""));
        assert_eq!(question_from_json(&json).unwrap(), generated.question);
    }
}
