use std::str::FromStr;

use crate::question_engine::{
    config::EngineConfig,
    error::GenerationError,
    evaluator::{AnswerCheck, Evaluator, FreeTextKey},
    generator::{prepare, variant_param, Generated, QuestionGenerator},
    helpers::{free_text, level_order_table, localized, pick},
    models::{Language, Question},
    oracles::{
        avl::{AvlSequence, Balance},
        BinaryTree,
    },
    params::{ExpectedParameter, Parameters},
    random::Random,
};

const TREE_SIZE_MIN: i64 = 5;
const TREE_SIZE_MAX: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Insert,
    Combine,
}

impl Variant {
    fn asks(self) -> usize {
        match self {
            Variant::Insert  => 1,
            Variant::Combine => 2,
        }
    }
}

impl FromStr for Variant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert"  => Ok(Variant::Insert),
            "combine" => Ok(Variant::Combine),
            _         => Err(()),
        }
    }
}

/// "Insert these keys, give the resulting tree" on AVL trees, with or
/// without rebalancing.
pub struct AvlGenerator {
    max_redraws: usize,
}

impl AvlGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        AvlGenerator { max_redraws: config.max_redraws }
    }
}

impl QuestionGenerator for AvlGenerator {
    fn id(&self) -> &'static str {
        "avl"
    }

    fn name(&self, lang: Language) -> String {
        pick(lang, "AVL Tree", "AVL-Baum").to_string()
    }

    fn description(&self, lang: Language) -> String {
        pick(lang, "Operation on AVL Trees", "Operationen auf AVL-Bäumen").to_string()
    }

    fn tags(&self) -> &'static [&'static str] {
        &["avl", "tree"]
    }

    fn expected_parameters(&self) -> Vec<ExpectedParameter> {
        vec![
            ExpectedParameter::choice("variant", &["insert", "combine"]),
            ExpectedParameter::choice("balance", &["none", "rotate"]),
        ]
    }

    fn generate(&self, lang: Language, parameters: &Parameters, seed: &str) -> Result<Generated, GenerationError> {
        let path = prepare(self, lang, parameters, seed)?;
        let variant: Variant = variant_param(self, parameters, "variant")?;
        let balance: Balance = variant_param(self, parameters, "balance")?;

        let mut random = Random::new(seed);
        let size = random.int(TREE_SIZE_MIN, TREE_SIZE_MAX) as usize;
        let sequence = AvlSequence::build(&mut random, size, variant.asks(), balance, self.max_redraws)?;

        let table = level_order_table(lang, &sequence.before.level_order());
        let calls = sequence
            .asked
            .iter()
            .map(|k| format!("**Insert({k})**"))
            .collect::<Vec<_>>()
            .join(pick(lang, " and ", " und "));
        let (tree, rule) = match balance {
            Balance::Rotate => (
                pick(lang, "an AVL tree", "ein AVL-Baum"),
                pick(
                    lang,
                    "Rebalance with rotations after every insertion.",
                    "Nach jedem Einfügen wird mit Rotationen rebalanciert.",
                ),
            ),
            // Without rotations the tree need not satisfy the AVL condition.
            Balance::None => (
                pick(lang, "a binary search tree", "ein binärer Suchbaum"),
                pick(
                    lang,
                    "Do not rebalance; insert as in a plain binary search tree.",
                    "Es wird nicht rebalanciert; eingefügt wird wie in einem einfachen binären Suchbaum.",
                ),
            ),
        };
        let text = localized(
            lang,
            format!(
                "Below is {tree} in level order, `-` marking empty children: {table}\n\
                 We call {calls} in this order. {rule} Give the resulting tree in the same format."
            ),
            format!(
                "Unten abgebildet ist {tree} in Level-Order, `-` markiert leere Kinder: {table}\n\
                 Wir rufen {calls} in dieser Reihenfolge auf. {rule} Gib den Baum, der dadurch \
                 entsteht, im selben Format an."
            ),
        );

        let mut question = free_text(path, self.name(lang), text);
        question.placeholder = Some("8, 3, 10, -, 6".to_string());
        Ok(Generated {
            question: Question::FreeTextQuestion(question),
            feedback: Some(Evaluator::FreeText(FreeTextKey::new(
                lang,
                AnswerCheck::LevelOrder(sequence.after.level_order()),
            ))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(variant: &str, balance: &str, seed: &str) -> Generated {
        AvlGenerator::new(&EngineConfig::default())
            .generate(
                Language::En,
                &Parameters::new().with("variant", variant).with("balance", balance),
                seed,
            )
            .unwrap()
    }

    fn inserted_keys(generated: &Generated) -> usize {
        let key = generated.feedback.as_ref().and_then(Evaluator::as_free_text).unwrap();
        let AnswerCheck::LevelOrder(after) = key.check() else { panic!("expected a level-order check") };
        after.iter().flatten().count()
    }

    #[test]
    fn combine_asks_for_two_insertions() {
        for seed in ["x", "y", "z"] {
            let single = inserted_keys(&generate("insert", "rotate", seed));
            let double = inserted_keys(&generate("combine", "rotate", seed));
            assert!((6..=13).contains(&single));
            assert_eq!(double, single + 1, "same tree, one more key (seed={seed})");
            assert_eq!(generate("combine", "none", seed).question.text().map(|t| t.matches("Insert(").count()), Some(2));
        }
    }

    #[test]
    fn balance_changes_the_wording() {
        let rotate = generate("insert", "rotate", "w");
        let plain = generate("insert", "none", "w");
        assert!(rotate.question.text().unwrap_or_default().contains("rotations"));
        assert!(plain.question.text().unwrap_or_default().contains("Do not rebalance"));
    }

    #[test]
    fn unbalanced_variant_does_not_call_the_tree_avl() {
        for lang in Language::ALL {
            let params = Parameters::new().with("variant", "combine").with("balance", "none");
            let plain = AvlGenerator::new(&EngineConfig::default()).generate(lang, &params, "w").unwrap();
            let text = plain.question.text().unwrap_or_default();
            assert!(!text.contains("AVL tree") && !text.contains("AVL-Baum"), "{text}");
            assert!(text.contains("binary search tree") || text.contains("binärer Suchbaum"));
        }
        let rotate = generate("insert", "rotate", "w");
        assert!(rotate.question.text().unwrap_or_default().starts_with("Below is an AVL tree"));
    }

    #[test]
    fn missing_balance_is_rejected() {
        let err = AvlGenerator::new(&EngineConfig::default())
            .generate(Language::En, &Parameters::new().with("variant", "insert"), "seed")
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidParameters(_)));
    }
}
