use std::str::FromStr;

use crate::question_engine::{
    config::EngineConfig,
    error::GenerationError,
    evaluator::{AnswerCheck, ChoiceKey, Evaluator, FreeTextKey},
    generator::{prepare, variant_param, Generated, QuestionGenerator},
    helpers::{free_text, level_order_table, localized, multiple_choice, pick},
    models::{Language, Question},
    oracles::{bst::BstTree, BinaryTree},
    params::{ExpectedParameter, Parameters},
    random::Random,
};

const TREE_SIZE_MIN: i64 = 7;
const TREE_SIZE_MAX: i64 = 12;
const KEY_MIN: i64 = 1;
const KEY_MAX: i64 = 100;
const NEIGHBOR_OPTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Insert,
    Delete,
    Neighbor,
}

impl FromStr for Variant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert"   => Ok(Variant::Insert),
            "delete"   => Ok(Variant::Delete),
            "neighbor" => Ok(Variant::Neighbor),
            _          => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Successor,
    Predecessor,
}

/// Binary search tree questions: state after Insert/Delete, or the in-order
/// neighbour of a key.
pub struct BstGenerator {
    max_redraws: usize,
}

impl BstGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        BstGenerator { max_redraws: config.max_redraws }
    }
}

impl QuestionGenerator for BstGenerator {
    fn id(&self) -> &'static str {
        "bst"
    }

    fn name(&self, lang: Language) -> String {
        pick(lang, "Binary Search Tree", "Binärer Suchbaum").to_string()
    }

    fn description(&self, lang: Language) -> String {
        pick(
            lang,
            "Determine the BST state after various operations",
            "Bestimme den Binären-Suchbaum-Zustand nach verschiedenen Operationen",
        )
        .to_string()
    }

    fn tags(&self) -> &'static [&'static str] {
        &["binary search tree", "bst", "bst-insert", "bst-delete", "inorder-traversal"]
    }

    fn expected_parameters(&self) -> Vec<ExpectedParameter> {
        vec![ExpectedParameter::choice("variant", &["insert", "delete", "neighbor"])]
    }

    fn generate(&self, lang: Language, parameters: &Parameters, seed: &str) -> Result<Generated, GenerationError> {
        let path = prepare(self, lang, parameters, seed)?;
        let variant: Variant = variant_param(self, parameters, "variant")?;

        let mut random = Random::new(seed);
        let size = random.int(TREE_SIZE_MIN, TREE_SIZE_MAX) as usize;
        let tree = BstTree::random(&mut random, size, KEY_MIN..=KEY_MAX);

        match variant {
            Variant::Insert   => self.insert_question(lang, path, random, tree),
            Variant::Delete   => Ok(self.delete_question(lang, path, random, tree)),
            Variant::Neighbor => Ok(self.neighbor_question(lang, path, random, tree)),
        }
    }
}

fn operation_text(lang: Language, tree: &BstTree, call: &str) -> String {
    let table = level_order_table(lang, &tree.level_order());
    localized(
        lang,
        format!(
            "Below is a binary search tree (without balancing requirement) in level order, \
             `-` marking empty children: {table}\nWe call **{call}**. Give the state as an array \
             in the same format that results from this."
        ),
        format!(
            "Unten abgebildet ist ein binärer Suchbaum (ohne Balancierungsanspruch) in \
             Level-Order, `-` markiert leere Kinder: {table}\nWir rufen **{call}** auf. Gib den \
             Zustand als Array im selben Format an, der dadurch entsteht."
        ),
    )
}

fn state_question(lang: Language, path: String, name: String, text: String, after: &BstTree) -> Generated {
    let mut question = free_text(path, name, text);
    question.placeholder = Some("8, 3, 10, -, 6".to_string());
    Generated {
        question: Question::FreeTextQuestion(question),
        feedback: Some(Evaluator::FreeText(FreeTextKey::new(
            lang,
            AnswerCheck::LevelOrder(after.level_order()),
        ))),
    }
}

impl BstGenerator {
    fn insert_question(
        &self,
        lang: Language,
        path: String,
        mut random: Random,
        mut tree: BstTree,
    ) -> Result<Generated, GenerationError> {
        let key = random.redraw(
            "key absent from the tree",
            self.max_redraws,
            |r| r.int(KEY_MIN, KEY_MAX),
            |k| !tree.contains(*k),
        )?;
        let text = operation_text(lang, &tree, &format!("Insert({key})"));
        tree.insert(key);
        Ok(state_question(lang, path, self.name(lang), text, &tree))
    }

    fn delete_question(&self, lang: Language, path: String, mut random: Random, mut tree: BstTree) -> Generated {
        let key = *random.choice(&tree.in_order());
        let text = operation_text(lang, &tree, &format!("Delete({key})"));
        tree.delete(key);
        state_question(lang, path, self.name(lang), text, &tree)
    }

    fn neighbor_question(&self, lang: Language, path: String, mut random: Random, tree: BstTree) -> Generated {
        let direction = *random.choice(&[Direction::Successor, Direction::Predecessor]);
        let keys = tree.in_order();

        // The largest key has no successor and the smallest no predecessor.
        let candidates: Vec<(i64, i64)> = keys
            .iter()
            .filter_map(|&key| {
                let id = tree.find(key)?;
                let neighbor = match direction {
                    Direction::Successor   => tree.successor(id),
                    Direction::Predecessor => tree.predecessor(id),
                };
                neighbor.map(|n| (key, tree.key(n)))
            })
            .collect();
        let (key, correct) = *random.choice(&candidates);

        let others: Vec<i64> = keys.iter().copied().filter(|&k| k != key && k != correct).collect();
        let mut options = random.subset(&others, NEIGHBOR_OPTIONS - 1);
        options.push(correct);
        random.shuffle(&mut options);
        let correct_index = options.iter().position(|&k| k == correct).unwrap_or_default();

        let table = level_order_table(lang, &tree.level_order());
        let text = match direction {
            Direction::Successor => localized(
                lang,
                format!("Consider the following binary search tree in level order: {table}\nWhich key is the **successor** of {key}?"),
                format!("Betrachte den folgenden binären Suchbaum in Level-Order: {table}\nWelcher Schlüssel ist der **Nachfolger** von {key}?"),
            ),
            Direction::Predecessor => localized(
                lang,
                format!("Consider the following binary search tree in level order: {table}\nWhich key is the **predecessor** of {key}?"),
                format!("Betrachte den folgenden binären Suchbaum in Level-Order: {table}\nWelcher Schlüssel ist der **Vorgänger** von {key}?"),
            ),
        };

        Generated {
            question: multiple_choice(
                path,
                self.name(lang),
                text,
                options.iter().map(|k| k.to_string()).collect(),
            ),
            feedback: Some(Evaluator::MultipleChoice(ChoiceKey::single(lang, correct_index))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_engine::models::{FreeTextAnswer, MultipleChoiceAnswer};

    fn generate(variant: &str, seed: &str) -> Generated {
        BstGenerator::new(&EngineConfig::default())
            .generate(Language::En, &Parameters::new().with("variant", variant), seed)
            .unwrap()
    }

    #[test]
    fn insert_answer_contains_one_more_key() {
        for seed in ["1", "2", "3", "bst"] {
            let generated = generate("insert", seed);
            let key = generated.feedback.as_ref().and_then(Evaluator::as_free_text).unwrap();
            let AnswerCheck::LevelOrder(after) = key.check() else { panic!("expected a level-order check") };
            let present = after.iter().flatten().count();
            assert!((8..=13).contains(&present), "{present} keys after insert (seed={seed})");
            assert_eq!(
                key.evaluate(&FreeTextAnswer::new(key.reference_answer())).correct,
                Some(true)
            );
        }
    }

    #[test]
    fn delete_answer_contains_one_key_less() {
        for seed in ["1", "2", "3", "bst"] {
            let generated = generate("delete", seed);
            let key = generated.feedback.as_ref().and_then(Evaluator::as_free_text).unwrap();
            let AnswerCheck::LevelOrder(after) = key.check() else { panic!("expected a level-order check") };
            let present = after.iter().flatten().count();
            assert!((6..=11).contains(&present), "{present} keys after delete (seed={seed})");
        }
    }

    #[test]
    fn neighbor_offers_four_distinct_options_with_one_correct() {
        for seed in ["a", "b", "c", "d", "e"] {
            let generated = generate("neighbor", seed);
            let Question::MultipleChoiceQuestion(q) = &generated.question else {
                panic!("neighbor must be multiple choice");
            };
            assert_eq!(q.answers.len(), NEIGHBOR_OPTIONS);
            let mut distinct = q.answers.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), NEIGHBOR_OPTIONS, "duplicate options for seed={seed}");

            let key = generated.feedback.as_ref().and_then(Evaluator::as_choice).unwrap();
            let right = key.correct_choice()[0];
            assert_eq!(key.evaluate(&MultipleChoiceAnswer { choice: vec![right] }).correct, Some(true));
            let wrong = (right + 1) % NEIGHBOR_OPTIONS;
            assert_eq!(key.evaluate(&MultipleChoiceAnswer { choice: vec![wrong] }).correct, Some(false));
        }
    }

    #[test]
    fn unknown_variant_is_rejected_before_generation() {
        let err = BstGenerator::new(&EngineConfig::default())
            .generate(Language::En, &Parameters::new().with("variant", "rotate"), "seed")
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidParameters(_)));
    }
}
