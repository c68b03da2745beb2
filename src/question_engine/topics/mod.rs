//! Topic generators, one [`QuestionGenerator`] per module.
//!
//! Every generator follows the same flow:
//!
//! ```ignore
//! fn generate(&self, lang, parameters, seed) -> Result<Generated, GenerationError> {
//!     let path = prepare(self, lang, parameters, seed)?;      // validate + permalink
//!     let variant: Variant = variant_param(self, parameters, "variant")?;
//!     let mut random = Random::new(seed);                     // only after validation
//!     ...
//! }
//! ```
//!
//! [`QuestionGenerator`]: crate::question_engine::generator::QuestionGenerator

/// `avl`: insert one or two keys into an AVL tree (`balance` none/rotate).
pub mod avl;
/// `bst`: insert, delete, in-order neighbour.
pub mod bst;
/// `modtricks`: simple, reduction, inverse, exponentiation, crt.
pub mod mod_tricks;
/// `stack`: return values of an operation sequence, final state.
pub mod stack;
