//! LIFO stack with the four textbook operations, and a runner that replays
//! an operation sequence while recording every return value.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::question_engine::error::OracleError;

/// One stack operation as shown to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum StackOp {
    Push(i64),
    Pop,
    Top,
    IsEmpty,
}

impl fmt::Display for StackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackOp::Push(value) => write!(f, "S.push({value})"),
            StackOp::Pop         => write!(f, "S.pop()"),
            StackOp::Top         => write!(f, "S.top()"),
            StackOp::IsEmpty     => write!(f, "S.isEmpty()"),
        }
    }
}

/// What a non-`push` operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackValue {
    Number(i64),
    Bool(bool),
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Number(n) => write!(f, "{n}"),
            StackValue::Bool(b)   => write!(f, "{b}"),
        }
    }
}

/// Elements bottom to top; the top is the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[i64]) -> Self {
        Stack { items: items.to_vec() }
    }

    pub fn items(&self) -> &[i64] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: i64) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<i64, OracleError> {
        self.items.pop().ok_or(OracleError::EmptyStack("pop"))
    }

    pub fn top(&self) -> Result<i64, OracleError> {
        self.items.last().copied().ok_or(OracleError::EmptyStack("top"))
    }

    /// Apply one operation. `push` returns nothing.
    pub fn apply(&mut self, op: StackOp) -> Result<Option<StackValue>, OracleError> {
        Ok(match op {
            StackOp::Push(value) => {
                self.push(value);
                None
            }
            StackOp::Pop     => Some(StackValue::Number(self.pop()?)),
            StackOp::Top     => Some(StackValue::Number(self.top()?)),
            StackOp::IsEmpty => Some(StackValue::Bool(self.is_empty())),
        })
    }
}

/// Result of replaying a sequence on a starting stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRun {
    pub initial: Vec<i64>,
    pub ops: Vec<StackOp>,
    /// Return values of the non-`push` operations, in order.
    pub returns: Vec<StackValue>,
    pub final_state: Vec<i64>,
}

/// Replay `ops` on a stack holding `initial`. Fails on the first `pop` or
/// `top` against an empty stack.
pub fn run(initial: &[i64], ops: &[StackOp]) -> Result<StackRun, OracleError> {
    let mut stack = Stack::from_items(initial);
    let mut returns = Vec::new();
    for &op in ops {
        returns.extend(stack.apply(op)?);
    }
    Ok(StackRun {
        initial: initial.to_vec(),
        ops: ops.to_vec(),
        returns,
        final_state: stack.items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn operations_follow_lifo_order() {
        let run = run(
            &[4],
            &[StackOp::Push(7), StackOp::Top, StackOp::Pop, StackOp::Pop, StackOp::IsEmpty, StackOp::Push(2)],
        )
        .unwrap();
        assert_eq!(
            run.returns,
            vec![
                StackValue::Number(7),
                StackValue::Number(7),
                StackValue::Number(4),
                StackValue::Bool(true),
            ]
        );
        assert_eq!(run.final_state, vec![2]);
    }

    #[test]
    fn pop_and_top_on_empty_stack_are_rejected() {
        assert_eq!(run(&[], &[StackOp::Pop]).unwrap_err(), OracleError::EmptyStack("pop"));
        assert_eq!(
            run(&[1], &[StackOp::Pop, StackOp::Top]).unwrap_err(),
            OracleError::EmptyStack("top")
        );
        assert_eq!(run(&[], &[StackOp::IsEmpty]).unwrap().returns, vec![StackValue::Bool(true)]);
    }

    #[test]
    fn display_matches_the_rendered_call() {
        assert_eq!(StackOp::Push(-3).to_string(), "S.push(-3)");
        assert_eq!(StackOp::IsEmpty.to_string(), "S.isEmpty()");
        assert_eq!(StackValue::Bool(false).to_string(), "false");
    }

    proptest! {
        #[test]
        fn pushes_then_pops_reverse_the_input(values in proptest::collection::vec(-50i64..50, 0..20)) {
            let mut ops: Vec<StackOp> = values.iter().map(|&v| StackOp::Push(v)).collect();
            ops.extend(std::iter::repeat(StackOp::Pop).take(values.len()));
            let run = run(&[], &ops).unwrap();
            let popped: Vec<StackValue> = values.iter().rev().map(|&v| StackValue::Number(v)).collect();
            prop_assert_eq!(run.returns, popped);
            prop_assert!(run.final_state.is_empty());
        }
    }
}
