//! Editable path programs
//!
//! A [`PathProgram`] is the unevaluated form of a path string: one
//! [`PathOp`] per instruction word, each keeping its operand tokens verbatim
//! (so `60 150 div atan w` survives an edit untouched). Programs serialize
//! back to path strings as `<operands...> <word>` per op, space-joined.

use std::fmt;

use bendkit_core::{format_number, BendError, BendResult};
use tracing::trace;

use crate::compiler::{evaluate, tokenize, Token, Word};

/// The instruction-producing words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    BarDiameter,
    BendDiameter,
    Length,
    Angle,
}

impl OpKind {
    pub fn from_word(word: Word) -> Option<Self> {
        match word {
            Word::BarDiameter => Some(Self::BarDiameter),
            Word::BendDiameter => Some(Self::BendDiameter),
            Word::Length => Some(Self::Length),
            Word::Angle => Some(Self::Angle),
            Word::Div | Word::Atan | Word::Neg => None,
        }
    }

    pub fn word(&self) -> Word {
        match self {
            Self::BarDiameter => Word::BarDiameter,
            Self::BendDiameter => Word::BendDiameter,
            Self::Length => Word::Length,
            Self::Angle => Word::Angle,
        }
    }

    /// `d` and `s` configure the bar; `l` and `w` shape it.
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::BarDiameter | Self::BendDiameter)
    }

    /// Name used in index errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BarDiameter | Self::BendDiameter => "setup",
            Self::Length => "segment",
            Self::Angle => "bend",
        }
    }
}

/// One instruction word with its operand tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOp {
    pub kind: OpKind,
    pub params: Vec<String>,
}

impl PathOp {
    pub fn new(kind: OpKind, params: Vec<String>) -> Self {
        Self { kind, params }
    }

    /// An op with a single numeric operand.
    pub fn literal(kind: OpKind, value: f64) -> Self {
        Self::new(kind, vec![format_number(value)])
    }

    /// Evaluate the operand expression.
    pub fn value(&self) -> BendResult<f64> {
        evaluate(&self.params, 0)
    }

    /// The same op with its operand negated.
    ///
    /// A lone literal is rewritten in place; an expression gets a trailing
    /// `neg`.
    pub fn negated(&self) -> Self {
        match self.params.as_slice() {
            [single] => match single.parse::<f64>() {
                Ok(value) if value.is_finite() => Self::literal(self.kind, -value),
                _ => self.with_neg(),
            },
            _ => self.with_neg(),
        }
    }

    fn with_neg(&self) -> Self {
        let mut params = self.params.clone();
        params.push(Word::Neg.symbol().to_string());
        Self::new(self.kind, params)
    }
}

impl fmt::Display for PathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for param in &self.params {
            write!(f, "{} ", param)?;
        }
        f.write_str(self.kind.word().symbol())
    }
}

/// A maximal run of setup ops followed by the segment ops they govern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub setup: Vec<PathOp>,
    pub segments: Vec<PathOp>,
}

/// Parsed, unevaluated path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathProgram {
    ops: Vec<PathOp>,
    /// Operand tokens after the last word; preserved on output.
    trailing: Vec<String>,
}

impl PathProgram {
    /// Parse a path string.
    ///
    /// Operand tokens are grouped by replaying the compiler's stack
    /// discipline on expressions rather than values: each word takes the
    /// expressions it would pop, so `60 150 div atan 5 l w` yields
    /// `5 l` and `60 150 div atan w`. Expressions nothing consumes become
    /// trailing operands.
    pub fn parse(path: &str) -> BendResult<Self> {
        let mut ops = Vec::new();
        let mut stack: Vec<Vec<String>> = Vec::new();

        for (position, text) in tokenize(path) {
            let word = match Token::classify(position, text)? {
                Token::Number(_) => {
                    stack.push(vec![text.to_string()]);
                    continue;
                }
                Token::Word(word) => word,
            };
            if stack.len() < word.arity() {
                return Err(BendError::malformed(
                    position,
                    text,
                    format!(
                        "'{}' needs {} operand(s), {} available",
                        word,
                        word.arity(),
                        stack.len()
                    ),
                ));
            }
            let mut params: Vec<String> = stack
                .drain(stack.len() - word.arity()..)
                .flatten()
                .collect();
            match OpKind::from_word(word) {
                Some(kind) => ops.push(PathOp::new(kind, params)),
                None => {
                    params.push(text.to_string());
                    stack.push(params);
                }
            }
        }

        let trailing: Vec<String> = stack.into_iter().flatten().collect();
        trace!(ops = ops.len(), trailing = trailing.len(), "parsed path program");
        Ok(Self { ops, trailing })
    }

    pub fn from_ops(ops: Vec<PathOp>) -> Self {
        Self {
            ops,
            trailing: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn trailing(&self) -> &[String] {
        &self.trailing
    }

    pub fn count(&self, kind: OpKind) -> usize {
        self.ops.iter().filter(|op| op.kind == kind).count()
    }

    /// Position in the op list of the `index`-th op of `kind`.
    pub fn position_of(&self, kind: OpKind, index: usize) -> BendResult<usize> {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| op.kind == kind)
            .nth(index)
            .map(|(position, _)| position)
            .ok_or(BendError::IndexOutOfRange {
                kind: kind.label(),
                index,
                count: self.count(kind),
            })
    }

    /// The `index`-th op of `kind`.
    pub fn nth(&self, kind: OpKind, index: usize) -> BendResult<&PathOp> {
        let position = self.position_of(kind, index)?;
        Ok(&self.ops[position])
    }

    /// Replace the operand of the `index`-th op of `kind` with `value`.
    pub fn set_value(&mut self, kind: OpKind, index: usize, value: f64) -> BendResult<()> {
        let position = self.position_of(kind, index)?;
        self.ops[position] = PathOp::literal(kind, value);
        Ok(())
    }

    /// Replace `range` of the op list with `replacement`.
    pub fn splice<I>(&mut self, range: std::ops::Range<usize>, replacement: I)
    where
        I: IntoIterator<Item = PathOp>,
    {
        self.ops.splice(range, replacement);
    }

    /// First `d` op, whose value sets the bar radius.
    pub fn bar_diameter(&self) -> Option<&PathOp> {
        self.ops.iter().find(|op| op.kind == OpKind::BarDiameter)
    }

    /// Last `s` op, whose value is in effect at the end of the path.
    pub fn bend_diameter(&self) -> Option<&PathOp> {
        self.ops
            .iter()
            .rev()
            .find(|op| op.kind == OpKind::BendDiameter)
    }

    /// Group ops into setup/segment blocks.
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut current = Block::default();
        for op in &self.ops {
            if op.kind.is_setup() {
                if !current.segments.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                current.setup.push(op.clone());
            } else {
                current.segments.push(op.clone());
            }
        }
        if !current.setup.is_empty() || !current.segments.is_empty() {
            blocks.push(current);
        }
        blocks
    }

    /// The program walked backwards.
    ///
    /// Block order and each block's segment ops are reversed, angles are
    /// negated, and every block keeps its setup ops ahead of its segments.
    pub fn reversed(&self) -> Self {
        let ops = self
            .blocks()
            .into_iter()
            .rev()
            .flat_map(|block| {
                let segments = block.segments.into_iter().rev().map(|op| match op.kind {
                    OpKind::Angle => op.negated(),
                    _ => op,
                });
                block.setup.into_iter().chain(segments)
            })
            .collect();
        Self {
            ops,
            trailing: self.trailing.clone(),
        }
    }
}

impl fmt::Display for PathProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .ops
            .iter()
            .map(ToString::to_string)
            .chain(self.trailing.iter().cloned())
            .collect::<Vec<_>>();
        f.write_str(&parts.join(" "))
    }
}
