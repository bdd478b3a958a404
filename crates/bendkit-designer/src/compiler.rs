//! Path string compiler
//!
//! Reduces a whitespace-delimited token stream into typed [`Instruction`]s.
//! Numbers are pushed onto an operand stack; words pop their operands and
//! either emit an instruction or rewrite the stack.
//!
//! The active bar and bend radius are tracked in a [`CompilerState`] carried
//! alongside the stack during the single forward pass.

use std::collections::VecDeque;
use std::fmt;

use bendkit_core::{deg2rad, rad2deg, BendError, BendResult};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::instruction::Instruction;

/// Words of the path language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Word {
    /// `d` - bar diameter
    BarDiameter,
    /// `s` - bend diameter
    BendDiameter,
    /// `l` - straight length
    Length,
    /// `w` - bend angle in degrees
    Angle,
    /// `div` - `n d div` pushes `n / d`
    Div,
    /// `atan` - arctangent, result in degrees
    Atan,
    /// `neg` - negation
    Neg,
}

impl Word {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "d" => Some(Self::BarDiameter),
            "s" => Some(Self::BendDiameter),
            "l" => Some(Self::Length),
            "w" => Some(Self::Angle),
            "div" => Some(Self::Div),
            "atan" => Some(Self::Atan),
            "neg" => Some(Self::Neg),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::BarDiameter => "d",
            Self::BendDiameter => "s",
            Self::Length => "l",
            Self::Angle => "w",
            Self::Div => "div",
            Self::Atan => "atan",
            Self::Neg => "neg",
        }
    }

    /// Operands consumed from the stack.
    pub fn arity(&self) -> usize {
        match self {
            Self::Div => 2,
            _ => 1,
        }
    }

    /// Words that produce an instruction rather than a stack value.
    pub fn is_instruction(&self) -> bool {
        matches!(
            self,
            Self::BarDiameter | Self::BendDiameter | Self::Length | Self::Angle
        )
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A classified token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Word(Word),
}

impl Token {
    /// Classify `text`, which sits at token `position` of its path.
    pub fn classify(position: usize, text: &str) -> BendResult<Self> {
        if let Some(word) = Word::parse(text) {
            return Ok(Token::Word(word));
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Number(value)),
            Ok(_) => Err(BendError::malformed(position, text, "number is not finite")),
            Err(_) => Err(BendError::malformed(position, text, "unknown token")),
        }
    }
}

/// Split a path string into positioned tokens.
pub fn tokenize(path: &str) -> impl Iterator<Item = (usize, &str)> {
    path.split_whitespace().enumerate()
}

/// Pending numeric operands.
#[derive(Debug, Default)]
pub struct OperandStack {
    values: SmallVec<[f64; 8]>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pop one operand on behalf of `word`.
    pub fn pop_for(&mut self, position: usize, word: Word) -> BendResult<f64> {
        let available = self.values.len();
        self.values.pop().ok_or_else(|| {
            BendError::malformed(
                position,
                word.symbol(),
                format!(
                    "'{}' needs {} operand(s), {} available",
                    word,
                    word.arity(),
                    available
                ),
            )
        })
    }

    /// Apply an arithmetic word in place. Instruction words are ignored.
    pub fn apply(&mut self, position: usize, word: Word) -> BendResult<()> {
        if word.is_instruction() {
            return Ok(());
        }
        if self.values.len() < word.arity() {
            return Err(BendError::malformed(
                position,
                word.symbol(),
                format!(
                    "'{}' needs {} operand(s), {} available",
                    word,
                    word.arity(),
                    self.values.len()
                ),
            ));
        }
        match word {
            Word::Div => {
                let d = self.pop_for(position, word)?;
                let n = self.pop_for(position, word)?;
                self.push(n / d);
            }
            Word::Atan => {
                let value = self.pop_for(position, word)?;
                self.push(rad2deg(value.atan()));
            }
            Word::Neg => {
                let value = self.pop_for(position, word)?;
                self.push(-value);
            }
            Word::BarDiameter | Word::BendDiameter | Word::Length | Word::Angle => {}
        }
        Ok(())
    }

    /// Pop the final value of an expression.
    pub fn pop(&mut self) -> Option<f64> {
        self.values.pop()
    }
}

/// Radii in effect at the current point of compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompilerState {
    /// Set by the first `d`; later `d` words do not override it.
    pub bar_radius: Option<f64>,
    /// Set by the latest `s`.
    pub bend_radius: Option<f64>,
}

impl CompilerState {
    pub fn bar_radius(&self) -> f64 {
        self.bar_radius.unwrap_or(0.0)
    }

    /// Centerline bend radius (bend + bar), zero when no `s` has been read.
    pub fn effective_bend_radius(&self) -> f64 {
        self.bend_radius
            .map(|radius| radius + self.bar_radius())
            .unwrap_or(0.0)
    }
}

/// Miter compensation for a corner of `angle` degrees on a bar of `bar_radius`.
pub fn miter_shift(bar_radius: f64, angle: f64) -> f64 {
    (bar_radius * deg2rad(angle / 2.0).tan()).abs()
}

/// Straight distance consumed on each side of a radiused bend.
pub fn tangent_length(radius: f64, angle: f64) -> f64 {
    radius / (deg2rad(180.0 - angle.abs()) / 2.0).tan()
}

/// Compile a path string into its instruction list.
pub fn compile(path: &str) -> BendResult<Vec<Instruction>> {
    let mut instructions: VecDeque<Instruction> = VecDeque::new();
    let mut stack = OperandStack::new();
    let mut state = CompilerState::default();
    let mut token_count = 0;

    for (position, text) in tokenize(path) {
        token_count += 1;
        let word = match Token::classify(position, text)? {
            Token::Number(value) => {
                stack.push(value);
                continue;
            }
            Token::Word(word) => word,
        };

        match word {
            Word::BarDiameter => {
                let radius = stack.pop_for(position, word)? / 2.0;
                state.bar_radius.get_or_insert(radius);
                instructions.push_front(Instruction::BarRadius { radius });
            }
            Word::BendDiameter => {
                let radius = stack.pop_for(position, word)? / 2.0;
                state.bend_radius = Some(radius);
                instructions.push_back(Instruction::BendRadius { radius });
            }
            Word::Length => {
                let projected_length = stack.pop_for(position, word)?;
                let instruction = forward(instructions.back(), projected_length);
                instructions.push_back(instruction);
            }
            Word::Angle => {
                let angle = stack.pop_for(position, word)?;
                let instruction = corner(&state, instructions.back_mut(), angle);
                trace!(?instruction, "compiled corner");
                instructions.push_back(instruction);
            }
            Word::Div | Word::Atan | Word::Neg => stack.apply(position, word)?,
        }
    }

    if !stack.is_empty() {
        debug!(leftover = stack.len(), "ignoring unconsumed operands");
    }
    debug!(
        tokens = token_count,
        instructions = instructions.len(),
        "compiled bend path"
    );

    Ok(instructions.into())
}

fn forward(previous: Option<&Instruction>, projected_length: f64) -> Instruction {
    let (length, pivot_length) = match previous {
        Some(Instruction::Turn { shift, .. }) => {
            let length = projected_length - shift;
            (length, length)
        }
        Some(Instruction::Bend {
            length_to_tangent,
            shift,
            ..
        }) => (
            projected_length - length_to_tangent - shift,
            projected_length - shift,
        ),
        _ => (projected_length, projected_length),
    };
    Instruction::Forward {
        length,
        projected_length,
        pivot_length,
    }
}

fn corner(state: &CompilerState, previous: Option<&mut Instruction>, angle: f64) -> Instruction {
    let bend_radius = state.effective_bend_radius();
    let shift = miter_shift(state.bar_radius(), angle);
    let length_to_tangent = if bend_radius == 0.0 {
        None
    } else {
        Some(tangent_length(bend_radius, angle))
    };

    if let Some(Instruction::Forward {
        length,
        pivot_length,
        ..
    }) = previous
    {
        *length -= shift;
        *pivot_length -= shift;
        if let Some(tangent) = length_to_tangent {
            *length -= tangent;
        }
    }

    match length_to_tangent {
        None => Instruction::Turn { angle, shift },
        Some(length_to_tangent) => Instruction::Bend {
            angle,
            length_to_tangent,
            shift,
            radius: bend_radius,
        },
    }
}

/// Evaluate an operand expression such as `["60", "150", "div", "atan"]`.
///
/// `offset` is the token position of the first operand, used in errors.
pub fn evaluate<S: AsRef<str>>(tokens: &[S], offset: usize) -> BendResult<f64> {
    let mut stack = OperandStack::new();
    for (index, text) in tokens.iter().enumerate() {
        let text = text.as_ref();
        let position = offset + index;
        match Token::classify(position, text)? {
            Token::Number(value) => stack.push(value),
            Token::Word(word) if word.is_instruction() => {
                return Err(BendError::malformed(
                    position,
                    text,
                    "instruction word inside an operand expression",
                ));
            }
            Token::Word(word) => {
                stack.apply(position, word)?;
            }
        }
    }
    let last = tokens.last().map(|t| t.as_ref().to_string()).unwrap_or_default();
    stack.pop().ok_or_else(|| {
        BendError::malformed(offset + tokens.len(), last, "operand expression is empty")
    })
}
