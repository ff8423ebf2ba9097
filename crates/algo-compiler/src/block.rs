//! Block stack: tracks the nested constructs open at the current line.
//!
//! The depth of the stack drives indentation, and its contents decide which
//! keywords are legal (`case` needs a `switch`, `return` needs a function).

use crate::diagnostic::CompilerError;
use crate::ir::{FunctionSignature, Instruction};

/// Kind of an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    For,
    While,
    If,
    Switch,
    Case,
    Default,
    /// Function with a return value (`fx int ...`).
    Function,
    /// Function without a return value (`fx void ...`).
    Procedure,
    /// Local variable section of a function (`vars`), closed by `fx_start`.
    Locals,
}

impl BlockKind {
    /// The block an instruction opens, if any. `Locals` is not included:
    /// only targets that track local sections push it.
    pub fn opened_by(instruction: &Instruction) -> Option<Self> {
        match instruction {
            Instruction::For(_) => Some(Self::For),
            Instruction::While { .. } => Some(Self::While),
            Instruction::If { .. } => Some(Self::If),
            Instruction::Switch { .. } => Some(Self::Switch),
            Instruction::Case { .. } => Some(Self::Case),
            Instruction::Default { .. } => Some(Self::Default),
            Instruction::Function(sig) => Some(Self::for_signature(sig)),
            _ => None,
        }
    }

    pub fn for_signature(sig: &FunctionSignature) -> Self {
        if sig.is_procedure() {
            Self::Procedure
        } else {
            Self::Function
        }
    }

    pub fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Procedure)
    }
}

/// Stack of open blocks, innermost last.
#[derive(Debug, Default)]
pub struct BlockStack {
    blocks: Vec<BlockKind>,
}

impl BlockStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: BlockKind) {
        self.blocks.push(kind);
    }

    /// Closes the innermost block. `line` is reported if nothing is open.
    pub fn pop(&mut self, line: usize) -> Result<BlockKind, CompilerError> {
        self.blocks.pop().ok_or(CompilerError::UnmatchedEnd { line })
    }

    pub fn top(&self) -> Option<BlockKind> {
        self.blocks.last().copied()
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        self.blocks.contains(&kind)
    }

    /// Whether any function or procedure body is open.
    pub fn in_callable(&self) -> bool {
        self.blocks.iter().any(|kind| kind.is_callable())
    }

    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
