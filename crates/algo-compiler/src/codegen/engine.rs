//! The shared single-pass translation engine.
//!
//! Lines are processed strictly in order, once. For each line the engine:
//! 1. parses it into an [`Instruction`]
//! 2. checks it is legal in the current block context
//! 3. applies its effect on the block stack
//! 4. computes its indentation depth
//! 5. lets the target render and post-process it
//! 6. stores the result in the main sequence or, for hoisting targets while a
//!    function is open, in the function sequence
//!
//! The first error aborts the pass; nothing translated so far is returned.

use crate::block::{BlockKind, BlockStack};
use crate::diagnostic::CompilerError;
use crate::frontend;
use crate::ir::Instruction;

use super::{SourceFeatures, Target};

/// A translated line, before indentation is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedLine {
    /// Indentation level.
    pub depth: usize,
    pub text: String,
}

impl EmittedLine {
    /// Renders the line with `depth` copies of `tab`. Empty lines stay empty.
    pub fn indented(&self, tab: &str) -> String {
        if self.text.is_empty() {
            String::new()
        } else {
            format!("{}{}", tab.repeat(self.depth), self.text)
        }
    }
}

/// Result of the translation pass, ready for assembly.
#[derive(Debug, Default)]
pub struct Translation {
    /// Lines of the main program, in source order.
    pub main: Vec<EmittedLine>,
    /// Hoisted function bodies, each followed by an empty line.
    pub functions: Vec<EmittedLine>,
    pub features: SourceFeatures,
}

/// Runs the translation pass for `target`.
pub fn translate<T, S>(target: &T, lines: &[S]) -> Result<Translation, CompilerError>
where
    T: Target + ?Sized,
    S: AsRef<str>,
{
    let mut stack = BlockStack::new();
    let mut translation = Translation {
        features: SourceFeatures::detect(lines),
        ..Translation::default()
    };

    for (index, text) in lines.iter().enumerate() {
        let line = index + 1;
        let instruction = frontend::parse_line(line, text.as_ref())?;

        check_context(&instruction, &stack, line)?;
        let closed = apply_stack_effect(target, &instruction, &mut stack, line)?;

        let header = instruction.is_block_header()
            || (target.tracks_locals() && instruction.is_locals_marker());
        let depth = stack.depth().saturating_sub(usize::from(header));

        let closes_callable = closed.is_some_and(BlockKind::is_callable);
        let hoisted = target.hoists_functions() && (stack.in_callable() || closes_callable);
        let buffer = if hoisted {
            &mut translation.functions
        } else {
            &mut translation.main
        };

        for fragment in target.render(&instruction, closed) {
            buffer.push(EmittedLine {
                depth: depth + fragment.extra_depth,
                text: target.post_process(&fragment.text),
            });
        }

        if hoisted && closes_callable {
            buffer.push(EmittedLine {
                depth: 0,
                text: String::new(),
            });
        }
    }

    Ok(translation)
}

/// Rejects keywords used outside the block they belong to.
fn check_context(instruction: &Instruction, stack: &BlockStack, line: usize) -> Result<(), CompilerError> {
    match instruction {
        Instruction::Case { .. } | Instruction::Default { .. } if !stack.contains(BlockKind::Switch) => {
            let keyword = if matches!(instruction, Instruction::Case { .. }) {
                "case"
            } else {
                "default"
            };
            Err(CompilerError::OutsideSwitch {
                keyword: keyword.to_string(),
                line,
            })
        }
        Instruction::Return { .. } if stack.contains(BlockKind::Procedure) => {
            Err(CompilerError::ReturnInProcedure { line })
        }
        Instruction::Return { .. } if !stack.contains(BlockKind::Function) => {
            Err(CompilerError::ReturnOutsideFunction { line })
        }
        _ => Ok(()),
    }
}

/// Pushes or pops the block stack. Returns the block closed by an `end`.
fn apply_stack_effect<T: Target + ?Sized>(
    target: &T,
    instruction: &Instruction,
    stack: &mut BlockStack,
    line: usize,
) -> Result<Option<BlockKind>, CompilerError> {
    match instruction {
        Instruction::End => return stack.pop(line).map(Some),
        Instruction::Vars { .. } if target.tracks_locals() => stack.push(BlockKind::Locals),
        Instruction::FxStart { .. } if target.tracks_locals() => {
            if stack.top() == Some(BlockKind::Locals) {
                stack.pop(line)?;
            }
        }
        other => {
            if let Some(kind) = BlockKind::opened_by(other) {
                stack.push(kind);
            }
        }
    }
    Ok(None)
}
