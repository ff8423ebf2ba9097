//! Code generation from `.algo` instructions.
//!
//! Both targets share one translation engine ([`engine`]): a single pass over
//! the source lines that maintains the block stack, validates nesting and
//! computes indentation. A [`Target`] only decides how each instruction is
//! spelled and how the translated lines are wrapped into a complete program:
//!
//! - [`PseudocodeTarget`]: French structured pseudocode (`Début ... Fin`)
//! - [`CppTarget`]: C++ with function bodies hoisted above `main`

mod cpp;
mod engine;
mod pseudocode;

pub use cpp::CppTarget;
pub use engine::{translate, EmittedLine, Translation};
pub use pseudocode::PseudocodeTarget;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::block::BlockKind;
use crate::config::CompilerConfig;
use crate::diagnostic::CompilerError;
use crate::ir::Instruction;

/// A language the compiler can generate.
pub trait Target {
    fn kind(&self) -> TargetKind;

    /// Whether `vars` opens a local variable section closed by `fx_start`.
    fn tracks_locals(&self) -> bool {
        false
    }

    /// Whether function bodies are moved out of the main line sequence.
    fn hoists_functions(&self) -> bool {
        false
    }

    /// Renders one instruction. `closed` is the block popped by an `end`.
    /// May return no fragment (the line vanishes) or several.
    fn render(&self, instruction: &Instruction, closed: Option<BlockKind>) -> Vec<Fragment>;

    /// Text substitutions applied to every rendered fragment.
    fn post_process(&self, text: &str) -> String;

    /// Wraps translated lines into a complete program.
    fn assemble(&self, translation: &Translation, tab: &str) -> String;
}

/// A rendered piece of a line, before indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Levels added on top of the line's block depth.
    pub extra_depth: usize,
}

impl Fragment {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra_depth: 0,
        }
    }

    pub fn nested(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra_depth: 1,
        }
    }
}

/// Builtins whose use changes the generated program prologue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceFeatures {
    /// `puissance(` or `racine(` appears in the source.
    pub uses_math: bool,
    /// `aleatoire(` appears in the source.
    pub uses_random: bool,
}

impl SourceFeatures {
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut features = Self::default();
        for line in lines {
            let line = line.as_ref();
            features.uses_math |= line.contains("puissance(") || line.contains("racine(");
            features.uses_random |= line.contains("aleatoire(");
        }
        features
    }
}

/// The supported targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// French pseudocode ("algorithme").
    #[default]
    #[serde(rename = "pseudo")]
    Pseudocode,
    /// C++ source.
    #[serde(rename = "cpp")]
    Cpp,
}

impl TargetKind {
    /// Extension used for generated files.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Pseudocode => "txt",
            Self::Cpp => "cpp",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pseudocode => "pseudo",
            Self::Cpp => "cpp",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetKind {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pseudo" | "pseudocode" | "algo" => Ok(Self::Pseudocode),
            "cpp" | "c++" | "cxx" => Ok(Self::Cpp),
            _ => Err(CompilerError::UnsupportedTarget {
                target: s.to_string(),
            }),
        }
    }
}

/// Generated program text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub target: TargetKind,
    pub text: String,
}

/// Translates source lines to French pseudocode.
pub fn translate_to_pseudocode<S: AsRef<str>>(lines: &[S], tab: &str) -> Result<String, CompilerError> {
    let target = PseudocodeTarget;
    let translation = translate(&target, lines)?;
    Ok(target.assemble(&translation, tab))
}

/// Translates source lines to C++. With `omit_namespace`, the program gets a
/// `using namespace std;` and every `std::` qualifier is dropped.
pub fn translate_to_cpp<S: AsRef<str>>(
    lines: &[S],
    tab: &str,
    omit_namespace: bool,
) -> Result<String, CompilerError> {
    let target = CppTarget {
        using_namespace_std: omit_namespace,
    };
    let translation = translate(&target, lines)?;
    Ok(target.assemble(&translation, tab))
}

/// Creates the target selected by the configuration.
pub fn create_target(config: &CompilerConfig) -> Box<dyn Target> {
    match config.target {
        TargetKind::Pseudocode => Box::new(PseudocodeTarget),
        TargetKind::Cpp => Box::new(CppTarget {
            using_namespace_std: config.using_namespace_std,
        }),
    }
}

/// Generates code for the configured target.
pub fn generate(source: &str, config: &CompilerConfig) -> Result<GeneratedCode, CompilerError> {
    let target = create_target(config);
    let lines = crate::frontend::source_lines(source);
    let translation = translate(target.as_ref(), &lines)?;
    Ok(GeneratedCode {
        target: target.kind(),
        text: target.assemble(&translation, &config.tab),
    })
}
