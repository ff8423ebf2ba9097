//! Instruction representation, one per source line.

use super::{Parameter, ScalarType};

/// A single translated unit: one source line, dispatched on its keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Empty or whitespace-only line.
    Blank,

    /// `const <type> <name> <rest...>`
    Const(ConstParams),

    /// `<type> <name>...`, e.g. `int a b`.
    Declare {
        typ: ScalarType,
        names: Vec<String>,
    },

    /// `for <var> <from> <to> [step]`
    For(ForParams),

    /// `end`, closes the innermost open block.
    End,

    /// `while <condition>`
    While { condition: String },

    /// `if <condition>`
    If { condition: String },

    /// `else`
    Else,

    /// `elif <condition>`
    Elif { condition: String },

    /// `switch <expression>`
    Switch { subject: String },

    /// `case <value>`
    Case { value: String },

    /// `default [text]`
    Default { value: String },

    /// `print <args...>`
    Print { args: String },

    /// `input <args...>`
    Input { args: String },

    /// `fx <return type> <name> (<type> <arg>)*`
    Function(FunctionSignature),

    /// Documentation labels: `precond`, `data`, `datar`, `result`, `desc`.
    Section { kind: SectionKind, text: String },

    /// `return <value>`
    Return { value: String },

    /// `fx_start [text]`, start of a function body.
    FxStart { text: String },

    /// `vars [text]`, start of a local variable section.
    Vars { text: String },

    /// `arr <type> <name> <size>`
    Array(ArrayParams),

    /// `<target> = <value>`
    Assign { target: String, value: String },

    /// `<target> <op>= <value>`, e.g. `x += 1`.
    CompoundAssign {
        target: String,
        operator: String,
        value: String,
    },

    /// Anything else, kept as written.
    Raw(String),
}

impl Instruction {
    /// Whether this line opens a block or sits at the level of its block's
    /// header (`else`, `elif`). Such lines are indented one level less than
    /// the block body.
    pub fn is_block_header(&self) -> bool {
        matches!(
            self,
            Instruction::For(_)
                | Instruction::While { .. }
                | Instruction::If { .. }
                | Instruction::Else
                | Instruction::Elif { .. }
                | Instruction::Switch { .. }
                | Instruction::Case { .. }
                | Instruction::Default { .. }
                | Instruction::Function(_)
        )
    }

    /// Whether this line delimits a function's local variable section.
    pub fn is_locals_marker(&self) -> bool {
        matches!(self, Instruction::Vars { .. } | Instruction::FxStart { .. })
    }
}

/// Parameters of a `const` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstParams {
    pub typ: ScalarType,
    /// Everything after the type: the name and, usually, `= value`.
    pub definition: String,
}

/// Parameters of a `for` loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForParams {
    pub var: String,
    pub from: String,
    pub to: String,
    pub step: Option<String>,
}

impl ForParams {
    /// The loop step, `1` when omitted.
    pub fn step(&self) -> &str {
        self.step.as_deref().unwrap_or("1")
    }
}

/// Header of a function (`fx int f ...`) or procedure (`fx void p ...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: ScalarType,
    pub parameters: Vec<Parameter>,
}

impl FunctionSignature {
    /// Procedures return nothing and may not contain `return`.
    pub fn is_procedure(&self) -> bool {
        self.return_type == ScalarType::Void
    }
}

/// Parameters of an `arr` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayParams {
    pub typ: ScalarType,
    pub name: String,
    pub size: String,
}

/// The documentation sections a function header may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Preconditions,
    Data,
    DataResult,
    Results,
    Description,
}

impl SectionKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "precond" => Some(Self::Preconditions),
            "data" => Some(Self::Data),
            "datar" => Some(Self::DataResult),
            "result" => Some(Self::Results),
            "desc" => Some(Self::Description),
            _ => None,
        }
    }

    /// The French label used by both targets.
    pub fn label(self) -> &'static str {
        match self {
            Self::Preconditions => "Préconditions",
            Self::Data => "Données",
            Self::DataResult => "Donnée/Résultat",
            Self::Results => "Résultats",
            Self::Description => "Description",
        }
    }
}
