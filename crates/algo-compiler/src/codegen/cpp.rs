//! C++ code generation.
//!
//! Function bodies are hoisted above `main`, builtins are mapped to their
//! `<math.h>`/`<stdlib.h>` equivalents and the required headers are added
//! from the builtins the source uses.

use crate::block::BlockKind;
use crate::ir::{FunctionSignature, Instruction, ScalarType};

use super::{Fragment, Target, TargetKind, Translation};

/// Builtin names of the source language and their C++ spelling.
const BUILTINS: &[(&str, &str)] = &[
    ("puissance(", "pow("),
    ("racine(", "sqrt("),
    ("aleatoire(", "rand("),
    ("(ENDL)", "\\n"),
];

/// The C++ target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppTarget {
    /// Emit `using namespace std;` and drop every `std::` qualifier.
    pub using_namespace_std: bool,
}

/// Type table.
fn type_name(typ: ScalarType) -> &'static str {
    match typ {
        ScalarType::Int => "int",
        ScalarType::Float => "float",
        ScalarType::String => "std::string",
        ScalarType::Bool => "bool",
        ScalarType::Char => "char",
        ScalarType::Void => "void",
    }
}

/// Replaces the boolean connectives `ET`, `OU` and `NON` in a condition.
fn condition(text: &str) -> String {
    text.split_whitespace()
        .map(|token| match token {
            "ET" => "&&",
            "OU" => "||",
            "NON" => "!",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn signature(sig: &FunctionSignature) -> String {
    let params: Vec<String> = sig
        .parameters
        .iter()
        .map(|p| {
            let reference = if p.by_ref { "&" } else { "" };
            format!("{} {}{}", type_name(p.typ), reference, p.name)
        })
        .collect();
    format!(
        "{} {}({}) {{",
        type_name(sig.return_type),
        sig.name,
        params.join(", ")
    )
}

/// A statement line, terminated by `;`.
fn statement(text: impl Into<String>) -> Fragment {
    let mut text = text.into();
    if !text.ends_with(';') {
        text.push(';');
    }
    Fragment::line(text)
}

fn comment(label: &str, text: &str) -> Fragment {
    Fragment::line(format!("// {} : {}", label, text).trim_end())
}

impl Target for CppTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Cpp
    }

    fn hoists_functions(&self) -> bool {
        true
    }

    fn render(&self, instruction: &Instruction, closed: Option<BlockKind>) -> Vec<Fragment> {
        let fragment = match instruction {
            Instruction::Blank | Instruction::FxStart { .. } => return Vec::new(),
            Instruction::Const(c) => statement(format!("const {} {}", type_name(c.typ), c.definition)),
            Instruction::Declare { typ, names } => {
                statement(format!("{} {}", type_name(*typ), names.join(", ")))
            }
            Instruction::For(f) => Fragment::line(format!(
                "for ({v} = {}; {v} <= {}; {v} += {}) {{",
                f.from,
                f.to,
                f.step(),
                v = f.var
            )),
            Instruction::End => match closed {
                Some(BlockKind::Case | BlockKind::Default) => Fragment::nested("break;"),
                _ => Fragment::line("}"),
            },
            Instruction::While { condition: c } => Fragment::line(format!("while ({}) {{", condition(c))),
            Instruction::If { condition: c } => Fragment::line(format!("if ({}) {{", condition(c))),
            Instruction::Else => Fragment::line("} else {"),
            Instruction::Elif { condition: c } => {
                Fragment::line(format!("}} else if ({}) {{", condition(c)))
            }
            Instruction::Switch { subject } => Fragment::line(format!("switch ({}) {{", subject)),
            Instruction::Case { value } => Fragment::line(format!("case {}:", value)),
            Instruction::Default { .. } => Fragment::line("default:"),
            Instruction::Print { args } => {
                statement(format!("std::cout << {}", args.replace(" & ", " << ")))
            }
            Instruction::Input { args } => {
                // Flush before reading so the prompt shows up first.
                return vec![
                    Fragment::line("std::cout << std::endl;"),
                    statement(format!("std::cin >> {}", args)),
                ];
            }
            Instruction::Function(sig) => Fragment::line(signature(sig)),
            Instruction::Section { kind, text } => comment(kind.label(), text),
            Instruction::Vars { text } => comment("Variables locales", text),
            Instruction::Return { value } if value.is_empty() => statement("return"),
            Instruction::Return { value } => statement(format!("return {}", value)),
            Instruction::Array(a) => statement(format!("{}[{}] {}", type_name(a.typ), a.size, a.name)),
            Instruction::Assign { target, value } => statement(format!("{} = {}", target, value)),
            Instruction::CompoundAssign {
                target,
                operator,
                value,
            } => statement(format!("{} {}= {}", target, operator, value)),
            Instruction::Raw(text) => statement(text.as_str()),
        };

        vec![fragment]
    }

    fn post_process(&self, text: &str) -> String {
        let mut text = BUILTINS
            .iter()
            .fold(text.to_string(), |acc, &(from, to)| acc.replace(from, to));
        if self.using_namespace_std {
            text = text.replace("std::", "");
        }
        text
    }

    fn assemble(&self, translation: &Translation, tab: &str) -> String {
        let features = translation.features;
        let mut code = String::from("#include <iostream>\n");
        if self.using_namespace_std {
            code.push_str("using namespace std;\n");
        }
        if features.uses_math {
            code.push_str("#include <math.h>\n");
        }
        if features.uses_random {
            code.push_str("#include <stdlib.h>\n#include <time.h>\n");
        }
        code.push('\n');

        let functions: Vec<String> = translation
            .functions
            .iter()
            .map(|line| line.indented(tab))
            .collect();
        code.push_str(&functions.join("\n"));

        code.push_str("\n\nint main() {\n");
        if features.uses_random {
            code.push_str(tab);
            code.push_str("srand(time(NULL));\n");
        }
        for line in translation.main.iter().filter(|line| !line.text.is_empty()) {
            code.push_str(tab);
            code.push_str(&line.indented(tab));
            code.push('\n');
        }
        code.push_str(tab);
        code.push_str("return 0;\n}");
        code
    }
}
