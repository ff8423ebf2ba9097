//! Frontend: turns `.algo` source lines into [`Instruction`]s.
//!
//! Each line is whitespace-split into a keyword (first token) and its
//! parameters. Keywords with a fixed shape (`for`, `arr`, `fx`, ...) are
//! checked for arity and known types here, so code generators can rely on
//! well-formed instructions.

use crate::diagnostic::CompilerError;
use crate::ir::{
    ArrayParams, ConstParams, ForParams, FunctionSignature, Instruction, Parameter, ScalarType,
    SectionKind,
};

/// File extension of source files.
pub const SOURCE_EXTENSION: &str = "algo";

/// Comparison operators that end in `=` but are not compound assignments.
const COMPARISON_OPERATORS: &[&str] = &["==", "<=", ">=", "!="];

/// Splits source text into lines, dropping `\r` from CRLF endings.
pub fn source_lines(source: &str) -> Vec<&str> {
    source.lines().collect()
}

/// Parses one source line. `line` is the 1-based line number used in errors.
pub fn parse_line(line: usize, text: &str) -> Result<Instruction, CompilerError> {
    let mut tokens = text.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(Instruction::Blank);
    };
    let params: Vec<&str> = tokens.collect();
    let rest = || params.join(" ");

    let instruction = match keyword {
        "const" => {
            require(keyword, &params, 2, line)?;
            Instruction::Const(ConstParams {
                typ: value_type(params[0], line)?,
                definition: params[1..].join(" "),
            })
        }
        "for" => {
            require(keyword, &params, 3, line)?;
            Instruction::For(ForParams {
                var: params[0].to_string(),
                from: params[1].to_string(),
                to: params[2].to_string(),
                step: params.get(3).map(|s| s.to_string()),
            })
        }
        "end" => Instruction::End,
        "while" => Instruction::While { condition: rest() },
        "if" => Instruction::If { condition: rest() },
        "else" => Instruction::Else,
        "elif" => Instruction::Elif { condition: rest() },
        "switch" => Instruction::Switch { subject: rest() },
        "case" => Instruction::Case { value: rest() },
        "default" => Instruction::Default { value: rest() },
        "print" => Instruction::Print { args: rest() },
        "input" => Instruction::Input { args: rest() },
        "fx" => Instruction::Function(parse_signature(&params, line)?),
        "return" => Instruction::Return { value: rest() },
        "fx_start" => Instruction::FxStart { text: rest() },
        "vars" => Instruction::Vars { text: rest() },
        "arr" => {
            require(keyword, &params, 3, line)?;
            Instruction::Array(ArrayParams {
                typ: value_type(params[0], line)?,
                name: params[1].to_string(),
                size: params[2].to_string(),
            })
        }
        _ => {
            if let Some(kind) = SectionKind::from_keyword(keyword) {
                Instruction::Section { kind, text: rest() }
            } else if let Some(typ) = ScalarType::from_keyword(keyword) {
                let names: Vec<String> = params
                    .iter()
                    .map(|name| name.trim_end_matches(','))
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                if names.is_empty() {
                    return Err(missing(keyword, line));
                }
                Instruction::Declare { typ, names }
            } else {
                parse_fallback(keyword, &params, text)
            }
        }
    };

    Ok(instruction)
}

/// Lines that don't start with a keyword: assignments, or anything else
/// passed through unchanged.
fn parse_fallback(keyword: &str, params: &[&str], text: &str) -> Instruction {
    match params.split_first() {
        Some((&"=", value)) => Instruction::Assign {
            target: keyword.to_string(),
            value: value.join(" "),
        },
        Some((op, value)) if is_compound_operator(op) => Instruction::CompoundAssign {
            target: keyword.to_string(),
            operator: op[..op.len() - 1].to_string(),
            value: value.join(" "),
        },
        _ => Instruction::Raw(text.trim().to_string()),
    }
}

fn is_compound_operator(op: &str) -> bool {
    op.len() > 1 && op.ends_with('=') && !COMPARISON_OPERATORS.contains(&op)
}

/// `fx <return type> <name> (<type> <arg>)*`
fn parse_signature(params: &[&str], line: usize) -> Result<FunctionSignature, CompilerError> {
    require("fx", params, 2, line)?;

    let return_type = ScalarType::from_return_keyword(params[0]).ok_or_else(|| {
        CompilerError::UnknownType {
            type_name: params[0].to_string(),
            line,
        }
    })?;

    let mut parameters = Vec::new();
    for pair in params[2..].chunks(2) {
        let [typ, name] = pair else {
            return Err(missing("fx", line));
        };
        let by_ref = typ.starts_with('&') || name.starts_with('&');
        parameters.push(Parameter {
            name: name.trim_start_matches('&').to_string(),
            typ: value_type(typ.trim_start_matches('&'), line)?,
            by_ref,
        });
    }

    Ok(FunctionSignature {
        name: params[1].to_string(),
        return_type,
        parameters,
    })
}

fn value_type(keyword: &str, line: usize) -> Result<ScalarType, CompilerError> {
    ScalarType::from_keyword(keyword).ok_or_else(|| CompilerError::UnknownType {
        type_name: keyword.to_string(),
        line,
    })
}

fn require(keyword: &str, params: &[&str], count: usize, line: usize) -> Result<(), CompilerError> {
    if params.len() < count {
        return Err(missing(keyword, line));
    }
    Ok(())
}

fn missing(keyword: &str, line: usize) -> CompilerError {
    CompilerError::MissingParameters {
        keyword: keyword.to_string(),
        line,
    }
}
