//! French pseudocode generation.
//!
//! Produces the "algorithme" notation taught in French courses:
//!
//! ```text
//! Début
//!     x : Entier
//!     Pour i allant de 1 à 10 avec un pas de 1
//!         x ← x + i
//!     Fin Pour
//! Fin
//! ```

use crate::block::BlockKind;
use crate::ir::{FunctionSignature, Instruction, ScalarType};

use super::{Fragment, Target, TargetKind, Translation};

/// The pseudocode target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudocodeTarget;

/// Type table.
fn type_name(typ: ScalarType) -> &'static str {
    match typ {
        ScalarType::Int => "Entier",
        ScalarType::Float => "Réel",
        ScalarType::String => "Chaîne de caractères",
        ScalarType::Bool => "Booléen",
        ScalarType::Char => "Caractère",
        ScalarType::Void => "Rien",
    }
}

/// Name used in `Fin <name>`. Local variable sections have no closing line.
fn block_name(kind: BlockKind) -> Option<&'static str> {
    match kind {
        BlockKind::For => Some("Pour"),
        BlockKind::While => Some("Tant Que"),
        BlockKind::If => Some("Si"),
        BlockKind::Switch => Some("Selon"),
        BlockKind::Case => Some("Cas"),
        BlockKind::Default => Some("Autrement"),
        BlockKind::Function => Some("Fonction"),
        BlockKind::Procedure => Some("Procédure"),
        BlockKind::Locals => None,
    }
}

/// `label : text`, without a trailing space when there is no text.
fn labelled(label: &str, text: &str) -> String {
    if text.is_empty() {
        format!("{} :", label)
    } else {
        format!("{} : {}", label, text)
    }
}

fn signature(sig: &FunctionSignature) -> String {
    if sig.is_procedure() {
        let params: Vec<String> = sig
            .parameters
            .iter()
            .map(|p| format!("{} {}", type_name(p.typ), p.name))
            .collect();
        format!("Procédure {} ({})", sig.name, params.join(", "))
    } else {
        let params: Vec<String> = sig
            .parameters
            .iter()
            .map(|p| format!("{} : {}", p.name, type_name(p.typ)))
            .collect();
        format!(
            "Fonction {} ({}) : {}",
            sig.name,
            params.join(", "),
            type_name(sig.return_type)
        )
    }
}

impl Target for PseudocodeTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Pseudocode
    }

    fn tracks_locals(&self) -> bool {
        true
    }

    fn render(&self, instruction: &Instruction, closed: Option<BlockKind>) -> Vec<Fragment> {
        let text = match instruction {
            Instruction::Blank => String::new(),
            Instruction::Const(c) => format!("Constante : {} : {}", type_name(c.typ), c.definition),
            Instruction::Declare { typ, names } => {
                let plural = names.len() != 1 && *typ != ScalarType::String;
                format!(
                    "{} : {}{}",
                    names.join(", "),
                    type_name(*typ),
                    if plural { "s" } else { "" }
                )
            }
            Instruction::For(f) => format!(
                "Pour {} allant de {} à {} avec un pas de {}",
                f.var,
                f.from,
                f.to,
                f.step()
            ),
            Instruction::End => match closed.and_then(block_name) {
                Some(name) => format!("Fin {}", name),
                None => return Vec::new(),
            },
            Instruction::While { condition } => format!("Tant Que {}", condition),
            Instruction::If { condition } => format!("Si {}", condition),
            Instruction::Else => "Sinon".to_string(),
            Instruction::Elif { condition } => format!("Sinon Si {}", condition),
            Instruction::Switch { subject } => format!("SELON {}", subject),
            Instruction::Case { value } => format!("Cas {}", value),
            Instruction::Default { value } => labelled("Autrement", value),
            Instruction::Print { args } => format!("Afficher({})", args),
            Instruction::Input { args } => format!("Saisir({})", args),
            Instruction::Function(sig) => signature(sig),
            Instruction::Section { kind, text } => labelled(kind.label(), text),
            Instruction::Return { value } => format!("Retourner {}", value),
            Instruction::FxStart { text } => labelled("Début", text),
            Instruction::Vars { text } => labelled("Variables locales", text),
            Instruction::Array(a) => format!(
                "{} : tableau [ {} ] de type {}",
                a.name,
                a.size,
                type_name(a.typ).to_lowercase()
            ),
            Instruction::Assign { target, value } => format!("{} ← {}", target, value),
            Instruction::CompoundAssign {
                target,
                operator,
                value,
            } => format!("{} ← {} {} {}", target, target, operator, value),
            Instruction::Raw(text) => text.clone(),
        };

        vec![Fragment::line(text.trim_end())]
    }

    fn post_process(&self, text: &str) -> String {
        text.replace("(ENDL)", "(FIN DE LIGNE)")
    }

    fn assemble(&self, translation: &Translation, tab: &str) -> String {
        let mut code = String::from("Début\n");
        for line in &translation.main {
            if !line.text.is_empty() {
                code.push_str(tab);
                code.push_str(&line.indented(tab));
            }
            code.push('\n');
        }
        code.push_str("Fin");
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::translate_to_pseudocode;

    fn body(source: &[&str]) -> Vec<String> {
        let code = translate_to_pseudocode(source, "\t").unwrap();
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines.first(), Some(&"Début"));
        assert_eq!(lines.last(), Some(&"Fin"));
        lines[1..lines.len() - 1].iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_declarations() {
        assert_eq!(body(&["int x"]), vec!["\tx : Entier"]);
        assert_eq!(body(&["float a b"]), vec!["\ta, b : Réels"]);
        assert_eq!(body(&["string s t"]), vec!["\ts, t : Chaîne de caractères"]);
    }

    #[test]
    fn test_constant() {
        assert_eq!(body(&["const int N = 10"]), vec!["\tConstante : Entier : N = 10"]);
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(
            body(&["if x > 0", "print x", "elif x < 0", "print -x", "else", "print 0", "end"]),
            vec![
                "\tSi x > 0",
                "\t\tAfficher(x)",
                "\tSinon Si x < 0",
                "\t\tAfficher(-x)",
                "\tSinon",
                "\t\tAfficher(0)",
                "\tFin Si",
            ]
        );
    }

    #[test]
    fn test_switch() {
        assert_eq!(
            body(&["switch choix", "case 1", "print un", "end", "default", "print autre", "end", "end"]),
            vec![
                "\tSELON choix",
                "\t\tCas 1",
                "\t\t\tAfficher(un)",
                "\t\tFin Cas",
                "\t\tAutrement :",
                "\t\t\tAfficher(autre)",
                "\t\tFin Autrement",
                "\tFin Selon",
            ]
        );
    }

    #[test]
    fn test_while_and_input() {
        assert_eq!(
            body(&["while n > 0", "input n", "n -= 1", "end"]),
            vec!["\tTant Que n > 0", "\t\tSaisir(n)", "\t\tn ← n - 1", "\tFin Tant Que"]
        );
    }

    #[test]
    fn test_function_with_locals() {
        assert_eq!(
            body(&[
                "fx int somme int a &int b",
                "desc additionne deux entiers",
                "vars",
                "int s",
                "fx_start",
                "s = a + b",
                "return s",
                "end",
            ]),
            vec![
                "\tFonction somme (a : Entier, b : Entier) : Entier",
                "\t\tDescription : additionne deux entiers",
                "\t\tVariables locales :",
                "\t\t\ts : Entier",
                "\tDébut :",
                "\t\ts ← a + b",
                "\t\tRetourner s",
                "\tFin Fonction",
            ]
        );
    }

    #[test]
    fn test_procedure() {
        assert_eq!(
            body(&["fx void afficher string &msg", "print msg", "end"]),
            vec![
                "\tProcédure afficher (Chaîne de caractères msg)",
                "\t\tAfficher(msg)",
                "\tFin Procédure",
            ]
        );
    }

    #[test]
    fn test_end_of_locals_section_renders_nothing() {
        assert_eq!(
            body(&["fx void p", "vars", "int i", "end", "end"]),
            vec!["\tProcédure p ()", "\t\tVariables locales :", "\t\t\ti : Entier", "\tFin Procédure"]
        );
    }

    #[test]
    fn test_endl_and_blank_lines() {
        assert_eq!(
            body(&["print \"bonjour\" (ENDL)", "", "other text"]),
            vec!["\tAfficher(\"bonjour\" (FIN DE LIGNE))", "", "\tother text"]
        );
    }

    #[test]
    fn test_custom_tab() {
        let code = translate_to_pseudocode(&["if x", "print x", "end"], "  ").unwrap();
        assert_eq!(code, "Début\n  Si x\n    Afficher(x)\n  Fin Si\nFin");
    }
}
