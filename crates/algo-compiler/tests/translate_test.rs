use std::path::PathBuf;

use algo_compiler::{
    translate_to_cpp, translate_to_pseudocode, Compiler, CompilerConfig, CompilerError, TargetKind,
};

fn lines(source: &str) -> Vec<&str> {
    source.lines().collect()
}

#[test]
fn simple_program_in_both_targets() {
    let source = lines("int x\nx = 5\nprint x");

    let pseudo = translate_to_pseudocode(&source, "\t").unwrap();
    assert_eq!(pseudo, "Début\n\tx : Entier\n\tx ← 5\n\tAfficher(x)\nFin");

    let cpp = translate_to_cpp(&source, "\t", false).unwrap();
    assert_eq!(
        cpp,
        "#include <iostream>\n\n\n\nint main() {\n\tint x;\n\tx = 5;\n\tstd::cout << x;\n\treturn 0;\n}"
    );
}

#[test]
fn for_loop_header() {
    let pseudo = translate_to_pseudocode(&["for i 1 10", "end"], "\t").unwrap();
    assert!(pseudo.contains("\tPour i allant de 1 à 10 avec un pas de 1\n"));

    let cpp = translate_to_cpp(&["for i 1 10", "end"], "\t", false).unwrap();
    assert!(cpp.contains("\tfor (i = 1; i <= 10; i += 1) {\n"));
}

#[test]
fn array_declaration() {
    let pseudo = translate_to_pseudocode(&["arr int nums 10"], "\t").unwrap();
    assert!(pseudo.contains("nums : tableau [ 10 ] de type entier"));

    let cpp = translate_to_cpp(&["arr int nums 10"], "\t", false).unwrap();
    assert!(cpp.contains("int[10] nums;"));
}

#[test]
fn array_errors_abort_both_targets() {
    for source in [&["int x", "arr int nums"][..], &["int x", "arr real nums 3"][..]] {
        let pseudo = translate_to_pseudocode(source, "\t").unwrap_err();
        let cpp = translate_to_cpp(source, "\t", false).unwrap_err();
        assert_eq!(pseudo, cpp);
        assert_eq!(pseudo.line(), Some(2));
    }
}

#[test]
fn case_outside_switch() {
    let source = ["int x", "if x > 1", "case 1", "end"];
    for err in [
        translate_to_pseudocode(&source, "\t").unwrap_err(),
        translate_to_cpp(&source, "\t", false).unwrap_err(),
    ] {
        assert_eq!(err.line(), Some(3));
        let message = err.to_string();
        assert!(message.contains("case"));
        assert!(message.contains("switch"));
    }
}

#[test]
fn return_in_procedure() {
    let source = ["fx void p int a", "if a > 0", "return a", "end", "end"];
    for err in [
        translate_to_pseudocode(&source, "\t").unwrap_err(),
        translate_to_cpp(&source, "\t", false).unwrap_err(),
    ] {
        assert_eq!(err, CompilerError::ReturnInProcedure { line: 3 });
        let message = err.to_string();
        assert!(message.contains("return"));
        assert!(message.contains("procedure"));
    }
}

#[test]
fn return_outside_function() {
    let source = ["int x", "return x"];
    for err in [
        translate_to_pseudocode(&source, "\t").unwrap_err(),
        translate_to_cpp(&source, "\t", false).unwrap_err(),
    ] {
        assert_eq!(err.line(), Some(2));
        let message = err.to_string();
        assert!(message.contains("return"));
        assert!(message.contains("function"));
    }
}

#[test]
fn builtins_in_cpp() {
    let cpp = translate_to_cpp(&["x = puissance(2 3)"], "\t", false).unwrap();
    assert!(cpp.contains("pow(2 3)"));
    assert!(!cpp.contains("puissance("));
    assert!(cpp.contains("#include <math.h>"));
    assert!(!cpp.contains("srand"));

    let cpp = translate_to_cpp(&["x = aleatoire(10)"], "\t", false).unwrap();
    assert!(cpp.contains("#include <stdlib.h>"));
    assert!(cpp.contains("#include <time.h>"));
    assert!(cpp.contains("int main() {\n\tsrand(time(NULL));\n"));
}

#[test]
fn closing_lines_match_their_openers() {
    let source = ["for i 1 3", "if i > 1", "print i", "end", "end"];

    let pseudo = translate_to_pseudocode(&source, "\t").unwrap();
    let pseudo: Vec<&str> = pseudo.lines().collect();
    assert_eq!(pseudo[1], "\tPour i allant de 1 à 3 avec un pas de 1");
    assert_eq!(pseudo[2], "\t\tSi i > 1");
    assert_eq!(pseudo[3], "\t\t\tAfficher(i)");
    assert_eq!(pseudo[4], "\t\tFin Si");
    assert_eq!(pseudo[5], "\tFin Pour");

    let cpp = translate_to_cpp(&source, "\t", false).unwrap();
    assert!(cpp.contains("\tfor (i = 1; i <= 3; i += 1) {\n\t\tif (i > 1) {\n\t\t\tstd::cout << i;\n\t\t}\n\t}\n"));
}

#[test]
fn complete_program_with_function() {
    let source = "\
fx int factorielle int n
desc calcule n!
vars
int r i
fx_start
r = 1
for i 2 n
r *= i
end
return r
end

int n
input n
print factorielle(n) & (ENDL)
";

    let compiler = Compiler::new(CompilerConfig {
        target: TargetKind::Cpp,
        using_namespace_std: true,
        ..CompilerConfig::default()
    });
    let generated = compiler.compile_source(source).unwrap();
    assert_eq!(
        generated.text,
        "#include <iostream>\n\
         using namespace std;\n\
         \n\
         int factorielle(int n) {\n\
         \t// Description : calcule n!\n\
         \t// Variables locales :\n\
         \tint r, i;\n\
         \tr = 1;\n\
         \tfor (i = 2; i <= n; i += 1) {\n\
         \t\tr *= i;\n\
         \t}\n\
         \treturn r;\n\
         }\n\
         \n\
         \n\
         int main() {\n\
         \tint n;\n\
         \tcout << endl;\n\
         \tcin >> n;\n\
         \tcout << factorielle(n) << \\n;\n\
         \treturn 0;\n\
         }"
    );

    let compiler = Compiler::new(CompilerConfig::default());
    let generated = compiler.compile_source(source).unwrap();
    assert_eq!(
        generated.text,
        "Début\n\
         \tFonction factorielle (n : Entier) : Entier\n\
         \t\tDescription : calcule n!\n\
         \t\tVariables locales :\n\
         \t\t\tr, i : Entiers\n\
         \tDébut :\n\
         \t\tr ← 1\n\
         \t\tPour i allant de 2 à n avec un pas de 1\n\
         \t\t\tr ← r * i\n\
         \t\tFin Pour\n\
         \t\tRetourner r\n\
         \tFin Fonction\n\
         \n\
         \tn : Entier\n\
         \tSaisir(n)\n\
         \tAfficher(factorielle(n) & (FIN DE LIGNE))\n\
         Fin"
    );
}

#[test]
fn check_source_reports_first_error() {
    let compiler = Compiler::new(CompilerConfig::default());
    assert!(compiler.check_source("int x\nx = 1\n").is_ok());

    let err = compiler.check_source("switch x\nend\ncase 2\n").unwrap_err();
    assert_eq!(err.report(), "Error on line 3 : 'case' statement outside of a 'switch'.");
}

#[test]
fn compile_directory_mirrors_structure() {
    let dir = tempfile::TempDir::new().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir_all(src.join("chapitre1")).unwrap();
    std::fs::write(src.join("main.algo"), "int x\nx = 1\n").unwrap();
    std::fs::write(src.join("chapitre1").join("boucle.algo"), "for i 1 3\nprint i\nend\n").unwrap();
    std::fs::write(src.join("notes.txt"), "not a source").unwrap();

    let out = dir.path().join("out");
    let compiler = Compiler::new(CompilerConfig {
        target: TargetKind::Cpp,
        out_dir: Some(out.clone()),
        ..CompilerConfig::default()
    });

    let outputs = compiler.compile_path(&src).unwrap();
    let written: Vec<PathBuf> = outputs.iter().map(|o| o.output.clone()).collect();
    assert_eq!(
        written,
        vec![out.join("chapitre1").join("boucle.cpp"), out.join("main.cpp")]
    );
    assert_eq!(outputs[0].lines, 3);

    let boucle = std::fs::read_to_string(out.join("chapitre1").join("boucle.cpp")).unwrap();
    assert!(boucle.contains("for (i = 1; i <= 3; i += 1) {"));
}

#[test]
fn compile_single_file_next_to_source() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("exercice.algo");
    std::fs::write(&path, "print \"salut\"\n").unwrap();

    let compiler = Compiler::new(CompilerConfig::default());
    let outputs = compiler.compile_path(&path).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].output, dir.path().join("exercice.txt"));

    let text = std::fs::read_to_string(&outputs[0].output).unwrap();
    assert_eq!(text, "Début\n\tAfficher(\"salut\")\nFin");
}

#[test]
fn errors_write_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("faux.algo");
    std::fs::write(&path, "int x\nreturn x\n").unwrap();

    let compiler = Compiler::new(CompilerConfig::default());
    assert!(compiler.compile_path(&path).is_err());
    assert!(!dir.path().join("faux.txt").exists());
}

#[test]
fn directory_errors_write_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.algo"), "int x\n").unwrap();
    std::fs::write(dir.path().join("b.algo"), "return x\n").unwrap();

    let compiler = Compiler::new(CompilerConfig::default());
    let err = compiler.compile_path(dir.path()).unwrap_err();
    assert_eq!(err, CompilerError::ReturnOutsideFunction { line: 1 });
    assert!(!dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn missing_path_is_an_io_error() {
    let compiler = Compiler::new(CompilerConfig::default());
    let err = compiler.compile_path(std::path::Path::new("does/not/exist.algo")).unwrap_err();
    assert!(matches!(err, CompilerError::IoError { .. }));
    assert_eq!(err.line(), None);
}
