//! # Algo Compiler
//!
//! This crate translates `.algo` sources, a small line-oriented pseudocode
//! language, into French structured pseudocode or into compilable C++.
//!
//! ## Architecture
//!
//! ```text
//! Source lines (.algo)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  keyword + parameters → Instruction
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Engine    │  block stack, nesting checks, indentation,
//! │ (single pass)│  function hoisting
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Target    │  pseudocode (Début ... Fin)
//! │  (assemble)  │  or C++ (#include ... int main())
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use algo_compiler::{translate_to_cpp, translate_to_pseudocode};
//!
//! let source = ["int x", "x = 5", "print x"];
//!
//! let pseudo = translate_to_pseudocode(&source, "\t").unwrap();
//! assert!(pseudo.contains("x ← 5"));
//!
//! let cpp = translate_to_cpp(&source, "\t", false).unwrap();
//! assert!(cpp.contains("std::cout << x;"));
//! ```

pub mod block;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub use codegen::{translate_to_cpp, translate_to_pseudocode, GeneratedCode, TargetKind};
pub use config::CompilerConfig;
pub use diagnostic::CompilerError;

/// The main compiler struct: runs translations with a fixed configuration.
pub struct Compiler {
    config: CompilerConfig,
}

/// One compiled source file.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The `.algo` file that was compiled.
    pub source: PathBuf,
    /// Where the generated code was written.
    pub output: PathBuf,
    /// Number of source lines translated.
    pub lines: usize,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Translates source text to the configured target.
    pub fn compile_source(&self, source: &str) -> Result<GeneratedCode, CompilerError> {
        codegen::generate(source, &self.config)
    }

    /// Validates source text against both targets without keeping any output.
    pub fn check_source(&self, source: &str) -> Result<(), CompilerError> {
        let lines = frontend::source_lines(source);
        translate_to_pseudocode(&lines, &self.config.tab)?;
        translate_to_cpp(&lines, &self.config.tab, self.config.using_namespace_std)?;
        Ok(())
    }

    /// Reads and translates a single file.
    pub fn compile_file(&self, path: &Path) -> Result<GeneratedCode, CompilerError> {
        let source = read_source(path)?;
        self.compile_source(&source)
    }

    /// Reads and validates a single file.
    pub fn check_file(&self, path: &Path) -> Result<(), CompilerError> {
        let source = read_source(path)?;
        self.check_source(&source)
    }

    /// Compiles a file, or every `.algo` file under a directory, and writes
    /// the results.
    ///
    /// This runs the full pipeline:
    /// 1. Discover source files
    /// 2. Translate all of them (the first error aborts the run before
    ///    anything is written)
    /// 3. Write each result with the target's extension, next to its source
    ///    or under `out_dir`
    pub fn compile_path(&self, path: &Path) -> Result<Vec<CompileOutput>, CompilerError> {
        let root = if path.is_dir() { path } else { path.parent().unwrap_or(path) };

        let mut translated = Vec::new();
        for source_path in discover_sources(path)? {
            let source = read_source(&source_path)?;
            let generated = self.compile_source(&source)?;
            let output = CompileOutput {
                output: self.output_path(root, &source_path),
                source: source_path,
                lines: frontend::source_lines(&source).len(),
            };
            translated.push((output, generated));
        }

        let mut outputs = Vec::with_capacity(translated.len());
        for (output, generated) in translated {
            write_output(&output.output, &generated.text)?;
            outputs.push(output);
        }

        Ok(outputs)
    }

    /// Where the generated code for `source` goes. Directory structure below
    /// `root` is mirrored under `out_dir`.
    pub fn output_path(&self, root: &Path, source: &Path) -> PathBuf {
        let extension = self.config.target.file_extension();
        match &self.config.out_dir {
            Some(out_dir) => {
                let relative = source
                    .strip_prefix(root)
                    .ok()
                    .filter(|rel| !rel.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .or_else(|| source.file_name().map(PathBuf::from))
                    .unwrap_or_else(|| source.to_path_buf());
                out_dir.join(relative).with_extension(extension)
            }
            None => source.with_extension(extension),
        }
    }
}

/// Lists the `.algo` files to compile: `path` itself if it is a file,
/// otherwise every `.algo` file below it, sorted.
pub fn discover_sources(path: &Path) -> Result<Vec<PathBuf>, CompilerError> {
    if !path.exists() {
        return Err(CompilerError::io(path, "No such file or directory"));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext == frontend::SOURCE_EXTENSION)
        })
        .collect();
    sources.sort();
    Ok(sources)
}

fn read_source(path: &Path) -> Result<String, CompilerError> {
    std::fs::read_to_string(path).map_err(|e| CompilerError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_output(path: &Path, content: &str) -> Result<(), CompilerError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CompilerError::IoError {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    std::fs::write(path, content).map_err(|e| CompilerError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
