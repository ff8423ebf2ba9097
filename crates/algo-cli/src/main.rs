//! Algo compiler CLI.
//!
//! Translates `.algo` sources to French pseudocode or C++.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};

use algo_compiler::config::CONFIG_FILE_NAME;
use algo_compiler::frontend::SOURCE_EXTENSION;
use algo_compiler::{discover_sources, Compiler, CompilerConfig, CompilerError, TargetKind};

mod ui;

#[derive(Parser)]
#[command(name = "algo")]
#[command(about = "Algo compiler - translates .algo pseudocode to French pseudocode or C++")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Algo project
    Init {
        /// Project directory (created if doesn't exist)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Compile a file, or every .algo file in a directory
    Compile {
        /// Source file or directory
        path: PathBuf,

        /// Output directory (a single file is printed to stdout without it)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: TargetOptions,
    },

    /// Check sources against every target without generating code
    Check {
        /// Source file or directory
        path: PathBuf,

        /// Configuration file (defaults to algo.json next to the sources)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Watch for changes and recompile
    Watch {
        /// Source file or directory
        path: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: TargetOptions,
    },
}

/// Options shared by the commands that generate code.
#[derive(Args, Debug, Default)]
struct TargetOptions {
    /// Target language: pseudo or cpp
    #[arg(short, long)]
    target: Option<TargetKind>,

    /// Indentation string
    #[arg(long)]
    tab: Option<String>,

    /// Indent with this many spaces instead of a tab
    #[arg(long, conflicts_with = "tab")]
    spaces: Option<usize>,

    /// C++ only: emit `using namespace std;` and drop `std::` qualifiers
    #[arg(long)]
    using_namespace_std: bool,

    /// Configuration file (defaults to algo.json next to the sources)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl TargetOptions {
    /// Loads the configuration file for `path`, then applies command-line
    /// overrides.
    fn resolve(&self, path: &Path, output: Option<&Path>) -> miette::Result<CompilerConfig> {
        let mut config = load_config(path, self.config.as_deref())?;

        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(tab) = &self.tab {
            config.tab = tab.clone();
        }
        if let Some(width) = self.spaces {
            config.tab = CompilerConfig::indent_with_spaces(width);
        }
        config.using_namespace_std |= self.using_namespace_std;
        if let Some(output) = output {
            config.out_dir = Some(output.to_path_buf());
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            if atty::is(atty::Stream::Stdout) {
                ui::print_welcome(env!("CARGO_PKG_VERSION"));
            } else {
                eprintln!("Run 'algo --help' for usage.");
                std::process::exit(1);
            }
        }

        Some(Commands::Init { path }) => {
            init_project(&path)?;
        }

        Some(Commands::Compile {
            path,
            output,
            options,
        }) => {
            let config = options.resolve(&path, output.as_deref())?;
            compile(&path, config)?;
        }

        Some(Commands::Check { path, config }) => {
            let config = load_config(&path, config.as_deref())?;
            check(&path, config)?;
        }

        Some(Commands::Watch {
            path,
            output,
            options,
        }) => {
            let config = options.resolve(&path, output.as_deref())?;
            run_watch_mode(&path, config).await?;
        }
    }

    Ok(())
}

/// Directory searched for `algo.json`.
fn config_dir(path: &Path) -> &Path {
    if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    }
}

/// Reads the explicit configuration file, or `algo.json` next to the
/// sources when there is one.
fn load_config(path: &Path, explicit: Option<&Path>) -> miette::Result<CompilerConfig> {
    let loaded = match explicit {
        Some(file) => {
            let config = CompilerConfig::load(file)?;
            Some(config.ok_or_else(|| CompilerError::io(file, "No such file or directory"))?)
        }
        None => CompilerConfig::load(&config_dir(path).join(CONFIG_FILE_NAME))?,
    };
    Ok(loaded.unwrap_or_default())
}

/// Turns a compiler error into a report, prefixed with its location.
fn translation_failed(err: CompilerError, source: Option<&Path>) -> miette::Report {
    ui::status(ui::Status::Failed, "Translation failed.");
    let location = match (source, err.line()) {
        (Some(source), Some(line)) => Some(format!(
            "Error on line {} ({})",
            line,
            ui::error_location(source, line)
        )),
        (None, Some(line)) => Some(format!("Error on line {}", line)),
        _ => None,
    };
    let report = miette::Report::new(err);
    match location {
        Some(location) => report.wrap_err(location),
        None => report,
    }
}

/// Initialize a new Algo project.
fn init_project(path: &Path) -> miette::Result<()> {
    std::fs::create_dir_all(path).map_err(|e| miette::miette!("Failed to create project directory: {}", e))?;

    let main_path = path.join("main").with_extension(SOURCE_EXTENSION);
    let mut created = Vec::new();
    if !main_path.exists() {
        std::fs::write(&main_path, EXAMPLE_SOURCE)
            .map_err(|e| miette::miette!("Failed to write {}: {}", main_path.display(), e))?;
        created.push(main_path);
    }

    let config_path = path.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        CompilerConfig::default().save(&config_path)?;
        created.push(config_path);
    }

    if created.is_empty() {
        ui::status(ui::Status::Quiet, "Nothing to do: main.algo and algo.json already exist.");
        return Ok(());
    }

    let files: Vec<(String, &str)> = created
        .iter()
        .map(|file| {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let description = if name == CONFIG_FILE_NAME {
                "target, indentation, output directory"
            } else {
                "example algorithm"
            };
            (name, description)
        })
        .collect();
    ui::print_created(path, &files);
    println!();
    ui::status(ui::Status::Note, "algo compile main.algo --target cpp");

    Ok(())
}

const EXAMPLE_SOURCE: &str = r#"desc Somme des entiers de 1 a n
fx int somme int n
desc additionne les entiers de 1 a n
vars
int total i
fx_start
total = 0
for i 1 n
total += i
end
return total
end

int n
print "Entrez un nombre : "
input n
if n > 0
print "Somme : " & somme(n) & (ENDL)
else
print "Nombre invalide" & (ENDL)
end
"#;

/// Compile a file to stdout, or files to disk.
fn compile(path: &Path, config: CompilerConfig) -> miette::Result<()> {
    let compiler = Compiler::new(config);

    if path.is_file() && compiler.config().out_dir.is_none() {
        let generated = compiler
            .compile_file(path)
            .map_err(|e| translation_failed(e, Some(path)))?;
        println!("{}", generated.text);
        return Ok(());
    }

    let start = Instant::now();
    let spinner = ui::spinner(&format!("Compiling to {}...", compiler.config().target));
    let result = compiler.compile_path(path);
    spinner.finish_and_clear();

    let outputs = result.map_err(|e| translation_failed(e, None))?;
    ui::print_compile_summary(compiler.config().target, &outputs, start.elapsed());

    Ok(())
}

/// Check every source against both targets.
fn check(path: &Path, config: CompilerConfig) -> miette::Result<()> {
    let spinner = ui::spinner("Checking sources...");

    let compiler = Compiler::new(config);
    let sources = match discover_sources(path) {
        Ok(sources) => sources,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(translation_failed(e, None));
        }
    };

    for source in &sources {
        if let Err(e) = compiler.check_file(source) {
            spinner.finish_and_clear();
            return Err(translation_failed(e, Some(source)));
        }
    }

    spinner.finish_and_clear();
    ui::status(ui::Status::Done, &ui::check_summary(sources.len()));

    Ok(())
}

/// Run watch mode: recompile whenever a source changes.
async fn run_watch_mode(path: &Path, config: CompilerConfig) -> miette::Result<()> {
    let compiler = Compiler::new(config);

    ui::status(ui::Status::Note, &format!("Watching {}", path.display()));
    rebuild(&compiler, path, "Initial compile...");

    // Channel for file change events
    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);

    // Only sources count: generated files land next to them.
    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |result: DebounceEventResult| {
            if let Ok(events) = result {
                if events.iter().any(|event| is_source(&event.path)) {
                    let _ = tx.try_send(());
                }
            }
        },
    )
    .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    let (watched, mode) = if path.is_dir() {
        (path, RecursiveMode::Recursive)
    } else {
        (config_dir(path), RecursiveMode::NonRecursive)
    };
    let watched = if watched.as_os_str().is_empty() {
        Path::new(".")
    } else {
        watched
    };
    debouncer
        .watcher()
        .watch(watched, mode)
        .map_err(|e| miette::miette!("Failed to watch {}: {}", watched.display(), e))?;

    ui::status(ui::Status::Quiet, "Waiting for changes (Ctrl-C to stop)");

    loop {
        tokio::select! {
            _ = rx.recv() => {
                rebuild(&compiler, path, "Change detected, recompiling...");
            }
            _ = tokio::signal::ctrl_c() => {
                ui::status(ui::Status::Quiet, "Stopped watching.");
                break;
            }
        }
    }

    Ok(())
}

fn rebuild(compiler: &Compiler, path: &Path, message: &str) {
    let spinner = ui::spinner(message);
    let start = Instant::now();
    let result = compiler.compile_path(path);
    spinner.finish_and_clear();

    match result {
        Ok(outputs) => ui::print_compile_summary(compiler.config().target, &outputs, start.elapsed()),
        Err(e) => ui::status(ui::Status::Failed, &e.report()),
    }
}

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
