use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use recompose::{compile, load_from_path, Flags, Masker, Mode, Rule, RuleSet};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "recompose")]
#[command(about = "Search text with composed regular-expression rules", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every match of a rule
    Find {
        /// Rule file to load rules from
        #[arg(short, long, conflicts_with = "pattern")]
        rules: Option<PathBuf>,

        /// Rule to run from the rule file (defaults to the last one declared)
        #[arg(long, requires = "rules")]
        rule: Option<String>,

        /// Inline pattern; repeat to compose several
        #[arg(short = 'e', long = "pattern")]
        pattern: Vec<String>,

        /// How inline patterns are combined
        #[arg(short, long, value_enum, default_value_t = ModeArg::Any)]
        mode: ModeArg,

        /// Case-insensitive inline patterns
        #[arg(short, long)]
        ignore_case: bool,

        /// Only print the number of matches per input
        #[arg(short, long)]
        count: bool,

        /// Files or directories to search (stdin if none)
        paths: Vec<PathBuf>,
    },

    /// Print the input with every match of a pattern masked out
    Mask {
        /// Pattern whose matches are masked
        #[arg(short = 'e', long = "pattern")]
        pattern: String,

        /// ASCII placeholder character
        #[arg(short, long, default_value_t = recompose::DEFAULT_PLACEHOLDER)]
        placeholder: char,

        /// Files to mask (stdin if none)
        paths: Vec<PathBuf>,
    },

    /// Validate a rule file and list its rules
    Check {
        /// Rule file to check
        #[arg(short, long)]
        rules: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Any,
    All,
    Seq,
    Split,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Any => Mode::Any,
            ModeArg::All => Mode::All,
            ModeArg::Seq => Mode::Seq,
            ModeArg::Split => Mode::Split,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find {
            rules,
            rule,
            pattern,
            mode,
            ignore_case,
            count,
            paths,
        } => {
            let rule = match rules {
                Some(rules) => rule_from_file(&rules, rule.as_deref())?,
                None => rule_from_patterns(&pattern, mode.into(), ignore_case)?,
            };
            cmd_find(&rule, &paths, count)
        }

        Commands::Mask {
            pattern,
            placeholder,
            paths,
        } => cmd_mask(&pattern, placeholder, &paths),

        Commands::Check { rules } => cmd_check(&rules),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn rule_from_file(path: &Path, name: Option<&str>) -> Result<Rule> {
    let config = load_from_path(path)?;
    let set = RuleSet::build(&config)
        .with_context(|| format!("failed to build rules from {}", path.display()))?;

    match name {
        Some(name) => set.get(name).cloned().with_context(|| {
            let known: Vec<_> = set.names().collect();
            format!("no rule named '{name}' (available: {})", known.join(", "))
        }),
        None => set
            .last()
            .map(|(_, rule)| rule.clone())
            .context("rule file declares no rules"),
    }
}

fn rule_from_patterns(patterns: &[String], mode: Mode, ignore_case: bool) -> Result<Rule> {
    if patterns.is_empty() {
        anyhow::bail!("nothing to search for: pass --rules or at least one --pattern");
    }
    let flags = if ignore_case {
        Flags::IGNORE_CASE
    } else {
        Flags::empty()
    };
    Ok(compile(patterns, mode, flags)?)
}

/// Every file to read: directories are walked recursively, `None` is stdin.
fn inputs(paths: &[PathBuf]) -> Result<Vec<Option<PathBuf>>> {
    if paths.is_empty() {
        return Ok(vec![None]);
    }

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry?;
                if entry.file_type().is_file() {
                    found.push(entry.path().to_path_buf());
                }
            }
            found.sort();
            files.extend(found.into_iter().map(Some));
        } else {
            files.push(Some(path.clone()));
        }
    }
    Ok(files)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn cmd_find(rule: &Rule, paths: &[PathBuf], count_only: bool) -> Result<()> {
    let mut total = 0;

    for input in inputs(paths)? {
        let label = input
            .as_deref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
        let text = match read_input(input.as_deref()) {
            Ok(text) => text,
            // Binary or unreadable files inside a walked directory
            Err(e) if input.is_some() && paths.iter().any(|p| p.is_dir()) => {
                tracing::debug!("skipping {label}: {e:#}");
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut found = 0;
        for m in rule.find_iter(&text) {
            found += 1;
            if count_only {
                continue;
            }
            let (start, end) = m.range();
            let (line, col) = line_col(&text, start);
            let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
            let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
            println!(
                "{}:{}:{}: {}{}{}",
                label.magenta(),
                line.to_string().green(),
                col,
                &text[line_start..start],
                m.as_str().red().bold(),
                &text[end..line_end]
            );
        }

        if count_only {
            println!("{}: {}", label.magenta(), found);
        }
        total += found;
    }

    if total == 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// 1-based line and column (in characters) of a byte offset.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

fn cmd_mask(pattern: &str, placeholder: char, paths: &[PathBuf]) -> Result<()> {
    let masker = Masker::with_placeholder(Rule::new(pattern)?, placeholder)?;

    for input in inputs(paths)? {
        let text = read_input(input.as_deref())?;
        print!("{}", masker.mask(&text, 0, text.len()));
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_from_path(path)?;
    let set = RuleSet::build(&config)?;

    let title = if set.meta().name.is_empty() {
        path.display().to_string()
    } else {
        set.meta().name.clone()
    };
    println!("{} {} ({} rules)", "✓".green(), title.bold(), set.len());
    if let Some(description) = &set.meta().description {
        println!("  {}", description.dimmed());
    }
    for (name, rule) in set.iter() {
        println!("  {} = {}", name.cyan(), rule);
    }
    Ok(())
}
