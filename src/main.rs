//! CLI entry point for lsd

use std::ffi::OsString;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use lsd::output::{Palette, Tone};
use lsd::{ListerConfig, OutputConfig, OutputTarget, TreeWalker, WalkSummary};
use termcolor::{ColorChoice, StandardStream, WriteColor};

const ISSUES_URL: &str = "https://github.com/Hellmakima/list-files/issues";

#[derive(Parser, Debug)]
#[command(name = "lsd")]
#[command(about = "List a directory as a tree, with filters and per-directory limits")]
#[command(version, disable_version_flag = true)]
struct Args {
    /// Directory to list
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Descend at most N levels
    #[arg(short = 'd', long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Show at most N entries per directory, directories first
    #[arg(short = 'm', long = "max-items", value_name = "N")]
    max_items: Option<usize>,

    /// Only show files whose path contains PATTERN (repeatable)
    #[arg(short = 'i', long = "include", value_name = "PATTERN")]
    include: Vec<String>,

    /// Hide entries whose path contains PATTERN (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Honour .gitignore files and hide .git
    #[arg(short = 'g', long = "gitignore")]
    gitignore: bool,

    /// List directories only
    #[arg(short = 'r', long = "directories")]
    directories: bool,

    /// Show file sizes
    #[arg(short = 's', long = "size")]
    size: bool,

    /// Show modification time, size and permissions
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Disable colored output (also -nc)
    #[arg(long = "no-color")]
    no_color: bool,

    /// Write the tree to FILE instead of the terminal
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the execution time
    #[arg(short = 't', long = "time")]
    time: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Args {
    fn lister_config(&self, root: PathBuf) -> ListerConfig {
        let mut exclude_patterns = self.exclude.clone();
        if self.gitignore {
            exclude_patterns.push(".git".to_string());
        }
        ListerConfig {
            root,
            include_patterns: self.include.clone(),
            exclude_patterns,
            dirs_only: self.directories,
            show_size: self.size,
            list_details: self.list,
            use_gitignore: self.gitignore,
            max_depth: self.max_depth,
            max_items: self.max_items,
        }
    }

    fn output_config(&self, use_color: bool) -> OutputConfig {
        OutputConfig {
            use_color,
            target: match &self.output {
                Some(path) => OutputTarget::File(path.clone()),
                None => OutputTarget::Console,
            },
        }
    }
}

/// Rewrite the two-letter `-nc` flag into its long form.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-nc" {
                OsString::from("--no-color")
            } else {
                arg
            }
        })
        .collect()
}

/// A problem with the invocation itself, reported before any traversal.
#[derive(Debug)]
struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

fn io_error_kind(err: &anyhow::Error) -> Option<io::ErrorKind> {
    err.downcast_ref::<io::Error>().map(io::Error::kind)
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    io_error_kind(err) == Some(io::ErrorKind::Interrupted)
}

/// The reader of our stdout went away (`lsd | head`).
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    io_error_kind(err) == Some(io::ErrorKind::BrokenPipe)
}

/// What a Ctrl-C means at the moment it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterruptAction {
    /// Let the walker stop at its next check.
    StopWalk,
    /// Blocked on the stack-trace prompt; leave right away.
    ExitNow,
}

fn on_interrupt(interrupt: &AtomicBool, prompting: &AtomicBool) -> InterruptAction {
    if prompting.load(Ordering::SeqCst) {
        InterruptAction::ExitNow
    } else {
        interrupt.store(true, Ordering::SeqCst);
        InterruptAction::StopWalk
    }
}

fn install_interrupt_handler(interrupt: Arc<AtomicBool>, prompting: Arc<AtomicBool>) {
    let handler = move || {
        if on_interrupt(&interrupt, &prompting) == InterruptAction::ExitNow {
            println!("\n...INTR");
            process::exit(0);
        }
    };
    if let Err(e) = ctrlc::set_handler(handler) {
        log::warn!("could not install interrupt handler: {}", e);
    }
}

fn run(args: &Args, use_color: bool, interrupt: Arc<AtomicBool>) -> Result<WalkSummary> {
    if !args.directory.exists() {
        return Err(ConfigError(format!(
            "couldn't find '{}'",
            args.directory.display()
        ))
        .into());
    }
    let root = std::path::absolute(&args.directory)
        .with_context(|| format!("{}: failed to resolve path", args.directory.display()))?;

    let output = args.output_config(use_color);
    let mut sink = output.open_sink().map_err(|e| {
        let target = args.output.as_deref().unwrap_or(&root);
        ConfigError(format!("cannot clear '{}': {}", target.display(), e))
    })?;

    let walker = TreeWalker::new(args.lister_config(root)).with_interrupt(interrupt);
    log::debug!("walking with {:?}", walker.config());
    let summary = walker.walk(&mut sink)?;
    Ok(summary)
}

/// Determine whether to use color output based on flags and environment.
fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    // Respect NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    io::stdout().is_terminal()
}

fn stream(use_color: bool, stdout: bool) -> StandardStream {
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    if stdout {
        StandardStream::stdout(choice)
    } else {
        StandardStream::stderr(choice)
    }
}

fn write_toned(out: &mut impl WriteColor, palette: Palette, tone: Tone, text: &str) -> io::Result<()> {
    match palette.spec(tone) {
        Some(spec) => {
            out.set_color(&spec)?;
            write!(out, "{}", text)?;
            out.reset()
        }
        None => write!(out, "{}", text),
    }
}

fn report_unexpected(
    err: &anyhow::Error,
    palette: Palette,
    prompting: &AtomicBool,
) -> io::Result<()> {
    let mut stderr = stream(palette.is_enabled(), false);
    write_toned(&mut stderr, palette, Tone::Error, "Error occurred:")?;
    write!(stderr, " ")?;
    write_toned(&mut stderr, palette, Tone::Warning, &format!("{:#}", err))?;
    writeln!(stderr, "\x07")?;

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(());
    }
    write!(stderr, "Want to print stacktrace(y/n)")?;
    stderr.flush()?;

    let mut answer = String::new();
    prompting.store(true, Ordering::SeqCst);
    let read = stdin.read_line(&mut answer);
    prompting.store(false, Ordering::SeqCst);
    read?;
    if answer.trim().eq_ignore_ascii_case("y") {
        writeln!(stderr, "{:?}", err)?;
        write!(stderr, "Please report this issue at ")?;
        write_toned(&mut stderr, palette, Tone::Accent, ISSUES_URL)?;
        writeln!(stderr)?;
    }
    Ok(())
}

fn print_elapsed(elapsed: Duration, palette: Palette) -> io::Result<()> {
    let mut stdout = stream(palette.is_enabled(), true);
    write!(stdout, "\nExecution time: ")?;
    write_toned(
        &mut stdout,
        palette,
        Tone::Success,
        &format!("{:.3} seconds", elapsed.as_secs_f64()),
    )?;
    writeln!(stdout)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse_from(normalize_args(std::env::args_os()));
    let started = Instant::now();

    let use_color = should_use_color(args.no_color);
    let palette = Palette::new(use_color);

    let interrupt = Arc::new(AtomicBool::new(false));
    let prompting = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Arc::clone(&interrupt), Arc::clone(&prompting));

    let code = match run(&args, use_color, interrupt) {
        Ok(summary) => {
            log::debug!("{:?}", summary);
            0
        }
        Err(e) if e.is::<ConfigError>() => {
            eprintln!("lsd: {}", e);
            process::exit(1);
        }
        Err(e) if is_interrupt(&e) => {
            println!("...INTR");
            process::exit(0);
        }
        Err(e) if is_broken_pipe(&e) => {
            log::debug!("output closed early: {}", e);
            process::exit(0);
        }
        Err(e) => {
            if let Err(report_err) = report_unexpected(&e, palette, &prompting) {
                log::debug!("failed to report error: {}", report_err);
            }
            1
        }
    };

    if args.time {
        if let Err(e) = print_elapsed(started.elapsed(), palette) {
            log::debug!("failed to print execution time: {}", e);
        }
    }
    process::exit(code);
}
