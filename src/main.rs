// vkscript: VkScript lexer, parser and syntax explorer

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use vkscript::parser::lexer::Lexer;
use vkscript::parser::printer::{render_outline, render_tokens};
use vkscript::parser::{ParseOutcome, Parser, SyntaxError};
use vkscript::ui::App;

/// Lex, parse and explore VkScript programs.
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// VkScript source file
    file: PathBuf,

    /// Print tokens or the syntax tree to stdout instead of opening the explorer
    #[arg(long, value_enum)]
    dump: Option<DumpFormat>,

    /// Keep parsing after a syntax error and report every error found
    #[arg(long)]
    recover: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DumpFormat {
    /// One token per line
    Tokens,
    /// Indented statement outline
    Ast,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    match cli.dump {
        Some(format) => Ok(dump(&cli, &source, format)),
        None => {
            explore(source)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(errors: &[SyntaxError]) {
    for error in errors {
        eprintln!("{}", error);
    }
}

/// Print the requested dump; exit status reflects syntax errors
fn dump(cli: &Cli, source: &str, format: DumpFormat) -> ExitCode {
    if format == DumpFormat::Tokens {
        // Lexing never fails
        print!("{}", render_tokens(&Lexer::new(source).tokenize()));
        return ExitCode::SUCCESS;
    }

    eprintln!("Parsing {}...", cli.file.display());
    let outcome = if cli.recover {
        Parser::new(source).parse_program_with_recovery()
    } else {
        match Parser::new(source).parse_program() {
            Ok(program) => ParseOutcome {
                program,
                errors: Vec::new(),
            },
            Err(error) => {
                report(&[error]);
                return ExitCode::FAILURE;
            }
        }
    };

    print!("{}", render_outline(&outcome.program));

    if outcome.is_ok() {
        eprintln!(
            "Parsed successfully. Found {} top-level statements.",
            outcome.program.statements.len()
        );
        ExitCode::SUCCESS
    } else {
        report(&outcome.errors);
        eprintln!("Found {} syntax error(s).", outcome.errors.len());
        ExitCode::FAILURE
    }
}

fn explore(source: String) -> Result<()> {
    let mut app = App::new(source);
    if !app.outcome.is_ok() {
        eprintln!("Found {} syntax error(s); opening explorer...", app.outcome.errors.len());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Explorer event loop failed")
}
