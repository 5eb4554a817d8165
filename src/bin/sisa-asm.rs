use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use sisa_rs::{display, AsmConfig, Assembler, Diagnostic, Word};

#[derive(Parser, Debug)]
#[command(version, about = "Assemble SISA mnemonics into 16-bit instruction words")]
struct Opts {
    /// Input assembly file (one instruction per line)
    #[arg(short, long, required_unless_present = "instruction")]
    input: Option<PathBuf>,
    /// Output binary file (two bytes per instruction, high byte first)
    #[arg(short, long, required_unless_present = "instruction")]
    output: Option<PathBuf>,
    /// A single instruction to assemble and print instead of a file
    #[arg(long, conflicts_with_all = ["input", "output"])]
    instruction: Option<String>,
    /// Stop at the first line that fails to assemble
    #[arg(long)]
    early_exit: bool,
    /// Write per-line diagnostics as JSON (array of { line, text, error })
    #[arg(long, value_name = "FILE")]
    diagnostics: Option<PathBuf>,
    /// Raise log verbosity (-v: debug, -vv: trace); otherwise RUST_LOG applies
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let filter = match opts.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match (&opts.instruction, &opts.input, &opts.output) {
        (Some(text), _, _) => assemble_single(text, &opts),
        (None, Some(input), Some(output)) => assemble_file(input, output, &opts),
        _ => bail!("either --instruction or both --input and --output are required"),
    }
}

fn assemble_file(input: &Path, output: &Path, opts: &Opts) -> Result<()> {
    debug!("assembling {} into {}", input.display(), output.display());
    let source =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let file =
        fs::File::create(output).with_context(|| format!("creating {}", output.display()))?;

    let cfg = AsmConfig {
        early_exit: opts.early_exit,
    };
    let mut asm = Assembler::with_config(BufWriter::new(file), cfg);
    asm.assemble(source.lines())
        .with_context(|| format!("writing {}", output.display()))?;
    asm.flush()
        .with_context(|| format!("writing {}", output.display()))?;

    if let Some(path) = &opts.diagnostics {
        write_diagnostics(path, asm.diagnostics())?;
    }
    if asm.failed() {
        // No partial output survives a failing session.
        if let Err(err) = fs::remove_file(output) {
            error!("failed to delete output file for failed compilation: {err}");
        }
        bail!("compilation failed with {} error(s)", asm.errors());
    }
    Ok(())
}

fn assemble_single(text: &str, opts: &Opts) -> Result<()> {
    let mut asm = Assembler::new(Vec::new());
    asm.assemble([text])?;
    if let Some(path) = &opts.diagnostics {
        write_diagnostics(path, asm.diagnostics())?;
    }
    if asm.failed() {
        // The per-line error has already been logged.
        bail!("instruction did not assemble");
    }
    let word: Word = asm
        .into_inner()
        .as_slice()
        .try_into()
        .context("expected exactly one instruction")?;
    println!("Instruction: {text}");
    println!("{}", display::fmt_word(word));
    Ok(())
}

fn write_diagnostics(path: &Path, diagnostics: &[Diagnostic]) -> Result<()> {
    let json = serde_json::to_string_pretty(diagnostics)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
