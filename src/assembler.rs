use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::display;
use crate::encoder::Word;
use crate::error::AssembleError;
use crate::table;

/// Session policy, threaded in explicitly by the driver.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Stop the session before the line after the first failing one.
    pub early_exit: bool,
}

/// One failed line: its number, its text after comment stripping, and the
/// typed error that rejected it.
#[derive(Debug, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub text: String,
    pub error: AssembleError,
}

/// Strips a trailing `; comment` and surrounding whitespace. Comment-only
/// and blank lines collapse to the empty string.
pub fn strip_comments(line: &str) -> &str {
    match line.split_once(';') {
        Some((code, _)) => code.trim(),
        None => line.trim(),
    }
}

/// Encodes one trimmed, comment-free, non-empty line.
///
/// The mnemonic is split from the argument text at the first whitespace run
/// and looked up verbatim; everything after it belongs to the format encoder.
pub fn encode_line(text: &str) -> Result<Word, AssembleError> {
    let (mnemonic, args) = match text.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim_start()),
        None => (text, ""),
    };
    let desc = table::lookup(mnemonic)
        .ok_or_else(|| AssembleError::UnknownOperation(mnemonic.to_string()))?;
    if args.is_empty() {
        return Err(AssembleError::MissingOperands(mnemonic.to_string()));
    }
    desc.format.encode(args)
}

/// An assembly session: feeds lines through the encoder, writes each word to
/// the sink (byte 0 first) and keeps a diagnostic per failed line.
pub struct Assembler<W: Write> {
    out: W,
    cfg: AsmConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<W: Write> Assembler<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, AsmConfig::default())
    }

    pub fn with_config(out: W, cfg: AsmConfig) -> Self {
        Self {
            out,
            cfg,
            diagnostics: Vec::new(),
        }
    }

    /// Assembles raw source lines into the sink.
    ///
    /// Lines are numbered from 1 counting only the instructions actually fed
    /// to the encoder; comment-only and blank lines are skipped. A failing
    /// line is recorded and the session moves on, unless
    /// [`AsmConfig::early_exit`] is set, in which case it stops after fully
    /// evaluating the failing line.
    pub fn assemble<I, S>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line_no = 1u32;
        for raw in lines {
            let text = strip_comments(raw.as_ref());
            if text.is_empty() {
                continue;
            }
            debug!("assembling '{text}' in line {line_no}");
            match encode_line(text) {
                Ok(word) => {
                    debug!("compiled to {}", display::fmt_word(word));
                    self.out.write_all(&word)?;
                }
                Err(err) => {
                    error!("compilation error in line {line_no}: {text}: {err}");
                    self.diagnostics.push(Diagnostic {
                        line: line_no,
                        text: text.to_string(),
                        error: err,
                    });
                    if self.cfg.early_exit {
                        break;
                    }
                }
            }
            line_no += 1;
        }
        Ok(())
    }

    /// Failures recorded so far, in line order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of failed lines; never decreases.
    pub fn errors(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn failed(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Hands the sink back, e.g. to read words assembled into a `Vec<u8>`.
    pub fn into_inner(self) -> W {
        self.out
    }
}
