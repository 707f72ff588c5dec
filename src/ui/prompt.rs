//! Interactive questions asked during installation
//!
//! `InquirePrompter` is used on a terminal. When stdin/stdout are not a
//! terminal (piped input, CI) `LinePrompter` reads plain lines instead, which
//! keeps the installer scriptable.

use std::io::{BufRead, IsTerminal, Write};

use inquire::{Confirm, Text};

use crate::error::{InstallerError, Result};

/// Source of answers for the installer's questions
pub trait Prompter {
    /// Ask a yes/no question. Empty input selects `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Ask for free-form text. The answer is trimmed and otherwise untouched.
    fn text(&mut self, question: &str, help: Option<&str>) -> Result<String>;
}

/// Interpret a typed yes/no answer.
///
/// Returns `None` for anything other than empty, `y`, `yes`, `n` or `no`
/// (case-insensitive).
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Terminal prompts rendered by inquire
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Confirm::new(question)
            .with_default(default)
            .with_help_message("Press Enter to accept the default")
            .prompt()
            .map_err(InstallerError::from)
    }

    fn text(&mut self, question: &str, help: Option<&str>) -> Result<String> {
        let mut prompt = Text::new(question);
        if let Some(help) = help {
            prompt = prompt.with_help_message(help);
        }
        Ok(prompt.prompt()?.trim().to_string())
    }
}

/// Line-based prompts for non-terminal input
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InstallerError::PromptFailed {
                message: e.to_string(),
            })?;
        Ok((read > 0).then_some(line))
    }

    fn ask(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text} ")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            self.ask(&format!("{question} {hint}:"))?;
            // End of input behaves like pressing Enter
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(default);
            };
            if let Some(answer) = parse_yes_no(&line, default) {
                return Ok(answer);
            }
            writeln!(self.output, "Please answer yes or no.")?;
        }
    }

    fn text(&mut self, question: &str, help: Option<&str>) -> Result<String> {
        if let Some(help) = help {
            writeln!(self.output, "{help}")?;
        }
        self.ask(&format!("{question}:"))?;
        let line = self.read_line()?.unwrap_or_default();
        Ok(line.trim().to_string())
    }
}

/// Prompter for the current process: inquire on a terminal, lines otherwise
pub fn for_terminal() -> Box<dyn Prompter> {
    if console::user_attended() && std::io::stdin().is_terminal() {
        Box::new(InquirePrompter)
    } else {
        Box::new(LinePrompter::new(
            std::io::stdin().lock(),
            std::io::stdout(),
        ))
    }
}
