//! Interactive Confirmer
//!
//! Asks the operator to type the affirmative token. Anything else, including
//! an empty line or a closed input stream, is a refusal.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::domain::ports::{is_affirmative, ConfirmRequest, Confirmer, AFFIRMATIVE_TOKEN};

enum Prompter {
    /// dialoguer prompt on the controlling terminal
    Terminal,
    /// Line-oriented prompt over arbitrary streams
    Stream {
        input: Mutex<Box<dyn BufRead + Send>>,
        output: Mutex<Box<dyn Write + Send>>,
    },
}

pub struct InteractiveConfirmer {
    prompter: Prompter,
}

impl InteractiveConfirmer {
    /// Prompt on the terminal. Callers must check that stdin is a terminal.
    pub fn terminal() -> Self {
        Self {
            prompter: Prompter::Terminal,
        }
    }

    /// Prompt over the given streams
    pub fn with_io<R, W>(input: R, output: W) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            prompter: Prompter::Stream {
                input: Mutex::new(Box::new(input)),
                output: Mutex::new(Box::new(output)),
            },
        }
    }

    fn ask(&self, question: &str) -> io::Result<String> {
        match &self.prompter {
            Prompter::Terminal => Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .map_err(io::Error::other),
            Prompter::Stream { input, output } => {
                if let Ok(mut out) = output.lock() {
                    write!(out, "{} ", question)?;
                    out.flush()?;
                }
                let mut line = String::new();
                let read = match input.lock() {
                    Ok(mut reader) => reader.read_line(&mut line)?,
                    Err(_) => 0,
                };
                if read == 0 {
                    return Err(io::ErrorKind::UnexpectedEof.into());
                }
                Ok(line)
            }
        }
    }
}

impl Confirmer for InteractiveConfirmer {
    fn confirm(&self, request: &ConfirmRequest<'_>) -> bool {
        let question = format!("{} Type '{}' to confirm", request.prompt(), AFFIRMATIVE_TOKEN);
        match self.ask(&question) {
            Ok(answer) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}
