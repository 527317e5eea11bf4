use std::io::BufRead;
use std::path::PathBuf;

use fuzzle_types::{AppEvent, Difficulty, NewWord, TextSource};
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
Commands:
  :simplify            show the simplified text
  :restore             show the original text
  :read / :stop        start or stop reading aloud
  :vocab               collect difficult words
  :add word | definition | example | emoji | difficulty
  :remove ID           remove a vocabulary word
  :define WORD         look a word up
  :syllables           toggle syllable mode
  :load PATH           load a text file
  :list                show the vocabulary
  :help                this help
  :quit                exit
Any other line replaces the current text.";

/// Parse one line typed by the reader.
///
/// `Ok(None)` for empty lines, `Err` with a usage hint for malformed commands.
pub fn parse_command(line: &str) -> Result<Option<AppEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(AppEvent::RawTextInput {
            text: line.to_string(),
            source: TextSource::Manual,
        }));
    };

    let (name, args) = match command.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (command, ""),
    };

    let event = match name {
        "simplify" => AppEvent::Simplify,
        "restore" => AppEvent::RestoreOriginal,
        "read" => AppEvent::StartReading,
        "stop" => AppEvent::StopReading,
        "vocab" => AppEvent::ExtractVocabulary,
        "syllables" => AppEvent::ToggleSyllableMode,
        "list" => AppEvent::ListVocabulary,
        "quit" | "q" => AppEvent::Quit,
        "help" => AppEvent::Status(HELP.to_string()),
        "add" => AppEvent::AddWord(parse_new_word(args)?),
        "remove" => AppEvent::RemoveWord(required(args, ":remove ID")?),
        "define" => AppEvent::LookupWord(required(args, ":define WORD")?),
        "load" => AppEvent::LoadFile(PathBuf::from(required(args, ":load PATH")?)),
        other => return Err(format!("Unknown command ':{other}', try :help")),
    };

    Ok(Some(event))
}

fn required(args: &str, usage: &str) -> Result<String, String> {
    if args.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(args.to_string())
    }
}

/// `word | definition [| example [| emoji [| difficulty]]]`
fn parse_new_word(args: &str) -> Result<NewWord, String> {
    let mut fields = args.split('|').map(str::trim);
    let optional = |field: Option<&str>| field.filter(|f| !f.is_empty()).map(str::to_string);

    let word = fields.next().unwrap_or_default().to_string();
    let definition = fields.next().unwrap_or_default().to_string();
    let example = optional(fields.next());
    let emoji = optional(fields.next());
    let difficulty = match optional(fields.next()) {
        Some(level) => Some(
            Difficulty::from_str(&level)
                .ok_or_else(|| format!("Unknown difficulty '{level}' (easy, medium, hard)"))?,
        ),
        None => None,
    };

    // Word and definition are validated by the vocabulary itself
    Ok(NewWord {
        word,
        definition,
        example,
        emoji,
        difficulty,
    })
}

/// Forward stdin lines to the app as events until `:quit`, EOF or shutdown.
///
/// Stdin is read on a dedicated thread so a pending read never holds up
/// runtime shutdown.
pub async fn input_io(
    event_tx: AsyncSender<AppEvent>,
    status_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let events = event_tx.to_sync();
    let status = status_tx.to_sync();
    let reader_cancel = cancel.clone();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if reader_cancel.is_cancelled() {
                return;
            }

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            };

            match parse_command(&line) {
                Ok(Some(AppEvent::Status(help))) => {
                    let _ = status.send(AppEvent::Status(help));
                }
                Ok(Some(event)) => {
                    let quit = matches!(event, AppEvent::Quit);
                    if events.send(event).is_err() || quit {
                        return;
                    }
                }
                Ok(None) => {}
                Err(usage) => {
                    let _ = status.send(AppEvent::Status(usage));
                }
            }
        }

        tracing::info!("Input closed");
        let _ = events.send(AppEvent::Quit);
    });

    cancel.cancelled().await;
    tracing::info!("Input watcher stopping");
    Ok(())
}
