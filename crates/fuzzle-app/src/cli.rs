use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fuzzle",
    version,
    about = "Reading assistant: simplify text, read it aloud word by word, collect vocabulary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Profile to load from the profiles directory
    #[arg(long, global = true, default_value = "main")]
    pub profile: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the simplified version of a text (stdin when no file is given)
    Simplify { file: Option<PathBuf> },

    /// Split words into syllables
    Syllables {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Look a word up in the dictionary
    Define { word: String },

    /// List the difficult words of a text as vocabulary cards
    Vocab {
        file: Option<PathBuf>,

        /// Maximum number of words; defaults to the configured limit
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Read a text aloud word by word
    Read { file: Option<PathBuf> },

    /// Create a new profile as a copy of the main one
    NewProfile { name: String },

    /// Interactive session driven by stdin commands (default)
    Interactive,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["fuzzle"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.profile, "main");
        assert!(!cli.log_json);
    }

    #[test]
    fn vocab_takes_file_and_limit() {
        let cli = Cli::parse_from(["fuzzle", "vocab", "story.txt", "--limit", "5", "--log-json"]);

        match cli.command {
            Some(Commands::Vocab { file, limit }) => {
                assert_eq!(file, Some(PathBuf::from("story.txt")));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.log_json);
    }

    #[test]
    fn syllables_needs_a_word() {
        assert!(Cli::try_parse_from(["fuzzle", "syllables"]).is_err());
    }
}
