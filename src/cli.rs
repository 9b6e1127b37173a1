use std::{fmt, fs, io, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bkb", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn BibTeX entries into Harvard-style citations
    Cite {
        /// BibTeX files, `-` for stdin, or inline BibTeX text. Reads stdin when omitted.
        #[arg(value_name = "SRC")]
        from: Vec<Input>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Keep only the first citation of each input
        #[arg(long)]
        first: bool,
    },
    /// Work out the stored label and URL for a source label
    Source {
        #[arg(value_name = "LABEL")]
        label: String,
        /// URL already stored for the source
        #[arg(long, value_name = "URL")]
        previous_url: Option<String>,
        /// Never touch the network; every page counts as unreachable
        #[arg(long)]
        offline: bool,
        /// HTTP timeout in seconds
        #[arg(long, value_name = "SECS", default_value_t = 10)]
        timeout: u64,
    },
    /// Build an @online entry from a web page's title
    Fetch {
        #[arg(value_name = "URL")]
        url: String,
        /// Print the Harvard citation instead of the BibTeX entry
        #[arg(long)]
        cite: bool,
        /// HTTP timeout in seconds
        #[arg(long, value_name = "SECS", default_value_t = 10)]
        timeout: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where BibTeX text comes from:
///
/// - standard input (`-`),
/// - a file, or
/// - the argument itself, when it spans several lines or opens with an `@` header.
pub enum Input {
    Stdin,
    File(PathBuf),
    Inline(String),
}

impl FromStr for Input {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Input::Stdin)
        } else if let Ok(path) = fs::canonicalize(s) {
            Ok(Input::File(path))
        } else if s.contains('\n') || s.trim_start().starts_with('@') {
            Ok(Input::Inline(s.to_string()))
        } else {
            Err(format!("no such file: {s}"))
        }
    }
}

impl Input {
    pub fn read(&self) -> anyhow::Result<String> {
        match self {
            Input::Stdin => io::read_to_string(io::stdin()).context("failed to read stdin"),
            Input::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            Input::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
            Input::Inline(_) => f.write_str("<inline>"),
        }
    }
}
