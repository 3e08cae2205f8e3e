use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: motion-lines [--line-length N] [--first-line N] <command> <file> [args]

Commands:
  number <file>                            Insert line numbers
  breaks <file>                            Insert line breaks without numbers
  strip <file>                             Remove line numbers and breaks
  extract <file> <from> <to>               Print lines [from, to) as a TOML record
  replace <file> <from> <to> <replacement> Replace lines [from, to) with a file's content
  headings <file>                          List headings with their line numbers
  paragraphs <file>                        Split into editable paragraphs
  highlight <file> <line>                  Highlight one line
  split-inline <file>                      Cut inline formatting at line starts
  accept <file>                            Accept all changes of a diff
  affected <file>                          Print the lines touched by a numbered diff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Number,
    Breaks,
    Strip,
    Extract { from: u32, to: u32 },
    Replace { from: u32, to: u32, replacement: PathBuf },
    Headings,
    Paragraphs,
    Highlight { line: u32 },
    SplitInline,
    Accept,
    Affected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub file: PathBuf,
    pub line_length: Option<usize>,
    pub first_line: Option<u32>,
}

/// Parses the arguments after the program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
    let mut line_length = None;
    let mut first_line = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--line-length" => {
                let value = args.next().context("--line-length needs a value")?;
                line_length = Some(parse_number(&value, "line length")?);
            }
            "--first-line" => {
                let value = args.next().context("--first-line needs a value")?;
                first_line = Some(parse_number(&value, "first line")?);
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().context("No command given")?;
    let file = PathBuf::from(positional.next().context("No input file given")?);
    let rest: Vec<String> = positional.collect();

    let command = match (name.as_str(), rest.as_slice()) {
        ("number", []) => Command::Number,
        ("breaks", []) => Command::Breaks,
        ("strip", []) => Command::Strip,
        ("extract", [from, to]) => Command::Extract {
            from: parse_number(from, "from line")?,
            to: parse_number(to, "to line")?,
        },
        ("replace", [from, to, replacement]) => Command::Replace {
            from: parse_number(from, "from line")?,
            to: parse_number(to, "to line")?,
            replacement: PathBuf::from(replacement),
        },
        ("headings", []) => Command::Headings,
        ("paragraphs", []) => Command::Paragraphs,
        ("highlight", [line]) => Command::Highlight {
            line: parse_number(line, "line")?,
        },
        ("split-inline", []) => Command::SplitInline,
        ("accept", []) => Command::Accept,
        ("affected", []) => Command::Affected,
        _ => bail!("Unknown command or wrong number of arguments: {name}"),
    };

    Ok(Invocation {
        command,
        file,
        line_length,
        first_line,
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .ok()
        .with_context(|| format!("Invalid {what}: {value}"))
}
