use anyhow::{Context, Result};
use motion_lines_config::Config;
use motion_lines_engine::{
    detect_affected_line_range, diff_html_to_final_text, extract_range, headings_with_line_numbers,
    highlight_line, insert_line_numbers_with, replace_lines, split_inline_elements_at_line_breaks,
    split_to_paragraphs, strip_line_numbers,
};
use std::{env, fs, path::Path, process};

mod args;

use args::{Command, Invocation, USAGE, parse_args};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let invocation = match parse_args(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::debug!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let output = run(&invocation, &config)?;
    println!("{output}");
    Ok(())
}

fn run(invocation: &Invocation, config: &Config) -> Result<String> {
    let markup = read_document(&config.resolve_document(&invocation.file))?;

    let mut options = config.numbering_options();
    if let Some(line_length) = invocation.line_length {
        options.line_length = line_length;
    }
    if let Some(first_line) = invocation.first_line {
        options.first_line = first_line;
    }
    // Line addressed commands work on numbered markup. Numbering drops any
    // markers already present, so numbered input is fine too.
    let numbered = || insert_line_numbers_with(&markup, &options);

    let output = match &invocation.command {
        Command::Number => numbered()?,
        Command::Breaks => insert_line_numbers_with(&markup, &options.clone().breaks_only())?,
        Command::Strip => strip_line_numbers(&markup)?,
        Command::Extract { from, to } => {
            let bundle = extract_range(&numbered()?, *from, *to)?;
            toml::to_string_pretty(&bundle)?
        }
        Command::Replace {
            from,
            to,
            replacement,
        } => {
            let replacement = read_document(&config.resolve_document(replacement))?;
            replace_lines(&numbered()?, &replacement, *from, *to)?
        }
        Command::Headings => headings_with_line_numbers(&numbered()?)?
            .iter()
            .map(|heading| {
                let marks = "#".repeat(usize::from(heading.level));
                format!("{}\t{marks} {}", heading.line_number, heading.text)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Paragraphs => split_to_paragraphs(&strip_line_numbers(&markup)?)?.join("\n"),
        Command::Highlight { line } => highlight_line(&numbered()?, *line)?,
        Command::SplitInline => split_inline_elements_at_line_breaks(&numbered()?)?,
        Command::Accept => diff_html_to_final_text(&markup)?,
        // The diff carries the numbering of the text it was made from.
        Command::Affected => match detect_affected_line_range(&markup)? {
            Some(range) => format!("{}\t{}", range.from, range.to),
            None => String::new(),
        },
    };

    log::debug!(
        "{:?} on {} done (line length {})",
        invocation.command,
        invocation.file.display(),
        options.line_length
    );
    Ok(output)
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn invocation(command: Command, file: PathBuf) -> Invocation {
        Invocation {
            command,
            file,
            line_length: Some(5),
            first_line: None,
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn number_then_strip() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "motion.html", "<p>aaa bbb</p>");
        let config = Config::default();

        let numbered = run(&invocation(Command::Number, file), &config).unwrap();
        assert!(numbered.contains(r#"data-line-number="2""#));

        let numbered_file = write(&dir, "numbered.html", &numbered);
        let stripped = run(&invocation(Command::Strip, numbered_file), &config).unwrap();
        assert_eq!(stripped, "<p>aaa bbb</p>");
    }

    #[test]
    fn extract_prints_a_toml_record() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "motion.html", "<p>aaa bbb ccc</p>");

        let record = run(
            &invocation(Command::Extract { from: 2, to: 3 }, file),
            &Config::default(),
        )
        .unwrap();
        assert!(record.contains(r#"innerHtml = "bbb ""#));
    }

    #[test]
    fn replace_reads_the_replacement_relative_to_documents_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "motion.html", "<p>aaa bbb ccc</p>");
        write(&dir, "new.html", "<p>XXX</p>");
        let config = Config {
            documents_path: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let merged = run(
            &invocation(
                Command::Replace {
                    from: 2,
                    to: 3,
                    replacement: PathBuf::from("new.html"),
                },
                PathBuf::from("motion.html"),
            ),
            &config,
        )
        .unwrap();
        assert_eq!(merged, "<p>aaa XXX ccc</p>");
    }

    #[test]
    fn affected_lines_of_a_numbered_diff() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "motion.html", "<p>aaa bbb ccc</p>");
        let config = Config::default();

        let numbered = run(&invocation(Command::Number, file), &config).unwrap();
        let diff = numbered.replacen("bbb ", "<del>bbb </del><ins>xyz </ins>", 1);
        let diff_file = write(&dir, "diff.html", &diff);

        let affected = run(&invocation(Command::Affected, diff_file.clone()), &config).unwrap();
        assert_eq!(affected, "2\t3");

        let accepted = run(&invocation(Command::Accept, diff_file), &config).unwrap();
        assert_eq!(strip_line_numbers(&accepted).unwrap(), "<p>aaa xyz ccc</p>");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = run(
            &invocation(Command::Number, PathBuf::from("/nonexistent/motion.html")),
            &Config::default(),
        );
        assert!(result.is_err());
    }
}
