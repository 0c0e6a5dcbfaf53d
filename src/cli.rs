use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;

const LONG_ABOUT: &str = "\
Transform a tab-separated extract of legacy user records into SQL statements
that seed the new users table.

The first line of the extract is a header and is ignored. Each following line
holds the user's email followed by a numeric status code, which is mapped as
0 -> enabled, 1 -> disabled, 2 -> locked, 3 -> inactive. Rows with any other
status are reported and skipped. One INSERT IGNORE statement is written per
remaining row, all sharing a single created_on timestamp.";

#[derive(Debug, Parser)]
#[command(
    name = "transform-user-extract",
    version,
    about = "Transform a legacy user extract into SQL seed statements",
    long_about = LONG_ABOUT,
    override_usage = "transform-user-extract [OPTIONS] <input_tsv> <output_sql>"
)]
pub struct Cli {
    /// Input extract followed by the SQL file to create (overwritten if present)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
    /// Input delimiter character (supports 'tab', ',', ';', '|'; defaults to tab)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Fixed created_on value (YYYY-MM-DDTHH:MM:SS) instead of the current UTC time
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<NaiveDateTime>,
    /// Also write the run summary as JSON to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
    /// Suppress per-row progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: Option<u8>,
    pub input_encoding: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub summary: Option<PathBuf>,
    pub quiet: bool,
}

/// What the command line asked for, decided from the positional argument count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Describe,
    Transform(TransformArgs),
    BadArgumentCount(usize),
}

impl Cli {
    pub fn into_invocation(self) -> Invocation {
        let mut paths = self.paths.into_iter();
        match (paths.next(), paths.next(), paths.len()) {
            (None, _, _) => Invocation::Describe,
            (Some(input), Some(output), 0) => Invocation::Transform(TransformArgs {
                input,
                output,
                delimiter: self.delimiter,
                input_encoding: self.input_encoding,
                timestamp: self.timestamp,
                summary: self.summary,
                quiet: self.quiet,
            }),
            (Some(_), None, _) => Invocation::BadArgumentCount(1),
            (Some(_), Some(_), rest) => Invocation::BadArgumentCount(rest + 2),
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" | "\\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let trimmed = value.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| format!("Invalid timestamp '{value}', expected YYYY-MM-DDTHH:MM:SS"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(args: &[&str]) -> Invocation {
        let argv = std::iter::once("transform-user-extract").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("parse").into_invocation()
    }

    #[test]
    fn no_paths_describes_the_tool() {
        assert_eq!(invocation(&[]), Invocation::Describe);
    }

    #[test]
    fn two_paths_run_the_transform() {
        match invocation(&["users.tsv", "users.sql", "--quiet"]) {
            Invocation::Transform(args) => {
                assert_eq!(args.input, PathBuf::from("users.tsv"));
                assert_eq!(args.output, PathBuf::from("users.sql"));
                assert!(args.quiet);
                assert_eq!(args.delimiter, None);
            }
            other => panic!("unexpected invocation {other:?}"),
        }
    }

    #[test]
    fn other_path_counts_are_rejected() {
        assert_eq!(invocation(&["a"]), Invocation::BadArgumentCount(1));
        assert_eq!(invocation(&["a", "b", "c"]), Invocation::BadArgumentCount(3));
        assert_eq!(
            invocation(&["a", "b", "c", "d"]),
            Invocation::BadArgumentCount(4)
        );
    }

    #[test]
    fn delimiter_aliases_parse() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("comma"), Ok(b','));
        assert_eq!(parse_delimiter("#"), Ok(b'#'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn timestamp_accepts_t_or_space_separator() {
        let expected =
            NaiveDateTime::parse_from_str("2018-06-01 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parse_timestamp("2018-06-01T12:30:00"), Ok(expected));
        assert_eq!(parse_timestamp("2018-06-01 12:30:00"), Ok(expected));
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2018-13-01T00:00:00").is_err());
    }
}
