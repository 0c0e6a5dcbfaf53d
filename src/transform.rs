use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use encoding_rs::Encoding;
use log::{debug, info, warn};

use crate::{
    cli::TransformArgs,
    io_utils,
    record::{STATUS_COLUMN, UserRecord},
    sql::InsertStatement,
    summary::RunSummary,
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn execute(args: &TransformArgs) -> Result<RunSummary> {
    let created_on = run_timestamp(args.timestamp);
    let delimiter = io_utils::resolve_input_delimiter(args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Transforming '{}' -> '{}' (delimiter '{}', created_on {})",
        args.input.display(),
        args.output.display(),
        crate::printable_delimiter(delimiter),
        created_on
    );

    let mut reader = io_utils::open_extract_reader_from_path(&args.input, delimiter)?;
    let mut writer = io_utils::open_output_writer(&args.output)?;
    let summary = {
        let mut progress: Box<dyn Write> = if args.quiet {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout().lock())
        };
        transform_records(&mut reader, &mut writer, &mut progress, encoding, &created_on)
            .with_context(|| format!("Transforming {:?}", args.input))?
    };
    writer
        .flush()
        .with_context(|| format!("Flushing output file {:?}", args.output))?;

    for line in summary.report_lines() {
        println!("{line}");
    }
    if summary.skipped() > 0 {
        warn!(
            "Skipped {} of {} row(s) with unusable status values",
            summary.skipped(),
            summary.total
        );
    }
    info!(
        "Wrote {} statement(s) to {:?}",
        summary.processed, args.output
    );

    if let Some(path) = &args.summary {
        summary.save(path)?;
        info!("Run summary written to {:?}", path);
    }
    Ok(summary)
}

/// Formats the single timestamp shared by every row of a run.
pub fn run_timestamp(fixed: Option<NaiveDateTime>) -> String {
    fixed
        .unwrap_or_else(|| Utc::now().naive_utc())
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Reads every data row from `reader`, appending one statement per mappable
/// row to `output` and one progress line per row to `progress`.
pub fn transform_records<R, W, P>(
    reader: &mut csv::Reader<R>,
    output: &mut W,
    progress: &mut P,
    encoding: &'static Encoding,
    created_on: &str,
) -> Result<RunSummary>
where
    R: Read,
    W: Write + ?Sized,
    P: Write + ?Sized,
{
    let mut summary = RunSummary::new(created_on);
    let mut sql = String::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let line = idx + 2;
        let record = record.with_context(|| format!("Reading row {line}"))?;
        let fields = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {line}"))?;
        let raw = raw_pair(&fields);
        match UserRecord::from_fields(&fields) {
            Ok(user) => {
                sql.clear();
                InsertStatement {
                    email: &user.email,
                    state: user.state,
                    created_on,
                }
                .render_into(&mut sql);
                output
                    .write_all(sql.as_bytes())
                    .with_context(|| format!("Writing statement for row {line}"))?;
                writeln!(progress, "{raw} -> {}", user.state).context("Writing progress")?;
                debug!("Row {line}: {} mapped to {}", user.email, user.state);
                summary.record_processed(user.state);
            }
            Err(err) => {
                writeln!(progress, "{raw} -> ERROR: {err}, row skipped")
                    .context("Writing progress")?;
                debug!("Row {line}: {err}");
                summary.record_skipped();
            }
        }
    }
    Ok(summary)
}

fn raw_pair(fields: &[String]) -> String {
    fields
        .iter()
        .take(STATUS_COLUMN + 1)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\t")
}
