//! I/O helpers for reading the user extract and writing the SQL seed file.
//!
//! - **Delimiter resolution**: tab unless overridden, whatever the file is called.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8. Fields
//!   are decoded without BOM sniffing.
//! - **Reader/writer construction**: the first physical line is consumed as the
//!   header before any parsing, even when it is empty. The extract reader is
//!   flexible (rows may carry any number of fields) and does no quote
//!   processing, so a field is exactly the text between two delimiters.
//! - **stdin**: an input path of `-` reads from standard input.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(provided: Option<u8>) -> u8 {
    provided.unwrap_or(DEFAULT_TSV_DELIMITER)
}

/// Discards the header line of `reader` and returns a reader over the data rows.
pub fn open_extract_reader<R>(mut reader: R, delimiter: u8) -> Result<csv::Reader<R>>
where
    R: BufRead,
{
    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .context("Reading header line")?;
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true);
    Ok(builder.from_reader(reader))
}

pub fn open_extract_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn BufRead>>> {
    let reader: Box<dyn BufRead> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
        ))
    };
    open_extract_reader(reader, delimiter).with_context(|| format!("Reading {path:?}"))
}

/// Creates (or truncates) the output file.
pub fn open_output_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    Ok(BufWriter::new(file))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}
