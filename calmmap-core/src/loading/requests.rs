//! Ranked requests from a tab-separated file
//!
//! Columns, after a header row: rank, street, from, to, district. A `from`
//! of `all` and a `to` of `end` are the same as leaving them blank.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::model::Request;
use crate::Error;

/// Reads all requests from a TSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a row has no valid rank
/// or street name.
pub fn read_requests_tsv(path: &Path) -> Result<Vec<Request>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    parse_requests_tsv(file)
}

/// Parses requests from any TSV source. See [`read_requests_tsv`].
pub fn parse_requests_tsv<R: Read>(reader: R) -> Result<Vec<Request>, Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    for (row, record) in reader.records().enumerate() {
        requests.push(request_from_record(row + 1, &record?)?);
    }
    Ok(requests)
}

fn request_from_record(row: usize, record: &StringRecord) -> Result<Request, Error> {
    let field = |idx: usize| record.get(idx).unwrap_or_default();

    let rank = field(0).parse().map_err(|e| {
        Error::InvalidData(format!("Request row {row}: invalid rank {:?}: {e}", field(0)))
    })?;
    let street = field(1);
    if street.is_empty() {
        return Err(Error::InvalidData(format!(
            "Request row {row}: missing street name"
        )));
    }

    Ok(Request::new(rank, street)
        .from_street(blank_if(field(2), "all"))
        .to_street(blank_if(field(3), "end"))
        .in_district(field(4)))
}

fn blank_if<'a>(value: &'a str, placeholder: &str) -> &'a str {
    if value.eq_ignore_ascii_case(placeholder) {
        ""
    } else {
        value
    }
}
