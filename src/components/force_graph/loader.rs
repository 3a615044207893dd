use std::collections::BTreeMap;

use log::info;

use super::types::RawRecord;
use crate::error::LoadError;

const SOURCE: &str = "source";
const TARGET: &str = "target";
const TYPE: &str = "type";

/// Reads an edge list with a header row.
///
/// `source` and `target` columns are required, `type` is optional and any
/// other column is kept in [`RawRecord::extra`]. Short rows are accepted and
/// leave the missing cells as `None`.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, LoadError> {
	let mut reader = csv::ReaderBuilder::new()
		.flexible(true)
		.trim(csv::Trim::All)
		.from_reader(text.as_bytes());

	let headers = reader.headers()?.clone();
	let column = |name: &'static str| headers.iter().position(|h| h == name);
	let source = column(SOURCE).ok_or(LoadError::MissingColumn(SOURCE))?;
	let target = column(TARGET).ok_or(LoadError::MissingColumn(TARGET))?;
	let kind = column(TYPE);

	let mut records = Vec::new();
	for row in reader.records() {
		let row = row?;

		let cell = |i: usize| row.get(i).map(str::to_owned);
		let extra: BTreeMap<String, String> = headers
			.iter()
			.zip(row.iter())
			.enumerate()
			.filter(|(i, _)| *i != source && *i != target && Some(*i) != kind)
			.map(|(_, (h, v))| (h.to_owned(), v.to_owned()))
			.collect();

		records.push(RawRecord {
			source: cell(source),
			target: cell(target),
			kind: kind.and_then(cell),
			extra,
		});
	}
	Ok(records)
}

/// Fetches `url` once and parses the body as an edge list.
pub async fn fetch_records(url: &str) -> Result<Vec<RawRecord>, LoadError> {
	info!("fetching edge list from {}", url);
	let fetch_err = |err: reqwest::Error| LoadError::Fetch {
		url: url.to_owned(),
		message: err.to_string(),
	};

	let response = reqwest::get(url).await.map_err(fetch_err)?;
	let status = response.status();
	if !status.is_success() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: status.as_u16(),
		});
	}
	let body = response.text().await.map_err(fetch_err)?;

	let records = parse_records(&body)?;
	info!("loaded {} record(s) from {}", records.len(), url);
	Ok(records)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_required_and_extra_columns() {
		let text = "source,target,type,note\nA,B,x,first\nB,C,y,second\n";
		let records = parse_records(text).unwrap();

		assert_eq!(records.len(), 2);
		let first = &records[0];
		assert_eq!(first.source.as_deref(), Some("A"));
		assert_eq!(first.target.as_deref(), Some("B"));
		assert_eq!(first.kind.as_deref(), Some("x"));
		assert_eq!(first.extra.get("note").map(String::as_str), Some("first"));
		assert_eq!(first.extra.len(), 1);
	}

	#[test]
	fn column_order_does_not_matter() {
		let text = "type,target,source\nlicensing,Microsoft,Amazon\n";
		let record = &parse_records(text).unwrap()[0];
		assert_eq!(record.source.as_deref(), Some("Amazon"));
		assert_eq!(record.target.as_deref(), Some("Microsoft"));
		assert_eq!(record.kind.as_deref(), Some("licensing"));
	}

	#[test]
	fn short_rows_leave_cells_empty() {
		let text = "source,target,type\nA\n";
		let record = &parse_records(text).unwrap()[0];
		assert_eq!(record.source.as_deref(), Some("A"));
		assert_eq!(record.target, None);
		assert_eq!(record.kind, None);
	}

	#[test]
	fn long_rows_are_kept() {
		let records = parse_records("source,target\nA,B,surplus,cells\nB,C\n").unwrap();
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].target.as_deref(), Some("B"));
		assert!(records[0].extra.is_empty());
	}

	#[test]
	fn cells_are_trimmed() {
		let text = "source, target ,type\n  A , B ,x\n";
		let record = &parse_records(text).unwrap()[0];
		assert_eq!(record.source.as_deref(), Some("A"));
		assert_eq!(record.target.as_deref(), Some("B"));
	}

	#[test]
	fn type_column_is_optional() {
		let record = &parse_records("source,target\nA,B\n").unwrap()[0];
		assert_eq!(record.kind, None);
	}

	#[test]
	fn missing_required_column_is_an_error() {
		assert_eq!(
			parse_records("from,target,type\nA,B,x\n"),
			Err(LoadError::MissingColumn("source"))
		);
		assert_eq!(
			parse_records("source,to\nA,B\n"),
			Err(LoadError::MissingColumn("target"))
		);
	}

	#[test]
	fn empty_document_is_missing_columns() {
		assert_eq!(parse_records(""), Err(LoadError::MissingColumn("source")));
	}

	#[test]
	fn header_only_yields_no_records() {
		assert!(parse_records("source,target,type\n").unwrap().is_empty());
	}
}
