//
//  kibana-api
//  api/common/ndjson.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Newline-delimited JSON records.
//!
//! Export endpoints answer with one JSON document per line instead of a single
//! JSON value. Some Kibana versions prefix continuation lines with a stray
//! comma; [`NdjsonRecords::parse`] strips it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use super::{Error, Result};

/// An ordered list of raw JSON records.
///
/// # Example
///
/// ```rust
/// use kibana_api::api::common::NdjsonRecords;
///
/// let records = NdjsonRecords::parse(b"{\"id\":1}\n,{\"id\":2}\n").unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records.iter().nth(1).unwrap().get(), "{\"id\":2}");
///
/// let mut out = Vec::new();
/// records.write(&mut out).unwrap();
/// assert_eq!(out, b"{\"id\":1}\n{\"id\":2}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NdjsonRecords {
    records: Vec<Box<RawValue>>,
}

impl NdjsonRecords {
    /// Splits `raw` into records.
    ///
    /// Blank lines are skipped. Each remaining line must be a complete JSON
    /// document once a single leading comma is removed.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let mut records = Vec::new();
        for line in raw.split(|b| *b == b'\n') {
            let line = line.trim_ascii();
            let line = line.strip_prefix(b",").unwrap_or(line).trim_ascii();
            if line.is_empty() {
                continue;
            }
            let record: Box<RawValue> = serde_json::from_slice(line).map_err(Error::Decode)?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Builds records from already serialized values.
    pub fn from_records(records: Vec<Box<RawValue>>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the raw records in order.
    pub fn iter(&self) -> impl Iterator<Item = &RawValue> {
        self.records.iter().map(|r| r.as_ref())
    }

    /// Decodes every record as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.records
            .iter()
            .map(|r| serde_json::from_str(r.get()).map_err(Error::Decode))
            .collect()
    }

    /// Writes the records one per line.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.records {
            writer.write_all(record.get().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the records to `path`, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write(BufWriter::new(file))
    }

    /// Serializes the records back into an NDJSON body.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = Vec::new();
        for record in &self.records {
            out.extend_from_slice(record.get().as_bytes());
            out.push(b'\n');
        }
        Bytes::from(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = concat!(
        "{\"list_id\":\"ips\",\"type\":\"detection\"}\n",
        ",{\"item_id\":\"a\",\"list_id\":\"ips\"}\n",
        "\n",
        "{\"exported_exception_list_count\":1}\n",
    );

    #[test]
    fn test_parse_keeps_order_and_strips_commas() {
        let records = NdjsonRecords::parse(EXPORT.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        let lines: Vec<&str> = records.iter().map(|r| r.get()).collect();
        assert_eq!(lines[1], "{\"item_id\":\"a\",\"list_id\":\"ips\"}");
        assert!(lines[2].contains("exported_exception_list_count"));
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        assert!(NdjsonRecords::parse(b"{\"ok\":1}\n{broken\n").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let err = NdjsonRecords::parse(b"{\"ok\":1}\n{\"name\":\"\xff\"}\n").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_write_to_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.ndjson");

        let records = NdjsonRecords::parse(EXPORT.as_bytes()).unwrap();
        records.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }

    #[test]
    fn test_decode_records() {
        let records = NdjsonRecords::parse(b"{\"n\":1}\n{\"n\":2}").unwrap();
        let values: Vec<serde_json::Value> = records.decode().unwrap();
        assert_eq!(values[1]["n"], 2);
    }
}
