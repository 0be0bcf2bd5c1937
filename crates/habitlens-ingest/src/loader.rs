#![deny(unsafe_code)]

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use habitlens_model::{Record, Table, TableBuilder};

use crate::error::{IngestError, Result};

/// Decodes every length-prefixed BSON document from `reader`, in stream
/// order, until clean end of input.
///
/// There is no partial-record recovery: a document that fails to decode
/// (including one cut off by truncation) fails the whole stream with
/// [`IngestError::Decode`].
pub fn read_documents<R: Read>(reader: R, collection: &str) -> Result<Vec<Record>> {
    let mut reader = BufReader::new(reader);
    let mut records = Vec::new();
    loop {
        let at_end = reader
            .fill_buf()
            .map_err(|source| IngestError::Read {
                collection: collection.to_string(),
                source,
            })?
            .is_empty();
        if at_end {
            break;
        }
        let document =
            bson::Document::from_reader(&mut reader).map_err(|source| IngestError::Decode {
                collection: collection.to_string(),
                source,
            })?;
        records.push(Record::from(document));
    }
    debug!(collection, documents = records.len(), "decoded document stream");
    Ok(records)
}

/// Loads `{dir}/{collection}.bson` and materializes it as a [`Table`].
///
/// An absent file is [`IngestError::SourceNotFound`], which callers treat as
/// a skip; everything else is fatal for the collection.
pub fn load_collection(dir: &Path, collection: &str) -> Result<Table> {
    let path = dir.join(format!("{collection}.bson"));
    if !path.is_file() {
        return Err(IngestError::SourceNotFound { path });
    }
    let file = File::open(&path).map_err(|source| IngestError::Io {
        path: path.clone(),
        source,
    })?;
    let records = read_documents(file, collection)?;
    let mut builder = TableBuilder::new(collection);
    for record in records {
        builder.push_record(record);
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    fn stream_of(documents: &[bson::Document]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for document in documents {
            document.to_writer(&mut bytes).expect("encode document");
        }
        bytes
    }

    #[test]
    fn decodes_documents_in_stream_order() {
        let bytes = stream_of(&[doc! { "name": "ada" }, doc! { "name": "grace" }]);
        let records = read_documents(bytes.as_slice(), "users").expect("read stream");
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("name"),
            Some(&habitlens_model::Value::Text("ada".to_string()))
        );
    }

    #[test]
    fn empty_stream_yields_no_records() {
        let records = read_documents([].as_slice(), "users").expect("read stream");
        assert!(records.is_empty());
    }

    #[test]
    fn truncated_stream_is_a_decode_error() {
        let mut bytes = stream_of(&[doc! { "name": "ada" }]);
        bytes.truncate(bytes.len() - 3);
        let error = read_documents(bytes.as_slice(), "users").unwrap_err();
        assert!(matches!(error, IngestError::Decode { .. }), "{error:?}");
    }

    #[test]
    fn garbage_after_valid_document_is_fatal() {
        let mut bytes = stream_of(&[doc! { "ok": true }]);
        bytes.extend_from_slice(&[0xff, 0xff, 0xff]);
        let error = read_documents(bytes.as_slice(), "users").unwrap_err();
        assert!(matches!(error, IngestError::Decode { .. }), "{error:?}");
    }
}
