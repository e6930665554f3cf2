use serde::Serialize;
use std::io::Write;

/// Write records to an output stream, one JSON object per line.
pub fn write_jsonl<T: Serialize>(out: &mut dyn Write, records: &[T]) -> Result<(), String> {
    for record in records {
        serde_json::to_writer(&mut *out, record)
            .map_err(|error| format!("failed to serialize JSON record: {error}"))?;
        out.write_all(b"\n")
            .map_err(|error| format!("failed to write JSONL newline: {error}"))?;
    }

    out.flush()
        .map_err(|error| format!("failed to flush JSONL output: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_jsonl;
    use crate::document::{Document, Metadata};
    use serde_json::{Value, json};
    use std::io::{Cursor, Error, ErrorKind, Write};

    #[test]
    fn writes_empty_record_set() {
        let mut out = Cursor::new(Vec::new());
        write_jsonl::<Document>(&mut out, &[]).expect("write empty records");
        assert!(out.into_inner().is_empty());
    }

    #[test]
    fn writes_documents_one_per_line() {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_owned(), json!("a.html"));
        let documents = vec![
            Document::builder()
                .doc_id("one")
                .metadata(Some(metadata))
                .text("first")
                .build()
                .expect("build document"),
            Document::builder()
                .doc_id("two")
                .text("second")
                .build()
                .expect("build document"),
        ];
        let mut out = Cursor::new(Vec::new());

        write_jsonl(&mut out, &documents).expect("write documents");

        let output = String::from_utf8(out.into_inner()).expect("valid UTF-8 output");
        assert_eq!(
            output,
            "{\"doc_id\":\"one\",\"metadata\":{\"source\":\"a.html\"},\"text\":\"first\"}\n\
             {\"doc_id\":\"two\",\"metadata\":{},\"text\":\"second\"}\n"
        );
    }

    #[test]
    fn writes_refusal_envelope_as_single_json_object_line() {
        let records = vec![json!({
            "version": "spyder-index.v0",
            "outcome": "REFUSAL",
            "refusal": {
                "code": "E_NO_INPUT",
                "message": "No input files given",
                "detail": {},
                "next_command": null
            }
        })];
        let mut out = Cursor::new(Vec::new());

        write_jsonl(&mut out, &records).expect("write refusal");

        let output = String::from_utf8(out.into_inner()).expect("valid UTF-8 output");
        assert_eq!(output.lines().count(), 1);
        let parsed: Value = serde_json::from_str(output.trim_end()).expect("parse line");
        assert_eq!(parsed, records[0]);
    }

    #[test]
    fn surfaces_write_errors() {
        struct AlwaysFailWriter;

        impl Write for AlwaysFailWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(Error::new(ErrorKind::BrokenPipe, "write failed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = AlwaysFailWriter;
        let error = write_jsonl(&mut writer, &[json!({"path": "a.html"})]).expect_err("fail");
        assert!(error.contains("failed to serialize JSON record"));
    }
}
