//! The single JSON object printed per invocation.

use std::io::{self, Write};

use pdfscan::PageRecord;
use serde::Serialize;

/// Top-level result: either every page of the document or an error.
///
/// Serialized with `status` as the tag, so an `Ok` prints as
/// `{"status":"ok","pdf_path":…,"pages":[…]}` and an `Error` as
/// `{"status":"error","error":…,"pages":[]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Ok {
        pdf_path: String,
        pages: Vec<PageRecord>,
    },
    Error {
        error: String,
        pages: Vec<PageRecord>,
    },
}

impl Envelope {
    pub fn ok(pdf_path: impl Into<String>, pages: Vec<PageRecord>) -> Self {
        Envelope::Ok {
            pdf_path: pdf_path.into(),
            pages,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error {
            error: message.into(),
            pages: Vec::new(),
        }
    }

    /// Write the envelope as one line of UTF-8 JSON.
    ///
    /// Non-ASCII text is written as-is, never `\u` escaped.
    pub fn write_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfscan::{BBox, TableRecord};

    fn render(envelope: &Envelope) -> String {
        let mut buf = Vec::new();
        envelope.write_line(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn error_shape() {
        assert_eq!(
            render(&Envelope::error("pdf path not provided")),
            "{\"status\":\"error\",\"error\":\"pdf path not provided\",\"pages\":[]}\n"
        );
    }

    #[test]
    fn ok_shape_keeps_field_order() {
        let pages = vec![PageRecord {
            page: 1,
            text: String::new(),
            tables: vec![],
        }];
        assert_eq!(
            render(&Envelope::ok("a.pdf", pages)),
            "{\"status\":\"ok\",\"pdf_path\":\"a.pdf\",\"pages\":[{\"page\":1,\"text\":\"\",\"tables\":[]}]}\n"
        );
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let pages = vec![PageRecord {
            page: 1,
            text: "만족도 조사".to_string(),
            tables: vec![TableRecord::new(BBox::new(0.0, 0.0, 1.0, 1.0), "예\n아니오")],
        }];
        let line = render(&Envelope::ok("설문.pdf", pages));
        assert!(line.contains("\"pdf_path\":\"설문.pdf\""));
        assert!(line.contains("만족도 조사"));
        assert!(line.contains("예\\n아니오"));
    }

    #[test]
    fn output_is_exactly_one_line() {
        let pages = vec![PageRecord {
            page: 1,
            text: "line one\nline two\r\n".to_string(),
            tables: vec![],
        }];
        let line = render(&Envelope::ok("a.pdf", pages));
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }
}
