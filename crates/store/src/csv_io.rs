//! CSV conversion
//!
//! Import flattens each record to one line with fields joined by a space.
//! Export writes each line as a single always-quoted field.

use crate::Result;

/// Flatten CSV bytes into plain text
pub fn csv_to_text(data: &[u8]) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        lines.push(record.iter().collect::<Vec<_>>().join(" "));
    }
    Ok(lines.join("\n"))
}

/// Write each line of `text` as a one-field CSV record
pub fn text_to_csv(text: &str) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for line in text.split('\n') {
        writer.write_record([line])?;
    }
    let mut out = writer.into_inner().map_err(|e| e.into_error())?;
    if out.last() == Some(&b'\n') {
        out.pop();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_joined_with_spaces() {
        let text = csv_to_text(b"a,b,c\nd,e\n").unwrap();
        assert_eq!(text, "a b c\nd e");
    }

    #[test]
    fn test_quoted_commas_stay_in_field() {
        let text = csv_to_text(b"\"x, y\",z").unwrap();
        assert_eq!(text, "x, y z");
    }

    #[test]
    fn test_export_quotes_every_line() {
        let out = text_to_csv("one\nsay \"hi\"\n").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"one\"\n\"say \"\"hi\"\"\"\n\"\""
        );
    }

    #[test]
    fn test_export_then_import_keeps_lines() {
        let original = "first, with comma\nsecond";
        let csv = text_to_csv(original).unwrap();
        assert_eq!(csv_to_text(&csv).unwrap(), original);
    }
}
