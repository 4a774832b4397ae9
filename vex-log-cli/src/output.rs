//! Rendering decoded lines as text or JSON

use crate::config::OutputFormat;
use anyhow::Result;
use std::io::Write;
use vex_log_decoder::DecodedLine;

/// Write decoded lines, one per output line
pub fn write_lines<W: Write + ?Sized>(out: &mut W, lines: &[DecodedLine], format: OutputFormat) -> Result<()> {
    for line in lines {
        match format {
            OutputFormat::Text => writeln!(out, "{}", line)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, line)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Header printed before each file when several are decoded
pub fn write_header<W: Write + ?Sized>(out: &mut W, name: &str, first: bool) -> Result<()> {
    if !first {
        writeln!(out)?;
    }
    writeln!(out, "==> {} <==", name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex_log_decoder::Decoder;

    fn sample() -> Vec<DecodedLine> {
        let decoder = Decoder::new();
        vec![
            decoder.decode_record("0000000000000P12EX1").unwrap(),
            decoder.decode_record("ABC").unwrap(),
        ]
    }

    #[test]
    fn test_text_output() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &sample(), OutputFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "(0000000000000P12EX1) 0.00s Pneumatic 12 Cylinder 1 Extend\nABC\n"
        );
    }

    #[test]
    fn test_json_output_is_one_object_per_line() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &sample(), OutputFormat::Json).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["kind"], "event");
        assert_eq!(values[0]["port"], "12");
        assert_eq!(values[0]["action"], "Cylinder 1 Extend");
        assert_eq!(values[1]["kind"], "pass_through");
    }

    #[test]
    fn test_headers_are_separated() {
        let mut buf = Vec::new();
        write_header(&mut buf, "a.txt", true).unwrap();
        write_header(&mut buf, "b.txt", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "==> a.txt <==\n\n==> b.txt <==\n");
    }
}
