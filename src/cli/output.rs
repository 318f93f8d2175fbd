// Output formatting for CLI

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::config::OutputFormat;

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output any serializable record
    pub fn output<T: Serialize>(&self, value: &T, writer: &mut impl Write) -> Result<()> {
        let value = serde_json::to_value(value)?;
        match self.format {
            OutputFormat::Pretty => writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(&value)?)?,
            OutputFormat::KeyValue => self.output_key_value(&value, "", writer)?,
            OutputFormat::Table => self.output_table(&value, writer)?,
        }
        Ok(())
    }

    /// Output as key-value pairs, flattening nested objects into dotted keys
    fn output_key_value(
        &self,
        value: &serde_json::Value,
        prefix: &str,
        writer: &mut impl Write,
    ) -> Result<()> {
        match value {
            serde_json::Value::Object(obj) => {
                for (key, value) in obj {
                    let key = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    self.output_key_value(value, &key, writer)?;
                }
            }
            other => writeln!(writer, "{}: {}", prefix, format_value(other))?,
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, value: &serde_json::Value, writer: &mut impl Write) -> Result<()> {
        let Some(obj) = value.as_object() else {
            writeln!(writer, "{}", format_value(value))?;
            return Ok(());
        };
        let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        for (key, value) in obj {
            writeln!(
                writer,
                "{:<width$}{}",
                format!("{}:", key),
                format_value(value),
                width = max_key_len + 2
            )?;
        }
        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

/// Format a JSON value for display
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "(null)".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else {
                format!("[{} items]", arr.len())
            }
        }
        serde_json::Value::Object(obj) => {
            if obj.is_empty() {
                "{}".to_string()
            } else {
                format!("{{{} items}}", obj.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euphory::TagMap;

    fn render<T: Serialize>(format: OutputFormat, value: &T) -> String {
        let mut out = Vec::new();
        OutputFormatter::new(format, true).output(value, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn compact_json() {
        let map: TagMap = [("title", "Mix")].into_iter().collect();
        assert_eq!(render(OutputFormat::Json, &map), "{\"title\":\"Mix\"}\n");
    }

    #[test]
    fn key_value_flattens_nested() {
        let value = serde_json::json!({"tag": {"title": "Mix"}, "count": 2});
        let text = render(OutputFormat::KeyValue, &value);
        assert!(text.contains("tag.title: Mix\n"));
        assert!(text.contains("count: 2\n"));
    }

    #[test]
    fn table_summarizes_collections() {
        let value = serde_json::json!({"tracks": [1, 2], "extra": {}});
        let text = render(OutputFormat::Table, &value);
        assert!(text.contains("[2 items]"));
        assert!(text.contains("{}"));
    }
}
