use std::fs;

use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(fields))) = (response.as_object_mut(), data) {
                target.extend(fields);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a result body: raw text in text mode, `{ "success": true, <key>: value }` in JSON mode
pub fn output_content(output_format: &OutputFormat, key: &str, content: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "success": true, key: content }))?);
        }
        OutputFormat::Text => match content {
            Value::String(text) => println!("{}", text),
            other => println!("{}", serde_json::to_string_pretty(&other)?),
        },
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Parse a schema argument: inline JSON, or `@path` to read it from a file.
/// Input that is not JSON is passed along as a string.
pub fn read_schema(arg: &str) -> anyhow::Result<Value> {
    let raw = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read schema file '{}': {}", path, e))?,
        None => arg.to_string(),
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(anyhow::anyhow!("JSON schema is required"));
    }

    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_schema_is_parsed() {
        let schema = read_schema(r#"{"title": "string"}"#).unwrap();
        assert_eq!(schema, json!({ "title": "string" }));
    }

    #[test]
    fn non_json_schema_is_forwarded_as_text() {
        let schema = read_schema("title: string").unwrap();
        assert_eq!(schema, json!("title: string"));
    }

    #[test]
    fn empty_schema_is_rejected() {
        assert!(read_schema("   ").is_err());
        assert!(read_schema("@/nonexistent/schema.json").is_err());
    }
}
