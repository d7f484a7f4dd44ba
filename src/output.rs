//! Flat, string-valued rendering of an expanded resource.
//!
//! Templating layers consume one string per attribute. Primitives are
//! rendered as text, composites as JSON, nulls stay null. The collected
//! validation errors travel alongside under [`ERROR_MESSAGE_KEY`].
//!
//! All JSON text is written by [`to_json_string`]: `", "` and `": "`
//! separators, non-ASCII characters escaped as `\uXXXX`.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};

use crate::engine::error::{Error, Result};
use crate::model::ExtendedResource;

/// Output key holding the newline-joined validation errors.
pub const ERROR_MESSAGE_KEY: &str = "error_message";

/// JSON formatter with spaced separators and ASCII-only output.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiSpacedFormatter;

impl Formatter for AsciiSpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(ch.encode_utf8(&mut [0u8; 4]).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Encode a value as JSON text with [`AsciiSpacedFormatter`].
pub fn to_json_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, AsciiSpacedFormatter);
    value
        .serialize(&mut serializer)
        .map_err(Error::Serialization)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::Invariant(format!("encoded JSON is not UTF-8: {}", e)))
}

/// Render one attribute value.
///
/// Returns `None` for composites, which need JSON encoding instead.
pub fn format_primitive(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::Bool(true) => Some(Value::String("true".to_string())),
        Value::Bool(false) => Some(Value::String("false".to_string())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Flatten the resource and its validation errors into the output map.
///
/// Keys follow the resource's field order; `old_cluster` is never included.
pub fn flatten_output(
    resource: &ExtendedResource,
    errors: &[String],
) -> Result<Map<String, Value>> {
    let Value::Object(fields) = serde_json::to_value(resource).map_err(Error::Serialization)?
    else {
        return Err(Error::Invariant(
            "resource did not serialize to an object".to_string(),
        ));
    };

    let mut output = Map::with_capacity(fields.len() + 1);
    for (key, value) in fields {
        let rendered = match format_primitive(&value) {
            Some(primitive) => primitive,
            None => Value::String(to_json_string(&value)?),
        };
        output.insert(key, rendered);
    }
    output.insert(
        ERROR_MESSAGE_KEY.to_string(),
        Value::String(errors.join("\n")),
    );
    Ok(output)
}
