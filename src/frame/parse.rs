//! Frame parsing for raw device lines.
//!
//! The device emits `<hdr>;<U>;<V>;<W>;<T>[;...]` with a header/command
//! token in field 0 and the four measurements in fields 1-4. Parsing is
//! all-or-nothing: any malformed field rejects the whole frame.

use thiserror::Error;

use super::sample::{FieldKey, Sample};

/// Field delimiter in the device's ASCII output.
const DELIMITER: char = ';';

/// Minimum field count: the header token plus the four measurements.
const MIN_FIELDS: usize = 5;

/// Errors that can occur while decoding one frame.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("frame is not valid UTF-8: {0}")]
    NotText(#[from] std::str::Utf8Error),

    #[error("frame has {count} fields, need at least {MIN_FIELDS}")]
    TooFewFields { count: usize },

    #[error("field {field}: {text:?} is not a finite number")]
    InvalidValue { field: FieldKey, text: String },
}

/// Parse one raw line into a [`Sample`].
///
/// Pure and deterministic: identical input bytes yield identical results.
pub fn parse_frame(raw: &[u8]) -> Result<Sample, FrameError> {
    let text = std::str::from_utf8(raw)?.trim();
    let fields: Vec<&str> = text.split(DELIMITER).collect();

    if fields.len() < MIN_FIELDS {
        return Err(FrameError::TooFewFields {
            count: fields.len(),
        });
    }

    let mut values = [0.0f64; 4];
    for (slot, key) in values.iter_mut().zip(FieldKey::all()) {
        *slot = parse_field(fields[key.position()], *key)?;
    }

    Ok(Sample::new(values[0], values[1], values[2], values[3]))
}

fn parse_field(text: &str, field: FieldKey) -> Result<f64, FrameError> {
    let value: f64 = text.trim().parse().map_err(|_| FrameError::InvalidValue {
        field,
        text: text.to_string(),
    })?;

    // `str::parse` accepts "inf" and "NaN"; the protocol does not.
    if !value.is_finite() {
        return Err(FrameError::InvalidValue {
            field,
            text: text.to_string(),
        });
    }

    Ok(value)
}
