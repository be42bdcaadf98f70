//! Required-field checks for urlencoded and multipart form bodies.
//!
//! Form structs deserialize every field as `Option<String>` so a missing
//! field never fails extraction; handlers then collect the gaps here and
//! answer with a single 400 listing all of them.

use crate::errors::AppError;

#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed value, recording `name` as missing when the value
    /// is absent or blank.
    pub fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            tracing::warn!(fields = ?self.missing, "rejected form with missing fields");
            Err(AppError::MissingFields(self.missing))
        }
    }
}

/// Absent optional fields are stored as the empty string, never NULL.
pub fn optional(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
