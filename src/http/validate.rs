//! Request validation for job submissions.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::jobs::JobInput;

fn cell_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{10,15}$").expect("valid regex"))
}

fn linkedin_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://(www\.)?linkedin\.com/in/[\w\-]+/?$").expect("valid regex")
    })
}

/// Validate a raw submission body. Returns the typed input, or every
/// validation message so the caller sees all problems at once.
pub fn validate_job_request(data: &Value) -> Result<JobInput, Vec<String>> {
    let mut errors = Vec::new();

    let name = match data.get("name") {
        None | Some(Value::Null) => {
            errors.push("'name' is required".to_string());
            None
        }
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(_) => {
            errors.push("'name' must be a non-empty string".to_string());
            None
        }
    };

    let cell_number = match data.get("cell_number") {
        None | Some(Value::Null) => {
            errors.push("'cell_number' is required".to_string());
            None
        }
        Some(Value::String(s)) => {
            if cell_number_re().is_match(s) {
                Some(s.clone())
            } else {
                errors.push("'cell_number' must be 10-15 digits".to_string());
                None
            }
        }
        Some(_) => {
            errors.push("'cell_number' must be a string".to_string());
            None
        }
    };

    let linkedin_account = match data.get("linkedin_account") {
        None | Some(Value::Null) => {
            errors.push("'linkedin_account' is required".to_string());
            None
        }
        Some(Value::String(s)) => {
            if linkedin_url_re().is_match(s) {
                Some(s.clone())
            } else {
                errors.push("'linkedin_account' must be a valid LinkedIn URL".to_string());
                None
            }
        }
        Some(_) => {
            errors.push("'linkedin_account' must be a string".to_string());
            None
        }
    };

    match (name, cell_number, linkedin_account) {
        (Some(name), Some(cell_number), Some(linkedin_account)) if errors.is_empty() => {
            Ok(JobInput {
                name,
                cell_number,
                linkedin_account,
            })
        }
        _ => Err(errors),
    }
}
