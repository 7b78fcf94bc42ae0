use crate::error::Error;

pub const MAX_TEXT_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: i64,
}

impl Pagination {
    pub fn first(limit: i64) -> Self {
        Self { limit }
    }
}

/// Checks the text constraints shared by questions and choices.
pub fn validate_text(field: &str, text: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}
