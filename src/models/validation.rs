use thiserror::Error;

/// Reason a submitted note form was rejected.
///
/// The `Display` text is shown to the user above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Note title must not be empty")]
    EmptyTitle,
    #[error("Note content must not be empty")]
    EmptyContent,
    #[error("Note status must not be empty")]
    EmptyStatus,
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "noteTitle",
            Self::EmptyContent => "noteContent",
            Self::EmptyStatus => "noteStatus",
        }
    }
}

/// The three user-editable text fields of a note, all known to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub status: String,
}

impl NoteFields {
    /// Check raw form input. A field that is absent, empty, or only whitespace
    /// is rejected; fields are checked in title, content, status order.
    ///
    /// Accepted values are kept exactly as submitted.
    pub fn validate(
        title: Option<&str>,
        content: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let title = non_blank(title).ok_or(ValidationError::EmptyTitle)?;
        let content = non_blank(content).ok_or(ValidationError::EmptyContent)?;
        let status = non_blank(status).ok_or(ValidationError::EmptyStatus)?;

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            status: status.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
