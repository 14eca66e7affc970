//! HTML rendering for the index page.

use crate::models::{Note, ValidationError};

/// Text the user submitted in a form that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedValues {
    pub title: String,
    pub content: String,
    pub status: String,
}

/// A rejected form submission, shown back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub error: ValidationError,
    /// The note being edited, or `None` for the add form.
    pub note_id: Option<i64>,
    pub values: SubmittedValues,
}

/// View model for the index page.
#[derive(Debug, Clone, Default)]
pub struct IndexView {
    /// All notes, newest first.
    pub list: Vec<Note>,
    pub form_error: Option<FormError>,
}

impl IndexView {
    pub fn new(list: Vec<Note>) -> Self {
        Self {
            list,
            form_error: None,
        }
    }

    pub fn with_error(mut self, form_error: FormError) -> Self {
        self.form_error = Some(form_error);
        self
    }

    fn error_for(&self, note_id: Option<i64>) -> Option<&FormError> {
        self.form_error.as_ref().filter(|e| e.note_id == note_id)
    }
}

/// Render the full index page.
pub fn render_index(view: &IndexView) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n<title>KeepNote</title>\n</head>\n<body>\n");
    out.push_str("<h1>KeepNote</h1>\n");

    if let Some(form_error) = &view.form_error {
        out.push_str("<p class=\"error\" role=\"alert\">");
        out.push_str(&escape_html(&form_error.error.to_string()));
        out.push_str("</p>\n");
    }

    let draft = view.error_for(None).map(|e| &e.values);
    render_add_form(&mut out, draft);

    if view.list.is_empty() {
        out.push_str("<p class=\"empty\">No notes yet.</p>\n");
    } else {
        out.push_str("<ul class=\"notes\">\n");
        for note in &view.list {
            let draft = view.error_for(Some(note.id)).map(|e| &e.values);
            render_note(&mut out, note, draft);
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_add_form(out: &mut String, draft: Option<&SubmittedValues>) {
    let empty = SubmittedValues::default();
    let values = draft.unwrap_or(&empty);

    out.push_str("<form class=\"add-note\" action=\"/add\" method=\"post\">\n");
    render_fields(out, &values.title, &values.content, &values.status);
    out.push_str("<button type=\"submit\">Add note</button>\n</form>\n");
}

fn render_note(out: &mut String, note: &Note, draft: Option<&SubmittedValues>) {
    let (title, content, status) = match draft {
        Some(values) => (&values.title, &values.content, &values.status),
        None => (&note.title, &note.content, &note.status),
    };

    out.push_str(&format!("<li id=\"note-{}\">\n", note.id));
    out.push_str(&format!(
        "<time datetime=\"{0}\">{1}</time>\n",
        note.created_at.to_rfc3339(),
        note.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ));

    out.push_str("<form class=\"update-note\" action=\"/update\" method=\"post\">\n");
    render_note_id(out, note.id);
    render_fields(out, title, content, status);
    out.push_str("<button type=\"submit\">Update</button>\n</form>\n");

    out.push_str("<form class=\"delete-note\" action=\"/delete\" method=\"post\">\n");
    render_note_id(out, note.id);
    out.push_str("<button type=\"submit\">Delete</button>\n</form>\n");

    out.push_str("</li>\n");
}

fn render_note_id(out: &mut String, id: i64) {
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"noteId\" value=\"{}\">\n",
        id
    ));
}

fn render_fields(out: &mut String, title: &str, content: &str, status: &str) {
    out.push_str(&format!(
        "<input type=\"text\" name=\"noteTitle\" placeholder=\"Title\" value=\"{}\">\n",
        escape_html(title)
    ));
    out.push_str(&format!(
        "<textarea name=\"noteContent\" placeholder=\"Content\">{}</textarea>\n",
        escape_html(content)
    ));
    out.push_str(&format!(
        "<input type=\"text\" name=\"noteStatus\" placeholder=\"Status\" value=\"{}\">\n",
        escape_html(status)
    ));
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn note(id: i64, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: "Milk, eggs".to_string(),
            status: "PENDING".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let html = render_index(&IndexView::default());
        assert!(html.contains("No notes yet."));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn renders_notes_in_given_order() {
        let html = render_index(&IndexView::new(vec![note(2, "Second"), note(1, "First")]));

        let second = html.find("note-2").unwrap();
        let first = html.find("note-1").unwrap();
        assert!(second < first);
        assert!(html.contains("2024-03-01 12:00:00 UTC"));
    }

    #[test]
    fn note_text_is_escaped() {
        let html = render_index(&IndexView::new(vec![note(1, "<script>alert(1)</script>")]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn add_error_prefills_add_form() {
        let view = IndexView::new(vec![note(1, "Groceries")]).with_error(FormError {
            error: ValidationError::EmptyTitle,
            note_id: None,
            values: SubmittedValues {
                title: String::new(),
                content: "Draft content".to_string(),
                status: "PENDING".to_string(),
            },
        });

        let html = render_index(&view);
        assert!(html.contains("Note title must not be empty"));

        let add_form = &html[html.find("add-note").unwrap()..html.find("note-1").unwrap()];
        assert!(add_form.contains("Draft content"));
    }

    #[test]
    fn update_error_prefills_that_note() {
        let view = IndexView::new(vec![note(1, "Groceries"), note(2, "Chores")]).with_error(
            FormError {
                error: ValidationError::EmptyStatus,
                note_id: Some(2),
                values: SubmittedValues {
                    title: "Chores".to_string(),
                    content: "Edited".to_string(),
                    status: " ".to_string(),
                },
            },
        );

        let html = render_index(&view);
        assert!(html.contains("Note status must not be empty"));

        let note_two = &html[html.find("note-2").unwrap()..];
        assert!(note_two.contains("Edited"));
        let note_one = &html[html.find("note-1").unwrap()..html.find("note-2").unwrap()];
        assert!(note_one.contains("Milk, eggs"));
    }
}
