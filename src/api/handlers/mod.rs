use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize};

use super::views::{render_index, FormError, IndexView, SubmittedValues};
use super::AppState;
use crate::config::CreatedAtPolicy;
use crate::models::*;

type HandlerResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Log a store error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Re-render the index page for a rejected form, with the reason and the
/// submitted text. Nothing is persisted.
fn rejected(state: &AppState, form_error: FormError) -> HandlerResult<Response> {
    tracing::warn!(
        field = form_error.error.field(),
        note_id = form_error.note_id,
        "Validation error: {}",
        form_error.error
    );

    let list = state
        .db
        .unit_of_work(|notes| notes.get_all_notes())
        .map_err(internal_error)?;

    let page = render_index(&IndexView::new(list).with_error(form_error));
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
}

fn back_to_index() -> Response {
    Redirect::to("/").into_response()
}

// ============================================================
// Forms
// ============================================================

/// Fields of the add form. Every field is optional at this level so that a
/// missing one is reported as a validation error rather than a rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteForm {
    pub note_title: Option<String>,
    pub note_content: Option<String>,
    pub note_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteForm {
    pub note_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    pub note_id: i64,
    pub note_title: Option<String>,
    pub note_content: Option<String>,
    pub note_status: Option<String>,
}

/// Read request parameters from the form body, or from the query string when
/// the request carries no form body. A POST without a body therefore reaches
/// validation with every field absent.
fn form_or_query<T: DeserializeOwned>(
    uri: &Uri,
    form: Result<Form<T>, FormRejection>,
) -> Result<T, Response> {
    match form {
        Ok(Form(value)) => Ok(value),
        Err(FormRejection::InvalidFormContentType(_)) => Query::<T>::try_from_uri(uri)
            .map(|Query(value)| value)
            .map_err(IntoResponse::into_response),
        Err(rejection) => Err(rejection.into_response()),
    }
}

fn validate_text(
    title: &Option<String>,
    content: &Option<String>,
    status: &Option<String>,
) -> Result<NoteFields, (ValidationError, SubmittedValues)> {
    NoteFields::validate(title.as_deref(), content.as_deref(), status.as_deref()).map_err(|e| {
        let values = SubmittedValues {
            title: title.clone().unwrap_or_default(),
            content: content.clone().unwrap_or_default(),
            status: status.clone().unwrap_or_default(),
        };
        (e, values)
    })
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(state): State<AppState>) -> HandlerResult<impl IntoResponse> {
    let count = state
        .db
        .unit_of_work(|notes| notes.count_notes())
        .map_err(internal_error)?;

    Ok(Json(serde_json::json!({ "status": "ok", "notes": count })))
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let list = state
        .db
        .unit_of_work(|notes| notes.get_all_notes())
        .map_err(internal_error)?;

    Ok(Html(render_index(&IndexView::new(list))))
}

pub async fn add_note(
    State(state): State<AppState>,
    uri: Uri,
    form: Result<Form<AddNoteForm>, FormRejection>,
) -> HandlerResult<Response> {
    let form = match form_or_query(&uri, form) {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection),
    };

    let fields = match validate_text(&form.note_title, &form.note_content, &form.note_status) {
        Ok(fields) => fields,
        Err((error, values)) => {
            return rejected(
                &state,
                FormError {
                    error,
                    note_id: None,
                    values,
                },
            )
        }
    };

    let note = state
        .db
        .unit_of_work(|notes| notes.save_note(&NewNote::from_fields(fields)))
        .map_err(internal_error)?;

    tracing::info!(note_id = note.id, "Note created");
    Ok(back_to_index())
}

/// Delete a note. Redirects to the index whether or not the note existed.
pub async fn delete_note(
    State(state): State<AppState>,
    uri: Uri,
    form: Result<Form<DeleteNoteForm>, FormRejection>,
) -> HandlerResult<Response> {
    let form = match form_or_query(&uri, form) {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection),
    };

    let deleted = state
        .db
        .unit_of_work(|notes| notes.delete_note(form.note_id))
        .map_err(internal_error)?;

    if deleted {
        tracing::info!(note_id = form.note_id, "Note deleted");
    } else {
        tracing::debug!(note_id = form.note_id, "Delete of unknown note ignored");
    }

    Ok(back_to_index())
}

/// Overwrite a note's text fields. The creation time is kept or re-stamped
/// according to the configured [`CreatedAtPolicy`]. An unknown id changes
/// nothing and still redirects to the index.
pub async fn update_note(
    State(state): State<AppState>,
    uri: Uri,
    form: Result<Form<UpdateNoteForm>, FormRejection>,
) -> HandlerResult<Response> {
    let form = match form_or_query(&uri, form) {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection),
    };

    let fields = match validate_text(&form.note_title, &form.note_content, &form.note_status) {
        Ok(fields) => fields,
        Err((error, values)) => {
            return rejected(
                &state,
                FormError {
                    error,
                    note_id: Some(form.note_id),
                    values,
                },
            )
        }
    };

    let policy = state.created_at_policy;
    let updated = state
        .db
        .unit_of_work(|notes| {
            let Some(existing) = notes.get_note_by_id(form.note_id)? else {
                return Ok(false);
            };

            let created_at = match policy {
                CreatedAtPolicy::Preserve => existing.created_at,
                CreatedAtPolicy::Restamp => Utc::now(),
            };

            notes.update_note(&existing.overwritten(fields, created_at))
        })
        .map_err(internal_error)?;

    if updated {
        tracing::info!(note_id = form.note_id, "Note updated");
    } else {
        tracing::debug!(note_id = form.note_id, "Update of unknown note ignored");
    }

    Ok(back_to_index())
}
