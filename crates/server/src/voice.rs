//! Voice capture endpoints: audio transcription and transcript-to-draft
//! extraction.
//!
//! Drafts are returned to the client for review; nothing is persisted here.

use api_types::assist::{EntryDraftView, Transcript, TranscribeAudio, VoiceDraft};
use axum::{Json, extract::State};
use base64::Engine as _;
use chrono::Utc;

use assist::EntryKind;

use crate::{ServerError, server::ServerState};

fn map_draft(draft: assist::EntryDraft) -> EntryDraftView {
    EntryDraftView {
        amount: draft.amount,
        label: draft.label,
        date: draft.date,
        reason: draft.reason,
    }
}

pub async fn transcribe(
    State(state): State<ServerState>,
    Json(payload): Json<TranscribeAudio>,
) -> Result<Json<Transcript>, ServerError> {
    if payload.audio_base64.trim().is_empty() {
        return Err(ServerError::Generic("no audio provided".to_string()));
    }
    let audio = base64::engine::general_purpose::STANDARD
        .decode(payload.audio_base64.as_bytes())
        .map_err(|_| ServerError::Generic("audio is not valid base64".to_string()))?;

    let transcript = state.speech.transcribe(audio, &payload.file_name).await?;
    Ok(Json(Transcript { transcript }))
}

async fn draft(
    state: &ServerState,
    kind: EntryKind,
    payload: VoiceDraft,
) -> Result<Json<EntryDraftView>, ServerError> {
    if payload.transcript.trim().is_empty() {
        return Err(ServerError::Generic("transcript is required".to_string()));
    }
    let draft = state
        .assistant
        .draft_entry(kind, &payload.transcript, Utc::now().date_naive())
        .await?;
    Ok(Json(map_draft(draft)))
}

pub async fn voice_expense(
    State(state): State<ServerState>,
    Json(payload): Json<VoiceDraft>,
) -> Result<Json<EntryDraftView>, ServerError> {
    draft(&state, EntryKind::Expense, payload).await
}

pub async fn voice_income(
    State(state): State<ServerState>,
    Json(payload): Json<VoiceDraft>,
) -> Result<Json<EntryDraftView>, ServerError> {
    draft(&state, EntryKind::Income, payload).await
}
