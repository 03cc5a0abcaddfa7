// Command handlers. Each one turns a validated request into exactly one
// API call and renders the result. Handlers are generic over `KeepApi`
// and the output sink; `execute` is the dispatcher used by `main`.

use crate::api::{ApiRequest, KeepApi};
use crate::args::{empty_note, missing_email, Command, ListOptions, NewNote, ShareRequest};
use crate::error::Result;
use crate::model::{
    BatchCreatePermissionsRequest, BatchCreatePermissionsResponse, CreatePermissionRequest,
    ListNotesResponse, Note, Permission, Section,
};
use crate::ui;
use log::info;
use serde::de::DeserializeOwned;
use std::io::Write;

/// Route `command` to its handler.
pub fn execute<A: KeepApi + ?Sized>(command: &Command, api: &A, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List(opts) => list_notes(api, opts, out).map(|_| ()),
        Command::Get { id } => get_note(api, id, out).map(|_| ()),
        Command::Create(note) => create_note(api, note, out).map(|_| ()),
        Command::Delete { id, force } => delete_note(api, id, *force, out),
        Command::Share(req) => share_note(api, req, out).map(|_| ()),
        Command::Help => Ok(ui::render_usage(out)?),
    }
}

fn fetch<A, T>(api: &A, message: &str, request: &ApiRequest) -> Result<T>
where
    A: KeepApi + ?Sized,
    T: DeserializeOwned,
{
    let value = ui::with_spinner(message, || api.call(request))?;
    Ok(serde_json::from_value(value)?)
}

pub fn list_notes<A: KeepApi + ?Sized>(
    api: &A,
    opts: &ListOptions,
    out: &mut impl Write,
) -> Result<ListNotesResponse> {
    let mut request = ApiRequest::get("/notes");
    if let Some(limit) = opts.limit {
        request = request.query("pageSize", limit.to_string());
    }
    if let Some(filter) = &opts.filter {
        request = request.query("filter", filter.as_str());
    }
    if let Some(token) = &opts.page_token {
        request = request.query("pageToken", token.as_str());
    }

    let page: ListNotesResponse = fetch(api, "Loading notes...", &request)?;
    if page.notes.is_empty() {
        ui::render_empty_list(out)?;
    } else {
        ui::render_note_list(out, &page)?;
    }
    Ok(page)
}

pub fn get_note<A: KeepApi + ?Sized>(api: &A, id: &str, out: &mut impl Write) -> Result<Note> {
    let request = ApiRequest::get(format!("/notes/{}", id));
    let note: Note = fetch(api, "Loading note...", &request)?;
    ui::render_note(out, &note)?;
    Ok(note)
}

/// The note payload for `create`. A text body wins over list items.
pub fn build_note(new: &NewNote) -> Result<Note> {
    if new.is_empty() {
        return Err(empty_note());
    }

    let body = match (&new.text, new.list_items.is_empty()) {
        (Some(text), _) => Some(Section::text(text.as_str())),
        (None, false) => Some(Section::checklist(new.list_items.iter().map(String::as_str))),
        (None, true) => None,
    };

    Ok(Note {
        title: new.title.clone(),
        body,
        ..Default::default()
    })
}

pub fn create_note<A: KeepApi + ?Sized>(api: &A, new: &NewNote, out: &mut impl Write) -> Result<Note> {
    let request = ApiRequest::post("/notes").json(&build_note(new)?)?;
    let created: Note = fetch(api, "Creating note...", &request)?;
    info!("created {}", created.name.as_deref().unwrap_or_default());
    ui::render_created(out, &created)?;
    Ok(created)
}

/// `force` only suppresses the warning; the delete is never blocked.
pub fn delete_note<A: KeepApi + ?Sized>(api: &A, id: &str, force: bool, out: &mut impl Write) -> Result<()> {
    if !force {
        ui::render_delete_warning(out, id)?;
        out.flush()?;
    }

    let request = ApiRequest::delete(format!("/notes/{}", id));
    ui::with_spinner("Deleting note...", || api.call(&request))?;
    info!("deleted notes/{}", id);
    ui::render_deleted(out)?;
    Ok(())
}

/// One permission-create request per recipient, sent as a single batch.
pub fn build_share(req: &ShareRequest) -> Result<BatchCreatePermissionsRequest> {
    if req.emails.is_empty() {
        return Err(missing_email());
    }

    let parent = format!("notes/{}", req.id);
    let requests = req
        .emails
        .iter()
        .map(|email| CreatePermissionRequest {
            parent: parent.clone(),
            permission: Permission::new(email.as_str(), req.role.as_str()),
        })
        .collect();
    Ok(BatchCreatePermissionsRequest { requests })
}

pub fn share_note<A: KeepApi + ?Sized>(
    api: &A,
    req: &ShareRequest,
    out: &mut impl Write,
) -> Result<BatchCreatePermissionsResponse> {
    let request = ApiRequest::post(format!("/notes/{}/permissions:batchCreate", req.id))
        .json(&build_share(req)?)?;
    let granted: BatchCreatePermissionsResponse = fetch(api, "Sharing note...", &request)?;
    ui::render_permissions(out, &granted.permissions)?;
    Ok(granted)
}
