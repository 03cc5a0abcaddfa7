// Wire types for the Keep REST API (v1). Field names follow the JSON
// schema via `rename_all = "camelCase"`; everything the service may omit
// is optional or defaulted so partial responses still deserialize.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Resource name, `notes/<id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trash_time: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trashed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
}

impl Note {
    /// The id without its `notes/` prefix.
    pub fn short_id(&self) -> &str {
        let name = self.name.as_deref().unwrap_or_default();
        name.strip_prefix("notes/").unwrap_or(name)
    }

    /// Text body, if the note is text-typed.
    pub fn text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.text.as_ref())
            .map(|t| t.text.as_str())
    }
}

/// Note body. The service guarantees at most one of `text` / `list` is
/// set; the constructors below never build both.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListContent>,
}

impl Section {
    pub fn text(text: impl Into<String>) -> Self {
        Section {
            text: Some(TextContent { text: text.into() }),
            list: None,
        }
    }

    /// A checklist with every item unchecked.
    pub fn checklist<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list_items = items.into_iter().map(ListItem::unchecked).collect();
        Section {
            text: None,
            list: Some(ListContent { list_items }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListContent {
    #[serde(default)]
    pub list_items: Vec<ListItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_list_items: Vec<ListItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub checked: bool,
}

impl ListItem {
    pub fn unchecked(text: impl Into<String>) -> Self {
        ListItem {
            child_list_items: Vec::new(),
            text: Some(TextContent { text: text.into() }),
            checked: false,
        }
    }

    pub fn label(&self) -> &str {
        self.text.as_ref().map(|t| t.text.as_str()).unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: Vec<String>,
}

impl Attachment {
    /// Last path segment of the attachment resource name.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Principal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Principal>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Permission {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Permission {
            email: Some(email.into()),
            role: Some(role.into()),
            ..Default::default()
        }
    }

    /// First non-empty of `email`, `user.email`, `group.email`.
    pub fn recipient(&self) -> Option<&str> {
        let user = self.user.as_ref().and_then(|p| p.email.as_deref());
        let group = self.group.as_ref().and_then(|p| p.email.as_deref());
        [self.email.as_deref(), user, group]
            .into_iter()
            .flatten()
            .find(|e| !e.is_empty())
    }
}

/// A user or group referenced by a permission.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Principal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesResponse {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatePermissionRequest {
    pub parent: String,
    pub permission: Permission,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchCreatePermissionsRequest {
    pub requests: Vec<CreatePermissionRequest>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BatchCreatePermissionsResponse {
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_section_never_carries_a_list() {
        let value = serde_json::to_value(Section::text("Buy milk")).unwrap();
        assert_eq!(value, json!({ "text": { "text": "Buy milk" } }));
    }

    #[test]
    fn checklist_items_start_unchecked() {
        let value = serde_json::to_value(Section::checklist(["Task 1", "Task 2"])).unwrap();
        assert_eq!(
            value,
            json!({ "list": { "listItems": [
                { "text": { "text": "Task 1" }, "checked": false },
                { "text": { "text": "Task 2" }, "checked": false }
            ] } })
        );
    }

    #[test]
    fn new_note_serializes_only_set_fields() {
        let note = Note {
            title: Some("Shopping".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&note).unwrap(), json!({ "title": "Shopping" }));
    }

    #[test]
    fn partial_note_deserializes() {
        let note: Note = serde_json::from_value(json!({
            "name": "notes/abc",
            "updateTime": "2024-01-02T03:04:05Z",
            "body": { "list": { "listItems": [
                { "text": { "text": "Parent" },
                  "childListItems": [ { "text": { "text": "Child" }, "checked": true } ] }
            ] } },
            "attachments": [ { "name": "notes/abc/attachments/img1", "mimeType": ["image/png"] } ]
        }))
        .unwrap();

        assert_eq!(note.short_id(), "abc");
        assert_eq!(note.text(), None);
        assert!(!note.trashed);
        let items = &note.body.unwrap().list.unwrap().list_items;
        assert!(!items[0].checked);
        assert_eq!(items[0].child_list_items[0].label(), "Child");
        assert!(items[0].child_list_items[0].checked);
        assert_eq!(note.attachments[0].file_name(), "img1");
    }

    #[test]
    fn recipient_priority() {
        let mut p: Permission = serde_json::from_value(json!({
            "role": "WRITER",
            "email": "",
            "user": { "email": "user@x.com" },
            "group": { "email": "group@x.com" }
        }))
        .unwrap();
        assert_eq!(p.recipient(), Some("user@x.com"));

        p.email = Some("direct@x.com".into());
        assert_eq!(p.recipient(), Some("direct@x.com"));

        p.email = None;
        p.user = None;
        assert_eq!(p.recipient(), Some("group@x.com"));
    }
}
