// Argument parsing. `parse_args` is a deliberately loose tokenizer that
// turns `--dash-case` flags into camelCase keys; `Command::from_invocation`
// then validates the option bag into one typed request per command, so
// handlers never see missing ids or empty notes.

use crate::config::DEFAULT_ROLE;
use crate::error::{KeepError, Result};

/// Commands that take a positional note id.
const ID_COMMANDS: &[&str] = &["get", "delete", "share"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Flag present with no value.
    Switch,
    Text(String),
}

/// Parsed flags in the order they appeared. Repeated flags keep every
/// occurrence; scalar lookups see the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(String, OptionValue)>,
}

impl Options {
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) {
        self.entries.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Every text value given for `key`, in order.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .filter_map(|(_, v)| match v {
                OptionValue::Text(s) => Some(s.as_str()),
                OptionValue::Switch => None,
            })
            .collect()
    }

    /// Last value for `key`, which must be a string if present.
    fn text(&self, key: &str, flag: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Text(s)) => Ok(Some(s.clone())),
            Some(OptionValue::Switch) => Err(KeepError::validation(format!(
                "The --{} flag requires a value",
                flag
            ))),
        }
    }

    fn list(&self, key: &str, flag: &str) -> Result<Vec<String>> {
        if matches!(self.get(key), Some(OptionValue::Switch)) && self.all(key).is_empty() {
            return Err(KeepError::validation(format!(
                "The --{} flag requires a value",
                flag
            )));
        }
        Ok(self.all(key).into_iter().map(str::to_string).collect())
    }
}

/// Raw result of tokenizing the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub command: Option<String>,
    pub id: Option<String>,
    pub options: Options,
}

/// `--page-token` -> `pageToken`. Only a dash followed by a lowercase
/// ASCII letter is folded; other dashes are kept.
pub fn camel_case(flag: &str) -> String {
    let mut out = String::with_capacity(flag.len());
    let mut chars = flag.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('-', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Tokenize `args` (everything after the program name). The first token
/// is the command.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Invocation {
    let mut invocation = Invocation::default();
    let Some((command, rest)) = args.split_first() else {
        return invocation;
    };
    let command = command.as_ref();
    let takes_id = ID_COMMANDS.contains(&command);
    invocation.command = Some(command.to_string());

    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_ref();
        if let Some(flag) = arg.strip_prefix("--") {
            let key = camel_case(flag);
            let next: Option<&str> = rest.get(i + 1).map(|s| s.as_ref());
            match next {
                Some(next) if !next.is_empty() && !next.starts_with("--") => {
                    invocation.options.insert(key, OptionValue::Text(next.to_string()));
                    i += 2;
                }
                _ => {
                    invocation.options.insert(key, OptionValue::Switch);
                    i += 1;
                }
            }
        } else {
            if takes_id && invocation.id.is_none() {
                invocation.id = Some(arg.to_string());
            }
            i += 1;
        }
    }
    invocation
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub filter: Option<String>,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: Option<String>,
    pub text: Option<String>,
    pub list_items: Vec<String>,
}

impl NewNote {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.list_items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub id: String,
    pub emails: Vec<String>,
    pub role: String,
}

/// A validated request for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(ListOptions),
    Get { id: String },
    Create(NewNote),
    Delete { id: String, force: bool },
    Share(ShareRequest),
    Help,
}

impl Command {
    /// Parse and validate in one step.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command> {
        Self::from_invocation(parse_args(args))
    }

    pub fn from_invocation(inv: Invocation) -> Result<Command> {
        let Some(command) = inv.command.as_deref() else {
            return Ok(Command::Help);
        };
        let opts = &inv.options;

        let command = match command {
            "list" => Command::List(ListOptions {
                limit: opts.text("limit", "limit")?.map(|v| parse_limit(&v)).transpose()?,
                filter: opts.text("filter", "filter")?,
                page_token: opts.text("pageToken", "page-token")?,
            }),
            "get" => Command::Get {
                id: require_id(&inv)?,
            },
            "create" => {
                let note = NewNote {
                    title: opts.text("title", "title")?,
                    text: opts.text("text", "text")?,
                    list_items: opts.list("listItem", "list-item")?,
                };
                if note.is_empty() {
                    return Err(empty_note());
                }
                Command::Create(note)
            }
            "delete" => Command::Delete {
                id: require_id(&inv)?,
                force: opts.contains("force"),
            },
            "share" => {
                let id = require_id(&inv)?;
                let emails = match opts.text("emails", "emails")? {
                    Some(list) => split_emails(&list),
                    None => opts.text("email", "email")?.into_iter().collect(),
                };
                if emails.is_empty() {
                    return Err(missing_email());
                }
                let role = opts
                    .text("role", "role")?
                    .unwrap_or_else(|| DEFAULT_ROLE.to_string());
                Command::Share(ShareRequest { id, emails, role })
            }
            _ => Command::Help,
        };
        Ok(command)
    }
}

fn require_id(inv: &Invocation) -> Result<String> {
    inv.id
        .clone()
        .ok_or_else(|| KeepError::validation("Please provide a note ID"))
}

fn parse_limit(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(KeepError::validation(format!(
            "--limit expects a positive number, got `{}`",
            value
        ))),
    }
}

fn split_emails(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn empty_note() -> KeepError {
    KeepError::validation("Please provide at least a title or content.")
}

pub(crate) fn missing_email() -> KeepError {
    KeepError::validation("Please provide an email address with --email")
}
