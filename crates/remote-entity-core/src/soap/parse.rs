//! Response parsing for the todo endpoint.
//!
//! Parsing is lenient: items missing an id or a title are dropped, and a
//! document that stops being well-formed ends the scan with whatever was
//! collected so far. Neither case is an error.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::models::Todo;

/// Wrapper element around each list item in a response
const RESULT_ELEMENT: &[u8] = b"return";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Completed,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"id" => Some(Field::Id),
            b"title" => Some(Field::Title),
            b"completed" => Some(Field::Completed),
            _ => None,
        }
    }
}

/// Fields collected from one result element. The first occurrence of each
/// wins.
#[derive(Debug, Default)]
struct PendingItem {
    id: Option<String>,
    title: Option<String>,
    completed: Option<String>,
}

impl PendingItem {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Completed => &mut self.completed,
        }
    }

    fn finish(self) -> Option<Todo> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let title = self.title.filter(|title| !title.is_empty())?;
        let id = match id.trim().parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                debug!(id = %id, "Dropping todo with non-numeric id");
                return None;
            }
        };
        Some(Todo {
            id,
            title,
            completed: self.completed.as_deref() == Some("true"),
        })
    }
}

/// Extract every well-formed todo from a `getAll` (or `getById`) response.
pub fn parse_todos(xml: &str) -> Vec<Todo> {
    let mut reader = Reader::from_str(xml);
    let mut todos = Vec::new();
    let mut dropped = 0usize;
    let mut item: Option<PendingItem> = None;
    let mut field: Option<(Field, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                match item.as_mut() {
                    None if name.as_ref() == RESULT_ELEMENT => {
                        item = Some(PendingItem::default());
                    }
                    Some(pending) if field.is_none() => {
                        if let Some(f) = Field::from_name(name.as_ref()) {
                            if pending.slot(f).is_none() {
                                field = Some((f, String::new()));
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                // <title/> records an empty value; an empty <return/> is skipped
                if let (Some(pending), None) = (item.as_mut(), field.as_ref()) {
                    if let Some(f) = Field::from_name(e.local_name().as_ref()) {
                        pending.slot(f).get_or_insert_with(String::new);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some((_, text)) = field.as_mut() {
                    match e.unescape() {
                        Ok(chunk) => text.push_str(&chunk),
                        Err(err) => {
                            warn!(error = %err, "Bad entity in todo response, stopping");
                            break;
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some((_, text)) = field.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                match field.take() {
                    Some((f, text)) if Field::from_name(name.as_ref()) == Some(f) => {
                        if let Some(pending) = item.as_mut() {
                            *pending.slot(f) = Some(text);
                        }
                    }
                    Some(open) => field = Some(open),
                    None if name.as_ref() == RESULT_ELEMENT => {
                        if let Some(pending) = item.take() {
                            match pending.finish() {
                                Some(todo) => todos.push(todo),
                                None => dropped += 1,
                            }
                        }
                    }
                    None => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    position = reader.buffer_position(),
                    error = %e,
                    "Malformed todo response, keeping items parsed so far"
                );
                break;
            }
        }
    }

    debug!(kept = todos.len(), dropped, "Parsed todo response");
    todos
}

/// Text content of the first element with the given local name, if any.
///
/// Used for the acknowledgement string mutations return and for
/// `faultstring` in SOAP faults.
pub fn first_element_text(xml: &str, local_name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if text.is_none() => {
                if e.local_name().as_ref() == local_name.as_bytes() {
                    text = Some(String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(buf) = text.as_mut() {
                    buf.push_str(&e.unescape().ok()?);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(buf) = text.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) if text.is_some() => {
                if e.local_name().as_ref() == local_name.as_bytes() {
                    return text;
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}
