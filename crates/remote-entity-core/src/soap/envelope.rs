//! SOAP 1.1 request envelopes for the todo endpoint.
//!
//! Every envelope declares the same two namespaces, carries an empty header
//! and exactly one operation element in the body. Parameter elements are
//! unqualified, matching the service's document/literal wrapped binding.

use quick_xml::escape::escape;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const TODO_NS: &str = "http://endpoint.todo.example.com/";

/// Content type of every request
pub const CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One remote todo operation and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    GetAll,
    GetById { id: i64 },
    Add { title: &'a str, completed: bool },
    Update { id: i64, title: &'a str, completed: bool },
    Delete { id: i64 },
}

impl Operation<'_> {
    /// Element name of the operation inside the body
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetAll => "getAll",
            Operation::GetById { .. } => "getById",
            Operation::Add { .. } => "addTodo",
            Operation::Update { .. } => "updateTodo",
            Operation::Delete { .. } => "deleteTodo",
        }
    }

    fn params(&self) -> String {
        match *self {
            Operation::GetAll => String::new(),
            Operation::GetById { id } | Operation::Delete { id } => element("id", &id.to_string()),
            Operation::Add { title, completed } => {
                format!(
                    "{}{}",
                    element("title", &escape(title)),
                    element("isCompleted", bool_text(completed)),
                )
            }
            Operation::Update { id, title, completed } => {
                format!(
                    "{}{}{}",
                    element("id", &id.to_string()),
                    element("title", &escape(title)),
                    element("isCompleted", bool_text(completed)),
                )
            }
        }
    }

    /// Full request document for this operation
    pub fn envelope(&self) -> String {
        let params = self.params();
        let operation = if params.is_empty() {
            format!("<tns:{}/>", self.name())
        } else {
            format!("<tns:{name}>{params}</tns:{name}>", name = self.name())
        };

        format!(
            "{XML_DECLARATION}\
             <soapenv:Envelope xmlns:soapenv=\"{SOAP_ENV_NS}\" xmlns:tns=\"{TODO_NS}\">\
             <soapenv:Header/>\
             <soapenv:Body>{operation}</soapenv:Body>\
             </soapenv:Envelope>"
        )
    }
}

fn element(name: &str, text: &str) -> String {
    format!("<{name}>{text}</{name}>")
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
