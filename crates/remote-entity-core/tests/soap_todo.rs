//! SOAP todo client against an in-process endpoint that speaks the same
//! envelopes as the real service.

mod common;

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use quick_xml::escape::escape;
use remote_entity_core::soap::parse::first_element_text;
use remote_entity_core::soap::Activity;
use remote_entity_core::{Todo, TodoClient};

const OPERATIONS: [&str; 5] = ["getAll", "getById", "addTodo", "updateTodo", "deleteTodo"];

#[derive(Default)]
struct Backend {
    todos: Vec<Todo>,
    next_id: i64,
    /// Operation names in arrival order
    calls: Vec<String>,
    content_types: Vec<String>,
}

type Shared = Arc<Mutex<Backend>>;

fn operation_of(body: &str) -> Option<&'static str> {
    OPERATIONS
        .into_iter()
        .find(|op| body.contains(&format!("<tns:{op}>")) || body.contains(&format!("<tns:{op}/>")))
}

fn envelope(operation: &str, inner: &str) -> String {
    format!(
        "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soap:Body><ns2:{operation}Response xmlns:ns2=\"http://endpoint.todo.example.com/\">\
         {inner}</ns2:{operation}Response></soap:Body></soap:Envelope>"
    )
}

fn item(todo: &Todo) -> String {
    format!(
        "<return><completed>{}</completed><id>{}</id><title>{}</title></return>",
        todo.completed,
        todo.id,
        escape(todo.title.as_str())
    )
}

async fn endpoint(State(backend): State<Shared>, headers: HeaderMap, body: String) -> Response {
    let mut backend = backend.lock().unwrap();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    backend.content_types.push(content_type);

    let Some(operation) = operation_of(&body) else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "unknown operation").into_response();
    };
    backend.calls.push(operation.to_string());

    let id = first_element_text(&body, "id").and_then(|id| id.parse::<i64>().ok());
    let title = first_element_text(&body, "title").unwrap_or_default();
    let completed = first_element_text(&body, "isCompleted").as_deref() == Some("true");

    let inner = match (operation, id) {
        ("getAll", _) => backend.todos.iter().map(item).collect::<String>(),
        ("getById", Some(id)) => backend
            .todos
            .iter()
            .find(|t| t.id == id)
            .map(item)
            .unwrap_or_default(),
        ("addTodo", _) => {
            backend.next_id += 1;
            let id = backend.next_id;
            backend.todos.push(Todo { id, title, completed });
            "<return>Todo added</return>".to_string()
        }
        ("updateTodo", Some(id)) => {
            if let Some(todo) = backend.todos.iter_mut().find(|t| t.id == id) {
                todo.title = title;
                todo.completed = completed;
            }
            "<return>Todo updated</return>".to_string()
        }
        ("deleteTodo", Some(id)) => {
            backend.todos.retain(|t| t.id != id);
            "<return>Todo deleted</return>".to_string()
        }
        _ => String::new(),
    };

    (
        [(header::CONTENT_TYPE, "text/xml;charset=UTF-8")],
        envelope(operation, &inner),
    )
        .into_response()
}

async fn spawn_service(backend: Shared) -> String {
    let app = Router::new()
        .route("/ws/todo", post(endpoint))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/ws/todo")
}

async fn spawn_fixed(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/ws/todo", post(move || async move { (status, body) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/ws/todo")
}

#[tokio::test]
async fn empty_service_lists_nothing() {
    let backend = Shared::default();
    let client = TodoClient::new(&spawn_service(backend.clone()).await).unwrap();

    assert!(client.get_all().await.unwrap().is_empty());

    let backend = backend.lock().unwrap();
    assert_eq!(backend.calls, vec!["getAll"]);
    assert_eq!(backend.content_types, vec!["text/xml; charset=UTF-8"]);
}

#[tokio::test]
async fn add_then_get_all_includes_item() {
    let backend = Shared::default();
    let client = TodoClient::new(&spawn_service(backend.clone()).await).unwrap();

    let after_add = client.add("X", false).await.unwrap();
    assert!(after_add.iter().any(|t| t.title == "X" && !t.completed));

    let listed = client.get_all().await.unwrap();
    assert_eq!(listed, after_add);

    // The write is always followed by a re-read
    assert_eq!(backend.lock().unwrap().calls, vec!["addTodo", "getAll", "getAll"]);
}

#[tokio::test]
async fn update_and_delete_resynchronize() {
    let backend = Shared::default();
    let client = TodoClient::new(&spawn_service(backend.clone()).await).unwrap();

    client.add("Buy milk", false).await.unwrap();
    let todos = client.add("Walk dog", false).await.unwrap();
    let dog = todos.iter().find(|t| t.title == "Walk dog").unwrap().id;

    let todos = client.update(dog, "Walk the dog", true).await.unwrap();
    let updated = todos.iter().find(|t| t.id == dog).unwrap();
    assert_eq!(updated.title, "Walk the dog");
    assert!(updated.completed);

    let todos = client.delete(dog).await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Buy milk");

    assert_eq!(
        backend.lock().unwrap().calls,
        vec!["addTodo", "getAll", "addTodo", "getAll", "updateTodo", "getAll", "deleteTodo", "getAll"]
    );
}

#[tokio::test]
async fn markup_in_titles_survives_the_round_trip() {
    let backend = Shared::default();
    let client = TodoClient::new(&spawn_service(backend).await).unwrap();

    let title = r#"Fish & <chips> "to go""#;
    let todos = client.add(title, true).await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, title);
    assert!(todos[0].completed);
}

#[tokio::test]
async fn get_by_id_finds_or_returns_none() {
    let backend = Shared::default();
    let client = TodoClient::new(&spawn_service(backend).await).unwrap();

    let todos = client.add("Only one", false).await.unwrap();
    let id = todos[0].id;

    let found = client.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.title, "Only one");
    assert_eq!(client.get_by_id(id + 100).await.unwrap(), None);
}

#[tokio::test]
async fn any_response_is_a_completed_exchange() {
    let client =
        TodoClient::new(&spawn_fixed(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await)
            .unwrap();

    assert!(client.get_all().await.unwrap().is_empty());
    // The write "succeeds" and the re-read yields nothing parseable
    assert!(client.delete(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn fault_response_is_not_an_error() {
    let fault = "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"><soap:Body>\
                 <soap:Fault><faultcode>soap:Server</faultcode><faultstring>boom</faultstring></soap:Fault>\
                 </soap:Body></soap:Envelope>";
    let client = TodoClient::new(&spawn_fixed(StatusCode::INTERNAL_SERVER_ERROR, fault).await).unwrap();

    assert!(client.get_all().await.unwrap().is_empty());
}

/// Endpoint that acknowledges every operation except those in `drop_on`,
/// whose connections are closed without a response.
async fn spawn_dropping(drop_on: &'static [&'static str]) -> (String, common::RequestLog) {
    common::spawn_raw(move |request| {
        let operation = operation_of(request).unwrap_or("unknown");
        if drop_on.contains(&operation) {
            return None;
        }
        Some(common::ok_response(&envelope(
            operation,
            "<return>ok</return>",
        )))
    })
    .await
}

fn operations(log: &common::RequestLog) -> Vec<&'static str> {
    log.lock()
        .unwrap()
        .iter()
        .filter_map(|request| operation_of(request))
        .collect()
}

#[tokio::test]
async fn refetch_failure_after_write_is_a_loading_failure() {
    let (base, log) = spawn_dropping(&["getAll"]).await;
    let client = TodoClient::new(&format!("{base}/ws/todo")).unwrap();

    let err = client.add("Written", false).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.activity(), Some(Activity::Loading));
    assert_eq!(operations(&log), vec!["addTodo", "getAll"]);
}

#[tokio::test]
async fn failed_write_is_not_followed_by_a_refetch() {
    let (base, log) = spawn_dropping(&["addTodo", "deleteTodo"]).await;
    let client = TodoClient::new(&format!("{base}/ws/todo")).unwrap();

    let err = client.add("Lost", false).await.unwrap_err();
    assert_eq!(err.activity(), Some(Activity::Saving));
    assert_eq!(operations(&log), vec!["addTodo"]);

    let err = client.delete(7).await.unwrap_err();
    assert_eq!(err.activity(), Some(Activity::Deleting));
    assert_eq!(operations(&log), vec!["addTodo", "deleteTodo"]);
}

#[tokio::test]
async fn unreachable_mutation_fails_once_without_refetch() {
    let client = TodoClient::new("http://127.0.0.1:1/ws/todo").unwrap();

    let err = client.update(1, "Anything", false).await.unwrap_err();
    assert!(err.is_network());
    // The failure names the write, not a follow-up load
    assert_eq!(err.activity(), Some(Activity::Saving));
}
