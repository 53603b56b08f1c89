use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const XML_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename = "todo")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "todos")]
pub struct TodoList {
    #[serde(rename = "todo", default)]
    pub items: Vec<Todo>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// XML request extractor and response wrapper.
pub struct Xml<T>(pub T);

impl<T, S> FromRequest<S> for Xml<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_xml = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/xml") || v.starts_with("text/xml"));
        if !is_xml {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "expected an XML content type".to_string(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        match quick_xml::de::from_str(text) {
            Ok(value) => Ok(Xml(value)),
            Err(quick_xml::DeError::InvalidXml(e)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
            Err(e) => Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string())),
        }
    }
}

impl<T: Serialize> IntoResponse for Xml<T> {
    fn into_response(self) -> Response {
        match quick_xml::se::to_string(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize XML response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type Db = Arc<RwLock<HashMap<Uuid, Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Xml<TodoList> {
    let todos = db.read().await;
    Xml(TodoList {
        items: todos.values().cloned().collect(),
    })
}

async fn create_todo(State(db): State<Db>, Xml(input): Xml<CreateTodo>) -> (StatusCode, Xml<Todo>) {
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        completed: input.completed,
    };
    tracing::debug!(id = %todo.id, "created todo");
    db.write().await.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Xml(todo))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Xml<Todo>, StatusCode> {
    let todos = db.read().await;
    todos.get(&id).cloned().map(Xml).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Xml(input): Xml<UpdateTodo>,
) -> Result<Xml<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Xml(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    todos.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
