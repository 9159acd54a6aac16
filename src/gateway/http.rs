//! HTTP Task Gateway
//!
//! `reqwest` client for the task REST API:
//!
//! | operation | request                               |
//! |-----------|---------------------------------------|
//! | fetch_all | `GET {base}`                          |
//! | create    | `POST {base}` `{columnId, task}`      |
//! | remove    | `DELETE {base}/{columnId}/{taskId}`   |
//! | move_task | `POST {base}/move` `{from, to, task}` |

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::TaskGateway;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult, TransportError};
use crate::models::{BoardSnapshot, ColumnId, NewTask, Task, TaskId};

/// Characters left as-is in a path segment (RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateTaskArgs<'a> {
    #[serde(rename = "columnId")]
    column_id: ColumnId,
    task: &'a NewTask,
}

#[derive(Serialize)]
struct MoveTaskArgs<'a> {
    from: ColumnId,
    to: ColumnId,
    task: &'a Task,
}

#[derive(Deserialize)]
struct CreatedTask {
    task: Task,
}

#[derive(Deserialize)]
struct MovedTask {
    #[serde(default)]
    task: Option<Task>,
}

// ========================
// Client
// ========================

#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpTaskGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let builder = Client::builder();
        // wasm32 requests are raced against a timer instead, see `with_timeout`
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn collection_url(&self) -> &str {
        &self.config.base_url
    }

    fn move_url(&self) -> String {
        format!("{}/move", self.config.base_url)
    }

    fn task_url(&self, column: ColumnId, task_id: &TaskId) -> String {
        let id = task_id.to_string();
        format!(
            "{}/{}/{}",
            self.config.base_url,
            column.as_str(),
            utf8_percent_encode(&id, PATH_SEGMENT)
        )
    }

    fn map_reqwest(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.config.timeout)
        } else {
            TransportError::Request(err)
        }
    }

    /// Send a request and insist on a 2xx status
    async fn send(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = with_timeout(self.config.timeout, request.send())
            .await?
            .map_err(|e| self.map_reqwest(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16() });
        }
        Ok(response)
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, TransportError> {
        let bytes = with_timeout(self.config.timeout, response.bytes())
            .await?
            .map_err(|e| self.map_reqwest(e))?;
        Ok(bytes.to_vec())
    }

    async fn fetch_snapshot(&self) -> Result<BoardSnapshot, TransportError> {
        let response = self.send(self.client.get(self.collection_url())).await?;
        let body = self.read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_create(&self, column: ColumnId, draft: &NewTask) -> Result<Task, TransportError> {
        let args = CreateTaskArgs { column_id: column, task: draft };
        let response = self.send(self.client.post(self.collection_url()).json(&args)).await?;
        let body = self.read_body(response).await?;
        let created: CreatedTask = serde_json::from_slice(&body)?;
        Ok(created.task)
    }

    async fn post_move(&self, from: ColumnId, to: ColumnId, task: &Task) -> Result<Option<Task>, TransportError> {
        let args = MoveTaskArgs { from, to, task };
        let response = self.send(self.client.post(self.move_url()).json(&args)).await?;
        let body = self.read_body(response).await?;
        Ok(parse_moved_task(&body))
    }
}

/// The move endpoint has no required body; use the task from it when present
fn parse_moved_task(body: &[u8]) -> Option<Task> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<MovedTask>(body) {
        Ok(moved) => moved.task,
        Err(e) => {
            debug!(error = %e, "move response carried no task");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn with_timeout<F: Future>(timeout: Duration, fut: F) -> Result<F::Output, TransportError> {
    use futures::future::{select, Either};

    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let timer = gloo_timers::future::TimeoutFuture::new(millis);
    futures::pin_mut!(fut, timer);
    match select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(TransportError::Timeout(timeout)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn with_timeout<F: Future>(_timeout: Duration, fut: F) -> Result<F::Output, TransportError> {
    // Enforced by the client builder on native targets
    Ok(fut.await)
}

// ========================
// Commands
// ========================

#[async_trait(?Send)]
impl TaskGateway for HttpTaskGateway {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> GatewayResult<BoardSnapshot> {
        self.fetch_snapshot().await.map_err(GatewayError::fetch)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, column: ColumnId, draft: &NewTask) -> GatewayResult<Task> {
        self.post_create(column, draft)
            .await
            .map_err(|e| GatewayError::create(column, e))
    }

    #[instrument(skip(self))]
    async fn remove(&self, column: ColumnId, task_id: &TaskId) -> GatewayResult<()> {
        self.send(self.client.delete(self.task_url(column, task_id)))
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::delete(column, task_id.clone(), e))
    }

    #[instrument(skip(self, task), fields(task_id = %task.id))]
    async fn move_task(&self, from: ColumnId, to: ColumnId, task: &Task) -> GatewayResult<Option<Task>> {
        self.post_move(from, to, task)
            .await
            .map_err(|e| GatewayError::move_failure(from, to, task.id.clone(), e))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn gateway_for(server: &MockServer) -> HttpTaskGateway {
        let config = GatewayConfig::default()
            .with_base_url(format!("{}/tasks/", server.uri()))
            .with_timeout(Duration::from_secs(5));
        HttpTaskGateway::new(config).unwrap()
    }

    #[test]
    fn test_task_url_encodes_id() {
        let gateway = HttpTaskGateway::new(GatewayConfig::default().with_base_url("http://api/tasks")).unwrap();
        assert_eq!(
            gateway.task_url(ColumnId::InProgress, &TaskId::Text("a b/c-1".into())),
            "http://api/tasks/inProgress/a%20b%2Fc-1"
        );
        assert_eq!(gateway.task_url(ColumnId::Done, &TaskId::from(42)), "http://api/tasks/done/42");
        assert_eq!(gateway.move_url(), "http://api/tasks/move");
    }

    #[test]
    fn test_parse_moved_task() {
        assert_eq!(parse_moved_task(b""), None);
        assert_eq!(parse_moved_task(b"  \n"), None);
        assert_eq!(parse_moved_task(b"OK"), None);
        assert_eq!(parse_moved_task(br#"{"message":"moved"}"#), None);
        assert_eq!(
            parse_moved_task(br#"{"task":{"id":3,"title":"C"}}"#),
            Some(Task::new(3, "C"))
        );
    }

    #[tokio::test]
    async fn test_fetch_all_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "todo": [{"id": 1, "title": "A", "description": "first"}],
                "done": []
            })))
            .mount(&server)
            .await;

        let mut snapshot = gateway_for(&server).await.fetch_all().await.unwrap();

        assert_eq!(
            snapshot.take(ColumnId::Todo),
            vec![Task::new(1, "A").with_description("first")]
        );
        assert!(snapshot.take(ColumnId::InProgress).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.fetch_all().await.unwrap_err();

        assert!(matches!(
            err,
            GatewayError::FetchFailure { source: TransportError::Status { status: 500 } }
        ));
    }

    #[tokio::test]
    async fn test_create_sends_column_and_task() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .and(body_json(json!({
                "columnId": "inProgress",
                "task": {"title": "Write docs", "description": ""}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "task": {"id": "t-9", "title": "Write docs", "description": ""}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = gateway_for(&server)
            .await
            .create(ColumnId::InProgress, &NewTask::new("Write docs", ""))
            .await
            .unwrap();

        assert_eq!(task.id, TaskId::Text("t-9".into()));
        assert_eq!(task.title, "Write docs");
    }

    #[tokio::test]
    async fn test_create_rejects_body_without_task() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .await
            .create(ColumnId::Todo, &NewTask::new("A", ""))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::CreateFailure { column: ColumnId::Todo, source: TransportError::Decode(_) }
        ));
    }

    #[tokio::test]
    async fn test_remove_hits_task_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/tasks/done/17"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        gateway_for(&server)
            .await
            .remove(ColumnId::Done, &TaskId::from(17))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_not_found_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .await
            .remove(ColumnId::Todo, &TaskId::from(1))
            .await
            .unwrap_err();

        match err {
            GatewayError::DeleteFailure { task_id, .. } => assert_eq!(task_id, TaskId::from(1)),
            other => panic!("expected DeleteFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_move_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/move"))
            .and(body_json(json!({
                "from": "todo",
                "to": "done",
                "task": {"id": 1, "title": "A"}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let moved = gateway_for(&server)
            .await
            .move_task(ColumnId::Todo, ColumnId::Done, &Task::new(1, "A"))
            .await
            .unwrap();

        assert_eq!(moved, None);
    }

    #[tokio::test]
    async fn test_move_with_task_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/move"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "task": {"id": 1, "title": "A (renamed)"}
            })))
            .mount(&server)
            .await;

        let moved = gateway_for(&server)
            .await
            .move_task(ColumnId::Todo, ColumnId::Done, &Task::new(1, "A"))
            .await
            .unwrap();

        assert_eq!(moved, Some(Task::new(1, "A (renamed)")));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = GatewayConfig::default()
            .with_base_url(format!("{}/tasks", server.uri()))
            .with_timeout(Duration::from_millis(50));
        let err = HttpTaskGateway::new(config).unwrap().fetch_all().await.unwrap_err();

        assert!(matches!(err.transport(), TransportError::Timeout(_)));
    }
}
