//! API client - REST calls to the gym-management server
//!
//! Every response is an envelope `{ sucesso, dados, mensagem, token, total }`.
//! The stored bearer token is attached to each request; a 401 clears it.

mod auth;
mod catalogo;
mod fichas;
mod treinos;
mod usuarios;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::db::Database;
use crate::error::{ApiError, ApiResult, MENSAGEM_GENERICA};
use crate::forms::{mensagem_de, texto_mensagem};

/// Base URL used when none is configured
pub fn default_base_url() -> &'static str {
    if cfg!(debug_assertions) {
        "http://localhost:5000"
    } else {
        "https://academyserver.jneumann.com.br"
    }
}

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub sucesso: bool,
    #[serde(default = "Option::default")]
    pub dados: Option<T>,
    #[serde(default)]
    pub mensagem: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Envelope<T> {
    /// Payload of a detail lookup; absence means the record does not exist
    pub fn into_dados(self, resource: &str) -> ApiResult<T> {
        self.dados.ok_or_else(|| ApiError::not_found(resource))
    }

    pub fn mensagem(&self) -> Option<String> {
        self.mensagem.as_ref().and_then(texto_mensagem)
    }
}

impl<T> Envelope<Vec<T>> {
    /// List payload; a missing list reads as empty
    pub fn into_list(self) -> Vec<T> {
        self.dados.unwrap_or_default()
    }
}

/// Turn status and body into an envelope or a categorized error.
/// 401 is handled by the caller, which owns the session.
pub fn interpret<T: DeserializeOwned>(
    status: StatusCode,
    body: Value,
    resource: &str,
) -> ApiResult<Envelope<T>> {
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::not_found(resource));
    }
    if !status.is_success() {
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: mensagem_de(&body).unwrap_or_else(|| MENSAGEM_GENERICA.to_string()),
        });
    }

    let envelope: Envelope<T> = serde_json::from_value(body)?;
    if !envelope.sucesso {
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: envelope
                .mensagem()
                .unwrap_or_else(|| MENSAGEM_GENERICA.to_string()),
        });
    }
    Ok(envelope)
}

/// Body as JSON. Error pages that are not JSON (HTML 404s, proxy errors)
/// read as an empty body; only a successful response must decode.
pub fn parse_body(status: StatusCode, text: &str) -> ApiResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Ok(Value::Null),
        Err(e) => Err(e.into()),
    }
}

/// Join base URL and an absolute API path
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Client for the gym-management REST API
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Database,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Database) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("academia/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Database {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = join_url(&self.base_url, path);
        debug!(%method, %url, "request");
        let mut req = self.http.request(method, url);
        if let Some(token) = self.session.token()? {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        resource: &str,
    ) -> ApiResult<Envelope<T>> {
        let resp = req.send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(resource, "token rejected, clearing session");
            self.session.clear_session()?;
            return Err(ApiError::Unauthorized);
        }

        let text = resp.text().await?;
        let body = parse_body(status, &text)?;
        debug!(status = status.as_u16(), resource, "response");
        interpret(status, body, resource)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, resource: &str) -> ApiResult<Envelope<T>> {
        let req = self.request(Method::GET, path)?;
        self.execute(req, resource).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        resource: &str,
    ) -> ApiResult<Envelope<T>> {
        let req = self.request(method, path)?.json(body);
        self.execute(req, resource).await
    }

    async fn delete(&self, path: &str, resource: &str) -> ApiResult<Envelope<Value>> {
        let req = self.request(Method::DELETE, path)?;
        self.execute(req, resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Objetivo, SessionUser, TipoUsuario};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://localhost:5000", "/api/fichas"), "http://localhost:5000/api/fichas");
        assert_eq!(join_url("http://localhost:5000/", "api/fichas"), "http://localhost:5000/api/fichas");
    }

    #[test]
    fn test_interpret_list() {
        let body = json!({
            "sucesso": true,
            "dados": [{"_id": "o1", "nome": "Aquecimento", "categoria": "aerobico_aquecimento", "ordem": 1, "ativo": true}]
        });
        let env: Envelope<Vec<Objetivo>> = interpret(StatusCode::OK, body, "objectives").unwrap();
        let list = env.into_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].nome, "Aquecimento");
    }

    #[test]
    fn test_interpret_missing_list_is_empty() {
        let env: Envelope<Vec<Objetivo>> = interpret(StatusCode::OK, json!({"sucesso": true}), "objectives").unwrap();
        assert!(env.into_list().is_empty());
    }

    #[test]
    fn test_interpret_missing_detail_is_not_found() {
        let env: Envelope<Objetivo> = interpret(StatusCode::OK, json!({"sucesso": true}), "objective").unwrap();
        let err = env.into_dados("objective").unwrap_err();
        assert_eq!(err.to_string(), "objective not found");
    }

    #[test]
    fn test_interpret_forwards_api_message() {
        let err = interpret::<Value>(
            StatusCode::BAD_REQUEST,
            json!({"sucesso": false, "mensagem": "Email já cadastrado"}),
            "user",
        )
        .unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email já cadastrado");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_interpret_generic_message() {
        let err = interpret::<Value>(StatusCode::INTERNAL_SERVER_ERROR, Value::Null, "user").unwrap_err();
        assert_eq!(err.to_string(), MENSAGEM_GENERICA);
    }

    #[test]
    fn test_interpret_not_found_status() {
        let err = interpret::<Value>(StatusCode::NOT_FOUND, json!({}), "plan").unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn test_interpret_success_flag_false() {
        let err = interpret::<Value>(
            StatusCode::OK,
            json!({"sucesso": false, "mensagem": ["a", "b"]}),
            "plan",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "a, b");
    }

    #[test]
    fn test_envelope_token_and_total() {
        let env: Envelope<Value> = interpret(
            StatusCode::OK,
            json!({"sucesso": true, "token": "t", "total": 2}),
            "x",
        )
        .unwrap();
        assert_eq!(env.token.as_deref(), Some("t"));
        assert_eq!(env.total, Some(2));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(StatusCode::OK, "  ").unwrap(), Value::Null);
        assert_eq!(parse_body(StatusCode::NOT_FOUND, "<pre>Cannot GET</pre>").unwrap(), Value::Null);
        assert_eq!(parse_body(StatusCode::BAD_REQUEST, r#"{"mensagem": "x"}"#).unwrap(), json!({"mensagem": "x"}));
        assert!(matches!(parse_body(StatusCode::OK, "<html>"), Err(ApiError::Decode(_))));
    }

    /// Serve one canned HTTP response on a loopback port.
    /// The handle yields the raw request that was received.
    async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}", addr), handle)
    }

    fn loopback_client(base_url: &str, session: Database) -> ApiClient {
        ApiClient {
            http: Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.to_string(),
            session,
        }
    }

    fn logged_in_client(base_url: &str) -> ApiClient {
        let db = Database::open_in_memory().unwrap();
        let user = SessionUser {
            id: "u1".to_string(),
            nome: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            tipo: TipoUsuario::Administrador,
            codigo_aluno: None,
        };
        db.save_session(&user, "tok-1").unwrap();
        loopback_client(base_url, db)
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let (url, server) = serve_once("200 OK", "application/json", r#"{"sucesso": true, "dados": []}"#).await;
        let client = logged_in_client(&url);

        let fichas = client.fichas().await.unwrap();
        assert!(fichas.is_empty());

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /api/fichas "));
        assert!(request.contains("authorization: bearer tok-1"));
    }

    #[tokio::test]
    async fn test_no_bearer_without_session() {
        let (url, server) = serve_once("200 OK", "application/json", r#"{"sucesso": true, "dados": []}"#).await;
        let client = loopback_client(&url, Database::open_in_memory().unwrap());
        client.fichas().await.unwrap();
        assert!(!server.await.unwrap().to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let (url, _server) = serve_once("401 Unauthorized", "application/json", r#"{"sucesso": false, "mensagem": "Token inválido"}"#).await;
        let client = logged_in_client(&url);

        let err = client.fichas().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(client.session().token().unwrap().is_none());
        assert!(client.session().load_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_html_404_is_not_found() {
        let (url, _server) = serve_once("404 Not Found", "text/html", "<pre>Cannot GET /api/fichas/x</pre>").await;
        let client = logged_in_client(&url);

        let err = client.ficha("x").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }), "got {:?}", err);
        assert_eq!(client.session().token().unwrap().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_html_502_is_generic_failure() {
        let (url, _server) = serve_once("502 Bad Gateway", "text/html", "<html><body>Bad Gateway</body></html>").await;
        let client = logged_in_client(&url);

        match client.fichas().await.unwrap_err() {
            ApiError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, MENSAGEM_GENERICA);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_json_error_message_forwarded() {
        let (url, _server) = serve_once("400 Bad Request", "application/json", r#"{"sucesso": false, "mensagem": ["dataValidade inválida"]}"#).await;
        let client = logged_in_client(&url);

        let err = client.ficha("f1").await.unwrap_err();
        assert_eq!(err.to_string(), "dataValidade inválida");
    }
}
