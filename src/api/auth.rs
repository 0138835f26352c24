use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::db::Session;
use crate::error::{ApiError, ApiResult};
use crate::forms::{AlterarSenha, LoginPayload};
use crate::models::SessionUser;

impl ApiClient {
    /// Authenticate and store the session
    pub async fn login(&self, email: &str, senha: &str) -> ApiResult<SessionUser> {
        if email.trim().is_empty() || senha.is_empty() {
            return Err(ApiError::validation("email and password are required"));
        }

        let payload = LoginPayload {
            email: email.trim().to_string(),
            senha: senha.to_string(),
        };
        // No bearer on login, and a 401 here means bad credentials
        let req = self
            .http
            .post(super::join_url(&self.base_url, "/api/auth/login"))
            .json(&payload);
        let resp = req.send().await?;
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let envelope = super::interpret::<SessionUser>(status, body, "account")?;

        let token = envelope
            .token
            .clone()
            .ok_or_else(|| ApiError::validation("invalid token"))?;
        let usuario = envelope.into_dados("account")?;
        self.session.save_session(&usuario, &token)?;
        info!(user = %usuario.email, "logged in");
        Ok(usuario)
    }

    /// Forget the local session
    pub fn logout(&self) -> ApiResult<()> {
        self.session.clear_session()
    }

    pub fn current_session(&self) -> ApiResult<Option<Session>> {
        self.session.load_session()
    }

    /// Change the operator's password. A refreshed token replaces the stored one.
    pub async fn alterar_senha(&self, form: &AlterarSenha) -> ApiResult<()> {
        let envelope = self
            .send::<Value, _>(Method::PUT, "/api/auth/alterarsenha", form, "account")
            .await?;
        if let Some(token) = envelope.token.as_deref() {
            self.session.update_token(token)?;
        }
        info!("password changed");
        Ok(())
    }
}
