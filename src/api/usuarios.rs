use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::forms::{NovoUsuario, UsuarioUpdate, mensagem_criacao_usuario};
use crate::models::{TipoUsuario, Usuario};

impl ApiClient {
    pub async fn usuarios(&self) -> ApiResult<Vec<Usuario>> {
        Ok(self.get::<Vec<Usuario>>("/api/usuarios", "users").await?.into_list())
    }

    /// Active accounts of one role
    pub async fn usuarios_ativos(&self, tipo: TipoUsuario) -> ApiResult<Vec<Usuario>> {
        Ok(self
            .usuarios()
            .await?
            .into_iter()
            .filter(|u| u.tipo == tipo && u.ativo)
            .collect())
    }

    pub async fn usuario(&self, id: &str) -> ApiResult<Usuario> {
        self.get::<Usuario>(&format!("/api/usuarios/{}", id), "user")
            .await?
            .into_dados("user")
    }

    pub async fn criar_usuario(&self, form: NovoUsuario) -> ApiResult<()> {
        let tipo = form.tipo;
        let payload = form.into_payload()?;
        match self
            .send::<Value, _>(Method::POST, "/api/usuarios", &payload, "user")
            .await
        {
            Ok(_) => {
                info!(email = %payload.email, "user created");
                Ok(())
            }
            Err(ApiError::Api { status, message }) => Err(ApiError::Api {
                status,
                message: mensagem_criacao_usuario(tipo, Some(message)),
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn atualizar_usuario(&self, id: &str, update: &UsuarioUpdate) -> ApiResult<()> {
        if update.is_empty() {
            return Err(ApiError::validation("nothing to update"));
        }
        self.send::<Value, _>(Method::PATCH, &format!("/api/usuarios/{}", id), update, "user")
            .await?;
        info!(id, "user updated");
        Ok(())
    }

    /// Flip the active flag, returning the new state
    pub async fn alternar_usuario(&self, id: &str) -> ApiResult<bool> {
        let usuario = self.usuario(id).await?;
        let novo = !usuario.ativo;
        self.atualizar_usuario(id, &UsuarioUpdate::ativo(novo)).await?;
        Ok(novo)
    }
}
