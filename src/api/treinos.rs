use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::error::ApiResult;
use crate::forms::TreinoModeloPayload;
use crate::models::TreinoModelo;

const TREINOS_MODELO: &str = "/api/treinos-modelo";

impl ApiClient {
    pub async fn treinos_modelo(&self, apenas_ativos: bool) -> ApiResult<Vec<TreinoModelo>> {
        let path = if apenas_ativos {
            format!("{}?ativo=true", TREINOS_MODELO)
        } else {
            TREINOS_MODELO.to_string()
        };
        Ok(self
            .get::<Vec<TreinoModelo>>(&path, "workout templates")
            .await?
            .into_list())
    }

    pub async fn treino_modelo(&self, id: &str) -> ApiResult<TreinoModelo> {
        self.get::<TreinoModelo>(&format!("{}/{}", TREINOS_MODELO, id), "workout template")
            .await?
            .into_dados("workout template")
    }

    pub async fn criar_treino_modelo(&self, payload: &TreinoModeloPayload) -> ApiResult<()> {
        self.send::<Value, _>(Method::POST, TREINOS_MODELO, payload, "workout template")
            .await?;
        info!(nome = %payload.nome, "workout template created");
        Ok(())
    }

    pub async fn atualizar_treino_modelo(&self, id: &str, payload: &TreinoModeloPayload) -> ApiResult<()> {
        self.send::<Value, _>(
            Method::PUT,
            &format!("{}/{}", TREINOS_MODELO, id),
            payload,
            "workout template",
        )
        .await?;
        info!(id, "workout template updated");
        Ok(())
    }

    /// Server-side copy of a template
    pub async fn duplicar_treino_modelo(&self, id: &str) -> ApiResult<()> {
        self.send::<Value, _>(
            Method::POST,
            &format!("{}/{}/duplicar", TREINOS_MODELO, id),
            &serde_json::json!({}),
            "workout template",
        )
        .await?;
        Ok(())
    }

    pub async fn excluir_treino_modelo(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("{}/{}", TREINOS_MODELO, id), "workout template")
            .await?;
        info!(id, "workout template deleted");
        Ok(())
    }
}
