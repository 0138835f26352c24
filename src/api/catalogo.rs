use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::error::ApiResult;
use crate::forms::{AtivoPatch, EquipamentoPayload, ObjetivoPayload};
use crate::models::{Equipamento, Objetivo};

const OBJETIVOS: &str = "/api/catalogo/objetivos";
const EQUIPAMENTOS: &str = "/api/catalogo/equipamentos";

impl ApiClient {
    pub async fn objetivos(&self) -> ApiResult<Vec<Objetivo>> {
        Ok(self.get::<Vec<Objetivo>>(OBJETIVOS, "objectives").await?.into_list())
    }

    pub async fn objetivos_ativos(&self) -> ApiResult<Vec<Objetivo>> {
        Ok(self.objetivos().await?.into_iter().filter(|o| o.ativo).collect())
    }

    pub async fn criar_objetivo(&self, payload: &ObjetivoPayload) -> ApiResult<()> {
        self.send::<Value, _>(Method::POST, OBJETIVOS, payload, "objective").await?;
        info!(nome = %payload.nome, "objective created");
        Ok(())
    }

    pub async fn atualizar_objetivo(&self, id: &str, payload: &ObjetivoPayload) -> ApiResult<()> {
        self.send::<Value, _>(Method::PATCH, &format!("{}/{}", OBJETIVOS, id), payload, "objective")
            .await?;
        Ok(())
    }

    pub async fn set_objetivo_ativo(&self, id: &str, ativo: bool) -> ApiResult<()> {
        self.send::<Value, _>(
            Method::PATCH,
            &format!("{}/{}", OBJETIVOS, id),
            &AtivoPatch { ativo },
            "objective",
        )
        .await?;
        Ok(())
    }

    pub async fn excluir_objetivo(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("{}/{}", OBJETIVOS, id), "objective").await?;
        info!(id, "objective deleted");
        Ok(())
    }

    pub async fn equipamentos(&self) -> ApiResult<Vec<Equipamento>> {
        Ok(self
            .get::<Vec<Equipamento>>(EQUIPAMENTOS, "equipment")
            .await?
            .into_list())
    }

    pub async fn equipamentos_ativos(&self) -> ApiResult<Vec<Equipamento>> {
        Ok(self.equipamentos().await?.into_iter().filter(|e| e.ativo).collect())
    }

    pub async fn criar_equipamento(&self, payload: &EquipamentoPayload) -> ApiResult<()> {
        self.send::<Value, _>(Method::POST, EQUIPAMENTOS, payload, "equipment").await?;
        info!(nome = %payload.nome, "equipment created");
        Ok(())
    }

    pub async fn atualizar_equipamento(&self, id: &str, payload: &EquipamentoPayload) -> ApiResult<()> {
        self.send::<Value, _>(Method::PATCH, &format!("{}/{}", EQUIPAMENTOS, id), payload, "equipment")
            .await?;
        Ok(())
    }

    pub async fn set_equipamento_ativo(&self, id: &str, ativo: bool) -> ApiResult<()> {
        self.send::<Value, _>(
            Method::PATCH,
            &format!("{}/{}", EQUIPAMENTOS, id),
            &AtivoPatch { ativo },
            "equipment",
        )
        .await?;
        Ok(())
    }

    pub async fn excluir_equipamento(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("{}/{}", EQUIPAMENTOS, id), "equipment").await?;
        info!(id, "equipment deleted");
        Ok(())
    }
}
