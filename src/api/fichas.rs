use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

use super::ApiClient;
use crate::assignment::{Atribuicao, Candidato};
use crate::error::{ApiError, ApiResult};
use crate::forms::{AtribuirPayload, AtualizaFicha, NovaFicha};
use crate::models::{Ficha, FichaModelo, TipoUsuario};

const FICHAS: &str = "/api/fichas";

/// Server-side plan count; absent means none
fn contagem(total: Option<u64>) -> u32 {
    total.map_or(0, |t| u32::try_from(t).unwrap_or(u32::MAX))
}

impl ApiClient {
    pub async fn fichas(&self) -> ApiResult<Vec<Ficha>> {
        Ok(self.get::<Vec<Ficha>>(FICHAS, "plans").await?.into_list())
    }

    pub async fn ficha(&self, id: &str) -> ApiResult<Ficha> {
        self.get::<Ficha>(&format!("{}/{}", FICHAS, id), "plan")
            .await?
            .into_dados("plan")
    }

    /// Number of active plans of a student, as counted by the server
    pub async fn fichas_ativas_do_aluno(&self, aluno_id: &str) -> ApiResult<u32> {
        let envelope = self
            .get::<Vec<Value>>(&format!("{}/aluno/{}", FICHAS, aluno_id), "plans")
            .await?;
        Ok(contagem(envelope.total))
    }

    pub async fn criar_ficha(&self, ficha: &NovaFicha) -> ApiResult<()> {
        ficha.validate()?;
        self.send::<Value, _>(Method::POST, FICHAS, ficha, "plan").await?;
        info!(aluno = %ficha.aluno_id, "plan created");
        Ok(())
    }

    pub async fn atualizar_ficha(&self, id: &str, ficha: &AtualizaFicha) -> ApiResult<()> {
        ficha.validate()?;
        self.send::<Value, _>(Method::PATCH, &format!("{}/{}", FICHAS, id), ficha, "plan")
            .await?;
        info!(id, "plan updated");
        Ok(())
    }

    pub async fn excluir_ficha(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("{}/{}", FICHAS, id), "plan").await?;
        info!(id, "plan deleted");
        Ok(())
    }

    pub async fn fichas_modelo(&self) -> ApiResult<Vec<FichaModelo>> {
        Ok(self
            .get::<Vec<FichaModelo>>(&format!("{}/modelos", FICHAS), "plan templates")
            .await?
            .into_list())
    }

    pub async fn ficha_modelo(&self, id: &str) -> ApiResult<FichaModelo> {
        self.get::<FichaModelo>(&format!("{}/{}", FICHAS, id), "plan template")
            .await?
            .into_dados("plan template")
    }

    /// Assignment screen for a plan template: active students with their
    /// active-plan counts. A failed count reads as zero.
    pub async fn atribuicao(&self, modelo_id: &str) -> ApiResult<(FichaModelo, Atribuicao)> {
        let (modelo, alunos) = tokio::try_join!(
            self.ficha_modelo(modelo_id),
            self.usuarios_ativos(TipoUsuario::Aluno)
        )?;

        let mut candidatos = Vec::with_capacity(alunos.len());
        for aluno in &alunos {
            let ativas = match self.fichas_ativas_do_aluno(&aluno.id).await {
                Ok(n) => n,
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                Err(e) => {
                    warn!(aluno = %aluno.id, error = %e, "could not count active plans");
                    0
                }
            };
            candidatos.push(Candidato::from_usuario(aluno, ativas));
        }

        let tela = Atribuicao::new(&modelo, candidatos);
        Ok((modelo, tela))
    }

    /// Assign a template to the selected students, returning the server's summary
    pub async fn atribuir(&self, modelo_id: &str, payload: &AtribuirPayload) -> ApiResult<Option<String>> {
        let envelope = self
            .send::<Value, _>(
                Method::POST,
                &format!("{}/{}/atribuir", FICHAS, modelo_id),
                payload,
                "plan template",
            )
            .await?;
        info!(modelo = modelo_id, alunos = payload.alunos_ids.len(), "template assigned");
        Ok(envelope.mensagem())
    }

    pub async fn remover_atribuicao(&self, modelo_id: &str, aluno_id: &str) -> ApiResult<()> {
        self.delete(
            &format!("{}/{}/atribuir/{}", FICHAS, modelo_id, aluno_id),
            "assignment",
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_total_counts_as_zero() {
        assert_eq!(contagem(None), 0);
        assert_eq!(contagem(Some(2)), 2);
        assert_eq!(contagem(Some(u64::MAX)), u32::MAX);
    }
}
