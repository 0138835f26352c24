//! Request payloads and the checks run before they are sent

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{Anamnese, Categoria, Parte, TipoUsuario, Treino, TreinoModelo, parse_date};

/// Text of an API error body. `mensagem` may be a string or a list.
pub fn mensagem_de(body: &Value) -> Option<String> {
    texto_mensagem(body.get("mensagem")?)
}

/// Text of a `mensagem` value; blank strings and empty lists give nothing
pub fn texto_mensagem(mensagem: &Value) -> Option<String> {
    match mensagem {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

/// Students have no password, so password complaints are not shown for them
pub fn mensagem_criacao_usuario(tipo: TipoUsuario, mensagem: Option<String>) -> String {
    const GENERICA: &str = "error creating user";
    match (tipo, mensagem) {
        (TipoUsuario::Aluno, Some(m)) if m.to_lowercase().contains("senha") => GENERICA.to_string(),
        (_, Some(m)) => m,
        (_, None) => GENERICA.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// New account form
#[derive(Debug, Clone)]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    pub codigo_aluno: Option<u64>,
    pub senha: Option<String>,
    pub confirmar_senha: Option<String>,
    pub telefone: Option<String>,
    pub data_nascimento: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_aluno: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<String>,
}

impl NovoUsuario {
    /// Professors need a confirmed password, students a code.
    /// Only the fields relevant to the role are sent.
    pub fn into_payload(self) -> ApiResult<UsuarioPayload> {
        if self.nome.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ApiError::validation("name and email are required"));
        }

        let senha = non_empty(self.senha);
        if self.tipo == TipoUsuario::Professor {
            let confirmar = non_empty(self.confirmar_senha);
            match (&senha, &confirmar) {
                (Some(s), Some(c)) if s == c => {}
                (Some(_), Some(_)) => return Err(ApiError::validation("passwords do not match")),
                _ => return Err(ApiError::validation("password is required for professors")),
            }
        }

        let codigo_aluno = match self.tipo {
            TipoUsuario::Aluno => match self.codigo_aluno.filter(|c| *c > 0) {
                Some(c) => Some(c),
                None => return Err(ApiError::validation("student code is required")),
            },
            _ => None,
        };

        Ok(UsuarioPayload {
            nome: self.nome.trim().to_string(),
            email: self.email.trim().to_string(),
            tipo: self.tipo,
            codigo_aluno,
            senha: if self.tipo == TipoUsuario::Professor { senha } else { None },
            telefone: non_empty(self.telefone),
            data_nascimento: non_empty(self.data_nascimento),
        })
    }
}

/// Partial account update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_aluno: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

/// Account edit form. A new password must be repeated; the student code
/// is only sent for students.
#[derive(Debug, Clone, Default)]
pub struct EdicaoUsuario {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub codigo_aluno: Option<u64>,
    pub telefone: Option<String>,
    pub data_nascimento: Option<String>,
    pub senha: Option<String>,
    pub confirmar_senha: Option<String>,
}

impl EdicaoUsuario {
    pub fn into_update(self, tipo: TipoUsuario) -> ApiResult<UsuarioUpdate> {
        let senha = non_empty(self.senha);
        if let Some(s) = &senha
            && non_empty(self.confirmar_senha).as_ref() != Some(s)
        {
            return Err(ApiError::validation("passwords do not match"));
        }

        Ok(UsuarioUpdate {
            nome: non_empty(self.nome),
            email: non_empty(self.email),
            codigo_aluno: self
                .codigo_aluno
                .filter(|c| tipo == TipoUsuario::Aluno && *c > 0),
            telefone: non_empty(self.telefone),
            data_nascimento: non_empty(self.data_nascimento),
            senha,
            ativo: None,
        })
    }
}

impl UsuarioUpdate {
    pub fn ativo(ativo: bool) -> Self {
        Self {
            ativo: Some(ativo),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterarSenha {
    pub senha_atual: String,
    pub nova_senha: String,
}

impl AlterarSenha {
    pub fn new(atual: &str, nova: &str, confirmar: &str) -> ApiResult<Self> {
        if nova.is_empty() {
            return Err(ApiError::validation("new password is required"));
        }
        if nova != confirmar {
            return Err(ApiError::validation("passwords do not match"));
        }
        if atual == nova {
            return Err(ApiError::validation(
                "new password must differ from the current one",
            ));
        }
        Ok(Self {
            senha_atual: atual.to_string(),
            nova_senha: nova.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObjetivoPayload {
    pub nome: String,
    pub categoria: Categoria,
    pub ordem: i32,
}

impl ObjetivoPayload {
    pub fn new(nome: &str, categoria: Categoria, ordem: i32) -> ApiResult<Self> {
        if nome.trim().is_empty() {
            return Err(ApiError::validation("objective name is required"));
        }
        if categoria == Categoria::Outra {
            return Err(ApiError::validation("unknown objective category"));
        }
        Ok(Self {
            nome: nome.trim().to_string(),
            categoria,
            ordem,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquipamentoPayload {
    pub nome: String,
}

impl EquipamentoPayload {
    pub fn new(nome: &str) -> ApiResult<Self> {
        if nome.trim().is_empty() {
            return Err(ApiError::validation("equipment name is required"));
        }
        Ok(Self {
            nome: nome.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AtivoPatch {
    pub ativo: bool,
}

fn check_exercicios(treinos: &[Treino]) -> ApiResult<()> {
    let incompleto = treinos
        .iter()
        .flat_map(|t| t.partes.iter())
        .flat_map(|p| p.exercicios.iter())
        .any(|e| !e.is_complete());
    if incompleto {
        return Err(ApiError::validation(
            "every exercise needs an objective and equipment",
        ));
    }
    Ok(())
}

/// Body of template create/update
#[derive(Debug, Clone, Serialize)]
pub struct TreinoModeloPayload {
    pub nome: String,
    pub descricao: String,
    pub cor: String,
    pub partes: Vec<Parte>,
    pub observacoes: String,
    pub objetivos: Vec<String>,
}

impl TreinoModeloPayload {
    pub fn new(
        nome: &str,
        descricao: &str,
        objetivos: Vec<String>,
        treino: Treino,
    ) -> ApiResult<Self> {
        if nome.trim().is_empty() {
            return Err(ApiError::validation("template name is required"));
        }
        if objetivos.is_empty() {
            return Err(ApiError::validation("select at least one objective"));
        }
        if treino.total_exercicios() == 0 {
            return Err(ApiError::validation("add at least one exercise"));
        }
        check_exercicios(std::slice::from_ref(&treino))?;

        Ok(Self {
            nome: nome.trim().to_string(),
            descricao: descricao.to_string(),
            cor: treino.cor,
            partes: treino.partes,
            observacoes: treino.observacoes.unwrap_or_default(),
            objetivos,
        })
    }
}

/// Workout template as written in a JSON file
#[derive(Debug, Clone)]
pub struct TreinoModeloArquivo {
    pub nome: String,
    pub descricao: String,
    pub objetivos: Vec<String>,
    pub treino: Treino,
}

#[derive(Deserialize)]
struct RawArquivo {
    nome: String,
    #[serde(default)]
    descricao: String,
    #[serde(default)]
    objetivos: Vec<String>,
    #[serde(default)]
    cor: String,
    #[serde(default)]
    partes: Vec<Parte>,
    #[serde(default)]
    observacoes: Option<String>,
}

impl TreinoModeloArquivo {
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: RawArquivo = serde_json::from_str(json)?;
        Ok(Self {
            nome: raw.nome,
            descricao: raw.descricao,
            objetivos: raw.objetivos,
            treino: Treino {
                cor: raw.cor,
                partes: raw.partes,
                observacoes: raw.observacoes,
                ..Default::default()
            },
        })
    }

    pub fn read(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        Self::parse(&raw).with_context(|| format!("parsing workout template in {}", path))
    }

    /// Editable copy of a stored template
    pub fn from_modelo(modelo: TreinoModelo) -> Self {
        Self {
            nome: modelo.nome,
            descricao: modelo.descricao,
            objetivos: modelo.objetivos,
            treino: Treino {
                cor: modelo.cor,
                partes: modelo.partes,
                observacoes: Some(modelo.observacoes),
                ..Default::default()
            },
        }
    }
}

fn check_datas(inicio: &str, validade: &str) -> ApiResult<()> {
    if parse_date(inicio).is_none() {
        return Err(ApiError::validation("invalid start date (use YYYY-MM-DD)"));
    }
    if parse_date(validade).is_none() {
        return Err(ApiError::validation("invalid expiry date (use YYYY-MM-DD)"));
    }
    Ok(())
}

/// New plan built from workout templates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaFicha {
    pub aluno_id: String,
    pub professor_referencia_id: String,
    pub data_inicio: String,
    pub data_validade: String,
    pub anamnese: Anamnese,
    pub objetivos: Vec<String>,
    pub anotacoes_nutricao: String,
    pub treinos_ids: Vec<String>,
}

impl NovaFicha {
    pub fn validate(&self) -> ApiResult<()> {
        if self.aluno_id.is_empty() {
            return Err(ApiError::validation("select a student"));
        }
        if self.professor_referencia_id.is_empty() {
            return Err(ApiError::validation("select a reference professor"));
        }
        if self.objetivos.is_empty() {
            return Err(ApiError::validation("select at least one objective"));
        }
        if self.treinos_ids.is_empty() {
            return Err(ApiError::validation("select at least one workout template"));
        }
        check_datas(&self.data_inicio, &self.data_validade)
    }
}

/// Full plan update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizaFicha {
    pub aluno: String,
    pub professor_referencia: String,
    pub data_inicio: String,
    pub data_validade: String,
    pub anamnese: Anamnese,
    pub objetivos: Vec<String>,
    pub anotacoes_nutricao: String,
    pub treinos: Vec<Treino>,
}

impl AtualizaFicha {
    /// Edit payload seeded from a fetched plan, dates cut to `YYYY-MM-DD`
    pub fn from_ficha(ficha: &crate::models::Ficha) -> Self {
        let dia = |raw: &str| raw.split('T').next().unwrap_or_default().to_string();
        Self {
            aluno: ficha.aluno.id.clone(),
            professor_referencia: ficha.professor_referencia.id.clone(),
            data_inicio: dia(&ficha.data_inicio),
            data_validade: dia(&ficha.data_validade),
            anamnese: ficha.anamnese.clone(),
            objetivos: ficha.objetivos.clone(),
            anotacoes_nutricao: ficha.anotacoes_nutricao.clone().unwrap_or_default(),
            treinos: ficha.treinos.clone(),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.objetivos.is_empty() {
            return Err(ApiError::validation("select at least one objective"));
        }
        if self.treinos.is_empty() {
            return Err(ApiError::validation("add at least one workout"));
        }
        if self.treinos.iter().any(|t| t.total_exercicios() == 0) {
            return Err(ApiError::validation(
                "every workout needs at least one exercise",
            ));
        }
        check_exercicios(&self.treinos)?;
        check_datas(&self.data_inicio, &self.data_validade)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtribuirPayload {
    pub alunos_ids: Vec<String>,
}

impl AtribuirPayload {
    pub fn new(alunos_ids: Vec<String>) -> ApiResult<Self> {
        if alunos_ids.is_empty() {
            return Err(ApiError::validation("select at least one student"));
        }
        Ok(Self { alunos_ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercicio;
    use serde_json::json;

    fn novo(tipo: TipoUsuario) -> NovoUsuario {
        NovoUsuario {
            nome: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            tipo,
            codigo_aluno: None,
            senha: None,
            confirmar_senha: None,
            telefone: None,
            data_nascimento: None,
        }
    }

    fn treino_com(exercicios: Vec<Exercicio>) -> Treino {
        Treino {
            cor: "#10B981".to_string(),
            partes: vec![Parte {
                exercicios,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn completo() -> Exercicio {
        Exercicio {
            objetivo: "o".to_string(),
            equipamento: "e".to_string(),
            series: vec![3],
            repeticoes: vec![12],
            ..Default::default()
        }
    }

    #[test]
    fn test_message_string_or_list() {
        assert_eq!(mensagem_de(&json!({"mensagem": "Email já cadastrado"})).as_deref(), Some("Email já cadastrado"));
        assert_eq!(
            mensagem_de(&json!({"mensagem": ["nome obrigatório", "email inválido"]})).as_deref(),
            Some("nome obrigatório, email inválido")
        );
        assert_eq!(mensagem_de(&json!({"sucesso": false})), None);
        assert_eq!(mensagem_de(&json!({"mensagem": []})), None);
        assert_eq!(texto_mensagem(&json!("")), None);
    }

    #[test]
    fn test_student_password_message_hidden() {
        let msg = Some("Senha muito curta".to_string());
        assert_eq!(mensagem_criacao_usuario(TipoUsuario::Aluno, msg.clone()), "error creating user");
        assert_eq!(mensagem_criacao_usuario(TipoUsuario::Professor, msg), "Senha muito curta");
        assert_eq!(
            mensagem_criacao_usuario(TipoUsuario::Aluno, Some("Código em uso".into())),
            "Código em uso"
        );
    }

    #[test]
    fn test_student_needs_code() {
        assert!(novo(TipoUsuario::Aluno).into_payload().is_err());

        let mut form = novo(TipoUsuario::Aluno);
        form.codigo_aluno = Some(1234);
        form.senha = Some("ignored".into());
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.codigo_aluno, Some(1234));
        assert_eq!(payload.senha, None);

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["codigoAluno"], 1234);
        assert!(body.get("senha").is_none());
        assert!(body.get("telefone").is_none());
    }

    #[test]
    fn test_professor_needs_matching_password() {
        let mut form = novo(TipoUsuario::Professor);
        assert!(form.clone().into_payload().is_err());

        form.senha = Some("abc123".into());
        form.confirmar_senha = Some("abc124".into());
        let err = form.clone().into_payload().unwrap_err();
        assert_eq!(err.to_string(), "passwords do not match");

        form.confirmar_senha = Some("abc123".into());
        form.codigo_aluno = Some(9);
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.senha.as_deref(), Some("abc123"));
        assert_eq!(payload.codigo_aluno, None);
    }

    #[test]
    fn test_optional_fields_sent_when_filled() {
        let mut form = novo(TipoUsuario::Administrador);
        form.telefone = Some("51999990000".into());
        form.data_nascimento = Some("  ".into());
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.telefone.as_deref(), Some("51999990000"));
        assert_eq!(payload.data_nascimento, None);
    }

    #[test]
    fn test_user_update_only_set_fields() {
        let body = serde_json::to_value(UsuarioUpdate::ativo(false)).unwrap();
        assert_eq!(body, json!({"ativo": false}));
        assert!(UsuarioUpdate::default().is_empty());
    }

    #[test]
    fn test_edit_password_must_match() {
        let form = EdicaoUsuario {
            senha: Some("nova123".into()),
            confirmar_senha: Some("nova12".into()),
            ..Default::default()
        };
        let err = form.clone().into_update(TipoUsuario::Professor).unwrap_err();
        assert_eq!(err.to_string(), "passwords do not match");

        let sem_confirmacao = EdicaoUsuario {
            confirmar_senha: None,
            ..form.clone()
        };
        assert!(sem_confirmacao.into_update(TipoUsuario::Professor).is_err());

        let ok = EdicaoUsuario {
            confirmar_senha: Some("nova123".into()),
            ..form
        };
        let update = ok.into_update(TipoUsuario::Professor).unwrap();
        assert_eq!(update.senha.as_deref(), Some("nova123"));
    }

    #[test]
    fn test_edit_code_only_for_students() {
        let form = EdicaoUsuario {
            nome: Some("Ana".into()),
            codigo_aluno: Some(55),
            ..Default::default()
        };
        let professor = form.clone().into_update(TipoUsuario::Professor).unwrap();
        assert_eq!(professor.codigo_aluno, None);
        let body = serde_json::to_value(&professor).unwrap();
        assert_eq!(body, json!({"nome": "Ana"}));

        let aluno = form.into_update(TipoUsuario::Aluno).unwrap();
        assert_eq!(aluno.codigo_aluno, Some(55));
    }

    #[test]
    fn test_edit_without_changes_is_empty() {
        let update = EdicaoUsuario::default().into_update(TipoUsuario::Aluno).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_change_password_rules() {
        assert!(AlterarSenha::new("old", "new", "nwe").is_err());
        assert!(AlterarSenha::new("same", "same", "same").is_err());
        assert!(AlterarSenha::new("old", "", "").is_err());
        let body = serde_json::to_value(AlterarSenha::new("old", "new", "new").unwrap()).unwrap();
        assert_eq!(body, json!({"senhaAtual": "old", "novaSenha": "new"}));
    }

    #[test]
    fn test_catalog_payloads() {
        assert!(EquipamentoPayload::new(" ").is_err());
        assert!(ObjetivoPayload::new("Cardio", Categoria::Outra, 1).is_err());
        let body = serde_json::to_value(
            ObjetivoPayload::new("Cardio leve", Categoria::AerobicoAquecimento, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(body["categoria"], "aerobico_aquecimento");
    }

    #[test]
    fn test_template_payload_checks() {
        let objetivos = vec!["Hipertrofia".to_string()];
        assert!(TreinoModeloPayload::new("", "", objetivos.clone(), treino_com(vec![completo()])).is_err());
        assert!(TreinoModeloPayload::new("A", "", vec![], treino_com(vec![completo()])).is_err());
        assert!(TreinoModeloPayload::new("A", "", objetivos.clone(), treino_com(vec![])).is_err());

        let mut incompleto = completo();
        incompleto.equipamento.clear();
        let err = TreinoModeloPayload::new("A", "", objetivos.clone(), treino_com(vec![incompleto])).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let payload = TreinoModeloPayload::new("Treino A", "Peito", objetivos, treino_com(vec![completo()])).unwrap();
        assert_eq!(payload.cor, "#10B981");
        assert_eq!(payload.partes.len(), 1);
    }

    fn nova_ficha() -> NovaFicha {
        NovaFicha {
            aluno_id: "a1".into(),
            professor_referencia_id: "p1".into(),
            data_inicio: "2024-06-01".into(),
            data_validade: "2024-09-01".into(),
            anamnese: Anamnese::default(),
            objetivos: vec!["Emagrecimento".into()],
            anotacoes_nutricao: String::new(),
            treinos_ids: vec!["t1".into()],
        }
    }

    #[test]
    fn test_new_plan_checks() {
        assert!(nova_ficha().validate().is_ok());

        let mut f = nova_ficha();
        f.aluno_id.clear();
        assert_eq!(f.validate().unwrap_err().to_string(), "select a student");

        let mut f = nova_ficha();
        f.treinos_ids.clear();
        assert!(f.validate().is_err());

        let mut f = nova_ficha();
        f.data_validade = "01/09/2024".into();
        assert!(f.validate().is_err());

        let body = serde_json::to_value(nova_ficha()).unwrap();
        assert_eq!(body["professorReferenciaId"], "p1");
        assert_eq!(body["treinosIds"], json!(["t1"]));
    }

    #[test]
    fn test_plan_update_checks() {
        let mut f = AtualizaFicha {
            aluno: "a1".into(),
            professor_referencia: "p1".into(),
            data_inicio: "2024-06-01".into(),
            data_validade: "2024-09-01".into(),
            anamnese: Anamnese::default(),
            objetivos: vec!["x".into()],
            anotacoes_nutricao: String::new(),
            treinos: vec![treino_com(vec![completo()])],
        };
        assert!(f.validate().is_ok());

        f.treinos.push(treino_com(vec![]));
        assert!(f.validate().is_err());

        f.treinos.pop();
        f.treinos[0].partes[0].exercicios[0].objetivo.clear();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_template_file_parse() {
        let arquivo = TreinoModeloArquivo::parse(
            r##"{
                "nome": "Treino A",
                "objetivos": ["Hipertrofia"],
                "cor": "#EF4444",
                "partes": [{"nome": "Principal", "exercicios": [
                    {"objetivo": "o1", "equipamento": "e1", "series": [3, 3], "repeticoes": [12], "ordem": 0}
                ]}]
            }"##,
        )
        .unwrap();
        assert_eq!(arquivo.nome, "Treino A");
        assert_eq!(arquivo.descricao, "");
        assert_eq!(arquivo.treino.cor, "#EF4444");
        assert_eq!(arquivo.treino.total_exercicios(), 1);

        assert!(TreinoModeloArquivo::parse(r#"{"descricao": "sem nome"}"#).is_err());
    }

    #[test]
    fn test_assign_needs_selection() {
        assert!(AtribuirPayload::new(vec![]).is_err());
        let body = serde_json::to_value(AtribuirPayload::new(vec!["a1".into()]).unwrap()).unwrap();
        assert_eq!(body, json!({"alunosIds": ["a1"]}));
    }
}
