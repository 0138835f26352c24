//! API data model - shapes mirrored from the gym-management REST API

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TipoUsuario {
    Administrador,
    Professor,
    Aluno,
}

impl TipoUsuario {
    pub fn label(&self) -> &'static str {
        match self {
            TipoUsuario::Administrador => "admin",
            TipoUsuario::Professor => "professor",
            TipoUsuario::Aluno => "student",
        }
    }
}

/// Execution-phase tag of an objective, used for exercise ordering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Categoria {
    AerobicoAquecimento,
    Dinamico,
    Musculacao,
    AerobicoDesaquecimento,
    #[serde(other)]
    Outra,
}

impl Categoria {
    /// Position in a workout: warm-up cardio first, cool-down cardio last.
    /// Anything unrecognized sits with strength work.
    pub fn precedencia(&self) -> u8 {
        match self {
            Categoria::AerobicoAquecimento => 1,
            Categoria::Dinamico => 2,
            Categoria::Musculacao => 3,
            Categoria::AerobicoDesaquecimento => 4,
            Categoria::Outra => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Categoria::AerobicoAquecimento => "warm-up cardio",
            Categoria::Dinamico => "dynamic",
            Categoria::Musculacao => "strength",
            Categoria::AerobicoDesaquecimento => "cool-down cardio",
            Categoria::Outra => "other",
        }
    }
}

/// User account as returned by `/api/usuarios`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_aluno: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<String>,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Usuario {
    /// Case-insensitive name or email match, or substring of the student code
    pub fn matches(&self, termo: &str) -> bool {
        let termo = termo.trim();
        if termo.is_empty() {
            return true;
        }
        let lower = termo.to_lowercase();
        self.nome.to_lowercase().contains(&lower)
            || self.email.to_lowercase().contains(&lower)
            || codigo_contem(self.codigo_aluno, termo)
    }
}

fn codigo_contem(codigo: Option<u64>, termo: &str) -> bool {
    codigo.is_some_and(|c| c.to_string().contains(termo))
}

/// Cached profile of the logged-in operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_aluno: Option<u64>,
}

impl SessionUser {
    /// Profile carries every field the session needs
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.nome.trim().is_empty() && !self.email.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objetivo {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    pub categoria: Categoria,
    #[serde(default)]
    pub ordem: i32,
    #[serde(default)]
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipamento {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub ativo: bool,
}

/// How an exercise is prescribed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TipoExercicio {
    #[default]
    Series,
    Tempo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Exercicio {
    /// Objective id (populated objects are reduced to their id)
    #[serde(default, deserialize_with = "id_or_object")]
    pub objetivo: String,
    #[serde(default, deserialize_with = "id_or_object")]
    pub equipamento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoExercicio>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub series: Vec<u32>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub repeticoes: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo_segundos: Option<u32>,
    #[serde(default)]
    pub detalhes: Option<String>,
    #[serde(default)]
    pub ordem: u32,
}

impl Exercicio {
    pub fn tipo(&self) -> TipoExercicio {
        self.tipo.unwrap_or_default()
    }

    /// Both references chosen
    pub fn is_complete(&self) -> bool {
        !self.objetivo.is_empty() && !self.equipamento.is_empty()
    }

    /// Compact prescription, e.g. `3x12, 3x10` or `5m 00s`
    pub fn prescricao(&self) -> String {
        match self.tipo() {
            TipoExercicio::Tempo => {
                let secs = self.tempo_segundos.unwrap_or(0);
                format!("{}m {:02}s", secs / 60, secs % 60)
            }
            TipoExercicio::Series => self
                .series
                .iter()
                .zip(self.repeticoes.iter())
                .map(|(s, r)| format!("{}x{}", s, r))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Parte {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default)]
    pub exercicios: Vec<Exercicio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercicios_juntos: Option<Vec<Vec<u32>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Treino {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub cor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default)]
    pub partes: Vec<Parte>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

impl Treino {
    pub fn total_exercicios(&self) -> usize {
        self.partes.iter().map(|p| p.exercicios.len()).sum()
    }
}

/// Reusable workout template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreinoModelo {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub cor: String,
    #[serde(default)]
    pub partes: Vec<Parte>,
    #[serde(default)]
    pub observacoes: String,
    #[serde(default)]
    pub objetivos: Vec<String>,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condicoes {
    #[serde(default)]
    pub diabetes: bool,
    #[serde(default)]
    pub hipertensao: bool,
    #[serde(default)]
    pub doenca_cardiaca: bool,
    #[serde(default)]
    pub hipoglicemia: bool,
    #[serde(default)]
    pub alergia: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao_alergia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outras: Option<Vec<String>>,
}

impl Condicoes {
    /// Names of the flagged conditions
    pub fn marcadas(&self) -> Vec<&'static str> {
        [
            (self.diabetes, "diabetes"),
            (self.hipertensao, "hypertension"),
            (self.doenca_cardiaca, "heart disease"),
            (self.hipoglicemia, "hypoglycemia"),
            (self.alergia, "allergy"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Health intake questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Anamnese {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedios: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problemas_saude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doencas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cirurgias: Option<String>,
    #[serde(default)]
    pub condicoes: Condicoes,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlunoRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub codigo_aluno: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfessorRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
}

/// Training plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ficha {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub aluno: AlunoRef,
    #[serde(default)]
    pub professor_referencia: ProfessorRef,
    pub data_inicio: String,
    pub data_validade: String,
    #[serde(default)]
    pub anamnese: Anamnese,
    #[serde(default)]
    pub objetivos: Vec<String>,
    #[serde(default)]
    pub anotacoes_nutricao: Option<String>,
    #[serde(default)]
    pub treinos: Vec<Treino>,
    #[serde(default)]
    pub ativa: bool,
    #[serde(default)]
    pub vencida: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Ficha {
    pub fn inicio(&self) -> Option<NaiveDate> {
        parse_date(&self.data_inicio)
    }

    pub fn validade(&self) -> Option<NaiveDate> {
        parse_date(&self.data_validade)
    }

    /// Student name (case-insensitive) or student code contains `termo`
    pub fn matches(&self, termo: &str) -> bool {
        let termo = termo.trim();
        termo.is_empty()
            || self.aluno.nome.to_lowercase().contains(&termo.to_lowercase())
            || codigo_contem(self.aluno.codigo_aluno, termo)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlunoAtribuido {
    #[serde(default)]
    pub aluno: AlunoRef,
    #[serde(default)]
    pub data_atribuicao: Option<String>,
}

/// Plan template that can be assigned to many students
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FichaModelo {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nome_modelo: String,
    #[serde(default)]
    pub professor_referencia: ProfessorRef,
    #[serde(default)]
    pub alunos_atribuidos: Vec<AlunoAtribuido>,
    #[serde(default)]
    pub treinos: Vec<Treino>,
    #[serde(default)]
    pub objetivos: Vec<String>,
    #[serde(default)]
    pub data_validade: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Date part of an API timestamp (`2024-03-01T00:00:00.000Z` or `2024-03-01`)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split('T').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Short display form of an API timestamp
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reference {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
    },
}

fn id_or_object<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Reference>::deserialize(deserializer)? {
        Some(Reference::Id(id)) | Some(Reference::Populated { id }) => id,
        None => String::new(),
    })
}

fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<u32>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_reference_as_string() {
        let ex: Exercicio = serde_json::from_str(
            r#"{"objetivo": "obj1", "equipamento": "eq1", "series": [3], "repeticoes": [12], "ordem": 0}"#,
        )
        .unwrap();
        assert_eq!(ex.objetivo, "obj1");
        assert_eq!(ex.equipamento, "eq1");
        assert_eq!(ex.tipo(), TipoExercicio::Series);
    }

    #[test]
    fn test_exercise_reference_populated() {
        let ex: Exercicio = serde_json::from_str(
            r#"{
                "objetivo": {"_id": "obj1", "nome": "Hipertrofia", "categoria": "musculacao"},
                "equipamento": {"_id": "eq1", "nome": "Supino"},
                "tipo": "tempo",
                "series": null,
                "tempoSegundos": 300
            }"#,
        )
        .unwrap();
        assert_eq!(ex.objetivo, "obj1");
        assert_eq!(ex.equipamento, "eq1");
        assert_eq!(ex.tipo(), TipoExercicio::Tempo);
        assert!(ex.series.is_empty());
        assert_eq!(ex.prescricao(), "5m 00s");
    }

    #[test]
    fn test_exercise_null_reference() {
        let ex: Exercicio = serde_json::from_str(r#"{"objetivo": null}"#).unwrap();
        assert_eq!(ex.objetivo, "");
        assert!(!ex.is_complete());
    }

    #[test]
    fn test_unknown_category() {
        let obj: Objetivo = serde_json::from_str(
            r#"{"_id": "o", "nome": "Alongamento", "categoria": "flexibilidade", "ordem": 1, "ativo": true}"#,
        )
        .unwrap();
        assert_eq!(obj.categoria, Categoria::Outra);
        assert_eq!(obj.categoria.precedencia(), 3);
    }

    #[test]
    fn test_category_precedence() {
        assert!(Categoria::AerobicoAquecimento.precedencia() < Categoria::Dinamico.precedencia());
        assert!(Categoria::Dinamico.precedencia() < Categoria::Musculacao.precedencia());
        assert!(Categoria::Musculacao.precedencia() < Categoria::AerobicoDesaquecimento.precedencia());
    }

    #[test]
    fn test_prescription_series() {
        let ex = Exercicio {
            series: vec![3, 2],
            repeticoes: vec![12, 10],
            ..Default::default()
        };
        assert_eq!(ex.prescricao(), "3x12, 2x10");
    }

    #[test]
    fn test_session_user_accepts_mongo_id() {
        let user: SessionUser = serde_json::from_str(
            r#"{"_id": "u1", "nome": "Ana", "email": "ana@gym.com", "tipo": "administrador"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.is_complete());
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date("2024-03-01"), Some(expected));
        assert_eq!(parse_date("garbage"), None);
        assert_eq!(format_date("2024-03-01T10:00:00Z"), "01/03/2024");
        assert_eq!(format_date(""), "-");
    }

    #[test]
    fn test_conditions_flagged() {
        let c = Condicoes {
            diabetes: true,
            alergia: true,
            ..Default::default()
        };
        assert_eq!(c.marcadas(), vec!["diabetes", "allergy"]);
    }

    #[test]
    fn test_ficha_deserialize() {
        let ficha: Ficha = serde_json::from_str(
            r##"{
                "_id": "f1",
                "aluno": {"_id": "a1", "nome": "Bia", "email": "bia@x.com", "codigoAluno": 42},
                "professorReferencia": {"_id": "p1", "nome": "Caio", "email": "caio@x.com"},
                "dataInicio": "2024-01-10T00:00:00.000Z",
                "dataValidade": "2024-04-10T00:00:00.000Z",
                "anamnese": {"condicoes": {"diabetes": false, "hipertensao": true, "doencaCardiaca": false, "hipoglicemia": false, "alergia": false}},
                "objetivos": ["Hipertrofia"],
                "treinos": [{"cor": "#EF4444", "partes": [{"exercicios": []}]}],
                "ativa": true,
                "vencida": false
            }"##,
        )
        .unwrap();
        assert_eq!(ficha.aluno.codigo_aluno, Some(42));
        assert!(ficha.anamnese.condicoes.hipertensao);
        assert_eq!(ficha.validade(), NaiveDate::from_ymd_opt(2024, 4, 10));
        assert_eq!(ficha.treinos[0].total_exercicios(), 0);
    }

    fn usuario(nome: &str, email: &str, codigo: Option<u64>) -> Usuario {
        Usuario {
            id: "u1".into(),
            nome: nome.into(),
            email: email.into(),
            tipo: TipoUsuario::Aluno,
            codigo_aluno: codigo,
            telefone: None,
            data_nascimento: None,
            ativo: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_user_search() {
        let bia = usuario("Bia Souza", "bia@gym.com", Some(1042));
        assert!(bia.matches(""));
        assert!(bia.matches("souza"));
        assert!(bia.matches("GYM.COM"));
        assert!(bia.matches("104"));
        assert!(!bia.matches("caio"));

        let caio = usuario("Caio", "caio@gym.com", None);
        assert!(!caio.matches("1"));
    }

    #[test]
    fn test_ficha_search_by_student() {
        let ficha: Ficha = serde_json::from_str(
            r#"{"_id": "f1", "aluno": {"_id": "a1", "nome": "Bia Souza", "email": "bia@gym.com", "codigoAluno": 77},
                "dataInicio": "2024-01-10", "dataValidade": "2024-04-10"}"#,
        )
        .unwrap();
        assert!(ficha.matches("bia"));
        assert!(ficha.matches("77"));
        assert!(ficha.matches("  "));
        assert!(!ficha.matches("bia@gym.com"));
        assert!(!ficha.matches("78"));
    }
}
