//! Plan template assignment - who can still receive a plan

use std::collections::HashSet;

use crate::models::{FichaModelo, Usuario};

/// Active plans a student may hold at once
pub const MAX_FICHAS_ATIVAS: u32 = 3;

/// Student offered for assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Candidato {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub codigo_aluno: Option<u64>,
    pub fichas_ativas: u32,
}

impl Candidato {
    pub fn from_usuario(usuario: &Usuario, fichas_ativas: u32) -> Self {
        Self {
            id: usuario.id.clone(),
            nome: usuario.nome.clone(),
            email: usuario.email.clone(),
            codigo_aluno: usuario.codigo_aluno,
            fichas_ativas,
        }
    }

    pub fn no_limite(&self) -> bool {
        self.fichas_ativas >= MAX_FICHAS_ATIVAS
    }

    /// Case-insensitive name match, or substring of the student code
    pub fn matches(&self, termo: &str) -> bool {
        let termo = termo.trim();
        if termo.is_empty() {
            return true;
        }
        if self.nome.to_lowercase().contains(&termo.to_lowercase()) {
            return true;
        }
        self.codigo_aluno
            .map(|c| c.to_string().contains(termo))
            .unwrap_or(false)
    }
}

/// Display state of one candidate row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situacao {
    /// Template already assigned to this student
    JaAtribuido,
    /// Student holds the maximum number of active plans
    NoLimite,
    Disponivel,
}

/// Assignment screen state for one plan template
#[derive(Debug, Clone)]
pub struct Atribuicao {
    candidatos: Vec<Candidato>,
    atribuidos: HashSet<String>,
    selecionados: Vec<String>,
}

impl Atribuicao {
    pub fn new(modelo: &FichaModelo, candidatos: Vec<Candidato>) -> Self {
        let atribuidos = modelo
            .alunos_atribuidos
            .iter()
            .map(|a| a.aluno.id.clone())
            .collect();
        Self {
            candidatos,
            atribuidos,
            selecionados: Vec::new(),
        }
    }

    pub fn candidatos(&self) -> &[Candidato] {
        &self.candidatos
    }

    pub fn ja_atribuido(&self, aluno_id: &str) -> bool {
        self.atribuidos.contains(aluno_id)
    }

    pub fn ja_atribuidos(&self) -> usize {
        self.atribuidos.len()
    }

    pub fn situacao(&self, candidato: &Candidato) -> Situacao {
        if self.ja_atribuido(&candidato.id) {
            Situacao::JaAtribuido
        } else if candidato.no_limite() {
            Situacao::NoLimite
        } else {
            Situacao::Disponivel
        }
    }

    /// Selectable regardless of any search filter
    pub fn pode_selecionar(&self, aluno_id: &str) -> bool {
        self.candidatos
            .iter()
            .find(|c| c.id == aluno_id)
            .map(|c| self.situacao(c) == Situacao::Disponivel)
            .unwrap_or(false)
    }

    /// Candidates matching a search term, in input order
    pub fn filtrar<'a>(&'a self, termo: &'a str) -> impl Iterator<Item = (&'a Candidato, Situacao)> + 'a {
        self.candidatos
            .iter()
            .filter(move |c| c.matches(termo))
            .map(move |c| (c, self.situacao(c)))
    }

    /// Flip selection of a student; blocked students cannot be selected
    pub fn toggle(&mut self, aluno_id: &str) -> bool {
        if let Some(pos) = self.selecionados.iter().position(|id| id == aluno_id) {
            self.selecionados.remove(pos);
            return true;
        }
        if !self.pode_selecionar(aluno_id) {
            return false;
        }
        self.selecionados.push(aluno_id.to_string());
        true
    }

    /// Select a student; selecting twice keeps a single entry
    pub fn selecionar(&mut self, aluno_id: &str) -> bool {
        self.selecionados.iter().any(|id| id == aluno_id) || self.toggle(aluno_id)
    }

    pub fn selecionados(&self) -> &[String] {
        &self.selecionados
    }
}
