//! Back-office statistics - counts of people, plans and catalog entries

use chrono::NaiveDate;

use crate::models::{Equipamento, Ficha, Objetivo, TipoUsuario, Usuario};

/// Days ahead that count as "expiring soon"
pub const JANELA_VENCIMENTO_DIAS: i64 = 7;

/// How many recent plans to list
const RECENTES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estatisticas {
    pub total_alunos: usize,
    pub total_professores: usize,
    pub total_fichas: usize,
    pub fichas_ativas: usize,
    pub fichas_vencidas: usize,
    pub fichas_vencendo: usize,
    pub total_objetivos: usize,
    pub total_equipamentos: usize,
}

impl Estatisticas {
    /// Share of active plans, rounded to whole percent
    pub fn percentual_ativas(&self) -> u32 {
        if self.total_fichas == 0 {
            return 0;
        }
        ((self.fichas_ativas as f64 / self.total_fichas as f64) * 100.0).round() as u32
    }
}

/// Report over a snapshot of the API
#[derive(Debug, Clone)]
pub struct Relatorio {
    pub stats: Estatisticas,
    pub vencendo: Vec<Ficha>,
    pub recentes: Vec<Ficha>,
}

/// Validity date lies before `hoje`. Unparseable dates count as past.
pub fn is_past(ficha: &Ficha, hoje: NaiveDate) -> bool {
    ficha.validade().map(|d| d < hoje).unwrap_or(true)
}

pub fn is_ativa(ficha: &Ficha, hoje: NaiveDate) -> bool {
    ficha.ativa && !is_past(ficha, hoje)
}

pub fn is_vencida(ficha: &Ficha, hoje: NaiveDate) -> bool {
    ficha.vencida || is_past(ficha, hoje)
}

/// Active plan whose validity ends within the next week
pub fn is_vencendo(ficha: &Ficha, hoje: NaiveDate) -> bool {
    if ficha.vencida || !ficha.ativa {
        return false;
    }
    match ficha.validade() {
        Some(validade) => {
            let dias = (validade - hoje).num_days();
            (0..=JANELA_VENCIMENTO_DIAS).contains(&dias)
        }
        None => false,
    }
}

/// Status filter of the plan list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroStatus {
    Ativas,
    Vencidas,
}

impl FiltroStatus {
    pub fn aceita(self, ficha: &Ficha, hoje: NaiveDate) -> bool {
        match self {
            Self::Ativas => is_ativa(ficha, hoje),
            Self::Vencidas => is_vencida(ficha, hoje),
        }
    }
}

/// Days left until a plan expires (negative once past)
pub fn dias_restantes(ficha: &Ficha, hoje: NaiveDate) -> Option<i64> {
    ficha.validade().map(|d| (d - hoje).num_days())
}

impl Relatorio {
    pub fn build(
        usuarios: &[Usuario],
        fichas: &[Ficha],
        objetivos: &[Objetivo],
        equipamentos: &[Equipamento],
        hoje: NaiveDate,
    ) -> Self {
        let ativos_do_tipo = |tipo: TipoUsuario| {
            usuarios
                .iter()
                .filter(|u| u.tipo == tipo && u.ativo)
                .count()
        };

        let vencendo: Vec<Ficha> = fichas
            .iter()
            .filter(|f| is_vencendo(f, hoje))
            .cloned()
            .collect();

        let mut recentes: Vec<Ficha> = fichas.to_vec();
        // Newest start date first; undated plans sink
        recentes.sort_by(|a, b| b.inicio().cmp(&a.inicio()));
        recentes.truncate(RECENTES);

        let stats = Estatisticas {
            total_alunos: ativos_do_tipo(TipoUsuario::Aluno),
            total_professores: ativos_do_tipo(TipoUsuario::Professor),
            total_fichas: fichas.len(),
            fichas_ativas: fichas.iter().filter(|f| is_ativa(f, hoje)).count(),
            fichas_vencidas: fichas.iter().filter(|f| is_vencida(f, hoje)).count(),
            fichas_vencendo: vencendo.len(),
            total_objetivos: objetivos.iter().filter(|o| o.ativo).count(),
            total_equipamentos: equipamentos.iter().filter(|e| e.ativo).count(),
        };

        Self {
            stats,
            vencendo,
            recentes,
        }
    }
}
