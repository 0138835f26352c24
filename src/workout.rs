//! Workout editing - exercise prescription and template builder
//!
//! Features:
//! - Keeps the sets/reps sequences of an exercise index-aligned
//! - Switches exercises between set-based and timed prescription
//! - Orders a segment's exercises by objective phase
//! - Edits the single workout of a template

use std::collections::HashMap;

use crate::models::{Categoria, Exercicio, Objetivo, Parte, TipoExercicio, Treino};

/// Value used when a set slot has to be created
pub const DEFAULT_SERIE: u32 = 10;

/// Duration given to an exercise switched to timed without a duration (5 min)
pub const DEFAULT_TEMPO_SEGUNDOS: u32 = 300;

/// Defaults of a freshly added exercise
const NOVO_SERIES: u32 = 3;
const NOVO_REPETICOES: u32 = 12;

/// Color tags offered for workouts
pub const CORES_TREINO: &[(&str, &str)] = &[
    ("#EF4444", "red"),
    ("#F97316", "orange"),
    ("#F59E0B", "yellow"),
    ("#10B981", "green"),
    ("#3B82F6", "blue"),
    ("#8B5CF6", "purple"),
    ("#EC4899", "pink"),
    ("#6B7280", "gray"),
];

/// Color label for a hex tag
pub fn cor_label(hex: &str) -> &str {
    CORES_TREINO
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(hex))
        .map(|(_, label)| *label)
        .unwrap_or(hex)
}

/// Make sets and reps the same length. Timed exercises are left alone.
pub fn sync_series(ex: &mut Exercicio) {
    if ex.tipo() == TipoExercicio::Tempo {
        return;
    }
    ex.tipo = Some(TipoExercicio::Series);

    if ex.series.is_empty() && ex.repeticoes.is_empty() {
        ex.series.push(DEFAULT_SERIE);
        ex.repeticoes.push(DEFAULT_SERIE);
        return;
    }

    let len = ex.series.len().max(ex.repeticoes.len());
    ex.series.resize(len, DEFAULT_SERIE);
    ex.repeticoes.resize(len, DEFAULT_SERIE);
}

/// Append one set to both sequences
pub fn add_serie(ex: &mut Exercicio) {
    ex.series.push(DEFAULT_SERIE);
    ex.repeticoes.push(DEFAULT_SERIE);
}

/// Drop one set from both sequences. The last remaining set is kept.
pub fn remove_serie(ex: &mut Exercicio, idx: usize) -> bool {
    if ex.series.len() <= 1 || idx >= ex.series.len() {
        return false;
    }
    ex.series.remove(idx);
    if idx < ex.repeticoes.len() {
        ex.repeticoes.remove(idx);
    }
    true
}

pub fn set_serie(ex: &mut Exercicio, idx: usize, value: u32) -> bool {
    match ex.series.get_mut(idx) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

pub fn set_repeticoes(ex: &mut Exercicio, idx: usize, value: u32) -> bool {
    match ex.repeticoes.get_mut(idx) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Prescribe by sets and reps, keeping existing sequences when present
pub fn switch_to_series(ex: &mut Exercicio) {
    ex.tipo = Some(TipoExercicio::Series);
    ex.tempo_segundos = None;
    if ex.series.is_empty() {
        ex.series = vec![DEFAULT_SERIE];
    }
    if ex.repeticoes.is_empty() {
        ex.repeticoes = vec![DEFAULT_SERIE];
    }
    sync_series(ex);
}

/// Prescribe by duration; zero duration falls back to five minutes
pub fn switch_to_tempo(ex: &mut Exercicio, minutos: u32, segundos: u32) {
    let total = minutos * 60 + segundos;
    ex.tipo = Some(TipoExercicio::Tempo);
    ex.tempo_segundos = Some(if total == 0 { DEFAULT_TEMPO_SEGUNDOS } else { total });
    ex.series.clear();
    ex.repeticoes.clear();
}

pub fn set_tempo(ex: &mut Exercicio, minutos: u32, segundos: u32) {
    ex.tempo_segundos = Some(minutos * 60 + segundos);
}

/// Stable sort of a segment by objective phase, then renumber `ordem`.
///
/// Exercises whose objective is unknown to `objetivos` are treated as
/// strength work.
pub fn sort_by_category(parte: &mut Parte, objetivos: &[Objetivo]) {
    let categorias: HashMap<&str, Categoria> = objetivos
        .iter()
        .map(|o| (o.id.as_str(), o.categoria))
        .collect();

    let precedencia = |ex: &Exercicio| {
        categorias
            .get(ex.objetivo.as_str())
            .map(|c| c.precedencia())
            .unwrap_or(Categoria::Musculacao.precedencia())
    };

    // sort_by_key is stable: ties keep input order
    parte.exercicios.sort_by_key(|ex| precedencia(ex));
    renumber(parte);
}

fn renumber(parte: &mut Parte) {
    for (idx, ex) in parte.exercicios.iter_mut().enumerate() {
        ex.ordem = idx as u32;
    }
}

/// Editor for the single workout of a template
#[derive(Debug, Clone, PartialEq)]
pub struct TreinoBuilder {
    treino: Treino,
}

impl Default for TreinoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreinoBuilder {
    /// Start with one empty segment
    pub fn new() -> Self {
        Self {
            treino: Treino {
                partes: vec![Parte::default()],
                observacoes: Some(String::new()),
                ..Default::default()
            },
        }
    }

    /// Edit the first workout of a list; extra workouts are discarded
    pub fn from_treinos(treinos: Vec<Treino>) -> Self {
        match treinos.into_iter().next() {
            Some(treino) => Self::from_treino(treino),
            None => Self::new(),
        }
    }

    /// Edit an existing workout, aligning every set-based exercise
    pub fn from_treino(mut treino: Treino) -> Self {
        for parte in &mut treino.partes {
            for ex in &mut parte.exercicios {
                sync_series(ex);
            }
        }
        Self { treino }
    }

    pub fn treino(&self) -> &Treino {
        &self.treino
    }

    pub fn into_treino(self) -> Treino {
        self.treino
    }

    /// Templates hold exactly one workout
    pub fn into_treinos(self) -> Vec<Treino> {
        vec![self.treino]
    }

    pub fn add_parte(&mut self) -> usize {
        self.treino.partes.push(Parte {
            nome: Some(String::new()),
            exercicios: Vec::new(),
            exercicios_juntos: None,
        });
        self.treino.partes.len() - 1
    }

    /// Remove a segment; the last one cannot be removed
    pub fn remove_parte(&mut self, parte_idx: usize) -> bool {
        if self.treino.partes.len() <= 1 || parte_idx >= self.treino.partes.len() {
            return false;
        }
        self.treino.partes.remove(parte_idx);
        true
    }

    pub fn set_parte_nome(&mut self, parte_idx: usize, nome: &str) -> bool {
        match self.treino.partes.get_mut(parte_idx) {
            Some(parte) => {
                parte.nome = Some(nome.to_string());
                true
            }
            None => false,
        }
    }

    /// Append a blank exercise (3x12) to a segment, returning its index
    pub fn add_exercicio(&mut self, parte_idx: usize) -> Option<usize> {
        let parte = self.treino.partes.get_mut(parte_idx)?;
        let ordem = parte.exercicios.len() as u32;
        parte.exercicios.push(Exercicio {
            objetivo: String::new(),
            equipamento: String::new(),
            tipo: Some(TipoExercicio::Series),
            series: vec![NOVO_SERIES],
            repeticoes: vec![NOVO_REPETICOES],
            tempo_segundos: None,
            detalhes: Some(String::new()),
            ordem,
        });
        Some(parte.exercicios.len() - 1)
    }

    pub fn remove_exercicio(&mut self, parte_idx: usize, ex_idx: usize) -> bool {
        match self.treino.partes.get_mut(parte_idx) {
            Some(parte) if ex_idx < parte.exercicios.len() => {
                parte.exercicios.remove(ex_idx);
                true
            }
            _ => false,
        }
    }

    pub fn exercicio_mut(&mut self, parte_idx: usize, ex_idx: usize) -> Option<&mut Exercicio> {
        self.treino.partes.get_mut(parte_idx)?.exercicios.get_mut(ex_idx)
    }

    pub fn sort_parte(&mut self, parte_idx: usize, objetivos: &[Objetivo]) -> bool {
        match self.treino.partes.get_mut(parte_idx) {
            Some(parte) => {
                sort_by_category(parte, objetivos);
                true
            }
            None => false,
        }
    }

    pub fn sort_all(&mut self, objetivos: &[Objetivo]) {
        for parte in &mut self.treino.partes {
            sort_by_category(parte, objetivos);
        }
    }

    pub fn set_observacoes(&mut self, observacoes: &str) {
        self.treino.observacoes = Some(observacoes.to_string());
    }

    pub fn set_cor(&mut self, cor: &str) {
        self.treino.cor = cor.to_string();
    }
}
