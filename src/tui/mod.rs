//! TUI module - Back-office dashboard with ratatui

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
};
use std::io::{stdout, Stdout};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{format_date, Equipamento, Ficha, Objetivo, TreinoModelo, Usuario};
use crate::report::{self, Relatorio};
use crate::workout::cor_label;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Fichas,
    Usuarios,
    Catalogo,
    Treinos,
    Relatorio,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Fichas, Tab::Usuarios, Tab::Catalogo, Tab::Treinos, Tab::Relatorio];

    fn title(&self) -> &'static str {
        match self {
            Tab::Fichas => "Plans",
            Tab::Usuarios => "Users",
            Tab::Catalogo => "Catalog",
            Tab::Treinos => "Templates",
            Tab::Relatorio => "Report",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

/// App state for TUI
pub struct App {
    client: ApiClient,
    tab: Tab,
    fichas: Vec<Ficha>,
    usuarios: Vec<Usuario>,
    objetivos: Vec<Objetivo>,
    equipamentos: Vec<Equipamento>,
    treinos: Vec<TreinoModelo>,
    status: String,
    should_quit: bool,
    exit_message: Option<String>,
}

impl App {
    pub async fn new(client: ApiClient) -> Result<Self> {
        let mut app = Self {
            client,
            tab: Tab::Fichas,
            fichas: Vec::new(),
            usuarios: Vec::new(),
            objetivos: Vec::new(),
            equipamentos: Vec::new(),
            treinos: Vec::new(),
            status: String::new(),
            should_quit: false,
            exit_message: None,
        };
        app.refresh().await;
        Ok(app)
    }

    /// Refetch every list. Failures end up in the status line.
    async fn refresh(&mut self) {
        let loaded = tokio::try_join!(
            self.client.fichas(),
            self.client.usuarios(),
            self.client.objetivos(),
            self.client.equipamentos(),
            self.client.treinos_modelo(false),
        );
        match loaded {
            Ok((fichas, usuarios, objetivos, equipamentos, treinos)) => {
                self.fichas = fichas;
                self.usuarios = usuarios;
                self.objetivos = objetivos;
                self.equipamentos = equipamentos;
                self.treinos = treinos;
                self.status = format!("updated {}", Local::now().format("%H:%M:%S"));
            }
            Err(ApiError::Unauthorized) => {
                self.exit_message = Some(ApiError::Unauthorized.to_string());
                self.should_quit = true;
            }
            Err(e) => self.status = format!("error: {}", e),
        }
    }

    /// Run the TUI application. Returns a message to print after exit.
    pub async fn run(&mut self) -> Result<Option<String>> {
        if self.should_quit {
            return Ok(self.exit_message.take());
        }

        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events().await?;
        }

        restore_terminal()?;
        Ok(self.exit_message.take())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        let header = Tabs::new(titles)
            .select(self.tab.index())
            .highlight_style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL).title("academia - Back Office"));
        frame.render_widget(header, chunks[0]);

        match self.tab {
            Tab::Fichas => self.render_fichas(frame, chunks[1]),
            Tab::Usuarios => self.render_usuarios(frame, chunks[1]),
            Tab::Catalogo => self.render_catalogo(frame, chunks[1]),
            Tab::Treinos => self.render_treinos(frame, chunks[1]),
            Tab::Relatorio => self.render_relatorio(frame, chunks[1]),
        }

        // Footer
        let footer = Paragraph::new(format!("q: quit | tab: switch | r: refresh | {}", self.status))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_fichas(&self, frame: &mut Frame, area: Rect) {
        let hoje = Local::now().date_naive();
        let rows: Vec<Row> = self.fichas.iter().map(|f| {
            let (status, color) = if report::is_vencida(f, hoje) {
                ("expired", Color::Red)
            } else if report::is_vencendo(f, hoje) {
                ("expiring", Color::Yellow)
            } else if f.ativa {
                ("active", Color::Green)
            } else {
                ("inactive", Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(f.aluno.nome.clone()),
                Cell::from(f.professor_referencia.nome.clone()),
                Cell::from(format_date(&f.data_inicio)),
                Cell::from(format_date(&f.data_validade)),
                Cell::from(f.treinos.len().to_string()),
                Cell::from(status).style(Style::default().fg(color)),
            ])
        }).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Min(16),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(Row::new(vec!["Student", "Professor", "Start", "Expires", "Workouts", "Status"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(format!("Plans ({})", self.fichas.len())));

        frame.render_widget(table, area);
    }

    fn render_usuarios(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self.usuarios.iter().map(|u| {
            Row::new(vec![
                Cell::from(u.nome.clone()),
                Cell::from(u.email.clone()),
                Cell::from(u.tipo.label()),
                Cell::from(u.codigo_aluno.map(|c| c.to_string()).unwrap_or_else(|| "-".into())),
                Cell::from(if u.ativo { "yes" } else { "no" }),
            ])
        }).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Min(24),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(7),
            ],
        )
        .header(Row::new(vec!["Name", "Email", "Role", "Code", "Active"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(format!("Users ({})", self.usuarios.len())));

        frame.render_widget(table, area);
    }

    fn render_catalogo(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut objetivos: Vec<&Objetivo> = self.objetivos.iter().collect();
        objetivos.sort_by_key(|o| (o.categoria.precedencia(), o.ordem));
        let rows: Vec<Row> = objetivos.iter().map(|o| {
            Row::new(vec![
                Cell::from(o.nome.clone()),
                Cell::from(o.categoria.label()),
                Cell::from(o.ordem.to_string()),
                Cell::from(if o.ativo { "yes" } else { "no" }),
            ])
        }).collect();
        let table = Table::new(
            rows,
            [
                Constraint::Min(18),
                Constraint::Length(17),
                Constraint::Length(6),
                Constraint::Length(7),
            ],
        )
        .header(Row::new(vec!["Objective", "Category", "Order", "Active"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title("Objectives"));
        frame.render_widget(table, halves[0]);

        let rows: Vec<Row> = self.equipamentos.iter().map(|e| {
            Row::new(vec![
                Cell::from(e.nome.clone()),
                Cell::from(if e.ativo { "yes" } else { "no" }),
            ])
        }).collect();
        let table = Table::new(rows, [Constraint::Min(18), Constraint::Length(7)])
            .header(Row::new(vec!["Equipment", "Active"]).style(Style::default().bold()))
            .block(Block::default().borders(Borders::ALL).title("Equipment"));
        frame.render_widget(table, halves[1]);
    }

    fn render_treinos(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self.treinos.iter().map(|t| {
            let exercicios: usize = t.partes.iter().map(|p| p.exercicios.len()).sum();
            Row::new(vec![
                Cell::from(t.nome.clone()),
                Cell::from(cor_label(&t.cor).to_string()),
                Cell::from(t.partes.len().to_string()),
                Cell::from(exercicios.to_string()),
                Cell::from(t.objetivos.join(", ")),
                Cell::from(if t.ativo { "yes" } else { "no" }),
            ])
        }).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(18),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(7),
            ],
        )
        .header(Row::new(vec!["Template", "Color", "Parts", "Exercises", "Objectives", "Active"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(format!("Workout templates ({})", self.treinos.len())));

        frame.render_widget(table, area);
    }

    fn render_relatorio(&self, frame: &mut Frame, area: Rect) {
        let hoje = Local::now().date_naive();
        let r = Relatorio::build(&self.usuarios, &self.fichas, &self.objetivos, &self.equipamentos, hoje);
        let s = &r.stats;

        let mut lines = vec![
            Line::from(format!("Students: {}    Professors: {}", s.total_alunos, s.total_professores)),
            Line::from(format!(
                "Plans: {}    active: {} ({}%)    expired: {}    expiring in 7 days: {}",
                s.total_fichas, s.fichas_ativas, s.percentual_ativas(), s.fichas_vencidas, s.fichas_vencendo
            )),
            Line::from(format!("Objectives: {}    Equipment: {}", s.total_objetivos, s.total_equipamentos)),
            Line::from(""),
            Line::from("Expiring soon:".bold()),
        ];
        for f in &r.vencendo {
            let dias = report::dias_restantes(f, hoje).unwrap_or(0);
            lines.push(Line::from(format!("  {} - {} ({} days)", f.aluno.nome, format_date(&f.data_validade), dias)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Most recent:".bold()));
        for f in &r.recentes {
            lines.push(Line::from(format!("  {} - started {}", f.aluno.nome, format_date(&f.data_inicio))));
        }

        let report = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Report"));
        frame.render_widget(report, area);
    }

    async fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Tab => self.tab = self.tab.next(),
                        KeyCode::Char('r') => self.refresh().await,
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        let mut tab = Tab::Fichas;
        for _ in 0..Tab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Fichas);
        assert_eq!(Tab::Relatorio.next(), Tab::Fichas);
        assert_eq!(Tab::Catalogo.index(), 2);
    }
}
