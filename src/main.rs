//! academia - gym back-office client

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};

use academia::api::{ApiClient, default_base_url};
use academia::db::Database;
use academia::error::ApiError;
use academia::forms::{
    AlterarSenha, AtribuirPayload, AtualizaFicha, EdicaoUsuario, EquipamentoPayload, NovaFicha,
    NovoUsuario, ObjetivoPayload, TreinoModeloArquivo, TreinoModeloPayload,
};
use academia::models::{
    Anamnese, Categoria, Equipamento, Ficha, Objetivo, TipoUsuario, Treino, format_date,
};
use academia::assignment::{MAX_FICHAS_ATIVAS, Situacao};
use academia::report::{self, FiltroStatus, Relatorio};
use academia::tui::App;
use academia::workout::{self, TreinoBuilder, cor_label};

const DB_PATH: &str = "academia.db";

#[derive(Parser)]
#[command(name = "academia")]
#[command(author, version, about = "Gym back office: users, catalog, workout templates and training plans")]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "ACADEMIA_API_URL")]
    api_url: Option<String>,

    /// Session database file
    #[arg(long, global = true, env = "ACADEMIA_DB", default_value = DB_PATH)]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (or set ACADEMIA_PASSWORD env var)
        #[arg(short, long, env = "ACADEMIA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Change your password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },

    /// User accounts
    #[command(subcommand)]
    Users(UserCommands),

    /// Objectives and equipment
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Workout templates
    #[command(subcommand)]
    Templates(TemplateCommands),

    /// Training plans
    #[command(subcommand)]
    Fichas(FichaCommands),

    /// Plan templates and their assignment
    #[command(subcommand)]
    Models(ModelCommands),

    /// Back-office statistics
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    Professor,
    Student,
}

impl From<RoleArg> for TipoUsuario {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::Admin => TipoUsuario::Administrador,
            RoleArg::Professor => TipoUsuario::Professor,
            RoleArg::Student => TipoUsuario::Aluno,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Active,
    Expired,
}

impl From<StatusArg> for FiltroStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Active => FiltroStatus::Ativas,
            StatusArg::Expired => FiltroStatus::Vencidas,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    WarmUp,
    Dynamic,
    Strength,
    CoolDown,
}

impl From<CategoryArg> for Categoria {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::WarmUp => Categoria::AerobicoAquecimento,
            CategoryArg::Dynamic => Categoria::Dinamico,
            CategoryArg::Strength => Categoria::Musculacao,
            CategoryArg::CoolDown => Categoria::AerobicoDesaquecimento,
        }
    }
}

#[derive(Subcommand)]
enum UserCommands {
    /// List accounts
    List {
        /// Only this role
        #[arg(short, long)]
        role: Option<RoleArg>,
        /// Name, email or student code
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one account
    Show { id: String },
    /// Create an account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_enum, default_value = "student")]
        role: RoleArg,
        /// Student code (students only)
        #[arg(long)]
        code: Option<u64>,
        /// Password (professors only)
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        birth: Option<String>,
    },
    /// Update account fields
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        code: Option<u64>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        birth: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Repeat the new password
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Activate or deactivate an account
    Toggle { id: String },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List objectives
    Objectives,
    /// List equipment
    Equipment,
    AddObjective {
        name: String,
        #[arg(short, long, value_enum, default_value = "strength")]
        category: CategoryArg,
        #[arg(short, long, default_value = "1")]
        order: i32,
    },
    UpdateObjective {
        id: String,
        name: String,
        #[arg(short, long, value_enum)]
        category: CategoryArg,
        #[arg(short, long, default_value = "1")]
        order: i32,
    },
    ToggleObjective { id: String },
    DeleteObjective { id: String },
    AddEquipment { name: String },
    UpdateEquipment { id: String, name: String },
    ToggleEquipment { id: String },
    DeleteEquipment { id: String },
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List workout templates
    List {
        /// Only active templates
        #[arg(long)]
        active: bool,
    },
    /// Show a template with its exercises
    Show { id: String },
    /// Create a template from a JSON file
    Create {
        file: String,
        /// Order exercises by objective phase before saving
        #[arg(long)]
        sort: bool,
    },
    /// Replace a template with the contents of a JSON file
    Update {
        id: String,
        file: String,
        #[arg(long)]
        sort: bool,
    },
    Duplicate { id: String },
    Delete { id: String },
    /// Order a stored template's exercises by objective phase
    Sort { id: String },
}

#[derive(Subcommand)]
enum FichaCommands {
    /// List plans
    List {
        /// Student name or code
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Show one plan
    Show { id: String },
    /// Create a plan from workout templates
    Create {
        #[arg(long)]
        student: String,
        #[arg(long)]
        professor: String,
        /// Start date, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<String>,
        /// Expiry date, YYYY-MM-DD
        #[arg(long)]
        expires: String,
        /// Objective name (repeatable)
        #[arg(long = "objective", required = true)]
        objectives: Vec<String>,
        /// Workout template id (repeatable)
        #[arg(long = "template", required = true)]
        templates: Vec<String>,
        #[arg(long)]
        nutrition: Option<String>,
        /// Anamnesis JSON file
        #[arg(long)]
        anamnese: Option<String>,
    },
    /// Edit a plan
    Update {
        id: String,
        #[arg(long)]
        professor: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        expires: Option<String>,
        /// Replace objectives (repeatable)
        #[arg(long = "objective")]
        objectives: Vec<String>,
        #[arg(long)]
        nutrition: Option<String>,
        #[arg(long)]
        anamnese: Option<String>,
        /// Order every workout's exercises by objective phase
        #[arg(long)]
        sort: bool,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum ModelCommands {
    /// List plan templates
    List,
    /// Students that can receive a plan template
    Candidates {
        id: String,
        /// Filter by name or student code
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Assign a plan template to students
    Assign {
        id: String,
        #[arg(required = true)]
        students: Vec<String>,
    },
    /// Remove one student's assignment
    Unassign { id: String, student: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db).with_context(|| format!("opening session store {}", cli.db))?;
    let api_url = cli.api_url.unwrap_or_else(|| default_base_url().to_string());
    let client = ApiClient::new(api_url, db)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(client).await?;
            if let Some(msg) = app.run().await? {
                println!("{}", msg);
            }
        }

        Some(Commands::Login { email, password }) => {
            let usuario = client.login(&email, &password).await?;
            println!("Logged in as {} ({})", usuario.nome, usuario.tipo.label());
        }

        Some(Commands::Logout) => {
            client.logout()?;
            println!("Logged out");
        }

        Some(Commands::Whoami) => match client.current_session()? {
            Some(s) => {
                println!("{} <{}>", s.usuario.nome, s.usuario.email);
                println!("Role: {}", s.usuario.tipo.label());
                if let Some(code) = s.usuario.codigo_aluno {
                    println!("Student code: {}", code);
                }
                println!("Since: {}", s.saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
                println!("API: {}", client.base_url());
            }
            None => println!("Not logged in"),
        },

        Some(Commands::Password { current, new, confirm }) => {
            let form = AlterarSenha::new(&current, &new, &confirm)?;
            client.alterar_senha(&form).await?;
            println!("Password changed");
        }

        Some(Commands::Users(cmd)) => users(&client, cmd).await?,
        Some(Commands::Catalog(cmd)) => catalog(&client, cmd).await?,
        Some(Commands::Templates(cmd)) => templates(&client, cmd).await?,
        Some(Commands::Fichas(cmd)) => fichas(&client, cmd).await?,
        Some(Commands::Models(cmd)) => models(&client, cmd).await?,

        Some(Commands::Report) => {
            let (usuarios, fichas, objetivos, equipamentos) = tokio::try_join!(
                client.usuarios(),
                client.fichas(),
                client.objetivos(),
                client.equipamentos(),
            )?;
            let hoje = Local::now().date_naive();
            let r = Relatorio::build(&usuarios, &fichas, &objetivos, &equipamentos, hoje);
            let s = &r.stats;

            println!("Back-office report");
            println!("{:-<60}", "");
            println!("Active students:    {}", s.total_alunos);
            println!("Active professors:  {}", s.total_professores);
            println!("Plans:              {}", s.total_fichas);
            println!("  active:           {} ({}%)", s.fichas_ativas, s.percentual_ativas());
            println!("  expired:          {}", s.fichas_vencidas);
            println!("  expiring (7d):    {}", s.fichas_vencendo);
            println!("Active objectives:  {}", s.total_objetivos);
            println!("Active equipment:   {}", s.total_equipamentos);

            if !r.vencendo.is_empty() {
                println!();
                println!("Expiring soon:");
                for f in &r.vencendo {
                    println!(
                        "  {:24} | {} | {} days",
                        f.aluno.nome,
                        format_date(&f.data_validade),
                        report::dias_restantes(f, hoje).unwrap_or(0)
                    );
                }
            }
            if !r.recentes.is_empty() {
                println!();
                println!("Most recent:");
                for f in &r.recentes {
                    println!("  {:24} | started {}", f.aluno.nome, format_date(&f.data_inicio));
                }
            }
        }
    }

    Ok(())
}

async fn users(client: &ApiClient, cmd: UserCommands) -> Result<()> {
    match cmd {
        UserCommands::List { role, search } => {
            let tipo = role.map(TipoUsuario::from);
            let termo = search.unwrap_or_default();
            let usuarios = client.usuarios().await?;
            println!("{:24} | {:28} | {:9} | {:6} | active", "name", "email", "role", "code");
            println!("{:-<84}", "");
            let visiveis = usuarios
                .iter()
                .filter(|u| tipo.is_none_or(|t| u.tipo == t) && u.matches(&termo));
            for u in visiveis {
                println!(
                    "{:24} | {:28} | {:9} | {:6} | {}  ({})",
                    u.nome,
                    u.email,
                    u.tipo.label(),
                    u.codigo_aluno.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                    if u.ativo { "yes" } else { "no" },
                    u.id
                );
            }
        }

        UserCommands::Show { id } => match client.usuario(&id).await {
            Ok(u) => {
                println!("{} <{}>", u.nome, u.email);
                println!("Role:    {}", u.tipo.label());
                if let Some(code) = u.codigo_aluno {
                    println!("Code:    {}", code);
                }
                println!("Phone:   {}", u.telefone.as_deref().unwrap_or("-"));
                println!("Born:    {}", u.data_nascimento.as_deref().map(format_date).unwrap_or_else(|| "-".into()));
                println!("Active:  {}", if u.ativo { "yes" } else { "no" });
            }
            Err(ApiError::NotFound { .. }) => not_found("user", "academia users list"),
            Err(e) => return Err(e.into()),
        },

        UserCommands::Create { name, email, role, code, password, confirm, phone, birth } => {
            let form = NovoUsuario {
                nome: name,
                email,
                tipo: role.into(),
                codigo_aluno: code,
                senha: password,
                confirmar_senha: confirm,
                telefone: phone,
                data_nascimento: birth,
            };
            client.criar_usuario(form).await?;
            println!("User created");
        }

        UserCommands::Update { id, name, email, code, phone, birth, password, confirm } => {
            let usuario = match client.usuario(&id).await {
                Ok(u) => u,
                Err(ApiError::NotFound { .. }) => {
                    not_found("user", "academia users list");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            let form = EdicaoUsuario {
                nome: name,
                email,
                codigo_aluno: code,
                telefone: phone,
                data_nascimento: birth,
                senha: password,
                confirmar_senha: confirm,
            };
            let update = form.into_update(usuario.tipo)?;
            client.atualizar_usuario(&id, &update).await?;
            println!("User updated");
        }

        UserCommands::Toggle { id } => {
            let ativo = client.alternar_usuario(&id).await?;
            println!("User {}", if ativo { "activated" } else { "deactivated" });
        }
    }
    Ok(())
}

async fn catalog(client: &ApiClient, cmd: CatalogCommands) -> Result<()> {
    match cmd {
        CatalogCommands::Objectives => {
            let mut objetivos = client.objetivos().await?;
            objetivos.sort_by_key(|o| (o.categoria.precedencia(), o.ordem));
            println!("{:24} | {:16} | order | active", "objective", "category");
            println!("{:-<70}", "");
            for o in &objetivos {
                println!(
                    "{:24} | {:16} | {:5} | {}  ({})",
                    o.nome,
                    o.categoria.label(),
                    o.ordem,
                    if o.ativo { "yes" } else { "no" },
                    o.id
                );
            }
        }

        CatalogCommands::Equipment => {
            let equipamentos = client.equipamentos().await?;
            println!("{:24} | active", "equipment");
            println!("{:-<40}", "");
            for e in &equipamentos {
                println!("{:24} | {}  ({})", e.nome, if e.ativo { "yes" } else { "no" }, e.id);
            }
        }

        CatalogCommands::AddObjective { name, category, order } => {
            client.criar_objetivo(&ObjetivoPayload::new(&name, category.into(), order)?).await?;
            println!("Objective created");
        }

        CatalogCommands::UpdateObjective { id, name, category, order } => {
            client
                .atualizar_objetivo(&id, &ObjetivoPayload::new(&name, category.into(), order)?)
                .await?;
            println!("Objective updated");
        }

        CatalogCommands::ToggleObjective { id } => {
            let objetivos = client.objetivos().await?;
            let Some(o) = objetivos.iter().find(|o| o.id == id) else {
                not_found("objective", "academia catalog objectives");
                return Ok(());
            };
            client.set_objetivo_ativo(&id, !o.ativo).await?;
            println!("Objective {}", if o.ativo { "deactivated" } else { "activated" });
        }

        CatalogCommands::DeleteObjective { id } => {
            client.excluir_objetivo(&id).await?;
            println!("Objective deleted");
        }

        CatalogCommands::AddEquipment { name } => {
            client.criar_equipamento(&EquipamentoPayload::new(&name)?).await?;
            println!("Equipment created");
        }

        CatalogCommands::UpdateEquipment { id, name } => {
            client.atualizar_equipamento(&id, &EquipamentoPayload::new(&name)?).await?;
            println!("Equipment updated");
        }

        CatalogCommands::ToggleEquipment { id } => {
            let equipamentos = client.equipamentos().await?;
            let Some(e) = equipamentos.iter().find(|e| e.id == id) else {
                not_found("equipment", "academia catalog equipment");
                return Ok(());
            };
            client.set_equipamento_ativo(&id, !e.ativo).await?;
            println!("Equipment {}", if e.ativo { "deactivated" } else { "activated" });
        }

        CatalogCommands::DeleteEquipment { id } => {
            client.excluir_equipamento(&id).await?;
            println!("Equipment deleted");
        }
    }
    Ok(())
}

async fn templates(client: &ApiClient, cmd: TemplateCommands) -> Result<()> {
    match cmd {
        TemplateCommands::List { active } => {
            let treinos = client.treinos_modelo(active).await?;
            println!("{:24} | {:7} | parts | exercises | active", "template", "color");
            println!("{:-<70}", "");
            for t in &treinos {
                let exercicios: usize = t.partes.iter().map(|p| p.exercicios.len()).sum();
                println!(
                    "{:24} | {:7} | {:5} | {:9} | {}  ({})",
                    t.nome,
                    cor_label(&t.cor),
                    t.partes.len(),
                    exercicios,
                    if t.ativo { "yes" } else { "no" },
                    t.id
                );
            }
        }

        TemplateCommands::Show { id } => {
            let (treino, objetivos, equipamentos) = match tokio::try_join!(
                client.treino_modelo(&id),
                client.objetivos(),
                client.equipamentos(),
            ) {
                Ok(loaded) => loaded,
                Err(ApiError::NotFound { .. }) => {
                    not_found("workout template", "academia templates list");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            println!("{} [{}]", treino.nome, cor_label(&treino.cor));
            if !treino.descricao.is_empty() {
                println!("{}", treino.descricao);
            }
            println!("Objectives: {}", treino.objetivos.join(", "));
            let t = Treino {
                cor: treino.cor.clone(),
                partes: treino.partes.clone(),
                observacoes: Some(treino.observacoes.clone()),
                ..Default::default()
            };
            print_treino(&t, &objetivos, &equipamentos);
        }

        TemplateCommands::Create { file, sort } => {
            let arquivo = TreinoModeloArquivo::read(&file)?;
            let objetivos = if sort { client.objetivos().await? } else { Vec::new() };
            let payload = template_payload(arquivo, sort.then_some(objetivos.as_slice()))?;
            client.criar_treino_modelo(&payload).await?;
            println!("Workout template created");
        }

        TemplateCommands::Update { id, file, sort } => {
            let arquivo = TreinoModeloArquivo::read(&file)?;
            let objetivos = if sort { client.objetivos().await? } else { Vec::new() };
            let payload = template_payload(arquivo, sort.then_some(objetivos.as_slice()))?;
            client.atualizar_treino_modelo(&id, &payload).await?;
            println!("Workout template updated");
        }

        TemplateCommands::Duplicate { id } => {
            client.duplicar_treino_modelo(&id).await?;
            println!("Workout template duplicated");
        }

        TemplateCommands::Delete { id } => {
            client.excluir_treino_modelo(&id).await?;
            println!("Workout template deleted");
        }

        TemplateCommands::Sort { id } => {
            let (treino, objetivos) =
                tokio::try_join!(client.treino_modelo(&id), client.objetivos())?;
            let arquivo = TreinoModeloArquivo::from_modelo(treino);
            let payload = template_payload(arquivo, Some(&objetivos))?;
            client.atualizar_treino_modelo(&id, &payload).await?;
            println!("Exercises ordered by phase");
        }
    }
    Ok(())
}

/// Align every exercise, optionally order by phase, and check the result
fn template_payload(arquivo: TreinoModeloArquivo, ordenar: Option<&[Objetivo]>) -> Result<TreinoModeloPayload> {
    let mut builder = TreinoBuilder::from_treino(arquivo.treino);
    if let Some(objetivos) = ordenar {
        builder.sort_all(objetivos);
    }
    Ok(TreinoModeloPayload::new(
        &arquivo.nome,
        &arquivo.descricao,
        arquivo.objetivos,
        builder.into_treino(),
    )?)
}

async fn fichas(client: &ApiClient, cmd: FichaCommands) -> Result<()> {
    let hoje = Local::now().date_naive();
    match cmd {
        FichaCommands::List { search, status } => {
            let termo = search.unwrap_or_default();
            let filtro = status.map(FiltroStatus::from);
            let fichas: Vec<_> = client
                .fichas()
                .await?
                .into_iter()
                .filter(|f| f.matches(&termo) && filtro.is_none_or(|s| s.aceita(f, hoje)))
                .collect();
            println!("{:24} | {:18} | {:10} | {:10} | status", "student", "professor", "start", "expires");
            println!("{:-<90}", "");
            for f in &fichas {
                println!(
                    "{:24} | {:18} | {:10} | {:10} | {}  ({})",
                    f.aluno.nome,
                    f.professor_referencia.nome,
                    format_date(&f.data_inicio),
                    format_date(&f.data_validade),
                    status_label(f, hoje),
                    f.id
                );
            }
        }

        FichaCommands::Show { id } => {
            let (ficha, objetivos, equipamentos) = match tokio::try_join!(
                client.ficha(&id),
                client.objetivos(),
                client.equipamentos(),
            ) {
                Ok(loaded) => loaded,
                Err(ApiError::NotFound { .. }) => {
                    not_found("plan", "academia fichas list");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            print_ficha(&ficha, &objetivos, &equipamentos, hoje);
        }

        FichaCommands::Create { student, professor, start, expires, objectives, templates, nutrition, anamnese } => {
            let anamnese = match anamnese {
                Some(path) => read_anamnese(&path)?,
                None => Anamnese::default(),
            };
            let ficha = NovaFicha {
                aluno_id: student,
                professor_referencia_id: professor,
                data_inicio: start.unwrap_or_else(|| hoje.format("%Y-%m-%d").to_string()),
                data_validade: expires,
                anamnese,
                objetivos: objectives,
                anotacoes_nutricao: nutrition.unwrap_or_default(),
                treinos_ids: templates,
            };
            client.criar_ficha(&ficha).await?;
            println!("Plan created");
        }

        FichaCommands::Update { id, professor, start, expires, objectives, nutrition, anamnese, sort } => {
            let ficha = client.ficha(&id).await?;
            let mut update = AtualizaFicha::from_ficha(&ficha);
            if let Some(p) = professor {
                update.professor_referencia = p;
            }
            if let Some(s) = start {
                update.data_inicio = s;
            }
            if let Some(e) = expires {
                update.data_validade = e;
            }
            if !objectives.is_empty() {
                update.objetivos = objectives;
            }
            if let Some(n) = nutrition {
                update.anotacoes_nutricao = n;
            }
            if let Some(path) = anamnese {
                update.anamnese = read_anamnese(&path)?;
            }

            let objetivos = if sort { client.objetivos().await? } else { Vec::new() };
            for treino in &mut update.treinos {
                for parte in &mut treino.partes {
                    for ex in &mut parte.exercicios {
                        workout::sync_series(ex);
                    }
                    if sort {
                        workout::sort_by_category(parte, &objetivos);
                    }
                }
            }

            client.atualizar_ficha(&id, &update).await?;
            println!("Plan updated");
        }

        FichaCommands::Delete { id } => {
            client.excluir_ficha(&id).await?;
            println!("Plan deleted");
        }
    }
    Ok(())
}

async fn models(client: &ApiClient, cmd: ModelCommands) -> Result<()> {
    match cmd {
        ModelCommands::List => {
            let modelos = client.fichas_modelo().await?;
            println!("{:24} | {:18} | workouts | assigned", "template", "professor");
            println!("{:-<70}", "");
            for m in &modelos {
                println!(
                    "{:24} | {:18} | {:8} | {:8}  ({})",
                    m.nome_modelo,
                    m.professor_referencia.nome,
                    m.treinos.len(),
                    m.alunos_atribuidos.len(),
                    m.id
                );
            }
        }

        ModelCommands::Candidates { id, search } => {
            let (modelo, tela) = client.atribuicao(&id).await?;
            println!("{} - {} already assigned", modelo.nome_modelo, tela.ja_atribuidos());
            println!("Each student can hold up to {} active plans", MAX_FICHAS_ATIVAS);
            println!("{:-<70}", "");
            for (c, situacao) in tela.filtrar(&search) {
                let nota = match situacao {
                    Situacao::JaAtribuido => "already assigned",
                    Situacao::NoLimite => "limit reached",
                    Situacao::Disponivel => "available",
                };
                println!(
                    "{:24} | #{:6} | {}/{} active plans | {}  ({})",
                    c.nome,
                    c.codigo_aluno.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
                    c.fichas_ativas,
                    MAX_FICHAS_ATIVAS,
                    nota,
                    c.id
                );
            }
        }

        ModelCommands::Assign { id, students } => {
            let (_, mut tela) = client.atribuicao(&id).await?;
            for aluno in &students {
                if !tela.selecionar(aluno) {
                    bail!("student {} cannot receive this plan (already assigned, at the limit, or unknown)", aluno);
                }
            }
            let payload = AtribuirPayload::new(tela.selecionados().to_vec())?;
            let mensagem = client.atribuir(&id, &payload).await?;
            println!("Plan assigned");
            if let Some(m) = mensagem {
                println!("{}", m);
            }
        }

        ModelCommands::Unassign { id, student } => {
            client.remover_atribuicao(&id, &student).await?;
            println!("Assignment removed");
        }
    }
    Ok(())
}

fn not_found(what: &str, back: &str) {
    println!("{} not found", what);
    println!("Back to the list: {}", back);
}

fn status_label(f: &Ficha, hoje: chrono::NaiveDate) -> &'static str {
    if report::is_vencida(f, hoje) {
        "expired"
    } else if report::is_vencendo(f, hoje) {
        "expiring"
    } else if f.ativa {
        "active"
    } else {
        "inactive"
    }
}

fn read_anamnese(path: &str) -> Result<Anamnese> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing anamnesis in {}", path))
}

fn print_ficha(f: &Ficha, objetivos: &[Objetivo], equipamentos: &[Equipamento], hoje: chrono::NaiveDate) {
    println!("Plan of {} (code {})", f.aluno.nome, f.aluno.codigo_aluno.map(|c| c.to_string()).unwrap_or_else(|| "-".into()));
    println!("{:-<60}", "");
    println!("Professor:  {}", f.professor_referencia.nome);
    println!("Period:     {} - {}", format_date(&f.data_inicio), format_date(&f.data_validade));
    println!("Status:     {}", status_label(f, hoje));
    println!("Objectives: {}", f.objetivos.join(", "));
    if let Some(n) = f.anotacoes_nutricao.as_deref().filter(|n| !n.is_empty()) {
        println!("Nutrition:  {}", n);
    }

    let a = &f.anamnese;
    println!();
    println!("Anamnesis");
    for (label, value) in [
        ("medications", &a.remedios),
        ("health problems", &a.problemas_saude),
        ("illnesses", &a.doencas),
        ("surgeries", &a.cirurgias),
    ] {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            println!("  {}: {}", label, v);
        }
    }
    let marcadas = a.condicoes.marcadas();
    println!("  conditions: {}", if marcadas.is_empty() { "none".to_string() } else { marcadas.join(", ") });
    if let Some(d) = a.condicoes.descricao_alergia.as_deref().filter(|d| !d.is_empty()) {
        println!("  allergy: {}", d);
    }

    for (i, treino) in f.treinos.iter().enumerate() {
        println!();
        println!("Workout {} [{}]", treino.nome.clone().unwrap_or_else(|| (i + 1).to_string()), cor_label(&treino.cor));
        print_treino(treino, objetivos, equipamentos);
    }
}

fn print_treino(t: &Treino, objetivos: &[Objetivo], equipamentos: &[Equipamento]) {
    let nome_objetivo = |id: &str| {
        objetivos.iter().find(|o| o.id == id).map(|o| o.nome.clone()).unwrap_or_else(|| id.to_string())
    };
    let nome_equipamento = |id: &str| {
        equipamentos.iter().find(|e| e.id == id).map(|e| e.nome.clone()).unwrap_or_else(|| id.to_string())
    };

    for (i, parte) in t.partes.iter().enumerate() {
        let nome = parte.nome.clone().filter(|n| !n.is_empty()).unwrap_or_else(|| format!("Part {}", i + 1));
        println!("  {}", nome);
        for ex in &parte.exercicios {
            println!(
                "    {}. {:20} | {:16} | {}{}",
                ex.ordem + 1,
                nome_objetivo(&ex.objetivo),
                nome_equipamento(&ex.equipamento),
                ex.prescricao(),
                ex.detalhes.as_deref().filter(|d| !d.is_empty()).map(|d| format!(" - {}", d)).unwrap_or_default()
            );
        }
    }
    if let Some(obs) = t.observacoes.as_deref().filter(|o| !o.is_empty()) {
        println!("  Notes: {}", obs);
    }
}
