//! Console rendering for the inventory screens

use colored::Colorize;
use prettytable::{format, row, Table};

use crate::app::{AppState, AuthForm, DraftItem, ModalState, View};
use crate::auth::Session;
use crate::catalog::CatalogItem;

const DESCRIPTION_PREVIEW_CHARS: usize = 60;

/// Print the application banner
pub fn print_banner() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                SS Móveis - Controle de Estoque               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Digite 'ajuda' para ver os comandos, 'exit' para sair\n");
}

/// Prompt string for the current screen
pub fn screen_prompt(view: View) -> String {
    format!("[{}]>> ", view.to_string().cyan())
}

/// Prompt string used inside the add-item modal
pub fn modal_prompt(modal: ModalState) -> String {
    match modal {
        ModalState::Generating => format!("[{}]>> ", "NOVO ITEM*".magenta()),
        _ => format!("[{}]>> ", "NOVO ITEM".magenta()),
    }
}

/// Print the login or register screen header
pub fn print_auth_screen(view: View, form: &AuthForm) {
    match view {
        View::Login => {
            println!("{}", "Acesse sua conta".bold());
            println!("Use 'entrar' para fazer login ou 'cadastrar' para criar uma conta.");
        }
        View::Register => {
            println!("{}", "Crie sua conta".bold());
            println!("Use 'criar' para se cadastrar ou 'entrar' para voltar ao login.");
        }
        View::Dashboard => return,
    }
    print_auth_error(form);
    println!();
}

/// Print the form error, if any
pub fn print_auth_error(form: &AuthForm) {
    if let Some(error) = &form.error {
        eprintln!("{}", error.red());
    }
}

/// Greeting line shown on the dashboard
pub fn greeting(session: &Session) -> String {
    format!(
        "({}) Olá, {}",
        session.initial().bold(),
        session.greeting_name()
    )
}

/// Summary line with item count, category count and provider
pub fn stats_line(state: &AppState, provider: &str) -> String {
    let catalog = state.catalog();
    format!(
        "Total de itens: {}   Categorias: {}   IA: {}",
        catalog.len().to_string().bold(),
        catalog.category_count().to_string().bold(),
        provider.green()
    )
}

fn preview(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        description.to_string()
    } else {
        let cut: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Build the table listing catalog items
pub fn items_table<'a, I>(items: I) -> Table
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.set_titles(row![
        "ID".bold(),
        "Nome".bold(),
        "Categoria".bold(),
        "Descrição".bold(),
        "Cadastro".bold()
    ]);

    for item in items {
        let description = if item.description.is_empty() {
            "-".to_string()
        } else {
            preview(&item.description)
        };
        table.add_row(row![
            item.id,
            item.name.cyan(),
            item.category,
            description,
            item.created_at_display()
        ]);
    }

    table
}

/// Print the dashboard: greeting, stats and the full item table
pub fn print_dashboard(state: &AppState, provider: &str) {
    if let Some(session) = state.session() {
        println!("{}", greeting(session));
    }
    println!("{}\n", stats_line(state, provider));

    if state.catalog().is_empty() {
        println!("{}", "Nenhum item cadastrado.".yellow());
        return;
    }
    items_table(state.catalog().list()).printstd();
}

/// Print items matching a search
pub fn print_search(items: &[&CatalogItem], query: &str) {
    if items.is_empty() {
        println!("{}", format!("Nenhum item encontrado para '{}'.", query).yellow());
        return;
    }
    items_table(items.iter().copied()).printstd();
}

/// Render the add-item draft
pub fn draft_text(draft: &DraftItem) -> String {
    let placeholder = |v: &str| {
        if v.is_empty() {
            "(vazio)".dimmed().to_string()
        } else {
            v.to_string()
        }
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Novo Item".bold()));
    out.push_str(&format!("  Nome:      {}\n", placeholder(&draft.name)));
    out.push_str(&format!("  Categoria: {}\n", placeholder(&draft.category)));
    out.push_str(&format!("  Detalhes:  {}\n", placeholder(&draft.keywords)));
    if draft.generating {
        out.push_str(&format!(
            "  Descrição: {}\n",
            "Consultando Especialista...".magenta()
        ));
    } else {
        out.push_str(&format!("  Descrição: {}\n", placeholder(&draft.description)));
    }
    if !draft.can_generate() && !draft.generating {
        out.push_str(&format!(
            "  {}\n",
            "Preencha nome e categoria para gerar a descrição com IA.".dimmed()
        ));
    }
    if let Some(error) = &draft.error {
        out.push_str(&format!("  {}\n", error.red()));
    }
    out
}

/// Commands available on a screen
pub fn help_text(view: View) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("Comandos - {}", view).bold()));
    let commands: &[(&str, &str)] = match view {
        View::Login => &[
            ("entrar", "Informar e-mail e senha e fazer login"),
            ("cadastrar", "Ir para a tela de cadastro"),
        ],
        View::Register => &[
            ("criar", "Informar nome, e-mail e senha e criar a conta"),
            ("entrar", "Voltar para a tela de login"),
        ],
        View::Dashboard => &[
            ("listar", "Mostrar todos os itens"),
            ("buscar <texto>", "Filtrar por nome ou categoria"),
            ("novo", "Cadastrar um novo item"),
            ("excluir <id>", "Remover um item"),
            ("sair", "Encerrar a sessão"),
        ],
    };
    for (cmd, description) in commands {
        out.push_str(&format!("  {:<16} {}\n", cmd.cyan(), description));
    }
    out.push_str(&format!("  {:<16} {}\n", "ajuda".cyan(), "Mostrar esta ajuda"));
    out.push_str(&format!("  {:<16} {}\n", "exit".cyan(), "Fechar o programa"));
    out
}

/// Commands available inside the add-item modal
pub fn modal_help_text() -> String {
    let commands = [
        ("nome [valor]", "Definir o nome"),
        ("categoria [valor]", "Definir a categoria"),
        ("detalhes [valor]", "Definir detalhes usados pela IA"),
        ("descricao [valor]", "Escrever a descrição manualmente"),
        ("gerar", "Gerar a descrição com IA"),
        ("ver", "Mostrar o item em edição"),
        ("salvar", "Salvar o item"),
        ("cancelar", "Descartar o item"),
    ];
    let mut out = format!("{}\n", "Comandos - NOVO ITEM".bold());
    for (cmd, description) in commands {
        out.push_str(&format!("  {:<18} {}\n", cmd.cyan(), description));
    }
    out
}
