//! Command parser for the interactive console
//!
//! Every screen accepts a small set of words, in Portuguese or English.
//! A leading `/` is accepted and ignored, and matching is case-insensitive.
//! Inside the add-item modal a separate set of commands applies.

use crate::app::{DraftField, View};
use thiserror::Error;

/// Errors that can occur when parsing console commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Comando desconhecido: {0}\n\nDigite 'ajuda' para ver os comandos disponíveis")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("O comando {command} precisa de um argumento\n\nUso: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Commands available outside the add-item modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Fill in and submit the login form
    SubmitLogin,
    /// Fill in and submit the register form
    SubmitRegister,
    /// Switch to the register screen
    GoToRegister,
    /// Switch to the login screen
    GoToLogin,
    /// Show the item table and stats
    List,
    /// Show items matching a query
    Search(String),
    /// Open the add-item modal
    NewItem,
    /// Remove an item by id
    Delete(String),
    /// Leave the dashboard
    Logout,
    /// Show the commands for the current screen
    Help,
    /// Close the application
    Exit,
    /// Blank input
    Empty,
}

/// Commands available inside the add-item modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    /// Set a field, prompting for the value when none is given inline
    Edit(DraftField, Option<String>),
    /// Ask the AI for a description
    Generate,
    /// Commit the draft
    Save,
    /// Discard the draft
    Cancel,
    /// Show the draft
    Show,
    /// Show the modal commands
    Help,
    /// Blank input
    Empty,
}

/// Split input into a lowercase keyword and the untouched remainder
fn split_command(input: &str) -> (String, &str) {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    }
}

fn required_arg(command: &str, usage: &str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(arg.to_string())
    }
}

/// Parse a command typed on a screen
///
/// # Arguments
///
/// * `view` - Screen the command was typed on
/// * `input` - Raw input line
///
/// # Errors
///
/// Returns [`CommandError`] for unknown words or missing arguments
///
/// # Examples
///
/// ```
/// use ssmoveis::app::View;
/// use ssmoveis::commands::screen_commands::{parse_screen_command, ScreenCommand};
///
/// let cmd = parse_screen_command(View::Dashboard, "excluir 42").unwrap();
/// assert_eq!(cmd, ScreenCommand::Delete("42".to_string()));
/// ```
pub fn parse_screen_command(view: View, input: &str) -> Result<ScreenCommand, CommandError> {
    let (word, arg) = split_command(input);

    match word.as_str() {
        "" => return Ok(ScreenCommand::Empty),
        "ajuda" | "help" | "?" => return Ok(ScreenCommand::Help),
        "exit" | "quit" | "fechar" => return Ok(ScreenCommand::Exit),
        _ => {}
    }

    match (view, word.as_str()) {
        (View::Login, "entrar" | "login") => Ok(ScreenCommand::SubmitLogin),
        (View::Login, "cadastrar" | "register") => Ok(ScreenCommand::GoToRegister),

        (View::Register, "criar" | "submit") => Ok(ScreenCommand::SubmitRegister),
        (View::Register, "entrar" | "login") => Ok(ScreenCommand::GoToLogin),

        (View::Dashboard, "listar" | "list" | "ls") => Ok(ScreenCommand::List),
        (View::Dashboard, "buscar" | "search") => {
            required_arg("buscar", "buscar <texto>", arg).map(ScreenCommand::Search)
        }
        (View::Dashboard, "novo" | "new" | "add") => Ok(ScreenCommand::NewItem),
        (View::Dashboard, "excluir" | "delete" | "rm") => {
            required_arg("excluir", "excluir <id>", arg).map(ScreenCommand::Delete)
        }
        (View::Dashboard, "sair" | "logout") => Ok(ScreenCommand::Logout),

        _ => Err(CommandError::UnknownCommand(input.trim().to_string())),
    }
}

/// Parse a command typed inside the add-item modal
///
/// # Errors
///
/// Returns [`CommandError::UnknownCommand`] for unrecognized words
///
/// # Examples
///
/// ```
/// use ssmoveis::app::DraftField;
/// use ssmoveis::commands::screen_commands::{parse_modal_command, ModalCommand};
///
/// let cmd = parse_modal_command("nome Cama Box King").unwrap();
/// assert_eq!(cmd, ModalCommand::Edit(DraftField::Name, Some("Cama Box King".to_string())));
/// ```
pub fn parse_modal_command(input: &str) -> Result<ModalCommand, CommandError> {
    let (word, arg) = split_command(input);
    let value = if arg.is_empty() {
        None
    } else {
        Some(arg.to_string())
    };

    match word.as_str() {
        "" => Ok(ModalCommand::Empty),
        "nome" | "name" => Ok(ModalCommand::Edit(DraftField::Name, value)),
        "categoria" | "category" => Ok(ModalCommand::Edit(DraftField::Category, value)),
        "detalhes" | "keywords" => Ok(ModalCommand::Edit(DraftField::Keywords, value)),
        "descricao" | "descrição" | "description" => {
            Ok(ModalCommand::Edit(DraftField::Description, value))
        }
        "gerar" | "generate" => Ok(ModalCommand::Generate),
        "salvar" | "save" => Ok(ModalCommand::Save),
        "cancelar" | "cancel" => Ok(ModalCommand::Cancel),
        "ver" | "show" => Ok(ModalCommand::Show),
        "ajuda" | "help" | "?" => Ok(ModalCommand::Help),
        _ => Err(CommandError::UnknownCommand(input.trim().to_string())),
    }
}
