/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `console`: interactive inventory console (login, dashboard, add-item form)
- `generate`: one-shot item description generation

Both are thin front-ends over the library components: the view controller,
the catalog and the description client.
*/

use crate::app::{Action, AppState, AuthField, Controller, DraftField, View};
use crate::auth::{Authenticator, SimulatedAuthenticator};
use crate::catalog::Catalog;
use crate::commands::render::{
    draft_text, help_text, modal_help_text, modal_prompt, print_auth_error, print_auth_screen,
    print_banner, print_dashboard, print_search, screen_prompt,
};
use crate::commands::screen_commands::{
    parse_modal_command, parse_screen_command, ModalCommand, ScreenCommand,
};
use crate::config::Config;
use crate::error::{InventoryError, Result};
use crate::generation::DescriptionClient;
use colored::Colorize;
use std::sync::Arc;

// Console rendering helpers
pub mod render;

// Screen and modal command parser
pub mod screen_commands;

/// Interactive inventory console
///
/// Runs a readline loop over the three screens. Each line is parsed as a
/// screen command, turned into controller actions, and the resulting state
/// is printed back.
pub mod console {
    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Source of input lines for the console
    ///
    /// Both methods return `Ok(None)` when the user interrupts or closes
    /// the input.
    pub trait LineReader {
        /// Read a command line; non-empty lines go to history
        fn read_command(&mut self, prompt: &str) -> Result<Option<String>>;

        /// Read a form field value, pre-filled with `initial`
        fn read_field(&mut self, prompt: &str, initial: &str) -> Result<Option<String>>;
    }

    fn readline_result(
        result: std::result::Result<String, ReadlineError>,
    ) -> Result<Option<String>> {
        match result {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                Ok(None)
            }
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    impl LineReader for DefaultEditor {
        fn read_command(&mut self, prompt: &str) -> Result<Option<String>> {
            let line = readline_result(self.readline(prompt))?;
            if let Some(text) = &line {
                if !text.trim().is_empty() {
                    let _ = self.add_history_entry(text.as_str());
                }
            }
            Ok(line)
        }

        fn read_field(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
            readline_result(self.readline_with_initial(prompt, (initial, "")))
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flow {
        Continue,
        Exit,
    }

    /// The interactive console
    pub struct Console<R: LineReader> {
        controller: Controller,
        reader: R,
        provider: &'static str,
    }

    /// Resolves on the first Ctrl-C
    ///
    /// Never resolves when the signal handler cannot be installed.
    async fn ctrl_c() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }

    /// Apply results until nothing is pending
    ///
    /// Returns `true` when `interrupt` resolved first. Pending work is left
    /// to the controller, which aborts it when dropped.
    async fn settle_or_interrupt(
        controller: &mut Controller,
        interrupt: impl std::future::Future<Output = ()>,
    ) -> bool {
        tokio::select! {
            biased;
            _ = controller.settle() => false,
            _ = interrupt => true,
        }
    }

    impl<R: LineReader> Console<R> {
        /// Create a console around a controller
        ///
        /// `provider` is only used for the dashboard summary line.
        pub fn new(controller: Controller, reader: R, provider: &'static str) -> Self {
            Self {
                controller,
                reader,
                provider,
            }
        }

        /// Current application state
        pub fn state(&self) -> &AppState {
            self.controller.state()
        }

        /// Run until the user exits or closes the input
        pub async fn run(&mut self) -> Result<()> {
            print_banner();
            print_auth_screen(self.state().view(), self.state().auth());

            loop {
                let view = self.state().view();
                let Some(line) = self.reader.read_command(&screen_prompt(view))? else {
                    break;
                };

                let command = match parse_screen_command(view, &line) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };

                if self.handle(view, command).await? == Flow::Exit {
                    break;
                }
            }

            println!("Até logo!");
            Ok(())
        }

        async fn handle(&mut self, view: View, command: ScreenCommand) -> Result<Flow> {
            match command {
                ScreenCommand::Empty => {}
                ScreenCommand::Help => print!("{}", help_text(view)),
                ScreenCommand::Exit => return Ok(Flow::Exit),
                ScreenCommand::SubmitLogin => return self.submit_auth(View::Login).await,
                ScreenCommand::SubmitRegister => return self.submit_auth(View::Register).await,
                ScreenCommand::GoToRegister => {
                    self.controller.dispatch(Action::GoToRegister);
                    print_auth_screen(self.state().view(), self.state().auth());
                }
                ScreenCommand::GoToLogin => {
                    self.controller.dispatch(Action::GoToLogin);
                    print_auth_screen(self.state().view(), self.state().auth());
                }
                ScreenCommand::List => print_dashboard(self.state(), self.provider),
                ScreenCommand::Search(query) => {
                    let items = self.state().catalog().search(&query);
                    print_search(&items, &query);
                }
                ScreenCommand::NewItem => {
                    self.add_item().await?;
                    print_dashboard(self.state(), self.provider);
                }
                ScreenCommand::Delete(id) => self.delete_item(id),
                ScreenCommand::Logout => {
                    self.controller.dispatch(Action::Logout);
                    println!("Sessão encerrada.\n");
                    print_auth_screen(self.state().view(), self.state().auth());
                }
            }
            Ok(Flow::Continue)
        }

        async fn submit_auth(&mut self, view: View) -> Result<Flow> {
            let mut fields = Vec::new();
            if view == View::Register {
                fields.push((AuthField::Name, "Nome completo: "));
            }
            fields.push((AuthField::Email, "E-mail: "));
            fields.push((AuthField::Password, "Senha: "));

            for (field, label) in fields {
                let initial = match field {
                    AuthField::Name => self.state().auth().name.clone(),
                    AuthField::Email => self.state().auth().email.clone(),
                    AuthField::Password => String::new(),
                };
                let Some(value) = self.reader.read_field(label, &initial)? else {
                    println!("Operação cancelada.");
                    return Ok(Flow::Continue);
                };
                self.controller
                    .dispatch(Action::SetAuthField(field, value.trim().to_string()));
            }

            if view == View::Register {
                self.controller.dispatch(Action::SubmitRegister);
                println!("{}", "Criando conta...".dimmed());
            } else {
                self.controller.dispatch(Action::SubmitLogin);
                println!("{}", "Entrando...".dimmed());
            }
            if settle_or_interrupt(&mut self.controller, ctrl_c()).await {
                println!("CTRL-C");
                return Ok(Flow::Exit);
            }

            if self.state().view() == View::Dashboard {
                println!();
                print_dashboard(self.state(), self.provider);
            } else {
                print_auth_error(self.state().auth());
            }
            Ok(Flow::Continue)
        }

        fn delete_item(&mut self, id: String) {
            let Some(item) = self.state().catalog().get(&id) else {
                println!("{}", format!("Item não encontrado: {}", id).yellow());
                return;
            };
            let name = item.name.clone();
            self.controller.dispatch(Action::DeleteItem(id));
            println!("{}", format!("Item removido: {}", name).green());
        }

        fn show_draft(&self) {
            if let Some(draft) = self.state().draft() {
                print!("{}", draft_text(draft));
            }
        }

        fn cancel_item(&mut self) {
            self.controller.dispatch(Action::CancelItem);
            println!("Cadastro cancelado.");
        }

        async fn add_item(&mut self) -> Result<()> {
            self.controller.dispatch(Action::OpenAddItem);
            if self.state().draft().is_none() {
                return Ok(());
            }
            println!(
                "{}",
                "Novo item (digite 'ajuda' dentro do formulário para ver os comandos)".bold()
            );

            let fields = [
                (DraftField::Name, "Nome: "),
                (DraftField::Category, "Categoria: "),
                (DraftField::Keywords, "Detalhes (opcional): "),
            ];
            for (field, label) in fields {
                let Some(value) = self.reader.read_field(label, "")? else {
                    self.cancel_item();
                    return Ok(());
                };
                self.controller
                    .dispatch(Action::SetDraftField(field, value.trim().to_string()));
            }
            self.show_draft();

            while self.state().draft().is_some() {
                let prompt = modal_prompt(self.state().modal());
                let Some(line) = self.reader.read_command(&prompt)? else {
                    self.cancel_item();
                    return Ok(());
                };

                let command = match parse_modal_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };

                match command {
                    ModalCommand::Empty => {}
                    ModalCommand::Help => print!("{}", modal_help_text()),
                    ModalCommand::Show => self.show_draft(),
                    ModalCommand::Edit(field, Some(value)) => {
                        self.controller.dispatch(Action::SetDraftField(field, value));
                    }
                    ModalCommand::Edit(field, None) => self.edit_field(field)?,
                    ModalCommand::Generate => {
                        if !self.generate_description().await {
                            self.cancel_item();
                            return Ok(());
                        }
                    }
                    ModalCommand::Save => {
                        self.controller.dispatch(Action::SubmitItem);
                        match self.state().draft().and_then(|d| d.error.clone()) {
                            Some(error) => eprintln!("{}", error.red()),
                            None => {
                                println!("{}", "Item salvo!".green());
                                return Ok(());
                            }
                        }
                    }
                    ModalCommand::Cancel => {
                        self.cancel_item();
                        return Ok(());
                    }
                }
            }
            Ok(())
        }

        fn edit_field(&mut self, field: DraftField) -> Result<()> {
            let Some(draft) = self.state().draft() else {
                return Ok(());
            };
            let (label, current) = match field {
                DraftField::Name => ("Nome: ", draft.name.clone()),
                DraftField::Category => ("Categoria: ", draft.category.clone()),
                DraftField::Keywords => ("Detalhes: ", draft.keywords.clone()),
                DraftField::Description => ("Descrição: ", draft.description.clone()),
            };
            if let Some(value) = self.reader.read_field(label, &current)? {
                self.controller
                    .dispatch(Action::SetDraftField(field, value.trim().to_string()));
            }
            Ok(())
        }

        /// Returns `false` when the user interrupted the request
        async fn generate_description(&mut self) -> bool {
            let ready = self.state().draft().is_some_and(|d| d.can_generate());
            if !ready {
                eprintln!(
                    "{}",
                    "Preencha nome e categoria para gerar a descrição com IA.".yellow()
                );
                return true;
            }

            self.controller.dispatch(Action::RequestDescription);
            println!("{}", "Consultando Especialista...".magenta());

            let interrupted = tokio::select! {
                _ = self.controller.next_completion() => false,
                _ = ctrl_c() => true,
            };
            if interrupted {
                return false;
            }
            self.show_draft();
            true
        }
    }

    /// Start the interactive console
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be built or the terminal fails
    pub async fn run_console(config: Config) -> Result<()> {
        tracing::info!("Starting interactive console");

        let describer = DescriptionClient::from_config(&config.generation)?;
        let provider = describer.provider_name();
        let authenticator: Arc<dyn Authenticator> =
            Arc::new(SimulatedAuthenticator::from_config(&config.auth));
        let catalog = if config.catalog.seed_samples {
            Catalog::with_samples()
        } else {
            Catalog::new()
        };

        let controller = Controller::new(AppState::new(catalog), authenticator, describer);
        let reader = DefaultEditor::new()?;

        Console::new(controller, reader, provider).run().await
    }

}

/// One-shot description generation
pub mod generate {
    use super::*;

    /// Generate a description for a single item and print it
    ///
    /// Provider failures are not errors: the fallback text is printed, the
    /// same way the console shows it.
    ///
    /// # Errors
    ///
    /// Returns error if name or category is blank, or the provider cannot be
    /// built
    pub async fn run_generate(
        config: Config,
        name: String,
        category: String,
        keywords: String,
    ) -> Result<()> {
        let (name, category) = (name.trim(), category.trim());
        if name.is_empty() || category.is_empty() {
            return Err(InventoryError::InvalidInput(
                "name and category must not be empty".to_string(),
            )
            .into());
        }

        let client = DescriptionClient::from_config(&config.generation)?;
        tracing::info!(provider = client.provider_name(), "Generating description");
        let description = client
            .generate_description(name, category, keywords.trim())
            .await;
        println!("{}", description);
        Ok(())
    }

}
