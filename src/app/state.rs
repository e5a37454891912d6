//! Application state and its transition function
//!
//! All mutable UI state lives in [`AppState`] and changes only through
//! [`AppState::apply`]. Work that has to happen outside the state machine
//! (waiting for authentication, calling the AI) is returned as [`Effect`]s;
//! whoever runs the effects feeds the results back as actions.

use std::fmt;

use crate::auth::{AuthError, AuthRequest, Session};
use crate::catalog::{Catalog, NewItem};

/// Message shown when the add-item form is submitted without name or category
pub const MISSING_ITEM_FIELDS: &str = "Preencha o nome e a categoria do móvel.";

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Sign-in form (initial screen)
    Login,
    /// Account creation form
    Register,
    /// Inventory dashboard
    Dashboard,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "LOGIN"),
            Self::Register => write!(f, "CADASTRO"),
            Self::Dashboard => write!(f, "ESTOQUE"),
        }
    }
}

/// Credential form buffers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    /// Full name (register only)
    pub name: String,
    /// E-mail
    pub email: String,
    /// Password
    pub password: String,
    /// Inline error from the last submit
    pub error: Option<String>,
    /// A submit is waiting for the authenticator
    pub loading: bool,
}

/// Editable field of the credential form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

/// Identifies one opening of the add-item modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftId(u64);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

/// Uncommitted add-item form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftItem {
    /// Which modal opening this draft belongs to
    pub id: DraftId,
    /// Item name
    pub name: String,
    /// Item category
    pub category: String,
    /// Hints passed to the AI
    pub keywords: String,
    /// Description, typed or generated
    pub description: String,
    /// An AI description request is in flight
    pub generating: bool,
    /// Inline validation message
    pub error: Option<String>,
}

impl DraftItem {
    fn empty(id: DraftId) -> Self {
        Self {
            id,
            name: String::new(),
            category: String::new(),
            keywords: String::new(),
            description: String::new(),
            generating: false,
            error: None,
        }
    }

    /// Whether the "generate with AI" control is enabled
    pub fn can_generate(&self) -> bool {
        !self.name.is_empty() && !self.category.is_empty() && !self.generating
    }
}

/// Editable field of the add-item form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Category,
    Keywords,
    Description,
}

/// Sub-state of the add-item modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Editing,
    Generating,
}

/// User intents and async completions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Type into the credential form
    SetAuthField(AuthField, String),
    /// Submit the login form
    SubmitLogin,
    /// Submit the register form
    SubmitRegister,
    /// Switch from login to register
    GoToRegister,
    /// Switch from register to login
    GoToLogin,
    /// The authenticator answered
    AuthFinished(Result<Session, AuthError>),
    /// Leave the dashboard
    Logout,
    /// Open the add-item modal with an empty draft
    OpenAddItem,
    /// Type into the add-item form
    SetDraftField(DraftField, String),
    /// Ask the AI for a description of the current draft
    RequestDescription,
    /// The description request for `draft` finished
    DescriptionGenerated { draft: DraftId, text: String },
    /// Commit the draft to the catalog
    SubmitItem,
    /// Discard the draft
    CancelItem,
    /// Remove a catalog item
    DeleteItem(String),
}

impl Action {
    /// Variant name, safe to log (carries no field values)
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetAuthField(..) => "SetAuthField",
            Self::SubmitLogin => "SubmitLogin",
            Self::SubmitRegister => "SubmitRegister",
            Self::GoToRegister => "GoToRegister",
            Self::GoToLogin => "GoToLogin",
            Self::AuthFinished(_) => "AuthFinished",
            Self::Logout => "Logout",
            Self::OpenAddItem => "OpenAddItem",
            Self::SetDraftField(..) => "SetDraftField",
            Self::RequestDescription => "RequestDescription",
            Self::DescriptionGenerated { .. } => "DescriptionGenerated",
            Self::SubmitItem => "SubmitItem",
            Self::CancelItem => "CancelItem",
            Self::DeleteItem(_) => "DeleteItem",
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the authenticator and report back with [`Action::AuthFinished`]
    Authenticate(AuthRequest),
    /// Call the description client and report back with
    /// [`Action::DescriptionGenerated`]
    GenerateDescription {
        draft: DraftId,
        name: String,
        category: String,
        keywords: String,
    },
    /// Drop the in-flight description request
    AbortGeneration,
}

/// Complete console state
///
/// # Examples
///
/// ```
/// use ssmoveis::app::{Action, AppState, AuthField, Effect, View};
/// use ssmoveis::catalog::Catalog;
///
/// let mut state = AppState::new(Catalog::with_samples());
/// state.apply(Action::SetAuthField(AuthField::Email, "loja@ssmoveis.com".into()));
/// state.apply(Action::SetAuthField(AuthField::Password, "segredo".into()));
/// let effects = state.apply(Action::SubmitLogin);
/// assert!(matches!(effects[0], Effect::Authenticate(_)));
/// assert!(state.auth().loading);
/// assert_eq!(state.view(), View::Login);
/// ```
#[derive(Debug, Clone)]
pub struct AppState {
    view: View,
    auth: AuthForm,
    session: Option<Session>,
    catalog: Catalog,
    draft: Option<DraftItem>,
    next_draft: u64,
}

impl AppState {
    /// Start on the login screen with the given catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            view: View::Login,
            auth: AuthForm::default(),
            session: None,
            catalog,
            draft: None,
            next_draft: 0,
        }
    }

    /// Current screen
    pub fn view(&self) -> View {
        self.view
    }

    /// Credential form
    pub fn auth(&self) -> &AuthForm {
        &self.auth
    }

    /// Signed-in session, if on the dashboard
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Item store
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Open add-item draft
    pub fn draft(&self) -> Option<&DraftItem> {
        self.draft.as_ref()
    }

    /// Sub-state of the add-item modal
    pub fn modal(&self) -> ModalState {
        match &self.draft {
            None => ModalState::Closed,
            Some(d) if d.generating => ModalState::Generating,
            Some(_) => ModalState::Editing,
        }
    }

    /// Apply an action and return the effects it requests
    ///
    /// Actions that make no sense in the current state are ignored and
    /// return no effects.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        tracing::debug!(view = %self.view, action = action.name(), "Applying action");
        match action {
            Action::SetAuthField(field, value) => {
                if self.view == View::Dashboard {
                    return ignored("auth field edit on dashboard");
                }
                match field {
                    AuthField::Name => self.auth.name = value,
                    AuthField::Email => self.auth.email = value,
                    AuthField::Password => self.auth.password = value,
                }
                Vec::new()
            }
            Action::SubmitLogin => self.submit_auth(View::Login),
            Action::SubmitRegister => self.submit_auth(View::Register),
            Action::GoToRegister => self.switch_auth_view(View::Login, View::Register),
            Action::GoToLogin => self.switch_auth_view(View::Register, View::Login),
            Action::AuthFinished(outcome) => {
                if !self.auth.loading || self.view == View::Dashboard {
                    return ignored("stale authentication result");
                }
                self.auth.loading = false;
                match outcome {
                    Ok(session) => {
                        tracing::info!(email = %session.email, "Entering dashboard");
                        self.session = Some(session);
                        self.view = View::Dashboard;
                    }
                    Err(e) => {
                        self.auth.error = Some(e.to_string());
                    }
                }
                Vec::new()
            }
            Action::Logout => {
                if self.view != View::Dashboard {
                    return ignored("logout outside dashboard");
                }
                let mut effects = Vec::new();
                if self.draft.take().is_some_and(|d| d.generating) {
                    effects.push(Effect::AbortGeneration);
                }
                self.view = View::Login;
                self.auth = AuthForm::default();
                self.session = None;
                tracing::info!("Logged out");
                effects
            }
            Action::OpenAddItem => {
                if self.view != View::Dashboard || self.draft.is_some() {
                    return ignored("add-item modal unavailable");
                }
                self.next_draft += 1;
                self.draft = Some(DraftItem::empty(DraftId(self.next_draft)));
                Vec::new()
            }
            Action::SetDraftField(field, value) => {
                let Some(draft) = self.draft.as_mut() else {
                    return ignored("draft edit with modal closed");
                };
                match field {
                    DraftField::Name => draft.name = value,
                    DraftField::Category => draft.category = value,
                    DraftField::Keywords => draft.keywords = value,
                    DraftField::Description => {
                        if draft.generating {
                            return ignored("description locked while generating");
                        }
                        draft.description = value;
                    }
                }
                Vec::new()
            }
            Action::RequestDescription => {
                let Some(draft) = self.draft.as_mut() else {
                    return ignored("generate with modal closed");
                };
                if !draft.can_generate() {
                    return ignored("generate control disabled");
                }
                draft.generating = true;
                vec![Effect::GenerateDescription {
                    draft: draft.id,
                    name: draft.name.clone(),
                    category: draft.category.clone(),
                    keywords: draft.keywords.clone(),
                }]
            }
            Action::DescriptionGenerated { draft: id, text } => {
                match self.draft.as_mut() {
                    Some(draft) if draft.id == id && draft.generating => {
                        draft.description = text;
                        draft.generating = false;
                        Vec::new()
                    }
                    _ => ignored("description for a closed draft"),
                }
            }
            Action::SubmitItem => {
                let Some(draft) = self.draft.as_mut() else {
                    return ignored("submit with modal closed");
                };
                if draft.name.is_empty() || draft.category.is_empty() {
                    draft.error = Some(MISSING_ITEM_FIELDS.to_string());
                    return Vec::new();
                }
                let mut effects = Vec::new();
                if let Some(draft) = self.draft.take() {
                    if draft.generating {
                        effects.push(Effect::AbortGeneration);
                    }
                    self.catalog
                        .add(NewItem::new(draft.name, draft.category, draft.description));
                }
                effects
            }
            Action::CancelItem => match self.draft.take() {
                Some(draft) if draft.generating => vec![Effect::AbortGeneration],
                Some(_) => Vec::new(),
                None => ignored("cancel with modal closed"),
            },
            Action::DeleteItem(id) => {
                if self.view != View::Dashboard {
                    return ignored("delete outside dashboard");
                }
                self.catalog.remove(&id);
                Vec::new()
            }
        }
    }

    fn submit_auth(&mut self, from: View) -> Vec<Effect> {
        if self.view != from || self.auth.loading {
            return ignored("auth submit unavailable");
        }
        self.auth.error = None;
        self.auth.loading = true;
        let request = match from {
            View::Register => AuthRequest::Register {
                name: self.auth.name.clone(),
                email: self.auth.email.clone(),
                password: self.auth.password.clone(),
            },
            _ => AuthRequest::Login {
                email: self.auth.email.clone(),
                password: self.auth.password.clone(),
            },
        };
        vec![Effect::Authenticate(request)]
    }

    fn switch_auth_view(&mut self, from: View, to: View) -> Vec<Effect> {
        if self.view != from || self.auth.loading {
            return ignored("auth view switch unavailable");
        }
        self.view = to;
        self.auth.error = None;
        Vec::new()
    }
}

fn ignored(reason: &str) -> Vec<Effect> {
    tracing::debug!("Action ignored: {}", reason);
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Catalog::with_samples())
    }

    fn session() -> Session {
        Session {
            display_name: None,
            email: "a@b.com".to_string(),
        }
    }

    fn logged_in() -> AppState {
        let mut s = state();
        s.apply(Action::SubmitLogin);
        s.apply(Action::AuthFinished(Ok(session())));
        assert_eq!(s.view(), View::Dashboard);
        s
    }

    fn open_draft(s: &mut AppState, name: &str, category: &str) -> DraftId {
        s.apply(Action::OpenAddItem);
        s.apply(Action::SetDraftField(DraftField::Name, name.to_string()));
        s.apply(Action::SetDraftField(DraftField::Category, category.to_string()));
        s.draft().unwrap().id
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.view(), View::Login);
        assert_eq!(s.modal(), ModalState::Closed);
        assert!(s.session().is_none());
        assert_eq!(s.catalog().len(), 2);
    }

    #[test]
    fn test_submit_login_requests_authentication() {
        let mut s = state();
        s.apply(Action::SetAuthField(AuthField::Email, "a@b.com".to_string()));
        s.apply(Action::SetAuthField(AuthField::Password, "123456".to_string()));
        let effects = s.apply(Action::SubmitLogin);
        assert_eq!(
            effects,
            vec![Effect::Authenticate(AuthRequest::Login {
                email: "a@b.com".to_string(),
                password: "123456".to_string(),
            })]
        );
        assert!(s.auth().loading);
    }

    #[test]
    fn test_double_submit_is_ignored_while_loading() {
        let mut s = state();
        assert_eq!(s.apply(Action::SubmitLogin).len(), 1);
        assert!(s.apply(Action::SubmitLogin).is_empty());
        assert!(s.apply(Action::GoToRegister).is_empty());
        assert_eq!(s.view(), View::Login);
    }

    #[test]
    fn test_auth_failure_sets_error_and_stays() {
        let mut s = state();
        s.apply(Action::SubmitLogin);
        s.apply(Action::AuthFinished(Err(AuthError::InvalidCredentials {
            min_len: 6,
        })));
        assert_eq!(s.view(), View::Login);
        assert!(!s.auth().loading);
        assert_eq!(
            s.auth().error.as_deref(),
            Some("Credenciais inválidas. Senha deve ter no mínimo 6 caracteres.")
        );

        // resubmitting clears the error
        s.apply(Action::SubmitLogin);
        assert!(s.auth().error.is_none());
    }

    #[test]
    fn test_register_flow() {
        let mut s = state();
        s.apply(Action::GoToRegister);
        assert_eq!(s.view(), View::Register);
        assert!(s.apply(Action::SubmitLogin).is_empty());

        s.apply(Action::SetAuthField(AuthField::Name, "Maria".to_string()));
        let effects = s.apply(Action::SubmitRegister);
        assert!(matches!(
            &effects[0],
            Effect::Authenticate(AuthRequest::Register { name, .. }) if name == "Maria"
        ));
        s.apply(Action::AuthFinished(Err(AuthError::IncompleteRegistration)));
        assert_eq!(s.view(), View::Register);
        assert_eq!(
            s.auth().error.as_deref(),
            Some("Preencha todos os campos corretamente.")
        );

        s.apply(Action::GoToLogin);
        assert_eq!(s.view(), View::Login);
        assert!(s.auth().error.is_none());
        assert_eq!(s.auth().name, "Maria");
    }

    #[test]
    fn test_stale_auth_result_is_ignored() {
        let mut s = state();
        s.apply(Action::AuthFinished(Ok(session())));
        assert_eq!(s.view(), View::Login);
        assert!(s.session().is_none());
    }

    #[test]
    fn test_logout_clears_auth_buffers() {
        let mut s = state();
        s.apply(Action::SetAuthField(AuthField::Email, "a@b.com".to_string()));
        s.apply(Action::SetAuthField(AuthField::Password, "123456".to_string()));
        s.apply(Action::SubmitLogin);
        s.apply(Action::AuthFinished(Ok(session())));

        s.apply(Action::Logout);
        assert_eq!(s.view(), View::Login);
        assert_eq!(s.auth(), &AuthForm::default());
        assert!(s.session().is_none());
    }

    #[test]
    fn test_logout_aborts_pending_generation() {
        let mut s = logged_in();
        open_draft(&mut s, "Mesa", "Sala");
        s.apply(Action::RequestDescription);
        let effects = s.apply(Action::Logout);
        assert_eq!(effects, vec![Effect::AbortGeneration]);
        assert!(s.draft().is_none());
    }

    #[test]
    fn test_dashboard_only_actions_ignored_on_login() {
        let mut s = state();
        s.apply(Action::OpenAddItem);
        assert!(s.draft().is_none());
        s.apply(Action::DeleteItem("1".to_string()));
        assert_eq!(s.catalog().len(), 2);
        s.apply(Action::Logout);
        assert_eq!(s.view(), View::Login);
    }

    #[test]
    fn test_open_add_item_resets_draft() {
        let mut s = logged_in();
        let first = open_draft(&mut s, "Mesa", "Sala");
        s.apply(Action::CancelItem);
        s.apply(Action::OpenAddItem);
        let draft = s.draft().unwrap();
        assert_ne!(draft.id, first);
        assert!(draft.name.is_empty());
        assert!(draft.category.is_empty());
        assert!(draft.keywords.is_empty());
        assert!(draft.description.is_empty());
        assert_eq!(s.modal(), ModalState::Editing);
    }

    #[test]
    fn test_generate_requires_name_and_category() {
        let mut s = logged_in();
        s.apply(Action::OpenAddItem);
        s.apply(Action::SetDraftField(DraftField::Name, "Mesa".to_string()));
        assert!(s.apply(Action::RequestDescription).is_empty());
        assert_eq!(s.modal(), ModalState::Editing);
    }

    #[test]
    fn test_generation_lifecycle() {
        let mut s = logged_in();
        let id = open_draft(&mut s, "Mesa", "Sala de Jantar");
        s.apply(Action::SetDraftField(DraftField::Keywords, "vidro".to_string()));

        let effects = s.apply(Action::RequestDescription);
        assert_eq!(
            effects,
            vec![Effect::GenerateDescription {
                draft: id,
                name: "Mesa".to_string(),
                category: "Sala de Jantar".to_string(),
                keywords: "vidro".to_string(),
            }]
        );
        assert_eq!(s.modal(), ModalState::Generating);

        // one request at a time, description locked
        assert!(s.apply(Action::RequestDescription).is_empty());
        s.apply(Action::SetDraftField(DraftField::Description, "typed".to_string()));
        assert!(s.draft().unwrap().description.is_empty());

        s.apply(Action::DescriptionGenerated {
            draft: id,
            text: "Mesa elegante.".to_string(),
        });
        assert_eq!(s.modal(), ModalState::Editing);
        assert_eq!(s.draft().unwrap().description, "Mesa elegante.");
    }

    #[test]
    fn test_fallback_text_is_written_like_any_result() {
        let mut s = logged_in();
        let id = open_draft(&mut s, "Mesa", "Sala");
        s.apply(Action::RequestDescription);
        s.apply(Action::DescriptionGenerated {
            draft: id,
            text: "Erro ao conectar com a IA. Tente novamente.".to_string(),
        });
        assert_eq!(
            s.draft().unwrap().description,
            "Erro ao conectar com a IA. Tente novamente."
        );
        assert!(!s.draft().unwrap().generating);
    }

    #[test]
    fn test_late_result_for_closed_draft_is_discarded() {
        let mut s = logged_in();
        let old = open_draft(&mut s, "Mesa", "Sala");
        s.apply(Action::RequestDescription);
        assert_eq!(s.apply(Action::CancelItem), vec![Effect::AbortGeneration]);

        s.apply(Action::DescriptionGenerated {
            draft: old,
            text: "late".to_string(),
        });
        assert!(s.draft().is_none());

        let new = open_draft(&mut s, "Sofá", "Sala");
        s.apply(Action::DescriptionGenerated {
            draft: old,
            text: "late".to_string(),
        });
        let draft = s.draft().unwrap();
        assert_eq!(draft.id, new);
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_submit_without_generating_preserves_description() {
        let mut s = logged_in();
        open_draft(&mut s, "Mesa de Jantar", "Sala de Jantar");
        s.apply(Action::SetDraftField(
            DraftField::Description,
            "  Mesa para 6 pessoas  ".to_string(),
        ));
        assert!(s.apply(Action::SubmitItem).is_empty());

        assert_eq!(s.modal(), ModalState::Closed);
        let items = s.catalog().list();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Mesa de Jantar");
        assert_eq!(items[0].description, "  Mesa para 6 pessoas  ");
        assert_eq!(items[1].name, "Guarda-Roupa Casal");
    }

    #[test]
    fn test_submit_requires_name_and_category() {
        let mut s = logged_in();
        s.apply(Action::OpenAddItem);
        s.apply(Action::SetDraftField(DraftField::Name, "Mesa".to_string()));
        s.apply(Action::SubmitItem);
        assert_eq!(s.modal(), ModalState::Editing);
        assert_eq!(s.draft().unwrap().error.as_deref(), Some(MISSING_ITEM_FIELDS));
        assert_eq!(s.catalog().len(), 2);
    }

    #[test]
    fn test_submit_while_generating_aborts_request() {
        let mut s = logged_in();
        let id = open_draft(&mut s, "Mesa", "Sala");
        s.apply(Action::RequestDescription);
        assert_eq!(s.apply(Action::SubmitItem), vec![Effect::AbortGeneration]);
        assert_eq!(s.catalog().len(), 3);

        s.apply(Action::DescriptionGenerated {
            draft: id,
            text: "late".to_string(),
        });
        assert!(s.catalog().list()[0].description.is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut s = logged_in();
        open_draft(&mut s, "Mesa", "Sala");
        assert!(s.apply(Action::CancelItem).is_empty());
        assert_eq!(s.modal(), ModalState::Closed);
        assert_eq!(s.catalog().len(), 2);
    }

    #[test]
    fn test_delete_item() {
        let mut s = logged_in();
        s.apply(Action::DeleteItem("1".to_string()));
        assert_eq!(s.catalog().len(), 1);
        s.apply(Action::DeleteItem("1".to_string()));
        assert_eq!(s.catalog().len(), 1);
    }
}
