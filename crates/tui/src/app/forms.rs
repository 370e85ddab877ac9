//! Text inputs and the two creation forms (connection, API key).
//!
//! Responsibilities:
//! - Wrap `tui_input::Input` with the key bindings every text box shares.
//! - Turn form contents into request payloads.
//!
//! Does NOT handle:
//! - Validation beyond what the payload types provide (`NewConnection::validate`,
//!   `NewApiKey::validate`).
//! - Rendering (see `ui::screens::connections` and `ui::screens::settings`).

use apiconn_client::{AuthType, Credentials, NewApiKey, NewConnection, Provider};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest};

/// Single-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    input: Input,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            input: Input::new(value.into()),
        }
    }

    /// Apply an editing key. Returns `false` for keys it does not handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let req = match key.code {
                KeyCode::Char('u') => InputRequest::DeleteLine,
                KeyCode::Char('a') => InputRequest::GoToStart,
                KeyCode::Char('e') => InputRequest::GoToEnd,
                KeyCode::Left => InputRequest::GoToPrevWord,
                KeyCode::Right => InputRequest::GoToNextWord,
                _ => return false,
            };
            self.input.handle(req);
            return true;
        }

        let req = match key.code {
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return false,
        };
        self.input.handle(req);
        true
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = Input::new(value.into());
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Cursor column in display cells.
    pub fn cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    /// Same length as the value, every character replaced by `*`.
    pub fn masked(&self) -> String {
        "*".repeat(self.input.value().chars().count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionField {
    Name,
    BaseUrl,
    AuthType,
    Credential,
    Header,
}

/// New-connection form.
#[derive(Debug, Clone)]
pub struct ConnectionForm {
    pub name: TextField,
    pub base_url: TextField,
    pub auth_type: AuthType,
    /// API key or bearer token depending on `auth_type`.
    pub credential: TextField,
    pub header: TextField,
    pub focus: ConnectionField,
    /// Position in the provider template cycle.
    pub template_index: Option<usize>,
    /// Name of the provider whose template was applied.
    pub template: Option<String>,
}

impl Default for ConnectionForm {
    fn default() -> Self {
        Self {
            name: TextField::default(),
            base_url: TextField::default(),
            auth_type: AuthType::ApiKey,
            credential: TextField::default(),
            header: TextField::default(),
            focus: ConnectionField::Name,
            template_index: None,
            template: None,
        }
    }
}

impl ConnectionForm {
    /// Form pre-filled from a provider: name, base URL and auth type.
    pub fn from_provider(provider: &Provider) -> Self {
        let mut form = Self::default();
        form.apply_template(provider);
        form
    }

    pub fn apply_template(&mut self, provider: &Provider) {
        self.name.set_value(provider.name.clone());
        self.base_url.set_value(provider.base_url.clone());
        self.auth_type = match &provider.auth_type {
            AuthType::Other(_) => AuthType::None,
            other => other.clone(),
        };
        self.template = Some(provider.name.clone());
        if !self.visible_fields().contains(&self.focus) {
            self.focus = ConnectionField::Name;
        }
    }

    /// Fields shown for the current auth type, in focus order.
    pub fn visible_fields(&self) -> Vec<ConnectionField> {
        let mut fields = vec![
            ConnectionField::Name,
            ConnectionField::BaseUrl,
            ConnectionField::AuthType,
        ];
        match self.auth_type {
            AuthType::ApiKey => {
                fields.push(ConnectionField::Credential);
                fields.push(ConnectionField::Header);
            }
            AuthType::Bearer => fields.push(ConnectionField::Credential),
            _ => {}
        }
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.visible_fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self) {
        let fields = self.visible_fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    pub fn cycle_auth_type(&mut self) {
        self.auth_type = self.auth_type.cycle_next();
    }

    /// Route an editing key to the focused text field.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.focus {
            ConnectionField::Name => self.name.handle_key(key),
            ConnectionField::BaseUrl => self.base_url.handle_key(key),
            ConnectionField::Credential => self.credential.handle_key(key),
            ConnectionField::Header => self.header.handle_key(key),
            ConnectionField::AuthType => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    self.cycle_auth_type();
                    true
                }
                _ => false,
            },
        }
    }

    pub fn credentials(&self) -> Credentials {
        let secret = self.credential.value().trim().to_string();
        match self.auth_type {
            AuthType::ApiKey => Credentials::ApiKey {
                key: secret,
                header: Some(self.header.value().trim().to_string()).filter(|h| !h.is_empty()),
            },
            AuthType::Bearer => Credentials::Bearer { token: secret },
            AuthType::Basic => Credentials::Basic,
            AuthType::None | AuthType::Other(_) => Credentials::None,
        }
    }

    pub fn to_new_connection(&self) -> NewConnection {
        NewConnection::new(self.name.value(), self.base_url.value(), &self.credentials())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiKeyField {
    #[default]
    Name,
    Service,
    Value,
}

/// Add-API-key form on the settings screen.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyForm {
    pub name: TextField,
    pub service: TextField,
    pub value: TextField,
    pub focus: ApiKeyField,
}

impl ApiKeyForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            ApiKeyField::Name => ApiKeyField::Service,
            ApiKeyField::Service => ApiKeyField::Value,
            ApiKeyField::Value => ApiKeyField::Name,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            ApiKeyField::Name => ApiKeyField::Value,
            ApiKeyField::Service => ApiKeyField::Name,
            ApiKeyField::Value => ApiKeyField::Service,
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.focus {
            ApiKeyField::Name => self.name.handle_key(key),
            ApiKeyField::Service => self.service.handle_key(key),
            ApiKeyField::Value => self.value.handle_key(key),
        }
    }

    pub fn to_new_key(&self) -> NewApiKey {
        NewApiKey {
            name: self.name.value().trim().to_string(),
            service: self.service.value().trim().to_string(),
            key_value: self.value.value().trim().to_string(),
        }
    }
}
