use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parley_core::forms::{FieldErrors, LoginForm, ProfileForm, SignupForm, AVATAR_COLORS};
use parley_core::{
    resolve, ActionKind, ActionOutcome, Credentials, Notice, ProfileUpdate, Route, SessionSnapshot,
    SessionState,
};
use tracing::{debug, error};
use tui_input::{Input, InputRequest};

use crate::notices::NoticeQueue;

/// What is drawn in the main area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Auth,
    Profile,
    Chat,
    NotFound(String),
}

/// The two halves of the auth screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}

impl AuthTab {
    pub fn title(self) -> &'static str {
        match self {
            AuthTab::Login => "Login",
            AuthTab::Signup => "Signup",
        }
    }

    fn toggle(self) -> Self {
        match self {
            AuthTab::Login => AuthTab::Signup,
            AuthTab::Signup => AuthTab::Login,
        }
    }
}

/// Focusable form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Confirm,
    FirstName,
    LastName,
    Color,
}

impl Field {
    /// Key used by the core form validators
    pub fn error_key(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::Confirm => "confirm",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Color => "color",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Confirm => "Confirm Password",
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Color => "Color",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::Confirm)
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Email, Field::Password];
const SIGNUP_FIELDS: &[Field] = &[Field::Email, Field::Password, Field::Confirm];
const PROFILE_FIELDS: &[Field] = &[Field::FirstName, Field::LastName, Field::Color];

/// Something the event loop has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Quit,
    Login(Credentials),
    Signup(Credentials),
    UpdateProfile(ProfileUpdate),
    Logout,
}

/// Application state management
#[derive(Debug)]
pub struct AppState {
    /// Route currently shown, always the gate's answer for the last navigation
    pub route: Route,
    pub session: SessionSnapshot,
    pub tab: AuthTab,
    pub email: Input,
    pub password: Input,
    pub confirm: Input,
    pub first_name: Input,
    pub last_name: Input,
    pub profile: ProfileForm,
    pub field_errors: FieldErrors,
    /// Action awaiting a reply; further submits are ignored meanwhile
    pub pending: Option<ActionKind>,
    pub notices: NoticeQueue,
    focus: usize,
}

impl AppState {
    pub fn new(start: Route, notice_ttl: Duration) -> Self {
        Self {
            route: start,
            session: SessionSnapshot::default(),
            tab: AuthTab::default(),
            email: Input::default(),
            password: Input::default(),
            confirm: Input::default(),
            first_name: Input::default(),
            last_name: Input::default(),
            profile: ProfileForm::default(),
            field_errors: FieldErrors::new(),
            pending: None,
            notices: NoticeQueue::new(notice_ttl),
            focus: 0,
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Screen for the current route; nothing is gated until the session is known
    pub fn screen(&self) -> Screen {
        if self.session_state() == SessionState::Unknown {
            return Screen::Loading;
        }
        match &self.route {
            Route::Auth => Screen::Auth,
            Route::Profile => Screen::Profile,
            Route::Chat => Screen::Chat,
            Route::NotFound(path) => Screen::NotFound(path.clone()),
            // The gate never lets Root render
            Route::Root => Screen::Auth,
        }
    }

    /// Fields of the current screen, in focus order
    pub fn fields(&self) -> &'static [Field] {
        match self.screen() {
            Screen::Auth => match self.tab {
                AuthTab::Login => LOGIN_FIELDS,
                AuthTab::Signup => SIGNUP_FIELDS,
            },
            Screen::Profile => PROFILE_FIELDS,
            _ => &[],
        }
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.fields().get(self.focus).copied()
    }

    pub fn input(&self, field: Field) -> Option<&Input> {
        match field {
            Field::Email => Some(&self.email),
            Field::Password => Some(&self.password),
            Field::Confirm => Some(&self.confirm),
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Color => None,
        }
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut Input> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::Confirm => Some(&mut self.confirm),
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::Color => None,
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field.error_key()).map(String::as_str)
    }

    /// Navigate to `requested` through the route gate
    pub fn navigate(&mut self, requested: Route) {
        let was_profile = self.screen() == Screen::Profile;
        self.route = requested;
        self.reresolve(was_profile);
    }

    /// Take a new session snapshot and re-gate the current route
    pub fn apply_session(&mut self, snapshot: SessionSnapshot) {
        if snapshot == self.session {
            return;
        }
        let was_profile = self.screen() == Screen::Profile;
        self.session = snapshot;
        self.reresolve(was_profile);
    }

    fn reresolve(&mut self, was_profile: bool) {
        let state = self.session_state();
        if state == SessionState::Unknown {
            return;
        }

        match resolve(state, self.route.clone()) {
            Ok(resolution) => {
                if resolution.route != self.route {
                    debug!(from = %self.route, to = %resolution.route, "Route redirected");
                    self.focus = 0;
                    self.field_errors.clear();
                }
                self.route = resolution.route;
                self.notices.extend(resolution.notices);
                if !was_profile && self.screen() == Screen::Profile {
                    self.load_profile_form();
                }
            }
            Err(err) => {
                error!(error = %err, "Route gate failed");
                self.notices
                    .push(Notice::error("Navigation failed", Some(err.to_string())));
            }
        }
    }

    /// Apply the result of a finished action
    pub fn apply_outcome(&mut self, outcome: ActionOutcome) {
        if self.pending == Some(outcome.kind) {
            self.pending = None;
        }
        self.notices.push(outcome.notice);

        if outcome.reset_form {
            match outcome.kind {
                ActionKind::Login | ActionKind::Signup => self.clear_auth_form(),
                ActionKind::UpdateProfile => self.clear_profile_form(),
                ActionKind::Logout => {}
            }
        }
        if let Some(route) = outcome.navigate_to {
            self.navigate(route);
        }
    }

    fn clear_auth_form(&mut self) {
        self.email = Input::default();
        self.password = Input::default();
        self.confirm = Input::default();
        self.field_errors.clear();
        self.focus = 0;
    }

    fn clear_profile_form(&mut self) {
        self.first_name = Input::default();
        self.last_name = Input::default();
        self.profile = ProfileForm::default();
        self.field_errors.clear();
        self.focus = 0;
    }

    /// Seed the profile form from the signed-in identity
    fn load_profile_form(&mut self) {
        let (first_name, last_name, color) = match self.session.identity.as_deref() {
            Some(identity) => (
                identity.first_name.clone().unwrap_or_default(),
                identity.last_name.clone().unwrap_or_default(),
                identity.color.unwrap_or_default() % AVATAR_COLORS.len() as u8,
            ),
            None => Default::default(),
        };
        self.first_name = Input::new(first_name.clone());
        self.last_name = Input::new(last_name.clone());
        self.profile = ProfileForm {
            first_name,
            last_name,
            color,
        };
    }

    fn focus_next(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    fn focus_previous(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Translate a key press into state changes and, possibly, an intent
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Some(Intent::Quit),
            KeyCode::Char('c') if ctrl => return Some(Intent::Quit),
            KeyCode::Char('l') if ctrl => {
                // A reply still in flight would sign the visitor back in
                if let Some(kind) = self.pending {
                    debug!(?kind, "Logout ignored while an action is pending");
                    return None;
                }
                return self
                    .session_state()
                    .is_authenticated()
                    .then_some(Intent::Logout);
            }
            _ => {}
        }

        match self.screen() {
            Screen::Auth | Screen::Profile => self.handle_form_key(key, ctrl),
            Screen::NotFound(_) => {
                if key.code == KeyCode::Enter {
                    self.navigate(Route::Root);
                }
                None
            }
            Screen::Chat | Screen::Loading => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, ctrl: bool) -> Option<Intent> {
        match key.code {
            KeyCode::Char('t') if ctrl && self.screen() == Screen::Auth => {
                self.tab = self.tab.toggle();
                self.focus = 0;
                self.field_errors.clear();
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Left if self.focused_field() == Some(Field::Color) => {
                self.profile.previous_color();
                None
            }
            KeyCode::Right if self.focused_field() == Some(Field::Color) => {
                self.profile.next_color();
                None
            }
            _ if ctrl => None,
            code => {
                self.edit_focused(code);
                None
            }
        }
    }

    fn edit_focused(&mut self, code: KeyCode) {
        let request = match code {
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };

        let Some(field) = self.focused_field() else {
            return;
        };
        if let Some(input) = self.input_mut(field) {
            if input.handle(request).is_some_and(|change| change.value) {
                self.field_errors.remove(field.error_key());
            }
        }
    }

    /// Validate the current form; returns the intent to send if it is valid
    fn submit(&mut self) -> Option<Intent> {
        if let Some(kind) = self.pending {
            debug!(?kind, "Submit ignored while an action is pending");
            return None;
        }

        let (kind, result) = match self.screen() {
            Screen::Auth => match self.tab {
                AuthTab::Login => {
                    let form = LoginForm {
                        email: self.email.value().to_string(),
                        password: self.password.value().to_string(),
                    };
                    (ActionKind::Login, form.validate().map(Intent::Login))
                }
                AuthTab::Signup => {
                    let form = SignupForm {
                        email: self.email.value().to_string(),
                        password: self.password.value().to_string(),
                        confirm: self.confirm.value().to_string(),
                    };
                    (ActionKind::Signup, form.validate().map(Intent::Signup))
                }
            },
            Screen::Profile => {
                self.profile.first_name = self.first_name.value().to_string();
                self.profile.last_name = self.last_name.value().to_string();
                (
                    ActionKind::UpdateProfile,
                    self.profile.validate().map(Intent::UpdateProfile),
                )
            }
            _ => return None,
        };

        match result {
            Ok(intent) => {
                self.field_errors.clear();
                self.pending = Some(kind);
                Some(intent)
            }
            Err(errors) => {
                debug!(?kind, fields = errors.len(), "Form rejected");
                self.focus_first_error(&errors);
                self.field_errors = errors;
                None
            }
        }
    }

    fn focus_first_error(&mut self, errors: &FieldErrors) {
        if let Some(index) = self
            .fields()
            .iter()
            .position(|field| errors.contains_key(field.error_key()))
        {
            self.focus = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::forms::{PASSWORDS_DONT_MATCH, PASSWORD_TOO_SHORT};
    use parley_core::gate::PROFILE_INCOMPLETE_NOTICE;
    use parley_core::IdentityRecord;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn ada(profile_setup: bool) -> SessionSnapshot {
        SessionSnapshot {
            resolved: true,
            loading: false,
            identity: Some(Arc::new(IdentityRecord {
                id: "u1".into(),
                email: "ada@example.com".into(),
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                profile_setup,
                image: None,
                color: Some(3),
            })),
        }
    }

    fn snapshot(profile_setup: Option<bool>) -> SessionSnapshot {
        SessionSnapshot {
            resolved: true,
            loading: false,
            identity: profile_setup.map(|profile_setup| {
                Arc::new(IdentityRecord {
                    id: "u1".into(),
                    email: "ada@example.com".into(),
                    first_name: None,
                    last_name: None,
                    profile_setup,
                    image: None,
                    color: None,
                })
            }),
        }
    }

    fn anonymous_state() -> AppState {
        let mut state = AppState::new(Route::Root, Duration::from_secs(4));
        state.apply_session(snapshot(None));
        state
    }

    #[test]
    fn test_loading_until_session_known() {
        let state = AppState::new(Route::Chat, Duration::from_secs(4));
        assert_eq!(state.screen(), Screen::Loading);
        assert_eq!(state.route, Route::Chat);
    }

    #[test]
    fn test_root_resolves_to_auth() {
        let state = anonymous_state();
        assert_eq!(state.route, Route::Auth);
        assert_eq!(state.screen(), Screen::Auth);
        assert_eq!(state.focused_field(), Some(Field::Email));
    }

    #[test]
    fn test_incomplete_profile_requesting_chat_lands_on_profile_with_notice() {
        let mut state = AppState::new(Route::Chat, Duration::from_secs(4));
        state.apply_session(snapshot(Some(false)));

        assert_eq!(state.screen(), Screen::Profile);
        let titles: Vec<_> = state.notices.visible().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec![PROFILE_INCOMPLETE_NOTICE.to_string()]);
    }

    #[test]
    fn test_same_snapshot_does_not_repeat_notices() {
        let mut state = AppState::new(Route::Chat, Duration::from_secs(4));
        state.apply_session(snapshot(Some(false)));
        state.apply_session(snapshot(Some(false)));
        assert_eq!(state.notices.len(), 1);
    }

    #[test]
    fn test_login_submit_produces_credentials() {
        let mut state = anonymous_state();
        type_text(&mut state, "ada@example.com");
        state.handle_key(key(KeyCode::Tab));
        type_text(&mut state, "correct horse");

        let intent = state.handle_key(key(KeyCode::Enter));

        assert_eq!(
            intent,
            Some(Intent::Login(Credentials {
                email: "ada@example.com".into(),
                password: "correct horse".into(),
            }))
        );
        assert_eq!(state.pending, Some(ActionKind::Login));
        // A second submit while pending is ignored
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_invalid_login_shows_field_errors() {
        let mut state = anonymous_state();
        type_text(&mut state, "ada@example.com");
        state.handle_key(key(KeyCode::Tab));
        type_text(&mut state, "short");

        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(state.field_error(Field::Password), Some(PASSWORD_TOO_SHORT));
        assert_eq!(state.focused_field(), Some(Field::Password));
        assert_eq!(state.pending, None);

        // Editing the field clears its error
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.field_error(Field::Password), None);
    }

    #[test]
    fn test_signup_tab_requires_matching_passwords() {
        let mut state = anonymous_state();
        state.handle_key(ctrl('t'));
        assert_eq!(state.tab, AuthTab::Signup);
        assert_eq!(state.fields().len(), 3);

        type_text(&mut state, "ada@example.com");
        state.handle_key(key(KeyCode::Down));
        type_text(&mut state, "password1");
        state.handle_key(key(KeyCode::Down));
        type_text(&mut state, "password2");

        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(state.field_error(Field::Confirm), Some(PASSWORDS_DONT_MATCH));
    }

    #[test]
    fn test_profile_color_cycles_with_arrows() {
        let mut state = AppState::new(Route::Profile, Duration::from_secs(4));
        state.apply_session(snapshot(Some(false)));
        type_text(&mut state, "Ada");
        state.handle_key(key(KeyCode::Tab));
        type_text(&mut state, "Lovelace");
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focused_field(), Some(Field::Color));

        state.handle_key(key(KeyCode::Right));
        state.handle_key(key(KeyCode::Right));
        state.handle_key(key(KeyCode::Left));

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Intent::UpdateProfile(ProfileUpdate {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                color: 1,
            }))
        );
    }

    #[test]
    fn test_outcome_navigates_and_clears_pending() {
        let mut state = AppState::new(Route::Profile, Duration::from_secs(4));
        state.apply_session(snapshot(Some(false)));
        state.pending = Some(ActionKind::UpdateProfile);
        state.apply_session(snapshot(Some(true)));

        state.apply_outcome(ActionOutcome {
            kind: ActionKind::UpdateProfile,
            notice: Notice::success("Success", None),
            reset_form: true,
            navigate_to: Some(Route::Chat),
            session_updated: true,
        });

        assert_eq!(state.pending, None);
        assert_eq!(state.screen(), Screen::Chat);
        assert_eq!(state.notices.len(), 1);
    }

    #[test]
    fn test_logout_only_when_signed_in() {
        let mut state = anonymous_state();
        assert_eq!(state.handle_key(ctrl('l')), None);

        state.apply_session(snapshot(Some(true)));
        assert_eq!(state.handle_key(ctrl('l')), Some(Intent::Logout));
    }

    #[test]
    fn test_logout_ignored_while_action_pending() {
        let mut state = AppState::new(Route::Profile, Duration::from_secs(4));
        state.apply_session(ada(false));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Intent::UpdateProfile(ProfileUpdate {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                color: 3,
            }))
        );

        assert_eq!(state.handle_key(ctrl('l')), None);
        assert_eq!(state.pending, Some(ActionKind::UpdateProfile));
        assert_eq!(state.screen(), Screen::Profile);
    }

    #[test]
    fn test_profile_form_loads_stored_identity() {
        let mut state = AppState::new(Route::Profile, Duration::from_secs(4));
        state.apply_session(ada(true));

        assert_eq!(state.screen(), Screen::Profile);
        assert_eq!(state.first_name.value(), "Ada");
        assert_eq!(state.last_name.value(), "Lovelace");
        assert_eq!(state.profile.color, 3);
        assert_eq!(state.first_name.cursor(), 3);

        // Saving untouched keeps the stored color
        let intent = state.handle_key(key(KeyCode::Enter));
        assert!(state.field_errors.is_empty());
        assert!(matches!(
            intent,
            Some(Intent::UpdateProfile(ProfileUpdate { color: 3, .. }))
        ));
    }

    #[test]
    fn test_profile_form_keeps_edits_across_session_updates() {
        let mut state = AppState::new(Route::Profile, Duration::from_secs(4));
        state.apply_session(ada(false));
        type_text(&mut state, "a");
        assert_eq!(state.first_name.value(), "Adaa");

        state.apply_session(ada(true));

        assert_eq!(state.screen(), Screen::Profile);
        assert_eq!(state.first_name.value(), "Adaa");
    }

    #[test]
    fn test_not_found_enter_goes_home() {
        let mut state = AppState::new(Route::parse("/nowhere"), Duration::from_secs(4));
        state.apply_session(snapshot(None));
        assert_eq!(state.screen(), Screen::NotFound("/nowhere".into()));

        state.handle_key(key(KeyCode::Enter));

        assert_eq!(state.screen(), Screen::Auth);
    }

    #[test]
    fn test_quit_keys() {
        let mut state = anonymous_state();
        assert_eq!(state.handle_key(key(KeyCode::Esc)), Some(Intent::Quit));
        assert_eq!(state.handle_key(ctrl('c')), Some(Intent::Quit));
    }
}
