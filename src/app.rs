use std::time::Instant;

use crate::config::AppConfig;
use crate::event::KeyAction;
use crate::jira::JiraClient;
use crate::model::issue::{CurrentUser, Issue, Project, Transition};
use crate::stats;
use crate::util::input::InputField;

/// Statuses offered by the dashboard filter toggles.
pub const STANDARD_STATUSES: [&str; 3] = ["To Do", "In Progress", "Done"];

const FLASH_SECS: u64 = 4;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Issues,
    Detail,
    Projects,
    Create,
}

/// What the issue table currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueScope {
    Mine,
    Project(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Url,
    Email,
    Token,
}

/// Sub-state of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    View,
    Transition,
    Comment,
    Assignee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFocus {
    Project,
    Summary,
    Description,
}

pub struct LoginForm {
    pub url: InputField,
    pub email: InputField,
    pub token: InputField,
    pub focus: LoginFocus,
}

impl LoginForm {
    fn from_config(config: &AppConfig) -> Self {
        let (url, email, token) = match &config.jira {
            Some(jira) => (
                InputField::with_value(jira.url.clone()),
                InputField::with_value(jira.email.clone()),
                InputField::with_value(jira.api_token.clone()),
            ),
            None => (
                InputField::with_value("https://your-domain.atlassian.net"),
                InputField::default(),
                InputField::default(),
            ),
        };
        Self {
            url,
            email,
            token,
            focus: LoginFocus::Email,
        }
    }

    fn focused_mut(&mut self) -> &mut InputField {
        match self.focus {
            LoginFocus::Url => &mut self.url,
            LoginFocus::Email => &mut self.email,
            LoginFocus::Token => &mut self.token,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            LoginFocus::Url => LoginFocus::Email,
            LoginFocus::Email => LoginFocus::Token,
            LoginFocus::Token => LoginFocus::Url,
        };
    }

    fn prev_focus(&mut self) {
        self.focus = match self.focus {
            LoginFocus::Url => LoginFocus::Token,
            LoginFocus::Email => LoginFocus::Url,
            LoginFocus::Token => LoginFocus::Email,
        };
    }

    fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.email.is_empty() && !self.token.is_empty()
    }
}

pub struct App {
    pub view: View,
    pub client: Option<JiraClient>,
    pub user: Option<CurrentUser>,
    pub login: LoginForm,
    pub scope: IssueScope,
    pub status_filter: [bool; 3],
    pub issues: Vec<Issue>,
    pub selected_issue: usize,
    pub detail: Option<Issue>,
    pub transitions: Vec<Transition>,
    pub selected_transition: usize,
    pub edit: EditMode,
    pub edit_input: InputField,
    pub projects: Vec<Project>,
    pub selected_project: usize,
    pub create_summary: InputField,
    pub create_description: InputField,
    pub create_focus: CreateFocus,
    pub flash_message: Option<(String, Instant)>,
    pub loading: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            view: View::Login,
            client: None,
            user: None,
            login: LoginForm::from_config(config),
            scope: IssueScope::Mine,
            status_filter: [true; 3],
            issues: Vec::new(),
            selected_issue: 0,
            detail: None,
            transitions: Vec::new(),
            selected_transition: 0,
            edit: EditMode::View,
            edit_input: InputField::default(),
            projects: Vec::new(),
            selected_project: 0,
            create_summary: InputField::default(),
            create_description: InputField::default(),
            create_focus: CreateFocus::Project,
            flash_message: None,
            loading: false,
            should_quit: false,
        }
    }

    pub async fn update(&mut self, action: Action) {
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::Tick => {}
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        match self.view {
            View::Login => self.handle_login_key(key).await,
            View::Dashboard => self.handle_dashboard_key(key).await,
            View::Issues => self.handle_issues_key(key).await,
            View::Detail => self.handle_detail_key(key).await,
            View::Projects => self.handle_projects_key(key).await,
            View::Create => self.handle_create_key(key).await,
        }
    }

    async fn handle_login_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Tab | KeyAction::Down => self.login.next_focus(),
            KeyAction::Up => self.login.prev_focus(),
            KeyAction::Char(c) => self.login.focused_mut().insert(c),
            KeyAction::Backspace => self.login.focused_mut().backspace(),
            KeyAction::Left => self.login.focused_mut().move_left(),
            KeyAction::Right => self.login.focused_mut().move_right(),
            KeyAction::Select => self.connect().await,
            KeyAction::Escape => self.should_quit = true,
        }
    }

    async fn handle_dashboard_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Char(c @ '1'..='3') => self.toggle_status(c).await,
            KeyAction::Char('r') => self.refresh_issues().await,
            KeyAction::Char('p') => self.open_projects().await,
            KeyAction::Char('n') => self.open_create().await,
            KeyAction::Right | KeyAction::Tab | KeyAction::Select => {
                self.view = View::Issues;
            }
            KeyAction::Char('q') | KeyAction::Escape => self.should_quit = true,
            _ => {}
        }
    }

    async fn handle_issues_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                self.selected_issue = self.selected_issue.saturating_sub(1);
            }
            KeyAction::Down => {
                if !self.issues.is_empty() && self.selected_issue < self.issues.len() - 1 {
                    self.selected_issue += 1;
                }
            }
            KeyAction::Select => self.open_detail().await,
            KeyAction::Char(c @ '1'..='3') => {
                if self.scope == IssueScope::Mine {
                    self.toggle_status(c).await;
                }
            }
            KeyAction::Char('r') => self.refresh_issues().await,
            KeyAction::Left | KeyAction::Escape => self.to_dashboard().await,
            KeyAction::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn handle_detail_key(&mut self, key: KeyAction) {
        match self.edit {
            EditMode::View => match key {
                KeyAction::Char('t') => {
                    if self.transitions.is_empty() {
                        self.flash("No moves available (workflow restriction)");
                    } else {
                        self.selected_transition = 0;
                        self.edit = EditMode::Transition;
                    }
                }
                KeyAction::Char('c') => {
                    self.edit_input.clear();
                    self.edit = EditMode::Comment;
                }
                KeyAction::Char('a') => {
                    self.edit_input.clear();
                    self.edit = EditMode::Assignee;
                }
                KeyAction::Char('r') => self.reload_detail().await,
                KeyAction::Left | KeyAction::Escape => {
                    self.detail = None;
                    self.view = View::Issues;
                }
                KeyAction::Char('q') => self.should_quit = true,
                _ => {}
            },
            EditMode::Transition => match key {
                KeyAction::Up => {
                    self.selected_transition = self.selected_transition.saturating_sub(1);
                }
                KeyAction::Down => {
                    if self.selected_transition + 1 < self.transitions.len() {
                        self.selected_transition += 1;
                    }
                }
                KeyAction::Select => self.run_transition().await,
                KeyAction::Escape => self.edit = EditMode::View,
                _ => {}
            },
            EditMode::Comment | EditMode::Assignee => match key {
                KeyAction::Char(c) => self.edit_input.insert(c),
                KeyAction::Backspace => self.edit_input.backspace(),
                KeyAction::Left => self.edit_input.move_left(),
                KeyAction::Right => self.edit_input.move_right(),
                KeyAction::Select => {
                    if self.edit == EditMode::Comment {
                        self.submit_comment().await;
                    } else {
                        self.submit_assignee().await;
                    }
                }
                KeyAction::Escape => {
                    self.edit_input.clear();
                    self.edit = EditMode::View;
                }
                _ => {}
            },
        }
    }

    async fn handle_projects_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                self.selected_project = self.selected_project.saturating_sub(1);
            }
            KeyAction::Down => {
                if !self.projects.is_empty() && self.selected_project < self.projects.len() - 1 {
                    self.selected_project += 1;
                }
            }
            KeyAction::Select => {
                if let Some(project) = self.projects.get(self.selected_project) {
                    self.scope = IssueScope::Project(project.key.clone());
                    self.view = View::Issues;
                    self.refresh_issues().await;
                }
            }
            KeyAction::Left | KeyAction::Escape => self.view = View::Dashboard,
            KeyAction::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn handle_create_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Tab => {
                self.create_focus = match self.create_focus {
                    CreateFocus::Project => CreateFocus::Summary,
                    CreateFocus::Summary => CreateFocus::Description,
                    CreateFocus::Description => CreateFocus::Project,
                };
            }
            KeyAction::Up if self.create_focus == CreateFocus::Project => {
                self.selected_project = self.selected_project.saturating_sub(1);
            }
            KeyAction::Down if self.create_focus == CreateFocus::Project => {
                if !self.projects.is_empty() && self.selected_project < self.projects.len() - 1 {
                    self.selected_project += 1;
                }
            }
            KeyAction::Char(c) => {
                if let Some(field) = self.create_field_mut() {
                    field.insert(c);
                }
            }
            KeyAction::Backspace => {
                if let Some(field) = self.create_field_mut() {
                    field.backspace();
                }
            }
            KeyAction::Left => {
                if let Some(field) = self.create_field_mut() {
                    field.move_left();
                }
            }
            KeyAction::Right => {
                if let Some(field) = self.create_field_mut() {
                    field.move_right();
                }
            }
            KeyAction::Select => self.submit_create().await,
            KeyAction::Escape => self.view = View::Dashboard,
            _ => {}
        }
    }

    fn create_field_mut(&mut self) -> Option<&mut InputField> {
        match self.create_focus {
            CreateFocus::Project => None,
            CreateFocus::Summary => Some(&mut self.create_summary),
            CreateFocus::Description => Some(&mut self.create_description),
        }
    }

    async fn connect(&mut self) {
        if !self.login.is_complete() {
            self.flash("All fields are required");
            return;
        }
        let client = match JiraClient::new(
            self.login.url.value(),
            self.login.email.value(),
            self.login.token.value(),
        ) {
            Ok(client) => client,
            Err(e) => {
                self.flash(e.to_string());
                return;
            }
        };
        match client.current_user().await {
            Ok(user) => {
                self.flash(format!("Connected as {}", user.display_name));
                self.user = Some(user);
                self.client = Some(client);
                self.scope = IssueScope::Mine;
                self.view = View::Dashboard;
                self.refresh_issues().await;
            }
            Err(e) => {
                self.client = None;
                self.flash(e.to_string());
            }
        }
    }

    /// Re-run the search for the current scope. One blocking round trip,
    /// exactly like every other remote call here.
    pub async fn refresh_issues(&mut self) {
        let Some(client) = &self.client else {
            return;
        };
        self.loading = true;
        let result = match &self.scope {
            IssueScope::Mine => {
                let statuses = self.selected_statuses();
                client.my_issues(Some(statuses.as_slice())).await
            }
            IssueScope::Project(key) => client.project_issues(key).await,
        };
        self.loading = false;
        match result {
            Ok(issues) => {
                self.issues = issues;
                if self.selected_issue >= self.issues.len() && !self.issues.is_empty() {
                    self.selected_issue = self.issues.len() - 1;
                }
                if self.issues.is_empty() {
                    self.selected_issue = 0;
                }
            }
            Err(e) => self.flash(e.to_string()),
        }
    }

    async fn toggle_status(&mut self, c: char) {
        let idx = (c as usize) - ('1' as usize);
        self.status_filter[idx] = !self.status_filter[idx];
        if self.scope == IssueScope::Mine {
            self.refresh_issues().await;
        }
    }

    /// The filter always produces an explicit selection; deselecting all
    /// three means "match nothing", which the client resolves without a
    /// request.
    pub fn selected_statuses(&self) -> Vec<String> {
        STANDARD_STATUSES
            .iter()
            .zip(self.status_filter)
            .filter(|(_, on)| *on)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    async fn to_dashboard(&mut self) {
        if self.scope != IssueScope::Mine {
            self.scope = IssueScope::Mine;
            self.refresh_issues().await;
        }
        self.view = View::Dashboard;
    }

    async fn open_detail(&mut self) {
        let Some(issue) = self.issues.get(self.selected_issue) else {
            return;
        };
        let key = issue.key.clone();
        self.load_detail(&key).await;
    }

    async fn reload_detail(&mut self) {
        let Some(detail) = &self.detail else {
            return;
        };
        let key = detail.key.clone();
        self.load_detail(&key).await;
    }

    async fn load_detail(&mut self, key: &str) {
        let Some(client) = &self.client else {
            return;
        };
        self.loading = true;
        let result = match client.issue(key).await {
            Ok(issue) => client.transitions(key).await.map(|t| (issue, t)),
            Err(e) => Err(e),
        };
        self.loading = false;
        match result {
            Ok((issue, transitions)) => {
                self.detail = Some(issue);
                self.transitions = transitions;
                self.selected_transition = 0;
                self.edit = EditMode::View;
                self.view = View::Detail;
            }
            Err(e) => self.flash(e.to_string()),
        }
    }

    async fn run_transition(&mut self) {
        let Some(client) = &self.client else {
            return;
        };
        let Some(detail) = &self.detail else {
            return;
        };
        let Some(transition) = self.transitions.get(self.selected_transition) else {
            return;
        };
        let key = detail.key.clone();
        let (id, name) = (transition.id.clone(), transition.name.clone());
        match client.run_transition(&key, &id).await {
            Ok(()) => {
                self.flash(format!("Moved to {name}. Press r to refresh."));
                self.edit = EditMode::View;
            }
            Err(e) => self.flash(e.to_string()),
        }
    }

    async fn submit_comment(&mut self) {
        if self.edit_input.value().trim().is_empty() {
            self.flash("Comment is empty");
            return;
        }
        let Some(client) = &self.client else {
            return;
        };
        let Some(detail) = &self.detail else {
            return;
        };
        let body = self.edit_input.value().to_string();
        match client.add_comment(&detail.key, &body).await {
            Ok(()) => {
                self.edit_input.clear();
                self.edit = EditMode::View;
                self.flash("Comment added. Press r to refresh.");
            }
            Err(e) => self.flash(e.to_string()),
        }
    }

    async fn submit_assignee(&mut self) {
        if self.edit_input.value().trim().is_empty() {
            self.flash("Account id is empty");
            return;
        }
        let Some(client) = &self.client else {
            return;
        };
        let Some(detail) = &self.detail else {
            return;
        };
        let account_id = self.edit_input.value().trim().to_string();
        match client.assign(&detail.key, &account_id).await {
            Ok(()) => {
                self.edit_input.clear();
                self.edit = EditMode::View;
                self.flash("Assignee changed. Press r to refresh.");
            }
            Err(e) => self.flash(e.to_string()),
        }
    }

    async fn open_projects(&mut self) {
        if self.fetch_projects().await {
            self.view = View::Projects;
        }
    }

    async fn open_create(&mut self) {
        if self.fetch_projects().await {
            self.create_focus = CreateFocus::Project;
            self.view = View::Create;
        }
    }

    async fn fetch_projects(&mut self) -> bool {
        let Some(client) = &self.client else {
            return false;
        };
        match client.projects().await {
            Ok(projects) => {
                if projects.is_empty() {
                    self.flash("No accessible projects");
                    return false;
                }
                self.projects = projects;
                self.selected_project = 0;
                true
            }
            Err(e) => {
                self.flash(e.to_string());
                false
            }
        }
    }

    async fn submit_create(&mut self) {
        if self.create_summary.value().trim().is_empty() {
            self.flash("Project and summary are required");
            return;
        }
        let Some(project) = self.projects.get(self.selected_project) else {
            self.flash("Project and summary are required");
            return;
        };
        let Some(client) = &self.client else {
            return;
        };
        let project_key = project.key.clone();
        let summary = self.create_summary.value().trim().to_string();
        let description = self.create_description.value().to_string();
        let description = (!description.trim().is_empty()).then_some(description);
        match client
            .create_issue(&project_key, &summary, description.as_deref())
            .await
        {
            Ok(key) => {
                self.create_summary.clear();
                self.create_description.clear();
                self.flash(format!("Issue created: {key}"));
            }
            Err(e) => self.flash(e.to_string()),
        }
    }

    /// Most recently updated issues for the dashboard.
    pub fn recent_issues(&self, n: usize) -> Vec<Issue> {
        let mut sorted = self.issues.clone();
        stats::sort_by_updated(&mut sorted);
        sorted.truncate(n);
        sorted
    }

    fn flash(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::issue::IssueFields;

    fn app() -> App {
        App::new(&AppConfig::default())
    }

    fn canned_issue(key: &str) -> Issue {
        Issue {
            key: key.to_string(),
            fields: IssueFields::default(),
        }
    }

    #[tokio::test]
    async fn login_focus_cycles_through_all_fields() {
        let mut app = app();
        assert_eq!(app.login.focus, LoginFocus::Email);
        app.update(Action::Key(KeyAction::Tab)).await;
        assert_eq!(app.login.focus, LoginFocus::Token);
        app.update(Action::Key(KeyAction::Tab)).await;
        assert_eq!(app.login.focus, LoginFocus::Url);
        app.update(Action::Key(KeyAction::Up)).await;
        assert_eq!(app.login.focus, LoginFocus::Token);
    }

    #[tokio::test]
    async fn typing_lands_in_the_focused_login_field() {
        let mut app = app();
        for c in "me@acme.io".chars() {
            app.update(Action::Key(KeyAction::Char(c))).await;
        }
        assert_eq!(app.login.email.value(), "me@acme.io");
        assert!(app.login.token.is_empty());
    }

    #[tokio::test]
    async fn connect_requires_all_fields() {
        let mut app = app();
        app.update(Action::Key(KeyAction::Select)).await;
        assert_eq!(app.view, View::Login);
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("required"));
    }

    #[tokio::test]
    async fn login_prefills_from_config() {
        let config: AppConfig = toml::from_str(
            "[jira]\nurl = \"https://acme.atlassian.net\"\nemail = \"me@acme.io\"\n",
        )
        .unwrap();
        let app = App::new(&config);
        assert_eq!(app.login.url.value(), "https://acme.atlassian.net");
        assert_eq!(app.login.email.value(), "me@acme.io");
        assert!(app.login.token.is_empty());
    }

    #[tokio::test]
    async fn selection_moves_within_bounds() {
        let mut app = app();
        app.view = View::Issues;
        app.issues = vec![canned_issue("A-1"), canned_issue("A-2")];
        app.update(Action::Key(KeyAction::Down)).await;
        assert_eq!(app.selected_issue, 1);
        app.update(Action::Key(KeyAction::Down)).await;
        assert_eq!(app.selected_issue, 1);
        app.update(Action::Key(KeyAction::Up)).await;
        app.update(Action::Key(KeyAction::Up)).await;
        assert_eq!(app.selected_issue, 0);
    }

    #[tokio::test]
    async fn status_toggles_track_the_standard_statuses() {
        let mut app = app();
        app.view = View::Dashboard;
        assert_eq!(app.selected_statuses(), ["To Do", "In Progress", "Done"]);
        app.update(Action::Key(KeyAction::Char('2'))).await;
        assert_eq!(app.selected_statuses(), ["To Do", "Done"]);
        app.update(Action::Key(KeyAction::Char('1'))).await;
        app.update(Action::Key(KeyAction::Char('3'))).await;
        // Everything deselected: an explicit empty selection, not "no filter".
        assert!(app.selected_statuses().is_empty());
    }

    #[tokio::test]
    async fn create_focus_cycles_and_routes_typing() {
        let mut app = app();
        app.view = View::Create;
        app.update(Action::Key(KeyAction::Char('x'))).await;
        // Project focus ignores chars.
        assert!(app.create_summary.is_empty());
        app.update(Action::Key(KeyAction::Tab)).await;
        app.update(Action::Key(KeyAction::Char('h'))).await;
        app.update(Action::Key(KeyAction::Char('i'))).await;
        assert_eq!(app.create_summary.value(), "hi");
        app.update(Action::Key(KeyAction::Tab)).await;
        app.update(Action::Key(KeyAction::Char('d'))).await;
        assert_eq!(app.create_description.value(), "d");
        app.update(Action::Key(KeyAction::Tab)).await;
        assert_eq!(app.create_focus, CreateFocus::Project);
    }

    #[tokio::test]
    async fn create_submit_requires_summary() {
        let mut app = app();
        app.view = View::Create;
        app.projects = vec![crate::model::issue::Project {
            key: "DEMO".into(),
            name: "Demo".into(),
        }];
        app.update(Action::Key(KeyAction::Select)).await;
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("required"));
    }

    #[tokio::test]
    async fn comment_submit_rejects_blank_input() {
        let mut app = app();
        app.view = View::Detail;
        app.detail = Some(canned_issue("A-1"));
        app.edit = EditMode::Comment;
        app.update(Action::Key(KeyAction::Char(' '))).await;
        app.update(Action::Key(KeyAction::Select)).await;
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("empty"));
        assert_eq!(app.edit, EditMode::Comment);
    }

    #[tokio::test]
    async fn escape_cancels_detail_edit_modes() {
        let mut app = app();
        app.view = View::Detail;
        app.detail = Some(canned_issue("A-1"));
        app.edit = EditMode::Assignee;
        app.update(Action::Key(KeyAction::Char('a'))).await;
        app.update(Action::Key(KeyAction::Escape)).await;
        assert_eq!(app.edit, EditMode::View);
        assert!(app.edit_input.is_empty());
        // A second escape leaves the detail view entirely.
        app.update(Action::Key(KeyAction::Escape)).await;
        assert_eq!(app.view, View::Issues);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn quit_action_sets_the_flag() {
        let mut app = app();
        app.update(Action::Quit).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn recent_issues_caps_at_n() {
        let mut app = app();
        app.issues = (0..8).map(|i| canned_issue(&format!("A-{i}"))).collect();
        assert_eq!(app.recent_issues(5).len(), 5);
    }
}
