// src/app.rs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{ListState, ScrollbarState};
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::config::Settings;
use crate::core::catalog::{self, ToolDescriptor, ToolKind};
use crate::core::error::ToolResult;
use crate::core::models::ToolReport;
use crate::core::report;
use crate::core::tools::ToolRequest;
use crate::core::tools::cipher::{Algorithm, Mode};
use crate::core::tools::ip_lookup::IpHistory;
use crate::core::tools::phishing::ContentKind;
use crate::core::tools::port_scan::ScanType;
use crate::core::tools::stego::StegoOperation;

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// What a spawned analysis sends back: the run id it was started with and its outcome.
pub type TaskResult = (u64, ToolResult<ToolReport>);

pub enum Notice {
    None,
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Tool(ToolKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    /// Rendered masked.
    Secret,
    Choice(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub choice: usize,
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self { label, kind: FieldKind::Text, value: String::new(), choice: 0 }
    }

    fn secret(label: &'static str) -> Self {
        Self { label, kind: FieldKind::Secret, value: String::new(), choice: 0 }
    }

    fn choice<T: ToString>(label: &'static str, options: impl IntoIterator<Item = T>) -> Self {
        let options = options.into_iter().map(|o| o.to_string()).collect();
        Self { label, kind: FieldKind::Choice(options), value: String::new(), choice: 0 }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }

    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Text => self.value.clone(),
            FieldKind::Secret => "•".repeat(self.value.chars().count()),
            FieldKind::Choice(options) => {
                format!("◀ {} ▶", options.get(self.choice).map(String::as_str).unwrap_or_default())
            }
        }
    }
}

/// The input form of one tool page.
#[derive(Debug, Clone)]
pub struct ToolForm {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl ToolForm {
    pub fn for_tool(kind: ToolKind) -> Self {
        let fields = match kind {
            ToolKind::PhishingDetector => vec![
                FormField::choice("Type", ["URL", "Text"]),
                FormField::text("Content"),
            ],
            ToolKind::IpLookup => vec![FormField::text("IP address (blank for yours)")],
            ToolKind::Encryption => vec![
                FormField::choice("Action", ["Process text", "Generate RSA key pair"]),
                FormField::choice("Algorithm", Algorithm::iter()),
                FormField::choice("Mode", Mode::iter()),
                FormField::text("Text"),
                FormField::secret("Password"),
            ],
            ToolKind::DnsLookup => vec![FormField::text("Domain")],
            ToolKind::PortScanner => vec![
                FormField::text("Target"),
                FormField::choice("Scan type", ScanType::iter()),
            ],
            ToolKind::LookalikeLinks => vec![FormField::text("URL")],
            ToolKind::EmailHeaders => vec![FormField::text("Raw headers (paste)")],
            ToolKind::Steganography => vec![
                FormField::choice("Operation", ["Encode", "Decode"]),
                FormField::text("Image path"),
                FormField::text("Message"),
                FormField::secret("Passphrase"),
            ],
            ToolKind::BreachChecker => vec![FormField::text("Email")],
        };
        Self { fields, focus: 0 }
    }

    fn field(&self, label: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.label == label)
    }

    fn field_mut(&mut self, label: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.label == label)
    }

    fn value(&self, label: &str) -> &str {
        self.field(label).map(|f| f.value.as_str()).unwrap_or_default()
    }

    fn choice(&self, label: &str) -> usize {
        self.field(label).map(|f| f.choice).unwrap_or_default()
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn insert(&mut self, text: &str) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !field.is_choice() {
                field.value.push_str(text);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Choice(options) = &field.kind {
                let n = options.len();
                field.choice = if forward { (field.choice + 1) % n } else { (field.choice + n - 1) % n };
            }
        }
    }

    /// Turns the form into a validated request for `kind`.
    pub fn build_request(&self, kind: ToolKind) -> ToolResult<ToolRequest> {
        match kind {
            ToolKind::PhishingDetector => {
                let content_kind = if self.choice("Type") == 0 { ContentKind::Url } else { ContentKind::Text };
                ToolRequest::phishing(self.value("Content"), content_kind)
            }
            ToolKind::IpLookup => ToolRequest::ip(self.value("IP address (blank for yours)")),
            ToolKind::Encryption => {
                if self.choice("Action") == 1 {
                    return Ok(ToolRequest::KeyPair);
                }
                let algorithm = Algorithm::iter().nth(self.choice("Algorithm")).unwrap_or(Algorithm::Aes);
                let mode = Mode::iter().nth(self.choice("Mode")).unwrap_or(Mode::Encrypt);
                ToolRequest::cipher(algorithm, mode, self.value("Text"), self.value("Password"))
            }
            ToolKind::DnsLookup => ToolRequest::dns(self.value("Domain")),
            ToolKind::PortScanner => {
                let scan_type = ScanType::iter().nth(self.choice("Scan type")).unwrap_or(ScanType::Basic);
                ToolRequest::port_scan(self.value("Target"), scan_type)
            }
            ToolKind::LookalikeLinks => ToolRequest::lookalike(self.value("URL")),
            ToolKind::EmailHeaders => ToolRequest::email_headers(self.value("Raw headers (paste)")),
            ToolKind::Steganography => {
                let passphrase = self.value("Passphrase").to_string();
                let operation = if self.choice("Operation") == 0 {
                    StegoOperation::Encode { message: self.value("Message").to_string(), passphrase }
                } else {
                    StegoOperation::Decode { passphrase }
                };
                ToolRequest::stego(self.value("Image path"), operation)
            }
            ToolKind::BreachChecker => ToolRequest::breach(self.value("Email")),
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub settings: Settings,
    pub screen: Screen,
    pub state: AppState,
    pub show_disclaimer: bool,
    pub filter: String,
    pub tool_list_state: ListState,
    pub form: ToolForm,
    pub report: Option<ToolReport>,
    pub report_text: String,
    pub notice: Notice,
    pub ip_history: IpHistory,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
    pub spinner_frame: usize,
    run_id: u64,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut tool_list_state = ListState::default();
        tool_list_state.select(Some(0));
        Self {
            should_quit: false,
            show_disclaimer: settings.show_disclaimer,
            settings,
            screen: Screen::Dashboard,
            state: AppState::Idle,
            filter: String::new(),
            tool_list_state,
            form: ToolForm::for_tool(ToolKind::PhishingDetector),
            report: None,
            report_text: String::new(),
            notice: Notice::None,
            ip_history: IpHistory::default(),
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
            spinner_frame: 0,
            run_id: 0,
        }
    }

    // --- Dashboard ---

    pub fn visible_tools(&self) -> Vec<&'static ToolDescriptor> {
        catalog::filter(&self.filter)
    }

    pub fn selected_tool(&self) -> Option<&'static ToolDescriptor> {
        let tools = self.visible_tools();
        self.tool_list_state.selected().and_then(|i| tools.get(i).copied())
    }

    pub fn select_next(&mut self) {
        let len = self.visible_tools().len();
        if len > 0 {
            let i = self.tool_list_state.selected().map_or(0, |i| (i + 1) % len);
            self.tool_list_state.select(Some(i));
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.visible_tools().len();
        if len > 0 {
            let i = self.tool_list_state.selected().map_or(0, |i| (i + len - 1) % len);
            self.tool_list_state.select(Some(i));
        }
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.clamp_selection();
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.clamp_selection();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tools().len();
        self.tool_list_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn open_selected(&mut self) {
        if let Some(tool) = self.selected_tool() {
            self.open(tool.kind);
        }
    }

    pub fn open(&mut self, kind: ToolKind) {
        info!(tool = %kind, "Opening tool page.");
        self.screen = Screen::Tool(kind);
        self.form = ToolForm::for_tool(kind);
        self.clear_result();
    }

    /// Leaves the tool page. A run still in flight is abandoned.
    pub fn back(&mut self) {
        self.run_id += 1;
        self.screen = Screen::Dashboard;
        self.clear_result();
    }

    // --- Input routing ---

    /// Routes one key press. Returns the run to spawn when the key submitted the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<(u64, ToolRequest)> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return None;
        }
        if self.show_disclaimer {
            if key.code == KeyCode::Enter {
                self.show_disclaimer = false;
            }
            return None;
        }
        match self.screen {
            Screen::Dashboard => {
                self.handle_dashboard_key(key);
                None
            }
            Screen::Tool(_) => self.handle_tool_key(key),
        }
    }

    /// Pasted text lands in the focused field, only while the form is editable.
    pub fn handle_paste(&mut self, text: &str) {
        if matches!(self.screen, Screen::Tool(_)) && self.state == AppState::Idle {
            self.form.insert(text);
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') if self.filter.is_empty() => self.quit(),
            KeyCode::Char(c) => self.push_filter(c),
            KeyCode::Backspace => self.pop_filter(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Esc => self.clear_filter(),
            _ => {}
        }
    }

    fn handle_tool_key(&mut self, key: KeyEvent) -> Option<(u64, ToolRequest)> {
        if key.code == KeyCode::Esc {
            self.back();
            return None;
        }
        match self.state {
            AppState::Idle => match key.code {
                KeyCode::Tab => self.form.next_field(),
                KeyCode::Left => self.form.cycle(false),
                KeyCode::Right => self.form.cycle(true),
                KeyCode::Backspace => self.form.backspace(),
                KeyCode::Char(c) => self.form.insert(c.encode_utf8(&mut [0; 4])),
                KeyCode::Enter => return self.begin_run(),
                _ => {}
            },
            AppState::Finished => match key.code {
                KeyCode::Char('e') => self.export(),
                KeyCode::Char('n') => self.reset(),
                KeyCode::Char('s') if matches!(self.report, Some(ToolReport::Cipher(_))) => self.swap_cipher(),
                KeyCode::Up => self.scroll_up(),
                KeyCode::Down => self.scroll_down(),
                _ => {}
            },
            AppState::Running => {}
        }
        None
    }

    // --- Tool runs ---

    /// Validates the form and marks a run as started.
    ///
    /// Returns the run id and request to spawn, or `None` when nothing should
    /// run: a run is already in flight or the input was rejected.
    pub fn begin_run(&mut self) -> Option<(u64, ToolRequest)> {
        let Screen::Tool(kind) = self.screen else { return None };
        if self.state == AppState::Running {
            return None;
        }
        match self.form.build_request(kind) {
            Ok(request) => {
                self.run_id += 1;
                self.state = AppState::Running;
                self.notice = Notice::None;
                self.report = None;
                self.report_text.clear();
                self.reset_scroll();
                Some((self.run_id, request))
            }
            Err(e) => {
                warn!(tool = %kind, error = %e, "Input rejected.");
                self.notice = Notice::Error(e.to_string());
                None
            }
        }
    }

    /// Applies a finished run. Results from abandoned or superseded runs are dropped.
    pub fn finish_run(&mut self, (run_id, result): TaskResult) {
        if run_id != self.run_id || self.state != AppState::Running {
            info!(run_id, "Discarding stale result.");
            return;
        }
        match result {
            Ok(report) => {
                if let ToolReport::Ip(info) = &report {
                    self.ip_history.record(info);
                }
                self.notice = Notice::Info(report.headline());
                self.report_text = report::render(&report);
                if matches!(report, ToolReport::Ip(_)) {
                    self.report_text.push_str(&report::render_history(&self.ip_history));
                }
                self.report = Some(report);
                self.state = AppState::Finished;
            }
            Err(e) => {
                self.notice = Notice::Error(e.to_string());
                self.state = AppState::Idle;
            }
        }
    }

    pub fn export(&mut self) {
        let Some(report) = &self.report else { return };
        self.notice = match report::export(report, &self.settings.export_dir()) {
            Ok(path) => Notice::Info(format!("Report saved to {}", path.display())),
            Err(e) => Notice::Error(e.to_string()),
        };
    }

    /// Feeds the cipher output back in with the opposite mode.
    pub fn swap_cipher(&mut self) {
        let Some(ToolReport::Cipher(output)) = &self.report else { return };
        let text = output.text.clone();
        let flipped = output.mode.flipped();
        if let Some(field) = self.form.field_mut("Text") {
            field.value = text;
        }
        if let Some(field) = self.form.field_mut("Mode") {
            field.choice = Mode::iter().position(|m| m == flipped).unwrap_or_default();
        }
        self.clear_result();
    }

    /// Starts over on the same tool page.
    pub fn reset(&mut self) {
        if let Screen::Tool(kind) = self.screen {
            self.form = ToolForm::for_tool(kind);
        }
        self.clear_result();
    }

    fn clear_result(&mut self) {
        self.state = AppState::Idle;
        self.report = None;
        self.report_text.clear();
        self.notice = Notice::None;
        self.reset_scroll();
    }

    // --- Misc ---

    pub fn on_tick(&mut self) {
        if self.state == AppState::Running {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self) {
        let max = self.report_text.lines().count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
