//! Application state and main loop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reportgen_config::AiConfig;
use reportgen_domain::editor::{
    append_element, remove_element, set_element, set_score, set_text,
};
use reportgen_domain::workbench::{NEXT_STUDENT_CONFIRMATION, RESET_CONFIRMATION};
use reportgen_domain::{
    BusyFlag, CrashBoundary, DomainError, ElementKey, Notice, ReportServices, Stepper, Workbench,
    build_bridge,
};
use reportgen_render::{Rasterizer, RenderError, render_html};
use reportgen_types::{ReportData, ReportPatch};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::Tui;
use crate::events::{Event, EventHandler};
use crate::form::{FormCursor, FormRow, form_rows};
use crate::input::InputState;
use crate::logs::LogBuffer;
use crate::ui;

/// Lines moved by PageUp/PageDown.
const PAGE: usize = 10;

/// A destructive action waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Reset,
    NextStudent,
}

impl Confirmation {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Reset => RESET_CONFIRMATION,
            Self::NextStudent => NEXT_STUDENT_CONFIRMATION,
        }
    }
}

/// What a path prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPurpose {
    /// Exam image or PDF for document analysis.
    OpenExam,
    /// Previously exported report data.
    ImportJson,
}

impl PathPurpose {
    pub fn title(self) -> &'static str {
        match self {
            Self::OpenExam => "시험지 파일 경로 (이미지, PDF)",
            Self::ImportJson => "불러올 데이터 파일 경로 (JSON)",
        }
    }
}

/// Input mode determines which component handles keys.
#[derive(Debug, Clone, Default)]
pub enum Mode {
    /// Navigating the form or scrolling the preview.
    #[default]
    Normal,
    /// Editing one form row.
    Edit { row: FormRow, input: InputState },
    /// Entering the AI credential.
    Credential(InputState),
    Confirm(Confirmation),
    Path {
        purpose: PathPurpose,
        input: InputState,
    },
    /// Logs panel has focus.
    Logs,
}

/// Result of a background operation, applied to whatever state is current
/// when it arrives.
#[derive(Debug)]
pub enum TaskOutcome {
    TextAnalysis(reportgen_domain::Result<ReportPatch>),
    DocumentAnalysis(reportgen_domain::Result<ReportPatch>),
    ImageExport(Result<PathBuf, RenderError>),
}

/// Main application state.
pub struct App {
    pub(crate) workbench: Workbench,
    pub(crate) services: ReportServices,
    ai_config: AiConfig,
    rasterizer: Arc<dyn Rasterizer>,
    /// Rendering supervisor; taken out of `self` while drawing.
    pub(crate) boundary: CrashBoundary,
    pub(crate) mode: Mode,
    pub(crate) cursor: FormCursor,
    /// Free-text context sent with document analysis.
    pub(crate) exam_context: String,
    /// Modal message; any key dismisses it.
    pub(crate) notice: Option<Notice>,
    /// Transient status bar message.
    pub(crate) status_message: Option<String>,
    pub(crate) log_buffer: LogBuffer,
    pub(crate) log_scroll: usize,
    pub(crate) show_logs: bool,
    pub(crate) preview_scroll: usize,
    exporting_image: BusyFlag,
    tasks_tx: mpsc::UnboundedSender<TaskOutcome>,
    tasks_rx: mpsc::UnboundedReceiver<TaskOutcome>,
    pub(crate) should_quit: bool,
}

impl App {
    /// Create the application. Builds the AI bridge when a credential is
    /// already available; otherwise opens the credential prompt.
    pub fn new(
        workbench: Workbench,
        services: ReportServices,
        ai_config: AiConfig,
        rasterizer: Arc<dyn Rasterizer>,
        log_buffer: LogBuffer,
    ) -> Self {
        let (tasks_tx, tasks_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            workbench,
            services,
            ai_config,
            rasterizer,
            boundary: CrashBoundary::new(),
            mode: Mode::Normal,
            cursor: FormCursor::default(),
            exam_context: String::new(),
            notice: None,
            status_message: None,
            log_buffer,
            log_scroll: 0,
            show_logs: false,
            preview_scroll: 0,
            exporting_image: BusyFlag::new(),
            tasks_tx,
            tasks_rx,
            should_quit: false,
        };
        app.rebuild_bridge();
        if app.workbench.needs_credential() {
            app.mode = Mode::Credential(InputState::new().masked());
        }
        app
    }

    pub fn data(&self) -> &ReportData {
        self.workbench.data()
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    pub fn services(&self) -> &ReportServices {
        &self.services
    }

    pub fn is_generating(&self) -> bool {
        self.services.analysis().is_generating()
    }

    pub fn is_exporting_image(&self) -> bool {
        self.exporting_image.is_busy()
    }

    /// Form rows for the current report.
    pub fn rows(&self) -> Vec<FormRow> {
        form_rows(self.workbench.data())
    }

    /// Run the main application loop.
    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventHandler::new();

        while !self.should_quit {
            self.draw(terminal)?;

            tokio::select! {
                event = events.next() => {
                    match event? {
                        Event::Key(key) => self.handle_key(key),
                        Event::Paste(text) => self.handle_paste(&text),
                        Event::Tick | Event::Resize(_, _) => {}
                    }
                }
                Some(outcome) = self.tasks_rx.recv() => {
                    self.handle_outcome(outcome);
                }
            }
        }

        Ok(())
    }

    /// Draw one frame inside the crash boundary.
    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        let rows = self.rows();
        self.cursor.clamp(&rows);

        let mut boundary = std::mem::take(&mut self.boundary);
        let app: &App = self;
        terminal.draw(|frame| {
            if boundary.guard(|| ui::render(app, frame)).is_none() {
                ui::render_crash(boundary.fault(), frame);
            }
        })?;
        self.boundary = boundary;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Key handling
    // ─────────────────────────────────────────────────────────────────────

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.boundary.is_tripped() {
            if key.code == KeyCode::Enter {
                self.recover_from_crash();
            }
            return;
        }

        if self.notice.take().is_some() {
            return;
        }

        match std::mem::take(&mut self.mode) {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Edit { row, input } => self.handle_edit_key(key, row, input),
            Mode::Credential(input) => self.handle_credential_key(key, input),
            Mode::Confirm(confirmation) => self.handle_confirm_key(key, confirmation),
            Mode::Path { purpose, input } => self.handle_path_key(key, purpose, input),
            Mode::Logs => self.handle_logs_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('g') => self.start_text_analysis(),
                KeyCode::Char('o') => self.open_path_prompt(PathPurpose::OpenExam),
                KeyCode::Char('t') => self.edit_row(FormRow::ExamContext),
                KeyCode::Char('s') => self.export_json(),
                KeyCode::Char('i') => self.open_path_prompt(PathPurpose::ImportJson),
                KeyCode::Char('p') => self.start_image_export(),
                KeyCode::Char('n') => self.mode = Mode::Confirm(Confirmation::NextStudent),
                KeyCode::Char('r') => self.mode = Mode::Confirm(Confirmation::Reset),
                KeyCode::Char('l') => {
                    self.show_logs = true;
                    self.mode = Mode::Logs;
                }
                KeyCode::Char('k') => self.mode = Mode::Credential(InputState::new().masked()),
                _ => {}
            }
            return;
        }

        if key.code == KeyCode::Tab {
            self.workbench.toggle_view();
            self.status_message = Some(self.workbench.view().label().to_string());
            return;
        }

        if matches!(self.workbench.view(), reportgen_domain::ViewMode::Preview) {
            self.scroll_preview(key.code);
            return;
        }

        let rows = self.rows();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(&rows),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(&rows),
            KeyCode::Home => self.cursor.first(&rows),
            KeyCode::PageUp | KeyCode::PageDown => self.scroll_preview(key.code),
            KeyCode::Enter => {
                if let Some(row) = self.cursor.current(&rows) {
                    self.activate(row);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.step_current(&rows, true),
            KeyCode::Char('-') => self.step_current(&rows, false),
            KeyCode::Char('a') => {
                if let Some((list, _)) = self.cursor.current(&rows).and_then(|r| r.list_position())
                {
                    self.append(list);
                }
            }
            KeyCode::Char('d') => {
                if let Some((list, Some(index))) =
                    self.cursor.current(&rows).and_then(|r| r.list_position())
                {
                    self.remove(list, index);
                }
            }
            _ => {}
        }
    }

    fn scroll_preview(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1)
            }
            KeyCode::Down | KeyCode::Char('j') => self.preview_scroll += 1,
            KeyCode::PageUp => self.preview_scroll = self.preview_scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.preview_scroll += PAGE,
            KeyCode::Home => self.preview_scroll = 0,
            _ => {}
        }
    }

    /// Enter on a row.
    fn activate(&mut self, row: FormRow) {
        match row {
            FormRow::Heading(_) => {}
            FormRow::Upload => self.open_path_prompt(PathPurpose::OpenExam),
            FormRow::Append(list) => self.append(list),
            _ => self.edit_row(row),
        }
    }

    fn edit_row(&mut self, row: FormRow) {
        let current = row
            .value(self.workbench.data(), &self.exam_context)
            .unwrap_or_default();
        let rows = self.rows();
        self.cursor.select(&rows, row);
        self.mode = Mode::Edit {
            row,
            input: InputState::with_text(&current).multiline(row.is_multiline()),
        };
    }

    fn handle_edit_key(&mut self, key: KeyEvent, row: FormRow, mut input: InputState) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return,
            // Ctrl+S commits multi-line text; plain Enter adds a line there.
            KeyCode::Char('s') if ctrl => {
                self.commit_edit(row, input.submit());
                return;
            }
            KeyCode::Enter if input.is_multiline() && !ctrl => input.insert_newline(),
            KeyCode::Enter => {
                self.commit_edit(row, input.submit());
                return;
            }
            KeyCode::Char(c) if !ctrl => input.insert_char(c),
            KeyCode::Backspace => input.delete_char_before(),
            KeyCode::Delete => input.delete_char_at(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_to_line_start(),
            KeyCode::End => input.move_to_line_end(),
            _ => {}
        }
        self.mode = Mode::Edit { row, input };
    }

    /// Write edited text back through the editor operations.
    pub(crate) fn commit_edit(&mut self, row: FormRow, text: String) {
        let outcome = match row {
            FormRow::ExamContext => {
                self.exam_context = text;
                Ok(())
            }
            FormRow::Text(field) => {
                self.workbench.apply(|d| set_text(d, field, text));
                Ok(())
            }
            FormRow::Score => {
                let score = Stepper::default().enter(&text);
                self.workbench.apply(|d| set_score(d, score));
                Ok(())
            }
            FormRow::Element { list, index, key } => match row.stepper(self.workbench.data()) {
                Some(stepper) => {
                    let value = stepper.enter(&text);
                    self.workbench
                        .try_apply(|d| set_element(d, list, index, key, value))
                }
                None => self
                    .workbench
                    .try_apply(|d| set_element(d, list, index, key, text)),
            },
            FormRow::Heading(_) | FormRow::Upload | FormRow::Append(_) => Ok(()),
        };
        if let Err(e) = outcome {
            warn!(error = %e, ?row, "edit rejected");
        }
    }

    /// `+`/`-` on a numeric row.
    fn step_current(&mut self, rows: &[FormRow], up: bool) {
        let Some(row) = self.cursor.current(rows) else {
            return;
        };
        let data = self.workbench.data();
        let (Some(stepper), Some(current)) = (row.stepper(data), row.value(data, "")) else {
            return;
        };
        let current = current.parse::<u32>().unwrap_or(0);
        let next = if up {
            stepper.increment(current)
        } else {
            stepper.decrement(current)
        };
        self.commit_edit(row, next.to_string());
    }

    fn append(&mut self, list: reportgen_domain::ListField) {
        if !list.is_resizable() {
            return;
        }
        match self.workbench.try_apply(|d| append_element(d, list)) {
            Ok(()) => {
                let index = list.len(self.workbench.data()).saturating_sub(1);
                let rows = self.rows();
                if let Some(first) = rows.iter().copied().find(|r| {
                    matches!(r, FormRow::Element { list: l, index: i, .. } if *l == list && *i == index)
                }) {
                    self.cursor.select(&rows, first);
                }
            }
            Err(e) => warn!(error = %e, ?list, "append rejected"),
        }
    }

    fn remove(&mut self, list: reportgen_domain::ListField, index: usize) {
        if !list.is_resizable() {
            return;
        }
        if let Err(e) = self.workbench.try_apply(|d| remove_element(d, list, index)) {
            warn!(error = %e, ?list, index, "remove rejected");
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, confirmation: Confirmation) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match confirmation {
                    Confirmation::Reset => {
                        self.workbench.reset();
                        self.exam_context.clear();
                    }
                    Confirmation::NextStudent => self.workbench.next_student(),
                }
                self.cursor = FormCursor::default();
                self.preview_scroll = 0;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
            _ => self.mode = Mode::Confirm(confirmation),
        }
    }

    fn handle_logs_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.show_logs = false;
                return;
            }
            KeyCode::Up => self.log_scroll = self.log_scroll.saturating_sub(1),
            KeyCode::Down => self.log_scroll += 1,
            KeyCode::PageUp => self.log_scroll = self.log_scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.log_scroll += PAGE,
            KeyCode::Home => self.log_scroll = 0,
            KeyCode::End => self.log_scroll = self.log_buffer.len(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.log_buffer.clear();
                self.log_scroll = 0;
            }
            _ => {}
        }
        self.mode = Mode::Logs;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Prompts
    // ─────────────────────────────────────────────────────────────────────

    fn open_path_prompt(&mut self, purpose: PathPurpose) {
        if purpose == PathPurpose::OpenExam && self.services.analysis().upload().is_busy() {
            return;
        }
        self.mode = Mode::Path {
            purpose,
            input: InputState::new(),
        };
    }

    fn handle_path_key(&mut self, key: KeyEvent, purpose: PathPurpose, mut input: InputState) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                let text = input.submit();
                let path = clean_path(&text);
                if path.as_os_str().is_empty() {
                    return;
                }
                match purpose {
                    PathPurpose::OpenExam => self.start_document_analysis(path),
                    PathPurpose::ImportJson => self.import_json(&path),
                }
                return;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.insert_char(c)
            }
            KeyCode::Backspace => input.delete_char_before(),
            KeyCode::Delete => input.delete_char_at(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_to_line_start(),
            KeyCode::End => input.move_to_line_end(),
            _ => {}
        }
        self.mode = Mode::Path { purpose, input };
    }

    fn handle_credential_key(&mut self, key: KeyEvent, mut input: InputState) {
        match key.code {
            // Dismissable: AI actions re-open the prompt.
            KeyCode::Esc => return,
            KeyCode::Enter => {
                let value = input.submit();
                match self.workbench.submit_credential(&value) {
                    Ok(_) => {
                        self.rebuild_bridge();
                        self.status_message = Some("API Key가 저장되었습니다.".to_string());
                        return;
                    }
                    Err(e) => {
                        warn!(error = %e, "credential not saved");
                        self.status_message = Some("API Key를 입력해주세요.".to_string());
                    }
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.insert_char(c)
            }
            KeyCode::Backspace => input.delete_char_before(),
            KeyCode::Delete => input.delete_char_at(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            _ => {}
        }
        self.mode = Mode::Credential(input);
    }

    /// Paste goes to the active input; in normal mode a pasted path is a
    /// dropped exam file.
    pub(crate) fn handle_paste(&mut self, text: &str) {
        if self.boundary.is_tripped() {
            return;
        }
        match &mut self.mode {
            Mode::Edit { input, .. } | Mode::Credential(input) | Mode::Path { input, .. } => {
                input.insert_str(text);
            }
            Mode::Normal => {
                let path = clean_path(text);
                let upload = self.services.analysis().upload();
                if upload.is_busy() {
                    return;
                }
                upload.drag_enter();
                if path.as_os_str().is_empty() {
                    upload.drag_leave();
                    return;
                }
                self.start_document_analysis(path);
            }
            Mode::Confirm(_) | Mode::Logs => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Swap the bridge to match the current credential.
    fn rebuild_bridge(&mut self) {
        let bridge = match self.workbench.credential() {
            Some(credential) => match build_bridge(credential, &self.ai_config) {
                Ok(bridge) => Some(bridge),
                Err(e) => {
                    error!(error = %e, "failed to build AI bridge");
                    None
                }
            },
            None => None,
        };
        self.services.analysis().set_bridge(bridge);
    }

    /// True when an AI call can go out; otherwise opens the prompt.
    fn ensure_bridge(&mut self) -> bool {
        if self.services.analysis().has_bridge() {
            return true;
        }
        self.mode = Mode::Credential(InputState::new().masked());
        false
    }

    pub(crate) fn start_text_analysis(&mut self) {
        if self.is_generating() || !self.ensure_bridge() {
            return;
        }
        let services = self.services.clone();
        let data = self.workbench.data().clone();
        let tx = self.tasks_tx.clone();
        tokio::spawn(async move {
            let outcome = services.analysis().generate(&data).await;
            let _ = tx.send(TaskOutcome::TextAnalysis(outcome));
        });
    }

    pub(crate) fn start_document_analysis(&mut self, path: PathBuf) {
        if self.services.analysis().upload().is_busy() {
            return;
        }
        if !self.ensure_bridge() {
            self.services.analysis().upload().drag_leave();
            return;
        }
        let services = self.services.clone();
        let context = self.exam_context.clone();
        let tx = self.tasks_tx.clone();
        tokio::spawn(async move {
            let outcome = services.analysis().analyze_file(&path, &context).await;
            let _ = tx.send(TaskOutcome::DocumentAnalysis(outcome));
        });
    }

    fn export_json(&mut self) {
        match self.services.transfer().export(self.workbench.data()) {
            Ok(path) => {
                self.notice = Some(Notice::Info(format!("저장되었습니다: {}", path.display())));
            }
            Err(e) => {
                error!(error = %e, "JSON export failed");
                self.notice = Some(Notice::ExportFailed);
            }
        }
    }

    fn import_json(&mut self, path: &Path) {
        match self.services.transfer().import(path) {
            Ok(data) => {
                self.workbench.replace(data);
                self.cursor = FormCursor::default();
                self.status_message = Some("데이터를 불러왔습니다.".to_string());
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "import failed");
                self.notice = Some(Notice::InvalidImport);
            }
        }
    }

    pub(crate) fn start_image_export(&mut self) {
        let Some(guard) = self.exporting_image.try_acquire() else {
            return;
        };
        let html = render_html(self.workbench.data());
        let output = self.services.transfer().image_path(self.workbench.data());
        let rasterizer = Arc::clone(&self.rasterizer);
        let tx = self.tasks_tx.clone();
        tokio::spawn(async move {
            let _guard = guard;
            let outcome = rasterizer.rasterize(&html, &output).await.map(|()| output);
            let _ = tx.send(TaskOutcome::ImageExport(outcome));
        });
    }

    /// Merge a finished background operation into the latest state.
    pub(crate) fn handle_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::TextAnalysis(Ok(patch)) => {
                self.workbench.apply_text_analysis(&patch);
                info!("text analysis applied");
            }
            TaskOutcome::TextAnalysis(Err(e)) => {
                self.report_failure(&e, "text analysis failed", DomainError::analysis_notice)
            }
            TaskOutcome::DocumentAnalysis(Ok(patch)) => {
                self.workbench.apply_document_analysis(&patch);
                info!("document analysis applied");
            }
            TaskOutcome::DocumentAnalysis(Err(e)) => {
                self.report_failure(&e, "document analysis failed", DomainError::document_notice)
            }
            TaskOutcome::ImageExport(Ok(path)) => {
                info!(path = %path.display(), "report image saved");
                self.notice = Some(Notice::Info(format!("저장되었습니다: {}", path.display())));
            }
            TaskOutcome::ImageExport(Err(e)) => {
                error!(error = %e, "image export failed");
                self.notice = Some(Notice::ImageExportFailed);
            }
        }
    }

    fn report_failure(
        &mut self,
        e: &DomainError,
        what: &'static str,
        notice: fn(&DomainError) -> Option<Notice>,
    ) {
        if e.is_busy() {
            return;
        }
        error!(error = %e, "{what}");
        self.notice = notice(e);
    }

    /// The crash screen's single action.
    pub(crate) fn recover_from_crash(&mut self) {
        self.workbench.clear_local_state();
        self.rebuild_bridge();
        self.mode = if self.workbench.needs_credential() {
            Mode::Credential(InputState::new().masked())
        } else {
            Mode::Normal
        };
        self.cursor = FormCursor::default();
        self.exam_context.clear();
        self.notice = None;
        self.status_message = None;
        self.preview_scroll = 0;
        self.boundary.recover();
    }
}

/// Trim whitespace and the quotes some terminals add around dropped paths.
fn clean_path(text: &str) -> PathBuf {
    let trimmed = text.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    PathBuf::from(unquoted.replace("\\ ", " "))
}
