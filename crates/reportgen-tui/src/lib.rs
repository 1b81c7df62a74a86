//! Reportgen TUI - Terminal User Interface
//!
//! A keyboard-driven editor for exam reports with a live preview, AI
//! analysis and export.

pub mod app;
pub mod events;
pub mod form;
pub mod input;
pub mod logs;
pub mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use reportgen_config::{CredentialResolver, ReportgenConfig};
use reportgen_domain::{ReportServices, ViewMode, Workbench};
use reportgen_render::{HeadlessBrowser, Rasterizer};
use reportgen_types::ReportData;

pub use app::App;
pub use logs::{LogBuffer, TuiLogLayer};

/// Terminal type alias for convenience.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Install a panic hook that restores the terminal before an uncaught
/// panic is printed. Panics inside the rendering crash boundary stay quiet.
pub fn install_panic_hook() {
    reportgen_domain::crash::install_panic_hook(|| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
    });
}

/// Configuration for running the TUI.
pub struct TuiConfig {
    /// Merged configuration file layers.
    pub config: ReportgenConfig,
    /// Where the AI credential comes from.
    pub resolver: CredentialResolver,
    /// Report to start from instead of the seed.
    pub initial_data: Option<ReportData>,
    /// Log buffer fed by the caller's [`TuiLogLayer`].
    pub log_buffer: Option<LogBuffer>,
}

impl TuiConfig {
    pub fn new(config: ReportgenConfig, resolver: CredentialResolver) -> Self {
        Self {
            config,
            resolver,
            initial_data: None,
            log_buffer: None,
        }
    }

    pub fn with_initial_data(mut self, data: ReportData) -> Self {
        self.initial_data = Some(data);
        self
    }

    pub fn with_log_buffer(mut self, buffer: LogBuffer) -> Self {
        self.log_buffer = Some(buffer);
        self
    }

    /// Assemble the application from this configuration.
    pub fn build_app(self) -> App {
        let export = self.config.export();
        let ui = self.config.ui();

        let view = ui.start_view.map(ViewMode::from).unwrap_or_default();
        let mut workbench = Workbench::new(self.resolver, view);
        if let Some(data) = self.initial_data {
            workbench = workbench.with_data(data);
        }

        let services = ReportServices::new(None, export.effective_output_dir());
        let rasterizer: Arc<dyn Rasterizer> = Arc::new(
            HeadlessBrowser::new(export.effective_browser()).with_scale(export.effective_scale()),
        );

        App::new(
            workbench,
            services,
            self.config.ai(),
            rasterizer,
            self.log_buffer.unwrap_or_default(),
        )
    }
}

/// Run the TUI application with full configuration.
///
/// Tracing must already be installed by the caller, with a [`TuiLogLayer`]
/// writing into `config.log_buffer` in place of any console output.
pub async fn run_with_config(config: TuiConfig) -> Result<()> {
    install_panic_hook();

    let mut app = config.build_app();
    let mut terminal = init_terminal()?;

    let result = app.run(&mut terminal).await;

    restore_terminal(&mut terminal)?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_config::{CredentialStore, StartView, UiConfig};
    use tempfile::TempDir;

    fn resolver(dir: &TempDir) -> CredentialResolver {
        CredentialResolver::new(CredentialStore::in_dir(dir.path()))
            .with_build_time(None::<String>)
            .with_env(|_| None)
    }

    #[test]
    fn test_build_app_uses_start_view() {
        let dir = TempDir::new().unwrap();
        let config = ReportgenConfig {
            ui: Some(UiConfig {
                start_view: Some(StartView::Preview),
            }),
            ..ReportgenConfig::default()
        };
        let app = TuiConfig::new(config, resolver(&dir)).build_app();
        assert_eq!(app.workbench().view(), ViewMode::Preview);
        assert_eq!(*app.data(), ReportData::seed());
    }

    #[test]
    fn test_build_app_with_initial_data() {
        let dir = TempDir::new().unwrap();
        let data = ReportData {
            student_name: "이하늘".to_string(),
            ..ReportData::seed()
        };
        let app = TuiConfig::new(ReportgenConfig::default(), resolver(&dir))
            .with_initial_data(data)
            .build_app();
        assert_eq!(app.data().student_name, "이하늘");
    }

    #[test]
    fn test_full_frame_renders_on_test_backend() {
        use ratatui::backend::TestBackend;

        let dir = TempDir::new().unwrap();
        let app = TuiConfig::new(ReportgenConfig::default(), resolver(&dir)).build_app();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| ui::render(&app, frame)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Smart Report Gen"));
        // credential prompt is open on first launch
        assert!(screen.contains("Gemini API Key"));
    }
}
