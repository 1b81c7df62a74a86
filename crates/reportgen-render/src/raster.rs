//! PNG export through a headless browser.
//!
//! The page is written to a temporary directory and rasterized in two
//! browser runs: a `--dump-dom` run reads back the laid-out page height,
//! then a `--screenshot` run captures exactly that height at the
//! configured device scale factor.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{RenderError, Result};
use crate::html::PAGE_WIDTH;

/// Default browser executable.
pub const DEFAULT_BROWSER: &str = "chromium";

/// Default device scale factor.
pub const DEFAULT_SCALE: u32 = 2;

/// Viewport height for the measuring run. Kept small so the document's
/// scroll height is the content height, not the window height.
const MEASURE_VIEWPORT_HEIGHT: u32 = 100;

/// Capture height when the measuring run yields nothing usable.
pub const FALLBACK_PAGE_HEIGHT: u32 = 3200;

/// Upper bound on the capture height, in CSS pixels.
pub const MAX_PAGE_HEIGHT: u32 = 16_384;

/// Attribute the height script stores its result in.
const HEIGHT_ATTR: &str = "data-report-height";

/// Script appended to the page: records the laid-out height on `<html>`.
const HEIGHT_SCRIPT: &str = "<script>document.documentElement.setAttribute('data-report-height',String(Math.ceil(document.documentElement.scrollHeight)));</script>";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Turns an HTML page into a PNG file.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Rasterize `html` and write the image to `output`.
    async fn rasterize(&self, html: &str, output: &Path) -> Result<()>;
}

/// `file://` URL for a page on disk, percent-encoded.
pub fn page_url(path: &Path) -> Result<Url> {
    let path = absolute(path);
    Url::from_file_path(&path).map_err(|()| RenderError::PagePath(path.display().to_string()))
}

/// `html` with the height script inserted before `</body>`.
pub fn with_height_marker(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{HEIGHT_SCRIPT}{}", &html[..at], &html[at..]),
        None => format!("{html}{HEIGHT_SCRIPT}"),
    }
}

/// Page height recorded in a dumped DOM, clamped to `1..=MAX_PAGE_HEIGHT`.
pub fn parse_page_height(dom: &str) -> Option<u32> {
    let marker = format!("{HEIGHT_ATTR}=\"");
    let start = dom.find(&marker)? + marker.len();
    let digits: String = dom[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let height: u64 = digits.parse().ok()?;
    let height = u32::try_from(height).unwrap_or(MAX_PAGE_HEIGHT);
    (height > 0).then(|| height.min(MAX_PAGE_HEIGHT))
}

/// [`Rasterizer`] backed by a headless Chromium-family browser.
#[derive(Debug, Clone)]
pub struct HeadlessBrowser {
    command: String,
    scale: u32,
    timeout: Duration,
}

impl Default for HeadlessBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_BROWSER)
    }
}

impl HeadlessBrowser {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            scale: DEFAULT_SCALE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Device scale factor, at least 1.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn common_args() -> Vec<String> {
        vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            "--hide-scrollbars".to_string(),
            "--no-first-run".to_string(),
        ]
    }

    /// Arguments for the run that prints the laid-out DOM.
    pub fn measure_args(&self, page: &Url) -> Vec<String> {
        let mut args = Self::common_args();
        args.extend([
            format!("--window-size={PAGE_WIDTH},{MEASURE_VIEWPORT_HEIGHT}"),
            "--dump-dom".to_string(),
            page.to_string(),
        ]);
        args
    }

    /// Arguments for screenshotting `page` into `output`, `height` CSS
    /// pixels tall.
    pub fn args(&self, page: &Url, output: &Path, height: u32) -> Vec<String> {
        let mut args = Self::common_args();
        args.extend([
            format!("--force-device-scale-factor={}", self.scale),
            format!("--window-size={PAGE_WIDTH},{}", height.clamp(1, MAX_PAGE_HEIGHT)),
            format!("--screenshot={}", output.display()),
            page.to_string(),
        ]);
        args
    }

    /// Run the browser once, bounded by the timeout.
    async fn run(&self, args: Vec<String>) -> Result<Output> {
        let child = tokio::process::Command::new(&self.command)
            .args(args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::BrowserSpawn {
                command: self.command.clone(),
                source: e,
            })?;

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(RenderError::Io(e)),
            Err(_) => Err(RenderError::Timeout(self.timeout.as_secs())),
        }
    }

    /// Laid-out height of `page`. Only a browser that cannot be started
    /// is an error; anything else falls back to [`FALLBACK_PAGE_HEIGHT`].
    async fn measure(&self, page: &Url) -> Result<u32> {
        let result = match self.run(self.measure_args(page)).await {
            Ok(result) => result,
            Err(e @ RenderError::BrowserSpawn { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "page height unavailable, using fallback");
                return Ok(FALLBACK_PAGE_HEIGHT);
            }
        };
        let dom = String::from_utf8_lossy(&result.stdout);
        match parse_page_height(&dom).filter(|_| result.status.success()) {
            Some(height) => Ok(height),
            None => {
                tracing::warn!(
                    code = ?result.status.code(),
                    "page height missing from DOM dump, using fallback"
                );
                Ok(FALLBACK_PAGE_HEIGHT)
            }
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[async_trait]
impl Rasterizer for HeadlessBrowser {
    async fn rasterize(&self, html: &str, output: &Path) -> Result<()> {
        let workdir = tempfile::tempdir().map_err(RenderError::Io)?;
        let page = workdir.path().join("report.html");
        tokio::fs::write(&page, with_height_marker(html)).await?;
        let url = page_url(&page)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let output = absolute(output);

        let height = self.measure(&url).await?;
        tracing::debug!(
            browser = %self.command,
            scale = self.scale,
            height,
            output = %output.display(),
            "rasterizing report"
        );

        let result = self.run(self.args(&url, &output, height)).await?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!(browser = %self.command, stderr = %stderr.trim(), "browser stderr");
        }

        if !result.status.success() {
            return Err(RenderError::BrowserFailed {
                code: result.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }
        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(RenderError::NoImage(output.display().to_string()));
        }

        tracing::info!(output = %output.display(), height, "report image written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        page_url(Path::new(path)).unwrap()
    }

    #[test]
    fn test_args() {
        let browser = HeadlessBrowser::new("chromium").with_scale(2);
        let args = browser.args(&url("/tmp/r/report.html"), Path::new("/out/a.png"), 1480);
        assert!(args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--force-device-scale-factor=2".to_string()));
        assert!(args.contains(&format!("--window-size={PAGE_WIDTH},1480")));
        assert!(args.contains(&"--screenshot=/out/a.png".to_string()));
        assert_eq!(args.last().unwrap(), "file:///tmp/r/report.html");
    }

    #[test]
    fn test_capture_height_follows_measurement() {
        let browser = HeadlessBrowser::default();
        let page = url("/p.html");
        let dom = r#"<html lang="ko" data-report-height="2231"><head></head><body></body></html>"#;
        let height = parse_page_height(dom).unwrap();
        assert_eq!(height, 2231);
        let args = browser.args(&page, Path::new("/o.png"), height);
        assert!(args.contains(&format!("--window-size={PAGE_WIDTH},2231")));

        let args = browser.args(&page, Path::new("/o.png"), u32::MAX);
        assert!(args.contains(&format!("--window-size={PAGE_WIDTH},{MAX_PAGE_HEIGHT}")));
    }

    #[test]
    fn test_parse_page_height() {
        assert_eq!(parse_page_height("<html></html>"), None);
        assert_eq!(parse_page_height(r#"<html data-report-height="0">"#), None);
        assert_eq!(parse_page_height(r#"<html data-report-height="">"#), None);
        assert_eq!(
            parse_page_height(r#"<html data-report-height="99999999999">"#),
            Some(MAX_PAGE_HEIGHT)
        );
    }

    #[test]
    fn test_measure_args() {
        let browser = HeadlessBrowser::default();
        let args = browser.measure_args(&url("/p.html"));
        assert!(args.contains(&"--dump-dom".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--screenshot")));
        assert_eq!(args.last().unwrap(), "file:///p.html");
    }

    #[test]
    fn test_height_marker_inserted_before_body_end() {
        let html = with_height_marker("<html><body><p>x</p></body></html>");
        assert!(html.contains(HEIGHT_ATTR));
        assert!(html.ends_with("</script></body></html>"));

        let bare = with_height_marker("<p>x</p>");
        assert!(bare.starts_with("<p>x</p><script>"));
    }

    #[test]
    fn test_page_url_percent_encodes() {
        let page = url("/tmp/my reports/100%#1.html");
        assert_eq!(page.as_str(), "file:///tmp/my%20reports/100%25%231.html");
        assert_eq!(page.to_file_path().unwrap(), Path::new("/tmp/my reports/100%#1.html"));
    }

    #[test]
    fn test_scale_floor() {
        let browser = HeadlessBrowser::default().with_scale(0);
        let args = browser.args(&url("/p.html"), Path::new("/o.png"), 100);
        assert!(args.contains(&"--force-device-scale-factor=1".to_string()));
        assert_eq!(browser.command(), DEFAULT_BROWSER);
    }

    #[tokio::test]
    async fn test_missing_browser_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let browser = HeadlessBrowser::new("reportgen-no-such-browser-binary");
        let err = browser
            .rasterize("<html></html>", &dir.path().join("x.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::BrowserSpawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_browser_reports_exit() {
        let dir = tempfile::tempdir().unwrap();
        let browser = HeadlessBrowser::new("false");
        let err = browser
            .rasterize("<html></html>", &dir.path().join("x.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::BrowserFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_browser_without_output_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // exits 0 but writes nothing
        let browser = HeadlessBrowser::new("true");
        let err = browser
            .rasterize("<html></html>", &dir.path().join("x.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::NoImage(_)));
    }
}
