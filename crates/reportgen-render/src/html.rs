//! Self-contained HTML rendering of a [`ReportDocument`].
//!
//! The page has no external assets: styles are inline in a `<style>` block
//! and the radar chart is an inline SVG. All user text is escaped.

use std::f64::consts::PI;
use std::fmt::Write as _;

use reportgen_types::ReportData;

use crate::document::{FOOTER_NOTE, REPORT_SUBTITLE, RadarAxis, RateRow, ReportDocument, headings};

/// Width of the report in CSS pixels. The raster export uses this viewport.
pub const PAGE_WIDTH: u32 = 896;

const STYLE: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { background: #ffffff; font-family: "Pretendard", "Noto Sans KR", "Apple SD Gothic Neo", sans-serif; color: #1e293b; }
.report { width: 896px; margin: 0 auto; background: #ffffff; }
.header { background: linear-gradient(135deg, #334155, #1e293b); color: #fff; padding: 32px; display: flex; justify-content: space-between; align-items: center; }
.header h1 { font-size: 28px; margin-bottom: 8px; }
.header .subtitle { font-size: 18px; opacity: .9; }
.header .score { font-size: 48px; font-weight: 700; text-align: right; }
.header .score span { font-size: 24px; margin-left: 4px; }
.header .student { font-size: 18px; margin-top: 8px; text-align: right; }
.summary { background: #eff6ff; padding: 32px; border-bottom: 2px solid #bfdbfe; }
.summary h2 { color: #1e3a8a; font-size: 20px; margin-bottom: 12px; }
.pre { white-space: pre-line; word-break: keep-all; line-height: 1.7; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; padding: 32px 32px 16px; }
.panel { background: #f8fafc; border: 1px solid #e2e8f0; border-radius: 12px; padding: 24px; }
.panel h3 { font-size: 18px; margin-bottom: 16px; }
.group { font-size: 12px; font-weight: 700; color: #64748b; margin: 12px 0 8px; }
.row { margin-bottom: 14px; }
.row .top { display: flex; justify-content: space-between; font-size: 14px; margin-bottom: 4px; }
.tag { font-weight: 700; padding: 1px 8px; border-radius: 4px; background: #e2e8f0; color: #475569; }
.tag.type { background: #f3e8ff; color: #7e22ce; }
.muted { font-size: 12px; color: #64748b; margin-left: 8px; }
.bar { height: 20px; background: #cbd5e1; border-radius: 10px; overflow: hidden; }
.bar .fill { height: 100%; background: #3b82f6; }
.bar .fill.type { background: #a855f7; }
.bar .fill.unit { background: #10b981; }
.rate { font-weight: 700; color: #2563eb; }
.rate.type { color: #9333ea; }
.note { font-size: 12px; color: #94a3b8; text-align: right; margin-top: 16px; }
.section { padding: 0 32px 32px; }
.card { background: #fff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 24px; }
.card h4, .section h3 { font-size: 18px; margin-bottom: 12px; }
.radar { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; align-items: center; }
.wrong { background: #fef2f2; border: 1px solid #fee2e2; border-radius: 12px; padding: 24px; }
.wrong h3 { color: #7f1d1d; }
table { width: 100%; border-collapse: collapse; font-size: 14px; background: #fff; }
th { text-align: left; font-size: 12px; color: #64748b; background: #fee2e2; padding: 10px 16px; }
td { padding: 10px 16px; border-top: 1px solid #fee2e2; word-break: keep-all; }
td.qn { color: #dc2626; font-weight: 700; white-space: nowrap; }
td.fix { color: #1d4ed8; }
.direction { padding: 32px; border-top: 2px solid #f1f5f9; }
.direction h3 { font-size: 24px; margin-bottom: 24px; }
.lists { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; margin-bottom: 32px; }
.list { background: #f8fafc; border-left: 4px solid #475569; border-radius: 12px; padding: 24px; }
.list.improve { border-left-color: #f87171; }
.list ul { list-style: none; }
.list li { margin-bottom: 8px; word-break: keep-all; }
.list li::before { content: "• "; color: #64748b; }
.parent { background: #1e293b; color: #f1f5f9; border-radius: 12px; padding: 32px; }
.parent h4 { font-size: 20px; margin-bottom: 16px; }
.parent p { color: #cbd5e1; }
.footer { background: #0f172a; color: #94a3b8; padding: 24px; text-align: center; font-size: 14px; }
.footer .small { font-size: 12px; opacity: .7; margin-top: 4px; }
"#;

/// Escape text for HTML.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(32 * 1024),
        }
    }

    fn raw(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    fn text(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(&esc(s));
        self
    }

    /// `<tag class="..">escaped text</tag>`
    fn el(&mut self, tag: &str, class: &str, s: &str) -> &mut Self {
        if class.is_empty() {
            let _ = write!(self.buf, "<{tag}>{}</{tag}>", esc(s));
        } else {
            let _ = write!(self.buf, "<{tag} class=\"{class}\">{}</{tag}>", esc(s));
        }
        self
    }

    fn open_doc(&mut self, title: &str) {
        self.raw("<!DOCTYPE html><html lang=\"ko\"><head><meta charset=\"utf-8\">");
        let _ = write!(
            self.buf,
            "<meta name=\"viewport\" content=\"width={PAGE_WIDTH}\"><title>{}</title>",
            esc(title)
        );
        self.raw("<style>").raw(STYLE).raw("</style></head><body><div class=\"report\">");
    }

    fn close_doc(&mut self) {
        self.raw("</div></body></html>\n");
    }

    fn header(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"header\"><div>")
            .el("h1", "", &doc.exam_title)
            .el("div", "subtitle", REPORT_SUBTITLE)
            .raw("</div><div>");
        let _ = write!(self.buf, "<div class=\"score\">{}<span>점</span></div>", doc.score);
        self.el("div", "student", &doc.student_line())
            .raw("</div></div>");
    }

    fn summary(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"summary\">")
            .el("h2", "", &format!("🏆 {}", headings::SUMMARY))
            .el("p", "pre", &doc.summary)
            .raw("</div>");
    }

    fn rate_rows(&mut self, rows: &[RateRow], variant: &str) {
        for row in rows {
            let tag_class = if variant.is_empty() { "tag".to_string() } else { format!("tag {variant}") };
            self.raw("<div class=\"row\"><div class=\"top\"><div>")
                .el("span", &tag_class, &row.label);
            let _ = write!(
                self.buf,
                "<span class=\"muted\">{} / {} 문제</span></div><span class=\"rate {variant}\">{}%</span></div>",
                row.correct, row.total, row.percent
            );
            let _ = write!(
                self.buf,
                "<div class=\"bar\"><div class=\"fill {variant}\" style=\"width:{}%\"></div></div></div>",
                row.bar_percent()
            );
        }
    }

    fn charts(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"grid\"><div class=\"panel\">")
            .el("h3", "", &format!("🎯 {}", headings::RATES))
            .el("div", "group", headings::DIFFICULTY);
        self.rate_rows(&doc.difficulty_rows, "");
        self.el("div", "group", headings::QUESTION_TYPE);
        self.rate_rows(&doc.question_type_rows, "type");
        self.raw("</div><div class=\"panel\">")
            .el("h3", "", &format!("📊 {}", headings::ASSESSMENT));
        for row in &doc.assessment_rows {
            self.raw("<div class=\"row\"><div class=\"top\">")
                .el("b", "", &row.name);
            let _ = write!(
                self.buf,
                "<span class=\"muted\">{} / {}점</span></div>\
                 <div class=\"bar\"><div class=\"fill unit\" style=\"width:{}%\"></div></div>\
                 <div class=\"muted\">{}%</div></div>",
                row.earned,
                row.max,
                row.bar_percent(),
                row.percent
            );
        }
        self.el("div", "note", headings::ASSESSMENT_NOTE)
            .raw("</div></div>");
    }

    fn difficulty_analysis(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"section\"><div class=\"card\">")
            .el("h4", "", &format!("💡 {}", headings::DIFFICULTY_ANALYSIS))
            .el("p", "pre", &doc.difficulty_analysis)
            .raw("</div></div>");
    }

    fn radar(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"section\"><div class=\"panel\">")
            .el("h3", "", &format!("📈 {}", headings::RADAR))
            .raw("<div class=\"radar\">");
        self.raw(&radar_svg(&doc.radar_axes));
        self.raw("<div class=\"card\">")
            .el("p", "pre", &doc.radar_analysis)
            .raw("</div></div></div></div>");
    }

    fn incorrect_answers(&mut self, doc: &ReportDocument) {
        let Some(answers) = &doc.incorrect_answers else {
            return;
        };
        self.raw("<div class=\"section\"><div class=\"wrong\">")
            .el("h3", "", &format!("✖ {}", headings::INCORRECT))
            .raw("<table><thead><tr>");
        for column in headings::INCORRECT_COLUMNS {
            self.el("th", "", column);
        }
        self.raw("</tr></thead><tbody>");
        for answer in answers {
            self.raw("<tr>")
                .el("td", "qn", &answer.question_number)
                .el("td", "", &answer.topic)
                .el("td", "", &answer.reason)
                .el("td", "fix", &answer.solution)
                .raw("</tr>");
        }
        self.raw("</tbody></table></div></div>");
    }

    fn list(&mut self, class: &str, heading: &str, items: &[String]) {
        let _ = write!(self.buf, "<div class=\"{class}\">");
        self.el("h4", "", heading).raw("<ul>");
        for item in items {
            self.el("li", "", item);
        }
        self.raw("</ul></div>");
    }

    fn direction(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"direction\">")
            .el("h3", "", &format!("📚 {}", headings::DIRECTION))
            .raw("<div class=\"lists\">");
        self.list("list", &format!("✨ {}", headings::STRENGTHS), &doc.strengths);
        self.list(
            "list improve",
            &format!("🎯 {}", headings::WEAKNESSES),
            &doc.weaknesses,
        );
        self.raw("</div><div class=\"parent\">")
            .el("h4", "", &format!("💌 {}", headings::PARENT_MESSAGE))
            .el("p", "pre", &doc.parent_message)
            .raw("</div></div>");
    }

    fn footer(&mut self, doc: &ReportDocument) {
        self.raw("<div class=\"footer\">")
            .el("p", "", &doc.footer)
            .el("p", "small", FOOTER_NOTE)
            .raw("</div>");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Radar chart
// ─────────────────────────────────────────────────────────────────────────────

const RADAR_SIZE: f64 = 300.0;
const RADAR_RADIUS: f64 = 110.0;

/// Point on axis `index` of `count` at `ratio` of the radius.
/// Axis 0 points straight up; the rest follow clockwise.
fn radar_point(index: usize, count: usize, ratio: f64) -> (f64, f64) {
    let center = RADAR_SIZE / 2.0;
    let angle = -PI / 2.0 + 2.0 * PI * index as f64 / count as f64;
    (
        center + RADAR_RADIUS * ratio * angle.cos(),
        center + RADAR_RADIUS * ratio * angle.sin(),
    )
}

fn polygon_points(count: usize, ratio_at: impl Fn(usize) -> f64) -> String {
    (0..count)
        .map(|i| {
            let (x, y) = radar_point(i, count, ratio_at(i));
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inline SVG radar chart. Fewer than three axes draws the grid only.
pub fn radar_svg(axes: &[RadarAxis]) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {RADAR_SIZE} {RADAR_SIZE}\" width=\"{RADAR_SIZE}\" height=\"{RADAR_SIZE}\">"
    );
    let count = axes.len();
    if count >= 3 {
        for ring in [0.25, 0.5, 0.75, 1.0] {
            let _ = write!(
                svg,
                "<polygon points=\"{}\" fill=\"none\" stroke=\"#e2e8f0\"/>",
                polygon_points(count, |_| ring)
            );
        }
        for (i, axis) in axes.iter().enumerate() {
            let (x, y) = radar_point(i, count, 1.0);
            let (lx, ly) = radar_point(i, count, 1.22);
            let _ = write!(
                svg,
                "<line x1=\"{c}\" y1=\"{c}\" x2=\"{x:.1}\" y2=\"{y:.1}\" stroke=\"#e2e8f0\"/>\
                 <text x=\"{lx:.1}\" y=\"{ly:.1}\" font-size=\"12\" fill=\"#475569\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
                esc(&axis.subject),
                c = RADAR_SIZE / 2.0
            );
        }
        let _ = write!(
            svg,
            "<polygon points=\"{}\" fill=\"#3b82f6\" fill-opacity=\"0.6\" stroke=\"#3b82f6\" stroke-width=\"3\"/>",
            polygon_points(count, |i| axes[i].ratio)
        );
    }
    svg.push_str("</svg>");
    svg
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Render a built document as a complete HTML page.
pub fn render_document(doc: &ReportDocument) -> String {
    let mut b = HtmlBuilder::new();
    b.open_doc(&doc.exam_title);
    b.header(doc);
    b.summary(doc);
    b.charts(doc);
    b.difficulty_analysis(doc);
    b.radar(doc);
    b.incorrect_answers(doc);
    b.direction(doc);
    b.footer(doc);
    b.close_doc();
    b.buf
}

/// Render report data as a complete HTML page.
pub fn render_html(data: &ReportData) -> String {
    render_document(&ReportDocument::build(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(esc("<a & 'b'>"), "&lt;a &amp; &#x27;b&#x27;&gt;");
    }

    #[test]
    fn test_seed_page() {
        let html = render_html(&ReportData::seed());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("김단우 학생"));
        assert!(html.contains("86%"));
        assert!(html.contains(headings::INCORRECT));
        assert!(html.contains("<svg"));
        assert!(html.contains("본 리포트는 2025년 12월 10일 시행된 평가를 바탕으로 작성되었습니다."));
    }

    #[test]
    fn test_empty_incorrect_section_omitted() {
        let mut data = ReportData::seed();
        data.incorrect_answers.clear();
        let html = render_html(&data);
        assert!(!html.contains(headings::INCORRECT));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_user_text_escaped() {
        let mut data = ReportData::seed();
        data.student_name = "<script>".to_string();
        let html = render_html(&data);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt; 학생"));
    }

    #[test]
    fn test_radar_needs_three_axes() {
        let doc = ReportDocument::build(&ReportData::default());
        let svg = radar_svg(&doc.radar_axes);
        assert!(!svg.contains("<polygon"));

        let seed = ReportDocument::build(&ReportData::seed());
        // four grid rings plus the data polygon
        assert_eq!(radar_svg(&seed.radar_axes).matches("<polygon").count(), 5);
    }

    #[test]
    fn test_radar_top_axis_points_up() {
        let (x, y) = radar_point(0, 5, 1.0);
        assert!((x - 150.0).abs() < 1e-9);
        assert!((y - 40.0).abs() < 1e-9);
    }
}
