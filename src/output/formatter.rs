//! Output formatters for ATS reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAtsError};
use crate::output::report::{component_rows, ScoreBand, KEYWORD_SAMPLE, MISSING_SAMPLE};
use crate::processing::analyzer::AtsReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter for the requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Resume Score</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        table { border-collapse: collapse; width: 100%; }
        td, th { border-bottom: 1px solid #e9ecef; padding: 8px; text-align: left; }
        .present { color: #28a745; }
        .absent { color: #dc3545; }
        .metadata { font-size: 0.9em; color: #6c757d; border-top: 1px solid #e9ecef; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Resume Score</h1>
            <h2>{{ total_score }} / 100 <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <p>{{ verdict }}</p>
        </div>

        <div class="section">
            <h2>Score Breakdown</h2>
            <table>
                <tr><th>Component</th><th>Score</th><th>Weight</th></tr>
                {% for row in rows %}
                <tr><td>{{ row.label }}</td><td>{{ row.score }}</td><td>{{ row.weight }}</td></tr>
                {% endfor %}
            </table>
            {% if has_semantic %}
            <p><strong>Semantic similarity:</strong> {{ semantic }}</p>
            {% endif %}
        </div>

        <div class="section">
            <h2>Sections</h2>
            <ul>
                {% for section in sections %}
                <li class="{{ section.class }}">{{ section.name }}: {{ section.status }}</li>
                {% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Skills Found ({{ skill_count }})</h2>
            {% if skills.is_empty() %}
            <p>No catalog skills detected.</p>
            {% else %}
            <p>{{ skills.join(", ") }}</p>
            {% endif %}
        </div>

        {% if has_job %}
        <div class="section">
            <h2>Job Description Keywords</h2>
            <p><strong>Matched:</strong> {{ matched_keywords }}</p>
            <p><strong>Missing / recommended:</strong> {{ missing_keywords }}</p>
            <p><strong>Lexical similarity:</strong> {{ lexical_similarity }}</p>
        </div>
        {% endif %}

        <div class="section">
            <h2>Suggestions</h2>
            {% if suggestions.is_empty() %}
            <p>No changes needed.</p>
            {% else %}
            <ol>
                {% for suggestion in suggestions %}
                <li>{{ suggestion }}</li>
                {% endfor %}
            </ol>
            {% endif %}
        </div>

        <div class="metadata">
            <p>Generated {{ generated_at }} in {{ processing_time }} ms | Skills catalog: {{ catalog }}</p>
            <p>Resume: {{ resume_file }}{% if has_job %} | Job: {{ job_file }}{% endif %}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    total_score: u8,
    score_class: &'static str,
    score_label: &'static str,
    verdict: &'static str,
    rows: Vec<HtmlRow>,
    has_semantic: bool,
    semantic: String,
    sections: Vec<HtmlSection>,
    skill_count: usize,
    skills: Vec<String>,
    has_job: bool,
    matched_keywords: String,
    missing_keywords: String,
    lexical_similarity: String,
    suggestions: Vec<String>,
    generated_at: String,
    processing_time: u64,
    catalog: String,
    resume_file: String,
    job_file: String,
}

struct HtmlRow {
    label: &'static str,
    score: String,
    weight: String,
}

struct HtmlSection {
    name: String,
    status: &'static str,
    class: &'static str,
}

fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

fn format_optional_pct(pct: Option<f64>) -> String {
    pct.map(format_pct).unwrap_or_else(|| "n/a".to_string())
}

fn sample(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    let shown = items.iter().take(limit).cloned().collect::<Vec<_>>().join(", ");
    if items.len() > limit {
        format!("{} (+{} more)", shown, items.len() - limit)
    } else {
        shown
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn band_color(band: ScoreBand) -> Color {
        match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let mut output = String::new();
        let band = ScoreBand::from_score(report.total_score);

        output.push_str(&self.format_header("ATS RESUME SCORE"));
        output.push_str(&format!(
            "Score: {}/100 [{}]\n",
            report.total_score,
            self.colorize(band.label(), Self::band_color(band))
        ));
        output.push_str(&format!("{}\n", band.verdict()));

        output.push_str(&self.format_header("Breakdown"));
        for row in component_rows(report) {
            output.push_str(&format!(
                "  {:<22} {:>6}  (weight: {})\n",
                row.label,
                format_pct(row.pct),
                row.weight_label()
            ));
        }
        if let Some(semantic) = report.semantic_similarity_pct {
            output.push_str(&format!("  {:<22} {:>6}  (display only)\n", "Semantic similarity", format_pct(semantic)));
        }

        output.push_str(&self.format_header("Sections"));
        for (kind, present) in report.sections.iter() {
            let mark = if present {
                self.colorize("✓", Color::Green)
            } else {
                self.colorize("✗", Color::Red)
            };
            output.push_str(&format!("  {} {}\n", mark, kind));
        }

        output.push_str(&self.format_header(&format!("Skills Found ({})", report.skills.len())));
        if report.skills.is_empty() {
            output.push_str("  No catalog skills detected\n");
        } else if self.detailed {
            for skill in &report.skills.matches {
                output.push_str(&format!("  • {} (x{}, {:?})\n", skill.skill, skill.count, skill.pass));
            }
        } else {
            let names: Vec<String> = report.skills.matched().iter().map(|s| s.to_string()).collect();
            output.push_str(&format!("  {}\n", names.join(", ")));
        }

        if let Some(comparison) = &report.keyword_comparison {
            output.push_str(&self.format_header("Job Description Keywords"));
            output.push_str(&format!(
                "  Matched {}/{} keywords\n",
                comparison.matched.len(),
                comparison.candidate_count
            ));
            output.push_str(&format!(
                "  Matched: {}\n",
                self.colorize(&sample(&comparison.matched, KEYWORD_SAMPLE), Color::Green)
            ));
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&sample(&comparison.missing, MISSING_SAMPLE), Color::Yellow)
            ));
            output.push_str(&format!(
                "  Lexical similarity: {}\n",
                format_optional_pct(comparison.similarity_pct)
            ));
        }

        if self.detailed {
            let f = &report.formatting;
            output.push_str(&self.format_header("Formatting Signals"));
            output.push_str(&format!("  Email: {}\n", if f.has_email { "yes" } else { "no" }));
            output.push_str(&format!("  Phone: {}\n", if f.has_phone { "yes" } else { "no" }));
            output.push_str(&format!("  Bullets: {}\n", if f.has_bullets { "yes" } else { "no" }));
            match f.average_line_length {
                Some(avg) => output.push_str(&format!(
                    "  Average line length: {:.0} chars (+{})\n",
                    avg, f.line_length_points
                )),
                None => output.push_str("  Average line length: n/a\n"),
            }
            output.push_str(&format!("  Section points: +{}\n", f.section_points));
        }

        output.push_str(&self.format_header("Suggestions"));
        if report.suggestions.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("No changes needed", Color::Green)));
        }
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        if !report.degraded_components.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                self.colorize("Warning:", Color::Yellow),
                format!("partial results, failed components: {}", report.degraded_components.join(", "))
            ));
        }

        output.push_str(&format!(
            "\nProcessed {} words in {}ms | Skills catalog: {} ({} skills)\n",
            report.word_count, report.processing_time_ms, report.catalog_source, report.catalog_size
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let mut output = String::new();
        let band = ScoreBand::from_score(report.total_score);

        output.push_str("# ATS Resume Score\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
            output.push_str(&format!("**Resume:** `{}`", file_name(&report.resume_path)));
            if let Some(job_path) = &report.job_path {
                output.push_str(&format!(" | **Job:** `{}`", file_name(job_path)));
            }
            output.push_str("\n\n");
        }

        output.push_str(&format!("**Score:** {} / 100 ({})\n\n", report.total_score, band.label()));
        output.push_str(&format!("{}\n\n", band.verdict()));

        output.push_str("## Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for row in component_rows(report) {
            output.push_str(&format!("| {} | {} | {} |\n", row.label, format_pct(row.pct), row.weight_label()));
        }
        if let Some(semantic) = report.semantic_similarity_pct {
            output.push_str(&format!("| Semantic similarity | {} | display only |\n", format_pct(semantic)));
        }
        output.push('\n');

        output.push_str("## Sections\n\n");
        for (kind, present) in report.sections.iter() {
            output.push_str(&format!("- [{}] {}\n", if present { "x" } else { " " }, kind));
        }
        output.push('\n');

        output.push_str(&format!("## Skills Found ({})\n\n", report.skills.len()));
        if report.skills.is_empty() {
            output.push_str("_No catalog skills detected._\n\n");
        } else {
            for skill in &report.skills.matches {
                output.push_str(&format!("- {} (x{})\n", skill.skill, skill.count));
            }
            output.push('\n');
        }

        if let Some(comparison) = &report.keyword_comparison {
            output.push_str("## Job Description Keywords\n\n");
            output.push_str(&format!(
                "- **Matched ({}/{}):** {}\n",
                comparison.matched.len(),
                comparison.candidate_count,
                sample(&comparison.matched, KEYWORD_SAMPLE)
            ));
            output.push_str(&format!(
                "- **Missing / recommended:** {}\n",
                sample(&comparison.missing, MISSING_SAMPLE)
            ));
            output.push_str(&format!(
                "- **Lexical similarity:** {}\n\n",
                format_optional_pct(comparison.similarity_pct)
            ));
        }

        output.push_str("## Suggestions\n\n");
        if report.suggestions.is_empty() {
            output.push_str("No changes needed.\n");
        }
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        if !report.degraded_components.is_empty() {
            output.push_str(&format!(
                "\n> Partial results: {} failed.\n",
                report.degraded_components.join(", ")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AtsReport) -> HtmlTemplate {
        let band = ScoreBand::from_score(report.total_score);

        let rows = component_rows(report)
            .into_iter()
            .map(|row| HtmlRow {
                label: row.label,
                score: format_pct(row.pct),
                weight: row.weight_label(),
            })
            .collect();

        let sections = report
            .sections
            .iter()
            .map(|(kind, present)| HtmlSection {
                name: kind.to_string(),
                status: if present { "present" } else { "missing" },
                class: if present { "present" } else { "absent" },
            })
            .collect();

        let (matched_keywords, missing_keywords, lexical_similarity) = match &report.keyword_comparison {
            Some(comparison) => (
                sample(&comparison.matched, KEYWORD_SAMPLE),
                sample(&comparison.missing, MISSING_SAMPLE),
                format_optional_pct(comparison.similarity_pct),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            total_score: report.total_score,
            score_class: band.css_class(),
            score_label: band.label(),
            verdict: band.verdict(),
            rows,
            has_semantic: report.semantic_similarity_pct.is_some(),
            semantic: format_optional_pct(report.semantic_similarity_pct),
            sections,
            skill_count: report.skills.len(),
            skills: report.skills.matched().iter().map(|s| s.to_string()).collect(),
            has_job: report.has_job_description(),
            matched_keywords,
            missing_keywords,
            lexical_similarity,
            suggestions: report.suggestions.clone(),
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.processing_time_ms,
            catalog: report.catalog_source.to_string(),
            resume_file: file_name(&report.resume_path),
            job_file: report.job_path.as_deref().map(file_name).unwrap_or_default(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeAtsError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate_report(&self, report: &AtsReport, format: OutputFormat) -> Result<String> {
        let formatter = self.formatter(format);
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Where `--save` writes: the path itself, or a suggested file name inside
/// it when it names an existing directory
pub fn resolve_save_path(save: &Path, format: OutputFormat, resume_path: &Path) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, &resume_path.to_string_lossy(), true))
    } else {
        save.to_path_buf()
    }
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "resume".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}
