//! Output formatters for console, JSON, Markdown and HTML reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::presentation::MatchFeedback;
use crate::output::report::MatchReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a match report
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
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

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-low { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .matching li { color: #1e7e34; }
        .missing li { color: #b8860b; }
        .footer { margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Match Report</h1>
            <p>Similarity Score <span class="score-badge {{ score_class }}">{{ score_percentage }}</span></p>
            <p><strong>{{ feedback_message }}</strong></p>
        </div>
        {% if has_matching %}
        <div class="section matching">
            <h2>Matching skills and keywords</h2>
            <ul>
            {% for term in matching_terms %}
                <li>{{ term }}</li>
            {% endfor %}
            </ul>
        </div>
        {% endif %}
        {% if has_missing %}
        <div class="section missing">
            <h2>Consider adding these skills to your resume</h2>
            <ul>
            {% for term in missing_terms %}
                <li>{{ term }}</li>
            {% endfor %}
            </ul>
        </div>
        {% endif %}
        <div class="footer">
            <p>Generated {{ generated_at }} in {{ processing_time }}ms by resume-matcher v{{ version }}</p>
            <p><strong>Embeddings:</strong> {{ embedding_model }}</p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate {
    include_styles: bool,
    score_percentage: String,
    score_class: &'static str,
    feedback_message: String,
    has_matching: bool,
    matching_terms: Vec<String>,
    has_missing: bool,
    missing_terms: Vec<String>,
    generated_at: String,
    processing_time: u64,
    version: String,
    embedding_model: String,
    resume_file: String,
    job_source: String,
}

fn feedback_color(feedback: MatchFeedback) -> Color {
    match feedback {
        MatchFeedback::Excellent => Color::Green,
        MatchFeedback::Good => Color::BrightGreen,
        MatchFeedback::Fair => Color::Yellow,
        MatchFeedback::Low => Color::Red,
    }
}

fn generated_at(report: &MatchReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn file_label(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
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
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n{} {}\n", "█", title)
        }
    }

    fn format_terms(&self, title: &str, terms: &[&String], color: Color) -> String {
        let mut output = self.format_header(title);
        for term in terms {
            output.push_str(&format!("  • {}\n", self.colorize(term, color)));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS"));
        let score = if self.use_colors {
            report
                .score_percentage
                .color(feedback_color(report.feedback))
                .bold()
                .to_string()
        } else {
            report.score_percentage.clone()
        };
        output.push_str(&format!("Similarity Score: {}\n", score));
        output.push_str(&format!(
            "{}\n",
            self.colorize(&report.feedback_message, Color::Cyan)
        ));

        if self.detailed {
            let matching: Vec<&String> = report.result.matching_terms.iter().collect();
            let missing: Vec<&String> = report.result.missing_terms.iter().collect();
            if !matching.is_empty() {
                output.push_str(&self.format_terms(
                    &format!("Matching skills and keywords ({})", matching.len()),
                    &matching,
                    Color::Green,
                ));
            }
            if !missing.is_empty() {
                output.push_str(&self.format_terms(
                    &format!("Consider adding these skills ({})", missing.len()),
                    &missing,
                    Color::Yellow,
                ));
            }

            output.push_str(&self.format_header("Details"));
            output.push_str(&format!(
                "Generated: {} | Processing time: {}ms\n",
                generated_at(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!("Embeddings: {}\n", report.metadata.embedding_model));
            output.push_str(&format!(
                "Resume: {} | Job: {}\n",
                file_label(&report.metadata.resume_file),
                report.metadata.job_source
            ));
        } else if !report.explanation.is_empty() {
            output.push_str(&self.format_header("Analysis"));
            output.push_str(&report.explanation);
            output.push('\n');
        }

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
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
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
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                generated_at(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}` | **Embeddings:** `{}`\n\n",
                file_label(&report.metadata.resume_file),
                report.metadata.job_source,
                report.metadata.embedding_model
            ));
        }

        output.push_str(&format!(
            "**Similarity Score:** {} ({})\n\n",
            report.score_percentage,
            report.feedback.label()
        ));
        output.push_str(&format!("> {}\n\n", report.feedback_message));

        if !report.explanation.is_empty() {
            output.push_str("## Analysis\n\n");
            output.push_str(&report.explanation);
            output.push('\n');
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

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let score_class = match report.feedback {
            MatchFeedback::Excellent => "score-excellent",
            MatchFeedback::Good => "score-good",
            MatchFeedback::Fair => "score-fair",
            MatchFeedback::Low => "score-low",
        };
        let matching_terms: Vec<String> = report.result.matching_terms.iter().cloned().collect();
        let missing_terms: Vec<String> = report.result.missing_terms.iter().cloned().collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            score_percentage: report.score_percentage.clone(),
            score_class,
            feedback_message: report.feedback_message.clone(),
            has_matching: !matching_terms.is_empty(),
            matching_terms,
            has_missing: !missing_terms.is_empty(),
            missing_terms,
            generated_at: generated_at(report),
            processing_time: report.metadata.processing_time_ms,
            version: report.metadata.matcher_version.clone(),
            embedding_model: report.metadata.embedding_model.clone(),
            resume_file: file_label(&report.metadata.resume_file),
            job_source: report.metadata.job_source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeMatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

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

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::document::{KeywordSet, MatchResult};
    use tempfile::TempDir;

    fn report(score: f32, matching: &[&str], missing: &[&str]) -> MatchReport {
        let to_set = |terms: &[&str]| -> KeywordSet { terms.iter().map(|t| t.to_string()).collect() };
        MatchReport::new(
            MatchResult {
                similarity_score: score,
                matching_terms: to_set(matching),
                missing_terms: to_set(missing),
            },
            ReportMetadata::new("/tmp/jane_resume.pdf", "job.txt", "potion-base-8M"),
        )
    }

    #[test]
    fn test_console_plain_output() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter
            .format_report(&report(0.823, &["aws", "python"], &["docker"]))
            .unwrap();

        assert!(output.contains("Similarity Score: 82.3%"));
        assert!(output.contains("Excellent Match!"));
        assert!(output.contains("Matching skills and keywords:\n- aws\n- python"));
        assert!(output.contains("- docker"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_detailed_output_lists_metadata() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter
            .format_report(&report(0.5, &["rust"], &[]))
            .unwrap();

        assert!(output.contains("Matching skills and keywords (1)"));
        assert!(output.contains("  • rust"));
        assert!(output.contains("Embeddings: potion-base-8M"));
        assert!(output.contains("Resume: jane_resume.pdf"));
    }

    #[test]
    fn test_json_output_parses() {
        let output = JsonFormatter::new(false)
            .format_report(&report(0.45, &["aws"], &["go"]))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["score_percentage"], "45.0%");
        assert_eq!(value["result"]["missing_terms"][0], "go");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true)
            .format_report(&report(0.65, &["aws"], &[]))
            .unwrap();
        assert!(output.starts_with("# Resume Match Report"));
        assert!(output.contains("**Similarity Score:** 65.0% (Good)"));
        assert!(output.contains("`jane_resume.pdf`"));
        assert!(output.contains("## Analysis"));
    }

    #[test]
    fn test_html_output_escapes_terms() {
        let output = HtmlFormatter::new(true)
            .format_report(&report(0.2, &["c++"], &["<script>"]))
            .unwrap();
        assert!(output.contains("<!DOCTYPE html>"));
        assert!(output.contains("score-low"));
        assert!(output.contains("<li>c++</li>"));
        assert!(!output.contains("<li><script></li>"));
        assert!(output.contains("<li>&#60;script&#62;</li>"));
    }

    #[test]
    fn test_html_omits_empty_sections() {
        let output = HtmlFormatter::new(false)
            .format_report(&report(0.9, &[], &[]))
            .unwrap();
        assert!(!output.contains("Matching skills and keywords"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_report_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, true, true);
        let report = report(0.7, &["aws"], &["k8s"]);
        for format in [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Html,
        ] {
            assert!(!generator.generate_report(&report, format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("out.md");
        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# report");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Html, "/home/me/jane_resume.pdf", false),
            "jane_resume_match.html"
        );
        let stamped = suggest_filename(OutputFormat::Json, "cv.txt", true);
        assert!(stamped.starts_with("cv_match_"));
        assert!(stamped.ends_with(".json"));
    }
}
