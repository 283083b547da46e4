//! Server-rendered analysis page.

use crate::analysis::{
    AnalysisError, AnalysisRequest, AnalysisResult, Jurisdiction, ParsedAnalysis, PracticeArea,
};
use crate::config::API_KEY_ENV;
use crate::server::markdown::render_markdown;

/// Everything the page shows for one render.
pub struct PageView<'a> {
    /// Model attribution.
    pub model: &'a str,
    /// Whether analyses can run.
    pub credential_loaded: bool,
    /// Values to show in the form.
    pub request: &'a AnalysisRequest,
    /// Outcome of the submitted action, if any.
    pub outcome: Option<&'a AnalysisResult<ParsedAnalysis>>,
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;display:flex;color:#1f2430}\
aside{width:280px;padding:1.5rem;background:#f4f5f8;min-height:100vh;box-sizing:border-box}\
main{flex:1;padding:2rem;max-width:960px}\
label{display:block;margin-top:1rem;font-weight:600}\
select,textarea,input[type=range]{width:100%;margin-top:.3rem}\
textarea{min-height:200px;font:inherit}\
button{margin-top:1rem;padding:.6rem 1.2rem;background:#ff4b4b;color:#fff;border:0;border-radius:6px;font-weight:600}\
.notice{padding:.8rem 1rem;border-radius:6px;margin:1rem 0}\
.success{background:#e6f4ea}.error{background:#fdecea}.warning{background:#fff4e5}.info{background:#e8f0fe}\
details{margin:1.5rem 0;border:1px solid #dde;border-radius:6px;padding:.8rem}\
.reasoning{font-style:italic}\
.memo{line-height:1.5}";

/// Render the full page.
#[must_use]
pub fn render_page(view: &PageView<'_>) -> String {
    let mut out = String::with_capacity(8 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>LexiMind | Legal Analysis Engine</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<form method=\"post\" action=\"/analyze\" style=\"display:contents\">\n");

    render_sidebar(&mut out, view);
    render_main(&mut out, view);

    out.push_str("</form>\n</body>\n</html>\n");
    out
}

fn render_sidebar(out: &mut String, view: &PageView<'_>) {
    out.push_str("<aside>\n<h2>Configuration</h2>\n");
    if view.credential_loaded {
        notice(out, "success", "API key loaded.");
    } else {
        notice(
            out,
            "error",
            &format!("API key missing! Set {API_KEY_ENV} in the environment or a .env file."),
        );
    }
    out.push_str("<hr>\n");

    out.push_str("<label for=\"jurisdiction\">Jurisdiction</label>\n<select id=\"jurisdiction\" name=\"jurisdiction\">\n");
    for jurisdiction in Jurisdiction::ALL {
        option(out, jurisdiction.as_str(), jurisdiction == view.request.jurisdiction);
    }
    out.push_str("</select>\n");

    out.push_str("<label for=\"practice_area\">Practice Area</label>\n<select id=\"practice_area\" name=\"practice_area\">\n");
    for area in PracticeArea::ALL {
        option(out, area.as_str(), area == view.request.practice_area);
    }
    out.push_str("</select>\n");

    let temperature = format!("{:.1}", view.request.temperature);
    out.push_str("<label for=\"temperature\">Creativity (Temperature): <output id=\"temperature_value\">");
    out.push_str(&temperature);
    out.push_str("</output></label>\n");
    out.push_str("<input type=\"range\" id=\"temperature\" name=\"temperature\" min=\"0\" max=\"1\" step=\"0.1\" value=\"");
    out.push_str(&temperature);
    out.push_str("\" oninput=\"temperature_value.value=Number(this.value).toFixed(1)\" ");
    out.push_str("title=\"Lower values (0.1) provide strictly factual analysis. Higher values allow for creative legal arguments.\">\n");

    notice(out, "info", &format!("Powered by Groq {}", escape_html(view.model)));
    out.push_str("</aside>\n");
}

fn render_main(out: &mut String, view: &PageView<'_>) {
    out.push_str("<main>\n<h1>LexiMind: Legal Analysis AI</h1>\n<p><strong>Role:</strong> Senior Associate | <strong>Jurisdiction:</strong> ");
    out.push_str(view.request.jurisdiction.as_str());
    out.push_str(" | <strong>Focus:</strong> ");
    out.push_str(view.request.practice_area.as_str());
    out.push_str("</p>\n");

    out.push_str("<label for=\"fact_pattern\">Case Details / Fact Pattern</label>\n");
    out.push_str("<textarea id=\"fact_pattern\" name=\"fact_pattern\" placeholder=\"Paste the case details, contract clauses, or incident report here...\">");
    out.push_str(&escape_html(&view.request.fact_pattern));
    out.push_str("</textarea>\n<button type=\"submit\">Analyze Case</button>\n");

    match view.outcome {
        None => {}
        Some(Ok(parsed)) => render_analysis(out, parsed),
        Some(Err(err)) => render_failure(out, err),
    }

    out.push_str("</main>\n");
}

fn render_analysis(out: &mut String, parsed: &ParsedAnalysis) {
    out.push_str("<details>\n<summary>View Internal Legal Reasoning (Chain of Thought)</summary>\n");
    notice(
        out,
        "info",
        "This section represents the AI's internal logic, identifying potential loopholes before forming a conclusion.",
    );
    out.push_str("<div class=\"reasoning\">");
    out.push_str(&render_markdown(&parsed.reasoning));
    out.push_str("</div>\n</details>\n");

    out.push_str("<h2>Legal Memorandum</h2>\n<div class=\"memo\">");
    out.push_str(&render_markdown(&parsed.memo));
    out.push_str("</div>\n");

    notice(out, "success", "Analysis Complete.");
}

fn render_failure(out: &mut String, err: &AnalysisError) {
    let message = match err {
        AnalysisError::MissingCredential => {
            format!("Cannot proceed. API key is missing: set {API_KEY_ENV} and restart the server.")
        }
        AnalysisError::EmptyInput => "Please enter a fact pattern.".to_string(),
        AnalysisError::InvalidTemperature(_) => format!("Cannot proceed: {err}."),
        AnalysisError::Provider(_) | AnalysisError::Worker(_) => {
            format!("An error occurred: {err}")
        }
    };
    let class = match err {
        AnalysisError::EmptyInput | AnalysisError::InvalidTemperature(_) => "warning",
        _ => "error",
    };
    notice(out, class, &escape_html(&message));
}

/// `message` must already be escaped.
fn notice(out: &mut String, class: &str, message: &str) {
    out.push_str("<div class=\"notice ");
    out.push_str(class);
    out.push_str("\">");
    out.push_str(message);
    out.push_str("</div>\n");
}

fn option(out: &mut String, label: &str, selected: bool) {
    out.push_str("<option value=\"");
    out.push_str(&escape_html(label));
    out.push('"');
    if selected {
        out.push_str(" selected");
    }
    out.push('>');
    out.push_str(&escape_html(label));
    out.push_str("</option>\n");
}

/// Escape text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
