//! Plain-text report assembly
//!
//! Builds the text content a downstream renderer (PDF or otherwise)
//! consumes. Formatting only; every number in the report is computed
//! elsewhere.

/// One titled block of report body text.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
}

impl ReportSection {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// Render a titled report from pre-computed sections.
pub fn render_report(title: &str, sections: &[ReportSection]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');

    for section in sections {
        out.push('\n');
        out.push_str(&section.heading);
        out.push('\n');
        out.push_str(&"-".repeat(section.heading.chars().count()));
        out.push('\n');
        out.push_str(section.body.trim_end());
        out.push('\n');
    }
    out
}
