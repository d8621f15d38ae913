use std::fmt;

use serde::Serialize;

use crate::scanner::{Adjustment, MissingDefault};

/// Step of the open pipeline a finding belongs to, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The file opens as a container
    Container,
    /// Manufacturer signature
    Signature,
    /// Major format revision
    Version,
    /// File kind
    Classification,
    /// Catalog lookup and reconciliation with the file
    Scanner,
    /// Projection geometry
    Geometry,
    /// Patient position, energy window, frame and radionuclide
    Exam,
    /// Payload datasets of the file kind
    Payload,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 8] = [
        Stage::Container,
        Stage::Signature,
        Stage::Version,
        Stage::Classification,
        Stage::Scanner,
        Stage::Geometry,
        Stage::Exam,
        Stage::Payload,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Stage::Container => "Container",
            Stage::Signature => "Signature",
            Stage::Version => "Format version",
            Stage::Classification => "Classification",
            Stage::Scanner => "Scanner",
            Stage::Geometry => "Projection geometry",
            Stage::Exam => "Exam metadata",
            Stage::Payload => "Payload",
        };
        f.write_str(title)
    }
}

/// How a finding affects readability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Nothing to report
    Ok,
    /// The file is readable, but a value was corrected or is absent
    Warning,
    /// [`RdfFile::open`](crate::reader::RdfFile::open) or a payload read would fail
    Failure,
}

/// What a stage found
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The step succeeded
    Passed,
    /// A catalog value was replaced by the value stored in the file
    Adjusted(Adjustment),
    /// A scanner field needed downstream is set neither by catalog nor file
    MissingDefault(MissingDefault),
    /// The step succeeded with a caveat
    Caveat(String),
    /// The step failed
    Failed(String),
}

impl Outcome {
    /// Severity of this outcome
    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Passed => Severity::Ok,
            Outcome::Adjusted(_) | Outcome::MissingDefault(_) | Outcome::Caveat(_) => {
                Severity::Warning
            }
            Outcome::Failed(_) => Severity::Failure,
        }
    }
}

/// One entry of an inspection report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Pipeline stage
    pub stage: Stage,
    /// What was looked at (`"Sinogram view 1"`, `"timing resolution"`)
    pub subject: String,
    /// What was found
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Finding {
    fn detail(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Passed => None,
            Outcome::Adjusted(adjustment) => Some(adjustment.to_string()),
            Outcome::MissingDefault(missing) => Some(missing.to_string()),
            Outcome::Caveat(note) | Outcome::Failed(note) => Some(note.clone()),
        }
    }
}

/// Account of opening one RDF file, stage by stage
///
/// Stages after the first failure do not run, so [`stopped_at`](Self::stopped_at)
/// names the stage where the file stopped being readable.
#[derive(Debug, Serialize)]
pub struct InspectionReport {
    /// Inspected file
    pub file_path: String,
    /// Findings in the order they were made
    pub findings: Vec<Finding>,
}

impl InspectionReport {
    /// Empty report for `file_path`
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            findings: Vec::new(),
        }
    }

    /// Record a finding
    pub fn push(&mut self, stage: Stage, subject: impl Into<String>, outcome: Outcome) {
        self.findings.push(Finding {
            stage,
            subject: subject.into(),
            outcome,
        });
    }

    pub(crate) fn passed(&mut self, stage: Stage, subject: impl Into<String>) {
        self.push(stage, subject, Outcome::Passed);
    }

    pub(crate) fn caveat(&mut self, stage: Stage, subject: impl Into<String>, note: impl Into<String>) {
        self.push(stage, subject, Outcome::Caveat(note.into()));
    }

    pub(crate) fn failed(&mut self, stage: Stage, subject: impl Into<String>, reason: impl fmt::Display) {
        self.push(stage, subject, Outcome::Failed(reason.to_string()));
    }

    /// Findings of one stage
    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.stage == stage)
    }

    /// Catalog values the file overrode
    pub fn adjustments(&self) -> impl Iterator<Item = &Adjustment> {
        self.findings.iter().filter_map(|f| match &f.outcome {
            Outcome::Adjusted(adjustment) => Some(adjustment),
            _ => None,
        })
    }

    /// Scanner defaults neither catalog nor file set
    pub fn missing_defaults(&self) -> impl Iterator<Item = MissingDefault> + '_ {
        self.findings.iter().filter_map(|f| match f.outcome {
            Outcome::MissingDefault(missing) => Some(missing),
            _ => None,
        })
    }

    /// Stage of the first failure
    pub fn stopped_at(&self) -> Option<Stage> {
        self.findings
            .iter()
            .find(|f| f.outcome.severity() == Severity::Failure)
            .map(|f| f.stage)
    }

    /// True if any stage failed
    pub fn has_failures(&self) -> bool {
        self.count(Severity::Failure) > 0
    }

    /// Number of findings with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.outcome.severity() == severity)
            .count()
    }

    fn verdict(&self) -> String {
        match (self.stopped_at(), self.count(Severity::Warning)) {
            (Some(stage), _) => format!("Not readable: stopped at {}", stage),
            (None, 0) => "Readable".to_string(),
            (None, 1) => "Readable with 1 warning".to_string(),
            (None, n) => format!("Readable with {} warnings", n),
        }
    }

    fn render(&self, colored: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            paint("GE RDF inspection:", None, colored),
            self.file_path
        ));

        for stage in Stage::ALL {
            let mut findings = self.stage(stage).peekable();
            if findings.peek().is_none() {
                continue;
            }
            output.push_str(&format!("\n{}\n", paint(&stage.to_string(), None, colored)));
            for finding in findings {
                let severity = finding.outcome.severity();
                output.push_str(&format!("  {} {}", marker(severity, colored), finding.subject));
                match finding.detail() {
                    Some(detail) => output.push_str(&format!(
                        ": {}\n",
                        paint(&detail, Some(severity), colored)
                    )),
                    None => output.push('\n'),
                }
            }
        }

        let severity = match self.stopped_at() {
            Some(_) => Severity::Failure,
            None if self.count(Severity::Warning) > 0 => Severity::Warning,
            None => Severity::Ok,
        };
        output.push_str(&format!("\n{}\n", paint(&self.verdict(), Some(severity), colored)));
        output
    }

    /// The report with colours (plain text without the `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        self.render(true)
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

fn marker(severity: Severity, colored: bool) -> String {
    let symbol = match severity {
        Severity::Ok => "✓",
        Severity::Warning => "⚠",
        Severity::Failure => "✗",
    };
    paint(symbol, Some(severity), colored)
}

/// Style `text` by severity; `None` is a heading
#[cfg(feature = "colorized_output")]
fn paint(text: &str, severity: Option<Severity>, colored: bool) -> String {
    use console::style;

    if !colored {
        return text.to_string();
    }
    match severity {
        None => style(text).bold().cyan().to_string(),
        Some(Severity::Ok) => style(text).green().to_string(),
        Some(Severity::Warning) => style(text).yellow().to_string(),
        Some(Severity::Failure) => style(text).red().bold().to_string(),
    }
}

#[cfg(not(feature = "colorized_output"))]
fn paint(text: &str, _severity: Option<Severity>, _colored: bool) -> String {
    text.to_string()
}
