use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

impl IssueKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Single finding raised by a validator against one field of its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub category: String,
    pub severity: Severity,
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        kind: IssueKind,
        severity: Severity,
        category: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            severity,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn error(
        severity: Severity,
        category: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(IssueKind::Error, severity, category, field, message)
    }

    pub fn warning(
        severity: Severity,
        category: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(IssueKind::Warning, severity, category, field, message)
    }

    pub fn info(
        category: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(IssueKind::Info, Severity::Low, category, field, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// High-severity errors block downstream use of the record.
    pub fn is_critical(&self) -> bool {
        self.kind == IssueKind::Error && self.severity == Severity::High
    }
}

/// Clamp a raw rubric result into the `[0, 100]` score range.
pub(crate) fn clamp_score(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Round to one decimal place for stable reporting.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
