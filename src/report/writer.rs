//! Report output formats.

use std::io::Write;

use serde::Serialize;

use crate::{model::AnalyzeResponse, report::ReportingResult, Result};

/// Describes an output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFormatInformation {
    /// Name shown to users when choosing a format.
    pub display_name: String,
    /// MIME type of the output.
    pub mime_type: String,
    /// File extension, including the leading dot.
    pub file_extension: String,
}

/// Renders a finished report.
///
/// Writers only read the response and report, so one report may be written in several formats
/// at once from different threads.
pub trait ReportWriter: Send + Sync {
    /// The format this writer produces.
    fn format(&self) -> ResultFormatInformation;

    /// Write `response` and `report` to `output`.
    ///
    /// # Errors
    /// Returns an error if serialization or the underlying writer fails.
    fn write_report(
        &self,
        output: &mut dyn Write,
        response: &AnalyzeResponse,
        report: &ReportingResult,
    ) -> Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    response: &'a AnalyzeResponse,
    report: &'a ReportingResult,
}

/// Writes the response and report as one JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportWriter {
    pretty: bool,
}

impl JsonReportWriter {
    /// Create a writer producing compact JSON.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer producing indented JSON.
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ReportWriter for JsonReportWriter {
    fn format(&self) -> ResultFormatInformation {
        ResultFormatInformation {
            display_name: "Json".to_string(),
            mime_type: "application/json".to_string(),
            file_extension: ".json".to_string(),
        }
    }

    fn write_report(
        &self,
        output: &mut dyn Write,
        response: &AnalyzeResponse,
        report: &ReportingResult,
    ) -> Result<()> {
        let document = JsonReport { response, report };
        if self.pretty {
            serde_json::to_writer_pretty(&mut *output, &document)?;
        } else {
            serde_json::to_writer(&mut *output, &document)?;
        }
        output.flush()?;
        Ok(())
    }
}
