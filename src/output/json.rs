use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::pipeline::RunReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct Record<'a> {
    ts: String,
    #[serde(flatten)]
    report: &'a RunReport,
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> String {
        let record = Record {
            ts: iso8601_timestamp(),
            report,
        };
        serde_json::to_string(&record)
            .unwrap_or_else(|e| format!(r#"{{"ts":"{}","error":"{}"}}"#, record.ts, e))
    }
}
