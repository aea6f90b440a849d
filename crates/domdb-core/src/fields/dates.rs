//! Verdict date parsing.

use chrono::NaiveDateTime;

use crate::models::CaseRecord;

/// Timestamp format used by the API for `verdictDateTime`.
pub const VERDICT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Output format for verdict dates.
pub const VERDICT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse one API timestamp into a `YYYY-MM-DD` date string.
pub fn parse_verdict_timestamp(value: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(value, VERDICT_TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.format(VERDICT_DATE_FORMAT).to_string())
}

/// First document timestamp that parses, in document order.
pub fn first_verdict_date(case: &CaseRecord) -> Option<String> {
    case.documents
        .iter()
        .filter_map(|doc| doc.verdict_date_time.as_deref())
        .find_map(parse_verdict_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentRecord;

    fn doc(ts: Option<&str>) -> DocumentRecord {
        DocumentRecord {
            verdict_date_time: ts.map(str::to_string),
            ..Default::default()
        }
    }

    fn case_with(documents: Vec<DocumentRecord>) -> CaseRecord {
        CaseRecord {
            documents,
            ..CaseRecord::new("x")
        }
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_verdict_timestamp("2023-01-01T12:00:00").as_deref(),
            Some("2023-01-01")
        );
        assert_eq!(parse_verdict_timestamp("2023-01-01"), None);
        assert_eq!(parse_verdict_timestamp("2023-01-01T12:00:00Z"), None);
        assert_eq!(parse_verdict_timestamp("2023-02-30T00:00:00"), None);
    }

    #[test]
    fn test_first_parsable_document_wins() {
        let case = case_with(vec![
            doc(None),
            doc(Some("garbage")),
            doc(Some("2022-06-15T08:30:00")),
            doc(Some("2024-01-10T00:00:00")),
        ]);
        assert_eq!(first_verdict_date(&case).as_deref(), Some("2022-06-15"));
    }

    #[test]
    fn test_no_documents() {
        assert_eq!(first_verdict_date(&case_with(Vec::new())), None);
    }
}
