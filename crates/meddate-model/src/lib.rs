//! Data model for attaching start/stop dates to medication mentions.
//!
//! These types carry no behaviour beyond construction and rendering; the
//! date normalization and association logic lives in `meddate-core`.

pub mod association;
pub mod calendar;
pub mod document;
pub mod error;
pub mod span;

pub use association::{AssociationResult, DateMention, EventId, MedicationDates};
pub use calendar::{CalendarDate, CalendarValue, StructuredDate};
pub use document::{Annotation, AnnotationKind, Document, EventKind, Section};
pub use error::{ModelError, Result};
pub use span::TextSpan;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_deserializes_from_json() {
        let json = r#"{
            "id": "note-1",
            "text": "Aspirin started 1/1/2000.",
            "paragraphs": [{"begin": 0, "end": 25}],
            "annotations": [
                {"id": "m1", "begin": 0, "end": 7,
                 "kind": {"type": "medication_event", "cuis": ["C0004057"]}},
                {"id": "t1", "begin": 16, "end": 24,
                 "kind": {"type": "time_mention", "date": {"year": "2000", "month": "1", "day": "1"}}},
                {"id": "c1", "begin": 16, "end": 24, "kind": {"type": "chunk"}}
            ]
        }"#;
        let document: Document = serde_json::from_str(json).expect("deserialize document");
        assert_eq!(document.id, "note-1");
        assert_eq!(document.paragraphs.len(), 1);
        assert_eq!(document.annotations.len(), 3);
        let (kind, cuis) = document.annotations[0].kind.medication().unwrap();
        assert_eq!(kind, EventKind::MedicationEvent);
        assert_eq!(cuis, ["C0004057".to_string()]);
        assert_eq!(
            document.covered_text(&document.annotations[1].span().unwrap()),
            "1/1/2000"
        );
    }

    #[test]
    fn medication_dates_serializes() {
        let date = CalendarDate::from_ymd(2000, 1, 1).unwrap();
        let record = MedicationDates::new(
            "m1",
            EventKind::MedicationMention,
            TextSpan::new(0, 7).unwrap(),
            "aspirin",
            Some(DateMention::new(TextSpan::new(16, 24).unwrap(), date)),
            None,
        );
        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("\"kind\":\"medication_mention\""));
        assert!(json.contains("\"date\":\"2000-01-01\""));
        assert!(json.contains("\"start_fields\":{\"year\":\"2000\",\"month\":\"1\",\"day\":\"1\"}"));
        assert!(json.contains("\"stop_fields\":null"));
        let round: MedicationDates = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }
}
