//! Property-based tests for validation, filtering and export.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p school-closures --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p school-closures --test property_tests
//! ```

use chrono::NaiveDate;
use proptest::prelude::*;

use school_closures::catalog::{DISTRICTS, MAX_YEAR, MIN_YEAR};
use school_closures::{
    ClosureForm, ClosureRecord, FormField, RecordFilter, ValidationError, apply_filter,
    summarize, to_csv, to_json, validate,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn complete_form() -> ClosureForm {
    ClosureForm::new()
        .with_field(FormField::SchoolName, "ZP School")
        .with_field(FormField::District, "Pune")
        .with_field(FormField::Village, "Shirur")
        .with_field(FormField::YearOfClosure, "2022")
        .with_field(FormField::ReasonForClosure, "Teacher shortage")
        .with_field(FormField::StudentsBeforeClosure, "20")
        .with_field(FormField::WhereStudentsGo, "Nearby school")
}

/// Free text including quotes, commas and non-ASCII letters.
fn free_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,\"'ािकमर]{1,30}"
}

fn record_strategy() -> impl Strategy<Value = ClosureRecord> {
    (
        free_text(),
        prop::sample::select(DISTRICTS),
        free_text(),
        MIN_YEAR..=MAX_YEAR,
        0u64..5_000,
        free_text(),
        0u32..1_000,
    )
        .prop_map(|(school, district, village, year, students, opinion, n)| ClosureRecord {
            id: (1_700_000_000_000u64 + u64::from(n)).to_string(),
            school_name: school,
            district: district.to_string(),
            village,
            year_of_closure: year,
            reason_for_closure: "Other".to_string(),
            students_before_closure: students,
            where_students_go: "Nearby school".to_string(),
            community_opinion: opinion,
            date_added: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<ClosureRecord>> {
    prop::collection::vec(record_strategy(), 0..40)
}

fn filter_strategy() -> impl Strategy<Value = RecordFilter> {
    (
        "[a-zA-Z]{0,3}",
        prop::option::of(MIN_YEAR..=MAX_YEAR),
        prop::option::of(prop::sample::select(DISTRICTS)),
    )
        .prop_map(|(search, year, district)| {
            let mut filter = RecordFilter::new().with_search(search);
            if let Some(year) = year {
                filter = filter.with_year(year);
            }
            if let Some(district) = district {
                filter = filter.with_district(district);
            }
            filter
        })
}

// =============================================================================
// Validation
// =============================================================================

proptest! {
    #[test]
    fn year_accepted_iff_in_range(year in -10_000i32..10_000) {
        let form = complete_form().with_field(FormField::YearOfClosure, year.to_string());
        let result = validate(&form);

        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            prop_assert_eq!(result.unwrap().year_of_closure, year);
        } else {
            prop_assert!(matches!(result, Err(ValidationError::InvalidYear(_))));
        }
    }

    #[test]
    fn negative_student_counts_rejected(count in i64::MIN..0) {
        let form = complete_form()
            .with_field(FormField::StudentsBeforeClosure, count.to_string());
        prop_assert!(matches!(
            validate(&form),
            Err(ValidationError::InvalidStudentCount(_))
        ));
    }

    #[test]
    fn validation_never_panics(year in ".{0,12}", students in ".{0,12}", name in ".{0,20}") {
        let form = complete_form()
            .with_field(FormField::YearOfClosure, year)
            .with_field(FormField::StudentsBeforeClosure, students)
            .with_field(FormField::SchoolName, name);
        let _ = validate(&form);
    }

    #[test]
    fn blank_opinion_becomes_not_provided(spaces in " {0,5}") {
        let form = complete_form().with_field(FormField::CommunityOpinion, spaces);
        prop_assert_eq!(validate(&form).unwrap().community_opinion, "Not provided");
    }
}

// =============================================================================
// Filtering and statistics
// =============================================================================

proptest! {
    #[test]
    fn identity_filter_keeps_everything(records in records_strategy()) {
        let kept = apply_filter(&records, &RecordFilter::new());
        prop_assert_eq!(kept.len(), records.len());
        prop_assert!(kept.iter().zip(records.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn filter_preserves_order_and_matches(records in records_strategy(), filter in filter_strategy()) {
        let kept = apply_filter(&records, &filter);

        prop_assert!(kept.iter().all(|r| filter.matches(r)));
        let expected = records.iter().filter(|r| filter.matches(r)).count();
        prop_assert_eq!(kept.len(), expected);

        let positions: Vec<usize> = kept
            .iter()
            .map(|k| records.iter().position(|r| std::ptr::eq(r, *k)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn summary_counts_are_consistent(records in records_strategy()) {
        let summary = summarize(&records);

        prop_assert_eq!(summary.total_schools, records.len());
        prop_assert!(summary.districts_affected <= records.len());
        let students: u64 = records.iter().map(|r| r.students_before_closure).sum();
        prop_assert_eq!(summary.total_students_affected, students);
    }
}

// =============================================================================
// Export
// =============================================================================

proptest! {
    #[test]
    fn csv_has_one_row_per_record(records in prop::collection::vec(record_strategy(), 1..20)) {
        let csv = to_csv(&records).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            prop_assert_eq!(&row[0], record.school_name.as_str());
            prop_assert_eq!(&row[7], record.community_opinion.as_str());
        }
    }

    #[test]
    fn json_export_round_trips(records in prop::collection::vec(record_strategy(), 1..20)) {
        let json = to_json(&records).unwrap();
        let parsed: Vec<ClosureRecord> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, records);
    }
}
