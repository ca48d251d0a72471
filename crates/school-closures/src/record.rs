//! Closure records and the raw form values they are built from.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value stored when no community opinion was given.
pub const NOT_PROVIDED: &str = "Not provided";

/// One school-closure data entry, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureRecord {
    /// Opaque identifier, unique across the store.
    pub id: String,
    pub school_name: String,
    pub district: String,
    pub village: String,
    pub year_of_closure: i32,
    pub reason_for_closure: String,
    pub students_before_closure: u64,
    pub where_students_go: String,
    pub community_opinion: String,
    /// Calendar date the record was added (no time component).
    pub date_added: NaiveDate,
}

impl ClosureRecord {
    /// Combine a validated payload with the identity assigned by the store.
    pub fn from_payload(id: String, date_added: NaiveDate, payload: ValidatedPayload) -> Self {
        Self {
            id,
            school_name: payload.school_name,
            district: payload.district,
            village: payload.village,
            year_of_closure: payload.year_of_closure,
            reason_for_closure: payload.reason_for_closure,
            students_before_closure: payload.students_before_closure,
            where_students_go: payload.where_students_go,
            community_opinion: payload.community_opinion,
            date_added,
        }
    }

    /// The user-supplied part of the record, without `id` and `dateAdded`.
    pub fn payload(&self) -> ValidatedPayload {
        ValidatedPayload {
            school_name: self.school_name.clone(),
            district: self.district.clone(),
            village: self.village.clone(),
            year_of_closure: self.year_of_closure,
            reason_for_closure: self.reason_for_closure.clone(),
            students_before_closure: self.students_before_closure,
            where_students_go: self.where_students_go.clone(),
            community_opinion: self.community_opinion.clone(),
        }
    }
}

/// A form submission that passed validation: trimmed text and parsed numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPayload {
    pub school_name: String,
    pub district: String,
    pub village: String,
    pub year_of_closure: i32,
    pub reason_for_closure: String,
    pub students_before_closure: u64,
    pub where_students_go: String,
    pub community_opinion: String,
}

/// The fields of the data-entry form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    SchoolName,
    District,
    Village,
    YearOfClosure,
    ReasonForClosure,
    StudentsBeforeClosure,
    WhereStudentsGo,
    CommunityOpinion,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [FormField; 8] = [
        FormField::SchoolName,
        FormField::District,
        FormField::Village,
        FormField::YearOfClosure,
        FormField::ReasonForClosure,
        FormField::StudentsBeforeClosure,
        FormField::WhereStudentsGo,
        FormField::CommunityOpinion,
    ];

    /// Serialized (camelCase) name of the field.
    pub fn name(self) -> &'static str {
        match self {
            FormField::SchoolName => "schoolName",
            FormField::District => "district",
            FormField::Village => "village",
            FormField::YearOfClosure => "yearOfClosure",
            FormField::ReasonForClosure => "reasonForClosure",
            FormField::StudentsBeforeClosure => "studentsBeforeClosure",
            FormField::WhereStudentsGo => "whereStudentsGo",
            FormField::CommunityOpinion => "communityOpinion",
        }
    }

    /// Human-readable label, also used as the CSV column header.
    pub fn label(self) -> &'static str {
        match self {
            FormField::SchoolName => "School Name",
            FormField::District => "District",
            FormField::Village => "Village",
            FormField::YearOfClosure => "Year of Closure",
            FormField::ReasonForClosure => "Reason for Closure",
            FormField::StudentsBeforeClosure => "Students Before Closure",
            FormField::WhereStudentsGo => "Where Students Go",
            FormField::CommunityOpinion => "Community Opinion",
        }
    }

    pub fn is_required(self) -> bool {
        self != FormField::CommunityOpinion
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown form field: {}", s))
    }
}

/// Raw text of the data-entry form, exactly as typed.
///
/// The form is an immutable value: [`ClosureForm::with_field`] returns a new
/// form rather than editing one in place, and [`ClosureForm::default`] is the
/// blank form shown after a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClosureForm {
    pub school_name: String,
    pub district: String,
    pub village: String,
    pub year_of_closure: String,
    pub reason_for_closure: String,
    pub students_before_closure: String,
    pub where_students_go: String,
    pub community_opinion: String,
}

impl ClosureForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw text of a field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::SchoolName => &self.school_name,
            FormField::District => &self.district,
            FormField::Village => &self.village,
            FormField::YearOfClosure => &self.year_of_closure,
            FormField::ReasonForClosure => &self.reason_for_closure,
            FormField::StudentsBeforeClosure => &self.students_before_closure,
            FormField::WhereStudentsGo => &self.where_students_go,
            FormField::CommunityOpinion => &self.community_opinion,
        }
    }

    /// Return a copy of this form with one field replaced.
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::SchoolName => &mut self.school_name,
            FormField::District => &mut self.district,
            FormField::Village => &mut self.village,
            FormField::YearOfClosure => &mut self.year_of_closure,
            FormField::ReasonForClosure => &mut self.reason_for_closure,
            FormField::StudentsBeforeClosure => &mut self.students_before_closure,
            FormField::WhereStudentsGo => &mut self.where_students_go,
            FormField::CommunityOpinion => &mut self.community_opinion,
        }
    }
}
