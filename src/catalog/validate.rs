//! Construction-time checks over the whole dataset.
//!
//! Every rule maps to one `CatalogError` variant. Checks run record by record
//! in catalog order and stop at the first violation.

use std::collections::HashSet;

use super::{CatalogError, PatternRecord};

/// `problem` and `solution` must be longer than this many characters.
pub const MIN_PROSE_CHARS: usize = 10;

/// `before` and `after` code must be longer than this many characters.
pub const MIN_CODE_CHARS: usize = 50;

pub(crate) fn validate(records: &[PatternRecord]) -> Result<(), CatalogError> {
    if records.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut ids = HashSet::with_capacity(records.len());
    for record in records {
        if record.id.is_empty() {
            return Err(empty(record, "id"));
        }
        if !ids.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: record.id.clone(),
            });
        }
    }

    for record in records {
        check_fields(record)?;

        for related in &record.related_patterns {
            if related == &record.id {
                return Err(CatalogError::SelfReference {
                    id: record.id.clone(),
                });
            }
            if !ids.contains(related.as_str()) {
                return Err(CatalogError::DanglingReference {
                    id: record.id.clone(),
                    related: related.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_fields(record: &PatternRecord) -> Result<(), CatalogError> {
    if record.title.trim().is_empty() {
        return Err(empty(record, "title"));
    }

    let description = &record.description;
    longer_than(record, "problem", &description.problem, MIN_PROSE_CHARS)?;
    longer_than(record, "solution", &description.solution, MIN_PROSE_CHARS)?;
    non_empty_list(record, "whenToUse", &description.when_to_use)?;
    non_empty_list(record, "pros", &description.pros)?;
    non_empty_list(record, "cons", &description.cons)?;

    let code = &record.code;
    longer_than(record, "before", &code.before, MIN_CODE_CHARS)?;
    longer_than(record, "after", &code.after, MIN_CODE_CHARS)?;
    if code.before == code.after {
        return Err(CatalogError::IdenticalCode {
            id: record.id.clone(),
        });
    }
    non_empty_list(record, "highlights", &code.highlights)?;

    Ok(())
}

fn empty(record: &PatternRecord, field: &'static str) -> CatalogError {
    CatalogError::EmptyField {
        id: record.id.clone(),
        field,
    }
}

fn longer_than(
    record: &PatternRecord,
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(empty(record, field));
    }
    let actual = value.chars().count();
    if actual <= min {
        return Err(CatalogError::TooShort {
            id: record.id.clone(),
            field,
            min,
            actual,
        });
    }
    Ok(())
}

fn non_empty_list(
    record: &PatternRecord,
    field: &'static str,
    items: &[String],
) -> Result<(), CatalogError> {
    if items.is_empty() || items.iter().any(|item| item.trim().is_empty()) {
        return Err(empty(record, field));
    }
    Ok(())
}
