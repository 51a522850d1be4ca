//! Per-field parsers for submitted patients and entries.
//!
//! Every parser takes the raw value of one key (`None` when the key is absent) and either returns
//! the narrowed value or fails with the field's own error. Text fields must be non-empty strings;
//! date fields must additionally parse as a real date.

use crate::entry::{Discharge, EntryType, HealthCheckRating, SickLeave};
use crate::error::{ParseError, ParseResult};
use crate::guards::{as_number, as_plain_object, as_string};
use crate::patient::Gender;
use patientor_types::{DateText, NonEmptyText};
use serde_json::Value;

fn parse_text(value: Option<&Value>, field: &'static str) -> ParseResult<NonEmptyText> {
    value
        .and_then(as_string)
        .and_then(|text| NonEmptyText::new(text).ok())
        .ok_or(ParseError::MissingOrIncorrect(field))
}

fn parse_date_field(value: Option<&Value>, field: &'static str) -> ParseResult<DateText> {
    value
        .and_then(as_string)
        .and_then(|text| DateText::new(text).ok())
        .ok_or(ParseError::MissingOrIncorrect(field))
}

pub fn parse_name(value: Option<&Value>) -> ParseResult<NonEmptyText> {
    parse_text(value, "name")
}

pub fn parse_date(value: Option<&Value>) -> ParseResult<DateText> {
    parse_date_field(value, "date")
}

pub fn parse_ssn(value: Option<&Value>) -> ParseResult<NonEmptyText> {
    parse_text(value, "ssn")
}

pub fn parse_occupation(value: Option<&Value>) -> ParseResult<NonEmptyText> {
    parse_text(value, "occupation")
}

pub fn parse_description(value: Option<&Value>) -> ParseResult<NonEmptyText> {
    parse_text(value, "description")
}

pub fn parse_specialist(value: Option<&Value>) -> ParseResult<NonEmptyText> {
    parse_text(value, "specialist")
}

pub fn parse_employer_name(value: Option<&Value>) -> ParseResult<NonEmptyText> {
    parse_text(value, "employer name")
}

/// Gender failures echo the offending value back to the submitter.
pub fn parse_gender(value: Option<&Value>) -> ParseResult<Gender> {
    value
        .and_then(as_string)
        .and_then(Gender::from_wire)
        .ok_or_else(|| ParseError::IncorrectGender(render_value(value)))
}

/// Parse the entry discriminator.
///
/// A missing, empty or non-string tag is a field error; a well-formed tag outside the closed set
/// is reported as unsupported.
pub fn parse_entry_type(value: Option<&Value>) -> ParseResult<EntryType> {
    let tag = parse_text(value, "entry type")?;
    EntryType::from_wire(tag.as_str())
        .ok_or_else(|| ParseError::UnsupportedEntryType(tag.into_inner()))
}

pub fn parse_health_check_rating(value: Option<&Value>) -> ParseResult<HealthCheckRating> {
    value
        .and_then(as_number)
        .and_then(HealthCheckRating::from_value)
        .ok_or(ParseError::MissingOrIncorrect("health rating"))
}

/// Parse a `{ date, criteria }` discharge record.
///
/// # Errors
///
/// - [`ParseError::IncompleteRecord`] if `date` or `criteria` is absent.
/// - [`ParseError::MissingOrIncorrect`] if the value is not an object, the date does not parse, or
///   the criteria are not a non-empty string.
pub fn parse_discharge(value: Option<&Value>) -> ParseResult<Discharge> {
    const FIELD: &str = "discharge";

    let record = value
        .and_then(as_plain_object)
        .ok_or(ParseError::MissingOrIncorrect(FIELD))?;

    let (Some(date), Some(criteria)) = (record.get("date"), record.get("criteria")) else {
        return Err(ParseError::IncompleteRecord(FIELD));
    };

    Ok(Discharge {
        date: parse_date_field(Some(date), FIELD)?,
        criteria: parse_text(Some(criteria), FIELD)?,
    })
}

/// Parse a `{ startDate, endDate }` sick-leave record strictly.
///
/// Mirrors [`parse_discharge`]: absent sub-fields are [`ParseError::IncompleteRecord`], anything
/// else malformed is [`ParseError::MissingOrIncorrect`].
pub fn parse_sick_leave(value: Option<&Value>) -> ParseResult<SickLeave> {
    const FIELD: &str = "sick leave";

    let record = value
        .and_then(as_plain_object)
        .ok_or(ParseError::MissingOrIncorrect(FIELD))?;

    let (Some(start), Some(end)) = (record.get("startDate"), record.get("endDate")) else {
        return Err(ParseError::IncompleteRecord(FIELD));
    };

    Ok(SickLeave {
        start_date: parse_date_field(Some(start), FIELD)?,
        end_date: parse_date_field(Some(end), FIELD)?,
    })
}

/// Sick leave is always optional: a malformed record is dropped rather than rejected.
pub fn parse_sick_leave_lenient(value: Option<&Value>) -> Option<SickLeave> {
    match parse_sick_leave(value) {
        Ok(sick_leave) => Some(sick_leave),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring malformed sick leave");
            None
        }
    }
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_fields_reject_absent_empty_and_non_strings() {
        assert_eq!(parse_name(None), Err(ParseError::MissingOrIncorrect("name")));
        assert_eq!(
            parse_occupation(Some(&json!(""))),
            Err(ParseError::MissingOrIncorrect("occupation"))
        );
        assert_eq!(
            parse_specialist(Some(&json!(42))),
            Err(ParseError::MissingOrIncorrect("specialist"))
        );
        let name = parse_name(Some(&json!("Ann"))).expect("valid name");
        assert_eq!(name.as_str(), "Ann");
    }

    #[test]
    fn whitespace_text_is_kept_verbatim() {
        let name = parse_name(Some(&json!(" "))).expect("whitespace name");
        assert_eq!(name.as_str(), " ");

        let discharge = parse_discharge(Some(&json!({ "date": "2015-01-16", "criteria": "  " })))
            .expect("whitespace criteria");
        assert_eq!(discharge.criteria.as_str(), "  ");
    }

    #[test]
    fn dates_must_parse() {
        assert_eq!(
            parse_date(Some(&json!("2020-13-01"))),
            Err(ParseError::MissingOrIncorrect("date"))
        );
        let date = parse_date(Some(&json!("2020-01-01"))).expect("valid date");
        assert_eq!(date.as_str(), "2020-01-01");
    }

    #[test]
    fn gender_error_echoes_the_value() {
        let err = parse_gender(Some(&json!("robot"))).expect_err("unknown gender");
        assert_eq!(err.to_string(), "Missing or incorrect gender: robot");

        let err = parse_gender(Some(&json!(3))).expect_err("non-string gender");
        assert_eq!(err.to_string(), "Missing or incorrect gender: 3");

        assert_eq!(parse_gender(Some(&json!("other"))), Ok(Gender::Other));
    }

    #[test]
    fn entry_type_distinguishes_bad_shape_from_unknown_tag() {
        assert_eq!(
            parse_entry_type(Some(&json!(1))),
            Err(ParseError::MissingOrIncorrect("entry type"))
        );
        assert_eq!(
            parse_entry_type(Some(&json!("Dental"))),
            Err(ParseError::UnsupportedEntryType("Dental".into()))
        );
        assert_eq!(
            parse_entry_type(Some(&json!("Hospital"))),
            Ok(EntryType::Hospital)
        );
    }

    #[test]
    fn health_rating_accepts_zero_and_rejects_out_of_range() {
        assert_eq!(
            parse_health_check_rating(Some(&json!(0))),
            Ok(HealthCheckRating::Healthy)
        );
        assert_eq!(
            parse_health_check_rating(Some(&json!(3))),
            Ok(HealthCheckRating::CriticalRisk)
        );
        for bad in [json!(9), json!(-1), json!(1.5), json!("1"), Value::Null] {
            let err = parse_health_check_rating(Some(&bad)).expect_err("bad rating");
            assert!(err.to_string().contains("incorrect health rating"));
        }
    }

    #[test]
    fn discharge_separates_missing_sub_fields_from_bad_types() {
        assert_eq!(
            parse_discharge(Some(&json!({ "date": "2015-01-16" }))),
            Err(ParseError::IncompleteRecord("discharge"))
        );
        assert_eq!(
            parse_discharge(Some(&json!({ "date": "soon", "criteria": "healed" }))),
            Err(ParseError::MissingOrIncorrect("discharge"))
        );
        assert_eq!(
            parse_discharge(Some(&json!("healed"))),
            Err(ParseError::MissingOrIncorrect("discharge"))
        );

        let discharge = parse_discharge(Some(&json!({
            "date": "2015-01-16",
            "criteria": "Thumb has healed."
        })))
        .expect("valid discharge");
        assert_eq!(discharge.date.as_str(), "2015-01-16");
        assert_eq!(discharge.criteria.as_str(), "Thumb has healed.");
    }

    #[test]
    fn strict_sick_leave_reports_missing_sub_fields() {
        assert_eq!(
            parse_sick_leave(Some(&json!({ "startDate": "2019-08-05" }))),
            Err(ParseError::IncompleteRecord("sick leave"))
        );
    }

    #[test]
    fn lenient_sick_leave_drops_malformed_records() {
        assert!(parse_sick_leave_lenient(None).is_none());
        assert!(parse_sick_leave_lenient(Some(&json!({}))).is_none());
        assert!(parse_sick_leave_lenient(Some(&json!({
            "startDate": "2019-08-05",
            "endDate": 5
        })))
        .is_none());

        let sick_leave = parse_sick_leave_lenient(Some(&json!({
            "startDate": "2019-08-05",
            "endDate": "2019-08-28"
        })))
        .expect("valid sick leave");
        assert_eq!(sick_leave.end_date.as_str(), "2019-08-28");
    }
}
