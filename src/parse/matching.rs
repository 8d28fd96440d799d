//! Matching file parser: loads an externally supplied matching onto
//! an instance and screens it while doing so.

use crate::engine::{ValidityReport, Violation};
use crate::parse::{numbered_lines, parse_number, ParseError};
use crate::types::Instance;

/// Parse a matching file and install its pairs on the instance.
///
/// Each non-empty line must contain exactly two numeric tokens,
/// doctor then hospital, separated by any run of `(`, `)`, `,` or
/// whitespace. Structural problems are [`ParseError`]s; semantic
/// problems make the matching invalid and are returned as violations,
/// fail-fast per category:
///
/// - a pair the hospital finds unacceptable,
/// - a doctor assigned on more than one line,
/// - a hospital left oversubscribed once all pairs are installed.
///
/// On a violation the pairs installed so far remain on the instance;
/// callers should treat the instance as tainted unless the report is
/// valid.
///
/// # Example
///
/// ```
/// use hrmatch::{parse_instance, parse_matching};
///
/// let mut instance = parse_instance("1\n1\n1: 1\n1: 1: 1\n").unwrap();
/// let report = parse_matching(&mut instance, "(1, 1)\n").unwrap();
///
/// assert!(report.is_valid());
/// assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
/// ```
pub fn parse_matching(instance: &mut Instance, input: &str) -> Result<ValidityReport, ParseError> {
    let mut report = ValidityReport::default();

    for (line, text) in numbered_lines(input) {
        let mut tokens = text
            .split(|c: char| c == '(' || c == ')' || c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());

        let doctor_token = tokens.next().ok_or(ParseError::MalformedPair { line })?;
        let hospital_token = tokens.next().ok_or(ParseError::MalformedPair { line })?;
        if tokens.next().is_some() {
            return Err(ParseError::MalformedPair { line });
        }

        let doctor_id: u32 = parse_number(doctor_token, line)?;
        let hospital_id: u32 = parse_number(hospital_token, line)?;

        let doctor = instance
            .doctor(doctor_id)
            .ok_or(ParseError::UnknownDoctor {
                line,
                id: doctor_id,
            })?;
        let hospital = instance
            .hospital(hospital_id)
            .ok_or(ParseError::UnknownHospital {
                line,
                id: hospital_id,
            })?;

        if hospital.rank_of(doctor_id).is_none() {
            report.push(Violation::UnacceptablePair {
                doctor: doctor_id,
                hospital: hospital_id,
            });
            return Ok(report);
        }
        if doctor.is_assigned() {
            report.push(Violation::DuplicateAssignment { doctor: doctor_id });
            return Ok(report);
        }

        instance.assign(doctor_id, hospital_id);
    }

    for hospital in instance.hospitals() {
        if hospital.is_oversubscribed() {
            report.push(Violation::Oversubscribed {
                hospital: hospital.id(),
                assigned: hospital.num_assignees(),
                capacity: hospital.capacity(),
            });
            break;
        }
    }

    Ok(report)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_instance;

    /// 2 doctors, 2 hospitals of capacity 1, everyone acceptable
    fn instance() -> Instance {
        parse_instance("2\n2\n1: 1 2\n2: 1 2\n1: 1: 1 2\n2: 1: 1 2\n").unwrap()
    }

    #[test]
    fn test_parse_matching_bracketed_pairs() {
        let mut instance = instance();
        let report = parse_matching(&mut instance, "(1, 1)\n(2, 2)\n").unwrap();

        assert!(report.is_valid());
        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
        assert_eq!(instance.doctor(2).unwrap().assignment(), Some(2));
        assert!(instance.hospital(2).unwrap().has_assignee(2));
    }

    #[test]
    fn test_parse_matching_bare_pairs() {
        // The delimiter set also accepts undecorated "doctor hospital"
        let mut instance = instance();
        let report = parse_matching(&mut instance, "1 2\n2 1\n").unwrap();

        assert!(report.is_valid());
        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(2));
        assert_eq!(instance.doctor(2).unwrap().assignment(), Some(1));
    }

    #[test]
    fn test_parse_matching_empty_is_valid() {
        let mut instance = instance();
        let report = parse_matching(&mut instance, "").unwrap();

        assert!(report.is_valid());
        assert!(instance.doctors().all(|doctor| !doctor.is_assigned()));
    }

    #[test]
    fn test_parse_matching_unacceptable_pair() {
        let mut instance = parse_instance("2\n1\n1: 1\n2: 1\n1: 2: 1\n").unwrap();
        let report = parse_matching(&mut instance, "(2, 1)\n").unwrap();

        assert!(!report.is_valid());
        assert_eq!(
            report.violations(),
            &[Violation::UnacceptablePair {
                doctor: 2,
                hospital: 1
            }]
        );
    }

    #[test]
    fn test_parse_matching_duplicate_doctor() {
        let mut instance = instance();
        let report = parse_matching(&mut instance, "(1, 1)\n(1, 2)\n").unwrap();

        assert!(!report.is_valid());
        assert_eq!(
            report.violations(),
            &[Violation::DuplicateAssignment { doctor: 1 }]
        );
    }

    #[test]
    fn test_parse_matching_oversubscribed() {
        let mut instance = instance();
        let report = parse_matching(&mut instance, "(1, 1)\n(2, 1)\n").unwrap();

        assert!(!report.is_valid());
        assert_eq!(
            report.violations(),
            &[Violation::Oversubscribed {
                hospital: 1,
                assigned: 2,
                capacity: 1
            }]
        );
    }

    #[test]
    fn test_parse_matching_malformed_lines() {
        let mut instance = instance();

        let err = parse_matching(&mut instance, "(1)\n").unwrap_err();
        assert_eq!(err, ParseError::MalformedPair { line: 1 });

        let err = parse_matching(&mut instance, "(1, 2, 3)\n").unwrap_err();
        assert_eq!(err, ParseError::MalformedPair { line: 1 });

        let err = parse_matching(&mut instance, "(one, 2)\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidToken { line: 1, .. }));
    }

    #[test]
    fn test_parse_matching_unknown_ids() {
        let mut instance = instance();

        let err = parse_matching(&mut instance, "(3, 1)\n").unwrap_err();
        assert_eq!(err, ParseError::UnknownDoctor { line: 1, id: 3 });

        let err = parse_matching(&mut instance, "(1, 3)\n").unwrap_err();
        assert_eq!(err, ParseError::UnknownHospital { line: 1, id: 3 });
    }
}
