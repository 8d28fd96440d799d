//! Instance file parser, including the tie-bracket grammar for
//! hospital preference lists.

use crate::parse::{numbered_lines, parse_number, ParseError};
use crate::types::Instance;

/// Parse an instance file into an [`Instance`].
///
/// Blank lines are ignored. The doctor and hospital lines must appear
/// in id order and their leading id tokens are checked against that
/// order.
///
/// # Example
///
/// ```
/// use hrmatch::parse_instance;
///
/// let input = "\
/// 2
/// 1
/// 1: 1
/// 2: 1
/// 1: 1: (1 2)
/// ";
/// let instance = parse_instance(input).unwrap();
///
/// assert_eq!(instance.num_doctors(), 2);
/// // Doctors 1 and 2 are tied at rank 1
/// assert_eq!(instance.hospital(1).unwrap().rank_of(1), Some(1));
/// assert_eq!(instance.hospital(1).unwrap().rank_of(2), Some(1));
/// ```
pub fn parse_instance(input: &str) -> Result<Instance, ParseError> {
    let mut lines = numbered_lines(input);

    let num_doctors: usize = {
        let (line, text) = lines.next().ok_or(ParseError::UnexpectedEof {
            expected: "number of doctors",
        })?;
        parse_number(text, line)?
    };
    let num_hospitals: usize = {
        let (line, text) = lines.next().ok_or(ParseError::UnexpectedEof {
            expected: "number of hospitals",
        })?;
        parse_number(text, line)?
    };

    let mut instance = Instance::new(num_doctors, num_hospitals);

    for expected in 1..=num_doctors {
        let (line, text) = lines.next().ok_or(ParseError::UnexpectedEof {
            expected: "doctor preference line",
        })?;
        parse_doctor_line(&mut instance, text, line, expected as u32, num_hospitals)?;
    }

    for expected in 1..=num_hospitals {
        let (line, text) = lines.next().ok_or(ParseError::UnexpectedEof {
            expected: "hospital preference line",
        })?;
        parse_hospital_line(&mut instance, text, line, expected as u32, num_doctors)?;
    }

    Ok(instance)
}

/// Parse `"<doctorId>: <h1> <h2> ..."`. The preference list may be
/// empty.
fn parse_doctor_line(
    instance: &mut Instance,
    text: &str,
    line: usize,
    expected_id: u32,
    num_hospitals: usize,
) -> Result<(), ParseError> {
    let (id_part, prefs) = text
        .split_once(':')
        .ok_or(ParseError::MissingDelimiter { line })?;

    let doctor_id: u32 = parse_number(id_part, line)?;
    if doctor_id != expected_id {
        return Err(ParseError::IdMismatch {
            line,
            expected: expected_id,
            found: doctor_id,
        });
    }

    for token in prefs.split_whitespace() {
        let hospital_id: u32 = parse_number(token, line)?;
        if hospital_id == 0 || hospital_id as usize > num_hospitals {
            return Err(ParseError::UnknownHospital {
                line,
                id: hospital_id,
            });
        }
        if instance
            .doctor(doctor_id)
            .is_some_and(|doctor| doctor.preference_list().contains(&hospital_id))
        {
            return Err(ParseError::DuplicateEntry {
                line,
                id: hospital_id,
            });
        }
        instance.add_doctor_pref(doctor_id, hospital_id);
    }

    Ok(())
}

/// Parse `"<hospitalId>: <capacity>: <pref-list>"`. The preference
/// list section may be absent entirely.
fn parse_hospital_line(
    instance: &mut Instance,
    text: &str,
    line: usize,
    expected_id: u32,
    num_doctors: usize,
) -> Result<(), ParseError> {
    let mut parts = text.splitn(3, ':');
    let id_part = parts.next().unwrap_or("");
    let capacity_part = parts.next().ok_or(ParseError::MissingDelimiter { line })?;
    let prefs = parts.next().unwrap_or("");

    let hospital_id: u32 = parse_number(id_part, line)?;
    if hospital_id != expected_id {
        return Err(ParseError::IdMismatch {
            line,
            expected: expected_id,
            found: hospital_id,
        });
    }

    let capacity: usize = parse_number(capacity_part, line)?;
    instance.set_hospital_capacity(hospital_id, capacity);

    parse_hospital_prefs(instance, hospital_id, prefs, line, num_doctors)
}

/// Scan a hospital preference list.
///
/// Doctor ids and whitespace, with `(a b c)` marking a tie. The rank
/// starts at 1 and increments after each untied id and after each
/// closing bracket; ids inside a tie all receive the tie's rank.
fn parse_hospital_prefs(
    instance: &mut Instance,
    hospital_id: u32,
    prefs: &str,
    line: usize,
    num_doctors: usize,
) -> Result<(), ParseError> {
    let bytes = prefs.as_bytes();
    let mut pos = 0;
    let mut rank = 1u32;
    let mut in_tie = false;
    let mut tie_members = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b' ' | b'\t' => pos += 1,
            b'(' => {
                if in_tie {
                    return Err(ParseError::UnbalancedTie { line });
                }
                in_tie = true;
                tie_members = 0;
                pos += 1;
            }
            b')' => {
                if !in_tie {
                    return Err(ParseError::UnbalancedTie { line });
                }
                if tie_members == 0 {
                    return Err(ParseError::EmptyTie { line });
                }
                in_tie = false;
                rank += 1;
                pos += 1;
            }
            b'0'..=b'9' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                let doctor_id: u32 = parse_number(&prefs[start..pos], line)?;
                if doctor_id == 0 || doctor_id as usize > num_doctors {
                    return Err(ParseError::UnknownDoctor {
                        line,
                        id: doctor_id,
                    });
                }
                if instance
                    .hospital(hospital_id)
                    .is_some_and(|hospital| hospital.rank_of(doctor_id).is_some())
                {
                    return Err(ParseError::DuplicateEntry {
                        line,
                        id: doctor_id,
                    });
                }
                instance.add_hospital_pref(hospital_id, doctor_id, rank);
                if in_tie {
                    tie_members += 1;
                } else {
                    rank += 1;
                }
            }
            _ => {
                let token = prefs[pos..]
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                return Err(ParseError::InvalidToken { line, token });
            }
        }
    }

    if in_tie {
        return Err(ParseError::UnbalancedTie { line });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
