//! Parsers for the instance and matching file formats.
//!
//! ## File formats
//!
//! An instance file is line-oriented with 1-based ids:
//!
//! ```text
//! 2                 number of doctors
//! 2                 number of hospitals
//! 1: 1 2            doctor 1, hospitals in decreasing preference
//! 2: 1 2
//! 1: 1: (1 2)       hospital 1, capacity 1, tied preference list
//! 2: 1: 1 2
//! ```
//!
//! In a hospital preference list `(a b c)` is a tie: all members
//! share one rank, and the rank increments after each untied entry
//! and after each closing bracket.
//!
//! A matching file holds one pair per line, tokens separated by any
//! run of brackets, commas or spaces, e.g. `(1, 2)` for doctor 1
//! assigned to hospital 2.
//!
//! ## Error split
//!
//! Structural problems (bad tokens, broken brackets, unknown ids) are
//! [`ParseError`]s and abort before any matching logic runs. Semantic
//! problems in a supplied matching (unacceptable pair, doctor
//! assigned twice, oversubscription) are
//! [`Violation`](crate::engine::Violation)s carried in the returned
//! report, because they describe an invalid matching rather than an
//! unreadable file.

mod instance;
mod matching;

pub use instance::parse_instance;
pub use matching::parse_matching;

use thiserror::Error;

/// Structural error in an instance or matching file.
///
/// Every variant carries the 1-based line number it was detected on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The file ended before a required line.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for
        expected: &'static str,
    },

    /// A token that should have been a number was not.
    #[error("line {line}: invalid token '{token}'")]
    InvalidToken {
        /// Line the token appeared on
        line: usize,
        /// The offending token
        token: String,
    },

    /// A line is missing its `:` delimiter.
    #[error("line {line}: missing ':' delimiter")]
    MissingDelimiter {
        /// The malformed line
        line: usize,
    },

    /// The id at the start of a line disagrees with the line's
    /// position in the file.
    #[error("line {line}: expected id {expected}, found {found}")]
    IdMismatch {
        /// The malformed line
        line: usize,
        /// Id implied by line order
        expected: u32,
        /// Id actually present
        found: u32,
    },

    /// A doctor id outside `1..=numDoctors`.
    #[error("line {line}: unknown doctor {id}")]
    UnknownDoctor {
        /// Line the id appeared on
        line: usize,
        /// The unknown id
        id: u32,
    },

    /// A hospital id outside `1..=numHospitals`.
    #[error("line {line}: unknown hospital {id}")]
    UnknownHospital {
        /// Line the id appeared on
        line: usize,
        /// The unknown id
        id: u32,
    },

    /// A tie bracket opened inside a tie, closed outside one, or left
    /// open at the end of the line.
    #[error("line {line}: unbalanced tie bracket")]
    UnbalancedTie {
        /// The malformed line
        line: usize,
    },

    /// A tie group with no members.
    #[error("line {line}: empty tie group")]
    EmptyTie {
        /// The malformed line
        line: usize,
    },

    /// The same id listed twice in one preference list.
    #[error("line {line}: duplicate preference entry {id}")]
    DuplicateEntry {
        /// The malformed line
        line: usize,
        /// The repeated id
        id: u32,
    },

    /// A matching line without exactly two numeric tokens.
    #[error("line {line}: expected '(doctor, hospital)' pair")]
    MalformedPair {
        /// The malformed line
        line: usize,
    },
}

/// Iterate non-empty trimmed lines, keeping 1-based line numbers
/// from the unfiltered file for error reporting.
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parse one whitespace-trimmed token as a number.
fn parse_number<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token.trim().parse().map_err(|_| ParseError::InvalidToken {
        line,
        token: token.trim().to_string(),
    })
}
