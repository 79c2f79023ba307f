use thiserror::Error;

/// Reasons for which a regular expression is rejected. All variants describe a malformed
/// pattern; where it makes sense, the offset (counted in characters) of the offending
/// character in the input is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An operator or closing parenthesis appeared where an atom was expected.
    #[error("malformed pattern at offset {position}: {reason}")]
    MalformedPattern {
        /// Offset of the offending character.
        position: usize,
        /// What the parser expected instead.
        reason: &'static str,
    },
    /// The pattern ended where an atom was expected, e.g. after a trailing `|`.
    #[error("unexpected end of pattern: {0}")]
    UnexpectedEnd(&'static str),
    /// A parenthesis has no matching counterpart.
    #[error("unbalanced parenthesis at offset {position}")]
    UnbalancedParenthesis {
        /// Offset of the unmatched parenthesis.
        position: usize,
    },
    /// A character that is neither an ASCII letter or digit nor an operator of the grammar.
    #[error("invalid symbol `{symbol}` at offset {position}, only ASCII letters and digits are supported")]
    InvalidSymbol {
        /// Offset of the symbol.
        position: usize,
        /// The symbol itself.
        symbol: char,
    },
    /// Groups are nested deeper than the parser is willing to recurse.
    #[error("pattern nests deeper than {limit} groups")]
    NestingTooDeep {
        /// The maximal nesting depth.
        limit: usize,
    },
}

impl ParseError {
    /// Returns the offset at which the error was detected, if it is tied to a specific character.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::MalformedPattern { position, .. }
            | ParseError::UnbalancedParenthesis { position }
            | ParseError::InvalidSymbol { position, .. } => Some(*position),
            ParseError::UnexpectedEnd(_) | ParseError::NestingTooDeep { .. } => None,
        }
    }
}

/// Errors that occur when an automaton is manipulated through state names or read from its
/// textual representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// No state with the given name exists.
    #[error("no state named \"{0}\"")]
    UnknownState(String),
    /// The symbol does not belong to the alphabet of the automaton.
    #[error("symbol `{0}` is not part of the alphabet")]
    UnknownSymbol(char),
    /// The character cannot be a symbol of an alphabet, see [`crate::CharAlphabet::is_symbol`].
    #[error("`{0}` is not a valid symbol, only ASCII letters and digits are supported")]
    InvalidSymbol(char),
    /// A state with the given name exists already.
    #[error("a state named \"{0}\" already exists")]
    DuplicateState(String),
    /// The textual representation could not be parsed.
    #[error("line {line}: {reason}")]
    TextFormat {
        /// The line (counted from 1) on which the problem occurred.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
}
