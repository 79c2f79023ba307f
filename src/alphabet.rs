use std::fmt::Display;

use itertools::Itertools;

use crate::error::AutomatonError;

/// A symbol is simply a `char`.
pub type Symbol = char;

/// Represents an alphabet where a [`Symbol`] is just a single `char`.
///
/// The symbols are kept sorted and free of duplicates, which makes iteration over the alphabet
/// deterministic. Everything that names states in the order in which they are discovered (the
/// followpos construction and minimization) relies on this.
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord, Default)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Returns true if `c` may be used as a symbol, which are precisely the ASCII letters and digits.
    /// Everything else is either an operator of the regular expression grammar or not expressible in it.
    pub fn is_symbol(c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    /// Creates a new [`CharAlphabet`] from the given symbols, duplicates are removed. Fails with
    /// [`AutomatonError::InvalidSymbol`] if one of the symbols is not accepted by [`CharAlphabet::is_symbol`].
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self, AutomatonError> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if let Some(&invalid) = symbols.iter().find(|&&c| !Self::is_symbol(c)) {
            return Err(AutomatonError::InvalidSymbol(invalid));
        }
        Ok(Self::from_symbols(symbols))
    }

    fn from_symbols<I: IntoIterator<Item = char>>(symbols: I) -> Self {
        Self(symbols.into_iter().unique().sorted().collect())
    }

    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Collects the symbols that occur in `regex`, operators, parentheses and everything else that
    /// is not a symbol are skipped.
    pub fn from_regex(regex: &str) -> Self {
        Self::from_symbols(regex.chars().filter(|&c| Self::is_symbol(c)))
    }

    /// Returns an iterator over all symbols in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }

    /// The number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.binary_search(&symbol).is_ok()
    }

    /// Gives the position of `symbol` in the sorted alphabet.
    pub fn position(&self, symbol: Symbol) -> Option<usize> {
        self.0.binary_search(&symbol).ok()
    }

    /// Returns the alphabet containing the symbols of both `self` and `other`.
    pub fn union(&self, other: &CharAlphabet) -> CharAlphabet {
        Self::from_symbols(self.universe().chain(other.universe()))
    }

    /// Enumerates all words over the alphabet of length at most `max_len` in length-lexicographic
    /// order, beginning with the empty word.
    pub fn words_up_to(&self, max_len: usize) -> impl Iterator<Item = String> + '_ {
        (0..=max_len).flat_map(move |len| -> Box<dyn Iterator<Item = String> + '_> {
            if len == 0 {
                return Box::new(std::iter::once(String::new()));
            }
            Box::new(
                std::iter::repeat(self.0.iter())
                    .take(len)
                    .multi_cartesian_product()
                    .map(|word| word.into_iter().collect::<String>()),
            )
        })
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Display for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::CharAlphabet;
    use crate::error::AutomatonError;
    use itertools::Itertools;


    #[test]
    fn alphabet_from_regex() {
        let alphabet = CharAlphabet::from_regex("(b|a)*ab1b");
        assert_eq!(alphabet.to_string(), "1ab");
        assert_eq!(alphabet.size(), 3);
        assert!(alphabet.contains('b'));
        assert!(!alphabet.contains('|'));
        assert_eq!(alphabet.position('a'), Some(1));
        assert!(CharAlphabet::from_regex("").is_empty());
    }

    #[test]
    fn enumerating_words() {
        let alphabet = CharAlphabet::of_size(2);
        let words = alphabet.words_up_to(2).collect_vec();
        assert_eq!(words, vec!["", "a", "b", "aa", "ab", "ba", "bb"]);
        assert_eq!(alphabet.words_up_to(4).count(), 1 + 2 + 4 + 8 + 16);

        let empty = CharAlphabet::default();
        assert_eq!(empty.words_up_to(3).collect_vec(), vec![""]);
    }

    #[test]
    fn union_of_alphabets() {
        let union = CharAlphabet::new(['c', 'a'])
            .unwrap()
            .union(&CharAlphabet::new(['b', 'a']).unwrap());
        assert_eq!(union.to_string(), "abc");
    }

    #[test]
    fn only_ascii_letters_and_digits_are_symbols() {
        assert_eq!(CharAlphabet::new(['b', '7', 'b']).unwrap().to_string(), "7b");
        assert_eq!(
            CharAlphabet::new(['a', '-']),
            Err(AutomatonError::InvalidSymbol('-'))
        );
        assert_eq!(
            CharAlphabet::new([crate::regex::END_MARKER]),
            Err(AutomatonError::InvalidSymbol('#'))
        );
        assert_eq!(
            CharAlphabet::new(['é']),
            Err(AutomatonError::InvalidSymbol('é'))
        );
        assert_eq!(CharAlphabet::from_regex("(é|x)*-y").to_string(), "xy");
    }
}
