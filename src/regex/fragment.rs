use std::{collections::BTreeSet, fmt::Display};

use self::Fragment::*;

/// A regular expression that labels an edge during state elimination.
///
/// Fragments are only ever built through [`Fragment::alternate`], [`Fragment::concatenate`] and
/// [`Fragment::star`], which normalize their result a little: ε is the unit of concatenation,
/// nested concatenations and alternations are flattened, alternatives are deduplicated and sorted,
/// and `(ε)*`, `(x*)*` as well as `(ε|x)*` are collapsed. The empty language has no fragment, an edge
/// that does not exist is simply absent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fragment {
    /// The empty word, rendered as `()`.
    Epsilon,
    /// A single symbol.
    Symbol(char),
    /// Alternation of at least two fragments, none of which is an alternation.
    Alternation(Vec<Fragment>),
    /// Concatenation of at least two fragments, none of which is a concatenation or ε.
    Concatenation(Vec<Fragment>),
    /// Kleene closure of a fragment that is neither ε nor a star.
    Star(Box<Fragment>),
}

impl Fragment {
    /// Tests whether the fragment matches the empty word.
    pub fn nullable(&self) -> bool {
        match self {
            Epsilon | Star(_) => true,
            Symbol(_) => false,
            Alternation(xs) => xs.iter().any(Fragment::nullable),
            Concatenation(xs) => xs.iter().all(Fragment::nullable),
        }
    }

    /// Builds `self|other`.
    pub fn alternate(self, other: Fragment) -> Fragment {
        let mut alternatives = BTreeSet::new();
        for x in [self, other] {
            match x {
                Alternation(xs) => alternatives.extend(xs),
                x => {
                    alternatives.insert(x);
                }
            }
        }
        if alternatives.len() > 1
            && alternatives.iter().any(|x| *x != Epsilon && x.nullable())
        {
            alternatives.remove(&Epsilon);
        }
        let mut alternatives: Vec<_> = alternatives.into_iter().collect();
        match alternatives.len() {
            1 => alternatives.swap_remove(0),
            _ => Alternation(alternatives),
        }
    }

    /// Builds `self other`.
    pub fn concatenate(self, other: Fragment) -> Fragment {
        let mut parts = Vec::new();
        for x in [self, other] {
            match x {
                Epsilon => {}
                Concatenation(xs) => parts.extend(xs),
                x => parts.push(x),
            }
        }
        match parts.len() {
            0 => Epsilon,
            1 => parts.swap_remove(0),
            _ => Concatenation(parts),
        }
    }

    /// Builds `self*`.
    pub fn star(self) -> Fragment {
        match self {
            Epsilon => Epsilon,
            Star(x) => Star(x),
            Alternation(xs) if xs.contains(&Epsilon) => {
                let rest = xs
                    .into_iter()
                    .filter(|x| *x != Epsilon)
                    .reduce(Fragment::alternate)
                    .unwrap_or(Epsilon);
                rest.star()
            }
            x => Star(Box::new(x)),
        }
    }

    /// Binding strength of the outermost operator, higher binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            Alternation(_) => 0,
            Concatenation(_) => 1,
            Star(_) => 2,
            Epsilon | Symbol(_) => 3,
        }
    }

    fn fmt_within(&self, f: &mut std::fmt::Formatter<'_>, context: u8) -> std::fmt::Result {
        let parenthesize = self.precedence() < context;
        if parenthesize {
            write!(f, "(")?;
        }
        match self {
            Epsilon => write!(f, "()")?,
            Symbol(c) => write!(f, "{c}")?,
            Alternation(xs) => {
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    x.fmt_within(f, 1)?;
                }
            }
            Concatenation(xs) => {
                for x in xs {
                    x.fmt_within(f, 2)?;
                }
            }
            Star(x) => {
                x.fmt_within(f, 3)?;
                write!(f, "*")?;
            }
        }
        if parenthesize {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_within(f, 0)
    }
}
