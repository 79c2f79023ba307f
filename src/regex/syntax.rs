use tracing::trace;

use crate::{alphabet::CharAlphabet, error::ParseError, math::PositionSet};

/// The symbol that is appended to every regular expression. Its position is the largest one in the
/// tree and a state of the constructed DFA is accepting if and only if it contains this position.
pub const END_MARKER: char = '#';

/// Groups may not be nested deeper than this, the parser is recursive in the nesting depth.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Index of a [`Node`] in the arena of a [`SyntaxTree`].
pub type NodeId = usize;

/// The different kinds of nodes in a [`SyntaxTree`]. Inner nodes refer to their children by
/// [`NodeId`], and children are always stored before their parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An occurrence of a symbol, together with its position.
    Leaf {
        /// The symbol.
        symbol: char,
        /// Positions are assigned from left to right, starting at 0.
        position: usize,
    },
    /// The empty word, written `()`.
    Empty,
    /// `left|right`
    Alternation(NodeId, NodeId),
    /// `left right`
    Concatenation(NodeId, NodeId),
    /// `child*`
    Star(NodeId),
}

/// A node of a [`SyntaxTree`] together with its `nullable`, `firstpos` and `lastpos` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    nullable: bool,
    firstpos: PositionSet,
    lastpos: PositionSet,
}

impl Node {
    /// The kind of node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether the subexpression matches the empty word.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Positions that can match the first symbol of a word matched by the subexpression.
    pub fn firstpos(&self) -> &PositionSet {
        &self.firstpos
    }

    /// Positions that can match the last symbol of a word matched by the subexpression.
    pub fn lastpos(&self) -> &PositionSet {
        &self.lastpos
    }
}

/// For every position, the set of positions that can immediately follow it in a word that matches the
/// whole expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowposTable(Vec<PositionSet>);

impl FollowposTable {
    /// The followpos set of `position`.
    pub fn get(&self, position: usize) -> &PositionSet {
        &self.0[position]
    }

    /// The number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no positions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The syntax tree of a regular expression `R`, augmented to `(R)#` with the [`END_MARKER`].
///
/// Nodes are stored in an arena in the order in which the parser completes them, which is a post-order of
/// the tree. The root is therefore the last node and the attributes can be computed in a single
/// forward sweep.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    symbols: Vec<char>,
}

impl SyntaxTree {
    /// Parses `regex` and computes the attributes of all nodes.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let tree = SyntaxTree::parse("(a|b)*abb").unwrap();
    /// assert_eq!(tree.leaf_count(), 6);
    /// assert_eq!(tree.root().firstpos().iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    /// assert!(SyntaxTree::parse("(a|b").is_err());
    /// ```
    pub fn parse(regex: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::new(regex);
        let body = parser.alternation()?;
        if let Some(c) = parser.peek() {
            return Err(parser.unexpected(c));
        }
        let end = parser.leaf(END_MARKER);
        parser.push(NodeKind::Concatenation(body, end));

        trace!(
            "parsed \"{regex}\" into {} nodes with {} positions",
            parser.kinds.len(),
            parser.symbols.len()
        );

        Ok(Self {
            nodes: annotate(parser.kinds),
            symbols: parser.symbols,
        })
    }

    /// The root of the tree, i.e. the concatenation of the expression with the end marker.
    pub fn root(&self) -> &Node {
        self.nodes.last().expect("a syntax tree always has a root")
    }

    /// Gives the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes, children come before their parents.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The number of leaves that carry a symbol, including the end marker.
    pub fn leaf_count(&self) -> usize {
        self.symbols.len()
    }

    /// The position of the end marker, which is the largest position.
    pub fn end_marker_position(&self) -> usize {
        self.symbols.len() - 1
    }

    /// The symbol at `position`.
    pub fn symbol_at(&self, position: usize) -> char {
        self.symbols[position]
    }

    /// Computes the followpos table. Sequencing and repetition are the only sources of
    /// followpos entries: in a concatenation every last position of the left part is followed by
    /// every first position of the right part, and in a star every last position of the child is
    /// followed by every first position of the child.
    pub fn followpos(&self) -> FollowposTable {
        let mut table = vec![PositionSet::new(); self.leaf_count()];
        for node in &self.nodes {
            let (from, to) = match node.kind {
                NodeKind::Concatenation(left, right) => (&self.nodes[left], &self.nodes[right]),
                NodeKind::Star(child) => (&self.nodes[child], &self.nodes[child]),
                _ => continue,
            };
            for p in from.lastpos.iter() {
                table[p].union_with(&to.firstpos);
            }
        }
        FollowposTable(table)
    }
}

fn union(left: &PositionSet, right: &PositionSet) -> PositionSet {
    let mut out = left.clone();
    out.union_with(right);
    out
}

/// Computes `nullable`, `firstpos` and `lastpos` for all nodes. Relies on children preceding their parents.
fn annotate(kinds: Vec<NodeKind>) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let (nullable, firstpos, lastpos) = match kind {
            NodeKind::Leaf { position, .. } => {
                let pos = PositionSet::from_iter([position]);
                (false, pos.clone(), pos)
            }
            NodeKind::Empty => (true, PositionSet::new(), PositionSet::new()),
            NodeKind::Alternation(left, right) => {
                let (left, right) = (&nodes[left], &nodes[right]);
                (
                    left.nullable || right.nullable,
                    union(&left.firstpos, &right.firstpos),
                    union(&left.lastpos, &right.lastpos),
                )
            }
            NodeKind::Concatenation(left, right) => {
                let (left, right) = (&nodes[left], &nodes[right]);
                let firstpos = if left.nullable {
                    union(&left.firstpos, &right.firstpos)
                } else {
                    left.firstpos.clone()
                };
                let lastpos = if right.nullable {
                    union(&left.lastpos, &right.lastpos)
                } else {
                    right.lastpos.clone()
                };
                (left.nullable && right.nullable, firstpos, lastpos)
            }
            NodeKind::Star(child) => {
                let child = &nodes[child];
                (true, child.firstpos.clone(), child.lastpos.clone())
            }
        };
        nodes.push(Node {
            kind,
            nullable,
            firstpos,
            lastpos,
        });
    }
    nodes
}

type Res<T> = Result<T, ParseError>;

/// Recursive descent parser, the state of one parse is kept here and nowhere else.
struct Parser {
    input: Vec<char>,
    cursor: usize,
    depth: usize,
    kinds: Vec<NodeKind>,
    symbols: Vec<char>,
}

impl Parser {
    fn new(regex: &str) -> Self {
        Self {
            input: regex.chars().collect(),
            cursor: 0,
            depth: 0,
            kinds: Vec::new(),
            symbols: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.cursor).copied()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.kinds.push(kind);
        self.kinds.len() - 1
    }

    fn leaf(&mut self, symbol: char) -> NodeId {
        let position = self.symbols.len();
        self.symbols.push(symbol);
        self.push(NodeKind::Leaf { symbol, position })
    }

    /// Builds the error for a character `c` at the cursor that cannot start an atom.
    fn unexpected(&self, c: char) -> ParseError {
        let position = self.cursor;
        match c {
            ')' if self.depth == 0 => ParseError::UnbalancedParenthesis { position },
            ')' => ParseError::MalformedPattern {
                position,
                reason: "empty alternative before `)`",
            },
            '|' => ParseError::MalformedPattern {
                position,
                reason: "empty alternative before `|`",
            },
            '*' => ParseError::MalformedPattern {
                position,
                reason: "`*` must follow a symbol or a group",
            },
            symbol => ParseError::InvalidSymbol { position, symbol },
        }
    }

    fn alternation(&mut self) -> Res<NodeId> {
        let mut tree = self.concatenation()?;
        while self.peek() == Some('|') {
            self.cursor += 1;
            let right = self.concatenation()?;
            tree = self.push(NodeKind::Alternation(tree, right));
        }
        Ok(tree)
    }

    fn concatenation(&mut self) -> Res<NodeId> {
        let mut tree = self.star()?;
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let right = self.star()?;
            tree = self.push(NodeKind::Concatenation(tree, right));
        }
        Ok(tree)
    }

    fn star(&mut self) -> Res<NodeId> {
        let mut tree = self.atom()?;
        while self.peek() == Some('*') {
            self.cursor += 1;
            tree = self.push(NodeKind::Star(tree));
        }
        Ok(tree)
    }

    fn atom(&mut self) -> Res<NodeId> {
        let open = self.cursor;
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd("expected a symbol or a group")),
            Some('(') => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                self.cursor += 1;
                match self.peek() {
                    Some(')') => {
                        self.cursor += 1;
                        return Ok(self.push(NodeKind::Empty));
                    }
                    None => return Err(ParseError::UnbalancedParenthesis { position: open }),
                    _ => {}
                }
                self.depth += 1;
                let inner = self.alternation()?;
                self.depth -= 1;
                if self.peek() != Some(')') {
                    return Err(ParseError::UnbalancedParenthesis { position: open });
                }
                self.cursor += 1;
                Ok(inner)
            }
            Some(c) if CharAlphabet::is_symbol(c) => {
                self.cursor += 1;
                Ok(self.leaf(c))
            }
            Some(c) => Err(self.unexpected(c)),
        }
    }
}
