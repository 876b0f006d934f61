use anyhow::{anyhow, Result};
use othello::{inverse, Square};
use serde::{Deserialize, Serialize};

/// How much a stored score can be trusted, in increasing order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    /// A one ply static estimate on the frontier of the book.
    Leaf,
    /// The negamax merge of the known children and the best unplayed move.
    Branch,
    /// An exact result that is never overwritten.
    Solved,
}

impl NodeKind {
    pub fn tag(&self) -> u8 {
        match self {
            NodeKind::Leaf => 0,
            NodeKind::Branch => 1,
            NodeKind::Solved => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(NodeKind::Leaf),
            1 => Ok(NodeKind::Branch),
            2 => Ok(NodeKind::Solved),
            _ => Err(anyhow!("Unknown node kind tag {}", tag)),
        }
    }
}

/// The move a Branch node would explore next.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BestUnplayed {
    /// An unplayed move whose deviation estimate beat every stored child.
    Square(Square),
    /// The best move already leads to a stored child, or no unplayed move is left.
    InBook,
    /// The side to move has to pass.
    NoLegalMoves,
}

impl BestUnplayed {
    pub const IN_BOOK_CODE: i8 = -1;
    pub const NO_LEGAL_MOVES_CODE: i8 = -2;

    pub fn code(&self) -> i8 {
        match self {
            BestUnplayed::Square(square) => square.index() as i8,
            BestUnplayed::InBook => Self::IN_BOOK_CODE,
            BestUnplayed::NoLegalMoves => Self::NO_LEGAL_MOVES_CODE,
        }
    }

    pub fn from_code(code: i8) -> Result<Self> {
        match code {
            Self::IN_BOOK_CODE => Ok(BestUnplayed::InBook),
            Self::NO_LEGAL_MOVES_CODE => Ok(BestUnplayed::NoLegalMoves),
            code => Ok(BestUnplayed::Square(Square::try_from_index(code as i64)?)),
        }
    }

    fn transform(&self, symmetry: usize) -> Self {
        match self {
            BestUnplayed::Square(square) => BestUnplayed::Square(square.transform(symmetry)),
            other => *other,
        }
    }
}

/// A book entry. Scores are centi-disks from the point of view of the side to move.
///
/// Equality only looks at the move of Branch entries; a Solved entry's move is informative and Leaf entries
/// carry none.
#[derive(Clone, Copy, Debug)]
pub enum Data {
    Leaf {
        score: i32,
    },
    Branch {
        score: i32,
        best_unplayed: BestUnplayed,
    },
    Solved {
        score: i32,
        best_move: Option<Square>,
    },
}

impl Data {
    pub fn kind(&self) -> NodeKind {
        match self {
            Data::Leaf { .. } => NodeKind::Leaf,
            Data::Branch { .. } => NodeKind::Branch,
            Data::Solved { .. } => NodeKind::Solved,
        }
    }

    pub fn score(&self) -> i32 {
        match self {
            Data::Leaf { score } | Data::Branch { score, .. } | Data::Solved { score, .. } => *score,
        }
    }

    /// Whether `incoming` may overwrite this entry. Solved entries are final, Branch entries only give way to
    /// knowledge at least as strong and Leaf entries accept anything.
    pub fn accepts(&self, incoming: &Data) -> bool {
        match self {
            Data::Solved { .. } => false,
            Data::Branch { .. } => incoming.kind() >= NodeKind::Branch,
            Data::Leaf { .. } => true,
        }
    }

    /// The signed square code written to book files.
    pub fn square_code(&self) -> i8 {
        match self {
            Data::Leaf { .. } => BestUnplayed::IN_BOOK_CODE,
            Data::Branch { best_unplayed, .. } => best_unplayed.code(),
            Data::Solved { best_move, .. } => best_move
                .map(|square| square.index() as i8)
                .unwrap_or(BestUnplayed::NO_LEGAL_MOVES_CODE),
        }
    }

    /// Every kind must carry a valid square or sentinel. Leaf entries drop it and Solved entries keep only a
    /// square.
    pub fn decode(kind: NodeKind, score: i32, square_code: i8) -> Result<Self> {
        let best_unplayed = BestUnplayed::from_code(square_code)?;

        Ok(match kind {
            NodeKind::Leaf => Data::Leaf { score },
            NodeKind::Branch => Data::Branch {
                score,
                best_unplayed,
            },
            NodeKind::Solved => Data::Solved {
                score,
                best_move: match best_unplayed {
                    BestUnplayed::Square(square) => Some(square),
                    BestUnplayed::InBook | BestUnplayed::NoLegalMoves => None,
                },
            },
        })
    }

    /// Maps the stored move through a board symmetry.
    pub fn transform(&self, symmetry: usize) -> Self {
        match *self {
            Data::Leaf { score } => Data::Leaf { score },
            Data::Branch {
                score,
                best_unplayed,
            } => Data::Branch {
                score,
                best_unplayed: best_unplayed.transform(symmetry),
            },
            Data::Solved { score, best_move } => Data::Solved {
                score,
                best_move: best_move.map(|square| square.transform(symmetry)),
            },
        }
    }

    pub(crate) fn untransform(&self, symmetry: usize) -> Self {
        self.transform(inverse(symmetry))
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Data::Leaf { score: a }, Data::Leaf { score: b }) => a == b,
            (
                Data::Branch {
                    score: a,
                    best_unplayed: a_unplayed,
                },
                Data::Branch {
                    score: b,
                    best_unplayed: b_unplayed,
                },
            ) => a == b && a_unplayed == b_unplayed,
            (Data::Solved { score: a, .. }, Data::Solved { score: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Data {}

/// The result of a single scoring call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveScore {
    pub square: Option<Square>,
    pub score: i32,
}

impl MoveScore {
    pub fn new(square: Option<Square>, score: i32) -> Self {
        Self { square, score }
    }
}

/// A stored child of a position, reached by playing `square`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Successor {
    pub square: Square,
    /// The child's stored score, from the child's side to move.
    pub score: i32,
    pub kind: NodeKind,
}

impl Successor {
    /// The child's score seen by the side choosing the move.
    pub fn mover_score(&self) -> i32 {
        -self.score
    }
}
