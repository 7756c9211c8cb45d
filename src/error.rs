use crate::board::Piece;
use crate::moves::types::Move;

/// Everything the rules engine can refuse to do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("illegal move in this position: {0}")]
    InvalidMove(Move),

    #[error("no moves to undo")]
    EmptyHistory,

    #[error("move {0} promotes a pawn but no promotion piece was given")]
    MissingPromotionChoice(Move),

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(Piece),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    /// Internal bug. Legality results derived from this state cannot be trusted.
    #[error("board invariant violated: {0}")]
    InvariantViolation(String),
}

impl ChessError {
    /// Stable snake_case name of the variant, free of caller-supplied text.
    pub fn code(&self) -> &'static str {
        match self {
            ChessError::InvalidMove(_) => "invalid_move",
            ChessError::EmptyHistory => "empty_history",
            ChessError::MissingPromotionChoice(_) => "missing_promotion_choice",
            ChessError::InvalidPromotion(_) => "invalid_promotion",
            ChessError::InvalidFen(_) => "invalid_fen",
            ChessError::InvalidSquare(_) => "invalid_square",
            ChessError::InvalidNotation(_) => "invalid_notation",
            ChessError::InvariantViolation(_) => "invariant_violation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_never_echo_input() {
        let e = ChessError::InvalidNotation("e2\"e4".to_string());
        assert!(e.to_string().contains('"'));
        assert_eq!(e.code(), "invalid_notation");
        assert_eq!(ChessError::EmptyHistory.code(), "empty_history");
        assert_eq!(
            ChessError::InvalidPromotion(Piece::King).code(),
            "invalid_promotion"
        );
    }
}
