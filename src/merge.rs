use crate::word::Word;

/// Word-combining function applied by [`Bitset::merge`](crate::Bitset::merge).
///
/// The first operand is the destination word, the second the source word.
/// `Not` is unary and ignores the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeOp {
    And,
    Or,
    Xor,
    AndNot,
    Not,
}

impl MergeOp {
    #[inline]
    pub const fn apply(self, dst: Word, src: Word) -> Word {
        match self {
            MergeOp::And => dst & src,
            MergeOp::Or => dst | src,
            MergeOp::Xor => dst ^ src,
            MergeOp::AndNot => dst & !src,
            MergeOp::Not => !dst,
        }
    }

    pub const fn is_unary(self) -> bool {
        matches!(self, MergeOp::Not)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit(value: bool) -> Word {
        value as Word
    }

    #[test]
    fn test_truth_tables() {
        for a in [false, true] {
            for b in [false, true] {
                let (x, y) = (bit(a), bit(b));
                assert_eq!(MergeOp::And.apply(x, y) & 1, bit(a && b));
                assert_eq!(MergeOp::Or.apply(x, y) & 1, bit(a || b));
                assert_eq!(MergeOp::Xor.apply(x, y) & 1, bit(a != b));
                assert_eq!(MergeOp::AndNot.apply(x, y) & 1, bit(a && !b));
                assert_eq!(MergeOp::Not.apply(x, y) & 1, bit(!a));
            }
        }
    }

    #[test]
    fn test_not_ignores_source() {
        assert_eq!(MergeOp::Not.apply(0, Word::MAX), Word::MAX);
        assert_eq!(MergeOp::Not.apply(0b1010, 0), !0b1010);
        assert!(MergeOp::Not.is_unary());
        assert!(!MergeOp::AndNot.is_unary());
    }

    #[test]
    fn test_full_words() {
        let a: Word = 0b1100;
        let b: Word = 0b1010;
        assert_eq!(MergeOp::And.apply(a, b), 0b1000);
        assert_eq!(MergeOp::Or.apply(a, b), 0b1110);
        assert_eq!(MergeOp::Xor.apply(a, b), 0b0110);
        assert_eq!(MergeOp::AndNot.apply(a, b), 0b0100);
    }
}
