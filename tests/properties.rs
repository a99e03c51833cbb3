use proptest::prelude::*;
use wordbits::{BITS_PER_WORD, Bitset, BitsetError, MergeOp};

const MAX_LEN: usize = 4 * BITS_PER_WORD + 3;

fn bitset_from(bits: &[bool]) -> Bitset {
    let mut set = Bitset::new(bits.len()).unwrap();
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            set.set(i).unwrap();
        }
    }
    set
}

fn to_bools(set: &Bitset) -> Vec<bool> {
    (0..set.len()).map(|i| set.test(i).unwrap()).collect()
}

fn bits() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..=MAX_LEN)
}

fn binary_op() -> impl Strategy<Value = MergeOp> {
    prop_oneof![
        Just(MergeOp::And),
        Just(MergeOp::Or),
        Just(MergeOp::Xor),
        Just(MergeOp::AndNot),
    ]
}

fn expected(op: MergeOp, a: bool, b: bool) -> bool {
    match op {
        MergeOp::And => a && b,
        MergeOp::Or => a || b,
        MergeOp::Xor => a != b,
        MergeOp::AndNot => a && !b,
        MergeOp::Not => !a,
    }
}

proptest! {
    #[test]
    fn new_allocates_ceil_words(len in 0..=MAX_LEN * 4) {
        let set = Bitset::new(len).unwrap();
        prop_assert_eq!(set.word_count(), len.div_ceil(BITS_PER_WORD));
        prop_assert!(set.as_words().iter().all(|&w| w == 0));
    }

    #[test]
    fn set_touches_only_target(bits in bits(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!bits.is_empty());
        let target = pick.index(bits.len());
        let mut set = bitset_from(&bits);

        set.set(target).unwrap();
        let mut model = bits.clone();
        model[target] = true;
        prop_assert_eq!(to_bools(&set), model);
    }

    #[test]
    fn toggle_twice_restores(bits in bits(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!bits.is_empty());
        let target = pick.index(bits.len());
        let mut set = bitset_from(&bits);

        set.toggle(target).unwrap();
        set.toggle(target).unwrap();
        prop_assert_eq!(to_bools(&set), bits);
    }

    #[test]
    fn bit_at_or_past_len_is_rejected(len in 0..=MAX_LEN, past in 0usize..BITS_PER_WORD * 2) {
        let mut set = Bitset::new(len).unwrap();
        let bit = len + past;
        let expected = Err(BitsetError::OutOfRange { bit, len });
        prop_assert_eq!(set.set(bit), expected.clone());
        prop_assert_eq!(set.reset(bit), expected.clone());
        prop_assert_eq!(set.toggle(bit), expected.clone());
        prop_assert_eq!(set.test(bit).map(|_| ()), expected);
    }

    #[test]
    fn merge_follows_truth_table(a in bits(), b in bits(), op in binary_op()) {
        let mut dst = bitset_from(&a);
        let src = bitset_from(&b);
        let shared_words = src.word_count().min(dst.word_count());
        let untouched = dst.as_words()[shared_words..].to_vec();

        dst.merge(&src, op);

        let shared_bits = shared_words * BITS_PER_WORD;
        for i in 0..a.len() {
            let want = if i < shared_bits {
                expected(op, a[i], b.get(i).copied().unwrap_or(false))
            } else {
                a[i]
            };
            prop_assert_eq!(dst.test(i).unwrap(), want, "bit {}", i);
        }
        prop_assert_eq!(&dst.as_words()[shared_words..], untouched.as_slice());
    }

    #[test]
    fn not_flips_every_word(bits in bits()) {
        let mut set = bitset_from(&bits);
        let before = set.as_words().to_vec();
        set.not();
        for (after, before) in set.as_words().iter().zip(&before) {
            prop_assert_eq!(*after, !*before);
        }
        let flipped: Vec<bool> = bits.iter().map(|b| !b).collect();
        prop_assert_eq!(to_bools(&set), flipped);
    }

    #[test]
    fn duplicate_is_equal_and_independent(bits in bits(), scramble in any::<bool>()) {
        let mut set = bitset_from(&bits);
        if scramble {
            set.not();
        }
        let mut copy = set.duplicate().unwrap();
        prop_assert_eq!(copy.as_words(), set.as_words());

        copy.not();
        if !set.is_empty() {
            prop_assert_ne!(copy.as_words(), set.as_words());
        }
    }

    #[test]
    fn resize_preserves_prefix(bits in bits(), new_len in 0..=MAX_LEN * 2) {
        let mut set = bitset_from(&bits);
        set.resize(new_len).unwrap();

        prop_assert_eq!(set.len(), new_len);
        prop_assert_eq!(set.word_count(), new_len.div_ceil(BITS_PER_WORD));
        for i in 0..new_len {
            let want = bits.get(i).copied().unwrap_or(false);
            prop_assert_eq!(set.test(i).unwrap(), want, "bit {}", i);
        }
    }

    #[test]
    fn failed_resize_is_non_destructive(bits in bits()) {
        let mut set = bitset_from(&bits);
        let words = set.as_words().to_vec();

        let result = set.resize(usize::MAX);
        prop_assert!(
            matches!(result, Err(BitsetError::Allocation { .. })),
            "unexpected result {:?}",
            result
        );
        prop_assert_eq!(set.len(), bits.len());
        prop_assert_eq!(set.as_words(), words.as_slice());
    }
}
