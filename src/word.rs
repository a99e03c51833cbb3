/// Storage unit. Bits are packed least-significant first.
pub type Word = usize;

pub const BITS_PER_WORD: usize = Word::BITS as usize;

/// Number of words needed to hold `bits` bits.
#[inline]
pub const fn words_for_bits(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_WORD)
}

#[inline]
pub(crate) const fn word_and_offset(bit: usize) -> (usize, u32) {
    (bit / BITS_PER_WORD, (bit % BITS_PER_WORD) as u32)
}

#[inline]
pub(crate) const fn bit_mask(offset: u32) -> Word {
    1 << offset
}

/// Mask keeping the `bits` lowest bits of a word. `bits` must be below `BITS_PER_WORD`.
#[inline]
pub(crate) const fn low_mask(bits: u32) -> Word {
    bit_mask(bits) - 1
}
