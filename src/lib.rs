use std::{
    fmt::{self, Write as _},
    ops::{BitAndAssign, BitOrAssign, BitXorAssign},
};

pub use error::BitsetError;
pub use merge::MergeOp;
pub use word::{BITS_PER_WORD, Word, words_for_bits};

use word::{bit_mask, low_mask, word_and_offset};

#[cfg(feature = "capi")]
pub mod capi;
mod error;
mod merge;
mod word;

/// ## A resizable bitset packed into native words.
///
/// A `Bitset` holds `len` bits in `ceil(len / BITS_PER_WORD)` words of storage. The bits past `len`
/// in the last word are padding: their value is unspecified and nothing reads them except the
/// word-wise merge operators, which are free to flip them.
///
/// ### Method overview
/// - Lifecycle: `new`, `duplicate`, `resize`. Storage is released on drop.
/// - Single bits: `set`, `reset`, `toggle`, `test`. All of them reject `bit >= len` with
///   [`BitsetError::OutOfRange`].
/// - Whole set: `and`, `or`, `xor`, `and_not`, `not`, `clear`, or `merge` with an explicit
///   [`MergeOp`].
///
/// Every allocation goes through fallible reservation, so running out of memory surfaces as
/// [`BitsetError::Allocation`] instead of aborting. A failed `resize` leaves the bitset untouched.
///
/// ### Merging bitsets of different lengths
/// Binary operators only combine the words both operands have. Words of the destination beyond the
/// source's storage are left as they were.
/// ```
/// use wordbits::Bitset;
///
/// let mut visited = Bitset::new(10)?;
/// visited.set(3)?;
/// visited.set(7)?;
///
/// let mut done = Bitset::new(10)?;
/// done.set(3)?;
///
/// visited.and_not(&done);
/// assert!(!visited.test(3)?);
/// assert!(visited.test(7)?);
/// # Ok::<(), wordbits::BitsetError>(())
/// ```
#[derive(Default, Clone)]
pub struct Bitset {
    len: usize,
    words: Vec<Word>,
}

impl Bitset {
    /// Creates a bitset of `len` bits, all zero.
    pub fn new(len: usize) -> Result<Self, BitsetError> {
        let words = zeroed_words(len)?;
        log::trace!("[bitset::new] {} bits in {} words", len, words.len());
        Ok(Self { len, words })
    }

    /// Fallible deep copy. Padding bits are copied too, so the result is word-for-word equal.
    pub fn duplicate(&self) -> Result<Self, BitsetError> {
        let mut words = Vec::new();
        reserve(&mut words, self.words.len(), self.len)?;
        words.extend_from_slice(&self.words);
        log::trace!("[bitset::duplicate] {} bits", self.len);
        Ok(Self {
            len: self.len,
            words,
        })
    }

    /// Changes the length to `len` bits.
    ///
    /// Bits below `min(old_len, len)` keep their value. Bits gained by growing read as zero.
    /// Storage is only reallocated when growing past the current word count, and if that
    /// allocation fails the bitset is returned to the caller exactly as it was. Shrinking keeps
    /// the allocation.
    pub fn resize(&mut self, len: usize) -> Result<(), BitsetError> {
        let old_len = self.len;
        let word_count = words_for_bits(len);

        if word_count > self.words.len() {
            let additional = word_count - self.words.len();
            reserve(&mut self.words, additional, len)?;
            self.words.resize(word_count, 0);
        } else {
            self.words.truncate(word_count);
        }

        if len > old_len {
            self.zero_padding_from(old_len);
        }
        self.len = len;

        log::trace!("[bitset::resize] {} -> {} bits", old_len, len);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Raw view of the storage, padding included.
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    pub fn set(&mut self, bit: usize) -> Result<(), BitsetError> {
        self.update_bit(bit, MergeOp::Or)
    }

    pub fn reset(&mut self, bit: usize) -> Result<(), BitsetError> {
        self.update_bit(bit, MergeOp::AndNot)
    }

    pub fn toggle(&mut self, bit: usize) -> Result<(), BitsetError> {
        self.update_bit(bit, MergeOp::Xor)
    }

    pub fn test(&self, bit: usize) -> Result<bool, BitsetError> {
        let (word, offset) = self.locate(bit)?;
        Ok(self.words[word] & bit_mask(offset) != 0)
    }

    /// Combines `src` into `self` word by word over the words both sets have.
    ///
    /// `MergeOp::Not` ignores `src` and flips all of `self`.
    pub fn merge(&mut self, src: &Bitset, op: MergeOp) {
        if op.is_unary() {
            return self.merge_in_place(op);
        }

        for (dst, &src) in self.words.iter_mut().zip(&src.words) {
            *dst = op.apply(*dst, src);
        }
    }

    pub fn and(&mut self, src: &Bitset) {
        self.merge(src, MergeOp::And);
    }

    pub fn or(&mut self, src: &Bitset) {
        self.merge(src, MergeOp::Or);
    }

    pub fn xor(&mut self, src: &Bitset) {
        self.merge(src, MergeOp::Xor);
    }

    pub fn and_not(&mut self, src: &Bitset) {
        self.merge(src, MergeOp::AndNot);
    }

    /// Flips every bit, padding included.
    pub fn not(&mut self) {
        self.merge_in_place(MergeOp::Not);
    }

    /// Zeroes every word, padding included.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Applies `op` with `self` as both operands.
    pub(crate) fn merge_in_place(&mut self, op: MergeOp) {
        for word in self.words.iter_mut() {
            *word = op.apply(*word, *word);
        }
    }

    fn update_bit(&mut self, bit: usize, op: MergeOp) -> Result<(), BitsetError> {
        let (word, offset) = self.locate(bit)?;
        let word = &mut self.words[word];
        *word = op.apply(*word, bit_mask(offset));
        Ok(())
    }

    fn locate(&self, bit: usize) -> Result<(usize, u32), BitsetError> {
        if bit >= self.len {
            return Err(BitsetError::OutOfRange { bit, len: self.len });
        }
        Ok(word_and_offset(bit))
    }

    /// Zeroes the bits of the word containing `bit`, from `bit` upwards.
    fn zero_padding_from(&mut self, bit: usize) {
        let (word, offset) = word_and_offset(bit);
        if offset == 0 {
            return;
        }
        if let Some(word) = self.words.get_mut(word) {
            *word &= low_mask(offset);
        }
    }
}

fn zeroed_words(len: usize) -> Result<Vec<Word>, BitsetError> {
    let word_count = words_for_bits(len);
    let mut words = Vec::new();
    reserve(&mut words, word_count, len)?;
    words.resize(word_count, 0);
    Ok(words)
}

fn reserve(words: &mut Vec<Word>, additional: usize, bits: usize) -> Result<(), BitsetError> {
    words.try_reserve_exact(additional).map_err(|source| {
        log::debug!(
            "[bitset] allocation of {} words for {} bits refused: {}",
            additional,
            bits,
            source
        );
        BitsetError::Allocation { bits, source }
    })
}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset {{ len: {}, bits: ", self.len)?;
        for bit in 0..self.len {
            let (word, offset) = word_and_offset(bit);
            let set = self.words[word] & bit_mask(offset) != 0;
            f.write_char(if set { '1' } else { '0' })?;
        }
        f.write_str(" }")
    }
}

impl BitAndAssign<&Bitset> for Bitset {
    fn bitand_assign(&mut self, rhs: &Bitset) {
        self.and(rhs);
    }
}

impl BitOrAssign<&Bitset> for Bitset {
    fn bitor_assign(&mut self, rhs: &Bitset) {
        self.or(rhs);
    }
}

impl BitXorAssign<&Bitset> for Bitset {
    fn bitxor_assign(&mut self, rhs: &Bitset) {
        self.xor(rhs);
    }
}
