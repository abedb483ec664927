//! Bit-packed row validity.

/// Storage word of a [`NullBitmap`].
pub type BitmaskWord = u32;

/// Number of rows tracked by one bitmap word.
pub const BITS_PER_WORD: usize = BitmaskWord::BITS as usize;

/// Bit-packed validity vector: bit `i` set means row `i` is valid (non-null).
///
/// A bitmap starts out all-valid. Generation only ever clears bits, so a row
/// that has been marked null stays null for the rest of the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullBitmap {
    words: Vec<BitmaskWord>,
    len: usize,
}

impl NullBitmap {
    /// Number of words needed to track `num_rows` rows.
    pub const fn size_in_words(num_rows: usize) -> usize {
        num_rows.div_ceil(BITS_PER_WORD)
    }

    /// Create a bitmap for `num_rows` rows with every row valid.
    pub fn all_valid(num_rows: usize) -> Self {
        Self {
            words: vec![!0; Self::size_in_words(num_rows)],
            len: num_rows,
        }
    }

    /// Number of rows tracked.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `row` is valid.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn get(&self, row: usize) -> bool {
        assert!(row < self.len, "row {row} out of bounds ({})", self.len);
        self.words[row / BITS_PER_WORD] & (1 << (row % BITS_PER_WORD)) != 0
    }

    /// Mark `row` as null.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn clear(&mut self, row: usize) {
        assert!(row < self.len, "row {row} out of bounds ({})", self.len);
        self.words[row / BITS_PER_WORD] &= !(1 << (row % BITS_PER_WORD));
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        (0..self.len).filter(|&row| !self.get(row)).count()
    }

    /// The packed words. Bits past `len` in the last word are always set.
    pub fn words(&self) -> &[BitmaskWord] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_words() {
        assert_eq!(NullBitmap::size_in_words(0), 0);
        assert_eq!(NullBitmap::size_in_words(1), 1);
        assert_eq!(NullBitmap::size_in_words(32), 1);
        assert_eq!(NullBitmap::size_in_words(33), 2);
        assert_eq!(NullBitmap::size_in_words(1000), 32);
    }

    #[test]
    fn test_starts_all_valid() {
        let bitmap = NullBitmap::all_valid(70);
        assert_eq!(bitmap.len(), 70);
        assert_eq!(bitmap.words().len(), 3);
        assert!((0..70).all(|row| bitmap.get(row)));
        assert_eq!(bitmap.null_count(), 0);
    }

    #[test]
    fn test_clear_only_touches_one_row() {
        let mut bitmap = NullBitmap::all_valid(64);
        bitmap.clear(31);
        bitmap.clear(32);
        assert!(!bitmap.get(31));
        assert!(!bitmap.get(32));
        assert!(bitmap.get(30));
        assert!(bitmap.get(33));
        assert_eq!(bitmap.null_count(), 2);
        assert_eq!(bitmap.words()[0], 0x7FFF_FFFF);
        assert_eq!(bitmap.words()[1], 0xFFFF_FFFE);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut bitmap = NullBitmap::all_valid(10);
        bitmap.clear(3);
        bitmap.clear(3);
        assert_eq!(bitmap.null_count(), 1);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        let bitmap = NullBitmap::all_valid(10);
        bitmap.get(10);
    }
}
