pub fn single_bit_index_u64(bit: u64) -> usize {
    bit.trailing_zeros() as usize
}

/// Iterates the indices of the set bits of a bitboard, lowest index first.
pub fn bit_indices(bits: u64) -> BitIndices {
    BitIndices { bits }
}

#[derive(Clone, Copy, Debug)]
pub struct BitIndices {
    bits: u64,
}

impl Iterator for BitIndices {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }

        let index = single_bit_index_u64(self.bits);
        self.bits &= self.bits - 1;

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitIndices {}
