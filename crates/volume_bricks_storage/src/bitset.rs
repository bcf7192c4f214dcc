use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Bitset8 {
    pub bits: u8,
}

impl Bitset8 {
    #[inline]
    pub fn bit_is_set(&self, bit: u8) -> bool {
        self.bits & (1 << bit) != 0
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.bits != 0
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn set_bit(&mut self, bit: u8) {
        self.bits |= 1 << bit;
    }

    #[inline]
    pub fn unset_bit(&mut self, bit: u8) {
        self.bits &= !(1 << bit);
    }
}

/// One activity bit per voxel of a chunk, packed 8 to a byte.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActiveMask {
    words: Vec<Bitset8>,
}

impl ActiveMask {
    /// A mask of `num_bits` inactive bits.
    pub fn new(num_bits: usize) -> Self {
        Self {
            words: vec![Bitset8::default(); (num_bits + 7) / 8],
        }
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.words[index / 8].bit_is_set((index % 8) as u8)
    }

    #[inline]
    pub fn activate(&mut self, index: usize) {
        self.words[index / 8].set_bit((index % 8) as u8)
    }

    #[inline]
    pub fn deactivate(&mut self, index: usize) {
        self.words[index / 8].unset_bit((index % 8) as u8)
    }

    /// The number of bits the mask can hold.
    pub fn capacity(&self) -> usize {
        self.words.len() * 8
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(Bitset8::any)
    }

    pub fn count_active(&self) -> usize {
        self.words.iter().map(|w| w.count() as usize).sum()
    }

    /// Bytes of heap memory held by the mask.
    pub fn heap_bytes(&self) -> usize {
        self.words.capacity() * std::mem::size_of::<Bitset8>()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_and_deactivate_across_word_boundaries() {
        let mut mask = ActiveMask::new(20);
        assert!(!mask.any());

        for &i in [0, 7, 8, 19].iter() {
            mask.activate(i);
        }
        assert_eq!(mask.count_active(), 4);
        assert!(mask.is_active(8));
        assert!(!mask.is_active(9));

        mask.deactivate(8);
        assert!(!mask.is_active(8));
        assert_eq!(mask.count_active(), 3);
    }
}
