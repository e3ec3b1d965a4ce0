use bitvec::prelude::*;

use crate::memory::ADDRESS_SPACE;

/// One bit per word address.
#[derive(Clone)]
pub struct Breakpoints {
    bits: BitVec,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; ADDRESS_SPACE],
        }
    }

    pub fn insert(&mut self, addr: u16) {
        self.bits.set(addr as usize, true);
    }

    pub fn remove(&mut self, addr: u16) {
        self.bits.set(addr as usize, false);
    }

    pub fn contains(&self, addr: u16) -> bool {
        self.bits[addr as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.bits.iter_ones().map(|i| i as u16)
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<u16> for Breakpoints {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        let mut bp = Self::new();
        for addr in iter {
            bp.insert(addr);
        }
        bp
    }
}
