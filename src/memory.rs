use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Serialize};

/// Full 16-bit word address space.
pub const ADDRESS_SPACE: usize = 0x1_0000;

pub trait Bus {
    fn read_word(&mut self, addr: u16) -> Result<u16>;
    fn write_word(&mut self, addr: u16, val: u16) -> Result<()>;
}

/// Flat word-addressed RAM. Sizes below the full address space are allowed;
/// accesses past the end fail instead of wrapping.
#[derive(Clone, Serialize, Deserialize)]
pub struct WordMemory {
    pub mem: Vec<u16>,
}

impl WordMemory {
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size.min(ADDRESS_SPACE)],
        }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    /// Copy `words` into memory starting at `base`.
    pub fn load(&mut self, base: u16, words: &[u16]) -> Result<()> {
        let start = base as usize;
        let end = start + words.len();
        ensure!(
            end <= self.mem.len(),
            "image of {} words at {base:#06x} does not fit in {:#x} words of memory",
            words.len(),
            self.mem.len()
        );
        self.mem[start..end].copy_from_slice(words);
        Ok(())
    }

    /// Words in `[start, start + len)`, clipped to the end of memory.
    pub fn window(&self, start: u16, len: usize) -> &[u16] {
        let start = (start as usize).min(self.mem.len());
        let end = (start + len).min(self.mem.len());
        &self.mem[start..end]
    }

    fn slot(&self, addr: u16) -> Result<usize> {
        let off = addr as usize;
        if off < self.mem.len() {
            Ok(off)
        } else {
            Err(anyhow!(
                "address {addr:#06x} beyond {:#x} words of memory",
                self.mem.len()
            ))
        }
    }
}

impl Default for WordMemory {
    fn default() -> Self {
        Self::new(ADDRESS_SPACE)
    }
}

impl Bus for WordMemory {
    fn read_word(&mut self, addr: u16) -> Result<u16> {
        let off = self.slot(addr)?;
        Ok(self.mem[off])
    }
    fn write_word(&mut self, addr: u16, val: u16) -> Result<()> {
        let off = self.slot(addr)?;
        self.mem[off] = val;
        Ok(())
    }
}

/// Split a raw image into little-endian words; a trailing odd byte is zero-padded.
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks(2)
        .map(|c| u16::from_le_bytes([c[0], c.get(1).copied().unwrap_or(0)]))
        .collect()
}

pub fn words_to_le_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}
