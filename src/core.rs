//! The core types for describing and wiring up the bring-up design
use crate::{
    blocks::{
        bram::GatedBram,
        ctrl::{
            GateRegister,
            U32Register,
        },
    },
    transport::Transport,
};
use kstring::KString;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
};

/// Bytes per BRAM word (the data port is 128 bits wide)
pub const BRAM_WORD_BYTES: usize = 16;

/// The representation of an internal register
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Register {
    /// The offset in FPGA memory of this register
    pub addr: usize,
    /// The number of bytes stored at this location
    pub length: usize,
}

/// The mapping from register names and their data (address and size)
pub type RegisterMap = HashMap<KString, Register>;

/// Compose a 128-bit BRAM word from its high and low 64-bit halves
#[must_use]
pub const fn word_from_halves(high: u64, low: u64) -> u128 {
    ((high as u128) << 64) | (low as u128)
}

/// Split a 128-bit BRAM word into its (high, low) 64-bit halves
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn word_halves(word: u128) -> (u64, u64) {
    ((word >> 64) as u64, word as u64)
}

/// Where the design's registers live on the bus.
///
/// The addresses here are the reference design's placeholders and are
/// expected to be re-mapped per target board, which is why they travel in a
/// struct instead of as constants.
#[derive(Debug, Copy, Clone)]
pub struct BringupLayout {
    /// Base address of the AXI-lite control register block
    pub ctrl_base: usize,
    /// Base address of the BRAM data port
    pub bram_base: usize,
    /// Depth of the BRAM in 128-bit words
    pub bram_words: usize,
}

impl Default for BringupLayout {
    fn default() -> Self {
        Self {
            ctrl_base: 0xA000_0000,
            bram_base: 0xB000_0000,
            bram_words: 1024,
        }
    }
}

impl BringupLayout {
    /// Expand the layout into the named register map the transports are
    /// constructed from. The four control registers are 32 bits each,
    /// packed from `ctrl_base`.
    #[must_use]
    pub fn register_map(&self) -> RegisterMap {
        let mut map = RegisterMap::new();
        for (i, name) in ["slv_reg0", "slv_reg1", "slv_reg2", "slv_reg3"]
            .into_iter()
            .enumerate()
        {
            map.insert(
                KString::from_ref(name),
                Register {
                    addr: self.ctrl_base + 4 * i,
                    length: 4,
                },
            );
        }
        map.insert(
            "bram".into(),
            Register {
                addr: self.bram_base,
                length: self.bram_words * BRAM_WORD_BYTES,
            },
        );
        map
    }
}

/// The bring-up design: three general-purpose registers and a gated BRAM
/// sharing one transport.
#[derive(Debug)]
pub struct AxiBringup<T> {
    /// The transport, shared with every block below
    pub transport: Arc<Mutex<T>>,
    pub slv_reg0: U32Register<T>,
    pub slv_reg1: U32Register<T>,
    pub slv_reg2: U32Register<T>,
    /// The BRAM access-enable gate (bit 0 of `slv_reg3`), exposed for
    /// inspection; [`Self::bram`] drives it internally
    pub bram_gate: GateRegister<T>,
    pub bram: GatedBram<T>,
}

impl<T> AxiBringup<T>
where
    T: Transport,
{
    #[must_use]
    pub fn new(transport: T, layout: &BringupLayout) -> Self {
        let transport = Arc::new(Mutex::new(transport));
        Self {
            slv_reg0: U32Register::new(&transport, "slv_reg0"),
            slv_reg1: U32Register::new(&transport, "slv_reg1"),
            slv_reg2: U32Register::new(&transport, "slv_reg2"),
            bram_gate: GateRegister::new(&transport, "slv_reg3"),
            bram: GatedBram::new(&transport, "bram", "slv_reg3", layout.bram_words),
            transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_from_halves() {
        assert_eq!(word_from_halves(1, 2), (1u128 << 64) | 2);
    }

    #[test]
    fn test_word_halves_roundtrip() {
        let word = word_from_halves(0xDEAD_BEEF_B0BA_CAFE, 0x0123_4567_89AB_CDEF);
        let (high, low) = word_halves(word);
        assert_eq!(high, 0xDEAD_BEEF_B0BA_CAFE);
        assert_eq!(low, 0x0123_4567_89AB_CDEF);
        assert_eq!(word_from_halves(high, low), word);
    }

    #[test]
    fn test_layout_offsets() {
        let layout = BringupLayout::default();
        let map = layout.register_map();
        assert_eq!(map["slv_reg0"].addr, layout.ctrl_base);
        assert_eq!(map["slv_reg1"].addr, layout.ctrl_base + 4);
        assert_eq!(map["slv_reg2"].addr, layout.ctrl_base + 8);
        assert_eq!(map["slv_reg3"].addr, layout.ctrl_base + 12);
        assert_eq!(map["bram"].addr, layout.bram_base);
        assert_eq!(map["bram"].length, layout.bram_words * BRAM_WORD_BYTES);
    }
}
