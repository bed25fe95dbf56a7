//! The gated BRAM block: a 128-bit-wide memory whose data port is only
//! reachable while the enable bit in its companion control register is set.

use crate::{
    core::BRAM_WORD_BYTES,
    transport::Transport,
};
use std::sync::{
    Arc,
    Mutex,
    Weak,
};
use thiserror::Error;
use tracing::debug;

const GATE_OPEN: u32 = 0b1;
const GATE_CLOSED: u32 = 0b0;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] crate::transport::Error),
    #[error("Out of bounds addressing")]
    OutOfBounds,
}

/// The gated BRAM accessor.
///
/// Every transfer is a fixed three-step sequence: open the gate, move the
/// 128-bit word, close the gate. The whole triple runs under one lock on
/// the shared transport, so blocks in the same process can't interleave
/// with it.
#[derive(Debug)]
pub struct GatedBram<T> {
    /// Upwards pointer to the parent class' transport
    transport: Weak<Mutex<T>>,
    /// The name of the BRAM data port
    name: String,
    /// The name of the control register holding the enable gate
    gate: String,
    /// Size of the BRAM in 128-bit words
    size: usize,
}

impl<T> GatedBram<T>
where
    T: Transport,
{
    #[must_use]
    pub fn new(transport: &Arc<Mutex<T>>, reg_name: &str, gate_name: &str, size: usize) -> Self {
        Self {
            transport: Arc::downgrade(transport),
            name: reg_name.to_string(),
            gate: gate_name.to_string(),
            size,
        }
    }

    /// Depth of the BRAM in 128-bit words
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Write one 128-bit word to slot `index` of the BRAM
    /// # Errors
    /// Returns an error on transport errors or an out of bounds `index`
    #[allow(clippy::missing_panics_doc)]
    pub fn write(&self, index: usize, value: u128) -> Result<(), Error> {
        if index >= self.size {
            return Err(Error::OutOfBounds);
        }
        let tarc = self.transport.upgrade().unwrap();
        let mut transport = (*tarc).lock().unwrap();
        debug!(index, "gated BRAM write");
        // The hardware never acks that the gate took effect; we rely on the
        // bus preserving the order of the two stores
        transport.write(&self.gate, 0, &GATE_OPEN)?;
        transport.write(&self.name, index * BRAM_WORD_BYTES, &value)?;
        transport.write(&self.gate, 0, &GATE_CLOSED)?;
        Ok(())
    }

    /// Read one 128-bit word from slot `index` of the BRAM
    /// # Errors
    /// Returns an error on transport errors or an out of bounds `index`
    #[allow(clippy::missing_panics_doc)]
    pub fn read(&self, index: usize) -> Result<u128, Error> {
        if index >= self.size {
            return Err(Error::OutOfBounds);
        }
        let tarc = self.transport.upgrade().unwrap();
        let mut transport = (*tarc).lock().unwrap();
        debug!(index, "gated BRAM read");
        transport.write(&self.gate, 0, &GATE_OPEN)?;
        let value = transport.read(&self.name, index * BRAM_WORD_BYTES)?;
        transport.write(&self.gate, 0, &GATE_CLOSED)?;
        Ok(value)
    }
}
