//! "Local" transport where we have access to `/dev/mem` mapped FPGA fabric

use super::{
    Transport,
    TransportResult,
};
use crate::core::{
    Register,
    RegisterMap,
};
use memmap2::{
    MmapMut,
    MmapOptions,
};
use nix::libc::O_SYNC;
use std::{
    fs::File,
    os::unix::fs::OpenOptionsExt,
};
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File IO error")]
    Io(#[from] std::io::Error),
    #[error("The register map is empty, nothing to map")]
    EmptyRegisterMap,
}

/// A local connection to FPGA fabric via `/dev/mem`
#[derive(Debug)]
pub struct Local {
    mem: MmapMut,
    registers: RegisterMap,
    base_addr: usize,
}

impl Local {
    /// Construct a new local `/dev/mem` transport spanning every register
    /// in `registers`.
    ///
    /// Note: this may require some file permission bologna
    /// # Errors
    /// Returns errors on file IO errors or an empty register map
    pub fn new(registers: RegisterMap) -> Result<Self, Error> {
        // Find the min and max register addrs to determine the memory space
        // we want to map
        let mut base_addr = usize::MAX;
        let mut top_addr = 0;
        for reg in registers.values() {
            base_addr = base_addr.min(reg.addr);
            top_addr = top_addr.max(reg.addr + reg.length);
        }
        if registers.is_empty() {
            return Err(Error::EmptyRegisterMap);
        }
        // O_SYNC keeps the kernel from write-combining our MMIO traffic
        let mem = File::options()
            .read(true)
            .write(true)
            .custom_flags(O_SYNC)
            .open("/dev/mem")?;
        let mmap = unsafe {
            MmapOptions::new()
                .len(top_addr - base_addr)
                .offset(base_addr as u64)
                .map_mut(&mem)?
        };
        Ok(Self {
            mem: mmap,
            registers,
            base_addr,
        })
    }

    fn lookup(&self, register: &str) -> TransportResult<Register> {
        self.registers
            .get(register)
            .copied()
            .ok_or_else(|| super::Error::MissingRegister(register.to_string()))
    }
}

impl Transport for Local {
    fn is_running(&mut self) -> TransportResult<bool> {
        // If the mapping succeeded, the fabric is there to talk to
        Ok(true)
    }

    fn read_n_bytes(
        &mut self,
        register: &str,
        offset: usize,
        n: usize,
    ) -> TransportResult<Vec<u8>> {
        let reg = self.lookup(register)?;
        if reg.length < offset + n {
            return Err(super::Error::OutOfBounds(register.to_string()));
        }
        let start = reg.addr - self.base_addr + offset;
        let src = self.mem.as_ptr();
        let mut bytes = vec![0u8; n];
        for (i, byte) in bytes.iter_mut().enumerate() {
            // Volatile so the compiler can neither elide nor reorder the
            // MMIO loads
            *byte = unsafe { src.add(start + i).read_volatile() };
        }
        trace!(register, offset, n, "local read");
        Ok(bytes)
    }

    fn write_bytes(&mut self, register: &str, offset: usize, data: &[u8]) -> TransportResult<()> {
        let reg = self.lookup(register)?;
        if reg.length < offset + data.len() {
            return Err(super::Error::OutOfBounds(register.to_string()));
        }
        let start = reg.addr - self.base_addr + offset;
        let dst = self.mem.as_mut_ptr();
        for (i, byte) in data.iter().enumerate() {
            unsafe { dst.add(start + i).write_volatile(*byte) };
        }
        trace!(register, offset, len = data.len(), "local write");
        Ok(())
    }

    fn listdev(&mut self) -> TransportResult<RegisterMap> {
        Ok(self.registers.clone())
    }
}
