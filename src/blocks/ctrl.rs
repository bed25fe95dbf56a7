//! Routines for interacting with the design's 32-bit AXI-lite control
//! registers.

use crate::transport::Transport;
use std::sync::{
    Arc,
    Mutex,
    Weak,
};
use tracing::debug;

/// A general-purpose 32-bit control register
#[derive(Debug)]
pub struct U32Register<T> {
    /// Upwards pointer to the parent class' transport
    transport: Weak<Mutex<T>>,
    /// The name of the register
    name: String,
}

impl<T> U32Register<T>
where
    T: Transport,
{
    #[must_use]
    pub fn new(transport: &Arc<Mutex<T>>, reg_name: &str) -> Self {
        Self {
            transport: Arc::downgrade(transport),
            name: reg_name.to_string(),
        }
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn read(&self) -> anyhow::Result<u32> {
        let tarc = self.transport.upgrade().unwrap();
        let mut transport = (*tarc).lock().unwrap();
        Ok(transport.read(&self.name, 0)?)
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn write(&self, value: u32) -> anyhow::Result<()> {
        let tarc = self.transport.upgrade().unwrap();
        let mut transport = (*tarc).lock().unwrap();
        Ok(transport.write(&self.name, 0, &value)?)
    }
}

/// The BRAM access-enable gate, a single bit in a 32-bit control register.
///
/// [`crate::blocks::bram::GatedBram`] toggles this register itself on every
/// transfer; this accessor exists for manual control and inspection.
#[derive(Debug)]
pub struct GateRegister<T> {
    /// Upwards pointer to the parent class' transport
    transport: Weak<Mutex<T>>,
    /// The name of the register
    name: String,
}

impl<T> GateRegister<T>
where
    T: Transport,
{
    #[must_use]
    pub fn new(transport: &Arc<Mutex<T>>, reg_name: &str) -> Self {
        Self {
            transport: Arc::downgrade(transport),
            name: reg_name.to_string(),
        }
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn set_enabled(&self, enabled: bool) -> anyhow::Result<()> {
        let tarc = self.transport.upgrade().unwrap();
        let mut transport = (*tarc).lock().unwrap();
        debug!(register = self.name.as_str(), enabled, "toggling gate");
        Ok(transport.write(&self.name, 0, &u32::from(enabled))?)
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn is_enabled(&self) -> anyhow::Result<bool> {
        let tarc = self.transport.upgrade().unwrap();
        let mut transport = (*tarc).lock().unwrap();
        let raw: u32 = transport.read(&self.name, 0)?;
        Ok(raw & 1 == 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            AxiBringup,
            BringupLayout,
        },
        transport::mock::Mock,
    };

    fn bringup() -> AxiBringup<Mock> {
        let layout = BringupLayout::default();
        AxiBringup::new(Mock::new(layout.register_map()), &layout)
    }

    #[test]
    fn test_write_read_reg0() {
        let fpga = bringup();
        fpga.slv_reg0.write(42).unwrap();
        assert_eq!(fpga.slv_reg0.read().unwrap(), 42);
    }

    #[test]
    fn test_registers_are_independent() {
        let fpga = bringup();
        fpga.slv_reg0.write(1).unwrap();
        fpga.slv_reg1.write(2).unwrap();
        fpga.slv_reg2.write(3).unwrap();
        assert_eq!(fpga.slv_reg0.read().unwrap(), 1);
        assert_eq!(fpga.slv_reg1.read().unwrap(), 2);
        assert_eq!(fpga.slv_reg2.read().unwrap(), 3);
    }

    #[test]
    fn test_gate_toggle() {
        let fpga = bringup();
        assert!(!fpga.bram_gate.is_enabled().unwrap());
        fpga.bram_gate.set_enabled(true).unwrap();
        assert!(fpga.bram_gate.is_enabled().unwrap());
        fpga.bram_gate.set_enabled(false).unwrap();
        assert!(!fpga.bram_gate.is_enabled().unwrap());
    }
}
