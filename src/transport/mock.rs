//! Mock transport implementation used in testing the interface

use super::{
    Transport,
    TransportResult,
};
use crate::core::{
    Register,
    RegisterMap,
};
use kstring::KString;
use std::collections::HashMap;

/// One register access observed by the mock, in the order it was issued.
///
/// The journal is what lets tests pin down sequencing, e.g. that the BRAM
/// gate sees a set and a clear bracketing every data transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Write {
        register: KString,
        offset: usize,
        data: Vec<u8>,
    },
    Read {
        register: KString,
        offset: usize,
        len: usize,
    },
}

impl Access {
    /// The name of the register this access touched
    #[must_use]
    pub fn register(&self) -> &str {
        match self {
            Access::Write { register, .. } | Access::Read { register, .. } => register,
        }
    }
}

/// A platform that mocks reads and writes, useful for testing
#[derive(Debug)]
pub struct Mock {
    memory: HashMap<usize, u8>,
    registers: RegisterMap,
    journal: Vec<Access>,
}

impl Mock {
    /// Construct a new mock platform by providing the register map
    #[must_use]
    pub fn new(registers: RegisterMap) -> Self {
        // We'll represent each address lazily instead of having a dense
        // array, but it really shouldn't matter
        let mut memory: HashMap<usize, u8> = HashMap::default();

        for Register { addr, length } in registers.values() {
            for i in 0..*length {
                memory.insert(addr + i, 0u8);
            }
        }
        Self {
            memory,
            registers,
            journal: Vec::new(),
        }
    }

    /// Every access issued against this mock so far, oldest first
    #[must_use]
    pub fn journal(&self) -> &[Access] {
        &self.journal
    }

    /// Drain the journal, returning the accesses recorded so far
    pub fn take_journal(&mut self) -> Vec<Access> {
        std::mem::take(&mut self.journal)
    }

    fn lookup(&self, register: &str) -> TransportResult<Register> {
        self.registers
            .get(register)
            .copied()
            .ok_or_else(|| super::Error::MissingRegister(register.to_string()))
    }
}

impl Transport for Mock {
    fn is_running(&mut self) -> TransportResult<bool> {
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
        let mut bytes = vec![0u8; n];
        for i in offset..(offset + n) {
            // Pull bytes from memory into the bytes vector
            let byte = self
                .memory
                .get(&(reg.addr + i))
                .ok_or_else(|| super::Error::OutOfBounds(register.to_string()))?;
            bytes[i - offset] = *byte;
        }
        self.journal.push(Access::Read {
            register: KString::from_ref(register),
            offset,
            len: n,
        });
        Ok(bytes)
    }

    fn write_bytes(&mut self, register: &str, offset: usize, data: &[u8]) -> TransportResult<()> {
        let reg = self.lookup(register)?;
        if reg.length < offset + data.len() {
            return Err(super::Error::OutOfBounds(register.to_string()));
        }
        for (i, byte) in data.iter().enumerate() {
            self.memory.insert(reg.addr + i + offset, *byte);
        }
        self.journal.push(Access::Write {
            register: KString::from_ref(register),
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn listdev(&mut self) -> TransportResult<RegisterMap> {
        Ok(self.registers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    fn scratch() -> Mock {
        Mock::new(HashMap::from([(
            "sys_scratchpad".into(),
            Register {
                addr: 0,
                length: 16,
            },
        )]))
    }

    macro_rules! test_rw_num {
        ($num:ty, $v:literal) => {
            paste! {
                #[test]
                fn [<test_rw_$num>]() {
                    let mut transport = Mock::new(HashMap::from([(
                        "sys_scratchpad".into(),
                        Register { addr: 0, length: core::mem::size_of::<$num>() },
                    )]));
                    let num: $num = $v;
                    transport.write("sys_scratchpad", 0, &num).unwrap();
                    let read_num: $num = transport.read("sys_scratchpad", 0).unwrap();
                    assert_eq!(read_num, num);
                }
            }
        };
    }

    test_rw_num!(u8, 42);
    test_rw_num!(u16, 0xDEAD);
    test_rw_num!(u32, 0xDEAD_BEEF);
    test_rw_num!(u64, 0xDEAD_BEEF_B0BA_CAFE);
    test_rw_num!(u128, 0xDEAD_BEEF_B0BA_CAFE_0000_0000_0000);

    #[test]
    fn test_read_zeroed() {
        let mut transport = scratch();
        let bytes = transport.read_n_bytes("sys_scratchpad", 0, 4).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0]);
    }

    #[test]
    fn test_write_read_offset() {
        let mut transport = scratch();
        transport.write_bytes("sys_scratchpad", 2, &[7, 8]).unwrap();
        let bytes = transport.read_n_bytes("sys_scratchpad", 0, 4).unwrap();
        assert_eq!(bytes, [0, 0, 7, 8]);
        let bytes = transport.read_n_bytes("sys_scratchpad", 2, 2).unwrap();
        assert_eq!(bytes, [7, 8]);
    }

    #[test]
    fn test_missing_register() {
        let mut transport = scratch();
        let res = transport.read_n_bytes("nonexistent", 0, 4);
        assert!(matches!(res, Err(crate::transport::Error::MissingRegister(_))));
    }

    #[test]
    fn test_overrun() {
        let mut transport = scratch();
        let res = transport.write_bytes("sys_scratchpad", 14, &[1, 2, 3, 4]);
        assert!(matches!(res, Err(crate::transport::Error::OutOfBounds(_))));
        // A rejected access never makes it into the journal
        assert!(transport.journal().is_empty());
    }

    #[test]
    fn test_journal_ordering() {
        let mut transport = scratch();
        transport.write("sys_scratchpad", 0, &1u32).unwrap();
        let _: u32 = transport.read("sys_scratchpad", 0).unwrap();
        transport.write("sys_scratchpad", 4, &2u32).unwrap();
        let journal = transport.take_journal();
        assert_eq!(
            journal,
            vec![
                Access::Write {
                    register: "sys_scratchpad".into(),
                    offset: 0,
                    data: vec![0, 0, 0, 1],
                },
                Access::Read {
                    register: "sys_scratchpad".into(),
                    offset: 0,
                    len: 4,
                },
                Access::Write {
                    register: "sys_scratchpad".into(),
                    offset: 4,
                    data: vec![0, 0, 0, 2],
                },
            ]
        );
        assert!(transport.journal().is_empty());
    }
}
