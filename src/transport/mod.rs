//! Defines the transport mechanisms over which the design's registers can
//! be reached. Every access is addressed by register name against the
//! [`RegisterMap`] the transport was constructed from.

pub mod local;
pub mod mock;

use crate::core::RegisterMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Register `{0}` does not exist in this design")]
    MissingRegister(String),
    #[error("Access past the end of register `{0}`")]
    OutOfBounds(String),
    #[error(transparent)]
    Local(#[from] local::Error),
}

pub type TransportResult<T> = Result<T, Error>;

/// Types that implement this trait can be serialized such that they can be
/// written to the design's registers
pub trait Serialize {
    type Chunk;
    fn serialize(&self) -> Self::Chunk;
}

/// Types that implement this trait can be deserialized such that they can be
/// read from the design's registers
pub trait Deserialize: Sized {
    type Chunk;
    fn deserialize(chunk: Self::Chunk) -> Self;
}

macro_rules! serdes_num {
    ($num:ty) => {
        impl Serialize for $num {
            type Chunk = [u8; core::mem::size_of::<$num>()];
            fn serialize(&self) -> Self::Chunk {
                self.to_be_bytes()
            }
        }
        impl Deserialize for $num {
            type Chunk = [u8; core::mem::size_of::<$num>()];
            fn deserialize(chunk: Self::Chunk) -> Self {
                <$num>::from_be_bytes(chunk)
            }
        }
    };
}

// Serdes for the register widths this design traffics in: 32-bit control
// words and 128-bit BRAM words, plus the smaller unsigned widths for free
serdes_num!(u8);
serdes_num!(u16);
serdes_num!(u32);
serdes_num!(u64);
serdes_num!(u128);

/// The trait that is implemented for every transport mechanism.
/// The methods of this trait *assume* the device is already reachable.
pub trait Transport {
    /// Tests to see if the connected design is up and serving its registers
    fn is_running(&mut self) -> TransportResult<bool>;

    /// Read `n` bytes from `register` starting at byte offset `offset`
    fn read_n_bytes(&mut self, register: &str, offset: usize, n: usize)
        -> TransportResult<Vec<u8>>;

    /// Read `N` bytes from `register` at byte offset `offset` into a
    /// const-sized array
    /// # Panics
    /// Panics if the transport returns the wrong number of bytes
    fn read_bytes<const N: usize>(
        &mut self,
        register: &str,
        offset: usize,
    ) -> TransportResult<[u8; N]> {
        let bytes = self.read_n_bytes(register, offset, N)?;
        Ok(bytes.try_into().unwrap())
    }

    /// Generically read a [`Deserialize`] type `T` from `register` at byte
    /// offset `offset`
    /// # Example
    /// ```
    /// # use axibram::core::Register;
    /// # use axibram::transport::{mock::Mock, Transport};
    /// # use std::collections::HashMap;
    /// # let mut transport = Mock::new(HashMap::from([("slv_reg0".into(), Register { addr: 0, length: 4 })]));
    /// let word: u32 = transport.read("slv_reg0", 0).unwrap();
    /// ```
    fn read<T, const N: usize>(&mut self, register: &str, offset: usize) -> TransportResult<T>
    where
        T: Deserialize<Chunk = [u8; N]>,
    {
        let bytes: [u8; N] = self.read_bytes(register, offset)?;
        Ok(T::deserialize(bytes))
    }

    /// Write `data` to `register` starting at byte offset `offset`
    fn write_bytes(&mut self, register: &str, offset: usize, data: &[u8]) -> TransportResult<()>;

    /// Generically write a [`Serialize`] type `T` to `register` at byte
    /// offset `offset`
    /// # Example
    /// ```
    /// # use axibram::core::Register;
    /// # use axibram::transport::{mock::Mock, Transport};
    /// # use std::collections::HashMap;
    /// # let mut transport = Mock::new(HashMap::from([("slv_reg0".into(), Register { addr: 0, length: 4 })]));
    /// transport.write("slv_reg0", 0, &42u32).unwrap();
    /// ```
    fn write<T, const N: usize>(
        &mut self,
        register: &str,
        offset: usize,
        data: &T,
    ) -> TransportResult<()>
    where
        T: Serialize<Chunk = [u8; N]>,
    {
        self.write_bytes(register, offset, &data.serialize())
    }

    /// Retrieve the map of registers this transport can reach
    fn listdev(&mut self) -> TransportResult<RegisterMap>;
}
