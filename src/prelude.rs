//! Prelude (helpful reexports) for this package

pub use crate::{
    blocks::{
        bram::GatedBram,
        ctrl::{
            GateRegister,
            U32Register,
        },
    },
    core::{
        word_from_halves,
        word_halves,
        AxiBringup,
        BringupLayout,
    },
    transport::{
        local::Local,
        mock::Mock,
        Transport,
    },
};
