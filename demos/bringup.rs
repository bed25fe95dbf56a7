//! In this example, we run the original bring-up flow against the simulated
//! transport: poke a control register, then round-trip one 128-bit word
//! through the gated BRAM. Swap [`Mock`] for [`Local`] to run it on a board.

use axibram::prelude::*;

fn main() -> anyhow::Result<()> {
    let layout = BringupLayout::default();
    let fpga = AxiBringup::new(Mock::new(layout.register_map()), &layout);

    println!("Starting");

    // Writing a value into a register and reading it back
    fpga.slv_reg0.write(42)?;
    println!("slv_reg0 - {}", fpga.slv_reg0.read()?);

    // Round-trip one word through the BRAM
    let word = word_from_halves(0x0000_0000_0000_0001, 0x0000_0000_0000_0002);
    fpga.bram.write(0, word)?;
    println!("bram[0] - {:#034x}", fpga.bram.read(0)?);

    println!("Done");
    Ok(())
}
