use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::defs::*;
use crate::{Error, Mode, Tma445};

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Put the controller into its low-power state.
  ///
  /// Single attempt. The session only switches to [`Mode::Sleeping`] once the
  /// command was accepted by the bus.
  pub fn enter_sleep(&mut self) -> Result<(), Error<E>> {
    self.write_bytes(Reg::HostMode, &SLEEP_COMMAND).map_err(|e| {
      error!("enter sleep failed");
      e
    })?;
    self.mode = Mode::Sleeping;
    Ok(())
  }

  /// Wake the controller from its low-power state.
  pub fn exit_sleep(&mut self) -> Result<(), Error<E>> {
    self.write_bytes(Reg::HostMode, &WAKE_COMMAND).map_err(|e| {
      error!("exit sleep failed");
      e
    })?;
    self.mode = Mode::Operational;
    Ok(())
  }
}
