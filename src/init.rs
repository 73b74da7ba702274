use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::defs::*;
use crate::{BootExit, BootloaderExit, Error, Mode, Tma445, TouchReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum InitState {
  Resetting,
  SoftReset,
  KeyUnlock,
  AwaitBootExit,
  ExitBootloader,
  EnterOperational,
  Operational,
}

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  RST: OutputPin,
{
  /// Run the bring-up sequence: hardware reset, soft reset, security key,
  /// bootloader exit and the first operational read.
  ///
  /// Bus failures are logged and the sequence carries on; the bounded
  /// bootloader poll always completes. The only error is a reset line that
  /// cannot be driven.
  pub fn bring_up(&mut self) -> Result<BootExit, Error<E>> {
    let mut state = InitState::Resetting;
    let mut boot = BootExit { polls: 0, status: Default::default() };

    loop {
      trace!("bring-up: {:?}", state);

      match state {
        InitState::Resetting => {
          self.mode = Mode::Resetting;
          self.hardware_reset()?;
          state = InitState::SoftReset;
        }

        InitState::SoftReset => {
          // The controller needs the settle time even when the write was not
          // acknowledged.
          if self.write_bytes(Reg::HostMode, &[SOFT_RESET_MODE]).is_err() {
            warn!("soft reset write failed");
          }
          self.delay.delay_ms(SOFT_RESET_SETTLE_MS);
          state = InitState::KeyUnlock;
        }

        InitState::KeyUnlock => {
          if self.write_bytes(Reg::HostMode, &SECURITY_KEY).is_err() {
            warn!("security key write failed");
          }
          self.delay.delay_ms(SECURITY_KEY_SETTLE_MS);
          state = InitState::AwaitBootExit;
        }

        InitState::AwaitBootExit => {
          self.mode = Mode::BootloaderExit;
          boot = self.await_boot_exit();
          state = InitState::ExitBootloader;
        }

        InitState::ExitBootloader => {
          if self.config.bootloader_exit == BootloaderExit::Command {
            self.mode = Mode::OperationalHandshake;
            self.send_bootloader_exit();
            if !self.handshake_with(OPERATE_MODE).is_acknowledged() {
              warn!("operate mode command not acknowledged");
            }
            self.handshake();
          }
          state = InitState::EnterOperational;
        }

        InitState::EnterOperational => {
          self.delay.delay_ms(OPERATIONAL_SETTLE_MS);
          let report: TouchReport = self.read(Reg::HostMode).unwrap_or_else(|_| {
            warn!("operational mode read failed");
            TouchReport::default()
          });
          info!(
            "operational: host mode {:#x}, touch mode {:#x}, touch status {:#x}",
            report.host_mode,
            report.touch_mode,
            report.touch_status
          );
          state = InitState::Operational;
        }

        InitState::Operational => {
          self.mode = Mode::Operational;
          self.missed_handshakes = 0;
          return Ok(boot);
        }
      }
    }
  }

  fn hardware_reset(&mut self) -> Result<(), Error<E>> {
    let level = self.config.reset_level;
    if let Some(rst) = self.reset.as_mut() {
      rst.set_state(level).map_err(|_| Error::Pin)?;
      self.delay.delay_ms(RESET_HOLD_MS);
      rst.set_state(!level).map_err(|_| Error::Pin)?;
      self.delay.delay_ms(RESET_HOLD_MS);
    }
    Ok(())
  }
}
