use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::defs::*;
use crate::{Error, Tma445};

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Read the bootloader status block once.
  pub fn bootloader_status(&mut self) -> Result<BootloaderStatus, Error<E>> {
    self.read(Reg::HostMode)
  }

  /// Poll the bootloader status until the application is running or the poll
  /// ceiling is reached. Failed reads count as polls and decode as a zeroed
  /// block.
  pub(crate) fn await_boot_exit(&mut self) -> BootExit {
    let mut exit = BootExit { polls: 0, status: BootloaderStatus::default() };

    while exit.polls < self.config.boot_poll_attempts {
      self.delay.delay_ms(BOOT_POLL_INTERVAL_MS);
      exit.polls += 1;

      exit.status = self.bootloader_status().unwrap_or_else(|_| {
        warn!("bootloader status read failed (poll {})", exit.polls);
        BootloaderStatus::default()
      });
      debug!("bootloader poll {}: status {:#x}", exit.polls, exit.status.status);

      if !exit.status.in_bootloader() {
        break;
      }
    }

    if exit.exited() {
      info!("bootloader exited after {} polls", exit.polls);
    } else {
      warn!("controller still in bootloader after {} polls, continuing", exit.polls);
    }
    exit
  }

  /// Send the explicit exit-bootloader command block.
  pub(crate) fn send_bootloader_exit(&mut self) {
    if self.write_bytes(Reg::HostMode, &BOOTLOADER_EXIT).is_err() {
      warn!("exit-bootloader command write failed");
    }
  }
}

/// Bootloader status block, read from the host mode register onwards while
/// the controller is still running its bootloader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootloaderStatus {
  pub file: u8,
  pub status: u8,
  pub error: u8,
  pub bootloader_version: u16,
  pub bootloader_build: u16,
  pub ttsp_version: u16,
  pub app_id: u16,
  pub app_version: u16,
  pub customer_id: [u8; 3],
}

impl BootloaderStatus {
  pub fn from_bytes(b: &[u8; BOOTLOADER_STATUS_LEN]) -> Self {
    Self {
      file: b[0],
      status: b[1],
      error: b[2],
      bootloader_version: u16::from_be_bytes([b[3], b[4]]),
      bootloader_build: u16::from_be_bytes([b[5], b[6]]),
      ttsp_version: u16::from_be_bytes([b[7], b[8]]),
      app_id: u16::from_be_bytes([b[9], b[10]]),
      app_version: u16::from_be_bytes([b[11], b[12]]),
      customer_id: [b[13], b[14], b[15]],
    }
  }

  /// `true` while the controller is still executing its bootloader.
  pub const fn in_bootloader(&self) -> bool {
    self.status & BOOTLOADER_MODE_BIT != 0
  }
}

impl From<[u8; BOOTLOADER_STATUS_LEN]> for BootloaderStatus {
  fn from(b: [u8; BOOTLOADER_STATUS_LEN]) -> Self {
    Self::from_bytes(&b)
  }
}

/// Outcome of the bootloader exit poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootExit {
  /// Status reads issued.
  pub polls: u8,
  /// Last status decoded.
  pub status: BootloaderStatus,
}

impl BootExit {
  pub const fn exited(&self) -> bool {
    !self.status.in_bootloader()
  }
}
