use embedded_hal::digital::PinState;

use crate::defs::*;

/// How bring-up leaves the bootloader once the security key has been sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootloaderExit {
  /// Only poll the bootloader status until the application has started.
  Passive,
  /// Poll, then send the explicit exit-bootloader command block and hand the
  /// operate-mode command over with a handshake.
  Command,
}

/// Driver configuration.
///
/// The defaults reproduce the timing and retry ceilings of the reference
/// bring-up sequence, with an active-low reset line and an active-low
/// interrupt line.
///
/// # Example
/// ```no_run
/// use tma445::{BootloaderExit, Config, PinState};
///
/// let config = Config::default()
///   .with_reset_level(PinState::Low)
///   .with_bootloader_exit(BootloaderExit::Command)
///   .with_recovery_threshold(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Level that holds the controller in reset.
  pub reset_level: PinState,
  /// Level the controller drives on the interrupt line when data is ready.
  pub interrupt_level: PinState,
  pub bootloader_exit: BootloaderExit,
  /// Ceiling for handshake attempts per poll.
  pub handshake_attempts: u8,
  /// Delay in milliseconds before each handshake attempt.
  pub handshake_retry_ms: u32,
  /// Ceiling for bootloader status polls during bring-up.
  pub boot_poll_attempts: u8,
  /// Re-run bring-up after this many consecutive exhausted handshakes.
  /// `None` never re-runs it.
  pub recovery_threshold: Option<u8>,
}

impl Config {
  pub const fn new() -> Self {
    Self {
      reset_level: PinState::Low,
      interrupt_level: PinState::Low,
      bootloader_exit: BootloaderExit::Passive,
      handshake_attempts: HANDSHAKE_ATTEMPTS,
      handshake_retry_ms: HANDSHAKE_RETRY_MS,
      boot_poll_attempts: BOOT_POLL_ATTEMPTS,
      recovery_threshold: None,
    }
  }

  pub const fn with_reset_level(mut self, level: PinState) -> Self {
    self.reset_level = level;
    self
  }

  pub const fn with_interrupt_level(mut self, level: PinState) -> Self {
    self.interrupt_level = level;
    self
  }

  pub const fn with_bootloader_exit(mut self, exit: BootloaderExit) -> Self {
    self.bootloader_exit = exit;
    self
  }

  pub const fn with_handshake_retries(mut self, attempts: u8, retry_ms: u32) -> Self {
    self.handshake_attempts = attempts;
    self.handshake_retry_ms = retry_ms;
    self
  }

  pub const fn with_boot_poll_attempts(mut self, attempts: u8) -> Self {
    self.boot_poll_attempts = attempts;
    self
  }

  /// Enable the handshake watchdog. A threshold of zero disables it.
  pub const fn with_recovery_threshold(mut self, missed_handshakes: u8) -> Self {
    self.recovery_threshold = if missed_handshakes == 0 { None } else { Some(missed_handshakes) };
    self
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}
