#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` driver for the Cypress TMA445 capacitive touch controller
//! (TrueTouch Standard Product Gen3 host interface).
//!
//! The controller needs a fairly particular bring-up before it produces
//! touch reports, and a flow-control handshake after every report it hands
//! out. This crate wraps both behind a small polling API:
//!
//! - Bring-up runs inside [`Tma445::new`]: optional hardware reset, soft
//!   reset, security key, bootloader exit (passive poll or explicit command)
//!   and a first operational read
//! - [`Tma445::read_data`] and [`Tma445::get_coordinates`] read one report,
//!   acknowledge it and decode up to two contacts
//! - Sleep/wake commands, an optional interrupt-driven wait and an optional
//!   handshake watchdog that re-runs bring-up
//! - Uses `embedded-hal` 1.0 blocking I²C, delay and output pin traits, and
//!   `embedded-hal-async` for the interrupt line
//!
//! Bus failures never abort bring-up or a poll; they are logged (enable the
//! `defmt` or `log` feature) and degrade to stale or empty touch data.
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::I2c};
//! use tma445::{Config, Pins, Tma445, TouchPoint};
//!
//! fn example<I2C, D, RST>(i2c: I2C, delay: D, rst: RST) -> Result<(), tma445::Error<I2C::Error>>
//! where
//!   I2C: I2c,
//!   D: DelayNs,
//!   RST: OutputPin,
//! {
//!   let mut touch = Tma445::new(i2c, delay, Pins::none().with_reset(rst), Config::default())?;
//!
//!   loop {
//!     for point in touch.read_data() {
//!       let _ = (point.x, point.y, point.strength);
//!     }
//!   }
//! }
//! ```
#[macro_use]
mod fmt;

mod config;
mod control;
mod defs;
mod event;
mod init;
mod rw;
#[cfg(test)]
mod testing;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{I2c, SevenBitAddress};

pub use config::*;
pub use control::*;
use defs::*;
pub use embedded_hal::digital::PinState;
pub use event::*;

/// Errors that can occur while interacting with the controller.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// The reset or interrupt line reported an error.
  Pin,
  /// [`Tma445::wait_for_touch`] was called without an interrupt line.
  NoInterruptPin,
  /// An operation attempted to write a buffer larger than the protocol allows.
  BufferOverflow,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
  /// Hardware/soft reset and security key.
  Resetting,
  /// Waiting for the bootloader to hand over to the application.
  BootloaderExit,
  /// Handing the operate-mode command over after an explicit bootloader exit.
  OperationalHandshake,
  /// Producing touch reports.
  Operational,
  /// Low-power state after [`Tma445::enter_sleep`].
  Sleeping,
}

/// Placeholder for an absent reset or interrupt line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl digital::ErrorType for NoPin {
  type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
  fn set_low(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }
}

impl embedded_hal_async::digital::Wait for NoPin {
  async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }
}

/// Optional reset and interrupt lines handed to the driver.
///
/// ```no_run
/// # fn f<R: embedded_hal::digital::OutputPin, N: embedded_hal_async::digital::Wait>(rst: R, int: N) {
/// let pins = tma445::Pins::none().with_reset(rst).with_interrupt(int);
/// # }
/// ```
#[derive(Debug)]
pub struct Pins<RST = NoPin, INT = NoPin> {
  reset: Option<RST>,
  interrupt: Option<INT>,
}

impl Pins {
  pub const fn none() -> Self {
    Self { reset: None, interrupt: None }
  }
}

impl<RST, INT> Pins<RST, INT> {
  pub fn with_reset<R>(self, reset: R) -> Pins<R, INT> {
    Pins { reset: Some(reset), interrupt: self.interrupt }
  }

  pub fn with_interrupt<N>(self, interrupt: N) -> Pins<RST, N> {
    Pins { reset: self.reset, interrupt: Some(interrupt) }
  }
}

/// Peripherals handed back by [`Tma445::close`].
#[derive(Debug)]
pub struct Parts<I, D, RST, INT> {
  pub i2c: I,
  pub delay: D,
  pub reset: Option<RST>,
  pub interrupt: Option<INT>,
}

/// Driver and touch session for one TMA445 controller.
///
/// The driver owns the bus handle, the delay source and the optional reset
/// and interrupt lines. All operations take `&mut self`; a caller polling
/// from several contexts has to wrap the driver in its own lock.
pub struct Tma445<I, D, RST = NoPin, INT = NoPin> {
  i2c: I,
  delay: D,
  reset: Option<RST>,
  interrupt: Option<INT>,
  config: Config,
  mode: Mode,
  points: TouchPoints,
  missed_handshakes: u8,
}

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  RST: OutputPin,
{
  /// Create the driver and bring the controller up.
  ///
  /// Blocks for the whole bring-up sequence (roughly 200 ms, more if the
  /// bootloader is slow to exit). Bus failures during bring-up are logged
  /// and tolerated; only a reset line that cannot be driven fails
  /// construction, in which case the peripherals are dropped.
  pub fn new(i2c: I, delay: D, pins: Pins<RST, INT>, config: Config) -> Result<Self, Error<E>> {
    let mut dev = Self {
      i2c,
      delay,
      reset: pins.reset,
      interrupt: pins.interrupt,
      config,
      mode: Mode::Resetting,
      points: TouchPoints::none(),
      missed_handshakes: 0,
    };

    if let Err(e) = dev.bring_up() {
      error!("TMA445 bring-up failed");
      return Err(e);
    }
    Ok(dev)
  }
}

impl<I, D, RST, INT> Tma445<I, D, RST, INT> {
  /// Contacts from the most recent poll.
  pub fn points(&self) -> &TouchPoints {
    &self.points
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Release the bus, delay and lines back to the caller.
  pub fn close(self) -> Parts<I, D, RST, INT> {
    Parts { i2c: self.i2c, delay: self.delay, reset: self.reset, interrupt: self.interrupt }
  }
}
