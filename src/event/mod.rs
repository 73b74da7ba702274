use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::i2c::{I2c, SevenBitAddress};
use embedded_hal_async::digital::Wait;

use crate::{Error, Handshake, Reg, Tma445};

mod report;
mod touchpoint;

pub use report::*;
pub use touchpoint::*;

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  RST: OutputPin,
{
  /// Poll the controller once and update the session's point set.
  ///
  /// Reads one report, acknowledges it with a handshake and stores the
  /// decoded contacts. A report without contacts leaves the previous point
  /// set untouched, so the returned set can be stale; use
  /// [`Tma445::get_coordinates`] for consume-once semantics. Bus failures
  /// are logged and read as a report without contacts.
  pub fn read_data(&mut self) -> &TouchPoints {
    let report = self.read_report();
    self.acknowledge();

    if report.touch_count() > 0 {
      self.points = report.points();
      for p in &self.points {
        trace!("touch x:{} y:{} z:{}", p.x, p.y, p.strength);
      }
    }
    &self.points
  }

  /// Poll the controller once and copy this report's contacts into `out`.
  ///
  /// Returns the number of contacts copied (at most `out.len()`); zero means
  /// no finger is down. The session's active count is cleared afterwards,
  /// so a following [`Tma445::points`] reports nothing until the next poll.
  pub fn get_coordinates(&mut self, out: &mut [TouchPoint]) -> usize {
    let report = self.read_report();
    self.acknowledge();

    let points = report.points();
    let n = points.len().min(out.len());
    out[..n].copy_from_slice(&points.as_slice()[..n]);

    if !points.is_empty() {
      self.points = points;
    }
    self.points.invalidate();
    n
  }

  fn read_report(&mut self) -> TouchReport {
    self.read(Reg::HostMode).unwrap_or_else(|_| {
      warn!("touch report read failed");
      TouchReport::default()
    })
  }

  /// Handshake after a report, re-running bring-up once too many handshakes
  /// in a row went unacknowledged.
  fn acknowledge(&mut self) {
    match self.handshake() {
      Handshake::Acknowledged { .. } => self.missed_handshakes = 0,
      Handshake::Exhausted { .. } => {
        self.missed_handshakes = self.missed_handshakes.saturating_add(1);

        let Some(threshold) = self.config.recovery_threshold else {
          return;
        };
        if self.missed_handshakes >= threshold {
          warn!("{} handshakes missed, re-running bring-up", self.missed_handshakes);
          if self.bring_up().is_err() {
            error!("recovery bring-up failed");
          }
          self.missed_handshakes = 0;
        }
      }
    }
  }
}

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
  INT: Wait,
{
  /// Wait until the controller signals new data on the interrupt line.
  ///
  /// Awaits a rising edge for an active-high interrupt and a falling edge
  /// otherwise.
  pub async fn wait_for_touch(&mut self) -> Result<(), Error<E>> {
    let level = self.config.interrupt_level;
    let int = self.interrupt.as_mut().ok_or(Error::NoInterruptPin)?;

    let edge = match level {
      PinState::High => int.wait_for_rising_edge().await,
      PinState::Low => int.wait_for_falling_edge().await,
    };
    edge.map_err(|_| Error::Pin)
  }
}
