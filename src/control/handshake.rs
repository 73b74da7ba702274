use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::defs::*;
use crate::Tma445;

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Acknowledge the last report by writing the host mode register back with
  /// the handshake bit inverted.
  ///
  /// The controller only prepares a fresh report once the host has toggled
  /// the bit. Each attempt waits [`Config::handshake_retry_ms`] first and
  /// re-reads the register; bus failures are retried up to
  /// [`Config::handshake_attempts`] times, after which
  /// [`Handshake::Exhausted`] is returned.
  ///
  /// [`Config::handshake_retry_ms`]: crate::Config::handshake_retry_ms
  /// [`Config::handshake_attempts`]: crate::Config::handshake_attempts
  pub fn handshake(&mut self) -> Handshake {
    self.exchange(None)
  }

  /// Like [`Tma445::handshake`], but writes `value` with the handshake bit
  /// set opposite to the current one instead of echoing the register.
  pub fn handshake_with(&mut self, value: u8) -> Handshake {
    self.exchange(Some(value))
  }

  fn exchange(&mut self, value: Option<u8>) -> Handshake {
    let attempts = self.config.handshake_attempts;

    for attempt in 1..=attempts {
      self.delay.delay_ms(self.config.handshake_retry_ms);

      let host_mode = match self.read_u8(Reg::HostMode) {
        Ok(b) => b,
        Err(_) => {
          warn!("handshake: bus read failed (attempt {})", attempt);
          continue;
        }
      };

      let written = acknowledge(value.unwrap_or(host_mode), host_mode);
      match self.write_bytes(Reg::HostMode, &[written]) {
        Ok(()) => return Handshake::Acknowledged { attempts: attempt, written },
        Err(_) => warn!("handshake: bus write failed (attempt {})", attempt),
      }
    }

    error!("handshake not acknowledged after {} attempts", attempts);
    Handshake::Exhausted { attempts }
  }
}

/// Invert the handshake bit of a host mode value.
pub const fn toggle_handshake(host_mode: u8) -> u8 {
  host_mode ^ HANDSHAKE_BIT
}

/// `value` with its handshake bit set to the inverse of `current`'s.
const fn acknowledge(value: u8, current: u8) -> u8 {
  if current & HANDSHAKE_BIT != 0 {
    value & !HANDSHAKE_BIT
  } else {
    value | HANDSHAKE_BIT
  }
}

/// Result of a handshake exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handshake {
  /// The toggled value was written on attempt `attempts`.
  Acknowledged { attempts: u8, written: u8 },
  /// Every attempt failed on the bus.
  Exhausted { attempts: u8 },
}

impl Handshake {
  pub const fn is_acknowledged(&self) -> bool {
    matches!(self, Handshake::Acknowledged { .. })
  }
}

#[cfg(test)]
mod tests {
  use embedded_hal::i2c::ErrorKind;
  use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

  use super::*;
  use crate::testing::{idle_driver, RecordingDelay};

  #[test]
  fn toggle_is_an_involution() {
    for b in 0..=u8::MAX {
      assert_eq!(toggle_handshake(toggle_handshake(b)), b);
      assert_ne!(toggle_handshake(b) & HANDSHAKE_BIT, b & HANDSHAKE_BIT);
    }
  }

  #[test]
  fn acknowledge_matches_toggle_when_echoing() {
    for b in 0..=u8::MAX {
      assert_eq!(acknowledge(b, b), toggle_handshake(b));
    }
  }

  #[test]
  fn clear_bit_is_set_on_first_attempt() {
    let expectations = [
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x00]),
      Transaction::write(I2C_ADDR, vec![0x00, 0x80]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let delay = RecordingDelay::default();
    let mut dev = idle_driver(i2c.clone(), delay.clone());

    assert_eq!(dev.handshake(), Handshake::Acknowledged { attempts: 1, written: 0x80 });
    assert_eq!(delay.total_ms(), 5);
    i2c.done();
  }

  #[test]
  fn set_bit_is_cleared() {
    let expectations = [
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x84]),
      Transaction::write(I2C_ADDR, vec![0x00, 0x04]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut dev = idle_driver(i2c.clone(), RecordingDelay::default());

    assert!(dev.handshake().is_acknowledged());
    i2c.done();
  }

  #[test]
  fn retries_after_read_and_write_failures() {
    let expectations = [
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x00]).with_error(ErrorKind::Other),
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x80]),
      Transaction::write(I2C_ADDR, vec![0x00, 0x00]).with_error(ErrorKind::Other),
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x80]),
      Transaction::write(I2C_ADDR, vec![0x00, 0x00]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let delay = RecordingDelay::default();
    let mut dev = idle_driver(i2c.clone(), delay.clone());

    assert_eq!(dev.handshake(), Handshake::Acknowledged { attempts: 3, written: 0x00 });
    assert_eq!(delay.total_ms(), 15);
    i2c.done();
  }

  #[test]
  fn gives_up_after_twenty_attempts() {
    let expectations: Vec<_> = (0..20)
      .map(|_| Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x00]).with_error(ErrorKind::Other))
      .collect();
    let mut i2c = I2cMock::new(&expectations);
    let delay = RecordingDelay::default();
    let mut dev = idle_driver(i2c.clone(), delay.clone());

    assert_eq!(dev.handshake(), Handshake::Exhausted { attempts: 20 });
    assert!(delay.total_ms() >= 100);
    i2c.done();
  }

  #[test]
  fn payload_carries_inverted_bit() {
    let expectations = [
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x80]),
      Transaction::write(I2C_ADDR, vec![0x00, OPERATE_MODE]),
      Transaction::write_read(I2C_ADDR, vec![0x00], vec![0x00]),
      Transaction::write(I2C_ADDR, vec![0x00, OPERATE_MODE | HANDSHAKE_BIT]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut dev = idle_driver(i2c.clone(), RecordingDelay::default());

    assert!(dev.handshake_with(OPERATE_MODE).is_acknowledged());
    assert!(dev.handshake_with(OPERATE_MODE).is_acknowledged());
    i2c.done();
  }
}
