use crate::defs::{HANDSHAKE_BIT, REPORT_LEN};
use crate::{TouchPoint, TouchPoints};

/// One touch report block as read from the host mode register onwards.
///
/// Layout (multi-byte fields big-endian):
///
/// | offset | field                 |
/// |--------|-----------------------|
/// | 0      | host mode             |
/// | 1      | touch mode            |
/// | 2      | touch status          |
/// | 3..7   | touch 1 X, Y          |
/// | 7      | touch 1 strength      |
/// | 8      | touch 1/2 identifiers |
/// | 9..13  | touch 2 X, Y          |
/// | 13     | touch 2 strength      |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchReport {
  pub host_mode: u8,
  pub touch_mode: u8,
  pub touch_status: u8,
  pub point1: TouchPoint,
  pub touch_ids: u8,
  pub point2: TouchPoint,
}

impl TouchReport {
  pub fn from_bytes(b: &[u8; REPORT_LEN]) -> Self {
    Self {
      host_mode: b[0],
      touch_mode: b[1],
      touch_status: b[2],
      point1: TouchPoint::new(u16::from_be_bytes([b[3], b[4]]), u16::from_be_bytes([b[5], b[6]]), b[7]),
      touch_ids: b[8],
      point2: TouchPoint::new(u16::from_be_bytes([b[9], b[10]]), u16::from_be_bytes([b[11], b[12]]), b[13]),
    }
  }

  pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
    let mut b = [0u8; REPORT_LEN];
    b[0] = self.host_mode;
    b[1] = self.touch_mode;
    b[2] = self.touch_status;
    b[3..5].copy_from_slice(&self.point1.x.to_be_bytes());
    b[5..7].copy_from_slice(&self.point1.y.to_be_bytes());
    b[7] = self.point1.strength;
    b[8] = self.touch_ids;
    b[9..11].copy_from_slice(&self.point2.x.to_be_bytes());
    b[11..13].copy_from_slice(&self.point2.y.to_be_bytes());
    b[13] = self.point2.strength;
    b
  }

  /// Number of active contacts. Status values other than one or two
  /// contacts read as none.
  pub const fn touch_count(&self) -> u8 {
    match self.touch_status & 0x0F {
      n @ (1 | 2) => n,
      _ => 0,
    }
  }

  pub const fn handshake_bit(&self) -> bool {
    self.host_mode & HANDSHAKE_BIT != 0
  }

  pub const fn primary_id(&self) -> u8 {
    (self.touch_ids & 0xF0) >> 4
  }

  pub const fn secondary_id(&self) -> u8 {
    self.touch_ids & 0x0F
  }

  /// The contacts this report carries.
  pub fn points(&self) -> TouchPoints {
    match self.touch_count() {
      1 => TouchPoints::one(self.point1),
      2 => TouchPoints::two(self.point1, self.point2),
      _ => TouchPoints::none(),
    }
  }
}

impl From<[u8; REPORT_LEN]> for TouchReport {
  fn from(b: [u8; REPORT_LEN]) -> Self {
    Self::from_bytes(&b)
  }
}
