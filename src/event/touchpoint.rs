/// A single decoded contact.
///
/// Coordinates and strength are reported as the controller produced them;
/// no calibration or scaling is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
  pub x: u16,
  pub y: u16,
  /// Pressure/size proxy (the controller's Z value).
  pub strength: u8,
}

impl TouchPoint {
  pub const fn new(x: u16, y: u16, strength: u8) -> Self {
    Self { x, y, strength }
  }
}

/// Up to two active contacts.
///
/// Only the first [`TouchPoints::len`] slots are meaningful. Unused slots are
/// zeroed on construction; after the active count is cleared the previous
/// coordinates stay in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoints {
  points: [TouchPoint; 2],
  count: u8,
}

impl TouchPoints {
  pub const fn none() -> Self {
    Self { points: [TouchPoint::new(0, 0, 0); 2], count: 0 }
  }

  pub const fn one(primary: TouchPoint) -> Self {
    Self { points: [primary, TouchPoint::new(0, 0, 0)], count: 1 }
  }

  pub const fn two(primary: TouchPoint, secondary: TouchPoint) -> Self {
    Self { points: [primary, secondary], count: 2 }
  }

  pub const fn len(&self) -> usize {
    self.count as usize
  }

  pub const fn is_empty(&self) -> bool {
    self.count == 0
  }

  pub fn as_slice(&self) -> &[TouchPoint] {
    &self.points[..self.len()]
  }

  pub fn iter(&self) -> core::slice::Iter<'_, TouchPoint> {
    self.as_slice().iter()
  }

  pub fn primary(&self) -> Option<TouchPoint> {
    self.as_slice().first().copied()
  }

  pub fn secondary(&self) -> Option<TouchPoint> {
    self.as_slice().get(1).copied()
  }

  /// Drop the active count, keeping the stored coordinates.
  pub(crate) fn invalidate(&mut self) {
    self.count = 0;
  }
}

impl<'a> IntoIterator for &'a TouchPoints {
  type Item = &'a TouchPoint;
  type IntoIter = core::slice::Iter<'a, TouchPoint>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
