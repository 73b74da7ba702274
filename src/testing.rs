//! Shared fixtures for the unit tests.

use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

use crate::defs::*;
use crate::{Config, Mode, NoPin, Tma445, TouchPoint, TouchPoints, TouchReport};

/// Delay that only records how long it was asked to wait.
#[derive(Clone, Default)]
pub(crate) struct RecordingDelay {
  elapsed_ns: Rc<Cell<u64>>,
}

impl RecordingDelay {
  pub(crate) fn total_ms(&self) -> u64 {
    self.elapsed_ns.get() / 1_000_000
  }
}

impl DelayNs for RecordingDelay {
  fn delay_ns(&mut self, ns: u32) {
    self.elapsed_ns.set(self.elapsed_ns.get() + u64::from(ns));
  }

  fn delay_ms(&mut self, ms: u32) {
    self.elapsed_ns.set(self.elapsed_ns.get() + u64::from(ms) * 1_000_000);
  }
}

/// A driver that skipped bring-up and sits in operational mode.
pub(crate) fn idle_driver(i2c: I2cMock, delay: RecordingDelay) -> Tma445<I2cMock, RecordingDelay, NoPin, NoPin> {
  Tma445 {
    i2c,
    delay,
    reset: None,
    interrupt: None,
    config: Config::default(),
    mode: Mode::Operational,
    points: TouchPoints::none(),
    missed_handshakes: 0,
  }
}

/// Swap in an interrupt line on a driver built by [`idle_driver`].
pub(crate) fn with_interrupt<INT>(
  dev: Tma445<I2cMock, RecordingDelay, NoPin, NoPin>,
  interrupt: INT,
) -> Tma445<I2cMock, RecordingDelay, NoPin, INT> {
  Tma445 {
    i2c: dev.i2c,
    delay: dev.delay,
    reset: dev.reset,
    interrupt: Some(interrupt),
    config: dev.config,
    mode: dev.mode,
    points: dev.points,
    missed_handshakes: dev.missed_handshakes,
  }
}

/// Poll `fut` a single time with a waker that does nothing.
pub(crate) fn poll_once<F: Future>(fut: F) -> Poll<F::Output> {
  const VTABLE: RawWakerVTable = RawWakerVTable::new(|_| RawWaker::new(core::ptr::null(), &VTABLE), |_| {}, |_| {}, |_| {});

  let waker = unsafe { Waker::from_raw(RawWaker::new(core::ptr::null(), &VTABLE)) };
  let mut cx = Context::from_waker(&waker);
  pin!(fut).poll(&mut cx)
}

pub(crate) fn status_block(status: u8) -> [u8; BOOTLOADER_STATUS_LEN] {
  let mut b = [0u8; BOOTLOADER_STATUS_LEN];
  b[1] = status;
  b
}

pub(crate) fn report_block(host_mode: u8, touch_status: u8, points: &[TouchPoint]) -> [u8; REPORT_LEN] {
  TouchReport {
    host_mode,
    touch_status,
    point1: points.first().copied().unwrap_or_default(),
    touch_ids: 0x12,
    point2: points.get(1).copied().unwrap_or_default(),
    ..TouchReport::default()
  }
  .to_bytes()
}

/// Soft reset and security key writes.
pub(crate) fn bring_up_prefix() -> Vec<Transaction> {
  vec![
    Transaction::write(I2C_ADDR, vec![0x00, SOFT_RESET_MODE]),
    Transaction::write(I2C_ADDR, [&[0x00][..], &SECURITY_KEY[..]].concat()),
  ]
}

/// A handshake that reads `host_mode` and writes it back toggled.
pub(crate) fn handshake_ok(host_mode: u8) -> Vec<Transaction> {
  vec![
    Transaction::write_read(I2C_ADDR, vec![0x00], vec![host_mode]),
    Transaction::write(I2C_ADDR, vec![0x00, host_mode ^ HANDSHAKE_BIT]),
  ]
}
