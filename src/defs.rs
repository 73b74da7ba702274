/******************************************************************************
 * Cypress TrueTouch Standard Product Gen3 (TTSP) host interface, as used by  *
 * the TMA445 controller.                                                     *
 * ========================================================================== *
 *                        TMA445 - Registers & Commands                       *
*******************************************************************************/

pub(crate) const I2C_ADDR: u8 = 0x24;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Host mode / command register. Multi-byte reads auto-increment from here,
  // so it is also the base of the touch report and bootloader status blocks.
  HostMode = 0x00,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

// Host mode register bits
pub(crate) const HANDSHAKE_BIT: u8 = 0x80;
pub(crate) const SOFT_RESET_MODE: u8 = 0x01;
pub(crate) const OPERATE_MODE: u8 = 0x00;

// Bootloader status register bits
pub(crate) const BOOTLOADER_MODE_BIT: u8 = 0x10;

// Bootloader command block: file 0, command directive, opcode, keys 0..7
const BL_FILE0: u8 = 0x00;
const BL_CMD: u8 = 0xFF;
const BL_EXIT: u8 = 0xA5;
const BL_KEYS: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

pub(crate) const SECURITY_KEY: [u8; 11] = [0x00, 0xFF, 0xA5, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
pub(crate) const BOOTLOADER_EXIT: [u8; 11] = [
  BL_FILE0, BL_CMD, BL_EXIT, BL_KEYS[0], BL_KEYS[1], BL_KEYS[2], BL_KEYS[3], BL_KEYS[4], BL_KEYS[5], BL_KEYS[6],
  BL_KEYS[7],
];

pub(crate) const SLEEP_COMMAND: [u8; 2] = [0x01, 0x08];
pub(crate) const WAKE_COMMAND: [u8; 2] = [0x00, 0x08];

// Block sizes
pub(crate) const REPORT_LEN: usize = 14;
pub(crate) const BOOTLOADER_STATUS_LEN: usize = 16;

// Bring-up timing (ms)
pub(crate) const RESET_HOLD_MS: u32 = 10;
pub(crate) const SOFT_RESET_SETTLE_MS: u32 = 50;
pub(crate) const SECURITY_KEY_SETTLE_MS: u32 = 88;
pub(crate) const BOOT_POLL_INTERVAL_MS: u32 = 20;
pub(crate) const OPERATIONAL_SETTLE_MS: u32 = 20;

// Retry ceilings
pub(crate) const HANDSHAKE_ATTEMPTS: u8 = 20;
pub(crate) const HANDSHAKE_RETRY_MS: u32 = 5;
pub(crate) const BOOT_POLL_ATTEMPTS: u8 = 10;
