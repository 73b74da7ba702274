use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::{Error, Reg, Tma445, I2C_ADDR};

impl<I, E, D, RST, INT> Tma445<I, D, RST, INT>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  // Typed helpers
  pub(crate) fn read<const N: usize, T: From<[u8; N]>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    let mut b = [0u8; N];
    self.read_bytes(reg, &mut b)?;
    Ok(T::from(b))
  }

  pub(crate) fn read_u8(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let buf: [u8; 1] = self.read(reg)?;
    Ok(buf[0])
  }

  pub(crate) fn read_bytes(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E>> {
    let addr = [u8::from(reg)];
    self.i2c.write_read(I2C_ADDR, &addr, buf).map_err(Error::I2c)
  }

  pub(crate) fn write_bytes(&mut self, reg: Reg, data: &[u8]) -> Result<(), Error<E>> {
    let len = data.len();
    if len > 15 {
      return Err(Error::BufferOverflow);
    }
    let mut buf = [0u8; 16];
    buf[0] = reg.into();
    buf[1..=len].copy_from_slice(data);
    self.i2c.write(I2C_ADDR, &buf[..=len]).map_err(Error::I2c)
  }
}
