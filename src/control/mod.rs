mod bootloader;
mod handshake;
mod power;

pub use bootloader::*;
pub use handshake::*;
