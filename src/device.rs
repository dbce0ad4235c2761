//! The operation set the harness drives on a dive computer.
//!
//! Framing, checksums and the serial transport live behind these traits; the
//! harness only ever sees byte buffers and [`Status`] codes.

use crate::status::Status;

pub type DeviceResult<T> = Result<T, Status>;

pub const HANDSHAKE_SIZE: usize = 24;
pub const MEMORY_USER_SIZE: usize = 16384; // 32 pages
pub const MEMORY_DATA_SIZE: usize = 2080768; // 16256 pages

/// Called once per stored dive with the record's raw bytes. Returning `false`
/// stops the enumeration.
pub type DiveVisitor<'a> = dyn FnMut(&[u8]) -> bool + 'a;

pub trait Driver {
    type Session: DeviceSession;

    /// Acquires the transport named by `name`. Fails with [`Status::IO`] if it
    /// can't be acquired.
    fn open(&self, name: &str) -> DeviceResult<Self::Session>;
}

pub trait DeviceSession {
    /// Fills `buf` completely with the device's handshake packet.
    fn handshake(&mut self, buf: &mut [u8]) -> DeviceResult<()>;

    /// Reads the general memory region into `buf`, returning how many bytes
    /// were produced. That count may be less than `buf.len()`.
    fn dump(&mut self, buf: &mut [u8]) -> DeviceResult<usize>;

    /// Reads the user settings region. `buf.len()` must be [`MEMORY_USER_SIZE`].
    fn read_user(&mut self, buf: &mut [u8]) -> DeviceResult<()>;

    fn foreach(&mut self, visitor: Option<&mut DiveVisitor<'_>>) -> DeviceResult<()>;

    fn close(self) -> DeviceResult<()>;
}

/// A zeroed buffer for a region of `size` bytes. Sizes come from the region
/// constants above, never from the device.
pub fn region_buffer(size: usize) -> Vec<u8> {
    vec![0; size]
}
