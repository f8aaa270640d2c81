//! Mock memory reader for tests.
//!
//! Builds a sparse image of the target address space so captures can run
//! without a live process.

use std::collections::BTreeMap;

use encoding_rs::WINDOWS_1251;

use crate::error::{Error, Result};
use crate::memory::reader::ReadMemory;

/// In-memory stand-in for a process address space.
#[derive(Debug, Default, Clone)]
pub struct MockMemoryReader {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl MockMemoryReader {
    pub fn builder() -> MockMemoryBuilder {
        MockMemoryBuilder::default()
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>> {
        // Find the region containing the requested range; reads never span
        // two regions, matching how a real page fault would fail the call.
        for (&base, bytes) in self.regions.range(..=address).rev() {
            let offset = (address - base) as usize;
            if offset < bytes.len() {
                if offset + len > bytes.len() {
                    return Err(Error::MemoryReadFailed {
                        address,
                        message: format!(
                            "short read: {} of {} bytes",
                            bytes.len() - offset,
                            len
                        ),
                    });
                }
                return Ok(bytes[offset..offset + len].to_vec());
            }
        }
        Err(Error::MemoryReadFailed {
            address,
            message: "unmapped address".to_string(),
        })
    }
}

/// Builder placing typed values at absolute addresses.
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl MockMemoryBuilder {
    pub fn bytes(mut self, address: u64, data: &[u8]) -> Self {
        self.regions.insert(address, data.to_vec());
        self
    }

    pub fn u32(self, address: u64, value: u32) -> Self {
        self.bytes(address, &value.to_le_bytes())
    }

    /// Place `text` encoded as windows-1251 in a zero-padded buffer of
    /// `width` bytes.
    pub fn str_1251(self, address: u64, text: &str, width: usize) -> Self {
        let (encoded, _, _) = WINDOWS_1251.encode(text);
        let mut buf = vec![0u8; width];
        let len = encoded.len().min(width.saturating_sub(1));
        buf[..len].copy_from_slice(&encoded[..len]);
        self.bytes(address, &buf)
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            regions: self.regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_roundtrip() {
        let mem = MockMemoryReader::builder().u32(0x1000, 7).build();
        assert_eq!(mem.read_u32(0x1000).unwrap(), 7);
    }

    #[test]
    fn test_unmapped_read_fails() {
        let mem = MockMemoryReader::builder().build();
        assert!(mem.read_bytes(0x1000, 4).is_err());
    }

    #[test]
    fn test_short_region_is_hard_failure() {
        let mem = MockMemoryReader::builder().bytes(0x1000, &[1, 2]).build();
        let err = mem.read_bytes(0x1000, 4).unwrap_err();
        assert!(matches!(err, Error::MemoryReadFailed { .. }));
    }

    #[test]
    fn test_read_inside_region() {
        let mem = MockMemoryReader::builder()
            .bytes(0x1000, &[1, 2, 3, 4, 5, 6])
            .build();
        assert_eq!(mem.read_bytes(0x1002, 3).unwrap(), vec![3, 4, 5]);
    }
}
