//! Versioned memory schema for the observed game build.
//!
//! Every address, stride and buffer size here is a contract with one specific
//! build of `RCCars.exe`. Supporting another build is a data change: ship a
//! different layout file, not a different binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryLayout {
    /// Free-form build tag the layout was made for.
    pub version: String,
    /// Address of the 4-byte race type code.
    pub race_type_addr: u64,
    /// Address of the 4-byte player count.
    pub player_count_addr: u64,
    /// Base of the per-slot record pointer table.
    pub roster_table_addr: u64,
    /// Distance between consecutive slot entries in the table.
    pub roster_stride: u64,
    /// Offset of the name buffer inside a pointed-to slot record.
    pub name_ptr_offset: u64,
    /// Fixed width of a name buffer.
    pub name_len: usize,
    /// Address of the map slug buffer.
    pub map_name_addr: u64,
    /// Fixed width of the map slug buffer.
    pub map_name_len: usize,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        // The one build this tool was written against.
        Self {
            version: "rccars-1.0".to_string(),
            race_type_addr: 0x149A674,
            player_count_addr: 0x14B0988,
            roster_table_addr: 0x14B0730,
            roster_stride: 0x64,
            name_ptr_offset: 0x14,
            name_len: 0x20,
            map_name_addr: 0x148F940,
            map_name_len: 0x104,
        }
    }
}

impl MemoryLayout {
    /// Address of the slot record pointer for roster slot `index`.
    pub fn slot_ptr_addr(&self, index: u64) -> u64 {
        self.roster_table_addr + index * self.roster_stride
    }

    pub fn is_valid(&self) -> bool {
        !self.version.is_empty()
            && self.race_type_addr != 0
            && self.player_count_addr != 0
            && self.roster_table_addr != 0
            && self.roster_stride != 0
            && self.name_len != 0
            && self.map_name_addr != 0
            && self.map_name_len != 0
    }
}

/// Load a layout from a JSON file.
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<MemoryLayout> {
    let content = std::fs::read_to_string(path)?;
    let layout: MemoryLayout = serde_json::from_str(&content)?;
    Ok(layout)
}

/// Save a layout as pretty-printed JSON.
pub fn save_layout<P: AsRef<Path>>(path: P, layout: &MemoryLayout) -> Result<()> {
    let content = serde_json::to_string_pretty(layout)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = MemoryLayout::default();
        assert!(layout.is_valid());
        assert_eq!(layout.roster_stride, 0x64);
        assert_eq!(layout.name_ptr_offset, 0x14);
    }

    #[test]
    fn test_slot_ptr_addr() {
        let layout = MemoryLayout::default();
        assert_eq!(layout.slot_ptr_addr(0), layout.roster_table_addr);
        assert_eq!(layout.slot_ptr_addr(3), layout.roster_table_addr + 3 * 0x64);
    }

    #[test]
    fn test_layout_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        let layout = MemoryLayout {
            version: "rccars-test".to_string(),
            ..MemoryLayout::default()
        };
        save_layout(&path, &layout).unwrap();

        let loaded = load_layout(&path).unwrap();
        assert_eq!(loaded.version, "rccars-test");
        assert_eq!(loaded.race_type_addr, layout.race_type_addr);
        assert_eq!(loaded.map_name_len, layout.map_name_len);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let layout = MemoryLayout {
            roster_stride: 0,
            ..MemoryLayout::default()
        };
        assert!(!layout.is_valid());
    }
}
