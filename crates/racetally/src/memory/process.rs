//! Process location and the raw OS memory handle.
//!
//! The locator walks the system process list and matches on executable name.
//! [`ProcessHandle`] wraps the read-only OS handle; it is opened with the
//! minimum access right needed (`PROCESS_VM_READ`) and closed on drop, so no
//! call site has to remember a close call.

use crate::error::{Error, Result};

/// Find a running process by exact executable name.
///
/// Returns the pid of the first match, or `None` if the process isn't
/// running. Matching is exact and case-sensitive.
#[cfg(target_os = "windows")]
pub fn find_process_id(executable_name: &str) -> Option<u32> {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };

    // SAFETY: a process-list snapshot is read-only and owned by us until the
    // CloseHandle below.
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0).ok()?;

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut found = None;
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                let len = entry
                    .szExeFile
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(entry.szExeFile.len());
                let name = String::from_utf16_lossy(&entry.szExeFile[..len]);
                if name == executable_name {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }

        let _ = CloseHandle(snapshot);
        found
    }
}

#[cfg(not(target_os = "windows"))]
pub fn find_process_id(_executable_name: &str) -> Option<u32> {
    None
}

/// Owned read-only handle to a target process.
#[cfg(target_os = "windows")]
#[derive(Debug)]
pub struct ProcessHandle {
    handle: windows::Win32::Foundation::HANDLE,
    pid: u32,
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    /// Open the process for memory reading only.
    pub fn open(pid: u32) -> Result<Self> {
        use windows::Win32::System::Threading::{OpenProcess, PROCESS_VM_READ};

        // SAFETY: OpenProcess with PROCESS_VM_READ grants no control over the
        // target; the returned handle is closed in Drop.
        let handle = unsafe { OpenProcess(PROCESS_VM_READ, false, pid) }.map_err(|e| {
            Error::ProcessOpenFailed {
                pid,
                message: e.message(),
            }
        })?;

        Ok(Self { handle, pid })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Read exactly `buf.len()` bytes at `address` in the target's address
    /// space. A short read is a hard failure, never a truncated result.
    pub fn read_exact(&self, address: u64, buf: &mut [u8]) -> Result<()> {
        use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

        let mut bytes_read = 0usize;
        // SAFETY: buf outlives the call and the length passed matches its size.
        let result = unsafe {
            ReadProcessMemory(
                self.handle,
                address as *const std::ffi::c_void,
                buf.as_mut_ptr() as *mut std::ffi::c_void,
                buf.len(),
                Some(&mut bytes_read),
            )
        };

        result.map_err(|e| Error::MemoryReadFailed {
            address,
            message: e.message(),
        })?;

        if bytes_read != buf.len() {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("short read: {} of {} bytes", bytes_read, buf.len()),
            });
        }

        Ok(())
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        use windows::Win32::Foundation::CloseHandle;

        // SAFETY: the handle was returned by OpenProcess and is only closed here.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

/// Stub for non-Windows builds so the crate (and its tests) compile anywhere.
/// Opening always fails; the mock reader covers everything above this layer.
#[cfg(not(target_os = "windows"))]
#[derive(Debug)]
pub struct ProcessHandle {
    pid: u32,
}

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn open(pid: u32) -> Result<Self> {
        Err(Error::ProcessOpenFailed {
            pid,
            message: "process memory reading is only supported on Windows".to_string(),
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn read_exact(&self, address: u64, _buf: &mut [u8]) -> Result<()> {
        Err(Error::MemoryReadFailed {
            address,
            message: "process memory reading is only supported on Windows".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_process_id_missing() {
        // A name no real process carries; absence is None, not an error.
        assert_eq!(find_process_id("racetally-no-such-process.exe"), None);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_open_unsupported_platform() {
        let err = ProcessHandle::open(1234).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::ProcessOpenFailed { pid: 1234, .. }
        ));
    }
}
