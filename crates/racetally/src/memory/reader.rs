//! Lazily-opening memory reader over a [`ProcessHandle`].
//!
//! The handle is a scarce OS resource, so it is only acquired when a read is
//! actually attempted, and it is released on every exit path: explicit
//! [`MemoryReader::close`], or the reader going out of scope.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::process::ProcessHandle;

/// Read access to a process address space.
///
/// The decoder is written against this trait so captures can run against a
/// mock memory image in tests.
pub trait ReadMemory {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>>;

    /// Read a little-endian u32 at `address`.
    fn read_u32(&self, address: u64) -> Result<u32> {
        let bytes = self.read_bytes(address, 4)?;
        let arr: [u8; 4] = bytes.try_into().map_err(|_| Error::MemoryReadFailed {
            address,
            message: "short read".to_string(),
        })?;
        Ok(u32::from_le_bytes(arr))
    }
}

enum HandleState {
    /// No read attempted yet; the first one opens the handle.
    Unopened,
    Open(ProcessHandle),
    /// Explicitly closed. Reads fail from here on; we never silently reopen.
    Closed,
}

/// Reader bound to one pid, holding at most one open handle.
///
/// The interior mutex serializes the open-handle state, so two threads
/// sharing a reader cannot race the lazy open or the close.
pub struct MemoryReader {
    pid: u32,
    state: Mutex<HandleState>,
    deadline: Option<Deadline>,
}

struct Deadline {
    started: Instant,
    budget: Duration,
}

impl MemoryReader {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            state: Mutex::new(HandleState::Unopened),
            deadline: None,
        }
    }

    /// Bound the whole read sequence by `budget`, measured from this call.
    ///
    /// `ReadProcessMemory` itself cannot be cancelled mid-call; the deadline
    /// is checked before each read, so a suspended target process cannot keep
    /// a multi-read capture going indefinitely.
    pub fn with_timeout(pid: u32, budget: Duration) -> Self {
        Self {
            pid,
            state: Mutex::new(HandleState::Unopened),
            deadline: Some(Deadline {
                started: Instant::now(),
                budget,
            }),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Release the handle. Idempotent; later reads fail with a read error.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(*state, HandleState::Open(_)) {
            debug!(pid = self.pid, "closing process handle");
        }
        *state = HandleState::Closed;
    }
}

impl ReadMemory for MemoryReader {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>> {
        if let Some(deadline) = &self.deadline
            && deadline.started.elapsed() > deadline.budget
        {
            return Err(Error::ReadTimeout { address });
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        match &*state {
            HandleState::Closed => {
                return Err(Error::MemoryReadFailed {
                    address,
                    message: "reader is closed".to_string(),
                });
            }
            HandleState::Unopened => {
                debug!(pid = self.pid, "opening process handle");
                let handle = ProcessHandle::open(self.pid)?;
                *state = HandleState::Open(handle);
            }
            HandleState::Open(_) => {}
        }

        let HandleState::Open(handle) = &*state else {
            unreachable!("state was just opened");
        };

        let mut buf = vec![0u8; len];
        handle.read_exact(address, &mut buf)?;
        Ok(buf)
    }
}
