//! Hand-written doubles for whole-stream checks, where listing every expected
//! transaction up front is not practical

extern crate std;

use std::vec::Vec;

use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, ErrorType, I2c, Operation},
};

/// Records every written byte, optionally failing the n-th write (0-based)
#[derive(Default)]
pub(crate) struct RecordingBus {
    pub(crate) writes: Vec<u8>,
    pub(crate) fail_at: Option<usize>,
    attempts: usize,
}

impl RecordingBus {
    pub(crate) fn failing_at(write: usize) -> Self {
        Self {
            fail_at: Some(write),
            ..Default::default()
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts
    }
}

impl ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl I2c for RecordingBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations.iter() {
            if let Operation::Write(bytes) = operation {
                if self.fail_at == Some(self.attempts) {
                    self.attempts += 1;
                    return Err(ErrorKind::Other);
                }
                self.attempts += 1;
                self.writes.extend_from_slice(bytes);
            }
        }
        Ok(())
    }
}

/// Records every requested delay in nanoseconds
#[derive(Default)]
pub(crate) struct RecordingDelay {
    pub(crate) delays_ns: Vec<u32>,
}

impl RecordingDelay {
    pub(crate) fn total_us(&self) -> u64 {
        self.delays_ns.iter().map(|&ns| ns as u64).sum::<u64>() / 1_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns);
    }
}
