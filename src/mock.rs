//! Test doubles for the transport layer

use alloc::vec;
use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE, ROW_ADDRESS_SET};
use crate::interface::DisplayInterface;

pub(crate) struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Records every command and data burst
#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub commands: Vec<u8>,
    pub data: Vec<Vec<u8>>,
    /// Each command with all data bytes sent after it
    pub command_data: Vec<(u8, Vec<u8>)>,
    pub resets: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayInterface for MockInterface {
    type Error = core::convert::Infallible;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.commands.push(command);
        self.command_data.push((command, Vec::new()));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.data.push(data.to_vec());
        if let Some((_, bytes)) = self.command_data.last_mut() {
            bytes.extend_from_slice(data);
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.resets += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MockError;

/// Succeeds for a fixed number of transfers, then fails every call
#[derive(Debug)]
pub(crate) struct FailingInterface {
    pub remaining: usize,
    pub calls: usize,
}

impl FailingInterface {
    pub fn after(successes: usize) -> Self {
        Self {
            remaining: successes,
            calls: 0,
        }
    }

    fn step(&mut self) -> Result<(), MockError> {
        self.calls += 1;
        if self.remaining == 0 {
            return Err(MockError);
        }
        self.remaining -= 1;
        Ok(())
    }
}

impl DisplayInterface for FailingInterface {
    type Error = MockError;

    fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
        self.step()
    }

    fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        self.step()
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.step()
    }
}

/// Emulates controller memory: decodes address windows and memory writes
///
/// Coordinates here are controller addresses (offset already applied).
#[derive(Debug)]
pub(crate) struct MockPanel {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
    write_counts: Vec<usize>,
    last_command: u8,
    columns: (usize, usize),
    rows: (usize, usize),
    cursor: (usize, usize),
    pending: Vec<u8>,
    pub bursts: usize,
}

impl MockPanel {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
            write_counts: vec![0; width * height],
            last_command: 0,
            columns: (0, 0),
            rows: (0, 0),
            cursor: (0, 0),
            pending: Vec::new(),
            bursts: 0,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels[y * self.width + x]
    }

    pub fn writes(&self, x: usize, y: usize) -> usize {
        self.write_counts[y * self.width + x]
    }

    pub fn snapshot(&self) -> Vec<Option<Color>> {
        self.pixels.clone()
    }

    fn range(bytes: &[u8]) -> (usize, usize) {
        let start = u16::from_be_bytes([bytes[0], bytes[1]]);
        let end = u16::from_be_bytes([bytes[2], bytes[3]]);
        (usize::from(start), usize::from(end))
    }

    fn put(&mut self, color: Color) {
        let (x, y) = self.cursor;
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(color);
            self.write_counts[y * self.width + x] += 1;
        }
        if x >= self.columns.1 {
            self.cursor = (self.columns.0, y + 1);
        } else {
            self.cursor = (x + 1, y);
        }
    }
}

impl DisplayInterface for MockPanel {
    type Error = core::convert::Infallible;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.last_command = command;
        self.pending.clear();
        if command == MEMORY_WRITE {
            self.cursor = (self.columns.0, self.rows.0);
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        match self.last_command {
            COLUMN_ADDRESS_SET | ROW_ADDRESS_SET => {
                self.pending.extend_from_slice(data);
                if self.pending.len() == 4 {
                    let range = Self::range(&self.pending);
                    if self.last_command == COLUMN_ADDRESS_SET {
                        self.columns = range;
                    } else {
                        self.rows = range;
                    }
                }
            }
            MEMORY_WRITE => {
                self.bursts += 1;
                self.pending.extend_from_slice(data);
                let complete = self.pending.len() / 2 * 2;
                let bytes: Vec<u8> = self.pending.drain(..complete).collect();
                for pair in bytes.chunks_exact(2) {
                    self.put(Color::new(u16::from_be_bytes([pair[0], pair[1]])));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        Ok(())
    }
}
