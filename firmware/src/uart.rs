//! Debug text output on UART5.
//!
//! Pins:
//! - PC12: TX
//!
//! Lines come pre-formatted (CRLF terminated) from [`micromouse::debug`].
//! Output is best effort: callers drop the error.

use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, UartTx};

use micromouse::debug::{self, DebugLine};

pub struct DebugLink<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> DebugLink<'d> {
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }

    /// Write raw bytes
    pub async fn write(&mut self, data: &[u8]) -> Result<(), usart::Error> {
        self.tx.write(data).await
    }

    pub async fn emit(&mut self, line: &DebugLine) -> Result<(), usart::Error> {
        self.write(line.as_bytes()).await
    }

    pub async fn send_text(&mut self, text: &str) -> Result<(), usart::Error> {
        self.emit(&debug::text_line(text)).await
    }
}
