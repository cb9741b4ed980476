//! Best-effort debug text for the UART.
//!
//! Lines are fixed-capacity and always end in `"\r\n"`. Text that does not
//! fit is cut short; the terminator is always kept.

use core::fmt::{self, Write};

use heapless::String;

use crate::grid::Position;
use crate::heading::Heading;
use crate::navigator::Step;

/// Capacity of one debug line, terminator included.
pub const LINE_CAPACITY: usize = 48;

const TERMINATOR: &str = "\r\n";

pub type DebugLine = String<LINE_CAPACITY>;

/// Format `args` into a line, truncating on overflow.
pub fn format_line(args: fmt::Arguments<'_>) -> DebugLine {
    let mut body: String<{ LINE_CAPACITY - 2 }> = String::new();
    // Overflow is expected for long text; keep the prefix.
    let _ = Truncate(&mut body).write_fmt(args);

    let mut line = DebugLine::new();
    let _ = line.push_str(&body);
    let _ = line.push_str(TERMINATOR);
    line
}

pub fn text_line(text: &str) -> DebugLine {
    format_line(format_args!("{}", text))
}

/// `pos=R,C dir=H w=W`
pub fn status_line(pos: Position, heading: Heading, weight: u8) -> DebugLine {
    format_line(format_args!(
        "pos={},{} dir={} w={}",
        pos.row,
        pos.col,
        heading.letter(),
        weight
    ))
}

/// `wall R,C H`
pub fn wall_line(pos: Position, side: Heading) -> DebugLine {
    format_line(format_args!("wall {},{} {}", pos.row, pos.col, side.letter()))
}

pub fn step_line(step: &Step, weight: u8) -> DebugLine {
    match *step {
        Step::Moved { to, heading, .. } => status_line(to, heading, weight),
        Step::Arrived => text_line("goal"),
        Step::Stuck => text_line("stuck"),
    }
}

/// Writes as much as fits, then stops quietly.
struct Truncate<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncate<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}
