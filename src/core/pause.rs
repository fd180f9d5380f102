use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const PAUSE_PROMPT: &str = "Press Enter to continue . . .";

/// Blocks until the user acknowledges with one line of input. EOF counts as an
/// acknowledgement so a closed stdin never hangs the installer.
pub fn wait_for_acknowledgement<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    write!(out, "{}", PAUSE_PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        // 沒有輸入時補上換行
        writeln!(out)?;
    }
    tracing::debug!("Acknowledged ({} byte(s) read)", read);
    Ok(())
}
