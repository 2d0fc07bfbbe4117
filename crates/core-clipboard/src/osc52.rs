use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// OSC 52 "set clipboard" sequence for `text`.
///
/// Inside tmux the sequence is wrapped in a DCS passthrough (inner ESC bytes
/// doubled) so it reaches the outer terminal.
pub fn osc52_sequence(text: &str, in_tmux: bool) -> String {
    let payload = STANDARD.encode(text.as_bytes());
    if in_tmux {
        format!("\x1bPtmux;\x1b\x1b]52;c;{payload}\x07\x1b\\")
    } else {
        format!("\x1b]52;c;{payload}\x07")
    }
}
