//! Input decoding for the modal layer.
//!
//! Two entry points produce `core_events::KeyToken`s: `raw` for undecoded
//! terminal strings and `key_token` for crossterm events read by a host loop.

mod key_token;
pub mod raw;

pub use key_token::{map_event, map_key_event};
pub use raw::{decode, decode_key};
