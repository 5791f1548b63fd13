use crate::message::Message;

/// Protocol revision announced in the handshake.
pub const PROTOCOL_VERSION: u32 = 4;

/// Key of the outbound handshake message.
pub const HANDSHAKE_KEY: &str = "v";

/// Builds the `v|<version>` handshake sent on join and on world change.
pub fn handshake() -> Message {
    Message::new(false, HANDSHAKE_KEY, vec![PROTOCOL_VERSION.to_string()])
}
