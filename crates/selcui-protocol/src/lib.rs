//! Wire decoding for the **selection overlay protocol**.
//!
//! The authority describes the player's selection with short pipe-delimited
//! messages: `[+]<key>|<arg0>|<arg1>|...`. A leading `+` addresses the multi
//! slot instead of the primary one.
//!
//! This crate is intentionally dependency-free so server-side tooling and
//! tests can produce and check messages without any engine or GPU code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | `Message` splitting and typed argument accessors |
//! | [`registry`] | `EventKind`, the closed key registry |
//! | [`event`] | `Event`, `RegionType`, `decode` |
//! | [`handshake`] | the outbound version handshake |
//! | [`error`] | `ProtocolError` |
//!
//! # Quick start
//!
//! ```rust
//! use selcui_protocol::{decode, Event, RegionType};
//!
//! let env = decode("+s|cuboid").unwrap();
//! assert!(env.multi);
//! assert_eq!(env.event, Event::Selection { region: RegionType::Cuboid, label: None });
//! ```

pub mod error;
pub mod event;
pub mod handshake;
pub mod message;
pub mod registry;

pub use error::ProtocolError;
pub use event::{decode, Envelope, Event, RegionType};
pub use handshake::{handshake, PROTOCOL_VERSION};
pub use message::Message;
pub use registry::EventKind;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(raw: &str) -> Envelope { decode(raw).unwrap() }
    fn err(raw: &str) -> ProtocolError { decode(raw).unwrap_err() }

    // ── splitting ─────────────────────────────────────────────────────────

    #[test]
    fn split_keeps_trailing_empty_fields() {
        let m = Message::parse("p|0|1|2|3||").unwrap();
        assert_eq!(m.key(), "p");
        assert_eq!(m.args(), ["0", "1", "2", "3", "", ""]);
    }

    #[test]
    fn split_keeps_interior_empty_fields() {
        let m = Message::parse("x||a||").unwrap();
        assert_eq!(m.args(), ["", "a", "", ""]);
    }

    #[test]
    fn multi_marker_is_stripped() {
        let m = Message::parse("+mm|1|5").unwrap();
        assert!(m.multi());
        assert_eq!(m.key(), "mm");
        assert_eq!(m.args(), ["1", "5"]);
    }

    #[test]
    fn key_without_separator_has_no_args() {
        let m = Message::parse("u").unwrap();
        assert_eq!(m.key(), "u");
        assert!(m.is_empty());
    }

    #[test]
    fn key_with_lone_separator_has_one_empty_arg() {
        assert_eq!(Message::parse("u|").unwrap().args(), [""]);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(Message::parse("").unwrap_err(), ProtocolError::EmptyMessage);
        assert_eq!(Message::parse("+").unwrap_err(), ProtocolError::EmptyMessage);
        assert_eq!(Message::parse("|cuboid").unwrap_err(), ProtocolError::EmptyMessage);
    }

    #[test]
    fn encode_restores_wire_form() {
        let raw = "+p|1|2.5|3||";
        assert_eq!(Message::parse(raw).unwrap().encode(), raw);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[test]
    fn int_accepts_decimal_spelling() {
        let m = Message::parse("x|10.0|-3.9| 7 ").unwrap();
        assert_eq!(m.int(0).unwrap(), 10);
        assert_eq!(m.int(1).unwrap(), -3);
        assert_eq!(m.int(2).unwrap(), 7);
    }

    #[test]
    fn int_rejects_garbage_and_empty() {
        let m = Message::parse("x|abc|").unwrap();
        assert!(matches!(m.int(0), Err(ProtocolError::MalformedArgument { index: 0, .. })));
        assert!(matches!(m.int(1), Err(ProtocolError::MalformedArgument { index: 1, .. })));
    }

    #[test]
    fn out_of_range_index_is_missing() {
        let m = Message::parse("x|1").unwrap();
        assert_eq!(m.double(3).unwrap_err(), ProtocolError::MissingArgument { index: 3 });
    }

    #[test]
    fn double_rejects_non_finite() {
        let m = Message::parse("x|NaN|inf|1e3").unwrap();
        assert!(m.double(0).is_err());
        assert!(m.double(1).is_err());
        assert_eq!(m.double(2).unwrap(), 1000.0);
    }

    #[test]
    fn optional_long_treats_empty_as_absent() {
        let m = Message::parse("x||42").unwrap();
        assert_eq!(m.optional_long(0).unwrap(), None);
        assert_eq!(m.optional_long(1).unwrap(), Some(42));
        assert_eq!(m.optional_long(2).unwrap(), None);
    }

    #[test]
    fn hex_colours() {
        assert_eq!(message::parse_hex_colour("#ff000080"), Some([255, 0, 0, 128]));
        assert_eq!(message::parse_hex_colour("00ff00"), Some([0, 255, 0, 255]));
        assert_eq!(message::parse_hex_colour("#fff"), None);
        assert_eq!(message::parse_hex_colour("#gg0000ff"), None);
    }

    // ── registry ──────────────────────────────────────────────────────────

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(err("zz|1"), ProtocolError::UnknownEvent("zz".into()));
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_eq!(err("S|cuboid"), ProtocolError::UnknownEvent("S".into()));
    }

    #[test]
    fn argument_count_is_enforced() {
        assert!(matches!(err("mm|1"), ProtocolError::ArgumentCount { min: 2, max: 2, got: 1, .. }));
        assert!(matches!(err("poly|1|2"), ProtocolError::ArgumentCount { got: 2, .. }));
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn selection_short_and_long_keys() {
        let a = ok("s|cuboid").event;
        let b = ok("sel|cuboid").event;
        assert_eq!(a, b);
        assert_eq!(a, Event::Selection { region: RegionType::Cuboid, label: None });
    }

    #[test]
    fn selection_sphere_is_ellipsoid() {
        assert_eq!(
            ok("s|sphere").event,
            Event::Selection { region: RegionType::Ellipsoid, label: None }
        );
    }

    #[test]
    fn selection_unknown_region() {
        assert_eq!(err("s|blob"), ProtocolError::UnknownRegion("blob".into()));
    }

    #[test]
    fn point_with_area() {
        assert_eq!(
            ok("p|1|5|6.5|7|120").event,
            Event::Point { id: 1, x: 5.0, y: 6.5, z: 7.0, area: Some(120) }
        );
    }

    #[test]
    fn point_with_implied_id() {
        assert_eq!(
            ok("p1|5|5|5").event,
            Event::Point { id: 1, x: 5.0, y: 5.0, z: 5.0, area: None }
        );
    }

    #[test]
    fn point_bad_coordinate_fails_whole_event() {
        assert!(matches!(err("p|0|1|oops|3"), ProtocolError::MalformedArgument { index: 2, .. }));
    }

    #[test]
    fn ellipsoid_center_and_radii() {
        assert_eq!(ok("e|0|1|2|3").event, Event::EllipsoidCenter { x: 1, y: 2, z: 3 });
        assert_eq!(ok("e|1|1.5|2|3").event, Event::EllipsoidRadii { x: 1.5, y: 2.0, z: 3.0 });
        assert!(matches!(err("e|2|1|2|3"), ProtocolError::MalformedArgument { index: 0, .. }));
    }

    #[test]
    fn polygon_ids() {
        assert_eq!(ok("poly|0|1|2|3").event, Event::Polygon { vertex_ids: vec![0, 1, 2, 3] });
    }

    #[test]
    fn colour_event() {
        let env = ok("+col|#ff0000ff|#00ff00ff|#0000ffff|#ffffff80");
        assert!(env.multi);
        assert_eq!(
            env.event,
            Event::Colour {
                colours: [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [255, 255, 255, 128]],
            }
        );
    }

    #[test]
    fn grid_cull_flag() {
        assert_eq!(ok("grid|2").event, Event::Grid { spacing: 2.0, cull: false });
        assert_eq!(ok("grid|0.5|cull").event, Event::Grid { spacing: 0.5, cull: true });
    }

    #[test]
    fn handshake_message() {
        assert_eq!(handshake().encode(), "v|4");
    }
}
