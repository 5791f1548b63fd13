use std::fmt;

use crate::error::ProtocolError;
use crate::message::Message;
use crate::registry::{self, EventKind, Registration};

// ── RegionType ────────────────────────────────────────────────────────────

/// Region shapes a selection event can create.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RegionType {
    Cuboid,
    Polygon2d,
    Ellipsoid,
    Cylinder,
    Polyhedron,
}

impl RegionType {
    /// Resolves a wire name. `sphere` is served by the ellipsoid shape.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "cuboid" => RegionType::Cuboid,
            "polygon2d" => RegionType::Polygon2d,
            "ellipsoid" | "sphere" => RegionType::Ellipsoid,
            "cylinder" => RegionType::Cylinder,
            "polyhedron" => RegionType::Polyhedron,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            RegionType::Cuboid => "cuboid",
            RegionType::Polygon2d => "polygon2d",
            RegionType::Ellipsoid => "ellipsoid",
            RegionType::Cylinder => "cylinder",
            RegionType::Polyhedron => "polyhedron",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Event ─────────────────────────────────────────────────────────────────

/// A fully validated selection-mutation command.
///
/// Every argument is parsed before an `Event` exists, so applying one can
/// never fail halfway through on bad input.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Selection { region: RegionType, label: Option<String> },
    Point { id: i32, x: f64, y: f64, z: f64, area: Option<i64> },
    Point2D { id: i32, x: i32, z: i32, area: Option<i64> },
    EllipsoidCenter { x: i32, y: i32, z: i32 },
    EllipsoidRadii { x: f64, y: f64, z: f64 },
    Cylinder { x: i32, y: i32, z: i32, radius_x: f64, radius_z: f64, area: Option<i64> },
    MinMax { min: i32, max: i32 },
    Update { area: Option<i64> },
    Polygon { vertex_ids: Vec<i32> },
    /// Straight-alpha RGBA bytes, in region style-slot order.
    Colour { colours: [[u8; 4]; 4] },
    Grid { spacing: f64, cull: bool },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Selection { .. } => EventKind::Selection,
            Event::Point { .. } => EventKind::Point,
            Event::Point2D { .. } => EventKind::Point2D,
            Event::EllipsoidCenter { .. } | Event::EllipsoidRadii { .. } => EventKind::Ellipsoid,
            Event::Cylinder { .. } => EventKind::Cylinder,
            Event::MinMax { .. } => EventKind::MinMax,
            Event::Update { .. } => EventKind::Update,
            Event::Polygon { .. } => EventKind::Polygon,
            Event::Colour { .. } => EventKind::Colour,
            Event::Grid { .. } => EventKind::Grid,
        }
    }

    /// Validates `message` against the registry and parses every argument.
    pub fn decode(message: &Message) -> Result<Self, ProtocolError> {
        let reg = registry::lookup(message.key())
            .ok_or_else(|| ProtocolError::UnknownEvent(message.key().to_owned()))?;

        let got = message.len();
        if got < reg.min_args || got > reg.max_args {
            return Err(ProtocolError::ArgumentCount {
                key: reg.key.to_owned(),
                min: reg.min_args,
                max: reg.max_args,
                got,
            });
        }

        decode_args(reg, message)
    }
}

fn decode_args(reg: &Registration, m: &Message) -> Result<Event, ProtocolError> {
    match reg.kind {
        EventKind::Selection => {
            let name = m.string(0)?;
            let region = RegionType::from_name(name)
                .ok_or_else(|| ProtocolError::UnknownRegion(name.to_owned()))?;
            let label = match m.string(1) {
                Ok(s) if !s.is_empty() => Some(s.to_owned()),
                _ => None,
            };
            Ok(Event::Selection { region, label })
        }

        EventKind::Point => {
            // `p0`/`p1` shift the coordinates down by one slot.
            let (id, base) = match reg.implied_id {
                Some(id) => (id, 0),
                None => (m.int(0)?, 1),
            };
            let x = m.double(base)?;
            let y = m.double(base + 1)?;
            let z = m.double(base + 2)?;
            let area = m.optional_long(base + 3)?;
            Ok(Event::Point { id, x, y, z, area })
        }

        EventKind::Point2D => {
            let id = m.int(0)?;
            let x = m.int(1)?;
            let z = m.int(2)?;
            let area = m.optional_long(3)?;
            Ok(Event::Point2D { id, x, z, area })
        }

        EventKind::Ellipsoid => match m.int(0)? {
            0 => Ok(Event::EllipsoidCenter { x: m.int(1)?, y: m.int(2)?, z: m.int(3)? }),
            1 => Ok(Event::EllipsoidRadii { x: m.double(1)?, y: m.double(2)?, z: m.double(3)? }),
            _ => Err(ProtocolError::MalformedArgument {
                index: 0,
                value: m.string(0)?.to_owned(),
                expected: "ellipsoid field id (0 or 1)",
            }),
        },

        EventKind::Cylinder => {
            let x = m.int(0)?;
            let y = m.int(1)?;
            let z = m.int(2)?;
            let radius_x = m.double(3)?;
            let radius_z = m.double(4)?;
            let area = m.optional_long(5)?;
            Ok(Event::Cylinder { x, y, z, radius_x, radius_z, area })
        }

        EventKind::MinMax => Ok(Event::MinMax { min: m.int(0)?, max: m.int(1)? }),

        EventKind::Update => Ok(Event::Update { area: m.optional_long(0)? }),

        EventKind::Polygon => {
            let vertex_ids = (0..m.len()).map(|i| m.int(i)).collect::<Result<Vec<_>, _>>()?;
            Ok(Event::Polygon { vertex_ids })
        }

        EventKind::Colour => Ok(Event::Colour {
            colours: [m.colour(0)?, m.colour(1)?, m.colour(2)?, m.colour(3)?],
        }),

        EventKind::Grid => {
            let spacing = m.double(0)?;
            let cull = matches!(m.string(1), Ok("cull"));
            Ok(Event::Grid { spacing, cull })
        }
    }
}

// ── Envelope ──────────────────────────────────────────────────────────────

/// A decoded event plus its slot marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub multi: bool,
    pub event: Event,
}

/// Splits and decodes one raw payload.
pub fn decode(raw: &str) -> Result<Envelope, ProtocolError> {
    let message = Message::parse(raw)?;
    let event = Event::decode(&message)?;
    Ok(Envelope { multi: message.multi(), event })
}
