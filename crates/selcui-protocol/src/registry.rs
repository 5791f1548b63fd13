use std::fmt;

/// Event kinds understood by the overlay.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Selection,
    Point,
    Point2D,
    Ellipsoid,
    Cylinder,
    MinMax,
    Update,
    Polygon,
    Colour,
    Grid,
}

impl EventKind {
    /// Canonical wire key.
    pub const fn key(self) -> &'static str {
        match self {
            EventKind::Selection => "s",
            EventKind::Point => "p",
            EventKind::Point2D => "p2",
            EventKind::Ellipsoid => "e",
            EventKind::Cylinder => "cyl",
            EventKind::MinMax => "mm",
            EventKind::Update => "u",
            EventKind::Polygon => "poly",
            EventKind::Colour => "col",
            EventKind::Grid => "grid",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Selection => "selection",
            EventKind::Point => "point",
            EventKind::Point2D => "point2d",
            EventKind::Ellipsoid => "ellipsoid",
            EventKind::Cylinder => "cylinder",
            EventKind::MinMax => "minmax",
            EventKind::Update => "update",
            EventKind::Polygon => "polygon",
            EventKind::Colour => "colour",
            EventKind::Grid => "grid",
        };
        f.write_str(name)
    }
}

/// One entry of the closed registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Registration {
    pub key: &'static str,
    pub kind: EventKind,
    pub min_args: usize,
    pub max_args: usize,
    /// Point id carried by the key itself (`p0`, `p1`) instead of argument 0.
    pub implied_id: Option<i32>,
}

const fn reg(key: &'static str, kind: EventKind, min_args: usize, max_args: usize) -> Registration {
    Registration { key, kind, min_args, max_args, implied_id: None }
}

const fn point(key: &'static str, id: i32) -> Registration {
    Registration { key, kind: EventKind::Point, min_args: 3, max_args: 4, implied_id: Some(id) }
}

/// Every key the decoder accepts. Lookup is exact and case-sensitive.
pub const REGISTRY: &[Registration] = &[
    reg("s", EventKind::Selection, 1, 2),
    reg("sel", EventKind::Selection, 1, 2),
    reg("p", EventKind::Point, 4, 5),
    point("p0", 0),
    point("p1", 1),
    reg("p2", EventKind::Point2D, 3, 4),
    reg("e", EventKind::Ellipsoid, 4, 4),
    reg("cyl", EventKind::Cylinder, 5, 6),
    reg("mm", EventKind::MinMax, 2, 2),
    reg("u", EventKind::Update, 1, 1),
    reg("poly", EventKind::Polygon, 3, 99),
    reg("col", EventKind::Colour, 4, 4),
    reg("grid", EventKind::Grid, 1, 2),
];

/// Finds the registration for `key`.
pub fn lookup(key: &str) -> Option<&'static Registration> {
    REGISTRY.iter().find(|r| r.key == key)
}
