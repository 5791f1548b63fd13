use selcui_protocol::{Envelope, Event, RegionType};

use crate::coords::{Vector2, Vector3};
use crate::paint::Color;
use crate::region::Region;
use crate::selection::{Selections, Slot};

use super::error::EventError;

/// What an applied event did to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A fresh region replaced the slot.
    Selected { slot: Slot, region: RegionType },
    Updated { slot: Slot },
    /// Accepted, nothing to change.
    Unchanged { slot: Slot },
}

const POINT_TARGETS: &[RegionType] = &[RegionType::Cuboid, RegionType::Polyhedron];
const POINT2D_TARGETS: &[RegionType] = &[RegionType::Polygon2d];
const ELLIPSOID_TARGETS: &[RegionType] = &[RegionType::Ellipsoid];
const CYLINDER_TARGETS: &[RegionType] = &[RegionType::Cylinder];
const MINMAX_TARGETS: &[RegionType] = &[RegionType::Polygon2d, RegionType::Cylinder];
const POLYGON_TARGETS: &[RegionType] = &[RegionType::Polyhedron];

/// Applies one decoded event. Arguments were fully parsed during decode, so
/// an error here always means the model is unchanged.
pub fn apply(envelope: Envelope, selections: &mut Selections) -> Result<Applied, EventError> {
    let slot = Slot::from_multi(envelope.multi);
    let event = envelope.event;

    if let Event::Selection { region, label } = event {
        if let Some(label) = label {
            log::debug!("{} selection `{}` is a {}", slot, label, region);
        }
        selections.set(slot, region);
        return Ok(Applied::Selected { slot, region });
    }
    if let Event::Update { area } = event {
        log::debug!("{} selection update (area {:?})", slot, area);
        return Ok(Applied::Unchanged { slot });
    }

    let kind = event.kind();
    let Some(region) = selections.get_mut(slot) else {
        return Err(EventError::NoSelection { slot });
    };
    let mismatch = |expected: &'static [RegionType], actual: RegionType| EventError::VariantMismatch {
        event: kind,
        expected,
        actual,
    };
    let actual = region.kind();

    match (event, region) {
        (Event::Point { id, x, y, z, .. }, Region::Cuboid(r)) => r.set_point(id, Vector3::new(x, y, z)),
        (Event::Point { id, x, y, z, .. }, Region::Polyhedron(r)) => r.set_vertex(id, Vector3::new(x, y, z)),
        (Event::Point { .. }, _) => return Err(mismatch(POINT_TARGETS, actual)),

        (Event::Point2D { id, x, z, .. }, Region::Polygon2d(r)) => {
            r.set_point(id, Vector2::new(x as f64, z as f64))
        }
        (Event::Point2D { .. }, _) => return Err(mismatch(POINT2D_TARGETS, actual)),

        (Event::EllipsoidCenter { x, y, z }, Region::Ellipsoid(r)) => {
            r.set_center(Vector3::new(x as f64, y as f64, z as f64))
        }
        (Event::EllipsoidRadii { x, y, z }, Region::Ellipsoid(r)) => r.set_radii(Vector3::new(x, y, z)),
        (Event::EllipsoidCenter { .. } | Event::EllipsoidRadii { .. }, _) => {
            return Err(mismatch(ELLIPSOID_TARGETS, actual));
        }

        (Event::Cylinder { x, y, z, radius_x, radius_z, .. }, Region::Cylinder(r)) => {
            r.set_center(Vector3::new(x as f64, y as f64, z as f64));
            r.set_radii(radius_x, radius_z);
        }
        (Event::Cylinder { .. }, _) => return Err(mismatch(CYLINDER_TARGETS, actual)),

        (Event::MinMax { min, max }, Region::Polygon2d(r)) => r.set_min_max(min, max),
        (Event::MinMax { min, max }, Region::Cylinder(r)) => r.set_min_max(min, max),
        (Event::MinMax { .. }, _) => return Err(mismatch(MINMAX_TARGETS, actual)),

        (Event::Polygon { vertex_ids }, Region::Polyhedron(r)) => {
            if !r.add_face(&vertex_ids) {
                return Ok(Applied::Unchanged { slot });
            }
        }
        (Event::Polygon { .. }, _) => return Err(mismatch(POLYGON_TARGETS, actual)),

        (Event::Colour { colours }, region) => {
            let colours = colours.map(Color::from_rgba8);
            region.set_custom_colours(&colours);
        }

        (Event::Grid { spacing, cull }, Region::Cuboid(r)) => r.set_grid(spacing, cull),
        (Event::Grid { .. }, _) => return Ok(Applied::Unchanged { slot }),

        (Event::Selection { .. } | Event::Update { .. }, _) => return Ok(Applied::Unchanged { slot }),
    }

    Ok(Applied::Updated { slot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use selcui_protocol::decode;

    fn run(sel: &mut Selections, raw: &str) -> Result<Applied, EventError> {
        apply(decode(raw).map_err(EventError::from)?, sel)
    }

    #[test]
    fn select_then_points_build_a_cuboid() {
        let mut sel = Selections::default();
        assert_eq!(
            run(&mut sel, "s|cuboid"),
            Ok(Applied::Selected { slot: Slot::Primary, region: RegionType::Cuboid })
        );
        run(&mut sel, "p|0|1|2|3|1").unwrap();
        run(&mut sel, "p|1|4|5|6|64").unwrap();

        let Some(Region::Cuboid(c)) = sel.get(Slot::Primary) else {
            panic!("expected cuboid");
        };
        assert_eq!(c.corners(), Some((Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0))));
    }

    #[test]
    fn events_need_a_selection() {
        let mut sel = Selections::default();
        assert_eq!(run(&mut sel, "mm|0|10"), Err(EventError::NoSelection { slot: Slot::Primary }));
        assert_eq!(run(&mut sel, "+p|0|1|2|3"), Err(EventError::NoSelection { slot: Slot::Multi }));
    }

    #[test]
    fn mismatched_variant_is_rejected_without_change() {
        let mut sel = Selections::default();
        run(&mut sel, "s|cylinder").unwrap();
        let before = sel.get(Slot::Primary).cloned();

        let err = run(&mut sel, "p2|0|5|5").unwrap_err();
        assert!(matches!(err, EventError::VariantMismatch { actual: RegionType::Cylinder, .. }));
        assert_eq!(sel.get(Slot::Primary).cloned(), before);
    }

    #[test]
    fn ellipsoid_centre_and_radii_arrive_separately() {
        let mut sel = Selections::default();
        run(&mut sel, "s|sphere").unwrap();
        run(&mut sel, "e|0|10|64|10").unwrap();
        run(&mut sel, "e|1|3.5|3.5|3.5").unwrap();

        let Some(Region::Ellipsoid(e)) = sel.get(Slot::Primary) else {
            panic!("expected ellipsoid");
        };
        assert_eq!(e.center(), Some(Vector3::new(10.0, 64.0, 10.0)));
        assert_eq!(e.radii(), Some(Vector3::splat(3.5)));
    }

    #[test]
    fn dropped_face_reports_unchanged() {
        let mut sel = Selections::default();
        run(&mut sel, "s|polyhedron").unwrap();
        run(&mut sel, "p|0|0|0|0").unwrap();
        assert_eq!(run(&mut sel, "poly|0|1|2"), Ok(Applied::Unchanged { slot: Slot::Primary }));
    }

    #[test]
    fn colours_apply_to_any_shape() {
        let mut sel = Selections::default();
        run(&mut sel, "s|polygon2d").unwrap();
        assert_eq!(
            run(&mut sel, "col|#ff0000ff|#00ff00ff|#0000ffff|#ffffffff"),
            Ok(Applied::Updated { slot: Slot::Primary })
        );
    }

    #[test]
    fn grid_outside_a_cuboid_is_ignored() {
        let mut sel = Selections::default();
        run(&mut sel, "s|cylinder").unwrap();
        assert_eq!(run(&mut sel, "grid|2"), Ok(Applied::Unchanged { slot: Slot::Primary }));
    }
}
