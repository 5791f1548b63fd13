//! Wire messages through the dispatcher into a recording backend.

use selcui_engine::coords::Vector3;
use selcui_engine::event::{channel, Dispatcher};
use selcui_engine::frame::{FrameInfo, FrameOutcome, WorldRenderer};
use selcui_engine::region::{Region, RegionType};
use selcui_engine::render::{
    HeadlessPipelineProvider, PipelineProvider, RecordingTarget, RenderSink, TypeSet,
};
use selcui_engine::selection::{Selections, Slot};

fn feed(sel: &mut Selections, messages: &[&str]) -> Dispatcher {
    let mut d = Dispatcher::new();
    for m in messages {
        d.on_message(m, sel);
    }
    d
}

fn headless() -> (WorldRenderer, RecordingTarget) {
    let rec = RecordingTarget::new(TypeSet::RIBBON);
    let renderer = WorldRenderer::new(vec![Box::new(HeadlessPipelineProvider::new(rec.clone()))]);
    (renderer, rec)
}

#[test]
fn legacy_cuboid_messages_render_around_the_camera() {
    let mut sel = Selections::default();
    feed(&mut sel, &["sel|cuboid", "p0|10|64|10", "p1|12|66|12"]);

    let Some(Region::Cuboid(c)) = sel.get(Slot::Primary) else {
        panic!("expected cuboid");
    };
    assert_eq!(c.corners(), Some((Vector3::new(10.0, 64.0, 10.0), Vector3::new(12.0, 66.0, 12.0))));

    let (mut renderer, rec) = headless();
    let camera = Vector3::new(11.0, 65.0, 11.0);
    assert_eq!(renderer.render(&sel, FrameInfo::world(camera, 0.0)), FrameOutcome::Drawn);
    assert!(rec.primitive_count() > 0);

    // Everything lies within the padded selection, relative to the camera.
    for batch in rec.batches() {
        for [x, y, z] in batch.data.positions() {
            for (v, lo, hi) in [(x, -1.03, 2.03), (y, -1.03, 2.03), (z, -1.03, 2.03)] {
                assert!(v >= lo - 1e-4 && v <= hi + 1e-4, "{v} outside [{lo}, {hi}]");
            }
        }
    }
}

#[test]
fn multi_marker_only_touches_multi_slot() {
    let mut sel = Selections::default();
    feed(&mut sel, &["s|polyhedron", "+sel|cuboid"]);
    assert_eq!(sel.get(Slot::Primary).map(Region::kind), Some(RegionType::Polyhedron));
    assert_eq!(sel.get(Slot::Multi).map(Region::kind), Some(RegionType::Cuboid));

    feed(&mut sel, &["+s|cylinder"]);
    assert_eq!(sel.get(Slot::Primary).map(Region::kind), Some(RegionType::Polyhedron));
    assert_eq!(sel.get(Slot::Multi).map(Region::kind), Some(RegionType::Cylinder));
}

#[test]
fn cylinder_without_height_sits_on_centre_layer() {
    let mut sel = Selections::default();
    feed(&mut sel, &["s|cylinder", "cyl|0|70|0|4.5|2.5", "mm|0|0"]);
    let Some(Region::Cylinder(c)) = sel.get(Slot::Primary) else {
        panic!("expected cylinder");
    };
    let span = c.span().unwrap();
    assert_eq!((span.min_y, span.max_y), (70, 70));
    assert_eq!((span.radius_x, span.radius_z), (4.5, 2.5));

    feed(&mut sel, &["mm|60|80"]);
    let Some(Region::Cylinder(c)) = sel.get(Slot::Primary) else {
        panic!("expected cylinder");
    };
    let span = c.span().unwrap();
    assert_eq!((span.min_y, span.max_y), (60, 80));
}

#[test]
fn face_over_missing_vertex_is_ignored() {
    let mut sel = Selections::default();
    let d = feed(
        &mut sel,
        &["s|polyhedron", "p|0|0|0|0", "p|2|4|0|0", "poly|0|1|2", "p|1|0|0|4", "poly|0|1|2"],
    );
    assert_eq!(d.stats().dropped, 0);

    let Some(Region::Polyhedron(p)) = sel.get(Slot::Primary) else {
        panic!("expected polyhedron");
    };
    assert_eq!(p.face_count(), 1);
}

#[test]
fn huge_vertex_ids_are_ignored() {
    let mut sel = Selections::default();
    feed(&mut sel, &["s|polyhedron", "p|2147483647|0|0|0", "p|0|1|1|1"]);
    let Some(Region::Polyhedron(p)) = sel.get(Slot::Primary) else {
        panic!("expected polyhedron");
    };
    assert_eq!(p.vertex_count(), 1);

    feed(&mut sel, &["s|polygon2d", "p2|2147483647|0|0"]);
    let Some(Region::Polygon2d(p)) = sel.get(Slot::Primary) else {
        panic!("expected polygon");
    };
    assert!(p.points().is_empty());
}

#[test]
fn stale_and_malformed_messages_leave_model_untouched() {
    let mut sel = Selections::default();
    feed(&mut sel, &["s|cuboid", "p|0|1|2|3"]);
    let before = sel.get(Slot::Primary).cloned();

    let d = feed(&mut sel, &["p2|0|5|5", "p|1|4|x|6", "e|0|1|2|3", "bogus|1", "mm|1"]);
    assert_eq!(d.stats().dropped, 5);
    assert_eq!(sel.get(Slot::Primary).cloned(), before);
}

#[test]
fn network_thread_hand_off() {
    let (tx, rx) = channel();
    let net = std::thread::spawn(move || {
        for m in ["s|ellipsoid", "e|0|0|64|0", "e|1|5|3|5"] {
            tx.send(m);
        }
    });
    net.join().unwrap();

    let mut sel = Selections::default();
    let mut d = Dispatcher::new();
    assert_eq!(d.pump(&rx, &mut sel), 3);

    let (mut renderer, rec) = headless();
    assert_eq!(renderer.render(&sel, FrameInfo::world(Vector3::ZERO, 0.25)), FrameOutcome::Drawn);
    assert!(rec.primitive_count() > 0);
}

struct NoDevice;

impl PipelineProvider for NoDevice {
    fn id(&self) -> &str {
        "no-device"
    }

    fn available(&self) -> bool {
        true
    }

    fn provide(&self) -> anyhow::Result<Box<dyn RenderSink>> {
        anyhow::bail!("adapter lost")
    }
}

#[test]
fn failed_backend_is_skipped_for_the_next() {
    let rec = RecordingTarget::new(TypeSet::PLAIN);
    let mut renderer = WorldRenderer::new(vec![
        Box::new(NoDevice),
        Box::new(HeadlessPipelineProvider::new(rec.clone())),
    ]);
    let mut sel = Selections::default();
    feed(&mut sel, &["s|cuboid", "p|0|0|0|0", "p|1|1|1|1"]);

    assert_eq!(renderer.render(&sel, FrameInfo::world(Vector3::ZERO, 0.0)), FrameOutcome::Drawn);
    assert_eq!(renderer.chain().active_id(), Some(HeadlessPipelineProvider::ID));
    assert!(rec.submissions() > 0);
}
