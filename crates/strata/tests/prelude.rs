use strata::prelude::*;
use strata_test_utils::{EventLog, Probe, ProbeFactory};

#[test]
fn prelude_covers_the_three_containers() {
    let log = EventLog::new();
    let factory = ProbeFactory::new(&log);

    let mut line: Line<Probe> = Line::new(2, Axis::Y).unwrap();
    line.create_line(factory.boxed()).unwrap();
    let mut surface: Surface<Probe> = Surface::new(2, 2, Axis::X).unwrap();
    surface.create_surface(factory.boxed()).unwrap();
    let mut volume: Volume<Probe> = Volume::new(1, 1, 1).unwrap();
    volume.create_volume(factory.boxed()).unwrap();

    assert_eq!(factory.produced(), 7);
    assert_eq!(line.get_unit(0).unwrap().dimension(), Dimension::Line);
    assert_eq!(surface.get_unit(0, 0).unwrap().dimension(), Dimension::Surface);
    assert_eq!(volume.get_unit(0, 0, 0).unwrap().dimension(), Dimension::Volume);

    // Containers never share identities.
    let ids = [line.id(), surface.id(), volume.id()];
    assert!(ids[0] != ids[1] && ids[1] != ids[2] && ids[0] != ids[2]);
}

#[test]
fn errors_render_for_callers() {
    let mut surface: Surface<Probe> = Surface::new(1, 1, Axis::Z).unwrap();
    let err: GridError = surface.add_line(Axis::Z).unwrap_err();
    assert_eq!(
        err.to_string(),
        "axis z is not in the plane of a surface with normal z"
    );
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_none());
}
