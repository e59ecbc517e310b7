use geo_types::Point;

use crate::{scale::RadiusScale, traffic::StationTraffic};

const TILE_SIZE: f64 = 512.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

/// What the map is looking at: center, zoom, and screen size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: Point<f64>,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Camera {
    /// Web Mercator projection of a lon/lat coordinate into screen pixels,
    /// with the camera center at the middle of the screen.
    pub fn project(&self, coord: Point<f64>) -> ScreenPos {
        let scale = TILE_SIZE * 2f64.powf(self.zoom);
        let (wx, wy) = world(coord);
        let (cx, cy) = world(self.center);

        ScreenPos {
            x: (wx - cx) * scale + self.width / 2.0,
            y: (wy - cy) * scale + self.height / 2.0,
        }
    }
}

/// Normalized world coordinates in [0, 1].
fn world(coord: Point<f64>) -> (f64, f64) {
    let x = coord.x() / 360.0 + 0.5;
    let lat = coord.y().to_radians();
    let y = 0.5
        - (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln() / (2.0 * std::f64::consts::PI);
    (x, y)
}

type MoveListener = Box<dyn FnMut(Camera)>;

/// Camera plus a listener registry. Every camera mutation notifies all
/// listeners with the new camera, which is how marker layers stay glued to
/// the map without knowing anything about the renderer.
pub struct Viewport {
    camera: Camera,
    listeners: Vec<MoveListener>,
}

impl Viewport {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            listeners: vec![],
        }
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn on_move(&mut self, listener: impl FnMut(Camera) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn jump_to(&mut self, center: Point<f64>, zoom: f64) {
        self.camera.center = center;
        self.camera.zoom = zoom;
        self.notify();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.camera.zoom = zoom;
        self.notify();
    }

    fn notify(&mut self) {
        let camera = self.camera;
        for listener in self.listeners.iter_mut() {
            listener(camera);
        }
    }
}

/// A station circle positioned in screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub pos: ScreenPos,
    pub radius: f64,
}

/// Positions one marker per station. A camera move recomputes positions
/// only; a filter change swaps in new traffic and a new scale.
pub fn place_markers(traffic: &[StationTraffic], scale: &RadiusScale, camera: Camera) -> Vec<Marker> {
    traffic
        .iter()
        .map(|station| Marker {
            pos: camera.project(station.coord),
            radius: scale.radius(station.total_traffic),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    use crate::dataset::station::StationId;

    fn boston_camera() -> Camera {
        Camera {
            center: Point::new(-71.0959457, 42.3612026),
            zoom: 12.0,
            width: 960.0,
            height: 600.0,
        }
    }

    #[test]
    fn camera_center_projects_to_screen_center() {
        let camera = boston_camera();
        let pos = camera.project(camera.center);
        assert!((pos.x - 480.0).abs() < 1e-9);
        assert!((pos.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let camera = boston_camera();
        let east = camera.project(Point::new(-71.08, 42.3612026));
        let north = camera.project(Point::new(-71.0959457, 42.37));

        assert!(east.x > 480.0);
        assert!((east.y - 300.0).abs() < 1e-6);
        assert!(north.y < 300.0);
    }

    #[test]
    fn zooming_in_spreads_points_apart() {
        let mut camera = boston_camera();
        let target = Point::new(-71.08, 42.37);

        let before = camera.project(target);
        camera.zoom = 13.0;
        let after = camera.project(target);

        assert!((after.x - 480.0).abs() > (before.x - 480.0).abs());
        assert!((after.y - 300.0).abs() > (before.y - 300.0).abs());
    }

    #[test]
    fn listeners_fire_on_every_camera_move() {
        let mut viewport = Viewport::new(boston_camera());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        viewport.on_move(move |camera| sink.borrow_mut().push(camera.zoom));

        viewport.set_zoom(13.0);
        viewport.jump_to(Point::new(-71.08, 42.37), 14.0);

        assert_eq!(*seen.borrow(), vec![13.0, 14.0]);
        assert_eq!(viewport.camera().zoom, 14.0);
    }

    #[test]
    fn markers_track_camera_moves() {
        let traffic = vec![StationTraffic {
            short_name: StationId::new("A"),
            name: "A".to_owned(),
            coord: Point::new(-71.08, 42.37),
            arrivals: 3,
            departures: 1,
            total_traffic: 4,
        }];
        let scale = RadiusScale::unfiltered(4);

        let mut viewport = Viewport::new(boston_camera());
        let markers = Rc::new(RefCell::new(place_markers(
            &traffic,
            &scale,
            viewport.camera(),
        )));

        let sink = Rc::clone(&markers);
        viewport.on_move(move |camera| {
            *sink.borrow_mut() = place_markers(&traffic, &scale, camera);
        });

        let before = markers.borrow()[0].clone();
        viewport.jump_to(Point::new(-71.08, 42.37), 12.0);
        let after = markers.borrow()[0].clone();

        assert_ne!(before.pos, after.pos);
        // The marker now sits on the camera center.
        assert!((after.pos.x - 480.0).abs() < 1e-9);
        assert!((after.pos.y - 300.0).abs() < 1e-9);
        // Radius only depends on traffic, not on the camera.
        assert_eq!(before.radius, after.radius);
        assert_eq!(after.radius, 25.0);
    }
}
