use super::*;
use crate::vector::Vector2;

fn viewport() -> Viewport {
    let mut v = Viewport::new(Vector2::new(640.0, 480.0), 2.0).unwrap();
    v.set_zoom(2.0).unwrap();
    v.set_center(Vector2::new(10.0, 5.0)).unwrap();
    v
}

#[test]
fn redraw_runs_fixed_sequence() {
    let v = viewport();
    let mut surface = RecordingSurface::new();
    let mut rendered = false;
    redraw(&mut surface, &v, |s| {
        rendered = true;
        assert_eq!(s.ops().len(), 3);
        Ok(())
    })
    .unwrap();
    assert!(rendered);
    assert_eq!(
        surface.ops(),
        &[
            SurfaceOp::ResetTransform,
            SurfaceOp::Clear { width: 640.0, height: 480.0 },
            SurfaceOp::SetTransform { matrix: v.matrix() },
        ]
    );
}

#[test]
fn render_error_propagates() {
    let mut surface = RecordingSurface::new();
    let err = redraw(&mut surface, &viewport(), |_| Err(SurfaceError::new("lost context")));
    assert_eq!(err, Err(SurfaceError::new("lost context")));
}

struct BrokenSurface;

impl Surface for BrokenSurface {
    fn reset_transform(&mut self) -> Result<(), SurfaceError> {
        Err(SurfaceError::new("no context"))
    }

    fn clear(&mut self, _width: f64, _height: f64) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_transform(&mut self, _matrix: &Affine) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn focus(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

#[test]
fn surface_failure_skips_render() {
    let mut called = false;
    let result = redraw(&mut BrokenSurface, &viewport(), |_| {
        called = true;
        Ok(())
    });
    assert!(result.is_err());
    assert!(!called);
}

#[test]
fn redraw_works_through_trait_object() {
    let mut surface = RecordingSurface::new();
    let dyn_surface: &mut dyn Surface = &mut surface;
    redraw(dyn_surface, &viewport(), |_| Ok(())).unwrap();
    assert_eq!(surface.frames(), 1);
}

#[test]
fn recording_surface_tracks_state() {
    let mut surface = RecordingSurface::new();
    surface.resize(300, 200).unwrap();
    surface.focus().unwrap();
    assert_eq!(surface.dimensions(), (300, 200));
    assert!(surface.is_focused());
    assert_eq!(surface.take_ops().len(), 2);
    assert!(surface.ops().is_empty());
}

#[test]
fn pixel_dimension_rounds_and_clamps() {
    assert_eq!(pixel_dimension(99.6), 100);
    assert_eq!(pixel_dimension(-5.0), 0);
    assert_eq!(pixel_dimension(f64::NAN), 0);
    assert_eq!(pixel_dimension(f64::INFINITY), 0);
}
