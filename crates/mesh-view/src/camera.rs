//! Camera framing for a freshly loaded mesh.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::bounds::BoundingVolume;
use crate::config::ViewerConfig;

/// Where to put the camera and what to aim it at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFitPlan {
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
    pub distance: f32,
}

/// Unit view direction from config, falling back to the `(1, 1, 1)` diagonal.
fn view_direction(config: &ViewerConfig) -> Vector3<f32> {
    let [x, y, z] = config.view_direction;
    Vector3::new(x, y, z)
        .try_normalize(f32::EPSILON)
        .filter(|d| d.iter().all(|c| c.is_finite()))
        .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0).normalize())
}

/// Compute a framing plan for the given bounds.
///
/// `distance = max_dimension * fit_distance_factor`; the camera sits that far
/// from the center along the configured view direction and looks at the
/// center.
pub fn fit_camera(bounds: &BoundingVolume, config: &ViewerConfig) -> CameraFitPlan {
    let center = bounds.center();
    let distance = bounds.max_dimension() * config.fit_distance_factor;
    let position = center + view_direction(config) * distance;

    CameraFitPlan {
        position,
        look_at: center,
        distance,
    }
}

/// One-shot camera fitting.
///
/// A plan is produced once per loaded mesh: [`mesh_loaded`](Self::mesh_loaded)
/// is the explicit trigger, and any later [`plan_once`](Self::plan_once) call
/// returns `None` until the next load, leaving user camera movement alone.
#[derive(Debug, Clone, Default)]
pub struct CameraFitPlanner {
    config: ViewerConfig,
    fitted: bool,
}

impl CameraFitPlanner {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            fitted: false,
        }
    }

    /// Whether the current mesh already has a plan.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Arm the planner for a new mesh without computing anything.
    pub fn reset(&mut self) {
        self.fitted = false;
    }

    /// Produce a plan if none has been produced since the last reset.
    pub fn plan_once(&mut self, bounds: &BoundingVolume) -> Option<CameraFitPlan> {
        if self.fitted {
            return None;
        }
        let plan = fit_camera(bounds, &self.config);
        self.fitted = true;
        debug!(
            "Camera fit: distance {:.3}, position [{:.3}, {:.3}, {:.3}]",
            plan.distance, plan.position.x, plan.position.y, plan.position.z
        );
        Some(plan)
    }

    /// New-mesh event: reset and plan in one step.
    ///
    /// Empty meshes have no bounds; the planner is still reset so that a
    /// later non-empty load is framed.
    pub fn mesh_loaded(&mut self, bounds: Option<&BoundingVolume>) -> Option<CameraFitPlan> {
        self.reset();
        bounds.and_then(|b| self.plan_once(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_at(center: [f32; 3], size: [f32; 3]) -> BoundingVolume {
        let c = Point3::from(center);
        let h = Vector3::from(size) / 2.0;
        BoundingVolume {
            min: c - h,
            max: c + h,
        }
    }

    #[test]
    fn test_fit_uses_largest_dimension() {
        let bounds = unit_box_at([0.0, 0.0, 0.0], [2.0, 4.0, 1.0]);
        let plan = fit_camera(&bounds, &ViewerConfig::default());

        assert_relative_eq!(plan.distance, 10.0, epsilon = 1e-4);
        assert_eq!(plan.look_at, Point3::origin());
        let d = 10.0 / 3.0f32.sqrt();
        assert_relative_eq!(plan.position, Point3::new(d, d, d), epsilon = 1e-4);
        assert_relative_eq!(
            (plan.position - plan.look_at).norm(),
            plan.distance,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_fit_offset_center_and_factor() {
        let bounds = unit_box_at([5.0, -3.0, 2.0], [1.0, 1.0, 6.0]);
        let config = ViewerConfig {
            fit_distance_factor: 3.0,
            view_direction: [0.0, 0.0, 2.0],
            ..ViewerConfig::default()
        };
        let plan = fit_camera(&bounds, &config);
        assert_relative_eq!(plan.distance, 18.0, epsilon = 1e-4);
        assert_eq!(plan.look_at, Point3::new(5.0, -3.0, 2.0));
        assert_relative_eq!(plan.position, Point3::new(5.0, -3.0, 20.0), epsilon = 1e-4);
    }

    #[test]
    fn test_zero_direction_falls_back_to_diagonal() {
        let bounds = unit_box_at([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let config = ViewerConfig {
            view_direction: [0.0, 0.0, 0.0],
            ..ViewerConfig::default()
        };
        let plan = fit_camera(&bounds, &config);
        assert_relative_eq!(plan.position.x, plan.position.y, epsilon = 1e-4);
        assert!(plan.position.x > 0.0);
    }

    #[test]
    fn test_plan_once_is_idempotent_until_reset() {
        let mut planner = CameraFitPlanner::default();
        let bounds = unit_box_at([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);

        let first = planner.plan_once(&bounds);
        assert!(first.is_some());
        assert!(planner.is_fitted());
        assert!(planner.plan_once(&bounds).is_none());

        planner.reset();
        assert_eq!(planner.plan_once(&bounds), first);
    }

    #[test]
    fn test_mesh_loaded_rearms() {
        let mut planner = CameraFitPlanner::default();
        let small = unit_box_at([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let big = unit_box_at([0.0, 0.0, 0.0], [10.0, 1.0, 1.0]);

        let a = planner.mesh_loaded(Some(&small)).expect("plan");
        assert!(planner.plan_once(&big).is_none());
        let b = planner.mesh_loaded(Some(&big)).expect("plan");
        assert!(b.distance > a.distance);

        assert!(planner.mesh_loaded(None).is_none());
        assert!(!planner.is_fitted());
    }
}
