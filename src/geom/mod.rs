mod core;
mod polyline;

pub use self::core::{Point3, Vec3};
pub use polyline::{
    ClosestPoint, PolylineError, Polyline3, find_closest_point, mean_point, shift_start_point,
};
