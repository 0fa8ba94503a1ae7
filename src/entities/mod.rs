mod avoid;
mod coordinates;
mod map;
mod route;
mod travel_mode;

pub use avoid::{AvoidSet, AvoidanceFlag};
pub use coordinates::Coordinates;
pub use map::{
    FitBounds, MapState, Marker, MarkerRole, MarkerSize, MarkerStyle, RouteLine, Viewport,
};
pub use route::{Costs, Endpoint, RouteRequest, RouteResponse};
pub use travel_mode::{SelectionMode, TravelMode};
