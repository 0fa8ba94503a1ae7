use async_trait::async_trait;

use crate::entities::{AvoidanceFlag, Coordinates, RouteRequest, RouteResponse, SelectionMode, TravelMode};
use crate::error::Error;

/// Remote service that turns a request into a computed route.
#[async_trait]
pub trait RoutingEngine: Send + Sync {
    async fn submit(&self, request: &RouteRequest) -> Result<RouteResponse, Error>;
}

pub trait SelectionAPI {
    fn set_mode(&mut self, mode: SelectionMode);
    fn set_travel_mode(&mut self, mode: TravelMode);
}

pub trait InputAPI {
    fn set_origin_text(&mut self, text: String);
    fn set_destination_text(&mut self, text: String);
    fn set_avoid(&mut self, flag: AvoidanceFlag, enabled: bool);
}

pub trait MapAPI {
    fn map_clicked(&mut self, coordinates: Coordinates);
}

#[async_trait]
pub trait RouteAPI {
    async fn calculate(&mut self, engine: &dyn RoutingEngine);
    fn reset(&mut self);
}

pub trait API: SelectionAPI + InputAPI + MapAPI + RouteAPI {}
