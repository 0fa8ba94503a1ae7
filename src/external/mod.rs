pub mod routing_engine;

pub use routing_engine::RouteClient;
