use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    api::RoutingEngine,
    config::Config,
    entities::{AvoidSet, Coordinates, Costs, RouteRequest, RouteResponse, TravelMode},
    error::{engine_error, transport_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RequestBody {
    origen: String,
    destino: String,
    #[serde(rename = "travelMode")]
    travel_mode: TravelMode,
    avoids: Vec<String>,
}

impl From<&RouteRequest> for RequestBody {
    fn from(request: &RouteRequest) -> Self {
        Self {
            origen: request.origin().to_string(),
            destino: request.destination().to_string(),
            travel_mode: request.travel_mode(),
            avoids: request.avoids().constraints(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct CostsBody {
    #[serde(default)]
    consumo_litros: f64,
    #[serde(default)]
    gasolina_mxn: f64,
    #[serde(default)]
    casetas_mxn: f64,
    #[serde(default)]
    total_mxn: f64,
}

#[derive(Clone, Debug, Deserialize)]
struct ResponseBody {
    shape: Vec<f64>,
    start_lat_lng: [f64; 2],
    end_lat_lng: [f64; 2],
    travel_mode: String,
    #[serde(default)]
    applied_avoids: Vec<String>,
    #[serde(default)]
    has_tolls: bool,
    #[serde(default)]
    toll_distance_km: f64,
    #[serde(default)]
    traffic_delay_minutes: f64,
    #[serde(default)]
    costs: CostsBody,
    distance_km: f64,
    time_minutes: f64,
    #[serde(default)]
    directions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ResponseBody {
    fn into_response(self, requested_mode: TravelMode) -> Result<RouteResponse, Error> {
        let start = Coordinates::from_pair(self.start_lat_lng).map_err(|_| transport_error())?;
        let end = Coordinates::from_pair(self.end_lat_lng).map_err(|_| transport_error())?;

        let travel_mode = TravelMode::from_name(&self.travel_mode).unwrap_or_else(|| {
            tracing::warn!(
                "unknown travel mode \"{}\" in engine response",
                self.travel_mode
            );
            requested_mode
        });

        Ok(RouteResponse {
            shape: self.shape,
            start,
            end,
            travel_mode,
            applied_avoids: AvoidSet::from_constraints(&self.applied_avoids),
            has_tolls: self.has_tolls,
            toll_distance_km: self.toll_distance_km.max(0.0),
            traffic_delay_minutes: self.traffic_delay_minutes.max(0.0),
            costs: Costs {
                fuel_liters: self.costs.consumo_litros.max(0.0),
                fuel_cost: self.costs.gasolina_mxn.max(0.0),
                toll_cost: self.costs.casetas_mxn.max(0.0),
                total_cost: self.costs.total_mxn.max(0.0),
            },
            distance_km: self.distance_km.max(0.0),
            time_minutes: self.time_minutes.max(0.0),
            directions: self.directions,
        })
    }
}

/// HTTP client for the routing engine's JSON endpoint.
#[derive(Clone, Debug)]
pub struct RouteClient {
    client: reqwest::Client,
    url: String,
}

impl RouteClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            url: config.routing_engine_url.clone(),
        })
    }
}

#[async_trait]
impl RoutingEngine for RouteClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn submit(&self, request: &RouteRequest) -> Result<RouteResponse, Error> {
        let res = self
            .client
            .post(&self.url)
            .json(&RequestBody::from(request))
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return match serde_json::from_str::<ErrorBody>(&text) {
                Ok(ErrorBody {
                    error: Some(message),
                }) if !message.is_empty() => {
                    tracing::info!("routing engine rejected request ({}): {}", status, message);
                    Err(engine_error(message))
                }
                _ => {
                    tracing::warn!("routing engine returned {} without an error message", status);
                    Err(transport_error())
                }
            };
        }

        let body: ResponseBody = serde_json::from_str(&text)?;

        body.into_response(request.travel_mode())
    }
}

#[cfg(test)]
fn sample_request() -> RouteRequest {
    use crate::entities::{AvoidanceFlag, Endpoint};

    RouteRequest::new(
        Endpoint::from_input("19.432601,-99.133298"),
        Endpoint::from_input("Puebla, Pue."),
        TravelMode::Motorcycle,
        [AvoidanceFlag::TollRoad, AvoidanceFlag::Unpaved]
            .into_iter()
            .collect(),
    )
}

#[cfg(test)]
fn success_body() -> serde_json::Value {
    serde_json::json!({
        "shape": [19.43, -99.13, 19.2, -98.6, 19.04],
        "start_lat_lng": [19.43, -99.13],
        "end_lat_lng": [19.04, -98.2],
        "travel_mode": "motorcycle",
        "applied_avoids": ["toll road", "unpaved", "Limited Access"],
        "has_tolls": false,
        "toll_distance_km": 0,
        "traffic_delay_minutes": 3,
        "costs": { "consumo_litros": 5.2, "gasolina_mxn": 127.4, "casetas_mxn": 0, "total_mxn": 127.4 },
        "distance_km": 130.25,
        "time_minutes": 152.3,
        "directions": ["Start out", "Arrive at Puebla"]
    })
}

/// Serves a canned answer on `/ruta` and returns the client pointed at it.
#[cfg(test)]
async fn stub_engine(status: u16, body: serde_json::Value) -> RouteClient {
    use axum::{http::StatusCode, routing::post, Json, Router};

    let app = Router::new().route(
        "/ruta",
        post(move |Json(_request): Json<serde_json::Value>| {
            let body = body.clone();
            async move { (StatusCode::from_u16(status).unwrap(), Json(body)) }
        }),
    );

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(axum::Server::from_tcp(listener).unwrap().serve(app.into_make_service()));

    RouteClient::new(&Config::new(format!("http://{}/ruta", addr))).unwrap()
}

#[test]
fn request_body_test() {
    let body = serde_json::to_value(RequestBody::from(&sample_request())).unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "origen": "19.432601,-99.133298",
            "destino": "Puebla, Pue.",
            "travelMode": "motorcycle",
            "avoids": ["toll road", "unpaved"]
        })
    );
}

#[test]
fn response_body_conversion_test() {
    let body: ResponseBody = serde_json::from_value(success_body()).unwrap();
    let response = body.into_response(TravelMode::Motorcycle).unwrap();

    assert_eq!(response.travel_mode, TravelMode::Motorcycle);
    assert_eq!(response.applied_avoids.len(), 3);
    assert_eq!(response.costs.fuel_cost, 127.4);
    assert_eq!(response.traffic_delay_minutes, 3.0);
    assert_eq!(response.shape.len(), 5);
    assert_eq!(response.directions.len(), 2);
}

#[test]
fn response_body_clamps_negative_values_test() {
    let mut value = success_body();
    value["toll_distance_km"] = serde_json::json!(-1.0);
    value["travel_mode"] = serde_json::json!("hovercraft");

    let body: ResponseBody = serde_json::from_value(value).unwrap();
    let response = body.into_response(TravelMode::Car).unwrap();

    assert_eq!(response.toll_distance_km, 0.0);
    assert_eq!(response.travel_mode, TravelMode::Car);
}

#[test]
fn response_body_rejects_bad_endpoints_test() {
    let mut value = success_body();
    value["end_lat_lng"] = serde_json::json!([123.0, 0.0]);

    let body: ResponseBody = serde_json::from_value(value).unwrap();
    let err = body.into_response(TravelMode::Car).unwrap_err();

    assert!(err.is_transport_error());
}

#[cfg(test)]
#[tokio::test]
async fn submit_success_test() {
    let client = stub_engine(200, success_body()).await;

    let response = client.submit(&sample_request()).await.unwrap();

    assert_eq!(response.distance_km, 130.25);
    assert_eq!(response.directions[1], "Arrive at Puebla");
}

#[cfg(test)]
#[tokio::test]
async fn submit_engine_error_is_verbatim_test() {
    let message = "No se pudo encontrar una ruta. Verifica las ubicaciones y las restricciones.";
    let client = stub_engine(400, serde_json::json!({ "error": message })).await;

    let err = client.submit(&sample_request()).await.unwrap_err();

    assert!(err.is_engine_error());
    assert_eq!(err.message, message);
}

#[cfg(test)]
#[tokio::test]
async fn submit_error_without_message_is_transport_error_test() {
    let client = stub_engine(500, serde_json::json!({ "detail": "oops" })).await;

    let err = client.submit(&sample_request()).await.unwrap_err();

    assert!(err.is_transport_error());
    assert_eq!(err.message, crate::error::TRANSPORT_FALLBACK_MESSAGE);
}

#[cfg(test)]
#[tokio::test]
async fn submit_unparseable_success_is_transport_error_test() {
    let client = stub_engine(200, serde_json::json!({ "shape": "nope" })).await;

    let err = client.submit(&sample_request()).await.unwrap_err();

    assert!(err.is_transport_error());
}

#[cfg(test)]
#[tokio::test]
async fn submit_unreachable_engine_is_transport_error_test() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RouteClient::new(&Config::new(format!("http://{}/ruta", addr))).unwrap();
    let err = client.submit(&sample_request()).await.unwrap_err();

    assert!(err.is_transport_error());
    assert_eq!(err.message, crate::error::TRANSPORT_FALLBACK_MESSAGE);
}
