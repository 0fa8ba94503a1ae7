use crate::entities::{AvoidSet, Endpoint, RouteRequest, TravelMode};
use crate::error::{missing_endpoint_error, Error};

/// Builds the engine request from the raw endpoint inputs.
///
/// Blank endpoints are the only thing rejected here; addresses and
/// coordinates are left for the engine to resolve.
#[tracing::instrument]
pub fn build(
    origin_text: &str,
    destination_text: &str,
    travel_mode: TravelMode,
    avoids: &AvoidSet,
) -> Result<RouteRequest, Error> {
    let origin = origin_text.trim();
    let destination = destination_text.trim();

    if origin.is_empty() || destination.is_empty() {
        return Err(missing_endpoint_error());
    }

    Ok(RouteRequest::new(
        Endpoint::from_input(origin),
        Endpoint::from_input(destination),
        travel_mode,
        avoids.clone(),
    ))
}

#[test]
fn build_rejects_blank_endpoints_test() {
    let avoids = AvoidSet::new();

    for (origin, destination) in [("", "Puebla"), ("Puebla", "   "), ("\t\n", ""), ("", "")] {
        let err = build(origin, destination, TravelMode::Car, &avoids).unwrap_err();
        assert!(err.is_missing_endpoint_error());
    }
}

#[test]
fn build_accepts_text_and_coordinates_test() {
    use crate::entities::{AvoidanceFlag, Coordinates};

    let avoids: AvoidSet = [AvoidanceFlag::LimitedAccess, AvoidanceFlag::TollRoad]
        .into_iter()
        .collect();

    let request = build(
        "  19.432601,-99.133298 ",
        " Zócalo, CDMX ",
        TravelMode::Pedestrian,
        &avoids,
    )
    .unwrap();

    assert_eq!(
        request.origin(),
        &Endpoint::Coordinates(Coordinates::new(19.432601, -99.133298).unwrap())
    );
    assert_eq!(request.destination(), &Endpoint::Text("Zócalo, CDMX".into()));
    assert_eq!(request.travel_mode(), TravelMode::Pedestrian);
    assert_eq!(
        request.avoids().constraints(),
        vec!["Limited Access", "toll road"]
    );
}

#[test]
fn build_passes_garbage_through_test() {
    let request = build("???", "999,999", TravelMode::Car, &AvoidSet::new()).unwrap();

    assert_eq!(request.origin().to_string(), "???");
    assert_eq!(request.destination().to_string(), "999,999");
    assert!(request.avoids().is_empty());
}
