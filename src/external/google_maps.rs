use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Config,
    entities::{Coordinates, Restriction, RouteRequest, RouteResult, TravelMode, Waypoint},
    error::{
        address_not_found_error, authorization_error, invalid_coordinates_error,
        no_route_found_error, unknown_provider_error, validation_error, Error,
    },
    external::RoutingProvider,
};

const ROUTES_FIELD_MASK: &str = "routes.distanceMeters,routes.duration,\
routes.polyline.encodedPolyline,routes.travelAdvisory.tollInfo,\
routes.legs.steps.navigationInstruction.maneuver";

const POLYLINE_PRECISION: u32 = 5;

/// Google Geocoding + Routes API backed provider.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_key: String,
    maps_api_base: String,
    routes_api_base: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<ProviderRoute>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderRoute {
    #[serde(default)]
    distance_meters: u64,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    polyline: Option<Polyline>,
    #[serde(default)]
    travel_advisory: Option<TravelAdvisory>,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Polyline {
    encoded_polyline: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TravelAdvisory {
    toll_info: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Step {
    navigation_instruction: Option<NavigationInstruction>,
}

#[derive(Clone, Debug, Deserialize)]
struct NavigationInstruction {
    maneuver: Option<String>,
}

impl GoogleMaps {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            maps_api_base: config.maps_api_base.clone(),
            routes_api_base: config.routes_api_base.clone(),
        })
    }

    async fn geocode_request(&self, query: &[(&str, &str)]) -> Result<GeocodeResponse, Error> {
        let url = format!("{}/maps/api/geocode/json", self.maps_api_base);

        let res = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        match res.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(authorization_error()),
            status if status.is_client_error() => {
                return Err(validation_error("geocoding request rejected"))
            }
            status if !status.is_success() => return Err(unknown_provider_error()),
            _ => {}
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl RoutingProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn validate_key(&self) -> Result<(), Error> {
        if self.api_key.trim().is_empty() {
            return Err(authorization_error());
        }

        let data = self.geocode_request(&[("latlng", "0,0")]).await?;

        match data.status.as_str() {
            "REQUEST_DENIED" => Err(authorization_error()),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinates, Error> {
        let data = self.geocode_request(&[("address", address)]).await?;

        match data.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(address_not_found_error()),
            "REQUEST_DENIED" => return Err(authorization_error()),
            "INVALID_REQUEST" => return Err(validation_error("invalid address")),
            other => {
                tracing::warn!("geocoding returned status {}", other);
                return Err(unknown_provider_error());
            }
        }

        let result = data
            .results
            .into_iter()
            .next()
            .ok_or_else(address_not_found_error)?;

        tracing::debug!("resolved {:?} as {:?}", address, result.formatted_address);

        Ok(Coordinates::new(
            result.geometry.location.lat,
            result.geometry.location.lng,
        ))
    }

    #[tracing::instrument(skip_all, fields(stops = request.waypoints.len(), mode = request.travel_mode.name()))]
    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResult, Error> {
        let url = format!("{}/directions/v2:computeRoutes", self.routes_api_base);

        let res = self
            .client
            .post(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", ROUTES_FIELD_MASK)
            .json(&route_body(request)?)
            .send()
            .await?;

        match res.status() {
            StatusCode::BAD_REQUEST => return Err(invalid_coordinates_error()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(authorization_error()),
            status if !status.is_success() => {
                tracing::warn!("routes api returned {}", status);
                return Err(unknown_provider_error());
            }
            _ => {}
        }

        let data: RoutesResponse = res.json().await?;
        let route = data
            .routes
            .into_iter()
            .next()
            .ok_or_else(no_route_found_error)?;

        normalize(route)
    }
}

fn waypoint_body(waypoint: &Waypoint) -> serde_json::Value {
    json!({
        "location": {
            "latLng": {
                "latitude": waypoint.coordinates.latitude,
                "longitude": waypoint.coordinates.longitude,
            }
        }
    })
}

fn route_body(request: &RouteRequest) -> Result<serde_json::Value, Error> {
    let origin = request.origin().ok_or_else(invalid_coordinates_error)?;
    let destination = request.destination().ok_or_else(invalid_coordinates_error)?;

    let mut body = json!({
        "origin": waypoint_body(origin),
        "destination": waypoint_body(destination),
        "intermediates": request.via_points().iter().map(waypoint_body).collect::<Vec<_>>(),
        "travelMode": request.travel_mode.name(),
    });

    // toll info is only computed for driving routes, and only on request
    if request.travel_mode == TravelMode::Drive {
        body["extraComputations"] = json!(["TOLLS"]);
    }

    Ok(body)
}

fn normalize(route: ProviderRoute) -> Result<RouteResult, Error> {
    let duration_seconds = match route.duration {
        Some(duration) => parse_duration(&duration)?,
        None => 0,
    };

    let path = match route.polyline {
        Some(line) => polyline::decode_polyline(&line.encoded_polyline, POLYLINE_PRECISION)
            .map_err(|err| {
                tracing::warn!("undecodable polyline: {}", err);
                unknown_provider_error()
            })?
            .coords()
            .map(|coord| Coordinates::from(*coord))
            .collect(),
        None => Vec::new(),
    };

    let mut restrictions = BTreeSet::new();

    if route
        .travel_advisory
        .map(|advisory| advisory.toll_info.is_some())
        .unwrap_or(false)
    {
        restrictions.insert(Restriction::Toll);
    }

    let has_ferry = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .filter_map(|step| step.navigation_instruction.as_ref())
        .filter_map(|instruction| instruction.maneuver.as_deref())
        .any(|maneuver| maneuver == "FERRY" || maneuver == "FERRY_TRAIN");

    if has_ferry {
        restrictions.insert(Restriction::Ferry);
    }

    Ok(RouteResult {
        distance_meters: route.distance_meters,
        duration_seconds,
        path,
        restrictions,
    })
}

/// Durations come as protobuf JSON strings such as `"1234s"` or `"12.5s"`.
fn parse_duration(duration: &str) -> Result<u64, Error> {
    duration
        .strip_suffix('s')
        .and_then(|secs| secs.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.round() as u64)
        .ok_or_else(unknown_provider_error)
}
