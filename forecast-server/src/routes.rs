//! Route definitions

use axum::{
    Router,
    extract::Request,
    http::{Uri, uri::PathAndQuery},
    routing::get,
};
use tower::{Layer, util::MapRequestLayer};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Route table. Paths are lowercase without a trailing slash; [`create_app`]
/// folds request paths to match.
pub const FORECAST_ROUTE: &str = "/weatherforecast";
pub const HEALTH_ROUTE: &str = "/healthz";

/// The router wrapped so that path matching ignores ASCII case and one trailing slash.
pub type App = tower::util::MapRequest<Router, fn(Request) -> Request>;

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(handlers::healthz))
        .route(FORECAST_ROUTE, get(handlers::get_weather_forecast))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Create the full service. Rewriting has to happen before routing, so the
/// layer wraps the router instead of being added with `Router::layer`.
pub fn create_app(state: AppState) -> App {
    let fold: fn(Request) -> Request = normalize_path;
    MapRequestLayer::new(fold).layer(create_router(state))
}

fn normalize_path(mut req: Request) -> Request {
    if let Some(uri) = normalized_uri(req.uri()) {
        *req.uri_mut() = uri;
    }
    req
}

/// `None` when the path is already normalized or the rewrite would not parse.
fn normalized_uri(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    };
    if trimmed.len() == path.len() && !path.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let lowered = match uri.query() {
        Some(query) => format!("{}?{query}", trimmed.to_ascii_lowercase()),
        None => trimmed.to_ascii_lowercase(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(lowered.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_path_but_keeps_query() {
        let uri: Uri = "/WeatherForecast?City=Oslo".parse().unwrap();

        let lowered = normalized_uri(&uri).unwrap();

        assert_eq!(lowered.path(), "/weatherforecast");
        assert_eq!(lowered.query(), Some("City=Oslo"));
    }

    #[test]
    fn leaves_normalized_paths_alone() {
        for raw in ["/weatherforecast", "/", "/healthz?x=1"] {
            let uri: Uri = raw.parse().unwrap();
            assert!(normalized_uri(&uri).is_none(), "{raw}");
        }
    }

    #[test]
    fn drops_one_trailing_slash() {
        let uri: Uri = "/WeatherForecast/?a=b".parse().unwrap();

        let normalized = normalized_uri(&uri).unwrap();

        assert_eq!(normalized.path(), "/weatherforecast");
        assert_eq!(normalized.query(), Some("a=b"));
    }

    #[test]
    fn keeps_authority_of_absolute_uris() {
        let uri: Uri = "http://Example.com/HEALTHZ".parse().unwrap();

        let lowered = normalized_uri(&uri).unwrap();

        assert_eq!(lowered.path(), "/healthz");
        assert_eq!(lowered.host(), Some("Example.com"));
    }
}
