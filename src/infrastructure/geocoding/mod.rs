pub mod nominatim;

use crate::domain::error::Result;
use crate::domain::geo::GeoPoint;
use async_trait::async_trait;

pub use nominatim::NominatimClient;

/// Outbound geocoding capability: free-text location in, optional
/// coordinate pair out. `Ok(None)` means the service found nothing.
#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>>;
}
