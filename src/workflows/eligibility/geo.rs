use super::domain::Office;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle distance between two points, haversine form.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Offices ranked by distance from `point`, nearest first, truncated to
/// `limit`. Feeds the client's closest-office associations.
pub fn nearest_offices<'a>(
    point: GeoPoint,
    offices: &'a [Office],
    limit: usize,
) -> Vec<(&'a Office, f64)> {
    let mut ranked: Vec<(&Office, f64)> = offices
        .iter()
        .map(|office| {
            let there = GeoPoint {
                latitude: office.latitude,
                longitude: office.longitude,
            };
            (office, distance_km(point, there))
        })
        .collect();

    ranked.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::eligibility::domain::OfficeKey;

    fn office(key: &str, lat: f64, lon: f64) -> Office {
        Office {
            key: OfficeKey(key.to_string()),
            name: key.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn distance_is_zero_for_identical_points() {
        let here = GeoPoint {
            latitude: 32.7765,
            longitude: -79.9311,
        };
        assert!(distance_km(here, here) < 1e-9);
    }

    #[test]
    fn charleston_to_columbia_is_roughly_150_km() {
        let charleston = GeoPoint {
            latitude: 32.7765,
            longitude: -79.9311,
        };
        let columbia = GeoPoint {
            latitude: 34.0007,
            longitude: -81.0348,
        };
        let d = distance_km(charleston, columbia);
        assert!((140.0..185.0).contains(&d), "got {d} km");
    }

    #[test]
    fn nearest_offices_rank_ascending_and_truncate() {
        let offices = vec![
            office("columbia", 34.0007, -81.0348),
            office("charleston", 32.7765, -79.9311),
            office("summerville", 33.0185, -80.1756),
        ];
        let client = GeoPoint {
            latitude: 32.8,
            longitude: -79.95,
        };

        let ranked = nearest_offices(client, &offices, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0.key.as_str(), "charleston");
        assert_eq!(ranked[1].0.key.as_str(), "summerville");
        assert!(ranked[0].1 <= ranked[1].1);
    }

    #[test]
    fn nearest_offices_on_empty_roster_is_empty() {
        let client = GeoPoint {
            latitude: 32.8,
            longitude: -79.95,
        };
        assert!(nearest_offices(client, &[], 3).is_empty());
    }
}
