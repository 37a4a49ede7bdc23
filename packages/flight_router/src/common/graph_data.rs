use serde::Serialize;

/// An airport record as loaded from the airports dataset. These are stored
/// as node weights in the network graph; identity is the integer code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: i64,
    pub name: String,
    pub city: String,
    pub country: String,
    pub iata: String,
    pub icao: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A directed arc between two airport codes, weighted with the great-circle
/// distance between the endpoints in kilometers
#[derive(Debug, Clone)]
pub struct RouteEdge {
    pub source: i64,
    pub target: i64,
    pub distance_km: f64,
}

impl PartialEq for RouteEdge {
    /// Two routes match on their endpoints alone; the weight is ignored
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    /// Edges with matching endpoints compare equal even when their weights
    /// differ
    #[test]
    fn test_edge_equality_ignores_weight() {
        let first = RouteEdge {
            source: 1,
            target: 2,
            distance_km: 106.0,
        };
        let second = RouteEdge {
            source: 1,
            target: 2,
            distance_km: 9999.0,
        };

        assert_eq!(first, second);
    }

    /// Direction matters: A->B is not B->A
    #[test]
    fn test_edge_equality_is_directed() {
        let forward = RouteEdge {
            source: 1,
            target: 2,
            distance_km: 106.0,
        };
        let reverse = RouteEdge {
            source: 2,
            target: 1,
            distance_km: 106.0,
        };

        assert_ne!(forward, reverse);
    }
}
