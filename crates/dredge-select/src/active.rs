use dredge_core::models::Polygon;
use serde::Serialize;

/// Where an active polygon came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolygonRole {
    /// Committed project boundary
    OfficialArea,
    /// Ad-hoc polygon drawn on the map
    ManualSelection,
}

impl PolygonRole {
    pub fn label(&self) -> &'static str {
        match self {
            PolygonRole::OfficialArea => "Official Area",
            PolygonRole::ManualSelection => "Manual Selection",
        }
    }
}

/// Polygons that currently select records.
///
/// Holds at most one committed boundary and at most one ad-hoc polygon.
/// Setting the ad-hoc slot again replaces whatever was there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivePolygonSet {
    boundary: Option<Polygon>,
    adhoc: Option<Polygon>,
}

impl ActivePolygonSet {
    pub fn new(boundary: Option<Polygon>, adhoc: Option<Polygon>) -> Self {
        Self { boundary, adhoc }
    }

    pub fn with_boundary(mut self, boundary: Polygon) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_adhoc(mut self, adhoc: Polygon) -> Self {
        self.adhoc = Some(adhoc);
        self
    }

    pub fn boundary(&self) -> Option<&Polygon> {
        self.boundary.as_ref()
    }

    pub fn adhoc(&self) -> Option<&Polygon> {
        self.adhoc.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_none() && self.adhoc.is_none()
    }

    pub fn len(&self) -> usize {
        usize::from(self.boundary.is_some()) + usize::from(self.adhoc.is_some())
    }

    /// Only the official boundary is selecting
    pub fn is_official_boundary(&self) -> bool {
        self.boundary.is_some() && self.adhoc.is_none()
    }

    /// Active polygons with their role, drawn selection first
    pub fn iter(&self) -> impl Iterator<Item = (PolygonRole, &Polygon)> {
        let adhoc = self.adhoc.iter().map(|polygon| (PolygonRole::ManualSelection, polygon));
        let boundary = self.boundary.iter().map(|polygon| (PolygonRole::OfficialArea, polygon));
        adhoc.chain(boundary)
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.iter().map(|(_, polygon)| polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dredge_core::models::GeoPoint;

    fn triangle(offset: f64) -> Polygon {
        Polygon::new(vec![
            GeoPoint::new(offset, 0.0),
            GeoPoint::new(offset, 1.0),
            GeoPoint::new(offset + 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_set() {
        let set = ActivePolygonSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.is_official_boundary());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_official_flag() {
        let boundary_only = ActivePolygonSet::default().with_boundary(triangle(0.0));
        assert!(boundary_only.is_official_boundary());

        let both = boundary_only.clone().with_adhoc(triangle(5.0));
        assert!(!both.is_official_boundary());
        assert_eq!(both.len(), 2);

        let adhoc_only = ActivePolygonSet::default().with_adhoc(triangle(5.0));
        assert!(!adhoc_only.is_official_boundary());
    }

    #[test]
    fn test_iteration_order_and_labels() {
        let set = ActivePolygonSet::new(Some(triangle(0.0)), Some(triangle(5.0)));
        let roles: Vec<&str> = set.iter().map(|(role, _)| role.label()).collect();
        assert_eq!(roles, vec!["Manual Selection", "Official Area"]);
    }

    #[test]
    fn test_adhoc_slot_is_replaced() {
        let set = ActivePolygonSet::default().with_adhoc(triangle(0.0)).with_adhoc(triangle(5.0));
        assert_eq!(set.len(), 1);
        assert_eq!(set.adhoc(), Some(&triangle(5.0)));
    }
}
