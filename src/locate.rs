//! Locating a graveyard and the region a viewport should frame.
//!
//! Only the target extent is produced here. How the renderer animates to it
//! (duration, zoom limits) is its own business.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use geo::Rect;
use serde::Serialize;

use crate::classify::CategorySet;
use crate::error::{PlotError, Result};
use crate::feature::{Feature, FeatureCollection};

/// Axis-aligned extent in the collection's output projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingRegion {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingRegion {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// `[min_x, min_y, max_x, max_y]`, the order map views expect
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl From<Rect<f64>> for BoundingRegion {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

/// First feature (in document order) belonging to `group_name`
pub fn locate<'a>(group_name: &str, collection: &'a FeatureCollection) -> Result<&'a Feature> {
    if group_name.is_empty() {
        return Err(PlotError::not_found(group_name));
    }
    collection
        .iter()
        .find(|f| f.group() == Some(group_name))
        .ok_or_else(|| PlotError::not_found(group_name))
}

/// Extent of a feature; `None` when it has no geometry
pub fn frame(feature: &Feature) -> Option<BoundingRegion> {
    feature.extent().map(BoundingRegion::from)
}

/// Graveyard names fuzzily matching `query`, best first
pub fn suggest(query: &str, groups: &CategorySet, limit: usize) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let mut results: Vec<(i64, &str)> = groups
        .iter()
        .filter_map(|name| matcher.fuzzy_match(name, query).map(|score| (score, name)))
        .collect();

    // Stable sort keeps first-seen order between equal scores
    results.sort_by(|a, b| b.0.cmp(&a.0));

    results.into_iter().take(limit).map(|(_, name)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::AttributeKeys;
    use crate::projection::Projection;
    use geo::{polygon, Geometry};
    use serde_json::{json, Value};

    fn feature(props: Value, geometry: Option<Geometry<f64>>) -> Feature {
        match props {
            Value::Object(map) => Feature::new(geometry, map, &AttributeKeys::default()),
            _ => unreachable!(),
        }
    }

    fn square(x: f64, y: f64) -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: x, y: y),
            (x: x + 2.0, y: y),
            (x: x + 2.0, y: y + 1.0),
            (x: x, y: y + 1.0),
        ])
    }

    fn sample() -> FeatureCollection {
        FeatureCollection::from_features(
            vec![
                feature(json!({"friedhof": "Ollheim"}), Some(square(0.0, 0.0))),
                feature(json!({"friedhof": "Buschhoven"}), Some(square(10.0, 20.0))),
                feature(json!({"friedhof": "Buschhoven"}), Some(square(50.0, 50.0))),
                feature(json!({"friedhof": "Heimerzheim"}), None),
            ],
            Projection::Wgs84,
        )
    }

    #[test]
    fn test_locate_returns_first_match() {
        let fc = sample();
        let found = locate("Buschhoven", &fc).unwrap();
        let region = frame(found).unwrap();
        assert_eq!(region.to_array(), [10.0, 20.0, 12.0, 21.0]);
        assert_eq!(region.width(), 2.0);
        assert_eq!(region.height(), 1.0);
        assert_eq!(region.center(), (11.0, 20.5));
    }

    #[test]
    fn test_locate_not_found() {
        let fc = sample();
        assert!(matches!(locate("Nowhere", &fc), Err(PlotError::NotFound { .. })));
        assert!(matches!(locate("", &fc), Err(PlotError::NotFound { .. })));
    }

    #[test]
    fn test_frame_without_geometry() {
        let fc = sample();
        assert!(frame(locate("Heimerzheim", &fc).unwrap()).is_none());
    }

    #[test]
    fn test_suggest() {
        let groups: CategorySet = ["Ollheim", "Buschhoven", "Heimerzheim"].into_iter().collect();
        assert_eq!(suggest("busch", &groups, 3), vec!["Buschhoven"]);
        assert!(suggest("zzz", &groups, 3).is_empty());
        assert_eq!(suggest("heim", &groups, 1).len(), 1);
    }
}
