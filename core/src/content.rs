//! Loaders for the static JSON bundled with the app: workout programs and
//! sports places.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ContentError;
use crate::model::place::{Coordinates, Place};
use crate::model::workout::Workout;

fn read(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_workouts(json: &str) -> Result<Vec<Workout>, ContentError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_workouts(path: &Path) -> Result<Vec<Workout>, ContentError> {
    let workouts = parse_workouts(&read(path)?)?;
    debug!(path = %path.display(), count = workouts.len(), "loaded workouts");
    Ok(workouts)
}

/// Workouts keyed by muscle group, groups in sorted order.
pub fn group_by_muscle_group(workouts: &[Workout]) -> BTreeMap<String, Vec<&Workout>> {
    let mut groups: BTreeMap<String, Vec<&Workout>> = BTreeMap::new();
    for workout in workouts {
        groups
            .entry(workout.muscle_group.clone())
            .or_default()
            .push(workout);
    }
    groups
}

/// Flattens `{ category: { name: {latitude, longitude} } }` into a list
/// ordered by category, then name.
pub fn parse_places(json: &str) -> Result<Vec<Place>, ContentError> {
    let nested: HashMap<String, HashMap<String, Coordinates>> = serde_json::from_str(json)?;
    let mut places: Vec<Place> = nested
        .into_iter()
        .flat_map(|(category, named)| {
            named.into_iter().map(move |(name, coords)| Place {
                category: category.clone(),
                name,
                latitude: coords.latitude,
                longitude: coords.longitude,
            })
        })
        .collect();
    places.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    Ok(places)
}

pub fn load_places(path: &Path) -> Result<Vec<Place>, ContentError> {
    let places = parse_places(&read(path)?)?;
    debug!(path = %path.display(), count = places.len(), "loaded places");
    Ok(places)
}
