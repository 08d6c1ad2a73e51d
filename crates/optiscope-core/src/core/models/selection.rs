use super::ids::PointId;
use super::point::Point;
use super::point_set::PointSet;

/// A named accumulator of references into a [`PointSet`].
///
/// A selection stores [`PointId`]s, never copies of points, so it always reflects
/// the current values of the points it refers to. Ids of points deleted after the
/// selection was built simply stop resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    name: String,
    active: bool,
    ids: Vec<PointId>,
}

impl Selection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: false,
            ids: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[PointId] {
        &self.ids
    }

    pub fn push(&mut self, id: PointId) {
        self.ids.push(id);
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that no longer resolve in `set`.
    pub fn retain_existing(&mut self, set: &PointSet) {
        self.ids.retain(|&id| set.contains(id));
    }

    /// Resolves the selection against `set`, skipping ids that no longer exist.
    pub fn points<'a>(&'a self, set: &'a PointSet) -> impl Iterator<Item = (PointId, &'a Point)> {
        self.ids
            .iter()
            .filter_map(move |&id| set.get(id).map(|point| (id, point)))
    }
}

impl Extend<PointId> for Selection {
    fn extend<T: IntoIterator<Item = PointId>>(&mut self, iter: T) {
        self.ids.extend(iter);
    }
}
