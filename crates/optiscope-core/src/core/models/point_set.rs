use super::column_property::ColumnProperty;
use super::column_set::{ColumnSet, mismatch, same_column_set};
use super::error::ModelError;
use super::ids::PointId;
use super::point::Point;
use super::point_list::PointList;
use super::stats::{MinMaxMean, MinMaxMeanAccumulator};
use slotmap::SlotMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// One member list of a [`PointSet`]: the ids of points over one exact column set.
#[derive(Debug, Clone)]
pub struct MemberList {
    column_set: Arc<ColumnSet>, // Exact column set of every point in this member
    map: Vec<usize>,            // Position in `column_set` of each column of the common set
    ids: Vec<PointId>,          // Ordered ids of the member's points
}

impl MemberList {
    pub fn column_set(&self) -> &Arc<ColumnSet> {
        &self.column_set
    }

    /// Common-to-member index map, computed once when the member was added.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    pub fn ids(&self) -> &[PointId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A value snapshot of one deleted point and where it used to live.
#[derive(Debug, Clone)]
struct RemovedPoint {
    member: usize,
    position: usize,
    point: Point,
}

/// A named, lockable and heterogeneous collection of points.
///
/// Points are grouped into member lists, each over its own column set; every
/// member set is a superset of the collection's *common* column set, which is
/// the space all collection-wide operations (statistics, picking, dominance) work
/// in. Points live in a slot map so their [`PointId`]s stay valid while other
/// points are deleted.
///
/// Deletions are recorded on an unbounded LIFO undo stack of value snapshots.
/// The last remaining point of a collection can never be deleted.
#[derive(Debug, Clone)]
pub struct PointSet {
    name: String,
    locked: bool,
    column_set: Arc<ColumnSet>,
    points: SlotMap<PointId, Point>,
    members: Vec<MemberList>,
    undo_stack: Vec<Vec<RemovedPoint>>,
}

impl PointSet {
    /// Creates an empty collection over the given common column set.
    pub fn new(name: &str, column_set: Arc<ColumnSet>) -> Self {
        Self {
            name: name.to_string(),
            locked: false,
            column_set,
            points: SlotMap::with_key(),
            members: Vec::new(),
            undo_stack: Vec::new(),
        }
    }

    /// Creates a collection whose common column set is `list`'s own set.
    pub fn from_list(name: &str, list: PointList) -> Self {
        let mut set = Self::new(name, Arc::clone(list.column_set()));
        let identity = (0..list.column_set().dimension()).collect();
        let member = set.member_for(list.column_set(), identity);
        set.append_unchecked(member, list.into_points());
        set
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// The common column set shared by every member list.
    pub fn column_set(&self) -> &Arc<ColumnSet> {
        &self.column_set
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn members(&self) -> &[MemberList] {
        &self.members
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Mutable access to a point's values and tag; its column set stays fixed.
    pub fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(id)
    }

    /// Iterates over all points in member order, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.members
            .iter()
            .flat_map(|member| member.ids.iter())
            .map(|&id| (id, &self.points[id]))
    }

    fn ensure_unlocked(&self) -> Result<(), ModelError> {
        if self.locked {
            Err(ModelError::Locked(self.name.clone()))
        } else {
            Ok(())
        }
    }

    /// Index of the member over `column_set`, creating it with `map` if needed.
    fn member_for(&mut self, column_set: &Arc<ColumnSet>, map: Vec<usize>) -> usize {
        if let Some(index) = self.find_member(column_set) {
            return index;
        }
        self.members.push(MemberList {
            column_set: Arc::clone(column_set),
            map,
            ids: Vec::new(),
        });
        self.members.len() - 1
    }

    fn find_member(&self, column_set: &Arc<ColumnSet>) -> Option<usize> {
        self.members
            .iter()
            .position(|member| same_column_set(&member.column_set, column_set))
    }

    fn append_unchecked(&mut self, member: usize, points: Vec<Point>) -> Vec<PointId> {
        let ids: Vec<PointId> = points
            .into_iter()
            .map(|point| self.points.insert(point))
            .collect();
        self.members[member].ids.extend_from_slice(&ids);
        ids
    }

    /// Adds every point of `list`, returning the index of the member that received them.
    ///
    /// Lists over a column set already present are merged into that member.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::ColumnNotFound`] if the list's column set does not
    /// cover the common set, or [`ModelError::Locked`].
    pub fn add_list(&mut self, list: PointList) -> Result<usize, ModelError> {
        self.ensure_unlocked()?;
        let map = self.column_set.super_set_map(list.column_set())?;
        let member = self.member_for(list.column_set(), map);
        let added = self.append_unchecked(member, list.into_points());
        debug!(set = %self.name, member, added = added.len(), "Added point list to set.");
        Ok(member)
    }

    /// Appends a point to the member over exactly the point's column set.
    ///
    /// A new member is opened when none matches, provided the point's set
    /// covers the common set.
    ///
    /// # Errors
    ///
    /// [`ModelError::ColumnSetMismatch`] if the point lacks a common column, or
    /// [`ModelError::Locked`].
    pub fn push(&mut self, point: Point) -> Result<PointId, ModelError> {
        self.ensure_unlocked()?;
        let member = match self.find_member(point.column_set()) {
            Some(member) => member,
            None => {
                let map = self
                    .column_set
                    .super_set_map(point.column_set())
                    .map_err(|_| mismatch(&self.column_set, point.column_set()))?;
                self.member_for(point.column_set(), map)
            }
        };
        Ok(self.append_unchecked(member, vec![point])[0])
    }

    /// Appends a point to a specific member, whose column set it must match.
    pub fn push_to(&mut self, member: usize, point: Point) -> Result<PointId, ModelError> {
        Ok(self.extend(member, vec![point])?[0])
    }

    /// Appends all `points` to `member`, or none of them if any has the wrong column set.
    pub fn extend(&mut self, member: usize, points: Vec<Point>) -> Result<Vec<PointId>, ModelError> {
        self.ensure_unlocked()?;
        let target = self
            .members
            .get(member)
            .ok_or(ModelError::IndexOutOfBounds {
                index: member,
                len: self.members.len(),
            })?;
        for point in &points {
            if !same_column_set(&target.column_set, point.column_set()) {
                return Err(mismatch(&target.column_set, point.column_set()));
            }
        }
        Ok(self.append_unchecked(member, points))
    }

    /// Deletes the given points and records them for [`undo`](Self::undo).
    ///
    /// Returns the number of points removed. A request that would leave the set
    /// empty is refused entirely and removes nothing. Duplicate ids count once.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownPoint`] if any id is not in the set (nothing is removed),
    /// or [`ModelError::Locked`].
    pub fn delete(&mut self, ids: &[PointId]) -> Result<usize, ModelError> {
        self.ensure_unlocked()?;
        if let Some(&unknown) = ids.iter().find(|&&id| !self.points.contains_key(id)) {
            return Err(ModelError::UnknownPoint(unknown));
        }
        let doomed: HashSet<PointId> = ids.iter().copied().collect();
        if doomed.is_empty() {
            return Ok(0);
        }
        if doomed.len() >= self.points.len() {
            warn!(
                set = %self.name,
                requested = doomed.len(),
                "Refusing to delete every point of the set."
            );
            return Ok(0);
        }

        let mut snapshot = Vec::with_capacity(doomed.len());
        for (member_index, member) in self.members.iter_mut().enumerate() {
            let positions: Vec<usize> = member
                .ids
                .iter()
                .enumerate()
                .filter(|(_, id)| doomed.contains(*id))
                .map(|(position, _)| position)
                .collect();
            let first = snapshot.len();
            for &position in positions.iter().rev() {
                let id = member.ids.remove(position);
                if let Some(point) = self.points.remove(id) {
                    snapshot.push(RemovedPoint {
                        member: member_index,
                        position,
                        point,
                    });
                }
            }
            snapshot[first..].reverse();
        }

        let removed = snapshot.len();
        self.undo_stack.push(snapshot);
        debug!(set = %self.name, removed, depth = self.undo_stack.len(), "Deleted points.");
        Ok(removed)
    }

    /// Restores the most recent deletion at its original positions.
    ///
    /// Returns the new ids of the restored points (slot map keys are not reused),
    /// or an empty vector when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Vec<PointId>, ModelError> {
        self.ensure_unlocked()?;
        let Some(snapshot) = self.undo_stack.pop() else {
            return Ok(Vec::new());
        };
        let mut restored = Vec::with_capacity(snapshot.len());
        for removed in snapshot {
            let id = self.points.insert(removed.point);
            let ids = &mut self.members[removed.member].ids;
            ids.insert(removed.position.min(ids.len()), id);
            restored.push(id);
        }
        debug!(set = %self.name, restored = restored.len(), "Undid deletion.");
        Ok(restored)
    }

    /// Minimum, maximum and mean over the common column set.
    pub fn min_max_mean(&self) -> MinMaxMean {
        let mut accumulator = MinMaxMeanAccumulator::new(self.column_set.dimension());
        for member in &self.members {
            for &id in &member.ids {
                accumulator.add_mapped(self.points[id].values(), &member.map);
            }
        }
        accumulator.finish(&self.column_set)
    }

    /// One property per common column, bounded by the observed data range.
    ///
    /// Columns without finite observations fall back to their default range.
    pub fn fitted_properties(&self) -> Vec<ColumnProperty> {
        let stats = self.min_max_mean();
        self.column_set
            .iter()
            .enumerate()
            .map(|(k, column)| {
                let (min, max) = (stats.min[k], stats.max[k]);
                if min.is_finite() && max.is_finite() {
                    ColumnProperty::new(column.clone(), min, max)
                } else {
                    column.default_property()
                }
            })
            .collect()
    }

    /// Finds the point closest to `probe` in the scaled common space.
    ///
    /// `properties[k]` scales common column `k`; `mask` optionally switches
    /// dimensions off. Returns `None` for an empty set.
    ///
    /// # Errors
    ///
    /// [`ModelError::ColumnNotFound`] if `probe` lacks a common column, or
    /// [`ModelError::DimensionMismatch`] if `properties` or `mask` does not cover
    /// the common set.
    pub fn nearest(
        &self,
        probe: &Point,
        properties: &[ColumnProperty],
        mask: Option<&[bool]>,
    ) -> Result<Option<PointId>, ModelError> {
        let probe_map = self.column_set.super_set_map(probe.column_set())?;
        if properties.len() != self.column_set.dimension() {
            return Err(ModelError::DimensionMismatch {
                expected: self.column_set.dimension(),
                actual: properties.len(),
            });
        }
        if let Some(mask) = mask
            && mask.len() != self.column_set.dimension()
        {
            return Err(ModelError::DimensionMismatch {
                expected: self.column_set.dimension(),
                actual: mask.len(),
            });
        }

        let mut best: Option<(PointId, f64)> = None;
        for member in &self.members {
            for &id in &member.ids {
                let distance = probe.scaled_distance_squared(
                    &self.points[id],
                    &probe_map,
                    &member.map,
                    properties,
                    mask,
                );
                if best.is_none_or(|(_, current)| distance < current) {
                    best = Some((id, distance));
                }
            }
        }
        Ok(best.map(|(id, _)| id))
    }
}
