//! View tree builder: reassembles the flat programme, course and unit
//! collections into the nested course level hierarchy.
//!
//! The feed links records only loosely (typed parent keys), has no
//! "course across all years" level, and mixes authored homepage records
//! into the orphan pool. Construction therefore runs as five passes:
//! programme indexing, course attachment, unit attachment, all-years
//! reconciliation, overview injection.

use generational_arena::Index;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::arena::{CourseTree, NodeData, NodeKind};
use crate::domain::entities::{CourseRecord, ProgrammeRecord, UnitRecord};
use crate::domain::key::{AosKey, CodeIndex, YearGroupKey};

/// Enrolment lookup used to decorate course and unit nodes during
/// attachment. Implemented by the records provider.
pub trait EnrolmentLookup {
    fn enrolled(&self, user_id: u64, platform_id: u64) -> bool;
}

/// What to do with a course or unit whose parent key resolves to nothing.
///
/// The institutional feed is assumed referentially intact; historically
/// such records vanished without trace. `Orphan` routes them to the orphan
/// lists instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedParentPolicy {
    #[default]
    Drop,
    Orphan,
}

/// Tree construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    pub unresolved_parents: UnresolvedParentPolicy,
    /// Label given to the synthetic homepage leaves
    pub homepage_label: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            unresolved_parents: UnresolvedParentPolicy::default(),
            homepage_label: "Homepage".to_string(),
        }
    }
}

/// Result of tree construction: the forest plus the records that could not
/// be attached anywhere.
///
/// The orphan lists index into the same arena as the tree; after assembly
/// the orphans also appear at the tail of the root sequence.
#[derive(Debug, Default)]
pub struct CourseLevelView {
    pub tree: CourseTree,
    pub orphaned_courses: Vec<Index>,
    pub orphaned_units: Vec<Index>,
}

impl CourseLevelView {
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Constructs the course level view from flat record collections.
pub struct ViewTreeBuilder {
    options: BuilderOptions,
}

impl Default for ViewTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTreeBuilder {
    pub fn new() -> Self {
        Self::with_options(BuilderOptions::default())
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Self { options }
    }

    /// Build the view tree for one user.
    ///
    /// Runs the full pipeline over already-fetched snapshot collections;
    /// empty collections yield an empty view. Input order is preserved
    /// throughout: programmes and their groups appear in first-encounter
    /// order, attached courses and units in feed order.
    pub fn build<L: EnrolmentLookup + ?Sized>(
        &self,
        user_id: u64,
        programmes: &[ProgrammeRecord],
        courses: &[CourseRecord],
        units: &[UnitRecord],
        enrolment: &L,
    ) -> CourseLevelView {
        let mut tree = CourseTree::new();

        let programme_index = self.index_programmes(&mut tree, programmes);

        let mut orphaned_courses = Vec::new();
        let course_index = self.attach_courses(
            &mut tree,
            courses,
            &programme_index,
            &mut orphaned_courses,
            user_id,
            enrolment,
        );

        let mut orphaned_units = Vec::new();
        self.attach_units(
            &mut tree,
            units,
            &course_index,
            &mut orphaned_units,
            user_id,
            enrolment,
        );

        self.regroup_by_years(&mut tree, &programme_index, &mut orphaned_courses);

        self.assemble_roots(
            &mut tree,
            &programme_index,
            &orphaned_courses,
            &orphaned_units,
        );

        self.inject_overviews(&mut tree);

        debug!(
            programmes = programme_index.len(),
            courses = course_index.len(),
            orphaned_courses = orphaned_courses.len(),
            orphaned_units = orphaned_units.len(),
            "view tree built"
        );

        CourseLevelView {
            tree,
            orphaned_courses,
            orphaned_units,
        }
    }

    /// Pass 1: index programmes by composite key. A duplicate key replaces
    /// the earlier programme's data in place: the later record wins and
    /// position is kept.
    fn index_programmes(
        &self,
        tree: &mut CourseTree,
        programmes: &[ProgrammeRecord],
    ) -> CodeIndex<AosKey> {
        let mut index = CodeIndex::new();
        for programme in programmes {
            let data = programme_data(programme);
            match index.get(&programme.key()) {
                Some(existing) => {
                    if let Some(node) = tree.node_mut(existing) {
                        node.data = data;
                    }
                }
                None => {
                    let idx = tree.insert(data);
                    index.insert(programme.key(), idx);
                }
            }
        }
        index
    }

    /// Pass 2: attach each course beneath its programme, or set it aside as
    /// an orphan. Every course lands in the returned index regardless of
    /// attachment, so units can still resolve parents that are themselves
    /// orphaned or dropped.
    fn attach_courses<L: EnrolmentLookup + ?Sized>(
        &self,
        tree: &mut CourseTree,
        courses: &[CourseRecord],
        programme_index: &CodeIndex<AosKey>,
        orphaned: &mut Vec<Index>,
        user_id: u64,
        enrolment: &L,
    ) -> CodeIndex<AosKey> {
        let mut index = CodeIndex::new();
        for course in courses {
            let mut data = course_data(course);
            data.enrolled = enrolment.enrolled(user_id, course.platform_id);
            let idx = tree.insert(data);
            index.insert(course.key(), idx);

            match &course.parent {
                None => orphaned.push(idx),
                Some(parent) => match programme_index.get(parent) {
                    Some(programme_idx) => tree.adopt(programme_idx, idx),
                    None => self.handle_unresolved("course", parent, idx, orphaned),
                },
            }
        }
        index
    }

    /// Pass 3: the identical algorithm for units, against the course index.
    fn attach_units<L: EnrolmentLookup + ?Sized>(
        &self,
        tree: &mut CourseTree,
        units: &[UnitRecord],
        course_index: &CodeIndex<AosKey>,
        orphaned: &mut Vec<Index>,
        user_id: u64,
        enrolment: &L,
    ) {
        for unit in units {
            let mut data = unit_data(unit);
            data.enrolled = enrolment.enrolled(user_id, unit.platform_id);
            let idx = tree.insert(data);

            match &unit.parent {
                None => orphaned.push(idx),
                Some(parent) => match course_index.get(parent) {
                    Some(course_idx) => tree.adopt(course_idx, idx),
                    None => self.handle_unresolved("unit", parent, idx, orphaned),
                },
            }
        }
    }

    fn handle_unresolved(
        &self,
        what: &str,
        parent: &AosKey,
        idx: Index,
        orphaned: &mut Vec<Index>,
    ) {
        match self.options.unresolved_parents {
            UnresolvedParentPolicy::Drop => {
                debug!(%parent, "dropping {what} with unresolved parent");
            }
            UnresolvedParentPolicy::Orphan => orphaned.push(idx),
        }
    }

    /// Pass 4: the "course across all years" level is implicit in the feed;
    /// make it explicit. Each programme's course years are grouped by the
    /// year-independent key, one AllYears node is synthesized per group and
    /// the courses are re-parented beneath it. An orphaned course whose
    /// id-number equals a synthesized node's is the authored homepage for
    /// that grouping: its identity wins and it leaves the orphan pool.
    fn regroup_by_years(
        &self,
        tree: &mut CourseTree,
        programme_index: &CodeIndex<AosKey>,
        orphaned_courses: &mut Vec<Index>,
    ) {
        let programmes: Vec<Index> = programme_index.iter().map(|(_, idx)| idx).collect();
        for programme_idx in programmes {
            let course_years = tree.abandon_children(programme_idx);
            if course_years.is_empty() {
                continue;
            }

            let mut groups: IndexMap<YearGroupKey, Vec<Index>> = IndexMap::new();
            for &course_idx in &course_years {
                if let Some(group) = tree.node(course_idx).and_then(|n| n.data.year_group.clone())
                {
                    groups.entry(group).or_default().push(course_idx);
                }
            }

            for (group, members) in groups {
                let mut data = all_years_data(&group);
                self.reconcile_homepage(tree, &mut data, orphaned_courses);

                let group_idx = tree.insert(data);
                for member in members {
                    tree.adopt(group_idx, member);
                }
                tree.adopt(programme_idx, group_idx);
            }
        }
    }

    /// Replace a synthesized AllYears identity with a matching orphan's.
    /// The last match in orphan order wins and exactly one is consumed; its
    /// node stays in the arena but never reaches the result.
    fn reconcile_homepage(
        &self,
        tree: &CourseTree,
        data: &mut NodeData,
        orphaned_courses: &mut Vec<Index>,
    ) {
        let matched = orphaned_courses.iter().rposition(|&idx| {
            tree.node(idx)
                .is_some_and(|node| node.data.id_number == data.id_number)
        });
        if let Some(pos) = matched {
            let orphan_idx = orphaned_courses.remove(pos);
            if let Some(orphan) = tree.node(orphan_idx) {
                data.full_name = orphan.data.full_name.clone();
                data.short_name = orphan.data.short_name.clone();
                data.id_number = orphan.data.id_number.clone();
                data.platform_id = orphan.data.platform_id;
                data.enrolled = orphan.data.enrolled;
                debug!(id_number = %data.id_number, "homepage orphan reconciled");
            }
        }
    }

    /// Pass 4.4: promote each programme's children, then the remaining
    /// orphans, to the ordered root sequence.
    fn assemble_roots(
        &self,
        tree: &mut CourseTree,
        programme_index: &CodeIndex<AosKey>,
        orphaned_courses: &[Index],
        orphaned_units: &[Index],
    ) {
        let mut roots = Vec::new();
        for (_, programme_idx) in programme_index.iter() {
            roots.extend(tree.children(programme_idx));
        }
        roots.extend_from_slice(orphaned_courses);
        roots.extend_from_slice(orphaned_units);

        for idx in roots {
            tree.push_root(idx);
        }
    }

    /// Pass 5: every reachable node with children gets a homepage leaf
    /// appended last. The leaf copies the node's data by value, so later
    /// mutation of one never shows through the other.
    fn inject_overviews(&self, tree: &mut CourseTree) {
        let targets: Vec<Index> = tree
            .iter()
            .filter(|(_, node)| node.has_children())
            .map(|(idx, _)| idx)
            .collect();

        for idx in targets {
            let Some(node) = tree.node(idx) else { continue };
            let mut data = node.data.clone();
            data.kind = NodeKind::Overview;
            data.full_name = self.options.homepage_label.clone();
            data.short_name = self.options.homepage_label.clone();
            let overview = tree.insert(data);
            tree.adopt(idx, overview);
        }
    }
}

fn programme_data(record: &ProgrammeRecord) -> NodeData {
    NodeData {
        kind: NodeKind::Programme,
        platform_id: 0,
        full_name: record.full_name.clone(),
        short_name: record.short_name.clone(),
        id_number: String::new(),
        enrolled: false,
        year_group: None,
    }
}

fn course_data(record: &CourseRecord) -> NodeData {
    NodeData {
        kind: NodeKind::Course,
        platform_id: record.platform_id,
        full_name: record.full_name.clone(),
        short_name: record.short_name.clone(),
        id_number: record.id_number.clone(),
        enrolled: false,
        year_group: Some(record.year_group()),
    }
}

fn unit_data(record: &UnitRecord) -> NodeData {
    NodeData {
        kind: NodeKind::Unit,
        platform_id: record.platform_id,
        full_name: record.full_name.clone(),
        short_name: record.short_name.clone(),
        id_number: String::new(),
        enrolled: false,
        year_group: None,
    }
}

/// A fresh AllYears node carries the group key as every display field; the
/// reconciliation step may replace them with an authored homepage's.
fn all_years_data(group: &YearGroupKey) -> NodeData {
    let label = group.to_string();
    NodeData {
        kind: NodeKind::AllYears,
        platform_id: 0,
        full_name: label.clone(),
        short_name: label.clone(),
        id_number: label,
        enrolled: false,
        year_group: None,
    }
}
