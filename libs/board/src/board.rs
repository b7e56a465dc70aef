//! The assignment board: selection state machine and mutation operations.
//!
//! Every mutation runs to completion synchronously against the in-memory
//! board. Operations that change the document report it through their return
//! value so the caller knows to trigger a persist; a rejected placement
//! changes nothing and must not cause a save.

use std::collections::HashSet;

use crate::error::BoardError;
use crate::model::{Companionship, District, Document, ItemKind, DEFAULT_DISTRICTS};
use crate::store::NameStore;

/// Pool contents derived from a master list: the normalized list minus every
/// assigned name. Pools are always recomputed this way on load, never stored.
pub fn unassigned(master: &NameStore, assigned: &HashSet<String>) -> Vec<String> {
    master
        .normalized_list()
        .iter()
        .filter(|name| !assigned.contains(name.as_str()))
        .cloned()
        .collect()
}

/// A place an item can live. Every container accepts exactly one item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRef {
    /// The unassigned pool for one kind.
    Pool(ItemKind),
    /// One slot list of one companionship.
    Slot {
        district: usize,
        comp: usize,
        kind: ItemKind,
    },
}

impl ContainerRef {
    /// The item kind this container accepts.
    pub fn accepts(&self) -> ItemKind {
        match self {
            ContainerRef::Pool(kind) => *kind,
            ContainerRef::Slot { kind, .. } => *kind,
        }
    }
}

/// The single selected item, if any. At most one item is selected at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: ItemKind,
    pub name: String,
}

/// Result of a placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item was relocated; the document changed and should be persisted.
    Moved,
    /// The destination accepts the other kind. Nothing changed; do not persist.
    Rejected,
}

/// In-memory board state: districts of companionships, both master-list
/// stores, both derived pools, and the selection.
#[derive(Debug, Clone, Default)]
pub struct Board {
    districts: Vec<District>,
    brothers: NameStore,
    families: NameStore,
    pool_bros: Vec<String>,
    pool_fams: Vec<String>,
    selected: Option<Selection>,
}

impl Board {
    /// Rebuild a board from a loaded document.
    ///
    /// An empty district map falls back to the three default district names.
    /// Pools are derived as master-minus-assigned; names assigned in the
    /// document but missing from the master lists are left in place untouched.
    pub fn from_document(doc: Document) -> Self {
        let districts = if doc.comps.is_empty() {
            DEFAULT_DISTRICTS.iter().copied().map(District::new).collect()
        } else {
            doc.comps
        };

        let mut assigned = HashSet::new();
        for district in &districts {
            for comp in &district.comps {
                assigned.extend(comp.brothers.iter().cloned());
                assigned.extend(comp.families.iter().cloned());
            }
        }

        let brothers = NameStore::new(doc.master_bros);
        let families = NameStore::new(doc.master_fams);
        let pool_bros = unassigned(&brothers, &assigned);
        let pool_fams = unassigned(&families, &assigned);

        Self {
            districts,
            brothers,
            families,
            pool_bros,
            pool_fams,
            selected: None,
        }
    }

    /// Serialize the board to its persisted document.
    ///
    /// Walks districts and companionships in order; companionships with both
    /// slot lists empty are omitted. Master lists come out normalized.
    pub fn to_document(&self) -> Document {
        let comps = self
            .districts
            .iter()
            .map(|district| District {
                name: district.name.clone(),
                comps: district
                    .comps
                    .iter()
                    .filter(|comp| !comp.is_empty())
                    .cloned()
                    .collect(),
            })
            .collect();

        Document {
            comps,
            master_bros: self.brothers.normalized_list().to_vec(),
            master_fams: self.families.normalized_list().to_vec(),
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select an item, replacing any previous selection.
    pub fn select_item(&mut self, kind: ItemKind, name: &str) -> Result<(), BoardError> {
        if self.locate(kind, name).is_none() {
            return Err(BoardError::UnknownName {
                kind,
                name: name.to_string(),
            });
        }
        self.selected = Some(Selection {
            kind,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Clear the selection. No-op when nothing is selected.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Every slot container compatible with the current selection. Recomputed
    /// from scratch each call; empty when nothing is selected.
    pub fn highlight_targets(&self) -> Vec<ContainerRef> {
        let Some(sel) = &self.selected else {
            return Vec::new();
        };
        let kind = sel.kind;
        let mut targets = Vec::new();
        for (d, district) in self.districts.iter().enumerate() {
            for c in 0..district.comps.len() {
                targets.push(ContainerRef::Slot {
                    district: d,
                    comp: c,
                    kind,
                });
            }
        }
        targets
    }

    /// Move the selected item into a container.
    ///
    /// This is the single placement primitive behind drag-drop, click-to-place
    /// and programmatic placement. A kind mismatch is a quiet rejection: no
    /// state change, selection kept, nothing to persist. On success the item
    /// is appended to the destination and the selection is cleared.
    pub fn move_selected_to(&mut self, dest: ContainerRef) -> Result<MoveOutcome, BoardError> {
        let Some(sel) = self.selected.clone() else {
            return Err(BoardError::NothingSelected);
        };

        if let ContainerRef::Slot { district, comp, .. } = dest {
            let Some(d) = self.districts.get(district) else {
                return Err(BoardError::UnknownDistrict(district));
            };
            if comp >= d.comps.len() {
                return Err(BoardError::UnknownCompanionship {
                    district: d.name.clone(),
                    index: comp,
                });
            }
        }

        if dest.accepts() != sel.kind {
            return Ok(MoveOutcome::Rejected);
        }

        if !self.detach(sel.kind, &sel.name) {
            return Err(BoardError::UnknownName {
                kind: sel.kind,
                name: sel.name,
            });
        }

        match dest {
            ContainerRef::Pool(kind) => self.pool_mut(kind).push(sel.name),
            ContainerRef::Slot {
                district,
                comp,
                kind,
            } => self.districts[district].comps[comp]
                .slot_mut(kind)
                .push(sel.name),
        }

        self.selected = None;
        Ok(MoveOutcome::Moved)
    }

    // =========================================================================
    // Companionships
    // =========================================================================

    /// Append an empty companionship to a district. Returns its index.
    pub fn add_companionship(&mut self, district: usize) -> Result<usize, BoardError> {
        let d = self
            .districts
            .get_mut(district)
            .ok_or(BoardError::UnknownDistrict(district))?;
        d.comps.push(Companionship::default());
        Ok(d.comps.len() - 1)
    }

    /// Remove a companionship, returning every held name to the front of its
    /// pool. Items are prepended one by one in slot order, so a slot of
    /// `[a, b, c]` lands in the pool as `[c, b, a]`. Destructive — callers
    /// confirm with the user before invoking.
    pub fn delete_companionship(
        &mut self,
        district: usize,
        comp: usize,
    ) -> Result<Companionship, BoardError> {
        let d = self
            .districts
            .get_mut(district)
            .ok_or(BoardError::UnknownDistrict(district))?;
        if comp >= d.comps.len() {
            return Err(BoardError::UnknownCompanionship {
                district: d.name.clone(),
                index: comp,
            });
        }

        let removed = d.comps.remove(comp);
        for name in &removed.brothers {
            self.pool_bros.insert(0, name.clone());
        }
        for name in &removed.families {
            self.pool_fams.insert(0, name.clone());
        }
        Ok(removed)
    }

    // =========================================================================
    // Master-list operations
    // =========================================================================

    /// Register a name and prepend it to its pool.
    ///
    /// Returns true when the name is new. An already-known name only
    /// renormalizes the master list — it is never duplicated into the pool,
    /// wherever it currently lives.
    pub fn add_person(&mut self, name: &str, kind: ItemKind) -> Result<bool, BoardError> {
        if name.is_empty() {
            return Err(BoardError::EmptyName);
        }
        if !self.master_mut(kind).add_name(name) {
            return Ok(false);
        }
        self.pool_mut(kind).insert(0, name.to_string());
        Ok(true)
    }

    /// Remove a name from the system entirely: out of whichever container
    /// holds it and out of the master list. If the name was assigned inside a
    /// companionship the assignment is deleted with no replacement.
    /// Destructive — callers confirm first, using [`Board::assignments_of`] to
    /// name the affected companionship(s).
    pub fn remove_person(&mut self, name: &str, kind: ItemKind) -> Result<ContainerRef, BoardError> {
        let location = self.locate(kind, name).ok_or_else(|| BoardError::UnknownName {
            kind,
            name: name.to_string(),
        })?;

        self.detach(kind, name);
        self.master_mut(kind).remove_name(name);

        if self
            .selected
            .as_ref()
            .is_some_and(|sel| sel.kind == kind && sel.name == name)
        {
            self.selected = None;
        }
        Ok(location)
    }

    /// Companionships currently holding a name, as (district name, index)
    /// pairs. Used to build removal confirmations.
    pub fn assignments_of(&self, kind: ItemKind, name: &str) -> Vec<(&str, usize)> {
        self.districts
            .iter()
            .flat_map(|district| {
                district
                    .comps
                    .iter()
                    .enumerate()
                    .filter(move |(_, comp)| comp.slot(kind).iter().any(|n| n == name))
                    .map(move |(idx, _)| (district.name.as_str(), idx))
            })
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Pool names matching a case-insensitive substring filter. Presentation
    /// only; assignment state and the persisted document are untouched.
    pub fn filter_pool(&self, kind: ItemKind, text: &str) -> Vec<&str> {
        let term = text.to_lowercase();
        self.pool(kind)
            .iter()
            .filter(|name| name.to_lowercase().contains(&term))
            .map(String::as_str)
            .collect()
    }

    /// Find where an item currently lives.
    pub fn locate(&self, kind: ItemKind, name: &str) -> Option<ContainerRef> {
        if self.pool(kind).iter().any(|n| n == name) {
            return Some(ContainerRef::Pool(kind));
        }
        for (d, district) in self.districts.iter().enumerate() {
            for (c, comp) in district.comps.iter().enumerate() {
                if comp.slot(kind).iter().any(|n| n == name) {
                    return Some(ContainerRef::Slot {
                        district: d,
                        comp: c,
                        kind,
                    });
                }
            }
        }
        None
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// District index by name.
    pub fn find_district(&self, name: &str) -> Option<usize> {
        self.districts.iter().position(|d| d.name == name)
    }

    pub fn pool(&self, kind: ItemKind) -> &[String] {
        match kind {
            ItemKind::Brother => &self.pool_bros,
            ItemKind::Family => &self.pool_fams,
        }
    }

    pub fn master(&self, kind: ItemKind) -> &NameStore {
        match kind {
            ItemKind::Brother => &self.brothers,
            ItemKind::Family => &self.families,
        }
    }

    fn pool_mut(&mut self, kind: ItemKind) -> &mut Vec<String> {
        match kind {
            ItemKind::Brother => &mut self.pool_bros,
            ItemKind::Family => &mut self.pool_fams,
        }
    }

    fn master_mut(&mut self, kind: ItemKind) -> &mut NameStore {
        match kind {
            ItemKind::Brother => &mut self.brothers,
            ItemKind::Family => &mut self.families,
        }
    }

    /// Remove an item from whichever container holds it. Returns false when
    /// the item exists nowhere.
    fn detach(&mut self, kind: ItemKind, name: &str) -> bool {
        let pool = self.pool_mut(kind);
        if let Some(pos) = pool.iter().position(|n| n == name) {
            pool.remove(pos);
            return true;
        }
        for district in &mut self.districts {
            for comp in &mut district.comps {
                let slot = comp.slot_mut(kind);
                if let Some(pos) = slot.iter().position(|n| n == name) {
                    slot.remove(pos);
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(bros: &[&str], fams: &[&str]) -> Board {
        Board::from_document(Document {
            comps: Vec::new(),
            master_bros: bros.iter().map(|s| s.to_string()).collect(),
            master_fams: fams.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn empty_document_falls_back_to_default_districts() {
        let board = board_with(&[], &[]);
        let names: Vec<_> = board.districts().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, DEFAULT_DISTRICTS);
    }

    #[test]
    fn select_replaces_previous_selection() {
        let mut board = board_with(&["Alice", "Bob"], &[]);
        board.select_item(ItemKind::Brother, "Alice").unwrap();
        board.select_item(ItemKind::Brother, "Bob").unwrap();
        assert_eq!(board.selection().map(|s| s.name.as_str()), Some("Bob"));
    }

    #[test]
    fn select_unknown_name_fails() {
        let mut board = board_with(&["Alice"], &[]);
        let err = board.select_item(ItemKind::Brother, "Nobody").unwrap_err();
        assert!(matches!(err, BoardError::UnknownName { .. }));
    }

    #[test]
    fn deselect_is_a_noop_when_nothing_selected() {
        let mut board = board_with(&[], &[]);
        board.deselect();
        assert!(board.selection().is_none());
    }

    #[test]
    fn highlight_targets_cover_every_companionship() {
        let mut board = board_with(&["Alice"], &[]);
        board.add_companionship(0).unwrap();
        board.add_companionship(1).unwrap();

        assert!(board.highlight_targets().is_empty());

        board.select_item(ItemKind::Brother, "Alice").unwrap();
        let targets = board.highlight_targets();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| t.accepts() == ItemKind::Brother));
    }

    #[test]
    fn move_without_selection_is_an_error() {
        let mut board = board_with(&["Alice"], &[]);
        let err = board
            .move_selected_to(ContainerRef::Pool(ItemKind::Brother))
            .unwrap_err();
        assert_eq!(err, BoardError::NothingSelected);
    }

    #[test]
    fn move_to_missing_companionship_is_an_error() {
        let mut board = board_with(&["Alice"], &[]);
        board.select_item(ItemKind::Brother, "Alice").unwrap();
        let err = board
            .move_selected_to(ContainerRef::Slot {
                district: 0,
                comp: 5,
                kind: ItemKind::Brother,
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::UnknownCompanionship { .. }));
    }

    #[test]
    fn rejected_move_keeps_selection() {
        let mut board = board_with(&["Alice"], &[]);
        board.select_item(ItemKind::Brother, "Alice").unwrap();
        let outcome = board
            .move_selected_to(ContainerRef::Pool(ItemKind::Family))
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected);
        assert!(board.selection().is_some());
    }

    #[test]
    fn add_person_rejects_empty_names() {
        let mut board = board_with(&[], &[]);
        assert_eq!(
            board.add_person("", ItemKind::Brother),
            Err(BoardError::EmptyName)
        );
    }

    #[test]
    fn add_person_prepends_to_pool() {
        let mut board = board_with(&["Bob"], &[]);
        assert!(board.add_person("Alice", ItemKind::Brother).unwrap());
        assert_eq!(board.pool(ItemKind::Brother), ["Alice", "Bob"]);
        assert!(board.master(ItemKind::Brother).contains("Alice"));
    }

    #[test]
    fn add_person_never_duplicates_a_known_name() {
        let mut board = board_with(&["Bob"], &[]);
        assert!(!board.add_person("Bob", ItemKind::Brother).unwrap());
        assert_eq!(board.pool(ItemKind::Brother), ["Bob"]);
    }

    #[test]
    fn remove_person_clears_selection_when_it_was_selected() {
        let mut board = board_with(&["Alice"], &[]);
        board.select_item(ItemKind::Brother, "Alice").unwrap();
        board.remove_person("Alice", ItemKind::Brother).unwrap();
        assert!(board.selection().is_none());
        assert!(!board.master(ItemKind::Brother).contains("Alice"));
    }

    #[test]
    fn assignments_of_names_the_holding_companionship() {
        let mut board = board_with(&["Alice"], &[]);
        let comp = board.add_companionship(1).unwrap();
        board.select_item(ItemKind::Brother, "Alice").unwrap();
        board
            .move_selected_to(ContainerRef::Slot {
                district: 1,
                comp,
                kind: ItemKind::Brother,
            })
            .unwrap();

        let hits = board.assignments_of(ItemKind::Brother, "Alice");
        assert_eq!(hits, vec![(DEFAULT_DISTRICTS[1], comp)]);
        assert!(board.assignments_of(ItemKind::Family, "Alice").is_empty());
    }
}
