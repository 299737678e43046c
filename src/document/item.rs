//! Page items: the tagged-union node type of the document tree.
//!
//! Every node in a document is a [`PageItem`] carrying an id, its
//! eligibility flags and an [`ItemKind`] discriminant. Traversal code
//! dispatches on the discriminant instead of inspecting types at runtime.

use serde::{Deserialize, Serialize};

use super::geometry::SimpleShape;

/// Identity of a page item within one document.
///
/// `0` is reserved for "not yet assigned"; documents assign real ids on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attributes that exclude an item from collection and deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EligibilityFlags {
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub guide: bool,
    #[serde(default)]
    pub clipping: bool,
}

impl EligibilityFlags {
    #[must_use]
    pub fn locked() -> Self {
        Self {
            locked: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn guide() -> Self {
        Self {
            guide: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn clipping() -> Self {
        Self {
            clipping: true,
            ..Self::default()
        }
    }

    /// True if any exclusion flag is set.
    #[must_use]
    pub fn excludes(&self) -> bool {
        self.locked || self.hidden || self.guide || self.clipping
    }
}

/// Shape kinds the collector can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Simple,
    Compound,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "path item"),
            Self::Compound => write!(f, "compound path"),
        }
    }
}

/// Discriminant and payload of a page item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// A (sub)layer. Top-level document entries are always layers.
    Layer {
        #[serde(default)]
        children: Vec<PageItem>,
    },
    /// A plain group of items.
    Group {
        #[serde(default)]
        children: Vec<PageItem>,
    },
    /// A compound path; its children are the sub-path items.
    Compound {
        #[serde(default)]
        paths: Vec<PageItem>,
    },
    /// A single outline.
    Path(SimpleShape),
    /// Text, raster, symbols and anything else the engine ignores.
    Other,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub flags: EligibilityFlags,
    #[serde(flatten)]
    pub kind: ItemKind,
}

fn is_unassigned(id: &ItemId) -> bool {
    !id.is_assigned()
}

impl PageItem {
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: ItemId::UNASSIGNED,
            name: None,
            flags: EligibilityFlags::default(),
            kind,
        }
    }

    #[must_use]
    pub fn layer(children: Vec<PageItem>) -> Self {
        Self::new(ItemKind::Layer { children })
    }

    #[must_use]
    pub fn group(children: Vec<PageItem>) -> Self {
        Self::new(ItemKind::Group { children })
    }

    #[must_use]
    pub fn compound(paths: Vec<SimpleShape>) -> Self {
        Self::new(ItemKind::Compound {
            paths: paths.into_iter().map(Self::path).collect(),
        })
    }

    #[must_use]
    pub fn path(shape: SimpleShape) -> Self {
        Self::new(ItemKind::Path(shape))
    }

    #[must_use]
    pub fn other() -> Self {
        Self::new(ItemKind::Other)
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = ItemId(id);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EligibilityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Eligible for collection and deletion.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.flags.excludes()
    }

    /// Layers, groups and compound paths can be descended into.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Layer { .. } | ItemKind::Group { .. } | ItemKind::Compound { .. }
        )
    }

    /// Children of a container, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[PageItem] {
        match &self.kind {
            ItemKind::Layer { children } | ItemKind::Group { children } => children,
            ItemKind::Compound { paths } => paths,
            ItemKind::Path(_) | ItemKind::Other => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<PageItem>> {
        match &mut self.kind {
            ItemKind::Layer { children } | ItemKind::Group { children } => Some(children),
            ItemKind::Compound { paths } => Some(paths),
            ItemKind::Path(_) | ItemKind::Other => None,
        }
    }

    /// Outline of a simple path item.
    #[must_use]
    pub fn as_simple(&self) -> Option<&SimpleShape> {
        match &self.kind {
            ItemKind::Path(shape) => Some(shape),
            _ => None,
        }
    }

    /// Sub-shapes of a compound path, in stored order.
    ///
    /// Children that are not simple paths do not contribute geometry.
    pub fn sub_shapes(&self) -> impl Iterator<Item = &SimpleShape> {
        let paths: &[PageItem] = match &self.kind {
            ItemKind::Compound { paths } => paths,
            _ => &[],
        };
        paths.iter().filter_map(PageItem::as_simple)
    }

    /// Which collectable shape kind this item is, if any.
    #[must_use]
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self.kind {
            ItemKind::Path(_) => Some(ShapeKind::Simple),
            ItemKind::Compound { .. } => Some(ShapeKind::Compound),
            _ => None,
        }
    }

    /// Whether the item carries geometry for its kind.
    ///
    /// A path needs control points; a compound needs sub-shapes.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        match &self.kind {
            ItemKind::Path(shape) => shape.has_geometry(),
            ItemKind::Compound { .. } => self.sub_shapes().next().is_some(),
            _ => false,
        }
    }

    /// Depth-first search for a descendant (or self) by id.
    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&PageItem> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Remove a descendant by id, returning it if found.
    pub(crate) fn remove_descendant(&mut self, id: ItemId) -> Option<PageItem> {
        let children = self.children_mut()?;
        if let Some(pos) = children.iter().position(|c| c.id == id) {
            return Some(children.remove(pos));
        }
        children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    /// Visit this item and all descendants, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a PageItem)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    pub(crate) fn walk_mut(&mut self, visit: &mut impl FnMut(&mut PageItem)) {
        visit(self);
        if let Some(children) = self.children_mut() {
            for child in children {
                child.walk_mut(visit);
            }
        }
    }
}
