//! Domain models for docnav
//!
//! Contains the navigation logic without any I/O concerns.

mod section;
mod registry;
mod search;
mod content;
mod location;
mod router;
mod sidebar;
mod docset;
mod controller;

pub use section::{Category, CategoryId, IdError, Section, SectionId};
pub use registry::{RegistryError, SectionKey, SectionRegistry, INTRODUCTION_ID};
pub use search::{SearchEntry, SearchIndex, SearchOutcome};
pub use content::{
    list_markers, parse_markdown, Block, ContentBlock, ContentError, ContentLibrary, ListItem,
    ListMarker,
};
pub use location::{ChangeCause, Fragment, FragmentChange, Location, Subscription};
pub use router::{Navigation, Router};
pub use sidebar::{SidebarRow, SidebarState};
pub use docset::{DocSet, DocSetError};
pub use controller::{ControllerOptions, DocsController};
