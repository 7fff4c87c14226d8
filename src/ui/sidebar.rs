//! Sidebar navigation shell and language switcher.

use crate::i18n::LanguageRegistry;
use crate::ui::document::{Element, MemoryDocument, NodeId, LANGUAGE_SWITCHER_ID};

/// One sidebar navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Translation key of the link label
    pub key: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

/// Translation key of the sidebar header.
pub const SIDEBAR_TITLE_KEY: &str = "sidebar.system";

/// Page assumed when the current path has no file segment.
pub const DEFAULT_PAGE: &str = "index.html";

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        key: "sidebar.server_monitor",
        href: "index.html",
        icon: "fa-server",
    },
    NavItem {
        key: "sidebar.dashboard",
        href: "dashboard.html",
        icon: "fa-chart-pie",
    },
    NavItem {
        key: "sidebar.host_management",
        href: "index.html",
        icon: "fa-desktop",
    },
    NavItem {
        key: "sidebar.history",
        href: "history.html",
        icon: "fa-history",
    },
    NavItem {
        key: "sidebar.settings",
        href: "settings.html",
        icon: "fa-cog",
    },
];

/// Indices of the nav items to highlight for `path`.
///
/// Matching is on the last path segment, so several items can share a page.
pub fn active_items(path: &str) -> Vec<usize> {
    let page = path
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_PAGE);

    NAV_ITEMS
        .iter()
        .enumerate()
        .filter(|(_, item)| item.href == page)
        .map(|(i, _)| i)
        .collect()
}

/// `(value, label)` pairs for the language switcher, in registry order.
pub fn language_options() -> Vec<(&'static str, &'static str)> {
    LanguageRegistry::get()
        .list_enabled()
        .iter()
        .map(|lang| (lang.code, lang.native_name))
        .collect()
}

/// Node ids created by [`mount_sidebar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarNodes {
    pub title: NodeId,
    pub items: Vec<NodeId>,
    pub switcher: NodeId,
}

/// Add the sidebar and the language switcher to a document.
///
/// Labels are left empty; the language controller fills them on sync.
pub fn mount_sidebar(doc: &mut MemoryDocument, current_path: &str) -> SidebarNodes {
    let title = doc.push(Element::translated("h1", SIDEBAR_TITLE_KEY));
    let active = active_items(current_path);

    let items = NAV_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut element = Element::translated("span", item.key).with_attr("href", item.href);
            if active.contains(&i) {
                element = element.with_attr("class", "sidebar-item active");
            }
            doc.push(element)
        })
        .collect();

    doc.push(Element::translated("label", "sidebar.language"));
    let switcher = doc.push(Element::new("select").with_id(LANGUAGE_SWITCHER_ID));

    SidebarNodes {
        title,
        items,
        switcher,
    }
}
