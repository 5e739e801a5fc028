//! Removal of boilerplate and wiki interface chrome.

use log::debug;

use crate::dom::{remove_all, Selection};
use crate::patterns::Catalog;

/// Remove scripts, navigation, images and Gutenberg licence blocks under
/// `root`.
pub fn strip_non_content(root: &Selection, catalog: &Catalog) {
    let group = catalog.boilerplate_group();
    let count = root.select(&group).nodes().len();
    if count > 0 {
        debug!("removing {count} boilerplate elements");
    }
    remove_all(root, &group);
}

/// Remove edit links, tables of contents, navboxes, reference lists and the
/// other MediaWiki chrome under `root`.
pub fn strip_wiki_chrome(root: &Selection, catalog: &Catalog) {
    remove_all(root, &catalog.wiki_chrome_group());
}
