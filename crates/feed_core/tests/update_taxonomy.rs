mod support;

use feed_core::{update, Msg, Taxonomies, Term};
use pretty_assertions::assert_eq;
use support::*;

fn term(id: u64, name: &str) -> Term {
    Term {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        count: 3,
    }
}

#[test]
fn partial_taxonomies_populate_what_loaded() {
    init_logging();
    let (state, _) = mounted(config());
    let (state, effects) = update(
        state,
        Msg::TaxonomiesLoaded {
            base_url: BASE.to_string(),
            taxonomies: Taxonomies {
                categories: vec![term(1, "Roofing"), term(2, "Siding")],
                tags: Vec::new(),
            },
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.categories.len(), 2);
    assert!(view.tags.is_empty());
    assert_eq!(view.result.failure_message(), None);
}

#[test]
fn taxonomies_for_previous_base_url_are_discarded() {
    init_logging();
    let (state, _) = mounted(config());
    let (state, _) = update(
        state,
        Msg::BaseUrlChanged("https://other.example.org".to_string()),
    );
    let (state, _) = update(
        state,
        Msg::TaxonomiesLoaded {
            base_url: BASE.to_string(),
            taxonomies: Taxonomies {
                categories: vec![term(1, "Old")],
                tags: vec![term(2, "Old")],
            },
        },
    );

    assert!(state.taxonomy_cache().is_none());
    assert!(state.view().categories.is_empty());
}

#[test]
fn base_url_change_invalidates_cache() {
    init_logging();
    let (state, _) = mounted(config());
    let (state, _) = update(
        state,
        Msg::TaxonomiesLoaded {
            base_url: BASE.to_string(),
            taxonomies: Taxonomies {
                categories: vec![term(1, "Roofing")],
                tags: vec![term(4, "Storm")],
            },
        },
    );
    assert!(state.taxonomy_cache().is_some());

    let (state, _) = update(
        state,
        Msg::BaseUrlChanged("https://other.example.org".to_string()),
    );
    assert!(state.taxonomy_cache().is_none());
}

#[test]
fn explicit_reload_requests_taxonomies_again() {
    init_logging();
    let (state, _) = mounted(config());
    let (_, effects) = update(state, Msg::ReloadTaxonomiesClicked);
    assert_eq!(
        effects,
        vec![feed_core::Effect::LoadTaxonomies {
            base_url: BASE.to_string()
        }]
    );
}

#[test]
fn remount_reuses_cached_taxonomies() {
    init_logging();
    let (state, _) = mounted(config());
    let (state, _) = update(
        state,
        Msg::TaxonomiesLoaded {
            base_url: BASE.to_string(),
            taxonomies: Taxonomies {
                categories: vec![term(1, "Roofing")],
                tags: vec![term(4, "Storm")],
            },
        },
    );
    let (state, _) = update(state, Msg::Unmounted);

    let (state, effects) = update(state, Msg::Mounted);
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, feed_core::Effect::LoadTaxonomies { .. })));
    single_fetch(&effects);
    assert_eq!(state.view().categories.len(), 1);
}

#[test]
fn first_mount_loads_taxonomies() {
    init_logging();
    let (state, effects) = update(feed_core::ViewState::new(config()), Msg::Mounted);
    assert!(!state.has_taxonomies_for_base());
    assert_eq!(
        effects.first(),
        Some(&feed_core::Effect::LoadTaxonomies {
            base_url: BASE.to_string()
        })
    );
}
