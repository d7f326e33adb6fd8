// Host-side tests for the web frontend's constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_unique_and_selector_free() {
    let ids = [
        BACKGROUND_MOUNT_ID,
        HERO_PIN_ID,
        HERO_MOUNT_ID,
        GALLERY_GRID_ID,
        FEED_SENTINEL_ID,
        FEED_SPINNER_ID,
        MODAL_ID,
        MODAL_CLOSE_ID,
        MODAL_IMAGE_ID,
        MODAL_TITLE_ID,
        MODAL_DESC_ID,
        PRELOADER_ID,
        PRELOADER_BAR_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(|c| matches!(c, '#' | '.' | ' ')), "{a} should be a bare id");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tile_fallback_is_landscape() {
    assert_eq!((TILE_FALLBACK_WIDTH, TILE_FALLBACK_HEIGHT), (300.0, 200.0));
    assert!(TILE_FALLBACK_WIDTH > TILE_FALLBACK_HEIGHT);
}

#[test]
fn sentinel_margin_is_a_css_length() {
    assert_eq!(SENTINEL_ROOT_MARGIN, "100px");
    let px: f32 = SENTINEL_ROOT_MARGIN.trim_end_matches("px").parse().unwrap();
    assert!(px > 0.0);
}

#[test]
fn clear_colors_are_normalized() {
    for c in BACKGROUND_CLEAR.iter().chain(TRANSPARENT_CLEAR.iter()) {
        assert!((0.0..=1.0).contains(c));
    }
    assert_eq!(BACKGROUND_CLEAR[3], 1.0);
    assert_eq!(TRANSPARENT_CLEAR[3], 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lighting_stays_in_range() {
    for c in HEMI_SKY
        .iter()
        .chain(HEMI_GROUND.iter())
        .chain(ISLAND_COLOR.iter())
        .chain(RING_EMISSIVE.iter())
    {
        assert!((0.0..=1.0).contains(c));
    }
    assert!(HEMI_INTENSITY > 0.0 && SUN_INTENSITY > 0.0);
    assert!(SUN_DIRECTION.iter().any(|v| *v != 0.0));
    assert!(PARTICLE_ALPHA > 0.0 && PARTICLE_ALPHA <= 1.0);
    assert!(PARTICLE_SIZE > 0.0);
}

#[test]
fn headline_selector_targets_words() {
    assert!(HEADLINE_WORD_SELECTOR.ends_with(".word"));
    assert!(TILE_CLASS != TILE_TITLE_CLASS);
}
