// DOM anchors and platform tuning for the web frontend.
// Element ids are the contract with `index.html`.

// Mount points
pub const BACKGROUND_MOUNT_ID: &str = "bg-mount";
pub const HERO_PIN_ID: &str = "hero-pin";
pub const HERO_MOUNT_ID: &str = "hero-mount";
pub const GALLERY_GRID_ID: &str = "portfolio-grid";
pub const FEED_SENTINEL_ID: &str = "feed-sentinel";
pub const FEED_SPINNER_ID: &str = "feed-spinner";
pub const HEADLINE_WORD_SELECTOR: &str = ".headline-stagger .word";

// Modal overlay
pub const MODAL_ID: &str = "project-modal";
pub const MODAL_CLOSE_ID: &str = "modal-close";
pub const MODAL_IMAGE_ID: &str = "modal-image";
pub const MODAL_TITLE_ID: &str = "modal-title";
pub const MODAL_DESC_ID: &str = "modal-desc";

// Preloader overlay
pub const PRELOADER_ID: &str = "preloader";
pub const PRELOADER_BAR_ID: &str = "preloader-bar";

// Tiles
pub const TILE_CLASS: &str = "portfolio-item";
pub const TILE_TITLE_CLASS: &str = "project-title";
pub const TILE_FALLBACK_WIDTH: f32 = 300.0; // used when the container has no size yet
pub const TILE_FALLBACK_HEIGHT: f32 = 200.0;

// Feed sentinel
pub const SENTINEL_ROOT_MARGIN: &str = "100px";

// Clear colors (linear)
pub const BACKGROUND_CLEAR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
pub const TRANSPARENT_CLEAR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

// Hero lighting
pub const HEMI_SKY: [f32; 3] = [1.0, 1.0, 1.0];
pub const HEMI_GROUND: [f32; 3] = [0.267, 0.267, 0.267];
pub const HEMI_INTENSITY: f32 = 0.6;
pub const SUN_DIRECTION: [f32; 3] = [5.0, 10.0, 7.5];
pub const SUN_INTENSITY: f32 = 0.8;
pub const ISLAND_COLOR: [f32; 3] = [0.424, 0.169, 0.839];
pub const RING_EMISSIVE: [f32; 3] = [0.165, 0.0, 0.165];
pub const PARTICLE_ALPHA: f32 = 0.9;
pub const PARTICLE_SIZE: f32 = 0.03; // world units
