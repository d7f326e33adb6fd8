// Shared tuning constants for the folio frontend.

// Gallery feed
pub const DATASET_LEN: usize = 50;
pub const PAGE_SIZE: usize = 8;
pub const FEED_LATENCY_MS: u64 = 700; // simulated fetch delay per load step
pub const FEED_COOLDOWN_MS: u64 = 1000; // at most one load trigger per window
pub const PROJECT_IMAGE_VARIANTS: usize = 4;
pub const DEFAULT_DESCRIPTION: &str = "Amazing project details go here.";

// Modal transitions
pub const MODAL_ENTER_SEC: f32 = 0.5;
pub const MODAL_EXIT_SEC: f32 = 0.4;
pub const MODAL_HIDDEN_SCALE: f32 = 0.8; // scale at zero visibility

// Preloader
pub const PRELOADER_FILL_SEC: f32 = 1.6;
pub const PRELOADER_HOLD_SEC: f32 = 0.3;
pub const PRELOADER_FADE_SEC: f32 = 0.6;

// Headline intro
pub const HEADLINE_OFFSET_PX: f32 = 28.0;
pub const HEADLINE_STAGGER_SEC: f32 = 0.08;
pub const HEADLINE_DURATION_SEC: f32 = 0.7;
pub const HEADLINE_DELAY_SEC: f32 = 0.2;

// Scroll pinning
pub const PIN_DISTANCE_PX: f32 = 1500.0;
pub const SCRUB_LAG_SEC: f32 = 0.8; // time for displayed progress to catch up

// Hero camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: [f32; 3] = [0.0, 1.2, 6.0];

// Hero orbit drag, layered on the timeline camera
pub const ORBIT_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const ORBIT_MIN_DISTANCE: f32 = 2.5;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_DAMPING: f32 = 0.05; // share of the pending rotation applied per 60 Hz frame
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.2;
pub const ORBIT_POLAR_EPS: f32 = 1e-3;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // distance scale per wheel notch
pub const ORBIT_SETTLE_EPS: f32 = 1e-5;

// Hero scene layout
pub const ISLAND_Y: f32 = -0.3;
pub const ISLAND_BODY_Y: f32 = 0.2; // body offset inside the island group
pub const ISLAND_RADIUS: f32 = 1.4;
pub const RING_RADIUS: f32 = 1.8;
pub const RING_TUBE: f32 = 0.03;
pub const PARTICLE_COUNT: usize = 200;
pub const PARTICLE_RADIUS_MIN: f32 = 1.8;
pub const PARTICLE_RADIUS_MAX: f32 = 3.2;
pub const PARTICLE_Y_MIN: f32 = -0.6;
pub const PARTICLE_Y_MAX: f32 = 0.8;
pub const PARTICLE_SEED: u64 = 7;

// Idle motion, expressed per 60 Hz frame
pub const IDLE_REFERENCE_FPS: f32 = 60.0;
pub const ISLAND_IDLE_STEP: f32 = 0.003;
pub const ISLAND_IDLE_WOBBLE: f32 = 0.0007;
pub const ISLAND_IDLE_FREQ: f32 = 0.5;
pub const RING_IDLE_STEP: f32 = 0.005;
pub const RING_IDLE_WOBBLE: f32 = 0.0009;
pub const RING_IDLE_FREQ: f32 = 0.7;
pub const PARTICLE_SPIN_PER_SEC: f32 = 0.02;
