// One vertex and one fragment source per surface type.
pub static BACKGROUND_VERT_WGSL: &str = include_str!("../shaders/background.vert.wgsl");
pub static BACKGROUND_FRAG_WGSL: &str = include_str!("../shaders/background.frag.wgsl");
pub static TILE_VERT_WGSL: &str = include_str!("../shaders/tile.vert.wgsl");
pub static TILE_FRAG_WGSL: &str = include_str!("../shaders/tile.frag.wgsl");
pub static HERO_VERT_WGSL: &str = include_str!("../shaders/hero.vert.wgsl");
pub static HERO_FRAG_WGSL: &str = include_str!("../shaders/hero.frag.wgsl");
