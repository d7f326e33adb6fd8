pub mod app;
pub mod clock;
pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod feed;
pub mod modal;
pub mod preloader;
pub mod scene;
pub mod scroll;
pub mod surface;
pub mod timeline;
pub mod tween;

pub use app::*;
pub use clock::*;
pub use config::*;
pub use easing::Easing;
pub use error::*;
pub use feed::*;
pub use modal::*;
pub use preloader::*;
pub use scene::*;
pub use scroll::*;
pub use surface::*;
pub use timeline::*;
pub use tween::*;
