//! Screens. Each scene owns its state and is drawn by the shell once per
//! frame; network work is queued as [`Request`](crate::tasks::Request)s.

mod home;
mod ops;
mod predict;

pub use home::HomeScene;
pub use ops::OpsScene;
pub use predict::PredictScene;
