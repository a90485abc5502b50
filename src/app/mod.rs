pub mod controller;
pub mod event;
pub mod mode;
pub mod state;

pub use controller::Controller;
pub use mode::Visibility;
pub use state::AppState;
