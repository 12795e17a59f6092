//! Pages
//!
//! Each page composes data hooks with the presentational components.

pub mod adventure;
pub mod adventure_result;
pub mod friends;
pub mod sign_in;
pub mod tasks;

pub use adventure::AdventurePage;
pub use adventure_result::AdventureResultPage;
pub use friends::FriendsPage;
pub use sign_in::SignInPanel;
pub use tasks::TasksPage;
