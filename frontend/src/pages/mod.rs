pub mod account;
pub mod dashboard;
pub mod home;
pub mod settings;

pub use account::Account;
pub use dashboard::Dashboard;
pub use home::Home;
pub use settings::Settings;
