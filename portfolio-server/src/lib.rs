pub mod handlers;
pub mod mailer;
pub mod routes;
pub mod state;

pub use mailer::{ContactMailer, MailSettings};
pub use routes::create_router;
pub use state::AppState;
