//! API endpoint modules.

pub mod books;
pub mod health;
pub mod openapi;
pub mod pages;
pub mod stream;

pub use books::configure_routes as configure_book_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use pages::configure_routes as configure_page_routes;
pub use stream::configure_routes as configure_stream_routes;
